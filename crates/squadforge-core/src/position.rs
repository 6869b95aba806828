//! Parsing of free-text position descriptors such as `"DM (R)"` or
//! `"AM/DM (L/C)"`.
//!
//! Position tokens are uppercase letter runs joined by `/`, taken from text
//! outside parentheses. Side flags come from the parenthetical text.

use std::collections::BTreeSet;

use crate::error::{Result, SelectionError};
use crate::role::PositionCategory;

/// Side flags parsed from the parenthetical part of a position descriptor.
///
/// Sides are parsed but not consulted by role filtering; they are kept for
/// matching formations that distinguish left and right slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sides {
    pub right: bool,
    pub left: bool,
    pub centre: bool,
}

impl Sides {
    fn from_text(text: &str) -> Self {
        Self {
            right: text.contains('R'),
            left: text.contains('L'),
            centre: text.contains('C'),
        }
    }
}

/// The generic categories and sides a player can occupy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedPositionSet {
    tokens: Vec<String>,
    categories: BTreeSet<PositionCategory>,
    sides: Sides,
}

impl AllowedPositionSet {
    /// Parses a position descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MalformedPositionText`] when no position token
    /// can be extracted.
    ///
    /// # Example
    ///
    /// ```
    /// use squadforge_core::{AllowedPositionSet, PositionCategory};
    ///
    /// let set = AllowedPositionSet::parse("AM/DM (L/C)").unwrap();
    /// assert!(set.allows(PositionCategory::AttackingMidfielder));
    /// assert!(set.allows(PositionCategory::DefensiveMidfielder));
    /// assert!(!set.allows(PositionCategory::Midfielder));
    /// assert!(set.sides().left && set.sides().centre && !set.sides().right);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let set = Self::parse_lossy(text);
        if set.tokens.is_empty() {
            return Err(SelectionError::MalformedPositionText(text.to_string()));
        }
        Ok(set)
    }

    /// Parses a position descriptor, yielding an empty set when nothing can
    /// be extracted.
    pub fn parse_lossy(text: &str) -> Self {
        let mut tokens = Vec::new();
        let mut side_text = String::new();
        let mut current = String::new();
        let mut depth = 0usize;

        for ch in text.chars() {
            match ch {
                '(' => {
                    push_token(&mut tokens, &mut current);
                    depth += 1;
                }
                ')' => depth = depth.saturating_sub(1),
                _ if depth > 0 => side_text.push(ch),
                'A'..='Z' | '/' => current.push(ch),
                _ => push_token(&mut tokens, &mut current),
            }
        }
        push_token(&mut tokens, &mut current);

        let categories = PositionCategory::ALL
            .into_iter()
            .filter(|category| {
                // A bare token like "DM" is its own single component.
                tokens
                    .iter()
                    .any(|token| token.split('/').any(|part| part == category.code()))
            })
            .collect();

        Self {
            tokens,
            categories,
            sides: Sides::from_text(&side_text),
        }
    }

    /// Returns true if the player can occupy the category.
    pub fn allows(&self, category: PositionCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Extracted position tokens, e.g. `["AM/DM"]`.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn categories(&self) -> &BTreeSet<PositionCategory> {
        &self.categories
    }

    pub fn sides(&self) -> Sides {
        self.sides
    }

    /// True when no category is allowed.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn push_token(tokens: &mut Vec<String>, current: &mut String) {
    let token = current.trim_matches('/');
    if token.chars().any(|c| c.is_ascii_uppercase()) {
        tokens.push(token.to_string());
    }
    current.clear();
}
