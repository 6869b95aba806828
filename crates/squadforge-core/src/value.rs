//! Money amounts as they appear in roster exports.
//!
//! Values look like `"£50M - 75M"`, `"£200K"` or `"Not for sale"`; wages like
//! `"£155,000 p/w"`. Nothing here feeds selection.

/// A transfer value range in currency units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TransferValue {
    pub min: f64,
    pub max: f64,
}

impl TransferValue {
    /// Parses `"£50M - 75M"` or a single amount such as `"£200K"`.
    ///
    /// Returns `None` for text without a leading amount ("Not for sale",
    /// "Unknown").
    ///
    /// ```
    /// use squadforge_core::TransferValue;
    ///
    /// let value = TransferValue::parse("£50M - 75M").unwrap();
    /// assert_eq!(value.min, 50e6);
    /// assert_eq!(value.mean(), 62.5e6);
    /// assert!(TransferValue::parse("Not for sale").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let mut bounds = text.split(" - ");
        let min = parse_amount(bounds.next()?)?;
        let max = match bounds.next() {
            Some(upper) => parse_amount(upper)?,
            None => min,
        };
        Some(Self { min, max })
    }

    /// Midpoint of the range; the amount itself for a single value.
    pub fn mean(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Parses a weekly wage such as `"£155,000 p/w"`.
pub fn parse_wage(text: &str) -> Option<f64> {
    let amount = text.split_whitespace().next()?;
    parse_amount(amount)
}

/// `"£1.5M"` → 1.5e6, `"75K"` → 75e3, `"12,500"` → 12500.
fn parse_amount(text: &str) -> Option<f64> {
    let text = text
        .trim()
        .trim_start_matches(|c: char| matches!(c, '£' | '$' | '€'))
        .replace(',', "");
    let (digits, scale) = match text.chars().last()? {
        'M' | 'm' => (&text[..text.len() - 1], 1e6),
        'K' | 'k' => (&text[..text.len() - 1], 1e3),
        _ => (text.as_str(), 1.0),
    };
    let value: f64 = digits.parse().ok()?;
    value.is_finite().then_some(value * scale)
}
