//! Terminal rendering of formations, rankings and squads.
//!
//! Renderers return strings; printing is left to the caller. Colors can be
//! turned off for pipes and tests with [`Renderer::plain`].

use std::fmt::{Display, Write};

use owo_colors::{OwoColorize, Style};
use squadforge_core::{Formation, SeriesFailure, Squad, SquadSeries};
use squadforge_scoring::PositionRollup;

const NAME_WIDTH: usize = 20;
const ROLE_WIDTH: usize = 10;

/// Color band for a role score.
///
/// | score | style |
/// |-------|-------|
/// | > 15  | bright white, bold |
/// | ≥ 13  | green |
/// | ≥ 12  | yellow |
/// | ≥ 11  | bright red |
/// | else  | bright black |
pub fn score_style(score: f64) -> Style {
    if score > 15.0 {
        Style::new().bright_white().bold()
    } else if score >= 13.0 {
        Style::new().green()
    } else if score >= 12.0 {
        Style::new().yellow()
    } else if score >= 11.0 {
        Style::new().bright_red()
    } else {
        Style::new().bright_black()
    }
}

/// "First", "Second", "Third", then "#4", "#5", ...
pub fn series_label(index: usize) -> String {
    match index {
        0 => "First".to_string(),
        1 => "Second".to_string(),
        2 => "Third".to_string(),
        n => format!("#{}", n + 1),
    }
}

/// Formats terminal output with or without ANSI colors.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::colored()
    }
}

impl Renderer {
    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    fn paint(&self, text: impl Display, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn score(&self, score: f64) -> String {
        self.paint(format!("{:.1}", score), score_style(score))
    }

    fn heading(&self, text: &str) -> String {
        self.paint(text, Style::new().cyan().bold())
    }

    fn name(&self, name: &str, width: usize) -> String {
        self.paint(format!("{:<width$}", name, width = width), Style::new().white().bold())
    }

    /// One line per role: `gkd: 1`.
    pub fn formation(&self, formation: &Formation) -> String {
        let mut out = self.paint("Squad formation:", Style::new().yellow().bold());
        out.push('\n');
        for slot in formation.slots() {
            let _ = writeln!(
                out,
                "  {} {}",
                self.paint(format!("{}:", slot.role), Style::new().green().bold()),
                slot.headcount
            );
        }
        out
    }

    /// Eligible players per role, best first.
    pub fn rollup(&self, rollup: &PositionRollup) -> String {
        let mut out = self.paint("Results by role:", Style::new().bold());
        out.push('\n');
        for ranking in rollup.iter() {
            let _ = write!(out, "\n{}\n", self.heading(&format!("{}:", ranking.role.to_uppercase())));
            if ranking.players.is_empty() {
                let _ = writeln!(out, "  {}", self.paint("(no eligible players)", Style::new().bright_black()));
            }
            for player in &ranking.players {
                let _ = writeln!(out, "  {}{}", self.name(&player.name, NAME_WIDTH), self.score(player.score));
            }
        }
        out
    }

    /// A squad as a name / role / score table.
    pub fn squad(&self, title: &str, squad: &Squad) -> String {
        let mut out = format!(
            "{} {}\n",
            self.paint(title, Style::new().bold()),
            self.paint(format!("(total {:.1})", squad.objective()), Style::new().bright_black())
        );
        let header = format!("{:<name$}{:<role$}{}", "Name", "Role", "Score", name = NAME_WIDTH, role = ROLE_WIDTH);
        let _ = writeln!(out, "{}", self.heading(&header));
        for member in squad.members() {
            let _ = writeln!(
                out,
                "{}{}{}",
                self.name(&member.name, NAME_WIDTH),
                self.name(&member.role, ROLE_WIDTH),
                self.score(member.score)
            );
        }
        out
    }

    /// Every squad of a series, role by role:
    /// `cdd: First: Stone 14.8 / Wall 14.1 / Second: Brick 12.9 / Post 12.0`.
    pub fn side_by_side(&self, series: &SquadSeries, formation: &Formation) -> String {
        let mut out = self.paint("Squads side by side:", Style::new().bold());
        out.push('\n');
        for role in formation.roles() {
            let segments: Vec<String> = series
                .squads()
                .iter()
                .enumerate()
                .filter_map(|(index, squad)| {
                    let entries: Vec<String> = squad
                        .in_role(role)
                        .map(|m| format!("{} {}", self.paint(&m.name, Style::new().white().bold()), self.score(m.score)))
                        .collect();
                    if entries.is_empty() {
                        return None;
                    }
                    Some(format!(
                        "{} {}",
                        self.heading(&format!("{}:", series_label(index))),
                        entries.join(" / ")
                    ))
                })
                .collect();
            if segments.is_empty() {
                continue;
            }
            let separator = format!(" {} ", self.paint("/", Style::new().yellow()));
            let _ = writeln!(
                out,
                "{} {}",
                self.paint(format!("{}:", role), Style::new().green().bold()),
                segments.join(&separator)
            );
        }
        out
    }

    /// The error that ended a series.
    pub fn failure(&self, failure: &SeriesFailure) -> String {
        self.paint(
            format!(
                "{} squad could not be built: {}",
                series_label(failure.squad_index),
                failure.error
            ),
            Style::new().bright_red().bold(),
        )
    }
}
