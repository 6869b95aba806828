//! Colorful console output for squad selection.
//!
//! Provides a custom `tracing` layer that formats selection events with
//! colors, plus plain-string renderers for squads, rollups and formations.
//!
//! ## Log Levels
//!
//! - **INFO**: Pipeline, pool transform and per-squad start/end events
//! - **WARN**: Malformed position text, a series stopping early
//! - **DEBUG**: Branch-and-bound search summaries

pub mod render;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use render::Renderer;

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static PIPELINE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Events from these target prefixes are rendered.
const TARGET_PREFIX: &str = "squadforge";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing with `squadforge=info` unless
/// `RUST_LOG` says otherwise.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let default_directive = "squadforge=info"
            .parse::<Directive>()
            .unwrap_or_else(|_| LevelFilter::INFO.into());
        let filter = EnvFilter::builder()
            .with_default_directive(default_directive)
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SelectorConsoleLayer)
            .try_init();
    });
}

// Marks the start of a pipeline run for elapsed time tracking.
fn mark_pipeline_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    PIPELINE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since pipeline start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = PIPELINE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = format!("SquadForge v{} - squad selection", VERSION);
    let rule = "─".repeat(banner.chars().count());

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", rule.bright_cyan());
    let _ = writeln!(stdout, "{}", banner.bright_white().bold());
    let _ = writeln!(stdout, "{}", rule.bright_cyan());
    let _ = stdout.flush();
}

/// A tracing layer that formats selection events with colors.
pub struct SelectorConsoleLayer;

impl<S: Subscriber> Layer<S> for SelectorConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with(TARGET_PREFIX) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    team: Option<String>,
    backend: Option<String>,
    player: Option<String>,
    error: Option<String>,
    player_count: Option<u64>,
    column_count: Option<u64>,
    role_count: Option<u64>,
    headcount: Option<u64>,
    zeroed: Option<u64>,
    selected: Option<u64>,
    requested: Option<u64>,
    squad_index: Option<u64>,
    remaining: Option<u64>,
    nodes: Option<u64>,
    improvements: Option<u64>,
    objective: Option<f64>,
    offset: Option<f64>,
    mean_age_limit: Option<f64>,
    complete: Option<bool>,
    aborted: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "team" => self.team = Some(s.trim_matches('"').to_string()),
            "error" => self.error = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "player_count" => self.player_count = Some(value),
            "column_count" => self.column_count = Some(value),
            "role_count" => self.role_count = Some(value),
            "headcount" => self.headcount = Some(value),
            "zeroed" => self.zeroed = Some(value),
            "selected" => self.selected = Some(value),
            "requested" => self.requested = Some(value),
            "squad_index" => self.squad_index = Some(value),
            "remaining" => self.remaining = Some(value),
            "nodes" => self.nodes = Some(value),
            "improvements" => self.improvements = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            "offset" => self.offset = Some(value),
            "mean_age_limit" => self.mean_age_limit = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "complete" => self.complete = Some(value),
            "aborted" => self.aborted = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "team" => self.team = Some(value.to_string()),
            "backend" => self.backend = Some(value.to_string()),
            "player" => self.player = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "roster_loaded" => format_roster_loaded(v),
        "pipeline_start" => format_pipeline_start(v),
        "suppress" => format_suppress(v),
        "restrict" => format_restrict(v),
        "malformed_position" => format_malformed_position(v),
        "missing_age" => format_missing_age(v),
        "select_start" => format_select_start(v),
        "select_end" => format_select_end(v),
        "search_end" => format_search_end(v, level),
        "series_stopped" => format_series_stopped(v),
        "series_end" => format_series_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_roster_loaded(v: &EventVisitor) -> String {
    format!(
        "{} {} Roster │ {} players │ {} numeric columns",
        format_elapsed(),
        "◇".bright_cyan(),
        count(v.player_count).bright_yellow(),
        count(v.column_count).bright_yellow(),
    )
}

fn format_pipeline_start(v: &EventVisitor) -> String {
    mark_pipeline_start();
    let team = v.team.as_deref().unwrap_or("?");

    format!(
        "{} {} Selecting │ {} │ {} players",
        format_elapsed(),
        "▶".bright_green().bold(),
        team.white().bold(),
        count(v.player_count).bright_yellow(),
    )
}

fn format_suppress(v: &EventVisitor) -> String {
    format!(
        "{} {} Threshold │ offset {} │ {} scores zeroed",
        format_elapsed(),
        "◆".bright_blue(),
        v.offset.unwrap_or(0.0).bright_yellow(),
        count(v.zeroed).bright_yellow(),
    )
}

fn format_restrict(v: &EventVisitor) -> String {
    format!(
        "{} {} Positions │ {} roles │ {} scores zeroed",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.role_count).bright_yellow(),
        count(v.zeroed).bright_yellow(),
    )
}

fn format_malformed_position(v: &EventVisitor) -> String {
    format!(
        "{} {} No positions for {} │ {}",
        format_elapsed(),
        "!".bright_red().bold(),
        v.player.as_deref().unwrap_or("?").white().bold(),
        v.error.as_deref().unwrap_or("").bright_black(),
    )
}

fn format_missing_age(v: &EventVisitor) -> String {
    format!(
        "{} {} No age for {} │ {}",
        format_elapsed(),
        "!".bright_red().bold(),
        v.player.as_deref().unwrap_or("?").white().bold(),
        "neutral under an age limit".bright_black(),
    )
}

fn format_select_start(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} Squad │ {} players │ {} roles │ {} slots",
        format_elapsed(),
        "▶".bright_blue(),
        count(v.player_count).bright_yellow(),
        count(v.role_count).bright_yellow(),
        count(v.headcount).bright_yellow(),
    );

    if let Some(limit) = v.mean_age_limit {
        output.push_str(&format!(" │ mean age ≤ {}", limit.bright_yellow()));
    }

    output
}

fn format_select_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Squad selected │ {} players │ objective {} │ {} nodes",
        format_elapsed(),
        "◀".bright_blue(),
        count(v.selected).white(),
        format!("{:.2}", v.objective.unwrap_or(0.0)).bright_green().bold(),
        count(v.nodes).bright_magenta(),
    )
}

fn format_search_end(v: &EventVisitor, level: Level) -> String {
    if level != Level::DEBUG {
        return String::new();
    }

    let status = if v.aborted.unwrap_or(false) {
        "aborted".bright_red().to_string()
    } else {
        "proven".bright_green().to_string()
    };

    format!(
        "{} {} Search │ {} nodes │ {} improvements │ {}",
        format_elapsed(),
        "·".bright_black(),
        count(v.nodes).bright_black(),
        count(v.improvements).bright_black(),
        status,
    )
}

fn format_series_stopped(v: &EventVisitor) -> String {
    format!(
        "{} {} Squad {} not built │ {} players left │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        (v.squad_index.unwrap_or(0) + 1).bright_yellow(),
        count(v.remaining).bright_yellow(),
        v.error.as_deref().unwrap_or("").bright_red(),
    )
}

fn format_series_end(v: &EventVisitor) -> String {
    let complete = v.complete.unwrap_or(false);
    let status = if complete {
        "COMPLETE".bright_green().bold().to_string()
    } else {
        "PARTIAL".bright_yellow().bold().to_string()
    };

    format!(
        "{} {} Series │ {}/{} squads │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        count(v.selected).white().bold(),
        count(v.requested).white(),
        status,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_event_renders_nothing() {
        assert!(format_event(&visitor("incumbent"), Level::TRACE).is_empty());
        assert!(format_event(&EventVisitor::default(), Level::INFO).is_empty());
    }

    #[test]
    fn test_missing_age_names_player() {
        let v = EventVisitor {
            player: Some("Guest".to_string()),
            ..visitor("missing_age")
        };
        let line = format_event(&v, Level::WARN);
        assert!(line.contains("No age for"));
        assert!(line.contains("Guest"));
    }

    #[test]
    fn test_select_end_contains_objective() {
        let v = EventVisitor {
            selected: Some(11),
            objective: Some(156.7),
            nodes: Some(12_345),
            ..visitor("select_end")
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("156.70"));
        assert!(line.contains("12,345"));
    }

    #[test]
    fn test_search_end_only_at_debug() {
        let v = EventVisitor {
            nodes: Some(10),
            ..visitor("search_end")
        };
        assert!(format_event(&v, Level::INFO).is_empty());
        assert!(format_event(&v, Level::DEBUG).contains("proven"));
    }

    #[test]
    fn test_series_end_partial() {
        let v = EventVisitor {
            selected: Some(1),
            requested: Some(3),
            complete: Some(false),
            ..visitor("series_end")
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("PARTIAL"));
    }

    #[test]
    fn test_series_stopped_is_one_based() {
        let v = EventVisitor {
            squad_index: Some(1),
            error: Some("Infeasible: no selection".to_string()),
            ..visitor("series_stopped")
        };
        let line = format_event(&v, Level::WARN);
        assert!(line.contains("Squad"));
        assert!(line.contains('2'));
        assert!(line.contains("Infeasible"));
    }
}
