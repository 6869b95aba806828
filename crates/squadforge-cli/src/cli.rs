use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_CONFIG: &str = "squadforge.toml";

#[derive(Parser, Debug)]
#[command(
    name = "squadforge",
    version,
    about = "Pick the best first, second and third choice squads from a roster export"
)]
pub struct Cli {
    #[arg(long, help = "Roster export (JSON with a top-level `data` array)")]
    pub roster: PathBuf,

    #[arg(short, long, help = "Club to select from (nationality with --national-squad)")]
    pub team: String,

    #[arg(short, long, num_args = 0.., value_name = "NAME", help = "Players to leave out")]
    pub remove: Vec<String>,

    #[arg(
        short,
        long,
        num_args = 1..,
        value_name = "ROLE=COUNT",
        help = "Formation as role=count pairs (defaults to the team's formation in the config)"
    )]
    pub formation: Vec<String>,

    #[arg(long, value_name = "AGE", help = "Upper bound on each squad's mean age")]
    pub age_constraint: Option<f64>,

    #[arg(short, long, default_value_t = 1, help = "Number of squads to print")]
    pub display: usize,

    #[arg(long, help = "Print per-role rankings")]
    pub results: bool,

    #[arg(long, help = "Print the formation being filled")]
    pub print_formation: bool,

    #[arg(long, help = "Print the displayed squads role by role, side by side")]
    pub side_by_side: bool,

    #[arg(long, value_name = "OFFSET", help = "Threshold offset below each player's best score")]
    pub score_threshold: Option<f64>,

    #[arg(long, help = "Zero roles the player's listed positions cannot cover")]
    pub use_positions: bool,

    #[arg(long, help = "Treat --team as a nationality")]
    pub national_squad: bool,

    #[arg(long, help = "Double every headcount (first choice plus backup)")]
    pub full_team: bool,

    #[arg(long, help = "Plain output without colors")]
    pub no_color: bool,

    #[arg(long, default_value = DEFAULT_CONFIG, help = "Configuration file")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation() {
        let cli = Cli::try_parse_from(["squadforge", "--roster", "sep2025.json", "-t", "Valencia"])
            .unwrap();
        assert_eq!(cli.roster, PathBuf::from("sep2025.json"));
        assert_eq!(cli.team, "Valencia");
        assert!(cli.remove.is_empty());
        assert!(cli.formation.is_empty());
        assert_eq!(cli.display, 1);
        assert_eq!(cli.age_constraint, None);
        assert_eq!(cli.score_threshold, None);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG));
        assert!(!cli.results && !cli.full_team && !cli.national_squad);
    }

    #[test]
    fn test_full_invocation() {
        let cli = Cli::try_parse_from([
            "squadforge",
            "--roster",
            "r.json",
            "--team",
            "Brazil",
            "--national-squad",
            "-r",
            "Stone",
            "Wall",
            "-f",
            "gkd=1",
            "cdd=2",
            "--age-constraint",
            "26.5",
            "-d",
            "3",
            "--results",
            "--print-formation",
            "--side-by-side",
            "--score-threshold",
            "1.5",
            "--use-positions",
            "--full-team",
            "--no-color",
            "--config",
            "other.toml",
        ])
        .unwrap();
        assert_eq!(cli.remove, ["Stone", "Wall"]);
        assert_eq!(cli.formation, ["gkd=1", "cdd=2"]);
        assert_eq!(cli.age_constraint, Some(26.5));
        assert_eq!(cli.display, 3);
        assert_eq!(cli.score_threshold, Some(1.5));
        assert!(cli.national_squad && cli.results && cli.print_formation && cli.side_by_side);
        assert!(cli.use_positions && cli.full_team && cli.no_color);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }

    #[test]
    fn test_required_arguments() {
        assert!(Cli::try_parse_from(["squadforge", "-t", "Valencia"]).is_err());
        assert!(Cli::try_parse_from(["squadforge", "--roster", "r.json"]).is_err());
        assert!(Cli::try_parse_from(["squadforge", "--roster", "r.json", "-t", "X", "-d", "two"]).is_err());
    }
}
