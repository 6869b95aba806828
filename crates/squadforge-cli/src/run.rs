use std::io::ErrorKind;
use std::path::Path;

use squadforge::{
    ConfigError, Formation, FormationConfig, Roster, RosterError, RosterFilter, SelectionError,
    SelectionPipeline, SelectionReport, SelectionRequest, SelectorConfig,
};
use squadforge::console::render::series_label;
use squadforge::console::Renderer;
use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("no formation given and none configured for '{0}'")]
    NoFormation(String),
}

/// Reads the config file; a missing file means defaults.
pub fn load_config(path: &Path) -> Result<SelectorConfig, CliError> {
    match SelectorConfig::load(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            Ok(SelectorConfig::default())
        }
        Err(err) => Err(err.into()),
    }
}

/// Command line flags layered over the config file.
pub fn apply_overrides(mut config: SelectorConfig, cli: &Cli) -> Result<SelectorConfig, CliError> {
    if let Some(offset) = cli.score_threshold {
        config.threshold_offset = offset;
    }
    config.use_positions |= cli.use_positions;
    config.national_squad |= cli.national_squad;
    config.squad_count = config.squad_count.max(cli.display);
    config.validate()?;
    Ok(config)
}

/// `-f` pairs if given, otherwise the team's configured formation.
pub fn resolve_formation(cli: &Cli, config: &SelectorConfig) -> Result<Formation, CliError> {
    let entries = if cli.formation.is_empty() {
        config
            .formation(&cli.team)
            .cloned()
            .ok_or_else(|| CliError::NoFormation(cli.team.clone()))?
    } else {
        FormationConfig::parse_pairs(&cli.formation)?
    };
    let formation = entries.to_formation()?;
    Ok(if cli.full_team {
        formation.doubled()
    } else {
        formation
    })
}

pub fn request(cli: &Cli, config: &SelectorConfig, formation: Formation) -> SelectionRequest {
    let filter = RosterFilter::club(cli.team.as_str())
        .with_national_squad(config.national_squad)
        .removing(cli.remove.iter().cloned());
    let request = SelectionRequest::new(filter, formation);
    match cli.age_constraint {
        Some(limit) => request.with_mean_age_limit(limit),
        None => request,
    }
}

pub fn execute(cli: &Cli) -> Result<SelectionReport, CliError> {
    let config = apply_overrides(load_config(&cli.config)?, cli)?;
    let formation = resolve_formation(cli, &config)?;
    let roster = Roster::from_json_file(&cli.roster)?;
    let request = request(cli, &config, formation);
    Ok(SelectionPipeline::new(config).run(&roster, &request)?)
}

/// Everything the run prints, in order.
pub fn render(cli: &Cli, report: &SelectionReport) -> String {
    let renderer = if cli.no_color {
        Renderer::plain()
    } else {
        Renderer::colored()
    };
    let mut sections = Vec::new();

    if cli.print_formation {
        sections.push(renderer.formation(&report.formation));
    }
    if cli.results {
        sections.push(renderer.rollup(&report.rollup));
    }
    for (index, squad) in report.series.squads().iter().take(cli.display).enumerate() {
        sections.push(renderer.squad(&format!("{} choice", series_label(index)), squad));
    }
    if cli.side_by_side {
        sections.push(renderer.side_by_side(&report.series, &report.formation));
    }
    if let Some(failure) = report.series.failure() {
        if failure.squad_index < cli.display {
            sections.push(renderer.failure(failure));
        }
    }
    sections.join("\n")
}

/// True when fewer squads were built than the user asked to see.
pub fn is_short(cli: &Cli, report: &SelectionReport) -> bool {
    report.series.len() < cli.display
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use squadforge::{Squad, SquadMember, SquadSeries};

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["squadforge", "--roster", "r.json", "-t", "Valencia"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn report(squads: usize, fail: bool) -> SelectionReport {
        let formation = Formation::new([("gkd", 1)]).unwrap();
        let mut series = SquadSeries::new();
        for i in 0..squads {
            let member = SquadMember {
                name: format!("Keeper {}", i + 1),
                role: "gkd".to_string(),
                score: 14.0 - i as f64,
            };
            series.push(Squad::new(vec![member], 14.0 - i as f64));
        }
        if fail {
            series.fail(SelectionError::Infeasible("no eligible player for role 'gkd'".to_string()));
        }
        SelectionReport {
            rollup: Default::default(),
            formation,
            series,
        }
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = load_config(Path::new("does/not/exist/squadforge.toml")).unwrap();
        assert_eq!(config, SelectorConfig::default());
    }

    #[test]
    fn test_overrides() {
        let cli = parse(&["--score-threshold", "2", "--use-positions", "-d", "5"]);
        let config = apply_overrides(SelectorConfig::default(), &cli).unwrap();
        assert_eq!(config.threshold_offset, 2.0);
        assert!(config.use_positions);
        assert!(!config.national_squad);
        assert_eq!(config.squad_count, 5, "enough squads to display");

        let bad = parse(&["--score-threshold", "NaN"]);
        assert!(matches!(
            apply_overrides(SelectorConfig::default(), &bad),
            Err(CliError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_formation_resolution() {
        let config = SelectorConfig::new().with_formation(
            "Valencia",
            FormationConfig::from_pairs([("gkd", 1), ("cdd", 2)]),
        );

        let configured = resolve_formation(&parse(&[]), &config).unwrap();
        assert_eq!(configured.to_string(), "gkd=1 cdd=2");

        let explicit = resolve_formation(&parse(&["-f", "afa=1"]), &config).unwrap();
        assert_eq!(explicit.to_string(), "afa=1");

        let doubled = resolve_formation(&parse(&["--full-team"]), &config).unwrap();
        assert_eq!(doubled.to_string(), "gkd=2 cdd=4");

        let err = resolve_formation(&parse(&[]), &SelectorConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::NoFormation(team) if team == "Valencia"));

        let err = resolve_formation(&parse(&["-f", "zzz=1"]), &config).unwrap_err();
        assert!(matches!(err, CliError::Selection(SelectionError::UnknownRoleCode(_))));

        let err = resolve_formation(&parse(&["-f", "gkd"]), &config).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid(_))));

        let err = resolve_formation(&parse(&["-f", "gkd=3000000000", "--full-team"]), &config).unwrap_err();
        assert!(matches!(err, CliError::Selection(SelectionError::InvalidFormation(_))));
    }

    #[test]
    fn test_request_carries_flags() {
        let cli = parse(&["-r", "Stone", "--age-constraint", "25"]);
        let config = SelectorConfig::new().with_national_squad(true);
        let formation = Formation::new([("gkd", 1)]).unwrap();
        let request = request(&cli, &config, formation);
        assert_eq!(request.filter.team, "Valencia");
        assert!(request.filter.national_squad);
        assert_eq!(request.filter.remove, ["Stone"]);
        assert_eq!(request.mean_age_limit, Some(25.0));
    }

    #[test]
    fn test_render_sections() {
        let cli = parse(&["--no-color", "-d", "2", "--print-formation"]);
        let text = render(&cli, &report(3, false));
        assert!(text.starts_with("Squad formation:\n  gkd: 1\n"));
        assert!(text.contains("First choice"));
        assert!(text.contains("Second choice"));
        assert!(!text.contains("Third choice"));
        assert!(!is_short(&cli, &report(3, false)));
    }

    #[test]
    fn test_render_partial_series() {
        let cli = parse(&["--no-color", "-d", "3"]);
        let partial = report(1, true);
        let text = render(&cli, &partial);
        assert!(text.contains("First choice"));
        assert!(text.contains("Second squad could not be built: Infeasible"));
        assert!(is_short(&cli, &partial));

        let quiet = parse(&["--no-color"]);
        assert!(!render(&quiet, &partial).contains("could not be built"));
    }
}
