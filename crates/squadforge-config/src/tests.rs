//! Tests for selection configuration.

use super::*;
use squadforge_core::SelectionError;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        score_attribute = "Best Role"
        threshold_offset = 100
        squad_count = 2
        use_positions = true
        mean_age_limit = 26

        [solver]
        node_limit = 500000
        quiet = false

        [formations.Valencia]
        gkd = 1
        cdd = 2
        fbs = 1
        fba = 1
        dlps = 2
        wa = 2
        tfs = 1
        afa = 1
    "#;

    let config = SelectorConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.score_attribute, "Best Role");
    assert_eq!(config.threshold_offset, 100.0);
    assert_eq!(config.squad_count, 2);
    assert!(config.use_positions);
    assert!(!config.national_squad);
    assert_eq!(config.mean_age_limit, Some(26.0));
    assert_eq!(config.solver.node_limit, Some(500_000));
    assert!(!config.solver.quiet);
    assert_eq!(config.solver.time_limit(), None);

    let valencia = config.formation("Valencia").unwrap();
    let roles: Vec<_> = valencia.entries().iter().map(|(r, _)| r.as_str()).collect();
    assert_eq!(roles, ["gkd", "cdd", "fbs", "fba", "dlps", "wa", "tfs", "afa"]);
    assert_eq!(valencia.to_formation().unwrap().total_headcount(), 11);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        national_squad: true
        squad_count: 1
        solver:
          seconds_spent_limit: 10
        formations:
          Brazil:
            skd: 1
            bpdd: 3
            cwba: 2
    "#;

    let config = SelectorConfig::from_yaml_str(yaml).unwrap();
    assert!(config.national_squad);
    assert_eq!(config.squad_count, 1);
    assert_eq!(config.solver.time_limit(), Some(Duration::from_secs(10)));
    assert!(config.solver.quiet, "quiet defaults to true inside [solver]");

    let brazil = config.formation("Brazil").unwrap().to_formation().unwrap();
    assert_eq!(brazil.to_string(), "skd=1 bpdd=3 cwba=2");
}

#[test]
fn test_defaults() {
    let config = SelectorConfig::from_toml_str("").unwrap();
    assert_eq!(config, SelectorConfig::default());
    assert_eq!(config.score_attribute, DEFAULT_SCORE_ATTRIBUTE);
    assert_eq!(config.threshold_offset, 0.5);
    assert_eq!(config.squad_count, 3);
    assert!(config.solver.quiet);
    assert!(config.formations.is_empty());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let result = SelectorConfig::load("does/not/exist/squadforge.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
    assert_eq!(result.unwrap_or_default().squad_count, 3);
}

#[test]
fn test_validation() {
    assert!(matches!(
        SelectorConfig::from_toml_str("squad_count = 0"),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        SelectorConfig::from_toml_str("mean_age_limit = -3.0"),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        SelectorConfig::from_toml_str("threshold_offset = nan"),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        SelectorConfig::from_toml_str("squad_count = \"three\""),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_negative_headcount_rejected() {
    let result = SelectorConfig::from_toml_str(
        r#"
        [formations.Roma]
        gkd = -1
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_builder() {
    let config = SelectorConfig::new()
        .with_threshold_offset(1.5)
        .with_squad_count(2)
        .with_mean_age_limit(25.0)
        .with_use_positions(true)
        .with_national_squad(true)
        .with_formation("Roma", FormationConfig::from_pairs([("gkd", 1), ("afa", 1)]));

    assert_eq!(config.threshold_offset, 1.5);
    assert_eq!(config.squad_count, 2);
    assert_eq!(config.mean_age_limit, Some(25.0));
    assert!(config.use_positions);
    assert!(config.national_squad);
    assert_eq!(config.formation("Roma").unwrap().len(), 2);
    assert!(config.formation("roma").is_none(), "team lookup is exact");
}

#[test]
fn test_parse_pairs() {
    let formation = FormationConfig::parse_pairs(&["gkd=1", " cdd = 2 ", "afa=1"]).unwrap();
    assert_eq!(
        formation.entries(),
        [
            ("gkd".to_string(), 1),
            ("cdd".to_string(), 2),
            ("afa".to_string(), 1)
        ]
    );

    for bad in ["gkd", "=1", "gkd=x", "gkd=-1"] {
        assert!(
            matches!(FormationConfig::parse_pairs(&[bad]), Err(ConfigError::Invalid(_))),
            "{} should be rejected",
            bad
        );
    }
    assert!(matches!(
        FormationConfig::parse_pairs(&["gkd=1", "gkd=2"]),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_to_formation_validates_codes() {
    let unknown = FormationConfig::from_pairs([("gkd", 1), ("xyz", 1)]);
    assert_eq!(
        unknown.to_formation(),
        Err(SelectionError::UnknownRoleCode("xyz".to_string()))
    );

    let zero = FormationConfig::from_pairs([("gkd", 0)]);
    assert!(matches!(
        zero.to_formation(),
        Err(SelectionError::InvalidFormation(_))
    ));

    assert!(matches!(
        FormationConfig::new().to_formation(),
        Err(SelectionError::InvalidFormation(_))
    ));
}

#[test]
fn test_serialize_keeps_order() {
    let config = SelectorConfig::new().with_formation(
        "Milan",
        FormationConfig::from_pairs([("gkd", 1), ("cdd", 2), ("afa", 1)]),
    );
    let text = toml::to_string(&config).unwrap();
    let gkd = text.find("gkd").unwrap();
    let cdd = text.find("cdd").unwrap();
    let afa = text.find("afa").unwrap();
    assert!(gkd < cdd && cdd < afa, "{}", text);

    let parsed = SelectorConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_formation_round_trip_from_core() {
    let core = FormationConfig::from_pairs([("wa", 2), ("gkd", 1)])
        .to_formation()
        .unwrap();
    let back = FormationConfig::from(&core);
    assert_eq!(back.entries()[0], ("wa".to_string(), 2));
}

#[test]
fn test_shipped_config() {
    let config = SelectorConfig::from_toml_str(include_str!("../../../squadforge.toml")).unwrap();
    assert_eq!(config.formations.len(), 5);
    for (team, formation) in &config.formations {
        let formation = formation
            .to_formation()
            .unwrap_or_else(|e| panic!("{}: {}", team, e));
        assert_eq!(formation.total_headcount(), 11, "{}", team);
    }
    assert!(config.formation("RB Leipzig").is_some());
}
