//! Tests for threshold suppression.

use super::*;
use squadforge_test::club::club_pool;
use squadforge_test::{player, pool, SCORE_ATTRIBUTE};

#[test]
fn test_missing_column() {
    let pool = pool(vec![PlayerRecord::new("A").with_metric("cdd", 10.0)]);
    let err = suppress(&pool, SCORE_ATTRIBUTE, 0.5).unwrap_err();
    assert_eq!(err, SelectionError::MissingColumn(SCORE_ATTRIBUTE.to_string()));
}

#[test]
fn test_missing_column_on_empty_pool_without_schema() {
    let err = suppress(&Pool::default(), SCORE_ATTRIBUTE, 0.5).unwrap_err();
    assert!(matches!(err, SelectionError::MissingColumn(_)));
}

#[test]
fn test_filtered_empty_pool_keeps_schema() {
    let empty = club_pool().filtered(|_| false);
    let result = suppress(&empty, SCORE_ATTRIBUTE, 0.5).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_cutoff_is_inclusive() {
    let pool = pool(vec![player("A", &[("cdd", 14.0), ("fbs", 13.5), ("dms", 13.49)])]);
    let result = suppress(&pool, SCORE_ATTRIBUTE, 0.5).unwrap();
    let a = result.get("A").unwrap();
    assert_eq!(a.role_score("cdd"), 14.0);
    assert_eq!(a.role_score("fbs"), 13.5, "equal to cutoff is kept");
    assert_eq!(a.role_score("dms"), 0.0, "strictly below cutoff is zeroed");
    assert_eq!(a.metric(SCORE_ATTRIBUTE), Some(14.0), "anchor untouched");
}

#[test]
fn test_suppression_property_over_offsets() {
    let source = club_pool();
    for offset in [0.0, 0.25, 0.5, 1.0, 2.5, 10.0, 100.0] {
        let result = suppress(&source, SCORE_ATTRIBUTE, offset).unwrap();
        assert_eq!(result.len(), source.len());

        for (before, after) in source.iter().zip(result.iter()) {
            assert_eq!(before.name(), after.name(), "row order preserved");
            let cutoff = before.metric(SCORE_ATTRIBUTE).unwrap() - offset;
            for (key, &value) in before.metrics() {
                if key == SCORE_ATTRIBUTE {
                    continue;
                }
                let expected = if value < cutoff { 0.0 } else { value };
                assert_eq!(
                    after.metric(key),
                    Some(expected),
                    "player {} role {} offset {}",
                    before.name(),
                    key,
                    offset
                );
            }
        }
    }
}

#[test]
fn test_player_without_anchor_is_fully_suppressed() {
    let pool = pool(vec![
        player("A", &[("cdd", 12.0)]),
        PlayerRecord::new("B").with_metric("cdd", 15.0),
    ]);
    let result = suppress(&pool, SCORE_ATTRIBUTE, 0.5).unwrap();
    assert_eq!(result.get("A").unwrap().role_score("cdd"), 12.0);
    assert_eq!(result.get("B").unwrap().role_score("cdd"), 0.0);
}

#[test]
fn test_source_pool_not_mutated() {
    let source = pool(vec![player("A", &[("cdd", 14.0), ("dms", 9.0)])]);
    let _ = ThresholdSuppressor::new(SCORE_ATTRIBUTE, 0.5).apply(&source).unwrap();
    assert_eq!(source.get("A").unwrap().role_score("dms"), 9.0);
}

#[test]
fn test_age_is_not_a_role_attribute() {
    let source = pool(vec![player("A", &[("cdd", 14.0)]).with_age(17.0)]);
    let result = suppress(&source, SCORE_ATTRIBUTE, 0.5).unwrap();
    assert_eq!(result.get("A").unwrap().age(), 17.0);
}
