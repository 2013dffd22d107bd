// ABOUTME: Tests for ranking configuration defaults, validation and environment overrides
// ABOUTME: Environment-mutating tests run serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_recipe_ranker::intelligence::config::intelligence::ConfigError;
use pierre_recipe_ranker::intelligence::RankingConfig;
use serial_test::serial;
use std::env;

#[test]
fn test_default_config_validation() {
    let config = RankingConfig::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_composite_weights() {
    let mut config = RankingConfig::default();
    config.composite.macro_weight = 0.9;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWeights(_))
    ));
}

#[test]
fn test_signal_mix_must_leave_room_for_base() {
    let mut config = RankingConfig::default();
    config.composite.signal_mix.behavioral = 0.6;
    config.composite.signal_mix.temporal = 0.4;
    assert!(config.validate().is_err());
}

#[test]
fn test_collaborative_thresholds_in_unit_range() {
    let mut config = RankingConfig::default();
    config.collaborative.blend_weight = 1.5;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    let mut config = RankingConfig::default();
    config.collaborative.collaborator_timeout_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_learning_requires_positive_sample_counts() {
    let mut config = RankingConfig::default();
    config.weight_learning.min_samples = 0;
    assert!(config.validate().is_err());

    let mut config = RankingConfig::default();
    config.weight_learning.min_internal_weight = 0.6;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_plan_thresholds_ordered() {
    let mut config = RankingConfig::default();
    config.daily_plan.good_threshold = 90.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_config_serializes_round_trip() {
    let config = RankingConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let parsed: RankingConfig = serde_json::from_str(&json).unwrap();
    assert!(parsed.validate().is_ok());
    assert_eq!(parsed.collaborative.max_similar_users, 20);
}

#[test]
#[serial]
fn test_environment_variable_override() {
    env::set_var("PIERRE_RANKING_MAX_SIMILAR_USERS", "5");
    env::set_var("PIERRE_RANKING_COLLABORATIVE_BLEND_WEIGHT", "0.25");
    env::set_var("PIERRE_RANKING_PLAN_DISTINCT_MEALS", "true");

    let config = RankingConfig::load().unwrap();

    assert_eq!(config.collaborative.max_similar_users, 5);
    assert!((config.collaborative.blend_weight - 0.25).abs() < 0.001);
    assert!(config.daily_plan.distinct_meals);

    env::remove_var("PIERRE_RANKING_MAX_SIMILAR_USERS");
    env::remove_var("PIERRE_RANKING_COLLABORATIVE_BLEND_WEIGHT");
    env::remove_var("PIERRE_RANKING_PLAN_DISTINCT_MEALS");
}

#[test]
#[serial]
fn test_unparseable_environment_value() {
    env::set_var("PIERRE_RANKING_MIN_LEARNING_SAMPLES", "many");
    let result = RankingConfig::load();
    env::remove_var("PIERRE_RANKING_MIN_LEARNING_SAMPLES");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
#[serial]
fn test_environment_override_is_validated() {
    env::set_var("PIERRE_RANKING_MACRO_WEIGHT", "0.95");
    let result = RankingConfig::load();
    env::remove_var("PIERRE_RANKING_MACRO_WEIGHT");

    assert!(matches!(result, Err(ConfigError::InvalidWeights(_))));
}

#[test]
#[serial]
fn test_nan_override_is_rejected() {
    env::set_var("PIERRE_RANKING_MACRO_WEIGHT", "NaN");
    let result = RankingConfig::load();
    env::remove_var("PIERRE_RANKING_MACRO_WEIGHT");

    assert!(matches!(result, Err(ConfigError::ValueOutOfRange(_))));
}

#[test]
#[serial]
fn test_infinite_override_is_rejected() {
    env::set_var("PIERRE_RANKING_ADJUSTMENT_RATE", "inf");
    let result = RankingConfig::load();
    env::remove_var("PIERRE_RANKING_ADJUSTMENT_RATE");

    assert!(matches!(result, Err(ConfigError::ValueOutOfRange(_))));
}

#[test]
fn test_non_finite_and_negative_values_fail_validation() {
    let mut config = RankingConfig::default();
    config.composite.taste_factors.full_score_mass = f64::NAN;
    assert!(matches!(config.validate(), Err(ConfigError::ValueOutOfRange(_))));

    let mut config = RankingConfig::default();
    config.composite.taste_factors.full_score_mass = 0.0;
    assert!(matches!(config.validate(), Err(ConfigError::ValueOutOfRange(_))));

    let mut config = RankingConfig::default();
    config.composite.superfood_boost_points = -1.0;
    assert!(matches!(config.validate(), Err(ConfigError::ValueOutOfRange(_))));

    let mut config = RankingConfig::default();
    config.weight_learning.adjustment_rate = -0.5;
    assert!(matches!(config.validate(), Err(ConfigError::ValueOutOfRange(_))));
}
