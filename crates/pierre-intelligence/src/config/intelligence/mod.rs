// ABOUTME: Ranking engine configuration for recipe scoring and recommendation
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Ranking Configuration Module
//!
//! Configuration is organized into domain-specific modules:
//! - `composite` - Macro/taste blend and signal mixing
//! - `collaborative` - User and item similarity, neighbour limits, timeouts
//! - `learning` - Dynamic weight adjustment
//! - `planning` - Daily plan orchestration
//!
//! Values start from the defaults below, are overridden by `PIERRE_RANKING_*`
//! environment variables, then validated.

pub mod collaborative;
pub mod composite;
pub mod error;
pub mod learning;
pub mod planning;

pub use collaborative::{CollaborativeConfig, ItemSimilarityWeights, UserSimilarityWeights};
pub use composite::{CompositeConfig, SignalMixWeights, TasteFactorWeights};
pub use error::ConfigError;
pub use learning::WeightLearningConfig;
pub use planning::DailyPlanConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static RANKING_CONFIG: OnceLock<RankingConfig> = OnceLock::new();

/// Tolerance used when checking that weight groups sum to 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Main ranking configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Composite scorer
    pub composite: CompositeConfig,
    /// Collaborative filtering engine
    pub collaborative: CollaborativeConfig,
    /// Dynamic weight adjustment
    pub weight_learning: WeightLearningConfig,
    /// Daily plan orchestrator
    pub daily_plan: DailyPlanConfig,
}

impl RankingConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        RANKING_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load ranking config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a weight group does not sum to 1.0 or a threshold is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_finite()?;

        let composite = &self.composite;
        if (composite.macro_weight + composite.taste_weight - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(
                "composite macro_weight + taste_weight must equal 1.0",
            ));
        }
        if composite.taste_factors.total() <= 0.0 {
            return Err(ConfigError::InvalidWeights(
                "composite taste factor weights must be positive",
            ));
        }
        if composite.taste_factors.full_score_mass <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "taste factor full_score_mass must be positive",
            ));
        }
        if composite.superfood_boost_points < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "superfood_boost_points must not be negative",
            ));
        }
        if composite.signal_mix.behavioral + composite.signal_mix.temporal >= 1.0 {
            return Err(ConfigError::InvalidWeights(
                "behavioral + temporal signal mix must be below 1.0",
            ));
        }

        self.validate_collaborative()?;
        self.validate_learning()?;

        let plan = &self.daily_plan;
        if (plan.composite_weight + plan.heuristic_weight - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(
                "daily plan composite_weight + heuristic_weight must equal 1.0",
            ));
        }
        if plan.good_threshold > plan.excellent_threshold {
            return Err(ConfigError::InvalidRange(
                "good_threshold must be <= excellent_threshold",
            ));
        }
        Ok(())
    }

    /// NaN slips through every range comparison, so reject it up front
    fn validate_finite(&self) -> Result<(), ConfigError> {
        let composite = &self.composite;
        let collab = &self.collaborative;
        let learning = &self.weight_learning;
        let plan = &self.daily_plan;
        let values = [
            composite.macro_weight,
            composite.taste_weight,
            composite.taste_factors.taste_match,
            composite.taste_factors.cook_time_match,
            composite.taste_factors.ingredient_match,
            composite.taste_factors.full_score_mass,
            composite.superfood_boost_points,
            composite.superfood_boost_floor,
            composite.signal_mix.behavioral,
            composite.signal_mix.temporal,
            collab.user_similarity_threshold,
            collab.item_similarity_threshold,
            collab.blend_weight,
            collab.user_weights.total(),
            collab.item_weights.total(),
            learning.default_weights.internal_sum(),
            learning.max_cold_start_confidence,
            learning.adjustment_rate,
            learning.min_internal_weight,
            learning.sample_confidence_share,
            learning.correlation_confidence_share,
            learning.min_confidence,
            plan.composite_weight,
            plan.heuristic_weight,
            plan.excellent_threshold,
            plan.good_threshold,
            plan.calorie_proximity,
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ConfigError::ValueOutOfRange(
                "configuration values must be finite numbers",
            ));
        }
        Ok(())
    }

    fn validate_collaborative(&self) -> Result<(), ConfigError> {
        let collab = &self.collaborative;
        if (collab.user_weights.total() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(
                "user similarity weights must sum to 1.0",
            ));
        }
        if (collab.item_weights.total() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(
                "item similarity weights must sum to 1.0",
            ));
        }
        for threshold in [
            collab.user_similarity_threshold,
            collab.item_similarity_threshold,
            collab.blend_weight,
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValueOutOfRange(
                    "collaborative thresholds and blend weight must be within [0, 1]",
                ));
            }
        }
        if collab.collaborator_timeout_ms == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "collaborator_timeout_ms must be positive",
            ));
        }
        Ok(())
    }

    fn validate_learning(&self) -> Result<(), ConfigError> {
        let learning = &self.weight_learning;
        if (learning.default_weights.internal_sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(
                "default discriminatory + base_score + health_goal weights must sum to 1.0",
            ));
        }
        if learning.min_samples == 0 || learning.confidence_ramp_samples == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_samples and confidence_ramp_samples must be positive",
            ));
        }
        if (learning.sample_confidence_share + learning.correlation_confidence_share - 1.0).abs()
            > WEIGHT_SUM_TOLERANCE
        {
            return Err(ConfigError::InvalidWeights(
                "confidence shares must sum to 1.0",
            ));
        }
        if learning.adjustment_rate < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "adjustment_rate must not be negative",
            ));
        }
        if !(0.0..0.5).contains(&learning.min_internal_weight) {
            return Err(ConfigError::InvalidRange(
                "min_internal_weight must be within [0, 0.5)",
            ));
        }
        Ok(())
    }

    /// Parse environment variable and assign to target if present
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Composite
        Self::apply_env_var(
            "PIERRE_RANKING_MACRO_WEIGHT",
            &mut self.composite.macro_weight,
        )?;
        Self::apply_env_var(
            "PIERRE_RANKING_TASTE_WEIGHT",
            &mut self.composite.taste_weight,
        )?;
        Self::apply_env_var(
            "PIERRE_RANKING_SUPERFOOD_BOOST_POINTS",
            &mut self.composite.superfood_boost_points,
        )?;

        // Collaborative filtering
        Self::apply_env_var(
            "PIERRE_RANKING_USER_SIMILARITY_THRESHOLD",
            &mut self.collaborative.user_similarity_threshold,
        )?;
        Self::apply_env_var(
            "PIERRE_RANKING_MAX_SIMILAR_USERS",
            &mut self.collaborative.max_similar_users,
        )?;
        Self::apply_env_var(
            "PIERRE_RANKING_ITEM_SIMILARITY_THRESHOLD",
            &mut self.collaborative.item_similarity_threshold,
        )?;
        Self::apply_env_var(
            "PIERRE_RANKING_MAX_SIMILAR_ITEMS",
            &mut self.collaborative.max_similar_items,
        )?;
        Self::apply_env_var(
            "PIERRE_RANKING_COLLABORATOR_TIMEOUT_MS",
            &mut self.collaborative.collaborator_timeout_ms,
        )?;
        Self::apply_env_var(
            "PIERRE_RANKING_COLLABORATIVE_BLEND_WEIGHT",
            &mut self.collaborative.blend_weight,
        )?;

        // Weight learning
        Self::apply_env_var(
            "PIERRE_RANKING_MIN_LEARNING_SAMPLES",
            &mut self.weight_learning.min_samples,
        )?;
        Self::apply_env_var(
            "PIERRE_RANKING_ADJUSTMENT_RATE",
            &mut self.weight_learning.adjustment_rate,
        )?;

        // Daily plan
        Self::apply_env_var(
            "PIERRE_RANKING_PLAN_COMPOSITE_WEIGHT",
            &mut self.daily_plan.composite_weight,
        )?;
        Self::apply_env_var(
            "PIERRE_RANKING_PLAN_HEURISTIC_WEIGHT",
            &mut self.daily_plan.heuristic_weight,
        )?;
        Self::apply_env_var(
            "PIERRE_RANKING_PLAN_DISTINCT_MEALS",
            &mut self.daily_plan.distinct_meals,
        )?;

        Ok(self)
    }
}
