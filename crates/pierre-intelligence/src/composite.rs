// ABOUTME: Composite recipe scorer blending macro fit, taste fit and optional history signals
// ABOUTME: Produces the 0-100 total, macro/taste sub-scores, match percentage and breakdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Composite Scorer
//!
//! The base score combines how well a recipe's macros hit the caller's
//! targets with how well it fits stated tastes:
//!
//! ```text
//! base  = 0.7 · macroScore + 0.3 · tasteScore
//! total = base, optionally mixed with behavioral (0.15) and temporal (0.10)
//! ```
//!
//! Without both preferences and macro goals there is nothing to judge and
//! every field is neutral.

use pierre_core::constants::scores::NEUTRAL_SCORE;
use pierre_core::models::{MacroGoals, Recipe, SpiceLevel, SuperfoodCategory, UserPreferences};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::intelligence::{CompositeConfig, RankingConfig};
use crate::math::{clamp_score, clamp_unit, mean};
use crate::scorers::ScoringContext;
use crate::taxonomy::{ingredient_veto, matched_superfoods, IngredientVeto};

const LIKED_CUISINE_BONUS: f64 = 0.3;
const BASE_TASTE_MATCH: f64 = 0.5;
const COOK_OVERRUN_SLOPE: f64 = 0.5;

/// Per-factor view of a composite score, each on a 0-100 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeBreakdown {
    /// Macro closeness to targets
    pub macro_match: f64,
    /// Cuisine and spice fit
    pub taste_match: f64,
    /// Cook time versus preferred time
    pub cook_time_match: f64,
    /// 0 when vetoed by a banned ingredient or restriction, else 100
    pub ingredient_match: f64,
    /// Share of preferred superfood categories present
    pub superfood_boost: f64,
    /// Preferred superfood categories found in the recipe
    pub matched_superfoods: Vec<SuperfoodCategory>,
    /// Reason the ingredients were vetoed
    pub veto: Option<IngredientVeto>,
}

impl CompositeBreakdown {
    fn neutral() -> Self {
        Self {
            macro_match: NEUTRAL_SCORE,
            taste_match: NEUTRAL_SCORE,
            cook_time_match: NEUTRAL_SCORE,
            ingredient_match: NEUTRAL_SCORE,
            superfood_boost: NEUTRAL_SCORE,
            matched_superfoods: Vec::new(),
            veto: None,
        }
    }
}

/// Result of the composite scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Final rounded score, 0-100
    pub total: f64,
    /// Macro component, 0-100
    pub macro_score: f64,
    /// Taste component, 0-100
    pub taste_score: f64,
    /// Rounded base score before behavioral/temporal mixing
    pub match_percentage: f64,
    /// Per-factor details
    pub breakdown: CompositeBreakdown,
}

impl CompositeScore {
    /// Every field 50
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            total: NEUTRAL_SCORE,
            macro_score: NEUTRAL_SCORE,
            taste_score: NEUTRAL_SCORE,
            match_percentage: NEUTRAL_SCORE,
            breakdown: CompositeBreakdown::neutral(),
        }
    }

    /// Unrounded base score `macro_weight·macro + taste_weight·taste`
    #[must_use]
    pub fn base_score(&self, config: &CompositeConfig) -> f64 {
        config
            .macro_weight
            .mul_add(self.macro_score, config.taste_weight * self.taste_score)
    }
}

/// Blends macro fit, taste fit and optional behavioral/temporal signals
#[derive(Debug, Clone)]
pub struct CompositeScorer {
    config: CompositeConfig,
}

impl Default for CompositeScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeScorer {
    /// Scorer using the global configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: RankingConfig::global().composite.clone(),
        }
    }

    /// Scorer using an explicit configuration
    #[must_use]
    pub const fn with_config(config: CompositeConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &CompositeConfig {
        &self.config
    }

    /// `max(0, 1 − mean relative deviation)` over calories, protein, carbs, fat
    ///
    /// A non-positive target counts as maximal deviation.
    #[must_use]
    pub fn macro_match(recipe: &Recipe, goals: &MacroGoals) -> f64 {
        let actual = recipe.macros.as_array();
        let deviations = actual.iter().zip(goals.as_array()).map(|(a, target)| {
            if target <= 0.0 {
                1.0
            } else {
                (a - target).abs() / target
            }
        });
        let avg = mean(deviations).unwrap_or(1.0);
        (1.0 - avg).max(0.0)
    }

    /// Liked cuisine plus spice appetite, clamped to `[0, 1]`
    #[must_use]
    pub fn taste_match(recipe: &Recipe, prefs: &UserPreferences) -> f64 {
        let cuisine = if prefs.likes_cuisine(&recipe.cuisine) {
            LIKED_CUISINE_BONUS
        } else {
            0.0
        };
        let spice = match prefs.spice_level {
            Some(SpiceLevel::Mild) => 0.1,
            Some(SpiceLevel::Medium) => 0.2,
            Some(SpiceLevel::Spicy) => 0.3,
            None => 0.0,
        };
        clamp_unit(BASE_TASTE_MATCH + cuisine + spice)
    }

    /// 1 within the preferred time, decaying by half the relative overrun
    #[must_use]
    pub fn cook_time_match(recipe: &Recipe, prefs: &UserPreferences) -> f64 {
        let Some(preferred) = prefs.preferred_cook_time_mins else {
            return 1.0;
        };
        let cook = recipe.cook_time_mins;
        if cook <= preferred {
            return 1.0;
        }
        if preferred == 0 {
            return 0.0;
        }
        let excess = f64::from(cook - preferred);
        (1.0 - COOK_OVERRUN_SLOPE * excess / f64::from(preferred)).max(0.0)
    }

    /// Superfood boost in `[0, 1]` and the categories that produced it
    fn superfood_boost(
        &self,
        recipe: &Recipe,
        prefs: &UserPreferences,
    ) -> (f64, Vec<SuperfoodCategory>) {
        let preferred = prefs.superfood_set();
        let matched = matched_superfoods(&recipe.ingredients, &preferred);
        if matched.is_empty() {
            return (0.0, Vec::new());
        }
        let share = (matched.len() as f64 / preferred.len() as f64).min(1.0);
        let boost = share.max(self.config.superfood_boost_floor);
        (boost, matched.into_iter().collect())
    }

    /// Score one recipe
    ///
    /// `behavioral` and `temporal` are optional 0-100 signal scores mixed into
    /// the total when present.
    #[must_use]
    pub fn score(
        &self,
        recipe: &Recipe,
        preferences: Option<&UserPreferences>,
        macro_goals: Option<&MacroGoals>,
        behavioral: Option<f64>,
        temporal: Option<f64>,
    ) -> CompositeScore {
        let (Some(prefs), Some(goals)) = (preferences, macro_goals) else {
            return CompositeScore::neutral();
        };

        let macro_match = Self::macro_match(recipe, goals);
        let taste_match = Self::taste_match(recipe, prefs);
        let cook_time_match = Self::cook_time_match(recipe, prefs);
        let veto = ingredient_veto(&recipe.ingredients, prefs);
        let ingredient_match = if veto.is_some() { 0.0 } else { 1.0 };
        let (boost, matched) = self.superfood_boost(recipe, prefs);

        let factors = &self.config.taste_factors;
        let weighted = factors.ingredient_match.mul_add(
            ingredient_match,
            factors
                .taste_match
                .mul_add(taste_match, factors.cook_time_match * cook_time_match),
        );
        let factor_score = if factors.full_score_mass > f64::EPSILON {
            (100.0 * weighted / factors.full_score_mass).min(100.0)
        } else {
            NEUTRAL_SCORE
        };

        let macro_score = clamp_score(100.0 * macro_match);
        let taste_score =
            clamp_score(self.config.superfood_boost_points.mul_add(boost, factor_score));
        let base = self
            .config
            .macro_weight
            .mul_add(macro_score, self.config.taste_weight * taste_score);
        let total = self.mix_signals(base, behavioral, temporal);

        if let Some(reason) = &veto {
            debug!(recipe_id = %recipe.id, %reason, "Ingredient veto applied");
        }

        CompositeScore {
            total: clamp_score(total).round(),
            macro_score,
            taste_score,
            match_percentage: clamp_score(base).round(),
            breakdown: CompositeBreakdown {
                macro_match: macro_score,
                taste_match: 100.0 * taste_match,
                cook_time_match: 100.0 * cook_time_match,
                ingredient_match: 100.0 * ingredient_match,
                superfood_boost: 100.0 * boost,
                matched_superfoods: matched,
                veto,
            },
        }
    }

    /// Score with the preferences and goals of a scoring context
    #[must_use]
    pub fn score_in_context(
        &self,
        recipe: &Recipe,
        ctx: &ScoringContext,
        behavioral: Option<f64>,
        temporal: Option<f64>,
    ) -> CompositeScore {
        self.score(
            recipe,
            ctx.preferences.as_ref(),
            ctx.macro_goals.as_ref(),
            behavioral,
            temporal,
        )
    }

    fn mix_signals(&self, base: f64, behavioral: Option<f64>, temporal: Option<f64>) -> f64 {
        let mix = &self.config.signal_mix;
        let mut base_share = 1.0;
        let mut mixed = 0.0;
        if let Some(score) = behavioral {
            base_share -= mix.behavioral;
            mixed = mix.behavioral.mul_add(clamp_score(score), mixed);
        }
        if let Some(score) = temporal {
            base_share -= mix.temporal;
            mixed = mix.temporal.mul_add(clamp_score(score), mixed);
        }
        base_share.mul_add(base, mixed)
    }
}
