// ABOUTME: Behavioral scorer rating recipes against the user's interaction history
// ABOUTME: Cuisine engagement, cook-time and macro similarity, ingredient affinity, recency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Duration;
use pierre_core::constants::scores::NEUTRAL_SCORE;
use pierre_core::constants::time_windows::RECENCY_WINDOW_DAYS;
use pierre_core::models::Recipe;

use super::{ScoreComponent, ScoreResult, Scorer, ScoringContext, SignalKind};
use crate::history::HistoryView;
use crate::math::{closeness_to_target, mean};
use crate::taxonomy::ingredient_keys;

const CUISINE_WEIGHT: f64 = 0.30;
const COOK_TIME_WEIGHT: f64 = 0.20;
const MACRO_WEIGHT: f64 = 0.30;
const INGREDIENT_WEIGHT: f64 = 0.15;
const RECENCY_WEIGHT: f64 = 0.05;

const COMPONENTS: &[(&str, f64)] = &[
    ("cuisine_engagement", CUISINE_WEIGHT),
    ("cook_time_similarity", COOK_TIME_WEIGHT),
    ("macro_similarity", MACRO_WEIGHT),
    ("ingredient_affinity", INGREDIENT_WEIGHT),
    ("recency", RECENCY_WEIGHT),
];

/// Scores how closely a recipe resembles what the user engaged with before
#[derive(Debug, Clone, Copy, Default)]
pub struct BehavioralScorer;

impl BehavioralScorer {
    /// Positive share of interactions with the same cuisine
    fn cuisine_engagement(recipe: &Recipe, history: &HistoryView<'_>) -> f64 {
        let tally = history.cuisine(&recipe.cuisine);
        if tally.total == 0 {
            return NEUTRAL_SCORE;
        }
        100.0 * tally.positive as f64 / tally.total as f64
    }

    fn cook_time_similarity(recipe: &Recipe, history: &HistoryView<'_>) -> f64 {
        let Some(avg) = history.mean_positive_cook_minutes() else {
            return NEUTRAL_SCORE;
        };
        let deviation = (f64::from(recipe.cook_time_mins) - avg).abs() / avg.max(1.0);
        100.0 * (1.0 - deviation).max(0.0)
    }

    fn macro_similarity(recipe: &Recipe, history: &HistoryView<'_>) -> f64 {
        let Some(targets) = history.mean_positive_macros() else {
            return NEUTRAL_SCORE;
        };
        let actual = recipe.macros.as_array();
        let closeness = actual
            .iter()
            .zip(targets)
            .map(|(&value, target)| closeness_to_target(value, target));
        mean(closeness).map_or(NEUTRAL_SCORE, |c| 100.0 * c)
    }

    /// Ingredient keys of the recipe found in liked vs disliked snapshots
    fn ingredient_affinity(recipe: &Recipe, history: &HistoryView<'_>) -> f64 {
        let keys = ingredient_keys(&recipe.ingredients);
        if keys.is_empty() {
            return NEUTRAL_SCORE;
        }
        let overlap = history.ingredient_overlap(&keys);
        let total = overlap.positive + overlap.negative;
        if total == 0 {
            return NEUTRAL_SCORE;
        }
        100.0 * overlap.positive as f64 / total as f64
    }

    fn recency(history: &HistoryView<'_>, ctx: &ScoringContext) -> f64 {
        match history.recent_count(ctx.now, Duration::days(RECENCY_WINDOW_DAYS)) {
            0 => 50.0,
            1..=2 => 60.0,
            3..=4 => 80.0,
            _ => 100.0,
        }
    }
}

impl Scorer for BehavioralScorer {
    fn kind(&self) -> SignalKind {
        SignalKind::Behavioral
    }

    fn evaluate(&self, recipe: &Recipe, ctx: &ScoringContext) -> ScoreResult {
        let Some(history) = ctx.history() else {
            return ScoreResult::neutral(self.kind(), COMPONENTS);
        };
        ScoreResult::from_components(
            self.kind(),
            vec![
                ScoreComponent::new(
                    "cuisine_engagement",
                    Self::cuisine_engagement(recipe, &history),
                    CUISINE_WEIGHT,
                ),
                ScoreComponent::new(
                    "cook_time_similarity",
                    Self::cook_time_similarity(recipe, &history),
                    COOK_TIME_WEIGHT,
                ),
                ScoreComponent::new(
                    "macro_similarity",
                    Self::macro_similarity(recipe, &history),
                    MACRO_WEIGHT,
                ),
                ScoreComponent::new(
                    "ingredient_affinity",
                    Self::ingredient_affinity(recipe, &history),
                    INGREDIENT_WEIGHT,
                ),
                ScoreComponent::new("recency", Self::recency(&history, ctx), RECENCY_WEIGHT),
            ],
        )
    }
}
