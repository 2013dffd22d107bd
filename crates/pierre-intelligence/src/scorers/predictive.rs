// ABOUTME: Predictive scorer estimating future engagement from history and recent trends
// ABOUTME: Historical pattern fit, recent trend alignment and success probability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engagement prediction
//!
//! Three point budgets make up the total: historical pattern (40), recent
//! trend (30) and success probability (30). Each is reported in the
//! breakdown as a 0-100 component weighted by its share of the budget.

use chrono::{Duration, Timelike};
use pierre_core::constants::time_windows::TREND_WINDOW_DAYS;
use pierre_core::models::{InteractionRecord, Recipe};

use super::{ScoreComponent, ScoreResult, Scorer, ScoringContext, SignalKind};
use crate::history::HistoryView;
use crate::math::{mean, symmetric_closeness};
use crate::temporal::{MealPeriod, TemporalContext};

const HISTORICAL_POINTS: f64 = 40.0;
const TREND_POINTS: f64 = 30.0;
const SUCCESS_POINTS: f64 = 30.0;

const COMPONENTS: &[(&str, f64)] = &[
    ("historical_pattern", 0.40),
    ("recent_trend", 0.30),
    ("success_probability", 0.30),
];

const HISTORY_CUISINE_SHARE: f64 = 0.35;
const HISTORY_MACRO_SHARE: f64 = 0.30;
const HISTORY_COOK_SHARE: f64 = 0.20;
const HISTORY_TEMPORAL_SHARE: f64 = 0.15;

const TREND_CUISINE_SHARE: f64 = 0.6;
const TREND_CALORIE_SHARE: f64 = 0.4;

/// Ratio used when history gives no evidence either way
const NO_EVIDENCE: f64 = 0.5;
/// Slack applied to the observed macro range of liked recipes
const MACRO_RANGE_SLACK_LOW: f64 = 0.9;
const MACRO_RANGE_SLACK_HIGH: f64 = 1.1;
/// Minimum distance scale for cook-time range decay
const COOK_RANGE_MIN_SCALE: f64 = 10.0;

fn same_cuisine(record: &InteractionRecord, recipe: &Recipe) -> bool {
    record
        .recipe
        .cuisine
        .trim()
        .eq_ignore_ascii_case(recipe.cuisine.trim())
}

/// Scores the likelihood the user will engage with the recipe
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictiveScorer;

impl PredictiveScorer {
    fn cuisine_share(recipe: &Recipe, history: &HistoryView<'_>) -> f64 {
        let tally = history.cuisine(&recipe.cuisine);
        if tally.total == 0 {
            return NO_EVIDENCE;
        }
        tally.positive as f64 / tally.total as f64
    }

    /// Fraction of the four macros inside the slackened range of liked recipes
    fn macro_range_fit(recipe: &Recipe, positives: &[&InteractionRecord]) -> f64 {
        if positives.is_empty() {
            return NO_EVIDENCE;
        }
        let actual = recipe.macros.as_array();
        let inside = (0..4)
            .filter(|&i| {
                let (low, high) = positives.iter().map(|r| r.recipe.macros.as_array()[i]).fold(
                    (f64::INFINITY, f64::NEG_INFINITY),
                    |(low, high), v| (low.min(v), high.max(v)),
                );
                actual[i] >= MACRO_RANGE_SLACK_LOW * low && actual[i] <= MACRO_RANGE_SLACK_HIGH * high
            })
            .count();
        inside as f64 / 4.0
    }

    fn cook_range_fit(recipe: &Recipe, positives: &[&InteractionRecord]) -> f64 {
        let Some(low) = positives.iter().map(|r| r.recipe.cook_time_mins).min() else {
            return NO_EVIDENCE;
        };
        let high = positives
            .iter()
            .map(|r| r.recipe.cook_time_mins)
            .max()
            .unwrap_or(low);
        let cook = recipe.cook_time_mins;
        if (low..=high).contains(&cook) {
            return 1.0;
        }
        let distance = if cook < low { low - cook } else { cook - high };
        let scale = f64::from(high).max(COOK_RANGE_MIN_SCALE);
        (1.0 - f64::from(distance) / scale).max(0.0)
    }

    fn temporal_fit(positives: &[&InteractionRecord], temporal: Option<&TemporalContext>) -> f64 {
        let Some(time) = temporal else {
            return NO_EVIDENCE;
        };
        if positives.is_empty() {
            return NO_EVIDENCE;
        }
        let in_period = positives
            .iter()
            .filter(|r| MealPeriod::from_hour(r.timestamp.hour()) == time.meal_period)
            .count();
        in_period as f64 / positives.len() as f64
    }

    fn historical_pattern(
        recipe: &Recipe,
        history: &HistoryView<'_>,
        positives: &[&InteractionRecord],
        temporal: Option<&TemporalContext>,
    ) -> f64 {
        let blend = HISTORY_TEMPORAL_SHARE.mul_add(
            Self::temporal_fit(positives, temporal),
            HISTORY_COOK_SHARE.mul_add(
                Self::cook_range_fit(recipe, positives),
                HISTORY_CUISINE_SHARE.mul_add(
                    Self::cuisine_share(recipe, history),
                    HISTORY_MACRO_SHARE * Self::macro_range_fit(recipe, positives),
                ),
            ),
        );
        HISTORICAL_POINTS * blend
    }

    fn recent_trend(recipe: &Recipe, positives: &[&InteractionRecord], ctx: &ScoringContext) -> f64 {
        let cutoff = ctx.now - Duration::days(TREND_WINDOW_DAYS);
        let recent: Vec<&InteractionRecord> = positives
            .iter()
            .copied()
            .filter(|r| r.timestamp >= cutoff && r.timestamp <= ctx.now)
            .collect();
        if recent.is_empty() {
            return TREND_POINTS / 2.0;
        }
        let cuisine_share =
            recent.iter().filter(|r| same_cuisine(r, recipe)).count() as f64 / recent.len() as f64;
        let calorie_closeness = mean(recent.iter().map(|r| r.recipe.macros.calories))
            .map_or(NO_EVIDENCE, |avg| {
                symmetric_closeness(recipe.macros.calories, avg)
            });
        TREND_POINTS
            * TREND_CUISINE_SHARE.mul_add(cuisine_share, TREND_CALORIE_SHARE * calorie_closeness)
    }

    fn success_probability(
        recipe: &Recipe,
        history: &HistoryView<'_>,
        positives: &[&InteractionRecord],
    ) -> f64 {
        let engaged = positives.len() + history.counts().negative;
        if engaged == 0 || positives.is_empty() {
            return 0.0;
        }
        let engagement_rate = positives.len() as f64 / engaged as f64;
        let calorie = mean(positives.iter().map(|r| r.recipe.macros.calories))
            .map_or(0.0, |avg| symmetric_closeness(recipe.macros.calories, avg));
        let cook = mean(positives.iter().map(|r| f64::from(r.recipe.cook_time_mins)))
            .map_or(0.0, |avg| {
                symmetric_closeness(f64::from(recipe.cook_time_mins), avg)
            });
        SUCCESS_POINTS * engagement_rate * 0.5 * (calorie + cook)
    }
}

impl Scorer for PredictiveScorer {
    fn kind(&self) -> SignalKind {
        SignalKind::Predictive
    }

    fn evaluate(&self, recipe: &Recipe, ctx: &ScoringContext) -> ScoreResult {
        let Some(history) = ctx.history() else {
            return ScoreResult::neutral(self.kind(), COMPONENTS);
        };
        let positives: Vec<&InteractionRecord> =
            history.records().filter(|r| r.kind.is_positive()).collect();
        let historical =
            Self::historical_pattern(recipe, &history, &positives, ctx.temporal.as_ref());
        let trend = Self::recent_trend(recipe, &positives, ctx);
        let success = Self::success_probability(recipe, &history, &positives);

        ScoreResult::from_components(
            self.kind(),
            vec![
                ScoreComponent::new(
                    "historical_pattern",
                    100.0 * historical / HISTORICAL_POINTS,
                    0.40,
                ),
                ScoreComponent::new("recent_trend", 100.0 * trend / TREND_POINTS, 0.30),
                ScoreComponent::new(
                    "success_probability",
                    100.0 * success / SUCCESS_POINTS,
                    0.30,
                ),
            ],
        )
    }
}
