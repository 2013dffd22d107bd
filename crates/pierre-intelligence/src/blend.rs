// ABOUTME: Weighted blend of per-signal scores into one ranking score
// ABOUTME: Internal triple blend mixed with the optional signals that had real context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::scores::NEUTRAL_SCORE;
use pierre_core::models::{ScoringWeights, WeightedSignal};
use serde::{Deserialize, Serialize};

use crate::math::clamp_score;
use crate::scorers::ScoreResult;

/// Signal scores for one candidate, ready to blend
///
/// Optional signals are `None` when their scorer lacked context; they then
/// take no share of the blend.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalScores {
    /// Discriminatory score
    pub discriminatory: f64,
    /// Composite base score
    pub base_score: f64,
    /// Health-goal score
    pub health_goal: f64,
    /// Behavioral score
    pub behavioral: Option<f64>,
    /// Temporal score
    pub temporal: Option<f64>,
    /// Enhanced/convenience score
    pub enhanced: Option<f64>,
    /// External enrichment score
    pub external: Option<f64>,
}

impl SignalScores {
    /// Collect scores from scorer results and the composite base score
    ///
    /// Internal signals use their total even when neutral; optional signals
    /// are kept only when evaluated with real context.
    #[must_use]
    pub fn from_results(results: &[ScoreResult], base_score: f64) -> Self {
        let mut scores = Self {
            base_score,
            discriminatory: NEUTRAL_SCORE,
            health_goal: NEUTRAL_SCORE,
            ..Self::default()
        };
        for result in results {
            let evaluated = result.evaluated.then_some(result.total);
            match result.signal.weighted_signal() {
                Some(WeightedSignal::Discriminatory) => scores.discriminatory = result.total,
                Some(WeightedSignal::HealthGoal) => scores.health_goal = result.total,
                Some(WeightedSignal::Behavioral) => scores.behavioral = evaluated,
                Some(WeightedSignal::Temporal) => scores.temporal = evaluated,
                Some(WeightedSignal::Enhanced) => scores.enhanced = evaluated,
                Some(WeightedSignal::External) => scores.external = evaluated,
                Some(WeightedSignal::BaseScore) | None => {}
            }
        }
        scores
    }

    fn extras(&self) -> [(WeightedSignal, Option<f64>); 4] {
        [
            (WeightedSignal::Behavioral, self.behavioral),
            (WeightedSignal::Temporal, self.temporal),
            (WeightedSignal::Enhanced, self.enhanced),
            (WeightedSignal::External, self.external),
        ]
    }
}

/// Combines signal scores with blend weights
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalBlend;

impl SignalBlend {
    /// `internal·(1 − Σw_k) + Σw_k·s_k` over the optional signals present
    ///
    /// The internal blend is `wd·disc + wb·base + wh·health` with the weights
    /// normalized first. If the optional weights present exceed 1 they are
    /// scaled down to sum to 1.
    #[must_use]
    pub fn combine(weights: &ScoringWeights, scores: &SignalScores) -> f64 {
        let weights = weights.normalized();
        let internal = weights.discriminatory.mul_add(
            clamp_score(scores.discriminatory),
            weights.base_score.mul_add(
                clamp_score(scores.base_score),
                weights.health_goal * clamp_score(scores.health_goal),
            ),
        );

        let present: Vec<(f64, f64)> = scores
            .extras()
            .into_iter()
            .filter_map(|(signal, score)| score.map(|s| (weights.get(signal), clamp_score(s))))
            .collect();
        let extra_mass: f64 = present.iter().map(|(w, _)| w).sum();
        let scale = if extra_mass > 1.0 { 1.0 / extra_mass } else { 1.0 };
        let extra_sum = present
            .iter()
            .fold(0.0, |acc, (w, s)| (w * scale).mul_add(*s, acc));

        clamp_score((1.0 - extra_mass * scale).mul_add(internal, extra_sum))
    }
}
