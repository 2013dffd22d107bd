// ABOUTME: Per-user blend weight learning from liked versus disliked recipe history
// ABOUTME: Signal correlations, confidence estimation and normalized weight interpolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Dynamic Weight Adjustment
//!
//! A signal that scored liked recipes higher than disliked ones is a good
//! predictor for this user, so its weight grows. The learned weights are
//! blended with the defaults in proportion to how confident the learner is.
//!
//! All paths leave through [`WeightLearner::learn_weights`], which normalizes
//! the internal triple exactly once at its exit.

use pierre_core::models::{InteractionRecord, Recipe, ScoringWeights, UserBehaviorData, WeightedSignal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::composite::CompositeScorer;
use crate::config::intelligence::{CompositeConfig, RankingConfig, WeightLearningConfig};
use crate::math::mean;
use crate::scorers::{ScorerRegistry, ScoringContext};
use crate::temporal::TemporalContext;

/// Historical signal scores of one recipe the user reacted to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    /// Whether the reaction was positive
    pub positive: bool,
    /// Score of each weighted signal at the time of the reaction
    pub scores: BTreeMap<WeightedSignal, f64>,
}

impl SignalSample {
    /// Sample with no scores yet
    #[must_use]
    pub const fn new(positive: bool) -> Self {
        Self {
            positive,
            scores: BTreeMap::new(),
        }
    }

    /// Record one signal score
    #[must_use]
    pub fn with_score(mut self, signal: WeightedSignal, score: f64) -> Self {
        self.scores.insert(signal, score);
        self
    }
}

/// Outcome of weight learning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedWeights {
    /// Weights to use for this user
    pub weights: ScoringWeights,
    /// Confidence in `[0, 1]` that the learned weights beat the defaults
    pub confidence: f64,
    /// Positive plus negative samples
    pub sample_size: usize,
    /// Correlation of each signal with positive reactions, in `[-1, 1]`
    pub correlations: BTreeMap<WeightedSignal, f64>,
}

/// Learns per-user blend weights
#[derive(Debug, Clone)]
pub struct WeightLearner {
    config: WeightLearningConfig,
    composite: CompositeScorer,
    registry: ScorerRegistry,
}

impl Default for WeightLearner {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightLearner {
    /// Learner using the global configuration
    #[must_use]
    pub fn new() -> Self {
        let global = RankingConfig::global();
        Self {
            config: global.weight_learning.clone(),
            composite: CompositeScorer::with_config(global.composite.clone()),
            registry: ScorerRegistry::standard(),
        }
    }

    /// Learner using explicit configuration
    #[must_use]
    pub fn with_config(config: WeightLearningConfig, composite: CompositeConfig) -> Self {
        Self {
            config,
            composite: CompositeScorer::with_config(composite),
            registry: ScorerRegistry::standard(),
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &WeightLearningConfig {
        &self.config
    }

    /// Re-score every liked or disliked recipe in the history with every
    /// weighted signal
    ///
    /// Each record is scored at its own timestamp against the rest of the
    /// history, so a reaction never explains itself. The history is indexed
    /// once and each record is hidden from that index in turn.
    #[must_use]
    pub fn score_history(&self, behavior: &UserBehaviorData, ctx: &ScoringContext) -> Vec<SignalSample> {
        let mut record_ctx = ctx.clone().with_behavior(behavior.clone());
        let Some(index) = record_ctx.history_index.clone() else {
            return Vec::new();
        };
        behavior
            .interactions
            .iter()
            .enumerate()
            .filter(|(_, record)| record.kind.is_positive() || record.kind.is_negative())
            .map(|(position, record)| {
                record_ctx.now = record.timestamp;
                record_ctx.temporal = Some(TemporalContext::from_datetime(record.timestamp));
                record_ctx.excluded_interaction = Some(position);
                record_ctx.temporal_patterns = Some(index.patterns_without(record));
                self.score_record(record, &record_ctx)
            })
            .collect()
    }

    fn score_record(&self, record: &InteractionRecord, record_ctx: &ScoringContext) -> SignalSample {
        let recipe = Recipe::from(&record.recipe);
        let mut sample = SignalSample::new(record.kind.is_positive());
        for result in self.registry.evaluate_all(&recipe, record_ctx) {
            if let Some(signal) = result.signal.weighted_signal() {
                sample.scores.insert(signal, result.total);
            }
        }
        let base = self.composite.score_in_context(&recipe, record_ctx, None, None);
        sample.scores.insert(WeightedSignal::BaseScore, base.total);
        sample
    }

    /// Correlation of each signal with positive reactions
    ///
    /// `(mean positive − mean negative) / 100`, clamped to `[-1, 1]`; 0 when
    /// either class has no score for the signal.
    #[must_use]
    pub fn correlations(samples: &[SignalSample]) -> BTreeMap<WeightedSignal, f64> {
        WeightedSignal::ALL
            .into_iter()
            .map(|signal| {
                let class_mean = |positive: bool| {
                    mean(
                        samples
                            .iter()
                            .filter(|s| s.positive == positive)
                            .filter_map(|s| s.scores.get(&signal).copied()),
                    )
                };
                let correlation = match (class_mean(true), class_mean(false)) {
                    (Some(pos), Some(neg)) => ((pos - neg) / 100.0).clamp(-1.0, 1.0),
                    _ => 0.0,
                };
                (signal, correlation)
            })
            .collect()
    }

    /// Learn weights from labelled samples
    #[must_use]
    pub fn learn_weights(&self, samples: &[SignalSample]) -> LearnedWeights {
        let defaults = self.config.default_weights;
        let sample_size = samples.len();
        let correlations = Self::correlations(samples);

        let (learned, confidence) = if sample_size < self.config.min_samples {
            let cold_start =
                (sample_size as f64 / self.config.min_samples as f64).min(self.config.max_cold_start_confidence);
            (defaults, cold_start)
        } else {
            (
                self.adjust_internal(&defaults, &correlations),
                self.confidence(sample_size, &correlations),
            )
        };

        let weights = defaults.lerp(&learned, confidence).normalized();
        debug!(
            sample_size,
            confidence,
            discriminatory = weights.discriminatory,
            base_score = weights.base_score,
            health_goal = weights.health_goal,
            "Learned scoring weights"
        );
        LearnedWeights {
            weights,
            confidence,
            sample_size,
            correlations,
        }
    }

    /// `w_i = max(min, d_i · (1 + rate · c_i))` for the internal triple,
    /// renormalized; the other signals keep their defaults
    fn adjust_internal(
        &self,
        defaults: &ScoringWeights,
        correlations: &BTreeMap<WeightedSignal, f64>,
    ) -> ScoringWeights {
        let mut learned = *defaults;
        for signal in WeightedSignal::INTERNAL {
            let correlation = correlations.get(&signal).copied().unwrap_or(0.0);
            let adjusted = defaults.get(signal)
                * self.config.adjustment_rate.mul_add(correlation, 1.0);
            learned.set(signal, adjusted.max(self.config.min_internal_weight));
        }
        learned.normalized()
    }

    fn confidence(&self, sample_size: usize, correlations: &BTreeMap<WeightedSignal, f64>) -> f64 {
        let ramp = sample_size.saturating_sub(self.config.min_samples) as f64
            / self.config.confidence_ramp_samples as f64;
        let strength = mean(correlations.values().map(|c| c.abs())).unwrap_or(0.0);
        self.config
            .sample_confidence_share
            .mul_add(ramp.min(1.0), self.config.correlation_confidence_share * strength)
            .clamp(self.config.min_confidence, 1.0)
    }
}
