// ABOUTME: Dynamic weight adjustment configuration
// ABOUTME: Configures sample minimums, adjustment rate, weight floor, and confidence ramp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Weight Learning Configuration

use pierre_core::models::ScoringWeights;
use serde::{Deserialize, Serialize};

/// Dynamic weight adjustment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLearningConfig {
    /// Weights used when too little history exists
    pub default_weights: ScoringWeights,
    /// Positive + negative samples required before learning
    pub min_samples: usize,
    /// Samples beyond the minimum needed for full sample confidence
    pub confidence_ramp_samples: usize,
    /// Confidence reported below the minimum never exceeds this
    pub max_cold_start_confidence: f64,
    /// How strongly a correlation moves a weight (`w·(1 + rate·c)`)
    pub adjustment_rate: f64,
    /// Floor applied before renormalization
    pub min_internal_weight: f64,
    /// Share of confidence coming from sample size
    pub sample_confidence_share: f64,
    /// Share of confidence coming from correlation strength
    pub correlation_confidence_share: f64,
    /// Lower bound of the reported confidence once learning ran
    pub min_confidence: f64,
}

impl Default for WeightLearningConfig {
    fn default() -> Self {
        Self {
            default_weights: ScoringWeights::default(),
            min_samples: 10,
            confidence_ramp_samples: 40,
            max_cold_start_confidence: 0.29,
            adjustment_rate: 0.5,
            min_internal_weight: 0.1,
            sample_confidence_share: 0.6,
            correlation_confidence_share: 0.4,
            min_confidence: 0.1,
        }
    }
}
