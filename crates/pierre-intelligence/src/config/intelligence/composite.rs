// ABOUTME: Composite scorer configuration for macro/taste blending
// ABOUTME: Configures macro and taste shares, taste factor weights, and signal mixing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Composite Scorer Configuration

use serde::{Deserialize, Serialize};

/// Composite scorer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeConfig {
    /// Share of the macro score in the base blend
    pub macro_weight: f64,
    /// Share of the taste score in the base blend
    pub taste_weight: f64,
    /// Taste-factor weights inside the taste score
    pub taste_factors: TasteFactorWeights,
    /// Points the superfood boost can add to the taste score
    pub superfood_boost_points: f64,
    /// Boost floor once at least one preferred category matched
    pub superfood_boost_floor: f64,
    /// Mixing of behavioral/temporal signals into the total
    pub signal_mix: SignalMixWeights,
}

/// Weights of the three taste factors
///
/// The weighted factor sum is divided by `full_score_mass` and capped at 100,
/// so a recipe needs only that much factor mass for a full taste score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasteFactorWeights {
    /// Cuisine + spice match
    pub taste_match: f64,
    /// Cook time vs preference
    pub cook_time_match: f64,
    /// Banned-ingredient / dietary veto
    pub ingredient_match: f64,
    /// Weighted factor sum that maps to a taste score of 100
    pub full_score_mass: f64,
}

/// Weight of the optional behavioral and temporal scores in the total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalMixWeights {
    /// Behavioral share when supplied
    pub behavioral: f64,
    /// Temporal share when supplied
    pub temporal: f64,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            macro_weight: 0.7,
            taste_weight: 0.3,
            taste_factors: TasteFactorWeights::default(),
            superfood_boost_points: 15.0,
            superfood_boost_floor: 0.2,
            signal_mix: SignalMixWeights::default(),
        }
    }
}

impl Default for TasteFactorWeights {
    fn default() -> Self {
        Self {
            taste_match: 0.3,
            cook_time_match: 0.1,
            ingredient_match: 0.1,
            full_score_mass: 0.45,
        }
    }
}

impl Default for SignalMixWeights {
    fn default() -> Self {
        Self {
            behavioral: 0.15,
            temporal: 0.10,
        }
    }
}

impl TasteFactorWeights {
    /// Sum of the three factor weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.taste_match + self.cook_time_match + self.ingredient_match
    }
}
