// ABOUTME: Per-user blend weights for the multi-signal ranking score
// ABOUTME: ScoringWeights with its normalization invariant and WeightedSignal keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Signals that carry a blend weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightedSignal {
    /// Preference-discrimination signal
    Discriminatory,
    /// Composite macro/taste base score
    BaseScore,
    /// Fitness-goal alignment
    HealthGoal,
    /// Interaction-history affinity
    Behavioral,
    /// Time-of-day / day / season fit
    Temporal,
    /// Convenience and time fit
    Enhanced,
    /// External enrichment quality
    External,
}

impl WeightedSignal {
    /// Every weighted signal, internal blend first
    pub const ALL: [Self; 7] = [
        Self::Discriminatory,
        Self::BaseScore,
        Self::HealthGoal,
        Self::Behavioral,
        Self::Temporal,
        Self::Enhanced,
        Self::External,
    ];

    /// The three signals whose weights always sum to 1.0
    pub const INTERNAL: [Self; 3] = [Self::Discriminatory, Self::BaseScore, Self::HealthGoal];

    /// Whether this signal belongs to the normalized internal blend
    #[must_use]
    pub const fn is_internal(self) -> bool {
        matches!(
            self,
            Self::Discriminatory | Self::BaseScore | Self::HealthGoal
        )
    }

    /// Stable snake-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discriminatory => "discriminatory",
            Self::BaseScore => "base_score",
            Self::HealthGoal => "health_goal",
            Self::Behavioral => "behavioral",
            Self::Temporal => "temporal",
            Self::Enhanced => "enhanced",
            Self::External => "external",
        }
    }
}

/// Named blend weight per signal
///
/// Invariant: `discriminatory + base_score + health_goal == 1.0` after every
/// adjustment; the other four are independently bounded to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Discriminatory signal weight (internal blend)
    pub discriminatory: f64,
    /// Composite base score weight (internal blend)
    pub base_score: f64,
    /// Health-goal weight (internal blend)
    pub health_goal: f64,
    /// Behavioral signal weight
    pub behavioral: f64,
    /// Temporal signal weight
    pub temporal: f64,
    /// Enhanced/convenience signal weight
    pub enhanced: f64,
    /// External enrichment weight
    pub external: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            discriminatory: 0.35,
            base_score: 0.40,
            health_goal: 0.25,
            behavioral: 0.15,
            temporal: 0.10,
            enhanced: 0.10,
            external: 0.05,
        }
    }
}

impl ScoringWeights {
    /// Weight of one signal
    #[must_use]
    pub const fn get(&self, signal: WeightedSignal) -> f64 {
        match signal {
            WeightedSignal::Discriminatory => self.discriminatory,
            WeightedSignal::BaseScore => self.base_score,
            WeightedSignal::HealthGoal => self.health_goal,
            WeightedSignal::Behavioral => self.behavioral,
            WeightedSignal::Temporal => self.temporal,
            WeightedSignal::Enhanced => self.enhanced,
            WeightedSignal::External => self.external,
        }
    }

    /// Replace the weight of one signal
    pub fn set(&mut self, signal: WeightedSignal, value: f64) {
        let slot = match signal {
            WeightedSignal::Discriminatory => &mut self.discriminatory,
            WeightedSignal::BaseScore => &mut self.base_score,
            WeightedSignal::HealthGoal => &mut self.health_goal,
            WeightedSignal::Behavioral => &mut self.behavioral,
            WeightedSignal::Temporal => &mut self.temporal,
            WeightedSignal::Enhanced => &mut self.enhanced,
            WeightedSignal::External => &mut self.external,
        };
        *slot = value;
    }

    /// Sum of the internal blend weights
    #[must_use]
    pub fn internal_sum(&self) -> f64 {
        self.discriminatory + self.base_score + self.health_goal
    }

    /// Return a copy with the internal triple rescaled to sum to 1.0 and the
    /// external weights clamped to `[0, 1]`
    ///
    /// A degenerate (zero or non-finite) internal sum falls back to the default
    /// internal triple.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut out = *self;
        let sum = self.internal_sum();
        if sum.is_finite() && sum > f64::EPSILON {
            out.discriminatory /= sum;
            out.base_score /= sum;
            out.health_goal /= sum;
        } else {
            let defaults = Self::default();
            out.discriminatory = defaults.discriminatory;
            out.base_score = defaults.base_score;
            out.health_goal = defaults.health_goal;
        }
        for signal in [
            WeightedSignal::Behavioral,
            WeightedSignal::Temporal,
            WeightedSignal::Enhanced,
            WeightedSignal::External,
        ] {
            let value = out.get(signal);
            let bounded = if value.is_finite() {
                value.clamp(0.0, 1.0)
            } else {
                0.0
            };
            out.set(signal, bounded);
        }
        out
    }

    /// Component-wise linear interpolation `self + t·(other − self)`
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut out = *self;
        for signal in WeightedSignal::ALL {
            let from = self.get(signal);
            let to = other.get(signal);
            out.set(signal, (to - from).mul_add(t, from));
        }
        out
    }
}
