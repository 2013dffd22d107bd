// ABOUTME: Independent signal scorers mapping (recipe, context) to a 0-100 score with breakdown
// ABOUTME: Scorer trait, ScoreResult, ScoringContext and the SignalScorer variant set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Signal Scorers
//!
//! Each scorer judges one aspect of a recipe and knows nothing about the
//! others. Scorers are pure: all inputs arrive through [`ScoringContext`],
//! including the current time. When the context a scorer needs is missing it
//! returns [`ScoreResult::neutral`] rather than an error.

/// Interaction-history affinity
pub mod behavioral;
/// Preference discrimination
pub mod discriminatory;
/// Time fit and kitchen convenience
pub mod enhanced;
/// External enrichment quality
pub mod external;
/// Fitness-goal alignment
pub mod health_goal;
/// Forward-looking engagement prediction
pub mod predictive;
/// Ordered scorer registry
pub mod registry;
/// Time-of-day, day-type and season fit
pub mod temporal;

pub use behavioral::BehavioralScorer;
pub use discriminatory::DiscriminatoryScorer;
pub use enhanced::EnhancedScorer;
pub use external::ExternalScorer;
pub use health_goal::HealthGoalScorer;
pub use predictive::PredictiveScorer;
pub use registry::ScorerRegistry;
pub use temporal::TemporalScorer;

use chrono::{DateTime, Utc};
use pierre_core::constants::scores::NEUTRAL_SCORE;
use pierre_core::models::{
    KitchenProfile, MacroGoals, PhysicalProfile, Recipe, UserBehaviorData, UserPreferences,
    WeightedSignal,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::history::{HistoryIndex, HistoryView};
use crate::math::clamp_score;
use crate::temporal::{TemporalContext, UserTemporalPatterns};

/// Identifies a signal scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Preference discrimination
    Discriminatory,
    /// Fitness-goal alignment
    HealthGoal,
    /// Interaction-history affinity
    Behavioral,
    /// Time context fit
    Temporal,
    /// Time fit and convenience
    Enhanced,
    /// External enrichment quality
    External,
    /// Engagement prediction
    Predictive,
}

impl SignalKind {
    /// Blend weight key, if the signal takes part in the weighted blend
    #[must_use]
    pub const fn weighted_signal(self) -> Option<WeightedSignal> {
        match self {
            Self::Discriminatory => Some(WeightedSignal::Discriminatory),
            Self::HealthGoal => Some(WeightedSignal::HealthGoal),
            Self::Behavioral => Some(WeightedSignal::Behavioral),
            Self::Temporal => Some(WeightedSignal::Temporal),
            Self::Enhanced => Some(WeightedSignal::Enhanced),
            Self::External => Some(WeightedSignal::External),
            Self::Predictive => None,
        }
    }

    /// Stable snake-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discriminatory => "discriminatory",
            Self::HealthGoal => "health_goal",
            Self::Behavioral => "behavioral",
            Self::Temporal => "temporal",
            Self::Enhanced => "enhanced",
            Self::External => "external",
            Self::Predictive => "predictive",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named sub-score of a [`ScoreResult`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    /// Component name
    pub name: String,
    /// Sub-score in `[0, 100]`
    pub score: f64,
    /// Share of the total
    pub weight: f64,
}

impl ScoreComponent {
    /// Create a component; the score is clamped to `[0, 100]`
    #[must_use]
    pub fn new(name: impl Into<String>, score: f64, weight: f64) -> Self {
        Self {
            name: name.into(),
            score: clamp_score(score),
            weight,
        }
    }
}

/// Output of one scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Which scorer produced it
    pub signal: SignalKind,
    /// Overall score in `[0, 100]`
    pub total: f64,
    /// Weighted sub-scores
    pub breakdown: Vec<ScoreComponent>,
    /// False when the scorer lacked the context it needs
    pub evaluated: bool,
}

impl ScoreResult {
    /// Total as the weight-normalized sum of the components
    #[must_use]
    pub fn from_components(signal: SignalKind, breakdown: Vec<ScoreComponent>) -> Self {
        let weight_sum: f64 = breakdown.iter().map(|c| c.weight).sum();
        let total = if weight_sum > f64::EPSILON {
            breakdown.iter().map(|c| c.score * c.weight).sum::<f64>() / weight_sum
        } else {
            NEUTRAL_SCORE
        };
        Self {
            signal,
            total: clamp_score(total),
            breakdown,
            evaluated: true,
        }
    }

    /// Result for a scorer that lacked required context: 50 everywhere
    #[must_use]
    pub fn neutral(signal: SignalKind, component_names: &[(&str, f64)]) -> Self {
        Self {
            signal,
            total: NEUTRAL_SCORE,
            breakdown: component_names
                .iter()
                .map(|(name, weight)| ScoreComponent::new(*name, NEUTRAL_SCORE, *weight))
                .collect(),
            evaluated: false,
        }
    }

    /// Sub-score by component name
    #[must_use]
    pub fn component(&self, name: &str) -> Option<f64> {
        self.breakdown
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.score)
    }
}

/// Everything a scorer may consult, owned per request
///
/// Every field except `now` is optional; scorers degrade to neutral when the
/// fields they need are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringContext {
    /// Reference instant for recency windows and freshness
    pub now: DateTime<Utc>,
    /// Taste preferences
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
    /// Macro targets for the meal being ranked
    #[serde(default)]
    pub macro_goals: Option<MacroGoals>,
    /// Physical profile
    #[serde(default)]
    pub profile: Option<PhysicalProfile>,
    /// Interaction history
    #[serde(default)]
    pub behavior: Option<UserBehaviorData>,
    /// Calendar context of the meal
    #[serde(default)]
    pub temporal: Option<TemporalContext>,
    /// Learned time habits
    #[serde(default)]
    pub temporal_patterns: Option<UserTemporalPatterns>,
    /// Kitchen capabilities
    #[serde(default)]
    pub kitchen: Option<KitchenProfile>,
    /// Aggregates precomputed from `behavior`
    #[serde(skip)]
    pub history_index: Option<Arc<HistoryIndex>>,
    /// Position in `behavior` of a record history scorers must ignore
    #[serde(skip)]
    pub excluded_interaction: Option<usize>,
}

impl ScoringContext {
    /// Empty context anchored at `now`
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            preferences: None,
            macro_goals: None,
            profile: None,
            behavior: None,
            temporal: None,
            temporal_patterns: None,
            kitchen: None,
            history_index: None,
            excluded_interaction: None,
        }
    }

    /// Set preferences
    #[must_use]
    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Set macro goals
    #[must_use]
    pub const fn with_macro_goals(mut self, goals: MacroGoals) -> Self {
        self.macro_goals = Some(goals);
        self
    }

    /// Set physical profile
    #[must_use]
    pub const fn with_profile(mut self, profile: PhysicalProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Set behavior history and index it
    #[must_use]
    pub fn with_behavior(mut self, behavior: UserBehaviorData) -> Self {
        self.behavior = Some(behavior);
        self.with_history_index()
    }

    /// Index the behavior history already set
    ///
    /// Call once per request before scoring many candidates; contexts
    /// deserialized from JSON arrive without an index.
    #[must_use]
    pub fn with_history_index(mut self) -> Self {
        self.history_index = self
            .behavior
            .as_ref()
            .map(|behavior| Arc::new(HistoryIndex::build(behavior)));
        self
    }

    /// Set temporal context
    #[must_use]
    pub const fn with_temporal(mut self, temporal: TemporalContext) -> Self {
        self.temporal = Some(temporal);
        self
    }

    /// Set learned temporal patterns
    #[must_use]
    pub fn with_temporal_patterns(mut self, patterns: UserTemporalPatterns) -> Self {
        self.temporal_patterns = Some(patterns);
        self
    }

    /// Learn temporal patterns from the behavior history already set
    #[must_use]
    pub fn with_learned_patterns(mut self) -> Self {
        if let Some(index) = &self.history_index {
            self.temporal_patterns = Some(index.patterns().clone());
        } else if let Some(behavior) = &self.behavior {
            self.temporal_patterns = Some(UserTemporalPatterns::learn(behavior));
        }
        self
    }

    /// Set kitchen profile
    #[must_use]
    pub fn with_kitchen(mut self, kitchen: KitchenProfile) -> Self {
        self.kitchen = Some(kitchen);
        self
    }

    /// Behavior history, if present and non-empty
    #[must_use]
    pub fn behavior_history(&self) -> Option<&UserBehaviorData> {
        self.behavior.as_ref().filter(|b| !b.is_empty())
    }

    /// Indexed view of the behavior history, if any record is visible
    ///
    /// Falls back to indexing on the spot when the context carries no index.
    #[must_use]
    pub fn history(&self) -> Option<HistoryView<'_>> {
        let behavior = self.behavior.as_ref()?;
        let index = self
            .history_index
            .as_deref()
            .map_or_else(|| Cow::Owned(HistoryIndex::build(behavior)), Cow::Borrowed);
        let view = HistoryView::new(behavior, index, self.excluded_interaction);
        (!view.is_empty()).then_some(view)
    }

    /// Learned patterns, if present and non-empty
    #[must_use]
    pub fn learned_patterns(&self) -> Option<&UserTemporalPatterns> {
        self.temporal_patterns.as_ref().filter(|p| !p.is_empty())
    }
}

/// A single independent signal
pub trait Scorer {
    /// Which signal this scorer produces
    fn kind(&self) -> SignalKind;

    /// Score one recipe in the given context
    fn evaluate(&self, recipe: &Recipe, ctx: &ScoringContext) -> ScoreResult;
}

/// The closed set of signal scorers
#[derive(Debug, Clone)]
pub enum SignalScorer {
    /// Preference discrimination
    Discriminatory(DiscriminatoryScorer),
    /// Fitness-goal alignment
    HealthGoal(HealthGoalScorer),
    /// Interaction-history affinity
    Behavioral(BehavioralScorer),
    /// Time context fit
    Temporal(TemporalScorer),
    /// Time fit and convenience
    Enhanced(EnhancedScorer),
    /// External enrichment quality
    External(ExternalScorer),
    /// Engagement prediction
    Predictive(PredictiveScorer),
}

impl Scorer for SignalScorer {
    fn kind(&self) -> SignalKind {
        match self {
            Self::Discriminatory(s) => s.kind(),
            Self::HealthGoal(s) => s.kind(),
            Self::Behavioral(s) => s.kind(),
            Self::Temporal(s) => s.kind(),
            Self::Enhanced(s) => s.kind(),
            Self::External(s) => s.kind(),
            Self::Predictive(s) => s.kind(),
        }
    }

    fn evaluate(&self, recipe: &Recipe, ctx: &ScoringContext) -> ScoreResult {
        match self {
            Self::Discriminatory(s) => s.evaluate(recipe, ctx),
            Self::HealthGoal(s) => s.evaluate(recipe, ctx),
            Self::Behavioral(s) => s.evaluate(recipe, ctx),
            Self::Temporal(s) => s.evaluate(recipe, ctx),
            Self::Enhanced(s) => s.evaluate(recipe, ctx),
            Self::External(s) => s.evaluate(recipe, ctx),
            Self::Predictive(s) => s.evaluate(recipe, ctx),
        }
    }
}
