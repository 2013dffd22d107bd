// ABOUTME: Ordered registry of signal scorers evaluated for every candidate recipe
// ABOUTME: Standard ordering and lookup of scorer results by signal kind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::Recipe;

use super::{
    BehavioralScorer, DiscriminatoryScorer, EnhancedScorer, ExternalScorer, HealthGoalScorer,
    PredictiveScorer, ScoreResult, Scorer, ScoringContext, SignalKind, SignalScorer,
    TemporalScorer,
};

/// Scorers evaluated in a fixed order
#[derive(Debug, Clone)]
pub struct ScorerRegistry {
    scorers: Vec<SignalScorer>,
}

impl Default for ScorerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScorerRegistry {
    /// All seven signals: discriminatory, health goal, behavioral, temporal,
    /// enhanced, external, predictive
    #[must_use]
    pub fn standard() -> Self {
        Self {
            scorers: vec![
                SignalScorer::Discriminatory(DiscriminatoryScorer),
                SignalScorer::HealthGoal(HealthGoalScorer),
                SignalScorer::Behavioral(BehavioralScorer),
                SignalScorer::Temporal(TemporalScorer),
                SignalScorer::Enhanced(EnhancedScorer),
                SignalScorer::External(ExternalScorer),
                SignalScorer::Predictive(PredictiveScorer),
            ],
        }
    }

    /// Registry with a caller-chosen subset and order
    #[must_use]
    pub const fn with_scorers(scorers: Vec<SignalScorer>) -> Self {
        Self { scorers }
    }

    /// Signals in evaluation order
    #[must_use]
    pub fn kinds(&self) -> Vec<SignalKind> {
        self.scorers.iter().map(Scorer::kind).collect()
    }

    /// Evaluate every scorer, preserving registry order
    #[must_use]
    pub fn evaluate_all(&self, recipe: &Recipe, ctx: &ScoringContext) -> Vec<ScoreResult> {
        self.scorers
            .iter()
            .map(|scorer| scorer.evaluate(recipe, ctx))
            .collect()
    }

    /// Evaluate a single signal, if registered
    #[must_use]
    pub fn evaluate(
        &self,
        kind: SignalKind,
        recipe: &Recipe,
        ctx: &ScoringContext,
    ) -> Option<ScoreResult> {
        self.scorers
            .iter()
            .find(|scorer| scorer.kind() == kind)
            .map(|scorer| scorer.evaluate(recipe, ctx))
    }

    /// Number of registered scorers
    #[must_use]
    pub fn len(&self) -> usize {
        self.scorers.len()
    }

    /// Whether no scorer is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scorers.is_empty()
    }
}
