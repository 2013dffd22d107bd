// ABOUTME: External scorer using enrichment data attached to a recipe
// ABOUTME: Quality, popularity (or like-count fallback), health rating and freshness bonus
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use pierre_core::constants::scores::NEUTRAL_SCORE;
use pierre_core::models::{Recipe, RecipeEnrichment};

use super::{ScoreComponent, ScoreResult, Scorer, ScoringContext, SignalKind};

const QUALITY_WEIGHT: f64 = 0.40;
const POPULARITY_WEIGHT: f64 = 0.30;
const HEALTH_WEIGHT: f64 = 0.25;
/// Freshness is additive: at most 5 points, expressed as a 0-100 component
const FRESHNESS_WEIGHT: f64 = 0.05;
const MAX_FRESHNESS_POINTS: f64 = 5.0;

const COMPONENTS: &[(&str, f64)] = &[
    ("quality", QUALITY_WEIGHT),
    ("popularity", POPULARITY_WEIGHT),
    ("health", HEALTH_WEIGHT),
    ("freshness", FRESHNESS_WEIGHT),
];

/// Scores third-party quality signals
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalScorer;

impl ExternalScorer {
    /// Popularity score, falling back to `min(100, 25·log10(likes + 1))`
    #[must_use]
    pub fn popularity(enrichment: &RecipeEnrichment) -> f64 {
        enrichment.popularity_score.unwrap_or_else(|| {
            enrichment.aggregate_likes.map_or(NEUTRAL_SCORE, |likes| {
                (25.0 * (f64::from(likes) + 1.0).log10()).min(100.0)
            })
        })
    }

    /// Bonus points for recently refreshed enrichment data
    #[must_use]
    pub fn freshness_points(last_enriched: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
        let Some(enriched_at) = last_enriched else {
            return 0.0;
        };
        match (now - enriched_at).num_days() {
            i64::MIN..=7 => 5.0,
            8..=30 => 3.0,
            31..=90 => 1.0,
            _ => 0.0,
        }
    }
}

impl Scorer for ExternalScorer {
    fn kind(&self) -> SignalKind {
        SignalKind::External
    }

    fn evaluate(&self, recipe: &Recipe, ctx: &ScoringContext) -> ScoreResult {
        let Some(enrichment) = recipe.enrichment.as_ref() else {
            return ScoreResult::neutral(self.kind(), COMPONENTS);
        };
        let freshness = Self::freshness_points(enrichment.last_enriched, ctx.now);
        ScoreResult::from_components(
            self.kind(),
            vec![
                ScoreComponent::new(
                    "quality",
                    enrichment.quality_score.unwrap_or(NEUTRAL_SCORE),
                    QUALITY_WEIGHT,
                ),
                ScoreComponent::new("popularity", Self::popularity(enrichment), POPULARITY_WEIGHT),
                ScoreComponent::new(
                    "health",
                    enrichment.health_score.unwrap_or(NEUTRAL_SCORE),
                    HEALTH_WEIGHT,
                ),
                ScoreComponent::new(
                    "freshness",
                    100.0 * freshness / MAX_FRESHNESS_POINTS,
                    FRESHNESS_WEIGHT,
                ),
            ],
        )
    }
}
