// ABOUTME: Recommendation service ranking candidates with every signal and learned weights
// ABOUTME: Adds collaborative scores, learns per-user weights and wraps the daily planner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommendation Service
//!
//! ```text
//! blend = SignalBlend(weights, signal scores)
//! final = (1 − w_c)·blend + w_c·collaborative     (w_c = 0.10 by default)
//! ```
//!
//! Candidates are scored in parallel and returned sorted by score
//! descending, ties kept in input order.

use pierre_core::errors::AppResult;
use pierre_core::models::{MacroGoals, Recipe, ScoringWeights};
use pierre_intelligence::blend::{SignalBlend, SignalScores};
use pierre_intelligence::collaborative::{CollaborativeEngine, CollaborativeScore, UserDataSource};
use pierre_intelligence::composite::{CompositeScore, CompositeScorer};
use pierre_intelligence::config::RankingConfig;
use pierre_intelligence::daily_plan::{DailyPlan, DailyPlanner, PlanOptions};
use pierre_intelligence::math::clamp_score;
use pierre_intelligence::scorers::{ScoreResult, ScorerRegistry, ScoringContext};
use pierre_intelligence::weight_adjustment::{LearnedWeights, WeightLearner};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::weight_cache::WeightCache;

const fn default_true() -> bool {
    true
}

/// One ranking pass over a candidate set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    /// User being ranked for; enables cached weights and collaborative scores
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Recipes to rank
    pub candidates: Vec<Recipe>,
    /// Scoring context
    pub context: ScoringContext,
    /// Keep only the first `limit` results
    #[serde(default)]
    pub limit: Option<usize>,
    /// Add collaborative scores when a user is set
    #[serde(default = "default_true")]
    pub collaborative: bool,
}

impl RankRequest {
    /// Anonymous request with collaborative scoring enabled
    #[must_use]
    pub const fn new(candidates: Vec<Recipe>, context: ScoringContext) -> Self {
        Self {
            user_id: None,
            candidates,
            context,
            limit: None,
            collaborative: true,
        }
    }

    /// Rank for a specific user
    #[must_use]
    pub const fn for_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Truncate the result
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip collaborative scoring
    #[must_use]
    pub const fn without_collaborative(mut self) -> Self {
        self.collaborative = false;
        self
    }
}

/// A ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecipe {
    /// The recipe
    pub recipe: Recipe,
    /// Final score, 0-100
    pub score: f64,
    /// Position of the recipe in the request
    pub input_index: usize,
    /// Composite score (base score of the blend)
    pub composite: CompositeScore,
    /// Every signal scorer's result, in registry order
    pub signals: Vec<ScoreResult>,
    /// Collaborative score when one was computed
    pub collaborative: Option<CollaborativeScore>,
}

/// Result of a ranking pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecipes {
    /// Candidates, best first
    pub recipes: Vec<RankedRecipe>,
    /// Weights used for the blend
    pub weights: ScoringWeights,
    /// Whether the weights came from the learned-weight cache
    pub learned_weights: bool,
}

/// Daily plan request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Recipes to choose from
    pub candidates: Vec<Recipe>,
    /// The whole day's macro goals
    pub daily_goals: MacroGoals,
    /// Scoring context (its macro goals are replaced per slot)
    pub context: ScoringContext,
    /// Slots and selection options
    #[serde(default)]
    pub options: PlanOptions,
}

/// Per-candidate scoring outside the service so rayon only borrows what it needs
fn score_candidate(
    registry: &ScorerRegistry,
    composite: &CompositeScorer,
    weights: &ScoringWeights,
    index: usize,
    recipe: &Recipe,
    ctx: &ScoringContext,
) -> RankedRecipe {
    let signals = registry.evaluate_all(recipe, ctx);
    let composite = composite.score_in_context(recipe, ctx, None, None);
    let scores = SignalScores::from_results(&signals, composite.total);
    RankedRecipe {
        recipe: recipe.clone(),
        score: SignalBlend::combine(weights, &scores),
        input_index: index,
        composite,
        signals,
        collaborative: None,
    }
}

/// Ranks candidates, learns weights and plans days for users read through `S`
pub struct RecommendationService<S: UserDataSource + ?Sized> {
    registry: ScorerRegistry,
    composite: CompositeScorer,
    collaborative: CollaborativeEngine<S>,
    learner: WeightLearner,
    planner: DailyPlanner,
    weights: WeightCache,
    default_weights: ScoringWeights,
    collaborative_weight: f64,
}

impl<S: UserDataSource + ?Sized> RecommendationService<S> {
    /// Service using the global configuration
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self::with_config(source, RankingConfig::global())
    }

    /// Service using freshly loaded configuration, failing on invalid overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a `PIERRE_RANKING_*` variable does not parse
    /// or the resulting configuration does not validate.
    pub fn from_env(source: Arc<S>) -> AppResult<Self> {
        let config = RankingConfig::load()?;
        Ok(Self::with_config(source, &config))
    }

    /// Service using an explicit configuration
    #[must_use]
    pub fn with_config(source: Arc<S>, config: &RankingConfig) -> Self {
        let composite = CompositeScorer::with_config(config.composite.clone());
        Self {
            registry: ScorerRegistry::standard(),
            collaborative: CollaborativeEngine::with_config(source, config.collaborative.clone()),
            learner: WeightLearner::with_config(
                config.weight_learning.clone(),
                config.composite.clone(),
            ),
            planner: DailyPlanner::with_config(config.daily_plan.clone(), composite.clone()),
            composite,
            weights: WeightCache::new(),
            default_weights: config.weight_learning.default_weights.normalized(),
            collaborative_weight: config.collaborative.blend_weight,
        }
    }

    /// Share a weight cache with other service instances
    #[must_use]
    pub fn with_weight_cache(mut self, cache: WeightCache) -> Self {
        self.weights = cache;
        self
    }

    /// The learned-weight cache
    #[must_use]
    pub const fn weight_cache(&self) -> &WeightCache {
        &self.weights
    }

    /// Cached weights for the user, else the defaults; the flag says which
    #[must_use]
    pub fn weights_for(&self, user_id: Option<Uuid>) -> (ScoringWeights, bool) {
        user_id
            .and_then(|id| self.weights.get(id))
            .map_or((self.default_weights, false), |learned| {
                (learned.weights, true)
            })
    }

    /// Rank a candidate set
    ///
    /// # Errors
    ///
    /// Returns a collaborator error when collaborative scoring is requested
    /// and the data source fails or times out.
    pub async fn rank(&self, request: &RankRequest) -> AppResult<RankedRecipes> {
        let (weights, learned_weights) = self.weights_for(request.user_id);
        if request.candidates.is_empty() {
            return Ok(RankedRecipes {
                recipes: Vec::new(),
                weights,
                learned_weights,
            });
        }

        let collaborative = match request.user_id {
            Some(user_id) if request.collaborative => Some(
                self.collaborative
                    .score_candidates(user_id, &request.candidates)
                    .await?,
            ),
            _ => None,
        };

        // History aggregates are computed once here, not once per candidate
        let mut ctx = request.context.clone();
        if ctx.history_index.is_none() {
            ctx = ctx.with_history_index();
        }
        if ctx.temporal_patterns.is_none() {
            ctx = ctx.with_learned_patterns();
        }

        let registry = &self.registry;
        let composite = &self.composite;
        let mut ranked: Vec<RankedRecipe> = request
            .candidates
            .par_iter()
            .enumerate()
            .map(|(index, recipe)| score_candidate(registry, composite, &weights, index, recipe, &ctx))
            .collect();

        if let Some(scores) = collaborative {
            for (entry, collab) in ranked.iter_mut().zip(scores) {
                entry.score = clamp_score(
                    (1.0 - self.collaborative_weight)
                        .mul_add(entry.score, self.collaborative_weight * collab.total),
                );
                entry.collaborative = Some(collab);
            }
        }

        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.input_index.cmp(&b.input_index))
        });
        if let Some(limit) = request.limit {
            ranked.truncate(limit);
        }

        info!(
            candidates = request.candidates.len(),
            returned = ranked.len(),
            learned_weights,
            "Ranked candidate recipes"
        );
        Ok(RankedRecipes {
            recipes: ranked,
            weights,
            learned_weights,
        })
    }

    /// Learn weights from the user's stored history and cache them
    ///
    /// `ctx` supplies preferences, goals and profile; its behavior is
    /// replaced by the history read from the data source.
    ///
    /// # Errors
    ///
    /// Returns a collaborator error when the history read fails or times out.
    pub async fn learn_weights(
        &self,
        user_id: Uuid,
        ctx: &ScoringContext,
    ) -> AppResult<LearnedWeights> {
        let behavior = self.collaborative.user_behavior(user_id).await?;
        let learned = self.learn_from_history(&ctx.clone().with_behavior(behavior));
        self.weights.insert(user_id, learned.clone());
        info!(
            %user_id,
            sample_size = learned.sample_size,
            confidence = learned.confidence,
            "Learned weights cached"
        );
        Ok(learned)
    }

    /// Learn weights from the behavior already in `ctx`, without caching
    #[must_use]
    pub fn learn_from_history(&self, ctx: &ScoringContext) -> LearnedWeights {
        let Some(behavior) = ctx.behavior.as_ref() else {
            debug!("No behavior history, learning from zero samples");
            return self.learner.learn_weights(&[]);
        };
        let samples = self.learner.score_history(behavior, ctx);
        self.learner.learn_weights(&samples)
    }

    /// Build a daily plan
    #[must_use]
    pub fn plan_day(&self, request: &PlanRequest) -> DailyPlan {
        self.planner.plan_day(
            &request.candidates,
            &request.daily_goals,
            &request.context,
            &request.options,
        )
    }
}
