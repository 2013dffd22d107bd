// ABOUTME: Collaborative filtering over similar users and similar recipes
// ABOUTME: UserDataSource collaborator trait, similarity measures and bounded concurrent reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Collaborative Filtering
//!
//! Two half-scores, each capped at 50, add up to the collaborative score:
//!
//! - **user-based**: recipes liked by users who resemble the target user
//! - **item-based**: recipes resembling what the target user already liked
//!
//! User and interaction data is read through [`UserDataSource`]. Reads for the
//! candidate neighbours run concurrently and the whole batch is bounded by the
//! configured collaborator timeout.

use async_trait::async_trait;
use futures_util::future::try_join_all;
use futures_util::try_join;
use pierre_core::constants::nutrition::{
    REFERENCE_DAILY_CALORIES, REFERENCE_DAILY_CARBS_G, REFERENCE_DAILY_FAT_G,
    REFERENCE_DAILY_PROTEIN_G,
};
use pierre_core::constants::service_names::USER_DATA_SOURCE;
use pierre_core::errors::{AppError, AppResult, ErrorCode};
use pierre_core::models::{
    MacroGoals, MacroProfile, Recipe, RecipeSnapshot, UserBehaviorData, UserPreferences,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::intelligence::{CollaborativeConfig, RankingConfig};
use crate::math::{clamp_score, cosine_similarity, jaccard, mean, symmetric_closeness};
use crate::taxonomy::ingredient_keys;

/// Maximum of each half-score
const HALF_SCORE_CAP: f64 = 50.0;
/// Extra credit per recipe a neighbour shares with the target user
const COMMON_INTERACTION_BONUS: f64 = 0.1;

/// What the engine needs to know about another user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborativeProfile {
    /// User identifier
    pub user_id: Uuid,
    /// Taste preferences
    #[serde(default)]
    pub preferences: UserPreferences,
    /// Macro goals, if the user set any
    #[serde(default)]
    pub macro_goals: Option<MacroGoals>,
}

impl CollaborativeProfile {
    /// Profile with preferences only
    #[must_use]
    pub const fn new(user_id: Uuid, preferences: UserPreferences) -> Self {
        Self {
            user_id,
            preferences,
            macro_goals: None,
        }
    }

    /// Attach macro goals
    #[must_use]
    pub const fn with_macro_goals(mut self, goals: MacroGoals) -> Self {
        self.macro_goals = Some(goals);
        self
    }
}

/// Read-only access to users and their interaction history
///
/// Implementations report failures as [`AppError`]; the engine surfaces them
/// as collaborator errors.
#[async_trait]
pub trait UserDataSource: Send + Sync {
    /// Profile of one user; `None` when unknown
    async fn user_profile(&self, user_id: Uuid) -> AppResult<Option<CollaborativeProfile>>;

    /// Up to `limit` users other than `exclude`, in a stable order
    async fn candidate_users(&self, exclude: Uuid, limit: usize) -> AppResult<Vec<Uuid>>;

    /// Interaction history of one user (empty when unknown)
    async fn user_interactions(&self, user_id: Uuid) -> AppResult<UserBehaviorData>;
}

/// A neighbour of the target user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarUser {
    /// Neighbour identifier
    pub user_id: Uuid,
    /// Similarity in `[0, 1]`
    pub similarity: f64,
    /// Recipes the neighbour engaged with positively
    pub positive_recipe_ids: BTreeSet<String>,
}

/// Collaborative score of one candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollaborativeScore {
    /// Similar-user evidence, 0-50
    pub user_based: f64,
    /// Similar-recipe evidence, 0-50
    pub item_based: f64,
    /// Sum of both, 0-100
    pub total: f64,
}

impl CollaborativeScore {
    fn from_parts(user_based: f64, item_based: f64) -> Self {
        Self {
            user_based,
            item_based,
            total: clamp_score(user_based + item_based),
        }
    }
}

/// Everything the engine reads about the target user for one request
#[derive(Debug, Clone, Default)]
pub struct CollaborativeContext {
    /// Neighbours above the similarity threshold, most similar first
    pub similar_users: Vec<SimilarUser>,
    /// Target user's history
    pub behavior: UserBehaviorData,
    positive_ids: BTreeSet<String>,
    liked_items: Vec<LikedItem>,
}

impl CollaborativeContext {
    /// Context over loaded neighbours and history; liked recipes are parsed here once
    #[must_use]
    pub fn new(similar_users: Vec<SimilarUser>, behavior: UserBehaviorData) -> Self {
        let positive_ids = positive_ids(&behavior);
        let liked_items = liked_items(&behavior);
        Self {
            similar_users,
            behavior,
            positive_ids,
            liked_items,
        }
    }
}

/// A distinct positively engaged recipe with its ingredient keys
#[derive(Debug, Clone)]
struct LikedItem {
    recipe: RecipeSnapshot,
    keys: BTreeSet<String>,
}

/// First positive snapshot of each distinct recipe, in history order
fn liked_items(behavior: &UserBehaviorData) -> Vec<LikedItem> {
    let mut seen = BTreeSet::new();
    behavior
        .positive()
        .filter(|r| seen.insert(r.recipe.recipe_id.as_str()))
        .map(|r| LikedItem {
            recipe: r.recipe.clone(),
            keys: ingredient_keys(&r.recipe.ingredients),
        })
        .collect()
}

fn macro_vector(macros: &MacroProfile) -> [f64; 4] {
    [
        macros.calories / REFERENCE_DAILY_CALORIES,
        macros.protein_g / REFERENCE_DAILY_PROTEIN_G,
        macros.carbs_g / REFERENCE_DAILY_CARBS_G,
        macros.fat_g / REFERENCE_DAILY_FAT_G,
    ]
}

fn positive_ids(behavior: &UserBehaviorData) -> BTreeSet<String> {
    behavior
        .positive_recipe_ids()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// User- and item-based collaborative filtering
pub struct CollaborativeEngine<S: UserDataSource + ?Sized> {
    source: Arc<S>,
    config: CollaborativeConfig,
}

impl<S: UserDataSource + ?Sized> CollaborativeEngine<S> {
    /// Engine using the global configuration
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            config: RankingConfig::global().collaborative.clone(),
        }
    }

    /// Engine using an explicit configuration
    #[must_use]
    pub const fn with_config(source: Arc<S>, config: CollaborativeConfig) -> Self {
        Self { source, config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &CollaborativeConfig {
        &self.config
    }

    /// Weighted similarity of two users in `[0, 1]`
    #[must_use]
    pub fn user_similarity(
        &self,
        a: &CollaborativeProfile,
        a_behavior: &UserBehaviorData,
        b: &CollaborativeProfile,
        b_behavior: &UserBehaviorData,
    ) -> f64 {
        let weights = &self.config.user_weights;
        let cuisine = jaccard(&a.preferences.cuisine_set(), &b.preferences.cuisine_set());
        let dietary = if a.preferences.restriction_set() == b.preferences.restriction_set() {
            1.0
        } else {
            0.0
        };
        let interactions = jaccard(
            &a_behavior.positive_recipe_ids(),
            &b_behavior.positive_recipe_ids(),
        );
        let goals = if a.macro_goals.is_some() && b.macro_goals.is_some() {
            1.0
        } else {
            0.0
        };
        weights.cuisine_overlap.mul_add(
            cuisine,
            weights.dietary_match.mul_add(
                dietary,
                weights
                    .interaction_overlap
                    .mul_add(interactions, weights.macro_goals_present * goals),
            ),
        )
    }

    /// Weighted similarity of two recipes in `[0, 1]`; symmetric
    #[must_use]
    pub fn item_similarity(&self, a: &RecipeSnapshot, b: &RecipeSnapshot) -> f64 {
        self.keyed_item_similarity(
            a,
            &ingredient_keys(&a.ingredients),
            b,
            &ingredient_keys(&b.ingredients),
        )
    }

    fn keyed_item_similarity(
        &self,
        a: &RecipeSnapshot,
        a_keys: &BTreeSet<String>,
        b: &RecipeSnapshot,
        b_keys: &BTreeSet<String>,
    ) -> f64 {
        let weights = &self.config.item_weights;
        let cuisine = if a.cuisine.trim().eq_ignore_ascii_case(b.cuisine.trim()) {
            1.0
        } else {
            0.0
        };
        let ingredients = jaccard(a_keys, b_keys);
        let macros = cosine_similarity(&macro_vector(&a.macros), &macro_vector(&b.macros));
        let cook = symmetric_closeness(f64::from(a.cook_time_mins), f64::from(b.cook_time_mins));
        weights.cuisine.mul_add(
            cuisine,
            weights.ingredients.mul_add(
                ingredients,
                weights.macros.mul_add(macros, weights.cook_time * cook),
            ),
        )
    }

    /// User-based half-score for one candidate
    ///
    /// `50 · Σ sim·(1 + 0.1·common) over neighbours who liked the candidate,
    /// divided by Σ sim over all neighbours`, capped at 50.
    #[must_use]
    pub fn user_based_score(
        candidate_id: &str,
        target_positive_ids: &BTreeSet<String>,
        similar_users: &[SimilarUser],
    ) -> f64 {
        let similarity_mass: f64 = similar_users.iter().map(|u| u.similarity).sum();
        if similarity_mass <= f64::EPSILON {
            return 0.0;
        }
        let support: f64 = similar_users
            .iter()
            .filter(|u| u.positive_recipe_ids.contains(candidate_id))
            .map(|u| {
                let common = u.positive_recipe_ids.intersection(target_positive_ids).count();
                u.similarity * COMMON_INTERACTION_BONUS.mul_add(common as f64, 1.0)
            })
            .sum();
        (HALF_SCORE_CAP * support / similarity_mass).min(HALF_SCORE_CAP)
    }

    /// Item-based half-score for one candidate
    ///
    /// Compares the candidate with each distinct recipe the user engaged with
    /// positively (excluding the candidate itself), keeps the most similar
    /// ones above the threshold, and scores `50 · mean similarity`.
    #[must_use]
    pub fn item_based_score(&self, candidate: &Recipe, behavior: &UserBehaviorData) -> f64 {
        self.score_against_liked(candidate, &liked_items(behavior))
    }

    fn score_against_liked(&self, candidate: &Recipe, liked: &[LikedItem]) -> f64 {
        let candidate_snapshot = candidate.snapshot();
        let candidate_keys = ingredient_keys(&candidate.ingredients);
        let mut similarities: Vec<f64> = liked
            .iter()
            .filter(|item| item.recipe.recipe_id != candidate.id)
            .map(|item| {
                self.keyed_item_similarity(
                    &candidate_snapshot,
                    &candidate_keys,
                    &item.recipe,
                    &item.keys,
                )
            })
            .filter(|sim| *sim > self.config.item_similarity_threshold)
            .collect();
        similarities.sort_by(|a, b| b.total_cmp(a));
        similarities.truncate(self.config.max_similar_items);
        mean(similarities).map_or(0.0, |m| (HALF_SCORE_CAP * m).min(HALF_SCORE_CAP))
    }

    /// Score one candidate from an already loaded context
    #[must_use]
    pub fn score_with_context(
        &self,
        candidate: &Recipe,
        context: &CollaborativeContext,
    ) -> CollaborativeScore {
        CollaborativeScore::from_parts(
            Self::user_based_score(&candidate.id, &context.positive_ids, &context.similar_users),
            self.score_against_liked(candidate, &context.liked_items),
        )
    }

    /// Load the target user's history and neighbours
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceError` when the data source fails and
    /// `ExternalServiceUnavailable` when it exceeds the collaborator timeout.
    pub async fn load_context(&self, user_id: Uuid) -> AppResult<CollaborativeContext> {
        let (profile, behavior) = self
            .bounded(async {
                try_join!(
                    self.source.user_profile(user_id),
                    self.source.user_interactions(user_id)
                )
            })
            .await?;

        let Some(profile) = profile else {
            debug!(%user_id, "No profile for user, skipping user-based neighbours");
            return Ok(CollaborativeContext::new(Vec::new(), behavior));
        };

        let similar_users = self.find_similar_users(&profile, &behavior).await?;
        debug!(
            %user_id,
            similar_users = similar_users.len(),
            interactions = behavior.interactions.len(),
            "Loaded collaborative context"
        );
        Ok(CollaborativeContext::new(similar_users, behavior))
    }

    /// Neighbours of the target above the similarity threshold, most similar
    /// first (stable on data-source order), capped at the configured maximum
    ///
    /// # Errors
    ///
    /// Returns a collaborator error when a read fails or times out.
    pub async fn find_similar_users(
        &self,
        target: &CollaborativeProfile,
        target_behavior: &UserBehaviorData,
    ) -> AppResult<Vec<SimilarUser>> {
        let candidates = self
            .bounded(
                self.source
                    .candidate_users(target.user_id, self.config.candidate_user_limit),
            )
            .await?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let lookups = candidates
            .iter()
            .filter(|id| **id != target.user_id)
            .map(|&id| async move {
                try_join!(
                    self.source.user_profile(id),
                    self.source.user_interactions(id)
                )
            });
        let neighbours = self.bounded(try_join_all(lookups)).await?;

        let mut similar: Vec<SimilarUser> = neighbours
            .into_iter()
            .filter_map(|(profile, behavior)| profile.map(|p| (p, behavior)))
            .map(|(profile, behavior)| SimilarUser {
                user_id: profile.user_id,
                similarity: self.user_similarity(target, target_behavior, &profile, &behavior),
                positive_recipe_ids: positive_ids(&behavior),
            })
            .filter(|u| u.similarity > self.config.user_similarity_threshold)
            .collect();
        similar.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        similar.truncate(self.config.max_similar_users);
        Ok(similar)
    }

    /// Collaborative scores for every candidate, in input order
    ///
    /// # Errors
    ///
    /// Returns a collaborator error when a read fails or times out.
    pub async fn score_candidates(
        &self,
        user_id: Uuid,
        candidates: &[Recipe],
    ) -> AppResult<Vec<CollaborativeScore>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let context = self.load_context(user_id).await?;
        Ok(candidates
            .iter()
            .map(|candidate| self.score_with_context(candidate, &context))
            .collect())
    }

    /// Collaborative score for a single candidate
    ///
    /// # Errors
    ///
    /// Returns a collaborator error when a read fails or times out.
    pub async fn score(&self, user_id: Uuid, candidate: &Recipe) -> AppResult<CollaborativeScore> {
        let context = self.load_context(user_id).await?;
        Ok(self.score_with_context(candidate, &context))
    }

    /// Interaction history of one user, read under the collaborator timeout
    ///
    /// # Errors
    ///
    /// Returns a collaborator error when the read fails or times out.
    pub async fn user_behavior(&self, user_id: Uuid) -> AppResult<UserBehaviorData> {
        self.bounded(self.source.user_interactions(user_id)).await
    }

    /// Run a data-source read under the collaborator timeout and map its errors
    async fn bounded<T, F>(&self, operation: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let limit = Duration::from_millis(self.config.collaborator_timeout_ms);
        match timeout(limit, operation).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(Self::as_collaborator_error(error)),
            Err(_) => {
                warn!(timeout_ms = self.config.collaborator_timeout_ms, "User data source timed out");
                Err(AppError::collaborator_timeout(USER_DATA_SOURCE, limit))
            }
        }
    }

    /// Lookups that found nothing keep their code; other failures become
    /// collaborator errors
    fn as_collaborator_error(error: AppError) -> AppError {
        if error.code.is_collaborator_failure() || error.code == ErrorCode::ResourceNotFound {
            return error;
        }
        warn!(error = %error, "User data source failed");
        AppError::external_service(USER_DATA_SOURCE, error.message.clone()).with_source(error)
    }
}
