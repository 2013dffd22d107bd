// ABOUTME: Tests for user-based and item-based collaborative filtering
// ABOUTME: Similarity measures, half-score caps, neighbour limits, timeouts and collaborator failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

mod helpers;

use async_trait::async_trait;
use helpers::fixtures::*;
use pierre_recipe_ranker::errors::{AppError, AppResult, ErrorCode};
use pierre_recipe_ranker::intelligence::collaborative::{
    CollaborativeContext, CollaborativeEngine, CollaborativeProfile, SimilarUser, UserDataSource,
};
use pierre_recipe_ranker::intelligence::config::intelligence::CollaborativeConfig;
use pierre_recipe_ranker::models::{
    DietaryRestriction, InteractionKind, InteractionRecord, Recipe, UserBehaviorData,
    UserPreferences,
};
use pierre_recipe_ranker::store::{InMemoryDataSource, UserRecord};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

struct Community {
    source: Arc<InMemoryDataSource>,
    target: Uuid,
    close_neighbour: Uuid,
}

type Engine = CollaborativeEngine<InMemoryDataSource>;

fn liked(recipes: &[Recipe]) -> Vec<InteractionRecord> {
    recipes
        .iter()
        .zip(1_i64..)
        .map(|(recipe, days)| interaction(InteractionKind::Liked, recipe, days_ago(days)))
        .collect()
}

/// Target likes salmon and lentils; one neighbour shares those tastes, two do not
fn community() -> Community {
    let target = Uuid::new_v4();
    let close_neighbour = Uuid::new_v4();
    let french_vegetarian = Uuid::new_v4();
    let dissimilar = Uuid::new_v4();

    let records = vec![
        UserRecord::new(target, preferences())
            .with_macro_goals(meal_goals())
            .with_interactions(liked(&[salmon_bowl(), lentil_curry()])),
        UserRecord::new(close_neighbour, preferences())
            .with_macro_goals(meal_goals())
            .with_interactions(liked(&[salmon_bowl(), lentil_curry(), hummus_snack()])),
        UserRecord::new(
            french_vegetarian,
            UserPreferences {
                liked_cuisines: vec!["French".into()],
                dietary_restrictions: vec![DietaryRestriction::Vegetarian],
                ..UserPreferences::default()
            },
        )
        .with_interactions(liked(&[beef_stew()])),
        UserRecord::new(
            dissimilar,
            UserPreferences {
                liked_cuisines: vec!["Mexican".into()],
                ..UserPreferences::default()
            },
        )
        .with_interactions(liked(&[chocolate_mousse()])),
    ];

    Community {
        source: Arc::new(InMemoryDataSource::from_records(records)),
        target,
        close_neighbour,
    }
}

fn engine(source: Arc<InMemoryDataSource>) -> Engine {
    CollaborativeEngine::with_config(source, CollaborativeConfig::default())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Similarity
// ============================================================================

#[test]
fn test_identical_users_are_fully_similar() {
    let engine = engine(Arc::new(InMemoryDataSource::new()));
    let profile = CollaborativeProfile::new(Uuid::new_v4(), preferences()).with_macro_goals(meal_goals());
    let behavior = UserBehaviorData::new(liked(&[salmon_bowl()]));
    assert_close(engine.user_similarity(&profile, &behavior, &profile, &behavior), 1.0);
}

#[test]
fn test_user_similarity_components() {
    let engine = engine(Arc::new(InMemoryDataSource::new()));
    let a = CollaborativeProfile::new(Uuid::new_v4(), preferences());
    let b = CollaborativeProfile::new(
        Uuid::new_v4(),
        UserPreferences {
            liked_cuisines: vec!["japanese".into()],
            ..UserPreferences::default()
        },
    );
    let empty = UserBehaviorData::default();
    // Cuisine Jaccard 1/2 (0.15) + identical empty restriction sets (0.2)
    assert_close(engine.user_similarity(&a, &empty, &b, &empty), 0.35);
}

#[test]
fn test_item_similarity_is_symmetric_and_reflexive() {
    let engine = engine(Arc::new(InMemoryDataSource::new()));
    let salmon = salmon_bowl().snapshot();
    let lentils = lentil_curry().snapshot();
    let stew = beef_stew().snapshot();

    assert_close(engine.item_similarity(&salmon, &salmon), 1.0);
    assert_close(
        engine.item_similarity(&salmon, &lentils),
        engine.item_similarity(&lentils, &salmon),
    );
    let sim = engine.item_similarity(&salmon, &stew);
    assert!((0.0..=1.0).contains(&sim));
}

// ============================================================================
// Half-Scores
// ============================================================================

#[test]
fn test_user_based_score_weights_by_similarity() {
    let neighbours = vec![
        SimilarUser {
            user_id: Uuid::new_v4(),
            similarity: 0.5,
            positive_recipe_ids: ["hummus-snack".to_owned()].into_iter().collect(),
        },
        SimilarUser {
            user_id: Uuid::new_v4(),
            similarity: 0.5,
            positive_recipe_ids: BTreeSet::new(),
        },
    ];
    let target = BTreeSet::new();

    assert_close(Engine::user_based_score("hummus-snack", &target, &neighbours), 25.0);
    assert_eq!(Engine::user_based_score("beef-stew", &target, &neighbours), 0.0);
    assert_eq!(Engine::user_based_score("hummus-snack", &target, &[]), 0.0);
}

#[test]
fn test_user_based_score_is_capped() {
    let shared: BTreeSet<String> = ["a", "b", "c", "d", "e", "x"]
        .into_iter()
        .map(str::to_owned)
        .collect();
    let neighbours = vec![SimilarUser {
        user_id: Uuid::new_v4(),
        similarity: 0.9,
        positive_recipe_ids: shared.clone(),
    }];
    let score = Engine::user_based_score("x", &shared, &neighbours);
    assert_eq!(score, 50.0);
}

#[test]
fn test_item_based_score_ignores_the_candidate_itself() {
    let engine = engine(Arc::new(InMemoryDataSource::new()));
    let only_salmon = UserBehaviorData::new(liked(&[salmon_bowl()]));
    assert_eq!(engine.item_based_score(&salmon_bowl(), &only_salmon), 0.0);

    let mut renamed = salmon_bowl();
    renamed.id = "salmon-bowl-2".into();
    assert_close(engine.item_based_score(&renamed, &only_salmon), 50.0);
}

#[test]
fn test_context_scores_repeated_likes_once() {
    let engine = engine(Arc::new(InMemoryDataSource::new()));
    let history = UserBehaviorData::new(liked(&[salmon_bowl(), salmon_bowl(), lentil_curry()]));
    let context = CollaborativeContext::new(Vec::new(), history.clone());

    let mut renamed = salmon_bowl();
    renamed.id = "salmon-bowl-2".into();
    for candidate in [renamed, salmon_bowl(), beef_stew()] {
        let score = engine.score_with_context(&candidate, &context);
        assert_eq!(score.user_based, 0.0);
        assert_close(score.item_based, engine.item_based_score(&candidate, &history));
    }
}

#[test]
fn test_item_based_score_needs_positive_history() {
    let engine = engine(Arc::new(InMemoryDataSource::new()));
    let disliked = UserBehaviorData::new(vec![interaction(
        InteractionKind::Disliked,
        &salmon_bowl(),
        days_ago(1),
    )]);
    let mut renamed = salmon_bowl();
    renamed.id = "salmon-bowl-2".into();
    assert_eq!(engine.item_based_score(&renamed, &disliked), 0.0);
}

// ============================================================================
// Engine Against a Data Source
// ============================================================================

#[tokio::test]
async fn test_similar_users_exclude_dissimilar_neighbours() {
    let community = community();
    let engine = engine(community.source.clone());
    let context = engine.load_context(community.target).await.unwrap();

    assert_eq!(context.similar_users.len(), 1);
    assert_eq!(context.similar_users[0].user_id, community.close_neighbour);
    assert!(context.similar_users[0].similarity > 0.3);
    assert_eq!(context.behavior.interactions.len(), 2);
}

#[tokio::test]
async fn test_neighbour_likes_raise_user_based_score() {
    let community = community();
    let engine = engine(community.source.clone());
    let scores = engine
        .score_candidates(community.target, &candidates())
        .await
        .unwrap();

    assert_eq!(scores.len(), candidates().len());
    let by_id: Vec<(String, f64)> = candidates()
        .into_iter()
        .map(|r| r.id)
        .zip(scores.iter().map(|s| s.user_based))
        .collect();
    for (id, user_based) in &by_id {
        match id.as_str() {
            "salmon-bowl" | "lentil-curry" | "hummus-snack" => assert_eq!(*user_based, 50.0, "{id}"),
            _ => assert_eq!(*user_based, 0.0, "{id}"),
        }
    }
    for score in &scores {
        assert!((0.0..=50.0).contains(&score.item_based));
        assert_close(score.total, score.user_based + score.item_based);
    }
}

#[tokio::test]
async fn test_loaded_context_matches_direct_scoring() {
    let community = community();
    let engine = engine(community.source.clone());
    let context = engine.load_context(community.target).await.unwrap();
    let target_ids: BTreeSet<String> = context
        .behavior
        .positive_recipe_ids()
        .into_iter()
        .map(str::to_owned)
        .collect();

    for candidate in candidates() {
        let score = engine.score_with_context(&candidate, &context);
        assert_close(
            score.user_based,
            Engine::user_based_score(&candidate.id, &target_ids, &context.similar_users),
        );
        assert_close(
            score.item_based,
            engine.item_based_score(&candidate, &context.behavior),
        );
    }
}

#[tokio::test]
async fn test_unknown_user_has_no_neighbours() {
    let community = community();
    let engine = engine(community.source.clone());
    let context = engine.load_context(Uuid::new_v4()).await.unwrap();
    assert!(context.similar_users.is_empty());
    assert!(context.behavior.is_empty());

    let score = engine.score(Uuid::new_v4(), &salmon_bowl()).await.unwrap();
    assert_eq!(score.total, 0.0);
}

#[tokio::test]
async fn test_neighbour_count_is_capped() {
    let community = community();
    let extra = Uuid::new_v4();
    community
        .source
        .upsert(
            UserRecord::new(extra, preferences())
                .with_macro_goals(meal_goals())
                .with_interactions(liked(&[salmon_bowl(), lentil_curry()])),
        )
        .await;

    let config = CollaborativeConfig {
        max_similar_users: 1,
        ..CollaborativeConfig::default()
    };
    let engine = CollaborativeEngine::with_config(community.source.clone(), config);
    let context = engine.load_context(community.target).await.unwrap();

    // The extra user mirrors the target exactly, so it outranks the close neighbour
    assert_eq!(context.similar_users.len(), 1);
    assert_eq!(context.similar_users[0].user_id, extra);
    assert_close(context.similar_users[0].similarity, 1.0);
}

#[tokio::test]
async fn test_empty_candidates_skip_the_data_source() {
    let source = Arc::new(InMemoryDataSource::new().failing("offline"));
    let engine = engine(source);
    let scores = engine.score_candidates(Uuid::new_v4(), &[]).await.unwrap();
    assert!(scores.is_empty());
}

#[tokio::test]
async fn test_data_source_failure_is_a_collaborator_error() {
    let source = Arc::new(InMemoryDataSource::new().failing("database offline"));
    let engine = engine(source);
    let error = engine
        .score_candidates(Uuid::new_v4(), &candidates())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(error.message.contains("database offline"));
}

/// Knows no users and says so with `ResourceNotFound`
struct EmptyDirectory;

#[async_trait]
impl UserDataSource for EmptyDirectory {
    async fn user_profile(&self, user_id: Uuid) -> AppResult<Option<CollaborativeProfile>> {
        Err(AppError::not_found(format!("User {user_id}")))
    }

    async fn candidate_users(&self, _exclude: Uuid, _limit: usize) -> AppResult<Vec<Uuid>> {
        Ok(Vec::new())
    }

    async fn user_interactions(&self, user_id: Uuid) -> AppResult<UserBehaviorData> {
        Err(AppError::not_found(format!("User {user_id}")))
    }
}

#[tokio::test]
async fn test_not_found_passes_through_unchanged() {
    let engine = CollaborativeEngine::with_config(
        Arc::new(EmptyDirectory),
        CollaborativeConfig::default(),
    );
    let error = engine.user_behavior(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert!(!error.message.starts_with("user_data_source"));
}

#[tokio::test]
async fn test_slow_data_source_times_out() {
    let source = Arc::new(InMemoryDataSource::new().with_latency(Duration::from_millis(500)));
    let config = CollaborativeConfig {
        collaborator_timeout_ms: 20,
        ..CollaborativeConfig::default()
    };
    let engine = CollaborativeEngine::with_config(source, config);
    let error = engine.user_behavior(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
}

#[tokio::test]
async fn test_record_interaction_requires_known_user() {
    let community = community();
    let record = interaction(InteractionKind::Liked, &oat_porridge(), days_ago(1));
    let error = community
        .source
        .record_interaction(Uuid::new_v4(), record.clone())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    community
        .source
        .record_interaction(community.target, record)
        .await
        .unwrap();
    let engine = engine(community.source.clone());
    let behavior = engine.user_behavior(community.target).await.unwrap();
    assert_eq!(behavior.interactions.len(), 3);
}
