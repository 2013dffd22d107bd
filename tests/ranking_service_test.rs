// ABOUTME: Tests for the recommendation service
// ABOUTME: Ranking order, limits, collaborative blending, learned-weight caching and plan passthrough
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

mod helpers;

use helpers::fixtures::*;
use pierre_recipe_ranker::intelligence::config::RankingConfig;
use pierre_recipe_ranker::intelligence::daily_plan::PlanOptions;
use pierre_recipe_ranker::models::{InteractionKind, MealSlot, Recipe, ScoringWeights};
use pierre_recipe_ranker::services::{
    PlanRequest, RankRequest, RecommendationService, WeightCache,
};
use pierre_recipe_ranker::store::{InMemoryDataSource, UserRecord};
use std::sync::Arc;
use uuid::Uuid;

type Service = RecommendationService<InMemoryDataSource>;

fn service(source: InMemoryDataSource) -> Service {
    RecommendationService::with_config(Arc::new(source), &RankingConfig::default())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

/// Target user with a history, plus a neighbour who shares their tastes
fn seeded_source() -> (InMemoryDataSource, Uuid) {
    let target = Uuid::new_v4();
    let neighbour = Uuid::new_v4();
    let source = InMemoryDataSource::from_records([
        UserRecord::new(target, preferences())
            .with_macro_goals(meal_goals())
            .with_interactions(behavior_history().interactions),
        UserRecord::new(neighbour, preferences())
            .with_macro_goals(meal_goals())
            .with_interactions(vec![
                interaction(InteractionKind::Liked, &salmon_bowl(), days_ago(1)),
                interaction(InteractionKind::Liked, &oat_porridge(), days_ago(2)),
            ]),
    ]);
    (source, target)
}

#[tokio::test]
async fn test_rank_sorts_by_score_descending() {
    let service = service(InMemoryDataSource::new());
    let ranked = service
        .rank(&RankRequest::new(candidates(), basic_context()))
        .await
        .unwrap();

    assert_eq!(ranked.recipes.len(), 6);
    assert!(!ranked.learned_weights);
    assert!(ranked
        .recipes
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
    assert!(ranked
        .recipes
        .iter()
        .all(|entry| (0.0..=100.0).contains(&entry.score) && entry.collaborative.is_none()));
    let mut indices: Vec<usize> = ranked.recipes.iter().map(|e| e.input_index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_equal_scores_keep_input_order() {
    let twin = Recipe {
        id: "salmon-twin".into(),
        ..salmon_bowl()
    };
    let service = service(InMemoryDataSource::new());
    let ranked = service
        .rank(&RankRequest::new(vec![twin, salmon_bowl()], basic_context()))
        .await
        .unwrap();

    assert_eq!(ranked.recipes[0].score, ranked.recipes[1].score);
    assert_eq!(ranked.recipes[0].recipe.id, "salmon-twin");
    assert_eq!(ranked.recipes[0].input_index, 0);
    assert_eq!(ranked.recipes[1].input_index, 1);
}

#[tokio::test]
async fn test_limit_truncates_after_sorting() {
    let service = service(InMemoryDataSource::new());
    let full = service
        .rank(&RankRequest::new(candidates(), basic_context()))
        .await
        .unwrap();
    let limited = service
        .rank(&RankRequest::new(candidates(), basic_context()).with_limit(2))
        .await
        .unwrap();

    assert_eq!(limited.recipes.len(), 2);
    assert_eq!(limited.recipes[0], full.recipes[0]);
    assert_eq!(limited.recipes[1], full.recipes[1]);
}

#[tokio::test]
async fn test_empty_candidates_rank_to_empty_result() {
    let (source, target) = seeded_source();
    let service = service(source.failing("never read"));
    let ranked = service
        .rank(&RankRequest::new(Vec::new(), basic_context()).for_user(target))
        .await
        .unwrap();
    assert!(ranked.recipes.is_empty());
}

#[tokio::test]
async fn test_signals_are_reported_per_recipe() {
    let service = service(InMemoryDataSource::new());
    let ranked = service
        .rank(&RankRequest::new(vec![salmon_bowl()], basic_context()))
        .await
        .unwrap();
    let entry = &ranked.recipes[0];
    assert!(!entry.signals.is_empty());
    assert!(entry.signals.iter().all(|s| (0.0..=100.0).contains(&s.total)));
    assert!((0.0..=100.0).contains(&entry.composite.total));
}

#[tokio::test]
async fn test_collaborative_score_is_blended_in() {
    let (source, target) = seeded_source();
    let service = service(source);
    let ctx = basic_context();

    let without = service
        .rank(
            &RankRequest::new(candidates(), ctx.clone())
                .for_user(target)
                .without_collaborative(),
        )
        .await
        .unwrap();
    let with = service
        .rank(&RankRequest::new(candidates(), ctx).for_user(target))
        .await
        .unwrap();

    for entry in &with.recipes {
        let collab = entry.collaborative.as_ref().unwrap();
        let plain = without
            .recipes
            .iter()
            .find(|e| e.input_index == entry.input_index)
            .unwrap();
        assert!(plain.collaborative.is_none());
        assert_close(entry.score, 0.9f64.mul_add(plain.score, 0.1 * collab.total));
    }
}

#[tokio::test]
async fn test_failing_source_only_matters_for_collaborative_requests() {
    let (source, target) = seeded_source();
    let service = service(source.failing("database offline"));

    let anonymous = service
        .rank(&RankRequest::new(candidates(), basic_context()))
        .await;
    assert!(anonymous.is_ok());

    let opted_out = service
        .rank(
            &RankRequest::new(candidates(), basic_context())
                .for_user(target)
                .without_collaborative(),
        )
        .await;
    assert!(opted_out.is_ok());

    let collaborative = service
        .rank(&RankRequest::new(candidates(), basic_context()).for_user(target))
        .await;
    assert!(collaborative.is_err());
}

#[tokio::test]
async fn test_learned_weights_are_cached_and_used() {
    let (source, target) = seeded_source();
    let service = service(source);

    let learned = service.learn_weights(target, &basic_context()).await.unwrap();
    assert_eq!(learned.sample_size, 7);
    assert_close(learned.confidence, 0.29);
    assert_eq!(service.weight_cache().len(), 1);

    let ranked = service
        .rank(
            &RankRequest::new(candidates(), basic_context())
                .for_user(target)
                .without_collaborative(),
        )
        .await
        .unwrap();
    assert!(ranked.learned_weights);
    assert_eq!(ranked.weights, learned.weights);

    let (weights, from_cache) = service.weights_for(Some(Uuid::new_v4()));
    assert!(!from_cache);
    assert_eq!(weights, ScoringWeights::default().normalized());
}

#[tokio::test]
async fn test_learning_for_unknown_user_uses_zero_samples() {
    let service = service(InMemoryDataSource::new());
    let learned = service
        .learn_weights(Uuid::new_v4(), &basic_context())
        .await
        .unwrap();
    assert_eq!(learned.sample_size, 0);
    assert_close(learned.confidence, 0.0);
}

#[test]
fn test_learn_from_history_without_behavior() {
    let service = service(InMemoryDataSource::new());
    let learned = service.learn_from_history(&basic_context());
    assert_eq!(learned.sample_size, 0);
    assert!(service.weight_cache().is_empty());
}

#[tokio::test]
async fn test_weight_cache_is_shared_between_services() {
    let (source, target) = seeded_source();
    let cache = WeightCache::new();
    let first = service(source.clone()).with_weight_cache(cache.clone());
    let second = service(source).with_weight_cache(cache.clone());

    first.learn_weights(target, &basic_context()).await.unwrap();
    assert!(second.weights_for(Some(target)).1);

    assert!(cache.invalidate(target).is_some());
    assert!(cache.invalidate(target).is_none());
    assert!(!second.weights_for(Some(target)).1);

    first.learn_weights(target, &basic_context()).await.unwrap();
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_plan_day_passthrough() {
    let service = service(InMemoryDataSource::new());
    let request = PlanRequest {
        candidates: candidates(),
        daily_goals: daily_goals(),
        context: basic_context(),
        options: PlanOptions {
            slots: vec![MealSlot::Lunch, MealSlot::Snack],
            distinct_meals: true,
        },
    };
    let plan = service.plan_day(&request);
    assert_eq!(plan.meals.len(), 2);
    assert_eq!(plan.meal(MealSlot::Lunch).unwrap().recipe.id, "salmon-bowl");
    assert_eq!(plan.meal(MealSlot::Snack).unwrap().recipe.id, "hummus-snack");
}

#[test]
fn test_rank_request_deserializes_with_defaults() {
    let json = serde_json::json!({
        "candidates": [],
        "context": { "now": "2025-06-11T12:00:00Z" }
    });
    let request: RankRequest = serde_json::from_value(json).unwrap();
    assert!(request.collaborative);
    assert!(request.user_id.is_none());
    assert!(request.limit.is_none());
}
