// ABOUTME: Criterion benchmarks for recipe scoring, ranking and daily planning
// ABOUTME: Measures scorer registry evaluation, full ranking passes and plan building
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the ranking pipeline.
//!
//! Measures per-recipe signal evaluation, parallel ranking of candidate sets
//! and daily plan generation.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pierre_recipe_ranker::intelligence::config::RankingConfig;
use pierre_recipe_ranker::intelligence::daily_plan::PlanOptions;
use pierre_recipe_ranker::intelligence::scorers::{ScorerRegistry, ScoringContext};
use pierre_recipe_ranker::models::{
    InteractionKind, InteractionRecord, MacroGoals, MacroProfile, Recipe, SuperfoodCategory,
    UserBehaviorData, UserPreferences,
};
use pierre_recipe_ranker::services::{PlanRequest, RankRequest, RecommendationService};
use pierre_recipe_ranker::store::InMemoryDataSource;
use std::sync::Arc;
use tokio::runtime::Runtime;

const CUISINES: [&str; 5] = ["Japanese", "Indian", "French", "Mexican", "Mediterranean"];

const INGREDIENTS: [&str; 10] = [
    "200 g salmon fillet",
    "2 cups baby spinach",
    "1 cup quinoa",
    "1 cup red lentils",
    "2 garlic cloves",
    "1 tbsp olive oil",
    "500 g beef chuck",
    "1/2 cup blueberries",
    "1 cup rolled oats",
    "1 avocado",
];

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn generate_recipes(count: usize) -> Vec<Recipe> {
    (0..count)
        .map(|index| {
            let macros = MacroProfile::new(
                250.0 + ((index * 37) % 600) as f64,
                10.0 + ((index * 7) % 45) as f64,
                20.0 + ((index * 11) % 80) as f64,
                5.0 + ((index * 3) % 35) as f64,
            );
            let ingredients = (0..4).map(|offset| INGREDIENTS[(index + offset * 3) % INGREDIENTS.len()]);
            Recipe::new(
                format!("bench-recipe-{index}"),
                format!("Benchmark Recipe {index}"),
                CUISINES[index % CUISINES.len()],
                5 + ((index * 13) % 90) as u32,
                macros,
            )
            .with_ingredients(ingredients)
        })
        .collect()
}

fn generate_history(recipes: &[Recipe]) -> UserBehaviorData {
    let now = Utc.with_ymd_and_hms(2025, 6, 11, 12, 0, 0).unwrap();
    let interactions = recipes
        .iter()
        .take(30)
        .zip(0_i64..)
        .map(|(recipe, days)| {
            let kind = if days % 4 == 0 {
                InteractionKind::Disliked
            } else {
                InteractionKind::Liked
            };
            InteractionRecord::new(kind, recipe.snapshot(), now - Duration::days(days))
        })
        .collect();
    UserBehaviorData::new(interactions)
}

fn context(recipes: &[Recipe]) -> ScoringContext {
    let now = Utc.with_ymd_and_hms(2025, 6, 11, 12, 0, 0).unwrap();
    ScoringContext::new(now)
        .with_preferences(UserPreferences {
            liked_cuisines: vec!["Japanese".into(), "Indian".into()],
            preferred_superfoods: vec![SuperfoodCategory::FattyFish, SuperfoodCategory::LeafyGreens],
            preferred_cook_time_mins: Some(30),
            ..UserPreferences::default()
        })
        .with_macro_goals(MacroGoals::new(600.0, 40.0, 60.0, 20.0))
        .with_behavior(generate_history(recipes))
}

fn bench_signal_evaluation(c: &mut Criterion) {
    let recipes = generate_recipes(10);
    let ctx = context(&recipes);
    let registry = ScorerRegistry::standard();

    c.bench_function("evaluate_all_signals", |b| {
        b.iter(|| registry.evaluate_all(black_box(&recipes[0]), black_box(&ctx)));
    });
}

#[allow(clippy::cast_possible_truncation)]
fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_candidates");
    let runtime = Runtime::new().unwrap();
    let service = RecommendationService::with_config(
        Arc::new(InMemoryDataSource::new()),
        &RankingConfig::default(),
    );

    for count in [10_usize, 100, 500] {
        let recipes = generate_recipes(count);
        let request = RankRequest::new(recipes.clone(), context(&recipes));
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("rank", count), &request, |b, request| {
            b.to_async(&runtime)
                .iter(|| async { service.rank(black_box(request)).await });
        });
    }

    group.finish();
}

fn bench_daily_plan(c: &mut Criterion) {
    let service = RecommendationService::with_config(
        Arc::new(InMemoryDataSource::new()),
        &RankingConfig::default(),
    );
    let recipes = generate_recipes(200);
    let request = PlanRequest {
        context: context(&recipes),
        candidates: recipes,
        daily_goals: MacroGoals::new(2000.0, 120.0, 220.0, 70.0),
        options: PlanOptions {
            distinct_meals: true,
            ..PlanOptions::default()
        },
    };

    c.bench_function("plan_day_200_candidates", |b| {
        b.iter(|| service.plan_day(black_box(&request)));
    });
}

criterion_group!(
    benches,
    bench_signal_evaluation,
    bench_ranking,
    bench_daily_plan
);
criterion_main!(benches);
