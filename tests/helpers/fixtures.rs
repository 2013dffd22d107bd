// ABOUTME: Recipe, user and history fixtures shared by the integration tests
// ABOUTME: Deterministic timestamps so time-dependent scorers give stable results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, TimeZone, Utc};
use pierre_recipe_ranker::intelligence::scorers::ScoringContext;
use pierre_recipe_ranker::models::{
    DietaryRestriction, InteractionKind, InteractionRecord, MacroGoals, MacroProfile, Recipe,
    SpiceLevel, SuperfoodCategory, UserBehaviorData, UserPreferences,
};

/// Wednesday 2025-06-11 12:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 11, 12, 0, 0).unwrap()
}

/// A specific hour on a specific day of 2025
pub fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, hour, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    fixed_now() - Duration::days(days)
}

pub fn salmon_bowl() -> Recipe {
    Recipe::new(
        "salmon-bowl",
        "Salmon Quinoa Bowl",
        "Japanese",
        25,
        MacroProfile::new(600.0, 40.0, 60.0, 20.0).with_fiber(8.0),
    )
    .with_ingredients([
        "200 g salmon fillet",
        "1 cup quinoa",
        "2 cups baby spinach",
        "1 avocado, sliced",
        "1 tbsp olive oil",
    ])
}

pub fn beef_stew() -> Recipe {
    Recipe::new(
        "beef-stew",
        "Hearty Beef Stew",
        "French",
        120,
        MacroProfile::new(850.0, 55.0, 45.0, 45.0),
    )
    .with_ingredients(["500 g beef chuck", "2 carrots", "1 cup red wine", "2 tbsp butter"])
}

pub fn oat_porridge() -> Recipe {
    Recipe::new(
        "oat-porridge",
        "Berry Oat Porridge",
        "American",
        10,
        MacroProfile::new(350.0, 12.0, 55.0, 8.0).with_fiber(7.0),
    )
    .with_ingredients(["1 cup rolled oats", "1 cup almond milk", "1/2 cup blueberries", "1 tsp cinnamon"])
}

pub fn lentil_curry() -> Recipe {
    Recipe::new(
        "lentil-curry",
        "Red Lentil Curry",
        "Indian",
        35,
        MacroProfile::new(550.0, 25.0, 70.0, 15.0).with_fiber(14.0),
    )
    .with_ingredients([
        "1 cup red lentils",
        "1 can coconut milk",
        "1 tbsp turmeric",
        "2 garlic cloves",
        "1 tbsp fresh ginger",
    ])
}

pub fn chocolate_mousse() -> Recipe {
    Recipe::new(
        "chocolate-mousse",
        "Chocolate Mousse",
        "French",
        20,
        MacroProfile::new(320.0, 6.0, 30.0, 20.0),
    )
    .with_ingredients(["100 g dark chocolate", "2 eggs", "1 tbsp sugar", "100 ml heavy cream"])
}

pub fn hummus_snack() -> Recipe {
    Recipe::new(
        "hummus-snack",
        "Hummus and Veggies",
        "Mediterranean",
        5,
        MacroProfile::new(220.0, 8.0, 22.0, 11.0).with_fiber(6.0),
    )
    .with_ingredients(["1/2 cup chickpeas", "1 tbsp tahini", "1 carrot", "1 tsp olive oil"])
}

pub fn candidates() -> Vec<Recipe> {
    vec![
        salmon_bowl(),
        beef_stew(),
        oat_porridge(),
        lentil_curry(),
        chocolate_mousse(),
        hummus_snack(),
    ]
}

/// One meal's worth of macros, matching the salmon bowl exactly
pub fn meal_goals() -> MacroGoals {
    MacroGoals::new(600.0, 40.0, 60.0, 20.0)
}

pub fn daily_goals() -> MacroGoals {
    MacroGoals::new(2000.0, 120.0, 220.0, 70.0)
}

pub fn preferences() -> UserPreferences {
    UserPreferences {
        liked_cuisines: vec!["Japanese".into(), "Indian".into()],
        dietary_restrictions: Vec::new(),
        banned_ingredients: Vec::new(),
        preferred_superfoods: vec![SuperfoodCategory::FattyFish, SuperfoodCategory::LeafyGreens],
        spice_level: Some(SpiceLevel::Medium),
        preferred_cook_time_mins: Some(30),
    }
}

pub fn vegetarian_preferences() -> UserPreferences {
    UserPreferences {
        dietary_restrictions: vec![DietaryRestriction::Vegetarian],
        ..preferences()
    }
}

pub fn interaction(kind: InteractionKind, recipe: &Recipe, timestamp: DateTime<Utc>) -> InteractionRecord {
    InteractionRecord::new(kind, recipe.snapshot(), timestamp)
}

/// Likes Japanese and Indian dishes at lunch and dinner, dislikes heavy French food
pub fn behavior_history() -> UserBehaviorData {
    UserBehaviorData::new(vec![
        interaction(InteractionKind::Liked, &salmon_bowl(), days_ago(1)),
        interaction(InteractionKind::Consumed, &lentil_curry(), days_ago(2)),
        interaction(InteractionKind::Saved, &salmon_bowl(), days_ago(3)),
        interaction(InteractionKind::Liked, &lentil_curry(), days_ago(10)),
        interaction(InteractionKind::Liked, &hummus_snack(), days_ago(12)),
        interaction(InteractionKind::Disliked, &beef_stew(), days_ago(4)),
        interaction(InteractionKind::Disliked, &chocolate_mousse(), days_ago(6)),
    ])
}

/// Context with preferences and one meal's goals only
pub fn basic_context() -> ScoringContext {
    ScoringContext::new(fixed_now())
        .with_preferences(preferences())
        .with_macro_goals(meal_goals())
}
