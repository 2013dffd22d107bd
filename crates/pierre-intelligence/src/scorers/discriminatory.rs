// ABOUTME: Discriminatory scorer separating recipes by explicit user preferences
// ABOUTME: Cuisine preference, banned-ingredient penalty and cook-time bucket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::scores::NEUTRAL_SCORE;
use pierre_core::models::{Recipe, UserPreferences};

use super::{ScoreComponent, ScoreResult, Scorer, ScoringContext, SignalKind};
use crate::taxonomy::find_banned_ingredient;

const CUISINE_WEIGHT: f64 = 0.30;
const BANNED_WEIGHT: f64 = 0.25;
const COOK_TIME_WEIGHT: f64 = 0.20;
const DIETARY_WEIGHT: f64 = 0.15;
const SPICE_WEIGHT: f64 = 0.10;

const COMPONENTS: &[(&str, f64)] = &[
    ("cuisine_preference", CUISINE_WEIGHT),
    ("banned_ingredients", BANNED_WEIGHT),
    ("cook_time", COOK_TIME_WEIGHT),
    ("dietary", DIETARY_WEIGHT),
    ("spice", SPICE_WEIGHT),
];

const LIKED_CUISINE_SCORE: f64 = 90.0;
const OTHER_CUISINE_SCORE: f64 = 20.0;
const BANNED_PENALTY: f64 = 60.0;

/// Scores how sharply a recipe matches stated preferences
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscriminatoryScorer;

impl DiscriminatoryScorer {
    fn cuisine(recipe: &Recipe, prefs: &UserPreferences) -> f64 {
        if prefs.liked_cuisines.is_empty() {
            NEUTRAL_SCORE
        } else if prefs.likes_cuisine(&recipe.cuisine) {
            LIKED_CUISINE_SCORE
        } else {
            OTHER_CUISINE_SCORE
        }
    }

    fn banned(recipe: &Recipe, prefs: &UserPreferences) -> f64 {
        let penalty = if find_banned_ingredient(&recipe.ingredients, &prefs.banned_ingredients)
            .is_some()
        {
            BANNED_PENALTY
        } else {
            0.0
        };
        100.0 - penalty
    }

    const fn cook_time_bucket(cook_time_mins: u32) -> f64 {
        match cook_time_mins {
            0..=5 => 95.0,
            6..=15 => 80.0,
            16..=30 => 60.0,
            _ => 30.0,
        }
    }
}

impl Scorer for DiscriminatoryScorer {
    fn kind(&self) -> SignalKind {
        SignalKind::Discriminatory
    }

    fn evaluate(&self, recipe: &Recipe, ctx: &ScoringContext) -> ScoreResult {
        let Some(prefs) = ctx.preferences.as_ref() else {
            return ScoreResult::neutral(self.kind(), COMPONENTS);
        };
        ScoreResult::from_components(
            self.kind(),
            vec![
                ScoreComponent::new(
                    "cuisine_preference",
                    Self::cuisine(recipe, prefs),
                    CUISINE_WEIGHT,
                ),
                ScoreComponent::new(
                    "banned_ingredients",
                    Self::banned(recipe, prefs),
                    BANNED_WEIGHT,
                ),
                ScoreComponent::new(
                    "cook_time",
                    Self::cook_time_bucket(recipe.cook_time_mins),
                    COOK_TIME_WEIGHT,
                ),
                // Dietary and spice fit are judged by the composite scorer
                ScoreComponent::new("dietary", NEUTRAL_SCORE, DIETARY_WEIGHT),
                ScoreComponent::new("spice", NEUTRAL_SCORE, SPICE_WEIGHT),
            ],
        )
    }
}
