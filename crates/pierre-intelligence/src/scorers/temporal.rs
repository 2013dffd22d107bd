// ABOUTME: Temporal scorer rating recipes for the time of day, day type and season
// ABOUTME: Rule bonuses per meal period plus learned habits from UserTemporalPatterns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::scores::NEUTRAL_SCORE;
use pierre_core::models::Recipe;
use std::sync::LazyLock;

use super::{ScoreComponent, ScoreResult, Scorer, ScoringContext, SignalKind};
use crate::taxonomy::PhraseMatcher;
use crate::temporal::{MealPeriod, Season, TemporalContext, UserTemporalPatterns};

const TIME_OF_DAY_WEIGHT: f64 = 0.30;
const DAY_TYPE_WEIGHT: f64 = 0.30;
const SEASON_WEIGHT: f64 = 0.20;
const MEAL_PERIOD_WEIGHT: f64 = 0.20;

const COMPONENTS: &[(&str, f64)] = &[
    ("time_of_day", TIME_OF_DAY_WEIGHT),
    ("day_type", DAY_TYPE_WEIGHT),
    ("season", SEASON_WEIGHT),
    ("meal_period", MEAL_PERIOD_WEIGHT),
];

static HEARTY: LazyLock<PhraseMatcher> = LazyLock::new(|| {
    PhraseMatcher::new(&[
        "stew", "soup", "chili", "roast", "roasted", "casserole", "braised", "braise", "curry",
        "pot pie", "lasagna", "risotto", "chowder", "goulash", "shepherd's pie",
    ])
});

static LIGHT: LazyLock<PhraseMatcher> = LazyLock::new(|| {
    PhraseMatcher::new(&[
        "salad", "smoothie", "ceviche", "gazpacho", "poke", "grilled", "chilled", "cold",
        "sorbet", "cucumber", "watermelon",
    ])
});

static FRESH: LazyLock<PhraseMatcher> = LazyLock::new(|| {
    PhraseMatcher::new(&[
        "fresh", "spring", "asparagus", "peas", "pea", "herbs", "herb", "lemon", "salad",
        "radish", "radishes", "mint",
    ])
});

fn mentions(matcher: &PhraseMatcher, recipe: &Recipe) -> bool {
    matcher.is_match(&recipe.title) || recipe.ingredients.iter().any(|i| matcher.is_match(i))
}

/// Scores fit with the moment the meal will be eaten
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalScorer;

impl TemporalScorer {
    fn time_of_day(
        recipe: &Recipe,
        time: &TemporalContext,
        patterns: Option<&UserTemporalPatterns>,
    ) -> f64 {
        let cook = recipe.cook_time_mins;
        let kcal = recipe.macros.calories;
        let mut score = 50.0;
        match time.meal_period {
            MealPeriod::Breakfast => {
                if cook <= 15 {
                    score += 20.0;
                }
                if kcal <= 400.0 {
                    score += 15.0;
                } else if kcal > 700.0 {
                    score -= 15.0;
                }
            }
            MealPeriod::Lunch => {
                if cook <= 30 {
                    score += 15.0;
                }
                if (400.0..=700.0).contains(&kcal) {
                    score += 15.0;
                }
            }
            MealPeriod::Snack => {
                if kcal <= 250.0 {
                    score += 25.0;
                } else if kcal > 500.0 {
                    score -= 20.0;
                }
                if cook <= 10 {
                    score += 10.0;
                }
            }
            MealPeriod::Dinner => {
                if cook >= 20 {
                    score += 10.0;
                }
                if (500.0..=900.0).contains(&kcal) {
                    score += 15.0;
                }
            }
            MealPeriod::LateNight => {
                if kcal <= 400.0 {
                    score += 20.0;
                } else if kcal > 700.0 {
                    score -= 20.0;
                }
                if cook <= 15 {
                    score += 10.0;
                }
            }
        }
        let near_habit = patterns
            .and_then(|p| p.modal_hour(time.meal_period))
            .is_some_and(|hour| hour.abs_diff(time.hour) <= 1);
        if near_habit {
            score += 20.0;
        }
        score
    }

    fn day_type(
        recipe: &Recipe,
        time: &TemporalContext,
        patterns: Option<&UserTemporalPatterns>,
    ) -> f64 {
        let cook = recipe.cook_time_mins;
        let mut score = 50.0;
        if time.is_weekend {
            if cook > 45 {
                score += 15.0;
            } else if cook <= 30 {
                score += 5.0;
            }
        } else if cook <= 30 {
            score += 20.0;
        } else if cook > 60 {
            score -= 20.0;
        }
        if patterns.is_some_and(|p| p.prefers_on_day(time.is_weekend, &recipe.cuisine)) {
            score += 25.0;
        }
        score
    }

    fn season(
        recipe: &Recipe,
        time: &TemporalContext,
        patterns: Option<&UserTemporalPatterns>,
    ) -> f64 {
        let kcal = recipe.macros.calories;
        let mut score = 50.0;
        match time.season {
            Season::Winter | Season::Autumn => {
                if kcal >= 500.0 {
                    score += 10.0;
                }
                if mentions(&HEARTY, recipe) {
                    score += 15.0;
                }
            }
            Season::Summer => {
                if kcal <= 500.0 {
                    score += 10.0;
                }
                if mentions(&LIGHT, recipe) {
                    score += 15.0;
                }
                if mentions(&HEARTY, recipe) {
                    score -= 10.0;
                }
            }
            Season::Spring => {
                if mentions(&FRESH, recipe) {
                    score += 15.0;
                }
                if kcal <= 600.0 {
                    score += 5.0;
                }
            }
        }
        if patterns.is_some_and(|p| p.prefers_in_season(time.season, &recipe.cuisine)) {
            score += 20.0;
        }
        score
    }

    fn meal_period(
        recipe: &Recipe,
        time: &TemporalContext,
        patterns: Option<&UserTemporalPatterns>,
    ) -> f64 {
        let Some(patterns) = patterns else {
            return NEUTRAL_SCORE;
        };
        let share = patterns.period_share(time.meal_period);
        let mut score = 50.0 + (60.0 * share).min(30.0);
        if patterns.engaged_in_period(time.meal_period, &recipe.cuisine) {
            score += 20.0;
        }
        score
    }
}

impl Scorer for TemporalScorer {
    fn kind(&self) -> SignalKind {
        SignalKind::Temporal
    }

    fn evaluate(&self, recipe: &Recipe, ctx: &ScoringContext) -> ScoreResult {
        let Some(time) = ctx.temporal.as_ref() else {
            return ScoreResult::neutral(self.kind(), COMPONENTS);
        };
        let patterns = ctx.learned_patterns();
        ScoreResult::from_components(
            self.kind(),
            vec![
                ScoreComponent::new(
                    "time_of_day",
                    Self::time_of_day(recipe, time, patterns),
                    TIME_OF_DAY_WEIGHT,
                ),
                ScoreComponent::new(
                    "day_type",
                    Self::day_type(recipe, time, patterns),
                    DAY_TYPE_WEIGHT,
                ),
                ScoreComponent::new("season", Self::season(recipe, time, patterns), SEASON_WEIGHT),
                ScoreComponent::new(
                    "meal_period",
                    Self::meal_period(recipe, time, patterns),
                    MEAL_PERIOD_WEIGHT,
                ),
            ],
        )
    }
}
