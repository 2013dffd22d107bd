// ABOUTME: Enhanced convenience scorer for time fit, kitchen capability and budget
// ABOUTME: Penalizes recipes that exceed the user's time, skill, equipment or budget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::scores::NEUTRAL_SCORE;
use pierre_core::models::{BudgetLevel, KitchenProfile, Recipe};
use std::sync::LazyLock;

use super::{ScoreComponent, ScoreResult, Scorer, ScoringContext, SignalKind};
use crate::taxonomy::PhraseMatcher;

const TIME_FIT_WEIGHT: f64 = 0.60;
const CONVENIENCE_WEIGHT: f64 = 0.30;
const EFFICIENCY_WEIGHT: f64 = 0.10;

const COMPONENTS: &[(&str, f64)] = &[
    ("time_fit", TIME_FIT_WEIGHT),
    ("convenience", CONVENIENCE_WEIGHT),
    ("time_efficiency", EFFICIENCY_WEIGHT),
];

const MAX_PREFERRED_OVERRUN_PENALTY: f64 = 40.0;
const MAX_AVAILABLE_OVERRUN_PENALTY: f64 = 60.0;
const AVAILABLE_OVERRUN_SLOPE: f64 = 80.0;
const SKILL_GAP_PENALTY: f64 = 25.0;
const MISSING_EQUIPMENT_PENALTY: f64 = 15.0;
const MAX_EQUIPMENT_PENALTY: f64 = 45.0;
const PREMIUM_INGREDIENT_PENALTY: f64 = 10.0;
const MAX_PREMIUM_PENALTY: f64 = 30.0;
/// Minutes per serving considered fully efficient
const EFFICIENT_MINUTES_PER_SERVING: f64 = 15.0;

static PREMIUM_INGREDIENTS: LazyLock<Vec<PhraseMatcher>> = LazyLock::new(|| {
    [
        "saffron",
        "truffle",
        "lobster",
        "wagyu",
        "caviar",
        "scallops",
        "filet mignon",
        "pine nuts",
        "king crab",
        "prosciutto",
        "foie gras",
    ]
    .into_iter()
    .map(|term| PhraseMatcher::new(&[term]))
    .collect()
});

/// Scores whether the user can realistically cook the recipe now
#[derive(Debug, Clone, Copy, Default)]
pub struct EnhancedScorer;

impl EnhancedScorer {
    fn time_fit(cook: u32, preferred: Option<u32>, available: Option<u32>) -> f64 {
        if preferred.is_none() && available.is_none() {
            return NEUTRAL_SCORE;
        }
        let cook = f64::from(cook);
        let mut score = 100.0;
        if let Some(preferred) = preferred.map(f64::from) {
            if cook > preferred {
                score -= Self::overrun_penalty(
                    cook - preferred,
                    preferred,
                    MAX_PREFERRED_OVERRUN_PENALTY,
                    MAX_PREFERRED_OVERRUN_PENALTY,
                );
            }
        }
        if let Some(available) = available.map(f64::from) {
            if cook > available {
                score -= Self::overrun_penalty(
                    cook - available,
                    available,
                    AVAILABLE_OVERRUN_SLOPE,
                    MAX_AVAILABLE_OVERRUN_PENALTY,
                );
            }
        }
        score
    }

    /// `min(cap, slope·excess/limit)`; a zero limit takes the full cap
    fn overrun_penalty(excess: f64, limit: f64, slope: f64, cap: f64) -> f64 {
        if limit <= 0.0 {
            return cap;
        }
        (slope * excess / limit).min(cap)
    }

    fn convenience(recipe: &Recipe, kitchen: Option<&KitchenProfile>) -> f64 {
        let Some(kitchen) = kitchen else {
            return NEUTRAL_SCORE;
        };
        let mut score = 100.0;

        if let Some(difficulty) = recipe.difficulty {
            let gap = difficulty.rank().saturating_sub(kitchen.skill_level.rank());
            score -= SKILL_GAP_PENALTY * f64::from(gap);
        }

        let missing = recipe
            .equipment
            .iter()
            .filter(|item| !kitchen.has_equipment(item))
            .count();
        score -= (MISSING_EQUIPMENT_PENALTY * missing as f64).min(MAX_EQUIPMENT_PENALTY);

        score -= Self::budget_penalty(recipe, kitchen.budget);
        score
    }

    fn budget_penalty(recipe: &Recipe, budget: BudgetLevel) -> f64 {
        match (budget, recipe.cost_per_serving) {
            (BudgetLevel::Low, Some(cost)) if cost > 10.0 => 35.0,
            (BudgetLevel::Low, Some(cost)) if cost > 5.0 => 20.0,
            (BudgetLevel::Medium, Some(cost)) if cost > 12.0 => 20.0,
            (BudgetLevel::Low, None) => {
                let premium = PREMIUM_INGREDIENTS
                    .iter()
                    .filter(|matcher| recipe.ingredients.iter().any(|i| matcher.is_match(i)))
                    .count();
                (PREMIUM_INGREDIENT_PENALTY * premium as f64).min(MAX_PREMIUM_PENALTY)
            }
            _ => 0.0,
        }
    }

    fn time_efficiency(recipe: &Recipe) -> f64 {
        if recipe.cook_time_mins == 0 {
            return 100.0;
        }
        let ratio = EFFICIENT_MINUTES_PER_SERVING * f64::from(recipe.servings)
            / f64::from(recipe.cook_time_mins);
        100.0 * ratio.min(1.0)
    }
}

impl Scorer for EnhancedScorer {
    fn kind(&self) -> SignalKind {
        SignalKind::Enhanced
    }

    fn evaluate(&self, recipe: &Recipe, ctx: &ScoringContext) -> ScoreResult {
        let preferred = ctx
            .preferences
            .as_ref()
            .and_then(|p| p.preferred_cook_time_mins);
        let kitchen = ctx.kitchen.as_ref();
        let available = kitchen.and_then(|k| k.available_time_mins);
        if preferred.is_none() && kitchen.is_none() {
            return ScoreResult::neutral(self.kind(), COMPONENTS);
        }
        ScoreResult::from_components(
            self.kind(),
            vec![
                ScoreComponent::new(
                    "time_fit",
                    Self::time_fit(recipe.cook_time_mins, preferred, available),
                    TIME_FIT_WEIGHT,
                ),
                ScoreComponent::new(
                    "convenience",
                    Self::convenience(recipe, kitchen),
                    CONVENIENCE_WEIGHT,
                ),
                ScoreComponent::new(
                    "time_efficiency",
                    Self::time_efficiency(recipe),
                    EFFICIENCY_WEIGHT,
                ),
            ],
        )
    }
}
