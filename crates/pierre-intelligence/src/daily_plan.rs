// ABOUTME: Daily meal plan orchestration picking one recipe per meal slot
// ABOUTME: Slot macro targets, meal-type heuristics, parallel candidate scoring and reasoning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Daily Plan Orchestrator
//!
//! For each requested slot the day's macro goals are scaled by the slot's
//! share, every candidate is scored against those targets, and the best one
//! is kept:
//!
//! ```text
//! slot score = 0.7 · composite total + 0.3 · meal heuristic
//! ```
//!
//! Candidates are scored in parallel; the reduction picks the highest score
//! and, on ties, the earliest candidate in input order.

use pierre_core::models::{MacroGoals, MacroProfile, MealSlot, Recipe};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::composite::{CompositeScore, CompositeScorer};
use crate::config::intelligence::{DailyPlanConfig, RankingConfig};
use crate::math::clamp_score;
use crate::scorers::{BehavioralScorer, Scorer, ScoringContext, TemporalScorer};
use crate::taxonomy::PhraseMatcher;
use crate::temporal::TemporalContext;

/// Minutes at or below which a recipe is called quick in reasoning
const QUICK_PREP_MINUTES: u32 = 20;

static SWEET: LazyLock<PhraseMatcher> = LazyLock::new(|| {
    PhraseMatcher::new(&[
        "chocolate", "cocoa", "cake", "cookie", "cookies", "brownie", "brownies", "pudding",
        "ice cream", "sorbet", "tart", "pie", "caramel", "maple syrup", "honey", "sugar",
        "dessert", "sweet", "custard", "mousse", "cheesecake", "jam",
    ])
});

/// Which slots to plan and how
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanOptions {
    /// Slots to fill, in order; duplicates are ignored
    pub slots: Vec<MealSlot>,
    /// Prevent one recipe from filling two slots
    pub distinct_meals: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            slots: MealSlot::DEFAULT_DAY.to_vec(),
            distinct_meals: false,
        }
    }
}

/// The recipe chosen for one slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedMeal {
    /// Slot filled
    pub slot: MealSlot,
    /// Chosen recipe
    pub recipe: Recipe,
    /// Slot score, 0-100
    pub score: f64,
    /// Composite score against the slot targets
    pub composite: CompositeScore,
    /// Meal-type heuristic, 0-100
    pub heuristic: f64,
    /// Macro targets for this slot
    pub targets: MacroGoals,
    /// Headline followed by detail lines
    pub reasoning: Vec<String>,
}

/// A day of planned meals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    /// Filled slots in request order
    pub meals: Vec<PlannedMeal>,
    /// Slots no candidate could fill
    pub unfilled: Vec<MealSlot>,
    /// Sum of the planned meals' macros
    pub totals: MacroProfile,
    /// The day's goals the plan was built for
    pub daily_target: MacroGoals,
}

impl DailyPlan {
    /// Planned meal for a slot, if filled
    #[must_use]
    pub fn meal(&self, slot: MealSlot) -> Option<&PlannedMeal> {
        self.meals.iter().find(|m| m.slot == slot)
    }
}

/// Candidate evaluation for one slot
#[derive(Debug, Clone)]
struct SlotCandidate {
    index: usize,
    score: f64,
    composite: CompositeScore,
    heuristic: f64,
}

/// Higher score wins; equal scores go to the earlier candidate
fn better(a: SlotCandidate, b: SlotCandidate) -> SlotCandidate {
    match a.score.total_cmp(&b.score) {
        Ordering::Greater => a,
        Ordering::Less => b,
        Ordering::Equal => {
            if a.index <= b.index {
                a
            } else {
                b
            }
        }
    }
}

/// Builds daily plans from a candidate set
#[derive(Debug, Clone)]
pub struct DailyPlanner {
    config: DailyPlanConfig,
    composite: CompositeScorer,
}

impl Default for DailyPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DailyPlanner {
    /// Planner using the global configuration
    #[must_use]
    pub fn new() -> Self {
        let global = RankingConfig::global();
        Self {
            config: global.daily_plan.clone(),
            composite: CompositeScorer::with_config(global.composite.clone()),
        }
    }

    /// Planner using explicit configuration
    #[must_use]
    pub const fn with_config(config: DailyPlanConfig, composite: CompositeScorer) -> Self {
        Self { config, composite }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &DailyPlanConfig {
        &self.config
    }

    /// Options seeded from configuration (default slots)
    #[must_use]
    pub fn default_options(&self) -> PlanOptions {
        PlanOptions {
            distinct_meals: self.config.distinct_meals,
            ..PlanOptions::default()
        }
    }

    /// Share of the day's macros for each requested slot, summing to 1
    #[must_use]
    pub fn slot_shares(slots: &[MealSlot]) -> Vec<(MealSlot, f64)> {
        let mut seen = BTreeSet::new();
        let unique: Vec<MealSlot> = slots.iter().copied().filter(|s| seen.insert(*s)).collect();
        let total: f64 = unique.iter().map(|s| s.default_share()).sum();
        if total <= f64::EPSILON {
            return Vec::new();
        }
        unique
            .into_iter()
            .map(|slot| (slot, slot.default_share() / total))
            .collect()
    }

    /// Meal-type heuristic, 0-100
    #[must_use]
    pub fn meal_heuristic(slot: MealSlot, recipe: &Recipe, targets: &MacroGoals) -> f64 {
        let cook = recipe.cook_time_mins;
        let kcal = recipe.macros.calories;
        let target = targets.calories;
        let mut score: f64 = 50.0;
        match slot {
            MealSlot::Breakfast => {
                score += match cook {
                    0..=15 => 30.0,
                    16..=30 => 15.0,
                    31..=45 => 0.0,
                    _ => -20.0,
                };
                if kcal <= 1.1 * target {
                    score += 20.0;
                }
            }
            MealSlot::Lunch => {
                score += match cook {
                    0..=30 => 25.0,
                    31..=45 => 10.0,
                    _ => 0.0,
                };
                if target > 0.0 && ((kcal - target) / target).abs() <= 0.2 {
                    score += 15.0;
                }
            }
            MealSlot::Dinner => {
                score += match cook {
                    25.. => 25.0,
                    15..=24 => 10.0,
                    _ => 0.0,
                };
                if kcal >= 0.8 * target {
                    score += 15.0;
                }
                if recipe.macros.protein_g >= 20.0 {
                    score += 10.0;
                }
            }
            MealSlot::Snack => {
                score += match cook {
                    0..=10 => 30.0,
                    11..=20 => 15.0,
                    21..=30 => 0.0,
                    _ => -25.0,
                };
                if kcal <= 300.0 {
                    score += 20.0;
                } else if kcal > 500.0 {
                    score -= 20.0;
                }
            }
            MealSlot::Dessert => {
                if cook <= 30 {
                    score += 15.0;
                }
                if kcal <= 350.0 {
                    score += 20.0;
                }
                let sweet = SWEET.is_match(&recipe.title)
                    || recipe.ingredients.iter().any(|i| SWEET.is_match(i));
                if sweet {
                    score += 15.0;
                }
            }
        }
        clamp_score(score)
    }

    /// Context for scoring one slot: slot targets and, when history or time
    /// context exists, a temporal context at the slot's typical hour
    fn slot_context(ctx: &ScoringContext, slot: MealSlot, targets: MacroGoals) -> ScoringContext {
        let mut slot_ctx = ctx.clone().with_macro_goals(targets);
        if ctx.temporal.is_some() || ctx.behavior_history().is_some() {
            let day = ctx
                .temporal
                .unwrap_or_else(|| TemporalContext::from_datetime(ctx.now));
            slot_ctx.temporal = Some(day.at_hour(slot.typical_hour()));
        }
        slot_ctx
    }

    fn evaluate_candidate(
        &self,
        index: usize,
        recipe: &Recipe,
        slot: MealSlot,
        targets: &MacroGoals,
        slot_ctx: &ScoringContext,
    ) -> SlotCandidate {
        let behavioral = slot_ctx
            .behavior_history()
            .map(|_| BehavioralScorer.evaluate(recipe, slot_ctx).total);
        let temporal = slot_ctx
            .temporal
            .as_ref()
            .map(|_| TemporalScorer.evaluate(recipe, slot_ctx).total);
        let composite = self
            .composite
            .score_in_context(recipe, slot_ctx, behavioral, temporal);
        let heuristic = Self::meal_heuristic(slot, recipe, targets);
        let score = clamp_score(self.config.composite_weight.mul_add(
            composite.total,
            self.config.heuristic_weight * heuristic,
        ));
        SlotCandidate {
            index,
            score,
            composite,
            heuristic,
        }
    }

    fn best_for_slot(
        &self,
        candidates: &[Recipe],
        excluded: &BTreeSet<usize>,
        slot: MealSlot,
        targets: &MacroGoals,
        slot_ctx: &ScoringContext,
    ) -> Option<SlotCandidate> {
        candidates
            .par_iter()
            .enumerate()
            .filter(|(index, _)| !excluded.contains(index))
            .map(|(index, recipe)| self.evaluate_candidate(index, recipe, slot, targets, slot_ctx))
            .reduce_with(better)
    }

    fn reasoning(&self, slot: MealSlot, recipe: &Recipe, best: &SlotCandidate, targets: &MacroGoals) -> Vec<String> {
        let headline = if best.score >= self.config.excellent_threshold {
            format!("Excellent {slot} choice: {}", recipe.title)
        } else if best.score >= self.config.good_threshold {
            format!("Good {slot} choice: {}", recipe.title)
        } else {
            format!("Suitable {slot} option: {}", recipe.title)
        };
        let mut lines = vec![headline];
        if recipe.cook_time_mins <= QUICK_PREP_MINUTES {
            lines.push(format!("Quick preparation ({} min)", recipe.cook_time_mins));
        }
        if targets.calories > 0.0 {
            let distance = (recipe.macros.calories - targets.calories).abs() / targets.calories;
            if distance <= self.config.calorie_proximity {
                lines.push(format!(
                    "Within {:.0}% of the {slot} calorie target ({:.0} kcal)",
                    self.config.calorie_proximity * 100.0,
                    targets.calories
                ));
            }
        }
        let superfoods = &best.composite.breakdown.matched_superfoods;
        if !superfoods.is_empty() {
            let labels: Vec<&str> = superfoods.iter().map(|s| s.label()).collect();
            lines.push(format!("Contains preferred superfoods: {}", labels.join(", ")));
        }
        if let Some(veto) = &best.composite.breakdown.veto {
            lines.push(format!("Warning: {veto}"));
        }
        lines
    }

    /// Pick one recipe per slot
    ///
    /// An empty candidate set leaves every slot unfilled.
    #[must_use]
    pub fn plan_day(
        &self,
        candidates: &[Recipe],
        daily_goals: &MacroGoals,
        ctx: &ScoringContext,
        options: &PlanOptions,
    ) -> DailyPlan {
        let mut meals = Vec::new();
        let mut unfilled = Vec::new();
        let mut used = BTreeSet::new();
        let nothing_excluded = BTreeSet::new();
        let indexed;
        let ctx = if ctx.behavior.is_some() && ctx.history_index.is_none() {
            indexed = ctx.clone().with_history_index();
            &indexed
        } else {
            ctx
        };

        for (slot, share) in Self::slot_shares(&options.slots) {
            let targets = daily_goals.scaled(share);
            let slot_ctx = Self::slot_context(ctx, slot, targets);
            let excluded = if options.distinct_meals {
                &used
            } else {
                &nothing_excluded
            };
            let Some(best) = self.best_for_slot(candidates, excluded, slot, &targets, &slot_ctx)
            else {
                debug!(%slot, "No candidate available for slot");
                unfilled.push(slot);
                continue;
            };
            let Some(recipe) = candidates.get(best.index) else {
                unfilled.push(slot);
                continue;
            };
            used.insert(best.index);
            meals.push(PlannedMeal {
                slot,
                recipe: recipe.clone(),
                score: best.score,
                reasoning: self.reasoning(slot, recipe, &best, &targets),
                composite: best.composite,
                heuristic: best.heuristic,
                targets,
            });
        }

        let totals = meals
            .iter()
            .fold(MacroProfile::default(), |acc, meal| acc.add(&meal.recipe.macros));
        info!(
            candidates = candidates.len(),
            planned = meals.len(),
            unfilled = unfilled.len(),
            "Daily plan generated"
        );
        DailyPlan {
            meals,
            unfilled,
            totals,
            daily_target: *daily_goals,
        }
    }
}
