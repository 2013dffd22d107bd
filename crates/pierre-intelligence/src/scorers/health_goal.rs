// ABOUTME: Health-goal scorer aligning recipes with the user's fitness goal
// ABOUTME: Goal-specific calorie and protein bands, macro energy balance and nutrient density
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health-goal alignment
//!
//! Calorie and protein sub-scores come from per-goal band tables; the first
//! band that contains the ratio wins. Protein tables are non-decreasing in the
//! ratio so that moving protein toward the goal never lowers the score.

use pierre_core::constants::nutrition::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use pierre_core::constants::scores::NEUTRAL_SCORE;
use pierre_core::models::{FitnessGoal, MacroGoals, MacroProfile, Recipe};

use super::{ScoreComponent, ScoreResult, Scorer, ScoringContext, SignalKind};
use crate::math::mean;

const CALORIE_WEIGHT: f64 = 0.30;
const PROTEIN_WEIGHT: f64 = 0.35;
const BALANCE_WEIGHT: f64 = 0.20;
const DENSITY_WEIGHT: f64 = 0.15;

const COMPONENTS: &[(&str, f64)] = &[
    ("calorie_alignment", CALORIE_WEIGHT),
    ("protein_alignment", PROTEIN_WEIGHT),
    ("macro_balance", BALANCE_WEIGHT),
    ("nutrient_density", DENSITY_WEIGHT),
];

/// Percentage points outside a range at which a macro scores zero
const BALANCE_TOLERANCE_PCT: f64 = 15.0;

/// Closed or half-open ratio band mapped to a score
struct Band {
    low: f64,
    low_inclusive: bool,
    high: f64,
    high_inclusive: bool,
    score: f64,
}

impl Band {
    const fn closed(low: f64, high: f64, score: f64) -> Self {
        Self {
            low,
            low_inclusive: true,
            high,
            high_inclusive: true,
            score,
        }
    }

    /// `[low, high)`
    const fn upper_open(low: f64, high: f64, score: f64) -> Self {
        Self {
            low,
            low_inclusive: true,
            high,
            high_inclusive: false,
            score,
        }
    }

    /// `(low, high]`
    const fn lower_open(low: f64, high: f64, score: f64) -> Self {
        Self {
            low,
            low_inclusive: false,
            high,
            high_inclusive: true,
            score,
        }
    }

    fn contains(&self, ratio: f64) -> bool {
        let above = if self.low_inclusive {
            ratio >= self.low
        } else {
            ratio > self.low
        };
        let below = if self.high_inclusive {
            ratio <= self.high
        } else {
            ratio < self.high
        };
        above && below
    }
}

const LOSE_WEIGHT_CALORIES: [Band; 5] = [
    Band::closed(0.70, 0.95, 100.0),
    Band::lower_open(0.95, 1.00, 90.0),
    Band::upper_open(0.50, 0.70, 75.0),
    Band::lower_open(1.00, 1.10, 60.0),
    Band::lower_open(1.10, 1.25, 35.0),
];
const MAINTAIN_CALORIES: [Band; 4] = [
    Band::closed(0.95, 1.05, 100.0),
    Band::closed(0.90, 1.10, 85.0),
    Band::closed(0.80, 1.20, 65.0),
    Band::closed(0.70, 1.30, 45.0),
];
const GAIN_MUSCLE_CALORIES: [Band; 4] = [
    Band::closed(1.00, 1.15, 100.0),
    Band::upper_open(0.95, 1.00, 90.0),
    Band::lower_open(1.15, 1.25, 80.0),
    Band::upper_open(0.85, 0.95, 65.0),
];
const GAIN_WEIGHT_CALORIES: [Band; 4] = [
    Band::closed(1.10, 1.30, 100.0),
    Band::upper_open(1.00, 1.10, 90.0),
    Band::lower_open(1.30, 1.50, 75.0),
    Band::upper_open(0.90, 1.00, 60.0),
];

/// `(minimum ratio, score)` thresholds, highest first
const LOSE_WEIGHT_PROTEIN: &[(f64, f64)] = &[
    (1.10, 100.0),
    (1.00, 95.0),
    (0.85, 80.0),
    (0.70, 60.0),
    (0.50, 40.0),
];
const MAINTAIN_PROTEIN: &[(f64, f64)] = &[(0.95, 100.0), (0.80, 85.0), (0.65, 65.0), (0.50, 45.0)];
const GAIN_MUSCLE_PROTEIN: &[(f64, f64)] = &[
    (1.20, 100.0),
    (1.00, 95.0),
    (0.90, 80.0),
    (0.75, 60.0),
    (0.50, 35.0),
];
const GAIN_WEIGHT_PROTEIN: &[(f64, f64)] = &[(1.00, 100.0), (0.85, 85.0), (0.70, 65.0), (0.50, 45.0)];

/// Target energy share ranges (percent) for protein, carbs and fat
const fn balance_ranges(goal: FitnessGoal) -> [(f64, f64); 3] {
    match goal {
        FitnessGoal::LoseWeight => [(25.0, 40.0), (25.0, 45.0), (20.0, 35.0)],
        FitnessGoal::Maintain => [(15.0, 30.0), (40.0, 55.0), (20.0, 35.0)],
        FitnessGoal::GainMuscle => [(25.0, 35.0), (40.0, 55.0), (15.0, 30.0)],
        FitnessGoal::GainWeight => [(15.0, 25.0), (45.0, 60.0), (25.0, 35.0)],
    }
}

/// Scores alignment with the user's fitness goal
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthGoalScorer;

impl HealthGoalScorer {
    /// Calorie band score for a ratio `kcal / target`
    #[must_use]
    pub fn calorie_band_score(goal: FitnessGoal, ratio: f64) -> f64 {
        let (bands, fallback): (&[Band], f64) = match goal {
            FitnessGoal::LoseWeight => (&LOSE_WEIGHT_CALORIES, 15.0),
            FitnessGoal::Maintain => (&MAINTAIN_CALORIES, 20.0),
            FitnessGoal::GainMuscle => (&GAIN_MUSCLE_CALORIES, 30.0),
            FitnessGoal::GainWeight => (&GAIN_WEIGHT_CALORIES, 25.0),
        };
        bands
            .iter()
            .find(|band| band.contains(ratio))
            .map_or(fallback, |band| band.score)
    }

    /// Protein threshold score for a ratio `protein / target`
    #[must_use]
    pub fn protein_band_score(goal: FitnessGoal, ratio: f64) -> f64 {
        let (thresholds, fallback) = match goal {
            FitnessGoal::LoseWeight => (LOSE_WEIGHT_PROTEIN, 20.0),
            FitnessGoal::Maintain => (MAINTAIN_PROTEIN, 25.0),
            FitnessGoal::GainMuscle => (GAIN_MUSCLE_PROTEIN, 15.0),
            FitnessGoal::GainWeight => (GAIN_WEIGHT_PROTEIN, 25.0),
        };
        thresholds
            .iter()
            .find(|(min_ratio, _)| ratio >= *min_ratio)
            .map_or(fallback, |(_, score)| *score)
    }

    fn calorie_alignment(macros: &MacroProfile, goal: FitnessGoal, goals: Option<&MacroGoals>) -> f64 {
        match goals {
            Some(goals) if goals.calories > 0.0 => {
                Self::calorie_band_score(goal, macros.calories / goals.calories)
            }
            _ => NEUTRAL_SCORE,
        }
    }

    fn protein_alignment(macros: &MacroProfile, goal: FitnessGoal, goals: Option<&MacroGoals>) -> f64 {
        match goals {
            Some(goals) if goals.protein_g > 0.0 => {
                Self::protein_band_score(goal, macros.protein_g / goals.protein_g)
            }
            _ => NEUTRAL_SCORE,
        }
    }

    fn macro_balance(macros: &MacroProfile, goal: FitnessGoal) -> f64 {
        let energy = macros.macro_energy();
        if energy <= 0.0 {
            return NEUTRAL_SCORE;
        }
        let shares = [
            100.0 * KCAL_PER_G_PROTEIN * macros.protein_g / energy,
            100.0 * KCAL_PER_G_CARBS * macros.carbs_g / energy,
            100.0 * KCAL_PER_G_FAT * macros.fat_g / energy,
        ];
        let per_macro = shares
            .iter()
            .zip(balance_ranges(goal))
            .map(|(share, (low, high))| {
                let distance = if *share < low {
                    low - share
                } else if *share > high {
                    share - high
                } else {
                    0.0
                };
                (1.0 - distance / BALANCE_TOLERANCE_PCT).max(0.0)
            });
        mean(per_macro).map_or(NEUTRAL_SCORE, |m| 100.0 * m)
    }

    fn nutrient_density(macros: &MacroProfile) -> f64 {
        if macros.calories <= 0.0 {
            return 0.0;
        }
        let protein_per_100 = 100.0 * macros.protein_g / macros.calories;
        let fiber_per_100 = 100.0 * macros.fiber_g.unwrap_or(0.0) / macros.calories;
        (60.0 * protein_per_100 / 8.0).min(60.0) + (40.0 * fiber_per_100 / 3.0).min(40.0)
    }
}

impl Scorer for HealthGoalScorer {
    fn kind(&self) -> SignalKind {
        SignalKind::HealthGoal
    }

    fn evaluate(&self, recipe: &Recipe, ctx: &ScoringContext) -> ScoreResult {
        let Some(profile) = ctx.profile.as_ref() else {
            return ScoreResult::neutral(self.kind(), COMPONENTS);
        };
        let goal = profile.fitness_goal;
        let goals = ctx.macro_goals.as_ref();
        let macros = &recipe.macros;
        ScoreResult::from_components(
            self.kind(),
            vec![
                ScoreComponent::new(
                    "calorie_alignment",
                    Self::calorie_alignment(macros, goal, goals),
                    CALORIE_WEIGHT,
                ),
                ScoreComponent::new(
                    "protein_alignment",
                    Self::protein_alignment(macros, goal, goals),
                    PROTEIN_WEIGHT,
                ),
                ScoreComponent::new(
                    "macro_balance",
                    Self::macro_balance(macros, goal),
                    BALANCE_WEIGHT,
                ),
                ScoreComponent::new(
                    "nutrient_density",
                    Self::nutrient_density(macros),
                    DENSITY_WEIGHT,
                ),
            ],
        )
    }
}
