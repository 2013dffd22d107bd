// ABOUTME: Nutrition goals and physical profile models
// ABOUTME: MacroGoals, PhysicalProfile, FitnessGoal, Gender and ActivityLevel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Target macros for a period (a day or a single meal, caller-scaled)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroGoals {
    /// Target calories
    pub calories: f64,
    /// Target protein in grams
    pub protein_g: f64,
    /// Target carbohydrates in grams
    pub carbs_g: f64,
    /// Target fat in grams
    pub fat_g: f64,
}

impl MacroGoals {
    /// Create goals
    #[must_use]
    pub const fn new(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    /// Scale every target by `factor` (used to derive per-meal targets)
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein_g: self.protein_g * factor,
            carbs_g: self.carbs_g * factor,
            fat_g: self.fat_g * factor,
        }
    }

    /// Targets in fixed order (calories, protein, carbs, fat)
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        [self.calories, self.protein_g, self.carbs_g, self.fat_g]
    }
}

/// Gender, as reported in the user's profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other or not disclosed
    Other,
}

/// Habitual activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// 1-3 days/week
    LightlyActive,
    /// 3-5 days/week
    #[default]
    ModeratelyActive,
    /// 6-7 days/week
    VeryActive,
    /// Hard training twice a day
    ExtraActive,
}

/// Fitness goal driving the health-goal scorer's lookup tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    /// Caloric deficit
    LoseWeight,
    /// Caloric balance
    #[default]
    Maintain,
    /// Surplus with a protein emphasis
    GainMuscle,
    /// General surplus
    GainWeight,
}

/// Physical profile of the user being ranked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalProfile {
    /// Gender
    pub gender: Gender,
    /// Age in years
    pub age: u32,
    /// Activity level
    #[serde(default)]
    pub activity_level: ActivityLevel,
    /// Fitness goal
    pub fitness_goal: FitnessGoal,
}

impl PhysicalProfile {
    /// Create a profile
    #[must_use]
    pub const fn new(
        gender: Gender,
        age: u32,
        activity_level: ActivityLevel,
        fitness_goal: FitnessGoal,
    ) -> Self {
        Self {
            gender,
            age,
            activity_level,
            fitness_goal,
        }
    }
}
