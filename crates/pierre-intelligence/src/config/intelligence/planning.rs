// ABOUTME: Daily plan orchestrator configuration
// ABOUTME: Configures composite vs heuristic blend, reasoning thresholds, and slot shares
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Daily Plan Configuration

use serde::{Deserialize, Serialize};

/// Daily plan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPlanConfig {
    /// Share of the composite score in a slot score
    pub composite_weight: f64,
    /// Share of the meal-type heuristic in a slot score
    pub heuristic_weight: f64,
    /// Slot score at or above which a pick is "excellent"
    pub excellent_threshold: f64,
    /// Slot score at or above which a pick is "good"
    pub good_threshold: f64,
    /// Relative calorie distance counted as "close to target"
    pub calorie_proximity: f64,
    /// Prevent one recipe from filling two slots
    pub distinct_meals: bool,
}

impl Default for DailyPlanConfig {
    fn default() -> Self {
        Self {
            composite_weight: 0.7,
            heuristic_weight: 0.3,
            excellent_threshold: 80.0,
            good_threshold: 60.0,
            calorie_proximity: 0.10,
            distinct_meals: false,
        }
    }
}
