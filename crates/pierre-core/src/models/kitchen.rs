// ABOUTME: Kitchen capabilities used by the convenience scorer
// ABOUTME: KitchenProfile and BudgetLevel definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::recipe::SkillLevel;

/// How much the user is willing to spend per serving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BudgetLevel {
    /// Tight budget
    Low,
    /// Normal budget
    #[default]
    Medium,
    /// Cost is not a concern
    High,
}

/// What the user can cook with right now
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitchenProfile {
    /// Cooking skill
    #[serde(default)]
    pub skill_level: SkillLevel,
    /// Equipment on hand ("oven", "blender", ...)
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Budget level
    #[serde(default)]
    pub budget: BudgetLevel,
    /// Minutes available to cook for this meal
    #[serde(default)]
    pub available_time_mins: Option<u32>,
}

impl KitchenProfile {
    /// Whether the named equipment is available (case-insensitive)
    #[must_use]
    pub fn has_equipment(&self, item: &str) -> bool {
        let item = item.trim();
        self.equipment
            .iter()
            .any(|owned| owned.trim().eq_ignore_ascii_case(item))
    }
}
