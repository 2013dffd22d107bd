// ABOUTME: Meal slot definitions for daily plan generation
// ABOUTME: MealSlot with its share of daily macros and typical serving hour
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meal slot of a daily plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Between-meal snack
    Snack,
    /// Optional dessert
    Dessert,
}

impl MealSlot {
    /// Slots planned when the caller does not choose
    pub const DEFAULT_DAY: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Default share of the day's macros for this slot (before renormalization)
    #[must_use]
    pub const fn default_share(self) -> f64 {
        match self {
            Self::Breakfast => 0.25,
            Self::Lunch => 0.30,
            Self::Dinner => 0.35,
            Self::Snack => 0.10,
            Self::Dessert => 0.08,
        }
    }

    /// Hour of day the slot is usually eaten (local time)
    #[must_use]
    pub const fn typical_hour(self) -> u32 {
        match self {
            Self::Breakfast => 8,
            Self::Lunch => 12,
            Self::Snack => 15,
            Self::Dinner => 19,
            Self::Dessert => 20,
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
            Self::Dessert => "dessert",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            "dessert" => Ok(Self::Dessert),
            other => Err(format!("unknown meal slot '{other}'")),
        }
    }
}
