// ABOUTME: Per-request user taste preferences for recipe ranking
// ABOUTME: UserPreferences, DietaryRestriction, SpiceLevel and SuperfoodCategory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Dietary restriction enforced by keyword heuristics
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestriction {
    /// No meat or fish
    Vegetarian,
    /// No animal products
    Vegan,
    /// No dairy products
    DairyFree,
    /// No gluten-containing grains
    GlutenFree,
    /// No tree nuts or peanuts
    NutFree,
    /// Custom restriction, matched as an ingredient substring
    Custom(String),
}

/// Preferred heat level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    /// Little to no heat
    Mild,
    /// Some heat
    Medium,
    /// Hot
    Spicy,
}

/// Nutrient-dense ingredient family a user can opt into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuperfoodCategory {
    /// Spinach, kale, chard, ...
    LeafyGreens,
    /// Blueberries, strawberries, ...
    Berries,
    /// Salmon, sardines, mackerel, ...
    FattyFish,
    /// Almonds, walnuts, chia, flax, ...
    NutsSeeds,
    /// Beans, lentils, chickpeas
    Beans,
    /// Quinoa, oats, brown rice, ...
    WholeGrains,
    /// Olive oil in any grade
    OliveOil,
    /// Avocado
    Avocado,
    /// Broccoli, cauliflower, brussels sprouts, ...
    Cruciferous,
    /// Yogurt, kimchi, kefir, ...
    Fermented,
    /// Turmeric, ginger, garlic
    AromaticSpices,
}

impl SuperfoodCategory {
    /// Every category in declaration order
    pub const ALL: [Self; 11] = [
        Self::LeafyGreens,
        Self::Berries,
        Self::FattyFish,
        Self::NutsSeeds,
        Self::Beans,
        Self::WholeGrains,
        Self::OliveOil,
        Self::Avocado,
        Self::Cruciferous,
        Self::Fermented,
        Self::AromaticSpices,
    ];

    /// Human-readable label used in reasoning strings
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LeafyGreens => "leafy greens",
            Self::Berries => "berries",
            Self::FattyFish => "fatty fish",
            Self::NutsSeeds => "nuts & seeds",
            Self::Beans => "beans & legumes",
            Self::WholeGrains => "whole grains",
            Self::OliveOil => "olive oil",
            Self::Avocado => "avocado",
            Self::Cruciferous => "cruciferous vegetables",
            Self::Fermented => "fermented foods",
            Self::AromaticSpices => "aromatic spices",
        }
    }
}

/// Taste preferences supplied with each request; scorers never mutate them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Cuisines the user likes
    #[serde(default)]
    pub liked_cuisines: Vec<String>,
    /// Dietary restrictions
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
    /// Ingredient substrings that veto a recipe
    #[serde(default)]
    pub banned_ingredients: Vec<String>,
    /// Superfood categories the user wants more of
    #[serde(default)]
    pub preferred_superfoods: Vec<SuperfoodCategory>,
    /// Preferred heat level
    #[serde(default)]
    pub spice_level: Option<SpiceLevel>,
    /// Preferred cooking time in minutes
    #[serde(default)]
    pub preferred_cook_time_mins: Option<u32>,
}

impl UserPreferences {
    /// Whether the cuisine is among the liked ones (case-insensitive)
    #[must_use]
    pub fn likes_cuisine(&self, cuisine: &str) -> bool {
        let cuisine = cuisine.trim();
        self.liked_cuisines
            .iter()
            .any(|liked| liked.trim().eq_ignore_ascii_case(cuisine))
    }

    /// Liked cuisines normalized to lowercase, as a set
    #[must_use]
    pub fn cuisine_set(&self) -> BTreeSet<String> {
        self.liked_cuisines
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Dietary restrictions as a set (order and duplicates ignored)
    #[must_use]
    pub fn restriction_set(&self) -> BTreeSet<DietaryRestriction> {
        self.dietary_restrictions
            .iter()
            .map(|r| match r {
                DietaryRestriction::Custom(text) => {
                    DietaryRestriction::Custom(text.trim().to_lowercase())
                }
                other => other.clone(),
            })
            .collect()
    }

    /// Distinct preferred superfood categories
    #[must_use]
    pub fn superfood_set(&self) -> BTreeSet<SuperfoodCategory> {
        self.preferred_superfoods.iter().copied().collect()
    }
}
