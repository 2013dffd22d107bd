// ABOUTME: Ingredient taxonomy lookups used by every ingredient-aware scorer
// ABOUTME: Superfood detection, banned-ingredient matching, dietary heuristics and keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Taxonomy
//!
//! Pure lookup functions over free-text ingredient lines. Nothing here holds
//! state beyond lazily compiled phrase tables.

/// Dietary restriction keyword heuristics
pub mod dietary;
/// Ingredient key normalization
pub mod ingredients;
/// Word-boundary phrase matcher
pub mod matcher;
/// Superfood category detection
pub mod superfoods;

pub use dietary::{first_violated, line_violates, violates_restriction};
pub use ingredients::{ingredient_key, ingredient_keys};
pub use matcher::PhraseMatcher;
pub use superfoods::{detect_superfoods, matched_superfoods};

use pierre_core::models::{DietaryRestriction, UserPreferences};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a recipe's ingredients are unacceptable to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum IngredientVeto {
    /// A banned substring occurs in an ingredient line
    Banned(String),
    /// A dietary restriction is violated
    Restriction(DietaryRestriction),
}

impl fmt::Display for IngredientVeto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Banned(term) => write!(f, "contains banned ingredient '{term}'"),
            Self::Restriction(restriction) => match restriction {
                DietaryRestriction::Vegetarian => f.write_str("not vegetarian"),
                DietaryRestriction::Vegan => f.write_str("not vegan"),
                DietaryRestriction::DairyFree => f.write_str("not dairy-free"),
                DietaryRestriction::GlutenFree => f.write_str("not gluten-free"),
                DietaryRestriction::NutFree => f.write_str("not nut-free"),
                DietaryRestriction::Custom(text) => {
                    write!(f, "violates custom restriction '{text}'")
                }
            },
        }
    }
}

/// First banned term that occurs, case-insensitively, in any ingredient line
///
/// Banned terms are plain substrings: `"pork"` also vetoes `"pork belly"`.
/// Blank terms are ignored.
#[must_use]
pub fn find_banned_ingredient<S: AsRef<str>>(ingredients: &[S], banned: &[String]) -> Option<String> {
    let lines: Vec<String> = ingredients
        .iter()
        .map(|line| line.as_ref().to_lowercase())
        .collect();
    banned
        .iter()
        .map(|term| term.trim())
        .filter(|term| !term.is_empty())
        .find(|term| {
            let needle = term.to_lowercase();
            lines.iter().any(|line| line.contains(&needle))
        })
        .map(str::to_owned)
}

/// Banned-ingredient or dietary veto for the given ingredients, if any
///
/// Banned terms are checked before restrictions.
#[must_use]
pub fn ingredient_veto<S: AsRef<str>>(
    ingredients: &[S],
    preferences: &UserPreferences,
) -> Option<IngredientVeto> {
    if let Some(term) = find_banned_ingredient(ingredients, &preferences.banned_ingredients) {
        return Some(IngredientVeto::Banned(term));
    }
    first_violated(ingredients, &preferences.dietary_restrictions)
        .cloned()
        .map(IngredientVeto::Restriction)
}
