// ABOUTME: Recipe models consumed by the ranking engine
// ABOUTME: Recipe, MacroProfile, RecipeEnrichment and SkillLevel definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::interaction::RecipeSnapshot;

/// Macronutrient profile of one serving
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroProfile {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
    /// Fiber in grams (if known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,
}

impl MacroProfile {
    /// Create a profile without fiber information
    #[must_use]
    pub const fn new(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
            fiber_g: None,
        }
    }

    /// Set fiber grams
    #[must_use]
    pub const fn with_fiber(mut self, fiber_g: f64) -> Self {
        self.fiber_g = Some(fiber_g);
        self
    }

    /// The four scored macros in fixed order (calories, protein, carbs, fat)
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        [self.calories, self.protein_g, self.carbs_g, self.fat_g]
    }

    /// Energy derived from macronutrients (4/4/9 kcal per gram)
    #[must_use]
    pub fn macro_energy(&self) -> f64 {
        4.0f64.mul_add(
            self.protein_g,
            4.0f64.mul_add(self.carbs_g, 9.0 * self.fat_g),
        )
    }

    /// Component-wise sum, used for plan totals
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let fiber_g = match (self.fiber_g, other.fiber_g) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
        };
        Self {
            calories: self.calories + other.calories,
            protein_g: self.protein_g + other.protein_g,
            carbs_g: self.carbs_g + other.carbs_g,
            fat_g: self.fat_g + other.fat_g,
            fiber_g,
        }
    }
}

/// Cooking skill level, ordered from easiest to hardest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    /// Simple recipes, basic techniques
    Beginner,
    /// Moderate complexity, some techniques required
    #[default]
    Intermediate,
    /// Complex recipes, advanced techniques
    Advanced,
}

impl SkillLevel {
    /// Numeric rank used to measure the gap between two levels
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Beginner => 0,
            Self::Intermediate => 1,
            Self::Advanced => 2,
        }
    }
}

/// Quality signals attached by an external enrichment pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeEnrichment {
    /// Editorial quality, 0-100
    #[serde(default)]
    pub quality_score: Option<f64>,
    /// Popularity, 0-100
    #[serde(default)]
    pub popularity_score: Option<f64>,
    /// Health rating, 0-100
    #[serde(default)]
    pub health_score: Option<f64>,
    /// Raw like count from the enrichment source
    #[serde(default)]
    pub aggregate_likes: Option<u32>,
    /// When the enrichment data was fetched
    #[serde(default)]
    pub last_enriched: Option<DateTime<Utc>>,
}

/// A candidate recipe as seen by the ranking engine
///
/// Owned by the generation or persistence collaborator; the engine treats it as
/// an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Cuisine label ("Italian", "Thai", ...)
    pub cuisine: String,
    /// Cooking time in minutes
    pub cook_time_mins: u32,
    /// Number of servings the recipe makes
    #[serde(default = "default_servings")]
    pub servings: u32,
    /// Per-serving macros
    pub macros: MacroProfile,
    /// Ordered ingredient lines, free text
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// External enrichment fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<RecipeEnrichment>,
    /// Required cooking skill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<SkillLevel>,
    /// Equipment the recipe needs ("oven", "blender", ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,
    /// Estimated cost per serving in the user's currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_serving: Option<f64>,
}

const fn default_servings() -> u32 {
    1
}

impl Recipe {
    /// Create a recipe with the fields every scorer needs
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        cuisine: impl Into<String>,
        cook_time_mins: u32,
        macros: MacroProfile,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cuisine: cuisine.into(),
            cook_time_mins,
            servings: default_servings(),
            macros,
            ingredients: Vec::new(),
            enrichment: None,
            difficulty: None,
            equipment: Vec::new(),
            cost_per_serving: None,
        }
    }

    /// Set servings
    #[must_use]
    pub const fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    /// Add ingredient lines
    #[must_use]
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients
            .extend(ingredients.into_iter().map(Into::into));
        self
    }

    /// Attach enrichment data
    #[must_use]
    pub fn with_enrichment(mut self, enrichment: RecipeEnrichment) -> Self {
        self.enrichment = Some(enrichment);
        self
    }

    /// Set difficulty
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: SkillLevel) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Add required equipment
    #[must_use]
    pub fn with_equipment<I, S>(mut self, equipment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipment.extend(equipment.into_iter().map(Into::into));
        self
    }

    /// Set cost per serving
    #[must_use]
    pub const fn with_cost_per_serving(mut self, cost: f64) -> Self {
        self.cost_per_serving = Some(cost);
        self
    }

    /// Denormalized snapshot stored alongside interaction records
    #[must_use]
    pub fn snapshot(&self) -> RecipeSnapshot {
        RecipeSnapshot {
            recipe_id: self.id.clone(),
            cuisine: self.cuisine.clone(),
            cook_time_mins: self.cook_time_mins,
            macros: self.macros,
            ingredients: self.ingredients.clone(),
        }
    }
}

impl From<&RecipeSnapshot> for Recipe {
    fn from(snapshot: &RecipeSnapshot) -> Self {
        Self::new(
            snapshot.recipe_id.clone(),
            snapshot.recipe_id.clone(),
            snapshot.cuisine.clone(),
            snapshot.cook_time_mins,
            snapshot.macros,
        )
        .with_ingredients(snapshot.ingredients.iter().cloned())
    }
}
