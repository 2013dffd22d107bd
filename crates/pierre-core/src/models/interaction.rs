// ABOUTME: Interaction history models feeding behavioral and predictive scoring
// ABOUTME: InteractionKind, RecipeSnapshot, InteractionRecord and UserBehaviorData
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::recipe::MacroProfile;

/// What the user did with a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Explicit like
    Liked,
    /// Explicit dislike
    Disliked,
    /// Saved for later
    Saved,
    /// Logged as eaten
    Consumed,
}

impl InteractionKind {
    /// Liked, saved and consumed count as positive engagement
    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Liked | Self::Saved | Self::Consumed)
    }

    /// Only an explicit dislike is negative
    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::Disliked)
    }
}

/// Denormalized copy of the recipe at interaction time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSnapshot {
    /// Recipe identifier
    pub recipe_id: String,
    /// Cuisine label
    pub cuisine: String,
    /// Cooking time in minutes
    pub cook_time_mins: u32,
    /// Per-serving macros
    pub macros: MacroProfile,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// One recorded interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Interaction kind
    pub kind: InteractionKind,
    /// Recipe snapshot
    pub recipe: RecipeSnapshot,
    /// When it happened
    pub timestamp: DateTime<Utc>,
}

impl InteractionRecord {
    /// Create a record
    #[must_use]
    pub const fn new(kind: InteractionKind, recipe: RecipeSnapshot, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            recipe,
            timestamp,
        }
    }
}

/// All interaction records of one user; append-only from the caller's view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserBehaviorData {
    /// Records in the order the caller supplied them
    #[serde(default)]
    pub interactions: Vec<InteractionRecord>,
}

impl UserBehaviorData {
    /// Wrap a list of records
    #[must_use]
    pub const fn new(interactions: Vec<InteractionRecord>) -> Self {
        Self { interactions }
    }

    /// Whether no interaction was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Liked, saved and consumed records
    pub fn positive(&self) -> impl Iterator<Item = &InteractionRecord> {
        self.interactions.iter().filter(|r| r.kind.is_positive())
    }

    /// Disliked records
    pub fn negative(&self) -> impl Iterator<Item = &InteractionRecord> {
        self.interactions.iter().filter(|r| r.kind.is_negative())
    }

    /// Number of positive records
    #[must_use]
    pub fn positive_count(&self) -> usize {
        self.positive().count()
    }

    /// Number of negative records
    #[must_use]
    pub fn negative_count(&self) -> usize {
        self.negative().count()
    }

    /// Recipe ids the user engaged with positively
    #[must_use]
    pub fn positive_recipe_ids(&self) -> BTreeSet<&str> {
        self.positive()
            .map(|r| r.recipe.recipe_id.as_str())
            .collect()
    }

    /// Records newer than `window` before `now`
    pub fn within(
        &self,
        now: DateTime<Utc>,
        window: Duration,
    ) -> impl Iterator<Item = &InteractionRecord> {
        let cutoff = now - window;
        self.interactions
            .iter()
            .filter(move |r| r.timestamp >= cutoff && r.timestamp <= now)
    }
}
