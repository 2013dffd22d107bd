// ABOUTME: Collaborative filtering configuration for user and item similarity
// ABOUTME: Configures similarity weights, thresholds, neighbour limits, and collaborator timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Collaborative Filtering Configuration

use serde::{Deserialize, Serialize};

/// Collaborative filtering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborativeConfig {
    /// User-to-user similarity weights
    pub user_weights: UserSimilarityWeights,
    /// Recipe-to-recipe similarity weights
    pub item_weights: ItemSimilarityWeights,
    /// Minimum (exclusive) similarity for a user to count as a neighbour
    pub user_similarity_threshold: f64,
    /// Maximum neighbours kept
    pub max_similar_users: usize,
    /// Minimum (exclusive) similarity for a liked recipe to count
    pub item_similarity_threshold: f64,
    /// Maximum similar recipes kept
    pub max_similar_items: usize,
    /// Maximum users requested from the data source per lookup
    pub candidate_user_limit: usize,
    /// Time budget for one data-source call
    pub collaborator_timeout_ms: u64,
    /// Share of the collaborative score in the final ranking score
    pub blend_weight: f64,
}

/// Weights of the user similarity components (sum 1.0)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSimilarityWeights {
    /// Jaccard of liked cuisines
    pub cuisine_overlap: f64,
    /// Identical dietary restriction sets
    pub dietary_match: f64,
    /// Jaccard of positively interacted recipe ids
    pub interaction_overlap: f64,
    /// Both users have macro goals
    pub macro_goals_present: f64,
}

/// Weights of the item similarity components (sum 1.0)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSimilarityWeights {
    /// Same cuisine
    pub cuisine: f64,
    /// Jaccard of ingredient keys
    pub ingredients: f64,
    /// Cosine of normalized macro vectors
    pub macros: f64,
    /// Cook time closeness
    pub cook_time: f64,
}

impl Default for CollaborativeConfig {
    fn default() -> Self {
        Self {
            user_weights: UserSimilarityWeights::default(),
            item_weights: ItemSimilarityWeights::default(),
            user_similarity_threshold: 0.3,
            max_similar_users: 20,
            item_similarity_threshold: 0.4,
            max_similar_items: 10,
            candidate_user_limit: 500,
            collaborator_timeout_ms: 2_000,
            blend_weight: 0.10,
        }
    }
}

impl Default for UserSimilarityWeights {
    fn default() -> Self {
        Self {
            cuisine_overlap: 0.30,
            dietary_match: 0.20,
            interaction_overlap: 0.40,
            macro_goals_present: 0.10,
        }
    }
}

impl Default for ItemSimilarityWeights {
    fn default() -> Self {
        Self {
            cuisine: 0.20,
            ingredients: 0.40,
            macros: 0.25,
            cook_time: 0.15,
        }
    }
}

impl UserSimilarityWeights {
    /// Sum of the component weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.cuisine_overlap + self.dietary_match + self.interaction_overlap + self.macro_goals_present
    }
}

impl ItemSimilarityWeights {
    /// Sum of the component weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.cuisine + self.ingredients + self.macros + self.cook_time
    }
}
