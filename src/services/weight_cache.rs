// ABOUTME: Concurrent per-user cache of learned scoring weights
// ABOUTME: DashMap keyed by user id, refreshed whenever weights are relearned
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use dashmap::DashMap;
use pierre_intelligence::weight_adjustment::LearnedWeights;
use std::sync::Arc;
use uuid::Uuid;

/// Learned weights per user
///
/// Uses `DashMap` for sharded locking so concurrent ranking requests for
/// different users never contend on one lock.
#[derive(Clone, Default)]
pub struct WeightCache {
    entries: Arc<DashMap<Uuid, LearnedWeights>>,
}

impl WeightCache {
    /// Empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached weights for a user
    #[must_use]
    pub fn get(&self, user_id: Uuid) -> Option<LearnedWeights> {
        self.entries.get(&user_id).map(|entry| entry.value().clone())
    }

    /// Store (or replace) a user's weights
    pub fn insert(&self, user_id: Uuid, weights: LearnedWeights) {
        self.entries.insert(user_id, weights);
    }

    /// Drop a user's weights, returning them if present
    pub fn invalidate(&self, user_id: Uuid) -> Option<LearnedWeights> {
        self.entries.remove(&user_id).map(|(_, weights)| weights)
    }

    /// Number of users with cached weights
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no user has cached weights
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.entries.clear();
    }
}
