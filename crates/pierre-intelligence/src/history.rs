// ABOUTME: Precomputed aggregates over a user's interaction history
// ABOUTME: Ingredient keys, cuisine tallies, liked-recipe sums and leave-one-out views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # History Index
//!
//! Scoring many candidates against one history would otherwise repeat the
//! same work per candidate: normalizing every snapshot's ingredient lines,
//! tallying cuisines and averaging liked macros. [`HistoryIndex`] does that
//! once per request.
//!
//! A [`HistoryView`] reads the index with at most one record left out. The
//! left-out record's contribution is subtracted on the fly, so weight
//! learning never rebuilds the index per record.

use chrono::{DateTime, Duration, Utc};
use pierre_core::models::{InteractionRecord, UserBehaviorData};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

use crate::taxonomy::ingredient_keys;
use crate::temporal::UserTemporalPatterns;

/// Positive and negative record counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Liked, saved or consumed
    pub positive: usize,
    /// Disliked
    pub negative: usize,
    /// Every record, including neutral kinds
    pub total: usize,
}

impl Tally {
    fn add(&mut self, record: &InteractionRecord) {
        self.positive += usize::from(record.kind.is_positive());
        self.negative += usize::from(record.kind.is_negative());
        self.total += 1;
    }

    fn minus(self, record: &InteractionRecord) -> Self {
        Self {
            positive: self
                .positive
                .saturating_sub(usize::from(record.kind.is_positive())),
            negative: self
                .negative
                .saturating_sub(usize::from(record.kind.is_negative())),
            total: self.total.saturating_sub(1),
        }
    }
}

fn cuisine_key(cuisine: &str) -> String {
    cuisine.trim().to_ascii_lowercase()
}

/// Aggregates over one behavior history, built once
#[derive(Debug, Clone, Default)]
pub struct HistoryIndex {
    /// Ingredient keys per record, aligned with the history
    keys: Vec<BTreeSet<String>>,
    /// Records containing each ingredient key
    ingredients: HashMap<String, Tally>,
    /// Records per cuisine, lowercase
    cuisines: HashMap<String, Tally>,
    overall: Tally,
    positive_cook_minutes: f64,
    positive_macros: [f64; 4],
    /// Record timestamps, ascending
    timestamps: Vec<DateTime<Utc>>,
    patterns: UserTemporalPatterns,
}

impl HistoryIndex {
    /// Index every record of `behavior`
    #[must_use]
    pub fn build(behavior: &UserBehaviorData) -> Self {
        let mut index = Self {
            keys: Vec::with_capacity(behavior.interactions.len()),
            timestamps: Vec::with_capacity(behavior.interactions.len()),
            patterns: UserTemporalPatterns::learn(behavior),
            ..Self::default()
        };
        for record in &behavior.interactions {
            let keys = ingredient_keys(&record.recipe.ingredients);
            for key in &keys {
                index.ingredients.entry(key.clone()).or_default().add(record);
            }
            index.keys.push(keys);
            index
                .cuisines
                .entry(cuisine_key(&record.recipe.cuisine))
                .or_default()
                .add(record);
            index.overall.add(record);
            if record.kind.is_positive() {
                index.positive_cook_minutes += f64::from(record.recipe.cook_time_mins);
                for (sum, value) in index
                    .positive_macros
                    .iter_mut()
                    .zip(record.recipe.macros.as_array())
                {
                    *sum += value;
                }
            }
            index.timestamps.push(record.timestamp);
        }
        index.timestamps.sort_unstable();
        index
    }

    /// Learned time habits of the whole history
    #[must_use]
    pub const fn patterns(&self) -> &UserTemporalPatterns {
        &self.patterns
    }

    /// Learned time habits with one record left out
    #[must_use]
    pub fn patterns_without(&self, record: &InteractionRecord) -> UserTemporalPatterns {
        self.patterns.without(record)
    }
}

/// Read access to an indexed history, optionally leaving one record out
#[derive(Debug, Clone)]
pub struct HistoryView<'a> {
    behavior: &'a UserBehaviorData,
    index: Cow<'a, HistoryIndex>,
    excluded: Option<(usize, &'a InteractionRecord)>,
}

impl<'a> HistoryView<'a> {
    /// View over `behavior` through `index`, ignoring record `excluded`
    #[must_use]
    pub fn new(
        behavior: &'a UserBehaviorData,
        index: Cow<'a, HistoryIndex>,
        excluded: Option<usize>,
    ) -> Self {
        let excluded = excluded.and_then(|i| behavior.interactions.get(i).map(|r| (i, r)));
        Self {
            behavior,
            index,
            excluded,
        }
    }

    fn excluded_record(&self) -> Option<&'a InteractionRecord> {
        self.excluded.map(|(_, record)| record)
    }

    /// Records in history order, without the excluded one
    pub fn records(&self) -> impl Iterator<Item = &'a InteractionRecord> {
        let skip = self.excluded.map(|(i, _)| i);
        self.behavior
            .interactions
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != skip)
            .map(|(_, record)| record)
    }

    /// Number of visible records
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts().total
    }

    /// Whether no record is visible
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positive, negative and total counts of visible records
    #[must_use]
    pub fn counts(&self) -> Tally {
        let overall = self.index.overall;
        self.excluded_record()
            .map_or(overall, |record| overall.minus(record))
    }

    /// Visible records of a cuisine, compared case-insensitively
    #[must_use]
    pub fn cuisine(&self, cuisine: &str) -> Tally {
        let key = cuisine_key(cuisine);
        let tally = self.index.cuisines.get(&key).copied().unwrap_or_default();
        match self.excluded_record() {
            Some(record) if cuisine_key(&record.recipe.cuisine) == key => tally.minus(record),
            _ => tally,
        }
    }

    /// Shared-key counts between `keys` and every visible record
    ///
    /// `positive` sums keys shared with liked records, `negative` with
    /// disliked ones.
    #[must_use]
    pub fn ingredient_overlap(&self, keys: &BTreeSet<String>) -> Tally {
        let mut overlap = Tally::default();
        for key in keys {
            if let Some(tally) = self.index.ingredients.get(key) {
                overlap.positive += tally.positive;
                overlap.negative += tally.negative;
                overlap.total += tally.total;
            }
        }
        if let Some((i, record)) = self.excluded {
            let shared = self
                .index
                .keys
                .get(i)
                .map_or(0, |seen| keys.intersection(seen).count());
            if record.kind.is_positive() {
                overlap.positive = overlap.positive.saturating_sub(shared);
            } else if record.kind.is_negative() {
                overlap.negative = overlap.negative.saturating_sub(shared);
            }
            overlap.total = overlap.total.saturating_sub(shared);
        }
        overlap
    }

    /// Mean cook time of visible liked records
    #[must_use]
    pub fn mean_positive_cook_minutes(&self) -> Option<f64> {
        let mut sum = self.index.positive_cook_minutes;
        if let Some(record) = self.excluded_record().filter(|r| r.kind.is_positive()) {
            sum -= f64::from(record.recipe.cook_time_mins);
        }
        let count = self.counts().positive;
        (count > 0).then(|| sum / count as f64)
    }

    /// Mean calories, protein, carbs and fat of visible liked records
    #[must_use]
    pub fn mean_positive_macros(&self) -> Option<[f64; 4]> {
        let count = self.counts().positive;
        if count == 0 {
            return None;
        }
        let mut sums = self.index.positive_macros;
        if let Some(record) = self.excluded_record().filter(|r| r.kind.is_positive()) {
            for (sum, value) in sums.iter_mut().zip(record.recipe.macros.as_array()) {
                *sum -= value;
            }
        }
        Some(sums.map(|sum| sum / count as f64))
    }

    /// Visible records with `now - window <= timestamp <= now`
    #[must_use]
    pub fn recent_count(&self, now: DateTime<Utc>, window: Duration) -> usize {
        let cutoff = now - window;
        let timestamps = &self.index.timestamps;
        let upper = timestamps.partition_point(|t| *t <= now);
        let lower = timestamps.partition_point(|t| *t < cutoff);
        let count = upper.saturating_sub(lower);
        match self.excluded_record() {
            Some(record) if record.timestamp >= cutoff && record.timestamp <= now => {
                count.saturating_sub(1)
            }
            _ => count,
        }
    }
}
