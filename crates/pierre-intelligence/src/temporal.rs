// ABOUTME: Time context for temporal scoring and learned per-user time patterns
// ABOUTME: Clock abstraction, TemporalContext, MealPeriod, Season and UserTemporalPatterns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Temporal Context
//!
//! Scorers never read the wall clock. Callers obtain a timestamp from a
//! [`Clock`] and build a [`TemporalContext`] from it; tests use [`FixedClock`].
//!
//! Timestamps are interpreted as the user's local time. Seasons follow the
//! northern hemisphere.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};
use pierre_core::models::{InteractionRecord, UserBehaviorData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Part of the day a meal is eaten in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealPeriod {
    /// 05:00-10:59
    Breakfast,
    /// 11:00-14:59
    Lunch,
    /// 15:00-16:59
    Snack,
    /// 17:00-21:59
    Dinner,
    /// 22:00-04:59
    LateNight,
}

impl MealPeriod {
    /// Period containing the given hour of day
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            5..=10 => Self::Breakfast,
            11..=14 => Self::Lunch,
            15..=16 => Self::Snack,
            17..=21 => Self::Dinner,
            _ => Self::LateNight,
        }
    }
}

/// Meteorological season, northern hemisphere
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// December-February
    Winter,
    /// March-May
    Spring,
    /// June-August
    Summer,
    /// September-November
    Autumn,
}

impl Season {
    /// Season of a calendar month (1-12)
    #[must_use]
    pub const fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }
}

/// Calendar facts about the moment a ranking is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalContext {
    /// The instant this context describes
    pub timestamp: DateTime<Utc>,
    /// Hour of day (0-23)
    pub hour: u32,
    /// Day of week
    pub weekday: Weekday,
    /// Month (1-12)
    pub month: u32,
    /// Saturday or Sunday
    pub is_weekend: bool,
    /// Meal period of `hour`
    pub meal_period: MealPeriod,
    /// Season of `month`
    pub season: Season,
}

impl TemporalContext {
    /// Derive every field from one timestamp
    #[must_use]
    pub fn from_datetime(timestamp: DateTime<Utc>) -> Self {
        let hour = timestamp.hour();
        let weekday = timestamp.weekday();
        let month = timestamp.month();
        Self {
            timestamp,
            hour,
            weekday,
            month,
            is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
            meal_period: MealPeriod::from_hour(hour),
            season: Season::from_month(month),
        }
    }

    /// Context for the current instant of `clock`
    #[must_use]
    pub fn now(clock: &dyn Clock) -> Self {
        Self::from_datetime(clock.now())
    }

    /// Same calendar day at a different hour (minutes zeroed)
    ///
    /// Hours above 23 are clamped to 23.
    #[must_use]
    pub fn at_hour(&self, hour: u32) -> Self {
        let hour = hour.min(23);
        let date = self.timestamp.date_naive();
        date.and_hms_opt(hour, 0, 0).map_or(*self, |naive| {
            Self::from_datetime(Utc.from_utc_datetime(&naive))
        })
    }
}

/// Maximum number of cuisines reported as a bucket's preference
const PREFERRED_CUISINE_LIMIT: usize = 3;

/// Time-of-engagement habits learned from positive interactions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTemporalPatterns {
    /// Most frequent interaction hour per meal period
    pub modal_hours: BTreeMap<MealPeriod, u32>,
    /// Number of positive interactions per meal period
    pub period_counts: BTreeMap<MealPeriod, usize>,
    /// Cuisine counts per meal period
    pub period_cuisines: BTreeMap<MealPeriod, BTreeMap<String, usize>>,
    /// Cuisine counts on weekdays
    pub weekday_cuisines: BTreeMap<String, usize>,
    /// Cuisine counts on weekends
    pub weekend_cuisines: BTreeMap<String, usize>,
    /// Cuisine counts per season
    pub season_cuisines: BTreeMap<Season, BTreeMap<String, usize>>,
    /// Positive interactions learned from
    pub total_interactions: usize,
    /// Interaction counts per meal period and hour
    #[serde(default)]
    pub hour_counts: BTreeMap<MealPeriod, BTreeMap<u32, usize>>,
}

fn cuisine_key(cuisine: &str) -> String {
    cuisine.trim().to_lowercase()
}

/// Decrement a count, dropping the key when it reaches zero
fn decrement<K: Ord>(counts: &mut BTreeMap<K, usize>, key: &K) {
    if let Some(count) = counts.get_mut(key) {
        *count = count.saturating_sub(1);
        if *count == 0 {
            counts.remove(key);
        }
    }
}

fn decrement_nested<K: Ord, V: Ord>(counts: &mut BTreeMap<K, BTreeMap<V, usize>>, outer: &K, inner: &V) {
    if let Some(inner_counts) = counts.get_mut(outer) {
        decrement(inner_counts, inner);
        if inner_counts.is_empty() {
            counts.remove(outer);
        }
    }
}

fn top_cuisines(counts: &BTreeMap<String, usize>) -> Vec<String> {
    let mut ranked: Vec<(&String, &usize)> = counts.iter().collect();
    // BTreeMap order is alphabetical, so a stable sort on count keeps ties alphabetical
    ranked.sort_by(|a, b| b.1.cmp(a.1));
    ranked
        .into_iter()
        .take(PREFERRED_CUISINE_LIMIT)
        .map(|(cuisine, _)| cuisine.clone())
        .collect()
}

impl UserTemporalPatterns {
    /// Learn patterns from the positive records of a behavior history
    #[must_use]
    pub fn learn(behavior: &UserBehaviorData) -> Self {
        let mut patterns = Self::default();
        for record in behavior.positive() {
            patterns.observe(record);
        }
        patterns.refresh_modal_hours();
        patterns
    }

    /// Patterns as if `record` had never been observed
    ///
    /// Subtracts the record's counts instead of relearning, so leaving one
    /// record out costs the size of the tallies, not of the history.
    #[must_use]
    pub fn without(&self, record: &InteractionRecord) -> Self {
        let mut patterns = self.clone();
        if record.kind.is_positive() && patterns.total_interactions > 0 {
            patterns.forget(record);
            patterns.refresh_modal_hours();
        }
        patterns
    }

    fn observe(&mut self, record: &InteractionRecord) {
        let ctx = TemporalContext::from_datetime(record.timestamp);
        let cuisine = cuisine_key(&record.recipe.cuisine);

        *self
            .hour_counts
            .entry(ctx.meal_period)
            .or_default()
            .entry(ctx.hour)
            .or_default() += 1;
        *self.period_counts.entry(ctx.meal_period).or_default() += 1;
        self.total_interactions += 1;

        if cuisine.is_empty() {
            return;
        }
        *self
            .period_cuisines
            .entry(ctx.meal_period)
            .or_default()
            .entry(cuisine.clone())
            .or_default() += 1;
        let day_bucket = if ctx.is_weekend {
            &mut self.weekend_cuisines
        } else {
            &mut self.weekday_cuisines
        };
        *day_bucket.entry(cuisine.clone()).or_default() += 1;
        *self
            .season_cuisines
            .entry(ctx.season)
            .or_default()
            .entry(cuisine)
            .or_default() += 1;
    }

    fn forget(&mut self, record: &InteractionRecord) {
        let ctx = TemporalContext::from_datetime(record.timestamp);
        let cuisine = cuisine_key(&record.recipe.cuisine);

        decrement_nested(&mut self.hour_counts, &ctx.meal_period, &ctx.hour);
        decrement(&mut self.period_counts, &ctx.meal_period);
        self.total_interactions = self.total_interactions.saturating_sub(1);

        if cuisine.is_empty() {
            return;
        }
        decrement_nested(&mut self.period_cuisines, &ctx.meal_period, &cuisine);
        let day_bucket = if ctx.is_weekend {
            &mut self.weekend_cuisines
        } else {
            &mut self.weekday_cuisines
        };
        decrement(day_bucket, &cuisine);
        decrement_nested(&mut self.season_cuisines, &ctx.season, &cuisine);
    }

    fn refresh_modal_hours(&mut self) {
        self.modal_hours.clear();
        for (period, hours) in &self.hour_counts {
            // Earliest hour wins ties
            let modal = hours
                .iter()
                .fold(None, |best: Option<(u32, usize)>, (&hour, &count)| match best {
                    Some((_, best_count)) if best_count >= count => best,
                    _ => Some((hour, count)),
                });
            if let Some((hour, _)) = modal {
                self.modal_hours.insert(*period, hour);
            }
        }
    }

    /// Whether nothing was learned
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_interactions == 0
    }

    /// Most frequent interaction hour in a period
    #[must_use]
    pub fn modal_hour(&self, period: MealPeriod) -> Option<u32> {
        self.modal_hours.get(&period).copied()
    }

    /// Fraction of learned interactions that fall in `period`
    #[must_use]
    pub fn period_share(&self, period: MealPeriod) -> f64 {
        if self.total_interactions == 0 {
            return 0.0;
        }
        let count = self.period_counts.get(&period).copied().unwrap_or(0);
        count as f64 / self.total_interactions as f64
    }

    /// Whether the cuisine was engaged with during `period`
    #[must_use]
    pub fn engaged_in_period(&self, period: MealPeriod, cuisine: &str) -> bool {
        self.period_cuisines
            .get(&period)
            .is_some_and(|counts| counts.contains_key(&cuisine_key(cuisine)))
    }

    /// Up to three most frequent weekday cuisines, lowercase
    #[must_use]
    pub fn preferred_weekday_cuisines(&self) -> Vec<String> {
        top_cuisines(&self.weekday_cuisines)
    }

    /// Up to three most frequent weekend cuisines, lowercase
    #[must_use]
    pub fn preferred_weekend_cuisines(&self) -> Vec<String> {
        top_cuisines(&self.weekend_cuisines)
    }

    /// Up to three most frequent cuisines of a season, lowercase
    #[must_use]
    pub fn preferred_season_cuisines(&self, season: Season) -> Vec<String> {
        self.season_cuisines
            .get(&season)
            .map(top_cuisines)
            .unwrap_or_default()
    }

    /// Whether the cuisine is among the preferred ones for this day type
    #[must_use]
    pub fn prefers_on_day(&self, is_weekend: bool, cuisine: &str) -> bool {
        let preferred = if is_weekend {
            self.preferred_weekend_cuisines()
        } else {
            self.preferred_weekday_cuisines()
        };
        preferred.contains(&cuisine_key(cuisine))
    }

    /// Whether the cuisine is among the preferred ones for the season
    #[must_use]
    pub fn prefers_in_season(&self, season: Season, cuisine: &str) -> bool {
        self.preferred_season_cuisines(season)
            .contains(&cuisine_key(cuisine))
    }
}
