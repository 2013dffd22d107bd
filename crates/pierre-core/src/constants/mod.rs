// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Score bounds, nutrition reference values and time windows for ranking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in one flat list.

/// Score scale shared by every scorer
pub mod scores {
    /// Lower bound of every score
    pub const MIN_SCORE: f64 = 0.0;
    /// Upper bound of every score
    pub const MAX_SCORE: f64 = 100.0;
    /// Score returned when the context needed to judge is missing
    pub const NEUTRAL_SCORE: f64 = 50.0;
}

/// Nutrition reference values
pub mod nutrition {
    /// Energy per gram of protein (kcal)
    pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
    /// Energy per gram of carbohydrate (kcal)
    pub const KCAL_PER_G_CARBS: f64 = 4.0;
    /// Energy per gram of fat (kcal)
    pub const KCAL_PER_G_FAT: f64 = 9.0;

    /// Reference daily calories used to normalize macro vectors
    pub const REFERENCE_DAILY_CALORIES: f64 = 2000.0;
    /// Reference daily protein (g)
    pub const REFERENCE_DAILY_PROTEIN_G: f64 = 50.0;
    /// Reference daily carbohydrates (g)
    pub const REFERENCE_DAILY_CARBS_G: f64 = 275.0;
    /// Reference daily fat (g)
    pub const REFERENCE_DAILY_FAT_G: f64 = 78.0;
}

/// Time windows used by history-based scorers
pub mod time_windows {
    /// Trailing window for the behavioral recency bonus
    pub const RECENCY_WINDOW_DAYS: i64 = 7;
    /// Trailing window for the predictive trend component
    pub const TREND_WINDOW_DAYS: i64 = 30;
}

/// Service names used in collaborator errors and logs
pub mod service_names {
    /// User/interaction data source
    pub const USER_DATA_SOURCE: &str = "user_data_source";
    /// Recipe ranking service
    pub const RANKING_SERVICE: &str = "pierre_recipe_ranker";
}
