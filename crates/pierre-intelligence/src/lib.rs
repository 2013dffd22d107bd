// ABOUTME: Recipe ranking intelligence: signal scorers, composite scoring and learning
// ABOUTME: Collaborative filtering, dynamic weight adjustment and daily plan orchestration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Intelligence
//!
//! Scoring engine for the recipe ranker. Every scorer is a pure function of
//! a recipe and a [`scorers::ScoringContext`]; the only asynchronous piece is
//! the collaborative engine, which reads other users through a
//! [`collaborative::UserDataSource`].
//!
//! ## Modules
//!
//! - **taxonomy**: Superfood detection, dietary restriction checks, ingredient keys
//! - **temporal**: Clock abstraction, meal periods, seasons and learned time patterns
//! - **history**: Per-request history index shared by the history-driven scorers
//! - **scorers**: The seven per-signal scorers and their registry
//! - **composite**: Macro/taste base score with optional behavioral and temporal mixing
//! - **collaborative**: User-based and item-based collaborative filtering
//! - **weight_adjustment**: Per-user blend weight learning
//! - **blend**: Weighted combination of signal scores
//! - **daily_plan**: One recipe per meal slot

/// Weighted combination of signal scores
pub mod blend;
/// User-based and item-based collaborative filtering
pub mod collaborative;
/// Composite macro/taste scorer
pub mod composite;
/// Ranking configuration with environment overrides
pub mod config;
/// Daily meal plan orchestration
pub mod daily_plan;
/// Precomputed interaction-history aggregates
pub mod history;
/// Numeric helpers
pub mod math;
/// Per-signal scorers
pub mod scorers;
/// Ingredient taxonomies and matchers
pub mod taxonomy;
/// Time context and learned temporal patterns
pub mod temporal;
/// Dynamic weight adjustment
pub mod weight_adjustment;

pub use pierre_core::{constants, errors, models};

pub use blend::{SignalBlend, SignalScores};
pub use collaborative::{CollaborativeEngine, CollaborativeProfile, CollaborativeScore, UserDataSource};
pub use composite::{CompositeScore, CompositeScorer};
pub use config::RankingConfig;
pub use daily_plan::{DailyPlan, DailyPlanner, PlanOptions, PlannedMeal};
pub use history::{HistoryIndex, HistoryView};
pub use scorers::{ScoreResult, Scorer, ScorerRegistry, ScoringContext, SignalKind};
pub use temporal::{Clock, FixedClock, SystemClock, TemporalContext, UserTemporalPatterns};
pub use weight_adjustment::{LearnedWeights, SignalSample, WeightLearner};
