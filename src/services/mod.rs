// ABOUTME: Domain service layer for ranking, weight learning and daily planning
// ABOUTME: Async facade over the intelligence crate, reusable from the CLI, benches and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Scorers are pure; this layer adds what a caller needs around them: data
//! source reads, cached learned weights and deterministic ordering.

/// Candidate ranking, weight learning and daily plans
pub mod ranking;

/// Per-user learned weight cache
pub mod weight_cache;

pub use ranking::{PlanRequest, RankRequest, RankedRecipe, RankedRecipes, RecommendationService};
pub use weight_cache::WeightCache;
