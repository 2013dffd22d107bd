// ABOUTME: Main library entry point for the Pierre recipe ranker
// ABOUTME: Ranking service, learned-weight cache, in-memory data source and logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Recipe Ranker
//!
//! Ranks candidate recipes against a user's nutritional goals, taste
//! preferences and history, and builds daily meal plans.
//!
//! ## Architecture
//!
//! - **pierre-core**: Errors, data models and constants
//! - **pierre-intelligence**: Signal scorers, composite scoring, collaborative
//!   filtering, weight learning and the daily planner
//! - **services**: [`services::RecommendationService`], the async facade
//! - **store**: [`store::InMemoryDataSource`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use pierre_recipe_ranker::errors::AppResult;
//! use pierre_recipe_ranker::intelligence::scorers::ScoringContext;
//! use pierre_recipe_ranker::services::{RankRequest, RecommendationService};
//! use pierre_recipe_ranker::store::InMemoryDataSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let service = RecommendationService::new(Arc::new(InMemoryDataSource::new()));
//!     let request = RankRequest::new(Vec::new(), ScoringContext::new(Utc::now()));
//!     let ranked = service.rank(&request).await?;
//!     println!("{} recipes ranked", ranked.recipes.len());
//!     Ok(())
//! }
//! ```

/// Structured logging setup
pub mod logging;

/// Ranking, weight learning and planning services
pub mod services;

/// User data sources
pub mod store;

pub use pierre_core::{constants, errors, models};
pub use pierre_intelligence as intelligence;
