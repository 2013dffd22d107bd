// ABOUTME: Request file formats for pierre-ranker and their loader
// ABOUTME: Wraps service requests with the users that seed the in-memory data source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{anyhow, Result};
use pierre_recipe_ranker::intelligence::scorers::ScoringContext;
use pierre_recipe_ranker::services::{PlanRequest, RankRequest};
use pierre_recipe_ranker::store::{InMemoryDataSource, UserRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// `rank` request file
#[derive(Debug, Deserialize)]
pub struct RankInput {
    /// The ranking request itself
    #[serde(flatten)]
    pub request: RankRequest,
    /// Users for collaborative scoring
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

/// `plan` request file
#[derive(Debug, Deserialize)]
pub struct PlanInput {
    /// The plan request itself
    #[serde(flatten)]
    pub request: PlanRequest,
}

/// `learn-weights` request file
#[derive(Debug, Deserialize)]
pub struct LearnInput {
    /// User whose history is learned from
    pub user_id: Uuid,
    /// Preferences, goals and profile used to re-score the history
    pub context: ScoringContext,
    /// Users, including the target
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

/// Read and parse a JSON request file
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read request file {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| anyhow!("Invalid request file {}: {e}", path.display()))
}

/// Data source seeded with the file's users
pub fn data_source(users: Vec<UserRecord>) -> InMemoryDataSource {
    InMemoryDataSource::from_records(users)
}
