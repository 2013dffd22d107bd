// ABOUTME: rank command for pierre-ranker
// ABOUTME: Loads a request file, ranks its candidates and prints JSON or a table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use pierre_recipe_ranker::services::RecommendationService;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::helpers::display::{print_json, print_ranking_table};
use crate::helpers::input::{data_source, load, RankInput};

/// Rank the candidates of a request file
pub async fn run(input: &Path, limit: Option<usize>, table: bool) -> Result<()> {
    let RankInput { mut request, users } = load(input)?;
    if limit.is_some() {
        request.limit = limit;
    }
    info!(candidates = request.candidates.len(), "Ranking request loaded");

    let service = RecommendationService::from_env(Arc::new(data_source(users)))?;
    let ranked = service.rank(&request).await?;

    if table {
        print_ranking_table(&ranked);
        Ok(())
    } else {
        print_json(&ranked)
    }
}
