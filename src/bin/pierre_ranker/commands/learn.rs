// ABOUTME: learn-weights command for pierre-ranker
// ABOUTME: Learns blend weights from the target user's stored history and prints them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use pierre_recipe_ranker::services::RecommendationService;
use std::path::Path;
use std::sync::Arc;

use crate::helpers::display::print_json;
use crate::helpers::input::{data_source, load, LearnInput};

/// Learn weights for the request file's user
pub async fn run(input: &Path) -> Result<()> {
    let LearnInput {
        user_id,
        context,
        users,
    } = load(input)?;
    let service = RecommendationService::from_env(Arc::new(data_source(users)))?;
    let learned = service.learn_weights(user_id, &context).await?;
    print_json(&learned)
}
