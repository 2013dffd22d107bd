// ABOUTME: plan command for pierre-ranker
// ABOUTME: Loads a plan request, applies slot and distinct-meal flags and prints the plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use pierre_recipe_ranker::models::MealSlot;
use pierre_recipe_ranker::services::RecommendationService;
use pierre_recipe_ranker::store::InMemoryDataSource;
use std::path::Path;
use std::sync::Arc;

use crate::helpers::display::print_json;
use crate::helpers::input::{load, PlanInput};

/// Plan a day from a request file; non-empty `slots` replace the file's
pub fn run(input: &Path, slots: Vec<MealSlot>, distinct: bool) -> Result<()> {
    let PlanInput { mut request } = load(input)?;
    if !slots.is_empty() {
        request.options.slots = slots;
    }
    if distinct {
        request.options.distinct_meals = true;
    }

    let service = RecommendationService::from_env(Arc::new(InMemoryDataSource::new()))?;
    print_json(&service.plan_day(&request))
}
