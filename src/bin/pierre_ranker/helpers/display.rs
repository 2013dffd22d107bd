// ABOUTME: Output formatting helpers for pierre-ranker
// ABOUTME: Pretty JSON for every command and a compact table for rankings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use pierre_recipe_ranker::services::RankedRecipes;
use serde::Serialize;

/// Print any result as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a ranking as a table, one recipe per line
pub fn print_ranking_table(ranked: &RankedRecipes) {
    println!(
        "{:>4}  {:>6}  {:<32}  {:<14}  {:>5}",
        "RANK", "SCORE", "TITLE", "CUISINE", "MINS"
    );
    println!("{}", "-".repeat(70));
    for (position, entry) in ranked.recipes.iter().enumerate() {
        let title: String = entry.recipe.title.chars().take(32).collect();
        println!(
            "{:>4}  {:>6.1}  {:<32}  {:<14}  {:>5}",
            position + 1,
            entry.score,
            title,
            entry.recipe.cuisine,
            entry.recipe.cook_time_mins
        );
    }
    let source = if ranked.learned_weights {
        "learned"
    } else {
        "default"
    };
    println!("\nWeights: {source}");
}
