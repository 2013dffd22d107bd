// ABOUTME: Pierre ranker CLI - ranks recipes, plans days and learns weights from JSON input
// ABOUTME: Parses arguments with clap, initializes logging and dispatches to command modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Rank the candidates in a request file, best five as a table
//! pierre-ranker rank --input request.json --limit 5 --format table
//!
//! # Plan breakfast, lunch and dinner without repeating a recipe
//! pierre-ranker plan --input plan.json --slots breakfast,lunch,dinner --distinct
//!
//! # Learn blend weights for the user in the request file
//! pierre-ranker learn-weights --input learn.json
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pierre_recipe_ranker::logging::LoggingConfig;
use pierre_recipe_ranker::models::MealSlot;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pierre-ranker",
    about = "Pierre recipe ranking CLI",
    long_about = "Rank candidate recipes, build daily meal plans and learn per-user blend weights from JSON request files."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Output format for `rank`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact text table
    Table,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Rank the candidate recipes of a request file
    Rank {
        /// JSON request file
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Keep only the best N recipes
        #[arg(long)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Pick one recipe per meal slot
    Plan {
        /// JSON request file
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Comma-separated meal slots (defaults to breakfast,lunch,dinner,snack)
        #[arg(long, value_delimiter = ',')]
        slots: Vec<MealSlot>,

        /// Never use one recipe for two slots
        #[arg(long)]
        distinct: bool,
    },

    /// Learn blend weights from a user's history
    LearnWeights {
        /// JSON request file
        #[arg(long, short = 'i')]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    match cli.command {
        Command::Rank {
            input,
            limit,
            format,
        } => commands::rank::run(&input, limit, format == OutputFormat::Table).await,
        Command::Plan {
            input,
            slots,
            distinct,
        } => commands::plan::run(&input, slots, distinct),
        Command::LearnWeights { input } => commands::learn::run(&input).await,
    }
}
