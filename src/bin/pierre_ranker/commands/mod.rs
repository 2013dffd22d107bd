// ABOUTME: Command modules for pierre-ranker
// ABOUTME: One module per subcommand: rank, plan and learn-weights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod learn;
pub mod plan;
pub mod rank;
