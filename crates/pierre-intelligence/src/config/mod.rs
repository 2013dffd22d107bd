// ABOUTME: Configuration module for pierre-intelligence crate
// ABOUTME: Re-exports ranking configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Ranking engine configuration (composite, collaborative, learning, planning)
pub mod intelligence;

pub use intelligence::RankingConfig;
