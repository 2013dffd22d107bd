// ABOUTME: Helper modules for pierre-ranker
// ABOUTME: Request file parsing and output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
pub mod input;
