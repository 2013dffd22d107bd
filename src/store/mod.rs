// ABOUTME: User data sources backing collaborative filtering and weight learning
// ABOUTME: Re-exports the in-memory implementation used by the CLI, benches and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory user and interaction store
pub mod memory;

pub use memory::{InMemoryDataSource, UserRecord};
