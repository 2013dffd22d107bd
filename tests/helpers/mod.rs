// ABOUTME: Shared test helpers and fixtures for integration tests
// ABOUTME: Exports recipe, preference, history and clock fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub mod fixtures;
