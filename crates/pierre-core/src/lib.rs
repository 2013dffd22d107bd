// ABOUTME: Core types and constants for the Pierre recipe ranking engine
// ABOUTME: Foundation crate with error handling, data models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Core
//!
//! Foundation crate providing shared types and constants for the recipe ranking
//! engine. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `AppResult`
//! - **models**: Recipes, preferences, goals, interaction history and blend weights
//! - **constants**: Score bounds, nutrition references and time windows

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
