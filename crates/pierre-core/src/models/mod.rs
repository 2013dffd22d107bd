// ABOUTME: Core data models for recipe ranking
// ABOUTME: Recipes, preferences, goals, interactions, weights, meal slots and kitchens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Every value here is a read-only snapshot constructed per request. The engine
//! never creates, mutates or destroys them; only weight learning produces a
//! value (`ScoringWeights`) a caller may persist.

/// Nutrition goals and physical profile
pub mod goals;
/// Interaction history
pub mod interaction;
/// Kitchen capabilities
pub mod kitchen;
/// Meal slots
pub mod meal;
/// Taste preferences
pub mod preferences;
/// Recipe snapshot
pub mod recipe;
/// Blend weights
pub mod weights;

pub use goals::{ActivityLevel, FitnessGoal, Gender, MacroGoals, PhysicalProfile};
pub use interaction::{InteractionKind, InteractionRecord, RecipeSnapshot, UserBehaviorData};
pub use kitchen::{BudgetLevel, KitchenProfile};
pub use meal::MealSlot;
pub use preferences::{DietaryRestriction, SpiceLevel, SuperfoodCategory, UserPreferences};
pub use recipe::{MacroProfile, Recipe, RecipeEnrichment, SkillLevel};
pub use weights::{ScoringWeights, WeightedSignal};
