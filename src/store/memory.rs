// ABOUTME: In-memory implementation of the user data source
// ABOUTME: Profiles and interaction histories behind a tokio RwLock, with optional latency and failure injection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use pierre_core::errors::{AppError, AppResult};
use pierre_core::models::{InteractionRecord, MacroGoals, UserBehaviorData, UserPreferences};
use pierre_intelligence::collaborative::{CollaborativeProfile, UserDataSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::sleep;
use uuid::Uuid;

/// One user as stored, also the shape of the CLI's `users` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User identifier
    pub user_id: Uuid,
    /// Taste preferences
    #[serde(default)]
    pub preferences: UserPreferences,
    /// Macro goals
    #[serde(default)]
    pub macro_goals: Option<MacroGoals>,
    /// Interaction history
    #[serde(default)]
    pub interactions: Vec<InteractionRecord>,
}

impl UserRecord {
    /// User with preferences and no history
    #[must_use]
    pub const fn new(user_id: Uuid, preferences: UserPreferences) -> Self {
        Self {
            user_id,
            preferences,
            macro_goals: None,
            interactions: Vec::new(),
        }
    }

    /// Attach macro goals
    #[must_use]
    pub const fn with_macro_goals(mut self, goals: MacroGoals) -> Self {
        self.macro_goals = Some(goals);
        self
    }

    /// Attach interaction history
    #[must_use]
    pub fn with_interactions(mut self, interactions: Vec<InteractionRecord>) -> Self {
        self.interactions = interactions;
        self
    }

    fn profile(&self) -> CollaborativeProfile {
        CollaborativeProfile {
            user_id: self.user_id,
            preferences: self.preferences.clone(),
            macro_goals: self.macro_goals,
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<Uuid, UserRecord>,
    /// Insertion order, for stable candidate listings
    order: Vec<Uuid>,
}

/// In-memory user store
///
/// Uses `Arc<RwLock<..>>` so clones share one store; reads never block each
/// other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    state: Arc<RwLock<StoreState>>,
    latency: Option<Duration>,
    failure: Option<String>,
}

impl InMemoryDataSource {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with users; a repeated id replaces the earlier record
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let mut state = StoreState::default();
        for record in records {
            if !state.users.contains_key(&record.user_id) {
                state.order.push(record.user_id);
            }
            state.users.insert(record.user_id, record);
        }
        Self {
            state: Arc::new(RwLock::new(state)),
            latency: None,
            failure: None,
        }
    }

    /// Delay every read by `latency`
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail every read with an internal error carrying `message`
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Insert or replace a user
    pub async fn upsert(&self, record: UserRecord) {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&record.user_id) {
            state.order.push(record.user_id);
        }
        state.users.insert(record.user_id, record);
    }

    /// Append one interaction to a user's history
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the user is unknown.
    pub async fn record_interaction(&self, user_id: Uuid, record: InteractionRecord) -> AppResult<()> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;
        user.interactions.push(record);
        Ok(())
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Whether the store holds no users
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.users.is_empty()
    }

    async fn before_read(&self) -> AppResult<()> {
        if let Some(latency) = self.latency {
            sleep(latency).await;
        }
        match &self.failure {
            Some(message) => Err(AppError::internal(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserDataSource for InMemoryDataSource {
    async fn user_profile(&self, user_id: Uuid) -> AppResult<Option<CollaborativeProfile>> {
        self.before_read().await?;
        let state = self.state.read().await;
        Ok(state.users.get(&user_id).map(UserRecord::profile))
    }

    async fn candidate_users(&self, exclude: Uuid, limit: usize) -> AppResult<Vec<Uuid>> {
        self.before_read().await?;
        let state = self.state.read().await;
        Ok(state
            .order
            .iter()
            .copied()
            .filter(|id| *id != exclude)
            .take(limit)
            .collect())
    }

    async fn user_interactions(&self, user_id: Uuid) -> AppResult<UserBehaviorData> {
        self.before_read().await?;
        let state = self.state.read().await;
        Ok(state
            .users
            .get(&user_id)
            .map(|user| UserBehaviorData::new(user.interactions.clone()))
            .unwrap_or_default())
    }
}
