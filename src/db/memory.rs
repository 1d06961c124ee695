// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store for local development and tests.

use crate::db::Database;
use crate::error::AppError;
use crate::models::{Quest, User};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Volatile store; contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryDb {
    users: RwLock<HashMap<String, User>>,
    quests: RwLock<Vec<Quest>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of stored quests in insertion order.
    pub async fn quests(&self) -> Vec<Quest> {
        self.quests.read().await.clone()
    }
}

#[async_trait]
impl Database for MemoryDb {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(AppError::Database(format!(
                "Document {} already exists",
                user.id
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<(), AppError> {
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn insert_quest(&self, quest: &Quest) -> Result<(), AppError> {
        self.quests.write().await.push(quest.clone());
        Ok(())
    }
}
