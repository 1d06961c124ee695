// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Quest Trail: travel quests generated along a route
//!
//! This crate provides the backend API for user accounts and for turning
//! the landmarks on a route into AI-written travel challenges.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::{PasswordService, QuestService, RouteLookup, TokenService};
use std::sync::Arc;

/// Shared application state.
///
/// External collaborators are injected here so handlers never reach for
/// globals.
pub struct AppState {
    pub config: Config,
    pub db: Arc<dyn Database>,
    pub route_lookup: Arc<dyn RouteLookup>,
    pub quest_service: QuestService,
    pub passwords: PasswordService,
    pub tokens: TokenService,
}
