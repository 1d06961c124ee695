// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest Trail API Server
//!
//! User accounts plus AI-generated travel quests for the landmarks along a
//! route between two places.

use quest_trail::{
    config::{Config, StoreBackend},
    db::{Database, FirestoreDb, MemoryDb},
    services::{GoogleMapsClient, OpenAiClient, PasswordService, QuestService, TokenService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Quest Trail API");

    // Initialize the document store
    let db: Arc<dyn Database> = match config.store_backend {
        StoreBackend::Firestore => Arc::new(
            FirestoreDb::new(&config.gcp_project_id)
                .await
                .expect("Failed to connect to Firestore"),
        ),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryDb::new())
        }
    };

    // External clients
    let openai = OpenAiClient::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    );
    tracing::info!(model = %config.openai_model, "Challenge generator initialized");

    let maps = GoogleMapsClient::new(config.google_maps_api_key.clone());

    // Build shared state
    let state = Arc::new(AppState {
        tokens: TokenService::new(&config.jwt_signing_key),
        config: config.clone(),
        db,
        route_lookup: Arc::new(maps),
        quest_service: QuestService::new(Arc::new(openai)),
        passwords: PasswordService::new(),
    });

    // Build router
    let app = quest_trail::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quest_trail=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
