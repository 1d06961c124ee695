// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use quest_trail::config::Config;
use quest_trail::db::{Database, FirestoreDb, MemoryDb};
use quest_trail::error::AppError;
use quest_trail::models::{Landmark, Quest, RouteInfo, User};
use quest_trail::routes::create_router;
use quest_trail::services::{
    ChallengeGenerator, PasswordService, QuestService, RouteLookup, TokenService,
};
use quest_trail::AppState;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

// ─── Stub collaborators ──────────────────────────────────────

/// Route lookup returning a fixed result.
pub struct StaticRouteLookup(pub Result<RouteInfo, String>);

#[async_trait]
impl RouteLookup for StaticRouteLookup {
    async fn route_with_landmarks(&self, _start: &str, _end: &str) -> Result<RouteInfo, AppError> {
        self.0.clone().map_err(AppError::Upstream)
    }
}

/// Generator that fails for prompts mentioning any of `fail_for`.
#[derive(Default)]
pub struct ScriptedGenerator {
    pub fail_for: Vec<String>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl ChallengeGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_for.iter().any(|name| prompt.contains(name.as_str())) {
            return Err(AppError::Upstream("provider unavailable".to_string()));
        }
        Ok("Take a photo with a stranger.".to_string())
    }
}

/// Store whose quest writes start failing after `ok_quests` successes.
pub struct FlakyQuestDb {
    pub inner: MemoryDb,
    pub ok_quests: usize,
    attempts: AtomicUsize,
}

#[allow(dead_code)]
impl FlakyQuestDb {
    pub fn new(ok_quests: usize) -> Self {
        Self {
            inner: MemoryDb::new(),
            ok_quests,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Database for FlakyQuestDb {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.inner.list_users().await
    }
    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        self.inner.get_user(id).await
    }
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.inner.find_user_by_email(email).await
    }
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        self.inner.insert_user(user).await
    }
    async fn update_user(&self, user: &User) -> Result<(), AppError> {
        self.inner.update_user(user).await
    }
    async fn insert_quest(&self, quest: &Quest) -> Result<(), AppError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt >= self.ok_quests {
            return Err(AppError::Database("write quota exceeded".to_string()));
        }
        self.inner.insert_quest(quest).await
    }
}

/// Detail text carried by [`UnavailableUserDb`] errors.
#[allow(dead_code)]
pub const STORE_FAILURE_DETAIL: &str = "deadline exceeded contacting users collection";

/// Store whose operations all fail with a database error.
#[allow(dead_code)]
pub struct UnavailableUserDb;

#[async_trait]
impl Database for UnavailableUserDb {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Err(AppError::Database(STORE_FAILURE_DETAIL.to_string()))
    }
    async fn get_user(&self, _id: &str) -> Result<Option<User>, AppError> {
        Err(AppError::Database(STORE_FAILURE_DETAIL.to_string()))
    }
    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>, AppError> {
        Err(AppError::Database(STORE_FAILURE_DETAIL.to_string()))
    }
    async fn insert_user(&self, _user: &User) -> Result<(), AppError> {
        Err(AppError::Database(STORE_FAILURE_DETAIL.to_string()))
    }
    async fn update_user(&self, _user: &User) -> Result<(), AppError> {
        Err(AppError::Database(STORE_FAILURE_DETAIL.to_string()))
    }
    async fn insert_quest(&self, _quest: &Quest) -> Result<(), AppError> {
        Err(AppError::Database(STORE_FAILURE_DETAIL.to_string()))
    }
}

// ─── Fixtures ────────────────────────────────────────────────

#[allow(dead_code)]
pub fn landmark(name: &str) -> Landmark {
    Landmark {
        name: name.to_string(),
        types: vec!["tourist_attraction".to_string()],
        rating: Some(4.5),
        latitude: Some(37.8),
        longitude: Some(-122.4),
        address: Some(format!("1 {} Way", name)),
    }
}

#[allow(dead_code)]
pub fn route_with(landmarks: Vec<Landmark>) -> RouteInfo {
    RouteInfo {
        start_location: Some("A".to_string()),
        end_location: Some("B".to_string()),
        route_summary: Some("CA-1".to_string()),
        route_steps: Some("Head north".to_string()),
        total_distance: Some("10 mi".to_string()),
        total_duration: Some("15 mins".to_string()),
        landmarks: Some(landmarks),
    }
}

// ─── App builders ────────────────────────────────────────────

/// Create a test app from explicit collaborators.
pub fn create_test_app_with(
    db: Arc<dyn Database>,
    route_lookup: Arc<dyn RouteLookup>,
    generator: Arc<dyn ChallengeGenerator>,
) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();

    let state = Arc::new(AppState {
        tokens: TokenService::new(&config.jwt_signing_key),
        config,
        db,
        route_lookup,
        quest_service: QuestService::new(generator),
        passwords: PasswordService::new(),
    });

    (create_router(state.clone()), state)
}

/// Create a test app backed by an in-memory store with no landmarks.
/// Returns the router, the shared state and the store for inspection.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MemoryDb>) {
    let db = Arc::new(MemoryDb::new());
    let (app, state) = create_test_app_with(
        db.clone(),
        Arc::new(StaticRouteLookup(Ok(route_with(vec![])))),
        Arc::new(ScriptedGenerator::default()),
    );
    (app, state, db)
}

// ─── Request helpers ─────────────────────────────────────────

/// Send a JSON request and return the status and parsed body.
#[allow(dead_code)]
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// Send an arbitrary request and return the status and parsed body.
pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
