// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account routes: registration, login, profile read and update.

use crate::error::{AppError, Result};
use crate::models::{Profile, User, UserDocument, UserPatch};
use crate::routes::extract::{require, require_fields, JsonBody};
use crate::routes::response::{ApiResponse, Empty};
use crate::services::avatar::random_avatar_url;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user/getAllUsers", get(get_all_users))
        .route("/api/user/create", post(create_user))
        .route("/api/user/login", post(login))
        .route("/api/user/getProfileInformation", post(get_profile))
        .route("/api/user/update", put(update_user))
}

/// Parse a profile identifier. Malformed IDs are distinct from unknown ones.
fn parse_profile_id(raw: &str) -> Result<String> {
    Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|_| AppError::InvalidId)
}

/// Load a user by profile ID or fail with 404.
async fn load_user(state: &AppState, profile_id: &str) -> Result<User> {
    state
        .db
        .get_user(profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DocumentsResponse {
    pub documents: Vec<UserDocument>,
}

/// List every user document, without IDs or password hashes.
async fn get_all_users(State(state): State<Arc<AppState>>) -> Result<ApiResponse<DocumentsResponse>> {
    let documents = state
        .db
        .list_users()
        .await?
        .into_iter()
        .map(UserDocument::from)
        .collect();

    Ok(ApiResponse::ok(DocumentsResponse { documents }))
}

// ─── Registration & Login ────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
    #[validate(required, length(min = 1))]
    pub user_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub first_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TokenResponse {
    pub token: String,
}

/// Register a new user and return an access token.
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> Result<ApiResponse<TokenResponse>> {
    require_fields(
        &request,
        &["email", "password", "user_name", "first_name", "last_name"],
    )?;
    let CreateUserRequest {
        email: Some(email),
        password: Some(password),
        user_name: Some(user_name),
        first_name: Some(first_name),
        last_name: Some(last_name),
    } = request
    else {
        return Err(AppError::InvalidJson);
    };

    // Uniqueness is a pre-check only; concurrent registrations can race.
    if state.db.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let now = now_rfc3339();
    let user = User {
        id: Uuid::new_v4().to_string(),
        email,
        password_hash: state.passwords.hash(&password)?,
        user_name,
        first_name,
        last_name,
        profile_picture: random_avatar_url(),
        created_at: now.clone(),
        updated_at: now,
        favorites: None,
        settings: None,
    };
    state.db.insert_user(&user).await?;

    let token = state.tokens.issue(&user.id)?;
    tracing::info!(user_id = %user.id, "User created");

    Ok(ApiResponse::ok(TokenResponse { token }).with_message("User Creation Successful"))
}

/// Verify credentials and return an access token.
async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<ApiResponse<TokenResponse>> {
    require_fields(&request, &["email", "password"])?;
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(AppError::InvalidJson);
    };

    let Some(user) = state.db.find_user_by_email(&email).await? else {
        tracing::info!("Login rejected: unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !state.passwords.verify(&password, &user.password_hash)? {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(&user.id)?;
    tracing::info!(user_id = %user.id, "Login successful");

    Ok(ApiResponse::ok(TokenResponse { token }).with_message("Login Successful"))
}

// ─── Profile ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    #[serde(rename = "profileId")]
    pub profile_id: Option<String>,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
}

/// Fetch the public part of a user profile.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<ProfileRequest>,
) -> Result<ApiResponse<ProfileResponse>> {
    let profile_id = parse_profile_id(require(&request.profile_id, "profileId")?)?;
    let user = load_user(&state, &profile_id).await?;

    Ok(ApiResponse::ok(ProfileResponse {
        profile: Profile::from(user),
    })
    .with_message("Fetched profile successfully"))
}

/// Profile update body. Only the listed keys are accepted; anything else
/// (including `password`) is rejected. Fields that are present must not be
/// empty.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(rename = "profileId")]
    pub profile_id: Option<String>,
    #[validate(length(min = 1))]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub user_name: Option<String>,
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(length(min = 1))]
    pub profile_picture: Option<String>,
    pub favorites: Option<Value>,
    pub settings: Option<Value>,
}

impl UpdateUserRequest {
    fn into_patch(self) -> UserPatch {
        UserPatch {
            email: self.email,
            user_name: self.user_name,
            first_name: self.first_name,
            last_name: self.last_name,
            profile_picture: self.profile_picture,
            favorites: self.favorites,
            settings: self.settings,
        }
    }
}

/// Apply an allow-listed patch to a user (read-modify-write, no locking).
async fn update_user(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> Result<ApiResponse<Empty>> {
    let profile_id = parse_profile_id(require(&request.profile_id, "profileId")?)?;
    require_fields(
        &request,
        &["email", "user_name", "first_name", "last_name", "profile_picture"],
    )?;
    let mut user = load_user(&state, &profile_id).await?;
    let patch = request.into_patch();

    if let Some(email) = patch.email.as_deref() {
        if email != user.email {
            if let Some(other) = state.db.find_user_by_email(email).await? {
                if other.id != user.id {
                    return Err(AppError::Conflict("Email already exists".to_string()));
                }
            }
        }
    }

    user.apply(patch, now_rfc3339());
    state.db.update_user(&user).await?;
    tracing::info!(user_id = %user.id, "User updated");

    Ok(ApiResponse::ok(Empty::default()).with_message("User Updated Successfully"))
}
