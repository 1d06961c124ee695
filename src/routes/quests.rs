// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest generation from a route between two places.

use crate::error::{AppError, Result};
use crate::models::Quest;
use crate::routes::extract::{require_fields, JsonBody};
use crate::routes::response::ApiResponse;
use crate::AppState;
use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/quests/generateFromRoute", post(generate_from_route))
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateQuestsRequest {
    #[validate(required, length(min = 1))]
    pub start_location: Option<String>,
    #[validate(required, length(min = 1))]
    pub end_location: Option<String>,
}

#[derive(Serialize)]
pub struct QuestsResponse {
    pub quests: Vec<Quest>,
}

/// Generate and store one quest per landmark on the route.
///
/// Landmarks are processed in order, one generator call at a time. The
/// first storage failure aborts the batch; quests already stored stay.
async fn generate_from_route(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<GenerateQuestsRequest>,
) -> Result<ApiResponse<QuestsResponse>> {
    require_fields(&request, &["start_location", "end_location"])?;
    let (Some(start), Some(end)) = (request.start_location, request.end_location) else {
        return Err(AppError::InvalidJson);
    };

    let route = state.route_lookup.route_with_landmarks(&start, &end).await?;
    if let Some(field) = route.missing_field() {
        return Err(AppError::MissingField(field.to_string()));
    }
    let landmarks = route.landmarks.unwrap_or_default();

    tracing::info!(
        start = %start,
        end = %end,
        count = landmarks.len(),
        "Generating quests for route"
    );

    let mut quests = Vec::with_capacity(landmarks.len());
    for landmark in &landmarks {
        let quest = state.quest_service.build_quest(landmark).await;

        state.db.insert_quest(&quest).await.map_err(|e| {
            tracing::error!(
                landmark = %landmark.name,
                saved = quests.len(),
                "Error saving quest, aborting batch"
            );
            e
        })?;

        quests.push(quest);
    }

    Ok(ApiResponse::created(QuestsResponse { quests })
        .with_message("Quests generated successfully"))
}
