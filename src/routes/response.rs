// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Success response envelope.
//!
//! Every body carries `success` and `status`; the transport status code
//! always matches `status`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Successful API response wrapping a payload that is flattened into the body.
pub struct ApiResponse<T> {
    status: StatusCode,
    message: Option<&'static str>,
    data: T,
}

/// Payload for responses that carry only a message.
#[derive(Debug, Default, Serialize)]
pub struct Empty {}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: None,
            data,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            message: None,
            data,
        }
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

#[derive(Serialize)]
struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(flatten)]
    data: T,
    success: bool,
    status: u16,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = Envelope {
            message: self.message,
            data: self.data,
            success: true,
            status: self.status.as_u16(),
        };

        (self.status, Json(body)).into_response()
    }
}
