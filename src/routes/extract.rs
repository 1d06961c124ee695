// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request body extraction and required-field checks.

use crate::error::{AppError, Result};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

/// JSON body extractor with API-shaped rejections.
///
/// Requires `Content-Type: application/json` and a non-empty JSON object.
/// Unlike `axum::Json`, every rejection is an [`AppError`] so it renders
/// with the standard error envelope.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        if !has_json_content_type(req.headers()) {
            return Err(AppError::UnsupportedContentType);
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        parse_object(&bytes).map(JsonBody)
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn parse_object<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(bytes).map_err(|_| AppError::InvalidJson)?;

    match &value {
        Value::Object(map) if !map.is_empty() => {}
        _ => return Err(AppError::InvalidJson),
    }

    serde_json::from_value(value).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Validate a request, reporting the first failing field in `order`.
///
/// Every failure is treated as a missing field: the rules used are
/// `required` and `length(min = 1)`.
pub fn require_fields<T: Validate>(request: &T, order: &[&'static str]) -> Result<()> {
    let Err(errors) = request.validate() else {
        return Ok(());
    };

    let invalid = errors.field_errors();
    let field = order
        .iter()
        .find(|f| invalid.contains_key(**f))
        .map(|f| f.to_string())
        .or_else(|| invalid.keys().next().map(|k| k.to_string()))
        .unwrap_or_default();

    Err(AppError::MissingField(field))
}

/// Presence check for fields whose wire name differs from the Rust name.
pub fn require<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::MissingField(field.to_string()))
}
