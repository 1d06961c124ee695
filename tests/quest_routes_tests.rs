// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest generation route tests with stubbed lookup and generator.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use quest_trail::db::MemoryDb;
use quest_trail::models::RouteInfo;
use quest_trail::services::quest::FALLBACK_CHALLENGE;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

mod common;
use common::{
    create_test_app_with, landmark, route_with, send, send_json, FlakyQuestDb, ScriptedGenerator,
    StaticRouteLookup,
};

const URI: &str = "/api/quests/generateFromRoute";

fn route_request() -> serde_json::Value {
    json!({"start_location": "San Jose", "end_location": "San Francisco"})
}

#[tokio::test]
async fn test_one_quest_per_landmark() {
    let db = Arc::new(MemoryDb::new());
    let generator = Arc::new(ScriptedGenerator::default());
    let names = ["Winchester Mystery House", "Filoli", "Coit Tower"];
    let (app, _) = create_test_app_with(
        db.clone(),
        Arc::new(StaticRouteLookup(Ok(route_with(
            names.iter().map(|n| landmark(n)).collect(),
        )))),
        generator.clone(),
    );

    let (status, body) = send_json(&app, "POST", URI, route_request()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "Quests generated successfully");

    let quests = body["quests"].as_array().unwrap();
    assert_eq!(quests.len(), names.len());
    assert_eq!(generator.calls.load(Ordering::SeqCst), names.len());

    for (quest, name) in quests.iter().zip(names) {
        assert_eq!(quest["landmark"], name);
        assert_eq!(quest["name"], format!("Quest at {}", name));
        assert_eq!(
            quest["description"],
            format!(
                "Visit {} and complete the challenge: Take a photo with a stranger.",
                name
            )
        );
        assert_eq!(quest["address"], format!("1 {} Way", name));

        let reward = quest["reward"].as_u64().unwrap();
        assert!((100..=300).contains(&reward));
        assert_eq!(reward % 10, 0);
    }

    let stored = db.quests().await;
    assert_eq!(stored.len(), names.len());
    assert_eq!(stored[0].landmark, names[0]);
}

#[tokio::test]
async fn test_generator_failure_uses_fallback_and_continues() {
    let db = Arc::new(MemoryDb::new());
    let generator = Arc::new(ScriptedGenerator {
        fail_for: vec!["Filoli".to_string()],
        ..Default::default()
    });
    let (app, _) = create_test_app_with(
        db.clone(),
        Arc::new(StaticRouteLookup(Ok(route_with(vec![
            landmark("Filoli"),
            landmark("Coit Tower"),
        ])))),
        generator.clone(),
    );

    let (status, body) = send_json(&app, "POST", URI, route_request()).await;

    assert_eq!(status, StatusCode::CREATED);
    let quests = body["quests"].as_array().unwrap();
    assert_eq!(quests.len(), 2);
    assert_eq!(
        quests[0]["description"],
        format!("Visit Filoli and complete the challenge: {}", FALLBACK_CHALLENGE)
    );
    assert!(!quests[1]["description"]
        .as_str()
        .unwrap()
        .contains(FALLBACK_CHALLENGE));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    assert_eq!(db.quests().await.len(), 2);
}

#[tokio::test]
async fn test_missing_landmarks_field_named() {
    let db = Arc::new(MemoryDb::new());
    let route = RouteInfo {
        landmarks: None,
        ..route_with(vec![])
    };
    let (app, _) = create_test_app_with(
        db.clone(),
        Arc::new(StaticRouteLookup(Ok(route))),
        Arc::new(ScriptedGenerator::default()),
    );

    let (status, body) = send_json(
        &app,
        "POST",
        URI,
        json!({"start_location": "A", "end_location": "B"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: landmarks");
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 400);
    assert!(db.quests().await.is_empty());
}

#[tokio::test]
async fn test_missing_end_location() {
    let (app, _) = create_test_app_with(
        Arc::new(MemoryDb::new()),
        Arc::new(StaticRouteLookup(Ok(route_with(vec![])))),
        Arc::new(ScriptedGenerator::default()),
    );

    let (status, body) = send_json(&app, "POST", URI, json!({"start_location": "A"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: end_location");
}

#[tokio::test]
async fn test_missing_content_type() {
    let (app, _) = create_test_app_with(
        Arc::new(MemoryDb::new()),
        Arc::new(StaticRouteLookup(Ok(route_with(vec![])))),
        Arc::new(ScriptedGenerator::default()),
    );

    let (status, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri(URI)
            .body(Body::from(route_request().to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Content-Type must be application/json");

    let (status, _) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri(URI)
            .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
            .body(Body::from(route_request().to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_lookup_failure_is_upstream_error() {
    let (app, _) = create_test_app_with(
        Arc::new(MemoryDb::new()),
        Arc::new(StaticRouteLookup(Err(
            "Route lookup failed: NOT_FOUND".to_string()
        ))),
        Arc::new(ScriptedGenerator::default()),
    );

    let (status, body) = send_json(&app, "POST", URI, route_request()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], 502);
    assert!(body["error"].as_str().unwrap().contains("NOT_FOUND"));
}

#[tokio::test]
async fn test_persistence_failure_aborts_batch() {
    let db = Arc::new(FlakyQuestDb::new(1));
    let generator = Arc::new(ScriptedGenerator::default());
    let (app, _) = create_test_app_with(
        db.clone(),
        Arc::new(StaticRouteLookup(Ok(route_with(vec![
            landmark("Filoli"),
            landmark("Coit Tower"),
            landmark("Lands End"),
        ])))),
        generator.clone(),
    );

    let (status, body) = send_json(&app, "POST", URI, route_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body.get("quests").is_none());
    // First quest stays saved; the third landmark is never attempted.
    assert_eq!(db.inner.quests().await.len(), 1);
    assert_eq!(db.attempts(), 2);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
}
