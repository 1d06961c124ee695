// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Maps route and landmark lookup.
//!
//! Handles:
//! - Directions between two place names (summary, steps, distance, duration)
//! - Nearby tourist attractions sampled along the route

use crate::error::AppError;
use crate::models::{Landmark, RouteInfo};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;

const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
const PLACES_NEARBY_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// Search radius around each sample point, in meters.
const SEARCH_RADIUS_M: u32 = 5_000;
/// Interior step end points sampled between the leg start and end.
const MAX_STEP_SAMPLES: usize = 5;
const MAX_LANDMARKS: usize = 10;
const PLACE_TYPE: &str = "tourist_attraction";

/// Resolves a route and the landmarks along it.
#[async_trait]
pub trait RouteLookup: Send + Sync {
    async fn route_with_landmarks(&self, start: &str, end: &str) -> Result<RouteInfo, AppError>;
}

/// Google Maps Platform client (Directions + Places).
#[derive(Clone)]
pub struct GoogleMapsClient {
    http: reqwest::Client,
    api_key: String,
}

impl GoogleMapsClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    async fn directions(&self, start: &str, end: &str) -> Result<DirectionsResponse, AppError> {
        let response = self
            .http
            .get(DIRECTIONS_URL)
            .query(&[
                ("origin", start),
                ("destination", end),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!(
                "Directions request failed: {}",
                e.without_url()
            )))?;

        check_response_json(response).await
    }

    async fn nearby_places(&self, point: LatLng) -> Result<Vec<Place>, AppError> {
        let response = self
            .http
            .get(PLACES_NEARBY_URL)
            .query(&[
                ("location", format!("{},{}", point.lat, point.lng)),
                ("radius", SEARCH_RADIUS_M.to_string()),
                ("type", PLACE_TYPE.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!(
                "Places request failed: {}",
                e.without_url()
            )))?;

        let places: PlacesResponse = check_response_json(response).await?;

        match places.status.as_str() {
            "OK" => Ok(places.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            other => Err(AppError::Upstream(format!("Places lookup failed: {}", other))),
        }
    }
}

#[async_trait]
impl RouteLookup for GoogleMapsClient {
    async fn route_with_landmarks(&self, start: &str, end: &str) -> Result<RouteInfo, AppError> {
        let directions = self.directions(start, end).await?;
        let (mut info, sample_points) = summarize_directions(directions)?;

        let mut seen = HashSet::new();
        let mut landmarks = Vec::new();

        for point in sample_points {
            if landmarks.len() >= MAX_LANDMARKS {
                break;
            }
            let places = match self.nearby_places(point).await {
                Ok(places) => places,
                Err(e) => {
                    tracing::warn!(error = %e, lat = point.lat, lng = point.lng, "Skipping sample point");
                    continue;
                }
            };
            collect_landmarks(places, &mut seen, &mut landmarks);
        }

        tracing::debug!(
            start,
            end,
            count = landmarks.len(),
            "Route landmarks resolved"
        );

        info.landmarks = Some(landmarks);
        Ok(info)
    }
}

async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Upstream(format!("Maps HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Maps JSON parse error: {}", e.without_url())))
}

/// Turn a Directions response into route fields plus search sample points.
///
/// Landmarks are left unset; the caller fills them in.
fn summarize_directions(
    directions: DirectionsResponse,
) -> Result<(RouteInfo, Vec<LatLng>), AppError> {
    if directions.status != "OK" {
        return Err(AppError::Upstream(format!(
            "Route lookup failed: {}",
            directions.status
        )));
    }

    let route = directions
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Upstream("Route lookup returned no routes".to_string()))?;
    let leg = route.legs.into_iter().next();

    let mut points = Vec::new();
    let info = match leg {
        Some(leg) => {
            points.push(leg.start_location);
            points.extend(sample_evenly(
                leg.steps.iter().map(|s| s.end_location).collect(),
                MAX_STEP_SAMPLES,
            ));
            points.push(leg.end_location);

            let steps = leg
                .steps
                .iter()
                .map(|s| strip_html(&s.html_instructions))
                .collect::<Vec<_>>()
                .join("\n");

            RouteInfo {
                start_location: leg.start_address,
                end_location: leg.end_address,
                route_summary: route.summary,
                route_steps: Some(steps),
                total_distance: leg.distance.map(|d| d.text),
                total_duration: leg.duration.map(|d| d.text),
                landmarks: None,
            }
        }
        None => RouteInfo {
            route_summary: route.summary,
            ..Default::default()
        },
    };

    Ok((info, points))
}

/// Pick at most `n` items spread across `items`, keeping order.
fn sample_evenly<T: Copy>(items: Vec<T>, n: usize) -> Vec<T> {
    if items.len() <= n {
        return items;
    }
    (0..n).map(|i| items[(i * items.len()) / n]).collect()
}

/// Append unseen places as landmarks until the cap is reached.
fn collect_landmarks(places: Vec<Place>, seen: &mut HashSet<String>, out: &mut Vec<Landmark>) {
    for place in places {
        if out.len() >= MAX_LANDMARKS {
            return;
        }
        if !seen.insert(place.place_id.clone()) {
            continue;
        }
        let location = place.geometry.map(|g| g.location);
        out.push(Landmark {
            name: place.name,
            types: place.types,
            rating: place.rating,
            latitude: location.map(|l| l.lat),
            longitude: location.map(|l| l.lng),
            address: place.vicinity,
        });
    }
}

/// Tags that start a new visual line in Directions instructions.
const BLOCK_TAGS: [&str; 3] = ["div", "br", "p"];

/// Convert a Directions instruction to plain text.
///
/// Block tags become word breaks, entities are decoded and runs of
/// whitespace collapse to a single space.
fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            rest = &rest[open..];
            break;
        };
        let tag = rest[open + 1..open + close]
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default();
        if BLOCK_TAGS.iter().any(|b| tag.eq_ignore_ascii_case(b)) {
            text.push(' ');
        }
        rest = &rest[open + close + 1..];
    }
    text.push_str(rest);

    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode the HTML entities Google emits in instructions.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

// ─── Wire types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    summary: Option<String>,
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    start_address: Option<String>,
    end_address: Option<String>,
    start_location: LatLng,
    end_location: LatLng,
    distance: Option<TextValue>,
    duration: Option<TextValue>,
    #[serde(default)]
    steps: Vec<DirectionsStep>,
}

#[derive(Debug, Deserialize)]
struct DirectionsStep {
    #[serde(default)]
    html_instructions: String,
    end_location: LatLng,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    status: String,
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    place_id: String,
    name: String,
    #[serde(default)]
    types: Vec<String>,
    rating: Option<f64>,
    vicinity: Option<String>,
    geometry: Option<PlaceGeometry>,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    location: LatLng,
}
