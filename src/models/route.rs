// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Route and landmark data returned by the route lookup.
//!
//! These are transient: they are consumed once to build quests and never
//! persisted.

use serde::{Deserialize, Serialize};

/// A point of interest along a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    /// Place type tags (e.g. "museum", "park")
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Route summary plus landmarks. Any field may be missing from a lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub route_summary: Option<String>,
    pub route_steps: Option<String>,
    pub total_distance: Option<String>,
    pub total_duration: Option<String>,
    pub landmarks: Option<Vec<Landmark>>,
}

impl RouteInfo {
    /// First required field that is absent, in declaration order.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("start_location", self.start_location.is_none()),
            ("end_location", self.end_location.is_none()),
            ("route_summary", self.route_summary.is_none()),
            ("route_steps", self.route_steps.is_none()),
            ("total_distance", self.total_distance.is_none()),
            ("total_duration", self.total_duration.is_none()),
            ("landmarks", self.landmarks.is_none()),
        ]
        .into_iter()
        .find_map(|(name, missing)| missing.then_some(name))
    }
}
