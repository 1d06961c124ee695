// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Quest model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A generated travel quest stored in the `quests` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Quest {
    /// UUID (also used as document ID)
    pub id: String,
    /// e.g. "Quest at Golden Gate Park"
    pub name: String,
    /// Challenge text shown to the traveller
    pub description: String,
    /// Name of the landmark the quest was generated for
    pub landmark: String,
    /// Points awarded, a multiple of ten in [100, 300]
    pub reward: u32,
    pub address: String,
    /// When the quest was generated (RFC 3339)
    pub created_at: String,
}
