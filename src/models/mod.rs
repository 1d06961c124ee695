// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod quest;
pub mod route;
pub mod user;

pub use quest::Quest;
pub use route::{Landmark, RouteInfo};
pub use user::{Profile, User, UserDocument, UserPatch};
