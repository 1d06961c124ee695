// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic and external clients.

pub mod avatar;
pub mod maps;
pub mod openai;
pub mod password;
pub mod quest;
pub mod token;

pub use maps::{GoogleMapsClient, RouteLookup};
pub use openai::{ChallengeGenerator, OpenAiClient};
pub use password::PasswordService;
pub use quest::QuestService;
pub use token::TokenService;
