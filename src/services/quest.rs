// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest construction from landmarks.
//!
//! Each landmark gets one challenge from the generator. Generator failures
//! never abort a batch; the quest falls back to a fixed challenge instead.

use crate::models::{Landmark, Quest};
use crate::services::openai::ChallengeGenerator;
use crate::time_utils::now_rfc3339;
use std::sync::Arc;

/// Challenge used when the generator fails.
pub const FALLBACK_CHALLENGE: &str = "Explore this location and take a unique photo!";

/// Name used for landmarks the lookup returned without one.
const UNKNOWN_LANDMARK: &str = "Unknown Location";

const MIN_REWARD: u32 = 100;
const MAX_REWARD: u32 = 300;

/// Builds quests, delegating challenge text to a [`ChallengeGenerator`].
#[derive(Clone)]
pub struct QuestService {
    generator: Arc<dyn ChallengeGenerator>,
}

impl QuestService {
    pub fn new(generator: Arc<dyn ChallengeGenerator>) -> Self {
        Self { generator }
    }

    /// Build (but do not persist) a quest for one landmark.
    pub async fn build_quest(&self, landmark: &Landmark) -> Quest {
        let name = landmark_name(landmark);
        let prompt = build_prompt(landmark);

        let challenge = match self.generator.generate(&prompt).await {
            Ok(challenge) => challenge,
            Err(e) => {
                tracing::warn!(
                    landmark = %name,
                    error = %e,
                    "Challenge generation failed, using fallback"
                );
                FALLBACK_CHALLENGE.to_string()
            }
        };

        Quest {
            id: uuid::Uuid::new_v4().to_string(),
            name: format!("Quest at {}", name),
            description: format!("Visit {} and complete the challenge: {}", name, challenge),
            landmark: name.to_string(),
            reward: roll_reward(),
            address: landmark
                .address
                .clone()
                .unwrap_or_else(|| "Unknown Address".to_string()),
            created_at: now_rfc3339(),
        }
    }
}

/// Random reward: a multiple of ten in [100, 300].
pub fn roll_reward() -> u32 {
    fastrand::u32(MIN_REWARD..=MAX_REWARD) / 10 * 10
}

fn landmark_name(landmark: &Landmark) -> &str {
    if landmark.name.trim().is_empty() {
        UNKNOWN_LANDMARK
    } else {
        &landmark.name
    }
}

fn format_coordinate(value: Option<f64>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

/// Prompt asking for a short challenge specific to `landmark`.
pub fn build_prompt(landmark: &Landmark) -> String {
    let name = landmark_name(landmark);
    let kind = landmark.types.join(", ");
    let location = format!(
        "({}, {})",
        format_coordinate(landmark.latitude),
        format_coordinate(landmark.longitude)
    );

    format!(
        "You are an expert at designing fun and engaging travel quests.\n\
         Create a unique challenge for someone visiting {name}, which is a {kind} located at {location}.\n\
         Make the challenge specific to this landmark and engaging for travelers.\n\
         \n\
         Keep it short, no more than 15/20 words max.\n\
         \n\
         {EXAMPLE_CHALLENGES}"
    )
}

const EXAMPLE_CHALLENGES: &str = r#"Example challenges

If it is a museum, any of the following are good:
  "Take a guided tour."
  "Find a piece of art that you like the most, and take a picture with it."
  "Spend at least 30 minutes at the museum, and describe your favorite artwork to someone else."

If it is a restaurant, any of the following are good:
  "Order a signature dish and take a picture of your meal before eating."
  "Talk to the staff about the most popular dish and try it out."
  "Try a dish you've never had before and rate it from 1 to 10."

If it is a university, any of the following are good:
  "Buy a school souvenir like a T-shirt or mug from the campus store."
  "Take a picture at the main campus entrance with a campus map or university flag."
  "Sit on the campus quad and read or journal for 15 minutes."

If it is a shopping mall, any of the following are good:
  "Buy something you've never bought before from a store you've never visited."
  "Spend 15 minutes window shopping without buying anything."

If it is a historical place, any of the following are good:
  "Take a selfie with the landmark in the background."
  "Find the oldest part of the landmark and take a close-up photo of it."
  "Look for a plaque that gives historical context and take a photo of it."

If it is a park, any of the following are good:
  "Walk at least one mile in the park and take a picture of your favorite spot."
  "Find and identify at least three different types of trees or plants."
  "Sit on a bench for 10 minutes and sketch something you see."

If it is an amusement park, any of the following are good:
  "Ride at least one roller coaster."
  "Eat a classic amusement park food item and rate it out of 10."

If it is a library, any of the following are good:
  "Find a book with a title that starts with the same letter as your name."
  "Read one page of a random book and summarize it in one sentence."

You are not restricted to these; make others following similar guides."#;
