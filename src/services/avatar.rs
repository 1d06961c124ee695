// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Placeholder avatars from DiceBear.

const SEED_LEN: usize = 15;

/// Random alphanumeric seed for a DiceBear avatar.
fn random_seed() -> String {
    std::iter::repeat_with(fastrand::alphanumeric)
        .take(SEED_LEN)
        .collect()
}

/// URL of a randomly seeded "shapes" avatar.
pub fn random_avatar_url() -> String {
    format!(
        "https://api.dicebear.com/9.x/shapes/png?seed={}&format=png",
        random_seed()
    )
}
