// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User record stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider subject identifier (also used as document ID)
    pub identity: String,
    /// Display name as reported at first login
    pub display_name: String,
    /// Email addresses shared by the provider
    #[serde(default)]
    pub emails: Vec<String>,
    /// Profile photo URLs
    #[serde(default)]
    pub photos: Vec<String>,
    /// When the user first logged in
    pub created_at: String,
}
