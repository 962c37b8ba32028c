// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared pieces of the stored record types.

use crate::error::{AppError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Store-assigned record key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh key.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a key taken from a request path.
    ///
    /// `kind` only feeds the error message ("Invalid project id").
    pub fn parse(raw: &str, kind: &str) -> Result<Self> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| AppError::BadRequest(format!("Invalid {} id: {}", kind, raw)))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

/// A record type served by the generic CRUD routes.
///
/// `Input` is the complete client payload; create and update both require
/// all of it (updates are full replacements).
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Input: DeserializeOwned + Validate + Send + 'static;

    /// Collection holding these records.
    const COLLECTION: &'static str;
    /// Lower-case name used in messages ("project").
    const KIND: &'static str;
    /// Message returned when the payload fails validation.
    const REQUIREMENTS: &'static str;

    /// Build a new record from a validated payload.
    fn build(id: RecordId, input: Self::Input, now: String) -> Result<Self>;

    /// Overwrite every client-owned field and bump `updated_at`.
    fn replace(&mut self, input: Self::Input, now: String) -> Result<()>;

    /// Document id.
    fn id(&self) -> &str;
}

/// Rejects empty and whitespace-only strings.
pub fn non_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}
