// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Skill records.

use crate::db::collections;
use crate::error::{AppError, Result};
use crate::models::record::{non_blank, RecordId, Resource};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Self-assessed skill level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    pub const ALL: [Proficiency; 4] = [
        Proficiency::Beginner,
        Proficiency::Intermediate,
        Proficiency::Advanced,
        Proficiency::Expert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
            Proficiency::Expert => "Expert",
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown proficiency name.
#[derive(Debug, thiserror::Error)]
#[error("unknown proficiency: {0}")]
pub struct UnknownProficiency(String);

impl FromStr for Proficiency {
    type Err = UnknownProficiency;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Proficiency::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownProficiency(s.to_string()))
    }
}

/// Stored skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: String,
    pub proficiency: Proficiency,
    pub created_at: String,
    pub updated_at: String,
}

/// Client payload for create and full-replace update.
///
/// `proficiency` arrives as free text so that a bad value is reported as a
/// validation failure alongside any other field problems.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SkillInput {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "category is required"))]
    pub category: String,
    #[serde(default)]
    #[validate(custom(
        function = "known_proficiency",
        message = "proficiency must be one of Beginner, Intermediate, Advanced, Expert"
    ))]
    pub proficiency: String,
}

fn known_proficiency(value: &str) -> std::result::Result<(), ValidationError> {
    value
        .parse::<Proficiency>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("proficiency"))
}

fn parse_proficiency(value: &str) -> Result<Proficiency> {
    value
        .parse()
        .map_err(|e: UnknownProficiency| AppError::BadRequest(e.to_string()))
}

impl Resource for Skill {
    type Input = SkillInput;

    const COLLECTION: &'static str = collections::SKILLS;
    const KIND: &'static str = "skill";
    const REQUIREMENTS: &'static str = "Skill requires non-empty text fields: name, category, \
         proficiency (one of Beginner, Intermediate, Advanced, Expert)";

    fn build(id: RecordId, input: SkillInput, now: String) -> Result<Self> {
        Ok(Self {
            id: id.to_string(),
            proficiency: parse_proficiency(&input.proficiency)?,
            name: input.name,
            category: input.category,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    fn replace(&mut self, input: SkillInput, now: String) -> Result<()> {
        self.proficiency = parse_proficiency(&input.proficiency)?;
        self.name = input.name;
        self.category = input.category;
        self.updated_at = now;
        Ok(())
    }

    fn id(&self) -> &str {
        &self.id
    }
}
