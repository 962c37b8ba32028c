// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Portfolio project records.

use crate::db::collections;
use crate::error::Result;
use crate::models::record::{non_blank, RecordId, Resource};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Stored project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Link to the project (repository, demo, write-up)
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Client payload for create and full-replace update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProjectInput {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "description is required"))]
    pub description: String,
    #[serde(default)]
    #[validate(custom(function = "web_url"))]
    pub url: String,
}

/// Non-blank absolute `http`/`https` URL with a host.
fn web_url(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("url is required".into()));
    }
    match reqwest::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(ValidationError::new("url")
            .with_message("url must be an absolute http(s) URL".into())),
    }
}

impl Resource for Project {
    type Input = ProjectInput;

    const COLLECTION: &'static str = collections::PROJECTS;
    const KIND: &'static str = "project";
    const REQUIREMENTS: &'static str =
        "Project requires non-empty text fields: title, description, url";

    fn build(id: RecordId, input: ProjectInput, now: String) -> Result<Self> {
        Ok(Self {
            id: id.to_string(),
            title: input.title,
            description: input.description,
            url: input.url,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    fn replace(&mut self, input: ProjectInput, now: String) -> Result<()> {
        self.title = input.title;
        self.description = input.description;
        self.url = input.url;
        self.updated_at = now;
        Ok(())
    }

    fn id(&self) -> &str {
        &self.id
    }
}
