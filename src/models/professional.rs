// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fixed professional profile of the portfolio owner.
//!
//! The content lives in `data/professional.json` and is compiled into the
//! binary; it is parsed once at startup.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const EMBEDDED_PROFILE: &str = include_str!("../../data/professional.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct NameLink {
    pub first_name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileLink {
    pub text: String,
    pub link: String,
}

/// Response body of `GET /professional`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfessionalProfile {
    pub professional_name: String,
    /// PNG portrait, standard base64
    pub base64_image: String,
    pub name_link: NameLink,
    pub primary_description: String,
    pub work_description1: String,
    pub work_description2: String,
    pub link_title_text: String,
    #[serde(rename = "linkedInLink")]
    pub linked_in_link: ProfileLink,
    pub github_link: ProfileLink,
    pub contact_text: String,
}

impl ProfessionalProfile {
    /// Parse the profile compiled into the binary.
    pub fn embedded() -> Result<Self, serde_json::Error> {
        serde_json::from_str(EMBEDDED_PROFILE)
    }
}
