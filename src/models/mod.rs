// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod professional;
pub mod project;
pub mod record;
pub mod skill;
pub mod user;

pub use professional::ProfessionalProfile;
pub use project::{Project, ProjectInput};
pub use record::{RecordId, Resource};
pub use skill::{Proficiency, Skill, SkillInput};
pub use user::User;
