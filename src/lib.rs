// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Portfolio API: a small personal-portfolio backend.
//!
//! The owner signs in through Google, receives a one-hour bearer token, and
//! manages two record collections (projects and skills) kept in a document
//! store. A fixed professional profile is served to anyone.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use models::{ProfessionalProfile, Project, Skill};
use services::{GoogleOAuthClient, RecordStore, UserDirectory};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub google: GoogleOAuthClient,
    pub users: UserDirectory,
    pub projects: RecordStore<Project>,
    pub skills: RecordStore<Skill>,
    pub professional: ProfessionalProfile,
}

impl AppState {
    /// Wire every component around a single store handle.
    pub fn new(
        config: Config,
        db: Database,
        google: GoogleOAuthClient,
        professional: ProfessionalProfile,
    ) -> Self {
        Self {
            users: UserDirectory::new(db.clone()),
            projects: RecordStore::new(db.clone()),
            skills: RecordStore::new(db.clone()),
            config,
            db,
            google,
            professional,
        }
    }
}
