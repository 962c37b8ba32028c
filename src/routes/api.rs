// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity routes for authenticated callers.

use crate::error::Result;
use crate::middleware::auth::Principal;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Requires authentication; the auth layer is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/protected", get(protected))
        .route("/api/profile", get(get_profile))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProtectedResponse {
    pub message: String,
    pub user: String,
}

async fn protected(Extension(principal): Extension<Principal>) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "Welcome to the protected route!".to_string(),
        user: principal.display_name,
    })
}

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub identity: String,
    pub display_name: String,
    pub emails: Vec<String>,
    pub photos: Vec<String>,
}

/// Identity from the token, plus contact details from the stored user.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ProfileResponse>> {
    let (emails, photos) = match state.users.get(&principal.identity).await? {
        Some(user) => (user.emails, user.photos),
        None => {
            tracing::debug!(identity = %principal.identity, "Token subject has no stored user");
            (Vec::new(), Vec::new())
        }
    };

    Ok(Json(ProfileResponse {
        identity: principal.identity,
        display_name: principal.display_name,
        emails,
        photos,
    }))
}
