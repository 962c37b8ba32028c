// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public owner profile.

use crate::models::ProfessionalProfile;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/professional", get(get_professional))
}

async fn get_professional(State(state): State<Arc<AppState>>) -> Json<ProfessionalProfile> {
    Json(state.professional.clone())
}
