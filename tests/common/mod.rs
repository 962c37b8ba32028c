// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use http_body_util::BodyExt;
use portfolio_api::config::Config;
use portfolio_api::db::{Database, FirestoreDb};
use portfolio_api::middleware::auth::{create_jwt, Principal};
use portfolio_api::models::ProfessionalProfile;
use portfolio_api::routes::create_router;
use portfolio_api::services::GoogleOAuthClient;
use portfolio_api::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> Database {
    Database::from(
        FirestoreDb::new("test-project")
            .await
            .expect("Failed to connect to Firestore emulator"),
    )
}

/// Build app state around `db` and `google`.
#[allow(dead_code)]
pub fn build_state(config: Config, db: Database, google: GoogleOAuthClient) -> Arc<AppState> {
    let professional = ProfessionalProfile::embedded().expect("embedded profile");
    Arc::new(AppState::new(config, db, google, professional))
}

/// Create a test app backed by a fresh in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_app_with_db(Database::in_memory())
}

/// Create a test app whose store is unreachable (every operation fails).
#[allow(dead_code)]
pub fn create_offline_app() -> (axum::Router, Arc<AppState>) {
    create_app_with_db(Database::from(FirestoreDb::new_mock()))
}

#[allow(dead_code)]
pub fn create_app_with_db(db: Database) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let google = GoogleOAuthClient::new(&config).expect("OAuth client");
    let state = build_state(config, db, google);
    (create_router(state.clone()), state)
}

/// Mint a valid token for the given identity.
#[allow(dead_code)]
pub fn create_test_jwt(state: &AppState, identity: &str, display_name: &str) -> String {
    let principal = Principal {
        identity: identity.to_string(),
        display_name: display_name.to_string(),
    };
    create_jwt(&principal, &state.config.jwt_secret).expect("Failed to create JWT")
}

/// Bearer header value for a default test user.
#[allow(dead_code)]
pub fn bearer(state: &AppState) -> String {
    format!("Bearer {}", create_test_jwt(state, "g-owner", "Portfolio Owner"))
}

#[allow(dead_code)]
pub fn get(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, auth: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn delete(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
