// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google sign-in routes.
//!
//! Login is a three-legged OAuth flow. `/auth/google` sets a random nonce in
//! a short-lived cookie and sends Google a signed `state` carrying the same
//! nonce; the callback only proceeds when both agree. A successful callback
//! answers with a bearer token; every failure redirects to `/auth/failure`.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, Principal, TOKEN_TTL_SECS};
use crate::models::User;
use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

pub const CALLBACK_PATH: &str = "/auth/google/callback";
pub const FAILURE_PATH: &str = "/auth/failure";
pub const NONCE_COOKIE: &str = "oauth_nonce";

/// How long a login attempt may take, in milliseconds.
const STATE_MAX_AGE_MS: u128 = 10 * 60 * 1000;
/// Tolerated clock skew for states stamped in the future.
const STATE_FUTURE_SKEW_MS: u128 = 60 * 1000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/auth/google", get(auth_start))
        .route(CALLBACK_PATH, get(auth_callback))
        .route(FAILURE_PATH, get(auth_failure))
        .route("/logout", get(logout))
}

async fn home() -> Html<&'static str> {
    Html(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Portfolio API</title></head>\n\
         <body>\n\
         <h1>Portfolio API</h1>\n\
         <p><a href=\"/auth/google\">Login with Google</a></p>\n\
         </body>\n\
         </html>\n",
    )
}

/// Start OAuth flow - redirect to Google's consent screen.
async fn auth_start(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect)> {
    let nonce = Uuid::new_v4().simple().to_string();
    let oauth_state = sign_state(&nonce, now_millis()?, &state.config.session_secret)?;

    let cookie = Cookie::build((NONCE_COOKIE, nonce))
        .path(CALLBACK_PATH)
        .max_age(time::Duration::seconds((STATE_MAX_AGE_MS / 1000) as i64))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.secure_cookies())
        .build();

    tracing::info!("Starting OAuth flow, redirecting to Google");

    Ok((
        jar.add(cookie),
        Redirect::temporary(&state.google.authorization_url(&oauth_state)),
    ))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Body returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token_type: &'static str,
    pub token: String,
    pub expires_in: u64,
    pub user: User,
}

/// OAuth callback - verify the round trip, register the user, issue a token.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    let cookie_nonce = jar.get(NONCE_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(
        Cookie::build((NONCE_COOKIE, ""))
            .path(CALLBACK_PATH)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(state.config.secure_cookies())
            .build(),
    );

    match complete_login(&state, params, cookie_nonce.as_deref()).await {
        Ok(login) => (jar, Json(login)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            (jar, Redirect::to(FAILURE_PATH)).into_response()
        }
    }
}

async fn complete_login(
    state: &AppState,
    params: CallbackParams,
    cookie_nonce: Option<&str>,
) -> Result<LoginResponse> {
    if let Some(error) = params.error {
        return Err(AppError::BadRequest(format!("Provider returned error: {}", error)));
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".to_string()))?;

    let state_nonce = params
        .state
        .as_deref()
        .and_then(|s| verify_state(s, now_millis().ok()?, &state.config.session_secret))
        .ok_or_else(|| AppError::BadRequest("Invalid or expired state".to_string()))?;

    let nonce_matches = cookie_nonce
        .map(|c| bool::from(c.as_bytes().ct_eq(state_nonce.as_bytes())))
        .unwrap_or(false);
    if !nonce_matches {
        return Err(AppError::BadRequest(
            "State does not match login cookie".to_string(),
        ));
    }

    let profile = state.google.exchange_code(&code).await?;
    let user = state.users.find_or_create(&profile).await?;
    let token = create_jwt(&Principal::from(&user), &state.config.jwt_secret)?;

    tracing::info!(identity = %user.identity, "Login successful");

    Ok(LoginResponse {
        token_type: "Bearer",
        token,
        expires_in: TOKEN_TTL_SECS,
        user,
    })
}

async fn auth_failure() -> AppError {
    AppError::AuthenticationFailed
}

/// Tokens are stateless; the client drops its copy.
async fn logout() -> Redirect {
    Redirect::to("/")
}

fn now_millis() -> Result<u128> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis())
}

/// Encode `nonce|timestamp_hex|signature_hex` as URL-safe base64.
fn sign_state(nonce: &str, timestamp_ms: u128, secret: &[u8]) -> Result<String> {
    let payload = format!("{}|{:x}", nonce, timestamp_ms);

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    let signed = format!("{}|{}", payload, hex::encode(signature));
    Ok(URL_SAFE_NO_PAD.encode(signed.as_bytes()))
}

/// Verify signature and age of an OAuth state, returning its nonce.
fn verify_state(state: &str, now_ms: u128, secret: &[u8]) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
    let state_str = String::from_utf8(bytes).ok()?;

    let mut parts = state_str.splitn(3, '|');
    let nonce = parts.next()?;
    let timestamp_hex = parts.next()?;
    let signature = hex::decode(parts.next()?).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(format!("{}|{}", nonce, timestamp_hex).as_bytes());
    if mac.verify_slice(&signature).is_err() {
        tracing::warn!("OAuth state signature mismatch");
        return None;
    }

    let issued = u128::from_str_radix(timestamp_hex, 16).ok()?;
    if issued > now_ms + STATE_FUTURE_SKEW_MS || now_ms.saturating_sub(issued) > STATE_MAX_AGE_MS
    {
        tracing::warn!("OAuth state expired");
        return None;
    }

    if nonce.is_empty() {
        return None;
    }
    Some(nonce.to_string())
}
