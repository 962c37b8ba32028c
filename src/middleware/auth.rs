// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token authentication.

use crate::error::AppError;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Token lifetime in seconds.
pub const TOKEN_TTL_SECS: u64 = 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (provider identity)
    pub sub: String,
    /// Display name at login
    pub name: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Authenticated caller, attached to the request by [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub identity: String,
    pub display_name: String,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            identity: user.identity.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

/// Middleware that requires a valid bearer token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            tracing::debug!(path = %request.uri().path(), "Missing bearer token");
            AppError::Unauthorized
        })?;

    let principal = verify_jwt(token, &state.config.jwt_secret)?;

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Mint a token for `principal`.
pub fn create_jwt(principal: &Principal, signing_key: &[u8]) -> anyhow::Result<String> {
    let now = unix_now()?;

    let claims = Claims {
        sub: principal.identity.clone(),
        name: principal.display_name.clone(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Check signature and expiry, returning the principal the token names.
pub fn verify_jwt(token: &str, signing_key: &[u8]) -> Result<Principal, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(signing_key), &validation)
        .map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AppError::InvalidToken
        })?;

    if data.claims.sub.is_empty() {
        return Err(AppError::InvalidToken);
    }

    Ok(Principal {
        identity: data.claims.sub,
        display_name: data.claims.name,
    })
}

fn unix_now() -> anyhow::Result<u64> {
    use std::time::{SystemTime, UNIX_EPOCH};
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}
