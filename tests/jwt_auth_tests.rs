// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT compatibility tests.
//!
//! Tokens handed out at login must decode with the claim layout clients and
//! the auth middleware rely on; tokens minted elsewhere with the same layout
//! and key must be accepted.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use portfolio_api::middleware::auth::{create_jwt, verify_jwt, Principal, TOKEN_TTL_SECS};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Claims structure that clients see.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    name: String,
    iat: u64,
    exp: u64,
}

const KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

fn principal() -> Principal {
    Principal {
        identity: "104522334455667788990".to_string(),
        display_name: "Grace Hopper".to_string(),
    }
}

#[test]
fn test_issued_token_claim_layout() {
    let token = create_jwt(&principal(), KEY).unwrap();

    let data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(KEY),
        &Validation::new(Algorithm::HS256),
    )
    .expect("issued token must decode with the public claim layout");

    assert_eq!(data.header.alg, Algorithm::HS256);
    assert_eq!(data.claims.sub, "104522334455667788990");
    assert_eq!(data.claims.name, "Grace Hopper");
    assert_eq!(data.claims.exp - data.claims.iat, TOKEN_TTL_SECS);
}

#[test]
fn test_externally_minted_token_accepted() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let claims = Claims {
        sub: "104522334455667788990".to_string(),
        name: "Grace Hopper".to_string(),
        iat: now,
        exp: now + 60,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(KEY),
    )
    .unwrap();

    assert_eq!(verify_jwt(&token, KEY).unwrap(), principal());
}

#[test]
fn test_other_algorithm_rejected() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let claims = Claims {
        sub: "x".to_string(),
        name: "x".to_string(),
        iat: now,
        exp: now + 60,
    };
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(KEY),
    )
    .unwrap();

    assert!(verify_jwt(&token, KEY).is_err());
}
