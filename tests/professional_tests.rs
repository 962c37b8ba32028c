// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public pages: professional profile, home page, health, unmatched routes.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_professional_is_stable_across_calls() {
    let (app, _) = common::create_test_app();

    let first = app.clone().oneshot(get("/professional")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first = common::body_json(first).await;

    let second = common::body_json(app.oneshot(get("/professional")).await.unwrap()).await;

    assert_eq!(first["professionalName"], "Tinny Bothepha Mosimanyana");
    assert_eq!(first, second);
    assert!(first["linkedInLink"]["link"].is_string());
    assert!(first["base64Image"].as_str().unwrap().len() > 100);
}

#[tokio::test]
async fn test_professional_does_not_touch_store() {
    let (app, _) = common::create_offline_app();

    let response = app.oneshot(get("/professional")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_home_page_links_to_login() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = common::body_text(response).await;
    assert!(html.contains("href=\"/auth/google\""));
    assert!(html.contains("Login with Google"));
}

#[tokio::test]
async fn test_health() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_unmatched_route_is_json_404() {
    let (app, _) = common::create_test_app();

    for uri in ["/nope", "/api", "/api/unknown", "/professional/extra"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = common::body_json(response).await;
        assert_eq!(body["error"], "not_found");
    }
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let (app, _) = common::create_test_app();

    for uri in ["/", "/professional", "/nope"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
    }
}
