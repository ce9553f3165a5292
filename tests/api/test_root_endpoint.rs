// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET / tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use gun_detection_api::api::create_app;
use tower::util::ServiceExt; // for `oneshot`

use crate::support::untrained_state;

#[tokio::test]
async fn test_root_returns_welcome_message() {
    let app = create_app(untrained_state());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"message": "Welcome to the Guns Object Detection API"})
    );
}

#[tokio::test]
async fn test_root_rejects_post() {
    let app = create_app(untrained_state());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
