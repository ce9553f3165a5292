// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /health tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use gun_detection_api::api::{create_app, AppState};
use std::sync::Arc;
use tower::util::ServiceExt;

use crate::support::{fixed_detector, state_with, untrained_state};

async fn health_json(state: AppState) -> serde_json::Value {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = create_app(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_degraded_without_weights() {
    let json = health_json(untrained_state()).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["weightsLoaded"], false);
    assert_eq!(json["device"], "cpu");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_ok_with_weights() {
    let json = health_json(state_with(Arc::new(fixed_detector(vec![])), true)).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["weightsLoaded"], true);
}
