// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::http_server::AppState;
use crate::vision::detection::Device;

pub const WELCOME_MESSAGE: &str = "Welcome to the Guns Object Detection API";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `"ok"` with trained weights, `"degraded"` on the untrained fallback
    pub status: String,
    pub weights_loaded: bool,
    pub device: Device,
    pub version: String,
}

/// GET / - Static welcome message
pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

/// GET /health - Model and build status
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let detector = state.pipeline.detector();
    let status = if detector.weights_loaded() {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        weights_loaded: detector.weights_loaded(),
        device: detector.device(),
        version: crate::version::VERSION_NUMBER.to_string(),
    })
}
