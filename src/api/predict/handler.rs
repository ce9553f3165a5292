// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction endpoint handler

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use tracing::{debug, info, warn};

use super::upload::read_upload;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// Number of detections drawn on the returned image
pub const DETECTIONS_HEADER: &str = "x-detections";

/// Server-side decode, inference and encode time
pub const PROCESSING_TIME_HEADER: &str = "x-processing-time-ms";

/// POST /predict/ - Detect guns and return the annotated image
///
/// # Request
/// `multipart/form-data` with the image in a field named `file` (or, failing
/// that, the first part with a filename). Any format the decoder recognises
/// is accepted.
///
/// # Response
/// `image/png` with the input's dimensions. Detections scoring above the
/// threshold are outlined in red and labelled `"<class>: <score>"`. The
/// `X-Detections` header carries how many were drawn.
///
/// # Errors
/// - 400 Bad Request: Not multipart, no file part, or undecodable image
/// - 413 Payload Too Large: Body exceeds the upload limit
/// - 500 Internal Server Error: Inference or encoding failed
pub async fn predict_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let multipart = multipart.map_err(|e| {
        warn!("Rejected predict request: {}", e);
        ApiError::InvalidRequest(e.body_text())
    })?;

    let upload = read_upload(multipart).await?;
    debug!(
        "Predict upload received: field {:?}, file {:?} ({:?}), {} bytes",
        upload.field_name,
        upload.file_name,
        upload.content_type,
        upload.bytes.len()
    );

    let pipeline = state.pipeline.clone();
    let annotated = tokio::task::spawn_blocking(move || pipeline.run(&upload.bytes))
        .await
        .map_err(|e| ApiError::InternalError(format!("Prediction task failed: {}", e)))?
        .map_err(|e| {
            warn!("Prediction failed: {}", e);
            ApiError::from(e)
        })?;

    info!(
        "Returning {}x{} annotated image ({} detections, {}ms)",
        annotated.width, annotated.height, annotated.detections_drawn, annotated.processing_time_ms
    );

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (
                HeaderName::from_static(DETECTIONS_HEADER),
                HeaderValue::from(annotated.detections_drawn),
            ),
            (
                HeaderName::from_static(PROCESSING_TIME_HEADER),
                HeaderValue::from(annotated.processing_time_ms),
            ),
        ],
        annotated.png,
    )
        .into_response())
}
