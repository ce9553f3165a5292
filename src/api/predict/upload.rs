// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload extraction

use axum::http::StatusCode;
use axum_extra::extract::multipart::{Multipart, MultipartError};
use bytes::Bytes;
use tracing::debug;

use crate::api::errors::ApiError;

/// Preferred form field name for the image
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub field_name: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Pull the image out of a multipart body
///
/// A field named `file` wins. Otherwise the first part carrying a filename
/// is used. Plain form values are ignored.
pub async fn read_upload(mut multipart: Multipart) -> Result<UploadedImage, ApiError> {
    let mut fallback: Option<UploadedImage> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        let is_named_file = field_name.as_deref() == Some(UPLOAD_FIELD);
        if !is_named_file && (file_name.is_none() || fallback.is_some()) {
            debug!("Skipping multipart field {:?}", field_name);
            continue;
        }

        let bytes = field.bytes().await.map_err(multipart_error)?;
        let upload = UploadedImage {
            field_name,
            file_name,
            content_type,
            bytes,
        };

        if is_named_file {
            return Ok(upload);
        }
        fallback = Some(upload);
    }

    fallback.ok_or_else(|| ApiError::ValidationError {
        field: UPLOAD_FIELD.to_string(),
        message: "No file uploaded".to_string(),
    })
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::InvalidRequest(format!("Malformed multipart body: {}", err.body_text()))
    }
}
