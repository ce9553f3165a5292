// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction endpoint module
//!
//! Provides POST /predict/ for annotating gun detections on an uploaded image.

pub mod handler;
pub mod upload;

pub use handler::{predict_handler, DETECTIONS_HEADER, PROCESSING_TIME_HEADER};
pub use upload::{read_upload, UploadedImage, UPLOAD_FIELD};
