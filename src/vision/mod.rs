// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module
//!
//! This module provides:
//! - Image decoding and PNG re-encoding for uploads
//! - Gun detection with a Faster R-CNN model exported to ONNX
//! - Annotation of detections onto the uploaded image

pub mod detection;
pub mod image_utils;

pub use image_utils::{decode_image_bytes, detect_format, encode_png, ImageError, ImageInfo};
