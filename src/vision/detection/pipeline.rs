// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-request prediction flow: decode, detect, annotate, re-encode

use std::time::Instant;
use thiserror::Error;
use tracing::debug;

use super::{Annotator, DetectionError, DetectorHandle};
use crate::vision::image_utils::{decode_image_bytes, encode_png, ImageError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Detection(#[from] DetectionError),
}

impl PipelineError {
    /// Whether the failure is attributable to the uploaded bytes
    pub fn is_client_error(&self) -> bool {
        match self {
            PipelineError::Image(e) => e.is_client_error(),
            PipelineError::Detection(_) => false,
        }
    }
}

/// Result of a successful prediction
#[derive(Debug, Clone)]
pub struct AnnotatedImage {
    /// PNG-encoded annotated image
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Number of detections that cleared the threshold
    pub detections_drawn: usize,
    pub processing_time_ms: u64,
}

/// Shared, read-only prediction pipeline
#[derive(Debug)]
pub struct DetectionPipeline {
    detector: DetectorHandle,
    annotator: Annotator,
    max_image_bytes: usize,
}

impl DetectionPipeline {
    pub fn new(detector: DetectorHandle, annotator: Annotator, max_image_bytes: usize) -> Self {
        Self {
            detector,
            annotator,
            max_image_bytes,
        }
    }

    pub fn detector(&self) -> &DetectorHandle {
        &self.detector
    }

    /// Run one prediction over raw uploaded bytes
    ///
    /// Blocking: decoding, inference and encoding all run on the caller's
    /// thread. Async callers should go through `spawn_blocking`.
    pub fn run(&self, bytes: &[u8]) -> Result<AnnotatedImage, PipelineError> {
        let start = Instant::now();

        let (image, info) = decode_image_bytes(bytes, self.max_image_bytes)?;
        debug!(
            "Decoded {:?} image: {}x{}, {} bytes",
            info.format, info.width, info.height, info.size_bytes
        );

        let detections = self.detector.detect(&image)?;
        let detections_drawn = detections
            .iter()
            .filter(|d| self.annotator.is_visible(d))
            .count();

        let annotated = self.annotator.annotate(&image, &detections);
        let png = encode_png(&annotated)?;

        let processing_time_ms = start.elapsed().as_millis() as u64;
        debug!(
            "Prediction complete: {} of {} detections drawn, {}ms",
            detections_drawn,
            detections.len(),
            processing_time_ms
        );

        Ok(AnnotatedImage {
            png,
            width: annotated.width(),
            height: annotated.height(),
            detections_drawn,
            processing_time_ms,
        })
    }
}
