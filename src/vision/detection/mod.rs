// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gun detection with a fine-tuned Faster R-CNN
//!
//! Components:
//! - `device` - Compute device preference and CUDA-to-CPU fallback
//! - `types` - Detections and raw model output
//! - `class_map` - Label id to class name mapping
//! - `preprocessing` - Image to tensor conversion
//! - `model` - ONNX Runtime session for the exported network
//! - `loader` - Startup construction of the shared detector handle
//! - `font` - Embedded TrueType font for detection labels
//! - `annotate` - Threshold filtering and box/label overlays
//! - `pipeline` - Decode, detect, annotate and re-encode

pub mod annotate;
pub mod class_map;
pub mod device;
pub mod font;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod preprocessing;
pub mod types;

use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub use annotate::{label_text, Annotator, BOX_COLOR, BOX_WIDTH, DEFAULT_SCORE_THRESHOLD};
pub use class_map::ClassMap;
pub use device::{Device, DevicePreference};
pub use font::{FontSource, LabelFont};
pub use loader::{load_detector, UntrainedDetector};
pub use model::FasterRcnnModel;
pub use pipeline::{AnnotatedImage, DetectionPipeline, PipelineError};
pub use types::{BoundingBox, Detection, RawDetections};

/// Errors raised while building or running the detector
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Failed to load detection model from {path}: {message}")]
    ModelLoad { path: PathBuf, message: String },

    #[error("Detection inference failed: {0}")]
    Inference(String),

    #[error("Unexpected model output: {0}")]
    InvalidOutput(String),

    #[error("Detection session lock poisoned")]
    SessionPoisoned,
}

/// A model that turns an image into raw, unfiltered detections
///
/// Implementations must be safe to call from several request threads at once.
pub trait Detector: Send + Sync {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, DetectionError>;
}

/// Immutable handle to the detector built at startup
///
/// Cheap to clone; every request shares the same underlying model.
#[derive(Clone)]
pub struct DetectorHandle {
    detector: Arc<dyn Detector>,
    weights_loaded: bool,
    device: Device,
}

impl std::fmt::Debug for DetectorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectorHandle")
            .field("weights_loaded", &self.weights_loaded)
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl DetectorHandle {
    pub fn new(detector: Arc<dyn Detector>, weights_loaded: bool, device: Device) -> Self {
        Self {
            detector,
            weights_loaded,
            device,
        }
    }

    /// Whether trained weights were found at startup
    pub fn weights_loaded(&self) -> bool {
        self.weights_loaded
    }

    /// Device the model was placed on
    pub fn device(&self) -> Device {
        self.device
    }

    pub fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, DetectionError> {
        self.detector.detect(image)
    }
}
