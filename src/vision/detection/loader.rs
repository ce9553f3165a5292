// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Startup construction of the shared detector
//!
//! A missing weights file is not fatal: the service falls back to an
//! untrained detector and reports itself as degraded on `/health`.

use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{
    Detection, DetectionError, Detector, DetectorHandle, Device, DevicePreference, FasterRcnnModel,
};
use crate::config::ModelConfig;

/// Stand-in for a network without trained weights
///
/// Yields no detections, so every prediction is the unmodified input
/// re-encoded as PNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct UntrainedDetector;

impl Detector for UntrainedDetector {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, DetectionError> {
        debug!(
            "Untrained detector skipping {}x{} image",
            image.width(),
            image.height()
        );
        Ok(Vec::new())
    }
}

/// Build the detector handle once at process start
///
/// # Errors
/// - The weights file exists but cannot be loaded on any permitted device
pub fn load_detector(config: &ModelConfig) -> Result<DetectorHandle, DetectionError> {
    let weights_path = &config.weights_path;

    if !weights_path.exists() {
        warn!(
            "⚠️  Model file not found at {}, using untrained model",
            weights_path.display()
        );
        if let Some(checkpoint) = pytorch_checkpoint_beside(weights_path) {
            warn!(
                "⚠️  Found PyTorch checkpoint {}; export it to ONNX at {} to serve it",
                checkpoint.display(),
                weights_path.display()
            );
        }
        if config.device == DevicePreference::Cuda {
            warn!("CUDA requested but there is no model to place on it");
        }
        return Ok(DetectorHandle::new(
            Arc::new(UntrainedDetector),
            false,
            Device::Cpu,
        ));
    }

    let model = FasterRcnnModel::load(weights_path, config.device, config.intra_threads)?;
    let device = model.device();
    info!(
        "Loaded trained model from {} on {}",
        weights_path.display(),
        device
    );

    Ok(DetectorHandle::new(Arc::new(model), true, device))
}

/// A `.pth` file next to the expected graph, which this runtime cannot load
fn pytorch_checkpoint_beside(weights_path: &Path) -> Option<PathBuf> {
    if weights_path.extension().and_then(|ext| ext.to_str()) == Some("pth") {
        return None;
    }
    let checkpoint = weights_path.with_extension("pth");
    checkpoint.is_file().then_some(checkpoint)
}
