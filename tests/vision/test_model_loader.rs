// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Detector loading tests
//!
//! Real weights are not available in CI, so these cover the fallback and
//! failure paths only.

use gun_detection_api::{
    config::ModelConfig,
    vision::detection::{load_detector, DetectionError, Device, DevicePreference},
};
use image::DynamicImage;

use crate::support::gray_image;

fn cpu_config(weights_path: std::path::PathBuf) -> ModelConfig {
    ModelConfig {
        weights_path,
        device: DevicePreference::Cpu,
        intra_threads: 1,
    }
}

#[test]
fn test_missing_weights_selects_untrained_detector() {
    let dir = tempfile::tempdir().unwrap();
    let handle = load_detector(&cpu_config(dir.path().join("fasterrcnn.onnx"))).unwrap();

    assert!(!handle.weights_loaded());
    assert_eq!(handle.device(), Device::Cpu);

    let image = DynamicImage::ImageRgb8(gray_image(24, 24));
    assert!(handle.detect(&image).unwrap().is_empty());
}

#[test]
fn test_unreadable_weights_fail_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fasterrcnn.onnx");
    std::fs::write(&path, b"PK\x03\x04 this is a pickle archive, not onnx").unwrap();

    let err = load_detector(&cpu_config(path.clone())).unwrap_err();
    match err {
        DetectionError::ModelLoad { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("unexpected error: {}", other),
    }
}
