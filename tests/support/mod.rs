// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared helpers for integration tests
#![allow(dead_code)]

use gun_detection_api::{
    api::AppState,
    vision::detection::{
        Annotator, BoundingBox, Detection, DetectionError, DetectionPipeline, Detector,
        DetectorHandle, Device, UntrainedDetector,
    },
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use mockall::mock;
use std::io::Cursor;
use std::sync::Arc;

pub const BOUNDARY: &str = "gun-detection-test-boundary";
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

mock! {
    pub Detector {}

    impl Detector for Detector {
        fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, DetectionError>;
    }
}

/// Detector that always returns the given detections
pub fn fixed_detector(detections: Vec<Detection>) -> MockDetector {
    let mut detector = MockDetector::new();
    detector
        .expect_detect()
        .returning(move |_| Ok(detections.clone()));
    detector
}

pub fn gun(left: f32, top: f32, right: f32, bottom: f32, score: f32) -> Detection {
    Detection::new(BoundingBox::new(left, top, right, bottom), 1, score)
}

pub fn state_with(detector: Arc<dyn Detector>, weights_loaded: bool) -> AppState {
    let handle = DetectorHandle::new(detector, weights_loaded, Device::Cpu);
    let pipeline = DetectionPipeline::new(handle, Annotator::with_defaults().unwrap(), MAX_UPLOAD_BYTES);
    AppState::new(pipeline, MAX_UPLOAD_BYTES)
}

pub fn untrained_state() -> AppState {
    state_with(Arc::new(UntrainedDetector), false)
}

/// Solid gray test image
pub fn gray_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([128, 128, 128]))
}

pub fn encode(image: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image.clone())
        .write_to(&mut buffer, format)
        .unwrap();
    buffer.into_inner()
}

/// Single-part multipart/form-data body
pub fn multipart_body(field: &str, file_name: Option<&str>, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    match file_name {
        Some(name) => body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                field, name
            )
            .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field).as_bytes(),
        ),
    }
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
