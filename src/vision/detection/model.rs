// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Faster R-CNN detection model
//!
//! Wraps an ONNX Runtime session over the fine-tuned network exported from
//! torchvision (`fasterrcnn_resnet50_fpn` with a 2-class box predictor).
//!
//! Expected graph signature:
//! - input 0: image tensor `[3, H, W]`, f32 in [0, 1]
//! - output 0: boxes `[N, 4]` f32 (left, top, right, bottom)
//! - output 1: labels `[N]` i64
//! - output 2: scores `[N]` f32

use image::DynamicImage;
use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider};
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::preprocessing::image_to_tensor;
use super::{Detection, DetectionError, Detector, Device, DevicePreference, RawDetections};

const BOXES_OUTPUT: usize = 0;
const LABELS_OUTPUT: usize = 1;
const SCORES_OUTPUT: usize = 2;

/// Faster R-CNN model served through ONNX Runtime
#[derive(Clone)]
pub struct FasterRcnnModel {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// Model input name
    input_name: String,
    /// Device the session executes on
    device: Device,
}

impl std::fmt::Debug for FasterRcnnModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FasterRcnnModel")
            .field("input_name", &self.input_name)
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl FasterRcnnModel {
    /// Load the exported detector from a file
    ///
    /// # Arguments
    /// - `model_path`: Path to the ONNX graph with trained weights
    /// - `preference`: Requested compute device; `Auto` tries CUDA then CPU
    /// - `intra_threads`: Intra-op thread count for the session
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found
    /// - ONNX Runtime initialization fails on every permitted device
    /// - The graph has no inputs or fewer than three outputs
    pub fn load<P: AsRef<Path>>(
        model_path: P,
        preference: DevicePreference,
        intra_threads: usize,
    ) -> Result<Self, DetectionError> {
        let model_path = model_path.as_ref();
        let load_error = |message: String| DetectionError::ModelLoad {
            path: model_path.to_path_buf(),
            message,
        };

        if !model_path.exists() {
            return Err(load_error("file not found".to_string()));
        }

        info!(
            "Loading Faster R-CNN model from {} (device: {:?})",
            model_path.display(),
            preference
        );

        let (session, device) = preference.build_with_fallback(|device| {
            Self::session_builder(device)
                .and_then(|builder| builder.with_optimization_level(GraphOptimizationLevel::Level3))
                .and_then(|builder| builder.with_intra_threads(intra_threads))
                .and_then(|builder| builder.commit_from_file(model_path))
                .map_err(|e| load_error(format!("{} session: {}", device, e)))
        })?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| load_error("graph has no inputs".to_string()))?;

        if session.outputs.len() <= SCORES_OUTPUT {
            return Err(load_error(format!(
                "expected boxes, labels and scores outputs, graph has {}",
                session.outputs.len()
            )));
        }

        debug!(
            "Detection model loaded - input: {}, outputs: {:?}",
            input_name,
            session
                .outputs
                .iter()
                .map(|output| output.name.as_str())
                .collect::<Vec<_>>()
        );

        info!("✅ Faster R-CNN model loaded successfully ({})", device);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            device,
        })
    }

    /// Session builder pinned to one execution provider
    ///
    /// CUDA registration errors are surfaced rather than silently running on
    /// CPU, so the recorded device is always the one executing the graph.
    fn session_builder(device: Device) -> ort::Result<SessionBuilder> {
        let builder = Session::builder()?;
        match device {
            Device::Cuda => builder.with_execution_providers([CUDAExecutionProvider::default()
                .build()
                .error_on_failure()]),
            Device::Cpu => {
                builder.with_execution_providers([CPUExecutionProvider::default().build()])
            }
        }
    }

    pub fn device(&self) -> Device {
        self.device
    }

    /// Run the forward pass and copy the outputs back to host memory
    pub fn infer(&self, image: &DynamicImage) -> Result<RawDetections, DetectionError> {
        let tensor = image_to_tensor(image);
        let input_value = Value::from_array(tensor)
            .map_err(|e| DetectionError::Inference(format!("failed to create input tensor: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| DetectionError::SessionPoisoned)?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .map_err(|e| DetectionError::Inference(e.to_string()))?;

        let boxes = outputs[BOXES_OUTPUT]
            .try_extract_array::<f32>()
            .map_err(|e| DetectionError::InvalidOutput(format!("boxes: {}", e)))?;
        let labels = outputs[LABELS_OUTPUT]
            .try_extract_array::<i64>()
            .map_err(|e| DetectionError::InvalidOutput(format!("labels: {}", e)))?;
        let scores = outputs[SCORES_OUTPUT]
            .try_extract_array::<f32>()
            .map_err(|e| DetectionError::InvalidOutput(format!("scores: {}", e)))?;

        debug!(
            "Detection output shapes - boxes: {:?}, labels: {:?}, scores: {:?}",
            boxes.shape(),
            labels.shape(),
            scores.shape()
        );

        Ok(RawDetections {
            boxes: boxes.iter().copied().collect(),
            labels: labels.iter().copied().collect(),
            scores: scores.iter().copied().collect(),
        })
    }
}

impl Detector for FasterRcnnModel {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, DetectionError> {
        let raw = self.infer(image)?;
        debug!("Model produced {} raw detections", raw.len());
        raw.into_detections()
    }
}
