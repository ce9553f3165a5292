// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use std::path::PathBuf;

use crate::vision::detection::DevicePreference;

/// Gun Detection API server
#[derive(Parser, Debug, Clone)]
#[command(name = "gun-detection-api")]
#[command(version)]
#[command(about = "Serve a Faster R-CNN gun detector over HTTP", long_about = None)]
pub struct Cli {
    /// Address the HTTP server binds to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    pub listen_addr: String,

    /// Path to the exported detector weights (ONNX graph)
    #[arg(
        long,
        env = "MODEL_WEIGHTS_PATH",
        default_value = "artifacts/models/fasterrcnn.onnx"
    )]
    pub weights_path: PathBuf,

    /// Compute device for inference
    #[arg(long, env = "DEVICE", value_enum, default_value_t = DevicePreference::Auto)]
    pub device: DevicePreference,

    /// Detections must score strictly above this value to be drawn
    #[arg(long, env = "SCORE_THRESHOLD", default_value_t = 0.5)]
    pub score_threshold: f32,

    /// Intra-op threads for the inference session
    #[arg(long, env = "INTRA_THREADS", default_value_t = 4)]
    pub intra_threads: usize,

    /// TrueType font used for detection labels (defaults to the embedded DejaVu Sans)
    #[arg(long, env = "LABEL_FONT_PATH")]
    pub font_path: Option<PathBuf>,

    /// Maximum accepted upload size in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}
