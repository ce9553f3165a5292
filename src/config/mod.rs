// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration
//!
//! `ServiceConfig` is the validated form of the CLI/environment settings and is
//! resolved once at startup.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::vision::detection::{DevicePreference, DEFAULT_SCORE_THRESHOLD};

/// Default location of the exported detector weights
pub const DEFAULT_WEIGHTS_PATH: &str = "artifacts/models/fasterrcnn.onnx";

/// Default maximum upload size (10MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Settings for building the detector
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Path to the weights file; a missing file selects the untrained fallback
    pub weights_path: PathBuf,
    /// Requested compute device
    pub device: DevicePreference,
    /// Intra-op threads for the inference session
    pub intra_threads: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weights_path: PathBuf::from(DEFAULT_WEIGHTS_PATH),
            device: DevicePreference::Auto,
            intra_threads: 4,
        }
    }
}

/// Settings for drawing detections
#[derive(Debug, Clone)]
pub struct AnnotationConfig {
    /// Detections must score strictly above this to be drawn (0.0-1.0)
    pub score_threshold: f32,
    /// Optional TrueType font for labels
    pub font_path: Option<PathBuf>,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            font_path: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen_addr: SocketAddr,
    pub model: ModelConfig,
    pub annotation: AnnotationConfig,
    pub max_upload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            model: ModelConfig::default(),
            annotation: AnnotationConfig::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServiceConfig {
    /// Validate CLI/environment settings
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let listen_addr: SocketAddr = cli
            .listen_addr
            .parse()
            .with_context(|| format!("Invalid listen address: {}", cli.listen_addr))?;

        if !cli.score_threshold.is_finite() {
            anyhow::bail!("Score threshold must be a finite number");
        }

        if cli.max_upload_bytes == 0 {
            anyhow::bail!("Maximum upload size must be greater than zero");
        }

        Ok(Self {
            listen_addr,
            model: ModelConfig {
                weights_path: cli.weights_path,
                device: cli.device,
                intra_threads: cli.intra_threads.max(1),
            },
            annotation: AnnotationConfig {
                score_threshold: cli.score_threshold.clamp(0.0, 1.0),
                font_path: cli.font_path,
            },
            max_upload_bytes: cli.max_upload_bytes,
        })
    }
}
