// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use gun_detection_api::{
    api::{start_server, AppState},
    cli::Cli,
    config::ServiceConfig,
    version,
    vision::detection::{load_detector, Annotator, DetectionPipeline},
};
use std::env;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("🚀 Starting {}", version::get_version_string());
    info!("📦 BUILD VERSION: {}", version::VERSION);

    let config = ServiceConfig::from_cli(Cli::parse())?;

    let detector = load_detector(&config.model).context("Failed to initialize detector")?;
    if detector.weights_loaded() {
        info!("✅ Detector ready on {}", detector.device());
    } else {
        warn!(
            "⚠️  Serving without trained weights on {}; predictions will contain no detections",
            detector.device()
        );
    }

    let annotator =
        Annotator::from_config(&config.annotation).context("Failed to load label font")?;
    info!(
        "Drawing detections with score > {:.2}",
        annotator.threshold()
    );

    let pipeline = DetectionPipeline::new(detector, annotator, config.max_upload_bytes);
    let state = AppState::new(pipeline, config.max_upload_bytes);

    start_server(state, config.listen_addr).await
}
