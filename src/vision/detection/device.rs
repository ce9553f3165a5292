// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Compute device selection
//!
//! The device is settled once at startup, by whichever execution provider
//! actually accepts the session. It is never re-evaluated per request.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use super::DetectionError;

/// Device requested through configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DevicePreference {
    /// CUDA when a session can be built on it, otherwise CPU
    Auto,
    Cpu,
    Cuda,
}

/// Device the model actually runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Cpu,
    Cuda,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda => write!(f, "cuda"),
        }
    }
}

impl DevicePreference {
    /// Build something on the preferred device, falling back for `Auto`
    ///
    /// `build` is called with `Device::Cuda` first under `Auto`; if that
    /// fails it is called again with `Device::Cpu`. Explicit preferences get
    /// exactly one attempt. Returns the built value with the device it
    /// succeeded on.
    pub fn build_with_fallback<T, F>(self, mut build: F) -> Result<(T, Device), DetectionError>
    where
        F: FnMut(Device) -> Result<T, DetectionError>,
    {
        let device = match self {
            DevicePreference::Cpu => Device::Cpu,
            DevicePreference::Cuda => Device::Cuda,
            DevicePreference::Auto => {
                info!("   Attempting CUDA execution provider...");
                match build(Device::Cuda) {
                    Ok(value) => {
                        info!("✅ CUDA execution provider initialized successfully!");
                        return Ok((value, Device::Cuda));
                    }
                    Err(e) => {
                        warn!("⚠️  CUDA execution provider failed: {}", e);
                        warn!("   Falling back to CPU execution provider");
                        Device::Cpu
                    }
                }
            }
        };

        build(device).map(|value| (value, device))
    }
}
