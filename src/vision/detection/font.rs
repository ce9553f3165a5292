// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Glyph rendering for detection labels
//!
//! DejaVu Sans is compiled into the binary and used unless another TrueType
//! font is configured. A configured font that fails to load falls back to the
//! embedded one.

use ab_glyph::{FontArc, FontRef, FontVec, InvalidFont, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Pixel height of label text
const LABEL_SCALE: f32 = 16.0;

static EMBEDDED_FONT: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/fonts/DejaVuSans.ttf"
));

/// Where the label font was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Embedded,
    File(PathBuf),
}

/// Font used to draw label text
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
    scale: PxScale,
    source: FontSource,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("source", &self.source)
            .field("scale", &self.scale.y)
            .finish_non_exhaustive()
    }
}

impl LabelFont {
    /// The bundled DejaVu Sans
    pub fn embedded() -> Result<Self, InvalidFont> {
        let font = FontRef::try_from_slice(EMBEDDED_FONT)?;
        Ok(Self {
            font: FontArc::new(font),
            scale: PxScale::from(LABEL_SCALE),
            source: FontSource::Embedded,
        })
    }

    /// Load the configured font, falling back to the embedded one
    ///
    /// # Errors
    /// Only if the embedded font itself cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, InvalidFont> {
        let Some(path) = path else {
            info!("No label font configured, using embedded DejaVu Sans");
            return Self::embedded();
        };

        let font = std::fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| FontVec::try_from_vec(bytes).map_err(|e| e.to_string()));

        match font {
            Ok(font) => {
                info!("Loaded label font from {}", path.display());
                Ok(Self {
                    font: FontArc::new(font),
                    scale: PxScale::from(LABEL_SCALE),
                    source: FontSource::File(path.to_path_buf()),
                })
            }
            Err(e) => {
                warn!(
                    "⚠️  Failed to load label font from {}: {}, using embedded font",
                    path.display(),
                    e
                );
                Self::embedded()
            }
        }
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Draw `text` with its top-left corner at `(x, y)`; pixels outside the canvas are clipped
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}
