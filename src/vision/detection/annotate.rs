// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection overlays
//!
//! Draws a red outline and a `"<class>: <score>"` label for every detection
//! scoring above the threshold. Everything else is dropped silently.

use ab_glyph::InvalidFont;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use super::{ClassMap, Detection, LabelFont};
use crate::config::AnnotationConfig;

/// Detections must score strictly above this to be drawn
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.5;

/// Outline and label color
pub const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Outline thickness in pixels, drawn inward from the box edges
pub const BOX_WIDTH: u32 = 3;

/// Labels sit this many pixels above the box's top edge
const LABEL_OFFSET_Y: i32 = 20;

const LABEL_CLAMP: i32 = 1 << 16;

/// Format a detection label, e.g. `"gun: 0.87"`
pub fn label_text(class_name: &str, score: f32) -> String {
    format!("{}: {:.2}", class_name, score)
}

#[derive(Debug)]
pub struct Annotator {
    class_map: ClassMap,
    threshold: f32,
    font: LabelFont,
}

impl Annotator {
    pub fn new(class_map: ClassMap, threshold: f32, font: LabelFont) -> Self {
        Self {
            class_map,
            threshold,
            font,
        }
    }

    /// Default classes and threshold with the embedded font
    pub fn with_defaults() -> Result<Self, InvalidFont> {
        Ok(Self::new(
            ClassMap::default(),
            DEFAULT_SCORE_THRESHOLD,
            LabelFont::embedded()?,
        ))
    }

    pub fn from_config(config: &AnnotationConfig) -> Result<Self, InvalidFont> {
        Ok(Self::new(
            ClassMap::default(),
            config.score_threshold,
            LabelFont::load(config.font_path.as_deref())?,
        ))
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether a detection will be drawn
    pub fn is_visible(&self, detection: &Detection) -> bool {
        detection.score > self.threshold
    }

    /// Label strings for the detections that will be drawn, in input order
    pub fn labels(&self, detections: &[Detection]) -> Vec<String> {
        detections
            .iter()
            .filter(|d| self.is_visible(d))
            .map(|d| label_text(self.class_map.name(d.label), d.score))
            .collect()
    }

    /// Draw visible detections onto an RGB copy of `image`
    ///
    /// The input is never mutated. With nothing above the threshold the
    /// result equals `image.to_rgb8()`.
    pub fn annotate(&self, image: &DynamicImage, detections: &[Detection]) -> RgbImage {
        let mut canvas = image.to_rgb8();
        let mut drawn = 0;

        for detection in detections.iter().filter(|d| self.is_visible(d)) {
            draw_box(&mut canvas, detection);

            let text = label_text(self.class_map.name(detection.label), detection.score);
            let (x, y) = label_origin(&canvas, detection);
            self.font.draw(&mut canvas, BOX_COLOR, x, y, &text);
            drawn += 1;
        }

        debug!(
            "Annotated {} of {} detections (threshold {:.2})",
            drawn,
            detections.len(),
            self.threshold
        );

        canvas
    }
}

/// Top-left corner of the label, kept within a bounded range of the canvas
fn label_origin(canvas: &RgbImage, detection: &Detection) -> (i32, i32) {
    let x = (detection.bbox.left.round() as i32).clamp(-LABEL_CLAMP, canvas.width() as i32);
    let y = (detection.bbox.top.round() as i32)
        .clamp(-LABEL_CLAMP, canvas.height() as i32 + LABEL_OFFSET_Y)
        - LABEL_OFFSET_Y;
    (x, y)
}

fn draw_box(canvas: &mut RgbImage, detection: &Detection) {
    // Clamp just outside the canvas so off-image edges stay invisible
    let margin = BOX_WIDTH as i32;
    let clamp_x = |v: f32| (v.round() as i32).clamp(-margin, canvas.width() as i32 + margin);
    let clamp_y = |v: f32| (v.round() as i32).clamp(-margin, canvas.height() as i32 + margin);

    let left = clamp_x(detection.bbox.left);
    let right = clamp_x(detection.bbox.right);
    let top = clamp_y(detection.bbox.top);
    let bottom = clamp_y(detection.bbox.bottom);

    for inset in 0..BOX_WIDTH as i32 {
        let (x0, y0) = (left + inset, top + inset);
        let (x1, y1) = (right - inset, bottom - inset);
        if x1 < x0 || y1 < y0 {
            break;
        }
        let rect = Rect::at(x0, y0).of_size((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32);
        draw_hollow_rect_mut(canvas, rect, BOX_COLOR);
    }
}
