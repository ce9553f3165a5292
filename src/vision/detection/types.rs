// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection types

use serde::Serialize;

use super::DetectionError;

/// Box corners in input-image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// One predicted object instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    /// Class label id (see `ClassMap`)
    pub label: i64,
    /// Confidence score (0.0-1.0)
    pub score: f32,
}

impl Detection {
    pub fn new(bbox: BoundingBox, label: i64, score: f32) -> Self {
        Self { bbox, label, score }
    }
}

/// Parallel model outputs for one image, before any threshold is applied
#[derive(Debug, Clone, Default)]
pub struct RawDetections {
    /// Flattened `[N, 4]` boxes (left, top, right, bottom)
    pub boxes: Vec<f32>,
    pub labels: Vec<i64>,
    pub scores: Vec<f32>,
}

impl RawDetections {
    /// Number of detections the model produced
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Zip the parallel outputs into detections
    ///
    /// Fails if the three outputs disagree on the detection count.
    pub fn into_detections(self) -> Result<Vec<Detection>, DetectionError> {
        let count = self.scores.len();

        if self.boxes.len() != count * 4 {
            return Err(DetectionError::InvalidOutput(format!(
                "expected {} box coordinates for {} scores, got {}",
                count * 4,
                count,
                self.boxes.len()
            )));
        }

        if self.labels.len() != count {
            return Err(DetectionError::InvalidOutput(format!(
                "expected {} labels, got {}",
                count,
                self.labels.len()
            )));
        }

        let detections = self
            .boxes
            .chunks_exact(4)
            .zip(self.labels)
            .zip(self.scores)
            .map(|((coords, label), score)| {
                Detection::new(
                    BoundingBox::new(coords[0], coords[1], coords[2], coords[3]),
                    label,
                    score,
                )
            })
            .collect();

        Ok(detections)
    }
}
