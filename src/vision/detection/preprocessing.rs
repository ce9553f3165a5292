// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for the detector

use image::DynamicImage;
use ndarray::Array3;

/// Convert an image to a `[3, H, W]` f32 tensor in [0, 1]
///
/// Steps:
/// 1. Convert to RGB (alpha and palette modes are flattened)
/// 2. Scale each channel by 1/255
///
/// No resizing or mean/std normalisation: the exported Faster R-CNN graph
/// performs its own transform internally.
pub fn image_to_tensor(image: &DynamicImage) -> Array3<f32> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    Array3::from_shape_fn((3, height as usize, width as usize), |(c, y, x)| {
        rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
    })
}
