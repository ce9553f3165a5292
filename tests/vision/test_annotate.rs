// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Annotation tests
//!
//! Verifies box outlines, label placement and threshold filtering on
//! synthetic images.

use gun_detection_api::vision::detection::{Annotator, ClassMap, Detection, LabelFont, BOX_COLOR};
use image::{DynamicImage, Rgb, RgbImage, RgbaImage};

use crate::support::{gray_image, gun};

const GRAY: Rgb<u8> = Rgb([128, 128, 128]);

/// Anti-aliased glyph pixel that is mostly label color over the gray background
fn is_red_ink(pixel: &Rgb<u8>) -> bool {
    pixel[0] > 200 && pixel[1] < 64 && pixel[2] < 64
}

fn annotate(image: &RgbImage, detections: &[Detection]) -> RgbImage {
    Annotator::with_defaults().unwrap().annotate(&DynamicImage::ImageRgb8(image.clone()), detections)
}

#[test]
fn test_no_detections_leaves_image_unchanged() {
    let source = gray_image(40, 30);
    assert_eq!(annotate(&source, &[]), source);
}

#[test]
fn test_scores_at_threshold_are_not_drawn() {
    let source = gray_image(100, 100);
    let detections = [gun(20.0, 40.0, 80.0, 90.0, 0.5), gun(5.0, 25.0, 30.0, 50.0, 0.12)];
    assert_eq!(annotate(&source, &detections), source);
}

#[test]
fn test_box_outline_is_three_pixels_wide() {
    let output = annotate(&gray_image(100, 100), &[gun(20.0, 40.0, 80.0, 90.0, 0.87)]);

    // Left edge, halfway down: insets 0-2 are red, inset 3 is untouched
    for x in 20..23 {
        assert_eq!(*output.get_pixel(x, 65), BOX_COLOR, "left edge x={}", x);
    }
    assert_eq!(*output.get_pixel(23, 65), GRAY);

    // Right edge mirrors the left
    for x in 78..=80 {
        assert_eq!(*output.get_pixel(x, 65), BOX_COLOR, "right edge x={}", x);
    }
    assert_eq!(*output.get_pixel(77, 65), GRAY);

    // Bottom edge
    for y in 88..=90 {
        assert_eq!(*output.get_pixel(50, y), BOX_COLOR, "bottom edge y={}", y);
    }

    // Outside the box
    assert_eq!(*output.get_pixel(19, 65), GRAY);
    assert_eq!(*output.get_pixel(50, 95), GRAY);
}

#[test]
fn test_label_drawn_above_box() {
    let output = annotate(&gray_image(100, 100), &[gun(20.0, 40.0, 80.0, 90.0, 0.87)]);

    // Box top is y=40; the label sits in the 20 rows above it
    let label_pixels = (20..40u32)
        .flat_map(|y| (20..100u32).map(move |x| (x, y)))
        .filter(|&(x, y)| is_red_ink(output.get_pixel(x, y)))
        .count();
    assert!(label_pixels > 20, "expected label glyphs above the box");
}

#[test]
fn test_label_text_uses_class_names() {
    let annotator = Annotator::with_defaults().unwrap();
    let detections = [
        gun(0.0, 0.0, 10.0, 10.0, 0.874),
        Detection::new(gun(0.0, 0.0, 10.0, 10.0, 0.9).bbox, 5, 0.9),
        Detection::new(gun(0.0, 0.0, 10.0, 10.0, 0.9).bbox, 0, 0.61),
    ];

    assert_eq!(
        annotator.labels(&detections),
        vec!["gun: 0.87", "unknown: 0.90", "background: 0.61"]
    );
}

#[test]
fn test_custom_threshold() {
    let annotator = Annotator::new(ClassMap::default(), 0.8, LabelFont::embedded().unwrap());
    let labels = annotator.labels(&[gun(0.0, 0.0, 1.0, 1.0, 0.79), gun(0.0, 0.0, 1.0, 1.0, 0.81)]);
    assert_eq!(labels, vec!["gun: 0.81"]);
}

#[test]
fn test_alpha_input_is_flattened_to_rgb() {
    let source = DynamicImage::ImageRgba8(RgbaImage::new(12, 9));
    let output = Annotator::with_defaults().unwrap().annotate(&source, &[]);
    assert_eq!(output.dimensions(), (12, 9));
    assert_eq!(output, source.to_rgb8());
}

#[test]
fn test_boxes_partially_outside_are_clipped() {
    let output = annotate(&gray_image(50, 50), &[gun(-20.0, -20.0, 30.0, 30.0, 0.95)]);

    assert_eq!(output.dimensions(), (50, 50));
    assert_eq!(*output.get_pixel(30, 10), BOX_COLOR);
    assert_eq!(*output.get_pixel(10, 30), BOX_COLOR);
    assert_eq!(*output.get_pixel(40, 40), GRAY);
}
