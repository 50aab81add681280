// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Circle-gesture classification.
//!
//! Decides whether a completed pencil/pen stroke is a deliberate circle
//! around an option letter, as opposed to ordinary handwriting. The
//! checks run on the raw pixel path, in order:
//!
//! 1. enough points to be a drawn shape;
//! 2. bounding box large enough and not too elongated;
//! 3. the path closes on itself;
//! 4. point-to-centroid distances are radially regular.
//!
//! Strokes that pass are hit-tested by their bounding-box center.

use crate::util::geometry;
use egui::Pos2;

/// Minimum samples for a stroke to qualify as a shape at all.
const MIN_CIRCLE_POINTS: usize = 10;
/// Minimum bounding-box dimension in pixels; anything smaller is
/// handwriting detail, not an intentional circle.
const MIN_DIAMETER: f32 = 12.0;
/// Accepted width/height band; outside it the stroke is too elongated.
const MIN_ASPECT: f32 = 0.33;
const MAX_ASPECT: f32 = 3.0;
/// A circle's endpoints must come back within this fraction of the
/// bounding-box diagonal of each other.
const MAX_CLOSURE_RATIO: f32 = 0.8;
/// Radial regularity: std deviation of centroid distances relative to
/// their mean. Scribbles and straight lines sit well above this.
const MAX_RADIAL_DEVIATION: f32 = 0.45;

/// Classify a pixel path as a circle gesture.
pub fn is_circle(points: &[Pos2]) -> bool {
    if points.len() < MIN_CIRCLE_POINTS {
        return false;
    }

    let Some(bbox) = geometry::bounding_box(points) else {
        return false;
    };
    if bbox.width() < MIN_DIAMETER || bbox.height() < MIN_DIAMETER {
        return false;
    }
    let aspect = bbox.width() / bbox.height();
    if !(MIN_ASPECT..=MAX_ASPECT).contains(&aspect) {
        return false;
    }

    let diagonal = geometry::distance(bbox.min, bbox.max);
    let closure = geometry::distance(points[0], points[points.len() - 1]);
    if closure > diagonal * MAX_CLOSURE_RATIO {
        return false;
    }

    let Some(center) = geometry::centroid(points) else {
        return false;
    };
    let radii: Vec<f32> = points.iter().map(|p| geometry::distance(*p, center)).collect();
    let mean = radii.iter().sum::<f32>() / radii.len() as f32;
    if mean <= f32::EPSILON {
        return false;
    }
    let variance = radii.iter().map(|r| (r - mean) * (r - mean)).sum::<f32>() / radii.len() as f32;
    let std_dev = variance.sqrt();

    std_dev <= mean * MAX_RADIAL_DEVIATION
}

/// Representative point of a circle gesture for hit-testing: the
/// bounding-box center.
pub fn circle_center(points: &[Pos2]) -> Option<Pos2> {
    geometry::bounding_box(points).map(|bbox| bbox.center())
}
