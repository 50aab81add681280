// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides coordinate transformations between pixel
//! coordinates and normalized coordinates, plus the point-cloud math
//! (distance, bounding box, centroid) and the quadratic smoothing pass
//! used by the freehand renderer.

use crate::models::stroke::Point;
use egui::{pos2, Pos2, Rect, Vec2};

/// Euclidean distance between two pixel points.
pub fn distance(a: Pos2, b: Pos2) -> f32 {
    a.distance(b)
}

/// Convert pixel coordinates to normalized coordinates (0.0 to 1.0).
pub fn normalize_point(pos: Pos2, size: Vec2) -> Point {
    Point::new(pos.x / size.x, pos.y / size.y)
}

/// Convert normalized coordinates to pixel coordinates.
pub fn denormalize_point(point: Point, size: Vec2) -> Pos2 {
    pos2(point.x * size.x, point.y * size.y)
}

/// Denormalize a whole path against a page pixel size.
pub fn denormalize_path(points: &[Point], size: Vec2) -> Vec<Pos2> {
    points.iter().map(|p| denormalize_point(*p, size)).collect()
}

/// Axis-aligned bounding box of a point cloud.
///
/// Returns `None` for an empty slice.
pub fn bounding_box(points: &[Pos2]) -> Option<Rect> {
    let first = *points.first()?;
    let mut rect = Rect::from_min_max(first, first);
    for p in &points[1..] {
        rect.extend_with(*p);
    }
    Some(rect)
}

/// Arithmetic mean of a point cloud.
pub fn centroid(points: &[Pos2]) -> Option<Pos2> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    Some((sum / points.len() as f32).to_pos2())
}

/// Segments used to flatten each quadratic curve during smoothing.
const SMOOTH_SEGMENTS: usize = 8;

/// Smooth a raw pointer path into a denser polyline.
///
/// Quadratic curves are threaded through consecutive segment midpoints,
/// with the raw sample as the control point, then flattened. Paths too
/// short to smooth pass through unchanged.
pub fn smooth_path(raw: &[Pos2]) -> Vec<Pos2> {
    if raw.len() < 3 {
        return raw.to_vec();
    }

    let mut out = Vec::with_capacity(raw.len() * SMOOTH_SEGMENTS);
    out.push(raw[0]);

    for window in raw.windows(3) {
        let from = midpoint(window[0], window[1]);
        let control = window[1];
        let to = midpoint(window[1], window[2]);
        for i in 1..=SMOOTH_SEGMENTS {
            let t = i as f32 / SMOOTH_SEGMENTS as f32;
            out.push(quadratic_at(from, control, to, t));
        }
    }

    out.push(raw[raw.len() - 1]);
    out
}

fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    pos2((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

fn quadratic_at(from: Pos2, control: Pos2, to: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    pos2(
        u * u * from.x + 2.0 * u * t * control.x + t * t * to.x,
        u * u * from.y + 2.0 * u * t * control.y + t * t * to.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_normalize_denormalize_roundtrip() {
        let size = vec2(1920.0, 1080.0);
        let pixel = pos2(960.0, 540.0);

        let normalized = normalize_point(pixel, size);
        let denorm = denormalize_point(normalized, size);

        assert!((denorm.x - pixel.x).abs() < 0.0001);
        assert!((denorm.y - pixel.y).abs() < 0.0001);
    }

    #[test]
    fn test_normalize_corners() {
        let size = vec2(1920.0, 1080.0);

        let tl = normalize_point(pos2(0.0, 0.0), size);
        assert_eq!(tl.x, 0.0);
        assert_eq!(tl.y, 0.0);

        let br = normalize_point(pos2(1920.0, 1080.0), size);
        assert_eq!(br.x, 1.0);
        assert_eq!(br.y, 1.0);
    }

    #[test]
    fn test_bounding_box_and_centroid() {
        let points = [pos2(0.0, 0.0), pos2(4.0, 0.0), pos2(4.0, 2.0), pos2(0.0, 2.0)];
        let bbox = bounding_box(&points).unwrap();
        assert_eq!(bbox.min, pos2(0.0, 0.0));
        assert_eq!(bbox.max, pos2(4.0, 2.0));

        let c = centroid(&points).unwrap();
        assert!((c.x - 2.0).abs() < 0.0001);
        assert!((c.y - 1.0).abs() < 0.0001);

        assert!(bounding_box(&[]).is_none());
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_smooth_path_preserves_endpoints() {
        let raw = vec![pos2(0.0, 0.0), pos2(10.0, 5.0), pos2(20.0, 0.0), pos2(30.0, 5.0)];
        let smoothed = smooth_path(&raw);

        assert_eq!(*smoothed.first().unwrap(), raw[0]);
        assert_eq!(*smoothed.last().unwrap(), raw[3]);
        assert!(smoothed.len() > raw.len());
    }

    #[test]
    fn test_smooth_path_short_input_unchanged() {
        let raw = vec![pos2(1.0, 1.0), pos2(2.0, 2.0)];
        assert_eq!(smooth_path(&raw), raw);
    }
}
