// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Eraser resolution.
//!
//! An eraser stroke is never committed as ink. Its effect is geometric:
//! any committed stroke on the same page that passes within a
//! tool-width-scaled distance of the eraser path is removed wholesale.
//! The test is pairwise point proximity, intentionally permissive - a
//! light touch erases the whole stroke.

use crate::models::stroke::Stroke;
use crate::util::geometry;
use egui::{Pos2, Vec2};

/// Ids of the strokes an eraser path removes.
///
/// Both the eraser path and each committed stroke are compared in
/// absolute pixel coordinates against the current page size. A stroke is
/// hit when any of its points lies within
/// `eraser_width / 2 + stroke_width / 2` of any eraser point.
pub fn resolve_erased(
    eraser_path: &[Pos2],
    eraser_width: f32,
    strokes: &[Stroke],
    page_size: Vec2,
) -> Vec<u64> {
    strokes
        .iter()
        .filter(|stroke| {
            let reach = eraser_width / 2.0 + stroke.style.width / 2.0;
            let path = geometry::denormalize_path(&stroke.points, page_size);
            path.iter()
                .any(|p| eraser_path.iter().any(|e| geometry::distance(*p, *e) <= reach))
        })
        .map(|stroke| stroke.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stroke::{BlendMode, Point, StrokeStyle};
    use egui::{pos2, vec2};

    const PAGE: Vec2 = vec2(100.0, 100.0);

    fn stroke_at(id: u64, y: f32, width: f32) -> Stroke {
        // Horizontal stroke from x=20 to x=80 at the given pixel height,
        // stored normalized against PAGE.
        let points = (0..7)
            .map(|i| Point::new((20.0 + i as f32 * 10.0) / PAGE.x, y / PAGE.y))
            .collect();
        Stroke::new(id, points, StrokeStyle::new([0, 0, 0, 255], width, BlendMode::Normal))
    }

    #[test]
    fn test_nearby_stroke_erased_distant_kept() {
        let strokes = vec![stroke_at(1, 50.0, 2.0), stroke_at(2, 90.0, 2.0)];
        // Eraser passes along y=53: 3px from stroke 1, 37px from stroke 2.
        let eraser: Vec<Pos2> = (0..7).map(|i| pos2(20.0 + i as f32 * 10.0, 53.0)).collect();

        let erased = resolve_erased(&eraser, 8.0, &strokes, PAGE);
        assert_eq!(erased, vec![1]);
    }

    #[test]
    fn test_reach_scales_with_both_widths() {
        // Gap of 6px between eraser and stroke.
        let strokes = vec![stroke_at(1, 56.0, 2.0)];
        let eraser = vec![pos2(50.0, 50.0)];

        // Reach 4 + 1 = 5 < 6: kept.
        assert!(resolve_erased(&eraser, 8.0, &strokes, PAGE).is_empty());
        // Reach 6 + 1 = 7 >= 6: erased.
        assert_eq!(resolve_erased(&eraser, 12.0, &strokes, PAGE), vec![1]);
    }

    #[test]
    fn test_single_touching_point_erases_whole_stroke() {
        let strokes = vec![stroke_at(1, 50.0, 2.0)];
        // One eraser point over the stroke's last segment only.
        let eraser = vec![pos2(80.0, 50.0)];
        assert_eq!(resolve_erased(&eraser, 4.0, &strokes, PAGE), vec![1]);
    }
}
