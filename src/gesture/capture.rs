// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Stroke capture engine.
//!
//! Records pointer movement into a live path for the active gesture.
//! The caller feeds it every coalesced pointer sample the input system
//! delivers between frames; skipping intermediate samples makes fast
//! strokes look faceted. On gesture end the path is normalized against
//! the page size and emitted as a committed [`Stroke`].

use crate::models::stroke::{Point, StrokeStyle};
use crate::util::geometry;
use egui::{Pos2, Vec2};

/// Paths with fewer samples than this are taps, not strokes. Keeps
/// accidental dots and plain clicks (e.g. on the flag icon) out of the
/// drawings.
pub const MIN_STROKE_SAMPLES: usize = 5;

/// The in-progress pointer path before it is committed as a Stroke.
#[derive(Debug, Clone)]
pub struct LivePath {
    /// Page the gesture started on; hit-testing uses this page's boxes
    /// even if the user pages away before the gesture completes.
    pub page: usize,
    /// Raw samples in page-local pixel coordinates.
    pub points: Vec<Pos2>,
    /// Style latched at gesture start.
    pub style: StrokeStyle,
}

/// Records one gesture at a time into a live path.
#[derive(Debug, Default)]
pub struct StrokeCapture {
    live: Option<LivePath>,
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new live path at the pointer's page-relative position.
    pub fn begin(&mut self, page: usize, pos: Pos2, style: StrokeStyle) {
        self.live = Some(LivePath {
            page,
            points: vec![pos],
            style,
        });
    }

    /// Append one movement sample. No-op when no gesture is active.
    pub fn append(&mut self, pos: Pos2) {
        if let Some(live) = &mut self.live {
            // Duplicate samples happen when the pointer stalls; they add
            // nothing and skew the classifier's radial statistics.
            if live.points.last() != Some(&pos) {
                live.points.push(pos);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.live.is_some()
    }

    /// The live path for rendering, if a gesture is in progress.
    pub fn live(&self) -> Option<&LivePath> {
        self.live.as_ref()
    }

    /// End the gesture, normalizing the path against the page size.
    ///
    /// Returns the normalized points alongside the raw pixel path so the
    /// receiver can classify the gesture without denormalizing again.
    /// Paths shorter than [`MIN_STROKE_SAMPLES`] are discarded as taps.
    pub fn finish(&mut self, page_size: Vec2) -> Option<(Vec<Point>, LivePath)> {
        let live = self.live.take()?;
        if live.points.len() < MIN_STROKE_SAMPLES {
            log::debug!("discarding {}-sample path as a tap", live.points.len());
            return None;
        }

        let normalized = live
            .points
            .iter()
            .map(|p| geometry::normalize_point(*p, page_size))
            .collect();
        Some((normalized, live))
    }

    /// Drop the live path without committing (input-system cancellation).
    pub fn cancel(&mut self) {
        if self.live.take().is_some() {
            log::debug!("gesture cancelled, live path discarded");
        }
    }
}
