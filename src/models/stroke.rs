// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ink data structures.
//!
//! This module defines the core data structures for freehand ink:
//! normalized points, stroke styles, and committed strokes.

use serde::{Deserialize, Serialize};

/// A 2D point with coordinates normalized to the page size (0.0 to 1.0).
///
/// Strokes store normalized points so they survive surface resizing and
/// device pixel-density changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// How a stroke's paint combines with the page underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Opaque ink (pencil, pen).
    Normal,
    /// Translucent paint that lets the text show through (highlighter).
    Multiply,
    /// Subtractive; the stroke itself is never painted (eraser).
    Erase,
}

/// The visual style a stroke was drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// RGBA color components.
    pub color: [u8; 4],
    /// Line width in logical pixels.
    pub width: f32,
    pub blend: BlendMode,
}

impl StrokeStyle {
    pub fn new(color: [u8; 4], width: f32, blend: BlendMode) -> Self {
        Self { color, width, blend }
    }
}

/// A committed freehand path with the style it was drawn in.
///
/// Strokes are immutable once committed: erasure removes a stroke
/// wholesale, it never mutates the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: u64,
    /// Normalized path, at least 2 points.
    pub points: Vec<Point>,
    pub style: StrokeStyle,
}

impl Stroke {
    pub fn new(id: u64, points: Vec<Point>, style: StrokeStyle) -> Self {
        debug_assert!(points.len() >= 2);
        Self { id, points, style }
    }
}
