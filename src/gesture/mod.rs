// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Stroke capture, circle classification, and eraser resolution.

pub mod capture;
pub mod classify;
pub mod eraser;
