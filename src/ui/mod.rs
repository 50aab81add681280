// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the paper exam surface.

pub mod layout;
pub mod overlay;
pub mod surface;
pub mod toolbar;
