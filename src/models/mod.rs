// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data model: questions, ink, and session state.

pub mod question;
pub mod session_state;
pub mod stroke;
