// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session settings, answers, and the pause/finish snapshots exchanged
//! with the host application.

use super::question::Question;
use serde::{Deserialize, Serialize};

/// How the session clock behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeMode {
    None,
    /// A fixed budget per question. Paper pages hold several questions at
    /// once, so this degrades to no visible countdown in paper mode.
    PerQuestion,
    /// One countdown for the whole session; reaching zero auto-finishes.
    Total,
}

/// Which side of the surface the answer sheet panel opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetSide {
    Left,
    Right,
}

/// Host-supplied configuration for one exam session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub time_mode: TimeMode,
    /// Duration in seconds; meaning depends on `time_mode`.
    pub duration_secs: u32,
    /// Color answers by correctness as soon as they are given, rather
    /// than only at the end.
    pub reveal_correctness: bool,
    pub sheet_side: SheetSide,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            time_mode: TimeMode::None,
            duration_secs: 0,
            reveal_correctness: false,
            sheet_side: SheetSide::Right,
        }
    }
}

/// One recorded answer: the selected option text and whether it matches
/// the question's correct option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub selected: String,
    pub correct: bool,
}

/// Serializable snapshot of a paused session.
///
/// Drawings and layout caches are intentionally excluded: annotations are
/// a convenience and come back blank on resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PausedState {
    pub questions: Vec<Question>,
    /// Answer map flattened to explicit (question index, answer) pairs.
    pub answers: Vec<(usize, Answer)>,
    pub current_question: usize,
    pub settings: SessionSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_secs: Option<u32>,
}

/// What the session hands back to the host on Finish.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishReport {
    pub failed: Vec<Question>,
    pub unanswered: Vec<Question>,
    pub answers: Vec<(usize, Answer)>,
}
