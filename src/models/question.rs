// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Quiz question data structures.
//!
//! Questions are supplied once by the host at session start and are
//! immutable during the session, except for their flag tag.

use serde::{Deserialize, Serialize};

/// A user-assigned review tag on a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlagTag {
    Good,
    Bad,
    Interesting,
    ToReview,
    Suspended,
}

impl FlagTag {
    /// Cycle order used when tapping the margin flag icon.
    pub fn next(current: Option<FlagTag>) -> Option<FlagTag> {
        match current {
            None => Some(FlagTag::Good),
            Some(FlagTag::Good) => Some(FlagTag::Bad),
            Some(FlagTag::Bad) => Some(FlagTag::Interesting),
            Some(FlagTag::Interesting) => Some(FlagTag::ToReview),
            Some(FlagTag::ToReview) => Some(FlagTag::Suspended),
            Some(FlagTag::Suspended) => None,
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Ordered option strings, displayed as "a) ...", "b) ...", etc.
    pub options: Vec<String>,
    /// The text of the correct option (matched by equality).
    pub correct: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<FlagTag>,
    /// Identifiers of source documents this question was drawn from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>, options: Vec<String>, correct: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            options,
            correct: correct.into(),
            flag: None,
            sources: Vec::new(),
        }
    }

    /// The display letter for an option index: 0 -> 'a', 1 -> 'b', ...
    pub fn option_letter(index: usize) -> char {
        (b'a' + (index as u8 % 26)) as char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_cycle_returns_to_none() {
        let mut flag = None;
        for _ in 0..6 {
            flag = FlagTag::next(flag);
        }
        assert_eq!(flag, None);
    }

    #[test]
    fn test_option_letters() {
        assert_eq!(Question::option_letter(0), 'a');
        assert_eq!(Question::option_letter(3), 'd');
    }
}
