// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Paused-session serialization and deserialization.
//!
//! This module handles exporting and importing paused-session snapshots
//! in YAML and JSON formats. Persistence policy belongs to the host; the
//! session core only defines the snapshot shape.

use crate::models::session_state::PausedState;
use anyhow::Result;
use std::path::Path;

/// Export a paused session to YAML format.
pub fn export_yaml(state: &PausedState, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(state)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a paused session to JSON format.
pub fn export_json(state: &PausedState, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import a paused session from YAML format.
pub fn import_yaml(path: &Path) -> Result<PausedState> {
    let yaml = std::fs::read_to_string(path)?;
    let state = serde_yaml::from_str(&yaml)?;
    Ok(state)
}

/// Import a paused session from JSON format.
pub fn import_json(path: &Path) -> Result<PausedState> {
    let json = std::fs::read_to_string(path)?;
    let state = serde_json::from_str(&json)?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Question;
    use crate::models::session_state::{Answer, SessionSettings, TimeMode};

    fn sample_state() -> PausedState {
        PausedState {
            questions: vec![Question::new(
                "q0",
                "What color is the sky?",
                vec!["red".into(), "blue".into()],
                "blue",
            )],
            answers: vec![(
                0,
                Answer {
                    selected: "blue".into(),
                    correct: true,
                },
            )],
            current_question: 0,
            settings: SessionSettings {
                time_mode: TimeMode::Total,
                duration_secs: 600,
                reveal_correctness: true,
                ..SessionSettings::default()
            },
            remaining_secs: Some(412),
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = std::env::temp_dir().join("inkquiz_test_json");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("paused.json");

        let state = sample_state();
        export_json(&state, &path).unwrap();
        let loaded = import_json(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = std::env::temp_dir().join("inkquiz_test_yaml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("paused.yaml");

        let state = sample_state();
        export_yaml(&state, &path).unwrap();
        let loaded = import_yaml(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_import_missing_file_errors() {
        assert!(import_json(Path::new("/nonexistent/paused.json")).is_err());
    }
}
