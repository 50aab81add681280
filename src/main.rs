// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! inkquiz - paper-mode exam surface
//!
//! A cross-platform desktop application that renders quiz questions as
//! paginated paper pages; answers are given by circling option letters
//! with a stylus or mouse, with pencil/pen/highlighter annotation and
//! gesture-based erasing.

mod app;
mod gesture;
mod io;
mod models;
mod session;
mod ui;
mod util;

use anyhow::Result;
use app::InkquizApp;
use models::question::Question;
use models::session_state::{SessionSettings, SheetSide, TimeMode};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Optionally resume a previously paused session from a file given
    // as the first argument.
    let resumed = match std::env::args().nth(1) {
        Some(path) => {
            let path = std::path::PathBuf::from(path);
            let paused = match path.extension().and_then(|s| s.to_str()) {
                Some("yaml") | Some("yml") => io::serialization::import_yaml(&path)?,
                _ => io::serialization::import_json(&path)?,
            };
            log::info!("resuming paused session from {}", path.display());
            Some(paused)
        }
        None => None,
    };

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([700.0, 500.0])
            .with_title("inkquiz - paper mode"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "inkquiz",
        options,
        Box::new(move |_cc| {
            let app = match resumed {
                Some(paused) => InkquizApp::from_paused(paused),
                None => InkquizApp::new(demo_questions(), demo_settings()),
            };
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

fn demo_settings() -> SessionSettings {
    SessionSettings {
        time_mode: TimeMode::Total,
        duration_secs: 15 * 60,
        reveal_correctness: false,
        sheet_side: SheetSide::Right,
    }
}

/// Built-in question set standing in for the host application's
/// content pipeline.
fn demo_questions() -> Vec<Question> {
    let bank: [(&str, [&str; 4], usize); 12] = [
        ("Which layer of the OSI model handles routing?", ["Transport", "Network", "Data link", "Session"], 1),
        ("What is the time complexity of binary search?", ["O(n)", "O(n log n)", "O(log n)", "O(1)"], 2),
        ("Which keyword makes a Rust binding mutable?", ["var", "mut", "let", "mod"], 1),
        ("What does ACID's 'I' stand for?", ["Integrity", "Indexing", "Isolation", "Idempotence"], 2),
        ("Which HTTP status code means 'Not Found'?", ["301", "403", "404", "500"], 2),
        ("Which data structure gives O(1) average lookup by key?", ["B-tree", "Hash map", "Linked list", "Heap"], 1),
        ("What does DNS resolve?", ["MAC addresses", "Port numbers", "Hostnames", "Routes"], 2),
        ("Which sorting algorithm is stable?", ["Quicksort", "Heapsort", "Merge sort", "Selection sort"], 2),
        ("What is the default TCP handshake length?", ["2 packets", "3 packets", "4 packets", "5 packets"], 1),
        ("Which register holds the next instruction address?", ["Stack pointer", "Program counter", "Accumulator", "Status register"], 1),
        ("What does RAID 1 provide?", ["Striping", "Mirroring", "Parity", "Compression"], 1),
        ("Which protocol is connectionless?", ["TCP", "UDP", "FTP", "SSH"], 1),
    ];

    bank.into_iter()
        .enumerate()
        .map(|(i, (text, options, correct))| {
            let options: Vec<String> = options.iter().map(|s| s.to_string()).collect();
            let correct_text = options[correct].clone();
            let mut q = Question::new(format!("demo-{i}"), text, options, correct_text);
            if i % 4 == 0 {
                q.sources = vec![format!("handbook-ch{}", i / 4 + 1)];
            }
            q
        })
        .collect()
}
