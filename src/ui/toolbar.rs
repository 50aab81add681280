// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing toolbar and session controls.
//!
//! Tool selection (pencil, pen, highlighter, eraser) with independent
//! color/width state per tool, page navigation, the countdown readout,
//! and the pause / finish / clear-page controls.

use crate::app::{ToolKind, ToolState};
use crate::session::controller::PaperSession;

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    PrevPage,
    NextPage,
    ClearPage,
    Pause,
    Finish,
    ToggleSheet,
}

/// Display the toolbar; returns the control action clicked, if any.
pub fn show(
    ui: &mut egui::Ui,
    tools: &mut ToolState,
    session: &PaperSession,
    dark_mode: &mut bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        for (kind, label) in [
            (ToolKind::Pencil, "✏ Pencil"),
            (ToolKind::Pen, "🖊 Pen"),
            (ToolKind::Highlighter, "🖍 Highlight"),
            (ToolKind::Eraser, "⬜ Eraser"),
        ] {
            if ui.selectable_label(tools.active == kind, label).clicked() {
                tools.active = kind;
            }
        }

        ui.separator();

        // Style of the active tool only; each tool remembers its own.
        let config = tools.active_config_mut();
        ui.color_edit_button_srgba(&mut config.color);
        ui.add(
            egui::Slider::new(&mut config.width, 1.0..=24.0)
                .show_value(false)
                .text("width"),
        );

        ui.separator();

        if ui.button("◀").clicked() {
            action = ToolbarAction::PrevPage;
        }
        ui.label(format!(
            "{}/{}",
            session.current_page() + 1,
            session.page_count()
        ));
        if ui.button("▶").clicked() {
            action = ToolbarAction::NextPage;
        }

        ui.separator();

        if ui.button("Answer sheet").clicked() {
            action = ToolbarAction::ToggleSheet;
        }
        if ui.button("Clear page").clicked() {
            action = ToolbarAction::ClearPage;
        }

        ui.separator();

        if let Some(remaining) = session.remaining_secs() {
            let readout = format!("⏱ {}:{:02}", remaining / 60, remaining % 60);
            ui.label(egui::RichText::new(readout).strong());
            ui.separator();
        }

        if ui.button("⏸ Pause").clicked() {
            action = ToolbarAction::Pause;
        }
        if ui.button("✔ Finish").clicked() {
            action = ToolbarAction::Finish;
        }

        ui.separator();
        ui.checkbox(dark_mode, "Dark");
    });

    action
}
