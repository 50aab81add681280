// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Answer sheet overlay.
//!
//! A floating, draggable, resizable panel showing a compact letter-grid
//! view of every question on every page. Collapsed pages show one
//! color-coded cell per question; an expanded page shows letter buttons
//! that toggle the same answer state as circling on the page. Selecting
//! a page navigates the main surface to it.

use crate::models::question::Question;
use crate::models::session_state::SheetSide;
use crate::session::controller::PaperSession;
use crate::ui::layout::PaperTheme;
use egui::{pos2, vec2, Color32, RichText};

/// Result of overlay interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    None,
    GotoPage(usize),
    ToggleAnswer { question: usize, option: usize },
}

/// Overlay visibility and expansion state, owned by the app.
#[derive(Debug, Default)]
pub struct SheetState {
    pub open: bool,
    /// Page currently expanded into letter rows, if any.
    pub expanded_page: Option<usize>,
}

/// Display the answer sheet window when open.
pub fn show(
    ctx: &egui::Context,
    state: &mut SheetState,
    session: &PaperSession,
    theme: &PaperTheme,
) -> OverlayAction {
    if !state.open {
        return OverlayAction::None;
    }

    let mut action = OverlayAction::None;
    let screen = ctx.screen_rect();
    let default_pos = match session.settings().sheet_side {
        SheetSide::Left => pos2(16.0, 90.0),
        SheetSide::Right => pos2(screen.right() - 300.0, 90.0),
    };

    let mut open = state.open;
    egui::Window::new("Answer sheet")
        .open(&mut open)
        .default_pos(default_pos)
        .default_width(260.0)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for page in 0..session.page_count() {
                    let expanded = state.expanded_page == Some(page);
                    ui.horizontal_wrapped(|ui| {
                        let header = ui.selectable_label(
                            page == session.current_page(),
                            RichText::new(format!("Page {}", page + 1)).strong(),
                        );
                        if header.clicked() {
                            state.expanded_page = if expanded { None } else { Some(page) };
                            action = OverlayAction::GotoPage(page);
                        }

                        if !expanded {
                            for question in session.page_range(page) {
                                let color = cell_color(session, question, theme);
                                let cell = egui::Button::new(
                                    RichText::new(format!("{}", question + 1)).size(11.0),
                                )
                                .fill(color)
                                .min_size(vec2(24.0, 18.0));
                                if ui.add(cell).clicked() {
                                    state.expanded_page = Some(page);
                                    action = OverlayAction::GotoPage(page);
                                }
                            }
                        }
                    });

                    if expanded {
                        for question in session.page_range(page) {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(format!("{}.", question + 1)).monospace());
                                let options = session.questions()[question].options.len();
                                for option in 0..options {
                                    let selected = session
                                        .answer(question)
                                        .map(|a| {
                                            a.selected
                                                == session.questions()[question].options[option]
                                        })
                                        .unwrap_or(false);
                                    let letter = Question::option_letter(option).to_string();
                                    let fill = if selected {
                                        cell_color(session, question, theme)
                                    } else {
                                        Color32::TRANSPARENT
                                    };
                                    let cell = egui::Button::new(RichText::new(letter).size(12.0))
                                        .fill(fill)
                                        .min_size(vec2(22.0, 18.0));
                                    if ui.add(cell).clicked() {
                                        action = OverlayAction::ToggleAnswer { question, option };
                                    }
                                }
                            });
                        }
                        ui.add_space(4.0);
                    }
                }
            });
        });
    state.open = open;

    action
}

/// Cell fill for a question: muted when unanswered, highlight when
/// answered, correctness-colored only when the settings reveal it.
fn cell_color(session: &PaperSession, question: usize, theme: &PaperTheme) -> Color32 {
    match session.answer(question) {
        None => theme.muted.gamma_multiply(0.25),
        Some(answer) => {
            if session.settings().reveal_correctness {
                if answer.correct {
                    theme.correct.gamma_multiply(0.6)
                } else {
                    theme.incorrect.gamma_multiply(0.6)
                }
            } else {
                theme.highlight
            }
        }
    }
}
