// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module plays the host role around the paper-mode exam core: it
//! supplies questions and settings, routes surface/overlay/toolbar
//! actions into the session controller, runs the countdown, and receives
//! the finish report or paused snapshot when the session ends.

use crate::gesture::capture::{LivePath, StrokeCapture};
use crate::gesture::classify;
use crate::models::question::Question;
use crate::models::session_state::{FinishReport, PausedState, SessionSettings};
use crate::models::stroke::{BlendMode, Point, Stroke, StrokeStyle};
use crate::session::controller::{ClearChoice, ClearPageOutcome, PaperSession, Phase};
use crate::ui::layout::{self, PageLayout, PaperTheme};
use crate::ui::overlay::{self, OverlayAction, SheetState};
use crate::ui::surface::{self, SurfaceAction};
use crate::ui::toolbar::{self, ToolbarAction};
use egui::{vec2, Color32};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Questions laid out per paper page.
const QUESTIONS_PER_PAGE: usize = 5;

/// Current drawing tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Pencil,
    Pen,
    Highlighter,
    Eraser,
}

/// Per-tool color and width, remembered independently.
#[derive(Debug, Clone, Copy)]
pub struct ToolConfig {
    pub color: Color32,
    pub width: f32,
}

/// Tool selection plus the style state of every tool.
#[derive(Debug, Clone)]
pub struct ToolState {
    pub active: ToolKind,
    pub pencil: ToolConfig,
    pub pen: ToolConfig,
    pub highlighter: ToolConfig,
    pub eraser: ToolConfig,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            active: ToolKind::Pencil,
            pencil: ToolConfig {
                color: Color32::from_rgb(60, 60, 70),
                width: 2.0,
            },
            pen: ToolConfig {
                color: Color32::from_rgb(25, 60, 160),
                width: 3.0,
            },
            highlighter: ToolConfig {
                color: Color32::from_rgb(255, 220, 90),
                width: 14.0,
            },
            eraser: ToolConfig {
                color: Color32::from_gray(128),
                width: 18.0,
            },
        }
    }
}

impl ToolState {
    pub fn active_config_mut(&mut self) -> &mut ToolConfig {
        match self.active {
            ToolKind::Pencil => &mut self.pencil,
            ToolKind::Pen => &mut self.pen,
            ToolKind::Highlighter => &mut self.highlighter,
            ToolKind::Eraser => &mut self.eraser,
        }
    }

    /// The stroke style a gesture started now would be drawn with.
    pub fn active_style(&self) -> StrokeStyle {
        let (config, blend) = match self.active {
            ToolKind::Pencil => (&self.pencil, BlendMode::Normal),
            ToolKind::Pen => (&self.pen, BlendMode::Normal),
            ToolKind::Highlighter => (&self.highlighter, BlendMode::Multiply),
            ToolKind::Eraser => (&self.eraser, BlendMode::Erase),
        };
        StrokeStyle::new(config.color.to_array(), config.width, blend)
    }
}

/// Pending modal confirmation.
enum Dialog {
    ConfirmFinish,
    /// Three-way destructive clear: the current page has answers.
    ConfirmClear,
}

/// Main application state.
pub struct InkquizApp {
    session: PaperSession,
    capture: StrokeCapture,
    tools: ToolState,
    /// Last layout pass per page index; hit tests for a gesture use the
    /// layout of the page the gesture was drawn on.
    layouts: HashMap<usize, PageLayout>,
    sheet: SheetState,
    dialog: Option<Dialog>,
    dark_mode: bool,
    last_tick: Instant,
    /// Present once the session has finished.
    report: Option<FinishReport>,
    /// Present once the session has paused.
    paused: Option<PausedState>,
}

impl InkquizApp {
    pub fn new(questions: Vec<Question>, settings: SessionSettings) -> Self {
        Self::with_session(PaperSession::new(questions, settings, QUESTIONS_PER_PAGE))
    }

    pub fn from_paused(paused: PausedState) -> Self {
        Self::with_session(PaperSession::resume(paused, QUESTIONS_PER_PAGE))
    }

    fn with_session(session: PaperSession) -> Self {
        Self {
            session,
            capture: StrokeCapture::new(),
            tools: ToolState::default(),
            layouts: HashMap::new(),
            sheet: SheetState::default(),
            dialog: None,
            dark_mode: false,
            last_tick: Instant::now(),
            report: None,
            paused: None,
        }
    }

    fn theme(&self) -> PaperTheme {
        if self.dark_mode {
            PaperTheme::dark()
        } else {
            PaperTheme::light()
        }
    }

    /// Advance the countdown by however many whole seconds have elapsed.
    fn tick_timer(&mut self) {
        if !self.session.is_active() || self.session.remaining_secs().is_none() {
            self.last_tick = Instant::now();
            return;
        }
        while self.last_tick.elapsed() >= Duration::from_secs(1) {
            self.last_tick += Duration::from_secs(1);
            if let Some(report) = self.session.tick_second() {
                self.report = Some(report);
                self.capture.cancel();
                break;
            }
        }
    }

    /// Route a completed gesture: eraser paths erase, ink commits, and a
    /// pencil/pen circle over an option letter records the answer.
    fn handle_stroke(&mut self, points: Vec<Point>, raw: LivePath) {
        let page_layout = self.layouts.get(&raw.page);

        if raw.style.blend == BlendMode::Erase {
            // Never committed as ink; its effect is purely geometric.
            let Some(page_layout) = page_layout else {
                log::warn!("eraser gesture on page {} without a layout, ignored", raw.page);
                return;
            };
            let page_size = vec2(page_layout.width, page_layout.height);
            self.session
                .erase(raw.page, &raw.points, raw.style.width, page_size);
            return;
        }

        let stroke = Stroke::new(self.session.next_stroke_id(), points, raw.style);

        // Highlighter strokes are annotations only; circles count just
        // for pencil and pen.
        if raw.style.blend == BlendMode::Normal && classify::is_circle(&raw.points) {
            match (page_layout, classify::circle_center(&raw.points)) {
                (Some(page_layout), Some(center)) => {
                    if let Some(hit) = layout::hit_option(page_layout, center) {
                        self.session.select_answer(hit.question, hit.option);
                    }
                }
                _ => {
                    // Stale page or degenerate path: keep the ink, never
                    // guess an answer.
                    log::warn!("circle gesture on page {} could not be hit-tested", raw.page);
                }
            }
        }

        self.session.commit_stroke(raw.page, stroke);
    }

    fn handle_toolbar(&mut self, action: ToolbarAction) {
        // Paused and Finished are terminal; the toolbar stays visible
        // but its session controls go inert.
        if !self.session.is_active() {
            return;
        }
        match action {
            ToolbarAction::None => {}
            ToolbarAction::PrevPage => {
                let page = self.session.current_page();
                self.session.goto_page(page.saturating_sub(1));
            }
            ToolbarAction::NextPage => {
                let page = self.session.current_page();
                self.session.goto_page(page + 1);
            }
            ToolbarAction::ToggleSheet => self.sheet.open = !self.sheet.open,
            ToolbarAction::ClearPage => {
                if self.session.clear_page_request() == ClearPageOutcome::NeedsConfirmation {
                    self.dialog = Some(Dialog::ConfirmClear);
                }
            }
            ToolbarAction::Pause => {
                self.capture.cancel();
                // A confirmation left open across the pause must not act
                // on the paused session later.
                self.dialog = None;
                self.paused = self.session.pause();
            }
            ToolbarAction::Finish => self.dialog = Some(Dialog::ConfirmFinish),
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.dialog else {
            return;
        };
        match dialog {
            Dialog::ConfirmFinish => {
                let mut close = false;
                egui::Window::new("Finish exam?")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, vec2(0.0, 0.0))
                    .show(ctx, |ui| {
                        let unanswered = self.session.questions().len() - self.session.answers().len();
                        ui.label(format!("{unanswered} questions are still unanswered."));
                        ui.horizontal(|ui| {
                            if ui.button("Finish").clicked() {
                                self.capture.cancel();
                                self.report = self.session.finish();
                                close = true;
                            }
                            if ui.button("Keep working").clicked() {
                                close = true;
                            }
                        });
                    });
                if close {
                    self.dialog = None;
                }
            }
            Dialog::ConfirmClear => {
                let mut close = false;
                egui::Window::new("Clear this page?")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, vec2(0.0, 0.0))
                    .show(ctx, |ui| {
                        ui.label("This page has recorded answers.");
                        ui.horizontal(|ui| {
                            if ui.button("Clear drawings only").clicked() {
                                self.session.clear_page(ClearChoice::DrawingsOnly);
                                close = true;
                            }
                            if ui.button("Clear drawings and answers").clicked() {
                                self.session.clear_page(ClearChoice::DrawingsAndAnswers);
                                close = true;
                            }
                            if ui.button("Cancel").clicked() {
                                close = true;
                            }
                        });
                    });
                if close {
                    self.dialog = None;
                }
            }
        }
    }

    fn show_paused_screen(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Session paused");
            let answered = self
                .paused
                .as_ref()
                .map(|p| p.answers.len())
                .unwrap_or_default();
            ui.label(format!("{answered} answers recorded. Annotations are not kept."));
            ui.add_space(12.0);

            if ui.button("Resume").clicked() {
                if let Some(paused) = self.paused.take() {
                    let tools = self.tools.clone();
                    let dark_mode = self.dark_mode;
                    *self = Self::from_paused(paused);
                    self.tools = tools;
                    self.dark_mode = dark_mode;
                }
            }
            if ui.button("Save session…").clicked() {
                if let Some(paused) = &self.paused {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Session", &["yaml", "yml", "json"])
                        .set_file_name("session.yaml")
                        .save_file()
                    {
                        if let Err(e) = export_paused(paused, &path) {
                            log::error!("Failed to save paused session: {e}");
                        } else {
                            log::info!("Saved paused session to {}", path.display());
                        }
                    }
                }
            }
        });
    }

    fn show_finished_screen(&mut self, ui: &mut egui::Ui) {
        let Some(report) = &self.report else {
            return;
        };
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.heading("Exam finished");
            let total = self.session.questions().len();
            let correct = total - report.failed.len() - report.unanswered.len();
            ui.label(format!(
                "{} correct, {} failed, {} unanswered out of {}",
                correct,
                report.failed.len(),
                report.unanswered.len(),
                total
            ));
        });
        ui.add_space(12.0);
        egui::ScrollArea::vertical().show(ui, |ui| {
            if !report.failed.is_empty() {
                ui.heading("Failed");
                for question in &report.failed {
                    ui.label(format!("• {}", question.text));
                }
                ui.add_space(8.0);
            }
            if !report.unanswered.is_empty() {
                ui.heading("Unanswered");
                for question in &report.unanswered {
                    ui.label(format!("• {}", question.text));
                }
            }
        });
    }
}

fn export_paused(paused: &PausedState, path: &std::path::Path) -> anyhow::Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => crate::io::serialization::export_yaml(paused, path),
        _ => crate::io::serialization::export_json(paused, path),
    }
}

impl eframe::App for InkquizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick_timer();
        if self.session.remaining_secs().is_some() && self.session.is_active() {
            ctx.request_repaint_after(Duration::from_millis(200));
        }

        let theme = self.theme();

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.tools, &self.session, &mut self.dark_mode)
            })
            .inner;
        self.handle_toolbar(toolbar_action);

        // Answer sheet overlay
        match overlay::show(ctx, &mut self.sheet, &self.session, &theme) {
            OverlayAction::None => {}
            OverlayAction::GotoPage(page) => self.session.goto_page(page),
            OverlayAction::ToggleAnswer { question, option } => {
                self.session.toggle_answer(question, option);
            }
        }

        // Main surface
        let surface_action = egui::CentralPanel::default()
            .show(ctx, |ui| match self.session.phase() {
                Phase::Active => {
                    let style = self.tools.active_style();
                    let action = surface::show(
                        ui,
                        &self.session,
                        &mut self.capture,
                        style,
                        &theme,
                        &mut self.layouts,
                    );
                    surface::page_footer(ui, &self.session);
                    action
                }
                Phase::Paused => {
                    self.show_paused_screen(ui);
                    SurfaceAction::None
                }
                Phase::Finished => {
                    self.show_finished_screen(ui);
                    SurfaceAction::None
                }
            })
            .inner;

        match surface_action {
            SurfaceAction::None => {}
            SurfaceAction::StrokeFinished { points, raw } => self.handle_stroke(points, raw),
            SurfaceAction::FlagClicked { question } => {
                if let Some(flag) = self.session.cycle_flag(question) {
                    // Host callback seam: flag changes are reported out.
                    let id = &self.session.questions()[question].id;
                    log::info!("flag changed for question {id}: {flag:?}");
                }
            }
            SurfaceAction::ViewSource { question } => {
                let q = &self.session.questions()[question];
                // Host callback seam: source resolution happens outside.
                log::info!("view source requested for {}: {:?}", q.id, q.sources);
            }
        }

        self.show_dialogs(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::layout::OptionBox;
    use crate::util::geometry;
    use egui::{pos2, Pos2, Rect};

    const PAGE: egui::Vec2 = egui::vec2(600.0, 800.0);

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::new(
                    format!("q{i}"),
                    format!("Question {i}?"),
                    vec!["alpha".into(), "beta".into(), "gamma".into()],
                    "beta",
                )
            })
            .collect()
    }

    fn app(n: usize) -> InkquizApp {
        InkquizApp::new(questions(n), SessionSettings::default())
    }

    fn pen() -> StrokeStyle {
        StrokeStyle::new([20, 20, 20, 255], 2.0, BlendMode::Normal)
    }

    /// A closed ring of samples, dense enough to classify as a circle.
    fn ring(center: Pos2, radius: f32) -> Vec<Pos2> {
        (0..=32)
            .map(|i| {
                let t = i as f32 / 32.0 * std::f32::consts::TAU;
                pos2(center.x + radius * t.cos(), center.y + radius * t.sin())
            })
            .collect()
    }

    fn normalized(points: &[Pos2]) -> Vec<Point> {
        points.iter().map(|p| geometry::normalize_point(*p, PAGE)).collect()
    }

    /// A layout with a single option letter box for question 0, option 1.
    fn stub_layout(page: usize) -> PageLayout {
        let letter_rect = Rect::from_min_size(pos2(46.0, 60.0), egui::vec2(26.0, 20.0));
        PageLayout {
            page,
            width: PAGE.x,
            height: PAGE.y,
            blocks: Vec::new(),
            option_boxes: vec![OptionBox {
                question: 0,
                option: 1,
                letter_rect,
                row_rect: Rect::from_min_size(letter_rect.min, egui::vec2(300.0, 20.0)),
            }],
            flag_boxes: Vec::new(),
            source_boxes: Vec::new(),
        }
    }

    #[test]
    fn test_circle_over_letter_records_answer_and_keeps_ink() {
        let mut app = app(5);
        app.layouts.insert(0, stub_layout(0));

        // Circled around the letter box center.
        let points = ring(pos2(59.0, 70.0), 15.0);
        let raw = LivePath { page: 0, points: points.clone(), style: pen() };
        app.handle_stroke(normalized(&points), raw);

        assert_eq!(app.session.answer(0).unwrap().selected, "beta");
        assert_eq!(app.session.strokes(0).len(), 1);
    }

    #[test]
    fn test_circle_outside_all_letters_commits_ink_only() {
        let mut app = app(5);
        app.layouts.insert(0, stub_layout(0));

        // A clean circle in open page space must never guess an answer.
        let points = ring(pos2(300.0, 400.0), 30.0);
        let raw = LivePath { page: 0, points: points.clone(), style: pen() };
        app.handle_stroke(normalized(&points), raw);

        assert!(app.session.answers().is_empty());
        assert_eq!(app.session.strokes(0).len(), 1);
    }

    #[test]
    fn test_circle_without_cached_layout_commits_ink_only() {
        let mut app = app(15);

        // Page 2 has no layout pass cached; even a circle dead on the
        // letter position stays annotation-only.
        let points = ring(pos2(59.0, 70.0), 15.0);
        let raw = LivePath { page: 2, points: points.clone(), style: pen() };
        app.handle_stroke(normalized(&points), raw);

        assert!(app.session.answers().is_empty());
        assert_eq!(app.session.strokes(2).len(), 1);
    }

    #[test]
    fn test_highlighter_circle_never_answers() {
        let mut app = app(5);
        app.layouts.insert(0, stub_layout(0));

        let points = ring(pos2(59.0, 70.0), 15.0);
        let style = StrokeStyle::new([255, 220, 90, 255], 14.0, BlendMode::Multiply);
        let raw = LivePath { page: 0, points: points.clone(), style };
        app.handle_stroke(normalized(&points), raw);

        assert!(app.session.answers().is_empty());
        assert_eq!(app.session.strokes(0).len(), 1);
    }

    #[test]
    fn test_pause_discards_open_confirmation() {
        let mut app = app(5);
        app.dialog = Some(Dialog::ConfirmFinish);
        app.handle_toolbar(ToolbarAction::Pause);

        assert!(app.dialog.is_none());
        assert_eq!(app.session.phase(), Phase::Paused);
        assert!(app.paused.is_some());
        assert!(app.report.is_none());
    }
}
