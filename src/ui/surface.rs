// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The paper drawing surface.
//!
//! Renders the current page (text, highlights, flag glyphs, committed
//! ink, live path) and feeds pointer input into the stroke capture
//! engine. The surface never mutates session state itself; completed
//! gestures and icon clicks flow back to the app as [`SurfaceAction`]s.

use crate::gesture::capture::{LivePath, StrokeCapture};
use crate::models::stroke::{BlendMode, Point, StrokeStyle};
use crate::session::controller::PaperSession;
use crate::ui::layout::{self, PageLayout, PaperTheme};
use crate::util::geometry;
use egui::{vec2, Align2, Color32, Event, FontId, Pos2, Rounding, Sense, Shape, Stroke as EguiStroke};
use std::collections::HashMap;

/// Result of surface interaction, handled by the app.
pub enum SurfaceAction {
    None,
    /// A gesture completed with enough samples to be a stroke. Carries
    /// the normalized path and the raw pixel path (with its page and
    /// style) for classification.
    StrokeFinished { points: Vec<Point>, raw: LivePath },
    FlagClicked { question: usize },
    ViewSource { question: usize },
}

/// Display the current page and handle drawing input.
///
/// Each call runs a fresh layout pass for the visible page and stores it
/// in `layouts` keyed by page index, so a gesture that completes after
/// the user paged away is still hit-tested against the boxes of the page
/// it was drawn on.
pub fn show(
    ui: &mut egui::Ui,
    session: &PaperSession,
    capture: &mut StrokeCapture,
    style: StrokeStyle,
    theme: &PaperTheme,
    layouts: &mut HashMap<usize, PageLayout>,
) -> SurfaceAction {
    let page = session.current_page();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let width = ui.available_width();
            let (questions, start) = session.questions_on_page(page);
            let page_layout =
                ui.fonts(|fonts| layout::layout_page(fonts, page, questions, start, width, theme));

            let page_size = vec2(width, page_layout.height);
            let (rect, response) = ui.allocate_exact_size(page_size, Sense::click_and_drag());
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                // Nothing sensible to lay out or draw this frame.
                layouts.insert(page, page_layout);
                return SurfaceAction::None;
            }

            let to_page = |pos: Pos2| pos - rect.min.to_vec2();

            // ---- input ----

            let mut action = SurfaceAction::None;

            if session.is_active() {
                if response.drag_started() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        capture.begin(page, to_page(pos), style);
                    }
                }

                if capture.is_active() {
                    // Consume every coalesced movement sample delivered
                    // this frame, not just the latest position; fast
                    // strokes look faceted otherwise.
                    let moves: Vec<Pos2> = ui.input(|i| {
                        i.events
                            .iter()
                            .filter_map(|e| match e {
                                Event::PointerMoved(p) => Some(*p),
                                _ => None,
                            })
                            .collect()
                    });
                    if moves.is_empty() {
                        if let Some(pos) = response.interact_pointer_pos() {
                            capture.append(to_page(pos));
                        }
                    } else {
                        for pos in moves {
                            capture.append(to_page(pos));
                        }
                    }

                    if ui.input(|i| i.events.iter().any(|e| matches!(e, Event::PointerGone))) {
                        capture.cancel();
                    } else if response.drag_stopped() {
                        if let Some((points, raw)) = capture.finish(page_size) {
                            action = SurfaceAction::StrokeFinished { points, raw };
                        }
                    }
                }

                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let local = to_page(pos);
                        if let Some(flag) = layout::hit_flag(&page_layout, local) {
                            action = SurfaceAction::FlagClicked {
                                question: flag.question,
                            };
                        } else if let Some(source) = layout::hit_source(&page_layout, local) {
                            action = SurfaceAction::ViewSource {
                                question: source.question,
                            };
                        }
                    }
                }
            }

            // ---- paint ----

            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, Rounding::ZERO, theme.page_background);

            // Highlights behind the selected options.
            for opt_box in &page_layout.option_boxes {
                let Some(answer) = session.answer(opt_box.question) else {
                    continue;
                };
                let option_text = &session.questions()[opt_box.question].options[opt_box.option];
                if &answer.selected != option_text {
                    continue;
                }
                let row = opt_box.row_rect.translate(rect.min.to_vec2()).expand(3.0);
                painter.rect_filled(row, Rounding::same(4.0), theme.highlight);
                if session.settings().reveal_correctness {
                    let edge = if answer.correct { theme.correct } else { theme.incorrect };
                    painter.rect_stroke(row, Rounding::same(4.0), EguiStroke::new(1.5, edge));
                }
            }

            // Question and option text.
            for block in &page_layout.blocks {
                painter.galley(rect.min + block.pos.to_vec2(), block.galley.clone(), theme.text);
            }

            // Margin icons: flag per question, source link where present.
            for flag_box in &page_layout.flag_boxes {
                let color = match session.questions()[flag_box.question].flag {
                    Some(_) => theme.flag,
                    None => theme.muted.gamma_multiply(0.5),
                };
                painter.text(
                    flag_box.rect.translate(rect.min.to_vec2()).center(),
                    Align2::CENTER_CENTER,
                    "⚑",
                    FontId::proportional(15.0),
                    color,
                );
            }
            for source_box in &page_layout.source_boxes {
                painter.text(
                    source_box.rect.translate(rect.min.to_vec2()).center(),
                    Align2::CENTER_CENTER,
                    "§",
                    FontId::proportional(14.0),
                    theme.muted,
                );
            }

            // Committed ink, denormalized against the current page size
            // so annotations stay anchored when layout shifts.
            for stroke in session.strokes(page) {
                let points: Vec<Pos2> = geometry::denormalize_path(&stroke.points, page_size)
                    .into_iter()
                    .map(|p| p + rect.min.to_vec2())
                    .collect();
                painter.add(Shape::line(points, stroke_paint(&stroke.style)));
            }

            // Live path on top, smoothed so freehand lines do not look
            // polygonal.
            if let Some(live) = capture.live() {
                if live.page == page {
                    let points: Vec<Pos2> = geometry::smooth_path(&live.points)
                        .into_iter()
                        .map(|p| p + rect.min.to_vec2())
                        .collect();
                    let paint = if live.style.blend == BlendMode::Erase {
                        EguiStroke::new(live.style.width, theme.muted.gamma_multiply(0.35))
                    } else {
                        stroke_paint(&live.style)
                    };
                    painter.add(Shape::line(points, paint));
                }
            }

            layouts.insert(page, page_layout);
            action
        })
        .inner
}

fn stroke_paint(style: &StrokeStyle) -> EguiStroke {
    let [r, g, b, a] = style.color;
    // Multiply blend is approximated with translucency; the page text
    // stays readable under highlighter ink.
    let alpha = if style.blend == BlendMode::Multiply { a.min(90) } else { a };
    EguiStroke::new(style.width, Color32::from_rgba_unmultiplied(r, g, b, alpha))
}

/// Page footer: current page indicator under the surface.
pub fn page_footer(ui: &mut egui::Ui, session: &PaperSession) {
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!(
            "Page {} of {}",
            session.current_page() + 1,
            session.page_count()
        ));
        let range = session.page_range(session.current_page());
        ui.separator();
        ui.label(format!("Questions {}-{}", range.start + 1, range.end));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_highlighter_paint_is_translucent() {
        let style = StrokeStyle::new([255, 220, 90, 255], 12.0, BlendMode::Multiply);
        let paint = stroke_paint(&style);
        assert!(paint.color.a() <= 90);

        let pen = StrokeStyle::new([20, 20, 20, 255], 2.0, BlendMode::Normal);
        assert_eq!(stroke_paint(&pen).color.a(), 255);
    }

    #[test]
    fn test_pos_translation_roundtrip() {
        let rect_min = pos2(40.0, 60.0);
        let screen = pos2(100.0, 100.0);
        let local = screen - rect_min.to_vec2();
        assert_eq!(local, pos2(60.0, 40.0));
        assert_eq!(local + rect_min.to_vec2(), screen);
    }
}
