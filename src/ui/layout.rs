// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Page layout engine.
//!
//! Lays out the questions assigned to one page by simulating text
//! wrapping at the page's current pixel width, producing the page's
//! required pixel height together with the hit rectangle of every
//! option-letter token and per-question flag icon. The surface allocates
//! exactly the computed height and paints the same galleys, so the
//! rectangles always match what is drawn.
//!
//! A [`PageLayout`] is a projection of one layout pass: it is valid only
//! until the page's content or width changes, and hit tests must use the
//! layout of the page the gesture was drawn on.

use crate::models::question::Question;
use egui::text::Fonts;
use egui::{pos2, Color32, FontId, Galley, Pos2, Rect, Vec2};
use std::sync::Arc;

/// Explicit color scheme for a layout/render pass. Passed in by the
/// caller; layout never reads ambient style state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperTheme {
    pub page_background: Color32,
    pub text: Color32,
    pub muted: Color32,
    pub highlight: Color32,
    pub correct: Color32,
    pub incorrect: Color32,
    pub flag: Color32,
    pub rule: Color32,
}

impl PaperTheme {
    pub fn light() -> Self {
        Self {
            page_background: Color32::from_rgb(251, 249, 243),
            text: Color32::from_rgb(35, 35, 40),
            muted: Color32::from_rgb(130, 128, 120),
            highlight: Color32::from_rgba_unmultiplied(255, 220, 90, 90),
            correct: Color32::from_rgb(40, 140, 70),
            incorrect: Color32::from_rgb(190, 60, 50),
            flag: Color32::from_rgb(200, 120, 40),
            rule: Color32::from_rgb(225, 220, 208),
        }
    }

    pub fn dark() -> Self {
        Self {
            page_background: Color32::from_rgb(32, 33, 36),
            text: Color32::from_rgb(222, 222, 226),
            muted: Color32::from_rgb(140, 140, 146),
            highlight: Color32::from_rgba_unmultiplied(255, 214, 70, 70),
            correct: Color32::from_rgb(90, 190, 120),
            incorrect: Color32::from_rgb(230, 110, 100),
            flag: Color32::from_rgb(235, 160, 70),
            rule: Color32::from_rgb(55, 56, 60),
        }
    }
}

/// Hit rectangle of one option's leading letter token ("a)" marker).
///
/// Only the marker zone maps to "circle this option": users circle the
/// letter, not the option text.
#[derive(Debug, Clone)]
pub struct OptionBox {
    /// Absolute question index.
    pub question: usize,
    pub option: usize,
    /// Page-local rect of the letter-and-parenthesis token.
    pub letter_rect: Rect,
    /// Page-local rect of the whole option row, for highlighting.
    pub row_rect: Rect,
}

/// Hit rectangle of one question's margin flag icon.
#[derive(Debug, Clone)]
pub struct FlagBox {
    pub question: usize,
    pub rect: Rect,
}

/// Hit rectangle of a question's view-source icon. Only present for
/// questions that carry source references.
#[derive(Debug, Clone)]
pub struct SourceBox {
    pub question: usize,
    pub rect: Rect,
}

/// One measured text run with its page-local position.
pub struct TextBlock {
    pub galley: Arc<Galley>,
    pub pos: Pos2,
}

/// The result of one layout pass over one page.
pub struct PageLayout {
    pub page: usize,
    /// Page pixel width the pass was computed at.
    pub width: f32,
    /// Required page pixel height, known before anything is painted.
    pub height: f32,
    pub blocks: Vec<TextBlock>,
    pub option_boxes: Vec<OptionBox>,
    pub flag_boxes: Vec<FlagBox>,
    pub source_boxes: Vec<SourceBox>,
}

const MARGIN: f32 = 20.0;
/// Right margin reserved for the flag column.
const FLAG_COLUMN: f32 = 36.0;
const FLAG_SIZE: f32 = 18.0;
const OPTION_INDENT: f32 = 26.0;
const OPTION_SPACING: f32 = 7.0;
const QUESTION_SPACING: f32 = 24.0;
/// Slop added around the letter token so a slightly offset circle still
/// hits it.
const LETTER_SLOP: f32 = 5.0;

fn question_font() -> FontId {
    FontId::proportional(16.5)
}

fn option_font() -> FontId {
    FontId::proportional(15.0)
}

/// Lay out `questions` (starting at absolute index `start`) for a page
/// of the given pixel width.
pub fn layout_page(
    fonts: &Fonts,
    page: usize,
    questions: &[Question],
    start: usize,
    width: f32,
    theme: &PaperTheme,
) -> PageLayout {
    let wrap = (width - 2.0 * MARGIN - FLAG_COLUMN).max(50.0);
    let option_wrap = (wrap - OPTION_INDENT).max(50.0);

    let mut blocks = Vec::new();
    let mut option_boxes = Vec::new();
    let mut flag_boxes = Vec::new();
    let mut source_boxes = Vec::new();
    let mut cursor_y = MARGIN;

    for (offset, question) in questions.iter().enumerate() {
        let index = start + offset;

        let heading = fonts.layout(
            format!("{}. {}", index + 1, question.text),
            question_font(),
            theme.text,
            wrap,
        );
        let heading_pos = pos2(MARGIN, cursor_y);

        // Flag hit-zone sits in the right margin, level with the
        // question heading.
        flag_boxes.push(FlagBox {
            question: index,
            rect: Rect::from_min_size(
                pos2(width - MARGIN - FLAG_SIZE, cursor_y),
                Vec2::splat(FLAG_SIZE),
            ),
        });
        if !question.sources.is_empty() {
            source_boxes.push(SourceBox {
                question: index,
                rect: Rect::from_min_size(
                    pos2(width - MARGIN - FLAG_SIZE, cursor_y + FLAG_SIZE + 4.0),
                    Vec2::splat(FLAG_SIZE),
                ),
            });
        }

        cursor_y += heading.size().y + OPTION_SPACING;
        blocks.push(TextBlock {
            galley: heading,
            pos: heading_pos,
        });

        for (opt, text) in question.options.iter().enumerate() {
            let letter = format!("{})", Question::option_letter(opt));
            // Measure the marker token alone so its rect covers exactly
            // the leading "a)" zone of the row.
            let letter_galley = fonts.layout(letter.clone(), option_font(), theme.text, f32::INFINITY);
            let letter_size = letter_galley.size();

            let row = fonts.layout(
                format!("{letter} {text}"),
                option_font(),
                theme.text,
                option_wrap,
            );
            let row_pos = pos2(MARGIN + OPTION_INDENT, cursor_y);
            let row_size = row.size();

            option_boxes.push(OptionBox {
                question: index,
                option: opt,
                letter_rect: Rect::from_min_size(row_pos, letter_size).expand(LETTER_SLOP),
                row_rect: Rect::from_min_size(row_pos, row_size),
            });

            cursor_y += row_size.y + OPTION_SPACING;
            blocks.push(TextBlock {
                galley: row,
                pos: row_pos,
            });
        }

        cursor_y += QUESTION_SPACING;
    }

    PageLayout {
        page,
        width,
        height: (cursor_y + MARGIN).max(100.0),
        blocks,
        option_boxes,
        flag_boxes,
        source_boxes,
    }
}

/// The option whose letter token contains `point`, if any.
pub fn hit_option(layout: &PageLayout, point: Pos2) -> Option<&OptionBox> {
    layout
        .option_boxes
        .iter()
        .find(|b| b.letter_rect.contains(point))
}

/// The flag icon containing `point`, if any.
pub fn hit_flag(layout: &PageLayout, point: Pos2) -> Option<&FlagBox> {
    layout.flag_boxes.iter().find(|b| b.rect.contains(point))
}

/// The view-source icon containing `point`, if any.
pub fn hit_source(layout: &PageLayout, point: Pos2) -> Option<&SourceBox> {
    layout.source_boxes.iter().find(|b| b.rect.contains(point))
}
