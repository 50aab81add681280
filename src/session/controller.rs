// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Answer state and pagination controller.
//!
//! [`PaperSession`] is the single source of truth for one paper-mode
//! exam: the answer map, the per-page drawings, the current page, and
//! the countdown. The drawing surface and the answer sheet overlay are
//! both views over it. A session ends by handing a [`FinishReport`] or a
//! [`PausedState`] back to the host.

use crate::models::question::{FlagTag, Question};
use crate::models::session_state::{Answer, FinishReport, PausedState, SessionSettings, TimeMode};
use crate::models::stroke::Stroke;
use crate::gesture::eraser;
use egui::{Pos2, Vec2};
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

/// Session lifecycle. Paused and Finished are terminal; the host owns
/// whatever comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Paused,
    Finished,
}

/// Result of asking to clear the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearPageOutcome {
    /// The page had no answers; its drawings were cleared immediately.
    Cleared,
    /// The page has recorded answers; the caller must confirm a
    /// [`ClearChoice`] before anything is discarded.
    NeedsConfirmation,
}

/// Confirmed resolution of a destructive page clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearChoice {
    DrawingsOnly,
    DrawingsAndAnswers,
}

/// Authoritative state for one paper-mode exam session.
pub struct PaperSession {
    questions: Vec<Question>,
    settings: SessionSettings,
    questions_per_page: usize,
    /// Absolute question index -> answer. Absence means unanswered.
    answers: BTreeMap<usize, Answer>,
    /// Page index -> committed strokes. Independent of the answer map.
    drawings: HashMap<usize, Vec<Stroke>>,
    current_page: usize,
    remaining_secs: Option<u32>,
    phase: Phase,
    next_stroke_id: u64,
}

impl PaperSession {
    pub fn new(questions: Vec<Question>, settings: SessionSettings, questions_per_page: usize) -> Self {
        let remaining_secs = match settings.time_mode {
            TimeMode::Total => Some(settings.duration_secs),
            TimeMode::PerQuestion => {
                // Paper pages hold several questions, so a per-question
                // countdown has nothing meaningful to attach to.
                log::warn!("per-question timing has no countdown in paper mode");
                None
            }
            TimeMode::None => None,
        };

        Self {
            questions,
            settings,
            questions_per_page: questions_per_page.max(1),
            answers: BTreeMap::new(),
            drawings: HashMap::new(),
            current_page: 0,
            remaining_secs,
            phase: Phase::Active,
            next_stroke_id: 0,
        }
    }

    /// Rebuild a session from a paused snapshot. Answers, position, and
    /// remaining time come back; drawings start blank.
    pub fn resume(paused: PausedState, questions_per_page: usize) -> Self {
        let mut session = Self::new(paused.questions, paused.settings, questions_per_page);
        session.remaining_secs = paused.remaining_secs;
        for (index, answer) in paused.answers {
            if index < session.questions.len() {
                session.answers.insert(index, answer);
            }
        }
        session.current_page = session.page_of_question(paused.current_question);
        log::info!(
            "resumed session at question {} with {} answers",
            paused.current_question,
            session.answers.len()
        );
        session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.remaining_secs
    }

    // ---- pagination ----

    pub fn page_count(&self) -> usize {
        self.questions.len().div_ceil(self.questions_per_page).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn goto_page(&mut self, page: usize) {
        let clamped = page.min(self.page_count() - 1);
        if clamped != self.current_page {
            self.current_page = clamped;
            log::info!("viewing page {}", clamped);
        }
    }

    /// Absolute question indices assigned to a page.
    pub fn page_range(&self, page: usize) -> Range<usize> {
        let start = (page * self.questions_per_page).min(self.questions.len());
        let end = (start + self.questions_per_page).min(self.questions.len());
        start..end
    }

    /// The questions on a page plus the absolute index of the first one.
    pub fn questions_on_page(&self, page: usize) -> (&[Question], usize) {
        let range = self.page_range(page);
        let start = range.start;
        (&self.questions[range], start)
    }

    pub fn page_of_question(&self, question: usize) -> usize {
        (question / self.questions_per_page).min(self.page_count() - 1)
    }

    // ---- answers ----

    pub fn answer(&self, question: usize) -> Option<&Answer> {
        self.answers.get(&question)
    }

    pub fn answers(&self) -> &BTreeMap<usize, Answer> {
        &self.answers
    }

    fn make_answer(&self, question: usize, option: usize) -> Option<Answer> {
        let q = self.questions.get(question)?;
        let selected = q.options.get(option)?.clone();
        let correct = selected == q.correct;
        Some(Answer { selected, correct })
    }

    /// Record an answer unconditionally (circle gesture). Re-circling
    /// the same option is not an undo on paper, so this always sets.
    pub fn select_answer(&mut self, question: usize, option: usize) {
        if !self.is_active() {
            return;
        }
        if let Some(answer) = self.make_answer(question, option) {
            log::info!(
                "question {} answered '{}' ({})",
                question,
                answer.selected,
                if answer.correct { "correct" } else { "incorrect" }
            );
            self.answers.insert(question, answer);
        }
    }

    /// Toggle an answer (answer-sheet click): clicking the already
    /// selected option removes the answer, anything else sets it.
    pub fn toggle_answer(&mut self, question: usize, option: usize) {
        if !self.is_active() {
            return;
        }
        let Some(answer) = self.make_answer(question, option) else {
            return;
        };
        if self.answers.get(&question).map(|a| &a.selected) == Some(&answer.selected) {
            self.answers.remove(&question);
            log::info!("question {} answer removed", question);
        } else {
            self.answers.insert(question, answer);
        }
    }

    // ---- flags ----

    /// Advance a question's flag to the next tag in the cycle and return
    /// the new value, for the host's flag-change callback.
    pub fn cycle_flag(&mut self, question: usize) -> Option<Option<FlagTag>> {
        let q = self.questions.get_mut(question)?;
        q.flag = FlagTag::next(q.flag);
        Some(q.flag)
    }

    pub fn set_flag(&mut self, question: usize, flag: Option<FlagTag>) {
        if let Some(q) = self.questions.get_mut(question) {
            q.flag = flag;
        }
    }

    // ---- drawings ----

    pub fn next_stroke_id(&mut self) -> u64 {
        let id = self.next_stroke_id;
        self.next_stroke_id += 1;
        id
    }

    pub fn commit_stroke(&mut self, page: usize, stroke: Stroke) {
        if !self.is_active() {
            return;
        }
        self.drawings.entry(page).or_default().push(stroke);
    }

    pub fn strokes(&self, page: usize) -> &[Stroke] {
        self.drawings.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Apply an eraser path to a page; returns how many strokes it took.
    pub fn erase(&mut self, page: usize, eraser_path: &[Pos2], eraser_width: f32, page_size: Vec2) -> usize {
        let Some(strokes) = self.drawings.get_mut(&page) else {
            return 0;
        };
        let erased = eraser::resolve_erased(eraser_path, eraser_width, strokes, page_size);
        if erased.is_empty() {
            return 0;
        }
        strokes.retain(|s| !erased.contains(&s.id));
        log::info!("erased {} strokes on page {}", erased.len(), page);
        erased.len()
    }

    // ---- page clearing ----

    fn page_has_answers(&self, page: usize) -> bool {
        self.page_range(page).any(|q| self.answers.contains_key(&q))
    }

    /// Ask to clear the current page. Ink-only pages clear immediately;
    /// pages with recorded answers require a confirmed [`ClearChoice`]
    /// first, because silently discarding answers alongside ink is
    /// destructive. Inert outside the Active phase.
    pub fn clear_page_request(&mut self) -> ClearPageOutcome {
        if !self.is_active() {
            return ClearPageOutcome::Cleared;
        }
        if self.page_has_answers(self.current_page) {
            ClearPageOutcome::NeedsConfirmation
        } else {
            self.drawings.remove(&self.current_page);
            ClearPageOutcome::Cleared
        }
    }

    /// Apply a confirmed clear of the current page.
    pub fn clear_page(&mut self, choice: ClearChoice) {
        if !self.is_active() {
            return;
        }
        self.drawings.remove(&self.current_page);
        if choice == ClearChoice::DrawingsAndAnswers {
            for q in self.page_range(self.current_page) {
                self.answers.remove(&q);
            }
        }
        log::info!("cleared page {} ({:?})", self.current_page, choice);
    }

    // ---- timing ----

    /// Advance the countdown by one second. Returns the finish report
    /// when the countdown reaches zero (auto-finish). No-op outside the
    /// Active phase, so a stray tick after pause/finish cannot fire.
    pub fn tick_second(&mut self) -> Option<FinishReport> {
        if !self.is_active() {
            return None;
        }
        let remaining = self.remaining_secs.as_mut()?;
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            log::info!("time expired, auto-finishing");
            return self.finish();
        }
        None
    }

    // ---- session end ----

    /// End the session, partitioning questions into failed (answered
    /// incorrectly) and unanswered. Returns `None` outside the Active
    /// phase: Paused and Finished are both terminal, so a stale Finish
    /// confirmation cannot end a session that already left Active.
    pub fn finish(&mut self) -> Option<FinishReport> {
        if !self.is_active() {
            return None;
        }
        self.phase = Phase::Finished;

        let mut failed = Vec::new();
        let mut unanswered = Vec::new();
        for (index, question) in self.questions.iter().enumerate() {
            match self.answers.get(&index) {
                Some(answer) if !answer.correct => failed.push(question.clone()),
                Some(_) => {}
                None => unanswered.push(question.clone()),
            }
        }

        log::info!(
            "finished: {} failed, {} unanswered, {} answered",
            failed.len(),
            unanswered.len(),
            self.answers.len()
        );

        Some(FinishReport {
            failed,
            unanswered,
            answers: self.answers.iter().map(|(i, a)| (*i, a.clone())).collect(),
        })
    }

    /// Suspend the session into a serializable snapshot. Drawings are
    /// not part of the snapshot; they come back blank on resume. Returns
    /// `None` outside the Active phase.
    pub fn pause(&mut self) -> Option<PausedState> {
        if !self.is_active() {
            return None;
        }
        self.phase = Phase::Paused;
        Some(PausedState {
            questions: self.questions.clone(),
            answers: self.answers.iter().map(|(i, a)| (*i, a.clone())).collect(),
            current_question: self.page_range(self.current_page).start,
            settings: self.settings.clone(),
            remaining_secs: self.remaining_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stroke::{BlendMode, Point, StrokeStyle};
    use egui::{pos2, vec2};

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::new(
                    format!("q{i}"),
                    format!("Question {i}?"),
                    vec!["alpha".into(), "beta".into(), "gamma".into(), "delta".into()],
                    "beta",
                )
            })
            .collect()
    }

    fn session(n: usize) -> PaperSession {
        PaperSession::new(questions(n), SessionSettings::default(), 5)
    }

    fn ink_stroke(id: u64) -> Stroke {
        Stroke::new(
            id,
            vec![Point::new(0.1, 0.1), Point::new(0.2, 0.2), Point::new(0.3, 0.3)],
            StrokeStyle::new([0, 0, 0, 255], 2.0, BlendMode::Normal),
        )
    }

    #[test]
    fn test_twelve_questions_paginate_as_5_5_2() {
        let s = session(12);
        assert_eq!(s.page_count(), 3);
        assert_eq!(s.page_range(0), 0..5);
        assert_eq!(s.page_range(1), 5..10);
        assert_eq!(s.page_range(2), 10..12);

        let (page_questions, start) = s.questions_on_page(2);
        assert_eq!(start, 10);
        assert_eq!(page_questions.len(), 2);
        assert_eq!(page_questions[0].id, "q10");
        assert_eq!(page_questions[1].id, "q11");
    }

    #[test]
    fn test_circle_always_sets_sheet_toggles() {
        let mut s = session(12);

        // Sheet click on option b sets, second click removes.
        s.toggle_answer(3, 1);
        assert_eq!(s.answer(3).unwrap().selected, "beta");
        s.toggle_answer(3, 1);
        assert!(s.answer(3).is_none());

        // Circling option c always sets, regardless of prior state.
        s.select_answer(3, 2);
        assert_eq!(s.answer(3).unwrap().selected, "gamma");
        s.select_answer(3, 2);
        assert_eq!(s.answer(3).unwrap().selected, "gamma");
    }

    #[test]
    fn test_answer_correctness_derived() {
        let mut s = session(3);
        s.select_answer(0, 1);
        s.select_answer(1, 0);
        assert!(s.answer(0).unwrap().correct);
        assert!(!s.answer(1).unwrap().correct);
    }

    #[test]
    fn test_finish_partitions_failed_and_unanswered() {
        let mut s = session(10);
        s.select_answer(0, 1); // correct
        s.select_answer(1, 0); // incorrect

        let report = s.finish().expect("active session finishes");
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, "q1");
        assert_eq!(report.unanswered.len(), 8);
        assert!(report.unanswered.iter().all(|q| q.id != "q0" && q.id != "q1"));
        assert_eq!(report.answers.len(), 2);
        assert_eq!(s.phase(), Phase::Finished);
    }

    #[test]
    fn test_total_time_auto_finishes_all_unanswered() {
        let settings = SessionSettings {
            time_mode: TimeMode::Total,
            duration_secs: 600,
            ..SessionSettings::default()
        };
        let mut s = PaperSession::new(questions(12), settings, 5);

        let mut report = None;
        for _ in 0..600 {
            if let Some(r) = s.tick_second() {
                report = Some(r);
                break;
            }
        }

        let report = report.expect("countdown should auto-finish");
        assert_eq!(report.unanswered.len(), 12);
        assert!(report.failed.is_empty());
        assert_eq!(s.phase(), Phase::Finished);

        // Stray ticks after finish are inert.
        assert!(s.tick_second().is_none());
    }

    #[test]
    fn test_untimed_session_never_ticks_out() {
        let mut s = session(2);
        for _ in 0..1000 {
            assert!(s.tick_second().is_none());
        }
        assert!(s.is_active());
    }

    #[test]
    fn test_clear_page_without_answers_clears_ink() {
        let mut s = session(12);
        let id = s.next_stroke_id();
        s.commit_stroke(0, ink_stroke(id));
        assert_eq!(s.clear_page_request(), ClearPageOutcome::Cleared);
        assert!(s.strokes(0).is_empty());
    }

    #[test]
    fn test_clear_page_with_answers_needs_confirmation() {
        let mut s = session(12);
        let id = s.next_stroke_id();
        s.commit_stroke(0, ink_stroke(id));
        s.select_answer(2, 1);

        // The request alone must not mutate anything.
        assert_eq!(s.clear_page_request(), ClearPageOutcome::NeedsConfirmation);
        assert_eq!(s.strokes(0).len(), 1);
        assert!(s.answer(2).is_some());

        // Drawings-only keeps the answers.
        s.clear_page(ClearChoice::DrawingsOnly);
        assert!(s.strokes(0).is_empty());
        assert!(s.answer(2).is_some());

        // Drawings-and-answers clears this page's answers only.
        s.select_answer(7, 1); // page 1
        let id = s.next_stroke_id();
        s.commit_stroke(0, ink_stroke(id));
        s.clear_page(ClearChoice::DrawingsAndAnswers);
        assert!(s.answer(2).is_none());
        assert!(s.answer(7).is_some());
    }

    #[test]
    fn test_drawings_independent_of_answers() {
        let mut s = session(12);
        let id = s.next_stroke_id();
        s.commit_stroke(1, ink_stroke(id));
        s.select_answer(6, 1);

        s.goto_page(1);
        s.clear_page(ClearChoice::DrawingsOnly);
        assert!(s.strokes(1).is_empty());
        assert!(s.answer(6).is_some());
    }

    #[test]
    fn test_erase_routes_through_resolver() {
        let mut s = session(12);
        let id = s.next_stroke_id();
        s.commit_stroke(0, ink_stroke(id));
        let page_size = vec2(100.0, 100.0);

        // Far away: nothing erased.
        assert_eq!(s.erase(0, &[pos2(90.0, 90.0)], 4.0, page_size), 0);
        // On top of the stroke.
        assert_eq!(s.erase(0, &[pos2(20.0, 20.0)], 4.0, page_size), 1);
        assert!(s.strokes(0).is_empty());
    }

    #[test]
    fn test_pause_resume_roundtrip_drops_drawings() {
        let settings = SessionSettings {
            time_mode: TimeMode::Total,
            duration_secs: 300,
            ..SessionSettings::default()
        };
        let mut s = PaperSession::new(questions(12), settings, 5);
        s.select_answer(0, 1);
        s.select_answer(6, 0);
        let id = s.next_stroke_id();
        s.commit_stroke(0, ink_stroke(id));
        s.goto_page(1);
        for _ in 0..60 {
            s.tick_second();
        }

        let paused = s.pause().expect("active session pauses");
        assert_eq!(s.phase(), Phase::Paused);
        assert_eq!(paused.current_question, 5);
        assert_eq!(paused.remaining_secs, Some(240));
        assert_eq!(paused.answers.len(), 2);

        let resumed = PaperSession::resume(paused, 5);
        assert!(resumed.is_active());
        assert_eq!(resumed.current_page(), 1);
        assert_eq!(resumed.remaining_secs(), Some(240));
        assert_eq!(resumed.answer(0).unwrap().selected, "beta");
        // Annotations are not part of the snapshot.
        assert!(resumed.strokes(0).is_empty());
    }

    #[test]
    fn test_mutations_ignored_after_finish() {
        let mut s = session(3);
        assert!(s.finish().is_some());
        s.select_answer(0, 1);
        s.commit_stroke(0, ink_stroke(0));
        assert!(s.answer(0).is_none());
        assert!(s.strokes(0).is_empty());
    }

    #[test]
    fn test_finish_unreachable_after_pause() {
        let mut s = session(5);
        s.select_answer(0, 1);
        assert!(s.pause().is_some());

        // Paused is terminal: a stale Finish confirmation must not end
        // the session or produce a second report.
        assert!(s.finish().is_none());
        assert_eq!(s.phase(), Phase::Paused);
        assert!(s.tick_second().is_none());
    }

    #[test]
    fn test_pause_unreachable_after_finish() {
        let mut s = session(3);
        assert!(s.finish().is_some());
        assert!(s.pause().is_none());
        assert_eq!(s.phase(), Phase::Finished);
    }

    #[test]
    fn test_clear_page_inert_after_pause() {
        let mut s = session(5);
        s.select_answer(0, 1);
        let id = s.next_stroke_id();
        s.commit_stroke(0, ink_stroke(id));
        s.pause();

        // The request no longer reports answers to confirm, and even a
        // confirmed clear must not touch a paused session.
        assert_eq!(s.clear_page_request(), ClearPageOutcome::Cleared);
        s.clear_page(ClearChoice::DrawingsAndAnswers);
        assert_eq!(s.strokes(0).len(), 1);
        assert!(s.answer(0).is_some());
    }

    #[test]
    fn test_flag_cycle_reports_new_value() {
        let mut s = session(3);
        assert_eq!(s.cycle_flag(1), Some(Some(FlagTag::Good)));
        assert_eq!(s.cycle_flag(1), Some(Some(FlagTag::Bad)));
        s.set_flag(1, None);
        assert_eq!(s.questions()[1].flag, None);
        assert_eq!(s.cycle_flag(99), None);
    }
}
