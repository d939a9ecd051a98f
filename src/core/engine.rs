// src/core/engine.rs
use crate::core::jamo;
use crate::core::types::{CharState, RenderChar, RunStats};
use std::time::Instant;

/// Shown when a passage source hands over nothing usable.
const FALLBACK_LINE: &str = "타자 연습을 시작하세요";

/// Elapsed time is floored at one millisecond so CPM/WPM stay finite.
const MIN_ELAPSED_MINUTES: f64 = 1.0 / 60_000.0;

/// Judges typed input against the loaded passage, one line at a time.
///
/// Correctness is accounted twice on purpose: live keystroke counters
/// track every attempt as it happens, while accuracy is recomputed from
/// the buffer at line submission. A typo fixed before submission counts
/// against the live match rate but not against accuracy.
pub struct TypingEngine {
    lines: Vec<String>,
    current_line: usize,
    buffer: Vec<char>,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    // Live diagnostics, updated per keystroke.
    total_keystrokes: u64,
    matched_keystrokes: u64,
    // Finalization-time counters, updated on line submission.
    submitted_chars: u64,
    submitted_words: u64,
    evaluated_chars: u64,
    correct_chars: u64,
}

impl TypingEngine {
    pub fn new() -> Self {
        let mut engine = Self {
            lines: Vec::new(),
            current_line: 0,
            buffer: Vec::new(),
            started_at: None,
            finished_at: None,
            total_keystrokes: 0,
            matched_keystrokes: 0,
            submitted_chars: 0,
            submitted_words: 0,
            evaluated_chars: 0,
            correct_chars: 0,
        };
        engine.load_passage(Vec::new());
        engine
    }

    /// Replaces the passage and resets the whole run. Blank lines are
    /// dropped; an empty result self-heals to a single fallback line.
    pub fn load_passage(&mut self, lines: Vec<String>) {
        self.lines = lines
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect();
        if self.lines.is_empty() {
            self.lines.push(FALLBACK_LINE.to_string());
        }
        self.current_line = 0;
        self.buffer.clear();
        self.started_at = None;
        self.finished_at = None;
        self.total_keystrokes = 0;
        self.matched_keystrokes = 0;
        self.submitted_chars = 0;
        self.submitted_words = 0;
        self.evaluated_chars = 0;
        self.correct_chars = 0;
    }

    /// Starts the clock on the first real keystroke. Idempotent, so idle
    /// time between loading a passage and typing is never billed.
    pub fn ensure_timing_started(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    /// Buffers one committed character. Overflow past the line length and
    /// input after completion are dropped.
    pub fn try_apply_text(&mut self, ch: char) -> bool {
        if self.is_complete() {
            return false;
        }
        let target: Vec<char> = self.lines[self.current_line].chars().collect();
        if self.buffer.len() >= target.len() {
            return false;
        }
        self.ensure_timing_started();
        self.total_keystrokes += 1;
        if target[self.buffer.len()] == ch {
            self.matched_keystrokes += 1;
        }
        self.buffer.push(ch);
        true
    }

    /// Removes the last buffered character; false when nothing is buffered.
    pub fn handle_backspace(&mut self) -> bool {
        self.buffer.pop().is_some()
    }

    /// A line may advance once it is fully filled. Typos do not block it.
    pub fn can_advance_line(&self) -> bool {
        !self.is_complete()
            && self.buffer.len() == self.lines[self.current_line].chars().count()
    }

    /// Finalizes the active line: folds its length, word count, and
    /// end-state correctness into the run totals, then moves on. The
    /// completion timestamp freezes when the last line is passed.
    pub fn advance_line(&mut self) -> bool {
        if !self.can_advance_line() {
            return false;
        }
        let target: Vec<char> = self.lines[self.current_line].chars().collect();
        let correct = self
            .buffer
            .iter()
            .zip(target.iter())
            .filter(|(typed, expected)| typed == expected)
            .count();
        self.submitted_chars += target.len() as u64;
        self.evaluated_chars += target.len() as u64;
        self.correct_chars += correct as u64;
        self.submitted_words += count_words(&self.lines[self.current_line]);
        self.buffer.clear();
        self.current_line += 1;
        if self.current_line >= self.lines.len() {
            self.finished_at = Some(Instant::now());
        }
        true
    }

    /// Fresh per-character view of the active line for rendering.
    pub fn build_render_line(&self) -> Vec<RenderChar> {
        if self.is_complete() {
            return Vec::new();
        }
        self.lines[self.current_line]
            .chars()
            .enumerate()
            .map(|(i, target)| {
                let state = match self.buffer.get(i) {
                    None => CharState::Pending,
                    Some(&typed) if typed == target => CharState::Correct,
                    Some(_) => CharState::Incorrect,
                };
                RenderChar { target, state }
            })
            .collect()
    }

    /// Run statistics; live while typing, frozen once the passage is done.
    pub fn calculate_results(&self) -> RunStats {
        let started = match self.started_at {
            Some(at) => at,
            None => {
                return RunStats {
                    cpm: 0.0,
                    wpm: 0.0,
                    accuracy: 100.0,
                }
            }
        };
        let elapsed = match self.finished_at {
            Some(end) => end.duration_since(started),
            None => started.elapsed(),
        };
        let minutes = (elapsed.as_secs_f64() / 60.0).max(MIN_ELAPSED_MINUTES);
        let accuracy = if self.evaluated_chars == 0 {
            100.0
        } else {
            100.0 * self.correct_chars as f64 / self.evaluated_chars as f64
        };
        RunStats {
            cpm: self.submitted_chars as f64 / minutes,
            wpm: self.submitted_words as f64 / minutes,
            accuracy,
        }
    }

    /// Whether the character about to be typed is Hangul. The shell uses
    /// this to route keys through the composer. The position is clamped
    /// to the last character so a filled line still answers sensibly.
    pub fn is_current_target_hangul(&self) -> bool {
        if self.is_complete() {
            return false;
        }
        let target: Vec<char> = self.lines[self.current_line].chars().collect();
        let idx = self.buffer.len().min(target.len() - 1);
        jamo::is_hangul(target[idx])
    }

    pub fn is_complete(&self) -> bool {
        self.current_line >= self.lines.len()
    }

    pub fn current_line_text(&self) -> &str {
        if self.is_complete() {
            ""
        } else {
            &self.lines[self.current_line]
        }
    }

    pub fn next_line_text(&self) -> &str {
        match self.lines.get(self.current_line + 1) {
            Some(line) => line,
            None => "",
        }
    }

    pub fn current_line_index(&self) -> usize {
        self.current_line
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Live keystroke diagnostics: (attempted, matched at time of entry).
    /// These feed telemetry only; accuracy comes from finalized lines.
    pub fn keystroke_counts(&self) -> (u64, u64) {
        (self.total_keystrokes, self.matched_keystrokes)
    }
}

impl Default for TypingEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn count_words(line: &str) -> u64 {
    line.split_whitespace().count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(lines: &[&str]) -> TypingEngine {
        let mut engine = TypingEngine::new();
        engine.load_passage(lines.iter().map(|s| s.to_string()).collect());
        engine
    }

    fn type_str(engine: &mut TypingEngine, text: &str) {
        for ch in text.chars() {
            engine.try_apply_text(ch);
        }
    }

    #[test]
    fn empty_passage_self_heals() {
        let engine = engine_with(&[]);
        assert_eq!(engine.line_count(), 1);
        assert!(!engine.current_line_text().is_empty());

        let engine = engine_with(&["   ", "\t"]);
        assert_eq!(engine.line_count(), 1);
    }

    #[test]
    fn results_before_typing_are_neutral() {
        let engine = engine_with(&["cat"]);
        let stats = engine.calculate_results();
        assert_eq!(stats.cpm, 0.0);
        assert_eq!(stats.wpm, 0.0);
        assert_eq!(stats.accuracy, 100.0);
    }

    #[test]
    fn judges_cat_scenario() {
        let mut engine = engine_with(&["cat"]);
        type_str(&mut engine, "cax");

        let states: Vec<CharState> =
            engine.build_render_line().iter().map(|rc| rc.state).collect();
        assert_eq!(
            states,
            vec![CharState::Correct, CharState::Correct, CharState::Incorrect]
        );
        assert!(engine.can_advance_line());
        assert!(engine.advance_line());

        let stats = engine.calculate_results();
        assert!((stats.accuracy - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn overflow_keystrokes_are_dropped() {
        let mut engine = engine_with(&["ab"]);
        type_str(&mut engine, "ab");
        assert!(!engine.try_apply_text('c'));
        assert!(!engine.try_apply_text('d'));
        assert_eq!(engine.buffer_len(), 2);
    }

    #[test]
    fn advance_requires_full_buffer() {
        let mut engine = engine_with(&["abc"]);
        type_str(&mut engine, "ab");
        assert!(!engine.can_advance_line());
        assert!(!engine.advance_line());
        engine.try_apply_text('c');
        assert!(engine.advance_line());
        assert!(engine.is_complete());
    }

    #[test]
    fn corrected_typo_does_not_hurt_accuracy() {
        let mut engine = engine_with(&["ab"]);
        engine.try_apply_text('a');
        engine.try_apply_text('x');
        assert!(engine.handle_backspace());
        engine.try_apply_text('b');
        engine.advance_line();

        let stats = engine.calculate_results();
        assert_eq!(stats.accuracy, 100.0);
        // The live counters still saw the miss.
        let (total, matched) = engine.keystroke_counts();
        assert_eq!(total, 3);
        assert_eq!(matched, 2);
    }

    #[test]
    fn backspace_on_empty_buffer_is_refused() {
        let mut engine = engine_with(&["ab"]);
        assert!(!engine.handle_backspace());
        engine.try_apply_text('a');
        assert!(engine.handle_backspace());
        assert_eq!(engine.buffer_len(), 0);
    }

    #[test]
    fn word_counts_accumulate_per_line() {
        let mut engine = engine_with(&["one two", "three"]);
        type_str(&mut engine, "one two");
        engine.advance_line();
        assert_eq!(engine.submitted_words, 2);
        type_str(&mut engine, "threX");
        engine.advance_line();
        assert_eq!(engine.submitted_words, 3);
        assert_eq!(engine.submitted_chars, 12);
        assert_eq!(engine.correct_chars, 11);
    }

    #[test]
    fn line_advancement_and_accessors() {
        let mut engine = engine_with(&["첫째 줄", "둘째 줄"]);
        assert_eq!(engine.current_line_index(), 0);
        assert_eq!(engine.line_count(), 2);
        assert_eq!(engine.current_line_text(), "첫째 줄");
        assert_eq!(engine.next_line_text(), "둘째 줄");

        type_str(&mut engine, "첫째 줄");
        engine.advance_line();
        assert_eq!(engine.current_line_index(), 1);
        assert_eq!(engine.next_line_text(), "");

        type_str(&mut engine, "둘째 줄");
        engine.advance_line();
        assert!(engine.is_complete());
        assert_eq!(engine.current_line_text(), "");
        assert!(engine.build_render_line().is_empty());
        assert!(!engine.try_apply_text('x'));
    }

    #[test]
    fn hangul_target_routing() {
        let mut engine = engine_with(&["한a"]);
        assert!(engine.is_current_target_hangul());
        engine.try_apply_text('한');
        assert!(!engine.is_current_target_hangul());
        // Filled line clamps to the last character.
        engine.try_apply_text('a');
        assert!(!engine.is_current_target_hangul());

        let engine = engine_with(&["ㄱㄴ"]);
        assert!(engine.is_current_target_hangul());
    }

    #[test]
    fn load_passage_resets_run_state() {
        let mut engine = engine_with(&["ab"]);
        type_str(&mut engine, "ab");
        engine.advance_line();
        assert!(engine.is_complete());

        engine.load_passage(vec!["cd".to_string()]);
        assert!(!engine.is_complete());
        assert_eq!(engine.buffer_len(), 0);
        assert_eq!(engine.keystroke_counts(), (0, 0));
        let stats = engine.calculate_results();
        assert_eq!((stats.cpm, stats.wpm, stats.accuracy), (0.0, 0.0, 100.0));
    }

    #[test]
    fn cpm_counts_submitted_characters() {
        let mut engine = engine_with(&["abcd"]);
        type_str(&mut engine, "abcd");
        engine.advance_line();
        let stats = engine.calculate_results();
        // Four characters over a floored-to-1ms run is a huge but finite rate.
        assert!(stats.cpm > 0.0);
        assert!(stats.cpm.is_finite());
        assert!(stats.wpm.is_finite());
    }
}
