//! Typing trainer: attempt state machine and scoring.
//!
//! The trainer never reads the clock for elapsed time; the caller ticks it
//! once per second while an attempt runs. Sample text choice is also left to
//! the caller so this module stays deterministic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Countdown lengths offered by timed mode.
pub const TIMED_DURATIONS: [u32; 3] = [60, 120, 300];

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypingError {
    #[error("sample text cannot be empty")]
    EmptyText,

    #[error("unsupported timed duration: {0}s")]
    InvalidDuration(u32),

    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: TypingState,
    },
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Nepali,
}

impl Language {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "english" | "en" => Some(Self::English),
            "nepali" | "ne" => Some(Self::Nepali),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// How an attempt ends: matching the text, or running out the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypingMode {
    #[default]
    Text,
    Timed { seconds: u32 },
}

impl TypingMode {
    /// # Errors
    ///
    /// Returns `TypingError::InvalidDuration` unless `seconds` is one of
    /// [`TIMED_DURATIONS`].
    pub fn timed(seconds: u32) -> Result<Self, TypingError> {
        if TIMED_DURATIONS.contains(&seconds) {
            Ok(Self::Timed { seconds })
        } else {
            Err(TypingError::InvalidDuration(seconds))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypingSettings {
    pub language: Language,
    pub difficulty: Difficulty,
    pub mode: TypingMode,
}

//
// ─── SAMPLE TEXTS ──────────────────────────────────────────────────────────────
//

const ENGLISH_EASY: &[&str] = &[
    "Nepal is a beautiful country located in South Asia between China and India.",
    "Good governance ensures transparency, accountability, and citizen participation.",
];
const ENGLISH_MEDIUM: &[&str] = &[
    "Computer operators play a vital role in government offices by managing digital systems.",
];
const ENGLISH_HARD: &[&str] = &[
    "The quick brown fox jumps over the lazy dog. This sentence contains every letter of the English alphabet.",
];
const NEPALI_EASY: &[&str] = &["सरकारी कार्यालयमा कम्प्युटर अपरेटरको भूमिका महत्वपूर्ण छ।"];
const NEPALI_MEDIUM: &[&str] = &["सुशासन भनेको पारदर्शिता, जवाफदेहिता र नागरिक सहभागिता हो।"];
const NEPALI_HARD: &[&str] =
    &["नेपाल एक सुन्दर हिमाली राष्ट्र हो। यहाँ विश्वको सबैभन्दा अग्लो हिमाल सगरमाथा अवस्थित छ।"];

/// Candidate texts for a language and difficulty. Never empty.
#[must_use]
pub fn sample_texts(language: Language, difficulty: Difficulty) -> &'static [&'static str] {
    match (language, difficulty) {
        (Language::English, Difficulty::Easy) => ENGLISH_EASY,
        (Language::English, Difficulty::Medium) => ENGLISH_MEDIUM,
        (Language::English, Difficulty::Hard) => ENGLISH_HARD,
        (Language::Nepali, Difficulty::Easy) => NEPALI_EASY,
        (Language::Nepali, Difficulty::Medium) => NEPALI_MEDIUM,
        (Language::Nepali, Difficulty::Hard) => NEPALI_HARD,
    }
}

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Positions where `input` agrees with `target`, up to the shorter length.
#[must_use]
pub fn correct_chars(target: &str, input: &str) -> usize {
    target
        .chars()
        .zip(input.chars())
        .filter(|(t, i)| t == i)
        .count()
}

/// `round(100 * correct / typed)`, or 100 for an empty buffer.
#[must_use]
pub fn accuracy(target: &str, input: &str) -> u32 {
    let typed = input.chars().count();
    if typed == 0 {
        return 100;
    }
    let correct = correct_chars(target, input);
    round_ratio(correct as u64 * 100, typed as u64)
}

/// Whitespace-separated words over elapsed minutes, rounded.
///
/// `None` until at least one second has elapsed and something was typed.
#[must_use]
pub fn words_per_minute(input: &str, elapsed_secs: u64) -> Option<u32> {
    let words = input.split_whitespace().count() as u64;
    if elapsed_secs == 0 || words == 0 {
        return None;
    }
    Some(round_ratio(words * 60, elapsed_secs))
}

/// Integer `round(num / den)` with halves rounded up.
fn round_ratio(num: u64, den: u64) -> u32 {
    u32::try_from((2 * num + den) / (2 * den)).unwrap_or(u32::MAX)
}

//
// ─── STATE MACHINE ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingState {
    Idle,
    Running,
    Paused,
    Complete,
}

impl fmt::Display for TypingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TypingState::Idle => "idle",
            TypingState::Running => "running",
            TypingState::Paused => "paused",
            TypingState::Complete => "complete",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    Matched,
    TimeUp,
}

/// Final figures for a finished attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingResult {
    pub settings: TypingSettings,
    pub reason: CompletionReason,
    pub wpm: u32,
    pub accuracy: u32,
    pub errors: usize,
    pub corrections: u32,
    pub chars_typed: usize,
    pub elapsed_secs: u64,
    pub started_at: Option<DateTime<Utc>>,
}

impl TypingResult {
    /// Practice time credited to the user, rounded up to whole minutes.
    #[must_use]
    pub fn minutes_spent(&self) -> u32 {
        u32::try_from(self.elapsed_secs.div_ceil(60)).unwrap_or(u32::MAX)
    }
}

/// Live figures after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingScore {
    pub wpm: u32,
    pub accuracy: u32,
    pub errors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Progress(TypingScore),
    Completed(TypingResult),
    /// The attempt already finished; the buffer was left alone.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Ticked,
    Completed(TypingResult),
    /// Not running; the timer did not move.
    Stopped,
}

#[derive(Debug, Clone)]
pub struct TypingTrainer {
    settings: TypingSettings,
    target: String,
    input: String,
    state: TypingState,
    elapsed_secs: u64,
    started_at: Option<DateTime<Utc>>,
    errors: usize,
    corrections: u32,
    wpm: u32,
    accuracy: u32,
    result: Option<TypingResult>,
}

impl TypingTrainer {
    /// # Errors
    ///
    /// Returns `TypingError::EmptyText` if `target` is empty and
    /// `TypingError::InvalidDuration` for an unsupported countdown.
    pub fn new(settings: TypingSettings, target: impl Into<String>) -> Result<Self, TypingError> {
        if let TypingMode::Timed { seconds } = settings.mode {
            TypingMode::timed(seconds)?;
        }
        let target = non_empty(target.into())?;
        Ok(Self {
            settings,
            target,
            input: String::new(),
            state: TypingState::Idle,
            elapsed_secs: 0,
            started_at: None,
            errors: 0,
            corrections: 0,
            wpm: 0,
            accuracy: 100,
            result: None,
        })
    }

    #[must_use]
    pub fn settings(&self) -> TypingSettings {
        self.settings
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// What has been typed so far.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn state(&self) -> TypingState {
        self.state
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    #[must_use]
    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    #[must_use]
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Number of input events that shortened the buffer.
    #[must_use]
    pub fn corrections(&self) -> u32 {
        self.corrections
    }

    #[must_use]
    pub fn result(&self) -> Option<&TypingResult> {
        self.result.as_ref()
    }

    /// Seconds left on the countdown; `None` outside timed mode.
    #[must_use]
    pub fn remaining_secs(&self) -> Option<u64> {
        match self.settings.mode {
            TypingMode::Text => None,
            TypingMode::Timed { seconds } => {
                Some(u64::from(seconds).saturating_sub(self.elapsed_secs))
            }
        }
    }

    fn clear_attempt(&mut self) {
        self.input.clear();
        self.elapsed_secs = 0;
        self.started_at = None;
        self.errors = 0;
        self.corrections = 0;
        self.wpm = 0;
        self.accuracy = 100;
        self.result = None;
    }

    /// Begins a fresh attempt on `text`.
    ///
    /// # Errors
    ///
    /// Returns `TypingError::InvalidTransition` unless idle or complete, and
    /// `TypingError::EmptyText` for an empty text.
    pub fn start(&mut self, text: impl Into<String>, now: DateTime<Utc>) -> Result<(), TypingError> {
        if !matches!(self.state, TypingState::Idle | TypingState::Complete) {
            return Err(TypingError::InvalidTransition {
                action: "start",
                state: self.state,
            });
        }
        self.target = non_empty(text.into())?;
        self.clear_attempt();
        self.started_at = Some(now);
        self.state = TypingState::Running;
        Ok(())
    }

    /// Returns whether the attempt was running.
    pub fn pause(&mut self) -> bool {
        if self.state == TypingState::Running {
            self.state = TypingState::Paused;
            return true;
        }
        false
    }

    /// Returns whether the attempt was paused.
    pub fn resume(&mut self) -> bool {
        if self.state == TypingState::Paused {
            self.state = TypingState::Running;
            return true;
        }
        false
    }

    /// Abandons any attempt and loads `text` for the next one.
    ///
    /// # Errors
    ///
    /// Returns `TypingError::EmptyText` for an empty text.
    pub fn reset(&mut self, text: impl Into<String>) -> Result<(), TypingError> {
        self.target = non_empty(text.into())?;
        self.clear_attempt();
        self.state = TypingState::Idle;
        Ok(())
    }

    /// Abandons any attempt and starts a new one on `text` at `now`.
    ///
    /// # Errors
    ///
    /// Returns `TypingError::EmptyText` for an empty text.
    pub fn restart(
        &mut self,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), TypingError> {
        self.reset(text)?;
        self.started_at = Some(now);
        self.state = TypingState::Running;
        Ok(())
    }

    /// Replaces the buffer with `value` and re-scores.
    ///
    /// Typing while idle starts the attempt on the current text.
    ///
    /// # Errors
    ///
    /// Returns `TypingError::InvalidTransition` while paused.
    pub fn input(
        &mut self,
        value: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<InputOutcome, TypingError> {
        match self.state {
            TypingState::Complete => return Ok(InputOutcome::Ignored),
            TypingState::Paused => {
                return Err(TypingError::InvalidTransition {
                    action: "type",
                    state: self.state,
                });
            }
            TypingState::Idle => {
                self.clear_attempt();
                self.started_at = Some(now);
                self.state = TypingState::Running;
            }
            TypingState::Running => {}
        }

        let value = value.into();
        if value.chars().count() < self.input.chars().count() {
            self.corrections += 1;
        }
        self.input = value;

        let typed = self.input.chars().count();
        self.errors = typed - correct_chars(&self.target, &self.input);
        self.accuracy = accuracy(&self.target, &self.input);
        self.refresh_wpm();

        if self.input == self.target {
            return Ok(InputOutcome::Completed(
                self.finish(CompletionReason::Matched),
            ));
        }

        Ok(InputOutcome::Progress(TypingScore {
            wpm: self.wpm,
            accuracy: self.accuracy,
            errors: self.errors,
        }))
    }

    /// One second of running time.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TypingState::Running {
            return TickOutcome::Stopped;
        }
        self.elapsed_secs += 1;
        self.refresh_wpm();

        if self.remaining_secs() == Some(0) {
            return TickOutcome::Completed(self.finish(CompletionReason::TimeUp));
        }
        TickOutcome::Ticked
    }

    /// Ticks up to `secs` times, stopping early if the attempt completes.
    pub fn advance(&mut self, secs: u64) -> Option<TypingResult> {
        for _ in 0..secs {
            match self.tick() {
                TickOutcome::Ticked => {}
                TickOutcome::Completed(result) => return Some(result),
                TickOutcome::Stopped => break,
            }
        }
        None
    }

    fn refresh_wpm(&mut self) {
        if let Some(wpm) = words_per_minute(&self.input, self.elapsed_secs) {
            self.wpm = wpm;
        }
    }

    fn finish(&mut self, reason: CompletionReason) -> TypingResult {
        self.state = TypingState::Complete;
        let result = TypingResult {
            settings: self.settings,
            reason,
            wpm: self.wpm,
            accuracy: self.accuracy,
            errors: self.errors,
            corrections: self.corrections,
            chars_typed: self.input.chars().count(),
            elapsed_secs: self.elapsed_secs,
            started_at: self.started_at,
        };
        self.result = Some(result.clone());
        result
    }
}

fn non_empty(text: String) -> Result<String, TypingError> {
    if text.is_empty() {
        return Err(TypingError::EmptyText);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn trainer(text: &str) -> TypingTrainer {
        TypingTrainer::new(TypingSettings::default(), text).unwrap()
    }

    #[test]
    fn accuracy_of_empty_buffer_is_full() {
        assert_eq!(accuracy("cat", ""), 100);
    }

    #[test]
    fn accuracy_rounds_to_nearest() {
        assert_eq!(accuracy("cat", "cot"), 67);
        assert_eq!(accuracy("cat", "c"), 100);
        assert_eq!(accuracy("ab", "ax"), 50);
        // overflow characters count against accuracy
        assert_eq!(accuracy("ab", "abcd"), 50);
    }

    #[test]
    fn same_length_mismatch_does_not_complete() {
        let mut t = trainer("cat");
        let outcome = t.input("cot", fixed_now()).unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Progress(TypingScore {
                wpm: 0,
                accuracy: 67,
                errors: 1
            })
        );
        assert_eq!(t.state(), TypingState::Running);
    }

    #[test]
    fn exact_match_completes_once() {
        let mut t = trainer("cat");
        t.start("cat", fixed_now()).unwrap();
        t.advance(2);
        let outcome = t.input("cat", fixed_now()).unwrap();
        let InputOutcome::Completed(result) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(result.reason, CompletionReason::Matched);
        assert_eq!(result.accuracy, 100);
        assert_eq!(result.wpm, 30);
        assert_eq!(t.input("catx", fixed_now()).unwrap(), InputOutcome::Ignored);
        assert_eq!(t.tick(), TickOutcome::Stopped);
    }

    #[test]
    fn wpm_waits_for_elapsed_time() {
        assert_eq!(words_per_minute("one two", 0), None);
        assert_eq!(words_per_minute("   ", 30), None);
        assert_eq!(words_per_minute(" one  two three ", 60), Some(3));
        assert_eq!(words_per_minute("one two three", 40), Some(5));
    }

    #[test]
    fn wpm_updates_on_tick() {
        let mut t = trainer("one two three four");
        t.input("one two", fixed_now()).unwrap();
        assert_eq!(t.wpm(), 0);
        t.advance(30);
        assert_eq!(t.wpm(), 4);
    }

    #[test]
    fn paused_attempt_rejects_input_and_freezes_timer() {
        let mut t = trainer("abc");
        t.start("abc", fixed_now()).unwrap();
        t.tick();
        assert!(t.pause());
        assert_eq!(t.tick(), TickOutcome::Stopped);
        assert!(t.input("a", fixed_now()).is_err());
        assert!(t.resume());
        t.tick();
        assert_eq!(t.elapsed_secs(), 2);
    }

    #[test]
    fn shrinking_buffer_counts_a_correction() {
        let mut t = trainer("abc");
        t.input("ax", fixed_now()).unwrap();
        t.input("a", fixed_now()).unwrap();
        t.input("ab", fixed_now()).unwrap();
        assert_eq!(t.corrections(), 1);
        assert_eq!(t.errors(), 0);
    }

    #[test]
    fn timed_mode_completes_at_zero() {
        let settings = TypingSettings {
            mode: TypingMode::timed(60).unwrap(),
            ..TypingSettings::default()
        };
        let mut t = TypingTrainer::new(settings, "long text here").unwrap();
        t.input("long", fixed_now()).unwrap();
        assert!(t.advance(59).is_none());
        assert_eq!(t.remaining_secs(), Some(1));
        let result = t.advance(10).unwrap();
        assert_eq!(result.reason, CompletionReason::TimeUp);
        assert_eq!(result.elapsed_secs, 60);
        assert_eq!(result.minutes_spent(), 1);
        assert_eq!(t.state(), TypingState::Complete);
    }

    #[test]
    fn rejects_unknown_duration() {
        assert_eq!(TypingMode::timed(90), Err(TypingError::InvalidDuration(90)));
    }

    #[test]
    fn reset_returns_to_idle_with_new_text() {
        let mut t = trainer("abc");
        t.input("ab", fixed_now()).unwrap();
        t.advance(5);
        t.reset("xyz").unwrap();
        assert_eq!(t.state(), TypingState::Idle);
        assert_eq!(t.target(), "xyz");
        assert_eq!(t.buffer(), "");
        assert_eq!(t.elapsed_secs(), 0);
        assert_eq!(t.accuracy(), 100);
    }

    #[test]
    fn restart_runs_on_the_loaded_text() {
        let mut t = trainer("abc");
        t.input("ab", fixed_now()).unwrap();
        t.advance(5);
        t.restart("xyz", fixed_now()).unwrap();
        assert_eq!(t.state(), TypingState::Running);
        assert_eq!(t.target(), "xyz");
        assert_eq!(t.buffer(), "");
        assert_eq!(t.elapsed_secs(), 0);
        let outcome = t.input("xyz", fixed_now()).unwrap();
        assert!(matches!(outcome, InputOutcome::Completed(_)));
    }

    #[test]
    fn start_is_refused_mid_attempt() {
        let mut t = trainer("abc");
        t.start("abc", fixed_now()).unwrap();
        let err = t.start("def", fixed_now()).unwrap_err();
        assert_eq!(
            err,
            TypingError::InvalidTransition {
                action: "start",
                state: TypingState::Running
            }
        );
    }

    #[test]
    fn nepali_text_is_scored_per_character() {
        let target = sample_texts(Language::Nepali, Difficulty::Easy)[0];
        let mut t = trainer(target);
        let outcome = t.input(target, fixed_now()).unwrap();
        assert!(matches!(outcome, InputOutcome::Completed(_)));
    }

    #[test]
    fn minutes_spent_rounds_up() {
        let mut t = trainer("ab");
        t.input("a", fixed_now()).unwrap();
        t.advance(61);
        let InputOutcome::Completed(result) = t.input("ab", fixed_now()).unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(result.minutes_spent(), 2);
    }
}
