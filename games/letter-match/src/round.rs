//! The round state machine: target word, progress, timers and score.
//!
//! ```text
//! Active ──word finished──▶ Complete ──new_round──▶ Active
//!    └────clock expired───▶ Timeout  ──new_round──▶ Active
//! ```
//!
//! Transitions out of `Complete` and `Timeout` are driven by the game loop's
//! timer queue; the machine only reports what happened.

use serde::Serialize;

use modulith_engine::Rng;

use crate::config::Tuning;
use crate::prefs::DisplayPreferences;
use crate::scoring::{self, ColorModifiers};
use crate::words::WordBank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundType {
    Normal,
    Frenzy,
    Boss,
}

impl RoundType {
    /// Time limit, or `None` for untimed rounds.
    pub fn time_limit_ms(self, tuning: &Tuning) -> Option<f64> {
        match self {
            RoundType::Normal => None,
            RoundType::Frenzy => Some(tuning.frenzy_time_limit_ms),
            RoundType::Boss => Some(tuning.boss_time_limit_ms),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoundType::Normal => "NORMAL",
            RoundType::Frenzy => "FRENZY",
            RoundType::Boss => "BOSS",
        }
    }

    /// Numeric code used in game events.
    pub fn code(self) -> f32 {
        match self {
            RoundType::Normal => 0.0,
            RoundType::Frenzy => 1.0,
            RoundType::Boss => 2.0,
        }
    }
}

/// Round type for a level. Boss takes priority when both moduli divide it.
pub fn get_round_type(level: u32, tuning: &Tuning) -> RoundType {
    let divides = |every: u32| every != 0 && level != 0 && level % every == 0;
    if divides(tuning.boss_every) {
        RoundType::Boss
    } else if divides(tuning.frenzy_every) {
        RoundType::Frenzy
    } else {
        RoundType::Normal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Active,
    /// The clock ran out; waiting for the restart.
    Timeout,
    /// The word is finished; waiting for the next round.
    Complete,
}

/// Difficulty switches derived when a round starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundFlags {
    /// Future letters are hidden in the target display.
    pub hard_mode: bool,
    /// No look-ahead letters are guaranteed in the pool.
    pub ultra_hard: bool,
    /// The previous level was a boss round.
    pub relief: bool,
}

/// Result of a pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickOutcome {
    /// No round in progress.
    Ignored,
    Correct { points: u64, combo: u32 },
    WordComplete { points: u64, bonus: u64, streak_mult: f64, flawless: bool },
    Wrong { penalty: u64 },
}

/// Result of a round running out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutOutcome {
    pub penalty: u64,
}

#[derive(Debug, Clone)]
pub struct RoundState {
    word: Vec<char>,
    index: usize,
    round_type: RoundType,
    phase: RoundPhase,
    flags: RoundFlags,
    round_ends_at: Option<f64>,
    round_errors: u32,
    perfect_streak: u32,
    combo: u32,
    last_correct_at: Option<f64>,
    color_locked: bool,
    color_enabled: bool,
    score: u64,
    level: u32,
    /// Bumped by every `new_round`; tags deferred transitions.
    generation: u64,
}

impl RoundState {
    pub fn new() -> Self {
        Self {
            word: Vec::new(),
            index: 0,
            round_type: RoundType::Normal,
            phase: RoundPhase::Active,
            flags: RoundFlags::default(),
            round_ends_at: None,
            round_errors: 0,
            perfect_streak: 0,
            combo: 0,
            last_correct_at: None,
            color_locked: false,
            color_enabled: true,
            score: 0,
            level: 1,
            generation: 0,
        }
    }

    /// Back to level 1 with no score. The caller starts a new round afterwards.
    pub fn reset(&mut self) {
        let generation = self.generation;
        *self = Self::new();
        self.generation = generation;
    }

    /// Start a round for the current level and return its generation.
    /// Colour hints are switched back on and the colour choice unlocked.
    pub fn new_round(
        &mut self,
        now_ms: f64,
        words: &WordBank,
        prefs: &mut DisplayPreferences,
        rng: &mut Rng,
        tuning: &Tuning,
    ) -> u64 {
        self.round_type = get_round_type(self.level, tuning);
        self.word = words.pick(self.round_type, rng);
        self.index = 0;
        self.combo = 0;
        self.last_correct_at = None;
        self.round_errors = 0;
        self.flags = RoundFlags {
            hard_mode: self.level >= tuning.hard_mode_level,
            ultra_hard: self.level >= tuning.ultra_hard_level,
            relief: self.level > 1 && get_round_type(self.level - 1, tuning) == RoundType::Boss,
        };
        self.color_locked = false;
        prefs.color_hints = true;
        self.color_enabled = true;
        self.round_ends_at = self.round_type.time_limit_ms(tuning).map(|limit| now_ms + limit);
        self.phase = RoundPhase::Active;
        self.generation += 1;

        log::info!(
            "round {}: level {} {} word of {} letters",
            self.generation,
            self.level,
            self.round_type.label(),
            self.word.len()
        );
        self.generation
    }

    /// Score a pick of `letter`.
    pub fn check_click(
        &mut self,
        letter: char,
        now_ms: f64,
        prefs: &DisplayPreferences,
        tuning: &Tuning,
    ) -> PickOutcome {
        if self.phase != RoundPhase::Active {
            return PickOutcome::Ignored;
        }
        let Some(target) = self.target() else {
            return PickOutcome::Ignored;
        };

        if !self.color_locked {
            self.color_locked = true;
            self.color_enabled = prefs.color_hints;
        }
        let mods = self.color_modifiers();

        if letter != target {
            let penalty = tuning.error_penalty.min(self.score);
            self.score -= penalty;
            self.combo = 0;
            self.round_errors += 1;
            return PickOutcome::Wrong { penalty };
        }

        if self.round_type == RoundType::Frenzy {
            let in_window = self
                .last_correct_at
                .is_some_and(|t| now_ms - t <= tuning.frenzy_combo_window_ms);
            self.combo = if in_window { self.combo + 1 } else { 1 };
            self.last_correct_at = Some(now_ms);
        }
        let points = scoring::pick_points(self.round_type, self.combo, mods, tuning);
        self.score += points;
        self.index += 1;

        if self.index < self.word.len() {
            return PickOutcome::Correct {
                points,
                combo: self.combo,
            };
        }

        let flawless = self.round_errors == 0;
        let streak_mult = if flawless {
            self.perfect_streak += 1;
            scoring::streak_multiplier(self.perfect_streak, tuning)
        } else {
            self.perfect_streak = 0;
            1.0
        };
        let bonus = scoring::word_bonus(self.round_type, streak_mult, flawless, mods, tuning);
        self.score += bonus;
        self.level += 1;
        self.round_ends_at = None;
        self.phase = RoundPhase::Complete;

        log::info!(
            "word complete: +{} bonus (streak {}, x{:.1})",
            bonus,
            self.perfect_streak,
            streak_mult
        );
        PickOutcome::WordComplete {
            points,
            bonus,
            streak_mult,
            flawless,
        }
    }

    /// Apply the timeout once the round clock has run out.
    /// Fires at most once per round.
    pub fn check_timeout(&mut self, now_ms: f64, tuning: &Tuning) -> Option<TimeoutOutcome> {
        if self.phase != RoundPhase::Active {
            return None;
        }
        let ends_at = self.round_ends_at?;
        if now_ms < ends_at {
            return None;
        }
        self.phase = RoundPhase::Timeout;
        self.round_errors += 1;
        self.perfect_streak = 0;
        self.combo = 0;
        let penalty = tuning.timeout_penalty.min(self.score);
        self.score -= penalty;
        log::info!("round {} timed out at level {}", self.generation, self.level);
        Some(TimeoutOutcome { penalty })
    }

    // ---- Queries ----

    /// Next required letter while the round is in progress.
    pub fn target(&self) -> Option<char> {
        self.word.get(self.index).copied()
    }

    /// Up to `count` letters after the target.
    pub fn upcoming(&self, count: usize) -> &[char] {
        let start = (self.index + 1).min(self.word.len());
        let end = (start + count).min(self.word.len());
        &self.word[start..end]
    }

    pub fn word(&self) -> &[char] {
        &self.word
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn round_type(&self) -> RoundType {
        self.round_type
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn flags(&self) -> RoundFlags {
        self.flags
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn round_errors(&self) -> u32 {
        self.round_errors
    }

    pub fn perfect_streak(&self) -> u32 {
        self.perfect_streak
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn round_ends_at(&self) -> Option<f64> {
        self.round_ends_at
    }

    /// Milliseconds left in a timed round, `None` when untimed.
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        self.round_ends_at.map(|t| (t - now_ms).max(0.0))
    }

    /// Multiplier earned by the current flawless streak.
    pub fn streak_multiplier(&self, tuning: &Tuning) -> f64 {
        scoring::streak_multiplier(self.perfect_streak, tuning)
    }

    pub fn color_locked(&self) -> bool {
        self.color_locked
    }

    /// Hint state latched on the first pick; meaningful once locked.
    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    pub fn color_modifiers(&self) -> ColorModifiers {
        if self.color_locked {
            ColorModifiers::latch(self.round_type, self.color_enabled)
        } else {
            ColorModifiers::default()
        }
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}
