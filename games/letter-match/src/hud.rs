//! Per-frame UI snapshot for the DOM layer.

use serde::Serialize;

use modulith_engine::{ease, hsb_to_css, style_of, Easing};

use crate::config::Tuning;
use crate::prefs::DisplayPreferences;
use crate::round::{RoundPhase, RoundState, RoundType};

/// Share of the feedback lifetime spent fading out.
const FADE_FRACTION: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub text: String,
    pub kind: FeedbackKind,
    pub shown_at: f64,
    pub expires_at: f64,
}

/// Holds the latest transient message. A newer message replaces the old one.
#[derive(Debug, Clone, Default)]
pub struct FeedbackBoard {
    current: Option<Feedback>,
}

impl FeedbackBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, text: impl Into<String>, kind: FeedbackKind, now_ms: f64, duration_ms: f64) {
        self.current = Some(Feedback {
            text: text.into(),
            kind,
            shown_at: now_ms,
            expires_at: now_ms + duration_ms,
        });
    }

    /// The message, if it has not expired at `now_ms`.
    pub fn active(&self, now_ms: f64) -> Option<&Feedback> {
        self.current.as_ref().filter(|f| now_ms < f.expires_at)
    }
}

impl Feedback {
    /// 1.0 for most of the lifetime, easing to 0 at expiry.
    pub fn opacity(&self, now_ms: f64) -> f32 {
        let life = (self.expires_at - self.shown_at).max(1.0);
        let fade_start = self.expires_at - life * FADE_FRACTION;
        if now_ms <= fade_start {
            return 1.0;
        }
        let t = ((now_ms - fade_start) / (life * FADE_FRACTION)) as f32;
        ease(1.0, 0.0, t, Easing::QuadIn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharStatus {
    Done,
    Current,
    Future,
    /// Future letter concealed in hard mode.
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharCell {
    /// `None` when hidden.
    pub ch: Option<char>,
    pub status: CharStatus,
    /// Branch colour when colour hints are on.
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    pub text: String,
    pub kind: FeedbackKind,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorLockView {
    pub locked: bool,
    /// Hint state captured when the lock engaged.
    pub hints_enabled: bool,
    pub no_color_bonus: bool,
    pub frenzy_color_penalty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSnapshot {
    pub score: u64,
    pub level: u32,
    pub round_type: RoundType,
    pub phase: RoundPhase,
    pub target: Vec<CharCell>,
    /// `None` for untimed rounds.
    pub remaining_ms: Option<f64>,
    pub streak_label: String,
    pub feedback: Option<FeedbackView>,
    /// Feedback text while it lasts, the streak label afterwards.
    pub message: String,
    pub color_lock: ColorLockView,
    pub preferences: DisplayPreferences,
}

/// Build the UI snapshot for `now_ms`.
pub fn snapshot(
    round: &RoundState,
    prefs: &DisplayPreferences,
    feedback: &FeedbackBoard,
    now_ms: f64,
    tuning: &Tuning,
) -> UiSnapshot {
    let hide_future = round.flags().hard_mode;
    let target = round
        .word()
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let status = if i < round.index() {
                CharStatus::Done
            } else if i == round.index() {
                CharStatus::Current
            } else if hide_future {
                CharStatus::Hidden
            } else {
                CharStatus::Future
            };
            let visible = status != CharStatus::Hidden;
            CharCell {
                ch: visible.then_some(c),
                status,
                color: (visible && prefs.color_hints).then(|| hsb_to_css(style_of(c))),
            }
        })
        .collect();

    let streak_label = format!("STREAK x{:.1}", round.streak_multiplier(tuning));
    let feedback = feedback.active(now_ms).map(|f| FeedbackView {
        text: f.text.clone(),
        kind: f.kind,
        opacity: f.opacity(now_ms),
    });
    let message = feedback
        .as_ref()
        .map(|f| f.text.clone())
        .unwrap_or_else(|| streak_label.clone());

    let mods = round.color_modifiers();
    UiSnapshot {
        score: round.score(),
        level: round.level(),
        round_type: round.round_type(),
        phase: round.phase(),
        target,
        remaining_ms: round.remaining_ms(now_ms),
        streak_label,
        feedback,
        message,
        color_lock: ColorLockView {
            locked: round.color_locked(),
            hints_enabled: round.color_enabled(),
            no_color_bonus: mods.no_color_bonus,
            frenzy_color_penalty: mods.frenzy_color_penalty,
        },
        preferences: *prefs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::WordBank;
    use modulith_engine::Rng;

    fn started(level: u32, word: &str) -> (RoundState, DisplayPreferences) {
        let mut round = RoundState::new();
        let mut prefs = DisplayPreferences::default();
        let bank = WordBank {
            normal: vec![word.into()],
            boss: vec![word.into()],
        };
        for _ in 1..level {
            round.new_round(0.0, &bank, &mut prefs, &mut Rng::new(1), &Tuning::default());
            for c in word.chars() {
                round.check_click(c, 0.0, &prefs, &Tuning::default());
            }
        }
        round.new_round(0.0, &bank, &mut prefs, &mut Rng::new(1), &Tuning::default());
        (round, prefs)
    }

    #[test]
    fn statuses_follow_progress() {
        let (mut round, prefs) = started(1, "SOL");
        round.check_click('S', 0.0, &prefs, &Tuning::default());
        let snap = snapshot(&round, &prefs, &FeedbackBoard::new(), 0.0, &Tuning::default());
        let statuses: Vec<_> = snap.target.iter().map(|c| c.status).collect();
        assert_eq!(statuses, vec![CharStatus::Done, CharStatus::Current, CharStatus::Future]);
        assert_eq!(snap.remaining_ms, None);
        assert_eq!(snap.score, 100);
        assert!(snap.target[0].color.is_some());
    }

    #[test]
    fn hard_mode_hides_future_letters() {
        let (round, prefs) = started(7, "SOL");
        assert!(round.flags().hard_mode);
        let snap = snapshot(&round, &prefs, &FeedbackBoard::new(), 0.0, &Tuning::default());
        assert_eq!(snap.target[0].ch, Some('S'));
        assert_eq!(snap.target[1].status, CharStatus::Hidden);
        assert_eq!(snap.target[2].ch, None);
        assert_eq!(snap.target[2].color, None);
    }

    #[test]
    fn feedback_reverts_to_streak_label() {
        let (round, prefs) = started(1, "SOL");
        let mut board = FeedbackBoard::new();
        board.show("CORRECT!", FeedbackKind::Success, 0.0, 1500.0);
        let t = Tuning::default();
        let snap = snapshot(&round, &prefs, &board, 100.0, &t);
        assert_eq!(snap.message, "CORRECT!");
        assert_eq!(snap.feedback.map(|f| f.opacity), Some(1.0));
        let snap = snapshot(&round, &prefs, &board, 1500.0, &t);
        assert!(snap.feedback.is_none());
        assert_eq!(snap.message, "STREAK x1.0");
    }

    #[test]
    fn streak_label_shows_the_current_multiplier() {
        let (round, prefs) = started(3, "SOL");
        assert_eq!(round.perfect_streak(), 2);
        let snap = snapshot(&round, &prefs, &FeedbackBoard::new(), 0.0, &Tuning::default());
        assert_eq!(snap.streak_label, "STREAK x1.4");
    }

    #[test]
    fn feedback_fades_near_expiry() {
        let mut board = FeedbackBoard::new();
        board.show("LEVEL 2", FeedbackKind::Info, 0.0, 1000.0);
        let f = board.active(900.0).cloned().unwrap();
        let o = f.opacity(900.0);
        assert!(o > 0.0 && o < 1.0, "opacity {}", o);
    }

    #[test]
    fn timed_round_reports_remaining_time() {
        let (round, prefs) = started(3, "SOL");
        let snap = snapshot(&round, &prefs, &FeedbackBoard::new(), 5000.0, &Tuning::default());
        assert_eq!(snap.round_type, RoundType::Frenzy);
        assert_eq!(snap.remaining_ms, Some(15_000.0));
    }

    #[test]
    fn serializes_to_camel_case_json() {
        let (round, prefs) = started(1, "SOL");
        let snap = snapshot(&round, &prefs, &FeedbackBoard::new(), 0.0, &Tuning::default());
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"roundType\":\"normal\""));
        assert!(json.contains("\"remainingMs\":null"));
        assert!(json.contains("\"colorLock\""));
    }
}
