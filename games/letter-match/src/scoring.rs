//! Pure scoring rules.

use serde::Serialize;

use crate::config::Tuning;
use crate::round::RoundType;

/// Colour-hint modifiers latched on the first pick of a round.
/// At most one of the two is set: frenzy rounds never earn the no-colour bonus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorModifiers {
    pub no_color_bonus: bool,
    pub frenzy_color_penalty: bool,
}

impl ColorModifiers {
    pub fn latch(round_type: RoundType, color_hints: bool) -> Self {
        let frenzy = round_type == RoundType::Frenzy;
        Self {
            no_color_bonus: !color_hints && !frenzy,
            frenzy_color_penalty: color_hints && frenzy,
        }
    }
}

/// Per-pick multiplier for the round type.
pub fn round_multiplier(round_type: RoundType, tuning: &Tuning) -> f64 {
    match round_type {
        RoundType::Normal => 1.0,
        RoundType::Frenzy => tuning.frenzy_multiplier,
        RoundType::Boss => tuning.boss_multiplier,
    }
}

/// Points for a correct pick. `combo` only counts in frenzy rounds.
pub fn pick_points(round_type: RoundType, combo: u32, mods: ColorModifiers, tuning: &Tuning) -> u64 {
    let mut delta = tuning.base_pick_score * round_multiplier(round_type, tuning);
    if round_type == RoundType::Frenzy {
        delta += combo as f64 * tuning.frenzy_combo_bonus;
    }
    if mods.no_color_bonus {
        delta *= tuning.no_color_multiplier;
    } else if mods.frenzy_color_penalty {
        delta *= tuning.frenzy_color_penalty_mult;
    }
    delta.round().max(0.0) as u64
}

/// Flawless-streak multiplier, always within `[1, perfect_streak_max_mult]`.
pub fn streak_multiplier(perfect_streak: u32, tuning: &Tuning) -> f64 {
    let max = tuning.perfect_streak_max_mult.max(1.0);
    (1.0 + perfect_streak as f64 * tuning.perfect_streak_step).clamp(1.0, max)
}

/// Word-completion bonus, including the flat boss bonus for flawless boss rounds.
pub fn word_bonus(
    round_type: RoundType,
    streak_mult: f64,
    flawless: bool,
    mods: ColorModifiers,
    tuning: &Tuning,
) -> u64 {
    let base = match round_type {
        RoundType::Normal => tuning.word_bonus,
        RoundType::Frenzy => tuning.frenzy_word_bonus,
        RoundType::Boss => tuning.boss_word_bonus,
    };
    let mut bonus = base * streak_mult;
    if mods.no_color_bonus {
        bonus *= tuning.no_color_word_multiplier;
    } else if mods.frenzy_color_penalty {
        bonus *= tuning.frenzy_color_penalty_mult;
    }
    let mut total = bonus.round().max(0.0) as u64;
    if round_type == RoundType::Boss && flawless {
        total += tuning.boss_flawless_bonus;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn modifiers_are_mutually_exclusive() {
        for rt in [RoundType::Normal, RoundType::Frenzy, RoundType::Boss] {
            for hints in [true, false] {
                let m = ColorModifiers::latch(rt, hints);
                assert!(!(m.no_color_bonus && m.frenzy_color_penalty));
            }
        }
        assert!(ColorModifiers::latch(RoundType::Boss, false).no_color_bonus);
        assert!(!ColorModifiers::latch(RoundType::Frenzy, false).no_color_bonus);
        assert!(ColorModifiers::latch(RoundType::Frenzy, true).frenzy_color_penalty);
    }

    #[test]
    fn normal_pick_with_hints_off() {
        let mods = ColorModifiers::latch(RoundType::Normal, false);
        assert_eq!(pick_points(RoundType::Normal, 0, mods, &t()), 125);
    }

    #[test]
    fn frenzy_pick_adds_combo_then_penalty() {
        let mods = ColorModifiers::latch(RoundType::Frenzy, false);
        // 100 * 1.5 + 2 * 15
        assert_eq!(pick_points(RoundType::Frenzy, 2, mods, &t()), 180);
        let mods = ColorModifiers::latch(RoundType::Frenzy, true);
        assert_eq!(pick_points(RoundType::Frenzy, 2, mods, &t()), 90);
    }

    #[test]
    fn streak_multiplier_is_bounded() {
        assert_eq!(streak_multiplier(0, &t()), 1.0);
        assert!((streak_multiplier(1, &t()) - 1.2).abs() < 1e-9);
        assert_eq!(streak_multiplier(50, &t()), 2.0);
        let odd = Tuning {
            perfect_streak_step: -1.0,
            ..t()
        };
        assert_eq!(streak_multiplier(3, &odd), 1.0);
    }

    #[test]
    fn boss_flawless_adds_flat_bonus() {
        let mods = ColorModifiers::default();
        assert_eq!(word_bonus(RoundType::Boss, 1.0, true, mods, &t()), 2500);
        assert_eq!(word_bonus(RoundType::Boss, 1.0, false, mods, &t()), 1500);
    }

    #[test]
    fn first_flawless_normal_word() {
        let mods = ColorModifiers::latch(RoundType::Normal, false);
        assert_eq!(word_bonus(RoundType::Normal, 1.2, true, mods, &t()), 600);
    }
}
