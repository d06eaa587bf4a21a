//! Tunable constants and the host-supplied settings document.

use serde::{Deserialize, Serialize};

use modulith_engine::OrbitConfig;

use crate::prefs::DisplayPreferences;
use crate::words::WordBank;

/// Every scoring, timing and pool constant the game uses.
/// Partial JSON is accepted; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tuning {
    /// Half-extent of the cubic play volume.
    pub bounds_size: f32,
    /// Screen-space pick radius in CSS pixels.
    pub hover_radius: f32,
    pub module_size: f32,
    pub mobile_module_size: f32,
    /// Viewports narrower than this use `mobile_module_size`.
    pub mobile_breakpoint: f32,

    pub base_pick_score: f64,
    pub frenzy_multiplier: f64,
    pub boss_multiplier: f64,
    pub frenzy_combo_window_ms: f64,
    pub frenzy_combo_bonus: f64,
    pub no_color_multiplier: f64,
    /// No-colour factor applied to the word-completion bonus.
    pub no_color_word_multiplier: f64,
    pub frenzy_color_penalty_mult: f64,

    pub word_bonus: f64,
    pub frenzy_word_bonus: f64,
    pub boss_word_bonus: f64,
    pub boss_flawless_bonus: u64,
    pub perfect_streak_step: f64,
    pub perfect_streak_max_mult: f64,

    pub error_penalty: u64,
    pub timeout_penalty: u64,

    pub frenzy_time_limit_ms: f64,
    pub boss_time_limit_ms: f64,
    /// Every Nth level is a boss round; 0 disables boss rounds.
    pub boss_every: u32,
    /// Every Mth level is a frenzy round; 0 disables frenzy rounds.
    pub frenzy_every: u32,
    pub hard_mode_level: u32,
    pub ultra_hard_level: u32,

    pub max_modules: usize,
    pub module_cycle_interval_ms: f64,
    pub word_context_count: usize,
    pub decoy_duplicate_chance: f32,
    pub frenzy_decoy_duplicate_chance: f32,

    pub round_end_delay_ms: f64,
    pub timeout_restart_delay_ms: f64,
    pub feedback_duration_ms: f64,
    /// Fixed steps an error flash lasts.
    pub error_flash_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bounds_size: 350.0,
            hover_radius: 45.0,
            module_size: 50.0,
            mobile_module_size: 35.0,
            mobile_breakpoint: 768.0,

            base_pick_score: 100.0,
            frenzy_multiplier: 1.5,
            boss_multiplier: 2.0,
            frenzy_combo_window_ms: 1200.0,
            frenzy_combo_bonus: 15.0,
            no_color_multiplier: 1.25,
            no_color_word_multiplier: 1.0,
            frenzy_color_penalty_mult: 0.5,

            word_bonus: 500.0,
            frenzy_word_bonus: 750.0,
            boss_word_bonus: 1500.0,
            boss_flawless_bonus: 1000,
            perfect_streak_step: 0.2,
            perfect_streak_max_mult: 2.0,

            error_penalty: 40,
            timeout_penalty: 150,

            frenzy_time_limit_ms: 20_000.0,
            boss_time_limit_ms: 45_000.0,
            boss_every: 5,
            frenzy_every: 3,
            hard_mode_level: 6,
            ultra_hard_level: 12,

            max_modules: 24,
            module_cycle_interval_ms: 1500.0,
            word_context_count: 2,
            decoy_duplicate_chance: 0.08,
            frenzy_decoy_duplicate_chance: 0.2,

            round_end_delay_ms: 1500.0,
            timeout_restart_delay_ms: 2000.0,
            feedback_duration_ms: 1500.0,
            error_flash_frames: 60,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Module edge length for a viewport of the given width.
    pub fn module_size_for(&self, viewport_width: f32) -> f32 {
        if viewport_width < self.mobile_breakpoint {
            self.mobile_module_size
        } else {
            self.module_size
        }
    }
}

/// Settings document accepted by `game_load_config`. Each section is optional.
///
/// ```json
/// { "tuning": { "maxModules": 30 }, "words": { "normal": ["RUST"] },
///   "orbit": { "damping": 0.2 }, "preferences": { "darkMode": false } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Option<Tuning>,
    pub words: Option<WordBank>,
    pub orbit: Option<OrbitConfig>,
    pub preferences: Option<DisplayPreferences>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_reference_values() {
        let t = Tuning::default();
        assert_eq!(t.max_modules, 24);
        assert_eq!(t.error_penalty, 40);
        assert_eq!(t.perfect_streak_max_mult, 2.0);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let t = Tuning::from_json(r#"{ "maxModules": 30, "bossEvery": 4 }"#).unwrap();
        assert_eq!(t.max_modules, 30);
        assert_eq!(t.boss_every, 4);
        assert_eq!(t.frenzy_every, 3);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Tuning::from_json(r#"{ "maxModules": "many" }"#).is_err());
    }

    #[test]
    fn narrow_viewports_get_smaller_modules() {
        let t = Tuning::default();
        assert_eq!(t.module_size_for(400.0), 35.0);
        assert_eq!(t.module_size_for(1280.0), 50.0);
    }

    #[test]
    fn settings_sections_are_optional() {
        let s = Settings::from_json(r#"{ "orbit": { "damping": 0.3 } }"#).unwrap();
        assert!(s.tuning.is_none());
        assert!(s.words.is_none());
        assert_eq!(s.orbit.map(|o| o.damping), Some(0.3));
    }
}
