//! Letter Match - pick floating letter cubes in word order before the clock runs out.

use glam::Vec2;
use modulith_engine::api::game::GameConfig;
use modulith_engine::api::types::EntityId;
use modulith_engine::input::queue::{keys, InputEvent, InputQueue};
use modulith_engine::{
    points_of, style_of, Camera3D, CubeInstance, EngineContext, Game, GameEvent, HsbColor,
    OrbitController, RenderContext, SoundEvent, TimerQueue,
};

use crate::config::{Settings, Tuning};
use crate::hud::{self, FeedbackBoard, FeedbackKind};
use crate::module::{Module, Role};
use crate::physics;
use crate::picking;
use crate::pool::{ModulePool, PoolPlan};
use crate::prefs::DisplayPreferences;
use crate::round::{PickOutcome, RoundState, RoundType, TimeoutOutcome};
use crate::words::WordBank;

const VIEWPORT_W: f32 = 800.0;
const VIEWPORT_H: f32 = 600.0;

// Cube instances written per frame; covers a full pool plus one shrinking out
const MAX_INSTANCES: usize = 128;

// Module colours
const SELECTION_COLOR: HsbColor = HsbColor::new(0.0, 90.0, 100.0);
const SUCCESS_COLOR: HsbColor = HsbColor::new(120.0, 90.0, 100.0);
const ERROR_COLOR: HsbColor = HsbColor::new(0.0, 90.0, 90.0);
const DARK_BOX_COLOR: HsbColor = HsbColor::new(220.0, 20.0, 40.0);
const LIGHT_BOX_COLOR: HsbColor = HsbColor::new(215.0, 40.0, 30.0);

/// Custom event kinds from the DOM UI
pub mod events {
    /// Restart from level 1 with zero score.
    pub const NEW_GAME: u32 = 1;
    /// Flip colour hints.
    pub const TOGGLE_COLOR_HINTS: u32 = 2;
    /// `a > 0.5` selects dark mode.
    pub const SET_DARK_MODE: u32 = 3;
}

/// Game event kinds to the DOM UI
pub mod game_events {
    /// Wrong pick; `a` = points lost. The UI flashes the score.
    pub const SCORE_FLASH: f32 = 1.0;
    /// `a` = level, `b` = round type code, `c` = word length.
    pub const ROUND_START: f32 = 2.0;
    /// `a` = bonus, `b` = streak multiplier, `c` = new level.
    pub const WORD_COMPLETE: f32 = 3.0;
    /// `a` = points lost.
    pub const ROUND_TIMEOUT: f32 = 4.0;
}

/// Sound ids played by the JS sound manager
pub mod sounds {
    pub const CORRECT: u32 = 0;
    pub const WRONG: u32 = 1;
    pub const WORD_COMPLETE: u32 = 2;
    pub const TIMEOUT: u32 = 3;
    pub const ROUND_START: u32 = 4;
}

/// Transitions the game loop fires later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    NewRound,
}

/// A pick request collected from this frame's input.
#[derive(Debug, Clone, Copy)]
enum PickRequest {
    /// Tap or click: refresh hover at the press point first.
    At(Vec2),
    /// Keyboard: act on whatever is hovered.
    Hovered,
}

pub struct LetterMatch {
    tuning: Tuning,
    words: WordBank,
    prefs: DisplayPreferences,
    round: RoundState,
    pool: ModulePool,
    camera: Camera3D,
    orbit: OrbitController,
    timers: TimerQueue<Deferred>,
    feedback: FeedbackBoard,
    pointer: Option<Vec2>,
    hovered: Option<EntityId>,
    module_size: f32,
    now_ms: f64,
}

impl LetterMatch {
    pub fn new() -> Self {
        Self::with_preferences(DisplayPreferences::default())
    }

    pub fn with_preferences(prefs: DisplayPreferences) -> Self {
        let tuning = Tuning::default();
        Self {
            module_size: tuning.module_size_for(VIEWPORT_W),
            tuning,
            words: WordBank::default(),
            prefs,
            round: RoundState::new(),
            pool: ModulePool::new(),
            camera: Camera3D::new(VIEWPORT_W, VIEWPORT_H),
            orbit: OrbitController::default(),
            timers: TimerQueue::new(),
            feedback: FeedbackBoard::new(),
            pointer: None,
            hovered: None,
            now_ms: 0.0,
        }
    }

    fn start_round(&mut self, ctx: &mut EngineContext) {
        let now = ctx.now_ms();
        self.round
            .new_round(now, &self.words, &mut self.prefs, &mut ctx.rng, &self.tuning);
        self.pool.despawn_all();
        self.hovered = None;

        let level = self.round.level();
        let text = match self.round.round_type() {
            RoundType::Normal => format!("LEVEL {}", level),
            other => format!("LEVEL {} - {}", level, other.label()),
        };
        self.feedback
            .show(text, FeedbackKind::Info, now, self.tuning.feedback_duration_ms);
        ctx.emit_sound(SoundEvent(sounds::ROUND_START));
        ctx.emit_event(GameEvent::new(
            game_events::ROUND_START,
            level as f32,
            self.round.round_type().code(),
            self.round.word().len() as f32,
        ));
    }

    fn new_game(&mut self, ctx: &mut EngineContext) {
        log::info!("new game");
        self.timers.clear();
        self.round.reset();
        self.start_round(ctx);
    }

    fn handle_custom(&mut self, kind: u32, a: f32, ctx: &mut EngineContext) {
        match kind {
            events::NEW_GAME => self.new_game(ctx),
            events::TOGGLE_COLOR_HINTS => {
                self.prefs.color_hints = !self.prefs.color_hints;
            }
            events::SET_DARK_MODE => {
                self.prefs.dark_mode = a > 0.5;
            }
            _ => log::debug!("unknown custom event {}", kind),
        }
    }

    fn pick(&mut self, ctx: &mut EngineContext) {
        let Some(id) = self.hovered else {
            return;
        };
        let Some(letter) = self.pool.get(id).filter(|m| m.is_active()).map(Module::letter) else {
            return;
        };
        let now = ctx.now_ms();
        let duration = self.tuning.feedback_duration_ms;

        match self.round.check_click(letter, now, &self.prefs, &self.tuning) {
            PickOutcome::Ignored => {}
            PickOutcome::Correct { points, combo } => {
                self.mark_matched(id);
                let text = if combo > 1 {
                    format!("COMBO x{}! +{}", combo, points)
                } else {
                    format!("CORRECT! +{}", points)
                };
                self.feedback.show(text, FeedbackKind::Success, now, duration);
                ctx.emit_sound(SoundEvent(sounds::CORRECT));
            }
            PickOutcome::WordComplete { bonus, streak_mult, .. } => {
                self.mark_matched(id);
                self.feedback.show(
                    format!("WORD COMPLETE! (+{})", bonus),
                    FeedbackKind::Success,
                    now,
                    duration,
                );
                ctx.emit_sound(SoundEvent(sounds::WORD_COMPLETE));
                ctx.emit_event(GameEvent::new(
                    game_events::WORD_COMPLETE,
                    bonus as f32,
                    streak_mult as f32,
                    self.round.level() as f32,
                ));
                self.timers.schedule(
                    now + self.tuning.round_end_delay_ms,
                    self.round.generation(),
                    Deferred::NewRound,
                );
            }
            PickOutcome::Wrong { penalty } => {
                if let Some(module) = self.pool.get_mut(id) {
                    module.flash_error(self.tuning.error_flash_frames);
                }
                self.feedback
                    .show(format!("ERROR: {}", letter), FeedbackKind::Error, now, duration);
                ctx.emit_sound(SoundEvent(sounds::WRONG));
                ctx.emit_event(GameEvent::new(game_events::SCORE_FLASH, penalty as f32, 0.0, 0.0));
            }
        }
    }

    fn mark_matched(&mut self, id: EntityId) {
        if let Some(module) = self.pool.get_mut(id) {
            module.mark_matched();
        }
        self.hovered = None;
    }

    fn on_timeout(&mut self, outcome: TimeoutOutcome, ctx: &mut EngineContext) {
        let now = ctx.now_ms();
        self.feedback.show(
            "TIME'S UP!",
            FeedbackKind::Error,
            now,
            self.tuning.feedback_duration_ms,
        );
        ctx.emit_sound(SoundEvent(sounds::TIMEOUT));
        ctx.emit_event(GameEvent::new(
            game_events::ROUND_TIMEOUT,
            outcome.penalty as f32,
            0.0,
            0.0,
        ));
        self.timers.schedule(
            now + self.tuning.timeout_restart_delay_ms,
            self.round.generation(),
            Deferred::NewRound,
        );
    }

    fn maintain_pool(&mut self, ctx: &mut EngineContext) {
        let plan = pool_plan(&self.round, &self.tuning, self.module_size);
        self.pool.maintain(&plan, ctx);
    }

    fn refresh_hover(&mut self, pointer: Option<Vec2>) {
        self.hovered = picking::update_hover(
            self.pool.modules_mut(),
            &self.camera,
            pointer,
            self.tuning.hover_radius,
        );
    }
}

impl Default for LetterMatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Pool parameters for the round in progress.
///
/// Ultra-hard rounds guarantee no look-ahead letters. A relief round, the
/// one after a boss, cycles decoys half as often and shows one more letter.
fn pool_plan<'a>(round: &'a RoundState, tuning: &Tuning, module_size: f32) -> PoolPlan<'a> {
    let flags = round.flags();
    let lookahead_count = if flags.ultra_hard {
        0
    } else {
        tuning.word_context_count + usize::from(flags.relief)
    };
    let cycle_interval_ms = if flags.relief {
        tuning.module_cycle_interval_ms * 2.0
    } else {
        tuning.module_cycle_interval_ms
    };
    let duplicate_chance = match round.round_type() {
        RoundType::Frenzy => tuning.frenzy_decoy_duplicate_chance,
        RoundType::Normal | RoundType::Boss => tuning.decoy_duplicate_chance,
    };
    PoolPlan {
        target: round.target(),
        lookahead: round.upcoming(lookahead_count),
        capacity: tuning.max_modules,
        duplicate_chance,
        cycle_interval_ms,
        module_size,
        bounds: tuning.bounds_size,
    }
}

/// Colour and stroke weight for a module in its current visual state.
fn module_appearance(module: &Module, prefs: &DisplayPreferences) -> (HsbColor, f32) {
    if module.error_frames > 0 {
        (ERROR_COLOR, 3.0)
    } else if module.role() == Role::Matched {
        (SUCCESS_COLOR, 3.0)
    } else if module.hovered {
        (SELECTION_COLOR, 2.0)
    } else if prefs.color_hints {
        (style_of(module.letter()), 1.0)
    } else if prefs.dark_mode {
        (DARK_BOX_COLOR, 1.0)
    } else {
        (LIGHT_BOX_COLOR, 1.0)
    }
}

impl Game for LetterMatch {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            viewport_width: VIEWPORT_W,
            viewport_height: VIEWPORT_H,
            max_instances: MAX_INSTANCES,
            seed: random_seed(),
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.now_ms = ctx.now_ms();
        self.start_round(ctx);
        self.maintain_pool(ctx);
        log::info!("Letter Match initialized with {} modules", self.pool.active_count());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.now_ms = ctx.now_ms();

        let mut picks = Vec::new();
        for event in input.iter() {
            self.orbit.handle_input(event);
            match *event {
                InputEvent::PointerMove { x, y } => {
                    self.pointer = Some(Vec2::new(x, y));
                }
                InputEvent::PointerDown { x, y } => {
                    let pos = Vec2::new(x, y);
                    self.pointer = Some(pos);
                    picks.push(PickRequest::At(pos));
                }
                InputEvent::KeyDown { key_code } if key_code == keys::SPACE || key_code == keys::ENTER => {
                    picks.push(PickRequest::Hovered);
                }
                InputEvent::Resize { width, height } => {
                    self.camera.set_viewport(width, height);
                    self.module_size = self.tuning.module_size_for(width);
                }
                InputEvent::Custom { kind, a, .. } => self.handle_custom(kind, a, ctx),
                _ => {}
            }
        }
        self.orbit.update_camera(&mut self.camera);

        for deferred in self.timers.poll(self.now_ms, self.round.generation()) {
            match deferred {
                Deferred::NewRound => self.start_round(ctx),
            }
        }
        if let Some(outcome) = self.round.check_timeout(self.now_ms, &self.tuning) {
            self.on_timeout(outcome, ctx);
        }

        physics::step(self.pool.modules_mut(), self.tuning.bounds_size);
        self.refresh_hover(self.pointer);

        for request in picks {
            if let PickRequest::At(pos) = request {
                self.refresh_hover(Some(pos));
            }
            self.pick(ctx);
        }

        self.maintain_pool(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        let eye = self.camera.eye;
        let mut visible: Vec<&Module> = self
            .pool
            .modules()
            .iter()
            .filter(|m| !m.is_dead() && m.size >= 1.0)
            .collect();
        // Back to front
        visible.sort_by(|a, b| {
            b.position
                .distance_squared(eye)
                .total_cmp(&a.position.distance_squared(eye))
        });
        let skip = visible.len().saturating_sub(MAX_INSTANCES);

        for module in visible.into_iter().skip(skip) {
            let (color, stroke) = module_appearance(module, &self.prefs);
            ctx.render_buffer.push(CubeInstance {
                x: module.position.x,
                y: module.position.y,
                z: module.position.z,
                size: module.size,
                rot_x: module.rotation.x,
                rot_y: module.rotation.y,
                rot_z: module.rotation.z,
                hue: color.h,
                saturation: color.s,
                brightness: color.b,
                points_mask: points_of(module.letter()).0 as f32,
                stroke,
            });
        }
    }

    fn ui_json(&self) -> Option<String> {
        let snapshot = hud::snapshot(
            &self.round,
            &self.prefs,
            &self.feedback,
            self.now_ms,
            &self.tuning,
        );
        serde_json::to_string(&snapshot).ok()
    }

    fn load_config(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let settings = Settings::from_json(json)?;
        if let Some(tuning) = settings.tuning {
            self.module_size = tuning.module_size_for(self.camera.viewport_width);
            self.tuning = tuning;
        }
        if let Some(words) = settings.words {
            self.words = words.sanitized();
        }
        if let Some(orbit) = settings.orbit {
            self.orbit = OrbitController::new(orbit);
        }
        if let Some(prefs) = settings.preferences {
            self.prefs = prefs;
        }
        log::info!("settings applied");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
fn random_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64 + 1
}

#[cfg(not(target_arch = "wasm32"))]
fn random_seed() -> u64 {
    42
}
