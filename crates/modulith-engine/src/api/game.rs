use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::core::rng::Rng;
use crate::core::time::GameClock;
use crate::input::queue::InputQueue;
use crate::renderer::instance::RenderBuffer;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Initial canvas width in CSS pixels.
    pub viewport_width: f32,
    /// Initial canvas height in CSS pixels.
    pub viewport_height: f32,
    /// Maximum number of cube instances written per frame (default: 128).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the engine RNG. Games override this on wasm with a random seed.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_instances: 128,
            max_sounds: 32,
            max_events: 32,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, start the first round.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Runs once per fixed step with the input sampled for this frame.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass that fills the instance buffer.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Optional UI snapshot (JSON) for the DOM layer, read after each tick.
    fn ui_json(&self) -> Option<String> {
        None
    }

    /// Apply a JSON configuration document supplied by the host page.
    /// On error the game must keep its previous configuration.
    fn load_config(&mut self, _json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    pub rng: Rng,
    pub clock: GameClock,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    /// Create an EngineContext whose RNG starts from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            sounds: Vec::new(),
            events: Vec::new(),
            rng: Rng::new(seed),
            clock: GameClock::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Milliseconds of simulated time since init.
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Emit a sound event to be forwarded to JS.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to JS.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for the game's render pass.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_is_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn clear_frame_data_drops_sounds_and_events() {
        let mut ctx = EngineContext::new();
        ctx.emit_sound(SoundEvent(3));
        ctx.emit_event(GameEvent::new(1.0, 2.0, 0.0, 0.0));
        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
    }

    struct Idle;

    impl Game for Idle {
        fn init(&mut self, _ctx: &mut EngineContext) {}
        fn update(&mut self, _ctx: &mut EngineContext, _input: &InputQueue) {}
    }

    #[test]
    fn trait_defaults_are_inert() {
        let mut game = Idle;
        assert!(game.ui_json().is_none());
        assert!(game.load_config("{}").is_ok());
        assert_eq!(game.config().max_instances, 128);
    }

    #[test]
    fn clock_starts_at_zero() {
        let ctx = EngineContext::new();
        assert_eq!(ctx.now_ms(), 0.0);
    }
}
