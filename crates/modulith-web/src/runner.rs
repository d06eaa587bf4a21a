use modulith_engine::bridge::protocol::HEADER_FLOATS;
use modulith_engine::{
    EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue, ProtocolLayout,
    RenderBuffer, RenderContext,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame: u32,
    header: [f32; HEADER_FLOATS],
    /// Flat buffer of sound event IDs for SharedArrayBuffer reads.
    sound_buffer: Vec<u8>,
    /// UI snapshot of the last tick, empty if the game exposes none.
    ui_json: String,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);

        let render_buffer = RenderBuffer::with_capacity(config.max_instances);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::with_seed(config.seed),
            input: InputQueue::new(),
            render_buffer,
            timestep,
            layout,
            config,
            initialized: false,
            frame: 0,
            header: [0.0; HEADER_FLOATS],
            sound_buffer,
            ui_json: String::new(),
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.refresh_ui();
    }

    /// Apply a host config document, then initialize, so the opening round
    /// already runs with the configured settings.
    pub fn init_with_config(&mut self, json: &str) {
        self.load_config(json);
        self.init();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Forward a JSON config document to the game. Malformed input is logged
    /// and the game keeps its current configuration.
    pub fn load_config(&mut self, json: &str) {
        if let Err(err) = self.game.load_config(json) {
            log::warn!("config rejected, keeping defaults: {}", err);
        }
    }

    /// Run one frame tick: fixed-step updates, then the render pass.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Input is visible to the first fixed step only
        let steps = self.timestep.accumulate(dt);
        let step_dt = self.timestep.dt();
        for step in 0..steps {
            self.ctx.clock.advance(step_dt);
            if step == 0 {
                self.game.update(&mut self.ctx, &self.input);
            } else {
                self.game.update(&mut self.ctx, &InputQueue::new());
            }
        }

        // Inputs that arrived on a frame with no step wait for the next one
        if steps > 0 {
            self.input.drain();
        }

        self.render_buffer.clear();
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
            };
            self.game.render(&mut render_ctx);
        }

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.layout.max_sounds) {
            self.sound_buffer.push(sound.0 as u8);
        }

        self.frame = self.frame.wrapping_add(1);
        self.header = self.layout.header(
            self.frame,
            self.render_buffer.instance_count() as usize,
            self.sound_buffer.len(),
            self.ctx.events.len(),
        );

        self.refresh_ui();
    }

    fn refresh_ui(&mut self) {
        if let Some(json) = self.game.ui_json() {
            self.ui_json = json;
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn ui_json(&self) -> &str {
        &self.ui_json
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count().min(self.layout.max_instances as u32)
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.layout.max_events) as u32
    }

    pub fn viewport_width(&self) -> f32 {
        self.config.viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.config.viewport_height
    }

    // ---- Capacity accessors (read by JS via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
