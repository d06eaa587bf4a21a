/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Monotonic simulated time in milliseconds.
///
/// Advanced by the runner once per fixed step, so every timer in the game
/// (round limits, combo windows, feedback expiry) is measured in simulation
/// time and pauses together with the tick loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameClock {
    now_ms: f64,
}

impl GameClock {
    pub fn new() -> Self {
        Self { now_ms: 0.0 }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.now_ms += dt as f64 * 1000.0;
    }

    pub fn advance_ms(&mut self, ms: f64) {
        self.now_ms += ms.max(0.0);
    }
}
