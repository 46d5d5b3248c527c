/// Fixed timestep accumulator.
/// Ensures the simulation runs at a consistent rate regardless of frame time.
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

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Monotonic game-time clock.
///
/// Counts whole microseconds so long sessions do not drift, and only moves
/// when the session advances it (paused ticks leave it untouched).
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    elapsed_us: u64,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Returns how many whole-second boundaries were crossed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let before = self.elapsed_us / 1_000_000;
        self.elapsed_us += (dt.max(0.0) as f64 * 1_000_000.0).round() as u64;
        let after = self.elapsed_us / 1_000_000;
        (after - before) as u32
    }

    /// Elapsed game time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.elapsed_us / 1_000
    }
}
