use crate::api::collaborators::{dispatch_frame, Collaborators};
use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::GameEvent;
use crate::core::time::FixedTimestep;
use crate::input::queue::{InputEvent, InputQueue};

/// Generic runner that wires a [`Game`] to a host loop.
///
/// The host pushes input between frames and calls [`GameRunner::tick`] with
/// the variable frame delta; the runner turns it into fixed steps and hands
/// the frame's sounds, HUD events and commands to the collaborators.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            timestep,
            config,
            initialized: false,
        }
    }

    /// Initialize the game and deliver its opening announcements.
    /// Call once after construction.
    pub fn init(&mut self, collaborators: &mut impl Collaborators) {
        self.config = self.game.config();
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.ctx.clear_frame_data();
        self.game.init(&mut self.ctx);
        dispatch_frame(&self.ctx, collaborators);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Host wall-clock time (unix seconds) used to stamp high-score records.
    pub fn set_wall_time_secs(&mut self, secs: u64) {
        self.ctx.set_wall_time_secs(secs);
    }

    /// Run one frame: fixed steps, then dispatch. Returns the number of
    /// fixed steps taken.
    ///
    /// Queued input is seen by the first step only. A frame too short for
    /// any step keeps the input for the next frame.
    pub fn tick(&mut self, dt: f32, collaborators: &mut impl Collaborators) -> u32 {
        if !self.initialized {
            return 0;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            self.game.update(&mut self.ctx, &self.input);
            self.input.drain();
            let empty = InputQueue::new();
            for _ in 1..steps {
                self.game.update(&mut self.ctx, &empty);
            }
        }

        let failures = dispatch_frame(&self.ctx, collaborators);
        if failures > 0 {
            log::debug!("{} collaborator deliveries failed this frame", failures);
        }
        steps
    }

    /// This frame's outbound queues (valid until the next tick).
    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// This frame's HUD events as a flat float buffer (4 floats per event).
    pub fn event_floats(&self) -> &[f32] {
        GameEvent::as_floats(&self.ctx.events)
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Interpolation alpha between the last two fixed steps.
    pub fn alpha(&self) -> f32 {
        self.timestep.alpha()
    }
}
