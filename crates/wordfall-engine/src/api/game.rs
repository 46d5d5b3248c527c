use crate::api::commands::Command;
use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::input::queue::InputQueue;

/// Configuration for the runner, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return runner configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and announce it to the collaborators.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick. Consume input, advance the simulation, emit commands.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Outbound channel shared by every component during a tick.
///
/// Components never call collaborators directly; they push sounds, HUD events
/// and commands here and the runner forwards them after the frame.
pub struct EngineContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    pub commands: Vec<Command>,
    next_id: u32,
    wall_time_secs: u64,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            sounds: Vec::new(),
            events: Vec::new(),
            commands: Vec::new(),
            next_id: 1,
            wall_time_secs: 0,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a sound cue for the audio collaborator.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a HUD event for the UI collaborator.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Emit a visual or persistence command.
    pub fn emit(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Host wall-clock time (unix seconds), used to stamp high-score records.
    pub fn wall_time_secs(&self) -> u64 {
        self.wall_time_secs
    }

    pub fn set_wall_time_secs(&mut self, secs: u64) {
        self.wall_time_secs = secs;
    }

    /// Clear per-frame transient data (sounds, events, commands).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
        self.commands.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
