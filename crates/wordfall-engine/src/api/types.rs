use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unique identifier for an entity on the play field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// A sound cue emitted by the simulation.
/// The numeric value maps to a host-defined sound in the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SoundEvent {
    Shoot = 1,
    Explode = 2,
    Powerup = 3,
    GameOver = 4,
    Swoosh = 5,
}

impl SoundEvent {
    pub fn id(self) -> u32 {
        self as u32
    }
}

/// Packed 0xRRGGBB color used by visual commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const RED: Rgb = Rgb(0xff0000);
    pub const GREEN: Rgb = Rgb(0x00ff00);
    pub const WHITE: Rgb = Rgb(0xffffff);
}

/// HUD event kinds carried in [`GameEvent::kind`].
pub mod event_kinds {
    /// `a` = score.
    pub const SCORE: f32 = 1.0;
    /// `a` = lives.
    pub const LIVES: f32 = 2.0;
    /// `a` = level.
    pub const LEVEL: f32 = 3.0;
    /// `a` = seconds remaining.
    pub const TIME: f32 = 4.0;
    /// `a` = powerup kind id, `b` = 1 active / 0 inactive, `c` = seconds left.
    pub const POWERUP: f32 = 5.0;
}

/// A HUD update communicated from the simulation to the UI layer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32) -> Self {
        Self { kind, a, b: 0.0, c: 0.0 }
    }

    pub fn score(score: u64) -> Self {
        Self::new(event_kinds::SCORE, score as f32)
    }

    pub fn lives(lives: u32) -> Self {
        Self::new(event_kinds::LIVES, lives as f32)
    }

    pub fn level(level: u32) -> Self {
        Self::new(event_kinds::LEVEL, level as f32)
    }

    pub fn time(seconds: u32) -> Self {
        Self::new(event_kinds::TIME, seconds as f32)
    }

    pub fn powerup(kind_id: u32, active: bool, seconds_left: f32) -> Self {
        Self {
            kind: event_kinds::POWERUP,
            a: kind_id as f32,
            b: if active { 1.0 } else { 0.0 },
            c: seconds_left,
        }
    }

    /// View a slice of events as a flat float buffer for the host.
    pub fn as_floats(events: &[GameEvent]) -> &[f32] {
        bytemuck::cast_slice(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_flatten_in_field_order() {
        let events = [GameEvent::score(300), GameEvent::powerup(2, true, 10.0)];
        let floats = GameEvent::as_floats(&events);
        assert_eq!(floats.len(), 2 * GameEvent::FLOATS);
        assert_eq!(&floats[..4], &[event_kinds::SCORE, 300.0, 0.0, 0.0]);
        assert_eq!(&floats[4..], &[event_kinds::POWERUP, 2.0, 1.0, 10.0]);
    }

    #[test]
    fn sound_ids_are_stable() {
        assert_eq!(SoundEvent::Shoot.id(), 1);
        assert_eq!(SoundEvent::Swoosh.id(), 5);
    }
}
