use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::assets::vocabulary::VocabularyEntry;

/// Enumerated powerup types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerupKind {
    SlowTime,
    DoublePoints,
    ExtraLife,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [Self::SlowTime, Self::DoublePoints, Self::ExtraLife];

    /// Stable numeric id used in HUD events.
    pub fn id(self) -> u32 {
        match self {
            Self::SlowTime => 1,
            Self::DoublePoints => 2,
            Self::ExtraLife => 3,
        }
    }

    /// Display name, e.g. "SLOW TIME".
    pub fn label(self) -> &'static str {
        match self {
            Self::SlowTime => "SLOW TIME",
            Self::DoublePoints => "DOUBLE POINTS",
            Self::ExtraLife => "EXTRA LIFE",
        }
    }

    /// Whether the effect lasts for a duration (as opposed to applying once).
    pub fn is_timed(self) -> bool {
        !matches!(self, Self::ExtraLife)
    }
}

/// A falling vocabulary item.
#[derive(Debug, Clone, PartialEq)]
pub struct WordEntity {
    pub id: EntityId,
    pub entry: VocabularyEntry,
    /// Center position in world space.
    pub pos: Vec2,
    /// Base fall speed in units per second, before any slow-time scaling.
    pub speed: f32,
    /// Game time (ms) the word entered the field.
    pub spawned_at_ms: u64,
}

impl WordEntity {
    pub fn new(id: EntityId, entry: VocabularyEntry) -> Self {
        Self {
            id,
            entry,
            pos: Vec2::ZERO,
            speed: 0.0,
            spawned_at_ms: 0,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_spawn_time(mut self, ms: u64) -> Self {
        self.spawned_at_ms = ms;
        self
    }

    /// Number of characters in the term (drives scoring).
    pub fn term_len(&self) -> usize {
        self.entry.term.chars().count()
    }
}

/// A falling powerup pickup.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerupEntity {
    pub id: EntityId,
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub speed: f32,
    pub spawned_at_ms: u64,
}

impl PowerupEntity {
    pub fn new(id: EntityId, kind: PowerupKind) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::ZERO,
            speed: 0.0,
            spawned_at_ms: 0,
        }
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_spawn_time(mut self, ms: u64) -> Self {
        self.spawned_at_ms = ms;
        self
    }
}

/// A projectile fired upward by the player, carrying the text that was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub text: String,
    pub pos: Vec2,
    /// Upward speed in units per second.
    pub speed: f32,
}

impl Projectile {
    pub fn new(id: EntityId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            pos: Vec2::ZERO,
            speed: 0.0,
        }
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

/// Axis-aligned overlap test between two boxes given as center + half extents.
pub fn overlaps(a_pos: Vec2, a_half: Vec2, b_pos: Vec2, b_half: Vec2) -> bool {
    let d = (a_pos - b_pos).abs();
    let reach = a_half + b_half;
    d.x < reach.x && d.y < reach.y
}
