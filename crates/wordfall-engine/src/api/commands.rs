use glam::Vec2;

use crate::api::types::{EntityId, Rgb};
use crate::assets::high_scores::HighScoreRecord;
use crate::components::entity::PowerupKind;
use crate::core::run_state::EndReason;
use crate::core::stats::SessionStats;

/// What a spawned visual represents.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualKind {
    Word {
        term: String,
        pronunciation: String,
        gloss: String,
    },
    Powerup(PowerupKind),
    Projectile { text: String },
}

/// One-way command to the rendering, UI or persistence collaborators.
/// Fire-and-forget: the simulation never reads anything back.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SpawnVisual {
        id: EntityId,
        kind: VisualKind,
        pos: Vec2,
    },
    RemoveVisual { id: EntityId },
    PlayExplosion { pos: Vec2, color: Rgb },
    ShakeCamera { duration_ms: u32, intensity: f32 },
    FlashScreen { duration_ms: u32, color: Rgb },
    /// Floating text anchored at a world position (e.g. "+300" over a word).
    ShowText { pos: Vec2, text: String, color: Rgb },
    /// Centered banner text (e.g. "LEVEL 4", "+1 LIFE").
    ShowBanner { text: String, color: Rgb },
    SetPaused(bool),
    GameOver {
        reason: EndReason,
        stats: SessionStats,
    },
    SaveHighScore(HighScoreRecord),
}
