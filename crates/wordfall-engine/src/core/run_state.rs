//! Score / lives / level / timer state machine.
//!
//! `RunState` is the single source of truth for progression. Other
//! components request changes through its methods; every method is a silent
//! no-op once the run is over, since a terminal tick may race late requests.

use serde::{Deserialize, Serialize};

use crate::api::commands::Command;
use crate::api::game::EngineContext;
use crate::api::types::{GameEvent, Rgb, SoundEvent};
use crate::assets::high_scores::HighScoreRecord;
use crate::core::config::RunConfig;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndReason {
    NoLives,
    TimeUp,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Running,
    Paused,
    GameOver(EndReason),
}

#[derive(Debug, Clone)]
pub struct RunState {
    score: u64,
    lives: u32,
    level: u32,
    time_left: u32,
    multiplier: f64,
    phase: RunPhase,
    rules: RunConfig,
}

impl RunState {
    pub fn new(rules: &RunConfig) -> Self {
        Self {
            score: 0,
            lives: rules.initial_lives,
            level: 1,
            time_left: rules.game_time_secs,
            multiplier: 1.0,
            phase: RunPhase::Running,
            rules: rules.clone(),
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == RunPhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, RunPhase::GameOver(_))
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            RunPhase::GameOver(reason) => Some(reason),
            _ => None,
        }
    }

    /// Score scaling for a level: points_multiplier^(level - 1).
    pub fn level_factor(&self, level: u32) -> f64 {
        self.rules.points_multiplier.powi(level.saturating_sub(1) as i32)
    }

    /// Points `base_points` would be worth right now.
    pub fn effective_points(&self, base_points: u64) -> u64 {
        (base_points as f64 * self.multiplier * self.level_factor(self.level)).floor() as u64
    }

    /// Award points. Returns the effective delta actually added.
    pub fn add_score(&mut self, base_points: u64, ctx: &mut EngineContext) -> u64 {
        if self.is_game_over() {
            return 0;
        }
        let points = self.effective_points(base_points);
        self.score += points;
        ctx.emit_event(GameEvent::score(self.score));
        self.check_level_progress(ctx);
        points
    }

    fn check_level_progress(&mut self, ctx: &mut EngineContext) {
        if self.score >= self.rules.level_score_step * self.level as u64 {
            self.level_up(ctx);
        }
    }

    fn level_up(&mut self, ctx: &mut EngineContext) {
        self.level += 1;
        log::info!("level up: {} (score {})", self.level, self.score);
        ctx.emit_event(GameEvent::level(self.level));
        ctx.emit_sound(SoundEvent::Powerup);
        ctx.emit(Command::FlashScreen {
            duration_ms: 500,
            color: Rgb::GREEN,
        });
        ctx.emit(Command::ShowBanner {
            text: format!("LEVEL {}", self.level),
            color: Rgb::GREEN,
        });
    }

    pub fn lose_life(&mut self, ctx: &mut EngineContext) {
        if self.is_game_over() {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        ctx.emit_event(GameEvent::lives(self.lives));
        if self.lives == 0 {
            self.end_game(EndReason::NoLives, ctx);
        } else {
            ctx.emit_sound(SoundEvent::Explode);
            ctx.emit(Command::ShakeCamera {
                duration_ms: 200,
                intensity: 0.005,
            });
        }
    }

    /// Grant a life, capped at the starting count. At the cap nothing happens.
    pub fn gain_life(&mut self, ctx: &mut EngineContext) {
        if self.is_game_over() || self.lives >= self.rules.initial_lives {
            return;
        }
        self.lives += 1;
        ctx.emit_event(GameEvent::lives(self.lives));
        ctx.emit_sound(SoundEvent::Powerup);
        ctx.emit(Command::ShowBanner {
            text: "+1 LIFE".into(),
            color: Rgb::GREEN,
        });
    }

    /// Count down one second. Only advances while running.
    pub fn tick_timer(&mut self, ctx: &mut EngineContext) {
        if !self.is_running() {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        ctx.emit_event(GameEvent::time(self.time_left));
        if self.time_left == 0 {
            self.end_game(EndReason::TimeUp, ctx);
        }
    }

    /// Running <-> Paused. Returns false (and does nothing) once the run is over.
    pub fn toggle_pause(&mut self, ctx: &mut EngineContext) -> bool {
        self.phase = match self.phase {
            RunPhase::Running => RunPhase::Paused,
            RunPhase::Paused => RunPhase::Running,
            RunPhase::GameOver(_) => return false,
        };
        ctx.emit(Command::SetPaused(self.is_paused()));
        true
    }

    /// Set the score multiplier. Used by the powerup engine to apply and revert effects.
    pub fn set_multiplier(&mut self, multiplier: f64) {
        if self.is_game_over() {
            return;
        }
        self.multiplier = multiplier;
    }

    /// Force the run into `GameOver` and request a high-score save.
    /// Idempotent: a second call is ignored.
    pub fn end_game(&mut self, reason: EndReason, ctx: &mut EngineContext) {
        if self.is_game_over() {
            return;
        }
        self.phase = RunPhase::GameOver(reason);
        log::info!(
            "game over ({:?}): score {} at level {}",
            reason,
            self.score,
            self.level
        );
        ctx.emit_sound(SoundEvent::GameOver);
        ctx.emit(Command::SaveHighScore(self.high_score_record(ctx.wall_time_secs())));
    }

    pub fn high_score_record(&self, timestamp: u64) -> HighScoreRecord {
        HighScoreRecord {
            score: self.score,
            level: self.level,
            timestamp,
        }
    }

    /// HUD snapshot of every counter, emitted on session start and reset.
    pub fn emit_hud(&self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent::score(self.score));
        ctx.emit_event(GameEvent::lives(self.lives));
        ctx.emit_event(GameEvent::level(self.level));
        ctx.emit_event(GameEvent::time(self.time_left));
    }
}
