//! Powerup activation and expiry.
//!
//! Each type is `Inactive -> Active(expiry) -> Inactive`. Effects never write
//! the field's speeds: SLOW_TIME is read back through [`PowerupEngine::slow_time_scale`]
//! and DOUBLE_POINTS swaps the run multiplier, remembering the value it replaced
//! so expiry restores it exactly.

use std::collections::BTreeMap;

use crate::api::commands::Command;
use crate::api::game::EngineContext;
use crate::api::types::GameEvent;
use crate::components::entity::PowerupKind;
use crate::core::config::PowerupTypeConfig;
use crate::core::run_state::RunState;

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEffect {
    pub kind: PowerupKind,
    /// Game time (ms) at which the effect ends.
    pub expires_at_ms: u64,
    pub config: PowerupTypeConfig,
    /// Value the effect displaced, restored on expiry.
    pub baseline: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PowerupEngine {
    active: Vec<ActiveEffect>,
}

impl PowerupEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a collected powerup at game time `now_ms`.
    ///
    /// Re-collecting an active type only pushes its expiry out. Returns false
    /// if the type has no configuration (nothing happens) or the run is over.
    pub fn activate(
        &mut self,
        kind: PowerupKind,
        now_ms: u64,
        types: &BTreeMap<PowerupKind, PowerupTypeConfig>,
        run: &mut RunState,
        ctx: &mut EngineContext,
    ) -> bool {
        if run.is_game_over() {
            return false;
        }
        let Some(config) = types.get(&kind) else {
            log::warn!("powerup {} collected but not configured; ignoring", kind.label());
            return false;
        };

        if !kind.is_timed() {
            run.gain_life(ctx);
            return true;
        }

        let expires_at_ms = now_ms + config.duration_ms;
        let secs = config.duration_ms as f32 / 1000.0;
        if let Some(effect) = self.active.iter_mut().find(|e| e.kind == kind) {
            effect.expires_at_ms = expires_at_ms;
            log::debug!("{} refreshed until {}ms", kind.label(), expires_at_ms);
        } else {
            let baseline = match kind {
                PowerupKind::DoublePoints => {
                    let previous = run.multiplier();
                    run.set_multiplier(config.value);
                    previous
                }
                _ => 1.0,
            };
            self.active.push(ActiveEffect {
                kind,
                expires_at_ms,
                config: config.clone(),
                baseline,
            });
            log::info!("{} active until {}ms", kind.label(), expires_at_ms);
        }

        ctx.emit_event(GameEvent::powerup(kind.id(), true, secs));
        ctx.emit(Command::ShowBanner {
            text: kind.label().to_string(),
            color: config.color,
        });
        true
    }

    /// End every effect whose expiry is at or before `now_ms`.
    pub fn expire(&mut self, now_ms: u64, run: &mut RunState, ctx: &mut EngineContext) {
        let mut i = 0;
        while i < self.active.len() {
            if self.active[i].expires_at_ms > now_ms {
                i += 1;
                continue;
            }
            let effect = self.active.remove(i);
            if effect.kind == PowerupKind::DoublePoints {
                run.set_multiplier(effect.baseline);
            }
            log::debug!("{} expired at {}ms", effect.kind.label(), now_ms);
            ctx.emit_event(GameEvent::powerup(effect.kind.id(), false, 0.0));
        }
    }

    /// Word fall-speed scale: the SLOW_TIME value while it is active, else 1.
    pub fn slow_time_scale(&self) -> f32 {
        self.active
            .iter()
            .find(|e| e.kind == PowerupKind::SlowTime)
            .map_or(1.0, |e| e.config.value as f32)
    }

    pub fn is_active(&self, kind: PowerupKind) -> bool {
        self.active.iter().any(|e| e.kind == kind)
    }

    pub fn expiry(&self, kind: PowerupKind) -> Option<u64> {
        self.active.iter().find(|e| e.kind == kind).map(|e| e.expires_at_ms)
    }

    pub fn active(&self) -> &[ActiveEffect] {
        &self.active
    }
}
