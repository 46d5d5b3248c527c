//! Word and powerup spawn pacing.
//!
//! Words: the interval starts at the EASY base and shrinks by the current
//! tier's decay after every spawn, never below the current tier's floor. A
//! tier change keeps the interval value; only later decay steps see the new
//! tier's factor and floor.
//!
//! Powerups: a fixed cooldown between attempts; each attempt is a weighted
//! coin flip, then a uniform pick from the enabled types.

use crate::assets::vocabulary::{Tier, VocabularyCatalog, VocabularyEntry};
use crate::components::entity::PowerupKind;
use crate::core::config::SessionConfig;
use crate::core::rng::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct WordSpawn {
    pub entry: VocabularyEntry,
    pub tier: Tier,
    pub x: f32,
    /// Tier base speed, before any slow-time effect.
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerupSpawn {
    pub kind: PowerupKind,
    pub x: f32,
    pub speed: f32,
}

/// What the scheduler decided this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnPlan {
    pub word: Option<WordSpawn>,
    pub powerup: Option<PowerupSpawn>,
}

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    last_word_spawn_ms: u64,
    word_interval_ms: f64,
    last_powerup_attempt_ms: u64,
    powerup_cooldown_ms: u64,
}

impl SpawnScheduler {
    pub fn new(config: &SessionConfig) -> Self {
        let start_tier = config.tiers.tier_for_level(1);
        Self {
            last_word_spawn_ms: 0,
            word_interval_ms: config.tiers.get(start_tier).interval_base_ms,
            last_powerup_attempt_ms: 0,
            powerup_cooldown_ms: config.powerups.cooldown_ms,
        }
    }

    /// Current word spawn interval in milliseconds.
    pub fn word_interval_ms(&self) -> f64 {
        self.word_interval_ms
    }

    pub fn last_word_spawn_ms(&self) -> u64 {
        self.last_word_spawn_ms
    }

    pub fn last_powerup_attempt_ms(&self) -> u64 {
        self.last_powerup_attempt_ms
    }

    /// Decide what enters the field at game time `now_ms`, given the level
    /// the run ended the previous tick on.
    pub fn update(
        &mut self,
        now_ms: u64,
        level: u32,
        catalog: &VocabularyCatalog,
        config: &SessionConfig,
        rng: &mut Rng,
    ) -> SpawnPlan {
        SpawnPlan {
            word: self.maybe_spawn_word(now_ms, level, catalog, config, rng),
            powerup: self.maybe_spawn_powerup(now_ms, config, rng),
        }
    }

    fn maybe_spawn_word(
        &mut self,
        now_ms: u64,
        level: u32,
        catalog: &VocabularyCatalog,
        config: &SessionConfig,
        rng: &mut Rng,
    ) -> Option<WordSpawn> {
        let since = now_ms.saturating_sub(self.last_word_spawn_ms) as f64;
        if since < self.word_interval_ms {
            return None;
        }
        self.last_word_spawn_ms = now_ms;

        let tier = config.tiers.tier_for_level(level);
        let Some(entry) = catalog.pick(tier, rng) else {
            log::warn!("no vocabulary for tier {:?}; skipping word spawn", tier);
            return None;
        };
        let entry = entry.clone();
        let tier_config = config.tiers.get(tier);
        let x = spawn_x(config, rng);

        let decayed = (self.word_interval_ms * tier_config.interval_decay)
            .max(tier_config.interval_floor_ms);
        self.word_interval_ms = self.word_interval_ms.min(decayed);

        log::debug!(
            "spawn word {:?} ({:?}) at x={:.0}; next interval {:.0}ms",
            entry.term,
            tier,
            x,
            self.word_interval_ms
        );
        Some(WordSpawn {
            entry,
            tier,
            x,
            speed: tier_config.fall_speed,
        })
    }

    fn maybe_spawn_powerup(
        &mut self,
        now_ms: u64,
        config: &SessionConfig,
        rng: &mut Rng,
    ) -> Option<PowerupSpawn> {
        if now_ms.saturating_sub(self.last_powerup_attempt_ms) < self.powerup_cooldown_ms {
            return None;
        }
        self.last_powerup_attempt_ms = now_ms;

        let powerups = &config.powerups;
        if !rng.chance(powerups.spawn_chance) {
            return None;
        }
        if powerups.enabled.is_empty() {
            log::debug!("no powerup types enabled; skipping spawn");
            return None;
        }
        let kind = powerups.enabled[rng.next_int(powerups.enabled.len() as u32) as usize];
        if !powerups.types.contains_key(&kind) {
            log::warn!("powerup {} has no configuration; skipping spawn", kind.label());
            return None;
        }
        let x = spawn_x(config, rng);
        log::debug!("spawn powerup {} at x={:.0}", kind.label(), x);
        Some(PowerupSpawn {
            kind,
            x,
            speed: powerups.fall_speed,
        })
    }
}

fn spawn_x(config: &SessionConfig, rng: &mut Rng) -> f32 {
    let margin = config.world.spawn_margin;
    rng.range_f32(margin, config.world.width - margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TierConfig;

    fn config() -> SessionConfig {
        let mut config = SessionConfig::default();
        config.tiers.easy = TierConfig {
            fall_speed: 50.0,
            interval_base_ms: 1000.0,
            interval_decay: 0.5,
            interval_floor_ms: 300.0,
        };
        config.tiers.medium = TierConfig {
            fall_speed: 80.0,
            interval_base_ms: 800.0,
            interval_decay: 0.9,
            interval_floor_ms: 100.0,
        };
        config.powerups.spawn_chance = 0.0;
        config
    }

    #[test]
    fn first_word_waits_one_interval() {
        let config = config();
        let catalog = VocabularyCatalog::builtin();
        let mut rng = Rng::new(1);
        let mut sched = SpawnScheduler::new(&config);

        assert!(sched.update(999, 1, &catalog, &config, &mut rng).word.is_none());
        let word = sched.update(1000, 1, &catalog, &config, &mut rng).word.unwrap();
        assert_eq!(word.tier, Tier::Easy);
        assert_eq!(word.speed, 50.0);
        assert!(word.x >= 50.0 && word.x < 750.0);
        assert_eq!(sched.last_word_spawn_ms(), 1000);
    }

    #[test]
    fn interval_decays_to_floor_and_never_grows() {
        let config = config();
        let catalog = VocabularyCatalog::builtin();
        let mut rng = Rng::new(1);
        let mut sched = SpawnScheduler::new(&config);

        let mut now = 0;
        let mut seen = vec![sched.word_interval_ms()];
        for _ in 0..6 {
            now += sched.word_interval_ms().ceil() as u64;
            assert!(sched.update(now, 1, &catalog, &config, &mut rng).word.is_some());
            seen.push(sched.word_interval_ms());
        }
        assert_eq!(seen, vec![1000.0, 500.0, 300.0, 300.0, 300.0, 300.0, 300.0]);
        assert!(seen.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn tier_change_keeps_interval_and_switches_floor() {
        let config = config();
        let catalog = VocabularyCatalog::builtin();
        let mut rng = Rng::new(1);
        let mut sched = SpawnScheduler::new(&config);

        sched.update(1000, 1, &catalog, &config, &mut rng);
        sched.update(1500, 1, &catalog, &config, &mut rng);
        assert_eq!(sched.word_interval_ms(), 300.0);

        // Level 4 is MEDIUM: the interval is not reset to 800, it keeps
        // decaying with MEDIUM's factor toward MEDIUM's lower floor.
        let word = sched.update(1800, 4, &catalog, &config, &mut rng).word.unwrap();
        assert_eq!(word.tier, Tier::Medium);
        assert_eq!(word.speed, 80.0);
        assert!((sched.word_interval_ms() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn empty_tier_skips_without_decay() {
        let config = config();
        let catalog = VocabularyCatalog {
            medium: VocabularyCatalog::builtin().medium,
            ..Default::default()
        };
        let mut rng = Rng::new(1);
        let mut sched = SpawnScheduler::new(&config);

        assert!(sched.update(1000, 1, &catalog, &config, &mut rng).word.is_none());
        assert_eq!(sched.word_interval_ms(), 1000.0);
        assert_eq!(sched.last_word_spawn_ms(), 1000);
    }

    #[test]
    fn powerup_attempts_respect_cooldown() {
        let mut config = config();
        config.powerups.spawn_chance = 1.0;
        config.powerups.cooldown_ms = 15_000;
        let catalog = VocabularyCatalog::builtin();
        let mut rng = Rng::new(5);
        let mut sched = SpawnScheduler::new(&config);

        assert!(sched.update(14_999, 1, &catalog, &config, &mut rng).powerup.is_none());
        let p = sched.update(15_000, 1, &catalog, &config, &mut rng).powerup.unwrap();
        assert_eq!(p.speed, 100.0);
        assert!(PowerupKind::ALL.contains(&p.kind));
        assert!(sched.update(20_000, 1, &catalog, &config, &mut rng).powerup.is_none());
        assert!(sched.update(30_000, 1, &catalog, &config, &mut rng).powerup.is_some());
    }

    #[test]
    fn failed_coin_flip_still_consumes_the_attempt() {
        let config = config();
        let catalog = VocabularyCatalog::builtin();
        let mut rng = Rng::new(5);
        let mut sched = SpawnScheduler::new(&config);

        assert!(sched.update(15_000, 1, &catalog, &config, &mut rng).powerup.is_none());
        assert_eq!(sched.last_powerup_attempt_ms(), 15_000);
    }

    #[test]
    fn unconfigured_powerup_type_is_skipped() {
        let mut config = config();
        config.powerups.spawn_chance = 1.0;
        config.powerups.enabled = vec![PowerupKind::ExtraLife];
        config.powerups.types.remove(&PowerupKind::ExtraLife);
        let catalog = VocabularyCatalog::builtin();
        let mut rng = Rng::new(5);
        let mut sched = SpawnScheduler::new(&config);

        assert!(sched.update(15_000, 1, &catalog, &config, &mut rng).powerup.is_none());
    }

    #[test]
    fn same_seed_same_schedule() {
        let mut config = config();
        config.powerups.spawn_chance = 0.5;
        config.powerups.cooldown_ms = 1000;
        let catalog = VocabularyCatalog::builtin();
        let run = |seed| {
            let mut rng = Rng::new(seed);
            let mut sched = SpawnScheduler::new(&config);
            (1..=40)
                .map(|i| sched.update(i * 250, 1 + (i / 10) as u32, &catalog, &config, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }
}
