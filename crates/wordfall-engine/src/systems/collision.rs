use std::collections::BTreeMap;

use glam::Vec2;

use crate::api::commands::{Command, VisualKind};
use crate::api::game::EngineContext;
use crate::api::types::{EntityId, Rgb, SoundEvent};
use crate::assets::vocabulary::VocabularyEntry;
use crate::components::entity::{PowerupEntity, PowerupKind, Projectile, WordEntity};
use crate::core::config::{AttackConfig, AttackModel, PowerupTypeConfig};
use crate::core::run_state::RunState;
use crate::core::stats::SessionStats;
use crate::systems::field::{EntityField, FieldEvent};
use crate::systems::powerups::PowerupEngine;

/// Everything the resolver may touch during one tick, passed explicitly.
pub struct ResolveDeps<'a> {
    pub field: &'a mut EntityField,
    pub run: &'a mut RunState,
    pub powerups: &'a mut PowerupEngine,
    pub stats: &'a mut SessionStats,
    pub ctx: &'a mut EngineContext,
    pub powerup_types: &'a BTreeMap<PowerupKind, PowerupTypeConfig>,
    pub now_ms: u64,
}

/// Turns field events and typed submissions into score, life and powerup
/// changes.
///
/// With [`AttackModel::Direct`] a submission removes the matching word on the
/// spot. With [`AttackModel::Projectile`] it fires a projectile carrying the
/// text, and the match is checked when that projectile touches a word.
pub struct CollisionResolver {
    model: AttackModel,
    projectile_speed: f32,
    points_per_char: u64,
    pending: Vec<String>,
}

impl CollisionResolver {
    pub fn new(attack: &AttackConfig, points_per_char: u64) -> Self {
        Self {
            model: attack.model,
            projectile_speed: attack.projectile_speed,
            points_per_char,
            pending: Vec::new(),
        }
    }

    pub fn model(&self) -> AttackModel {
        self.model
    }

    /// Queue finalized typed text for this tick. Blank text is dropped.
    pub fn submit(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.pending.push(text.to_string());
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Drop queued submissions (used while paused or after game over).
    pub fn discard_pending(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("discarding {} late submission(s)", self.pending.len());
            self.pending.clear();
        }
    }

    /// Settle this tick's field events, then this tick's submissions.
    pub fn resolve(&mut self, events: &mut Vec<FieldEvent>, mut deps: ResolveDeps<'_>) {
        for event in events.drain(..) {
            self.handle_field_event(event, &mut deps);
        }

        for text in std::mem::take(&mut self.pending) {
            if deps.run.is_game_over() {
                log::debug!("run over; dropping submission {:?}", text);
                continue;
            }
            deps.stats.submissions += 1;
            match self.model {
                AttackModel::Direct => self.strike(&text, &mut deps),
                AttackModel::Projectile => self.fire(text, &mut deps),
            }
        }
    }

    fn handle_field_event(&self, event: FieldEvent, deps: &mut ResolveDeps<'_>) {
        if deps.run.is_game_over() {
            // Entities already taken from the field only lose their visual;
            // nothing scores or counts once the run is over.
            let removed = match event {
                FieldEvent::WordMissed(word) | FieldEvent::PlayerHitWord(word) => Some(word.id),
                FieldEvent::PowerupCollected(powerup) => Some(powerup.id),
                FieldEvent::PowerupLeft(id) | FieldEvent::ProjectileLeft(id) => Some(id),
                FieldEvent::BulletHit { .. } => None,
            };
            if let Some(id) = removed {
                deps.ctx.emit(Command::RemoveVisual { id });
            }
            return;
        }

        match event {
            FieldEvent::WordMissed(word) => {
                log::debug!("missed {:?}", word.entry.term);
                deps.ctx.emit(Command::RemoveVisual { id: word.id });
                deps.stats.words_missed += 1;
                deps.run.lose_life(deps.ctx);
            }
            FieldEvent::PowerupLeft(id) | FieldEvent::ProjectileLeft(id) => {
                deps.ctx.emit(Command::RemoveVisual { id });
            }
            FieldEvent::PlayerHitWord(word) => {
                deps.ctx.emit(Command::RemoveVisual { id: word.id });
                deps.ctx.emit(Command::PlayExplosion {
                    pos: word.pos,
                    color: Rgb::RED,
                });
                deps.ctx.emit(Command::ShakeCamera {
                    duration_ms: 200,
                    intensity: 0.01,
                });
                deps.stats.collisions += 1;
                deps.run.lose_life(deps.ctx);
            }
            FieldEvent::PowerupCollected(powerup) => self.collect(powerup, deps),
            FieldEvent::BulletHit { projectile, word } => self.bullet_hit(projectile, word, deps),
        }
    }

    fn collect(&self, powerup: PowerupEntity, deps: &mut ResolveDeps<'_>) {
        let color = deps
            .powerup_types
            .get(&powerup.kind)
            .map_or(Rgb::WHITE, |t| t.color);
        deps.ctx.emit(Command::RemoveVisual { id: powerup.id });
        deps.ctx.emit_sound(SoundEvent::Powerup);
        deps.ctx.emit(Command::PlayExplosion {
            pos: powerup.pos,
            color,
        });
        deps.stats.powerups_collected += 1;
        deps.powerups.activate(
            powerup.kind,
            deps.now_ms,
            deps.powerup_types,
            deps.run,
            deps.ctx,
        );
    }

    fn bullet_hit(&self, projectile_id: EntityId, word_id: EntityId, deps: &mut ResolveDeps<'_>) {
        // An earlier event this tick may already have consumed either side.
        let Some(text) = deps.field.projectile(projectile_id).map(|p| p.text.clone()) else {
            return;
        };
        let matched = deps
            .field
            .word(word_id)
            .is_some_and(|w| word_matches(&w.entry, &text));

        deps.field.remove_projectile(projectile_id);
        deps.ctx.emit(Command::RemoveVisual { id: projectile_id });

        if matched {
            if let Some(word) = deps.field.remove_word(word_id) {
                self.score_word(&word, deps);
            }
        }
    }

    fn strike(&self, text: &str, deps: &mut ResolveDeps<'_>) {
        let Some(id) = match_word(deps.field.words(), text) else {
            log::debug!("no word matches {:?}", text);
            return;
        };
        if let Some(word) = deps.field.remove_word(id) {
            self.score_word(&word, deps);
        }
    }

    fn fire(&self, text: String, deps: &mut ResolveDeps<'_>) {
        let id = deps.ctx.next_id();
        let pos = deps.field.player();
        deps.ctx.emit_sound(SoundEvent::Shoot);
        deps.ctx.emit(Command::SpawnVisual {
            id,
            kind: VisualKind::Projectile { text: text.clone() },
            pos,
        });
        deps.field.spawn_projectile(
            Projectile::new(id, text)
                .with_pos(pos)
                .with_speed(self.projectile_speed),
        );
    }

    fn score_word(&self, word: &WordEntity, deps: &mut ResolveDeps<'_>) {
        let base = word.term_len() as u64 * self.points_per_char;
        let awarded = deps.run.add_score(base, deps.ctx);
        deps.stats.words_matched += 1;
        log::debug!("matched {:?} for {} points", word.entry.term, awarded);

        deps.ctx.emit(Command::RemoveVisual { id: word.id });
        deps.ctx.emit(Command::PlayExplosion {
            pos: word.pos,
            color: Rgb::GREEN,
        });
        deps.ctx.emit(Command::ShowText {
            pos: word.pos - Vec2::new(0.0, 20.0),
            text: format!("+{}", awarded),
            color: Rgb::GREEN,
        });
        deps.ctx.emit_sound(SoundEvent::Explode);
    }
}

/// Whether `text` names this entry: the term exactly, or the pronunciation
/// ignoring case.
pub fn word_matches(entry: &VocabularyEntry, text: &str) -> bool {
    entry.term == text || entry.pronunciation.to_lowercase() == text.to_lowercase()
}

/// The live word `text` matches. When several do, the earliest spawned wins.
pub fn match_word(words: &[WordEntity], text: &str) -> Option<EntityId> {
    words
        .iter()
        .filter(|w| word_matches(&w.entry, text))
        .min_by_key(|w| (w.spawned_at_ms, w.id))
        .map(|w| w.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{PowerupConfig, RunConfig, WorldConfig};

    struct Harness {
        resolver: CollisionResolver,
        field: EntityField,
        run: RunState,
        powerups: PowerupEngine,
        stats: SessionStats,
        ctx: EngineContext,
        types: BTreeMap<PowerupKind, PowerupTypeConfig>,
    }

    impl Harness {
        fn new(model: AttackModel) -> Self {
            let attack = AttackConfig {
                model,
                ..AttackConfig::default()
            };
            Self {
                resolver: CollisionResolver::new(&attack, 100),
                field: EntityField::new(&WorldConfig::default()),
                run: RunState::new(&RunConfig::default()),
                powerups: PowerupEngine::new(),
                stats: SessionStats::default(),
                ctx: EngineContext::new(),
                types: PowerupConfig::default().types,
            }
        }

        fn word(&mut self, id: u32, term: &str, pronunciation: &str, spawned_at_ms: u64) {
            self.field.spawn_word(
                WordEntity::new(EntityId(id), VocabularyEntry::new(term, pronunciation, ""))
                    .with_pos(Vec2::new(100.0 * id as f32, 100.0))
                    .with_spawn_time(spawned_at_ms),
            );
        }

        fn resolve(&mut self, mut events: Vec<FieldEvent>) {
            self.resolver.resolve(
                &mut events,
                ResolveDeps {
                    field: &mut self.field,
                    run: &mut self.run,
                    powerups: &mut self.powerups,
                    stats: &mut self.stats,
                    ctx: &mut self.ctx,
                    powerup_types: &self.types,
                    now_ms: 0,
                },
            );
        }
    }

    #[test]
    fn pronunciation_match_is_case_insensitive() {
        let mut h = Harness::new(AttackModel::Direct);
        h.word(1, "蘋果", "pingguo", 0);
        h.resolver.submit("PingGuo");
        h.resolve(Vec::new());

        assert!(h.field.words().is_empty());
        assert_eq!(h.run.score(), 200);
        assert_eq!(h.run.lives(), 3);
        assert_eq!(h.stats.words_matched, 1);
        assert!(h
            .ctx
            .commands
            .iter()
            .any(|c| matches!(c, Command::ShowText { text, .. } if text == "+200")));
    }

    #[test]
    fn term_match_is_case_sensitive() {
        let mut h = Harness::new(AttackModel::Direct);
        h.word(1, "Paris", "pa-ri", 0);
        h.resolver.submit("paris");
        h.resolve(Vec::new());
        assert_eq!(h.field.words().len(), 1);

        h.resolver.submit("Paris");
        h.resolve(Vec::new());
        assert!(h.field.words().is_empty());
        assert_eq!(h.run.score(), 500);
    }

    #[test]
    fn no_match_changes_nothing() {
        let mut h = Harness::new(AttackModel::Direct);
        h.word(1, "猫", "mao", 0);
        h.resolver.submit("gou");
        h.resolve(Vec::new());

        assert_eq!(h.field.words().len(), 1);
        assert_eq!(
            (h.run.score(), h.run.lives(), h.run.level(), h.run.time_left()),
            (0, 3, 1, 120)
        );
        assert!(h.resolver.pending().is_empty());
        assert_eq!(h.stats.submissions, 1);
        assert!(h.ctx.commands.is_empty());
    }

    #[test]
    fn earliest_spawned_match_wins() {
        let mut h = Harness::new(AttackModel::Direct);
        h.word(1, "猫", "mao", 900);
        h.word(2, "毛", "mao", 200);
        h.word(3, "貓", "mao", 500);
        h.resolver.submit("mao");
        h.resolve(Vec::new());

        let left: Vec<EntityId> = h.field.words().iter().map(|w| w.id).collect();
        assert_eq!(left, vec![EntityId(1), EntityId(3)]);
    }

    #[test]
    fn blank_submissions_are_not_counted() {
        let mut h = Harness::new(AttackModel::Direct);
        h.resolver.submit("   ");
        h.resolve(Vec::new());
        assert_eq!(h.stats.submissions, 0);
    }

    #[test]
    fn missed_word_costs_a_life() {
        let mut h = Harness::new(AttackModel::Direct);
        let word = WordEntity::new(EntityId(7), VocabularyEntry::new("猫", "mao", ""));
        h.resolve(vec![FieldEvent::WordMissed(word)]);
        assert_eq!(h.run.lives(), 2);
        assert_eq!(h.stats.words_missed, 1);
        assert_eq!(h.ctx.commands[0], Command::RemoveVisual { id: EntityId(7) });
    }

    #[test]
    fn player_hit_shakes_and_costs_a_life() {
        let mut h = Harness::new(AttackModel::Direct);
        let word = WordEntity::new(EntityId(7), VocabularyEntry::new("猫", "mao", ""));
        h.resolve(vec![FieldEvent::PlayerHitWord(word)]);
        assert_eq!(h.run.lives(), 2);
        assert_eq!(h.stats.collisions, 1);
        assert!(h.ctx.commands.contains(&Command::ShakeCamera {
            duration_ms: 200,
            intensity: 0.01
        }));
    }

    #[test]
    fn collected_powerup_activates() {
        let mut h = Harness::new(AttackModel::Direct);
        let powerup = PowerupEntity::new(EntityId(4), PowerupKind::DoublePoints);
        h.resolve(vec![FieldEvent::PowerupCollected(powerup)]);
        assert!(h.powerups.is_active(PowerupKind::DoublePoints));
        assert_eq!(h.run.multiplier(), 2.0);
        assert_eq!(h.stats.powerups_collected, 1);
        assert!(h.ctx.sounds.contains(&SoundEvent::Powerup));
    }

    #[test]
    fn projectile_model_fires_instead_of_striking() {
        let mut h = Harness::new(AttackModel::Projectile);
        h.word(1, "猫", "mao", 0);
        h.resolver.submit("mao");
        h.resolve(Vec::new());

        assert_eq!(h.field.words().len(), 1);
        assert_eq!(h.field.projectiles().len(), 1);
        assert_eq!(h.field.projectiles()[0].text, "mao");
        assert_eq!(h.field.projectiles()[0].speed, 600.0);
        assert_eq!(h.ctx.sounds, vec![SoundEvent::Shoot]);
    }

    #[test]
    fn bullet_hit_on_matching_word_removes_both() {
        let mut h = Harness::new(AttackModel::Projectile);
        h.word(1, "猫", "mao", 0);
        h.field.spawn_projectile(Projectile::new(EntityId(9), "mao"));
        h.resolve(vec![FieldEvent::BulletHit {
            projectile: EntityId(9),
            word: EntityId(1),
        }]);
        assert!(h.field.is_empty());
        assert_eq!(h.run.score(), 100);
    }

    #[test]
    fn bullet_miss_removes_only_projectile() {
        let mut h = Harness::new(AttackModel::Projectile);
        h.word(1, "猫", "mao", 0);
        h.field.spawn_projectile(Projectile::new(EntityId(9), "gou"));
        h.resolve(vec![FieldEvent::BulletHit {
            projectile: EntityId(9),
            word: EntityId(1),
        }]);
        assert_eq!(h.field.words().len(), 1);
        assert!(h.field.projectiles().is_empty());
        assert_eq!((h.run.score(), h.run.lives()), (0, 3));
    }

    #[test]
    fn events_after_the_last_life_do_not_score() {
        let mut h = Harness::new(AttackModel::Projectile);
        h.run = RunState::new(&RunConfig {
            initial_lives: 1,
            ..RunConfig::default()
        });
        h.word(1, "猫", "mao", 0);
        h.field.spawn_projectile(Projectile::new(EntityId(9), "mao"));
        let missed = WordEntity::new(EntityId(7), VocabularyEntry::new("山", "shan", ""));
        let hit = WordEntity::new(EntityId(8), VocabularyEntry::new("火", "huo", ""));
        let pickup = PowerupEntity::new(EntityId(6), PowerupKind::DoublePoints);

        h.resolve(vec![
            FieldEvent::WordMissed(missed),
            FieldEvent::BulletHit {
                projectile: EntityId(9),
                word: EntityId(1),
            },
            FieldEvent::PlayerHitWord(hit),
            FieldEvent::PowerupCollected(pickup),
        ]);

        assert!(h.run.is_game_over());
        assert_eq!(h.run.score(), 0);
        assert_eq!(h.stats.words_matched, 0);
        assert_eq!(h.stats.words_missed, 1);
        assert_eq!(h.stats.collisions, 0);
        assert_eq!(h.stats.powerups_collected, 0);
        assert!(!h.powerups.is_active(PowerupKind::DoublePoints));
        assert_eq!(h.field.words().len(), 1);
        assert!(!h
            .ctx
            .commands
            .iter()
            .any(|c| matches!(c, Command::ShowText { .. } | Command::ShakeCamera { .. })));
        for id in [7, 8, 6] {
            assert!(h.ctx.commands.contains(&Command::RemoveVisual { id: EntityId(id) }));
        }
    }

    #[test]
    fn submissions_after_game_over_are_dropped() {
        let mut h = Harness::new(AttackModel::Direct);
        h.word(1, "猫", "mao", 0);
        h.run.end_game(crate::core::run_state::EndReason::Quit, &mut h.ctx);
        h.resolver.submit("mao");
        h.resolve(Vec::new());
        assert_eq!(h.field.words().len(), 1);
        assert_eq!(h.stats.submissions, 0);
    }
}
