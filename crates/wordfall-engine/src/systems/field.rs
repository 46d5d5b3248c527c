use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::{overlaps, PowerupEntity, Projectile, WordEntity};
use crate::core::config::WorldConfig;

/// Something the field noticed while advancing. Entities in the payload have
/// already been removed from the field, except for `BulletHit`, which the
/// collision resolver settles.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// A word crossed the bottom boundary.
    WordMissed(WordEntity),
    /// A powerup crossed the bottom boundary. No penalty.
    PowerupLeft(EntityId),
    /// A projectile left through the top boundary.
    ProjectileLeft(EntityId),
    /// A word reached the player.
    PlayerHitWord(WordEntity),
    PowerupCollected(PowerupEntity),
    /// A projectile overlaps a word. Proximity only, not yet a match.
    BulletHit { projectile: EntityId, word: EntityId },
}

/// Owns every live falling word, powerup and projectile plus the player
/// position. Flat Vec storage kept in spawn order.
pub struct EntityField {
    words: Vec<WordEntity>,
    powerups: Vec<PowerupEntity>,
    projectiles: Vec<Projectile>,
    player: Vec2,
    world: WorldConfig,
}

impl EntityField {
    pub fn new(world: &WorldConfig) -> Self {
        Self {
            words: Vec::with_capacity(32),
            powerups: Vec::with_capacity(4),
            projectiles: Vec::with_capacity(8),
            player: Vec2::new(world.width / 2.0, world.player_y),
            world: world.clone(),
        }
    }

    pub fn spawn_word(&mut self, word: WordEntity) {
        self.words.push(word);
    }

    pub fn spawn_powerup(&mut self, powerup: PowerupEntity) {
        self.powerups.push(powerup);
    }

    pub fn spawn_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    /// Remove a word by ID. Returns the removed word if found.
    pub fn remove_word(&mut self, id: EntityId) -> Option<WordEntity> {
        let idx = self.words.iter().position(|w| w.id == id)?;
        Some(self.words.remove(idx))
    }

    pub fn remove_projectile(&mut self, id: EntityId) -> Option<Projectile> {
        let idx = self.projectiles.iter().position(|p| p.id == id)?;
        Some(self.projectiles.remove(idx))
    }

    pub fn word(&self, id: EntityId) -> Option<&WordEntity> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn projectile(&self, id: EntityId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    /// Live words, oldest first.
    pub fn words(&self) -> &[WordEntity] {
        &self.words
    }

    pub fn powerups(&self) -> &[PowerupEntity] {
        &self.powerups
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn player(&self) -> Vec2 {
        self.player
    }

    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    /// Move the player horizontally, clamped so its hitbox stays inside the field.
    pub fn move_player(&mut self, x: f32) {
        let half = self.world.player_half.x;
        let max = (self.world.width - half).max(half);
        self.player.x = x.clamp(half, max);
    }

    /// Total live entities.
    pub fn len(&self) -> usize {
        self.words.len() + self.powerups.len() + self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entity. Returns the removed IDs so their visuals can be torn down.
    pub fn clear(&mut self) -> Vec<EntityId> {
        let ids = self
            .words
            .drain(..)
            .map(|w| w.id)
            .chain(self.powerups.drain(..).map(|p| p.id))
            .chain(self.projectiles.drain(..).map(|p| p.id))
            .collect();
        self.player = Vec2::new(self.world.width / 2.0, self.world.player_y);
        ids
    }

    /// Move everything by `dt` seconds and report boundary exits and overlaps.
    ///
    /// Words fall at `speed * slow_scale`; powerups and projectiles ignore the
    /// scale. Exits are detected before overlaps, so a word that left the
    /// field this tick can never also hit the player.
    pub fn advance(&mut self, dt: f32, slow_scale: f32, events: &mut Vec<FieldEvent>) {
        for word in &mut self.words {
            word.pos.y += word.speed * slow_scale * dt;
        }
        for powerup in &mut self.powerups {
            powerup.pos.y += powerup.speed * dt;
        }
        for projectile in &mut self.projectiles {
            projectile.pos.y -= projectile.speed * dt;
        }

        let height = self.world.height;
        for word in take_where(&mut self.words, |w| w.pos.y > height) {
            events.push(FieldEvent::WordMissed(word));
        }
        for powerup in take_where(&mut self.powerups, |p| p.pos.y > height) {
            events.push(FieldEvent::PowerupLeft(powerup.id));
        }
        let top = -self.world.projectile_half.y;
        for projectile in take_where(&mut self.projectiles, |p| p.pos.y < top) {
            events.push(FieldEvent::ProjectileLeft(projectile.id));
        }

        let (player, player_half) = (self.player, self.world.player_half);
        let word_half = self.world.word_half;
        for word in take_where(&mut self.words, |w| overlaps(player, player_half, w.pos, word_half)) {
            events.push(FieldEvent::PlayerHitWord(word));
        }
        let powerup_half = self.world.powerup_half;
        for powerup in take_where(&mut self.powerups, |p| {
            overlaps(player, player_half, p.pos, powerup_half)
        }) {
            events.push(FieldEvent::PowerupCollected(powerup));
        }

        // One candidate per projectile: the oldest word it touches.
        let projectile_half = self.world.projectile_half;
        for projectile in &self.projectiles {
            let hit = self
                .words
                .iter()
                .filter(|w| overlaps(projectile.pos, projectile_half, w.pos, word_half))
                .min_by_key(|w| (w.spawned_at_ms, w.id));
            if let Some(word) = hit {
                events.push(FieldEvent::BulletHit {
                    projectile: projectile.id,
                    word: word.id,
                });
            }
        }
    }
}

/// Remove every item matching `pred`, keeping the relative order of both
/// the removed and the remaining items.
fn take_where<T>(items: &mut Vec<T>, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
    let mut taken = Vec::new();
    let mut i = 0;
    while i < items.len() {
        if pred(&items[i]) {
            taken.push(items.remove(i));
        } else {
            i += 1;
        }
    }
    taken
}
