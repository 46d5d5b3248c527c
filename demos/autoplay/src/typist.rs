//! A scripted player: aims at the lowest word and types its pronunciation,
//! fumbling now and then.

use wordfall_engine::{AttackModel, InputEvent, Rng, Session};

pub struct Typist {
    rng: Rng,
    /// Probability a submission is typed correctly.
    skill: f64,
    /// Frames between submissions.
    think_frames: u32,
    cooldown: u32,
}

impl Typist {
    pub fn new(seed: u64, skill: f64, think_frames: u32) -> Self {
        Self {
            rng: Rng::new(seed ^ 0x5eed),
            skill: skill.clamp(0.0, 1.0),
            think_frames: think_frames.max(1),
            cooldown: think_frames,
        }
    }

    /// Inputs for the coming frame.
    pub fn plan(&mut self, session: &Session) -> Vec<InputEvent> {
        let mut inputs = Vec::new();
        if !session.run().is_running() {
            return inputs;
        }

        // Chase the lowest pickup, if any.
        if let Some(pickup) = session
            .powerup_pickups()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        {
            inputs.push(InputEvent::PlayerMoved { x: pickup.pos.x });
        }

        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown > 0 {
            return inputs;
        }
        self.cooldown = self.think_frames;

        let Some(target) = session
            .words()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        else {
            return inputs;
        };

        // Projectiles fly straight up, so stand under the target first.
        if session.config().attack.model == AttackModel::Projectile {
            inputs.push(InputEvent::PlayerMoved { x: target.pos.x });
        }

        let mut text = target.entry.pronunciation.clone();
        if !self.rng.chance(self.skill) {
            text.push('q');
        }
        log::debug!("typing {:?} for {:?}", text, target.entry.term);
        inputs.push(InputEvent::SubmitText(text));
        inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordfall_engine::{EngineContext, Game, InputQueue, SessionConfig, VocabularyCatalog};

    #[test]
    fn waits_between_submissions() {
        let session = Session::new(SessionConfig::default(), VocabularyCatalog::builtin());
        let mut typist = Typist::new(1, 1.0, 3);
        assert!(typist.plan(&session).is_empty());
        assert!(typist.plan(&session).is_empty());
        // Third frame is a submission slot, but the field is still empty.
        assert!(typist.plan(&session).is_empty());
    }

    #[test]
    fn projectile_shooter_stands_under_the_target() {
        let mut config = SessionConfig::default();
        config.attack.model = AttackModel::Projectile;
        config.tiers.easy.interval_base_ms = 100.0;
        config.tiers.easy.interval_floor_ms = 100.0;
        config.powerups.spawn_chance = 0.0;
        let mut session = Session::new(config, VocabularyCatalog::builtin());
        let mut ctx = EngineContext::new();
        let idle = InputQueue::new();
        while session.words().next().is_none() {
            session.update(&mut ctx, &idle);
        }
        let target = session.words().next().unwrap();

        let mut typist = Typist::new(1, 1.0, 1);
        let inputs = typist.plan(&session);
        assert_eq!(
            inputs,
            vec![
                InputEvent::PlayerMoved { x: target.pos.x },
                InputEvent::SubmitText(target.entry.pronunciation.clone()),
            ]
        );
    }
}
