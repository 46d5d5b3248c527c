use crate::api::commands::Command;
use crate::api::game::EngineContext;
use crate::api::types::{GameEvent, SoundEvent};
use crate::error::CollaboratorError;

/// Host-side services the simulation talks to.
///
/// Every method is fire-and-forget from the simulation's point of view: a
/// returned error is logged by [`dispatch_frame`] and otherwise ignored.
pub trait Collaborators {
    fn play_sound(&mut self, _sound: SoundEvent) -> Result<(), CollaboratorError> {
        Ok(())
    }

    fn hud_event(&mut self, _event: &GameEvent) -> Result<(), CollaboratorError> {
        Ok(())
    }

    fn command(&mut self, _command: &Command) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

/// Collaborators that discard everything (headless runs, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCollaborators;

impl Collaborators for NullCollaborators {}

/// Forward one frame's outbound queues to the collaborators.
/// Returns the number of failed deliveries.
pub fn dispatch_frame(ctx: &EngineContext, collaborators: &mut impl Collaborators) -> usize {
    let mut failures = 0;

    for sound in &ctx.sounds {
        if let Err(err) = collaborators.play_sound(*sound) {
            log::warn!("audio collaborator failed on {:?}: {}", sound, err);
            failures += 1;
        }
    }

    for event in &ctx.events {
        if let Err(err) = collaborators.hud_event(event) {
            log::warn!("ui collaborator failed on event kind {}: {}", event.kind, err);
            failures += 1;
        }
    }

    for command in &ctx.commands {
        if let Err(err) = collaborators.command(command) {
            log::warn!("collaborator failed on {:?}: {}", command, err);
            failures += 1;
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenAudio {
        commands_seen: usize,
    }

    impl Collaborators for BrokenAudio {
        fn play_sound(&mut self, _sound: SoundEvent) -> Result<(), CollaboratorError> {
            Err(CollaboratorError::Unavailable("no audio device".into()))
        }

        fn command(&mut self, _command: &Command) -> Result<(), CollaboratorError> {
            self.commands_seen += 1;
            Ok(())
        }
    }

    #[test]
    fn failures_are_counted_and_delivery_continues() {
        let mut ctx = EngineContext::new();
        ctx.emit_sound(SoundEvent::Explode);
        ctx.emit_sound(SoundEvent::Powerup);
        ctx.emit(Command::SetPaused(true));

        let mut collab = BrokenAudio { commands_seen: 0 };
        let failures = dispatch_frame(&ctx, &mut collab);

        assert_eq!(failures, 2);
        assert_eq!(collab.commands_seen, 1);
        assert_eq!(ctx.commands.len(), 1);
    }
}
