//! Host-side collaborators for a headless run: everything visual or audible
//! becomes a log line, high scores go to a JSON file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use wordfall_engine::api::types::event_kinds;
use wordfall_engine::{
    Collaborators, CollaboratorError, Command, GameEvent, HighScoreRecord, HighScoreTable,
    SessionStats, SoundEvent, VisualKind,
};

/// High-score table persisted as pretty-printed JSON.
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the table. A missing file is an empty table; an unreadable one
    /// is logged and treated as empty.
    pub fn load(&self) -> HighScoreTable {
        match fs::read_to_string(&self.path) {
            Ok(json) => HighScoreTable::from_json(&json).unwrap_or_else(|err| {
                log::warn!("ignoring corrupt score file {}: {}", self.path.display(), err);
                HighScoreTable::new()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => HighScoreTable::new(),
            Err(err) => {
                log::warn!("cannot read score file {}: {}", self.path.display(), err);
                HighScoreTable::new()
            }
        }
    }

    /// Add a record and write the table back. Returns the record's rank if
    /// it made the table.
    pub fn save(&self, record: HighScoreRecord) -> Result<Option<usize>, CollaboratorError> {
        let mut table = self.load();
        let rank = table.insert(record);
        if rank.is_some() {
            fs::write(&self.path, table.to_json()?)?;
        }
        Ok(rank)
    }
}

/// Logs the frame's output and persists high scores.
pub struct HeadlessHost {
    store: FileScoreStore,
    final_stats: Option<SessionStats>,
    last_rank: Option<usize>,
    last_level: u32,
}

impl HeadlessHost {
    pub fn new(store: FileScoreStore) -> Self {
        Self {
            store,
            final_stats: None,
            last_rank: None,
            last_level: 1,
        }
    }

    pub fn store(&self) -> &FileScoreStore {
        &self.store
    }

    pub fn final_stats(&self) -> Option<&SessionStats> {
        self.final_stats.as_ref()
    }

    /// Rank of the last saved record, if it made the table.
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }
}

impl Collaborators for HeadlessHost {
    fn play_sound(&mut self, sound: SoundEvent) -> Result<(), CollaboratorError> {
        log::trace!("sound {:?} ({})", sound, sound.id());
        Ok(())
    }

    fn hud_event(&mut self, event: &GameEvent) -> Result<(), CollaboratorError> {
        if event.kind == event_kinds::LEVEL {
            let level = event.a as u32;
            if level != self.last_level {
                log::info!("HUD: level {}", level);
                self.last_level = level;
            }
        } else if event.kind == event_kinds::LIVES {
            log::info!("HUD: {} lives", event.a);
        }
        Ok(())
    }

    fn command(&mut self, command: &Command) -> Result<(), CollaboratorError> {
        match command {
            Command::SpawnVisual {
                kind: VisualKind::Word { term, gloss, .. },
                pos,
                ..
            } => log::debug!("word {} ({}) enters at x={:.0}", term, gloss, pos.x),
            Command::SpawnVisual {
                kind: VisualKind::Powerup(kind),
                ..
            } => log::info!("{} incoming", kind.label()),
            Command::ShowText { text, .. } => log::debug!("{}", text),
            Command::ShowBanner { text, .. } => log::info!("{}", text),
            Command::SetPaused(paused) => log::info!("paused: {}", paused),
            Command::GameOver { reason, stats } => {
                log::info!(
                    "game over ({:?}): {} matched, {} missed, {}% accuracy",
                    reason,
                    stats.words_matched,
                    stats.words_missed,
                    stats.accuracy()
                );
                self.final_stats = Some(*stats);
            }
            Command::SaveHighScore(record) => {
                self.last_rank = self.store.save(*record)?;
                match self.last_rank {
                    Some(rank) => log::info!("high score #{}: {}", rank + 1, record.score),
                    None => log::info!("score {} did not make the table", record.score),
                }
            }
            _ => {}
        }
        Ok(())
    }
}
