pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod input;
pub mod assets;
pub mod error;
pub mod session;
pub mod runner;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, SoundEvent, GameEvent, Rgb};
pub use api::commands::{Command, VisualKind};
pub use api::collaborators::{Collaborators, NullCollaborators, dispatch_frame};
pub use crate::core::config::{SessionConfig, WorldConfig, RunConfig, TierConfig, TierTable, PowerupConfig, PowerupTypeConfig, AttackConfig, AttackModel};
pub use crate::core::run_state::{RunState, RunPhase, EndReason};
pub use crate::core::stats::SessionStats;
pub use crate::core::time::{FixedTimestep, GameClock};
pub use crate::core::rng::Rng;
pub use components::entity::{WordEntity, PowerupEntity, Projectile, PowerupKind};
pub use systems::spawn::{SpawnScheduler, SpawnPlan, WordSpawn, PowerupSpawn};
pub use systems::field::{EntityField, FieldEvent};
pub use systems::powerups::{PowerupEngine, ActiveEffect};
pub use systems::collision::{CollisionResolver, ResolveDeps};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::vocabulary::{VocabularyCatalog, VocabularyEntry, Tier};
pub use assets::high_scores::{HighScoreRecord, HighScoreTable};
pub use error::{ConfigError, CatalogError, CollaboratorError};
pub use session::Session;
pub use runner::GameRunner;
