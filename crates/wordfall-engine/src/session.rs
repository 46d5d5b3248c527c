//! One game session: owns every component and runs them in a fixed order.
//!
//! Per running tick: clock, spawns (seeing last tick's level), field motion,
//! collision resolution, powerup expiry, timer. Paused and finished sessions
//! still tick but only drop late submissions.

use glam::Vec2;

use crate::api::commands::{Command, VisualKind};
use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::SoundEvent;
use crate::assets::vocabulary::VocabularyCatalog;
use crate::components::entity::{PowerupEntity, Projectile, WordEntity};
use crate::core::config::SessionConfig;
use crate::core::rng::Rng;
use crate::core::run_state::{EndReason, RunState};
use crate::core::stats::SessionStats;
use crate::core::time::GameClock;
use crate::input::queue::{InputEvent, InputQueue};
use crate::systems::collision::{CollisionResolver, ResolveDeps};
use crate::systems::field::{EntityField, FieldEvent};
use crate::systems::powerups::PowerupEngine;
use crate::systems::spawn::{SpawnPlan, SpawnScheduler};

pub struct Session {
    config: SessionConfig,
    catalog: VocabularyCatalog,
    rng: Rng,
    clock: GameClock,
    run: RunState,
    scheduler: SpawnScheduler,
    field: EntityField,
    powerups: PowerupEngine,
    resolver: CollisionResolver,
    stats: SessionStats,
    field_events: Vec<FieldEvent>,
    game_over_reported: bool,
}

impl Session {
    /// Build a session. The config is read once here and reused on reset.
    pub fn new(config: SessionConfig, catalog: VocabularyCatalog) -> Self {
        Self {
            rng: Rng::new(config.seed),
            clock: GameClock::new(),
            run: RunState::new(&config.run),
            scheduler: SpawnScheduler::new(&config),
            field: EntityField::new(&config.world),
            powerups: PowerupEngine::new(),
            resolver: CollisionResolver::new(&config.attack, config.run.points_per_char),
            stats: SessionStats::default(),
            field_events: Vec::new(),
            game_over_reported: false,
            config,
            catalog,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &VocabularyCatalog {
        &self.catalog
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn powerups(&self) -> &PowerupEngine {
        &self.powerups
    }

    pub fn field(&self) -> &EntityField {
        &self.field
    }

    // -- Read access for renderers --

    pub fn words(&self) -> impl Iterator<Item = &WordEntity> {
        self.field.words().iter()
    }

    pub fn powerup_pickups(&self) -> impl Iterator<Item = &PowerupEntity> {
        self.field.powerups().iter()
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.field.projectiles().iter()
    }

    pub fn player(&self) -> Vec2 {
        self.field.player()
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut EngineContext) {
        match event {
            InputEvent::SubmitText(text) => {
                if self.run.is_running() {
                    self.resolver.submit(text);
                } else {
                    log::debug!("ignoring submission {:?} while not running", text);
                }
            }
            InputEvent::PlayerMoved { x } => {
                if self.run.is_running() {
                    self.field.move_player(*x);
                }
            }
            InputEvent::TogglePause => {
                self.run.toggle_pause(ctx);
            }
            InputEvent::NewGame => self.reset(ctx),
            InputEvent::Quit => self.run.end_game(EndReason::Quit, ctx),
        }
    }

    /// Advance the simulation by `dt` seconds of game time.
    pub fn step(&mut self, ctx: &mut EngineContext, dt: f32) {
        if !self.run.is_running() {
            self.resolver.discard_pending();
            self.report_game_over(ctx);
            return;
        }

        let crossed = self.clock.advance(dt);
        let now = self.clock.now_ms();

        let plan = self.scheduler.update(
            now,
            self.run.level(),
            &self.catalog,
            &self.config,
            &mut self.rng,
        );
        self.apply_spawns(plan, now, ctx);

        let slow_scale = self.powerups.slow_time_scale();
        self.field.advance(dt, slow_scale, &mut self.field_events);

        self.resolver.resolve(
            &mut self.field_events,
            ResolveDeps {
                field: &mut self.field,
                run: &mut self.run,
                powerups: &mut self.powerups,
                stats: &mut self.stats,
                ctx: &mut *ctx,
                powerup_types: &self.config.powerups.types,
                now_ms: now,
            },
        );

        self.powerups.expire(now, &mut self.run, ctx);

        for _ in 0..crossed {
            self.run.tick_timer(ctx);
        }

        self.report_game_over(ctx);
    }

    fn apply_spawns(&mut self, plan: SpawnPlan, now: u64, ctx: &mut EngineContext) {
        let spawn_y = self.config.world.spawn_y;

        if let Some(spawn) = plan.word {
            let id = ctx.next_id();
            let pos = Vec2::new(spawn.x, spawn_y);
            ctx.emit(Command::SpawnVisual {
                id,
                kind: VisualKind::Word {
                    term: spawn.entry.term.clone(),
                    pronunciation: spawn.entry.pronunciation.clone(),
                    gloss: spawn.entry.gloss.clone(),
                },
                pos,
            });
            ctx.emit_sound(SoundEvent::Swoosh);
            self.field.spawn_word(
                WordEntity::new(id, spawn.entry)
                    .with_pos(pos)
                    .with_speed(spawn.speed)
                    .with_spawn_time(now),
            );
        }

        if let Some(spawn) = plan.powerup {
            let id = ctx.next_id();
            let pos = Vec2::new(spawn.x, spawn_y);
            ctx.emit(Command::SpawnVisual {
                id,
                kind: VisualKind::Powerup(spawn.kind),
                pos,
            });
            self.field.spawn_powerup(
                PowerupEntity::new(id, spawn.kind)
                    .with_pos(pos)
                    .with_speed(spawn.speed)
                    .with_spawn_time(now),
            );
        }
    }

    fn report_game_over(&mut self, ctx: &mut EngineContext) {
        if self.game_over_reported {
            return;
        }
        if let Some(reason) = self.run.end_reason() {
            self.game_over_reported = true;
            ctx.emit(Command::GameOver {
                reason,
                stats: self.stats,
            });
        }
    }

    /// Throw the whole run away and start over from the config.
    fn reset(&mut self, ctx: &mut EngineContext) {
        for id in self.field.clear() {
            ctx.emit(Command::RemoveVisual { id });
        }
        if self.run.is_paused() {
            ctx.emit(Command::SetPaused(false));
        }

        self.clock = GameClock::new();
        self.run = RunState::new(&self.config.run);
        self.scheduler = SpawnScheduler::new(&self.config);
        self.field = EntityField::new(&self.config.world);
        self.powerups = PowerupEngine::new();
        self.resolver = CollisionResolver::new(&self.config.attack, self.config.run.points_per_char);
        self.stats = SessionStats::default();
        self.field_events.clear();
        self.game_over_reported = false;

        log::info!("new game started");
        self.run.emit_hud(ctx);
    }
}

impl Game for Session {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: self.config.fixed_dt,
            world_width: self.config.world.width,
            world_height: self.config.world.height,
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!(
            "session start: {} vocabulary entries, {:?} attack, seed {}",
            self.catalog.len(),
            self.config.attack.model,
            self.config.seed
        );
        self.run.emit_hud(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            self.handle_input(event, ctx);
        }
        self.step(ctx, self.config.fixed_dt);
    }
}
