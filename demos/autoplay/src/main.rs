mod host;
mod logging;
mod typist;

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use wordfall_engine::{
    AttackModel, GameRunner, InputEvent, Session, SessionConfig, VocabularyCatalog,
};

use host::{FileScoreStore, HeadlessHost};
use typist::Typist;

/// Play one headless round of wordfall with a scripted typist
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Session config (JSON). Stock tuning when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vocabulary catalog (JSON). Built-in set when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// High-score table file
    #[arg(long, default_value = "highscores.json")]
    scores: PathBuf,

    /// Override the config's RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Fire projectiles instead of striking words directly
    #[arg(long)]
    projectiles: bool,

    /// Chance each submission is typed correctly (0..=1)
    #[arg(long, default_value_t = 0.85)]
    skill: f64,

    /// Frames the typist waits between submissions
    #[arg(long, default_value_t = 40)]
    think_frames: u32,

    /// Give up after this many seconds of frames
    #[arg(long, default_value_t = 180.0)]
    seconds: f32,
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SessionConfig::from_json(&json)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.projectiles {
        config.attack.model = AttackModel::Projectile;
    }
    Ok(config)
}

fn load_catalog(args: &Args) -> Result<VocabularyCatalog> {
    match &args.catalog {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            VocabularyCatalog::from_json(&json)
                .with_context(|| format!("loading catalog {}", path.display()))
        }
        None => Ok(VocabularyCatalog::builtin()),
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = load_config(&args)?;
    let catalog = load_catalog(&args)?;
    let frame_dt = config.fixed_dt;
    let mut typist = Typist::new(config.seed, args.skill, args.think_frames);

    let mut host = HeadlessHost::new(FileScoreStore::new(&args.scores));
    let mut runner = GameRunner::new(Session::new(config, catalog));
    runner.set_wall_time_secs(unix_now());
    runner.init(&mut host);

    let frames = (args.seconds / frame_dt).ceil() as u32;
    for _ in 0..frames {
        for event in typist.plan(runner.game()) {
            runner.push_input(event);
        }
        runner.set_wall_time_secs(unix_now());
        runner.tick(frame_dt, &mut host);
        log::trace!("hud floats: {:?}", runner.event_floats());
        if runner.game().run().is_game_over() {
            break;
        }
    }

    if !runner.game().run().is_game_over() {
        log::info!("frame budget spent; quitting");
        runner.push_input(InputEvent::Quit);
        runner.set_wall_time_secs(unix_now());
        runner.tick(frame_dt, &mut host);
    }

    let run = runner.game().run();
    println!("score {} at level {}", run.score(), run.level());
    if let Some(stats) = host.final_stats() {
        println!("{}", serde_json::to_string_pretty(stats)?);
    }
    if let Some(rank) = host.last_rank() {
        println!("new high score, rank {}", rank + 1);
    }
    let table = host.store().load();
    println!("high scores ({}):", host.store().path().display());
    for (rank, record) in table.records().iter().enumerate() {
        println!("{:>2}. {:>8}  level {}", rank + 1, record.score, record.level);
    }
    Ok(())
}
