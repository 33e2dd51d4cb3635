#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Shoal sessions headlessly.
//!
//! A simulated player clicks at the creatures while the world advances in
//! fixed frames. The run is fully determined by the scenario, so the same
//! flags always print the same summary.

mod headless;
mod scenario;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shoal_core::{Command, Event, GameMode, MAX_POPULATION};
use shoal_rendering::{InputBridge, Presenter, RenderingBackend, Scene};
use shoal_world::{apply, query, World};

use headless::{Autoclicker, HeadlessBackend};
use scenario::{Overrides, Scenario};

/// Mixed into the scenario seed to derive the player's aiming stream.
const PLAYER_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Parser)]
#[command(name = "shoal", version, about = "Headless fish-clicking simulation")]
struct Cli {
    /// Scenario file (TOML); flags override its values.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Seed of the simulation's random stream.
    #[arg(long)]
    seed: Option<u64>,

    /// Rule set every game is started in.
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Number of frames to simulate.
    #[arg(short, long)]
    frames: Option<u32>,

    /// Simulated duration of each frame in milliseconds.
    #[arg(long)]
    frame_millis: Option<u64>,

    /// Click cadence of the simulated player, at most 1000 per second.
    #[arg(long)]
    clicks_per_second: Option<f32>,

    /// Probability in 0..=1 that a click is aimed at a creature.
    #[arg(long)]
    accuracy: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Classic,
    Arcade,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Classic => GameMode::Classic,
            ModeArg::Arcade => GameMode::Arcade,
        }
    }
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            mode: self.mode.map(GameMode::from),
            frames: self.frames,
            frame_millis: self.frame_millis,
            clicks_per_second: self.clicks_per_second,
            accuracy: self.accuracy,
        }
    }
}

/// Figures accumulated over a whole session.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct SessionStats {
    games: u32,
    hits: u32,
    clicks: u32,
    best_score: u32,
    best_level: u32,
}

impl SessionStats {
    fn observe(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::PlayModeChanged {
                    mode: shoal_core::PlayMode::Playing(_),
                } => self.games += 1,
                Event::CreatureHit { .. } => self.hits += 1,
                Event::ScoreChanged { score } => self.best_score = self.best_score.max(*score),
                Event::DifficultyRaised { level } => self.best_level = self.best_level.max(*level),
                _ => {}
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let scenario = match &cli.scenario {
        Some(path) => Scenario::from_path(path)?,
        None => Scenario::default(),
    }
    .with_overrides(cli.overrides())
    .context("invalid session parameters")?;
    info!("running {scenario:?}");

    let (scene, stats, world) = run(scenario)?;

    println!("mode: {:?}", scenario.mode);
    println!("frames: {}", scenario.frames);
    println!("games: {}", stats.games);
    println!("clicks: {}", stats.clicks);
    println!("hits: {}", stats.hits);
    println!("best score: {}", stats.best_score);
    println!("best level: {}", stats.best_level);
    println!("score: {}", query::score(&world));
    println!("level: {}", query::level(&world));
    println!("creatures: {}", scene.hud.population);
    Ok(())
}

fn run(scenario: Scenario) -> Result<(Scene, SessionStats, World)> {
    let mut rng = ChaCha8Rng::seed_from_u64(scenario.seed);
    let mut world = World::new(&mut rng).context("failed to build the world")?;
    let presenter = Presenter::new();
    let bridge = InputBridge::new();

    let mut scene = Scene::with_slots(MAX_POPULATION);
    presenter
        .bind_all(query::creatures(&world), &mut scene.sprites)
        .context("failed to bind the initial population")?;
    scene.hud.population = query::creatures(&world).len();

    let player = Autoclicker::new(
        scenario.mode,
        shoal_core::SIMULATION_BOUNDS,
        scenario.click_interval()?,
        scenario.accuracy,
        ChaCha8Rng::seed_from_u64(scenario.seed ^ PLAYER_STREAM),
    );
    let backend = HeadlessBackend::new(
        scenario.frames,
        Duration::from_millis(scenario.frame_millis),
        player,
    );

    let mut stats = SessionStats::default();
    let mut commands = Vec::new();
    let mut events = Vec::new();
    let mut failure = None;
    let scene = backend.run(scene, |dt, inputs, scene| {
        commands.clear();
        events.clear();
        for input in inputs {
            bridge.translate(*input, query::creatures(&world), &mut commands);
        }
        commands.push(Command::Tick { dt });

        for command in commands.drain(..) {
            if command == Command::Click {
                stats.clicks += 1;
            }
            apply(&mut world, command, &mut rng, &mut events);
        }
        debug!("frame produced {} events", events.len());

        stats.observe(&events);
        scene.hud.observe(&events);
        match presenter.present(&events, &mut scene.sprites) {
            Ok(()) => true,
            Err(error) => {
                failure = Some(error);
                false
            }
        }
    })?;

    if let Some(error) = failure {
        return Err(error).context("failed to present world events");
    }
    Ok((scene, stats, world))
}
