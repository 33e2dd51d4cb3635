#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the Shoal simulation.
//!
//! The world owns the population, score, difficulty level and life meter.
//! Adapters mutate it exclusively through [`apply`], which consumes a
//! [`Command`] together with an explicit random source and appends the
//! resulting [`Event`] values to a caller-owned buffer. Read access goes
//! through the [`query`] module.

mod population;

pub use population::Population;

use log::{debug, info, warn};
use shoal_core::{
    Command, Creature, CreatureKind, Event, GameMode, PlayMode, RandomSource, Slot, SpawnCause,
    INITIAL_POPULATION, MAX_POPULATION,
};
use shoal_system_abilities::{flips_horizontally, SpecialAbilityStateMachine};
use shoal_system_difficulty::{DifficultyTracker, PoolTableError, SpawnPoolBuilder, ThresholdError};
use shoal_system_movement::MotionIntegrator;
use shoal_system_spawning::{CreatureFactory, WeightedTypeSelector};
use thiserror::Error;

/// Life meter ceiling and the value an arcade game starts with.
pub const LIFE_MAX: f32 = 1000.0;

/// Life drained per second while an arcade game runs.
pub const LIFE_DECAY_PER_SECOND: f32 = 10.0;

/// Life spent on every click in arcade mode.
pub const CLICK_COST: f32 = 50.0;

/// Flat life restored by every arcade hit on top of the scaled bonus.
pub const HIT_BONUS_BASE: u32 = 50;

/// Multiplier applied to the level-scaled part of the arcade hit bonus.
pub const HIT_BONUS_SCALE: u32 = 100;

/// Offset added to a lost kind's ordinal before comparing it with the level
/// to decide whether the respawn is biased toward that kind.
pub const STICKY_LEVEL_OFFSET: u32 = 2;

/// Errors raised while assembling a world from its tables.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The spawn pool table was malformed.
    #[error("invalid spawn pool table")]
    PoolTable(#[from] PoolTableError),
    /// The score threshold table was malformed.
    #[error("invalid difficulty thresholds")]
    Thresholds(#[from] ThresholdError),
}

/// Represents the authoritative simulation state.
#[derive(Debug)]
pub struct World {
    population: Population,
    score: u32,
    level: u32,
    life: f32,
    play_mode: PlayMode,
    tracker: DifficultyTracker,
    pools: SpawnPoolBuilder,
    factory: CreatureFactory,
    selector: WeightedTypeSelector,
    abilities: SpecialAbilityStateMachine,
    integrator: MotionIntegrator,
}

impl World {
    /// Creates a world using the standard tables, parked in the menu.
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self, WorldError> {
        let pools = SpawnPoolBuilder::standard()?;
        Ok(Self::with_systems(
            DifficultyTracker::standard(),
            pools,
            CreatureFactory::default(),
            rng,
        ))
    }

    /// Creates a world from pre-validated systems, parked in the menu.
    ///
    /// The initial population is seeded immediately; no events are emitted
    /// for it, so adapters bind their visuals from [`query::creatures`].
    pub fn with_systems<R: RandomSource + ?Sized>(
        tracker: DifficultyTracker,
        pools: SpawnPoolBuilder,
        factory: CreatureFactory,
        rng: &mut R,
    ) -> Self {
        let integrator = MotionIntegrator::new(factory.bounds());
        let mut world = Self {
            population: Population::with_capacity(MAX_POPULATION),
            score: 0,
            level: 0,
            life: 0.0,
            play_mode: PlayMode::Menu,
            tracker,
            pools,
            factory,
            selector: WeightedTypeSelector::new(),
            abilities: SpecialAbilityStateMachine::new(),
            integrator,
        };
        let mut discarded = Vec::new();
        world.reset(rng, &mut discarded);
        world
    }

    fn game_mode(&self) -> Option<GameMode> {
        match self.play_mode {
            PlayMode::Menu => None,
            PlayMode::Playing(mode) => Some(mode),
        }
    }

    fn reset<R: RandomSource + ?Sized>(&mut self, rng: &mut R, out_events: &mut Vec<Event>) {
        self.population.clear();
        self.score = 0;
        self.level = 0;
        self.life = 0.0;
        for _ in 0..INITIAL_POPULATION {
            let creature = self.factory.spawn(CreatureKind::Standard, rng);
            self.append(creature, SpawnCause::Seed, out_events);
        }
    }

    fn enter_menu<R: RandomSource + ?Sized>(&mut self, rng: &mut R, out_events: &mut Vec<Event>) {
        info!("returning to menu with score {} at level {}", self.score, self.level);
        self.play_mode = PlayMode::Menu;
        out_events.push(Event::PlayModeChanged {
            mode: self.play_mode,
        });
        self.reset(rng, out_events);
        out_events.push(Event::ScoreChanged { score: self.score });
    }

    fn append(&mut self, creature: Creature, cause: SpawnCause, out_events: &mut Vec<Event>) {
        let event_copy = creature.clone();
        match self.population.append(creature) {
            Some(slot) => out_events.push(Event::CreatureSpawned {
                slot,
                creature: event_copy,
                cause,
            }),
            None => debug!("population full, {cause:?} spawn dropped"),
        }
    }

    fn advance<R: RandomSource + ?Sized>(
        &mut self,
        dt_seconds: f32,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) {
        for (slot, creature) in self.population.iter_mut() {
            if let Some(effect) = self.abilities.advance(creature, dt_seconds, rng) {
                debug!("{:?} in slot {} used {effect:?}", creature.kind, slot.get());
                out_events.push(Event::AbilityTriggered {
                    slot,
                    kind: creature.kind,
                    effect,
                });
                if flips_horizontally(effect) {
                    out_events.push(Event::CreatureFlipped {
                        slot,
                        flipped: creature.horizontally_flipped(),
                    });
                }
            }

            let position = self.integrator.integrate(creature, dt_seconds);
            out_events.push(Event::CreatureMoved { slot, position });
        }
    }

    fn hit<R: RandomSource + ?Sized>(
        &mut self,
        slot: Slot,
        mode: GameMode,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) {
        let Some(lost) = self.population.get(slot) else {
            debug!("hit on vacant slot {} ignored", slot.get());
            return;
        };
        let lost_kind = lost.kind;
        let points = lost.score_value;
        let pre_hit_level = self.level;

        self.score = self.score.saturating_add(points);
        out_events.push(Event::CreatureHit {
            slot,
            kind: lost_kind,
            points,
        });
        out_events.push(Event::ScoreChanged { score: self.score });

        if mode == GameMode::Arcade {
            let bonus = (points / (pre_hit_level + 1)) * HIT_BONUS_SCALE + HIT_BONUS_BASE;
            self.life += bonus as f32;
            out_events.push(Event::LifeChanged { life: self.life });
        }

        self.escalate(rng, out_events);

        let sticky = (lost_kind.ordinal() as u32 + STICKY_LEVEL_OFFSET) < pre_hit_level;
        let pool = self.pools.build(self.level);
        let picked = self.selector.select(&pool, sticky.then_some(lost_kind), rng);
        self.respawn(slot, picked, rng, out_events);
    }

    /// Rewrites the hit slot with the selected kind; a miss keeps the old creature.
    fn respawn<R: RandomSource + ?Sized>(
        &mut self,
        slot: Slot,
        picked: Option<CreatureKind>,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) {
        let Some(kind) = picked else {
            warn!(
                "no creature kind selected for slot {} at level {}",
                slot.get(),
                self.level
            );
            out_events.push(Event::SpawnSkipped {
                slot,
                cause: SpawnCause::Respawn,
            });
            return;
        };
        let creature = self.factory.spawn(kind, rng);
        let _ = self.population.replace(slot, creature.clone());
        out_events.push(Event::CreatureSpawned {
            slot,
            creature,
            cause: SpawnCause::Respawn,
        });
    }

    fn escalate<R: RandomSource + ?Sized>(&mut self, rng: &mut R, out_events: &mut Vec<Event>) {
        loop {
            let evaluation = self.tracker.evaluate(self.score, self.level);
            if !evaluation.leveled_up {
                return;
            }
            self.level = evaluation.level;
            debug!("difficulty raised to {} at score {}", self.level, self.score);
            out_events.push(Event::DifficultyRaised { level: self.level });

            if self.population.is_full() {
                debug!("population full, escalation spawn skipped");
                continue;
            }
            let pool = self.pools.build(self.level);
            let picked = self.selector.select(&pool, None, rng);
            self.grow(picked, rng, out_events);
        }
    }

    fn grow<R: RandomSource + ?Sized>(
        &mut self,
        picked: Option<CreatureKind>,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) {
        match picked {
            Some(kind) => {
                let creature = self.factory.spawn(kind, rng);
                self.append(creature, SpawnCause::Escalation, out_events);
            }
            None => {
                warn!("no creature kind selected for escalation at level {}", self.level);
                out_events.push(Event::SpawnSkipped {
                    slot: self.population.next_slot(),
                    cause: SpawnCause::Escalation,
                });
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Given the same world, command sequence and random stream, the emitted
/// events are identical across runs.
pub fn apply<R: RandomSource + ?Sized>(
    world: &mut World,
    command: Command,
    rng: &mut R,
    out_events: &mut Vec<Event>,
) {
    match command {
        Command::Tick { dt } => {
            let Some(mode) = world.game_mode() else {
                return;
            };
            out_events.push(Event::TimeAdvanced { dt });
            let dt_seconds = dt.as_secs_f32();

            if mode == GameMode::Arcade {
                world.life = (world.life - LIFE_DECAY_PER_SECOND * dt_seconds).min(LIFE_MAX);
                out_events.push(Event::LifeChanged { life: world.life });
                if world.life <= 0.0 {
                    world.enter_menu(rng, out_events);
                    return;
                }
            }

            world.advance(dt_seconds, rng, out_events);
        }
        Command::HitCreature { slot } => {
            if let Some(mode) = world.game_mode() {
                world.hit(slot, mode, rng, out_events);
            }
        }
        Command::Click => {
            if world.game_mode() == Some(GameMode::Arcade) {
                world.life -= CLICK_COST;
                out_events.push(Event::LifeChanged { life: world.life });
            }
        }
        Command::StartGame { mode } => {
            if world.play_mode != PlayMode::Menu {
                return;
            }
            info!("starting {mode:?} game");
            world.play_mode = PlayMode::Playing(mode);
            out_events.push(Event::PlayModeChanged {
                mode: world.play_mode,
            });
            if mode == GameMode::Arcade {
                world.life = LIFE_MAX;
                out_events.push(Event::LifeChanged { life: world.life });
            }
        }
        Command::ReturnToMenu => {
            if world.play_mode != PlayMode::Menu {
                world.enter_menu(rng, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Population, World};
    use shoal_core::{Creature, PlayMode, Slot};
    use shoal_system_difficulty::SpawnPool;

    /// Live creatures in slot order.
    #[must_use]
    pub fn creatures(world: &World) -> &[Creature] {
        world.population.as_slice()
    }

    /// Creature occupying the slot, if it is live.
    #[must_use]
    pub fn creature(world: &World, slot: Slot) -> Option<&Creature> {
        world.population.get(slot)
    }

    /// Provides read-only access to the bounded population.
    #[must_use]
    pub fn population(world: &World) -> &Population {
        &world.population
    }

    /// Cumulative score of the running game.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Current difficulty level.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.level
    }

    /// Remaining life; only meaningful in arcade mode.
    #[must_use]
    pub fn life(world: &World) -> f32 {
        world.life
    }

    /// Whether the world is in the menu or running a game.
    #[must_use]
    pub fn play_mode(world: &World) -> PlayMode {
        world.play_mode
    }

    /// Spawn pool in effect at the current level.
    #[must_use]
    pub fn spawn_pool(world: &World) -> SpawnPool {
        world.pools.build(world.level)
    }
}
