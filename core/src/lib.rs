#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Shoal simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player intent, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that adapters
//! use to keep their visuals in sync. Every operation that needs randomness
//! receives an explicit [`RandomSource`] so runs can be replayed exactly.

use std::{collections::VecDeque, time::Duration};

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Maximum number of creature slots that may ever be live at once.
pub const MAX_POPULATION: usize = 20;

/// Number of creatures seeded whenever a game (re)starts.
pub const INITIAL_POPULATION: usize = 2;

/// Number of distinct creature kinds.
pub const CREATURE_KIND_COUNT: usize = 8;

/// Fixed extent of the simulated area measured in pixels.
pub const SIMULATION_BOUNDS: Bounds = Bounds::new(1280, 720);

/// Every creature kind in declaration order, which doubles as the selection scan order.
pub const ALL_CREATURE_KINDS: [CreatureKind; CREATURE_KIND_COUNT] = [
    CreatureKind::Standard,
    CreatureKind::Fast,
    CreatureKind::Angled,
    CreatureKind::FastAngled,
    CreatureKind::Faster,
    CreatureKind::Slippery,
    CreatureKind::Turning,
    CreatureKind::Ultimate,
];

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Reports that the player struck the creature occupying the slot.
    HitCreature {
        /// Slot whose creature was struck.
        slot: Slot,
    },
    /// Reports that the player spent a click, whether or not it landed.
    Click,
    /// Leaves the menu and starts a game in the provided mode.
    StartGame {
        /// Mode the new game should run in.
        mode: GameMode,
    },
    /// Abandons the running game and returns to the menu.
    ReturnToMenu,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the world entered a new play mode.
    PlayModeChanged {
        /// Mode that became active after processing commands.
        mode: PlayMode,
    },
    /// Confirms that a creature was generated into a slot.
    CreatureSpawned {
        /// Slot that received the creature.
        slot: Slot,
        /// Complete state of the freshly generated creature.
        creature: Creature,
        /// Reason the creature was generated.
        cause: SpawnCause,
    },
    /// Reports the position of a creature after motion integration.
    CreatureMoved {
        /// Slot whose creature moved.
        slot: Slot,
        /// Position after displacement and wrap-around.
        position: Position,
    },
    /// Reports that a creature reversed its horizontal heading.
    CreatureFlipped {
        /// Slot whose creature turned around.
        slot: Slot,
        /// Whether the visual should be mirrored horizontally.
        flipped: bool,
    },
    /// Reports that a creature's special ability fired.
    AbilityTriggered {
        /// Slot whose creature used its ability.
        slot: Slot,
        /// Kind of the creature that used its ability.
        kind: CreatureKind,
        /// Mutation that the ability applied.
        effect: AbilityEffect,
    },
    /// Confirms that a hit on a live creature was scored.
    CreatureHit {
        /// Slot whose creature was struck.
        slot: Slot,
        /// Kind of the creature that was lost.
        kind: CreatureKind,
        /// Points awarded for the hit.
        points: u32,
    },
    /// Reports the cumulative score after a change.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// Announces that the difficulty advanced to a new level.
    DifficultyRaised {
        /// Level that became active.
        level: u32,
    },
    /// Reports the life meter after a change in arcade mode.
    LifeChanged {
        /// Remaining life.
        life: f32,
    },
    /// Reports that a spawn attempt produced no creature and was skipped.
    SpawnSkipped {
        /// Slot that would have received the creature.
        slot: Slot,
        /// Reason the spawn was skipped.
        cause: SpawnCause,
    },
}

/// Reason a creature was generated into a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnCause {
    /// Initial creature placed when a game (re)starts.
    Seed,
    /// Replacement for a creature that was hit.
    Respawn,
    /// Additional creature appended by a difficulty level-up.
    Escalation,
}

/// Mutation applied by a creature's special ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityEffect {
    /// Vertical heading reversed.
    ReversedVertical,
    /// Horizontal heading reversed.
    ReversedHorizontal,
    /// Switched into the fast burst sub-state.
    Burst,
    /// Switched into the recovery sub-state.
    Recovered,
    /// Horizontal heading reversed and the diagonal re-rolled.
    Turned,
    /// Vertical heading and diagonal re-rolled.
    Veered,
    /// Speed toggled around the burst boundary.
    SpeedShifted,
    /// The ability fired without changing the motion.
    Idle,
}

/// Describes how the player is interacting with the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayMode {
    /// Menu state where the simulation is paused.
    Menu,
    /// A game is running in the provided mode.
    Playing(GameMode),
}

/// Rule set applied while a game is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Untimed play where only the score matters.
    Classic,
    /// Survival play where a draining life meter ends the game.
    Arcade,
}

/// Variants of creatures the simulation can generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreatureKind {
    /// Slow, large, axis-aligned swimmer.
    Standard,
    /// Quick axis-aligned swimmer.
    Fast,
    /// Slow diagonal swimmer.
    Angled,
    /// Quick diagonal swimmer that periodically reverses vertically.
    FastAngled,
    /// Very quick axis-aligned swimmer.
    Faster,
    /// Tiny swimmer alternating between bursts and recovery.
    Slippery,
    /// Very quick diagonal swimmer that periodically turns around.
    Turning,
    /// Tiny, erratic swimmer at top speed.
    Ultimate,
}

impl CreatureKind {
    /// Zero-based position of the kind in declaration order.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Resolves a kind from its declaration-order position.
    #[must_use]
    pub const fn from_ordinal(ordinal: usize) -> Option<Self> {
        if ordinal < CREATURE_KIND_COUNT {
            Some(ALL_CREATURE_KINDS[ordinal])
        } else {
            None
        }
    }
}

/// Stable index of a creature slot within the population.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot(u32);

impl Slot {
    /// Creates a new slot identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the slot.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Slot expressed as a collection index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Pixel-space coordinates of a creature's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate in pixels.
    pub x: f32,
    /// Vertical coordinate in pixels.
    pub y: f32,
}

impl Position {
    /// Creates a new position from explicit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of the simulated area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    width: u32,
    height: u32,
}

impl Bounds {
    /// Creates a new bounds descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Horizontal extent in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Vertical extent in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Colour tint applied to a creature's visual.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tint {
    red: u8,
    green: u8,
    blue: u8,
}

impl Tint {
    /// Neutral tint that leaves the artwork untouched.
    pub const WHITE: Self = Self::from_rgb(0xff, 0xff, 0xff);

    /// Accent tint reserved for the rarest creatures.
    pub const CORAL: Self = Self::from_rgb(0xff, 0x7f, 0x50);

    /// Creates a new tint from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the tint.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the tint.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the tint.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Complete state of a single simulated creature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    /// Variant that determined the creature's attributes.
    pub kind: CreatureKind,
    /// Top-left corner of the creature's visual.
    pub position: Position,
    /// Edge length of the square visual, also used as the wrap margin.
    pub size: u32,
    /// Travel speed in pixels per second.
    pub speed: f32,
    /// Share of the speed spent on the horizontal axis, in `0.0..=1.0`.
    pub angle: f32,
    /// Whether the creature travels toward decreasing x.
    pub x_negative: bool,
    /// Whether the creature travels toward decreasing y.
    pub y_negative: bool,
    /// Time accumulated toward the next special ability.
    pub ability_progress: f32,
    /// Accumulated time required to fire the special ability.
    pub ability_goal: f32,
    /// Points awarded when the creature is hit.
    pub score_value: u32,
    /// Tint applied to the creature's visual.
    pub tint: Tint,
}

impl Creature {
    /// Whether the visual should be mirrored so the artwork faces the heading.
    #[must_use]
    pub const fn horizontally_flipped(&self) -> bool {
        !self.x_negative
    }

    /// Reports whether the point lies strictly inside the creature's visual.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let size = self.size as f32;
        let inside_x = self.position.x < x && x < self.position.x + size;
        let inside_y = self.position.y < y && y < self.position.y + size;
        inside_x && inside_y
    }
}

/// Source of uniformly distributed integers used by every generating operation.
///
/// Implemented for every [`RngCore`] so seeded `rand` generators can be
/// passed directly, and by [`ScriptedRandom`] for exact replays in tests.
pub trait RandomSource {
    /// Draws an integer uniformly from `0..bound`. A zero bound yields zero.
    fn next_below(&mut self, bound: u32) -> u32;

    /// Draws a fair boolean.
    fn next_bool(&mut self) -> bool {
        self.next_below(2) == 1
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.gen_range(0..bound)
    }
}

/// Random source that replays a fixed script of raw draws.
///
/// Each draw pops the next scripted value and reduces it modulo the requested
/// bound. Once the script is exhausted every draw yields zero.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    script: VecDeque<u32>,
    consumed: usize,
}

impl ScriptedRandom {
    /// Creates a source that replays the provided raw values in order.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: script.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of draws served so far, including draws past the end of the script.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of scripted values that have not been drawn yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.consumed += 1;
        let raw = self.script.pop_front().unwrap_or(0);
        if bound == 0 {
            0
        } else {
            raw % bound
        }
    }
}

/// Capability exposed by a visual representation of a single creature slot.
pub trait AppearanceBinding {
    /// Resizes the visual.
    fn set_size(&mut self, width: f32, height: f32);

    /// Moves the visual's top-left corner.
    fn set_position(&mut self, x: f32, y: f32);

    /// Tints the visual.
    fn set_tint(&mut self, tint: Tint);

    /// Mirrors the visual horizontally when `flipped` is true.
    fn set_horizontal_flip(&mut self, flipped: bool);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_creature() -> Creature {
        Creature {
            kind: CreatureKind::Angled,
            position: Position::new(100.0, 200.0),
            size: 40,
            speed: 150.0,
            angle: 0.5,
            x_negative: false,
            y_negative: true,
            ability_progress: 0.0,
            ability_goal: 1000.0,
            score_value: 3,
            tint: Tint::WHITE,
        }
    }

    #[test]
    fn ordinals_follow_declaration_order() {
        for (expected, kind) in ALL_CREATURE_KINDS.iter().enumerate() {
            assert_eq!(kind.ordinal(), expected);
            assert_eq!(CreatureKind::from_ordinal(expected), Some(*kind));
        }
        assert_eq!(CreatureKind::from_ordinal(CREATURE_KIND_COUNT), None);
    }

    #[test]
    fn scripted_random_reduces_modulo_bound() {
        let mut rng = ScriptedRandom::new([7, 103, 4]);
        assert_eq!(rng.next_below(5), 2);
        assert_eq!(rng.next_below(100), 3);
        assert!(!rng.next_bool());
        assert_eq!(rng.next_below(9), 0, "exhausted script yields zero");
        assert_eq!(rng.consumed(), 4);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn rng_core_draws_stay_below_bound() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        for bound in [1_u32, 2, 7, 75, 100] {
            for _ in 0..200 {
                assert!(rng.next_below(bound) < bound);
            }
        }
        assert_eq!(rng.next_below(0), 0);
    }

    #[test]
    fn contains_excludes_edges() {
        let creature = sample_creature();
        assert!(creature.contains(120.0, 220.0));
        assert!(!creature.contains(100.0, 220.0));
        assert!(!creature.contains(140.0, 220.0));
        assert!(!creature.contains(120.0, 240.0));
    }

    #[test]
    fn flip_mirrors_rightward_heading() {
        let mut creature = sample_creature();
        assert!(creature.horizontally_flipped());
        creature.x_negative = true;
        assert!(!creature.horizontally_flipped());
    }

    #[test]
    fn creature_round_trips_through_bincode() {
        let creature = sample_creature();
        let bytes = bincode::serialize(&creature).expect("serialize");
        let restored: Creature = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, creature);
    }
}
