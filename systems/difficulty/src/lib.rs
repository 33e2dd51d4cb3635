#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Difficulty curve that maps cumulative score onto spawn pools.
//!
//! [`DifficultyTracker`] converts the score into a difficulty level through a
//! strictly increasing threshold table, and [`SpawnPoolBuilder`] resolves the
//! weight table over creature kinds that the selector draws from at that level.
//! Both tables are validated once when constructed so per-hit evaluation never
//! has to deal with malformed data.

use shoal_core::{CreatureKind, ALL_CREATURE_KINDS, CREATURE_KIND_COUNT};
use thiserror::Error;

/// Number of score thresholds, and therefore the highest reachable level.
pub const DIFFICULTY_BRACKETS: usize = 10;

/// Score required to leave each level, indexed by the current level.
pub const STANDARD_THRESHOLDS: [u32; DIFFICULTY_BRACKETS] =
    [3, 10, 25, 60, 100, 200, 350, 500, 750, 1000];

/// Sum every staged spawn pool must reach.
pub const POOL_TOTAL: u32 = 75;

/// Staged introduction schedule, one row per level in declaration order.
const STANDARD_POOL_TABLE: [[u32; CREATURE_KIND_COUNT]; DIFFICULTY_BRACKETS] = [
    [75, 0, 0, 0, 0, 0, 0, 0],
    [50, 25, 0, 0, 0, 0, 0, 0],
    [20, 45, 10, 0, 0, 0, 0, 0],
    [0, 30, 30, 15, 0, 0, 0, 0],
    [0, 0, 10, 35, 20, 10, 0, 0],
    [0, 0, 0, 20, 10, 35, 10, 0],
    [0, 0, 0, 20, 10, 20, 25, 0],
    [0, 0, 0, 20, 0, 25, 25, 5],
    [0, 0, 0, 20, 0, 20, 20, 15],
    [0, 0, 0, 10, 0, 5, 10, 50],
];

/// Pool used for every level past the staged table.
const STANDARD_END_GAME: [u32; CREATURE_KIND_COUNT] = [0, 0, 0, 0, 0, 0, 0, 75];

/// Reasons a threshold table is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ThresholdError {
    /// A threshold did not exceed the one before it.
    #[error("threshold {value} at bracket {index} does not exceed the previous threshold {previous}")]
    NotIncreasing {
        /// Bracket whose threshold is out of order.
        index: usize,
        /// Threshold of the preceding bracket.
        previous: u32,
        /// Offending threshold.
        value: u32,
    },
}

/// Reasons a spawn pool table is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PoolTableError {
    /// The table contained no staged levels.
    #[error("spawn pool table has no levels")]
    Empty,
    /// A staged level did not sum to the expected total.
    #[error("spawn pool for level {level} sums to {total}, expected {expected}")]
    WrongTotal {
        /// Level whose weights are malformed.
        level: usize,
        /// Sum of the level's weights.
        total: u32,
        /// Sum every pool must reach.
        expected: u32,
    },
    /// The end-game pool spreads its weight over more than one kind.
    #[error("end-game spawn pool must place all {expected} weight on a single kind")]
    EndGameNotSingleKind {
        /// Weight the single kind must carry.
        expected: u32,
    },
}

/// Outcome of checking the score against the current level's threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelEvaluation {
    /// Level after the evaluation.
    pub level: u32,
    /// Whether the evaluation advanced the level.
    pub leveled_up: bool,
}

/// Maps cumulative score to a difficulty level.
#[derive(Clone, Debug)]
pub struct DifficultyTracker {
    thresholds: [u32; DIFFICULTY_BRACKETS],
}

impl DifficultyTracker {
    /// Creates a tracker from a strictly increasing threshold table.
    pub fn new(thresholds: [u32; DIFFICULTY_BRACKETS]) -> Result<Self, ThresholdError> {
        for index in 1..thresholds.len() {
            let previous = thresholds[index - 1];
            let value = thresholds[index];
            if value <= previous {
                return Err(ThresholdError::NotIncreasing {
                    index,
                    previous,
                    value,
                });
            }
        }
        Ok(Self { thresholds })
    }

    /// Creates a tracker using [`STANDARD_THRESHOLDS`].
    #[must_use]
    pub fn standard() -> Self {
        Self {
            thresholds: STANDARD_THRESHOLDS,
        }
    }

    /// Highest level the tracker can report.
    #[must_use]
    pub const fn max_level(&self) -> u32 {
        DIFFICULTY_BRACKETS as u32
    }

    /// Score required to leave the provided level, if the level can still advance.
    #[must_use]
    pub fn threshold(&self, level: u32) -> Option<u32> {
        self.thresholds.get(level as usize).copied()
    }

    /// Advances the level by at most one step when the score reaches its threshold.
    ///
    /// Levels never decrease and stay clamped at [`DIFFICULTY_BRACKETS`].
    #[must_use]
    pub fn evaluate(&self, score: u32, current_level: u32) -> LevelEvaluation {
        match self.threshold(current_level) {
            Some(threshold) if score >= threshold => LevelEvaluation {
                level: current_level + 1,
                leveled_up: true,
            },
            _ => LevelEvaluation {
                level: current_level.min(self.max_level()),
                leveled_up: false,
            },
        }
    }
}

impl Default for DifficultyTracker {
    fn default() -> Self {
        Self::standard()
    }
}

/// Weight table over creature kinds used by the selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnPool {
    weights: [u32; CREATURE_KIND_COUNT],
}

impl SpawnPool {
    /// Creates a pool from weights listed in declaration order.
    #[must_use]
    pub const fn from_weights(weights: [u32; CREATURE_KIND_COUNT]) -> Self {
        Self { weights }
    }

    /// Weight assigned to the provided kind.
    #[must_use]
    pub const fn weight(&self, kind: CreatureKind) -> u32 {
        self.weights[kind.ordinal()]
    }

    /// Weights listed in declaration order.
    #[must_use]
    pub const fn weights(&self) -> &[u32; CREATURE_KIND_COUNT] {
        &self.weights
    }

    /// Sum of every weight in the pool.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.weights.iter().sum()
    }

    /// Returns a working copy with `bonus` added to the provided kind's weight.
    #[must_use]
    pub fn with_bonus(mut self, kind: CreatureKind, bonus: u32) -> Self {
        let slot = &mut self.weights[kind.ordinal()];
        *slot = slot.saturating_add(bonus);
        self
    }

    /// Iterator over kinds paired with their weights in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CreatureKind, u32)> + '_ {
        ALL_CREATURE_KINDS.iter().copied().zip(self.weights.iter().copied())
    }
}

/// Produces the spawn pool for a difficulty level from a declarative table.
#[derive(Clone, Debug)]
pub struct SpawnPoolBuilder {
    levels: Vec<SpawnPool>,
    end_game: SpawnPool,
}

impl SpawnPoolBuilder {
    /// Creates a builder from staged levels and the pool used past the table.
    ///
    /// Every staged level must sum to [`POOL_TOTAL`], and the end-game pool
    /// must place the entire total on a single kind.
    pub fn from_table(
        levels: &[[u32; CREATURE_KIND_COUNT]],
        end_game: [u32; CREATURE_KIND_COUNT],
    ) -> Result<Self, PoolTableError> {
        if levels.is_empty() {
            return Err(PoolTableError::Empty);
        }

        let levels: Vec<SpawnPool> = levels.iter().copied().map(SpawnPool::from_weights).collect();
        for (level, pool) in levels.iter().enumerate() {
            let total = pool.total();
            if total != POOL_TOTAL {
                return Err(PoolTableError::WrongTotal {
                    level,
                    total,
                    expected: POOL_TOTAL,
                });
            }
        }

        let end_game = SpawnPool::from_weights(end_game);
        let carriers = end_game.weights().iter().filter(|weight| **weight > 0).count();
        if carriers != 1 || end_game.total() != POOL_TOTAL {
            return Err(PoolTableError::EndGameNotSingleKind {
                expected: POOL_TOTAL,
            });
        }

        Ok(Self { levels, end_game })
    }

    /// Creates a builder from the staged introduction schedule.
    pub fn standard() -> Result<Self, PoolTableError> {
        Self::from_table(&STANDARD_POOL_TABLE, STANDARD_END_GAME)
    }

    /// Number of staged levels before the end-game pool applies.
    #[must_use]
    pub fn staged_levels(&self) -> usize {
        self.levels.len()
    }

    /// Resolves the pool for the provided level.
    #[must_use]
    pub fn build(&self, level: u32) -> SpawnPool {
        self.levels
            .get(level as usize)
            .copied()
            .unwrap_or(self.end_game)
    }
}
