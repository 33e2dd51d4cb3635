//! Cumulative-weight selection over a spawn pool.

use shoal_core::{CreatureKind, RandomSource};
use shoal_system_difficulty::{SpawnPool, POOL_TOTAL};

/// Weight added to the recently lost kind when a draw is sticky.
pub const STICKY_BONUS: u32 = 25;

/// Width of the counter range used by sticky draws.
pub const STICKY_DRAW_RANGE: u32 = 100;

/// Width of the counter range used by unbiased draws.
pub const DRAW_RANGE: u32 = POOL_TOTAL;

/// Draws creature kinds from spawn pools.
///
/// A sticky draw adds [`STICKY_BONUS`] to a working copy of the pool and
/// widens the counter to `1..=100`, while an unbiased draw uses `1..=75`. The
/// lost kind's effective share therefore grows from `weight / 75` to
/// `(weight + 25) / 100`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeightedTypeSelector;

impl WeightedTypeSelector {
    /// Creates a new selector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Draws a counter and scans the pool, biased toward `sticky_toward` when provided.
    ///
    /// Returns `None` when the pool's weights cannot cover the drawn counter.
    pub fn select<R: RandomSource + ?Sized>(
        &self,
        pool: &SpawnPool,
        sticky_toward: Option<CreatureKind>,
        rng: &mut R,
    ) -> Option<CreatureKind> {
        let range = if sticky_toward.is_some() {
            STICKY_DRAW_RANGE
        } else {
            DRAW_RANGE
        };
        let counter = rng.next_below(range) + 1;
        self.select_with_counter(pool, sticky_toward, counter)
    }

    /// Scans the pool with an explicit counter.
    ///
    /// Kinds are visited in declaration order; the first kind whose weight
    /// covers the remaining counter wins, otherwise its weight is subtracted.
    #[must_use]
    pub fn select_with_counter(
        &self,
        pool: &SpawnPool,
        sticky_toward: Option<CreatureKind>,
        counter: u32,
    ) -> Option<CreatureKind> {
        let working = match sticky_toward {
            Some(kind) => pool.with_bonus(kind, STICKY_BONUS),
            None => *pool,
        };

        let mut remainder = counter;
        for (kind, weight) in working.iter() {
            if remainder <= weight {
                return Some(kind);
            }
            remainder -= weight;
        }
        None
    }
}
