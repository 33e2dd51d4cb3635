#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural spawning: kind selection and per-kind attribute generation.

mod catalog;
mod selector;

pub use catalog::{
    AngleRule, Catalog, GoalRule, IntRange, KindTraits, RangeError, SpeedRule, BURST_GOAL,
    ERRATIC_GOAL, FASTER_SPEED, FAST_SPEED, IDLE_GOAL, NARROW_DIAGONAL, RECOVERY_GOAL,
    REVERSAL_GOAL, SMALL_SIZE, STANDARD_SIZE, STANDARD_SPEED, TINY_SIZE, TOP_SPEED, TURN_GOAL,
    WIDE_DIAGONAL,
};
pub use selector::{WeightedTypeSelector, DRAW_RANGE, STICKY_BONUS, STICKY_DRAW_RANGE};

use shoal_core::{Bounds, Creature, CreatureKind, Position, RandomSource};

/// Generates fully initialised creatures from the per-kind catalog.
#[derive(Clone, Debug)]
pub struct CreatureFactory {
    catalog: Catalog,
    bounds: Bounds,
}

impl CreatureFactory {
    /// Creates a factory that places creatures within the provided bounds.
    #[must_use]
    pub fn new(catalog: Catalog, bounds: Bounds) -> Self {
        Self { catalog, bounds }
    }

    /// Rules the factory draws attributes from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Area creatures are placed within.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Generates a new creature of the provided kind.
    ///
    /// Draws are consumed in a fixed order: size, speed, angle, horizontal
    /// heading, vertical heading, x, y, goal. Rules that are not randomized
    /// for the kind consume no draw. The creature is placed inset by half its
    /// size on the leading edges and no further than `extent - size` on the
    /// trailing ones, so its visual never starts partially outside the bounds.
    pub fn spawn<R: RandomSource + ?Sized>(&self, kind: CreatureKind, rng: &mut R) -> Creature {
        let traits = self.catalog.traits(kind);

        let size = traits.size.sample(rng);
        let speed = traits.speed.sample(rng);
        let angle = traits.angle.sample(rng);
        let x_negative = rng.next_bool();
        let y_negative = if traits.angle.is_diagonal() {
            rng.next_bool()
        } else {
            false
        };
        let position = self.place(size, rng);
        let ability_goal = traits.goal.sample(rng);

        Creature {
            kind,
            position,
            size,
            speed,
            angle,
            x_negative,
            y_negative,
            ability_progress: 0.0,
            ability_goal,
            score_value: traits.score_value,
            tint: traits.tint,
        }
    }

    fn place<R: RandomSource + ?Sized>(&self, size: u32, rng: &mut R) -> Position {
        let inset = size / 2;
        let x = inset + rng.next_below(placement_span(self.bounds.width(), size));
        let y = inset + rng.next_below(placement_span(self.bounds.height(), size));
        Position::new(x as f32, y as f32)
    }
}

/// Number of top-left offsets in `inset..=extent - size`.
fn placement_span(extent: u32, size: u32) -> u32 {
    extent.saturating_sub(size + size / 2) + 1
}

impl Default for CreatureFactory {
    fn default() -> Self {
        Self::new(Catalog::STANDARD, shoal_core::SIMULATION_BOUNDS)
    }
}
