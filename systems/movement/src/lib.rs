#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic motion integration with toroidal wrap-around.
//!
//! Each axis moves independently. The horizontal share of a creature's speed
//! is its `angle` and the vertical share is `1 - angle`. A creature that fully
//! leaves the bounds on the side it travels toward re-enters from the
//! opposite side, pushed out by a tenth of its speed so that it glides back in.

use log::warn;
use shoal_core::{Bounds, Creature, Position};

/// Divisor applied to speed when computing the re-entry offset after a wrap.
pub const WRAP_OFFSET_DIVISOR: f32 = 10.0;

/// Integrates creature positions against fixed simulation bounds.
#[derive(Clone, Copy, Debug)]
pub struct MotionIntegrator {
    bounds: Bounds,
}

impl MotionIntegrator {
    /// Creates an integrator for the provided bounds.
    #[must_use]
    pub const fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }

    /// Bounds the integrator wraps against.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Advances the creature by `dt_seconds` and returns its new position.
    pub fn integrate(&self, creature: &mut Creature, dt_seconds: f32) -> Position {
        let size = creature.size as f32;
        let travel = creature.speed * dt_seconds;
        let offset = creature.speed / WRAP_OFFSET_DIVISOR;

        let x = step_axis(
            creature.position.x,
            travel * creature.angle,
            creature.x_negative,
            size,
            offset,
            self.bounds.width() as f32,
        );
        let y = step_axis(
            creature.position.y,
            travel * (1.0 - creature.angle),
            creature.y_negative,
            size,
            offset,
            self.bounds.height() as f32,
        );

        creature.position = Position::new(x, y);
        creature.position
    }
}

impl Default for MotionIntegrator {
    fn default() -> Self {
        Self::new(shoal_core::SIMULATION_BOUNDS)
    }
}

fn step_axis(
    position: f32,
    distance: f32,
    negative: bool,
    size: f32,
    offset: f32,
    extent: f32,
) -> f32 {
    let next = if negative {
        let moved = position - distance;
        if moved < -size {
            offset + extent
        } else {
            moved
        }
    } else {
        let moved = position + distance;
        if moved > extent {
            -offset - size
        } else {
            moved
        }
    };
    sanitize(next, extent)
}

fn sanitize(value: f32, extent: f32) -> f32 {
    if !value.is_finite() {
        warn!("non-finite coordinate {value} reset to origin");
        return 0.0;
    }
    let limit = 2.0 * extent;
    if value.abs() > limit {
        warn!("coordinate {value} clamped to +/-{limit}");
        return value.clamp(-limit, limit);
    }
    value
}
