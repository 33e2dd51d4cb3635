//! Per-kind attribute ranges and formulas.

use shoal_core::{CreatureKind, RandomSource, Tint, CREATURE_KIND_COUNT};
use thiserror::Error;

/// Size range shared by the large standard swimmers.
pub const STANDARD_SIZE: IntRange = IntRange::new(50, 64);
/// Size range shared by the mid-sized swimmers.
pub const SMALL_SIZE: IntRange = IntRange::new(40, 48);
/// Size range shared by the tiny swimmers.
pub const TINY_SIZE: IntRange = IntRange::new(32, 38);

/// Speed range of the slow swimmers.
pub const STANDARD_SPEED: IntRange = IntRange::new(100, 200);
/// Speed range of the quick swimmers, also used when a burst recovers.
pub const FAST_SPEED: IntRange = IntRange::new(250, 400);
/// Speed range of the very quick swimmers.
pub const FASTER_SPEED: IntRange = IntRange::new(600, 800);
/// Top speed, reached by bursts and the rarest kind.
pub const TOP_SPEED: f32 = FASTER_SPEED.max() as f32;

/// Narrow diagonal used by slow diagonal swimmers, spanning `0.3..=0.9`.
pub const NARROW_DIAGONAL: AngleRule = AngleRule::Diagonal {
    steps: 7,
    offset: 0.2,
};
/// Wide diagonal used by quick diagonal swimmers, spanning `0.1..=0.9`.
pub const WIDE_DIAGONAL: AngleRule = AngleRule::Diagonal {
    steps: 9,
    offset: 0.0,
};

/// Goal assigned to kinds whose ability never meaningfully fires.
pub const IDLE_GOAL: GoalRule = GoalRule::Fixed(1000.0);
/// Goal between vertical reversals.
pub const REVERSAL_GOAL: GoalRule = GoalRule::Stepped {
    base: 500,
    step: 100,
    choices: 6,
};
/// Goal of the recovery sub-state that precedes a burst.
pub const RECOVERY_GOAL: GoalRule = GoalRule::Stepped {
    base: 400,
    step: 20,
    choices: 11,
};
/// Goal of the burst sub-state that precedes a recovery.
pub const BURST_GOAL: GoalRule = GoalRule::Stepped {
    base: 200,
    step: 10,
    choices: 11,
};
/// Goal between turns.
pub const TURN_GOAL: GoalRule = GoalRule::Stepped {
    base: 250,
    step: 50,
    choices: 11,
};
/// Goal between erratic moves.
pub const ERRATIC_GOAL: GoalRule = GoalRule::Stepped {
    base: 100,
    step: 100,
    choices: 3,
};

/// Rejected integer range where the upper bound does not exceed the lower bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("range upper bound {max} must exceed lower bound {min}")]
pub struct RangeError {
    /// Inclusive lower bound that was requested.
    pub min: u32,
    /// Exclusive upper bound that was requested.
    pub max: u32,
}

/// Half-open integer range `min..max` sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntRange {
    min: u32,
    max: u32,
}

impl IntRange {
    /// Creates a range, failing const evaluation when `max <= min`.
    ///
    /// Use this for tables declared as constants so malformed ranges stop the
    /// build; use [`IntRange::try_new`] for ranges assembled at runtime.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        assert!(max > min, "range upper bound must exceed lower bound");
        Self { min, max }
    }

    /// Creates a range, rejecting `max <= min`.
    pub const fn try_new(min: u32, max: u32) -> Result<Self, RangeError> {
        if max > min {
            Ok(Self { min, max })
        } else {
            Err(RangeError { min, max })
        }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Reports whether the value lies inside the range.
    #[must_use]
    pub const fn contains(&self, value: u32) -> bool {
        self.min <= value && value < self.max
    }

    /// Draws a value uniformly from the range.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u32 {
        self.min + rng.next_below(self.max - self.min)
    }
}

/// How a kind chooses its travel speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpeedRule {
    /// Uniform draw from an integer range.
    Range(IntRange),
    /// Constant speed.
    Fixed(f32),
}

impl SpeedRule {
    /// Resolves a speed, drawing only when the rule is randomized.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f32 {
        match self {
            Self::Range(range) => range.sample(rng) as f32,
            Self::Fixed(speed) => *speed,
        }
    }
}

/// How a kind splits its speed between the axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AngleRule {
    /// Purely horizontal travel.
    Level,
    /// Randomized diagonal `0.1 * (draw % steps + 1) + offset`.
    Diagonal {
        /// Number of distinct tenths the draw selects from.
        steps: u32,
        /// Constant added to the drawn tenths.
        offset: f32,
    },
}

impl AngleRule {
    /// Whether the rule produces diagonal travel.
    #[must_use]
    pub const fn is_diagonal(&self) -> bool {
        matches!(self, Self::Diagonal { .. })
    }

    /// Resolves an angle in `0.0..=1.0`, drawing only for diagonal rules.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f32 {
        match self {
            Self::Level => 1.0,
            Self::Diagonal { steps, offset } => {
                let tenths = rng.next_below(*steps) + 1;
                (0.1 * tenths as f32 + offset).clamp(0.0, 1.0)
            }
        }
    }
}

/// How a kind chooses the time its ability needs to charge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GoalRule {
    /// Constant goal.
    Fixed(f32),
    /// `base + step * (draw % choices)`.
    Stepped {
        /// Smallest goal the rule can produce.
        base: u32,
        /// Distance between consecutive goals.
        step: u32,
        /// Number of distinct goals.
        choices: u32,
    },
}

impl GoalRule {
    /// Resolves a goal, drawing only when the rule is randomized.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f32 {
        match self {
            Self::Fixed(goal) => *goal,
            Self::Stepped {
                base,
                step,
                choices,
            } => (base + step * rng.next_below(*choices)) as f32,
        }
    }

    /// Smallest and largest goal the rule can produce.
    #[must_use]
    pub fn span(&self) -> (f32, f32) {
        match self {
            Self::Fixed(goal) => (*goal, *goal),
            Self::Stepped {
                base,
                step,
                choices,
            } => (
                *base as f32,
                (base + step * choices.saturating_sub(1)) as f32,
            ),
        }
    }
}

/// Attribute rules for a single creature kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KindTraits {
    /// Range the visual's edge length is drawn from.
    pub size: IntRange,
    /// Rule that resolves the travel speed.
    pub speed: SpeedRule,
    /// Rule that resolves the axis split.
    pub angle: AngleRule,
    /// Points awarded when the creature is hit.
    pub score_value: u32,
    /// Rule that resolves the first ability goal.
    pub goal: GoalRule,
    /// Tint applied to the visual.
    pub tint: Tint,
}

/// Attribute rules for every creature kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    entries: [KindTraits; CREATURE_KIND_COUNT],
}

impl Catalog {
    /// Rules tuned for the staged difficulty curve, in declaration order.
    pub const STANDARD: Self = Self {
        entries: [
            KindTraits {
                size: STANDARD_SIZE,
                speed: SpeedRule::Range(STANDARD_SPEED),
                angle: AngleRule::Level,
                score_value: 1,
                goal: IDLE_GOAL,
                tint: Tint::WHITE,
            },
            KindTraits {
                size: SMALL_SIZE,
                speed: SpeedRule::Range(FAST_SPEED),
                angle: AngleRule::Level,
                score_value: 3,
                goal: IDLE_GOAL,
                tint: Tint::WHITE,
            },
            KindTraits {
                size: SMALL_SIZE,
                speed: SpeedRule::Range(STANDARD_SPEED),
                angle: NARROW_DIAGONAL,
                score_value: 3,
                goal: IDLE_GOAL,
                tint: Tint::WHITE,
            },
            KindTraits {
                size: SMALL_SIZE,
                speed: SpeedRule::Range(FAST_SPEED),
                angle: WIDE_DIAGONAL,
                score_value: 5,
                goal: REVERSAL_GOAL,
                tint: Tint::WHITE,
            },
            KindTraits {
                size: SMALL_SIZE,
                speed: SpeedRule::Range(FASTER_SPEED),
                angle: AngleRule::Level,
                score_value: 5,
                goal: IDLE_GOAL,
                tint: Tint::WHITE,
            },
            KindTraits {
                size: TINY_SIZE,
                speed: SpeedRule::Range(FAST_SPEED),
                angle: AngleRule::Level,
                score_value: 8,
                goal: RECOVERY_GOAL,
                tint: Tint::WHITE,
            },
            KindTraits {
                size: SMALL_SIZE,
                speed: SpeedRule::Range(FASTER_SPEED),
                angle: WIDE_DIAGONAL,
                score_value: 8,
                goal: TURN_GOAL,
                tint: Tint::WHITE,
            },
            KindTraits {
                size: TINY_SIZE,
                speed: SpeedRule::Fixed(TOP_SPEED),
                angle: WIDE_DIAGONAL,
                score_value: 10,
                goal: ERRATIC_GOAL,
                tint: Tint::CORAL,
            },
        ],
    };

    /// Creates a catalog from rules listed in declaration order.
    #[must_use]
    pub const fn new(entries: [KindTraits; CREATURE_KIND_COUNT]) -> Self {
        Self { entries }
    }

    /// Rules for the provided kind.
    #[must_use]
    pub const fn traits(&self, kind: CreatureKind) -> &KindTraits {
        &self.entries[kind.ordinal()]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoal_core::ScriptedRandom;

    #[test]
    fn try_new_rejects_empty_ranges() {
        assert_eq!(IntRange::try_new(5, 5), Err(RangeError { min: 5, max: 5 }));
        assert_eq!(IntRange::try_new(9, 3), Err(RangeError { min: 9, max: 3 }));
        assert_eq!(IntRange::try_new(3, 9), Ok(IntRange::new(3, 9)));
    }

    #[test]
    fn narrow_diagonal_spans_expected_tenths() {
        let mut low = ScriptedRandom::new([0]);
        let mut high = ScriptedRandom::new([6]);
        assert!((NARROW_DIAGONAL.sample(&mut low) - 0.3).abs() < 1e-5);
        assert!((NARROW_DIAGONAL.sample(&mut high) - 0.9).abs() < 1e-5);
    }

    #[test]
    fn wide_diagonal_spans_expected_tenths() {
        let mut low = ScriptedRandom::new([0]);
        let mut high = ScriptedRandom::new([8]);
        assert!((WIDE_DIAGONAL.sample(&mut low) - 0.1).abs() < 1e-5);
        assert!((WIDE_DIAGONAL.sample(&mut high) - 0.9).abs() < 1e-5);
    }

    #[test]
    fn fixed_rules_consume_no_draws() {
        let mut rng = ScriptedRandom::default();
        assert_eq!(AngleRule::Level.sample(&mut rng), 1.0);
        assert_eq!(SpeedRule::Fixed(TOP_SPEED).sample(&mut rng), 800.0);
        assert_eq!(IDLE_GOAL.sample(&mut rng), 1000.0);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn stepped_goal_span_matches_formula() {
        assert_eq!(REVERSAL_GOAL.span(), (500.0, 1000.0));
        assert_eq!(RECOVERY_GOAL.span(), (400.0, 600.0));
        assert_eq!(BURST_GOAL.span(), (200.0, 300.0));
        assert_eq!(TURN_GOAL.span(), (250.0, 750.0));
        assert_eq!(ERRATIC_GOAL.span(), (100.0, 300.0));
    }
}
