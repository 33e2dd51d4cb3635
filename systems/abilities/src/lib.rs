#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Periodic special abilities that mutate creature motion.
//!
//! Every creature charges a timer each tick. When the timer reaches the
//! creature's goal it resets to zero and the kind-specific ability fires once;
//! overshoot from a long tick is discarded rather than carried over.

use shoal_core::{AbilityEffect, Creature, CreatureKind, RandomSource};
use shoal_system_spawning::{
    BURST_GOAL, ERRATIC_GOAL, FAST_SPEED, RECOVERY_GOAL, TOP_SPEED, TURN_GOAL, WIDE_DIAGONAL,
};

/// Ability charge gained per second of simulated time.
pub const GAIN_RATE: f32 = 200.0;

/// Speed change applied by an erratic speed shift.
pub const SPEED_SHIFT: f32 = 200.0;

/// Goal at or above which a bursting kind is considered to be recovering.
const RECOVERY_THRESHOLD: f32 = 400.0;

/// Number of equally likely erratic outcomes, including two idle ones.
const ERRATIC_OUTCOMES: u32 = 6;

/// Drives the per-creature ability timers.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpecialAbilityStateMachine;

impl SpecialAbilityStateMachine {
    /// Creates a new state machine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Charges the creature's timer and fires its ability when the goal is reached.
    ///
    /// Returns the applied effect when the ability fired during this call.
    pub fn advance<R: RandomSource + ?Sized>(
        &self,
        creature: &mut Creature,
        dt_seconds: f32,
        rng: &mut R,
    ) -> Option<AbilityEffect> {
        creature.ability_progress += GAIN_RATE * dt_seconds;
        if creature.ability_progress < creature.ability_goal {
            return None;
        }
        creature.ability_progress = 0.0;
        Some(self.fire(creature, rng))
    }

    /// Applies the creature's kind-specific ability immediately.
    pub fn fire<R: RandomSource + ?Sized>(
        &self,
        creature: &mut Creature,
        rng: &mut R,
    ) -> AbilityEffect {
        match creature.kind {
            CreatureKind::FastAngled => {
                creature.y_negative = !creature.y_negative;
                AbilityEffect::ReversedVertical
            }
            CreatureKind::Slippery => {
                if creature.ability_goal >= RECOVERY_THRESHOLD {
                    creature.speed = TOP_SPEED;
                    creature.ability_goal = BURST_GOAL.sample(rng);
                    AbilityEffect::Burst
                } else {
                    creature.speed = FAST_SPEED.sample(rng) as f32;
                    creature.ability_goal = RECOVERY_GOAL.sample(rng);
                    AbilityEffect::Recovered
                }
            }
            CreatureKind::Turning => {
                creature.x_negative = !creature.x_negative;
                creature.y_negative = rng.next_bool();
                creature.angle = WIDE_DIAGONAL.sample(rng);
                creature.ability_goal = TURN_GOAL.sample(rng);
                AbilityEffect::Turned
            }
            CreatureKind::Ultimate => {
                creature.ability_goal = ERRATIC_GOAL.sample(rng);
                erratic(creature, rng)
            }
            CreatureKind::Standard
            | CreatureKind::Fast
            | CreatureKind::Angled
            | CreatureKind::Faster => AbilityEffect::Idle,
        }
    }
}

fn erratic<R: RandomSource + ?Sized>(creature: &mut Creature, rng: &mut R) -> AbilityEffect {
    match rng.next_below(ERRATIC_OUTCOMES) {
        0 => {
            creature.x_negative = !creature.x_negative;
            AbilityEffect::ReversedHorizontal
        }
        1 => {
            creature.y_negative = !creature.y_negative;
            AbilityEffect::ReversedVertical
        }
        2 => {
            creature.y_negative = rng.next_bool();
            creature.angle = WIDE_DIAGONAL.sample(rng);
            AbilityEffect::Veered
        }
        3 => {
            if creature.speed <= TOP_SPEED {
                creature.speed += SPEED_SHIFT;
            } else {
                creature.speed -= SPEED_SHIFT;
            }
            AbilityEffect::SpeedShifted
        }
        _ => AbilityEffect::Idle,
    }
}

/// Reports whether the effect reversed the horizontal heading, requiring a visual flip.
#[must_use]
pub const fn flips_horizontally(effect: AbilityEffect) -> bool {
    matches!(
        effect,
        AbilityEffect::ReversedHorizontal | AbilityEffect::Turned
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoal_core::{Position, ScriptedRandom, Tint};

    fn ultimate() -> Creature {
        Creature {
            kind: CreatureKind::Ultimate,
            position: Position::new(0.0, 0.0),
            size: 32,
            speed: TOP_SPEED,
            angle: 0.1,
            x_negative: false,
            y_negative: false,
            ability_progress: 0.0,
            ability_goal: 100.0,
            score_value: 10,
            tint: Tint::CORAL,
        }
    }

    #[test]
    fn only_horizontal_reversals_flip_the_visual() {
        assert!(flips_horizontally(AbilityEffect::ReversedHorizontal));
        assert!(flips_horizontally(AbilityEffect::Turned));
        assert!(!flips_horizontally(AbilityEffect::ReversedVertical));
        assert!(!flips_horizontally(AbilityEffect::Veered));
        assert!(!flips_horizontally(AbilityEffect::Burst));
        assert!(!flips_horizontally(AbilityEffect::Idle));
    }

    #[test]
    fn erratic_speed_shift_alternates_around_top_speed() {
        let mut creature = ultimate();

        let effect = erratic(&mut creature, &mut ScriptedRandom::new([3]));
        assert_eq!(effect, AbilityEffect::SpeedShifted);
        assert_eq!(creature.speed, TOP_SPEED + SPEED_SHIFT);

        let _ = erratic(&mut creature, &mut ScriptedRandom::new([3]));
        assert_eq!(creature.speed, TOP_SPEED);
    }

    #[test]
    fn erratic_veer_redraws_heading_and_angle() {
        let mut creature = ultimate();
        let mut rng = ScriptedRandom::new([2, 1, 4]);

        assert_eq!(erratic(&mut creature, &mut rng), AbilityEffect::Veered);
        assert!(creature.y_negative);
        assert!((creature.angle - 0.5).abs() < 1e-5);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn erratic_idle_outcomes_leave_the_creature_alone() {
        for outcome in [4, 5] {
            let mut creature = ultimate();
            let effect = erratic(&mut creature, &mut ScriptedRandom::new([outcome]));
            assert_eq!(effect, AbilityEffect::Idle);
            assert_eq!(creature, ultimate());
        }
    }
}
