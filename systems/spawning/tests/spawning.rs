use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shoal_core::{CreatureKind, ScriptedRandom, Tint, ALL_CREATURE_KINDS, SIMULATION_BOUNDS};
use shoal_system_difficulty::{SpawnPool, SpawnPoolBuilder};
use shoal_system_spawning::{
    Catalog, CreatureFactory, WeightedTypeSelector, DRAW_RANGE, STICKY_DRAW_RANGE,
};

const SAMPLES: usize = 2_000;

#[test]
fn single_kind_pool_covers_full_draw_ranges() {
    let pool = SpawnPool::from_weights([75, 0, 0, 0, 0, 0, 0, 0]);
    let selector = WeightedTypeSelector::new();

    for counter in 1..=STICKY_DRAW_RANGE {
        assert_eq!(
            selector.select_with_counter(&pool, Some(CreatureKind::Standard), counter),
            Some(CreatureKind::Standard),
            "sticky counter {counter}"
        );
    }
    for counter in 1..=DRAW_RANGE {
        assert_eq!(
            selector.select_with_counter(&pool, None, counter),
            Some(CreatureKind::Standard),
            "counter {counter}"
        );
    }
}

#[test]
fn sticky_bonus_shifts_boundary_by_twenty_five() {
    let pool = SpawnPool::from_weights([50, 25, 0, 0, 0, 0, 0, 0]);
    let selector = WeightedTypeSelector::new();

    assert_eq!(
        selector.select_with_counter(&pool, None, 50),
        Some(CreatureKind::Standard)
    );
    assert_eq!(
        selector.select_with_counter(&pool, None, 51),
        Some(CreatureKind::Fast)
    );

    let sticky = Some(CreatureKind::Standard);
    assert_eq!(
        selector.select_with_counter(&pool, sticky, 75),
        Some(CreatureKind::Standard)
    );
    assert_eq!(
        selector.select_with_counter(&pool, sticky, 76),
        Some(CreatureKind::Fast)
    );
    assert_eq!(
        selector.select_with_counter(&pool, sticky, 100),
        Some(CreatureKind::Fast)
    );
}

#[test]
fn sticky_bonus_applies_to_a_later_kind() {
    let pool = SpawnPool::from_weights([50, 25, 0, 0, 0, 0, 0, 0]);
    let selector = WeightedTypeSelector::new();
    let sticky = Some(CreatureKind::Fast);

    assert_eq!(
        selector.select_with_counter(&pool, sticky, 51),
        Some(CreatureKind::Fast)
    );
    assert_eq!(
        selector.select_with_counter(&pool, sticky, 100),
        Some(CreatureKind::Fast)
    );
    assert_eq!(selector.select_with_counter(&pool, sticky, 101), None);
}

#[test]
fn sticky_bonus_resurrects_zero_weight_kind() {
    let pool = SpawnPool::from_weights([75, 0, 0, 0, 0, 0, 0, 0]);
    let selector = WeightedTypeSelector::new();
    let sticky = Some(CreatureKind::Fast);

    assert_eq!(
        selector.select_with_counter(&pool, sticky, 76),
        Some(CreatureKind::Fast)
    );
    assert_eq!(
        selector.select_with_counter(&pool, sticky, 100),
        Some(CreatureKind::Fast)
    );
}

#[test]
fn zero_weight_kinds_are_never_selected() {
    let builder = SpawnPoolBuilder::standard().expect("standard table");
    let selector = WeightedTypeSelector::new();

    for level in 0..=11 {
        let pool = builder.build(level);
        for counter in 1..=DRAW_RANGE {
            let kind = selector
                .select_with_counter(&pool, None, counter)
                .expect("staged pools cover the unbiased range");
            assert!(
                pool.weight(kind) > 0,
                "level {level} counter {counter} picked {kind:?}"
            );
        }
    }
}

#[test]
fn short_pool_reports_no_selection() {
    let pool = SpawnPool::from_weights([10, 10, 0, 0, 0, 0, 0, 0]);
    let selector = WeightedTypeSelector::new();
    assert_eq!(selector.select_with_counter(&pool, None, 21), None);

    // Scripted draw 74 becomes counter 75.
    let mut rng = ScriptedRandom::new([74]);
    assert_eq!(selector.select(&pool, None, &mut rng), None);
}

#[test]
fn draws_map_onto_counter_ranges() {
    let pool = SpawnPool::from_weights([50, 25, 0, 0, 0, 0, 0, 0]);
    let selector = WeightedTypeSelector::new();

    // Unbiased: draw 74 -> counter 75 lands on the last covered unit.
    let mut rng = ScriptedRandom::new([74]);
    assert_eq!(
        selector.select(&pool, None, &mut rng),
        Some(CreatureKind::Fast)
    );

    // Sticky: draw 74 -> counter 75 still inside the boosted standard share.
    let mut rng = ScriptedRandom::new([74]);
    assert_eq!(
        selector.select(&pool, Some(CreatureKind::Standard), &mut rng),
        Some(CreatureKind::Standard)
    );

    // Sticky: draw 99 -> counter 100 falls to the next kind.
    let mut rng = ScriptedRandom::new([99]);
    assert_eq!(
        selector.select(&pool, Some(CreatureKind::Standard), &mut rng),
        Some(CreatureKind::Fast)
    );
}

#[test]
fn spawned_attributes_stay_within_catalog_ranges() {
    let factory = CreatureFactory::default();
    let catalog = Catalog::STANDARD;
    let mut rng = ChaCha8Rng::seed_from_u64(0x0f15_4a11);
    let width = SIMULATION_BOUNDS.width() as f32;
    let height = SIMULATION_BOUNDS.height() as f32;

    for kind in ALL_CREATURE_KINDS {
        let traits = catalog.traits(kind);
        let (goal_min, goal_max) = traits.goal.span();
        for _ in 0..SAMPLES {
            let creature = factory.spawn(kind, &mut rng);
            assert_eq!(creature.kind, kind);
            assert!(traits.size.contains(creature.size), "{kind:?} size");
            assert!((0.0..=1.0).contains(&creature.angle), "{kind:?} angle");
            assert!(creature.ability_goal >= goal_min && creature.ability_goal <= goal_max);
            assert_eq!(creature.ability_progress, 0.0);
            assert_eq!(creature.score_value, traits.score_value);

            let half = (creature.size / 2) as f32;
            let size = creature.size as f32;
            assert!(creature.position.x >= half);
            assert!(creature.position.x + size <= width, "{kind:?} right edge");
            assert!(creature.position.y >= half);
            assert!(creature.position.y + size <= height, "{kind:?} bottom edge");

            if !traits.angle.is_diagonal() {
                assert_eq!(creature.angle, 1.0);
                assert!(!creature.y_negative);
            }
        }
    }
}

#[test]
fn per_kind_ranges_match_tuning() {
    let factory = CreatureFactory::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let expectations: [(CreatureKind, (u32, u32), (f32, f32), (f32, f32), u32); 8] = [
        (CreatureKind::Standard, (50, 63), (100.0, 199.0), (1.0, 1.0), 1),
        (CreatureKind::Fast, (40, 47), (250.0, 399.0), (1.0, 1.0), 3),
        (CreatureKind::Angled, (40, 47), (100.0, 199.0), (0.3, 0.9), 3),
        (CreatureKind::FastAngled, (40, 47), (250.0, 399.0), (0.1, 0.9), 5),
        (CreatureKind::Faster, (40, 47), (600.0, 799.0), (1.0, 1.0), 5),
        (CreatureKind::Slippery, (32, 37), (250.0, 399.0), (1.0, 1.0), 8),
        (CreatureKind::Turning, (40, 47), (600.0, 799.0), (0.1, 0.9), 8),
        (CreatureKind::Ultimate, (32, 37), (800.0, 800.0), (0.1, 0.9), 10),
    ];

    for (kind, (size_min, size_max), (speed_min, speed_max), (angle_min, angle_max), score) in
        expectations
    {
        for _ in 0..SAMPLES {
            let creature = factory.spawn(kind, &mut rng);
            assert!(creature.size >= size_min && creature.size <= size_max);
            assert!(creature.speed >= speed_min && creature.speed <= speed_max);
            assert!(creature.angle >= angle_min - 1e-5 && creature.angle <= angle_max + 1e-5);
            assert_eq!(creature.score_value, score);
            let expected_tint = if kind == CreatureKind::Ultimate {
                Tint::CORAL
            } else {
                Tint::WHITE
            };
            assert_eq!(creature.tint, expected_tint);
        }
    }
}

#[test]
fn identical_seeds_generate_identical_creatures() {
    let factory = CreatureFactory::default();
    let mut first = ChaCha8Rng::seed_from_u64(99);
    let mut second = ChaCha8Rng::seed_from_u64(99);
    for kind in ALL_CREATURE_KINDS {
        assert_eq!(
            factory.spawn(kind, &mut first),
            factory.spawn(kind, &mut second)
        );
    }
}
