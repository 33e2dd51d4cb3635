use shoal_core::{CreatureKind, ALL_CREATURE_KINDS};
use shoal_system_difficulty::{
    DifficultyTracker, PoolTableError, SpawnPoolBuilder, ThresholdError, DIFFICULTY_BRACKETS,
    POOL_TOTAL, STANDARD_THRESHOLDS,
};

#[test]
fn staged_levels_sum_to_pool_total() {
    let builder = SpawnPoolBuilder::standard().expect("standard table");
    for level in 0..=10 {
        assert_eq!(
            builder.build(level).total(),
            POOL_TOTAL,
            "level {level} must sum to {POOL_TOTAL}"
        );
    }
}

#[test]
fn levels_past_table_collapse_to_single_kind() {
    let builder = SpawnPoolBuilder::standard().expect("standard table");
    for level in [10, 11, 12, 50, u32::MAX] {
        let pool = builder.build(level);
        let carriers: Vec<_> = pool.iter().filter(|(_, weight)| *weight > 0).collect();
        assert_eq!(carriers, vec![(CreatureKind::Ultimate, 75)]);
    }
}

#[test]
fn level_zero_is_all_standard() {
    let builder = SpawnPoolBuilder::standard().expect("standard table");
    let pool = builder.build(0);
    assert_eq!(pool.weight(CreatureKind::Standard), 75);
    for kind in ALL_CREATURE_KINDS.iter().skip(1) {
        assert_eq!(pool.weight(*kind), 0);
    }
}

#[test]
fn schedule_introduces_kinds_progressively() {
    let builder = SpawnPoolBuilder::standard().expect("standard table");
    let first_level = |kind: CreatureKind| {
        (0..=10)
            .find(|level| builder.build(*level).weight(kind) > 0)
            .expect("every kind appears")
    };
    assert_eq!(first_level(CreatureKind::Standard), 0);
    assert_eq!(first_level(CreatureKind::Fast), 1);
    assert_eq!(first_level(CreatureKind::Angled), 2);
    assert_eq!(first_level(CreatureKind::FastAngled), 3);
    assert_eq!(first_level(CreatureKind::Faster), 4);
    assert_eq!(first_level(CreatureKind::Slippery), 4);
    assert_eq!(first_level(CreatureKind::Turning), 5);
    assert_eq!(first_level(CreatureKind::Ultimate), 7);
}

#[test]
fn rejects_rows_with_wrong_total() {
    let mut table = [[0_u32; 8]; 2];
    table[0][0] = 75;
    table[1][0] = 70;
    let error = SpawnPoolBuilder::from_table(&table, [0, 0, 0, 0, 0, 0, 0, 75])
        .expect_err("row 1 sums to 70");
    assert_eq!(
        error,
        PoolTableError::WrongTotal {
            level: 1,
            total: 70,
            expected: 75
        }
    );
}

#[test]
fn rejects_spread_end_game() {
    let table = [[75, 0, 0, 0, 0, 0, 0, 0]];
    let error = SpawnPoolBuilder::from_table(&table, [0, 0, 0, 0, 0, 0, 40, 35])
        .expect_err("end game must be single kind");
    assert_eq!(error, PoolTableError::EndGameNotSingleKind { expected: 75 });
    assert_eq!(
        SpawnPoolBuilder::from_table(&[], [75, 0, 0, 0, 0, 0, 0, 0]).unwrap_err(),
        PoolTableError::Empty
    );
}

#[test]
fn evaluate_advances_one_level_per_call() {
    let tracker = DifficultyTracker::standard();

    let below = tracker.evaluate(2, 0);
    assert_eq!(below.level, 0);
    assert!(!below.leveled_up);

    let at = tracker.evaluate(3, 0);
    assert_eq!(at.level, 1);
    assert!(at.leveled_up);

    // A score far past several thresholds still moves exactly one step.
    let jump = tracker.evaluate(500, 1);
    assert_eq!(jump.level, 2);
    assert!(jump.leveled_up);
}

#[test]
fn evaluate_clamps_at_bracket_count() {
    let tracker = DifficultyTracker::standard();
    let top = DIFFICULTY_BRACKETS as u32;

    let last = tracker.evaluate(1000, top - 1);
    assert_eq!(last.level, top);
    assert!(last.leveled_up);

    let beyond = tracker.evaluate(u32::MAX, top);
    assert_eq!(beyond.level, top);
    assert!(!beyond.leveled_up);
}

#[test]
fn rejects_non_increasing_thresholds() {
    let mut thresholds = STANDARD_THRESHOLDS;
    thresholds[4] = thresholds[3];
    let error = DifficultyTracker::new(thresholds).expect_err("duplicate threshold");
    assert_eq!(
        error,
        ThresholdError::NotIncreasing {
            index: 4,
            previous: 60,
            value: 60
        }
    );
}
