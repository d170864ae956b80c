//! Property tests for the three meters.

use proptest::prelude::*;
use rr_trauma::meter::{METER_MAX, METER_MIN};
use rr_trauma::{CorruptionState, CpsState, Meter, StressState};

fn clamps<M: Meter>(v: i32) -> bool {
    let value = M::create(v).value();
    (METER_MIN..=METER_MAX).contains(&value)
        && (!(METER_MIN..=METER_MAX).contains(&v) || value == v)
}

fn stage_table_is_contiguous<M: Meter>() -> bool {
    let table = M::STAGES;
    table[0].0 == METER_MIN
        && table.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 < w[1].1)
        && table.last().is_some_and(|&(lower, _)| lower <= METER_MAX)
}

#[test]
fn stage_tables_cover_the_range() {
    assert!(stage_table_is_contiguous::<StressState>());
    assert!(stage_table_is_contiguous::<CorruptionState>());
    assert!(stage_table_is_contiguous::<CpsState>());
}

proptest! {
    #[test]
    fn create_always_clamps(v in any::<i32>()) {
        prop_assert!(clamps::<StressState>(v));
        prop_assert!(clamps::<CorruptionState>(v));
        prop_assert!(clamps::<CpsState>(v));
    }

    #[test]
    fn stage_never_decreases_as_value_rises(v in 0i32..100) {
        prop_assert!(
            StressState::determine_stage(v) <= StressState::determine_stage(v + 1)
        );
        prop_assert!(
            CorruptionState::determine_stage(v) <= CorruptionState::determine_stage(v + 1)
        );
        prop_assert!(
            CpsState::determine_stage(v) <= CpsState::determine_stage(v + 1)
        );
    }

    #[test]
    fn instance_stage_matches_standalone_lookup(v in any::<i32>()) {
        let s = StressState::create(v);
        prop_assert_eq!(s.stage(), StressState::determine_stage(s.value()));
        let c = CorruptionState::create(v);
        prop_assert_eq!(c.stage(), CorruptionState::determine_stage(c.value()));
    }

    #[test]
    fn directional_operations_stay_in_range(start in 0i32..=100, amount in 0i32..1_000) {
        let s = StressState::create(start);
        let up = s.with_stress_added(amount).unwrap();
        let down = s.with_stress_reduced(amount).unwrap();
        prop_assert!(up.value() >= s.value());
        prop_assert!(down.value() <= s.value());
        prop_assert!(up.value() <= METER_MAX);
        prop_assert!(down.value() >= METER_MIN);
    }

    #[test]
    fn negative_amounts_always_fail(start in 0i32..=100, amount in i32::MIN..0) {
        let c = CorruptionState::create(start);
        prop_assert!(c.with_corruption_added(amount).is_err());
        prop_assert!(c.with_corruption_reduced(amount).is_err());
        prop_assert!(c.build(amount).is_err());
        prop_assert!(c.tick(amount).is_err());
    }

    #[test]
    fn modify_is_total(start in any::<i32>(), delta in any::<i32>()) {
        let v = StressState::create(start).modify(delta).value();
        prop_assert!((METER_MIN..=METER_MAX).contains(&v));
    }
}
