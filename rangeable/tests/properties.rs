//! Property tests for the value model and position mapping.
//!
//! 1. Containment: a clamped value never leaves the bounds or its handle limit
//! 2. Ordering: dual-handle values stay ordered and in bounds under any
//!    sequence of updates, bounds changes and limit changes
//! 3. Idempotence: clamping an already clamped value changes nothing
//! 4. Mapping: value -> coordinate -> value round-trips on a measured track

use proptest::prelude::*;
use rangeable::{
    position::{Axis, PositionMapper},
    px::PxRect,
    value::{Bounds, HandleLimit, Rounding, SliderValue, ValueModel},
};

// ── Strategies ───────────────────────────────────────────────────────

fn arb_bounds() -> impl Strategy<Value = Bounds> {
    let steps = prop_oneof![Just(1.0), Just(0.5), Just(0.1), Just(5.0), Just(25.0)];
    (-1000.0..1000.0_f64, 0.0..2000.0_f64, steps)
        .prop_map(|(min, span, step)| Bounds::new(min, min + span, step))
}

fn arb_rounding() -> impl Strategy<Value = Rounding> {
    prop_oneof![Just(Rounding::Up), Just(Rounding::Down)]
}

#[derive(Debug, Clone)]
enum Op {
    Set(usize, f64),
    Bounds(Bounds),
    Limit(usize, HandleLimit),
}

fn arb_limit() -> impl Strategy<Value = HandleLimit> {
    (proptest::option::of(-1500.0..1500.0_f64), 0.0..1500.0_f64).prop_map(|(low, width)| {
        match low {
            Some(low) => HandleLimit::new(low, low + width),
            None => HandleLimit::default(),
        }
    })
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        4 => (0..2usize, -3000.0..3000.0_f64).prop_map(|(index, raw)| Op::Set(index, raw)),
        1 => arb_bounds().prop_map(Op::Bounds),
        1 => (0..2usize, arb_limit()).prop_map(|(index, limit)| Op::Limit(index, limit)),
    ];
    prop::collection::vec(op, 1..40)
}

// ── 1. Containment ───────────────────────────────────────────────────

proptest! {
    /// Whatever comes in, the stored value stays inside the bounds.
    #[test]
    fn clamped_values_stay_in_bounds(
        bounds in arb_bounds(),
        raw in -5000.0..5000.0_f64,
        rounding in arb_rounding(),
    ) {
        let model = ValueModel::new(bounds, SliderValue::Single(bounds.min));
        let value = model.clamp_toward(raw, None, rounding);
        prop_assert!(value >= bounds.min && value <= bounds.max, "{value} escaped {bounds:?}");
    }

    /// A handle limit inside the bounds confines the handle.
    #[test]
    fn handle_limit_is_respected(
        raw in -500.0..500.0_f64,
        low in 0.0..50.0_f64,
        width in 0.0..50.0_f64,
    ) {
        let bounds = Bounds::new(0.0, 100.0, 1.0);
        let mut model = ValueModel::new(bounds, SliderValue::Single(0.0));
        model.set_limit(0, HandleLimit::new(low, low + width));
        model.set(raw, None);
        let value = model.get(0).unwrap_or(f64::NAN);
        prop_assert!(value >= low && value <= low + width, "{value} outside [{low}, {}]", low + width);
    }
}

// ── 2. Ordering ──────────────────────────────────────────────────────

proptest! {
    /// No sequence of updates, bounds or limit changes makes the low handle
    /// pass the high one or either handle leave the bounds.
    #[test]
    fn double_values_stay_ordered(
        bounds in arb_bounds(),
        initial in (-3000.0..3000.0_f64, -3000.0..3000.0_f64),
        ops in arb_ops(),
    ) {
        let mut model = ValueModel::new(bounds, SliderValue::Double([initial.0, initial.1]));
        for op in ops {
            match op {
                Op::Set(index, raw) => {
                    model.set(raw, Some(index));
                }
                Op::Bounds(bounds) => {
                    model.set_bounds(bounds);
                    model.reapply();
                }
                Op::Limit(index, limit) => {
                    model.set_limit(index, limit);
                    model.reapply();
                }
            }
            let bounds = model.bounds();
            let SliderValue::Double([low, high]) = model.value() else {
                return Err(TestCaseError::fail("double model lost a handle"));
            };
            prop_assert!(low <= high, "{low} > {high}");
            prop_assert!(
                low >= bounds.min && high <= bounds.max,
                "[{low}, {high}] escaped {bounds:?}"
            );
        }
    }
}

// ── 3. Idempotence ───────────────────────────────────────────────────

proptest! {
    /// Re-applying a committed value is a no-op.
    #[test]
    fn clamp_is_idempotent(
        bounds in arb_bounds(),
        raw in -5000.0..5000.0_f64,
        rounding in arb_rounding(),
    ) {
        let mut model = ValueModel::new(bounds, SliderValue::Single(bounds.min));
        model.set_toward(raw, None, rounding);
        let stored = model.get(0).unwrap_or(f64::NAN);
        prop_assert_eq!(model.clamp(stored, None), stored);
        prop_assert!(!model.set(stored, None));
    }
}

// ── 4. Mapping ───────────────────────────────────────────────────────

proptest! {
    /// Mapping a value to a coordinate and back recovers the value.
    #[test]
    fn mapper_round_trips(
        bounds in arb_bounds(),
        fraction in 0.0..=1.0_f64,
        length in 10.0..2000.0_f64,
        vertical in any::<bool>(),
    ) {
        prop_assume!(bounds.span() > 0.0);
        let track = PxRect::new(7.0, 13.0, length, length / 2.0);
        let axis = Axis::from_vertical(vertical);
        let mapper = PositionMapper::new(axis, bounds, track);
        let value = bounds.min + bounds.span() * fraction;
        let back = mapper.offset_to_value(mapper.value_to_coordinate(value));
        let tolerance = 1e-9 * (1.0 + bounds.min.abs() + bounds.max.abs());
        prop_assert!((back - value).abs() <= tolerance, "{value} came back as {back}");
    }
}
