//! Value model: bounds, quantization, per-handle limits and ordering.
//!
//! Every value the slider stores passes through [`ValueModel::clamp`], which
//! applies, in order:
//!
//! 1. step quantization ([`Rounding::Up`] unless the caller says otherwise),
//! 2. rounding to the accuracy derived from the step,
//! 3. the global [`Bounds`],
//! 4. the handle's [`HandleLimit`],
//! 5. in double mode, the sibling handle so that `low <= high`.
//!
//! Values that land exactly on an effective bound are returned untouched.
//! This keeps off-grid bounds reachable and makes `clamp` idempotent.
//!
//! The text boundary with the host element lives here too: attributes are
//! parsed once with [`parse_number`] and written back with [`format_value`].

use smallvec::SmallVec;
use tracing::warn;

/// Lower bound used when neither the element nor the config provides one.
pub const DEFAULT_MIN: f64 = 0.0;
/// Upper bound used when neither the element nor the config provides one.
pub const DEFAULT_MAX: f64 = 100.0;
/// Step used when neither the element nor the config provides a usable one.
pub const DEFAULT_STEP: f64 = 1.0;

/// Tolerance, relative to the step count, applied before ceiling/floor so
/// values already on the grid stay put despite float error.
const SNAP_EPSILON: f64 = 1e-9;
/// Decimal places are capped here; steps like `1/3` would otherwise ask for
/// the full `f64` expansion.
const MAX_ACCURACY: usize = 12;

/// Global value range and granularity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest permitted value.
    pub min: f64,
    /// Largest permitted value.
    pub max: f64,
    /// Quantization granularity.
    pub step: f64,
}

impl Bounds {
    /// Creates sanitized bounds.
    ///
    /// Non-finite `min`/`max` fall back to the defaults, `max < min`
    /// collapses the range onto `min`, and a non-positive or non-finite
    /// step becomes [`DEFAULT_STEP`].
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        let min = if min.is_finite() { min } else { DEFAULT_MIN };
        let max = if max.is_finite() { max } else { DEFAULT_MAX };
        let max = if max < min {
            warn!(min, max, "slider max is below min, collapsing range");
            min
        } else {
            max
        };
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            warn!(step, "unusable slider step, falling back to default");
            DEFAULT_STEP
        };
        Self { min, max, step }
    }

    /// Width of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
        }
    }
}

/// Optional sub-range restricting a single handle beyond the global bounds.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct HandleLimit {
    /// Lowest value the handle may take.
    pub min: Option<f64>,
    /// Highest value the handle may take.
    pub max: Option<f64>,
}

impl HandleLimit {
    /// A limit with both ends set.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// A limit with only a lower end.
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// A limit with only an upper end.
    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Returns `true` if neither end is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// The slider's value: one number, or an ordered `[low, high]` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderValue {
    /// Single-handle value.
    Single(f64),
    /// Dual-handle value, `low <= high`.
    Double([f64; 2]),
}

impl SliderValue {
    /// Number of handles this value drives.
    pub fn handles(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Double(_) => 2,
        }
    }

    /// The values as a slice, one entry per handle.
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Double(values) => values,
        }
    }

    /// Value of handle `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.as_slice().get(index).copied()
    }

    /// Lowest value (the only value in single mode).
    pub fn low(&self) -> f64 {
        match self {
            Self::Single(value) => *value,
            Self::Double([low, _]) => *low,
        }
    }

    /// Highest value (the only value in single mode).
    pub fn high(&self) -> f64 {
        match self {
            Self::Single(value) => *value,
            Self::Double([_, high]) => *high,
        }
    }

    /// Element representation: `"v"` or `"low,high"`.
    pub fn format(&self, accuracy: usize) -> String {
        match self {
            Self::Single(value) => format_value(*value, accuracy),
            Self::Double([low, high]) => format!(
                "{},{}",
                format_value(*low, accuracy),
                format_value(*high, accuracy)
            ),
        }
    }
}

/// Direction used when snapping a raw value onto the step grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Ceiling: snap to the next step boundary at or above the value.
    #[default]
    Up,
    /// Floor: snap to the previous step boundary at or below the value.
    Down,
}

impl Rounding {
    /// Rounding that follows the sign of a movement.
    pub fn toward(delta: f64) -> Self {
        if delta < 0.0 { Self::Down } else { Self::Up }
    }
}

/// Parses a numeric attribute. Blank, unparsable and non-finite text yields
/// `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parses a `"low,high"` pair as written by [`SliderValue::format`].
pub fn parse_pair(text: &str) -> Option<[f64; 2]> {
    let (low, high) = text.split_once(',')?;
    Some([parse_number(low)?, parse_number(high)?])
}

/// Number of decimal places implied by `step`.
///
/// ```
/// use rangeable::value::accuracy_of;
///
/// assert_eq!(accuracy_of(1.0), 0);
/// assert_eq!(accuracy_of(0.25), 2);
/// assert_eq!(accuracy_of(10.0), 0);
/// ```
pub fn accuracy_of(step: f64) -> usize {
    let text = step.to_string();
    text.split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
        .min(MAX_ACCURACY)
}

/// Formats a value with exactly `accuracy` decimal places.
pub fn format_value(value: f64, accuracy: usize) -> String {
    format!("{:.*}", accuracy, normalize_zero(value))
}

fn round_to(value: f64, accuracy: usize) -> f64 {
    let factor = 10f64.powi(accuracy as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    normalize_zero(scaled.round() / factor)
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

fn quantize(value: f64, step: f64, rounding: Rounding) -> f64 {
    let steps = value / step;
    let tolerance = SNAP_EPSILON * steps.abs().max(1.0);
    let snapped = match rounding {
        Rounding::Up => (steps - tolerance).ceil(),
        Rounding::Down => (steps + tolerance).floor(),
    };
    snapped * step
}

/// Owner of the slider's value(s), bounds, accuracy and handle limits.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueModel {
    bounds: Bounds,
    accuracy: usize,
    values: SmallVec<[f64; 2]>,
    limits: SmallVec<[HandleLimit; 2]>,
}

impl ValueModel {
    /// Creates a model and clamps the initial value(s) into place.
    pub fn new(bounds: Bounds, initial: SliderValue) -> Self {
        let values: SmallVec<[f64; 2]> = initial.as_slice().iter().copied().collect();
        let limits = SmallVec::from_elem(HandleLimit::default(), values.len());
        let mut model = Self {
            bounds,
            accuracy: accuracy_of(bounds.step),
            values,
            limits,
        };
        model.reapply();
        model
    }

    /// Number of handles.
    pub fn handles(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` for a dual-handle model.
    pub fn is_double(&self) -> bool {
        self.values.len() == 2
    }

    /// Current bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Decimal places values are rounded to.
    pub fn accuracy(&self) -> usize {
        self.accuracy
    }

    /// Re-derives the accuracy from the current step.
    pub fn refresh_accuracy(&mut self) {
        self.accuracy = accuracy_of(self.bounds.step);
    }

    /// Snapshot of the stored value(s).
    pub fn value(&self) -> SliderValue {
        match self.values.as_slice() {
            [low, high] => SliderValue::Double([*low, *high]),
            [value, ..] => SliderValue::Single(*value),
            [] => SliderValue::Single(self.bounds.min),
        }
    }

    /// Stored value of handle `index`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Limit of handle `index` (unbounded when out of range).
    pub fn limit(&self, index: usize) -> HandleLimit {
        self.limits.get(index).copied().unwrap_or_default()
    }

    /// Replaces the bounds. Stored values are not touched; call
    /// [`ValueModel::reapply`] or re-set them afterwards.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.refresh_accuracy();
    }

    /// Replaces the limit of handle `index`. Returns `false` if the handle
    /// does not exist.
    pub fn set_limit(&mut self, index: usize, limit: HandleLimit) -> bool {
        match self.limits.get_mut(index) {
            Some(slot) => {
                *slot = limit;
                true
            }
            None => false,
        }
    }

    /// Resolves the handle a call refers to. Single mode accepts `None` or
    /// `Some(0)`; double mode requires an explicit index.
    pub fn resolve_index(&self, index: Option<usize>) -> Option<usize> {
        match (self.is_double(), index) {
            (false, None) => Some(0),
            (_, Some(index)) if index < self.handles() => Some(index),
            _ => None,
        }
    }

    /// Quantizes and clamps `raw` for handle `index` with ceiling rounding.
    pub fn clamp(&self, raw: f64, index: Option<usize>) -> f64 {
        self.clamp_toward(raw, index, Rounding::Up)
    }

    /// Quantizes and clamps `raw` for handle `index` with explicit rounding.
    ///
    /// Non-finite input resolves to the handle's current value.
    pub fn clamp_toward(&self, raw: f64, index: Option<usize>, rounding: Rounding) -> f64 {
        let handle = self.resolve_index(index);
        if !raw.is_finite() {
            return handle
                .and_then(|index| self.get(index))
                .unwrap_or(self.bounds.min);
        }

        let (low, high) = self.effective_range(handle);
        let bounded = raw.max(low).min(high);
        if bounded == low || bounded == high {
            return bounded;
        }

        let snapped = round_to(quantize(bounded, self.bounds.step, rounding), self.accuracy);
        snapped.max(low).min(high)
    }

    /// Clamps and stores `raw` for handle `index`; returns whether the stored
    /// value changed.
    pub fn set(&mut self, raw: f64, index: Option<usize>) -> bool {
        self.set_toward(raw, index, Rounding::Up)
    }

    /// [`ValueModel::set`] with explicit rounding.
    pub fn set_toward(&mut self, raw: f64, index: Option<usize>, rounding: Rounding) -> bool {
        let Some(handle) = self.resolve_index(index) else {
            warn!(
                ?index,
                handles = self.handles(),
                "ignoring value update without a valid handle index"
            );
            return false;
        };
        let value = self.clamp_toward(raw, Some(handle), rounding);
        let previous = std::mem::replace(&mut self.values[handle], value);
        previous != value
    }

    /// Moves handle `index` by `steps` whole steps.
    pub fn step_by(&mut self, steps: i32, index: Option<usize>) -> bool {
        let Some(handle) = self.resolve_index(index) else {
            warn!(?index, "ignoring step without a valid handle index");
            return false;
        };
        let delta = f64::from(steps) * self.bounds.step;
        let target = self.values[handle] + delta;
        self.set_toward(target, Some(handle), Rounding::toward(delta))
    }

    /// Re-clamps every handle in index order; returns whether any changed.
    pub fn reapply(&mut self) -> bool {
        let mut changed = false;
        for index in 0..self.handles() {
            let current = self.values[index];
            changed |= self.set(current, Some(index));
        }
        changed
    }

    /// The interval a handle may occupy. Ordering against the sibling wins
    /// over the handle's own limit when the two conflict.
    fn effective_range(&self, handle: Option<usize>) -> (f64, f64) {
        let Bounds { min, max, .. } = self.bounds;
        let Some(index) = handle else {
            return (min, max);
        };

        let limit = self.limit(index);
        let mut low = limit.min.map_or(min, |l| l.max(min).min(max));
        let mut high = limit.max.map_or(max, |h| h.min(max).max(low));

        // The sibling may still sit outside freshly replaced bounds.
        if self.is_double() {
            let sibling = self.values[1 - index.min(1)].max(min).min(max);
            match index {
                0 => {
                    high = high.min(sibling);
                    low = low.min(high);
                }
                _ => {
                    low = low.max(sibling);
                    high = high.max(low);
                }
            }
        }
        (low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(min: f64, max: f64, step: f64, value: f64) -> ValueModel {
        ValueModel::new(Bounds::new(min, max, step), SliderValue::Single(value))
    }

    fn double(low: f64, high: f64) -> ValueModel {
        ValueModel::new(Bounds::new(0.0, 100.0, 10.0), SliderValue::Double([low, high]))
    }

    #[test]
    fn clamp_rounds_up_to_next_step() {
        let model = single(0.0, 100.0, 10.0, 0.0);
        assert_eq!(model.clamp(47.0, None), 50.0);
        assert_eq!(model.clamp(40.0, None), 40.0);
        assert_eq!(model.clamp(40.5, None), 50.0);
    }

    #[test]
    fn clamp_toward_down_floors() {
        let model = single(0.0, 100.0, 10.0, 0.0);
        assert_eq!(model.clamp_toward(47.0, None, Rounding::Down), 40.0);
        assert_eq!(model.clamp_toward(50.0, None, Rounding::Down), 50.0);
    }

    #[test]
    fn clamp_keeps_fractional_steps_exact() {
        let model = single(0.0, 1.0, 0.1, 0.0);
        assert_eq!(model.accuracy(), 1);
        assert_eq!(model.clamp(0.1 + 0.2, None), 0.3);
        assert_eq!(model.clamp(0.31, None), 0.4);
        assert_eq!(format_value(model.clamp(0.7, None), model.accuracy()), "0.7");
    }

    #[test]
    fn clamp_respects_global_bounds() {
        let model = single(0.0, 100.0, 10.0, 0.0);
        assert_eq!(model.clamp(-20.0, None), 0.0);
        assert_eq!(model.clamp(250.0, None), 100.0);
    }

    #[test]
    fn off_grid_max_is_reachable_and_stable() {
        let model = single(0.0, 95.0, 10.0, 0.0);
        assert_eq!(model.clamp(93.0, None), 95.0);
        assert_eq!(model.clamp(95.0, None), 95.0);
    }

    #[test]
    fn zero_length_range_pins_every_value() {
        let model = single(5.0, 5.0, 1.0, 0.0);
        assert_eq!(model.get(0), Some(5.0));
        assert_eq!(model.clamp(-100.0, None), 5.0);
        assert_eq!(model.clamp(100.0, None), 5.0);
    }

    #[test]
    fn non_numeric_input_keeps_current_value() {
        let mut model = single(0.0, 100.0, 1.0, 42.0);
        assert_eq!(model.clamp(f64::NAN, None), 42.0);
        assert!(!model.set(f64::NAN, None));
        assert_eq!(model.get(0), Some(42.0));
    }

    #[test]
    fn set_reports_changes_only() {
        let mut model = single(0.0, 100.0, 10.0, 0.0);
        assert!(model.set(47.0, None));
        assert_eq!(model.get(0), Some(50.0));
        assert!(!model.set(42.0, None));
        assert_eq!(model.get(0), Some(50.0));
    }

    #[test]
    fn double_set_requires_index() {
        let mut model = double(20.0, 80.0);
        assert!(!model.set(50.0, None));
        assert_eq!(model.value(), SliderValue::Double([20.0, 80.0]));
        assert!(!model.set(50.0, Some(2)));
    }

    #[test]
    fn handles_never_cross() {
        let mut model = double(20.0, 80.0);
        assert!(model.set(95.0, Some(0)));
        assert_eq!(model.value(), SliderValue::Double([80.0, 80.0]));
        assert!(!model.set(10.0, Some(1)));
        assert_eq!(model.get(1), Some(80.0));
        assert!(model.set(0.0, Some(0)));
        assert!(model.set(10.0, Some(1)));
        assert_eq!(model.value(), SliderValue::Double([0.0, 10.0]));
    }

    #[test]
    fn stepping_halts_at_sibling() {
        let mut model = double(20.0, 80.0);
        for _ in 0..6 {
            model.step_by(1, Some(0));
        }
        assert_eq!(model.get(0), Some(80.0));
        assert!(!model.step_by(1, Some(0)));
        assert_eq!(model.get(0), Some(80.0));
    }

    #[test]
    fn handle_limit_clamps_independently_of_sibling() {
        let mut model = double(20.0, 100.0);
        model.set_limit(0, HandleLimit::new(10.0, 60.0));
        model.set(5.0, Some(0));
        assert_eq!(model.get(0), Some(10.0));
        model.set(90.0, Some(0));
        assert_eq!(model.get(0), Some(60.0));
    }

    #[test]
    fn ordering_wins_over_conflicting_limit() {
        let mut model = double(50.0, 70.0);
        model.set_limit(1, HandleLimit::at_most(30.0));
        model.set(20.0, Some(1));
        assert_eq!(model.value(), SliderValue::Double([50.0, 50.0]));
    }

    #[test]
    fn initial_values_are_normalized() {
        let model = double(90.0, 10.0);
        let SliderValue::Double([low, high]) = model.value() else {
            panic!("expected a double value");
        };
        assert!(low <= high);
        let model = single(0.0, 100.0, 10.0, 250.0);
        assert_eq!(model.get(0), Some(100.0));
    }

    #[test]
    fn pair_outside_the_range_is_pulled_inside() {
        let below = ValueModel::new(Bounds::new(0.0, 100.0, 1.0), SliderValue::Double([-50.0, -10.0]));
        assert_eq!(below.value(), SliderValue::Double([0.0, 0.0]));
        let above = ValueModel::new(Bounds::new(0.0, 100.0, 1.0), SliderValue::Double([150.0, 300.0]));
        assert_eq!(above.value(), SliderValue::Double([100.0, 100.0]));
    }

    #[test]
    fn moved_bounds_carry_both_handles_along() {
        let mut model = double(20.0, 80.0);
        model.set_bounds(Bounds::new(100.0, 200.0, 10.0));
        assert!(model.reapply());
        assert_eq!(model.value(), SliderValue::Double([100.0, 100.0]));

        let mut model = double(20.0, 80.0);
        model.set_bounds(Bounds::new(-200.0, -100.0, 10.0));
        model.reapply();
        assert_eq!(model.value(), SliderValue::Double([-100.0, -100.0]));
    }

    #[test]
    fn bounds_are_sanitized() {
        let bounds = Bounds::new(10.0, 0.0, -1.0);
        assert_eq!(bounds.min, 10.0);
        assert_eq!(bounds.max, 10.0);
        assert_eq!(bounds.step, DEFAULT_STEP);
        assert_eq!(Bounds::new(f64::NAN, f64::INFINITY, 2.0), Bounds::new(0.0, 100.0, 2.0));
    }

    #[test]
    fn text_boundary() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_pair("10,20"), Some([10.0, 20.0]));
        assert_eq!(parse_pair("10"), None);
        assert_eq!(format_value(-0.0, 0), "0");
        assert_eq!(SliderValue::Double([1.5, 2.0]).format(1), "1.5,2.0");
    }

    #[test]
    fn accuracy_follows_step_fraction() {
        assert_eq!(accuracy_of(0.1), 1);
        assert_eq!(accuracy_of(0.005), 3);
        assert_eq!(accuracy_of(1.0 / 3.0), MAX_ACCURACY);
    }
}
