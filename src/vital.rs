//! Bounded vital statistics.
//!
//! Every mutation clamps into `[0, max]`. Nothing here returns an error:
//! out-of-range requests are absorbed, and negative or non-finite amounts
//! are ignored outright.

use serde::{Deserialize, Serialize};

/// Fraction of the maximum at or below which a stat counts as low.
pub const WARNING_FRACTION: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VitalStatistic {
    max: u32,
    current: f32,
    decay_rate: f32,
}

impl VitalStatistic {
    /// Builds a stat at `initial`, clamped into range. A zero maximum is
    /// bumped to 1 so the range is never empty.
    pub fn new(max: u32, initial: f32, decay_rate: f32) -> Self {
        let max = max.max(1);
        let initial = if initial.is_finite() { initial } else { 0.0 };
        let decay_rate = if decay_rate.is_finite() {
            decay_rate.max(0.0)
        } else {
            0.0
        };
        Self {
            max,
            current: initial.clamp(0.0, max as f32),
            decay_rate,
        }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn decay_rate(&self) -> f32 {
        self.decay_rate
    }

    pub fn warning_threshold(&self) -> f32 {
        self.max as f32 * WARNING_FRACTION
    }

    pub fn increase(&mut self, amount: f32) {
        if !amount.is_finite() || amount < 0.0 {
            return;
        }
        self.current = (self.current + amount).min(self.max as f32);
    }

    pub fn decrease(&mut self, amount: f32) {
        if !amount.is_finite() || amount < 0.0 {
            return;
        }
        self.current = (self.current - amount).max(0.0);
    }

    pub fn decay(&mut self) {
        self.decrease(self.decay_rate);
    }

    pub fn set_to_max(&mut self) {
        self.current = self.max as f32;
    }

    pub fn is_below_warning_threshold(&self) -> bool {
        self.current <= self.warning_threshold()
    }

    pub fn is_zero(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max as f32
    }

    /// Current value as a share of the maximum, in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        self.current / self.max as f32
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_range(v: &VitalStatistic) -> bool {
        v.current() >= 0.0 && v.current() <= v.max() as f32
    }

    #[test]
    fn test_new_clamps_initial() {
        assert_eq!(VitalStatistic::new(100, 250.0, 1.0).current(), 100.0);
        assert_eq!(VitalStatistic::new(100, -4.0, 1.0).current(), 0.0);
        assert_eq!(VitalStatistic::new(100, f32::NAN, 1.0).current(), 0.0);
        assert_eq!(VitalStatistic::new(0, 5.0, 1.0).max(), 1);
        assert_eq!(VitalStatistic::new(10, 5.0, -3.0).decay_rate(), 0.0);
    }

    #[test]
    fn test_bounds_hold_for_any_amount() {
        let amounts = [0.0, 1.0, -1.0, 99.5, 1e9, -1e9, f32::MAX, f32::INFINITY, f32::NAN];
        let mut v = VitalStatistic::new(100, 50.0, 2.0);
        for a in amounts {
            v.increase(a);
            assert!(in_range(&v), "increase({a}) left {}", v.current());
            v.decrease(a);
            assert!(in_range(&v), "decrease({a}) left {}", v.current());
            v.decay();
            assert!(in_range(&v));
        }
    }

    #[test]
    fn test_zero_amounts_are_noops() {
        let mut v = VitalStatistic::new(100, 42.5, 1.0);
        v.increase(0.0);
        assert_eq!(v.current(), 42.5);
        v.decrease(0.0);
        assert_eq!(v.current(), 42.5);
    }

    #[test]
    fn test_negative_amounts_are_noops() {
        let mut v = VitalStatistic::new(100, 40.0, 1.0);
        v.increase(-10.0);
        assert_eq!(v.current(), 40.0);
        v.decrease(-10.0);
        assert_eq!(v.current(), 40.0);
    }

    #[test]
    fn test_increase_caps_at_max() {
        let mut v = VitalStatistic::new(80, 70.0, 1.0);
        v.increase(25.0);
        assert_eq!(v.current(), 80.0);
        assert!(v.is_full());
    }

    #[test]
    fn test_decay_floors_at_zero() {
        let mut v = VitalStatistic::new(100, 1.0, 1.5);
        v.decay();
        assert_eq!(v.current(), 0.0);
        assert!(v.is_zero());
        v.decay();
        assert_eq!(v.current(), 0.0);
    }

    #[test]
    fn test_warning_threshold_is_inclusive() {
        let mut v = VitalStatistic::new(100, 26.0, 1.0);
        assert!(!v.is_below_warning_threshold());
        v.decay();
        assert_eq!(v.warning_threshold(), 25.0);
        assert!(v.is_below_warning_threshold());
    }

    #[test]
    fn test_set_to_max() {
        let mut v = VitalStatistic::new(150, 0.0, 0.0);
        v.set_to_max();
        assert_eq!(v.current(), 150.0);
        assert!((v.fraction() - 1.0).abs() < f32::EPSILON);
    }
}
