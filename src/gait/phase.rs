//! Cyclic phase shifting of leg trajectories.
use alloc::vec::Vec;

/// Rotate `samples` left by `shift`: `[k, k+1, .., len-1, 0, .., k-1]`.
///
/// `shift` is taken modulo the length, so every sample appears exactly once.
pub fn rotate<T: Clone>(samples: &[T], shift: usize) -> Vec<T> {
    if samples.is_empty() {
        return Vec::new();
    }
    let k = shift % samples.len();
    let mut rotated = Vec::with_capacity(samples.len());
    rotated.extend_from_slice(&samples[k..]);
    rotated.extend_from_slice(&samples[..k]);
    rotated
}

/// Fraction of a gait cycle a leg lags behind the reference leg.
///
/// The shift for a cycle of `len` samples is `numerator * (len / denominator)`
/// in integer samples, so a three-quarter offset is three whole quarter
/// offsets even when `len` is not a multiple of four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhaseOffset {
    pub numerator: usize,
    pub denominator: usize,
}

impl PhaseOffset {
    pub const ZERO: PhaseOffset = PhaseOffset::new(0, 1);
    pub const QUARTER: PhaseOffset = PhaseOffset::new(1, 4);
    pub const HALF: PhaseOffset = PhaseOffset::new(1, 2);
    pub const THREE_QUARTERS: PhaseOffset = PhaseOffset::new(3, 4);

    pub const fn new(numerator: usize, denominator: usize) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Shift in samples for a cycle of `len` samples, always `< len`.
    pub fn shift(self, len: usize) -> usize {
        if len == 0 || self.denominator == 0 {
            return 0;
        }
        (self.numerator * (len / self.denominator)) % len
    }
}
