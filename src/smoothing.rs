//! Steering torque smoothing for the border strip.
//!
//! The raw steering torque fraction jitters frame to frame, which would make
//! the strip height flicker. An exponential moving average (new sample weight
//! 0.1) keeps the strip steady while still tracking sweeps.
//!
//! A plain EMA never quite reaches a constant input, leaving a permanent
//! residual against the raw value. Once the average comes within
//! `STEER_SNAP_EPSILON` of the raw sample it snaps to it exactly.
//!
//! The snap comparison uses the signed raw value while the average is fed the
//! magnitude, matching the stock overlay. After a snap to a negative input the
//! next update blends from that negative value.

// =============================================================================
// Smoothing Constants
// =============================================================================

/// Weight of the newest sample in the exponential moving average.
pub const STEER_EMA_ALPHA: f32 = 0.1;

/// Distance from the raw value at which the average snaps to it exactly.
pub const STEER_SNAP_EPSILON: f32 = 0.01;

// =============================================================================
// Steering Smoother
// =============================================================================

/// Exponential moving average over the steering torque fraction.
///
/// Call `apply()` once per frame. Never panics: a non-finite sample leaves
/// the previous smoothed value in place.
pub struct SteeringSmoother {
    smoothed: f32,
}

impl SteeringSmoother {
    /// Create a smoother at rest.
    pub const fn new() -> Self {
        Self { smoothed: 0.0 }
    }

    /// Feed one raw torque sample and return the updated smoothed value.
    pub fn apply(&mut self, raw: f32) -> f32 {
        if !raw.is_finite() {
            return self.smoothed;
        }

        self.smoothed = STEER_EMA_ALPHA.mul_add(raw.abs(), (1.0 - STEER_EMA_ALPHA) * self.smoothed);

        if (self.smoothed - raw).abs() < STEER_SNAP_EPSILON {
            self.smoothed = raw;
        }

        self.smoothed
    }

    /// Current smoothed value without feeding a sample.
    #[inline]
    pub const fn value(&self) -> f32 {
        self.smoothed
    }

    /// Return the smoother to its initial state.
    pub const fn reset(&mut self) {
        self.smoothed = 0.0;
    }
}

impl Default for SteeringSmoother {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
