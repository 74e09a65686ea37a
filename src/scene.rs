//! Per-frame scene sample consumed by the telemetry aggregator.
//!
//! One `SceneSample` is produced for every rendered frame by whatever feeds
//! the overlay (the simulator's fake signal generators here, the vehicle
//! state publisher on a real device). It is an immutable snapshot: the
//! aggregator reads it once and discards it.
//!
//! The enable flags arrive pre-resolved. Settings storage, toggle hierarchy,
//! and persistence are upstream concerns; by the time a sample reaches the
//! aggregator every flag is a plain bool.

use crate::status::DriveStatus;

// =============================================================================
// Display Units
// =============================================================================

/// Acceleration unit label for metric display.
pub const METRIC_ACCEL_UNIT: &str = "m/s²";

/// Acceleration unit label for imperial display.
pub const IMPERIAL_ACCEL_UNIT: &str = "ft/s²";

/// Conversion factor applied to raw m/s² values for metric display.
pub const METRIC_ACCEL_CONVERSION: f32 = 1.0;

/// Conversion factor applied to raw m/s² values for imperial display.
pub const IMPERIAL_ACCEL_CONVERSION: f32 = 3.28084;

// =============================================================================
// Scene Sample
// =============================================================================

/// One frame's worth of vehicle and sensor-derived values.
///
/// All floats are raw sensor-space values; display conversion happens at
/// format time using `accel_conversion` / `accel_unit`.
#[derive(Clone, Copy, Debug)]
pub struct SceneSample {
    /// Monotonically non-decreasing timestamp of this frame, in milliseconds.
    pub timestamp_ms: u64,

    // -------------------------------------------------------------------------
    // Longitudinal values
    // -------------------------------------------------------------------------
    /// Current acceleration in m/s².
    pub acceleration: f32,
    /// Longitudinal jerk derived from acceleration.
    pub acceleration_jerk: f32,
    /// Change in acceleration jerk since the previous window.
    pub acceleration_jerk_delta: f32,
    /// Longitudinal jerk derived from speed.
    pub speed_jerk: f32,
    /// Change in speed jerk since the previous window.
    pub speed_jerk_delta: f32,
    /// Whether a lead vehicle is currently tracked.
    pub has_lead: bool,

    // -------------------------------------------------------------------------
    // Lateral values
    // -------------------------------------------------------------------------
    /// Steering torque fraction, nominally -1..1.
    pub steer: f32,
    /// Signed steering wheel angle in degrees. Sign selects the screen edge
    /// for the steering strip; exactly 0 suppresses it.
    pub steering_angle_deg: f32,
    /// Friction coefficient estimate from the live tuning estimator.
    pub friction: f32,
    /// Lateral acceleration estimate from the live tuning estimator.
    pub lat_accel: f32,
    /// Whether the live tuning estimator has converged on valid values.
    pub live_valid: bool,

    // -------------------------------------------------------------------------
    // Surroundings
    // -------------------------------------------------------------------------
    /// Object detected in the adjacent left lane.
    pub blind_spot_left: bool,
    /// Object detected in the adjacent right lane.
    pub blind_spot_right: bool,
    /// Left turn signal engaged.
    pub turn_signal_left: bool,
    /// Right turn signal engaged.
    pub turn_signal_right: bool,

    // -------------------------------------------------------------------------
    // System state
    // -------------------------------------------------------------------------
    /// Instantaneous UI frame rate as measured by the render loop.
    pub fps: f32,
    /// Resolved control state, selects the frame background color.
    pub status: DriveStatus,

    // -------------------------------------------------------------------------
    // Display settings (resolved upstream)
    // -------------------------------------------------------------------------
    /// Conversion factor for displayed acceleration values.
    pub accel_conversion: f32,
    /// Unit label for displayed acceleration values.
    pub accel_unit: &'static str,

    // -------------------------------------------------------------------------
    // Feature enable flags (resolved upstream)
    // -------------------------------------------------------------------------
    /// Show the smoothed steering strip on the frame edge.
    pub show_steering: bool,
    /// Color the frame half over an occupied adjacent lane.
    pub show_blind_spot: bool,
    /// Flash the frame half on the side of an active turn signal.
    pub show_signal: bool,
    /// Show acceleration and jerk phrases in the metrics line.
    pub show_jerk: bool,
    /// Show friction / lateral-acceleration phrases in the metrics line.
    pub show_tuning: bool,
    /// Show the FPS summary line.
    pub show_fps: bool,
}

impl Default for SceneSample {
    fn default() -> Self {
        Self {
            timestamp_ms: 0,
            acceleration: 0.0,
            acceleration_jerk: 0.0,
            acceleration_jerk_delta: 0.0,
            speed_jerk: 0.0,
            speed_jerk_delta: 0.0,
            has_lead: false,
            steer: 0.0,
            steering_angle_deg: 0.0,
            friction: 0.0,
            lat_accel: 0.0,
            live_valid: false,
            blind_spot_left: false,
            blind_spot_right: false,
            turn_signal_left: false,
            turn_signal_right: false,
            fps: 0.0,
            status: DriveStatus::Disengaged,
            accel_conversion: METRIC_ACCEL_CONVERSION,
            accel_unit: METRIC_ACCEL_UNIT,
            show_steering: false,
            show_blind_spot: false,
            show_signal: false,
            show_jerk: false,
            show_tuning: false,
            show_fps: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sample_is_inert() {
        let sample = SceneSample::default();
        assert!(
            !sample.show_steering
                && !sample.show_blind_spot
                && !sample.show_signal
                && !sample.show_jerk
                && !sample.show_tuning
                && !sample.show_fps,
            "Default sample should have every feature disabled"
        );
        assert_eq!(sample.status, DriveStatus::Disengaged);
        assert_eq!(sample.accel_unit, METRIC_ACCEL_UNIT);
    }

    #[test]
    fn test_imperial_conversion_factor() {
        // 1 m/s² is about 3.28 ft/s²
        assert!((IMPERIAL_ACCEL_CONVERSION - 3.28).abs() < 0.01);
    }
}
