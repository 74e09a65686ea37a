//! Per-frame telemetry aggregation for the onroad overlay.
//!
//! `TelemetryAggregator` is the single stateful component between the scene
//! provider and the renderer. Once per frame it consumes a [`SceneSample`]
//! and produces a [`DisplayState`]: which frame regions to color, what text
//! to show, and whether any of it warrants a repaint.
//!
//! The aggregator never panics and performs no I/O. Bad input (NaN angles,
//! negative frame rates) is clamped or ignored field by field, so the render
//! path on the other side of this boundary never needs a recovery story.
//!
//! It is single-threaded: one instance per render loop, invoked
//! synchronously. Callers that want to share one across threads must
//! serialize access themselves.
//!
//! # Repaint Contract
//!
//! `DisplayState::changed` is true when the frame background color differs
//! from the previous frame, or when any overlay feature is live this frame.
//! A live feature forces a repaint every frame while it is active, value
//! change or not, because its pixels animate continuously. With everything
//! disabled and a steady status, `changed` stays false and the renderer can
//! skip the frame entirely.

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::blink::SignalBlink;
use crate::colors::{SIGNAL_YELLOW, TRAFFIC_RED};
use crate::fps::FpsWindow;
use crate::metrics::{FPS_LINE_CAP, METRICS_LINE_CAP, compose_fps_line, compose_metrics_line};
use crate::scene::SceneSample;
use crate::smoothing::SteeringSmoother;

// =============================================================================
// Display State
// =============================================================================

/// Which screen edge a bottom-anchored element attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenSide {
    Left,
    Right,
}

/// Steering strip to paint on one screen edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringBorder {
    /// Visible portion of the strip as a fraction of the screen height, 0..1.
    pub fraction: f32,
    /// Edge selected by the sign of the raw steering angle.
    pub side: ScreenSide,
}

/// Fill colors for the two frame halves of the blind-spot highlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideColors {
    pub left: Rgb565,
    pub right: Rgb565,
}

/// Per-side turn-signal fills. A side is painted only while its signal flag
/// is set; `None` leaves that half untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalPaint {
    pub left: Option<Rgb565>,
    pub right: Option<Rgb565>,
}

/// Everything the renderer needs for one frame.
///
/// Recomputed on every `ingest`. Absent options mean the feature is disabled
/// or has nothing to show this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    /// Frame background color for the current drive status.
    pub bg: Rgb565,
    /// Steering strip, when the feature is on and the angle is non-zero.
    pub steering: Option<SteeringBorder>,
    /// Blind-spot half fills, when the feature is on and a side is occupied.
    pub blind_spot: Option<SideColors>,
    /// Turn-signal half fills, when the feature is on and a signal is set.
    pub signals: Option<SignalPaint>,
    /// Metrics summary line, empty when nothing contributes.
    pub metrics_line: String<METRICS_LINE_CAP>,
    /// FPS summary line, when the feature is on.
    pub fps_line: Option<String<FPS_LINE_CAP>>,
    /// Whether this frame warrants a repaint.
    pub changed: bool,
}

// =============================================================================
// Telemetry Aggregator
// =============================================================================

/// Aggregates scene samples into display state, one call per frame.
pub struct TelemetryAggregator {
    steering: SteeringSmoother,
    blink: SignalBlink,
    fps: FpsWindow,
    /// Running maximum acceleration in raw m/s², tracked while the jerk
    /// metrics are enabled. Converted for display at format time.
    max_acceleration: f32,
    /// Frames ingested since creation or the last reset.
    frame: u32,
    /// Background color of the previous frame, for change detection.
    /// `None` on the first frame so it always repaints.
    prev_bg: Option<Rgb565>,
}

impl TelemetryAggregator {
    /// Create an aggregator with all accumulators at their defaults.
    pub const fn new() -> Self {
        Self {
            steering: SteeringSmoother::new(),
            blink: SignalBlink::new(),
            fps: FpsWindow::new(),
            max_acceleration: 0.0,
            frame: 0,
            prev_bg: None,
        }
    }

    /// Consume one scene sample and produce the frame's display state.
    pub fn ingest(&mut self, sample: &SceneSample) -> DisplayState {
        let frame = self.frame;
        self.frame = self.frame.wrapping_add(1);

        let bg = sample.status.bg_color();
        let mut changed = self.prev_bg != Some(bg);
        self.prev_bg = Some(bg);

        // Aggregate gates: the side-dependent features only count as live
        // when a side is actually active.
        let blind_spot_live = sample.show_blind_spot && (sample.blind_spot_left || sample.blind_spot_right);
        let signal_live = sample.show_signal && (sample.turn_signal_left || sample.turn_signal_right);

        if blind_spot_live
            || sample.show_fps
            || (sample.show_jerk && sample.has_lead)
            || signal_live
            || sample.show_steering
            || sample.show_tuning
        {
            changed = true;
        }

        let steering = self.update_steering(sample);
        let blind_spot = blind_spot_live.then(|| SideColors {
            left: if sample.blind_spot_left { TRAFFIC_RED } else { bg },
            right: if sample.blind_spot_right { TRAFFIC_RED } else { bg },
        });
        let signals = signal_live.then(|| self.update_signals(frame, sample, bg));

        if sample.show_jerk && sample.acceleration.is_finite() {
            self.max_acceleration = self.max_acceleration.max(sample.acceleration);
        }
        let metrics_line = compose_metrics_line(sample, self.max_acceleration);

        let fps_line = if sample.show_fps {
            let stats = self.fps.insert(sample.timestamp_ms, sample.fps);
            Some(compose_fps_line(&stats))
        } else {
            None
        };

        DisplayState {
            bg,
            steering,
            blind_spot,
            signals,
            metrics_line,
            fps_line,
            changed,
        }
    }

    /// Advance the steering smoother and derive the strip, if any.
    ///
    /// The smoother runs whenever the feature is on, so the strip height is
    /// already settled when the angle next leaves zero.
    fn update_steering(&mut self, sample: &SceneSample) -> Option<SteeringBorder> {
        if !sample.show_steering {
            return None;
        }

        let smoothed = self.steering.apply(sample.steer);

        if sample.steering_angle_deg == 0.0 || !sample.steering_angle_deg.is_finite() {
            return None;
        }

        Some(SteeringBorder {
            fraction: smoothed.abs().clamp(0.0, 1.0),
            side: if sample.steering_angle_deg < 0.0 {
                ScreenSide::Left
            } else {
                ScreenSide::Right
            },
        })
    }

    /// Advance the blink counters and pick the per-side signal colors.
    ///
    /// Priority per side: flash color while the countdown runs, blind-spot
    /// warning when the adjacent lane is occupied, frame background
    /// otherwise.
    fn update_signals(&mut self, frame: u32, sample: &SceneSample, bg: Rgb565) -> SignalPaint {
        let activity = self.blink.update(
            frame,
            sample.turn_signal_left,
            sample.turn_signal_right,
            sample.blind_spot_left,
            sample.blind_spot_right,
        );

        let side_color = |flashing: bool, blind_spot: bool| {
            if flashing {
                SIGNAL_YELLOW
            } else if blind_spot {
                TRAFFIC_RED
            } else {
                bg
            }
        };

        SignalPaint {
            left: sample
                .turn_signal_left
                .then(|| side_color(activity.left_flashing, sample.blind_spot_left)),
            right: sample
                .turn_signal_right
                .then(|| side_color(activity.right_flashing, sample.blind_spot_right)),
        }
    }

    /// Return every accumulator to its initial state.
    ///
    /// Used on mode transitions, e.g. when the overlay comes back after
    /// being offroad.
    pub fn reset(&mut self) {
        self.steering.reset();
        self.blink.reset();
        self.fps.reset();
        self.max_acceleration = 0.0;
        self.frame = 0;
        self.prev_bg = None;
    }

    // -------------------------------------------------------------------------
    // Introspection (debug page)
    // -------------------------------------------------------------------------

    /// Frames ingested since creation or the last reset.
    #[inline]
    pub const fn frame_count(&self) -> u32 {
        self.frame
    }

    /// Running maximum acceleration in raw m/s².
    #[inline]
    pub const fn max_acceleration(&self) -> f32 {
        self.max_acceleration
    }

    /// Current smoothed steering torque fraction.
    #[inline]
    pub const fn smoothed_steer(&self) -> f32 {
        self.steering.value()
    }

    /// Current turn-signal countdowns `(left, right)`.
    #[inline]
    pub const fn signal_frames(&self) -> (u32, u32) {
        self.blink.frames()
    }

    /// Number of samples inside the FPS window.
    #[inline]
    pub fn fps_sample_count(&self) -> usize {
        self.fps.len()
    }
}

impl Default for TelemetryAggregator {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneSample;
    use crate::status::DriveStatus;

    #[test]
    fn test_first_frame_always_repaints() {
        let mut agg = TelemetryAggregator::new();
        let state = agg.ingest(&SceneSample::default());
        assert!(state.changed, "First frame must repaint to establish the background");
    }

    #[test]
    fn test_steady_inert_input_stops_repainting() {
        let mut agg = TelemetryAggregator::new();
        agg.ingest(&SceneSample::default());
        let state = agg.ingest(&SceneSample::default());
        assert!(!state.changed, "Nothing enabled and steady status must not repaint");
        assert!(state.steering.is_none());
        assert!(state.blind_spot.is_none());
        assert!(state.signals.is_none());
        assert!(state.metrics_line.is_empty());
        assert!(state.fps_line.is_none());
    }

    #[test]
    fn test_background_change_alone_repaints() {
        let mut agg = TelemetryAggregator::new();
        agg.ingest(&SceneSample::default());
        agg.ingest(&SceneSample::default());
        let engaged = SceneSample {
            status: DriveStatus::Engaged,
            ..SceneSample::default()
        };
        let state = agg.ingest(&engaged);
        assert!(state.changed, "A status color change alone must set the repaint flag");
        assert_eq!(state.bg, DriveStatus::Engaged.bg_color());
    }

    #[test]
    fn test_live_steering_repaints_every_frame() {
        // Steering enabled with the angle alternating between 0 and 5
        // degrees: the feature gate keeps the repaint flag up on every
        // frame, including the zero-angle ones.
        let mut agg = TelemetryAggregator::new();
        for i in 0..20 {
            let sample = SceneSample {
                show_steering: true,
                steering_angle_deg: if i % 2 == 0 { 0.0 } else { 5.0 },
                steer: 0.05,
                ..SceneSample::default()
            };
            let state = agg.ingest(&sample);
            assert!(state.changed, "Frame {i}: an enabled steering display must repaint");
        }
    }

    #[test]
    fn test_zero_angle_suppresses_strip() {
        let mut agg = TelemetryAggregator::new();
        let sample = SceneSample {
            show_steering: true,
            steering_angle_deg: 0.0,
            steer: 0.4,
            ..SceneSample::default()
        };
        let state = agg.ingest(&sample);
        assert!(state.steering.is_none(), "Angle of exactly 0 must not paint a strip");
    }

    #[test]
    fn test_angle_sign_selects_edge() {
        let mut agg = TelemetryAggregator::new();
        let left = agg.ingest(&SceneSample {
            show_steering: true,
            steering_angle_deg: -12.0,
            steer: -0.2,
            ..SceneSample::default()
        });
        assert_eq!(left.steering.unwrap().side, ScreenSide::Left);

        let right = agg.ingest(&SceneSample {
            show_steering: true,
            steering_angle_deg: 12.0,
            steer: 0.2,
            ..SceneSample::default()
        });
        assert_eq!(right.steering.unwrap().side, ScreenSide::Right);
    }

    #[test]
    fn test_steering_fraction_is_clamped() {
        let mut agg = TelemetryAggregator::new();
        let mut state = None;
        for _ in 0..200 {
            state = Some(agg.ingest(&SceneSample {
                show_steering: true,
                steering_angle_deg: 30.0,
                steer: 3.0, // out of the nominal -1..1 range
                ..SceneSample::default()
            }));
        }
        let border = state.unwrap().steering.unwrap();
        assert_eq!(border.fraction, 1.0, "Out-of-range torque must clamp the strip to full height");
    }

    #[test]
    fn test_blind_spot_requires_an_active_side() {
        let mut agg = TelemetryAggregator::new();
        let armed = SceneSample {
            show_blind_spot: true,
            ..SceneSample::default()
        };
        agg.ingest(&armed);
        let state = agg.ingest(&armed);
        assert!(state.blind_spot.is_none(), "Feature flag alone must not paint the halves");
        assert!(!state.changed, "Idle blind-spot monitoring must not force repaints");

        let active = SceneSample {
            blind_spot_left: true,
            ..armed
        };
        let state = agg.ingest(&active);
        let colors = state.blind_spot.expect("occupied lane paints the halves");
        assert_eq!(colors.left, TRAFFIC_RED);
        assert_eq!(colors.right, state.bg, "Clear side shows the plain background");
        assert!(state.changed);
    }

    #[test]
    fn test_signal_paints_only_flagged_sides() {
        let mut agg = TelemetryAggregator::new();
        let sample = SceneSample {
            show_signal: true,
            turn_signal_left: true,
            ..SceneSample::default()
        };
        let state = agg.ingest(&sample); // frame 0: countdown re-arms
        let paint = state.signals.expect("active signal produces paint");
        assert_eq!(paint.left, Some(SIGNAL_YELLOW), "Armed countdown flashes the left half");
        assert_eq!(paint.right, None, "Side without a signal stays untouched");
    }

    #[test]
    fn test_signal_with_blind_spot_shows_warning_between_flashes() {
        let mut agg = TelemetryAggregator::new();
        let sample = SceneSample {
            show_signal: true,
            turn_signal_left: true,
            blind_spot_left: true,
            ..SceneSample::default()
        };
        // Frame 0 loads the conflict countdown (5). Run it dry.
        let mut saw_warning = false;
        for _ in 0..8 {
            let state = agg.ingest(&sample);
            let paint = state.signals.expect("signal stays live");
            if paint.left == Some(TRAFFIC_RED) {
                saw_warning = true;
            }
        }
        assert!(
            saw_warning,
            "With the countdown expired the occupied side must show the blind-spot warning"
        );
    }

    #[test]
    fn test_jerk_gate_needs_lead_for_repaint() {
        let mut agg = TelemetryAggregator::new();
        let no_lead = SceneSample {
            show_jerk: true,
            has_lead: false,
            acceleration: 1.0,
            ..SceneSample::default()
        };
        agg.ingest(&no_lead);
        let state = agg.ingest(&no_lead);
        assert!(!state.changed, "Jerk metrics without a lead do not force repaints");
        assert!(
            !state.metrics_line.is_empty(),
            "The metrics text itself still renders without a lead"
        );

        let with_lead = SceneSample {
            has_lead: true,
            ..no_lead
        };
        let state = agg.ingest(&with_lead);
        assert!(state.changed, "Jerk metrics with a lead force repaints");
    }

    #[test]
    fn test_max_acceleration_is_monotone_and_reported() {
        let mut agg = TelemetryAggregator::new();
        let base = SceneSample {
            show_jerk: true,
            accel_unit: "units",
            ..SceneSample::default()
        };
        agg.ingest(&SceneSample { acceleration: 2.0, ..base });
        agg.ingest(&SceneSample { acceleration: 3.5, ..base });
        let state = agg.ingest(&SceneSample { acceleration: 1.0, ..base });
        assert_eq!(agg.max_acceleration(), 3.5);
        assert!(
            state.metrics_line.as_str().contains("Max: 3.5 units"),
            "Metrics line must report the running maximum, got: {}",
            state.metrics_line
        );
    }

    #[test]
    fn test_max_acceleration_ignores_disabled_frames_and_nan() {
        let mut agg = TelemetryAggregator::new();
        agg.ingest(&SceneSample {
            acceleration: 9.0, // jerk metrics off: not tracked
            ..SceneSample::default()
        });
        assert_eq!(agg.max_acceleration(), 0.0);

        agg.ingest(&SceneSample {
            show_jerk: true,
            acceleration: f32::NAN,
            ..SceneSample::default()
        });
        assert_eq!(agg.max_acceleration(), 0.0, "NaN must not poison the running maximum");
    }

    #[test]
    fn test_fps_line_present_only_when_enabled() {
        let mut agg = TelemetryAggregator::new();
        let state = agg.ingest(&SceneSample {
            show_fps: true,
            fps: 50.0,
            timestamp_ms: 1000,
            ..SceneSample::default()
        });
        let line = state.fps_line.expect("FPS line renders when enabled");
        assert_eq!(line.as_str(), "FPS: 50 | Min: 50 | Max: 50 | Avg: 50");

        let state = agg.ingest(&SceneSample::default());
        assert!(state.fps_line.is_none(), "FPS line disappears when disabled");
    }

    #[test]
    fn test_disabled_fps_frames_do_not_feed_the_window() {
        let mut agg = TelemetryAggregator::new();
        agg.ingest(&SceneSample {
            fps: 10.0,
            timestamp_ms: 0,
            ..SceneSample::default()
        });
        let state = agg.ingest(&SceneSample {
            show_fps: true,
            fps: 50.0,
            timestamp_ms: 1000,
            ..SceneSample::default()
        });
        let line = state.fps_line.unwrap();
        assert_eq!(
            line.as_str(),
            "FPS: 50 | Min: 50 | Max: 50 | Avg: 50",
            "Samples from disabled frames must not appear in the stats"
        );
        assert_eq!(agg.fps_sample_count(), 1);
    }

    #[test]
    fn test_ingest_never_panics_on_hostile_input() {
        let mut agg = TelemetryAggregator::new();
        let hostile = SceneSample {
            show_steering: true,
            show_blind_spot: true,
            show_signal: true,
            show_jerk: true,
            show_tuning: true,
            show_fps: true,
            steer: f32::NAN,
            steering_angle_deg: f32::INFINITY,
            acceleration: f32::NEG_INFINITY,
            acceleration_jerk: f32::NAN,
            acceleration_jerk_delta: f32::NAN,
            speed_jerk: f32::INFINITY,
            speed_jerk_delta: f32::NEG_INFINITY,
            friction: f32::NAN,
            lat_accel: f32::NAN,
            fps: f32::NAN,
            turn_signal_left: true,
            blind_spot_right: true,
            has_lead: true,
            live_valid: true,
            ..SceneSample::default()
        };
        let state = agg.ingest(&hostile);
        assert!(state.steering.is_none(), "Non-finite angle must suppress the strip");
        assert!(!state.metrics_line.as_str().contains("NaN"), "No NaN may reach the display");
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut agg = TelemetryAggregator::new();
        let busy = SceneSample {
            show_steering: true,
            show_jerk: true,
            show_fps: true,
            show_signal: true,
            turn_signal_left: true,
            steer: 0.5,
            steering_angle_deg: 10.0,
            acceleration: 4.0,
            fps: 50.0,
            timestamp_ms: 500,
            status: DriveStatus::Engaged,
            ..SceneSample::default()
        };
        for _ in 0..10 {
            agg.ingest(&busy);
        }
        agg.reset();

        assert_eq!(agg.frame_count(), 0);
        assert_eq!(agg.max_acceleration(), 0.0);
        assert_eq!(agg.smoothed_steer(), 0.0);
        assert_eq!(agg.signal_frames(), (0, 0));
        assert_eq!(agg.fps_sample_count(), 0);

        let state = agg.ingest(&SceneSample::default());
        assert!(state.changed, "The frame after a reset must repaint");
    }
}
