//! Drive status and the frame color it selects.
//!
//! The whole screen border is tinted by the current control state, so the
//! driver can read engagement at a glance without focusing on any widget.
//! The steering strip reuses the same palette as a vertical gradient.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{
    DISENGAGED_SLATE, ENGAGED_GREEN, EXPERIMENTAL_ORANGE, OVERRIDE_GRAY, SIGNAL_YELLOW, TRAFFIC_RED,
};

/// Control state of the driver-assistance system, as resolved upstream.
///
/// Only the mapping to a frame color matters here. State transitions are the
/// scene provider's business.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum DriveStatus {
    /// System off or not yet engaged.
    #[default]
    Disengaged,

    /// Lateral and longitudinal control active.
    Engaged,

    /// Driver input is overriding the controller.
    Overriding,

    /// Experimental longitudinal mode active.
    ExperimentalMode,

    /// Traffic mode active (dense low-speed traffic profile).
    TrafficMode,

    /// A conditional policy decision was manually overridden.
    ConditionalOverridden,
}

impl DriveStatus {
    /// Frame background color for this status.
    #[inline]
    pub const fn bg_color(self) -> Rgb565 {
        match self {
            Self::Disengaged => DISENGAGED_SLATE,
            Self::Engaged => ENGAGED_GREEN,
            Self::Overriding => OVERRIDE_GRAY,
            Self::ExperimentalMode => EXPERIMENTAL_ORANGE,
            Self::TrafficMode => TRAFFIC_RED,
            Self::ConditionalOverridden => SIGNAL_YELLOW,
        }
    }

    /// Cycle to the next status. Used by the simulator's status key.
    pub const fn cycle(self) -> Self {
        match self {
            Self::Disengaged => Self::Engaged,
            Self::Engaged => Self::Overriding,
            Self::Overriding => Self::ExperimentalMode,
            Self::ExperimentalMode => Self::TrafficMode,
            Self::TrafficMode => Self::ConditionalOverridden,
            Self::ConditionalOverridden => Self::Disengaged,
        }
    }

    /// Short uppercase name for the debug page.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Disengaged => "DISENGAGED",
            Self::Engaged => "ENGAGED",
            Self::Overriding => "OVERRIDE",
            Self::ExperimentalMode => "EXPERIMENTAL",
            Self::TrafficMode => "TRAFFIC",
            Self::ConditionalOverridden => "OVERRIDDEN",
        }
    }
}

// =============================================================================
// Steering Strip Gradient
// =============================================================================

/// Color stops of the steering strip, as fractions of the full screen height
/// measured from the top. The strip itself is bottom-anchored and only its
/// visible portion is painted, so the lower (green) stops dominate at small
/// steering angles and the red top only appears near full lock.
pub const STEERING_GRADIENT: [(f32, Rgb565); 5] = [
    (0.0, TRAFFIC_RED),
    (0.15, EXPERIMENTAL_ORANGE),
    (0.5, SIGNAL_YELLOW),
    (0.85, ENGAGED_GREEN),
    (1.0, ENGAGED_GREEN),
];

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status() {
        assert_eq!(DriveStatus::default(), DriveStatus::Disengaged);
    }

    #[test]
    fn test_cycle_visits_every_status_once() {
        let mut status = DriveStatus::Disengaged;
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(status);
            status = status.cycle();
        }
        assert_eq!(status, DriveStatus::Disengaged, "Cycle should wrap around after 6 steps");
        seen.sort_by_key(|s| s.name());
        seen.dedup();
        assert_eq!(seen.len(), 6, "Cycle should visit all 6 statuses");
    }

    #[test]
    fn test_each_status_has_distinct_color() {
        let colors = [
            DriveStatus::Disengaged.bg_color(),
            DriveStatus::Engaged.bg_color(),
            DriveStatus::Overriding.bg_color(),
            DriveStatus::ExperimentalMode.bg_color(),
            DriveStatus::TrafficMode.bg_color(),
            DriveStatus::ConditionalOverridden.bg_color(),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b, "Status colors must be distinguishable");
            }
        }
    }

    #[test]
    fn test_gradient_stops_ascend() {
        for pair in STEERING_GRADIENT.windows(2) {
            assert!(pair[0].0 <= pair[1].0, "Gradient stops must be in ascending order");
        }
        assert_eq!(STEERING_GRADIENT[0].0, 0.0, "Gradient must start at the top");
        assert_eq!(STEERING_GRADIENT[STEERING_GRADIENT.len() - 1].0, 1.0, "Gradient must end at the bottom");
    }
}
