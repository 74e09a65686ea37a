//! Text composition for the overlay's metric summary lines.
//!
//! Two lines of text ride on top of the road view:
//!
//! - the metrics line (top center): acceleration with its running maximum,
//!   the two jerk readouts, and the live tuning estimates, joined by `" | "`
//!   in that priority order with the trailing delimiter trimmed
//! - the FPS line (bottom center): current / min / max / windowed average,
//!   all rounded to the nearest integer
//!
//! All formatting goes through `heapless::String` with `core::fmt::Write`,
//! no heap allocation.
//!
//! Jerk values display as truncated integers. A non-zero delta is appended in
//! parentheses; both delta directions render with a leading minus, keeping
//! the stock readout's convention.

use core::fmt::Write;

use heapless::String;

use crate::fps::FpsStats;
use crate::scene::SceneSample;

// =============================================================================
// Buffer Capacities
// =============================================================================

/// Capacity of the metrics line. The longest line (all phrases present,
/// multi-byte unit glyphs) stays under 160 bytes.
pub const METRICS_LINE_CAP: usize = 192;

/// Capacity of the FPS line.
pub const FPS_LINE_CAP: usize = 48;

/// Delimiter between metric phrases.
const DELIMITER: &str = " | ";

// =============================================================================
// Metrics Line
// =============================================================================

/// Compose the metrics line for one frame.
///
/// `max_acceleration` is the aggregator's running maximum in raw m/s²;
/// both it and the current acceleration are converted for display here.
/// Returns an empty string when no contributing feature is enabled.
pub fn compose_metrics_line(sample: &SceneSample, max_acceleration: f32) -> String<METRICS_LINE_CAP> {
    let mut line: String<METRICS_LINE_CAP> = String::new();

    if sample.show_jerk {
        let accel = finite_or_zero(sample.acceleration) * sample.accel_conversion;
        let max_accel = finite_or_zero(max_acceleration) * sample.accel_conversion;
        let _ = write!(
            line,
            "Acceleration: {accel:.1} {unit} - Max: {max_accel:.1} {unit}{DELIMITER}",
            unit = sample.accel_unit,
        );

        append_jerk_info(
            &mut line,
            "Acceleration Jerk",
            sample.acceleration_jerk as i32,
            sample.acceleration_jerk_delta as i32,
        );
        append_jerk_info(&mut line, "Speed Jerk", sample.speed_jerk as i32, sample.speed_jerk_delta as i32);
    }

    if sample.show_tuning {
        if sample.live_valid {
            let _ = write!(
                line,
                "Friction: {:.3}{DELIMITER}Lateral Acceleration: {:.3}",
                finite_or_zero(sample.friction),
                finite_or_zero(sample.lat_accel),
            );
        } else {
            let _ = line.push_str("Friction: Calculating...");
            let _ = line.push_str(DELIMITER);
            let _ = line.push_str("Lateral Acceleration: Calculating...");
        }
    }

    trim_trailing_delimiter(&mut line);
    line
}

/// Append one jerk phrase followed by the delimiter.
fn append_jerk_info<const N: usize>(line: &mut String<N>, label: &str, value: i32, delta: i32) {
    let _ = write!(line, "{label}: {value}");
    if delta != 0 {
        if delta > 0 {
            let _ = write!(line, " (-{delta})");
        } else {
            let _ = write!(line, " ({delta})");
        }
    }
    let _ = line.push_str(DELIMITER);
}

/// Remove one trailing `" | "` left over by phrase composition.
fn trim_trailing_delimiter<const N: usize>(line: &mut String<N>) {
    if line.as_str().ends_with(DELIMITER) {
        line.truncate(line.len() - DELIMITER.len());
    }
}

// =============================================================================
// FPS Line
// =============================================================================

/// Compose the FPS summary line, all values rounded to the nearest integer.
pub fn compose_fps_line(stats: &FpsStats) -> String<FPS_LINE_CAP> {
    let mut line: String<FPS_LINE_CAP> = String::new();
    let _ = write!(
        line,
        "FPS: {} | Min: {} | Max: {} | Avg: {}",
        stats.current.round() as i32,
        stats.min.round() as i32,
        stats.max.round() as i32,
        stats.average.round() as i32,
    );
    line
}

/// Replace a non-finite reading with 0 so formatting never prints NaN.
#[inline]
fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn jerk_sample() -> SceneSample {
        SceneSample {
            show_jerk: true,
            acceleration: 3.2,
            acceleration_jerk: 2.0,
            acceleration_jerk_delta: 0.0,
            speed_jerk: -1.0,
            speed_jerk_delta: 3.0,
            accel_conversion: 1.0,
            accel_unit: "units",
            ..SceneSample::default()
        }
    }

    #[test]
    fn test_jerk_line_composition() {
        let line = compose_metrics_line(&jerk_sample(), 3.2);
        assert_eq!(
            line.as_str(),
            "Acceleration: 3.2 units - Max: 3.2 units | Acceleration Jerk: 2 | Speed Jerk: -1 (-3)"
        );
    }

    #[test]
    fn test_no_trailing_delimiter() {
        let line = compose_metrics_line(&jerk_sample(), 3.2);
        assert!(!line.as_str().ends_with(" | "), "Trailing delimiter must be trimmed");
    }

    #[test]
    fn test_positive_delta_renders_with_leading_minus() {
        let mut line: String<64> = String::new();
        append_jerk_info(&mut line, "Speed Jerk", 4, 2);
        assert_eq!(line.as_str(), "Speed Jerk: 4 (-2) | ");
    }

    #[test]
    fn test_negative_delta_keeps_own_sign() {
        let mut line: String<64> = String::new();
        append_jerk_info(&mut line, "Speed Jerk", 4, -2);
        assert_eq!(line.as_str(), "Speed Jerk: 4 (-2) | ");
    }

    #[test]
    fn test_zero_delta_is_omitted() {
        let mut line: String<64> = String::new();
        append_jerk_info(&mut line, "Acceleration Jerk", 7, 0);
        assert_eq!(line.as_str(), "Acceleration Jerk: 7 | ");
    }

    #[test]
    fn test_tuning_valid_values() {
        let sample = SceneSample {
            show_tuning: true,
            live_valid: true,
            friction: 0.1234,
            lat_accel: 2.5,
            ..SceneSample::default()
        };
        let line = compose_metrics_line(&sample, 0.0);
        assert_eq!(line.as_str(), "Friction: 0.123 | Lateral Acceleration: 2.500");
    }

    #[test]
    fn test_tuning_placeholder_while_calculating() {
        let sample = SceneSample {
            show_tuning: true,
            live_valid: false,
            ..SceneSample::default()
        };
        let line = compose_metrics_line(&sample, 0.0);
        assert_eq!(
            line.as_str(),
            "Friction: Calculating... | Lateral Acceleration: Calculating..."
        );
    }

    #[test]
    fn test_jerk_and_tuning_combined_order() {
        let sample = SceneSample {
            show_tuning: true,
            live_valid: true,
            friction: 0.08,
            lat_accel: 1.0,
            ..jerk_sample()
        };
        let line = compose_metrics_line(&sample, 3.2);
        let text = line.as_str();
        let jerk_pos = text.find("Acceleration Jerk").expect("jerk phrase present");
        let tuning_pos = text.find("Friction").expect("tuning phrase present");
        assert!(jerk_pos < tuning_pos, "Jerk phrases come before tuning phrases");
    }

    #[test]
    fn test_everything_disabled_yields_empty_line() {
        let line = compose_metrics_line(&SceneSample::default(), 0.0);
        assert!(line.is_empty(), "No enabled features should produce no text");
    }

    #[test]
    fn test_unit_conversion_applies_to_both_accel_values() {
        let sample = SceneSample {
            accel_conversion: 2.0,
            accel_unit: "x",
            ..jerk_sample()
        };
        let line = compose_metrics_line(&sample, 4.0);
        assert!(
            line.as_str().starts_with("Acceleration: 6.4 x - Max: 8.0 x"),
            "Conversion must apply to the current and max values, got: {line}"
        );
    }

    #[test]
    fn test_non_finite_acceleration_prints_zero() {
        let sample = SceneSample {
            acceleration: f32::NAN,
            ..jerk_sample()
        };
        let line = compose_metrics_line(&sample, 3.2);
        assert!(
            line.as_str().starts_with("Acceleration: 0.0 units"),
            "NaN acceleration must format as 0.0, got: {line}"
        );
    }

    #[test]
    fn test_longest_line_fits_capacity() {
        let sample = SceneSample {
            show_tuning: true,
            live_valid: true,
            acceleration: -99.9,
            acceleration_jerk: -9999.0,
            acceleration_jerk_delta: -9999.0,
            speed_jerk: -9999.0,
            speed_jerk_delta: -9999.0,
            friction: -99.9999,
            lat_accel: -99.9999,
            accel_unit: "ft/s²",
            ..jerk_sample()
        };
        let line = compose_metrics_line(&sample, -99.9);
        assert!(line.len() < METRICS_LINE_CAP, "Worst-case line must fit the buffer");
        assert!(!line.as_str().ends_with(DELIMITER));
    }

    #[test]
    fn test_fps_line_rounds_to_nearest() {
        let stats = FpsStats {
            current: 49.6,
            min: 12.4,
            max: 61.5,
            average: 50.49,
        };
        let line = compose_fps_line(&stats);
        assert_eq!(line.as_str(), "FPS: 50 | Min: 12 | Max: 62 | Avg: 50");
    }
}
