//! Debug/profiling page rendering.
//!
//! Displays frame timing, overlay redraw statistics, the aggregator's
//! internal counters, and a debug log terminal. Accessible by pressing `Y`
//! to toggle from the overlay page.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ DEBUG VIEW                              UP 00:12:34       53 FPS │
//! ├──────────────────────────────────────────────────────────────────┤
//! │ TIMING              │ OVERLAY           │ AGGREGATOR             │
//! │ Frame:  20.0ms      │ Frames: 12847     │ Frame:  12847          │
//! │ Render: 0.5ms       │ Redraws: 11200    │ Steer:  0.142          │
//! │ Sleep:  19.5ms      │ Skips: 1647       │ MaxAcc: 3.1            │
//! │ Min:    19.8ms      │ Popups: 4         │ Signal: L 7 / R 0      │
//! │ Max:    25.1ms      │ Resets: 1         │ FpsWin: 2893           │
//! │ Avg:    20.1ms      │                   │ Status: ENGAGED        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │ > System started                                                 │
//! │ > Page: Debug                                                    │
//! │ > _                                                              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;

use crate::aggregator::TelemetryAggregator;
use crate::colors::{BLACK, ENGAGED_GREEN, EXPERIMENTAL_ORANGE, GRAY, SIGNAL_YELLOW, WHITE};
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::profiling::{DebugLog, ProfilingMetrics};
use crate::status::DriveStatus;
use crate::styles::LABEL_FONT;

// =============================================================================
// Layout Constants
// =============================================================================

/// Header Y position (text baseline)
const HEADER_Y: i32 = 14;

/// Y position of divider below header
const HEADER_DIVIDER_Y: i32 = 22;

/// Y position where stats section headers start
const SECTION_HEADER_Y: i32 = 40;

/// Y position where stats values start
const STATS_Y: i32 = 58;

/// Y position of divider above log
const LOG_DIVIDER_Y: i32 = 310;

/// Y position where log terminal starts
const LOG_Y: i32 = 326;

/// Height of each log line
const LOG_LINE_HEIGHT: i32 = 14;

/// X position for left column (frame timing)
const COL1_X: i32 = 8;

/// X position for middle column (overlay stats)
const COL2_X: i32 = 340;

/// X position for right column (aggregator internals)
const COL3_X: i32 = 660;

/// Line height for stats
const STAT_LINE_HEIGHT: i32 = 16;

// =============================================================================
// Colors
// =============================================================================

/// Background color for debug page
const DEBUG_BG: Rgb565 = BLACK;

/// Header text color
const HEADER_COLOR: Rgb565 = ENGAGED_GREEN;

/// Section header color (dimmer)
const SECTION_COLOR: Rgb565 = GRAY;

/// Value color (bright)
const VALUE_COLOR: Rgb565 = WHITE;

/// Highlight color for min/max/avg
const HIGHLIGHT_COLOR: Rgb565 = SIGNAL_YELLOW;

/// Log prompt color
const LOG_PROMPT_COLOR: Rgb565 = ENGAGED_GREEN;

/// Log text color
const LOG_TEXT_COLOR: Rgb565 = EXPERIMENTAL_ORANGE;

/// Divider line color
const DIVIDER_COLOR: Rgb565 = GRAY;

// =============================================================================
// Debug Page Drawing
// =============================================================================

/// Draw the debug/profiling page.
///
/// Clears the display and renders:
/// - Header with "DEBUG VIEW", uptime, and FPS
/// - Three columns: frame timing, overlay stats, aggregator internals
/// - Debug log terminal (bottom section)
pub fn draw_debug_page(
    display: &mut SimulatorDisplay<Rgb565>,
    metrics: &ProfilingMetrics,
    log: &DebugLog,
    fps: f32,
    aggregator: &TelemetryAggregator,
    status: DriveStatus,
) {
    display.clear(DEBUG_BG).ok();

    draw_header(display, metrics, fps);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);
    draw_section_headers(display);

    draw_timing_column(display, metrics);
    draw_overlay_column(display, metrics);
    draw_aggregator_column(display, aggregator, status);

    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log_terminal(display, log);
}

/// Draw the header with title, uptime, and FPS.
fn draw_header(display: &mut SimulatorDisplay<Rgb565>, metrics: &ProfilingMetrics, fps: f32) {
    let header_style = MonoTextStyle::new(LABEL_FONT, HEADER_COLOR);
    let info_style = MonoTextStyle::new(LABEL_FONT, VALUE_COLOR);

    Text::new("DEBUG VIEW", Point::new(COL1_X, HEADER_Y), header_style)
        .draw(display)
        .ok();

    let uptime = metrics.uptime_string();
    let mut uptime_str: String<24> = String::new();
    let _ = write!(uptime_str, "UP {uptime}");
    Text::new(&uptime_str, Point::new(480, HEADER_Y), info_style)
        .draw(display)
        .ok();

    let mut fps_str: String<12> = String::new();
    let _ = write!(fps_str, "{fps:.0} FPS");
    Text::new(&fps_str, Point::new(880, HEADER_Y), info_style)
        .draw(display)
        .ok();
}

/// Draw section headers for the stat columns.
fn draw_section_headers(display: &mut SimulatorDisplay<Rgb565>) {
    let style = MonoTextStyle::new(LABEL_FONT, SECTION_COLOR);

    Text::new("TIMING", Point::new(COL1_X, SECTION_HEADER_Y), style)
        .draw(display)
        .ok();
    Text::new("OVERLAY", Point::new(COL2_X, SECTION_HEADER_Y), style)
        .draw(display)
        .ok();
    Text::new("AGGREGATOR", Point::new(COL3_X, SECTION_HEADER_Y), style)
        .draw(display)
        .ok();
}

/// Draw frame timing statistics (left column).
fn draw_timing_column(display: &mut SimulatorDisplay<Rgb565>, metrics: &ProfilingMetrics) {
    let value_style = MonoTextStyle::new(LABEL_FONT, VALUE_COLOR);
    let highlight_style = MonoTextStyle::new(LABEL_FONT, HIGHLIGHT_COLOR);

    let x = COL1_X;
    let mut y = STATS_Y;

    let mut s: String<24> = String::new();
    let _ = write!(s, "Frame: {:.1}ms", metrics.frame_time_us as f32 / 1000.0);
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<24> = String::new();
    let _ = write!(s, "Render:{:.1}ms", metrics.render_time_us as f32 / 1000.0);
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<24> = String::new();
    let _ = write!(s, "Sleep: {:.1}ms", metrics.sleep_time_us as f32 / 1000.0);
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let min_ms = if metrics.frame_time_min_us == u32::MAX {
        0.0
    } else {
        metrics.frame_time_min_us as f32 / 1000.0
    };
    let mut s: String<24> = String::new();
    let _ = write!(s, "Min:   {min_ms:.1}ms");
    Text::new(&s, Point::new(x, y), highlight_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<24> = String::new();
    let _ = write!(s, "Max:   {:.1}ms", metrics.frame_time_max_us as f32 / 1000.0);
    Text::new(&s, Point::new(x, y), highlight_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<24> = String::new();
    let _ = write!(s, "Avg:   {:.1}ms", metrics.frame_time_avg_us() as f32 / 1000.0);
    Text::new(&s, Point::new(x, y), highlight_style).draw(display).ok();
}

/// Draw overlay redraw counters (middle column).
fn draw_overlay_column(display: &mut SimulatorDisplay<Rgb565>, metrics: &ProfilingMetrics) {
    let value_style = MonoTextStyle::new(LABEL_FONT, VALUE_COLOR);

    let x = COL2_X;
    let mut y = STATS_Y;

    let mut s: String<24> = String::new();
    let _ = write!(s, "Frames: {}", metrics.total_frames);
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<24> = String::new();
    let _ = write!(s, "Redraws:{}", metrics.overlay_redraws);
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<24> = String::new();
    let _ = write!(s, "Skips:  {}", metrics.overlay_skips);
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<24> = String::new();
    let _ = write!(s, "Popups: {}", metrics.popups_shown);
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<24> = String::new();
    let _ = write!(s, "Resets: {}", metrics.resets);
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
}

/// Draw the aggregator's internal state (right column).
fn draw_aggregator_column(
    display: &mut SimulatorDisplay<Rgb565>,
    aggregator: &TelemetryAggregator,
    status: DriveStatus,
) {
    let value_style = MonoTextStyle::new(LABEL_FONT, VALUE_COLOR);
    let highlight_style = MonoTextStyle::new(LABEL_FONT, HIGHLIGHT_COLOR);

    let x = COL3_X;
    let mut y = STATS_Y;

    let mut s: String<28> = String::new();
    let _ = write!(s, "Frame:  {}", aggregator.frame_count());
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<28> = String::new();
    let _ = write!(s, "Steer:  {:.3}", aggregator.smoothed_steer());
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<28> = String::new();
    let _ = write!(s, "MaxAcc: {:.1}", aggregator.max_acceleration());
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let (left, right) = aggregator.signal_frames();
    let mut s: String<28> = String::new();
    let _ = write!(s, "Signal: L {left} / R {right}");
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<28> = String::new();
    let _ = write!(s, "FpsWin: {}", aggregator.fps_sample_count());
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<28> = String::new();
    let _ = write!(s, "Status: {}", status.name());
    Text::new(&s, Point::new(x, y), highlight_style).draw(display).ok();
}

/// Draw the debug log terminal section.
fn draw_log_terminal(display: &mut SimulatorDisplay<Rgb565>, log: &DebugLog) {
    let prompt_style = MonoTextStyle::new(LABEL_FONT, LOG_PROMPT_COLOR);
    let text_style = MonoTextStyle::new(LABEL_FONT, LOG_TEXT_COLOR);

    // Terminal background (very dark green tint)
    Rectangle::new(
        Point::new(0, LOG_DIVIDER_Y + 2),
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - LOG_DIVIDER_Y as u32 - 2),
    )
    .into_styled(PrimitiveStyle::with_fill(Rgb565::new(1, 2, 1)))
    .draw(display)
    .ok();

    let mut y = LOG_Y;

    for line in log.iter() {
        Text::new(">", Point::new(COL1_X, y), prompt_style).draw(display).ok();
        Text::new(line, Point::new(COL1_X + 10, y), text_style)
            .draw(display)
            .ok();
        y += LOG_LINE_HEIGHT;
    }

    // Cursor on the next line
    Text::new("> _", Point::new(COL1_X, y), prompt_style).draw(display).ok();
}

/// Draw a horizontal divider line.
fn draw_horizontal_line(display: &mut SimulatorDisplay<Rgb565>, y: i32) {
    Line::new(Point::new(2, y), Point::new(SCREEN_WIDTH as i32 - 2, y))
        .into_styled(PrimitiveStyle::with_stroke(DIVIDER_COLOR, 1))
        .draw(display)
        .ok();
}
