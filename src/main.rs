// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive
#![allow(clippy::too_many_lines)] // main() is long but well-structured
#![allow(clippy::struct_excessive_bools)] // SceneSample and OverlayToggles use bools appropriately

//! Onroad HUD overlay simulator.
//!
//! Renders the on-road heads-up display of a driver-assistance dashboard:
//! a status-colored frame around the (stand-in) camera view, a smoothed
//! steering strip on the frame edge, blind-spot and turn-signal frame
//! coloring, and two text lines of telemetry (acceleration/jerk/tuning
//! metrics on top, FPS statistics at the bottom).
//!
//! All per-frame logic lives in [`aggregator::TelemetryAggregator`]: the
//! main loop builds one [`scene::SceneSample`] per frame from fake signal
//! generators and keyboard state, feeds it through the aggregator, and hands
//! the resulting [`aggregator::DisplayState`] to the stateless renderer.
//! When the aggregator reports no change, the frame is skipped entirely.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │███ status frame (bg color / blind spot / signal)│
//! │█┌─────────────────────────────────────────────┐█│
//! │█│          Acceleration: ... | Jerk: ...      │█│ <- metrics line
//! │█│                                             │█│
//! │s│               camera backdrop               │█│
//! │t│                                             │█│
//! │r│                                             │█│
//! │i│         FPS: 50 | Min: ... | Avg: ...       │█│ <- FPS line
//! │p└─────────────────────────────────────────────┘█│
//! │█████████████████████████████████████████████████│
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Controls (Simulator Mode)
//!
//! | Key | Action |
//! |-----|--------|
//! | `S` | Toggle steering strip |
//! | `B` | Toggle blind-spot coloring |
//! | `N` | Toggle turn-signal flashes |
//! | `J` | Toggle acceleration/jerk metrics |
//! | `T` | Toggle lateral tuning metrics |
//! | `F` | Toggle FPS line |
//! | `L` / `R` | Toggle left/right turn signal |
//! | `E` | Cycle drive status |
//! | `U` | Toggle metric/imperial units |
//! | `X` | Reset the aggregator |
//! | `Y` | Switch between Overlay and Debug page |
//!
//! Key repeat is ignored to prevent toggle spam when holding keys.

mod aggregator;
mod blink;
mod colors;
mod config;
mod fps;
mod metrics;
mod pages;
mod profiling;
mod render;
mod scene;
mod screens;
mod smoothing;
mod status;
mod styles;
mod widgets;

use std::thread;
use std::time::Instant;

use aggregator::TelemetryAggregator;
use colors::BLACK;
use config::{FRAME_TIME, SCREEN_HEIGHT, SCREEN_WIDTH};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use pages::Page;
use profiling::{DebugLog, ProfilingMetrics};
use render::{Popup, RenderState, draw_overlay};
use scene::{
    IMPERIAL_ACCEL_CONVERSION, IMPERIAL_ACCEL_UNIT, METRIC_ACCEL_CONVERSION, METRIC_ACCEL_UNIT, SceneSample,
};
use screens::draw_debug_page;
use status::DriveStatus;
use widgets::{draw_reset_popup, draw_toggle_popup};

/// Overlay feature switches, the simulator's stand-in for the settings panel.
///
/// On a real device these arrive from persisted settings; here each key
/// press flips one and the resolved bools are copied into every sample.
struct OverlayToggles {
    steering: bool,
    blind_spot: bool,
    signal: bool,
    jerk: bool,
    tuning: bool,
    fps: bool,
    metric_units: bool,
}

impl Default for OverlayToggles {
    fn default() -> Self {
        Self {
            steering: true,
            blind_spot: true,
            signal: true,
            jerk: true,
            tuning: true,
            fps: true,
            metric_units: true,
        }
    }
}

fn main() {
    // Initialize display and window (simulator mode)
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut window = Window::new("Onroad HUD Sim", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    // ==========================================================================
    // Main Loop State
    // ==========================================================================

    // Signal generation time parameter (advances each frame)
    let mut t = 0.0f32;

    // Feature switches and driver input
    let mut toggles = OverlayToggles::default();
    let mut turn_signal_left = false;
    let mut turn_signal_right = false;
    let mut drive_status = DriveStatus::Engaged;

    // All per-frame smoothing, counting, and text composition
    let mut hud = TelemetryAggregator::new();

    // Active popup (only one at a time, encapsulates kind + start time)
    let mut active_popup: Option<Popup> = None;

    // FPS measurement (feeds the scene sample, recomputed once per second)
    let mut last_fps_calc = Instant::now();
    let mut fps_frame_count = 0u32;
    let mut current_fps = 0.0f32;

    // Dirty tracking for overlay repaints
    let mut render_state = RenderState::new();

    // Page navigation state (Overlay is default, Y key toggles to Debug)
    let mut current_page = Page::default();
    let mut page_just_switched = false;

    // Reset request flag (applied at the top of the next frame)
    let mut reset_requested = false;

    // Profiling metrics and debug log
    let mut metrics = ProfilingMetrics::new();
    let mut debug_log = DebugLog::new();
    debug_log.push("System started");

    let run_start = Instant::now();

    // ==========================================================================
    // Main Render Loop
    // ==========================================================================

    loop {
        let frame_start = Instant::now();

        // Handle window events (close, key presses)
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // Ignore OS key repeat to prevent toggle spam when holding keys
                    if repeat {
                        continue;
                    }
                    match keycode {
                        // S: Toggle steering strip (only on Overlay page)
                        Keycode::S if current_page == Page::Overlay => {
                            toggles.steering = !toggles.steering;
                            active_popup = Some(Popup::Toggle(Instant::now(), "STEERING", toggles.steering));
                            metrics.inc_popups_shown();
                            debug_log.push(if toggles.steering { "Steering: ON" } else { "Steering: OFF" });
                        }
                        // B: Toggle blind-spot coloring
                        Keycode::B if current_page == Page::Overlay => {
                            toggles.blind_spot = !toggles.blind_spot;
                            active_popup = Some(Popup::Toggle(Instant::now(), "BLIND SPOT", toggles.blind_spot));
                            metrics.inc_popups_shown();
                            debug_log.push(if toggles.blind_spot { "Blind spot: ON" } else { "Blind spot: OFF" });
                        }
                        // N: Toggle turn-signal flashes
                        Keycode::N if current_page == Page::Overlay => {
                            toggles.signal = !toggles.signal;
                            active_popup = Some(Popup::Toggle(Instant::now(), "SIGNALS", toggles.signal));
                            metrics.inc_popups_shown();
                            debug_log.push(if toggles.signal { "Signals: ON" } else { "Signals: OFF" });
                        }
                        // J: Toggle acceleration/jerk metrics
                        Keycode::J if current_page == Page::Overlay => {
                            toggles.jerk = !toggles.jerk;
                            active_popup = Some(Popup::Toggle(Instant::now(), "JERK METRICS", toggles.jerk));
                            metrics.inc_popups_shown();
                            debug_log.push(if toggles.jerk { "Jerk metrics: ON" } else { "Jerk metrics: OFF" });
                        }
                        // T: Toggle lateral tuning metrics
                        Keycode::T if current_page == Page::Overlay => {
                            toggles.tuning = !toggles.tuning;
                            active_popup = Some(Popup::Toggle(Instant::now(), "TUNING", toggles.tuning));
                            metrics.inc_popups_shown();
                            debug_log.push(if toggles.tuning { "Tuning: ON" } else { "Tuning: OFF" });
                        }
                        // F: Toggle FPS line
                        Keycode::F if current_page == Page::Overlay => {
                            toggles.fps = !toggles.fps;
                            active_popup = Some(Popup::Toggle(Instant::now(), "FPS", toggles.fps));
                            metrics.inc_popups_shown();
                            debug_log.push(if toggles.fps { "FPS: ON" } else { "FPS: OFF" });
                        }
                        // U: Toggle display units
                        Keycode::U if current_page == Page::Overlay => {
                            toggles.metric_units = !toggles.metric_units;
                            active_popup = Some(Popup::Toggle(Instant::now(), "METRIC UNITS", toggles.metric_units));
                            metrics.inc_popups_shown();
                            debug_log.push(if toggles.metric_units { "Units: m/s2" } else { "Units: ft/s2" });
                        }
                        // L / R: Turn signal stalks
                        Keycode::L => {
                            turn_signal_left = !turn_signal_left;
                            debug_log.push(if turn_signal_left { "Signal left: ON" } else { "Signal left: OFF" });
                        }
                        Keycode::R => {
                            turn_signal_right = !turn_signal_right;
                            debug_log.push(if turn_signal_right { "Signal right: ON" } else { "Signal right: OFF" });
                        }
                        // E: Cycle drive status
                        Keycode::E => {
                            drive_status = drive_status.cycle();
                            debug_log.push(drive_status.name());
                        }
                        // X: Reset the aggregator (mode transition analog)
                        Keycode::X if current_page == Page::Overlay => {
                            reset_requested = true;
                            active_popup = Some(Popup::Reset(Instant::now()));
                            metrics.inc_popups_shown();
                        }
                        // Y: Switch page (works on any page)
                        Keycode::Y => {
                            current_page = current_page.toggle();
                            page_just_switched = true;
                            active_popup = None; // Cancel popup when switching pages
                            debug_log.push(match current_page {
                                Page::Overlay => "Page: Overlay",
                                Page::Debug => "Page: Debug",
                            });
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Check if popup has expired BEFORE updating render state, so the
        // cleanup happens in the same frame the popup disappears
        if let Some(ref popup) = active_popup
            && popup.is_expired()
        {
            active_popup = None;
        }

        render_state.update_popup(active_popup.as_ref());

        // Clear display on first frame, when popup just closed, or when page
        // switched; popup remnants (especially the white border) need it
        if render_state.is_first_frame() || render_state.popup_just_closed() || page_just_switched {
            display.clear(BLACK).ok();
            if page_just_switched {
                render_state.mark_display_cleared();
            }
        }

        // ======================================================================
        // FPS Measurement (updated once per second)
        // ======================================================================

        fps_frame_count += 1;
        if last_fps_calc.elapsed().as_secs() >= 1 {
            current_fps = fps_frame_count as f32 / last_fps_calc.elapsed().as_secs_f32();
            fps_frame_count = 0;
            last_fps_calc = Instant::now();
        }

        // ======================================================================
        // Generate Fake Scene Data (simulator mode)
        // ======================================================================

        // Slow sweep across the full steering range; the torque fraction
        // tracks the angle so the strip height follows the sweep
        let steering_angle_deg = (t * 0.12).sin() * 45.0;

        let sample = SceneSample {
            timestamp_ms: run_start.elapsed().as_millis() as u64,
            acceleration: fake_signal(t, -1.5, 3.0, 0.06),
            acceleration_jerk: fake_signal(t, 0.0, 8.0, 0.11),
            acceleration_jerk_delta: fake_signal(t, -3.0, 3.0, 0.23),
            speed_jerk: fake_signal(t, -6.0, 6.0, 0.09),
            speed_jerk_delta: fake_signal(t, -3.0, 3.0, 0.19),
            has_lead: (t * 0.03).sin() > -0.6,
            steer: steering_angle_deg / 90.0,
            steering_angle_deg,
            friction: fake_signal(t, 0.05, 0.18, 0.02),
            lat_accel: fake_signal(t, 0.8, 2.6, 0.03),
            // The live estimator needs a warmup period before it converges
            live_valid: run_start.elapsed().as_secs() >= 8,
            blind_spot_left: (t * 0.21).sin() > 0.88,
            blind_spot_right: (t * 0.17).sin() > 0.9,
            turn_signal_left,
            turn_signal_right,
            fps: current_fps,
            status: drive_status,
            accel_conversion: if toggles.metric_units {
                METRIC_ACCEL_CONVERSION
            } else {
                IMPERIAL_ACCEL_CONVERSION
            },
            accel_unit: if toggles.metric_units {
                METRIC_ACCEL_UNIT
            } else {
                IMPERIAL_ACCEL_UNIT
            },
            show_steering: toggles.steering,
            show_blind_spot: toggles.blind_spot,
            show_signal: toggles.signal,
            show_jerk: toggles.jerk,
            show_tuning: toggles.tuning,
            show_fps: toggles.fps,
        };

        // ======================================================================
        // Aggregate and Render
        // ======================================================================

        if reset_requested {
            hud.reset();
            metrics.inc_resets();
            debug_log.push("Overlay reset");
            reset_requested = false;
        }

        let display_state = hud.ingest(&sample);

        match current_page {
            Page::Overlay => {
                if render_state.need_overlay(display_state.changed) {
                    draw_overlay(&mut display, &display_state);
                    metrics.inc_overlay_redraws();
                } else {
                    metrics.inc_overlay_skips();
                }

                // Popup on top of the overlay, most recent wins.
                // Expiration is already handled at frame start.
                if let Some(ref popup) = active_popup {
                    match popup {
                        Popup::Reset(_) => draw_reset_popup(&mut display),
                        Popup::Toggle(_, label, on) => draw_toggle_popup(&mut display, label, *on),
                    }
                }
            }

            Page::Debug => {
                draw_debug_page(&mut display, &metrics, &debug_log, current_fps, &hud, drive_status);
            }
        }

        // ======================================================================
        // Frame Timing and Profiling
        // ======================================================================

        let render_time = frame_start.elapsed();

        render_state.end_frame();
        page_just_switched = false;

        window.update(&display);

        // Advance signal time
        t += 0.05;

        // Sleep to maintain target frame rate (~50 FPS)
        let pre_sleep = frame_start.elapsed();
        if pre_sleep < FRAME_TIME {
            thread::sleep(FRAME_TIME - pre_sleep);
        }
        let sleep_time = frame_start.elapsed().saturating_sub(pre_sleep);

        metrics.record_frame(frame_start.elapsed(), render_time, sleep_time);
    }
}

/// Generate a sinusoidal signal oscillating between min and max values.
///
/// Used to simulate vehicle telemetry in demo mode.
///
/// # Parameters
/// - `t`: Time parameter (advances each frame)
/// - `min`: Minimum output value
/// - `max`: Maximum output value
/// - `freq`: Oscillation frequency (higher = faster cycles)
fn fake_signal(t: f32, min: f32, max: f32, freq: f32) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}
