//! Low-level drawing primitives shared across the overlay.
//!
//! # Frame Geometry
//!
//! The overlay is a colored frame around a camera view. The background fill
//! covers the whole screen, half fills cover one vertical half each, and the
//! camera backdrop is drawn last over the center, leaving only the frame
//! ring of whatever was painted underneath.
//!
//! # Steering Strip
//!
//! The steering strip is a bottom-anchored column on one screen edge whose
//! height follows the smoothed steering torque. Its color runs through the
//! status gradient: embedded-graphics has no gradient brush, so the strip is
//! painted as flat bands between the gradient stops. Stop fractions are
//! measured over the full screen height, which keeps each band's color fixed
//! in place while the strip grows and shrinks over it.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics_simulator::SimulatorDisplay;

use crate::aggregator::ScreenSide;
use crate::colors::CAMERA_BACKDROP;
use crate::config::{BORDER_WIDTH, CAMERA_HEIGHT, CAMERA_WIDTH, CAMERA_X, CAMERA_Y, HALF_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::status::STEERING_GRADIENT;

/// Camera backdrop fill, computed at compile time.
const CAMERA_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(CAMERA_BACKDROP);

/// Fill one vertical half of the screen.
///
/// Used for blind-spot and turn-signal coloring. The camera backdrop drawn
/// afterwards reduces the fill to the visible frame ring.
pub fn fill_half_frame(display: &mut SimulatorDisplay<Rgb565>, side: ScreenSide, color: Rgb565) {
    let x = match side {
        ScreenSide::Left => 0,
        ScreenSide::Right => HALF_WIDTH as i32,
    };
    Rectangle::new(Point::new(x, 0), Size::new(HALF_WIDTH, SCREEN_HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Draw the bottom-anchored steering strip on one screen edge.
///
/// `fraction` is the visible portion of the strip as computed by the
/// aggregator, already clamped to 0..1.
pub fn draw_steering_strip(display: &mut SimulatorDisplay<Rgb565>, side: ScreenSide, fraction: f32) {
    let visible = strip_visible_px(fraction);
    if visible == 0 {
        return;
    }

    let x = match side {
        ScreenSide::Left => 0,
        ScreenSide::Right => (SCREEN_WIDTH - BORDER_WIDTH) as i32,
    };
    let strip_top = SCREEN_HEIGHT - visible;

    for pair in STEERING_GRADIENT.windows(2) {
        let (start_fraction, color) = pair[0];
        let (end_fraction, _) = pair[1];
        let band_top = (start_fraction * SCREEN_HEIGHT as f32) as u32;
        let band_bottom = (end_fraction * SCREEN_HEIGHT as f32) as u32;

        let y = band_top.max(strip_top);
        if band_bottom <= y {
            continue;
        }

        Rectangle::new(Point::new(x, y as i32), Size::new(BORDER_WIDTH, band_bottom - y))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display)
            .ok();
    }
}

/// Convert a strip fraction into visible pixels, clamped to the screen.
fn strip_visible_px(fraction: f32) -> u32 {
    if !fraction.is_finite() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * SCREEN_HEIGHT as f32) as u32
}

/// Draw the near-black stand-in for the camera stream over the screen
/// center, leaving the frame ring visible.
pub fn draw_camera_backdrop(display: &mut SimulatorDisplay<Rgb565>) {
    Rectangle::new(Point::new(CAMERA_X, CAMERA_Y), Size::new(CAMERA_WIDTH, CAMERA_HEIGHT))
        .into_styled(CAMERA_FILL)
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================
