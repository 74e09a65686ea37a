//! Non-modal popup overlays for status messages.
//!
//! Popups appear centered on screen with a white border and red background.
//! Only one popup displays at a time (most recent wins). These are non-modal
//! overlays: key input is still processed while a popup is visible, so the
//! user can switch between popups or trigger other actions without waiting.
//!
//! All geometry is `const`, computed at compile time from the screen
//! dimensions, and the fill styles are const `PrimitiveStyle` values.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;

use crate::colors::{TRAFFIC_RED, WHITE};
use crate::config::{CENTER_X, CENTER_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::styles::{CENTERED, POPUP_STYLE_WHITE};

// =============================================================================
// Reset Popup Layout Constants
// =============================================================================

/// Width of the "OVERLAY RESET" popup.
const RESET_POPUP_WIDTH: u32 = 380;
/// Height of the "OVERLAY RESET" popup.
const RESET_POPUP_HEIGHT: u32 = 110;
/// X position (centered on screen).
const RESET_POPUP_X: i32 = (SCREEN_WIDTH - RESET_POPUP_WIDTH) as i32 / 2;
/// Y position (centered on screen).
const RESET_POPUP_Y: i32 = (SCREEN_HEIGHT - RESET_POPUP_HEIGHT) as i32 / 2;

// =============================================================================
// Toggle Popup Layout Constants
// =============================================================================

/// Width of the feature toggle popup (smaller than the reset popup).
const TOGGLE_POPUP_WIDTH: u32 = 320;
/// Height of the feature toggle popup.
const TOGGLE_POPUP_HEIGHT: u32 = 80;
/// X position (centered on screen).
const TOGGLE_POPUP_X: i32 = (SCREEN_WIDTH - TOGGLE_POPUP_WIDTH) as i32 / 2;
/// Y position (centered on screen).
const TOGGLE_POPUP_Y: i32 = (SCREEN_HEIGHT - TOGGLE_POPUP_HEIGHT) as i32 / 2;

// =============================================================================
// Pre-computed Text Positions
// =============================================================================

/// Position of "OVERLAY" text (first line of reset popup).
const RESET_TEXT1_POS: Point = Point::new(CENTER_X, CENTER_Y - 10);
/// Position of "RESET" text (second line of reset popup).
const RESET_TEXT2_POS: Point = Point::new(CENTER_X, CENTER_Y + 24);
/// Position of the toggle popup text (single line, vertically centered).
const TOGGLE_TEXT_POS: Point = Point::new(CENTER_X, CENTER_Y + 8);

// =============================================================================
// Pre-computed Primitive Styles
// =============================================================================

/// White fill style for popup borders.
const WHITE_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(WHITE);

/// Red fill style for popup backgrounds.
const RED_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(TRAFFIC_RED);

// =============================================================================
// Pre-computed Rectangle Geometry
// =============================================================================

/// Reset popup border rectangle (outer white rectangle).
const RESET_BORDER_POS: Point = Point::new(RESET_POPUP_X - 3, RESET_POPUP_Y - 3);
const RESET_BORDER_SIZE: Size = Size::new(RESET_POPUP_WIDTH + 6, RESET_POPUP_HEIGHT + 6);

/// Reset popup background rectangle (inner red rectangle).
const RESET_BG_POS: Point = Point::new(RESET_POPUP_X, RESET_POPUP_Y);
const RESET_BG_SIZE: Size = Size::new(RESET_POPUP_WIDTH, RESET_POPUP_HEIGHT);

/// Toggle popup border rectangle (outer white rectangle).
const TOGGLE_BORDER_POS: Point = Point::new(TOGGLE_POPUP_X - 3, TOGGLE_POPUP_Y - 3);
const TOGGLE_BORDER_SIZE: Size = Size::new(TOGGLE_POPUP_WIDTH + 6, TOGGLE_POPUP_HEIGHT + 6);

/// Toggle popup background rectangle (inner red rectangle).
const TOGGLE_BG_POS: Point = Point::new(TOGGLE_POPUP_X, TOGGLE_POPUP_Y);
const TOGGLE_BG_SIZE: Size = Size::new(TOGGLE_POPUP_WIDTH, TOGGLE_POPUP_HEIGHT);

// =============================================================================
// Drawing Functions
// =============================================================================

/// Draw the "OVERLAY RESET" popup shown after the aggregator is reset.
pub fn draw_reset_popup(display: &mut SimulatorDisplay<Rgb565>) {
    Rectangle::new(RESET_BORDER_POS, RESET_BORDER_SIZE)
        .into_styled(WHITE_FILL)
        .draw(display)
        .ok();
    Rectangle::new(RESET_BG_POS, RESET_BG_SIZE)
        .into_styled(RED_FILL)
        .draw(display)
        .ok();

    Text::with_text_style("OVERLAY", RESET_TEXT1_POS, POPUP_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style("RESET", RESET_TEXT2_POS, POPUP_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}

/// Draw a feature toggle popup, e.g. "STEERING ON" or "FPS OFF".
pub fn draw_toggle_popup(display: &mut SimulatorDisplay<Rgb565>, label: &str, on: bool) {
    Rectangle::new(TOGGLE_BORDER_POS, TOGGLE_BORDER_SIZE)
        .into_styled(WHITE_FILL)
        .draw(display)
        .ok();
    Rectangle::new(TOGGLE_BG_POS, TOGGLE_BG_SIZE)
        .into_styled(RED_FILL)
        .draw(display)
        .ok();

    let mut text: String<24> = String::new();
    let _ = write!(text, "{label} {}", if on { "ON" } else { "OFF" });
    Text::with_text_style(text.as_str(), TOGGLE_TEXT_POS, POPUP_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}
