//! Color constants for the onroad HUD overlay.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)
//!
//! The status palette values are the stock dashboard border colors quantized
//! from their 8-bit RGB origins (`r >> 3`, `g >> 2`, `b >> 3`).

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed optimal values)
// =============================================================================

/// Pure black (0, 0, 0). Used for backgrounds and the debug page.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Used for overlay text and popup borders.
pub const WHITE: Rgb565 = Rgb565::WHITE;

// =============================================================================
// Status Palette (application-specific)
// =============================================================================

/// Slate blue frame while the system is disengaged. From 8-bit (23, 51, 73).
pub const DISENGAGED_SLATE: Rgb565 = Rgb565::new(2, 12, 9);

/// Green frame while engaged and lateral control is active. From (23, 134, 68).
pub const ENGAGED_GREEN: Rgb565 = Rgb565::new(2, 33, 8);

/// Gray frame while the driver is overriding. From (145, 155, 149).
pub const OVERRIDE_GRAY: Rgb565 = Rgb565::new(18, 38, 18);

/// Orange frame for experimental longitudinal control. From (218, 111, 37).
pub const EXPERIMENTAL_ORANGE: Rgb565 = Rgb565::new(27, 27, 4);

/// Red frame for traffic mode. Doubles as the blind-spot warning fill.
/// From (201, 34, 49).
pub const TRAFFIC_RED: Rgb565 = Rgb565::new(25, 8, 6);

/// Yellow frame for an overridden conditional state. Doubles as the
/// turn-signal flash color. From (253, 226, 61).
pub const SIGNAL_YELLOW: Rgb565 = Rgb565::new(31, 56, 7);

// =============================================================================
// Chrome Colors
// =============================================================================

/// Dark gray for dividers on the debug page. Subtle enough to not distract.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Near-black stand-in for the camera stream behind the overlay.
pub const CAMERA_BACKDROP: Rgb565 = Rgb565::new(1, 2, 1);
