//! Application configuration constants.
//!
//! # Optimization: Pre-computed Layout Constants
//!
//! Layout values like `SCREEN_WIDTH / 2` are computed at compile time as `const`,
//! avoiding per-frame arithmetic. These constants are used throughout the rendering
//! code instead of recalculating positions every frame.

use std::time::Duration;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (half-scale rendition of the 1920x960 road view).
pub const SCREEN_WIDTH: u32 = 960;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 480;

/// Thickness of the colored status frame around the road view, in pixels.
/// Steering strips, blind-spot fills, and signal fills all live in this frame.
pub const BORDER_WIDTH: u32 = 20;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time (~50 FPS). The main loop sleeps if frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Duration that popups remain visible on screen.
pub const POPUP_DURATION: Duration = Duration::from_secs(3);

// =============================================================================
// Pre-computed Layout Constants (Optimization)
// =============================================================================

/// Half the screen width. Blind-spot and signal fills color one half each.
pub const HALF_WIDTH: u32 = SCREEN_WIDTH / 2;

/// Screen center X coordinate. Used for centering popups and text.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate. Used for centering popups and text.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

/// Top-left corner of the road-view backdrop (inset by the frame width).
pub const CAMERA_X: i32 = BORDER_WIDTH as i32;
pub const CAMERA_Y: i32 = BORDER_WIDTH as i32;

/// Size of the road-view backdrop.
pub const CAMERA_WIDTH: u32 = SCREEN_WIDTH - 2 * BORDER_WIDTH;
pub const CAMERA_HEIGHT: u32 = SCREEN_HEIGHT - 2 * BORDER_WIDTH;
