//! Overlay drawing and render state tracking.
//!
//! The aggregator decides *what* to show; this module turns a
//! [`DisplayState`] into pixels and decides *whether* to redraw at all.
//!
//! # Update Strategy
//!
//! | Element | Update Frequency | Strategy |
//! |---------|-----------------|----------|
//! | Overlay | When `DisplayState::changed` | Conditional full redraw |
//! | Popups  | Every frame while visible | Drawn on top of the overlay |
//! | Page switch / popup close | On transition | Full display clear |
//!
//! The aggregator raises `changed` on every frame where an overlay feature
//! is live, so a skipped frame is guaranteed to look identical to the
//! previous one. The only extra triggers are local to the window: the first
//! frame, a closed popup leaving remnants, and a page switch clearing the
//! display.
//!
//! # Paint Order
//!
//! Background frame, steering strip, blind-spot halves, signal halves,
//! camera backdrop, text lines. The backdrop covers the screen center, so
//! the half fills end up visible only as the surrounding frame, matching the
//! stock overlay where the camera widget sits above the painted border.

use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;

use crate::aggregator::{DisplayState, ScreenSide};
use crate::config::{CAMERA_Y, CENTER_X, POPUP_DURATION, SCREEN_HEIGHT};
use crate::styles::{CENTERED, LABEL_STYLE_WHITE};
use crate::widgets::{draw_camera_backdrop, draw_steering_strip, fill_half_frame};

// =============================================================================
// Text Positions (Optimization: computed at compile time)
// =============================================================================

/// Metrics line, centered just below the top of the camera view.
const METRICS_TEXT_POS: Point = Point::new(CENTER_X, CAMERA_Y + 24);

/// FPS line, centered just above the bottom of the camera view.
const FPS_TEXT_POS: Point = Point::new(CENTER_X, SCREEN_HEIGHT as i32 - CAMERA_Y - 14);

// =============================================================================
// Overlay Drawing
// =============================================================================

/// Draw one frame of the overlay from its display state.
///
/// Stateless: everything to show is in `state`.
pub fn draw_overlay(display: &mut SimulatorDisplay<Rgb565>, state: &DisplayState) {
    display.clear(state.bg).ok();

    if let Some(border) = &state.steering {
        draw_steering_strip(display, border.side, border.fraction);
    }

    if let Some(colors) = &state.blind_spot {
        fill_half_frame(display, ScreenSide::Left, colors.left);
        fill_half_frame(display, ScreenSide::Right, colors.right);
    }

    if let Some(paint) = &state.signals {
        if let Some(color) = paint.left {
            fill_half_frame(display, ScreenSide::Left, color);
        }
        if let Some(color) = paint.right {
            fill_half_frame(display, ScreenSide::Right, color);
        }
    }

    draw_camera_backdrop(display);

    if !state.metrics_line.is_empty() {
        Text::with_text_style(state.metrics_line.as_str(), METRICS_TEXT_POS, LABEL_STYLE_WHITE, CENTERED)
            .draw(display)
            .ok();
    }

    if let Some(line) = &state.fps_line {
        Text::with_text_style(line.as_str(), FPS_TEXT_POS, LABEL_STYLE_WHITE, CENTERED)
            .draw(display)
            .ok();
    }
}

// =============================================================================
// Popups
// =============================================================================

/// Active popup with its start time.
///
/// Consolidates popup state into a single enum. Each variant holds the
/// `Instant` when the popup was triggered, making expiration checks
/// straightforward and mutual exclusion impossible to violate.
#[derive(Clone, Copy, Debug)]
pub enum Popup {
    /// "OVERLAY RESET" popup (larger).
    Reset(Instant),
    /// Feature toggle popup, e.g. "STEERING ON" (smaller).
    Toggle(Instant, &'static str, bool),
}

impl Popup {
    /// Get the start time of this popup.
    #[inline]
    pub const fn start_time(&self) -> Instant {
        match self {
            Self::Reset(t) | Self::Toggle(t, _, _) => *t,
        }
    }

    /// Check if this popup has expired.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.start_time().elapsed() >= POPUP_DURATION
    }

    /// Get the popup kind (discriminant only, for comparison).
    ///
    /// The two kinds have different sizes, so switching between them needs a
    /// display clear to remove remnants. Toggle popups share one geometry
    /// and repaint fully each frame, so they all compare equal here.
    const fn kind(&self) -> u8 {
        match self {
            Self::Reset(_) => 0,
            Self::Toggle(..) => 1,
        }
    }
}

// =============================================================================
// Render State
// =============================================================================

/// Tracks render state for optimized display updates.
///
/// Decides when the overlay actually needs repainting and manages popup
/// cleanup.
pub struct RenderState {
    /// Previous popup kind (discriminant only, for detecting switches).
    prev_popup_kind: Option<u8>,

    /// Whether popup just closed or switched this frame (need to clear remnants).
    popup_just_closed: bool,

    /// Whether this is the first frame (need full redraw).
    first_frame: bool,

    /// Whether the display was cleared externally (e.g., page switch).
    display_cleared: bool,
}

impl RenderState {
    /// Create a new render state for first frame.
    pub const fn new() -> Self {
        Self {
            prev_popup_kind: None,
            popup_just_closed: false,
            first_frame: true,
            display_cleared: false,
        }
    }

    /// Check whether the overlay must be repainted this frame.
    ///
    /// `changed` is the aggregator's repaint flag; the local triggers cover
    /// window-side events the aggregator cannot know about.
    #[inline]
    pub const fn need_overlay(&self, changed: bool) -> bool {
        changed || self.first_frame || self.popup_just_closed || self.display_cleared
    }

    /// Update popup state with the current active popup.
    ///
    /// Detects both popup close (becomes None) and popup switch (kind
    /// changes). Both cases require a display clear to remove remnants,
    /// since the popup geometries differ.
    pub fn update_popup(&mut self, popup: Option<&Popup>) {
        let current_kind = popup.map(Popup::kind);
        let changed = current_kind != self.prev_popup_kind;
        let was_visible = self.prev_popup_kind.is_some();
        self.prev_popup_kind = current_kind;

        if changed && was_visible {
            self.popup_just_closed = true;
        }
    }

    /// Check if popup just closed this frame (need to clear remnants).
    #[inline]
    pub const fn popup_just_closed(&self) -> bool {
        self.popup_just_closed
    }

    /// Check if this is the first frame.
    #[inline]
    pub const fn is_first_frame(&self) -> bool {
        self.first_frame
    }

    /// Mark that the display was cleared externally.
    ///
    /// Call this when `display.clear()` runs due to page switching, so the
    /// overlay repaints on the next overlay-page frame.
    pub const fn mark_display_cleared(&mut self) {
        self.display_cleared = true;
    }

    /// Call at end of frame to reset per-frame state.
    pub const fn end_frame(&mut self) {
        self.first_frame = false;
        self.popup_just_closed = false;
        self.display_cleared = false;
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
