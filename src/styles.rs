//! Pre-computed static text styles to avoid per-frame object construction.
//!
//! `MonoTextStyle` and `TextStyle` are const-constructible in
//! embedded-graphics 0.8, so every fixed style lives in the binary's
//! read-only data section. Styles that need a dynamic color (debug page
//! sections) are built from the shared `LABEL_FONT` reference instead.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::Rgb565,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_18_POINT;

use crate::colors::WHITE;

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Centered text alignment. Used for the overlay text lines and popups.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Small label font (6x10 pixels). Exposed for creating dynamic-color styles.
/// Usage: `MonoTextStyle::new(LABEL_FONT, dynamic_color)`
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

// =============================================================================
// Pre-computed Text Styles (const - zero runtime cost)
// =============================================================================

/// Small white text for the metrics and FPS lines on the overlay.
pub const LABEL_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Large white text for popup messages (`ProFont` 18pt).
pub const POPUP_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, WHITE);
