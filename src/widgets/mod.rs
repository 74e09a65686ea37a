//! Widget components for the overlay display.
//!
//! - [`popups`]: overlay popup dialogs (reset notification, feature toggles)
//! - [`primitives`]: shared low-level drawing utilities (frame fills,
//!   steering strip, camera backdrop)
//!
//! All widgets use the optimizations from the [`styles`](crate::styles)
//! module: const text styles, pre-computed geometry, and `heapless::String`
//! for dynamic text (no heap allocation).

mod popups;
mod primitives;

pub use popups::{draw_reset_popup, draw_toggle_popup};
pub use primitives::{draw_camera_backdrop, draw_steering_strip, fill_half_frame};
