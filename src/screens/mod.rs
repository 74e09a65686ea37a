//! Runtime screens beyond the overlay itself.
//!
//! - **Debug Page** ([`debug`]): profiling metrics, aggregator internals,
//!   and the debug log terminal (accessible via the `Y` key at runtime)

mod debug;

pub use debug::draw_debug_page;
