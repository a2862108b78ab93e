//! Graph buffer, current mapping and overlay state for the OLED screens.
//!
//! # Architecture
//!
//! The measurement side produces a [`Readings`] snapshot. The display side
//! quantizes every new current reading with [`current_to_display_y`] and
//! pushes the result into a [`SampleBuffer`], which keeps the most recent
//! [`GRAPH_CAPACITY`] points for the live graph. Transient notices (splash
//! screen, "analysis restarted") go through a [`MessageOverlay`], which
//! preempts the live screens until its minimum display time has elapsed.
//!
//! ```text
//!   Readings ──► current_to_display_y ──► SampleBuffer ──► graph screen
//!       │
//!       └──► take_reset() ──► MessageOverlay::activate(AnalysisReset)
//! ```
//!
//! # `no_std` Compatibility
//!
//! Nothing here allocates. The buffer is a fixed array sized by a const
//! generic and the mapping uses [`micromath`] for `ln`.

mod mapping;
mod message;
mod readings;
mod sample_buffer;

pub use mapping::current_to_display_y;
pub use message::{ElapsedTimer, MessageCode, MessageOverlay};
pub use readings::Readings;
pub use sample_buffer::{Iter, SampleBuffer};

/// Number of points kept for the live graph.
///
/// Points are drawn 2 px apart, so 64 points span the full 128 px width.
pub const GRAPH_CAPACITY: usize = 64;

/// Readings above this value are drawn at the top of the plot.
pub const MAX_CURRENT_MA: u16 = 2000;

/// Top pixel row of the plot band (the bottom half of a 64 px display).
pub const PLOT_TOP_Y: u8 = 32;

/// Bottom pixel row of the plot band.
pub const PLOT_BOTTOM_Y: u8 = 63;
