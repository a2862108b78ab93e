//! Screens for the power monitor's SSD1306 (128×64) OLED.
//!
//! This crate draws the monitor's three screens with `embedded-graphics`:
//!
//! - **Graph** — current and average readings over a rolling plot of the
//!   last 64 current samples.
//! - **Summary** — current, average, accumulated charge and elapsed time.
//! - **Message** — a framed notice (startup splash, "analysis restarted")
//!   that preempts the other two until its minimum time has passed.
//!
//! [`Renderer`] draws onto any [`Surface`], a monochrome draw target with a
//! page-refresh protocol. The SSD1306 frame buffer behind [`OledDriver`] is
//! a single-pass surface; [`Striped`] replays the 4-stripe page protocol of
//! page-buffered controllers over any full-frame target.
//!
//! # Quick Start
//!
//! ```ignore
//! use pmon_oled_display_rs::{display_update_task, DisplayConfig, OledDriver};
//!
//! // In your Embassy main:
//! let oled = OledDriver::new(i2c_oled, 0x3C);
//! spawner.spawn(oled_task(oled, readings, DisplayConfig::default())).unwrap();
//!
//! // Thin task wrapper (Embassy tasks cannot be generic):
//! #[embassy_executor::task]
//! async fn oled_task(
//!     driver: OledDriver<MyI2cType>,
//!     readings: &'static Mutex<CriticalSectionRawMutex, Readings>,
//!     config: DisplayConfig,
//! ) {
//!     display_update_task(driver, readings, config).await;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`].
//! - **`task`** — the Embassy [`display_update_task`].

#![no_std]

#[cfg(feature = "task")]
pub mod display_task;
pub mod driver;
pub mod error;
pub mod layout;
pub mod renderer;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

// ── Re-exports for convenience ───────────────────────────────────────────

#[cfg(feature = "task")]
pub use display_task::{display_update_task, EmbassyTimer};
pub use driver::{OledDisplay, OledDriver};
pub use error::OledError;
pub use layout::{DisplayConfig, Screen, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use renderer::Renderer;
pub use surface::{Striped, Surface, FRAME_STRIPES};
