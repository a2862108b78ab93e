//! Display-side state for the power monitor.
//!
//! The [`monitor`] module holds everything the OLED renderer needs that is
//! not tied to a drawing surface: the rolling graph buffer, the
//! current-to-pixel mapping, the message overlay state machine and the
//! shared [`Readings`](monitor::Readings) snapshot.

#![no_std]

pub mod monitor;
