//! Host-side test doubles: a recording 128×64 surface and a manual clock.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PointsIter, Rectangle},
};
use pmon::monitor::ElapsedTimer;

use crate::layout::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::surface::Surface;

const WIDTH: usize = DISPLAY_WIDTH as usize;
const HEIGHT: usize = DISPLAY_HEIGHT as usize;
const MAX_PASSES: usize = 8;

/// Full-frame surface that remembers every lit pixel and counts draws
/// per pass. Never clips, so multi-pass runs overlay their passes.
pub(crate) struct RecordingSurface {
    pixels: [[bool; WIDTH]; HEIGHT],
    passes: u8,
    pass: u8,
    frames: usize,
    pass_draws: [usize; MAX_PASSES],
}

impl RecordingSurface {
    pub(crate) fn new() -> Self {
        Self::with_passes(1)
    }

    pub(crate) fn with_passes(passes: u8) -> Self {
        Self {
            pixels: [[false; WIDTH]; HEIGHT],
            passes,
            pass: 0,
            frames: 0,
            pass_draws: [0; MAX_PASSES],
        }
    }

    pub(crate) fn pixels(&self) -> &[[bool; WIDTH]; HEIGHT] {
        &self.pixels
    }

    pub(crate) fn is_lit(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    pub(crate) fn lit_count(&self) -> usize {
        self.pixels.iter().flatten().filter(|&&lit| lit).count()
    }

    /// Lit pixels inside `area`.
    pub(crate) fn lit_in(&self, area: Rectangle) -> usize {
        area.points()
            .filter(|p| p.x >= 0 && p.y >= 0 && (p.x as usize) < WIDTH && (p.y as usize) < HEIGHT)
            .filter(|p| self.pixels[p.y as usize][p.x as usize])
            .count()
    }

    /// Number of `begin_frame()` calls.
    pub(crate) fn frames(&self) -> usize {
        self.frames
    }

    /// Pixels submitted during `pass`, lit or not.
    pub(crate) fn pass_draws(&self, pass: usize) -> usize {
        self.pass_draws[pass]
    }

    pub(crate) fn total_draws(&self) -> usize {
        self.pass_draws.iter().sum()
    }
}

impl OriginDimensions for RecordingSurface {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

impl DrawTarget for RecordingSurface {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let pass = (self.pass as usize).min(MAX_PASSES - 1);
        for Pixel(p, color) in pixels {
            self.pass_draws[pass] += 1;
            if p.x >= 0 && p.y >= 0 && (p.x as usize) < WIDTH && (p.y as usize) < HEIGHT {
                self.pixels[p.y as usize][p.x as usize] = color.is_on();
            }
        }
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn begin_frame(&mut self) {
        self.frames += 1;
        self.pass = 0;
    }

    fn next_pass(&mut self) -> bool {
        if self.pass + 1 >= self.passes {
            return false;
        }
        self.pass += 1;
        true
    }

    fn passes(&self) -> u8 {
        self.passes
    }
}

/// Stopwatch over a manually advanced clock.
pub(crate) struct ManualTimer<'a> {
    now: &'a Cell<u32>,
    start: u32,
}

impl<'a> ManualTimer<'a> {
    pub(crate) fn new(now: &'a Cell<u32>) -> Self {
        Self { now, start: 0 }
    }
}

impl ElapsedTimer for ManualTimer<'_> {
    fn restart(&mut self) {
        self.start = self.now.get();
    }

    fn elapsed_ms(&self) -> u32 {
        self.now.get() - self.start
    }
}
