//! Drawing surface with a page-refresh protocol.
//!
//! Page-buffered controllers only hold part of the frame in RAM, so one
//! frame is drawn as several passes, each covering a horizontal stripe.
//! [`Surface`] exposes that protocol on top of an `embedded-graphics`
//! [`DrawTarget`]:
//!
//! ```text
//! surface.begin_frame();
//! loop {
//!     draw(pass);
//!     if !surface.next_pass() { break; }
//! }
//! ```
//!
//! Full-frame buffers (such as the SSD1306 in buffered graphics mode)
//! report a single pass. [`Striped`] replays the 4-stripe protocol over any
//! full-frame target by clipping each pass to its stripe.

use core::ops::Range;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::Rectangle,
};

/// Number of horizontal stripes a frame is split into for pass scheduling.
pub const FRAME_STRIPES: u8 = 4;

/// A monochrome draw target that is refreshed in one or more passes.
pub trait Surface: DrawTarget<Color = BinaryColor> {
    /// Start a new frame. The next draw calls belong to pass 0.
    fn begin_frame(&mut self);

    /// Finish the current pass.
    ///
    /// Returns `true` if the frame needs another pass, `false` once the
    /// frame is complete.
    fn next_pass(&mut self) -> bool;

    /// Number of passes [`next_pass()`](Self::next_pass) runs per frame.
    fn passes(&self) -> u8 {
        1
    }
}

/// Returns `true` if pass `pass` of `passes` overlaps any stripe in
/// `first..=last`.
///
/// Pass and stripe extents are compared in units of `1 / (passes *
/// FRAME_STRIPES)` of the frame height.
pub(crate) fn pass_covers(pass: u8, passes: u8, first: u8, last: u8) -> bool {
    let passes = u16::from(passes.max(1));
    let pass = u16::from(pass);
    let stripes = u16::from(FRAME_STRIPES);

    (u16::from(first)..=u16::from(last)).any(|stripe| {
        stripe * passes < (pass + 1) * stripes && pass * stripes < (stripe + 1) * passes
    })
}

/// Page-buffer emulation over a full-frame [`DrawTarget`].
///
/// Each pass only lets through pixels in its stripe of the target's
/// bounding box, the way a page-buffered controller discards drawing
/// outside the page it is currently holding.
///
/// # Examples
///
/// ```
/// use pmon_oled_display_rs::{Striped, Surface};
/// # use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
/// # struct Frame;
/// # impl OriginDimensions for Frame { fn size(&self) -> Size { Size::new(128, 64) } }
/// # impl DrawTarget for Frame {
/// #     type Color = BinaryColor;
/// #     type Error = core::convert::Infallible;
/// #     fn draw_iter<I>(&mut self, _: I) -> Result<(), Self::Error>
/// #     where
/// #         I: IntoIterator<Item = Pixel<BinaryColor>>,
/// #     {
/// #         Ok(())
/// #     }
/// # }
/// let mut striped = Striped::new(Frame);
/// striped.begin_frame();
/// let mut passes = 1;
/// while striped.next_pass() {
///     passes += 1;
/// }
/// assert_eq!(passes, 4);
/// ```
pub struct Striped<D> {
    inner: D,
    stripe: u8,
}

impl<D> Striped<D> {
    /// Wrap a full-frame target.
    pub fn new(inner: D) -> Self {
        Self { inner, stripe: 0 }
    }

    /// Stripe the current pass is drawing.
    pub fn stripe(&self) -> u8 {
        self.stripe
    }

    /// Returns a reference to the wrapped target.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Returns a mutable reference to the wrapped target.
    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.inner
    }

    /// Unwrap the target.
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: Dimensions> Striped<D> {
    /// Rows let through by the current pass.
    fn stripe_rows(&self) -> Range<i32> {
        let area = self.inner.bounding_box();
        let height = area.size.height as i32 / i32::from(FRAME_STRIPES);
        let top = area.top_left.y + height * i32::from(self.stripe);
        top..top + height
    }
}

impl<D: Dimensions> Dimensions for Striped<D> {
    fn bounding_box(&self) -> Rectangle {
        self.inner.bounding_box()
    }
}

impl<D> DrawTarget for Striped<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    type Color = BinaryColor;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let rows = self.stripe_rows();
        self.inner
            .draw_iter(pixels.into_iter().filter(move |Pixel(p, _)| rows.contains(&p.y)))
    }
}

impl<D> Surface for Striped<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn begin_frame(&mut self) {
        self.stripe = 0;
    }

    fn next_pass(&mut self) -> bool {
        if self.stripe + 1 >= FRAME_STRIPES {
            return false;
        }
        self.stripe += 1;
        true
    }

    fn passes(&self) -> u8 {
        FRAME_STRIPES
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    use super::*;
    use crate::testing::RecordingSurface;

    #[test]
    fn four_passes_map_one_to_one() {
        for pass in 0..4 {
            for stripe in 0..4 {
                assert_eq!(pass_covers(pass, 4, stripe, stripe), pass == stripe);
            }
        }
    }

    #[test]
    fn single_pass_covers_everything() {
        for stripe in 0..4 {
            assert!(pass_covers(0, 1, stripe, stripe));
        }
    }

    #[test]
    fn two_passes_split_in_halves() {
        assert!(pass_covers(0, 2, 0, 0));
        assert!(pass_covers(0, 2, 1, 1));
        assert!(!pass_covers(0, 2, 2, 3));
        assert!(pass_covers(1, 2, 2, 3));
        assert!(!pass_covers(1, 2, 1, 1));
    }

    #[test]
    fn eight_passes_cover_each_stripe_twice() {
        let covering = (0..8).filter(|&p| pass_covers(p, 8, 1, 1)).count();
        assert_eq!(covering, 2);
        assert!(pass_covers(2, 8, 1, 1));
        assert!(pass_covers(3, 8, 1, 1));
    }

    #[test]
    fn zero_passes_treated_as_one() {
        assert!(pass_covers(0, 0, 3, 3));
    }

    #[test]
    fn striped_runs_four_passes() {
        let mut striped = Striped::new(RecordingSurface::new());
        assert_eq!(striped.passes(), 4);
        striped.begin_frame();
        assert_eq!(striped.stripe(), 0);
        assert!(striped.next_pass());
        assert!(striped.next_pass());
        assert!(striped.next_pass());
        assert_eq!(striped.stripe(), 3);
        assert!(!striped.next_pass());

        striped.begin_frame();
        assert_eq!(striped.stripe(), 0);
    }

    #[test]
    fn striped_clips_to_current_stripe() {
        let mut striped = Striped::new(RecordingSurface::new());
        let full = Rectangle::new(Point::zero(), Size::new(128, 64))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On));

        striped.begin_frame();
        assert!(striped.next_pass());
        full.draw(&mut striped).unwrap();

        let frame = striped.inner();
        assert!(!frame.is_lit(10, 15));
        assert!(frame.is_lit(10, 16));
        assert!(frame.is_lit(127, 31));
        assert!(!frame.is_lit(10, 32));
        assert_eq!(frame.lit_count(), 128 * 16);
    }

    #[test]
    fn striped_frame_reassembles_full_drawing() {
        let full = Rectangle::new(Point::new(3, 5), Size::new(100, 50))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1));

        let mut direct = RecordingSurface::new();
        full.draw(&mut direct).unwrap();

        let mut striped = Striped::new(RecordingSurface::new());
        striped.begin_frame();
        loop {
            full.draw(&mut striped).unwrap();
            if !striped.next_pass() {
                break;
            }
        }

        assert_eq!(striped.into_inner().pixels(), direct.pixels());
    }
}
