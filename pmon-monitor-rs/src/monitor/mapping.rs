use micromath::F32;

use super::{MAX_CURRENT_MA, PLOT_BOTTOM_Y, PLOT_TOP_Y};

// Curve constants for `b * ln(ma + a) - c`, fitted so that 0 mA scales to
// 0 and MAX_CURRENT_MA scales to the plot height:
//   b = (PLOT_BOTTOM_Y - PLOT_TOP_Y) / (ln(MAX_CURRENT_MA + a) - ln(a))
//   c ~= b * ln(a), nudged up so both ends round well clear of .5
// A larger `a` flattens the curve toward linear.
const CURVE_A: f32 = 30.0;
const CURVE_B: f32 = 7.355;
const CURVE_C: f32 = 25.1;

/// Map a current reading to a pixel row inside the plot band.
///
/// The curve sits between linear and logarithmic: low currents get more
/// vertical resolution than high ones. Readings above [`MAX_CURRENT_MA`]
/// saturate, and the result is always within
/// `PLOT_TOP_Y..=PLOT_BOTTOM_Y`.
///
/// # Examples
///
/// ```
/// use pmon::monitor::{current_to_display_y, PLOT_BOTTOM_Y, PLOT_TOP_Y};
///
/// assert_eq!(current_to_display_y(0), PLOT_BOTTOM_Y);
/// assert_eq!(current_to_display_y(2000), PLOT_TOP_Y);
/// assert_eq!(current_to_display_y(5000), PLOT_TOP_Y);
/// ```
pub fn current_to_display_y(current_ma: u16) -> u8 {
    let current_ma = current_ma.min(MAX_CURRENT_MA);

    let scaled = CURVE_B * F32(current_ma as f32 + CURVE_A).ln().0 - CURVE_C;
    let height = (PLOT_BOTTOM_Y - PLOT_TOP_Y) as f32;
    let offset = (scaled + 0.5).clamp(0.0, height) as u8;

    PLOT_BOTTOM_Y - offset
}

// ── Tests ────────────────────────────────────────────────────────────────
