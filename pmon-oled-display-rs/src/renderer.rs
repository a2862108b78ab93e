//! Graph, summary and message screens.
//!
//! [`Renderer`] owns the rolling graph buffer and the message overlay and
//! draws one of three screens onto a [`Surface`]. Each screen is split
//! into elements assigned to frame stripes (see [`FRAME_STRIPES`]); on a
//! multi-pass surface an element is only drawn in the passes that cover
//! its stripes, on a single-pass surface everything is drawn at once.
//!
//! An active overlay message has absolute priority: the live screens are
//! skipped until it expires.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{ascii::FONT_8X13, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle, RoundedRectangle},
    text::Text,
};
use heapless::String;
use pmon::monitor::{
    current_to_display_y, ElapsedTimer, MessageCode, MessageOverlay, Readings, SampleBuffer,
    GRAPH_CAPACITY, PLOT_BOTTOM_Y, PLOT_TOP_Y,
};

use crate::layout::{Screen, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::surface::{pass_covers, Surface, FRAME_STRIPES};

/// Horizontal distance between graph points.
const GRAPH_X_STEP: i32 = 2;

/// Corner radius of the message frame.
const MESSAGE_CORNER_RADIUS: u32 = 5;

const SPLASH_VERSION: &str = concat!("Ver ", env!("CARGO_PKG_VERSION"));

struct GraphText;

impl GraphText {
    const LABEL_X: i32 = 0;
    const VALUE_X: i32 = 70;
    const CURRENT_Y: i32 = 10;
    const AVERAGE_Y: i32 = 25;
}

/// One labelled number on the summary screen.
struct SummaryRow {
    label: &'static str,
    baseline: i32,
    value_x: i32,
    value_width: usize,
    unit_x: i32,
    unit: &'static str,
}

/// Summary rows in stripe order: current, average, charge, elapsed time.
const SUMMARY_ROWS: [SummaryRow; FRAME_STRIPES as usize] = [
    SummaryRow {
        label: "I",
        baseline: 10,
        value_x: 65,
        value_width: 4,
        unit_x: 103,
        unit: "ma",
    },
    SummaryRow {
        label: "Iavg",
        baseline: 27,
        value_x: 65,
        value_width: 4,
        unit_x: 103,
        unit: "ma",
    },
    SummaryRow {
        label: "Q",
        baseline: 44,
        value_x: 65,
        value_width: 4,
        unit_x: 103,
        unit: "mah",
    },
    SummaryRow {
        label: "T",
        baseline: 61,
        value_x: 49,
        value_width: 6,
        unit_x: 101,
        unit: "sec",
    },
];

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_8X13, BinaryColor::On)
}

fn stroke() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(BinaryColor::On, 1)
}

fn draw_text<D>(display: &mut D, text: &str, x: i32, y: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::new(text, Point::new(x, y), text_style()).draw(display)?;
    Ok(())
}

/// Begin a frame and call `draw_pass(surface, pass, passes)` once per pass.
fn run_frame<S, F>(surface: &mut S, mut draw_pass: F) -> Result<(), S::Error>
where
    S: Surface,
    F: FnMut(&mut S, u8, u8) -> Result<(), S::Error>,
{
    let passes = surface.passes().max(1);
    surface.begin_frame();

    let mut pass = 0u8;
    loop {
        draw_pass(surface, pass, passes)?;
        pass = pass.saturating_add(1);
        if !surface.next_pass() {
            return Ok(());
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────────────

/// Draw the parts of the graph screen that belong to `pass`.
///
/// Stripe 0 holds the current reading, stripe 1 the average, stripes 2–3
/// the trace and the closing line, stripe 3 the baseline. The trace joins
/// the buffered points oldest to newest, [`GRAPH_X_STEP`] pixels apart;
/// fewer than two points draw no segments.
pub fn draw_graph_pass<D, const N: usize>(
    display: &mut D,
    pass: u8,
    passes: u8,
    graph: &SampleBuffer<N>,
    current: &str,
    average: &str,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if pass_covers(pass, passes, 0, 0) {
        draw_text(display, "Current", GraphText::LABEL_X, GraphText::CURRENT_Y)?;
        draw_text(display, current, GraphText::VALUE_X, GraphText::CURRENT_Y)?;
    }

    if pass_covers(pass, passes, 1, 1) {
        draw_text(display, "Average", GraphText::LABEL_X, GraphText::AVERAGE_Y)?;
        draw_text(display, average, GraphText::VALUE_X, GraphText::AVERAGE_Y)?;
    }

    if pass_covers(pass, passes, 2, 3) {
        let mut points = graph.iter();
        let first_y = points.next().unwrap_or(PLOT_BOTTOM_Y);
        let mut last = Point::new(0, i32::from(first_y));

        for y in points {
            let next = Point::new(last.x + GRAPH_X_STEP, i32::from(y));
            Line::new(last, next).into_styled(stroke()).draw(display)?;
            last = next;
        }

        let closing_x = last.x + 1;
        Line::new(
            Point::new(closing_x, i32::from(PLOT_BOTTOM_Y)),
            Point::new(closing_x, i32::from(PLOT_TOP_Y)),
        )
        .into_styled(stroke())
        .draw(display)?;
    }

    if pass_covers(pass, passes, 3, 3) {
        let bottom = DISPLAY_HEIGHT as i32 - 1;
        Line::new(Point::new(0, bottom), Point::new(DISPLAY_WIDTH as i32 - 1, bottom))
            .into_styled(stroke())
            .draw(display)?;
    }

    Ok(())
}

/// Draw the summary rows that belong to `pass`, one row per stripe.
///
/// `values` are current (mA), average (mA), charge (mAh) and elapsed
/// time (s), right-aligned in their columns.
pub fn draw_summary_pass<D>(
    display: &mut D,
    pass: u8,
    passes: u8,
    values: [u16; FRAME_STRIPES as usize],
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    for (stripe, (row, value)) in SUMMARY_ROWS.iter().zip(values).enumerate() {
        let stripe = stripe as u8;
        if !pass_covers(pass, passes, stripe, stripe) {
            continue;
        }

        let mut buf: String<8> = String::new();
        let _ = write!(buf, "{:>width$}", value, width = row.value_width);

        draw_text(display, row.label, 0, row.baseline)?;
        draw_text(display, &buf, row.value_x, row.baseline)?;
        draw_text(display, row.unit, row.unit_x, row.baseline)?;
    }

    Ok(())
}

/// Draw the message screen for `code`: a rounded border plus the
/// message text. Unknown codes show their raw number.
pub fn draw_message<D>(display: &mut D, code: MessageCode) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    RoundedRectangle::with_equal_corners(
        Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)),
        Size::new(MESSAGE_CORNER_RADIUS, MESSAGE_CORNER_RADIUS),
    )
    .into_styled(stroke())
    .draw(display)?;

    match code {
        MessageCode::Splash => {
            draw_text(display, "Power Play", 22, 19)?;
            draw_text(display, "UNO OLED", 30, 37)?;
            draw_text(display, SPLASH_VERSION, 27, 54)?;
        }
        MessageCode::AnalysisReset => {
            draw_text(display, "Analysis", 27, 26)?;
            draw_text(display, "Restarted", 27, 45)?;
        }
        other => {
            draw_text(display, "Message: ", 0, 30)?;
            let mut buf: String<8> = String::new();
            let _ = write!(buf, "{:>4}", other.code());
            draw_text(display, &buf, 65, 30)?;
        }
    }

    Ok(())
}

// ── Renderer ─────────────────────────────────────────────────────────────

/// Screen renderer for the power monitor.
///
/// Owns the graph buffer and the message overlay; the drawing surface is
/// passed in per call.
///
/// # Examples
///
/// ```
/// use pmon::monitor::{ElapsedTimer, MessageCode};
/// use pmon_oled_display_rs::{Renderer, Striped};
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
/// # struct Frozen;
/// # impl ElapsedTimer for Frozen {
/// #     fn restart(&mut self) {}
/// #     fn elapsed_ms(&self) -> u32 { 0 }
/// # }
/// let mut surface = Striped::new(Frame);
/// let mut renderer = Renderer::new(Frozen);
///
/// renderer.append_sample(120);
/// assert_eq!(renderer.render_graph_screen(&mut surface, 120, 95), Ok(true));
///
/// // The splash screen now preempts the graph.
/// assert_eq!(renderer.activate_message(&mut surface, MessageCode::Splash, 2000), Ok(true));
/// assert_eq!(renderer.render_graph_screen(&mut surface, 120, 95), Ok(false));
/// ```
pub struct Renderer<T> {
    graph: SampleBuffer<GRAPH_CAPACITY>,
    overlay: MessageOverlay<T>,
}

impl<T: ElapsedTimer> Renderer<T> {
    /// Create a renderer with an empty graph and no active message.
    pub fn new(timer: T) -> Self {
        Self {
            graph: SampleBuffer::new(),
            overlay: MessageOverlay::new(timer),
        }
    }

    /// Clear the graph and any active message.
    pub fn initialize(&mut self) {
        self.graph.clear();
        self.overlay.reset();
    }

    /// Drop every graph point, e.g. after an analysis restart.
    pub fn clear_graph(&mut self) {
        self.graph.clear();
    }

    /// Quantize a current reading and append it to the graph.
    pub fn append_sample(&mut self, current_ma: u16) {
        self.graph.push(current_to_display_y(current_ma));
    }

    /// The graph points, as pixel rows.
    pub fn graph(&self) -> &SampleBuffer<GRAPH_CAPACITY> {
        &self.graph
    }

    /// Returns `true` while an overlay message preempts the live screens.
    /// Expires the message if its time is up.
    pub fn is_message_active(&mut self) -> bool {
        self.overlay.is_active()
    }

    /// Current overlay message code, without evaluating expiry.
    pub fn message_code(&self) -> MessageCode {
        self.overlay.code()
    }

    /// Draw the graph screen unless a message is active.
    ///
    /// Returns `Ok(false)` without touching the surface while the overlay
    /// has priority.
    pub fn render_graph_screen<S: Surface>(
        &mut self,
        surface: &mut S,
        current_ma: u16,
        average_ma: u16,
    ) -> Result<bool, S::Error> {
        if self.overlay.is_active() {
            return Ok(false);
        }

        let mut current: String<10> = String::new();
        let _ = write!(current, "{:>4} ma", current_ma);
        let mut average: String<10> = String::new();
        let _ = write!(average, "{:>4} ma", average_ma);

        let graph = &self.graph;
        run_frame(surface, |s, pass, passes| {
            draw_graph_pass(s, pass, passes, graph, &current, &average)
        })?;
        Ok(true)
    }

    /// Draw the summary screen unless a message is active.
    ///
    /// Returns `Ok(false)` without touching the surface while the overlay
    /// has priority.
    pub fn render_summary_screen<S: Surface>(
        &mut self,
        surface: &mut S,
        current_ma: u16,
        average_ma: u16,
        charge_mah: u16,
        elapsed_secs: u16,
    ) -> Result<bool, S::Error> {
        if self.overlay.is_active() {
            return Ok(false);
        }

        let values = [current_ma, average_ma, charge_mah, elapsed_secs];
        run_frame(surface, |s, pass, passes| draw_summary_pass(s, pass, passes, values))?;
        Ok(true)
    }

    /// Draw `screen` from a readings snapshot unless a message is active.
    pub fn render_screen<S: Surface>(
        &mut self,
        surface: &mut S,
        screen: Screen,
        readings: &Readings,
    ) -> Result<bool, S::Error> {
        match screen {
            Screen::Graph => {
                self.render_graph_screen(surface, readings.current_ma, readings.average_ma)
            }
            Screen::Summary => self.render_summary_screen(
                surface,
                readings.current_ma,
                readings.average_ma,
                readings.charge_mah,
                readings.elapsed_secs,
            ),
        }
    }

    /// Show `code` for at least `min_duration_ms`.
    ///
    /// Paints the message screen right away when the code changed (see
    /// [`MessageOverlay::activate()`]) and returns `Ok(true)` in that case.
    /// [`MessageCode::None`] clears the overlay without drawing.
    pub fn activate_message<S: Surface>(
        &mut self,
        surface: &mut S,
        code: MessageCode,
        min_duration_ms: u32,
    ) -> Result<bool, S::Error> {
        if !self.overlay.activate(code, min_duration_ms) {
            return Ok(false);
        }
        self.render_active_message(surface)?;
        Ok(true)
    }

    /// Paint the current message screen, whether or not it has expired.
    pub fn render_active_message<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let code = self.overlay.code();
        run_frame(surface, |s, _, _| draw_message(s, code))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
