//! SSD1306 driver in async buffered graphics mode.
//!
//! [`OledDriver`] separates the display lifecycle (construction without
//! I2C traffic, async initialisation, frame flush) from drawing: screens are
//! rendered synchronously into the in-memory frame buffer through the
//! [`Surface`] impl on [`OledDisplay`], then sent with
//! [`OledDriver::flush()`].

use display_interface_i2c::I2CInterface;
use embedded_hal_async::i2c::I2c;
use ssd1306::{
    mode::BufferedGraphicsModeAsync, prelude::*, I2CDisplayInterface, Ssd1306Async,
};

use crate::error::OledError;
use crate::surface::Surface;

/// Buffered 128×64 SSD1306 over I2C.
pub type OledDisplay<I2C> = Ssd1306Async<
    I2CInterface<I2C>,
    DisplaySize128x64,
    BufferedGraphicsModeAsync<DisplaySize128x64>,
>;

/// The SSD1306 frame buffer holds the whole frame, so every screen is
/// drawn in a single pass. The buffer is cleared at the start of a frame
/// and sent to the panel by [`OledDriver::flush()`].
impl<I2C> Surface for OledDisplay<I2C>
where
    I2C: I2c,
{
    fn begin_frame(&mut self) {
        self.clear_buffer();
    }

    fn next_pass(&mut self) -> bool {
        false
    }
}

/// Async driver for the power monitor's SSD1306 128×64 OLED.
///
/// # Lifecycle
///
/// 1. [`OledDriver::new()`] — constructs the driver without any I2C traffic.
/// 2. [`OledDriver::init()`] — sends the SSD1306 initialisation sequence.
/// 3. Render into the frame buffer via [`OledDriver::display_mut()`].
/// 4. [`OledDriver::flush()`] — transfers the frame buffer to hardware.
pub struct OledDriver<I2C> {
    display: OledDisplay<I2C>,
    initialized: bool,
}

impl<I2C> OledDriver<I2C>
where
    I2C: I2c,
{
    /// Construct an uninitialised driver. No I2C traffic is generated.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access).
    /// * `address` — 7-bit I2C device address (typically `0x3C` or `0x3D`).
    pub fn new(i2c: I2C, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let display = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self {
            display,
            initialized: false,
        }
    }

    /// Send the SSD1306 initialisation sequence.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::InitializationFailed`] with the bus error if the
    /// display does not respond.
    pub async fn init(&mut self) -> Result<(), OledError> {
        self.display
            .init()
            .await
            .map_err(OledError::InitializationFailed)?;
        self.initialized = true;
        Ok(())
    }

    /// Transfer the frame buffer to the display.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::NotInitialized`] before a successful
    /// [`init()`](Self::init), or [`OledError::Flush`] on a bus failure.
    pub async fn flush(&mut self) -> Result<(), OledError> {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }
        self.display.flush().await?;
        Ok(())
    }

    /// The frame buffer as a drawing [`Surface`], or `None` before
    /// [`init()`](Self::init) succeeded.
    pub fn display_mut(&mut self) -> Option<&mut OledDisplay<I2C>> {
        if self.initialized {
            Some(&mut self.display)
        } else {
            None
        }
    }
}
