//! Error types for the OLED display driver.

use display_interface::DisplayError;

/// Errors raised by the OLED lifecycle.
///
/// Drawing into the frame buffer cannot fail; only the bus transfers
/// around it can.
#[derive(Debug)]
pub enum OledError {
    /// The SSD1306 initialisation sequence was not acknowledged.
    InitializationFailed(DisplayError),
    /// Sending the frame buffer to the panel failed.
    Flush(DisplayError),
    /// A flush was attempted before
    /// [`OledDriver::init()`](crate::OledDriver::init) succeeded.
    NotInitialized,
}

/// Bus errors outside initialisation come from frame transfers.
impl From<DisplayError> for OledError {
    fn from(e: DisplayError) -> Self {
        OledError::Flush(e)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OledError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::InitializationFailed(_) => defmt::write!(f, "OLED init not acknowledged"),
            OledError::Flush(_) => defmt::write!(f, "OLED frame transfer failed"),
            OledError::NotInitialized => defmt::write!(f, "OLED flushed before init"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_error_maps_to_flush() {
        let err = OledError::from(DisplayError::BusWriteError);
        assert!(matches!(err, OledError::Flush(DisplayError::BusWriteError)));
    }
}
