/// Latest values from the measurement side, shared with the display task.
///
/// The measurement code overwrites the fields as it samples and calls
/// [`request_reset()`](Self::request_reset) when the analysis restarts.
/// The display side copies the snapshot and consumes the reset request
/// with [`take_reset()`](Self::take_reset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readings {
    /// Instantaneous current in mA.
    pub current_ma: u16,
    /// Running average current in mA.
    pub average_ma: u16,
    /// Charge accumulated since the last reset, in mAh.
    pub charge_mah: u16,
    /// Session time since the last reset, in seconds.
    pub elapsed_secs: u16,
    reset_pending: bool,
}

impl Readings {
    /// Zeroed readings with no pending reset.
    pub const fn new() -> Self {
        Self {
            current_ma: 0,
            average_ma: 0,
            charge_mah: 0,
            elapsed_secs: 0,
            reset_pending: false,
        }
    }

    /// Update all measured values at once.
    pub fn update(&mut self, current_ma: u16, average_ma: u16, charge_mah: u16, elapsed_secs: u16) {
        self.current_ma = current_ma;
        self.average_ma = average_ma;
        self.charge_mah = charge_mah;
        self.elapsed_secs = elapsed_secs;
    }

    /// Zero the accumulated values and flag the restart for the display.
    pub fn request_reset(&mut self) {
        self.average_ma = 0;
        self.charge_mah = 0;
        self.elapsed_secs = 0;
        self.reset_pending = true;
    }

    /// Returns `true` once per [`request_reset()`](Self::request_reset).
    ///
    /// # Examples
    ///
    /// ```
    /// use pmon::monitor::Readings;
    ///
    /// let mut readings = Readings::new();
    /// readings.request_reset();
    /// assert!(readings.take_reset());
    /// assert!(!readings.take_reset());
    /// ```
    pub fn take_reset(&mut self) -> bool {
        core::mem::take(&mut self.reset_pending)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zeroed() {
        let mut r = Readings::default();
        assert_eq!(r, Readings::new());
        assert_eq!(r.current_ma, 0);
        assert!(!r.take_reset());
    }

    #[test]
    fn update_sets_all_fields() {
        let mut r = Readings::new();
        r.update(120, 95, 14, 3600);
        assert_eq!(r.current_ma, 120);
        assert_eq!(r.average_ma, 95);
        assert_eq!(r.charge_mah, 14);
        assert_eq!(r.elapsed_secs, 3600);
    }

    #[test]
    fn reset_zeroes_accumulators_but_keeps_current() {
        let mut r = Readings::new();
        r.update(120, 95, 14, 3600);
        r.request_reset();
        assert_eq!(r.current_ma, 120);
        assert_eq!(r.average_ma, 0);
        assert_eq!(r.charge_mah, 0);
        assert_eq!(r.elapsed_secs, 0);
    }

    #[test]
    fn reset_is_consumed_once() {
        let mut r = Readings::new();
        r.request_reset();
        r.request_reset();
        assert!(r.take_reset());
        assert!(!r.take_reset());
    }
}
