//! Transient overlay messages (splash screen, reset notices).
//!
//! An active message takes priority over the live screens until its
//! minimum display time has elapsed. Expiry is lazy: it only happens when
//! [`MessageOverlay::is_active()`] is called.

/// Identifies the text shown by the message screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageCode {
    /// No message; live screens are shown.
    #[default]
    None,
    /// Product name and firmware version, shown at startup.
    Splash,
    /// Shown after the accumulated charge and timers were restarted.
    AnalysisReset,
    /// Any other raw code. Rendered as its number.
    ///
    /// Values 0 to 2 alias the named variants; [`MessageOverlay`] stores
    /// them as those variants.
    Other(u8),
}

impl MessageCode {
    /// Raw numeric code.
    pub const fn code(self) -> u8 {
        match self {
            MessageCode::None => 0,
            MessageCode::Splash => 1,
            MessageCode::AnalysisReset => 2,
            MessageCode::Other(code) => code,
        }
    }

    /// Same code with `Other(0..=2)` folded into the named variants.
    pub const fn canonical(self) -> Self {
        match self {
            MessageCode::Other(0) => MessageCode::None,
            MessageCode::Other(1) => MessageCode::Splash,
            MessageCode::Other(2) => MessageCode::AnalysisReset,
            code => code,
        }
    }
}

impl From<u8> for MessageCode {
    fn from(code: u8) -> Self {
        match code {
            0 => MessageCode::None,
            1 => MessageCode::Splash,
            2 => MessageCode::AnalysisReset,
            other => MessageCode::Other(other),
        }
    }
}

impl From<MessageCode> for u8 {
    fn from(code: MessageCode) -> Self {
        code.code()
    }
}

/// Monotonic millisecond stopwatch.
///
/// Implemented over the platform clock by the firmware and over a manual
/// clock in tests.
pub trait ElapsedTimer {
    /// Restart counting from zero.
    fn restart(&mut self);

    /// Milliseconds since the last [`restart()`](Self::restart).
    fn elapsed_ms(&self) -> u32;
}

/// Message overlay state machine.
///
/// Holds the current [`MessageCode`], its minimum display time, and a
/// stopwatch started on every activation.
#[derive(Debug)]
pub struct MessageOverlay<T> {
    code: MessageCode,
    min_duration_ms: u32,
    timer: T,
}

impl<T: ElapsedTimer> MessageOverlay<T> {
    /// Create an idle overlay.
    pub fn new(timer: T) -> Self {
        let mut overlay = Self {
            code: MessageCode::None,
            min_duration_ms: 0,
            timer,
        };
        overlay.reset();
        overlay
    }

    /// Return to the idle state and restart the stopwatch.
    pub fn reset(&mut self) {
        self.code = MessageCode::None;
        self.min_duration_ms = 0;
        self.timer.restart();
    }

    /// Make `code` the current message for at least `min_duration_ms`.
    ///
    /// The stopwatch restarts on every call, including repeated calls with
    /// the same code. [`MessageCode::None`] clears the overlay.
    ///
    /// Returns `true` if the message screen must be repainted: the new code
    /// is not `None` and differs from the code held right before this call.
    /// The comparison is against the stored code only, so a code that has
    /// run past its duration but was never checked still counts as current.
    ///
    /// # Examples
    ///
    /// ```
    /// use pmon::monitor::{ElapsedTimer, MessageCode, MessageOverlay};
    ///
    /// struct Frozen;
    /// impl ElapsedTimer for Frozen {
    ///     fn restart(&mut self) {}
    ///     fn elapsed_ms(&self) -> u32 { 0 }
    /// }
    ///
    /// let mut overlay = MessageOverlay::new(Frozen);
    /// assert!(overlay.activate(MessageCode::Splash, 1000));
    /// assert!(!overlay.activate(MessageCode::Splash, 1000));
    /// assert!(overlay.activate(MessageCode::AnalysisReset, 1000));
    /// ```
    pub fn activate(&mut self, code: MessageCode, min_duration_ms: u32) -> bool {
        let code = code.canonical();
        let previous = self.code;
        self.code = code;
        self.min_duration_ms = min_duration_ms;
        self.timer.restart();

        #[cfg(feature = "defmt")]
        defmt::debug!("message {} for {} ms", code, min_duration_ms);

        code != MessageCode::None && code != previous
    }

    /// Returns `true` while a message is set and its minimum time has not
    /// elapsed.
    ///
    /// The first check after the duration runs out clears the message and
    /// returns `false`.
    pub fn is_active(&mut self) -> bool {
        if self.code == MessageCode::None {
            return false;
        }

        if self.timer.elapsed_ms() < self.min_duration_ms {
            return true;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("message {} expired", self.code);

        self.code = MessageCode::None;
        false
    }

    /// Current message code, without evaluating expiry.
    pub fn code(&self) -> MessageCode {
        self.code
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
