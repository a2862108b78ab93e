//! Display geometry, timing configuration and the live screen selector.

/// Display width in pixels.
pub const DISPLAY_WIDTH: u32 = 128;

/// Display height in pixels.
pub const DISPLAY_HEIGHT: u32 = 64;

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Timing configuration for [`display_update_task`].
///
/// Screen geometry is fixed by the 128×64 panel; everything here is a
/// tunable duration.
///
/// [`display_update_task`]: crate::display_task::display_update_task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Redraw rate in Hz. One graph point is appended per redraw. Default: 2.
    pub update_frequency_hz: u32,
    /// How long each live screen stays up before switching to the other.
    /// Default: 5000 ms.
    pub screen_period_ms: u32,
    /// Minimum time the startup splash is shown. Default: 2000 ms.
    pub splash_duration_ms: u32,
    /// Minimum time the "analysis restarted" notice is shown.
    /// Default: 1500 ms.
    pub reset_notice_duration_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            update_frequency_hz: 2,
            screen_period_ms: 5000,
            splash_duration_ms: 2000,
            reset_notice_duration_ms: 1500,
        }
    }
}

impl DisplayConfig {
    /// Redraw period in milliseconds: `1000 / update_frequency_hz`.
    ///
    /// A zero frequency is treated as 1 Hz.
    pub fn update_period_ms(&self) -> u64 {
        1000 / self.update_frequency_hz.max(1) as u64
    }

    /// Redraws spent on a live screen before toggling, at least 1.
    pub fn updates_per_screen(&self) -> u32 {
        let period = self.update_period_ms().max(1);
        ((self.screen_period_ms as u64 / period) as u32).max(1)
    }
}

// ── Screen ───────────────────────────────────────────────────────────────

/// Live screens, alternated by the display task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Current and average labels over the rolling current graph.
    #[default]
    Graph,
    /// Current, average, charge and elapsed time as numbers.
    Summary,
}

impl Screen {
    /// The other live screen.
    pub fn toggle(self) -> Self {
        match self {
            Screen::Graph => Screen::Summary,
            Screen::Summary => Screen::Graph,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let c = DisplayConfig::default();
        assert_eq!(c.update_frequency_hz, 2);
        assert_eq!(c.screen_period_ms, 5000);
        assert_eq!(c.splash_duration_ms, 2000);
        assert_eq!(c.reset_notice_duration_ms, 1500);
    }

    #[test]
    fn update_period_2hz() {
        assert_eq!(DisplayConfig::default().update_period_ms(), 500);
    }

    #[test]
    fn update_period_zero_hz_falls_back_to_1hz() {
        let c = DisplayConfig {
            update_frequency_hz: 0,
            ..DisplayConfig::default()
        };
        assert_eq!(c.update_period_ms(), 1000);
    }

    #[test]
    fn updates_per_screen_default() {
        assert_eq!(DisplayConfig::default().updates_per_screen(), 10);
    }

    #[test]
    fn updates_per_screen_never_zero() {
        let c = DisplayConfig {
            screen_period_ms: 10,
            ..DisplayConfig::default()
        };
        assert_eq!(c.updates_per_screen(), 1);
    }

    #[test]
    fn screen_toggles_between_live_screens() {
        assert_eq!(Screen::default(), Screen::Graph);
        assert_eq!(Screen::Graph.toggle(), Screen::Summary);
        assert_eq!(Screen::Summary.toggle(), Screen::Graph);
    }
}
