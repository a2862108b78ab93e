//! Periodic display loop for Embassy firmware.
//!
//! [`display_update_task`] owns the [`Renderer`] and the OLED. It reads the
//! shared [`Readings`] on every tick, feeds the graph, alternates the live
//! screens and shows the splash and "analysis restarted" notices.

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, mutex::Mutex};
use embassy_time::{Duration, Instant, Timer};
use embedded_hal_async::i2c::I2c;
use pmon::monitor::{ElapsedTimer, MessageCode, Readings};

use crate::driver::OledDriver;
use crate::layout::{DisplayConfig, Screen};
use crate::renderer::Renderer;

/// [`ElapsedTimer`] over the Embassy time driver.
pub struct EmbassyTimer {
    start: Instant,
}

impl EmbassyTimer {
    /// A stopwatch started now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for EmbassyTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl ElapsedTimer for EmbassyTimer {
    fn restart(&mut self) {
        self.start = Instant::now();
    }

    fn elapsed_ms(&self) -> u32 {
        self.start.elapsed().as_millis().min(u32::MAX as u64) as u32
    }
}

/// Periodic display update loop.
///
/// This is a regular `async fn`, **not** an Embassy `#[task]`; wrap it in a
/// concrete task since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn oled_task(
///     driver: OledDriver<MyConcreteI2cType>,
///     readings: &'static Mutex<CriticalSectionRawMutex, Readings>,
///     config: DisplayConfig,
/// ) {
///     display_update_task(driver, readings, config).await;
/// }
/// ```
///
/// # Control flow
///
/// 1. Initialise the display and paint the splash message.
/// 2. Every `config.update_period_ms()`:
///    - Copy the [`Readings`] and consume a pending reset (mutex held only
///      for the copy).
///    - On reset, clear the graph and show the "analysis restarted" notice.
///    - Append the current reading to the graph.
///    - Switch between graph and summary every `config.screen_period_ms`.
///    - Render the live screen (skipped while a message is up) and flush.
///
/// # Errors
///
/// * Initialisation failure: logs the error and **returns**.
/// * Render / flush failure: logs the error and continues with the next tick.
pub async fn display_update_task<I2C>(
    mut driver: OledDriver<I2C>,
    readings: &'static Mutex<CriticalSectionRawMutex, Readings>,
    config: DisplayConfig,
) where
    I2C: I2c,
{
    if let Err(_e) = driver.init().await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED init failed: {}", _e);
        return;
    }

    #[cfg(feature = "defmt")]
    defmt::info!("OLED initialised, {}", config);

    let mut renderer = Renderer::new(EmbassyTimer::new());
    renderer.initialize();

    if let Some(display) = driver.display_mut() {
        if renderer
            .activate_message(display, MessageCode::Splash, config.splash_duration_ms)
            .is_err()
        {
            #[cfg(feature = "defmt")]
            defmt::error!("Splash render failed");
        }
    }
    if let Err(_e) = driver.flush().await {
        #[cfg(feature = "defmt")]
        defmt::error!("Flush failed: {}", _e);
    }

    let period = Duration::from_millis(config.update_period_ms());
    let updates_per_screen = config.updates_per_screen();
    let mut screen = Screen::default();
    let mut updates_on_screen = 0u32;

    loop {
        Timer::after(period).await;

        let (snapshot, reset) = {
            let mut shared = readings.lock().await;
            let reset = shared.take_reset();
            (*shared, reset)
        };

        if reset {
            renderer.clear_graph();
        }
        renderer.append_sample(snapshot.current_ma);

        updates_on_screen += 1;
        if updates_on_screen >= updates_per_screen {
            updates_on_screen = 0;
            screen = screen.toggle();
        }

        let dirty = {
            let Some(display) = driver.display_mut() else {
                continue;
            };

            let mut dirty = false;
            if reset {
                #[cfg(feature = "defmt")]
                defmt::info!("Analysis restarted");

                match renderer.activate_message(
                    display,
                    MessageCode::AnalysisReset,
                    config.reset_notice_duration_ms,
                ) {
                    Ok(painted) => dirty |= painted,
                    Err(_) => {
                        #[cfg(feature = "defmt")]
                        defmt::error!("Message render failed");
                    }
                }
            }

            match renderer.render_screen(display, screen, &snapshot) {
                Ok(drawn) => dirty | drawn,
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("Render failed");
                    continue;
                }
            }
        };

        if !dirty {
            continue;
        }

        if let Err(_e) = driver.flush().await {
            #[cfg(feature = "defmt")]
            defmt::error!("Flush failed: {}", _e);
        }
    }
}
