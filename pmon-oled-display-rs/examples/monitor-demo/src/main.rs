//! Power monitor display demo
//!
//! Hardware demonstration of the OLED screens without a current sensor: a
//! synthetic load task writes a varying current into the shared
//! [`Readings`], and the display task graphs and summarises it. Pressing
//! the reset button restarts the analysis and shows the reset notice.
//!
//! # Wiring
//!
//! | Signal       | Pico 2 Pin | Notes                       |
//! |--------------|------------|-----------------------------|
//! | I2C0 SDA     | GP20       |                             |
//! | I2C0 SCL     | GP21       |                             |
//! | Reset button | GP15       | to GND, internal pull-up    |
//! | OLED VCC     | 3V3        |                             |
//! | OLED GND     | GND        |                             |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use micromath::F32;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pmon::monitor::Readings;
use pmon_oled_display_rs::{display_update_task, DisplayConfig, OledDriver};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Latest readings, written by the load task and read by the display task.
static READINGS: StaticCell<Mutex<CriticalSectionRawMutex, Readings>> = StaticCell::new();

/// Raised by the reset button, consumed by the load task.
static RESET_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Synthetic sampling period.
const SAMPLE_PERIOD_MS: u64 = 100;

/// Milliamp-milliseconds per milliamp-hour.
const MA_MS_PER_MAH: u64 = 3_600_000;

type OledI2c = I2c<'static, I2C0, i2c::Async>;

/// Thin wrapper that monomorphises the generic `display_update_task`.
#[embassy_executor::task]
async fn oled_task(
    driver: OledDriver<OledI2c>,
    readings: &'static Mutex<CriticalSectionRawMutex, Readings>,
    config: DisplayConfig,
) {
    display_update_task(driver, readings, config).await;
}

/// Produces a slowly drifting load between roughly 20 mA and 1.6 A and
/// keeps the average, charge and session time that a real current sensor
/// front end would maintain.
#[embassy_executor::task]
async fn load_task(readings: &'static Mutex<CriticalSectionRawMutex, Readings>) {
    info!("Synthetic load task started");

    let mut t = 0.0f32;
    let mut ticks = 0u64;
    let mut charge_ma_ms = 0u64;

    loop {
        Timer::after(Duration::from_millis(SAMPLE_PERIOD_MS)).await;
        t += SAMPLE_PERIOD_MS as f32 / 1000.0;

        let wave = (F32(t * 0.7).sin().abs() * F32(t * 0.13).sin().abs()).0;
        let current_ma = (20.0 + 1580.0 * wave) as u16;

        let mut shared = readings.lock().await;
        if RESET_REQUEST.try_take().is_some() {
            ticks = 0;
            charge_ma_ms = 0;
            shared.request_reset();
        }

        ticks += 1;
        charge_ma_ms += current_ma as u64 * SAMPLE_PERIOD_MS;
        let elapsed_ms = ticks * SAMPLE_PERIOD_MS;
        let average_ma = (charge_ma_ms / elapsed_ms) as u16;

        shared.update(
            current_ma,
            average_ma,
            (charge_ma_ms / MA_MS_PER_MAH) as u16,
            (elapsed_ms / 1000).min(u16::MAX as u64) as u16,
        );
    }
}

/// Restarts the analysis on every press of the active-low reset button.
#[embassy_executor::task]
async fn button_task(mut button: Input<'static>) {
    loop {
        button.wait_for_falling_edge().await;
        info!("Reset button pressed");
        RESET_REQUEST.signal(());

        // Debounce.
        Timer::after(Duration::from_millis(200)).await;
        button.wait_for_high().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Power monitor display demo starting");

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    // OLED display at the standard SSD1306 I2C address.
    let oled_driver = OledDriver::new(i2c, 0x3C);
    let button = Input::new(p.PIN_15, Pull::Up);
    let readings = READINGS.init(Mutex::new(Readings::new()));

    spawner
        .spawn(oled_task(oled_driver, readings, DisplayConfig::default()))
        .unwrap();
    spawner.spawn(load_task(readings)).unwrap();
    spawner.spawn(button_task(button)).unwrap();

    info!("All tasks spawned");
}
