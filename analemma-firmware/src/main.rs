//! Analemma - Looping-animation watchface firmware
//!
//! Main firmware binary for RP2040-based wearables. Renders the current
//! time as layered text over an endlessly looping animated bitmap.
//!
//! Named after the analemma, the figure-eight the sun traces when
//! photographed at the same clock time every day - a picture drawn by
//! repeating one observation forever.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc};
use embassy_rp::spi;
use embedded_graphics::pixelcolor::Rgb565;
use static_cell::ConstStaticCell;
use {defmt_rtt as _, panic_probe as _};

use analemma_core::clock::HourStyle;
use analemma_core::face::Watchface;
use analemma_core::gif::GifAnimation;
use analemma_core::layout;

use crate::screen::Screen;

mod channels;
mod screen;
mod tasks;

/// Embedded animation resource (compiled into firmware)
static ANIMATION_GIF: &[u8] = include_bytes!("../assets/toad.gif");

/// Hour display preference; the target has no settings UI, so this is
/// fixed at build time
const HOUR_STYLE: HourStyle = HourStyle::H24;

/// Pixel storage for decoded animation frames (must live forever)
static FRAME_STORAGE: ConstStaticCell<[Rgb565; layout::FRAME_PIXELS]> =
    ConstStaticCell::new([layout::BACKGROUND; layout::FRAME_PIXELS]);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Analemma firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup SPI0 for the panel
    // Pin assignments are board-specific: CLK=GPIO18, MOSI=GPIO19,
    // DC=GPIO16, CS=GPIO17, RST=GPIO20
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 62_500_000;
    let bus = spi::Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);

    let dc = Output::new(p.PIN_16, Level::Low);
    let cs = Output::new(p.PIN_17, Level::High);
    let rst = Output::new(p.PIN_20, Level::Low);

    let screen = Screen::new(bus, dc, cs, rst);
    info!("Panel initialized");

    // RTC runs from a build-time seed until the host sets it
    let mut rtc = Rtc::new(p.RTC);
    if rtc.now().is_err() {
        let seed = DateTime {
            year: 2025,
            month: 1,
            day: 1,
            day_of_week: DayOfWeek::Wednesday,
            hour: 0,
            minute: 0,
            second: 0,
        };
        rtc.set_datetime(seed).unwrap();
        info!("RTC seeded with build-time default");
    }
    let start = tasks::clock::time_of_day(&rtc);

    // Build the face over the embedded resource
    let storage = FRAME_STORAGE.take();
    let face = Watchface::new(GifAnimation::new(ANIMATION_GIF), storage, HOUR_STYLE);

    // Spawn tasks
    spawner.spawn(tasks::clock_task(rtc)).unwrap();
    spawner.spawn(tasks::face_task(face, screen, start)).unwrap();

    info!("All tasks spawned, face running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
