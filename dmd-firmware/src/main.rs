//! DMD firmware
//!
//! Firmware binary for RP2040 boards driving 32x16 monochrome LED panels.
//! Shows the marquee from display.toml and keeps the panels refreshed.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use dmd_core::config::DisplayConfig;
use dmd_core::fonts::SYSTEM_5X7;
use dmd_core::{Dmd, TestPattern};

mod board;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("DMD firmware starting...");

    let p = embassy_rp::init(Default::default());

    let config = match config::display_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid display config: {}, using defaults", e);
            DisplayConfig::default()
        }
    };
    info!(
        "Display: {}x{} panels, scan every {} us",
        config.panels_wide, config.panels_high, config.scan_interval_us
    );

    let panel = board::init_panel(p, &config);
    let mut dmd = unwrap!(Dmd::from_config(panel, &config));
    unwrap!(dmd.select_font_table(&SYSTEM_5X7));

    if config.marquee.is_enabled() {
        // Start just off the edge the text scrolls in from
        let left = if config.marquee.dx < 0 { dmd.width() } else { 0 };
        let top = match dmd.font() {
            Some(font) => (dmd.height() - i32::from(font.height())) / 2,
            None => 0,
        };
        dmd.draw_marquee(config.marquee.text.as_bytes(), left, top);
        info!("Marquee: \"{}\"", config.marquee.text.as_str());
    } else {
        dmd.draw_test_pattern(TestPattern::Alt0);
        info!("No marquee configured, showing test pattern");
    }

    spawner.spawn(tasks::display_task(dmd, config)).unwrap();

    info!("All tasks spawned");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
