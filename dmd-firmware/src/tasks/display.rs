//! Display refresh task
//!
//! Drives one scan slice per tick and advances the marquee every
//! `step_ms` worth of slices. The panel only stays lit while this runs.

use defmt::*;
use dmd_core::config::DisplayConfig;
use dmd_core::{Dmd, ScanOutcome};
use embassy_time::{Duration, Ticker};

use crate::board::BoardPanel;

/// Refresh task - owns the display for the life of the firmware
#[embassy_executor::task]
pub async fn display_task(mut dmd: Dmd<'static, BoardPanel>, config: DisplayConfig) {
    info!(
        "Display task started: {}x{} px, {} Hz refresh",
        dmd.width(),
        dmd.height(),
        config.refresh_rate_hz()
    );

    let mut ticker = Ticker::every(Duration::from_micros(config.scan_interval_us as u64));
    let scans_per_step = config.scans_per_marquee_step();
    let dx = i32::from(config.marquee.dx);
    let dy = i32::from(config.marquee.dy);
    let mut scans = 0u32;
    let mut skipped = 0u32;

    loop {
        ticker.next().await;

        match dmd.scan_display() {
            Ok(ScanOutcome::Scanned(_)) => {}
            Ok(ScanOutcome::Skipped) => {
                skipped = skipped.wrapping_add(1);
                trace!("Scan skipped, bus busy ({} total)", skipped);
            }
            Err(_) => warn!("Scan transmit failed during {}", dmd.scan_phase()),
        }

        if dmd.marquee().is_none() {
            continue;
        }

        scans += 1;
        if scans >= scans_per_step {
            scans = 0;
            if dmd.step_marquee(dx, dy) {
                debug!("Marquee wrapped");
            }
        }
    }
}
