use std::time::Duration;

use colored::*;
use modscan_common::config::Config;
use modscan_common::device::Device;
use modscan_common::success;

use crate::commands::scan::Outcome;
use crate::mprint;
use crate::terminal::{colors, format, print};

pub fn scan_ends(mut outcome: Outcome, cfg: &Config) {
    if outcome.devices.is_empty() {
        no_devices_found(cfg);
        return;
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    print::header("Modbus Devices", cfg.quiet);
    outcome
        .devices
        .sort_by_key(|device| (format::target_location(&device.target), device.unit()));
    print_devices(&outcome.devices, cfg);
    print_summary(outcome.devices.len(), outcome.elapsed, outcome.stopped, cfg);
}

fn no_devices_found(cfg: &Config) {
    print::header("ZERO DEVICES DETECTED", cfg.quiet);
    print::no_results();
}

fn print_devices(devices: &[Device], cfg: &Config) {
    for (idx, device) in devices.iter().enumerate() {
        match cfg.quiet {
            2 => {}
            _ => print_device_tree(device, idx),
        }
        if idx + 1 != devices.len() && cfg.quiet < 2 {
            mprint!();
        }
    }
}

fn print_device_tree(device: &Device, idx: usize) {
    print::tree_head(idx, &device.device_type);
    print::as_tree_one_level(format::device_to_details(device));
}

fn print_summary(count: usize, total_time: Duration, stopped: bool, cfg: &Config) {
    let found: ColoredString = format!("{count} devices").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let verb: &str = if stopped { "Scan Stopped" } else { "Scan Complete" };
    let output: ColoredString = format!("{verb}: {found} identified in {total_time}").color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            mprint!();
            success!("{}", output)
        }
    }
}
