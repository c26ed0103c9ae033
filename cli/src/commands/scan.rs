use std::time::{Duration, Instant};

use modscan_common::config::Config;
use modscan_common::device::Device;
use modscan_common::info;
use modscan_core::{ScanSnapshot, ScanStrategy, Scanner};
use tracing::info_span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::input::InputHandle;
use crate::terminal::progress;

const TICK: Duration = Duration::from_millis(100);

pub struct Outcome {
    pub devices: Vec<Device>,
    pub elapsed: Duration,
    pub stopped: bool,
}

/// Starts `scanner` and renders its progress until it finishes or the user
/// stops it. Returns `None` when the scanner refused to start.
pub async fn run<S: ScanStrategy>(scanner: &Scanner<S>, cfg: &Config) -> Option<Outcome> {
    let start_time: Instant = Instant::now();
    if !scanner.start() {
        return None;
    }

    let span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_style(&progress::scan_style());
    span.pb_set_length(scanner.total());
    let guard = span.enter();

    let input_enabled: bool = !cfg.disable_input;
    let mut input = InputHandle::new();
    if input_enabled {
        input.start();
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut stopped: bool = false;

    loop {
        let snapshot: ScanSnapshot = scanner.snapshot();
        span.pb_set_position(snapshot.done.min(snapshot.total));
        span.pb_set_message(&progress::scan_message(snapshot.devices.len(), input_enabled));

        if snapshot.running != Some(true) {
            break;
        }

        if !stopped && input.should_interrupt() {
            stopped = request_stop(scanner);
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => {}
            _ = &mut ctrl_c, if !stopped => stopped = request_stop(scanner),
        }
    }

    scanner.join().await;
    drop(input);
    drop(guard);

    Some(Outcome {
        devices: scanner.devices(),
        elapsed: start_time.elapsed(),
        stopped,
    })
}

fn request_stop<S: ScanStrategy>(scanner: &Scanner<S>) -> bool {
    info!("Stopping scan, waiting for in-flight probes");
    scanner.stop();
    true
}
