use std::sync::Arc;

use anyhow::Context;
use modscan_common::config::Config;
use modscan_core::{ModbusProbeEngine, ProfileRegistry, SerialScanner};

use crate::commands::{SerialArgs, report, scan};
use crate::terminal::print;

pub async fn serial(args: SerialArgs, cfg: &Config) -> anyhow::Result<()> {
    let engine = Arc::new(ModbusProbeEngine::new(ProfileRegistry::builtin(), cfg.probe_timeout));

    let rates: Vec<u32> = if args.rates.is_empty() {
        engine.registry().rates(args.mode)
    } else {
        args.rates
    };

    if cfg.quiet == 0 {
        let rate_list: Vec<String> = rates.iter().map(u32::to_string).collect();
        print::set_key_width(&["Device", "Mode", "Rates", "Timeout"]);
        print::aligned_line("Device", args.tty.clone());
        print::aligned_line("Mode", args.mode.to_string());
        print::aligned_line("Rates", rate_list.join(", "));
        print::aligned_line("Timeout", format!("{} ms", cfg.probe_timeout.as_millis()));
    }

    let scanner = SerialScanner::new(engine, args.tty.as_str(), rates, args.mode)
        .with_context(|| format!("Cannot scan {}", args.tty))?;

    match scan::run(&scanner, cfg).await {
        Some(outcome) => report::scan_ends(outcome, cfg),
        None => anyhow::bail!("Serial scan of {} could not be started", args.tty),
    }

    Ok(())
}
