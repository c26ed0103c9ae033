use std::sync::Arc;

use modscan_common::config::Config;
use modscan_common::network::interface::InterfaceEnumerator;
use modscan_core::{ModbusProbeEngine, NetScanner, ProfileRegistry};

use crate::commands::{NetArgs, report, scan};
use crate::terminal::print;

pub async fn net(args: NetArgs, cfg: &Config) -> anyhow::Result<()> {
    let engine = Arc::new(ModbusProbeEngine::new(ProfileRegistry::builtin(), cfg.probe_timeout));

    if cfg.quiet == 0 {
        print::set_key_width(&["Method", "Port", "Unit", "Timeout"]);
        print::aligned_line("Method", args.method.to_string());
        print::aligned_line("Port", args.port.to_string());
        print::aligned_line("Unit", args.unit.to_string());
        print::aligned_line("Timeout", format!("{} ms", cfg.probe_timeout.as_millis()));
    }

    let scanner = NetScanner::new(
        engine,
        Arc::new(InterfaceEnumerator),
        args.method,
        args.port,
        args.unit,
        args.blacklist.unwrap_or_default(),
    )?;

    match scan::run(&scanner, cfg).await {
        Some(outcome) => report::scan_ends(outcome, cfg),
        None => {
            print::header("nothing to scan", cfg.quiet);
            print::no_results();
        }
    }

    Ok(())
}
