pub mod interfaces;
pub mod net;
pub mod report;
pub mod scan;
pub mod serial;

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use modscan_common::config::Config;
use modscan_common::modbus::{MODBUS_TCP_PORT, Method, UnitId};
use modscan_common::network::blacklist::Blacklist;
use modscan_common::target::parse_rate;

#[derive(Parser)]
#[command(name = "modscan")]
#[command(about = "Finds Modbus devices on local networks and serial lines.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Timeout of a single probe, in milliseconds
    #[arg(long, global = true, default_value_t = 500)]
    pub timeout: u64,

    /// Reduce output; repeat for less
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not listen for 'q' to stop a running scan
    #[arg(long, global = true)]
    pub no_input: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan every local IPv4 subnet for Modbus servers
    #[command(alias = "n")]
    Net(NetArgs),
    /// Find the line speed and the units of a serial bus
    #[command(alias = "s")]
    Serial(SerialArgs),
    /// List the networks a network scan would cover
    #[command(alias = "i")]
    Interfaces {
        /// Interfaces or CIDR blocks to leave out, comma separated
        #[arg(short, long)]
        blacklist: Option<Blacklist>,
    },
}

#[derive(Args)]
pub struct NetArgs {
    /// Transport method: tcp or rtu-over-tcp
    #[arg(short, long, default_value = "tcp")]
    pub method: Method,

    #[arg(short, long, default_value_t = MODBUS_TCP_PORT)]
    pub port: u16,

    /// Unit identifier to address on every host
    #[arg(short, long, default_value = "1")]
    pub unit: UnitId,

    /// Interfaces or CIDR blocks to leave out, comma separated
    #[arg(short, long)]
    pub blacklist: Option<Blacklist>,
}

#[derive(Args)]
pub struct SerialArgs {
    /// Serial device, e.g. /dev/ttyUSB0
    pub tty: String,

    /// Baud rate to try; repeat for several. Defaults to the common rates
    #[arg(short, long = "rate", value_parser = parse_rate)]
    pub rates: Vec<u32>,

    #[arg(short, long, default_value = "rtu")]
    pub mode: Method,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            probe_timeout: Duration::from_millis(self.timeout),
            quiet: self.quiet,
            disable_input: self.no_input,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
