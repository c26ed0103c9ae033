mod commands;
mod terminal;

use commands::{CommandLine, Commands, interfaces, net, serial};
use modscan_common::config::Config;
use modscan_common::error;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.quiet);

    let cfg: Config = commands.config();
    print::banner(cfg.quiet);

    let result = match commands.command {
        Commands::Net(args) => {
            print::header("getting ready for network scan", cfg.quiet);
            net::net(args, &cfg).await
        }
        Commands::Serial(args) => {
            print::header("getting ready for serial scan", cfg.quiet);
            serial::serial(args, &cfg).await
        }
        Commands::Interfaces { blacklist } => {
            print::header("local networks", cfg.quiet);
            interfaces::interfaces(blacklist.unwrap_or_default(), &cfg);
            Ok(())
        }
    };

    if let Err(e) = &result {
        error!("{e:#}");
    }

    print::end_of_program();
    result
}
