mod cli;
mod commands;
mod logging;

use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    logging::init_logging(cli.verbose);

    if let Err(err) = cli.run().await {
        eprintln!("pinboard error: {:#}", err);
        std::process::exit(1);
    }
}
