use arcfetch_core::logging;
use clap::Parser;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging before any work so directory creation is reported.
    if let Err(err) = logging::init_logging(cli.log_file.as_deref()) {
        logging::init_logging_stderr();
        tracing::warn!("falling back to stderr logging: {:#}", err);
    }

    if let Err(err) = cli.run() {
        eprintln!("arcfetch error: {:#}", err);
        std::process::exit(1);
    }
}
