mod cli;
mod commands;
mod error;
mod report;
mod server;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The server logs requests by default; one-shot commands stay quiet.
    let base = if matches!(cli.command, Command::Serve(_)) {
        "info"
    } else {
        "warn"
    };
    init_tracing(cli.global.verbose, base);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, base: &str) {
    let filter = match verbosity {
        0 => base,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // These never touch the gateway.
        Command::DefaultConfig => commands::config_cmd::default_config(),
        Command::CheckConfig => commands::config_cmd::check(&cli.global),
        Command::Rooms => commands::rooms::list(&cli.global),
        Command::Register { room } => commands::rooms::register(&room, &cli.global),

        Command::Serve(args) => commands::serve::handle(args, &cli.global).await,
        Command::Control(args) => commands::control::handle(args, &cli.global).await,
    }
}
