//! Clap derive structures for the `shade` CLI.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// shade -- curtain control adapter for building gateways
#[derive(Debug, Parser)]
#[command(
    name = "shade",
    version,
    about = "Drive room curtains through their building gateways",
    long_about = "Translates up/down/stop requests for a named room into gateway\n\
        commands. Run `shade serve` for the HTTP interface or use the\n\
        one-shot subcommands from scripts.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration file
    #[arg(long, short = 'c', env = "SHADE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// List every room in the catalog with its directions
    Rooms,

    /// Show the directions available in a room
    Register {
        /// Room identifier (e.g. 1A1)
        room: String,
    },

    /// Send one command to a room's gateway
    Control(ControlArgs),

    /// Validate configuration and the room catalog
    CheckConfig,

    /// Print an example configuration file
    DefaultConfig,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides server.bind)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,
}

#[derive(Debug, Args)]
pub struct ControlArgs {
    /// Room identifier (e.g. 1A1)
    pub room: String,

    /// up, down, or stop
    pub action: String,

    /// Direction label for rooms with several curtains
    #[arg(long, short = 'd')]
    pub direction: Option<String>,
}
