//! flexgrab - CLI client for the block-grabbing service.
//!
//! This is a thin wrapper over the flexgrab libraries: each subcommand
//! plays the role of one of the mobile app's screens, calling the API
//! client for domain operations and the session store for identity
//! state.

mod cli;
mod commands;
mod output;
mod services;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use services::Services;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let services = Services::init(&cli.api)?;

    match cli.command {
        Commands::Login(args) => commands::auth::login(&services, args).await,
        Commands::Logout(args) => commands::auth::logout(&services, args),
        Commands::Whoami(args) => commands::auth::whoami(&services, args),
        Commands::LinkAmazon(args) => commands::auth::link_amazon(&services, args).await,
        Commands::AmazonLogin(args) => commands::auth::amazon_login(&services, args).await,
        Commands::Prefs(cmd) => commands::prefs::handle(&services, cmd).await,
        Commands::Blocks(cmd) => commands::blocks::handle(&services, cmd).await,
        Commands::Grabber(cmd) => commands::grabber::handle(&services, cmd).await,
        Commands::Locations(args) => commands::blocks::locations(&services, args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
