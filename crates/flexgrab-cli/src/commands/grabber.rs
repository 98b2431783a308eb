//! Grabbing-agent control commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use flexgrab_api::require_success;

use crate::output;
use crate::services::Services;

#[derive(Args, Debug)]
pub struct GrabberCommand {
    #[command(subcommand)]
    pub command: GrabberSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GrabberSubcommand {
    /// Start the server-side grabbing agent
    Start,
    /// Stop the server-side grabbing agent
    Stop,
}

pub async fn handle(services: &Services, cmd: GrabberCommand) -> Result<()> {
    match cmd.command {
        GrabberSubcommand::Start => {
            let response = services
                .api
                .start_grabber()
                .await
                .context("Failed to start grabber")?;
            let response = require_success(response)?;
            output::success(response.message.as_deref().unwrap_or("Grabber started"));
        }
        GrabberSubcommand::Stop => {
            let response = services
                .api
                .stop_grabber()
                .await
                .context("Failed to stop grabber")?;
            let response = require_success(response)?;
            output::success(response.message.as_deref().unwrap_or("Grabber stopped"));
        }
    }

    Ok(())
}
