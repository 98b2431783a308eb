//! Offered-block commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use flexgrab_api::require_success;

use crate::output;
use crate::services::Services;

#[derive(Args, Debug)]
pub struct BlocksCommand {
    #[command(subcommand)]
    pub command: BlocksSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BlocksSubcommand {
    /// List currently offered blocks
    Available,
    /// Accept a single offered block
    Accept(AcceptArgs),
}

#[derive(Args, Debug)]
pub struct AcceptArgs {
    /// Id of the block to accept
    pub id: String,
}

#[derive(Args, Debug)]
pub struct LocationsArgs {}

pub async fn handle(services: &Services, cmd: BlocksCommand) -> Result<()> {
    match cmd.command {
        BlocksSubcommand::Available => available(services).await,
        BlocksSubcommand::Accept(args) => accept(services, args).await,
    }
}

async fn available(services: &Services) -> Result<()> {
    let response = services
        .api
        .available_blocks()
        .await
        .context("Failed to fetch blocks")?;
    let response = require_success(response)?;

    let blocks = response.blocks.unwrap_or_default();
    if blocks.is_empty() {
        output::field("Blocks", "none available");
        return Ok(());
    }

    for block in &blocks {
        println!(
            "{}  {} {}  {} ({:.1}h @ {})",
            block.id, block.date, block.time_range, block.location,
            block.duration_hours(), block.rate
        );
    }

    Ok(())
}

async fn accept(services: &Services, args: AcceptArgs) -> Result<()> {
    let response = services
        .api
        .accept_block(&args.id)
        .await
        .context("Failed to accept block")?;
    let response = require_success(response)?;

    output::success(response.message.as_deref().unwrap_or("Block accepted"));
    Ok(())
}

pub async fn locations(services: &Services, _args: LocationsArgs) -> Result<()> {
    let response = services
        .api
        .locations()
        .await
        .context("Failed to fetch locations")?;
    let response = require_success(response)?;

    for location in response.locations.unwrap_or_default() {
        println!("{}", location);
    }

    Ok(())
}
