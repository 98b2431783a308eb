//! Block preference commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use uuid::Uuid;

use flexgrab_api::require_success;
use flexgrab_core::BlockPreference;

use crate::output;
use crate::services::Services;

#[derive(Args, Debug)]
pub struct PrefsCommand {
    #[command(subcommand)]
    pub command: PrefsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrefsSubcommand {
    /// List the account's preferences
    List,
    /// Create a new preference
    Create(CreateArgs),
    /// Replace an existing preference
    Update(UpdateArgs),
    /// Delete a preference
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Display name for the preference
    #[arg(long)]
    pub name: String,

    /// Minimum block duration in hours
    #[arg(long, default_value_t = 1.0)]
    pub min_duration: f64,

    /// Maximum block duration in hours
    #[arg(long, default_value_t = 4.0)]
    pub max_duration: f64,

    /// Minimum hourly rate in dollars
    #[arg(long, default_value_t = 25.0)]
    pub min_rate: f64,

    /// Preferred days of the week (0 = Sunday), comma separated
    #[arg(long, value_delimiter = ',')]
    pub days: Vec<u8>,

    /// Preferred warehouse location (repeatable)
    #[arg(long = "location")]
    pub locations: Vec<String>,

    /// Create the preference disabled
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Id of the preference to replace
    #[arg(long)]
    pub id: String,

    #[command(flatten)]
    pub fields: CreateArgs,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the preference to delete
    pub id: String,
}

pub async fn handle(services: &Services, cmd: PrefsCommand) -> Result<()> {
    match cmd.command {
        PrefsSubcommand::List => list(services).await,
        PrefsSubcommand::Create(args) => create(services, args).await,
        PrefsSubcommand::Update(args) => update(services, args).await,
        PrefsSubcommand::Delete(args) => delete(services, args).await,
    }
}

fn preference_from(id: String, args: CreateArgs) -> BlockPreference {
    BlockPreference {
        id,
        name: args.name,
        preferred_dates: None,
        preferred_days_of_week: if args.days.is_empty() {
            None
        } else {
            Some(args.days)
        },
        min_duration: args.min_duration,
        max_duration: args.max_duration,
        min_hourly_rate: args.min_rate,
        preferred_locations: args.locations,
        active: !args.inactive,
    }
}

async fn list(services: &Services) -> Result<()> {
    let response = services
        .api
        .list_preferences()
        .await
        .context("Failed to fetch preferences")?;
    let response = require_success(response)?;

    let preferences = response.preferences.unwrap_or_default();
    if preferences.is_empty() {
        output::field("Preferences", "none");
        return Ok(());
    }

    output::json_pretty(&preferences)
}

async fn create(services: &Services, args: CreateArgs) -> Result<()> {
    // The server assigns the real id and ignores this one.
    let preference = preference_from(Uuid::new_v4().to_string(), args);

    let response = services
        .api
        .create_preference(&preference)
        .await
        .context("Failed to create preference")?;
    require_success(response)?;

    output::success("Preference created");
    Ok(())
}

async fn update(services: &Services, args: UpdateArgs) -> Result<()> {
    let preference = preference_from(args.id.clone(), args.fields);

    let response = services
        .api
        .update_preference(&args.id, &preference)
        .await
        .context("Failed to update preference")?;
    require_success(response)?;

    output::success("Preference updated");
    Ok(())
}

async fn delete(services: &Services, args: DeleteArgs) -> Result<()> {
    let response = services
        .api
        .delete_preference(&args.id)
        .await
        .context("Failed to delete preference")?;
    require_success(response)?;

    output::success("Preference deleted");
    Ok(())
}
