//! CLI argument definitions.

use clap::{Parser, Subcommand};

use flexgrab_core::types::DEFAULT_API_URL;

use crate::commands::auth::{
    AmazonLoginArgs, LinkAmazonArgs, LoginArgs, LogoutArgs, WhoamiArgs,
};
use crate::commands::blocks::{BlocksCommand, LocationsArgs};
use crate::commands::grabber::GrabberCommand;
use crate::commands::prefs::PrefsCommand;

/// CLI client for the flexgrab block-grabbing service.
#[derive(Parser, Debug)]
#[command(name = "flexgrab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL
    #[arg(long, global = true, env = "FLEXGRAB_API_URL", default_value = DEFAULT_API_URL)]
    pub api: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with email and password
    Login(LoginArgs),
    /// Log out and erase stored credentials
    Logout(LogoutArgs),
    /// Show the current session
    Whoami(WhoamiArgs),
    /// Link Amazon Flex credentials to the account
    LinkAmazon(LinkAmazonArgs),
    /// Ask the server to log into Amazon with the stored credentials
    AmazonLogin(AmazonLoginArgs),
    /// Manage block matching preferences
    Prefs(PrefsCommand),
    /// Inspect and accept offered blocks
    Blocks(BlocksCommand),
    /// Control the server-side grabbing agent
    Grabber(GrabberCommand),
    /// List known warehouse locations
    Locations(LocationsArgs),
}
