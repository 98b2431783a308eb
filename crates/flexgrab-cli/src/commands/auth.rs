//! Authentication and identity-linking commands.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use flexgrab_api::require_success;

use crate::output;
use crate::services::Services;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn login(services: &Services, args: LoginArgs) -> Result<()> {
    eprintln!("{}", "Logging in...".dimmed());

    let response = services
        .api
        .login(&args.email, &args.password)
        .await
        .context("Failed to login")?;
    let response = require_success(response)?;

    let user = response
        .user
        .context("Server response missing user record")?;
    let token = response.token.context("Server response missing token")?;

    services.session.login(user, token);

    let snapshot = services.session.snapshot();
    output::success("Logged in successfully");
    println!();
    if let Some(user) = snapshot.current_user {
        output::field("Name", &user.name);
        output::field("Email", &user.email);
    }
    output::flag("Amazon linked", snapshot.has_amazon_credentials);

    Ok(())
}

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn logout(services: &Services, _args: LogoutArgs) -> Result<()> {
    services.session.logout();
    output::success("Logged out");
    Ok(())
}

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub fn whoami(services: &Services, _args: WhoamiArgs) -> Result<()> {
    let snapshot = services.session.snapshot();

    let Some(user) = snapshot.current_user else {
        bail!("No active session. Run 'flexgrab login' first.");
    };

    output::field("Name", &user.name);
    output::field("Email", &user.email);
    output::flag("Amazon linked", snapshot.has_amazon_credentials);

    Ok(())
}

#[derive(Args, Debug)]
pub struct LinkAmazonArgs {
    /// Amazon Flex account email
    #[arg(long)]
    pub email: String,

    /// Amazon Flex account password
    #[arg(long)]
    pub password: String,
}

pub async fn link_amazon(services: &Services, args: LinkAmazonArgs) -> Result<()> {
    if !services.session.snapshot().is_authenticated {
        bail!("No active session. Run 'flexgrab login' first.");
    }

    eprintln!("{}", "Linking Amazon credentials...".dimmed());

    if services
        .session
        .link_amazon_credentials(&args.email, &args.password)
        .await
    {
        output::success("Amazon credentials linked");
        Ok(())
    } else {
        output::error("Failed to link Amazon credentials");
        bail!("Linking failed; credentials were not saved");
    }
}

#[derive(Args, Debug)]
pub struct AmazonLoginArgs {}

pub async fn amazon_login(services: &Services, _args: AmazonLoginArgs) -> Result<()> {
    let response = services
        .api
        .amazon_login()
        .await
        .context("Failed to reach the server")?;
    let response = require_success(response)?;

    output::success(response.message.as_deref().unwrap_or("Amazon login started"));
    Ok(())
}
