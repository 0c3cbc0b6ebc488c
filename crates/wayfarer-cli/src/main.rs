//! Wayfarer CLI - travel diary from the terminal
//!
//! Capture a memory from a photo, list what you saved, and remove entries.

mod cli;
mod commands;
mod error;
mod platform;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::AppContext;
use crate::commands::list::run_list;
use crate::commands::remove::run_remove;
use crate::commands::theme::run_theme;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wayfarer=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut ctx = AppContext::load(cli.db_path, cli.config);

    match cli.command {
        Commands::Add(args) => {
            run_add(args, &ctx).await?;
        }
        Commands::List { json } => run_list(json, &ctx).await?,
        Commands::Remove { target } => {
            run_remove(&target, &ctx).await?;
        }
        Commands::Theme { command } => {
            run_theme(command, &mut ctx)?;
        }
    }

    Ok(())
}
