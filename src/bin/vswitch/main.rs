//! vswitch CLI - switch between debug and release build trees

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vswitch::{GlobalContext, SwitchError, Variant};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        let code = e
            .downcast_ref::<SwitchError>()
            .map_or(1, SwitchError::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("vswitch=debug")
    } else {
        EnvFilter::new("vswitch=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let ctx = GlobalContext::new()?;

    // Execute command
    match cli.command {
        Commands::Debug => commands::activate::execute(&ctx, Variant::Debug),
        Commands::Release => commands::activate::execute(&ctx, Variant::Release),
        Commands::Status => commands::status::execute(&ctx),
    }
}
