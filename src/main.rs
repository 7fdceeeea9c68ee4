// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the rendered output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let recipe = commands::load_recipe(cli.recipe.as_deref(), &cli.options, &cli.settings)?;

    match cli.command {
        Commands::Probe => commands::cmd_probe(&recipe),
        Commands::Check => {
            if !commands::cmd_check(&recipe)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Publish { format } => commands::cmd_publish(&recipe, format),
        Commands::Package { source, output } => commands::cmd_package(&recipe, &source, &output),
        Commands::Requirements => commands::cmd_requirements(&recipe),
        Commands::Validate => commands::cmd_validate(&recipe),
    }
}
