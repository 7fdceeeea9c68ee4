// src/commands/resolve.rs

//! Probe, check and publish commands

use anyhow::{Context, Result};
use python_dev_config::{
    publish, render, OutputFormat, PythonEnvironment, Recipe, Resolver, ResolverConfig,
};
use serde::Serialize;
use tracing::{info, warn};

/// Environment record plus the derived values consumers look for
#[derive(Serialize)]
struct ProbeReport<'a> {
    #[serde(flatten)]
    env: &'a PythonEnvironment,
    python_version: String,
    python_version_nodot: String,
    have_python_dev: bool,
}

impl<'a> ProbeReport<'a> {
    fn new(env: &'a PythonEnvironment) -> Self {
        Self {
            env,
            python_version: env.python_version(),
            python_version_nodot: env.python_version_nodot(),
            have_python_dev: env.have_python_dev(),
        }
    }
}

fn resolver(recipe: &Recipe) -> Resolver {
    let config = ResolverConfig::from_recipe(recipe);
    info!(
        "Resolving '{}' ({} interpreter, {})",
        config.python,
        if config.with_system_python { "system" } else { "managed" },
        config.os
    );
    Resolver::new(config)
}

/// Resolve and print the environment record as JSON
pub fn cmd_probe(recipe: &Recipe) -> Result<()> {
    let env = resolver(recipe)
        .resolve()
        .context("Failed to resolve Python interpreter")?;

    let json = serde_json::to_string_pretty(&ProbeReport::new(&env))
        .context("Failed to serialize environment")?;
    println!("{}", json);
    Ok(())
}

/// Resolve and report whether a development environment is present
///
/// Returns false when the interpreter runs but lacks headers or library.
pub fn cmd_check(recipe: &Recipe) -> Result<bool> {
    let env = resolver(recipe)
        .resolve()
        .context("Failed to resolve Python interpreter")?;

    println!("Python {} at {}", env.version, env.executable.display());
    println!("  Include dir: {}", env.include_dir.display());
    println!("  Library: {}", env.library.display());
    println!("  Link name: {}", env.link_name);

    match env.missing_dev_reason() {
        None => {
            println!("[OK] Python development environment found");
            Ok(true)
        }
        Some(reason) => {
            warn!("Python development environment incomplete: {}", reason);
            println!("[FAIL] {}", reason);
            Ok(false)
        }
    }
}

/// Resolve, publish and render build configuration
pub fn cmd_publish(recipe: &Recipe, format: OutputFormat) -> Result<()> {
    let env = resolver(recipe)
        .resolve()
        .context("Failed to resolve Python interpreter")?;

    let info = publish(&env).context("Failed to publish build configuration")?;
    let rendered = render(&info, format, &recipe.settings().os)?;
    print!("{}", rendered);
    Ok(())
}
