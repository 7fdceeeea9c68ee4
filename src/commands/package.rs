// src/commands/package.rs

//! Package command - export files and report the package id

use anyhow::{Context, Result};
use python_dev_config::{package, package_id, Recipe};
use std::path::Path;

/// Copy the recipe's exports into `output` and print the package id
pub fn cmd_package(recipe: &Recipe, source: &Path, output: &Path) -> Result<()> {
    let copied = package(recipe, source, output)
        .with_context(|| format!("Failed to package {}", recipe.reference()))?;

    println!("[COMPLETE] Packaged {}", recipe.reference());
    for path in &copied {
        println!("  - {}", path.display());
    }
    println!("Package id: {}", package_id(recipe));
    Ok(())
}
