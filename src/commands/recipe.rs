// src/commands/recipe.rs

//! Recipe loading, validation and requirement listing

use anyhow::{Context, Result};
use python_dev_config::recipe::{builtin_recipe, parse_recipe_file, validate_recipe, Recipe};
use std::path::Path;
use tracing::debug;

/// Load the recipe and apply command-line overrides
///
/// # Arguments
/// * `path` - Recipe file, or `None` for the built-in recipe
/// * `options` - `key=value` option overrides
/// * `settings` - `key=value` setting overrides
pub fn load_recipe(path: Option<&Path>, options: &[String], settings: &[String]) -> Result<Recipe> {
    let mut recipe = match path {
        Some(path) => parse_recipe_file(path)
            .with_context(|| format!("Failed to parse recipe: {}", path.display()))?,
        None => builtin_recipe().context("Built-in recipe is invalid")?,
    };

    for pair in options {
        debug!("Option override: {}", pair);
        recipe
            .options
            .apply_override(pair)
            .with_context(|| format!("Bad option override '{}'", pair))?;
    }

    if !settings.is_empty() {
        let mut effective = recipe.settings();
        for pair in settings {
            debug!("Setting override: {}", pair);
            effective
                .apply_override(pair)
                .with_context(|| format!("Bad setting override '{}'", pair))?;
        }
        recipe.settings.os = Some(effective.os);
        recipe.settings.arch = Some(effective.arch);
    }

    Ok(recipe)
}

/// Validate the recipe and print any warnings
pub fn cmd_validate(recipe: &Recipe) -> Result<()> {
    println!("Recipe: {} version {}", recipe.package.name, recipe.package.version);

    let warnings = validate_recipe(recipe).with_context(|| "Recipe validation failed")?;
    for warning in &warnings {
        println!("Warning: {}", warning);
    }

    println!("Recipe validation passed");
    if warnings.is_empty() {
        println!("[OK] No issues found");
    } else {
        println!("[OK] {} warning(s)", warnings.len());
    }
    Ok(())
}

/// List the requirements implied by the selected options
pub fn cmd_requirements(recipe: &Recipe) -> Result<()> {
    let build = recipe
        .build_requirements()
        .context("Invalid build requirement")?;
    let runtime = recipe.requirements().context("Invalid requirement")?;

    if build.is_empty() && runtime.is_empty() {
        println!("No requirements (using system interpreter)");
        return Ok(());
    }

    println!("Build requirements:");
    for req in &build {
        println!("  {}", req);
    }
    println!("Requirements:");
    for req in &runtime {
        println!("  {}", req);
    }
    Ok(())
}
