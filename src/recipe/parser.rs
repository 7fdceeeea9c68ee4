// src/recipe/parser.rs

//! Recipe file parsing

use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use crate::recipe::requirement::Requirement;
use std::path::Path;

/// The recipe shipped with the crate
const BUILTIN_RECIPE: &str = include_str!("python_dev_config.toml");

/// Parse a recipe from a TOML string
pub fn parse_recipe(content: &str) -> Result<Recipe> {
    toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid recipe: {}", e)))
}

/// Parse a recipe from a file
pub fn parse_recipe_file(path: &Path) -> Result<Recipe> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read recipe file: {}", e)))?;

    parse_recipe(&content)
}

/// The built-in python_dev_config recipe
pub fn builtin_recipe() -> Result<Recipe> {
    parse_recipe(BUILTIN_RECIPE)
}

/// Validate a recipe for completeness and correctness
pub fn validate_recipe(recipe: &Recipe) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if recipe.package.name.is_empty() {
        return Err(Error::ParseError("Recipe package name cannot be empty".to_string()));
    }
    if recipe.package.version.is_empty() {
        return Err(Error::ParseError("Recipe package version cannot be empty".to_string()));
    }
    if recipe.options.python.trim().is_empty() {
        return Err(Error::ParseError("Option 'python' cannot be empty".to_string()));
    }

    if let Some(version) = &recipe.options.python_version {
        if !is_major_minor(version) {
            return Err(Error::ParseError(format!(
                "Invalid python_version: {}. Expected major.minor, e.g. 3.10",
                version
            )));
        }
    }

    for reference in recipe.requires.build.iter().chain(&recipe.requires.runtime) {
        let requirement: Requirement = reference.parse()?;
        if requirement.range().is_some_and(str::is_empty) {
            return Err(Error::ParseError(format!(
                "Requirement '{}' has an empty version range",
                reference
            )));
        }
    }

    if recipe.package.license.is_none() {
        warnings.push("Missing package license".to_string());
    }
    if recipe.package.description.is_none() {
        warnings.push("Missing package description".to_string());
    }

    if !recipe.options.with_system_python {
        if recipe.options.managed_root.is_none() {
            warnings.push(
                "Managed interpreter selected but no managed_root given".to_string(),
            );
        }
        if recipe.requires.build.is_empty() {
            warnings.push("Managed interpreter selected but no build requirement declared".to_string());
        }
    }

    Ok(warnings)
}

fn is_major_minor(version: &str) -> bool {
    match version.split_once('.') {
        Some((major, minor)) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
