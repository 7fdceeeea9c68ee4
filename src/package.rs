// src/package.rs

//! Packaging and package identity
//!
//! The binary package holds nothing but the exported license: all useful
//! content is the build info published at consumption time. Its identity
//! is cleared of settings and options, so every configuration shares one
//! package id.

use crate::error::{Error, Result};
use crate::recipe::Recipe;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::info;

/// Copy the recipe's exported files from `source_folder` into `package_folder`
///
/// Returns the paths written. A missing export is an error.
pub fn package(recipe: &Recipe, source_folder: &Path, package_folder: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(package_folder).map_err(|e| {
        Error::IoError(format!(
            "Failed to create package folder {}: {}",
            package_folder.display(),
            e
        ))
    })?;

    let mut copied = Vec::new();
    for export in &recipe.package.exports {
        let src = source_folder.join(export);
        let dest = package_folder.join(export);

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::IoError(format!("Failed to create {}: {}", parent.display(), e)))?;
        }

        std::fs::copy(&src, &dest).map_err(|e| {
            Error::IoError(format!("Failed to copy {}: {}", src.display(), e))
        })?;
        info!("Packaged {}", dest.display());
        copied.push(dest);
    }

    Ok(copied)
}

/// Identity of the binary package
///
/// SHA-256 over `name/version` only; settings and options do not
/// participate.
pub fn package_id(recipe: &Recipe) -> String {
    let mut hasher = Sha256::new();
    hasher.update(recipe.reference().as_bytes());
    hex::encode(hasher.finalize())
}
