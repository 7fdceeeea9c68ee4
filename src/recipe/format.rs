// src/recipe/format.rs

//! Recipe file format definitions
//!
//! A recipe is a TOML file describing the python_dev_config package: its
//! metadata, the options that steer interpreter resolution, optional
//! pinned settings, and the packages it requires when the interpreter is
//! supplied as a build dependency instead of taken from the host.

use crate::error::{Error, Result};
use crate::recipe::requirement::Requirement;
use crate::settings::{split_override, Settings, TargetOs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A complete package recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Package metadata
    pub package: PackageSection,

    /// Resolution options
    #[serde(default)]
    pub options: OptionsSection,

    /// Pinned settings (detected from the host when absent)
    #[serde(default)]
    pub settings: SettingsSection,

    /// Packages required when using a managed interpreter
    #[serde(default)]
    pub requires: RequiresSection,
}

impl Recipe {
    /// Effective settings: pinned values over host detection
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::detect();
        if let Some(os) = &self.settings.os {
            settings.os = os.clone();
        }
        if let Some(arch) = &self.settings.arch {
            settings.arch = arch.clone();
        }
        settings
    }

    /// Requirements needed only to build (the managed interpreter itself)
    ///
    /// Empty when the system interpreter is used.
    pub fn build_requirements(&self) -> Result<Vec<Requirement>> {
        if self.options.with_system_python {
            return Ok(Vec::new());
        }
        self.requires.build.iter().map(|r| r.parse::<Requirement>()).collect()
    }

    /// Requirements propagated to consumers alongside the managed interpreter
    ///
    /// Empty when the system interpreter is used.
    pub fn requirements(&self) -> Result<Vec<Requirement>> {
        if self.options.with_system_python {
            return Ok(Vec::new());
        }
        self.requires.runtime.iter().map(|r| r.parse::<Requirement>()).collect()
    }

    /// Package reference (`name/version`)
    pub fn reference(&self) -> String {
        format!("{}/{}", self.package.name, self.package.version)
    }
}

/// Package metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Package version
    pub version: String,

    /// Kind of binary package produced
    #[serde(default = "default_package_type")]
    pub package_type: String,

    /// License identifier (SPDX)
    #[serde(default)]
    pub license: Option<String>,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Homepage URL
    #[serde(default)]
    pub url: Option<String>,

    /// Files exported with the recipe and copied into the package
    #[serde(default = "default_exports")]
    pub exports: Vec<String>,
}

fn default_package_type() -> String {
    "shared-library".to_string()
}

fn default_exports() -> Vec<String> {
    vec!["LICENSE.md".to_string()]
}

/// Options steering interpreter resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsSection {
    /// Interpreter identifier: a command name looked up on PATH, or a path
    #[serde(default = "default_python")]
    pub python: String,

    /// Use the host's interpreter instead of a managed one
    #[serde(default = "default_with_system_python")]
    pub with_system_python: bool,

    /// Required interpreter version (`major.minor`)
    #[serde(default)]
    pub python_version: Option<String>,

    /// Install root of the managed interpreter package
    #[serde(default)]
    pub managed_root: Option<PathBuf>,
}

fn default_python() -> String {
    "python3".to_string()
}

fn default_with_system_python() -> bool {
    true
}

impl Default for OptionsSection {
    fn default() -> Self {
        Self {
            python: default_python(),
            with_system_python: default_with_system_python(),
            python_version: None,
            managed_root: None,
        }
    }
}

impl OptionsSection {
    /// Apply a `key=value` override
    ///
    /// Booleans accept `True`/`False` in any case as well as `1`/`0`.
    /// Optional values are cleared with `None` or an empty value.
    pub fn apply_override(&mut self, pair: &str) -> Result<()> {
        let (key, value) = split_override(pair)?;
        match key {
            "python" => {
                if value.is_empty() {
                    return Err(Error::InvalidOption("python cannot be empty".to_string()));
                }
                self.python = value.to_string();
            }
            "with_system_python" => self.with_system_python = parse_bool(key, value)?,
            "python_version" => self.python_version = optional(value).map(str::to_string),
            "managed_root" => self.managed_root = optional(value).map(PathBuf::from),
            other => {
                return Err(Error::InvalidOption(format!("unknown option '{}'", other)));
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(Error::InvalidOption(format!(
            "{} expects True or False, got '{}'",
            key, value
        ))),
    }
}

fn optional(value: &str) -> Option<&str> {
    if value.is_empty() || value == "None" {
        None
    } else {
        Some(value)
    }
}

/// Pinned settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsSection {
    #[serde(default)]
    pub os: Option<TargetOs>,

    #[serde(default)]
    pub arch: Option<String>,
}

/// Requirement references, applied only with a managed interpreter
///
/// Format: `name/version[@user/channel]`, version may be a range such as
/// `[>=19.2.3]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequiresSection {
    /// Needed to build (the interpreter package)
    #[serde(default)]
    pub build: Vec<String>,

    /// Propagated to consumers
    #[serde(default)]
    pub runtime: Vec<String>,
}
