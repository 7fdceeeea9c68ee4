// src/publish/mod.rs

//! Publishing a resolved environment as build configuration
//!
//! The publisher copies a [`PythonEnvironment`] into a [`BuildInfo`]: the
//! include/library/binary search paths and link names a consumer compiles
//! with, the environment variables it runs with, and opaque user keys
//! carrying the resolved paths.
//!
//! Publishing refuses environments without a working development install.

mod render;

pub use render::{render, OutputFormat};

use crate::environment::PythonEnvironment;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How an environment variable is published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "lowercase")]
pub enum EnvValue {
    /// Replace any existing value
    Set(String),
    /// Append entries to a search-path style variable
    Append(Vec<String>),
}

/// Build configuration published for consumers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Header search paths
    pub include_dirs: Vec<PathBuf>,
    /// Library search paths
    pub lib_dirs: Vec<PathBuf>,
    /// Libraries to link
    pub libs: Vec<String>,
    /// Directories holding executables and runtime libraries
    pub bin_dirs: Vec<PathBuf>,
    /// Environment variables for consumers
    pub env: BTreeMap<String, EnvValue>,
    /// Opaque keys carrying the resolved values
    pub user_info: BTreeMap<String, String>,
}

impl BuildInfo {
    /// Set a single-value variable
    pub fn set_env(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        info!("Set Env {}: {}", name, value);
        self.env.insert(name.to_string(), EnvValue::Set(value));
    }

    /// Append an entry to a search-path variable
    ///
    /// Entries already present are not repeated. Empty entries are
    /// skipped; an empty search-path element means the current directory.
    pub fn append_env(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            debug!("Skip empty entry for {}", name);
            return;
        }
        info!("Append Env {}: {}", name, value);
        match self.env.get_mut(name) {
            Some(EnvValue::Append(values)) => {
                if !values.contains(&value) {
                    values.push(value);
                }
            }
            _ => {
                self.env.insert(name.to_string(), EnvValue::Append(vec![value]));
            }
        }
    }

    /// Set an opaque user key
    pub fn set_user_info(&mut self, key: &str, value: impl Into<String>) {
        self.user_info.insert(key.to_string(), value.into());
    }
}

/// Publish a resolved environment
///
/// Fails with [`Error::EnvironmentUnusable`] unless
/// [`PythonEnvironment::have_python_dev`] holds.
pub fn publish(env: &PythonEnvironment) -> Result<BuildInfo> {
    if let Some(reason) = env.missing_dev_reason() {
        return Err(Error::unusable(format!(
            "Python development environment not correctly setup: {}",
            reason
        )));
    }

    let lib_dir = env.lib_dir().to_path_buf();
    let bin_dir = env.bin_dir().to_path_buf();
    let mut info = BuildInfo::default();

    info!("Set IncludeDir: {}", env.include_dir.display());
    info.include_dirs.push(env.include_dir.clone());
    info!("Set LibDir: {}", lib_dir.display());
    info.lib_dirs.push(lib_dir.clone());
    info!("Set Lib: {} ({})", env.link_name, env.library.display());
    info.libs.push(env.link_name.clone());
    info.bin_dirs.push(lib_dir.clone());
    if bin_dir != lib_dir {
        info.bin_dirs.push(bin_dir.clone());
    }

    info.set_user_info("PYTHON_VERSION", env.python_version());
    info.set_user_info("PYTHON_VERSION_NODOT", env.python_version_nodot());
    info.set_user_info("PYTHON", display(&env.executable));
    info.set_user_info("PYTHON_EXEC", display(&env.executable));
    info.set_user_info("PYTHON_INCLUDE_DIR", display(&env.include_dir));
    info.set_user_info("PYTHON_LIB_DIR", display(&lib_dir));

    info.append_env("PYTHONPATH", display(&env.stdlib));
    info.set_env("PYTHONHOME", display(&env.prefix));
    info.append_env("PATH", display(&lib_dir));
    info.append_env("PATH", display(&bin_dir));
    info.append_env("LD_LIBRARY_PATH", display(&lib_dir));

    Ok(info)
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
