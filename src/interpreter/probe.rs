// src/interpreter/probe.rs

//! Asking an interpreter about itself
//!
//! The interpreter runs a short inline script that prints one JSON object
//! with its executable, version, prefix, sysconfig paths and the sysconfig
//! variables needed to find the library.

use crate::environment::PythonVersion;
use crate::error::{Error, Result};
use crate::settings::TargetOs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Inline script passed with `-c`
///
/// Config values are stringified so every variable has the same JSON type.
pub const PROBE_SCRIPT: &str = r#"
import json, sys, sysconfig
paths = sysconfig.get_paths()
names = ("INCLUDEPY", "LIBDIR", "LIBPL", "LDLIBRARY", "LIBRARY", "MULTIARCH")
config = {}
for name in names:
    value = sysconfig.get_config_var(name)
    config[name] = None if value is None else str(value)
print(json.dumps({
    "executable": sys.executable,
    "version": list(sys.version_info[:3]),
    "prefix": sys.prefix,
    "base_prefix": getattr(sys, "base_prefix", sys.prefix),
    "platform": sys.platform,
    "paths": {"stdlib": paths.get("stdlib"), "include": paths.get("include")},
    "config": config,
}))
"#;

/// The installation paths from `sysconfig.get_paths()` that we use
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysconfigPaths {
    #[serde(default)]
    pub stdlib: Option<PathBuf>,
    #[serde(default)]
    pub include: Option<PathBuf>,
}

/// What the interpreter reported about itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutput {
    /// `sys.executable`; `None` or empty for embedded interpreters
    #[serde(default)]
    pub executable: Option<PathBuf>,
    pub version: PythonVersion,
    pub prefix: PathBuf,
    #[serde(default)]
    pub base_prefix: Option<PathBuf>,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub paths: SysconfigPaths,
    #[serde(default)]
    pub config: BTreeMap<String, Option<String>>,
}

impl ProbeOutput {
    /// A sysconfig variable, if set and non-empty
    pub fn config_var(&self, name: &str) -> Option<&str> {
        self.config
            .get(name)
            .and_then(|v| v.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Operating system the interpreter was built for, from `sys.platform`
    ///
    /// `linux2` and similar suffixed names map to their family.
    pub fn target_os(&self) -> Option<TargetOs> {
        let platform = self.platform.trim();
        if platform.is_empty() {
            return None;
        }
        if platform.starts_with("linux") {
            return Some(TargetOs::Linux);
        }
        platform.parse().ok()
    }

    /// Prefix of the base installation (differs from `prefix` in a venv)
    pub fn base_prefix(&self) -> &Path {
        self.base_prefix.as_deref().unwrap_or(&self.prefix)
    }
}

/// Something that can ask an interpreter for its configuration
pub trait Probe {
    /// Run the probe against the given interpreter
    fn probe(&self, executable: &Path) -> Result<ProbeOutput>;
}

/// Probe that runs the interpreter as a subprocess
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandProbe;

impl Probe for CommandProbe {
    fn probe(&self, executable: &Path) -> Result<ProbeOutput> {
        debug!("Probing interpreter: {}", executable.display());

        let output = Command::new(executable)
            .arg("-c")
            .arg(PROBE_SCRIPT)
            .output()
            .map_err(|e| {
                Error::unusable(format!("Failed to run {}: {}", executable.display(), e))
            })?;

        if !output.status.success() {
            return Err(Error::unusable(format!(
                "{} exited with {}: {}",
                executable.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_probe_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse the probe script's output
///
/// Only the last non-empty line is read; site customizations may print
/// before the script runs.
pub fn parse_probe_output(stdout: &str) -> Result<ProbeOutput> {
    let line = stdout
        .lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .ok_or_else(|| Error::unusable("interpreter printed nothing"))?;

    serde_json::from_str(line)
        .map_err(|e| Error::unusable(format!("unexpected interpreter output: {}", e)))
}
