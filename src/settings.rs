// src/settings.rs

//! Host/target settings (operating system and architecture)
//!
//! Settings decide which sysconfig variables are read and how the Python
//! library file is turned into a link name. When a recipe does not pin them
//! they are detected from the running host.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operating system family the environment is resolved for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetOs {
    /// Native Windows builds (import libraries under `libs/`)
    ///
    /// Cygwin and MSYS2 interpreters use a POSIX layout and parse as
    /// [`TargetOs::Other`].
    Windows,
    /// Linux (shared library named by `LDLIBRARY`)
    Linux,
    /// macOS (dylib or framework builds)
    Macos,
    /// Any other POSIX system, treated like Linux
    Other(String),
}

impl TargetOs {
    /// Detect the operating system of the running host
    pub fn detect() -> Self {
        std::env::consts::OS
            .parse()
            .unwrap_or_else(|_| Self::Other(std::env::consts::OS.to_string()))
    }

    /// Whether libraries follow Windows naming (`python310.lib`)
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Canonical name, as written in recipes
    pub fn as_str(&self) -> &str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::Macos => "Macos",
            Self::Other(name) => name,
        }
    }

    /// Separator used by path-list environment variables
    pub fn path_separator(&self) -> char {
        if self.is_windows() { ';' } else { ':' }
    }
}

impl FromStr for TargetOs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidOption("os setting cannot be empty".to_string()));
        }

        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "windows" | "windowsstore" | "windowsce" | "win32" => Self::Windows,
            "linux" => Self::Linux,
            "macos" | "darwin" | "osx" => Self::Macos,
            _ => Self::Other(trimmed.to_string()),
        })
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TargetOs {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TargetOs {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Effective settings for one resolution pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub os: TargetOs,
    pub arch: String,
}

impl Settings {
    /// Settings of the running host
    pub fn detect() -> Self {
        Self {
            os: TargetOs::detect(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Apply a `key=value` override (`os` or `arch`)
    pub fn apply_override(&mut self, pair: &str) -> Result<()> {
        let (key, value) = split_override(pair)?;
        match key {
            "os" => self.os = value.parse()?,
            "arch" => self.arch = value.to_string(),
            other => {
                return Err(Error::InvalidOption(format!("unknown setting '{}'", other)));
            }
        }
        Ok(())
    }
}

/// Split a `key=value` override into its trimmed halves
pub(crate) fn split_override(pair: &str) -> Result<(&str, &str)> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| Error::InvalidOption(format!("expected key=value, got '{}'", pair)))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::InvalidOption(format!("missing key in '{}'", pair)));
    }
    Ok((key, value.trim()))
}
