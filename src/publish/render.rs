// src/publish/render.rs

//! Rendering published build info for consumers

use crate::error::{Error, Result};
use crate::publish::{BuildInfo, EnvValue};
use crate::settings::TargetOs;
use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

/// Output format for published build info
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The whole `BuildInfo` as pretty JSON
    Json,
    /// Environment variable exports for a shell
    Shell,
    /// `cargo:` directives for a build script
    Cargo,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "shell" | "env" => Ok(Self::Shell),
            "cargo" => Ok(Self::Cargo),
            other => Err(Error::InvalidOption(format!(
                "unknown format '{}', expected json, shell or cargo",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Shell => write!(f, "shell"),
            Self::Cargo => write!(f, "cargo"),
        }
    }
}

/// Render build info in the requested format
///
/// `os` decides shell syntax and path-list separators.
pub fn render(info: &BuildInfo, format: OutputFormat, os: &TargetOs) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(info)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| Error::ParseError(format!("Failed to serialize build info: {}", e))),
        OutputFormat::Shell if os.is_windows() => Ok(render_cmd(info, os.path_separator())),
        OutputFormat::Shell => Ok(render_posix(info, os.path_separator())),
        OutputFormat::Cargo => Ok(render_cargo(info)),
    }
}

fn render_posix(info: &BuildInfo, separator: char) -> String {
    let mut out = String::new();
    for (name, value) in &info.env {
        let _ = match value {
            EnvValue::Set(v) => writeln!(out, "export {}=\"{}\"", name, posix_escape(v)),
            EnvValue::Append(values) => {
                let joined = values
                    .iter()
                    .map(|v| posix_escape(v))
                    .collect::<Vec<_>>()
                    .join(&separator.to_string());
                writeln!(
                    out,
                    "export {name}=\"{joined}${{{name}:+{separator}${name}}}\""
                )
            }
        };
    }
    out
}

fn posix_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn render_cmd(info: &BuildInfo, separator: char) -> String {
    let mut out = String::new();
    for (name, value) in &info.env {
        let _ = match value {
            EnvValue::Set(v) => writeln!(out, "set \"{}={}\"", name, v),
            EnvValue::Append(values) => {
                let joined = values.join(&separator.to_string());
                writeln!(out, "set \"{name}={joined}{separator}%{name}%\"")
            }
        };
    }
    out
}

fn render_cargo(info: &BuildInfo) -> String {
    let mut out = String::new();
    for dir in &info.lib_dirs {
        let _ = writeln!(out, "cargo:rustc-link-search=native={}", dir.display());
    }
    for lib in &info.libs {
        let _ = writeln!(out, "cargo:rustc-link-lib={}", lib);
    }
    for dir in &info.include_dirs {
        let _ = writeln!(out, "cargo:include={}", dir.display());
    }
    for (key, value) in &info.user_info {
        let _ = writeln!(out, "cargo:rustc-env={}={}", key, value);
    }
    out
}
