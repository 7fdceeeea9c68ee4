// src/lib.rs

//! python-dev-config
//!
//! Locates a Python interpreter's development artifacts (executable,
//! headers, library, version) and publishes them as build configuration
//! for native-extension builds.
//!
//! # Pipeline
//!
//! - Recipe: package metadata, options and settings (TOML)
//! - Resolve: probe the interpreter via subprocess, pick paths per OS
//! - Publish: include/lib/bin dirs, link names, environment variables
//! - Package: export the license, compute the configuration-free package id

pub mod environment;
mod error;
pub mod interpreter;
pub mod package;
pub mod publish;
pub mod recipe;
pub mod settings;

pub use environment::{PythonEnvironment, PythonVersion, HEADER_MARKER};
pub use error::{Error, Result};
pub use interpreter::{CommandProbe, Probe, ProbeOutput, Resolver, ResolverConfig};
pub use package::{package, package_id};
pub use publish::{publish, render, BuildInfo, EnvValue, OutputFormat};
pub use recipe::{builtin_recipe, parse_recipe, parse_recipe_file, validate_recipe, Recipe, Requirement};
pub use settings::{Settings, TargetOs};
