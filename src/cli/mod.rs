// src/cli/mod.rs
//! CLI definitions for python-dev-config
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! Every command works from a recipe (the built-in one unless `--recipe`
//! is given) with `-o key=value` option and `-s key=value` setting
//! overrides applied on top.

use clap::{Parser, Subcommand};
use python_dev_config::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "python-dev-config")]
#[command(author = "python-dev-config Contributors")]
#[command(version)]
#[command(about = "Locate Python development artifacts and publish them as build configuration", long_about = None)]
pub struct Cli {
    /// Recipe file (default: built-in python_dev_config recipe)
    #[arg(long, global = true, value_name = "FILE")]
    pub recipe: Option<PathBuf>,

    /// Option override, e.g. `-o python=python3.11` or `-o with_system_python=False`
    #[arg(short = 'o', long = "option", global = true, value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Setting override, e.g. `-s os=Windows`
    #[arg(short = 's', long = "setting", global = true, value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the interpreter and print the environment record as JSON
    Probe,

    /// Check that the interpreter has a usable development environment
    Check,

    /// Resolve and publish build configuration
    Publish {
        /// Output format: json, shell or cargo
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Copy exported files into a package folder and print the package id
    Package {
        /// Folder holding the exported files
        #[arg(long, default_value = ".")]
        source: PathBuf,

        /// Package folder to write
        #[arg(long)]
        output: PathBuf,
    },

    /// List build and runtime requirements for the selected options
    Requirements,

    /// Validate the recipe
    Validate,
}
