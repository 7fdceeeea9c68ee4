// src/recipe/mod.rs

//! Recipe describing the python_dev_config package
//!
//! The recipe carries package metadata, the options that pick the
//! interpreter, optional pinned settings and the requirements declared when
//! the interpreter comes from a managed package.
//!
//! # Example Recipe
//!
//! ```toml
//! [package]
//! name = "python_dev_config"
//! version = "0.6"
//! license = "MIT"
//!
//! [options]
//! python = "python3"
//! with_system_python = true
//!
//! [requires]
//! build = ["cpython/3.10.0"]
//! runtime = ["python-pip/[>=19.2.3]@camposs/stable"]
//! ```

mod format;
pub mod parser;
mod requirement;

pub use format::{OptionsSection, PackageSection, Recipe, RequiresSection, SettingsSection};
pub use parser::{builtin_recipe, parse_recipe, parse_recipe_file, validate_recipe};
pub use requirement::Requirement;
