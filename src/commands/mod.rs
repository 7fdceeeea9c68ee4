// src/commands/mod.rs
//! Command handlers for the python-dev-config CLI

mod package;
mod recipe;
mod resolve;

pub use package::cmd_package;
pub use recipe::{cmd_requirements, cmd_validate, load_recipe};
pub use resolve::{cmd_check, cmd_probe, cmd_publish};
