// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: recipe file
fn recipe_arg() -> Arg {
    Arg::new("recipe")
        .long("recipe")
        .value_name("FILE")
        .global(true)
        .help("Recipe file (default: built-in python_dev_config recipe)")
}

/// Common argument: option override
fn option_arg() -> Arg {
    Arg::new("option")
        .short('o')
        .long("option")
        .value_name("KEY=VALUE")
        .action(ArgAction::Append)
        .global(true)
        .help("Option override, e.g. python=python3.11")
}

/// Common argument: setting override
fn setting_arg() -> Arg {
    Arg::new("setting")
        .short('s')
        .long("setting")
        .value_name("KEY=VALUE")
        .action(ArgAction::Append)
        .global(true)
        .help("Setting override, e.g. os=Windows")
}

fn build_cli() -> Command {
    Command::new("python-dev-config")
        .version(env!("CARGO_PKG_VERSION"))
        .author("python-dev-config Contributors")
        .about("Locate Python development artifacts and publish them as build configuration")
        .subcommand_required(true)
        .arg(recipe_arg())
        .arg(option_arg())
        .arg(setting_arg())
        .subcommand(
            Command::new("probe")
                .about("Resolve the interpreter and print the environment record as JSON"),
        )
        .subcommand(
            Command::new("check")
                .about("Check that the interpreter has a usable development environment"),
        )
        .subcommand(
            Command::new("publish")
                .about("Resolve and publish build configuration")
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .default_value("json")
                        .value_parser(["json", "shell", "cargo"])
                        .help("Output format"),
                ),
        )
        .subcommand(
            Command::new("package")
                .about("Copy exported files into a package folder and print the package id")
                .arg(
                    Arg::new("source")
                        .long("source")
                        .default_value(".")
                        .help("Folder holding the exported files"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .required(true)
                        .help("Package folder to write"),
                ),
        )
        .subcommand(
            Command::new("requirements")
                .about("List build and runtime requirements for the selected options"),
        )
        .subcommand(Command::new("validate").about("Validate the recipe"))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=OUT_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = out_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("python-dev-config.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
