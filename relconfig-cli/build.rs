//! Build script for relconfig-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("relconfig")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve layered build release configurations")
        .long_about(
            "Resolve flag declarations, release inheritance and aliases from an ordered \
             list of configuration directories into traced release artifacts",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("map")
                .long("map")
                .help("Release config map file, in precedence order (repeatable)")
                .value_name("PATH")
                .global(true)
                .action(clap::ArgAction::Append)
                .env("RELCONFIG_MAPS"),
        )
        .arg(
            Arg::new("release")
                .long("release")
                .help("Release to resolve (default: trunk)")
                .value_name("NAME")
                .global(true)
                .env("TARGET_RELEASE"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .help("Settings file (default: relconfig.yaml in the working directory)")
                .value_name("PATH")
                .global(true),
        )
        .subcommands(vec![
            Command::new("generate")
                .about("Resolve every release and write artifacts")
                .long_about(
                    "Write all_release_configs.{yaml,pb,json} and release_config.mk into --out-dir",
                ),
            Command::new("show")
                .about("Show the effective flag values of the target release")
                .long_about("Print every flag of the target release with its final value"),
            Command::new("trace")
                .about("Show where one flag's value came from")
                .long_about("Print the declaration and every override of one flag, in order"),
            Command::new("releases")
                .about("List releases with their alternate names and inheritance")
                .long_about("Display every release, its aliases and the releases it inherits"),
            Command::new("validate")
                .about("Load and resolve everything, reporting any error")
                .long_about("Check that every release resolves without conflicts or cycles"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("relconfig.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
