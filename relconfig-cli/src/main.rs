//! Main entry point for the relconfig CLI.
//!
//! This is the command-line interface for the release configuration
//! resolver. It provides commands for working with resolved releases:
//! - `generate`: Write artifacts for every release
//! - `show`: Print the target release's flag values
//! - `trace`: Print the provenance of one flag
//! - `releases`: List releases
//! - `validate`: Check that everything resolves

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _level = relconfig::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        quiet: cli.quiet,
        maps: cli.maps,
        release: cli.release,
        settings: cli.settings,
    };

    let result = match cli.command {
        cli::Command::Generate(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::Trace(cmd) => cmd.execute(&global),
        cli::Command::Releases(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
