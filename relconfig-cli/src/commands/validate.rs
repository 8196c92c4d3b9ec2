//! Command to check that a configuration tree loads and resolves.

use crate::error::CliError;
use crate::utils::{load_configs, GlobalOptions};
use clap::Args;
use relconfig::Settings;

/// Load and resolve everything, reporting any error.
#[derive(Args)]
pub struct ValidateCommand {}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (settings, configs) = load_configs(global, Settings::default())?;
        let resolved = configs.resolve_all(settings.parallel_resolve())?;

        if !global.quiet {
            println!(
                "Configuration is valid: {} releases, {} flags, {} directories",
                resolved.len(),
                configs.flags().len(),
                configs.directories().len()
            );
        }
        Ok(())
    }
}
