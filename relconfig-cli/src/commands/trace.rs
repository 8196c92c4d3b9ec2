//! Trace command implementation.
//!
//! Prints the provenance trail of one flag in the target release: the
//! declaration first, then every value file that set it, in application
//! order.

use crate::error::CliError;
use crate::utils::{load_configs, target_release, GlobalOptions};
use clap::Args;
use relconfig::Settings;
use std::io::Write;

/// Show where one flag's value came from.
#[derive(Args)]
pub struct TraceCommand {
    /// Flag to trace
    #[arg(value_name = "FLAG")]
    pub flag: String,
}

impl TraceCommand {
    /// Execute the trace command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (settings, configs) = load_configs(global, Settings::default())?;
        let release = configs.resolve(target_release(&settings))?;

        let flag = release.flag(&self.flag).ok_or_else(|| {
            CliError::SemanticFailure(format!(
                "Flag {} is not declared (release {})",
                self.flag,
                release.name()
            ))
        })?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(
            handle,
            "{} = {} ({})",
            self.flag,
            flag.value(),
            release.name()
        )?;
        for (i, trace) in flag.traces().iter().enumerate() {
            let kind = if i == 0 { "declared" } else { "set" };
            writeln!(
                handle,
                "  {kind:<8}\t{}\t{}",
                trace.value, trace.source
            )?;
        }

        Ok(())
    }
}
