//! Generate command implementation.
//!
//! Resolves every release and writes the requested artifacts. Nothing is
//! written unless every release resolves.

use crate::error::CliError;
use crate::utils::{load_configs, target_release, GlobalOptions};
use clap::Args;
use relconfig::{ArtifactAssembler, ArtifactFormat, ArtifactWriter, Settings};
use std::path::PathBuf;

/// Resolve every release and write artifacts.
#[derive(Args)]
pub struct GenerateCommand {
    /// Directory to write artifacts into
    #[arg(long, value_name = "DIR", env = "RELCONFIG_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Artifact format to write (repeatable; default: all)
    #[arg(
        long = "format",
        value_name = "FORMAT",
        value_delimiter = ',',
        value_parser = parse_format
    )]
    pub formats: Vec<ArtifactFormat>,
}

fn parse_format(s: &str) -> Result<ArtifactFormat, String> {
    ArtifactFormat::parse(s).map_err(|e| e.to_string())
}

impl GenerateCommand {
    /// Execute the generate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let overrides = Settings {
            out_dir: self.out_dir,
            formats: (!self.formats.is_empty()).then_some(self.formats),
            ..Default::default()
        };
        let (settings, configs) = load_configs(global, overrides)?;

        let out_dir = settings.out_dir.clone().ok_or_else(|| {
            CliError::InvalidArguments("--out-dir is required for generate".to_string())
        })?;

        let artifact = ArtifactAssembler::new(&configs)
            .parallel(settings.parallel_resolve())
            .assemble(target_release(&settings))?;

        let written = ArtifactWriter::new(out_dir, &settings.formats()).write(&artifact)?;
        if !global.quiet {
            for path in written {
                println!("{}", path.display());
            }
        }

        Ok(())
    }
}
