//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `generate`: Resolve every release and write artifacts
//! - `show`: Print the target release's effective flag values
//! - `trace`: Print the provenance trail of one flag
//! - `releases`: List releases with alternate names and inheritance
//! - `validate`: Load and resolve everything
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod generate;
pub mod releases;
pub mod show;
pub mod trace;
pub mod validate;

pub use completions::CompletionsCommand;
pub use generate::GenerateCommand;
pub use releases::ReleasesCommand;
pub use show::ShowCommand;
pub use trace::TraceCommand;
pub use validate::ValidateCommand;
