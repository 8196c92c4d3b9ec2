#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # relconfig
//!
//! A library for resolving layered, inheritable build release configurations.
//!
//! Configuration is spread across an ordered list of directories, each
//! identified by a `release_config_map.yaml`. Directories declare flags,
//! contribute to named releases, and declare aliases for release names.
//! Later directories override earlier ones. A release may inherit other
//! releases, whose values apply before its own.
//!
//! ## Core Types
//!
//! - [`ReleaseConfigs`]: the loaded configuration, and resolution entry point
//! - [`ResolvedRelease`] and [`flag::ResolvedFlag`]: final values with provenance
//! - [`artifact::ReleaseConfigsArtifact`]: the exported data model
//! - [`Value`] and [`Container`]: flag values and build partitions
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use relconfig::loader::{MemoryDirectory, MemorySource};
//! use relconfig::{ArtifactAssembler, Container, ReleaseConfigs, Value};
//!
//! let mut source = MemorySource::new();
//! let core = source.add(
//!     MemoryDirectory::new("build/release", Some(Container::All))
//!         .declare("RELEASE_FOO", Value::Bool(false))
//!         .release("trunk", &[])
//!         .alias("next", "trunk"),
//! );
//! let vendor = source.add(
//!     MemoryDirectory::new("vendor/acme/release", Some(Container::Vendor))
//!         .release("trunk", &[])
//!         .value("trunk", "RELEASE_FOO", Value::Bool(true)),
//! );
//!
//! let configs = ReleaseConfigs::load(&source, &[core, vendor], false).unwrap();
//! let artifact = ArtifactAssembler::new(&configs).assemble("next").unwrap();
//! let flag = artifact.release_config.flag("RELEASE_FOO").unwrap();
//! assert_eq!(flag.value, Value::Bool(true));
//! assert!(flag.set_in().starts_with("vendor/acme/release"));
//! ```

pub mod alias;
pub mod artifact;
pub mod error;
pub mod flag;
pub mod loader;
pub mod logging;
pub mod release;
pub mod resolve;
pub mod schema;
pub mod settings;
pub mod value;

// Re-export key types at crate root for convenience
pub use alias::{AliasResolution, AliasTable};
pub use artifact::{ArtifactAssembler, ArtifactFormat, ArtifactWriter, ReleaseConfigsArtifact};
pub use error::{Error, Result};
pub use flag::{FlagDeclaration, FlagRegistry, ResolvedFlag, Trace};
pub use loader::{DirectoryLoader, DirectorySource, FsDirectorySource};
pub use logging::{init_logger, resolve_log_level, LogLevel, Logger};
pub use release::{ReleaseConfig, ReleaseContribution, ReleaseGraph};
pub use resolve::{LoadContext, ReleaseConfigs, ResolvedRelease};
pub use settings::{Settings, SettingsBuilder};
pub use value::{Container, Value};
