//! Tool settings.
//!
//! Settings are merged from several sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `SettingsBuilder::with_overrides`)
//! 2. Environment variables (`RELCONFIG_*`, `TARGET_RELEASE`)
//! 3. Settings file (`relconfig.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use relconfig::settings::SettingsBuilder;
//! use std::path::Path;
//!
//! let settings = SettingsBuilder::new()
//!     .with_working_dir(Path::new("."))
//!     .build()
//!     .unwrap();
//! println!("maps: {:?}", settings.maps());
//! ```

pub mod builder;
pub mod environment;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::SettingsBuilder;
pub use environment::EnvironmentSettings;
pub use merger::SettingsMerger;
pub use schema::{Settings, SETTINGS_FILE_NAME};
pub use validator::SettingsValidator;
