//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including settings loading, default map discovery, and configuration
//! loading.

use crate::error::CliError;
use relconfig::schema::MAP_FILE_NAME;
use relconfig::{FsDirectorySource, ReleaseConfigs, Settings, SettingsBuilder};
use std::env;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Release resolved when none is configured.
pub const DEFAULT_TARGET_RELEASE: &str = "trunk";

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Release config map files given on the command line.
    pub maps: Vec<PathBuf>,

    /// Release to resolve.
    pub release: Option<String>,

    /// Explicit settings file.
    pub settings: Option<PathBuf>,
}

/// Load layered settings.
///
/// Settings are merged from multiple sources with precedence:
/// 1. Global options and command arguments (highest priority)
/// 2. Environment variables
/// 3. Settings file
/// 4. Built-in defaults (lowest priority)
pub fn load_settings(global: &GlobalOptions, mut overrides: Settings) -> Result<Settings, CliError> {
    if !global.maps.is_empty() {
        overrides.maps = Some(global.maps.clone());
    }
    if let Some(ref release) = global.release {
        overrides.target_release = Some(release.clone());
    }

    let mut builder = SettingsBuilder::new()
        .with_working_dir(&env::current_dir()?)
        .with_overrides(overrides);
    if let Some(ref path) = global.settings {
        if !path.is_file() {
            return Err(CliError::InvalidArguments(format!(
                "Settings file not found: {}",
                path.display()
            )));
        }
        builder = builder.with_file(path);
    }

    builder.build().map_err(CliError::from)
}

/// The configured target release, or `trunk`.
pub fn target_release(settings: &Settings) -> &str {
    settings
        .target_release
        .as_deref()
        .unwrap_or(DEFAULT_TARGET_RELEASE)
}

/// Find the default release config maps under `root`.
///
/// Looks for `build/release/release_config_map.yaml`, then
/// `vendor/*/release/release_config_map.yaml` in name order.
pub fn discover_map_paths(root: &Path) -> Vec<PathBuf> {
    let mut maps = Vec::new();

    let core = root.join("build").join("release").join(MAP_FILE_NAME);
    if core.is_file() {
        maps.push(core);
    }

    let vendor = root.join("vendor");
    if vendor.is_dir() {
        let vendor_maps = WalkDir::new(&vendor)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| entry.path().join("release").join(MAP_FILE_NAME))
            .filter(|path| path.is_file());
        maps.extend(vendor_maps);
    }

    maps
}

/// Resolve the map list: configured maps, or the discovered defaults.
///
/// When falling back to discovery, the chosen list is reported on stderr.
pub fn resolve_map_paths(global: &GlobalOptions, settings: &Settings) -> Result<Vec<PathBuf>, CliError> {
    if !settings.maps().is_empty() {
        return Ok(settings.maps().to_vec());
    }

    let maps = discover_map_paths(&env::current_dir()?);
    if maps.is_empty() {
        return Err(CliError::NoConfigDirectories);
    }

    if !global.quiet {
        let joined: Vec<String> = maps.iter().map(|p| p.display().to_string()).collect();
        eprintln!(
            "No --map argument provided. Using: --map {}",
            joined.join(" --map ")
        );
    }
    Ok(maps)
}

/// Load settings and every configuration directory.
pub fn load_configs(
    global: &GlobalOptions,
    overrides: Settings,
) -> Result<(Settings, ReleaseConfigs), CliError> {
    let settings = load_settings(global, overrides)?;
    let maps = resolve_map_paths(global, &settings)?;
    log::debug!("Loading {} release config maps", maps.len());

    let configs = ReleaseConfigs::load(&FsDirectorySource::new(), &maps, settings.parallel_decode())?;
    Ok((settings, configs))
}
