//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary working directory
//! - Writers for configuration directory files
//! - A standard two-directory fixture

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the binary reads; cleared for every command.
const ENV_VARS: [&str; 6] = [
    "RELCONFIG_MAPS",
    "TARGET_RELEASE",
    "RELCONFIG_OUT_DIR",
    "RELCONFIG_FORMATS",
    "RELCONFIG_PARALLEL",
    "RELCONFIG_LOG_MODE",
];

/// Test environment with an isolated working directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new, empty test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Create a test environment holding the standard fixture.
    ///
    /// `build/release` (container ALL):
    /// - `RELEASE_FOO` = false, `RELEASE_NAME` = "core"
    /// - releases `trunk` and `staging` (inherits `trunk`)
    /// - alias `next` -> `trunk`
    /// - `staging` sets `RELEASE_NAME` = "staging"
    ///
    /// `vendor/acme/release` (container VENDOR):
    /// - `trunk` sets `RELEASE_FOO` = true
    pub fn with_standard_tree() -> Self {
        let env = Self::new();
        env.write_map("build/release", "ALL", &[("next", "trunk")]);
        env.declare("build/release", "RELEASE_FOO", "bool_value: false");
        env.declare("build/release", "RELEASE_NAME", "string_value: core");
        env.release("build/release", "trunk", &[]);
        env.release("build/release", "staging", &["trunk"]);
        env.set_value("build/release", "staging", "RELEASE_NAME", "string_value: staging");

        env.write_map("vendor/acme/release", "VENDOR", &[]);
        env.release("vendor/acme/release", "trunk", &[]);
        env.set_value("vendor/acme/release", "trunk", "RELEASE_FOO", "bool_value: true");
        env
    }

    /// Get a command builder running in this environment.
    ///
    /// The working directory is the temp path and every variable the
    /// binary reads is removed.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("relconfig").expect("Failed to find relconfig binary");
        cmd.current_dir(&self.temp_path);
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file relative to the temp path.
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(rel);
        fs::create_dir_all(path.parent().expect("file has a parent"))
            .expect("Failed to create test directory");
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write a release config map, returning its path.
    pub fn write_map(&self, dir: &str, container: &str, aliases: &[(&str, &str)]) -> PathBuf {
        let mut map = format!("default_container: {container}\n");
        if !aliases.is_empty() {
            map.push_str("aliases:\n");
            for (name, target) in aliases {
                map.push_str(&format!("  - name: {name}\n    target: {target}\n"));
            }
        }
        self.write(&format!("{dir}/release_config_map.yaml"), &map)
    }

    /// Path of a directory's map file.
    pub fn map_path(&self, dir: &str) -> PathBuf {
        self.temp_path.join(dir).join("release_config_map.yaml")
    }

    /// Declare a flag in namespace `build`; `value` is one YAML value field.
    pub fn declare(&self, dir: &str, name: &str, value: &str) -> PathBuf {
        self.write(
            &format!("{dir}/flag_declarations/{name}.yaml"),
            &format!("name: {name}\nnamespace: build\nvalue:\n  {value}\n"),
        )
    }

    /// Contribute to a release.
    pub fn release(&self, dir: &str, name: &str, inherits: &[&str]) -> PathBuf {
        let mut record = format!("name: {name}\n");
        if !inherits.is_empty() {
            record.push_str(&format!("inherits: [{}]\n", inherits.join(", ")));
        }
        self.write(&format!("{dir}/release_configs/{name}.yaml"), &record)
    }

    /// Set a flag value for a release; `value` is one YAML value field.
    pub fn set_value(&self, dir: &str, release: &str, flag: &str, value: &str) -> PathBuf {
        self.write(
            &format!("{dir}/flag_values/{release}/{flag}.yaml"),
            &format!("name: {flag}\nvalue:\n  {value}\n"),
        )
    }

    /// Run a command that must succeed and return its stdout.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run relconfig");

        assert!(
            output.status.success(),
            "relconfig {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
