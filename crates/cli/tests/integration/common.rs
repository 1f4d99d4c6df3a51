//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name))
    .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// A temporary project directory holding `build.lua`.
pub struct TestEnv {
  pub temp: TempDir,
  pub script_path: PathBuf,
}

impl TestEnv {
  /// Copy a fixture into a fresh project as `build.lua`.
  pub fn from_fixture(name: &str) -> Self {
    let env = Self::empty();
    std::fs::write(&env.script_path, fixture_content(name)).unwrap();
    env
  }

  /// A project with `build.lua` holding `content`.
  pub fn with_script(content: &str) -> Self {
    let env = Self::empty();
    std::fs::write(&env.script_path, content).unwrap();
    env
  }

  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let script_path = temp.path().join("build.lua");
    Self { temp, script_path }
  }

  pub fn read(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.temp.path().join(relative_path))
      .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
  }

  /// A `ninju` command running inside the project directory.
  pub fn ninju_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("ninju");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
