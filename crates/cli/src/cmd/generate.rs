//! Implementation of the `ninju generate` command.
//!
//! Evaluates a build script and writes `build.ninja` next to it. The manifest
//! carries a `configure` edge that reruns this command whenever the script
//! changes.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use ninju_lib::eval::evaluate_script;
use ninju_lib::{RegenerateConfig, SessionConfig};

use super::{ensure_exists, script_name, script_root};
use crate::output::print_success;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
  pub newline: bool,
  pub no_cwd_check: bool,
  pub build_file: Option<String>,
  pub build_dir: Option<String>,
}

pub fn cmd_generate(script: &Path, options: GenerateOptions) -> Result<()> {
  ensure_exists(script)?;
  let name = script_name(script)?;

  let executable = std::env::current_exe().context("Failed to locate the ninju executable")?;
  let regenerate = RegenerateConfig {
    executable: executable.to_string_lossy().into_owned(),
    args: Some(regenerate_args(&name, &options)),
  };
  let defaults = SessionConfig::default();
  let config = SessionConfig {
    build_file: options.build_file.unwrap_or(defaults.build_file),
    build_dir: options.build_dir.unwrap_or(defaults.build_dir),
    generators: vec![format!("${{root}}/{}", name)],
    regenerate: Some(regenerate),
    no_cwd_check: options.no_cwd_check,
    root_dir: script_root(script),
    ..defaults
  };
  debug!(?config, "session config");

  let session = evaluate_script(script, config)
    .with_context(|| format!("Failed to evaluate build script: {}", script.display()))?;

  let path = if session.is_generated() {
    session.manifest_path()
  } else {
    session
      .generate(options.newline)
      .context("Failed to write build manifest")?
  };

  print_success(&format!("Generated {}", path.display()));
  Ok(())
}

/// Arguments that rerun this exact generation from the root directory.
fn regenerate_args(script_name: &str, options: &GenerateOptions) -> String {
  let mut args = format!("generate {}", script_name);
  if !options.newline {
    args.push_str(" --no-newline");
  }
  if let Some(build_file) = &options.build_file {
    args.push_str(&format!(" --build-file {}", build_file));
  }
  if let Some(build_dir) = &options.build_dir {
    args.push_str(&format!(" --build-dir {}", build_dir));
  }
  args
}
