//! Implementation of the `ninju print` command.
//!
//! Evaluates a build script without the working directory check and prints
//! the manifest, or the declaration log as JSON, to stdout.

use std::path::Path;

use anyhow::{Context, Result};

use ninju_lib::SessionConfig;
use ninju_lib::eval::evaluate_script;

use super::{ensure_exists, script_root};
use crate::output::{ManifestFormat, print_json};

pub fn cmd_print(script: &Path, format: ManifestFormat, newline: bool) -> Result<()> {
  ensure_exists(script)?;

  let config = SessionConfig {
    no_cwd_check: true,
    root_dir: script_root(script),
    ..Default::default()
  };
  let session = evaluate_script(script, config)
    .with_context(|| format!("Failed to evaluate build script: {}", script.display()))?;

  match format {
    ManifestFormat::Ninja => {
      let text = session.render(newline).context("Failed to render build manifest")?;
      print!("{}", text);
    }
    ManifestFormat::Json => print_json(&session.entries())?,
  }
  Ok(())
}
