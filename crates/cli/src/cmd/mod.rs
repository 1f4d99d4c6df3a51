mod generate;
mod print;

pub use generate::{GenerateOptions, cmd_generate};
pub use print::cmd_print;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// The directory holding `script`, which is the root of its build tree.
fn script_root(script: &Path) -> PathBuf {
  match script.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  }
}

/// The script's file name, as seen from its root directory.
fn script_name(script: &Path) -> Result<String> {
  let name = script
    .file_name()
    .with_context(|| format!("Not a script file: {}", script.display()))?;
  Ok(name.to_string_lossy().into_owned())
}

fn ensure_exists(script: &Path) -> Result<()> {
  if !script.is_file() {
    anyhow::bail!("Build script not found: {}", script.display());
  }
  Ok(())
}
