//! Executable lookup for rule declarations.
//!
//! A rule's executable is probed once, when the rule is declared. The probe
//! runs on the path after substituting declared variables; relative paths are
//! taken from the session's root directory. A missing
//! executable is never an error: the caller gets `found = false` together with
//! the literal path, and the session carries on with it. The tool may be
//! installed later, or ninja may find it on its own search path.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{NinjuError, Result};
use crate::files::Files;
use crate::graph::vars::ExpansionTable;

/// Outcome of an executable probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
  pub found: bool,
  /// Path to use in the manifest. This is the path as written when it names
  /// an executable file directly, the absolute path when found on `PATH`, and
  /// the path as written otherwise.
  pub path: String,
}

/// Resolve `executable`, which must flatten to exactly one entry. Relative
/// paths are looked up under `root_dir`.
pub fn find_executable(executable: &Files, vars: &ExpansionTable, root_dir: &Path) -> Result<Resolution> {
  let [path] = executable.paths() else {
    return Err(NinjuError::config("only one executable required"));
  };

  let expanded = vars.expand(path);
  if is_executable(&root_dir.join(&expanded)) {
    return Ok(Resolution {
      found: true,
      path: path.clone(),
    });
  }

  match search_path(&expanded) {
    Some(found) => Ok(Resolution {
      found: true,
      path: found.to_string_lossy().into_owned(),
    }),
    None => Ok(Resolution {
      found: false,
      path: path.clone(),
    }),
  }
}

/// Look a bare command name up on `PATH`. Names containing a separator are not
/// searched.
fn search_path(name: &str) -> Option<PathBuf> {
  if name.is_empty() || name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
    return None;
  }
  let paths = env::var_os("PATH")?;
  env::split_paths(&paths)
    .map(|dir| dir.join(name))
    .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
  use std::os::unix::fs::PermissionsExt;

  match path.metadata() {
    Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
    Err(_) => false,
  }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
  path.is_file()
}
