//! Build script evaluation.
//!
//! [`evaluate_script`] runs a Lua build script against a fresh [`Session`] and
//! hands the session back, so the caller decides whether to write the
//! manifest, print it or inspect its entries.

use std::path::Path;

use mlua::prelude::*;
use tracing::{debug, info};

use crate::error::NinjuError;
use crate::lua::{loaders, runtime};
use crate::session::{Session, SessionConfig};

/// Errors that can occur while evaluating a build script.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
  /// The script failed to load or raised an error.
  #[error("lua error: {0}")]
  Lua(#[from] LuaError),

  /// The session could not be created.
  #[error(transparent)]
  Ninju(#[from] NinjuError),
}

/// Evaluate the build script at `path` with a session built from `config`.
///
/// # Example
/// ```ignore
/// use std::path::Path;
/// use ninju_lib::eval::evaluate_script;
/// use ninju_lib::session::SessionConfig;
///
/// let session = evaluate_script(Path::new("build.lua"), SessionConfig::default())?;
/// if !session.is_generated() {
///   session.generate(true)?;
/// }
/// ```
pub fn evaluate_script(path: &Path, config: SessionConfig) -> Result<Session, EvalError> {
  let session = Session::new(config)?;
  debug!(script = %path.display(), "evaluating build script");

  {
    let lua = runtime::create_runtime(session.clone())?;
    loaders::load_file_with_dir(&lua, path)?;
  }

  info!(
    script = %path.display(),
    entries = session.entries().len(),
    "build script evaluated"
  );
  Ok(session)
}
