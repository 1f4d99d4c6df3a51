//! Error types for graph declaration and manifest generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while declaring a build graph or writing its manifest.
#[derive(Debug, Error)]
pub enum NinjuError {
  /// The declaration API was misused (bad pool, wrong exec arity, reserved
  /// variable, etc.). Fatal to the call that raised it.
  #[error("configuration error: {0}")]
  Configuration(String),

  /// An entry in the log violates an invariant the serializer relies on.
  #[error("generator error: {0}")]
  Generator(String),

  /// Fluent dispatch to a rule name that was never registered.
  #[error("unknown rule '{0}'")]
  UnknownRule(String),

  /// A `Files` or `Target` was used for dispatch without a live session.
  #[error("value is not attached to a live session")]
  Detached,

  /// Failure writing manifest text to a caller-supplied sink.
  #[error("write failed: {0}")]
  Write(#[from] std::io::Error),

  /// Failure to open or write the output manifest file.
  #[error("cannot write '{}': {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl NinjuError {
  pub(crate) fn config(msg: impl Into<String>) -> Self {
    NinjuError::Configuration(msg.into())
  }
}

pub type Result<T, E = NinjuError> = std::result::Result<T, E>;
