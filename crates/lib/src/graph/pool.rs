use serde::{Deserialize, Serialize};

use crate::consts::CONSOLE_POOL;
use crate::error::{NinjuError, Result};

/// A `pool` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pool {
  pub name: String,
  pub depth: u32,
}

impl Pool {
  pub fn with_depth(depth: u32) -> Self {
    Self {
      name: pool_name(depth),
      depth,
    }
  }
}

/// The pool a rule asks for: a concurrency depth, or a pool by name. The only
/// name accepted is the reserved `console` pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PoolSpec {
  Depth(i64),
  Named(String),
}

impl PoolSpec {
  pub fn console() -> Self {
    PoolSpec::Named(CONSOLE_POOL.to_string())
  }

  /// Validate the requested pool and return the name a rule should reference, plus the
  /// declaration it needs when the pool is depth-based.
  pub fn resolve(&self) -> Result<(String, Option<Pool>)> {
    match self {
      PoolSpec::Depth(depth) if *depth >= 1 => {
        let depth = u32::try_from(*depth).map_err(|_| invalid_pool())?;
        let pool = Pool::with_depth(depth);
        Ok((pool.name.clone(), Some(pool)))
      }
      PoolSpec::Named(name) if name == CONSOLE_POOL => Ok((name.clone(), None)),
      _ => Err(invalid_pool()),
    }
  }
}

impl From<i64> for PoolSpec {
  fn from(depth: i64) -> Self {
    PoolSpec::Depth(depth)
  }
}

impl From<&str> for PoolSpec {
  fn from(name: &str) -> Self {
    PoolSpec::Named(name.to_string())
  }
}

pub fn pool_name(depth: u32) -> String {
  format!("pool_{}", depth)
}

fn invalid_pool() -> NinjuError {
  NinjuError::config("pool must be an integer greater than 0 or 'console'")
}
