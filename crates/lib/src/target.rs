use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

use crate::error::{NinjuError, Result};
use crate::files::Files;
use crate::graph::Graph;
use crate::graph::build::ExecArgs;
use crate::session::Session;

/// A named logical target, not necessarily a file.
#[derive(Clone)]
pub struct Target {
  name: String,
  session: Weak<RefCell<Graph>>,
}

impl Target {
  pub(crate) fn new(name: &str, session: Weak<RefCell<Graph>>) -> Self {
    Self {
      name: name.to_string(),
      session,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  fn session(&self) -> Result<Session> {
    Session::upgrade(&self.session).ok_or(NinjuError::Detached)
  }

  /// Make this target a phony alias for `inputs`.
  pub fn phony(&self, inputs: impl Into<Files>) -> Result<()> {
    self.session()?.phony(&self.name, inputs);
    Ok(())
  }

  /// Run the exec rule `rule` against this target.
  pub fn exec(&self, rule: &str, args: ExecArgs) -> Result<Files> {
    self.session()?.exec_rule(rule)?.invoke(self, args)
  }
}

impl fmt::Debug for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Target").field(&self.name).finish()
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}
