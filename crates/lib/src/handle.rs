//! Bound rule invokers.
//!
//! Declaring a rule hands back a handle that remembers the rule and its
//! session. Invoking the handle appends one edge to the session's log and
//! returns the edge's outputs, ready to be fed into the next rule.

use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

use tracing::debug;

use crate::error::{NinjuError, Result};
use crate::files::Files;
use crate::graph::Graph;
use crate::graph::build::{Build, BuildArgs, ExecArgs, Outputs, normalize_outputs};
use crate::session::Session;

/// Invoker of a build rule.
///
/// Every edge it appends implicitly depends on the rule's resolved
/// executable, so ninja reruns the step when the tool changes.
#[derive(Clone)]
pub struct RuleHandle {
  name: String,
  executable: String,
  session: Weak<RefCell<Graph>>,
}

impl RuleHandle {
  pub(crate) fn new(name: &str, executable: String, session: Weak<RefCell<Graph>>) -> Self {
    Self {
      name: name.to_string(),
      executable,
      session,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn executable(&self) -> &str {
    &self.executable
  }

  pub fn invoke(&self, inputs: impl Into<Files>, args: BuildArgs) -> Result<Files> {
    let session = Session::upgrade(&self.session).ok_or(NinjuError::Detached)?;
    let mut graph = session.graph().borrow_mut();

    let outputs = normalize_outputs(&args.outputs, &mut graph.names);
    let mut implicit = vec![self.executable.clone()];
    implicit.extend(args.implicit.into_paths());

    debug!(rule = %self.name, outputs = ?outputs, "invoke rule");
    graph.add_build(Build {
      outputs: outputs.clone(),
      rule: self.name.clone(),
      inputs: inputs.into().into_paths(),
      implicit,
      order_only: args.order_only.into_paths(),
      variables: args.variables,
      implicit_outputs: args.implicit_outputs.into_paths(),
    });

    Ok(Files::attached(outputs, self.session.clone()))
  }
}

impl fmt::Debug for RuleHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RuleHandle")
      .field("name", &self.name)
      .field("executable", &self.executable)
      .finish()
  }
}

/// Invoker of an exec rule. Each invocation names exactly one target.
#[derive(Clone)]
pub struct ExecHandle {
  name: String,
  session: Weak<RefCell<Graph>>,
}

impl ExecHandle {
  pub(crate) fn new(name: &str, session: Weak<RefCell<Graph>>) -> Self {
    Self {
      name: name.to_string(),
      session,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn invoke(&self, target: impl Into<Files>, args: ExecArgs) -> Result<Files> {
    let target = target.into();
    if target.len() != 1 {
      return Err(NinjuError::config("exec_cmd can only have one target"));
    }

    let session = Session::upgrade(&self.session).ok_or(NinjuError::Detached)?;
    let mut graph = session.graph().borrow_mut();
    let outputs = normalize_outputs(&Outputs::Explicit(target.clone()), &mut graph.names);

    debug!(rule = %self.name, target = %target, "invoke exec rule");
    graph.add_build(Build {
      outputs,
      rule: self.name.clone(),
      inputs: args.inputs.into_paths(),
      variables: args.variables,
      ..Default::default()
    });

    Ok(target.attach(self.session.clone()))
  }
}

impl fmt::Debug for ExecHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ExecHandle").field("name", &self.name).finish()
  }
}
