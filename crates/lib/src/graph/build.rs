//! Build edges, phony edges, default declarations, and the arguments that
//! produce them.

use serde::Serialize;

use super::names::NameGenerator;
use crate::consts::DEFAULT_NAME_EXT;
use crate::files::Files;

/// A `build` statement.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Build {
  pub outputs: Vec<String>,
  pub rule: String,
  pub inputs: Vec<String>,
  pub implicit: Vec<String>,
  pub order_only: Vec<String>,
  pub variables: Vec<(String, String)>,
  pub implicit_outputs: Vec<String>,
}

/// A `build <name>: phony <inputs>` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phony {
  pub name: String,
  pub inputs: Vec<String>,
}

/// A `default` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultTargets {
  pub targets: Vec<String>,
}

/// How the outputs of a rule invocation are chosen.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Outputs {
  /// One generated name.
  #[default]
  Generate,
  /// This many generated names, in order.
  Count(usize),
  /// Exactly these paths.
  Explicit(Files),
}

impl From<usize> for Outputs {
  fn from(count: usize) -> Self {
    Outputs::Count(count)
  }
}

impl From<Files> for Outputs {
  fn from(files: Files) -> Self {
    Outputs::Explicit(files)
  }
}

/// Resolve requested outputs to paths. Only `Generate` and `Count` consult the
/// name generator. A zero count or an empty explicit list counts as "not
/// given" and yields one generated name.
pub fn normalize_outputs(outputs: &Outputs, names: &mut NameGenerator) -> Vec<String> {
  match outputs {
    Outputs::Count(n) if *n > 0 => (0..*n).map(|_| names.next_name(DEFAULT_NAME_EXT)).collect(),
    Outputs::Explicit(files) if !files.is_empty() => files.paths().to_vec(),
    _ => vec![names.next_name(DEFAULT_NAME_EXT)],
  }
}

/// Per-invocation arguments of a build rule.
#[derive(Debug, Default, Clone)]
pub struct BuildArgs {
  pub outputs: Outputs,
  pub implicit: Files,
  pub order_only: Files,
  pub variables: Vec<(String, String)>,
  pub implicit_outputs: Files,
}

impl BuildArgs {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn outputs(mut self, outputs: impl Into<Files>) -> Self {
    self.outputs = Outputs::Explicit(outputs.into());
    self
  }

  pub fn count(mut self, count: usize) -> Self {
    self.outputs = Outputs::Count(count);
    self
  }

  pub fn implicit(mut self, implicit: impl Into<Files>) -> Self {
    self.implicit = implicit.into();
    self
  }

  pub fn order_only(mut self, order_only: impl Into<Files>) -> Self {
    self.order_only = order_only.into();
    self
  }

  pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.variables.push((name.into(), value.into()));
    self
  }

  pub fn implicit_outputs(mut self, implicit_outputs: impl Into<Files>) -> Self {
    self.implicit_outputs = implicit_outputs.into();
    self
  }
}

/// Per-invocation arguments of an exec rule.
#[derive(Debug, Default, Clone)]
pub struct ExecArgs {
  pub inputs: Files,
  pub variables: Vec<(String, String)>,
}

impl ExecArgs {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn inputs(mut self, inputs: impl Into<Files>) -> Self {
    self.inputs = inputs.into();
    self
  }

  pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.variables.push((name.into(), value.into()));
    self
  }
}
