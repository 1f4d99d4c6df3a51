//! Rule declarations.
//!
//! A [`Rule`] is a reusable command template. Its `command` is the resolved
//! executable followed by the optional argument template. An [`ExecRule`] is
//! the single-target variant that always runs in the `console` pool.

use serde::{Deserialize, Serialize};

use super::pool::PoolSpec;
use crate::consts::CONSOLE_POOL;
use crate::writer::RuleStatement;

/// Options accepted when declaring a build rule.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleOptions {
  pub args: Option<String>,
  pub description: Option<String>,
  pub depfile: Option<String>,
  pub generator: bool,
  pub pool: Option<PoolSpec>,
  pub restat: bool,
  pub rspfile: Option<String>,
  pub rspfile_content: Option<String>,
  pub deps: Option<String>,
}

impl RuleOptions {
  pub fn args(mut self, args: impl Into<String>) -> Self {
    self.args = Some(args.into());
    self
  }

  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn pool(mut self, pool: impl Into<PoolSpec>) -> Self {
    self.pool = Some(pool.into());
    self
  }
}

/// Options accepted when declaring an exec rule.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecOptions {
  pub args: Option<String>,
  pub description: Option<String>,
  pub rspfile: Option<String>,
  pub rspfile_content: Option<String>,
}

impl ExecOptions {
  pub fn args(mut self, args: impl Into<String>) -> Self {
    self.args = Some(args.into());
    self
  }

  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
  pub name: String,
  pub executable: String,
  pub args: Option<String>,
  pub description: Option<String>,
  pub depfile: Option<String>,
  pub generator: bool,
  /// Pool name, already validated.
  pub pool: Option<String>,
  pub restat: bool,
  pub rspfile: Option<String>,
  pub rspfile_content: Option<String>,
  pub deps: Option<String>,
}

impl Rule {
  pub fn command(&self) -> String {
    command(&self.executable, self.args.as_deref())
  }

  pub(crate) fn statement<'a>(&'a self, command: &'a str) -> RuleStatement<'a> {
    RuleStatement {
      name: &self.name,
      command,
      description: self.description.as_deref(),
      depfile: self.depfile.as_deref(),
      generator: self.generator,
      pool: self.pool.as_deref(),
      restat: self.restat,
      rspfile: self.rspfile.as_deref(),
      rspfile_content: self.rspfile_content.as_deref(),
      deps: self.deps.as_deref(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecRule {
  pub name: String,
  pub executable: String,
  pub args: Option<String>,
  pub description: Option<String>,
  pub rspfile: Option<String>,
  pub rspfile_content: Option<String>,
}

impl ExecRule {
  pub fn command(&self) -> String {
    command(&self.executable, self.args.as_deref())
  }

  pub(crate) fn statement<'a>(&'a self, command: &'a str) -> RuleStatement<'a> {
    RuleStatement {
      name: &self.name,
      command,
      description: self.description.as_deref(),
      pool: Some(CONSOLE_POOL),
      rspfile: self.rspfile.as_deref(),
      rspfile_content: self.rspfile_content.as_deref(),
      ..Default::default()
    }
  }
}

fn command(executable: &str, args: Option<&str>) -> String {
  match args {
    Some(args) => format!("{} {}", executable, args),
    None => executable.to_string(),
  }
}
