//! The declaration log and its registries.
//!
//! Every declaration (variable, pool, rule, build, phony, default) is appended
//! to a single [`Entry`] log in the order the caller issues it, and that order
//! is the order of the emitted manifest. Entries are never mutated or removed.
//! Alongside the log, the graph keeps the lookups declarations need: which
//! rules exist, which pool depths are already declared, the expansion table
//! and the name counter.
//!
//! # Submodules
//!
//! - [`build`] - Build, phony and default entries, and invocation arguments
//! - [`names`] - Generated names for unnamed outputs
//! - [`pool`] - Pool declarations and pool specs
//! - [`rule`] - Build rules and exec rules
//! - [`vars`] - Variables and the expansion table

pub mod build;
pub mod names;
pub mod pool;
pub mod rule;
pub mod vars;

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use build::{Build, DefaultTargets, Phony};
use names::NameGenerator;
use pool::{Pool, PoolSpec};
use rule::{ExecRule, Rule};
use vars::{ExpansionTable, Variable};

/// One entry of the declaration log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
  Variable(Variable),
  Pool(Pool),
  Rule(Rule),
  ExecRule(ExecRule),
  Build(Build),
  Phony(Phony),
  Default(DefaultTargets),
}

/// State owned by a session.
#[derive(Debug)]
pub(crate) struct Graph {
  pub(crate) entries: Vec<Entry>,
  /// Build rule name to resolved executable.
  pub(crate) rules: HashMap<String, String>,
  pub(crate) exec_rules: HashSet<String>,
  pub(crate) pools: BTreeSet<u32>,
  pub(crate) vars: ExpansionTable,
  pub(crate) names: NameGenerator,
  pub(crate) root_dir: PathBuf,
  pub(crate) build_file: String,
  pub(crate) generated: bool,
}

impl Graph {
  pub(crate) fn new(root_dir: PathBuf, build_file: String, name_prefix: &str) -> Self {
    Self {
      entries: Vec::new(),
      rules: HashMap::new(),
      exec_rules: HashSet::new(),
      pools: BTreeSet::new(),
      vars: ExpansionTable::default(),
      names: NameGenerator::new(name_prefix),
      root_dir,
      build_file,
      generated: false,
    }
  }

  pub(crate) fn append(&mut self, entry: Entry) {
    debug!(index = self.entries.len(), entry = ?entry, "append entry");
    self.entries.push(entry);
  }

  pub(crate) fn declare_var(&mut self, name: &str, value: &str) -> String {
    self.append(Entry::Variable(Variable {
      name: name.to_string(),
      value: value.to_string(),
    }));
    self.vars.insert(name, value);
    format!("${{{}}}", name)
  }

  /// Validate a pool spec and declare its pool the first time a depth is
  /// seen. Returns the pool name to reference.
  pub(crate) fn setup_pool(&mut self, spec: &PoolSpec) -> Result<String> {
    let (name, pool) = spec.resolve()?;
    if let Some(pool) = pool
      && self.pools.insert(pool.depth)
    {
      self.append(Entry::Pool(pool));
    }
    Ok(name)
  }

  pub(crate) fn add_rule(&mut self, rule: Rule) {
    self.rules.insert(rule.name.clone(), rule.executable.clone());
    self.append(Entry::Rule(rule));
  }

  pub(crate) fn add_exec_rule(&mut self, rule: ExecRule) {
    self.exec_rules.insert(rule.name.clone());
    self.append(Entry::ExecRule(rule));
  }

  pub(crate) fn add_build(&mut self, build: Build) {
    self.append(Entry::Build(build));
  }

  pub(crate) fn add_phony(&mut self, name: &str, inputs: Vec<String>) {
    self.append(Entry::Phony(Phony {
      name: name.to_string(),
      inputs,
    }));
  }

  pub(crate) fn add_default(&mut self, targets: Vec<String>) {
    self.append(Entry::Default(DefaultTargets { targets }));
  }
}
