//! The session: single owner of one manifest's declarations.
//!
//! A [`Session`] is a cheap handle (`Rc`) to the declaration log and its
//! registries. Values handed out by the session ([`Files`], [`Target`],
//! [`RuleHandle`], [`ExecHandle`], [`DirFn`]) refer back to it weakly. This
//! keeps them usable as fluent receivers without owning the graph.
//!
//! Sessions are single-threaded by construction (`Rc<RefCell<_>>`).

use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

use serde::Deserialize;
use tracing::{info, warn};

use crate::consts::{
  CONFIGURE_RULE, DEFAULT_BUILD_DIR, DEFAULT_BUILD_FILE, DEFAULT_NAME_PREFIX, NINJA_REQUIRED_VERSION, RESERVED_VARS,
};
use crate::error::{NinjuError, Result};
use crate::files::{Files, join_path};
use crate::graph::build::BuildArgs;
use crate::graph::rule::{ExecOptions, ExecRule, Rule, RuleOptions};
use crate::graph::{Entry, Graph};
use crate::handle::{ExecHandle, RuleHandle};
use crate::resolve::{Resolution, find_executable};
use crate::serialize::write_manifest;
use crate::target::Target;

/// How the manifest regenerates itself when its generator inputs change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegenerateConfig {
  pub executable: String,
  #[serde(default)]
  pub args: Option<String>,
}

/// Construction options of a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
  /// Manifest file name, relative to `root_dir`.
  pub build_file: String,
  /// Build output directory, relative to `${root}`.
  pub build_dir: String,
  /// Files the self-regeneration edge depends on.
  pub generators: Vec<String>,
  pub regenerate: Option<RegenerateConfig>,
  /// Skip the check that the process runs from `root_dir`. Tests only.
  pub no_cwd_check: bool,
  pub root_dir: PathBuf,
  pub name_prefix: String,
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self {
      build_file: DEFAULT_BUILD_FILE.to_string(),
      build_dir: DEFAULT_BUILD_DIR.to_string(),
      generators: Vec::new(),
      regenerate: None,
      no_cwd_check: false,
      root_dir: PathBuf::from("."),
      name_prefix: DEFAULT_NAME_PREFIX.to_string(),
    }
  }
}

#[derive(Clone)]
pub struct Session {
  inner: Rc<RefCell<Graph>>,
}

impl Session {
  /// Create a session and declare its reserved variables (and the
  /// regeneration rule when configured).
  pub fn new(config: SessionConfig) -> Result<Self> {
    if !config.no_cwd_check {
      check_cwd(&config.root_dir)?;
    }

    let session = Session {
      inner: Rc::new(RefCell::new(Graph::new(
        config.root_dir.clone(),
        config.build_file.clone(),
        &config.name_prefix,
      ))),
    };

    session.var_override("ninja_required_version", NINJA_REQUIRED_VERSION);
    session.var_override("root", ".");
    session.var_override("builddir", &join_path("${root}", &[config.build_dir.as_str()]));

    if let Some(regen) = &config.regenerate {
      let mut options = RuleOptions::default().description("Regenerate ninja build file");
      options.args = regen.args.clone();
      options.generator = true;
      let configure = session.cmd(CONFIGURE_RULE, regen.executable.as_str(), options)?;
      configure.invoke(
        Files::new(),
        BuildArgs::new()
          .outputs(session.root(&[config.build_file.as_str()]))
          .implicit(config.generators.clone()),
      )?;
    }

    Ok(session)
  }

  pub(crate) fn upgrade(weak: &Weak<RefCell<Graph>>) -> Option<Session> {
    weak.upgrade().map(|inner| Session { inner })
  }

  pub(crate) fn downgrade(&self) -> Weak<RefCell<Graph>> {
    Rc::downgrade(&self.inner)
  }

  pub(crate) fn graph(&self) -> &RefCell<Graph> {
    &self.inner
  }

  /// Declare a variable and return its `${name}` reference. The reserved
  /// variables can only be redeclared through [`var_override`](Self::var_override).
  pub fn var(&self, name: &str, value: &str) -> Result<String> {
    if RESERVED_VARS.contains(&name) {
      return Err(NinjuError::config(format!(
        "variable '{}' is reserved; use var_override to redeclare it",
        name
      )));
    }
    Ok(self.var_override(name, value))
  }

  pub fn var_override(&self, name: &str, value: &str) -> String {
    self.inner.borrow_mut().declare_var(name, value)
  }

  /// A directory function rooted at `${root}/<segments>`. With `var`, the
  /// directory is first declared as that variable and referenced through it.
  pub fn dir(&self, segments: &[&str], var: Option<&str>) -> Result<DirFn> {
    let mut prefix = join_path("${root}", segments);
    if let Some(var) = var {
      prefix = self.var(var, &prefix)?;
    }
    Ok(DirFn {
      prefix,
      session: self.downgrade(),
    })
  }

  pub fn root(&self, segments: &[&str]) -> Files {
    Files::attached(vec![join_path("${root}", segments)], self.downgrade())
  }

  pub fn builddir(&self, segments: &[&str]) -> Files {
    Files::attached(vec![join_path("${builddir}", segments)], self.downgrade())
  }

  /// Flatten `value` into a `Files` attached to this session.
  pub fn files(&self, value: impl Into<Files>) -> Files {
    value.into().attach(self.downgrade())
  }

  /// Declare a build rule running `executable`.
  pub fn cmd(&self, name: &str, executable: impl Into<Files>, options: RuleOptions) -> Result<RuleHandle> {
    let mut graph = self.inner.borrow_mut();
    let resolution = resolve_or_warn(name, &executable.into(), &graph)?;
    let pool = options.pool.as_ref().map(|spec| graph.setup_pool(spec)).transpose()?;

    graph.add_rule(Rule {
      name: name.to_string(),
      executable: resolution.path.clone(),
      args: options.args,
      description: options.description,
      depfile: options.depfile,
      generator: options.generator,
      pool,
      restat: options.restat,
      rspfile: options.rspfile,
      rspfile_content: options.rspfile_content,
      deps: options.deps,
    });

    Ok(RuleHandle::new(name, resolution.path, self.downgrade()))
  }

  /// Declare a run-once rule bound to the console pool.
  pub fn exec_cmd(&self, name: &str, executable: impl Into<Files>, options: ExecOptions) -> Result<ExecHandle> {
    let mut graph = self.inner.borrow_mut();
    let resolution = resolve_or_warn(name, &executable.into(), &graph)?;

    graph.add_exec_rule(ExecRule {
      name: name.to_string(),
      executable: resolution.path,
      args: options.args,
      description: options.description,
      rspfile: options.rspfile,
      rspfile_content: options.rspfile_content,
    });

    Ok(ExecHandle::new(name, self.downgrade()))
  }

  /// Look up a declared build rule.
  pub fn rule(&self, name: &str) -> Result<RuleHandle> {
    let graph = self.inner.borrow();
    let executable = graph
      .rules
      .get(name)
      .ok_or_else(|| NinjuError::UnknownRule(name.to_string()))?;
    Ok(RuleHandle::new(name, executable.clone(), self.downgrade()))
  }

  /// Look up a declared exec rule.
  pub fn exec_rule(&self, name: &str) -> Result<ExecHandle> {
    if !self.inner.borrow().exec_rules.contains(name) {
      return Err(NinjuError::UnknownRule(name.to_string()));
    }
    Ok(ExecHandle::new(name, self.downgrade()))
  }

  pub fn target(&self, name: &str) -> Target {
    Target::new(name, self.downgrade())
  }

  pub fn default(&self, targets: impl Into<Files>) {
    let targets = targets.into().into_paths();
    self.inner.borrow_mut().add_default(targets);
  }

  pub fn phony(&self, name: &str, inputs: impl Into<Files>) {
    let inputs = inputs.into().into_paths();
    self.inner.borrow_mut().add_phony(name, inputs);
  }

  /// Snapshot of the declaration log.
  pub fn entries(&self) -> Vec<Entry> {
    self.inner.borrow().entries.clone()
  }

  /// Path `generate` writes to.
  pub fn manifest_path(&self) -> PathBuf {
    let graph = self.inner.borrow();
    graph.root_dir.join(&graph.build_file)
  }

  /// Whether [`generate`](Self::generate) has written the manifest.
  pub fn is_generated(&self) -> bool {
    self.inner.borrow().generated
  }

  /// Serialize the log into `output`.
  pub fn write_to<W: Write>(&self, output: W, newline: bool) -> Result<W> {
    write_manifest(&self.inner.borrow().entries, output, newline)
  }

  /// Serialize the log into a string.
  pub fn render(&self, newline: bool) -> Result<String> {
    let buf = self.write_to(Vec::new(), newline)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
  }

  /// Write the manifest file, overwriting any previous one.
  pub fn generate(&self, newline: bool) -> Result<PathBuf> {
    let path = self.manifest_path();
    let io_err = |source| NinjuError::Io {
      path: path.clone(),
      source,
    };

    let file = File::create(&path).map_err(io_err)?;
    let mut out = self.write_to(BufWriter::new(file), newline).map_err(|e| match e {
      NinjuError::Write(source) => io_err(source),
      other => other,
    })?;
    out.flush().map_err(io_err)?;

    let mut graph = self.inner.borrow_mut();
    graph.generated = true;
    info!(path = %path.display(), entries = graph.entries.len(), "manifest written");
    Ok(path)
  }
}

impl fmt::Debug for Session {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let graph = self.inner.borrow();
    f.debug_struct("Session")
      .field("root_dir", &graph.root_dir)
      .field("entries", &graph.entries.len())
      .finish()
  }
}

/// A directory prefix that turns path segments into [`Files`].
#[derive(Debug, Clone)]
pub struct DirFn {
  prefix: String,
  session: Weak<RefCell<Graph>>,
}

impl DirFn {
  pub fn prefix(&self) -> &str {
    &self.prefix
  }

  pub fn file(&self, segments: &[&str]) -> Files {
    Files::attached(vec![join_path(&self.prefix, segments)], self.session.clone())
  }
}

fn resolve_or_warn(rule: &str, executable: &Files, graph: &Graph) -> Result<Resolution> {
  let resolution = find_executable(executable, &graph.vars, &graph.root_dir)?;
  if !resolution.found {
    warn!(rule = %rule, executable = %resolution.path, "executable not found");
  }
  Ok(resolution)
}

fn check_cwd(root_dir: &Path) -> Result<()> {
  let root = dunce::canonicalize(root_dir)
    .map_err(|e| NinjuError::config(format!("cannot resolve root directory '{}': {}", root_dir.display(), e)))?;
  let cwd = std::env::current_dir()
    .and_then(dunce::canonicalize)
    .map_err(|e| NinjuError::config(format!("cannot resolve current directory: {}", e)))?;
  if root != cwd {
    return Err(NinjuError::config(format!(
      "cannot run from outside directory \"{}\"",
      root.display()
    )));
  }
  Ok(())
}
