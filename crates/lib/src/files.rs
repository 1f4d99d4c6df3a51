//! The `Files` value: an ordered, flattening list of path-like entries.
//!
//! `Files` is the currency exchanged between rule invocations. Building one
//! from nested values flattens them into a single ordered list. Empty entries
//! and `None`s are dropped, and duplicates are kept. A `Files` produced by a
//! [`Session`](crate::session::Session) remembers that session weakly, which
//! lets it act as the receiver of any rule declared there:
//!
//! ```ignore
//! let out = src.file(&["a.txt"]).apply("cmd1")?.apply("cmd2")?;
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

use crate::error::{NinjuError, Result};
use crate::graph::Graph;
use crate::graph::build::BuildArgs;
use crate::session::Session;
use crate::target::Target;

#[derive(Clone, Default)]
pub struct Files {
  paths: Vec<String>,
  session: Option<Weak<RefCell<Graph>>>,
}

impl Files {
  pub fn new() -> Self {
    Self::default()
  }

  /// Flatten several values into one, keeping their order.
  pub fn from_parts(parts: impl IntoIterator<Item = Files>) -> Self {
    let mut files = Files::new();
    for part in parts {
      files.extend(part);
    }
    files
  }

  pub(crate) fn attached(paths: Vec<String>, session: Weak<RefCell<Graph>>) -> Self {
    let mut files = Files::from(paths);
    files.session = Some(session);
    files
  }

  pub(crate) fn attach(mut self, session: Weak<RefCell<Graph>>) -> Self {
    self.session = Some(session);
    self
  }

  /// Append another value's entries. The first attached session wins.
  pub fn extend(&mut self, other: Files) {
    if self.session.is_none() {
      self.session = other.session;
    }
    self.paths.extend(other.paths);
  }

  pub fn paths(&self) -> &[String] {
    &self.paths
  }

  pub fn into_paths(self) -> Vec<String> {
    self.paths
  }

  pub fn len(&self) -> usize {
    self.paths.len()
  }

  pub fn is_empty(&self) -> bool {
    self.paths.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, String> {
    self.paths.iter()
  }

  pub fn is_attached(&self) -> bool {
    self.session().is_some()
  }

  /// The owning session, if this value was produced by one that is still alive.
  pub fn session(&self) -> Option<Session> {
    self.session.as_ref().and_then(Session::upgrade)
  }

  /// Invoke the build rule `rule` of the owning session with these files as
  /// inputs.
  pub fn invoke(&self, rule: &str, args: BuildArgs) -> Result<Files> {
    let session = self.session().ok_or(NinjuError::Detached)?;
    session.rule(rule)?.invoke(self.clone(), args)
  }

  /// [`invoke`](Self::invoke) with default arguments: one generated output.
  pub fn apply(&self, rule: &str) -> Result<Files> {
    self.invoke(rule, BuildArgs::default())
  }
}

/// Join path segments with `/`. An absolute segment discards what came before
/// it.
pub fn join_path(base: &str, segments: &[&str]) -> String {
  let mut path = base.to_string();
  for segment in segments {
    if segment.starts_with('/') || path.is_empty() {
      path = segment.to_string();
    } else if path.ends_with('/') {
      path.push_str(segment);
    } else {
      path.push('/');
      path.push_str(segment);
    }
  }
  path
}

/// Build a [`Files`] from any mixture of values that convert into one.
///
/// ```
/// use ninju_lib::files;
/// use ninju_lib::files::Files;
///
/// let a = Files::from(vec!["a", "b"]);
/// let all = files![a, "c", None::<&str>, vec!["d"]];
/// assert_eq!(all.paths(), ["a", "b", "c", "d"]);
/// ```
#[macro_export]
macro_rules! files {
  ($($item:expr),* $(,)?) => {
    $crate::files::Files::from_parts([$($crate::files::Files::from($item)),*])
  };
}

impl PartialEq for Files {
  fn eq(&self, other: &Self) -> bool {
    self.paths == other.paths
  }
}

impl Eq for Files {}

impl fmt::Debug for Files {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(&self.paths).finish()
  }
}

impl fmt::Display for Files {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.paths.join(" "))
  }
}

impl From<&str> for Files {
  fn from(path: &str) -> Self {
    Files::from(path.to_string())
  }
}

impl From<String> for Files {
  fn from(path: String) -> Self {
    let paths = if path.is_empty() { Vec::new() } else { vec![path] };
    Files { paths, session: None }
  }
}

impl From<&String> for Files {
  fn from(path: &String) -> Self {
    Files::from(path.clone())
  }
}

impl From<&Files> for Files {
  fn from(files: &Files) -> Self {
    files.clone()
  }
}

impl From<&Target> for Files {
  fn from(target: &Target) -> Self {
    Files::from(target.name())
  }
}

impl From<Target> for Files {
  fn from(target: Target) -> Self {
    Files::from(&target)
  }
}

impl<T: Into<Files>> From<Option<T>> for Files {
  fn from(value: Option<T>) -> Self {
    value.map(Into::into).unwrap_or_default()
  }
}

impl<T: Into<Files>> From<Vec<T>> for Files {
  fn from(values: Vec<T>) -> Self {
    Files::from_parts(values.into_iter().map(Into::into))
  }
}

impl<T: Into<Files>, const N: usize> From<[T; N]> for Files {
  fn from(values: [T; N]) -> Self {
    Files::from_parts(values.into_iter().map(Into::into))
  }
}

impl<T: Into<Files> + Clone> From<&[T]> for Files {
  fn from(values: &[T]) -> Self {
    Files::from_parts(values.iter().cloned().map(Into::into))
  }
}

impl FromIterator<Files> for Files {
  fn from_iter<I: IntoIterator<Item = Files>>(iter: I) -> Self {
    Files::from_parts(iter)
  }
}

impl<'a> IntoIterator for &'a Files {
  type Item = &'a String;
  type IntoIter = std::slice::Iter<'a, String>;

  fn into_iter(self) -> Self::IntoIter {
    self.paths.iter()
  }
}

impl IntoIterator for Files {
  type Item = String;
  type IntoIter = std::vec::IntoIter<String>;

  fn into_iter(self) -> Self::IntoIter {
    self.paths.into_iter()
  }
}
