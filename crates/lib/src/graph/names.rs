//! Generated names for intermediate outputs the caller did not name.

/// Hands out `${builddir}/.<prefix>_<n>.<ext>` names, `n` counting from 1 in
/// call order. A generator never repeats a name.
#[derive(Debug, Clone)]
pub struct NameGenerator {
  prefix: String,
  count: u64,
}

impl NameGenerator {
  pub fn new(prefix: impl Into<String>) -> Self {
    Self {
      prefix: prefix.into(),
      count: 0,
    }
  }

  pub fn next_name(&mut self, ext: &str) -> String {
    self.count += 1;
    format!("${{builddir}}/.{}_{}.{}", self.prefix, self.count, ext)
  }

  /// How many names have been handed out so far.
  pub fn count(&self) -> u64 {
    self.count
  }
}
