//! Ninja statement writer.
//!
//! Renders the primitive statements of the ninja manifest format (comments,
//! variables, pools, rules, builds, defaults) byte-for-byte the way the
//! reference `ninja_syntax` writer does, including `$`-escaping of paths and
//! ` $` line continuations past the wrap width.

use std::io::{self, Write};

use crate::consts::LINE_WIDTH;

/// Escape a path for use in a build statement.
pub fn escape_path(word: &str) -> String {
  word.replace("$ ", "$$ ").replace(' ', "$ ").replace(':', "$:")
}

/// Fields of a `rule` statement. Optional fields are only written when set.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleStatement<'a> {
  pub name: &'a str,
  pub command: &'a str,
  pub description: Option<&'a str>,
  pub depfile: Option<&'a str>,
  pub generator: bool,
  pub pool: Option<&'a str>,
  pub restat: bool,
  pub rspfile: Option<&'a str>,
  pub rspfile_content: Option<&'a str>,
  pub deps: Option<&'a str>,
}

/// Fields of a `build` statement.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildStatement<'a> {
  pub outputs: &'a [String],
  pub rule: &'a str,
  pub inputs: &'a [String],
  pub implicit: &'a [String],
  pub order_only: &'a [String],
  pub implicit_outputs: &'a [String],
  pub variables: &'a [(String, String)],
}

/// Writes ninja statements to any [`Write`] sink.
pub struct Writer<W: Write> {
  output: W,
  width: usize,
}

impl<W: Write> Writer<W> {
  pub fn new(output: W) -> Self {
    Self::with_width(output, LINE_WIDTH)
  }

  pub fn with_width(output: W, width: usize) -> Self {
    Self { output, width }
  }

  pub fn into_inner(self) -> W {
    self.output
  }

  pub fn newline(&mut self) -> io::Result<()> {
    self.output.write_all(b"\n")
  }

  /// Write a `#` comment, word-wrapped to the writer width. Words longer than
  /// the width are never split.
  pub fn comment(&mut self, text: &str) -> io::Result<()> {
    for line in wrap_words(text, self.width.saturating_sub(2)) {
      writeln!(self.output, "# {}", line)?;
    }
    Ok(())
  }

  pub fn variable(&mut self, key: &str, value: &str, indent: usize) -> io::Result<()> {
    self.line(&format!("{} = {}", key, value), indent)
  }

  /// Write a variable whose value is a list; empty entries are skipped.
  pub fn variable_list(&mut self, key: &str, values: &[String], indent: usize) -> io::Result<()> {
    let joined: Vec<&str> = values.iter().map(String::as_str).filter(|v| !v.is_empty()).collect();
    self.variable(key, &joined.join(" "), indent)
  }

  pub fn pool(&mut self, name: &str, depth: u32) -> io::Result<()> {
    self.line(&format!("pool {}", name), 0)?;
    self.variable("depth", &depth.to_string(), 1)
  }

  pub fn rule(&mut self, rule: &RuleStatement<'_>) -> io::Result<()> {
    self.line(&format!("rule {}", rule.name), 0)?;
    self.variable("command", rule.command, 1)?;
    if let Some(description) = non_empty(rule.description) {
      self.variable("description", description, 1)?;
    }
    if let Some(depfile) = non_empty(rule.depfile) {
      self.variable("depfile", depfile, 1)?;
    }
    if rule.generator {
      self.variable("generator", "1", 1)?;
    }
    if let Some(pool) = non_empty(rule.pool) {
      self.variable("pool", pool, 1)?;
    }
    if rule.restat {
      self.variable("restat", "1", 1)?;
    }
    if let Some(rspfile) = non_empty(rule.rspfile) {
      self.variable("rspfile", rspfile, 1)?;
    }
    if let Some(content) = non_empty(rule.rspfile_content) {
      self.variable("rspfile_content", content, 1)?;
    }
    if let Some(deps) = non_empty(rule.deps) {
      self.variable("deps", deps, 1)?;
    }
    Ok(())
  }

  pub fn build(&mut self, build: &BuildStatement<'_>) -> io::Result<()> {
    let mut outputs: Vec<String> = build.outputs.iter().map(|o| escape_path(o)).collect();
    let mut inputs: Vec<String> = build.inputs.iter().map(|i| escape_path(i)).collect();

    if !build.implicit.is_empty() {
      inputs.push("|".to_string());
      inputs.extend(build.implicit.iter().map(|i| escape_path(i)));
    }
    if !build.order_only.is_empty() {
      inputs.push("||".to_string());
      inputs.extend(build.order_only.iter().map(|i| escape_path(i)));
    }
    if !build.implicit_outputs.is_empty() {
      outputs.push("|".to_string());
      outputs.extend(build.implicit_outputs.iter().map(|o| escape_path(o)));
    }

    let mut rhs = build.rule.to_string();
    for input in &inputs {
      rhs.push(' ');
      rhs.push_str(input);
    }
    self.line(&format!("build {}: {}", outputs.join(" "), rhs), 0)?;

    for (key, value) in build.variables {
      self.variable(key, value, 1)?;
    }
    Ok(())
  }

  pub fn default(&mut self, paths: &[String]) -> io::Result<()> {
    self.line(&format!("default {}", paths.join(" ")), 0)
  }

  fn line(&mut self, text: &str, indent: usize) -> io::Result<()> {
    let mut text: Vec<char> = text.chars().collect();
    let mut leading = "  ".repeat(indent);

    while leading.len() + text.len() > self.width {
      // Rightmost unescaped space that keeps the line (plus " $") within width.
      let available = self.width.saturating_sub(leading.len() + 2);
      let mut space = rfind_unescaped_space(&text, available);
      if space.is_none() {
        // Nothing fits; take the first unescaped space past the limit instead.
        space = find_unescaped_space(&text, available);
      }
      let Some(space) = space else {
        break;
      };

      let head: String = text[..space].iter().collect();
      writeln!(self.output, "{}{} $", leading, head)?;
      text = text.split_off(space + 1);
      leading = "  ".repeat(indent + 2);
    }

    let rest: String = text.into_iter().collect();
    writeln!(self.output, "{}{}", leading, rest)
  }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.is_empty())
}

/// Number of consecutive `$` immediately before index `i`. Index 0 is never
/// counted, matching the reference writer.
fn dollars_before(text: &[char], i: usize) -> usize {
  let mut count = 0;
  let mut idx = i as isize - 1;
  while idx > 0 && text[idx as usize] == '$' {
    count += 1;
    idx -= 1;
  }
  count
}

fn rfind_unescaped_space(text: &[char], end: usize) -> Option<usize> {
  let mut end = end.min(text.len());
  loop {
    let space = text[..end].iter().rposition(|&c| c == ' ')?;
    if dollars_before(text, space) % 2 == 0 {
      return Some(space);
    }
    end = space;
  }
}

fn find_unescaped_space(text: &[char], start: usize) -> Option<usize> {
  let mut start = start;
  loop {
    if start >= text.len() {
      return None;
    }
    let space = start + text[start..].iter().position(|&c| c == ' ')?;
    if dollars_before(text, space) % 2 == 0 {
      return Some(space);
    }
    start = space + 1;
  }
}

/// Greedy word wrap that never breaks a word.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();
  let mut current = String::new();
  for word in text.split_whitespace() {
    if current.is_empty() {
      current.push_str(word);
    } else if current.chars().count() + 1 + word.chars().count() <= width {
      current.push(' ');
      current.push_str(word);
    } else {
      lines.push(std::mem::take(&mut current));
      current.push_str(word);
    }
  }
  if !current.is_empty() {
    lines.push(current);
  }
  lines
}
