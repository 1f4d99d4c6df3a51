//! Projection of the declaration log onto manifest text.
//!
//! A single pass, strictly in log order: a header comment, a blank line, then
//! one block per entry, each followed by a blank line unless separators are
//! turned off. Nothing is reordered, deduplicated or cross-checked here.

use std::io::Write;

use crate::consts::{NINJU_URL, NINJU_VERSION, PHONY_RULE};
use crate::error::{NinjuError, Result};
use crate::graph::Entry;
use crate::writer::{BuildStatement, Writer};

/// The identifying header comment.
pub fn header_comment() -> String {
  format!("This file is generated by Ninju v{} ({})", NINJU_VERSION, NINJU_URL)
}

/// Write the manifest for `entries` to `output`.
pub fn write_manifest<W: Write>(entries: &[Entry], output: W, newline: bool) -> Result<W> {
  let mut writer = Writer::new(output);
  writer.comment(&header_comment())?;
  writer.newline()?;

  for entry in entries {
    write_entry(&mut writer, entry)?;
    if newline {
      writer.newline()?;
    }
  }

  Ok(writer.into_inner())
}

fn write_entry<W: Write>(writer: &mut Writer<W>, entry: &Entry) -> Result<()> {
  match entry {
    Entry::Variable(var) => writer.variable(&var.name, &var.value, 0)?,
    Entry::Pool(pool) => writer.pool(&pool.name, pool.depth)?,
    Entry::Rule(rule) => {
      let command = rule.command();
      writer.rule(&rule.statement(&command))?;
    }
    Entry::ExecRule(rule) => {
      let command = rule.command();
      writer.rule(&rule.statement(&command))?;
    }
    Entry::Build(build) => {
      if build.outputs.is_empty() {
        return Err(NinjuError::Generator(format!(
          "build with rule '{}' has no output",
          build.rule
        )));
      }
      writer.build(&BuildStatement {
        outputs: &build.outputs,
        rule: &build.rule,
        inputs: &build.inputs,
        implicit: &build.implicit,
        order_only: &build.order_only,
        implicit_outputs: &build.implicit_outputs,
        variables: &build.variables,
      })?;
    }
    Entry::Phony(phony) => {
      let outputs = [phony.name.clone()];
      writer.build(&BuildStatement {
        outputs: &outputs,
        rule: PHONY_RULE,
        inputs: &phony.inputs,
        ..Default::default()
      })?;
    }
    Entry::Default(default) => writer.default(&default.targets)?,
  }
  Ok(())
}
