//! Variable declarations and the local expansion table.
//!
//! Emitted variables always keep their raw `${name}` text; ninja resolves
//! them. The [`ExpansionTable`] is a second, private view holding each
//! variable's value with earlier references substituted, used only to locate
//! executables on disk while the graph is being declared.

use std::collections::HashMap;

use serde::Serialize;

/// A `name = value` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
  pub name: String,
  pub value: String,
}

/// Declared variables, fully expanded against the ones declared before them.
#[derive(Debug, Default, Clone)]
pub struct ExpansionTable {
  values: HashMap<String, String>,
}

impl ExpansionTable {
  pub fn insert(&mut self, name: &str, value: &str) {
    let expanded = self.expand(value);
    self.values.insert(name.to_string(), expanded);
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.values.get(name).map(String::as_str)
  }

  /// Substitute `${name}` and `$name` references to known variables, and
  /// collapse `$$` to `$`. Unknown references are left as written.
  pub fn expand(&self, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('$') {
      out.push_str(&rest[..pos]);
      let after = &rest[pos + 1..];

      if let Some(tail) = after.strip_prefix('$') {
        out.push('$');
        rest = tail;
      } else if let Some(braced) = after.strip_prefix('{') {
        match braced.find('}') {
          Some(end) if is_identifier(&braced[..end]) => {
            let name = &braced[..end];
            match self.get(name) {
              Some(value) => out.push_str(value),
              None => {
                out.push_str("${");
                out.push_str(name);
                out.push('}');
              }
            }
            rest = &braced[end + 1..];
          }
          _ => {
            out.push('$');
            rest = after;
          }
        }
      } else {
        let len = identifier_len(after);
        if len == 0 {
          out.push('$');
          rest = after;
        } else {
          let name = &after[..len];
          match self.get(name) {
            Some(value) => out.push_str(value),
            None => {
              out.push('$');
              out.push_str(name);
            }
          }
          rest = &after[len..];
        }
      }
    }

    out.push_str(rest);
    out
  }
}

fn identifier_len(text: &str) -> usize {
  let mut len = 0;
  for (i, c) in text.char_indices() {
    let ok = if i == 0 {
      c == '_' || c.is_ascii_alphabetic()
    } else {
      c == '_' || c.is_ascii_alphanumeric()
    };
    if !ok {
      break;
    }
    len = i + c.len_utf8();
  }
  len
}

fn is_identifier(text: &str) -> bool {
  !text.is_empty() && identifier_len(text) == text.len()
}
