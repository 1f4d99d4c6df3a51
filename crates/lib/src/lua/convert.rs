//! Conversions between Lua values and build-graph values.

use std::collections::BTreeMap;

use mlua::prelude::*;

use crate::files::Files;
use crate::graph::build::{BuildArgs, ExecArgs, Outputs};
use crate::target::Target;

/// Keys that mark a table as invocation arguments rather than a list of
/// outputs.
const BUILD_ARG_KEYS: [&str; 5] = ["outputs", "implicit", "order_only", "variables", "implicit_outputs"];

/// Convert any Lua value into a flat [`Files`].
///
/// Strings and numbers become one entry each. `Files` and `Target` userdata
/// contribute their entries, array tables are flattened recursively, and `nil`
/// contributes nothing.
pub fn lua_to_files(value: LuaValue) -> LuaResult<Files> {
  match value {
    LuaValue::Nil => Ok(Files::new()),
    LuaValue::String(s) => Ok(Files::from(s.to_str()?.to_string())),
    LuaValue::Integer(i) => Ok(Files::from(i.to_string())),
    LuaValue::Number(n) => Ok(Files::from(n.to_string())),
    LuaValue::UserData(ud) => {
      if let Ok(files) = ud.borrow::<Files>() {
        Ok(files.clone())
      } else if let Ok(target) = ud.borrow::<Target>() {
        Ok(Files::from(&*target))
      } else {
        Err(LuaError::external("expected Files or Target userdata"))
      }
    }
    LuaValue::Table(t) => {
      let mut parts = Vec::new();
      for value in t.sequence_values::<LuaValue>() {
        parts.push(lua_to_files(value?)?);
      }
      Ok(Files::from_parts(parts))
    }
    other => Err(LuaError::external(format!(
      "cannot use a {} as a path",
      other.type_name()
    ))),
  }
}

/// Flatten every argument of a variadic call.
pub fn multi_to_files(values: LuaMultiValue) -> LuaResult<Files> {
  let mut parts = Vec::new();
  for value in values {
    parts.push(lua_to_files(value)?);
  }
  Ok(Files::from_parts(parts))
}

/// Per-edge variables from a `{ name = value }` table, sorted by name so the
/// output does not depend on Lua's table iteration order.
pub fn lua_to_variables(table: Option<LuaTable>) -> LuaResult<Vec<(String, String)>> {
  let Some(table) = table else {
    return Ok(Vec::new());
  };
  let mut vars = BTreeMap::new();
  for pair in table.pairs::<String, LuaValue>() {
    let (name, value) = pair?;
    let value = match value {
      LuaValue::String(s) => s.to_str()?.to_string(),
      LuaValue::Integer(i) => i.to_string(),
      LuaValue::Number(n) => n.to_string(),
      LuaValue::Boolean(b) => b.to_string(),
      other => {
        return Err(LuaError::external(format!(
          "variable '{}' must be a string, got {}",
          name,
          other.type_name()
        )));
      }
    };
    vars.insert(name, value);
  }
  Ok(vars.into_iter().collect())
}

fn lua_to_outputs(value: LuaValue) -> LuaResult<Outputs> {
  match value {
    LuaValue::Nil => Ok(Outputs::Generate),
    LuaValue::Integer(n) => usize::try_from(n)
      .map(Outputs::Count)
      .map_err(|_| LuaError::external(format!("output count must not be negative, got {}", n))),
    other => Ok(Outputs::Explicit(lua_to_files(other)?)),
  }
}

fn is_build_args_table(value: &LuaValue) -> LuaResult<bool> {
  let LuaValue::Table(t) = value else {
    return Ok(false);
  };
  for key in BUILD_ARG_KEYS {
    if t.contains_key(key)? {
      return Ok(true);
    }
  }
  Ok(false)
}

/// Arguments of a build rule call: `(outputs?, args?)` or just `(args)`.
///
/// The first value is an options table when it carries any of the known
/// argument keys. Otherwise it gives the outputs, and the options, if any,
/// follow as the second value.
pub fn lua_to_build_args(first: LuaValue, second: Option<LuaTable>) -> LuaResult<BuildArgs> {
  let (outputs, table) = if is_build_args_table(&first)? {
    let LuaValue::Table(t) = first else {
      unreachable!("checked by is_build_args_table");
    };
    (t.get::<LuaValue>("outputs")?, Some(t))
  } else {
    (first, second)
  };

  let mut args = BuildArgs {
    outputs: lua_to_outputs(outputs)?,
    ..Default::default()
  };
  if let Some(t) = table {
    args.implicit = lua_to_files(t.get("implicit")?)?;
    args.order_only = lua_to_files(t.get("order_only")?)?;
    args.implicit_outputs = lua_to_files(t.get("implicit_outputs")?)?;
    args.variables = lua_to_variables(t.get("variables")?)?;
  }
  Ok(args)
}

/// Arguments of an exec rule call: `{ inputs = ..., variables = ... }`.
pub fn lua_to_exec_args(table: Option<LuaTable>) -> LuaResult<ExecArgs> {
  let Some(t) = table else {
    return Ok(ExecArgs::default());
  };
  Ok(ExecArgs {
    inputs: lua_to_files(t.get("inputs")?)?,
    variables: lua_to_variables(t.get("variables")?)?,
  })
}
