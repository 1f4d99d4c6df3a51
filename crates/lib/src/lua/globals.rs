//! The `ninju` global table.
//!
//! This module registers the `ninju` global, the declaration API available to
//! build scripts:
//! - `ninju.var(name, value)` - Declare a variable, returns `${name}`
//! - `ninju.dir(seg..., [{ var = name }])` - Directory function
//! - `ninju.root(seg...)` / `ninju.builddir(seg...)` - Paths under the root and build dirs
//! - `ninju.files(...)` - Flatten values into Files
//! - `ninju.cmd(name, exe, [opts])` - Declare a build rule
//! - `ninju.exec_cmd(name, exe, [opts])` - Declare a console exec rule
//! - `ninju.target(name)` - Named target handle
//! - `ninju.default(...)` / `ninju.phony(name, ...)` - Default and phony declarations
//! - `ninju.generate([newline])` - Write the manifest

use mlua::prelude::*;

use super::convert::{lua_to_build_args, lua_to_exec_args, multi_to_files};
use crate::consts::NINJU_VERSION;
use crate::files::Files;
use crate::graph::rule::{ExecOptions, RuleOptions};
use crate::session::Session;

/// Register the `ninju` global table bound to `session`.
pub fn register_globals(lua: &Lua, session: Session) -> LuaResult<()> {
  let ninju = lua.create_table()?;
  ninju.set("version", NINJU_VERSION)?;

  let s = session.clone();
  ninju.set(
    "var",
    lua.create_function(move |_, (name, value): (String, String)| {
      s.var(&name, &value).into_lua_err()
    })?,
  )?;

  let s = session.clone();
  ninju.set(
    "dir",
    lua.create_function(move |lua, args: LuaMultiValue| {
      let (segments, var) = split_dir_args(args)?;
      let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
      let dir = s.dir(&segments, var.as_deref()).into_lua_err()?;
      lua.create_function(move |_, rest: LuaVariadic<String>| {
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
        Ok(dir.file(&rest))
      })
    })?,
  )?;

  let s = session.clone();
  ninju.set(
    "root",
    lua.create_function(move |_, segments: LuaVariadic<String>| {
      let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
      Ok(s.root(&segments))
    })?,
  )?;

  let s = session.clone();
  ninju.set(
    "builddir",
    lua.create_function(move |_, segments: LuaVariadic<String>| {
      let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
      Ok(s.builddir(&segments))
    })?,
  )?;

  let s = session.clone();
  ninju.set(
    "files",
    lua.create_function(move |_, values: LuaMultiValue| Ok(s.files(multi_to_files(values)?)))?,
  )?;

  let s = session.clone();
  ninju.set(
    "cmd",
    lua.create_function(
      move |lua, (name, executable, opts): (String, Files, Option<LuaTable>)| {
        let options: RuleOptions = match opts {
          Some(t) => lua.from_value(LuaValue::Table(t))?,
          None => RuleOptions::default(),
        };
        let rule = s.cmd(&name, executable, options).into_lua_err()?;
        lua.create_function(
          move |_, (inputs, first, second): (Files, LuaValue, Option<LuaTable>)| {
            rule.invoke(inputs, lua_to_build_args(first, second)?).into_lua_err()
          },
        )
      },
    )?,
  )?;

  let s = session.clone();
  ninju.set(
    "exec_cmd",
    lua.create_function(
      move |lua, (name, executable, opts): (String, Files, Option<LuaTable>)| {
        let options: ExecOptions = match opts {
          Some(t) => lua.from_value(LuaValue::Table(t))?,
          None => ExecOptions::default(),
        };
        let rule = s.exec_cmd(&name, executable, options).into_lua_err()?;
        lua.create_function(move |_, (target, args): (Files, Option<LuaTable>)| {
          rule.invoke(target, lua_to_exec_args(args)?).into_lua_err()
        })
      },
    )?,
  )?;

  let s = session.clone();
  ninju.set(
    "target",
    lua.create_function(move |_, name: String| Ok(s.target(&name)))?,
  )?;

  let s = session.clone();
  ninju.set(
    "default",
    lua.create_function(move |_, targets: LuaMultiValue| {
      s.default(multi_to_files(targets)?);
      Ok(())
    })?,
  )?;

  let s = session.clone();
  ninju.set(
    "phony",
    lua.create_function(move |_, (name, inputs): (String, LuaMultiValue)| {
      s.phony(&name, multi_to_files(inputs)?);
      Ok(())
    })?,
  )?;

  let s = session;
  ninju.set(
    "generate",
    lua.create_function(move |_, newline: Option<bool>| {
      let path = s.generate(newline.unwrap_or(true)).into_lua_err()?;
      Ok(path.to_string_lossy().into_owned())
    })?,
  )?;

  lua.globals().set("ninju", ninju)?;
  Ok(())
}

/// Split `ninju.dir` arguments into path segments and an optional trailing
/// `{ var = name }` table.
fn split_dir_args(args: LuaMultiValue) -> LuaResult<(Vec<String>, Option<String>)> {
  let mut segments = Vec::new();
  let mut var = None;
  let count = args.len();
  for (i, arg) in args.into_iter().enumerate() {
    match arg {
      LuaValue::String(s) => segments.push(s.to_str()?.to_string()),
      LuaValue::Table(t) if i + 1 == count => var = t.get::<Option<String>>("var")?,
      other => {
        return Err(LuaError::external(format!(
          "dir expects path segments and an optional options table, got {}",
          other.type_name()
        )));
      }
    }
  }
  Ok((segments, var))
}
