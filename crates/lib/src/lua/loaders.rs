//! Build script loading with a per-file `__dir`.
//!
//! Every script loaded through here (the entry script, `dofile`d fragments and
//! `require`d modules) sees a `__dir` global holding its own directory, so a
//! fragment can locate sources next to itself regardless of who loaded it.
//! `require` keeps Lua's own path search and caching; only the file loader in
//! `package.searchers[2]` is swapped.

use std::fs;
use std::path::{Path, PathBuf};

use mlua::prelude::*;

/// Registry slot holding the `__dir` of the script currently executing.
const CURRENT_DIR_KEY: &str = "__ninju_current_dir";

/// Read `path` and run it with `__dir` set to its directory.
pub fn load_file_with_dir(lua: &Lua, path: &Path) -> LuaResult<LuaValue> {
  let (chunk_path, source) = read_script(path)?;
  let dir = script_dir(&chunk_path);

  let prev_dir: Option<String> = lua.named_registry_value(CURRENT_DIR_KEY)?;
  lua.set_named_registry_value(CURRENT_DIR_KEY, dir.clone())?;

  let result = lua
    .load(&source)
    .set_name(format!("@{}", chunk_path.display()))
    .set_environment(chunk_env(lua, dir)?)
    .eval::<LuaValue>();

  // restore even on failure; the original error wins
  let _ = lua.set_named_registry_value(CURRENT_DIR_KEY, prev_dir);
  result
}

fn read_script(path: &Path) -> LuaResult<(PathBuf, String)> {
  let canonical = dunce::canonicalize(path)
    .map_err(|e| LuaError::external(format!("cannot resolve '{}': {}", path.display(), e)))?;
  let source = fs::read_to_string(&canonical)
    .map_err(|e| LuaError::external(format!("cannot read '{}': {}", canonical.display(), e)))?;
  Ok((canonical, source))
}

fn script_dir(path: &Path) -> String {
  path.parent().unwrap_or(Path::new(".")).to_string_lossy().into_owned()
}

/// Environment of one chunk: `__dir` plus read/write passthrough to `_G`.
fn chunk_env(lua: &Lua, dir: String) -> LuaResult<LuaTable> {
  let env = lua.create_table()?;
  env.set("__dir", dir)?;
  let mt = lua.create_table()?;
  mt.set("__index", lua.globals())?;
  mt.set("__newindex", lua.globals())?;
  env.set_metatable(Some(mt))?;
  Ok(env)
}

/// Relative paths resolve against the executing script's directory first and
/// fall back to the working directory.
fn resolve_path(lua: &Lua, raw: &str) -> LuaResult<PathBuf> {
  let path = Path::new(raw);
  if path.is_absolute() {
    return Ok(path.to_path_buf());
  }
  if let Some(current) = lua.named_registry_value::<Option<String>>(CURRENT_DIR_KEY)? {
    let candidate = Path::new(&current).join(path);
    if candidate.exists() {
      return Ok(candidate);
    }
  }
  Ok(path.to_path_buf())
}

fn create_dofile(lua: &Lua) -> LuaResult<LuaFunction> {
  lua.create_function(|lua, path: Option<String>| {
    let path = path.ok_or_else(|| LuaError::external("dofile() needs a path"))?;
    let resolved = resolve_path(lua, &path)?;
    load_file_with_dir(lua, &resolved)
  })
}

/// `package.searchers[2]` replacement: Lua's `package.searchpath` finds the
/// file, [`load_file_with_dir`] runs it.
fn create_lua_searcher(lua: &Lua) -> LuaResult<LuaFunction> {
  lua.create_function(|lua, modname: String| {
    let package: LuaTable = lua.globals().get("package")?;
    let search_path: String = package.get("path")?;
    let searchpath: LuaFunction = package.get("searchpath")?;
    let found: LuaMultiValue = searchpath.call((modname.as_str(), search_path))?;

    match found.into_iter().next() {
      Some(LuaValue::String(file)) => {
        let file = file.to_str()?.to_string();
        let target = file.clone();
        let loader = lua.create_function(move |lua, _: LuaMultiValue| load_file_with_dir(lua, Path::new(&target)))?;
        Ok((LuaValue::Function(loader), file))
      }
      _ => Ok((LuaValue::Nil, format!("\n\tno file for module '{}'", modname))),
    }
  })
}

/// Route `require` and `dofile` through [`load_file_with_dir`].
pub fn install_loaders(lua: &Lua) -> LuaResult<()> {
  let package: LuaTable = lua.globals().get("package")?;
  let searchers: LuaTable = package.get("searchers")?;
  searchers.set(2, create_lua_searcher(lua)?)?;
  lua.globals().set("dofile", create_dofile(lua)?)?;
  Ok(())
}
