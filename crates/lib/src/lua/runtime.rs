use mlua::prelude::*;

use crate::lua::{globals, loaders};
use crate::session::Session;

/// Create a Lua runtime bound to `session`.
///
/// `./lua/` is searched before the default `package.path`, the `ninju` global
/// is registered, and `require`/`dofile` inject `__dir`.
pub fn create_runtime(session: Session) -> LuaResult<Lua> {
  let lua = Lua::new();
  let package: LuaTable = lua.globals().get("package")?;
  let package_path: String = package.get("path")?;
  package.set("path", format!("./lua/?.lua;./lua/?/init.lua;{}", package_path))?;

  globals::register_globals(&lua, session)?;
  loaders::install_loaders(&lua)?;

  Ok(lua)
}
