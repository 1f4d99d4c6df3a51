//! `Files` and `Target` as Lua userdata.
//!
//! Both resolve unknown keys against the owning session's rules, so a script
//! can chain invocations fluently:
//!
//! ```lua
//! src("a.txt"):cmd1():cmd2():cmd3(ninju.builddir("b.txt"))
//! ninju.target("deploy"):upload({ inputs = site })
//! ```

use mlua::prelude::*;

use super::convert::{lua_to_build_args, lua_to_exec_args, lua_to_files, multi_to_files};
use crate::error::NinjuError;
use crate::files::Files;
use crate::target::Target;

/// Any path-like Lua value converts into `Files`.
impl FromLua for Files {
  fn from_lua(value: LuaValue, _: &Lua) -> LuaResult<Self> {
    lua_to_files(value)
  }
}

impl FromLua for Target {
  fn from_lua(value: LuaValue, _: &Lua) -> LuaResult<Self> {
    match value {
      LuaValue::UserData(ud) => Ok(ud.borrow::<Target>()?.clone()),
      other => Err(LuaError::external(format!(
        "expected Target, got {}",
        other.type_name()
      ))),
    }
  }
}

impl LuaUserData for Files {
  fn add_methods<M: LuaUserDataMethods<Self>>(methods: &mut M) {
    methods.add_method("paths", |_, this, ()| Ok(this.paths().to_vec()));

    methods.add_meta_method(LuaMetaMethod::Len, |_, this, ()| Ok(this.len()));

    methods.add_meta_method(LuaMetaMethod::ToString, |_, this, ()| {
      Ok(format!("Files({})", this.paths().join(", ")))
    });

    methods.add_meta_method(LuaMetaMethod::Eq, |_, this, other: LuaAnyUserData| {
      Ok(other.borrow::<Files>().map(|other| *this == *other).unwrap_or(false))
    });

    // files:<rule>(outputs?, args?)
    methods.add_meta_method(LuaMetaMethod::Index, |lua, this, key: String| {
      let session = this.session().ok_or(NinjuError::Detached).into_lua_err()?;
      let rule = session.rule(&key).into_lua_err()?;
      lua.create_function(
        move |_, (receiver, first, second): (LuaAnyUserData, LuaValue, Option<LuaTable>)| {
          let inputs = receiver.borrow::<Files>()?.clone();
          let args = lua_to_build_args(first, second)?;
          rule.invoke(inputs, args).into_lua_err()
        },
      )
    });
  }
}

impl LuaUserData for Target {
  fn add_methods<M: LuaUserDataMethods<Self>>(methods: &mut M) {
    methods.add_method("name", |_, this, ()| Ok(this.name().to_string()));

    // target:phony(...)
    methods.add_method("phony", |_, this, inputs: LuaMultiValue| {
      this.phony(multi_to_files(inputs)?).into_lua_err()
    });

    methods.add_meta_method(LuaMetaMethod::ToString, |_, this, ()| Ok(this.name().to_string()));

    // target:<exec_rule>({ inputs = ..., variables = ... })
    methods.add_meta_method(LuaMetaMethod::Index, |lua, _, key: String| {
      lua.create_function(move |_, (receiver, args): (LuaAnyUserData, Option<LuaTable>)| {
        let target = receiver.borrow::<Target>()?.clone();
        target.exec(&key, lua_to_exec_args(args)?).into_lua_err()
      })
    });
  }
}
