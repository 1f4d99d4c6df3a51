//! Lua front end for build scripts.
//!
//! # Submodules
//!
//! - [`convert`] - Lua values to `Files` and invocation arguments
//! - [`globals`] - The `ninju` global table
//! - [`loaders`] - Script loading with `__dir` injection
//! - [`runtime`] - Lua VM setup
//!
//! `Files` and `Target` are exposed to scripts as userdata whose unknown keys
//! dispatch to the session's rules.

pub mod convert;
pub mod globals;
pub mod loaders;
pub mod runtime;
mod userdata;
