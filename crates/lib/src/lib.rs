//! ninju-lib: declare a build graph, emit a ninja manifest.
//!
//! A [`Session`](session::Session) records declarations (variables, pools,
//! rules, build edges, phony targets, defaults) in call order and serializes
//! them to a `build.ninja` file. Declarations come from Rust directly or from a
//! Lua build script evaluated with [`eval::evaluate_script`].
//!
//! - `Files`: ordered path lists exchanged between rule invocations
//! - `RuleHandle` / `ExecHandle`: bound rule invokers
//! - `Target`: named logical targets
//! - `Entry`: one record of the declaration log

pub mod consts;
pub mod error;
pub mod eval;
pub mod files;
pub mod graph;
pub mod handle;
pub mod lua;
pub mod resolve;
pub mod serialize;
pub mod session;
pub mod target;
pub mod writer;

pub use error::{NinjuError, Result};
pub use files::Files;
pub use graph::Entry;
pub use graph::build::{BuildArgs, ExecArgs, Outputs};
pub use graph::pool::PoolSpec;
pub use graph::rule::{ExecOptions, RuleOptions};
pub use handle::{ExecHandle, RuleHandle};
pub use session::{DirFn, RegenerateConfig, Session, SessionConfig};
pub use target::Target;
