/// Version string written into the manifest header.
pub const NINJU_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project URL written into the manifest header.
pub const NINJU_URL: &str = env!("CARGO_PKG_REPOSITORY");

/// Minimum ninja version the emitted manifest requires.
pub const NINJA_REQUIRED_VERSION: &str = "1.7";

/// Default manifest file name, relative to the root directory.
pub const DEFAULT_BUILD_FILE: &str = "build.ninja";

/// Default build output directory, relative to `${root}`.
pub const DEFAULT_BUILD_DIR: &str = ".builddir";

/// Default prefix for generated intermediate names.
pub const DEFAULT_NAME_PREFIX: &str = "ninju";

/// Default extension for generated intermediate names.
pub const DEFAULT_NAME_EXT: &str = "tmp";

/// Variables declared by every session before any caller declaration.
pub const RESERVED_VARS: [&str; 3] = ["ninja_required_version", "root", "builddir"];

/// Rule name ninja reserves for phony edges.
pub const PHONY_RULE: &str = "phony";

/// Pool name ninja reserves for interactive, serial steps.
pub const CONSOLE_POOL: &str = "console";

/// Name of the self-regeneration rule.
pub const CONFIGURE_RULE: &str = "configure";

/// Width at which the statement writer wraps lines.
pub const LINE_WIDTH: usize = 78;
