mod cmd;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{GenerateOptions, cmd_generate, cmd_print};
use output::{ManifestFormat, print_error};

/// ninju - generate ninja build manifests from Lua build scripts
#[derive(Parser)]
#[command(name = "ninju")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate a build script and write the ninja manifest
  Generate {
    /// Path to the build script
    #[arg(default_value = "build.lua")]
    script: PathBuf,

    /// Do not separate manifest entries with blank lines
    #[arg(long)]
    no_newline: bool,

    /// Allow running from a directory other than the script's
    #[arg(long)]
    no_cwd_check: bool,

    /// Manifest file name, relative to the script's directory
    #[arg(long)]
    build_file: Option<String>,

    /// Build output directory, relative to the script's directory
    #[arg(long)]
    build_dir: Option<String>,
  },

  /// Evaluate a build script and print the result to stdout
  Print {
    /// Path to the build script
    #[arg(default_value = "build.lua")]
    script: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: ManifestFormat,

    /// Do not separate manifest entries with blank lines
    #[arg(long)]
    no_newline: bool,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Generate {
      script,
      no_newline,
      no_cwd_check,
      build_file,
      build_dir,
    } => cmd_generate(
      &script,
      GenerateOptions {
        newline: !no_newline,
        no_cwd_check,
        build_file,
        build_dir,
      },
    ),
    Commands::Print {
      script,
      format,
      no_newline,
    } => cmd_print(&script, format, !no_newline),
  };

  if let Err(err) = result {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}
