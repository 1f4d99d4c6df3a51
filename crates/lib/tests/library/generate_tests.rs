//! Writing the manifest to disk and inspecting the log.

use std::fs;

use ninju_lib::graph::build::Build;
use ninju_lib::serialize::write_manifest;
use ninju_lib::{Entry, NinjuError, RegenerateConfig, RuleOptions, Session, SessionConfig};
use tempfile::TempDir;
use tracing_test::traced_test;

use super::common::{rooted_config, test_session};

#[test]
fn generate_writes_render_to_root_dir() {
  let temp_dir = TempDir::new().unwrap();
  let n = Session::new(rooted_config(temp_dir.path())).unwrap();
  n.var("myvar", "myvalue").unwrap();

  let path = n.generate(false).unwrap();
  assert_eq!(path, temp_dir.path().join("build.ninja"));
  assert_eq!(fs::read_to_string(&path).unwrap(), n.render(false).unwrap());
  assert!(n.is_generated());
}

#[test]
fn generate_overwrites_existing_file() {
  let temp_dir = TempDir::new().unwrap();
  fs::write(
    temp_dir.path().join("out.ninja"),
    "stale content that is longer than the new manifest ".repeat(20),
  )
  .unwrap();
  let n = Session::new(SessionConfig {
    build_file: "out.ninja".into(),
    ..rooted_config(temp_dir.path())
  })
  .unwrap();

  let path = n.generate(true).unwrap();
  assert_eq!(fs::read_to_string(path).unwrap(), n.render(true).unwrap());
}

#[test]
fn generate_reports_unwritable_path() {
  let temp_dir = TempDir::new().unwrap();
  let n = Session::new(rooted_config(&temp_dir.path().join("missing"))).unwrap();
  let err = n.generate(true).unwrap_err();
  assert!(matches!(err, NinjuError::Io { .. }), "got: {:?}", err);
  assert!(!n.is_generated());
}

#[test]
fn cwd_check_rejects_other_root() {
  let temp_dir = TempDir::new().unwrap();
  let err = Session::new(SessionConfig {
    root_dir: temp_dir.path().to_path_buf(),
    ..Default::default()
  })
  .unwrap_err();
  assert!(
    err.to_string().contains("cannot run from outside directory"),
    "got: {}",
    err
  );
}

#[test]
fn cwd_check_accepts_current_dir() {
  assert!(Session::new(SessionConfig::default()).is_ok());
}

#[test]
fn regenerate_rule_and_edge() {
  let n = Session::new(SessionConfig {
    no_cwd_check: true,
    generators: vec!["${root}/build.lua".into()],
    regenerate: Some(RegenerateConfig {
      executable: "ninju-xyz".into(),
      args: Some("generate build.lua".into()),
    }),
    ..Default::default()
  })
  .unwrap();

  let out = n.render(false).unwrap();
  assert!(out.ends_with(
    "rule configure\n  command = ninju-xyz generate build.lua\n  description = Regenerate ninja build file\n  generator = 1\n\
     build ${root}/build.ninja: configure | ninju-xyz ${root}/build.lua\n"
  ), "got:\n{}", out);
}

#[test]
fn empty_outputs_fail_at_serialization() {
  let entries = vec![Entry::Build(Build {
    rule: "r".into(),
    inputs: vec!["a".into()],
    ..Default::default()
  })];
  let err = write_manifest(&entries, Vec::new(), true).unwrap_err();
  assert!(matches!(err, NinjuError::Generator(_)));
}

#[traced_test]
#[test]
fn missing_executable_warns_and_continues() {
  let n = test_session();
  let rule = n
    .cmd("ghost", "no-such-tool-ninju-test", RuleOptions::default())
    .unwrap();
  assert_eq!(rule.executable(), "no-such-tool-ninju-test");
  assert!(logs_contain("executable not found"));
  assert!(logs_contain("no-such-tool-ninju-test"));
}

#[cfg(unix)]
#[traced_test]
#[test]
fn relative_executable_is_found_under_root_dir() {
  use std::os::unix::fs::PermissionsExt;

  let temp_dir = TempDir::new().unwrap();
  fs::create_dir(temp_dir.path().join("tools")).unwrap();
  let tool = temp_dir.path().join("tools").join("gen");
  fs::write(&tool, "#!/bin/sh\n").unwrap();
  fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

  let n = Session::new(rooted_config(temp_dir.path())).unwrap();
  let rule = n.cmd("gen", "${root}/tools/gen", RuleOptions::default()).unwrap();
  assert_eq!(rule.executable(), "${root}/tools/gen");
  assert!(!logs_contain("executable not found"));
}

#[cfg(unix)]
#[test]
fn found_executable_keeps_written_path() {
  use std::os::unix::fs::PermissionsExt;

  let temp_dir = TempDir::new().unwrap();
  let tool = temp_dir.path().join("tool");
  fs::write(&tool, "#!/bin/sh\n").unwrap();
  fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

  let n = test_session();
  let tool_dir = n.var("tools", &temp_dir.path().to_string_lossy()).unwrap();
  let rule = n
    .cmd("t", format!("{}/tool", tool_dir), RuleOptions::default())
    .unwrap();
  assert_eq!(rule.executable(), "${tools}/tool");
}

#[test]
fn entries_serialize_to_tagged_json() {
  let n = test_session();
  n.phony("all", "a");
  let json = serde_json::to_value(n.entries()).unwrap();
  assert_eq!(json[0]["kind"], "variable");
  assert_eq!(json[0]["name"], "ninja_required_version");
  assert_eq!(json[0]["value"], "1.7");
  assert_eq!(json[3]["kind"], "phony");
  assert_eq!(json[3]["inputs"][0], "a");
}
