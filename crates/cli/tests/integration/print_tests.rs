//! `ninju print` integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn print_emits_manifest_on_stdout() {
  let env = TestEnv::with_script(r#"ninju.var("myvar", "myvalue")"#);

  env
    .ninju_cmd()
    .args(["print", "--no-newline"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with("# This file is generated by Ninju v"))
    .stdout(predicate::str::ends_with("builddir = ${root}/.builddir\nmyvar = myvalue\n"));

  assert!(!env.temp.path().join("build.ninja").exists());
}

#[test]
fn print_has_no_regeneration_edge() {
  let env = TestEnv::from_fixture("pipeline.lua");

  env
    .ninju_cmd()
    .arg("print")
    .assert()
    .success()
    .stdout(predicate::str::contains("rule cmd1"))
    .stdout(predicate::str::contains("configure").not());
}

#[test]
fn print_json_lists_entries() {
  let env = TestEnv::from_fixture("pipeline.lua");

  let output = env.ninju_cmd().args(["print", "--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let entries = entries.as_array().unwrap();
  assert_eq!(entries[0]["kind"], "variable");
  assert_eq!(entries[3]["kind"], "rule");
  assert_eq!(entries[3]["name"], "cmd1");
  assert_eq!(entries.last().unwrap()["kind"], "default");
}

#[test]
fn print_skips_cwd_check() {
  let env = TestEnv::from_fixture("pipeline.lua");
  let outside = tempfile::TempDir::new().unwrap();

  env
    .ninju_cmd()
    .current_dir(outside.path())
    .arg("print")
    .arg(&env.script_path)
    .assert()
    .success();
}

#[cfg(unix)]
#[test]
fn print_finds_project_tools_from_another_directory() {
  use std::os::unix::fs::PermissionsExt;

  let env = TestEnv::with_script(
    r#"
      ninju.cmd("gen", ninju.root("tools/gen"), { args = "${in} ${out}" })
      ninju.root("a.txt"):gen("b.txt")
    "#,
  );
  let tools = env.temp.path().join("tools");
  std::fs::create_dir(&tools).unwrap();
  std::fs::write(tools.join("gen"), "#!/bin/sh\n").unwrap();
  std::fs::set_permissions(tools.join("gen"), std::fs::Permissions::from_mode(0o755)).unwrap();
  let outside = tempfile::TempDir::new().unwrap();

  env
    .ninju_cmd()
    .current_dir(outside.path())
    .arg("print")
    .arg(&env.script_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("build b.txt: gen ${root}/a.txt | ${root}/tools/gen"))
    .stderr(predicate::str::contains("executable not found").not());
}
