//! `ninju generate` integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn generate_writes_manifest_next_to_script() {
  let env = TestEnv::from_fixture("pipeline.lua");

  env
    .ninju_cmd()
    .arg("generate")
    .assert()
    .success()
    .stdout(predicate::str::contains("Generated"))
    .stdout(predicate::str::contains("build.ninja"));

  let manifest = env.read("build.ninja");
  assert!(manifest.starts_with("# This file is generated by Ninju v"));
  assert!(manifest.contains("build ${builddir}/.ninju_1.tmp: cmd1 ${root}/src/a.txt | bin1\n"));
  assert!(manifest.contains("build ${builddir}/b.txt: cmd3 ${builddir}/.ninju_2.tmp | bin3\n"));
  assert!(manifest.contains("default all\n"));
}

#[test]
fn generate_adds_regeneration_edge() {
  let env = TestEnv::from_fixture("pipeline.lua");
  env.ninju_cmd().arg("generate").assert().success();

  let manifest = env.read("build.ninja");
  assert!(manifest.contains("rule configure\n"));
  assert!(manifest.contains("  description = Regenerate ninja build file\n"));
  assert!(manifest.contains("  generator = 1\n"));
  assert!(manifest.contains(" generate"));
  assert!(manifest.contains("${root}/build.lua"));
}

#[test]
fn generate_without_newlines() {
  let env = TestEnv::with_script(r#"ninju.var("myvar", "myvalue")"#);
  env.ninju_cmd().args(["generate", "--no-newline"]).assert().success();

  let manifest = env.read("build.ninja");
  assert!(manifest.ends_with("myvar = myvalue\n"));
  assert!(!manifest.contains("\n\n\n"));
}

#[test]
fn generate_honours_build_file_and_dir() {
  let env = TestEnv::with_script(r#"ninju.cmd("r", "r-xyz"); ninju.root("a"):r()"#);
  env
    .ninju_cmd()
    .args(["generate", "--build-file", "custom.ninja", "--build-dir", "out"])
    .assert()
    .success();

  let manifest = env.read("custom.ninja");
  assert!(manifest.contains("builddir = ${root}/out\n"));
  assert!(manifest.contains("build ${root}/custom.ninja: configure"));
  assert!(!env.temp.path().join("build.ninja").exists());
}

#[test]
fn script_that_generates_itself_is_not_rewritten() {
  let env = TestEnv::from_fixture("self_generate.lua");
  env.ninju_cmd().arg("generate").assert().success();

  let manifest = env.read("build.ninja");
  assert!(manifest.ends_with("myvar = myvalue\n"));
  assert!(!manifest.contains("\n\nmyvar"));
}

#[test]
fn generate_from_outside_root_fails() {
  let env = TestEnv::from_fixture("pipeline.lua");
  let outside = tempfile::TempDir::new().unwrap();

  env
    .ninju_cmd()
    .current_dir(outside.path())
    .arg("generate")
    .arg(&env.script_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("cannot run from outside directory"));
}

#[test]
fn no_cwd_check_allows_outside_root() {
  let env = TestEnv::from_fixture("pipeline.lua");
  let outside = tempfile::TempDir::new().unwrap();

  env
    .ninju_cmd()
    .current_dir(outside.path())
    .args(["generate", "--no-cwd-check"])
    .arg(&env.script_path)
    .assert()
    .success();

  assert!(env.temp.path().join("build.ninja").exists());
}

#[test]
fn configuration_errors_fail_the_command() {
  let env = TestEnv::from_fixture("bad_pool.lua");

  env
    .ninju_cmd()
    .arg("generate")
    .assert()
    .failure()
    .stderr(predicate::str::contains("pool must be an integer greater than 0 or 'console'"));

  assert!(!env.temp.path().join("build.ninja").exists());
}

#[test]
fn missing_executable_is_a_warning() {
  let env = TestEnv::with_script(r#"ninju.cmd("ghost", "no-such-tool-ninju-cli")"#);

  env
    .ninju_cmd()
    .arg("generate")
    .assert()
    .success()
    .stderr(predicate::str::contains("executable not found"));
}
