//! Build scripts evaluated through the Lua front end.

use std::fs;
use std::path::PathBuf;

use ninju_lib::eval::{EvalError, evaluate_script};
use ninju_lib::{BuildArgs, RuleOptions, Session};
use tempfile::TempDir;

use super::common::{body, rooted_config, test_session};

fn write_script(dir: &TempDir, source: &str) -> PathBuf {
  let path = dir.path().join("build.lua");
  fs::write(&path, source).unwrap();
  path
}

fn eval(source: &str) -> Session {
  let temp_dir = TempDir::new().unwrap();
  let script = write_script(&temp_dir, source);
  evaluate_script(&script, rooted_config(temp_dir.path())).unwrap()
}

#[test]
fn fluent_pipeline_matches_rust_api() {
  let n = eval(
    r#"
      local src = ninju.dir("src")
      ninju.cmd("cmd1", "bin1", { args = "${in} ${out}" })
      ninju.cmd("cmd2", "bin2", { args = "${in} ${out}" })
      ninju.cmd("cmd3", "bin3", { args = "${in} ${out}" })
      src("a.txt"):cmd1():cmd2():cmd3(ninju.builddir("b.txt"))
    "#,
  );

  let expected = test_session();
  for (rule, exe) in [("cmd1", "bin1"), ("cmd2", "bin2"), ("cmd3", "bin3")] {
    expected
      .cmd(rule, exe, RuleOptions::default().args("${in} ${out}"))
      .unwrap();
  }
  let src = expected.dir(&["src"], None).unwrap();
  src
    .file(&["a.txt"])
    .apply("cmd1")
    .unwrap()
    .apply("cmd2")
    .unwrap()
    .invoke("cmd3", BuildArgs::new().outputs(expected.builddir(&["b.txt"])))
    .unwrap();

  assert_eq!(body(&n), body(&expected));
}

#[test]
fn phony_over_files_from_several_edges() {
  let n = eval(
    r#"
      ninju.cmd("cmd1", "bin1", { args = "${in} ${out}" })
      local a = ninju.root("file1.txt"):cmd1(ninju.root("file2.txt"))
      local b = ninju.root("file3.txt"):cmd1({ outputs = 2 })
      ninju.phony("one", a)
      ninju.phony("all", a, b)
      ninju.default("all")
    "#,
  );
  let out = body(&n);
  assert!(out.contains("build one: phony ${root}/file2.txt\n"), "got:\n{}", out);
  assert!(out.contains(
    "build all: phony ${root}/file2.txt ${builddir}/.ninju_1.tmp $\n    ${builddir}/.ninju_2.tmp\n"
  ));
  assert!(out.ends_with("default all\n"));
}

#[test]
fn bound_rule_functions_take_options() {
  let n = eval(
    r#"
      local cc = ninju.cmd("cc", "cc-xyz", { args = "-c ${in} -o ${out}", depfile = "${out}.d", deps = "gcc" })
      cc("a.c", "a.o", { implicit = "a.h", order_only = "gen", variables = { z = "1", a = "2" } })
    "#,
  );
  assert_eq!(
    body(&n),
    "rule cc\n  command = cc-xyz -c ${in} -o ${out}\n  depfile = ${out}.d\n  deps = gcc\n\
     build a.o: cc a.c | cc-xyz a.h || gen\n  a = 2\n  z = 1\n"
  );
}

#[test]
fn exec_rules_through_target_and_bound_function() {
  let n = eval(
    r#"
      local run = ninju.exec_cmd("run", "run-xyz", { args = "${in}", description = "RUN" })
      run("smoke", { inputs = "tests" })
      ninju.target("deploy"):run({ inputs = { "site", "assets" }, variables = { env = "prod" } })
    "#,
  );
  assert_eq!(
    body(&n),
    "rule run\n  command = run-xyz ${in}\n  description = RUN\n  pool = console\n\
     build smoke: run tests\n\
     build deploy: run site assets\n  env = prod\n"
  );
}

#[test]
fn target_phony_and_tostring() {
  let n = eval(
    r#"
      local t = ninju.target("check")
      t:phony("a", { "b" })
      assert(tostring(t) == "check")
      assert(tostring(ninju.files("x", "y")) == "Files(x, y)")
      assert(#ninju.files({ "x" }, nil, "y") == 2)
    "#,
  );
  assert_eq!(body(&n), "build check: phony a b\n");
}

#[test]
fn dofile_fragments_share_the_session() {
  let temp_dir = TempDir::new().unwrap();
  fs::create_dir(temp_dir.path().join("rules")).unwrap();
  fs::write(
    temp_dir.path().join("rules").join("copy.lua"),
    r#"ninju.cmd("copy", "cp-xyz", { args = "${in} ${out}" })"#,
  )
  .unwrap();
  let script = write_script(
    &temp_dir,
    r#"
      dofile("rules/copy.lua")
      ninju.root("a"):copy("b")
    "#,
  );

  let n = evaluate_script(&script, rooted_config(temp_dir.path())).unwrap();
  assert_eq!(
    body(&n),
    "rule copy\n  command = cp-xyz ${in} ${out}\nbuild b: copy ${root}/a | cp-xyz\n"
  );
}

#[test]
fn unknown_rule_aborts_script() {
  let temp_dir = TempDir::new().unwrap();
  let script = write_script(&temp_dir, r#"ninju.root("a"):nope()"#);
  let err = evaluate_script(&script, rooted_config(temp_dir.path())).unwrap_err();
  assert!(matches!(err, EvalError::Lua(_)));
  assert!(err.to_string().contains("unknown rule 'nope'"), "got: {}", err);
}

#[test]
fn script_generate_writes_manifest() {
  let temp_dir = TempDir::new().unwrap();
  let script = write_script(
    &temp_dir,
    r#"
      ninju.var("myvar", "myvalue")
      local path = ninju.generate(false)
      assert(path:match("build%.ninja$"))
    "#,
  );
  let n = evaluate_script(&script, rooted_config(temp_dir.path())).unwrap();
  assert!(n.is_generated());
  let written = fs::read_to_string(temp_dir.path().join("build.ninja")).unwrap();
  assert!(written.ends_with("myvar = myvalue\n"));
}

#[test]
fn version_is_exposed() {
  let n = eval(r#"ninju.var("v", ninju.version)"#);
  assert_eq!(body(&n), format!("v = {}\n", env!("CARGO_PKG_VERSION")));
}
