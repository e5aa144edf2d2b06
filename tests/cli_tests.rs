//! End-to-end tests for the `rinhajs` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn rinhajs(args: &[&str], working_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rinhajs"))
        .args(args)
        .current_dir(working_dir)
        .output()
        .expect("compiler binary should run")
}

fn case_source(name: &str) -> String {
    fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join(format!("tests/cases/{name}.json")))
        .expect("case exists")
}

#[test]
fn compiles_a_file_to_stdout() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("fib.json"), case_source("fib")).expect("write input");

    let output = rinhajs(&["fib.json", "--hide-timers"], dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("// Runtime support for compiled programs."));
    assert!(stdout.contains("__rinha.memoize(fib, \"fib\", 30)"));
    assert!(!dir.path().join("fib.js").exists());
}

#[test]
fn warnings_go_to_stderr() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("dead.json"), case_source("dead_effect")).expect("write input");

    let output = rinhajs(&["dead.json"], dir.path());

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unused binding 'x'"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("unused binding"));
}

#[test]
fn build_writes_one_output_per_input() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("fib.json"), case_source("fib")).expect("write input");
    fs::write(dir.path().join("sum.json"), case_source("sum")).expect("write input");

    let output = rinhajs(
        &["build", "fib.json", "sum.json", "--out-dir", "dist", "--no-memo"],
        dir.path(),
    );

    assert!(output.status.success());
    let fib = fs::read_to_string(dir.path().join("dist/fib.js")).expect("fib.js written");
    let sum = fs::read_to_string(dir.path().join("dist/sum.js")).expect("sum.js written");
    assert!(!fib.contains("__rinha.memoize("));
    assert!(sum.contains("sum("));
}

#[test]
fn config_file_in_the_working_directory_is_used() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("fib.json"), case_source("fib")).expect("write input");
    fs::write(
        dir.path().join("rinhajs.toml"),
        "out_dir = \"out\"\nruntime = { require = \"./rinha_runtime.js\" }\n",
    )
    .expect("write config");

    let output = rinhajs(&["build", "fib.json", "--hide-timers"], dir.path());

    assert!(output.status.success());
    let fib = fs::read_to_string(dir.path().join("out/fib.js")).expect("fib.js written");
    assert!(fib.starts_with("const __rinha = require(\"./rinha_runtime.js\");"));
}

#[test]
fn unsupported_node_fails_without_output() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join("loop.json"),
        r#"{ "name": "loop.rinha", "expression": { "kind": "Loop", "value": { "kind": "Int", "value": 1 } } }"#,
    )
    .expect("write input");
    fs::write(dir.path().join("sum.json"), case_source("sum")).expect("write input");

    let output = rinhajs(&["build", "loop.json", "sum.json"], dir.path());

    assert!(!output.status.success());
    assert!(!dir.path().join("loop.js").exists());
    assert!(dir.path().join("sum.js").exists());
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");

    let output = rinhajs(&["nothing_here.json"], dir.path());

    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("__rinha"));
}

#[test]
fn no_arguments_prints_help_and_fails() {
    let dir = tempfile::tempdir().expect("temp dir");

    let output = rinhajs(&[], dir.path());

    assert!(!output.status.success());
}
