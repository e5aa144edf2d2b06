//! Tests for CLI command parsing and config resolution.

use super::{CliOptions, Command, get_command, get_flags, resolve_config};
use crate::backends::js::js_runtime::RuntimeLinkage;
use crate::compiler_frontend::Flag;
use crate::compiler_frontend::compiler_errors::ErrorType;
use std::fs;
use std::path::PathBuf;

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn bare_path_compiles_to_stdout() {
    let (command, options) = get_command(&args(&["fib.json"])).expect("command should parse");
    assert_eq!(command, Command::Compile(PathBuf::from("fib.json")));
    assert_eq!(options, CliOptions::default());
}

#[test]
fn build_collects_every_input_and_value_flags() {
    let (command, options) = get_command(&args(&[
        "build",
        "a.json",
        "--out-dir",
        "dist",
        "b.json",
        "--runtime",
        "./rinha_runtime.js",
        "--no-dce",
    ]))
    .expect("command should parse");

    assert_eq!(
        command,
        Command::Build(vec![PathBuf::from("a.json"), PathBuf::from("b.json")])
    );
    assert_eq!(
        options,
        CliOptions {
            config_path: None,
            runtime_path: Some(String::from("./rinha_runtime.js")),
            out_dir: Some(PathBuf::from("dist")),
        }
    );
}

#[test]
fn help_variants_parse() {
    for name in ["help", "--help", "-h"] {
        let (command, _) = get_command(&args(&[name])).expect("help should parse");
        assert_eq!(command, Command::Help);
    }
}

#[test]
fn build_without_inputs_is_rejected() {
    let error = get_command(&args(&["build", "--no-memo"])).expect_err("build needs inputs");
    assert!(error.contains("at least one input file"));
}

#[test]
fn compile_rejects_several_inputs() {
    let error = get_command(&args(&["a.json", "b.json"])).expect_err("only one input allowed");
    assert!(error.contains("exactly one input file"));
}

#[test]
fn value_flags_require_a_value() {
    let error = get_command(&args(&["fib.json", "--runtime"])).expect_err("missing value");
    assert!(error.contains("--runtime"));

    let error = get_command(&args(&["fib.json", "--out-dir", "--no-dce"]))
        .expect_err("flag is not a value");
    assert!(error.contains("--out-dir"));
}

#[test]
fn unknown_flags_are_rejected() {
    let error = get_command(&args(&["fib.json", "--fast"])).expect_err("unknown flag");
    assert!(error.contains("--fast"));
}

#[test]
fn boolean_flags_are_collected() {
    let flags = get_flags(&args(&[
        "rinhajs",
        "build",
        "a.json",
        "--no-dce",
        "--no-memo",
        "--hide-warnings",
        "--hide-timers",
    ]));

    assert_eq!(
        flags,
        vec![
            Flag::DisableDeadBindingElimination,
            Flag::DisableMemoization,
            Flag::DisableWarnings,
            Flag::DisableTimers,
        ]
    );
}

#[test]
fn command_line_overrides_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config_path = dir.path().join("custom.toml");
    fs::write(
        &config_path,
        "out_dir = \"from_config\"\nmemoize_pure_calls = true\n",
    )
    .expect("write config");

    let options = CliOptions {
        config_path: Some(config_path),
        runtime_path: Some(String::from("./runtime.js")),
        out_dir: Some(PathBuf::from("from_cli")),
    };

    let config = resolve_config(&options, &[Flag::DisableMemoization]).expect("config loads");
    assert_eq!(config.out_dir, Some(PathBuf::from("from_cli")));
    assert_eq!(config.runtime, RuntimeLinkage::Require(String::from("./runtime.js")));
    assert!(!config.memoize_pure_calls);
    assert!(config.eliminate_dead_bindings);
}

#[test]
fn missing_config_file_is_a_file_error() {
    let options = CliOptions {
        config_path: Some(PathBuf::from("does/not/exist.toml")),
        ..CliOptions::default()
    };

    let error = resolve_config(&options, &[]).expect_err("config is missing");
    assert_eq!(error.error_type, ErrorType::File);
}
