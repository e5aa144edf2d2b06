//! Compiles every program in `tests/cases` and, when `node` is installed, runs the output
//! and compares stdout against the matching `.out` file.

use rinhajs::{Config, RuntimeLinkage, compile_source};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const CASES_DIR: &str = "tests/cases";

fn node_available() -> bool {
    Command::new("node")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Run a JavaScript file with node from `working_dir`, returning stdout.
fn run_node(script: &Path, working_dir: &Path) -> Result<String, String> {
    let output = Command::new("node")
        .arg(script)
        .current_dir(working_dir)
        .output()
        .map_err(|e| format!("Failed to run node: {}", e))?;

    if !output.status.success() {
        return Err(format!(
            "node exited with {}\nstderr: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

fn case_files() -> Vec<PathBuf> {
    let mut cases = fs::read_dir(CASES_DIR)
        .expect("cases directory should exist")
        .map(|entry| entry.expect("readable entry").path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect::<Vec<_>>();
    cases.sort();
    cases
}

fn expected_output(case: &Path) -> String {
    fs::read_to_string(case.with_extension("out")).expect("every case has a .out file")
}

fn run_program(source: &str, dir: &Path) -> Result<String, String> {
    let script = dir.join("program.js");
    fs::write(&script, source).map_err(|e| format!("Failed to write program: {}", e))?;
    run_node(&script, dir)
}

#[test]
fn every_case_compiles() {
    let config = Config::default();
    let mut errors = Vec::new();

    for case in case_files() {
        let source = fs::read_to_string(&case).expect("readable case");
        if let Err(e) = compile_source(&source, &config) {
            errors.push(format!("{}: {:?}: {}", case.display(), e.error_type, e.msg));
        }
    }

    if !errors.is_empty() {
        panic!("Some cases failed to compile:\n{}", errors.join("\n"));
    }
}

#[test]
fn every_case_prints_the_expected_output() {
    if !node_available() {
        eprintln!("node not found, skipping execution tests");
        return;
    }

    let config = Config::default();
    let dir = tempfile::tempdir().expect("temp dir");
    let mut errors = Vec::new();

    for case in case_files() {
        let source = fs::read_to_string(&case).expect("readable case");
        let program = compile_source(&source, &config).expect("case should compile");

        match run_program(&program.source, dir.path()) {
            Ok(stdout) => {
                let expected = expected_output(&case);
                if stdout != expected {
                    errors.push(format!(
                        "{}: got {:?}, expected {:?}",
                        case.display(),
                        stdout,
                        expected
                    ));
                }
            }
            Err(e) => errors.push(format!("{}: {}", case.display(), e)),
        }
    }

    if !errors.is_empty() {
        panic!("Some cases printed the wrong output:\n{}", errors.join("\n"));
    }
}

#[test]
fn memoization_does_not_change_output() {
    if !node_available() {
        return;
    }

    let dir = tempfile::tempdir().expect("temp dir");
    let without_memo = Config {
        memoize_pure_calls: false,
        ..Config::default()
    };

    for name in ["sum", "closure", "reserved_names"] {
        let source =
            fs::read_to_string(Path::new(CASES_DIR).join(format!("{name}.json"))).expect("case");

        let memoized = compile_source(&source, &Config::default()).expect("compiles");
        let direct = compile_source(&source, &without_memo).expect("compiles");
        assert_eq!(direct.memoized_call_sites, 0);

        assert_eq!(
            run_program(&memoized.source, dir.path()),
            run_program(&direct.source, dir.path()),
            "{name} prints differently with memoization"
        );
    }
}

#[test]
fn disabling_elimination_keeps_the_discarded_print() {
    let source = fs::read_to_string(Path::new(CASES_DIR).join("dead_effect.json")).expect("case");
    let config = Config {
        eliminate_dead_bindings: false,
        ..Config::default()
    };

    let program = compile_source(&source, &config).expect("compiles");
    assert!(program.warnings.is_empty());
    assert!(program.source.contains("\"gone\""));

    if node_available() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert_eq!(
            run_program(&program.source, dir.path()).expect("runs"),
            "gone\n1\n"
        );
    }
}

#[test]
fn eliminated_print_is_reported() {
    let source = fs::read_to_string(Path::new(CASES_DIR).join("dead_effect.json")).expect("case");

    let program = compile_source(&source, &Config::default()).expect("compiles");

    assert_eq!(program.warnings.len(), 1);
    assert_eq!(program.warnings[0].msg, "x");
    assert!(!program.source.contains("\"gone\""));
}

#[test]
fn required_runtime_is_loaded_from_disk() {
    let source = fs::read_to_string(Path::new(CASES_DIR).join("fib.json")).expect("case");
    let config = Config {
        runtime: RuntimeLinkage::Require(String::from("./rinha_runtime.js")),
        ..Config::default()
    };

    let program = compile_source(&source, &config).expect("compiles");
    assert!(
        program
            .source
            .starts_with("const __rinha = require(\"./rinha_runtime.js\");\n")
    );

    if !node_available() {
        return;
    }

    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join("rinha_runtime.js"),
        rinhajs::backends::js::js_runtime::RUNTIME_MODULE_SOURCE,
    )
    .expect("write runtime");

    assert_eq!(
        run_program(&program.source, dir.path()).expect("runs"),
        "832040\n"
    );
}

/// `let x0 = 0; let x1 = x0 + 1; ...; print(x<n-1>)`, nested one JSON object per binding.
fn counting_chain(bindings: usize) -> String {
    let last = bindings - 1;
    let mut expression = format!(
        r#"{{ "kind": "Print", "value": {{ "kind": "Var", "text": "x{last}" }} }}"#
    );

    for index in (0..bindings).rev() {
        let value = if index == 0 {
            String::from(r#"{ "kind": "Int", "value": 0 }"#)
        } else {
            format!(
                r#"{{ "kind": "Binary", "lhs": {{ "kind": "Var", "text": "x{}" }}, "op": "Add", "rhs": {{ "kind": "Int", "value": 1 }} }}"#,
                index - 1
            )
        };
        expression = format!(
            r#"{{ "kind": "Let", "name": {{ "text": "x{index}" }}, "value": {value}, "next": {expression} }}"#
        );
    }

    format!(r#"{{ "name": "chain.rinha", "expression": {expression} }}"#)
}

#[test]
fn long_let_chains_compile_and_run() {
    let program = compile_source(&counting_chain(500), &Config::default())
        .expect("long chain should compile");

    assert!(program.warnings.is_empty());

    if !node_available() {
        return;
    }

    let dir = tempfile::tempdir().expect("temp dir");
    assert_eq!(
        run_program(&program.source, dir.path()).expect("runs"),
        "499\n"
    );
}

#[test]
fn long_chain_of_dead_bindings_is_removed() {
    let mut expression = String::from(r#"{ "kind": "Int", "value": 0 }"#);
    for index in (0..400).rev() {
        expression = format!(
            r#"{{ "kind": "Let", "name": {{ "text": "d{index}" }}, "value": {{ "kind": "Int", "value": {index} }}, "next": {expression} }}"#
        );
    }
    let source = format!(r#"{{ "name": "dead.rinha", "expression": {expression} }}"#);

    let program = compile_source(&source, &Config::default()).expect("compiles");

    assert_eq!(program.warnings.len(), 400);
    assert!(!program.source.contains("let d"));
}
