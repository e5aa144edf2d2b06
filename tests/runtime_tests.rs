//! Exercises the JavaScript runtime module directly. Skipped when `node` isn't installed.

use rinhajs::backends::js::js_runtime::RUNTIME_MODULE_SOURCE;
use std::fs;
use std::process::Command;

fn run_against_runtime(script: &str) -> Option<String> {
    let node_found = Command::new("node")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);
    if !node_found {
        eprintln!("node not found, skipping runtime test");
        return None;
    }

    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("rinha_runtime.js"), RUNTIME_MODULE_SOURCE).expect("write runtime");
    fs::write(
        dir.path().join("check.js"),
        format!("const rt = require(\"./rinha_runtime.js\");\n{script}\n"),
    )
    .expect("write script");

    let output = Command::new("node")
        .arg("check.js")
        .current_dir(dir.path())
        .output()
        .expect("node should run");

    assert!(
        output.status.success(),
        "script failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Some(String::from_utf8_lossy(&output.stdout).to_string())
}

#[test]
fn print_custom_formats_values() {
    let Some(stdout) = run_against_runtime(
        r#"
        console.log(rt.printCustom(12));
        console.log(rt.printCustom("text"));
        console.log(rt.printCustom(false));
        console.log(rt.printCustom((x) => x));
        console.log(rt.printCustom([1, [2, "three"]]));
        console.log(rt.printCustom([1, 2, 3]));
        console.log(rt.printCustom([1, undefined]));
        "#,
    ) else {
        return;
    };

    assert_eq!(
        stdout,
        "12\ntext\nfalse\n<#closure>\n(1, (2, three))\nERRO\nERRO\n"
    );
}

#[test]
fn print_returns_its_argument() {
    let Some(stdout) = run_against_runtime(
        r#"
        const value = rt.print([1, 2]);
        console.log(Array.isArray(value) && value[0] === 1 && value[1] === 2);
        "#,
    ) else {
        return;
    };

    assert_eq!(stdout, "(1, 2)\ntrue\n");
}

#[test]
fn memoize_runs_each_distinct_call_once() {
    let Some(stdout) = run_against_runtime(
        r#"
        let calls = 0;
        const square = (x) => { calls += 1; return x * x; };
        const cube = (x) => x * x * x;
        console.log(rt.memoize(square, "square", 4));
        console.log(rt.memoize(square, "square", 4));
        console.log(rt.memoize(square, "square", 5));
        console.log(calls);
        console.log(rt.memoize(cube, "cube", 4));
        "#,
    ) else {
        return;
    };

    assert_eq!(stdout, "16\n16\n25\n2\n64\n");
}

#[test]
fn execute_if_only_runs_the_chosen_branch() {
    let Some(stdout) = run_against_runtime(
        r#"
        const picked = rt.executeIf(
            () => 1 < 2,
            () => { console.log("then"); return "a"; },
            () => { console.log("otherwise"); return "b"; },
        );
        console.log(picked);
        "#,
    ) else {
        return;
    };

    assert_eq!(stdout, "then\na\n");
}
