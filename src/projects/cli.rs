//! Command-line entrypoints for the compiler.
//!
//! `rinhajs <file.json>` prints the compiled program to stdout, `rinhajs build <files...>`
//! writes a `.js` file next to (or into `--out-dir` for) each input.

use crate::backends::js::js_runtime::RuntimeLinkage;
use crate::build_system::build::{build_files, collect_input_files, compile_file};
use crate::compiler_frontend::Flag;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::display_messages::{print_compiler_messages, print_formatted_error};
use crate::projects::settings::{CONFIG_FILE_NAME, Config};
use saying::say;
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Compile(PathBuf), // Compiles one file and prints the JavaScript

    Build(Vec<PathBuf>), // Compiles every file and writes the outputs

    Help,
}

/// Options that take a value on the command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct CliOptions {
    config_path: Option<PathBuf>,
    runtime_path: Option<String>,
    out_dir: Option<PathBuf>,
}

pub fn start_cli() -> ExitCode {
    let compiler_args: Vec<String> = env::args().collect();

    if compiler_args.len() < 2 {
        print_help(false);
        return ExitCode::FAILURE;
    }

    let (command, options) = match get_command(&compiler_args[1..]) {
        Ok(parsed) => parsed,
        Err(e) => {
            say!(Red e);
            print_help(true);
            return ExitCode::FAILURE;
        }
    };

    // Gather a list of any additional flags
    let flags = get_flags(&compiler_args);

    let config = match resolve_config(&options, &flags) {
        Ok(config) => config,
        Err(e) => {
            print_formatted_error(e);
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Help => {
            print_help(false);
            ExitCode::SUCCESS
        }

        Command::Compile(path) => match compile_file(&path, &config) {
            Ok(program) => {
                // Stdout only carries the program, so warnings go to stderr
                if !flags.contains(&Flag::DisableWarnings) {
                    for warning in &program.warnings {
                        eprintln!("warning: {}", warning);
                    }
                }

                print!("{}", program.source);
                ExitCode::SUCCESS
            }
            Err(e) => {
                print_formatted_error(e);
                ExitCode::FAILURE
            }
        },

        Command::Build(paths) => {
            let paths = match collect_input_files(&paths) {
                Ok(paths) => paths,
                Err(e) => {
                    print_formatted_error(e);
                    return ExitCode::FAILURE;
                }
            };

            say!("\nCompiling ", Blue paths.len(), Reset " files");
            let result = build_files(&paths, &config, &flags);
            let failed = result.messages.has_errors();

            print_compiler_messages(result.messages, !flags.contains(&Flag::DisableWarnings));

            if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn get_command(args: &[String]) -> Result<(Command, CliOptions), String> {
    let (command_name, rest) = match args.first().map(String::as_str) {
        Some("help") | Some("--help") | Some("-h") => {
            return Ok((Command::Help, CliOptions::default()));
        }
        Some("build") => ("build", &args[1..]),
        Some(_) => ("compile", args),
        None => return Err(String::from("No command or input file given")),
    };

    let (paths, options) = parse_arguments(rest)?;

    match command_name {
        "build" => {
            if paths.is_empty() {
                return Err(String::from("Build needs at least one input file"));
            }
            Ok((Command::Build(paths), options))
        }
        _ => match paths.as_slice() {
            [path] => Ok((Command::Compile(path.to_owned()), options)),
            [] => Err(String::from("No input file given")),
            _ => Err(String::from(
                "Printing to stdout takes exactly one input file (use 'build' for several)",
            )),
        },
    }
}

fn parse_arguments(args: &[String]) -> Result<(Vec<PathBuf>, CliOptions), String> {
    let mut paths = Vec::new();
    let mut options = CliOptions::default();
    let mut index = 0usize;

    while let Some(arg) = args.get(index) {
        match arg.as_str() {
            "--config" => {
                options.config_path = Some(PathBuf::from(flag_value(args, index, "--config")?));
                index += 2;
            }
            "--runtime" => {
                options.runtime_path = Some(flag_value(args, index, "--runtime")?.to_owned());
                index += 2;
            }
            "--out-dir" => {
                options.out_dir = Some(PathBuf::from(flag_value(args, index, "--out-dir")?));
                index += 2;
            }
            "--no-dce" | "--no-memo" | "--hide-warnings" | "--hide-timers" => {
                index += 1;
            }
            _ if arg.starts_with("--") => {
                return Err(format!(
                    "Unknown flag: '{arg}'. Supported flags are --config, --runtime, --out-dir, --no-dce, --no-memo, --hide-warnings, --hide-timers."
                ));
            }
            _ => {
                paths.push(PathBuf::from(arg));
                index += 1;
            }
        }
    }

    Ok((paths, options))
}

fn flag_value<'a>(args: &'a [String], index: usize, flag: &str) -> Result<&'a str, String> {
    match args.get(index + 1) {
        Some(value) if !value.starts_with("--") => Ok(value),
        _ => Err(format!("Missing value for {flag}")),
    }
}

fn get_flags(args: &[String]) -> Vec<Flag> {
    let mut flags = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--no-dce" => flags.push(Flag::DisableDeadBindingElimination),
            "--no-memo" => flags.push(Flag::DisableMemoization),
            "--hide-warnings" => flags.push(Flag::DisableWarnings),
            "--hide-timers" => flags.push(Flag::DisableTimers),
            _ => {}
        }
    }

    flags
}

// An explicit --config wins, otherwise a config file in the current directory is picked up
fn resolve_config(options: &CliOptions, flags: &[Flag]) -> Result<Config, CompilerError> {
    let mut config = match &options.config_path {
        Some(path) => Config::load(path)?,
        None => {
            let default_path = Path::new(CONFIG_FILE_NAME);
            if default_path.is_file() {
                Config::load(default_path)?
            } else {
                Config::default()
            }
        }
    };

    config.apply_flags(flags);

    if let Some(runtime_path) = &options.runtime_path {
        config.runtime = RuntimeLinkage::Require(runtime_path.to_owned());
    }

    if let Some(out_dir) = &options.out_dir {
        config.out_dir = Some(out_dir.to_owned());
    }

    Ok(config)
}

fn print_help(commands_only: bool) {
    if !commands_only {
        say!("------------------------------------");
        say!(Green Bold "rinhajs - syntax tree to JavaScript compiler");
        say!("Usage: rinhajs <command> <args>");
    }
    say!(Green Bold "Commands:");
    say!("  <file.json>              - Compiles a syntax tree and prints the JavaScript");
    say!("  build <file.json|dir>... - Compiles each file to <name>.js");
    say!("  help                     - Shows this message");
    say!(Green Bold "Flags:");
    say!("  --config <file>          - Reads settings from a TOML file (default: ./", CONFIG_FILE_NAME, ")");
    say!("  --runtime <path>         - Requires the runtime module from <path> instead of embedding it");
    say!("  --out-dir <dir>          - Where build writes its output");
    say!("  --no-dce                 - Keeps unused let bindings");
    say!("  --no-memo                - Never memoizes calls to pure functions");
    say!("  --hide-warnings          - Doesn't print warnings");
    say!("  --hide-timers            - Doesn't print build timings");
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
