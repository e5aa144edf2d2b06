use crate::compiler_frontend::compiler_errors::{CompilerError, CompilerMessages};
use crate::compiler_frontend::compiler_warnings::CompilerWarning;
use crate::compiler_frontend::{CompilerFrontend, Flag};
use crate::projects::settings::{Config, INPUT_FILE_EXTENSION};
use crate::timer_log;
use rayon::prelude::*;
use saying::say;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// A program lowered to JavaScript, ready to be written or printed.
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    pub source: String,
    pub warnings: Vec<CompilerWarning>,
    pub memoized_call_sites: usize,
}

pub struct OutputFile {
    pub full_file_path: PathBuf,
    pub program: CompiledProgram,
}

/// Everything a `build` produced: the files that were written and what went wrong.
#[derive(Default)]
pub struct BuildResult {
    pub written_files: Vec<PathBuf>,
    pub messages: CompilerMessages,
}

/// Decode, optimize and lower one program. The whole pipeline either succeeds or
/// returns the first error, there is never partial output.
pub fn compile_source(source: &str, config: &Config) -> Result<CompiledProgram, CompilerError> {
    let frontend = CompilerFrontend::new(config);

    let time = Instant::now();
    let ast = frontend.source_to_ast(source)?;
    let mut tree = frontend.ast_to_tree(&ast);
    timer_log!(time, "Syntax tree decoded in: ");

    let time = Instant::now();
    let program = frontend.optimize_tree(&mut tree);
    timer_log!(time, "Optimized in: ");

    let time = Instant::now();
    let module = frontend.tree_to_js(&tree, &program)?;
    timer_log!(time, "JavaScript generated in: ");

    Ok(CompiledProgram {
        source: module.source,
        warnings: program.warnings,
        memoized_call_sites: module.memoized_call_sites,
    })
}

/// Compile a single input file. Errors and warnings are tagged with the file path.
pub fn compile_file(path: &Path, config: &Config) -> Result<CompiledProgram, CompilerError> {
    let source = fs::read_to_string(path)
        .map_err(|e| CompilerError::file_error(path, format!("Could not read input: {}", e)))?;

    let mut program = compile_source(&source, config).map_err(|e| e.with_file_path(path))?;
    program.warnings = program
        .warnings
        .into_iter()
        .map(|warning| warning.with_file_path(path))
        .collect();

    Ok(program)
}

/// Expand directory arguments into the syntax tree files directly inside them.
/// Plain file paths are kept as given, even without the `.json` extension.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CompilerError> {
    let mut inputs = Vec::new();

    for path in paths {
        if !path.is_dir() {
            inputs.push(path.to_owned());
            continue;
        }

        let entries = fs::read_dir(path).map_err(|e| {
            CompilerError::file_error(path, format!("Could not read directory: {}", e))
        })?;

        let mut found = Vec::new();
        for entry in entries {
            let entry_path = entry
                .map_err(|e| {
                    CompilerError::file_error(path, format!("Could not read directory: {}", e))
                })?
                .path();

            if entry_path.is_file()
                && entry_path.extension().and_then(|ext| ext.to_str()) == Some(INPUT_FILE_EXTENSION)
            {
                found.push(entry_path);
            }
        }

        if found.is_empty() {
            return Err(CompilerError::file_error(
                path,
                format!("No .{} files found in this directory", INPUT_FILE_EXTENSION),
            ));
        }

        found.sort();
        inputs.extend(found);
    }

    Ok(inputs)
}

/// Compile every input in parallel and write `<stem>.js` for each one that succeeded.
/// A file that fails to compile never gets an output file.
pub fn build_files(inputs: &[PathBuf], config: &Config, flags: &[Flag]) -> BuildResult {
    let start = Instant::now();
    let mut result = BuildResult::default();

    let compiled = inputs
        .par_iter()
        .map(|input| {
            compile_file(input, config).map(|program| OutputFile {
                full_file_path: config.output_path_for(input),
                program,
            })
        })
        .collect::<Vec<_>>();

    if let Some(out_dir) = &config.out_dir {
        if let Err(e) = fs::create_dir_all(out_dir) {
            result.messages.errors.push(CompilerError::file_error(
                out_dir,
                format!("Could not create the output directory: {}", e),
            ));
            return result;
        }
    }

    for output in compiled {
        match output {
            Ok(output_file) => {
                let OutputFile {
                    full_file_path,
                    program,
                } = output_file;

                match fs::write(&full_file_path, &program.source) {
                    Ok(()) => result.written_files.push(full_file_path),
                    Err(e) => result.messages.errors.push(CompilerError::file_error(
                        &full_file_path,
                        format!("Error writing file: {}", e),
                    )),
                }

                result.messages.warnings.extend(program.warnings);
            }
            Err(e) => result.messages.errors.push(e),
        }
    }

    if !flags.contains(&Flag::DisableTimers) {
        let duration = start.elapsed();
        say!(
            "\nBuilt ",
            Blue result.written_files.len(),
            Reset " of ",
            Blue inputs.len(),
            Reset " files in: ",
            Green Bold #duration
        );
    }

    result
}

#[cfg(test)]
#[path = "tests/build_tests.rs"]
mod tests;
