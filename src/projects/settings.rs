use crate::backends::js::JsLoweringConfig;
use crate::backends::js::js_runtime::RuntimeLinkage;
use crate::compiler_frontend::Flag;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::return_config_error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const INPUT_FILE_EXTENSION: &str = "json";
pub const OUTPUT_FILE_EXTENSION: &str = "js";
pub const CONFIG_FILE_NAME: &str = "rinhajs.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where `build` writes its output. Defaults to next to each input file.
    pub out_dir: Option<PathBuf>,
    pub runtime: RuntimeLinkage,
    pub eliminate_dead_bindings: bool,
    pub memoize_pure_calls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            out_dir: None,
            runtime: RuntimeLinkage::Inline,
            eliminate_dead_bindings: true,
            memoize_pure_calls: true,
        }
    }
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self, CompilerError> {
        match toml::from_str::<Config>(source) {
            Ok(config) => Ok(config),
            Err(e) => return_config_error!(format!("Could not read config: {}", e), {
                PrimarySuggestion => "Known keys are out_dir, runtime, eliminate_dead_bindings and memoize_pure_calls",
            }),
        }
    }

    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let source = fs::read_to_string(path).map_err(|e| {
            CompilerError::file_error(path, format!("Could not read config file: {}", e))
        })?;

        Config::from_toml(&source).map_err(|e| e.with_file_path(path))
    }

    /// Flags from the command line win over whatever the config file says.
    pub fn apply_flags(&mut self, flags: &[Flag]) {
        for flag in flags {
            match flag {
                Flag::DisableDeadBindingElimination => self.eliminate_dead_bindings = false,
                Flag::DisableMemoization => self.memoize_pure_calls = false,
                Flag::DisableWarnings | Flag::DisableTimers => {}
            }
        }
    }

    pub fn js_lowering_config(&self) -> JsLoweringConfig {
        JsLoweringConfig {
            runtime: self.runtime.clone(),
            memoize_pure_calls: self.memoize_pure_calls,
        }
    }

    /// Output path for an input file, e.g. `fib.json` -> `<out_dir>/fib.js`.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let file_name = input.with_extension(OUTPUT_FILE_EXTENSION);

        match (&self.out_dir, file_name.file_name()) {
            (Some(out_dir), Some(name)) => out_dir.join(name),
            _ => file_name,
        }
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
