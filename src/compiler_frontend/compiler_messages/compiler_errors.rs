use crate::compiler_frontend::compiler_warnings::CompilerWarning;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// The final set of errors and warnings emitted from the compiler
#[derive(Debug, Default)]
pub struct CompilerMessages {
    pub errors: Vec<CompilerError>,
    pub warnings: Vec<CompilerWarning>,
}

impl CompilerMessages {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum ErrorMetaDataKey {
    NodeKind,
    CompilationStage,

    // Optional suggestions
    PrimarySuggestion,
}

#[derive(Debug, Clone)]
pub struct CompilerError {
    pub msg: String,

    // The input file this error came from, if the error happened while building a file.
    pub file_path: Option<PathBuf>,
    pub error_type: ErrorType,

    // Extra structured context for more detailed error messages
    pub metadata: HashMap<ErrorMetaDataKey, String>,
}

impl CompilerError {
    pub fn new(msg: impl Into<String>, error_type: ErrorType) -> CompilerError {
        CompilerError {
            msg: msg.into(),
            file_path: None,
            error_type,
            metadata: HashMap::new(),
        }
    }

    pub fn with_file_path(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn new_metadata_entry(&mut self, key: ErrorMetaDataKey, value: impl Into<String>) {
        self.metadata.insert(key, value.into());
    }

    /// Create a compiler error (internal bug, not user's fault)
    pub fn compiler_error(msg: impl Into<String>) -> Self {
        CompilerError::new(msg, ErrorType::Compiler)
    }

    /// The input has a node kind outside the language
    pub fn unsupported_node_kind(msg: impl Into<String>) -> Self {
        CompilerError::new(msg, ErrorType::UnsupportedNodeKind)
    }

    /// The input is a known node kind with missing or ill-typed fields
    pub fn malformed_term(msg: impl Into<String>) -> Self {
        CompilerError::new(msg, ErrorType::MalformedTerm)
    }

    /// The input could not be read as JSON at all
    pub fn syntax_error(msg: impl Into<String>) -> Self {
        CompilerError::new(msg, ErrorType::Syntax)
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        CompilerError::new(msg, ErrorType::Config)
    }

    /// Create a file system error for a path
    pub fn file_error(path: &Path, msg: impl Into<String>) -> Self {
        CompilerError::new(msg, ErrorType::File).with_file_path(path)
    }
}

// Adds more information to the CompilerError
// So it knows which stage of the pipeline rejected the input
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ErrorType {
    File,
    Syntax,
    UnsupportedNodeKind,
    MalformedTerm,
    Config,
    Compiler,
}

pub fn error_type_to_str(e_type: &ErrorType) -> &'static str {
    match e_type {
        ErrorType::File => "File Error",
        ErrorType::Syntax => "Syntax Error",
        ErrorType::UnsupportedNodeKind => "Unsupported Node Kind",
        ErrorType::MalformedTerm => "Malformed Term",
        ErrorType::Config => "Malformed Config",
        ErrorType::Compiler => "Compiler Bug",
    }
}

/// Returns a new CompilerError for internal compiler bugs.
///
/// Usage:
/// `return_compiler_error!("message {}", arg)`;
/// `return_compiler_error!("message", { CompilationStage => "JavaScript backend" })`;
#[macro_export]
macro_rules! return_compiler_error {
    ($msg:expr, { $( $key:ident => $value:expr ),* $(,)? }) => {{
        let mut error = $crate::compiler_frontend::compiler_errors::CompilerError::compiler_error($msg);
        $(
            error.new_metadata_entry(
                $crate::compiler_frontend::compiler_errors::ErrorMetaDataKey::$key,
                $value,
            );
        )*
        return Err(error);
    }};
    ($($arg:tt)*) => {
        return Err($crate::compiler_frontend::compiler_errors::CompilerError::compiler_error(
            format!($($arg)*),
        ))
    };
}

/// Returns a new CompilerError for a malformed config file.
///
/// Usage: `return_config_error!("message", { PrimarySuggestion => "..." })`;
#[macro_export]
macro_rules! return_config_error {
    ($msg:expr, { $( $key:ident => $value:expr ),* $(,)? }) => {{
        let mut error = $crate::compiler_frontend::compiler_errors::CompilerError::config_error($msg);
        $(
            error.new_metadata_entry(
                $crate::compiler_frontend::compiler_errors::ErrorMetaDataKey::$key,
                $value,
            );
        )*
        return Err(error);
    }};
    ($msg:expr) => {
        return Err($crate::compiler_frontend::compiler_errors::CompilerError::config_error($msg))
    };
}
