use crate::compiler_frontend::compiler_errors::{
    CompilerError, CompilerMessages, ErrorMetaDataKey, ErrorType, error_type_to_str,
};
use crate::compiler_frontend::compiler_warnings::print_formatted_warning;
use saying::say;
use std::env;
use std::path::{Path, PathBuf};

fn normalize_display_path(path: &Path) -> PathBuf {
    let path_string = path.to_string_lossy();
    if let Some(stripped) = path_string.strip_prefix(r"\\?\") {
        return PathBuf::from(stripped);
    }

    path.to_path_buf()
}

fn relative_display_path(path: &Path) -> String {
    let normalized_path = normalize_display_path(path);

    match env::current_dir() {
        Ok(dir) => {
            let normalized_dir = normalize_display_path(&dir);
            normalized_path
                .strip_prefix(&normalized_dir)
                .unwrap_or(&normalized_path)
                .to_string_lossy()
                .to_string()
        }
        Err(_) => normalized_path.to_string_lossy().to_string(),
    }
}

pub fn print_compiler_messages(messages: CompilerMessages, show_warnings: bool) {
    // Format and print out the messages:
    for err in messages.errors {
        print_formatted_error(err);
    }

    if !show_warnings {
        return;
    }

    for warning in messages.warnings {
        print_formatted_warning(warning);
    }
}

pub fn print_formatted_error(e: CompilerError) {
    let relative_dir = e
        .file_path
        .as_deref()
        .map(relative_display_path)
        .unwrap_or_default();

    match e.error_type {
        ErrorType::File => {
            say!(Yellow "🏚 Can't find/read file or directory: ", relative_dir);
            say!(e.msg);
            return;
        }

        ErrorType::Syntax => {
            if !relative_dir.is_empty() {
                say!("\n(╯°□°)╯  🔥🔥 ", Dark Magenta relative_dir, " 🔥🔥  Σ(°△°;) ");
            }
            say!(Red "Syntax");
        }

        ErrorType::UnsupportedNodeKind | ErrorType::MalformedTerm => {
            if !relative_dir.is_empty() {
                say!("\nヽ(˶°o°)ﾉ  🔥🔥🔥 ", Dark Magenta relative_dir, " 🔥🔥🔥  ╰(°□°╰) ");
            }
            say!(Red error_type_to_str(&e.error_type));
        }

        ErrorType::Config => {
            if !relative_dir.is_empty() {
                say!("\n (-_-)  🔥🔥🔥🔥 ", Dark Magenta relative_dir, " 🔥🔥🔥🔥  <(^~^)/ ");
            }
            say!(Yellow "CONFIG FILE ISSUE - ");
            say!(Dark Yellow "Malformed config file, something doesn't make sense inside the config");
        }

        ErrorType::Compiler => {
            if !relative_dir.is_empty() {
                say!("\nヽ༼☉ ‿ ⚆༽ﾉ  🔥🔥🔥🔥 ", Dark Magenta relative_dir, " 🔥🔥🔥🔥  ╰(° _ o╰) ");
            }
            say!(Yellow "COMPILER BUG - ");
            say!(Dark Yellow "compiler developer skill issue (not your fault)");
        }
    }

    say!(Red e.msg);

    if let Some(stage) = e.metadata.get(&ErrorMetaDataKey::CompilationStage) {
        say!(Dark Magenta "Stage: ", stage);
    }

    if let Some(kind) = e.metadata.get(&ErrorMetaDataKey::NodeKind) {
        say!(Dark Magenta "Node kind: ", kind);
    }

    if let Some(suggestion) = e.metadata.get(&ErrorMetaDataKey::PrimarySuggestion) {
        say!(Dark Yellow suggestion);
    }
}
