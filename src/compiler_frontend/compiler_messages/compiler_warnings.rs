use saying::say;
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerWarning {
    pub msg: String,
    pub warning_kind: WarningKind,
    pub file_path: Option<PathBuf>,
}

impl CompilerWarning {
    pub fn new(msg: &str, warning_kind: WarningKind) -> CompilerWarning {
        CompilerWarning {
            msg: msg.to_owned(),
            warning_kind,
            file_path: None,
        }
    }

    pub fn with_file_path(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    /// Get the file path as a string for display purposes
    pub fn file_path_string(&self) -> String {
        self.file_path
            .as_ref()
            .map(|path| path.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarningKind {
    // A let binding that nothing reads was removed from the program
    DeadBindingRemoved,

    // The removed binding's value printed or called a function, so those effects are gone too
    DiscardedEffect,
}

impl fmt::Display for CompilerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file_path.is_some() {
            write!(f, "{}: ", self.file_path_string())?;
        }

        match self.warning_kind {
            WarningKind::DeadBindingRemoved => {
                write!(f, "unused binding '{}' was removed", self.msg)
            }
            WarningKind::DiscardedEffect => write!(
                f,
                "unused binding '{}' was removed together with the prints and calls in its value",
                self.msg
            ),
        }
    }
}

pub fn print_formatted_warning(w: CompilerWarning) {
    say!(Yellow "WARNING: ");
    if w.file_path.is_some() {
        say!("File: ", w.file_path_string());
    }

    match w.warning_kind {
        WarningKind::DeadBindingRemoved => {
            say!("Unused binding '", w.msg, "' was removed");
        }
        WarningKind::DiscardedEffect => {
            say!(
                "Unused binding '",
                w.msg,
                "' was removed together with the prints and calls in its value"
            );
        }
    }
}
