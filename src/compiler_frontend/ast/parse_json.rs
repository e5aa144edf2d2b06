use crate::ast_log;
use crate::compiler_frontend::ast::ast_nodes::AstFile;
use crate::compiler_frontend::compiler_errors::{CompilerError, ErrorMetaDataKey};
use serde::Deserialize;
use serde_json::error::Category;

/// Decode the JSON syntax tree produced by the upstream parser.
///
/// Unknown node kinds are rejected with [`ErrorType::UnsupportedNodeKind`] rather than
/// being skipped, so a partially understood program never reaches code generation.
///
/// Nesting depth is unbounded. A long `let` chain nests one object per binding, so the
/// decoder grows its stack instead of stopping at serde_json's default depth.
///
/// [`ErrorType::UnsupportedNodeKind`]: crate::compiler_frontend::compiler_errors::ErrorType::UnsupportedNodeKind
pub fn parse_ast(source: &str) -> Result<AstFile, CompilerError> {
    let mut json = serde_json::Deserializer::from_str(source);
    json.disable_recursion_limit();

    let decoded = AstFile::deserialize(serde_stacker::Deserializer::new(&mut json))
        .and_then(|file| json.end().map(|()| file));

    match decoded {
        Ok(file) => {
            ast_log!("Decoded syntax tree for ", Blue #file.name);
            Ok(file)
        }
        Err(e) => Err(json_error_to_compiler_error(&e)),
    }
}

fn json_error_to_compiler_error(e: &serde_json::Error) -> CompilerError {
    let message = e.to_string();

    match e.classify() {
        Category::Io => CompilerError::compiler_error(format!(
            "Reading the syntax tree failed half way through: {}",
            message
        )),

        Category::Syntax | Category::Eof => {
            CompilerError::syntax_error(format!("Syntax tree is not valid JSON: {}", message))
        }

        Category::Data => match unknown_variant_name(&message) {
            Some(kind) => {
                let mut error = CompilerError::unsupported_node_kind(format!(
                    "Node kind `{}` is not part of the language: {}",
                    kind, message
                ));
                error.new_metadata_entry(ErrorMetaDataKey::NodeKind, kind);
                error
            }
            None => CompilerError::malformed_term(format!(
                "Syntax tree has an ill-formed node: {}",
                message
            )),
        },
    }
}

// serde reports an unknown `kind` tag as: unknown variant `Loop`, expected one of ...
fn unknown_variant_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("unknown variant `")?;
    let end = rest.find('`')?;
    Some(&rest[..end])
}
