//! JavaScript backend.
//!
//! Lowers the optimized term tree into JavaScript source. Conditionals become calls to the
//! runtime's `executeIf` with thunked branches, so an `if` can sit anywhere an expression
//! can. Tail positions get explicit `return`s, and calls to pure functions go through the
//! runtime memo cache.

pub(crate) mod js_expr;
mod js_function;
pub mod js_runtime;
mod js_statement;
pub mod return_tagger;


use crate::backends::js::js_runtime::{RUNTIME_NAMESPACE, RuntimeLinkage, runtime_prologue};
use crate::backends::js::return_tagger::TailPositions;
use crate::codegen_log;
use crate::return_compiler_error;
use crate::compiler_frontend::ast::term_tree::{TermId, TermKind, TermTree};
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::optimizers::purity::PurityTable;

/// Configuration for JS lowering.
#[derive(Debug, Clone)]
pub struct JsLoweringConfig {
    /// Where the generated code finds the runtime helpers.
    pub runtime: RuntimeLinkage,

    /// Route calls to pure functions through the runtime memo cache.
    pub memoize_pure_calls: bool,
}

impl Default for JsLoweringConfig {
    fn default() -> Self {
        JsLoweringConfig {
            runtime: RuntimeLinkage::Inline,
            memoize_pure_calls: true,
        }
    }
}

/// Result of lowering a term tree to JavaScript.
#[derive(Debug, Clone)]
pub struct JsModule {
    /// Complete JS source code: runtime prologue followed by the program.
    pub source: String,

    /// Number of call sites routed through the memo cache.
    pub memoized_call_sites: usize,
}

pub fn lower_tree_to_js(
    tree: &TermTree,
    purity: &PurityTable,
    config: JsLoweringConfig,
) -> Result<JsModule, CompilerError> {
    let mut emitter = JsEmitter::new(tree, purity, config);
    emitter.lower_module()
}

pub(crate) struct JsEmitter<'tree> {
    pub(crate) tree: &'tree TermTree,
    pub(crate) purity: &'tree PurityTable,
    pub(crate) config: JsLoweringConfig,

    pub(crate) out: String,
    pub(crate) tail_positions: TailPositions,
    pub(crate) memoized_call_sites: usize,
}

impl<'tree> JsEmitter<'tree> {
    pub(crate) fn new(
        tree: &'tree TermTree,
        purity: &'tree PurityTable,
        config: JsLoweringConfig,
    ) -> Self {
        Self {
            tree,
            purity,
            config,
            out: String::new(),
            tail_positions: TailPositions::default(),
            memoized_call_sites: 0,
        }
    }

    fn lower_module(&mut self) -> Result<JsModule, CompilerError> {
        let prologue = runtime_prologue(&self.config.runtime);
        self.out.push_str(&prologue);

        // The program itself is not inside a function, so nothing at the top level returns
        let program = self.lower_statement(self.tree.root)?;
        self.emit_line(&program);

        codegen_log!(
            "Lowered ",
            Blue #self.tree.len(),
            " terms, memoized call sites: ",
            Blue #self.memoized_call_sites
        );

        Ok(JsModule {
            source: self.out.clone(),
            memoized_call_sites: self.memoized_call_sites,
        })
    }

    pub(crate) fn term(&self, id: TermId) -> Result<&'tree TermKind, CompilerError> {
        match self.tree.get(id) {
            Some(kind) => Ok(kind),
            None => return_compiler_error!(format!("Term {} not found in the tree", id), {
                CompilationStage => "JavaScript backend",
            }),
        }
    }

    pub(crate) fn tag_returning(&mut self, id: TermId) -> Result<TermId, CompilerError> {
        self.tail_positions.tag_returning(self.tree, id)
    }

    pub(crate) fn emit_line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }
}

/// Program identifiers are kept as written unless JavaScript would reject them or they would
/// shadow the runtime namespace.
pub(crate) fn js_identifier(raw: &str) -> String {
    let identifier = sanitize_identifier(raw);

    if is_js_reserved(&identifier) || identifier == RUNTIME_NAMESPACE {
        format!("_{}", identifier)
    } else {
        identifier
    }
}

fn sanitize_identifier(raw: &str) -> String {
    let mut result = String::new();

    for ch in raw.chars() {
        if ch == '_' || ch == '$' || ch.is_ascii_alphanumeric() {
            result.push(ch);
        } else {
            result.push('_');
        }
    }

    if result.is_empty() {
        "_value".to_owned()
    } else if result
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_digit())
    {
        format!("_{}", result)
    } else {
        result
    }
}

fn is_js_reserved(name: &str) -> bool {
    matches!(
        name,
        "break"
            | "case"
            | "catch"
            | "class"
            | "const"
            | "continue"
            | "debugger"
            | "default"
            | "delete"
            | "do"
            | "else"
            | "export"
            | "extends"
            | "finally"
            | "for"
            | "function"
            | "if"
            | "import"
            | "in"
            | "instanceof"
            | "new"
            | "return"
            | "super"
            | "switch"
            | "this"
            | "throw"
            | "try"
            | "typeof"
            | "var"
            | "void"
            | "while"
            | "with"
            | "yield"
            | "enum"
            | "implements"
            | "interface"
            | "let"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "static"
            | "await"
            | "undefined"
            | "null"
            | "true"
            | "false"
            | "NaN"
            | "Infinity"
            | "eval"
            | "arguments"
            | "require"
            | "module"
            | "console"
            | "Math"
    )
}
