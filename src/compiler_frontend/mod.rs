pub mod ast;
pub mod optimizers;

pub mod compiler_messages {
    pub mod compiler_dev_logging;
    pub mod compiler_errors;
    pub mod compiler_warnings;
    pub mod display_messages;
}
pub use compiler_messages::compiler_errors;
pub use compiler_messages::compiler_warnings;
pub use compiler_messages::display_messages;

use crate::ast_log;
use crate::backends::js::{JsModule, lower_tree_to_js};
use crate::compiler_frontend::ast::ast_nodes::AstFile;
use crate::compiler_frontend::ast::parse_json::parse_ast;
use crate::compiler_frontend::ast::term_tree::TermTree;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::optimizers::{OptimizedProgram, optimize};
use crate::projects::settings::Config;

// Syntax trees nest one level per `let`, so every recursive pass runs under this guard
const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 16 * 1024 * 1024;

/// Runs `f` on a fresh stack segment when the current one is close to running out.
#[inline]
pub(crate) fn with_stack_guard<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, f)
}

/// Flags change the behavior of the core pipeline.
/// For the built-in CLI these are added as cli flags.
#[derive(PartialEq, Debug, Clone)]
pub enum Flag {
    DisableDeadBindingElimination,
    DisableMemoization,
    DisableWarnings,
    DisableTimers,
}

pub struct CompilerFrontend<'a> {
    pub(crate) project_config: &'a Config,
}

impl<'a> CompilerFrontend<'a> {
    pub fn new(project_config: &'a Config) -> Self {
        Self { project_config }
    }

    /// -----------------------------
    /// DECODING
    /// -----------------------------
    /// The syntax tree arrives as JSON from the upstream parser.
    pub fn source_to_ast(&self, source: &str) -> Result<AstFile, CompilerError> {
        parse_ast(source)
    }

    /// -----------------------------
    /// TERM TREE
    /// -----------------------------
    /// Every node gets its stable id here. Later passes key their facts by these ids.
    pub fn ast_to_tree(&self, ast: &AstFile) -> TermTree {
        let tree = TermTree::from_ast(&ast.expression);
        ast_log!("Term tree:\n", tree.to_string());
        tree
    }

    /// -----------------------------
    /// OPTIMIZATION
    /// -----------------------------
    /// Unused bindings are pruned first so purity is inferred over the code that will run.
    pub fn optimize_tree(&self, tree: &mut TermTree) -> OptimizedProgram {
        optimize(tree, self.project_config.eliminate_dead_bindings)
    }

    /// -----------------------
    /// BACKEND
    /// (JavaScript Generation)
    /// -----------------------
    pub fn tree_to_js(
        &self,
        tree: &TermTree,
        program: &OptimizedProgram,
    ) -> Result<JsModule, CompilerError> {
        lower_tree_to_js(
            tree,
            &program.purity,
            self.project_config.js_lowering_config(),
        )
    }
}
