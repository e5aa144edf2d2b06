pub mod dead_bindings;
pub mod purity;


use crate::compiler_frontend::ast::term_tree::TermTree;
use crate::compiler_frontend::compiler_warnings::CompilerWarning;
use crate::compiler_frontend::optimizers::dead_bindings::eliminate_dead_bindings;
use crate::compiler_frontend::optimizers::purity::{PurityTable, infer_purity};

/// What the optimizer learned about a program, for the backend.
#[derive(Debug, Default)]
pub struct OptimizedProgram {
    pub purity: PurityTable,
    pub warnings: Vec<CompilerWarning>,
}

/// Dead-binding elimination followed by purity inference over the pruned tree.
pub fn optimize(tree: &mut TermTree, eliminate_dead: bool) -> OptimizedProgram {
    let warnings = if eliminate_dead {
        eliminate_dead_bindings(tree)
    } else {
        Vec::new()
    };

    OptimizedProgram {
        purity: infer_purity(tree),
        warnings,
    }
}
