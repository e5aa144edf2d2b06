use crate::compiler_frontend::ast::term_tree::{TermId, TermKind, TermTree};
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::return_compiler_error;
use rustc_hash::FxHashSet;

/// Side table of terms whose value is returned from the enclosing function, `if` branch
/// or let-chain thunk.
#[derive(Debug, Default)]
pub struct TailPositions {
    returning: FxHashSet<TermId>,
}

impl TailPositions {
    /// Mark the tail of `id` as returning and give back the tail's id.
    ///
    /// `Let` chains are followed through `next`; the bound value is never a tail.
    /// An `If` is itself the tail. Its branches are tagged separately when the `if` is lowered.
    pub fn tag_returning(&mut self, tree: &TermTree, id: TermId) -> Result<TermId, CompilerError> {
        let mut current = id;

        loop {
            match tree.get(current) {
                Some(TermKind::Let { next, .. }) => current = *next,
                Some(_) => break,
                None => return_compiler_error!(format!("Term {} not found in the tree", current), {
                    CompilationStage => "Return tagging",
                }),
            }
        }

        self.returning.insert(current);
        Ok(current)
    }

    pub fn is_returning(&self, id: TermId) -> bool {
        self.returning.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.returning.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returning.is_empty()
    }
}
