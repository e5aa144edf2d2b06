//! # Purity Inference
//!
//! Decides which named functions are safe to memoize. A function is impure when its body
//! prints, or when it calls a function already known to be impure at the time the call is
//! visited.
//!
//! This is a single forward pass over the tree, not a fixpoint. A callee found impure only
//! after its caller has been fully visited does not demote the caller.

use crate::compiler_frontend::ast::term_tree::{TermId, TermKind, TermTree};
use crate::compiler_frontend::with_stack_guard;
use crate::optimizer_log;
use rustc_hash::FxHashMap;

/// Function name to "is pure" for every name bound by `let` to a function.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PurityTable {
    functions: FxHashMap<String, bool>,
}

impl PurityTable {
    /// Names missing from the table are treated as impure.
    pub fn is_pure(&self, name: &str) -> bool {
        self.functions.get(name).copied().unwrap_or(false)
    }

    pub fn is_known_impure(&self, name: &str) -> bool {
        matches!(self.functions.get(name), Some(false))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> Vec<(&str, bool)> {
        let mut entries = self
            .functions
            .iter()
            .map(|(name, pure)| (name.as_str(), *pure))
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub(crate) fn mark_pure(&mut self, name: &str) {
        self.functions.insert(name.to_owned(), true);
    }

    pub(crate) fn mark_impure(&mut self, name: &str) {
        self.functions.insert(name.to_owned(), false);
    }
}

pub fn infer_purity(tree: &TermTree) -> PurityTable {
    let mut table = PurityTable::default();
    visit(tree, tree.root, None, &mut table);

    optimizer_log!("Purity table: ", Blue #table.entries());
    table
}

// `scope` is the innermost enclosing function that was bound by name
fn visit(tree: &TermTree, id: TermId, scope: Option<&str>, table: &mut PurityTable) {
    with_stack_guard(|| visit_term(tree, id, scope, table))
}

fn visit_term(tree: &TermTree, id: TermId, scope: Option<&str>, table: &mut PurityTable) {
    match &tree[id] {
        TermKind::Let { name, value, next } => {
            match &tree[*value] {
                TermKind::Function { value: body, .. } => {
                    table.mark_pure(name);
                    visit(tree, *body, Some(name.as_str()), table);
                }
                _ => visit(tree, *value, scope, table),
            }

            visit(tree, *next, scope, table);
        }

        TermKind::Print { value } => {
            if let Some(function_name) = scope {
                table.mark_impure(function_name);
            }

            visit(tree, *value, scope, table);
        }

        TermKind::Call { callee, arguments } => {
            if let (Some(function_name), TermKind::Var { name: callee_name }) =
                (scope, &tree[*callee])
            {
                if table.is_known_impure(callee_name) {
                    table.mark_impure(function_name);
                }
            }

            visit(tree, *callee, scope, table);
            for argument in arguments {
                visit(tree, *argument, scope, table);
            }
        }

        kind => {
            for child in kind.children() {
                visit(tree, child, scope, table);
            }
        }
    }
}
