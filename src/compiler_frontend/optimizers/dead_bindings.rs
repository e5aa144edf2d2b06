//! # Dead Binding Elimination
//!
//! Removes `let` bindings whose name is never read by any `Var` in the program.
//!
//! ## Algorithm
//!
//! 1. **Candidates**: every `Let` whose `next` is not a `Print` or a `Call` is a candidate.
//!    Bindings directly followed by a print or a call are never removed, even when unused.
//! 2. **References**: every `Var` anywhere in the tree keeps its name alive. The check is
//!    textual over the whole tree and relies on names never being shadowed.
//! 3. **Splicing**: each remaining candidate `Let` is replaced by its `next` subtree. The
//!    bound value is dropped along with any effects it has.

use crate::compiler_frontend::ast::term_tree::{TermId, TermKind, TermTree};
use crate::compiler_frontend::compiler_warnings::{CompilerWarning, WarningKind};
use crate::compiler_frontend::with_stack_guard;
use crate::optimizer_log;
use rustc_hash::FxHashSet;

/// Liveness facts gathered by the first pass.
#[derive(Debug, Default)]
pub struct DeadBindingContext {
    candidates: FxHashSet<String>,
    referenced: FxHashSet<String>,
}

impl DeadBindingContext {
    pub fn collect(tree: &TermTree) -> Self {
        let mut context = DeadBindingContext::default();

        for id in tree.reachable() {
            match &tree[id] {
                TermKind::Let { name, next, .. } => {
                    if !matches!(tree[*next], TermKind::Print { .. } | TermKind::Call { .. }) {
                        context.candidates.insert(name.to_owned());
                    }
                }
                TermKind::Var { name } => {
                    context.referenced.insert(name.to_owned());
                }
                _ => {}
            }
        }

        context
    }

    /// Whether some `Var` reads this name.
    pub fn is_live(&self, name: &str) -> bool {
        self.referenced.contains(name)
    }

    /// Candidate names nothing reads.
    pub fn dead_names(&self) -> FxHashSet<String> {
        self.candidates
            .iter()
            .filter(|name| !self.referenced.contains(*name))
            .cloned()
            .collect()
    }
}

/// Drop every provably unused binding from the tree and report what was removed.
pub fn eliminate_dead_bindings(tree: &mut TermTree) -> Vec<CompilerWarning> {
    let mut dead = DeadBindingContext::collect(tree).dead_names();
    let mut warnings = Vec::new();

    if dead.is_empty() {
        return warnings;
    }

    optimizer_log!("Dead binding candidates: ", Yellow #dead);

    let root = tree.root;
    tree.root = splice_dead_lets(tree, root, &mut dead, &mut warnings);

    warnings
}

fn splice_dead_lets(
    tree: &mut TermTree,
    id: TermId,
    dead: &mut FxHashSet<String>,
    warnings: &mut Vec<CompilerWarning>,
) -> TermId {
    with_stack_guard(|| splice_term(tree, id, dead, warnings))
}

fn splice_term(
    tree: &mut TermTree,
    id: TermId,
    dead: &mut FxHashSet<String>,
    warnings: &mut Vec<CompilerWarning>,
) -> TermId {
    if let TermKind::Let { name, value, next } = &tree[id] {
        // Removing the name makes sure a binding is only ever spliced once
        if dead.remove(name) {
            let (name, value, next) = (name.to_owned(), *value, *next);
            optimizer_log!("Removing dead binding ", Yellow name);

            let warning_kind = if may_have_effect(tree, value) {
                WarningKind::DiscardedEffect
            } else {
                WarningKind::DeadBindingRemoved
            };
            warnings.push(CompilerWarning::new(&name, warning_kind));

            return splice_dead_lets(tree, next, dead, warnings);
        }
    }

    let children = tree[id].children();
    let replacements = children
        .into_iter()
        .map(|child| splice_dead_lets(tree, child, dead, warnings))
        .collect::<Vec<_>>();

    if let Some(kind) = tree.get_mut(id) {
        for (slot, replacement) in kind.children_mut().into_iter().zip(replacements) {
            *slot = replacement;
        }
    }

    id
}

// A print or call that would run when the value is evaluated. Purity isn't known yet, so
// any call may print. Function bodies only run when called, so they don't count.
fn may_have_effect(tree: &TermTree, id: TermId) -> bool {
    with_stack_guard(|| match &tree[id] {
        TermKind::Print { .. } | TermKind::Call { .. } => true,
        TermKind::Function { .. } => false,
        kind => kind
            .children()
            .into_iter()
            .any(|child| may_have_effect(tree, child)),
    })
}
