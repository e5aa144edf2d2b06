//! Arena form of the syntax tree.
//!
//! Every node gets a [`TermId`] once, while the decoded tree is lowered here.
//! Passes that need per-node facts (tail positions, liveness) keep them in side tables keyed
//! by these ids instead of writing into the nodes. The only structural edits after lowering
//! are the child relinks dead-binding elimination makes when it splices a `Let` out.

use crate::compiler_frontend::ast::ast_nodes::{BinaryOp, Term};
use crate::compiler_frontend::with_stack_guard;
use std::fmt;
use std::ops::Index;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(pub u32);

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TermKind {
    Let {
        name: String,
        value: TermId,
        next: TermId,
    },
    Function {
        parameters: Vec<String>,
        value: TermId,
    },
    If {
        condition: TermId,
        then: TermId,
        otherwise: TermId,
    },
    Print {
        value: TermId,
    },
    Call {
        callee: TermId,
        arguments: Vec<TermId>,
    },
    Var {
        name: String,
    },
    Int(i64),
    Str(String),
    Bool(bool),
    Binary {
        op: BinaryOp,
        lhs: TermId,
        rhs: TermId,
    },
    Tuple {
        first: TermId,
        second: TermId,
    },
    First {
        value: TermId,
    },
    Second {
        value: TermId,
    },
}

impl TermKind {
    /// Direct children in evaluation order.
    pub fn children(&self) -> Vec<TermId> {
        match self {
            TermKind::Let { value, next, .. } => vec![*value, *next],
            TermKind::Function { value, .. } => vec![*value],
            TermKind::If {
                condition,
                then,
                otherwise,
            } => vec![*condition, *then, *otherwise],
            TermKind::Print { value } | TermKind::First { value } | TermKind::Second { value } => {
                vec![*value]
            }
            TermKind::Call { callee, arguments } => {
                let mut children = Vec::with_capacity(arguments.len() + 1);
                children.push(*callee);
                children.extend(arguments.iter().copied());
                children
            }
            TermKind::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
            TermKind::Tuple { first, second } => vec![*first, *second],
            TermKind::Var { .. } | TermKind::Int(_) | TermKind::Str(_) | TermKind::Bool(_) => {
                vec![]
            }
        }
    }

    /// Mutable child slots, in the same order as [`TermKind::children`].
    pub(crate) fn children_mut(&mut self) -> Vec<&mut TermId> {
        match self {
            TermKind::Let { value, next, .. } => vec![value, next],
            TermKind::Function { value, .. } => vec![value],
            TermKind::If {
                condition,
                then,
                otherwise,
            } => vec![condition, then, otherwise],
            TermKind::Print { value } | TermKind::First { value } | TermKind::Second { value } => {
                vec![value]
            }
            TermKind::Call { callee, arguments } => {
                let mut children = Vec::with_capacity(arguments.len() + 1);
                children.push(callee);
                children.extend(arguments.iter_mut());
                children
            }
            TermKind::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            TermKind::Tuple { first, second } => vec![first, second],
            TermKind::Var { .. } | TermKind::Int(_) | TermKind::Str(_) | TermKind::Bool(_) => {
                vec![]
            }
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            TermKind::Let { .. } => "Let",
            TermKind::Function { .. } => "Function",
            TermKind::If { .. } => "If",
            TermKind::Print { .. } => "Print",
            TermKind::Call { .. } => "Call",
            TermKind::Var { .. } => "Var",
            TermKind::Int(_) => "Int",
            TermKind::Str(_) => "Str",
            TermKind::Bool(_) => "Bool",
            TermKind::Binary { .. } => "Binary",
            TermKind::Tuple { .. } => "Tuple",
            TermKind::First { .. } => "First",
            TermKind::Second { .. } => "Second",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermTree {
    nodes: Vec<TermKind>,
    pub root: TermId,
}

impl TermTree {
    /// Lower a decoded syntax tree into the arena. Ids are handed out in pre-order.
    pub fn from_ast(term: &Term) -> Self {
        let mut tree = TermTree {
            nodes: Vec::new(),
            root: TermId(0),
        };
        tree.root = tree.lower(term);
        tree
    }

    fn reserve(&mut self) -> TermId {
        let id = TermId(self.nodes.len() as u32);
        // Placeholder until the children are lowered
        self.nodes.push(TermKind::Bool(false));
        id
    }

    fn lower(&mut self, term: &Term) -> TermId {
        with_stack_guard(|| self.lower_term(term))
    }

    fn lower_term(&mut self, term: &Term) -> TermId {
        let id = self.reserve();

        let kind = match term {
            Term::Let { name, value, next } => TermKind::Let {
                name: name.text.to_owned(),
                value: self.lower(value),
                next: self.lower(next),
            },
            Term::Function { parameters, value } => TermKind::Function {
                parameters: parameters.iter().map(|p| p.text.to_owned()).collect(),
                value: self.lower(value),
            },
            Term::If {
                condition,
                then,
                otherwise,
            } => TermKind::If {
                condition: self.lower(condition),
                then: self.lower(then),
                otherwise: self.lower(otherwise),
            },
            Term::Print { value } => TermKind::Print {
                value: self.lower(value),
            },
            Term::Call { callee, arguments } => TermKind::Call {
                callee: self.lower(callee),
                arguments: arguments.iter().map(|a| self.lower(a)).collect(),
            },
            Term::Var { name } => TermKind::Var {
                name: name.to_owned(),
            },
            Term::Int { value } => TermKind::Int(*value),
            Term::Str { value } => TermKind::Str(value.to_owned()),
            Term::Bool { value } => TermKind::Bool(*value),
            Term::Binary { lhs, op, rhs } => TermKind::Binary {
                op: *op,
                lhs: self.lower(lhs),
                rhs: self.lower(rhs),
            },
            Term::Tuple { first, second } => TermKind::Tuple {
                first: self.lower(first),
                second: self.lower(second),
            },
            Term::First { value } => TermKind::First {
                value: self.lower(value),
            },
            Term::Second { value } => TermKind::Second {
                value: self.lower(value),
            },
        };

        self.nodes[id.0 as usize] = kind;
        id
    }

    pub fn get(&self, id: TermId) -> Option<&TermKind> {
        self.nodes.get(id.0 as usize)
    }

    pub(crate) fn get_mut(&mut self, id: TermId) -> Option<&mut TermKind> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the arena, including nodes no longer reachable from the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids reachable from the root, in pre-order.
    pub fn reachable(&self) -> Vec<TermId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(kind) = self.get(id) {
                stack.extend(kind.children().into_iter().rev());
            }
        }

        order
    }

    /// Name bound by a `Let`, or `None` for every other kind.
    pub fn let_name(&self, id: TermId) -> Option<&str> {
        match self.get(id) {
            Some(TermKind::Let { name, .. }) => Some(name),
            _ => None,
        }
    }
}

impl Index<TermId> for TermTree {
    type Output = TermKind;

    fn index(&self, id: TermId) -> &Self::Output {
        &self.nodes[id.0 as usize]
    }
}

impl fmt::Display for TermTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_term(
            tree: &TermTree,
            id: TermId,
            depth: usize,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            let indent = "  ".repeat(depth);
            match tree.get(id) {
                None => writeln!(f, "{}{} <missing>", indent, id),
                Some(kind) => {
                    match kind {
                        TermKind::Let { name, .. } => writeln!(f, "{}{} Let {}", indent, id, name)?,
                        TermKind::Function { parameters, .. } => writeln!(
                            f,
                            "{}{} Function ({})",
                            indent,
                            id,
                            parameters.join(", ")
                        )?,
                        TermKind::Var { name } => writeln!(f, "{}{} Var {}", indent, id, name)?,
                        TermKind::Int(value) => writeln!(f, "{}{} Int {}", indent, id, value)?,
                        TermKind::Str(value) => writeln!(f, "{}{} Str {:?}", indent, id, value)?,
                        TermKind::Bool(value) => writeln!(f, "{}{} Bool {}", indent, id, value)?,
                        TermKind::Binary { op, .. } => {
                            writeln!(f, "{}{} Binary {}", indent, id, op)?
                        }
                        other => writeln!(f, "{}{} {}", indent, id, other.kind_name())?,
                    }

                    for child in kind.children() {
                        with_stack_guard(|| write_term(tree, child, depth + 1, f))?;
                    }
                    Ok(())
                }
            }
        }

        write_term(self, self.root, 0, f)
    }
}
