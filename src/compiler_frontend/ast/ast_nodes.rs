//! Input syntax tree exactly as the upstream parser serializes it.
//!
//! Every node carries a `kind` discriminator; locations and any other extra
//! fields the parser emits are ignored.

use crate::compiler_frontend::with_stack_guard;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A whole program file: `{ name, expression, location }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AstFile {
    #[serde(default)]
    pub name: String,
    pub expression: Term,
}

/// `{ "text": "..." }` used for let names and function parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identifier {
    pub text: String,
}

impl Identifier {
    pub fn new(text: impl Into<String>) -> Self {
        Identifier { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind")]
pub enum Term {
    Let {
        name: Identifier,
        #[serde(deserialize_with = "guarded_term")]
        value: Box<Term>,
        #[serde(deserialize_with = "guarded_term")]
        next: Box<Term>,
    },
    Function {
        parameters: Vec<Identifier>,
        #[serde(deserialize_with = "guarded_term")]
        value: Box<Term>,
    },
    If {
        #[serde(deserialize_with = "guarded_term")]
        condition: Box<Term>,
        #[serde(deserialize_with = "guarded_term")]
        then: Box<Term>,
        #[serde(deserialize_with = "guarded_term")]
        otherwise: Box<Term>,
    },
    Print {
        #[serde(deserialize_with = "guarded_term")]
        value: Box<Term>,
    },
    Call {
        #[serde(deserialize_with = "guarded_term")]
        callee: Box<Term>,
        #[serde(deserialize_with = "guarded_terms")]
        arguments: Vec<Term>,
    },
    Var {
        #[serde(rename = "text")]
        name: String,
    },
    Int {
        value: i64,
    },
    Str {
        value: String,
    },
    Bool {
        value: bool,
    },
    Binary {
        #[serde(deserialize_with = "guarded_term")]
        lhs: Box<Term>,
        op: BinaryOp,
        #[serde(deserialize_with = "guarded_term")]
        rhs: Box<Term>,
    },
    Tuple {
        #[serde(deserialize_with = "guarded_term")]
        first: Box<Term>,
        #[serde(deserialize_with = "guarded_term")]
        second: Box<Term>,
    },
    First {
        #[serde(deserialize_with = "guarded_term")]
        value: Box<Term>,
    },
    Second {
        #[serde(deserialize_with = "guarded_term")]
        value: Box<Term>,
    },
}

// Nested terms decode under the stack guard, so depth is only limited by memory
fn guarded_term<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Box<Term>, D::Error> {
    with_stack_guard(|| Box::<Term>::deserialize(deserializer))
}

fn guarded_terms<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Term>, D::Error> {
    with_stack_guard(|| Vec::<Term>::deserialize(deserializer))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    And,
    Or,
}

impl BinaryOp {
    pub fn to_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "Add",
            BinaryOp::Sub => "Sub",
            BinaryOp::Mul => "Mul",
            BinaryOp::Div => "Div",
            BinaryOp::Rem => "Rem",
            BinaryOp::Eq => "Eq",
            BinaryOp::Neq => "Neq",
            BinaryOp::Lt => "Lt",
            BinaryOp::Gt => "Gt",
            BinaryOp::Lte => "Lte",
            BinaryOp::Gte => "Gte",
            BinaryOp::And => "And",
            BinaryOp::Or => "Or",
        }
    }
}

impl TryFrom<String> for BinaryOp {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let op = match value.as_str() {
            "Add" => BinaryOp::Add,
            "Sub" => BinaryOp::Sub,
            "Mul" => BinaryOp::Mul,
            "Div" => BinaryOp::Div,
            "Rem" => BinaryOp::Rem,
            "Eq" => BinaryOp::Eq,
            "Neq" => BinaryOp::Neq,
            "Lt" => BinaryOp::Lt,
            "Gt" => BinaryOp::Gt,
            "Lte" => BinaryOp::Lte,
            "Gte" => BinaryOp::Gte,
            "And" => BinaryOp::And,
            "Or" => BinaryOp::Or,
            _ => return Err(format!("unsupported binary operator `{}`", value)),
        };

        Ok(op)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}
