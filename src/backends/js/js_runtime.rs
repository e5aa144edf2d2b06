//! Runtime helpers the generated JavaScript calls into.
//!
//! The helpers are a real JavaScript module (`runtime/rinha_runtime.js`). Generated code
//! only ever refers to them through the [`RUNTIME_NAMESPACE`] object.

use crate::backends::js::js_expr::escape_js_string;
use serde::Deserialize;

pub const RUNTIME_NAMESPACE: &str = "__rinha";
pub const RUNTIME_MODULE_SOURCE: &str = include_str!("runtime/rinha_runtime.js");

/// How generated code gets hold of the runtime namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeLinkage {
    /// Embed the runtime module as the prologue, so the output runs on its own.
    #[default]
    Inline,

    /// `require` the runtime module from this path at startup.
    Require(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeHelper {
    PrintCustom,
    Print,
    Memoize,
    ExecuteIf,
}

impl RuntimeHelper {
    pub const ALL: [RuntimeHelper; 4] = [
        RuntimeHelper::PrintCustom,
        RuntimeHelper::Print,
        RuntimeHelper::Memoize,
        RuntimeHelper::ExecuteIf,
    ];

    pub fn js_name(self) -> &'static str {
        match self {
            RuntimeHelper::PrintCustom => "printCustom",
            RuntimeHelper::Print => "print",
            RuntimeHelper::Memoize => "memoize",
            RuntimeHelper::ExecuteIf => "executeIf",
        }
    }

    /// Namespaced name to call from generated code, e.g. `__rinha.print`.
    pub fn qualified(self) -> String {
        format!("{}.{}", RUNTIME_NAMESPACE, self.js_name())
    }
}

pub fn runtime_prologue(linkage: &RuntimeLinkage) -> String {
    match linkage {
        RuntimeLinkage::Inline => {
            let mut prologue = RUNTIME_MODULE_SOURCE.to_owned();
            if !prologue.ends_with('\n') {
                prologue.push('\n');
            }
            prologue
        }
        RuntimeLinkage::Require(path) => {
            format!(
                "const {} = require({});\n",
                RUNTIME_NAMESPACE,
                escape_js_string(path)
            )
        }
    }
}
