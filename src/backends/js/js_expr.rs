use crate::backends::js::js_runtime::RuntimeHelper;
use crate::backends::js::{JsEmitter, js_identifier};
use crate::compiler_frontend::ast::ast_nodes::BinaryOp;
use crate::compiler_frontend::ast::term_tree::{TermId, TermKind};
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::with_stack_guard;

impl<'tree> JsEmitter<'tree> {
    pub(crate) fn lower_expr(&mut self, id: TermId) -> Result<String, CompilerError> {
        with_stack_guard(|| self.lower_expr_term(id))
    }

    fn lower_expr_term(&mut self, id: TermId) -> Result<String, CompilerError> {
        match self.term(id)? {
            TermKind::Let { .. } => self.lower_let_expression(id),

            TermKind::Function { parameters, value } => self.lower_function(parameters, *value),

            TermKind::If {
                condition,
                then,
                otherwise,
            } => self.lower_if(*condition, *then, *otherwise),

            TermKind::Print { value } => {
                let value = self.lower_expr(*value)?;
                Ok(format!("{}({})", RuntimeHelper::Print.qualified(), value))
            }

            TermKind::Call { callee, arguments } => self.lower_call(*callee, arguments),

            TermKind::Var { name } => Ok(js_identifier(name)),

            TermKind::Int(value) => Ok(value.to_string()),
            TermKind::Bool(value) => Ok(value.to_string()),
            TermKind::Str(value) => Ok(escape_js_string(value)),

            TermKind::Binary { op, lhs, rhs } => self.lower_bin_op(*lhs, *op, *rhs),

            TermKind::Tuple { first, second } => {
                let first = self.lower_expr(*first)?;
                let second = self.lower_expr(*second)?;
                Ok(format!("[{}, {}]", first, second))
            }

            TermKind::First { value } => {
                let tuple = self.lower_expr(*value)?;
                Ok(format!("({})[0]", tuple))
            }

            TermKind::Second { value } => {
                let tuple = self.lower_expr(*value)?;
                Ok(format!("({})[1]", tuple))
            }
        }
    }

    fn lower_call(&mut self, callee: TermId, arguments: &[TermId]) -> Result<String, CompilerError> {
        let mut lowered_arguments = Vec::with_capacity(arguments.len());
        for argument in arguments {
            lowered_arguments.push(self.lower_expr(*argument)?);
        }

        match self.term(callee)? {
            TermKind::Var { name } => {
                let function = js_identifier(name);

                if self.config.memoize_pure_calls && self.purity.is_pure(name) {
                    self.memoized_call_sites += 1;

                    // The declared name keys the cache, so two functions never share entries
                    let mut memo_arguments = vec![function, escape_js_string(name)];
                    memo_arguments.extend(lowered_arguments);

                    return Ok(format!(
                        "{}({})",
                        RuntimeHelper::Memoize.qualified(),
                        memo_arguments.join(", ")
                    ));
                }

                Ok(format!("{}({})", function, lowered_arguments.join(", ")))
            }

            _ => {
                let function = self.lower_expr(callee)?;
                Ok(format!("({})({})", function, lowered_arguments.join(", ")))
            }
        }
    }

    fn lower_bin_op(
        &mut self,
        left: TermId,
        operator: BinaryOp,
        right: TermId,
    ) -> Result<String, CompilerError> {
        let left = self.lower_expr(left)?;
        let right = self.lower_expr(right)?;

        // Integer division truncates toward zero, JS division doesn't
        if operator == BinaryOp::Div {
            return Ok(format!("Math.trunc({} / {})", left, right));
        }

        Ok(format!(
            "({} {} {})",
            left,
            binary_operator_symbol(operator),
            right
        ))
    }
}

pub fn binary_operator_symbol(operator: BinaryOp) -> &'static str {
    match operator {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Rem => "%",
        BinaryOp::Eq => "===",
        BinaryOp::Neq => "!==",
        BinaryOp::Lt => "<",
        BinaryOp::Gt => ">",
        BinaryOp::Lte => "<=",
        BinaryOp::Gte => ">=",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
    }
}

pub(crate) fn escape_js_string(value: &str) -> String {
    let mut escaped = String::from("\"");

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\u0000"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            control if control.is_control() => {
                escaped.push_str(&format!("\\u{:04X}", control as u32));
            }
            normal => escaped.push(normal),
        }
    }

    escaped.push('"');
    escaped
}
