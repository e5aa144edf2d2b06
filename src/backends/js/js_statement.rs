use crate::backends::js::{JsEmitter, js_identifier};
use crate::compiler_frontend::ast::term_tree::{TermId, TermKind};
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::with_stack_guard;

impl<'tree> JsEmitter<'tree> {
    /// Lower a term that sits in statement position: the program, a function body, an `if`
    /// branch thunk or the rest of a let chain.
    ///
    /// Each `let` opens its own block, so a binding is only visible to the rest of its chain.
    /// A term tagged as returning becomes `return <expr>;`.
    pub(crate) fn lower_statement(&mut self, id: TermId) -> Result<String, CompilerError> {
        with_stack_guard(|| self.lower_statement_term(id))
    }

    fn lower_statement_term(&mut self, id: TermId) -> Result<String, CompilerError> {
        match self.term(id)? {
            TermKind::Let { name, value, next } => {
                let binding = js_identifier(name);
                let value = self.lower_expr(*value)?;
                let next = self.lower_statement(*next)?;

                Ok(format!("{{let {} = {}; {}}}", binding, value, next))
            }

            _ => {
                let expression = self.lower_expr(id)?;

                if self.tail_positions.is_returning(id) {
                    Ok(format!("return {};", expression))
                } else {
                    Ok(format!("{};", expression))
                }
            }
        }
    }

    /// A let chain used as a value, e.g. as a call argument, runs in its own thunk.
    pub(crate) fn lower_let_expression(&mut self, id: TermId) -> Result<String, CompilerError> {
        self.tag_returning(id)?;
        let body = self.lower_statement(id)?;

        Ok(format!("(() => {})()", body))
    }
}
