use crate::backends::js::js_runtime::RuntimeHelper;
use crate::backends::js::{JsEmitter, js_identifier};
use crate::compiler_frontend::ast::term_tree::TermId;
use crate::compiler_frontend::compiler_errors::CompilerError;

impl<'tree> JsEmitter<'tree> {
    pub(crate) fn lower_function(
        &mut self,
        parameters: &[String],
        body: TermId,
    ) -> Result<String, CompilerError> {
        let parameters = parameters
            .iter()
            .map(|parameter| js_identifier(parameter))
            .collect::<Vec<_>>();

        self.tag_returning(body)?;
        let body = self.lower_statement(body)?;

        Ok(format!("({}) => {{{}}}", parameters.join(", "), body))
    }

    /// `if` lowers to `executeIf(cond thunk, then thunk, otherwise thunk)`.
    /// Both branches return from their thunk, and only the chosen one is ever invoked.
    pub(crate) fn lower_if(
        &mut self,
        condition: TermId,
        then: TermId,
        otherwise: TermId,
    ) -> Result<String, CompilerError> {
        self.tag_returning(then)?;
        self.tag_returning(otherwise)?;

        let condition = self.lower_expr(condition)?;
        let then = self.lower_statement(then)?;
        let otherwise = self.lower_statement(otherwise)?;

        Ok(format!(
            "{}(() => {}, () => {{{}}}, () => {{{}}})",
            RuntimeHelper::ExecuteIf.qualified(),
            condition,
            then,
            otherwise
        ))
    }
}
