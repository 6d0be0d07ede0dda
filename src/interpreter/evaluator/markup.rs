use crate::{
    ast::MarkupTag,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Value, environment::Environment},
    },
};

impl Context {
    /// Evaluates a markup element to a string.
    ///
    /// Children are evaluated in order and their native textual forms are
    /// concatenated between the opening and closing spans. Attributes are
    /// written as they appeared in the source; a bare attribute stays a bare
    /// name.
    ///
    /// # Example
    /// ```
    /// use nixi::interpreter::{
    ///     evaluator::core::Context, lexer::tokenize, parser::statement::parse_program,
    ///     value::core::Value,
    /// };
    ///
    /// let program = parse_program(&tokenize(r#"<p class="x">Total: (1 + 2)</p>"#).unwrap()).unwrap();
    /// let value = Context::new().eval_program(&program).unwrap();
    ///
    /// assert_eq!(value, Value::from(r#"<p class="x">Total: 3</p>"#));
    /// ```
    pub(crate) fn eval_markup(&mut self, tag: &MarkupTag, env: &Environment) -> EvalResult<Value> {
        let mut out = tag.open_tag();
        for child in &tag.children {
            out.push_str(&self.eval(child, env)?.to_native_string());
        }
        out.push_str(&tag.close_tag());
        Ok(Value::Str(out))
    }
}
