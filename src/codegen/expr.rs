use std::fmt::Write as _;

use crate::{
    ast::{BinaryOperator, CssRule, Expr, LiteralValue, MarkupTag, ParamSpec, UnaryOperator},
    codegen::{
        core::{GenerateResult, Generator},
        utils::{component_binding, js_string},
    },
    error::RuntimeError,
    interpreter::evaluator::function::core::is_builtin,
    util::num::i64_to_f64_checked,
};

impl Generator {
    /// Generates the JavaScript fragment for one node.
    ///
    /// Every fragment is a single JavaScript expression producing a runtime
    /// value, so fragments nest freely. Operands are emitted in the order the
    /// evaluator evaluates them.
    ///
    /// # Example
    /// ```
    /// use nixi::{
    ///     ast::Expr,
    ///     codegen::core::{GenerateOptions, Generator},
    /// };
    ///
    /// let mut generator = Generator::new(GenerateOptions::default());
    /// let call = Expr::Call { callee:    Box::new(Expr::Identifier { name: "length".to_string(),
    ///                                                               line: 1, }),
    ///                         arguments: vec![Expr::text("abc", 1)],
    ///                         line:      1, };
    ///
    /// assert_eq!(generator.generate_expr(&call).unwrap(),
    ///            r#"rt.call(builtins.length, [rt.str("abc")], 1)"#);
    /// ```
    pub fn generate_expr(&mut self, expr: &Expr) -> GenerateResult<String> {
        match expr {
            Expr::Literal { value, line } => Self::generate_literal(value, *line),
            Expr::Identifier { name, line } => Ok(self.generate_identifier(name, *line)),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.generate_binary(left, *op, right, *line),
            Expr::UnaryOp { op, expr, line } => {
                let operand = self.generate_expr(expr)?;
                Ok(match op {
                       UnaryOperator::Negate => format!("rt.negate({operand}, {line})"),
                       UnaryOperator::Not => format!("rt.not({operand})"),
                   })
            },
            Expr::Call { callee,
                         arguments,
                         line, } => {
                let callee = self.generate_expr(callee)?;
                let arguments = self.generate_list(arguments)?;
                Ok(format!("rt.call({callee}, [{arguments}], {line})"))
            },
            Expr::Lambda { params, body, .. } => {
                let function = self.generate_function(params, body)?;
                Ok(format!("rt.closure(null, {function})"))
            },
            Expr::Let { bindings, body, .. } => {
                let depth = self.scopes.len();
                self.indent += 1;
                let pad = "  ".repeat(self.indent);
                let mut code = String::from("(() => {\n");
                for binding in bindings {
                    let value = self.generate_expr(&binding.value)?;
                    let name = self.bind(&binding.name);
                    let _ = writeln!(code, "{pad}const {name} = {value};");
                }
                let body = self.generate_expr(body)?;
                let _ = writeln!(code, "{pad}return {body};");
                self.indent -= 1;
                self.scopes.truncate(depth);
                let _ = write!(code, "{}}})()", "  ".repeat(self.indent));
                Ok(code)
            },
            Expr::Record { entries, .. } => {
                let mut pairs = Vec::with_capacity(entries.len());
                for entry in entries {
                    let value = self.generate_expr(&entry.value)?;
                    pairs.push(format!("[{}, {value}]", js_string(&entry.key)));
                }
                Ok(format!("rt.rec([{}])", pairs.join(", ")))
            },
            Expr::Array { elements, .. } => Ok(format!("rt.arr([{}])", self.generate_list(elements)?)),
            Expr::PropertyAccess { object,
                                   property,
                                   line, } => {
                let object = self.generate_expr(object)?;
                Ok(format!("rt.prop({object}, {}, {line})", js_string(property)))
            },
            Expr::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                let condition = self.generate_expr(condition)?;
                let then_branch = self.generate_expr(then_branch)?;
                let else_branch = self.generate_expr(else_branch)?;
                Ok(format!("(rt.truthy({condition}) ? {then_branch} : {else_branch})"))
            },
            Expr::Component { name, params, body, .. } => {
                // Registered before the body so that the body can refer to
                // the component itself.
                self.components.insert(name.clone());
                let function = self.generate_function(params, body)?;
                Ok(format!("({} = rt.component({}, {function}), rt.nil())",
                           component_binding(name),
                           js_string(name)))
            },
            Expr::Instantiate { component,
                                props,
                                line, } => {
                let component = self.generate_expr(component)?;
                let props = self.generate_expr(props)?;
                Ok(format!("rt.instantiate({component}, {props}, {line})"))
            },
            Expr::StyleDefinition { selector,
                                    properties,
                                    .. } => {
                self.styles.insert(selector.clone());
                let pairs = properties.iter()
                                      .map(|p| format!("[{}, {}]", js_string(&p.name), js_string(&p.value)))
                                      .collect::<Vec<_>>();
                Ok(format!("rt.addStyle({}, [{}])", js_string(selector), pairs.join(", ")))
            },
            Expr::Markup { tag, .. } => self.generate_markup(tag),
            Expr::MarkupComment { text, .. } => Ok(format!("rt.str({})", js_string(text))),
            Expr::StyleRule { rule, .. } => Ok(self.generate_css(std::slice::from_ref(rule))),
            Expr::StyleSheet { rules, .. } => Ok(self.generate_css(rules)),
            Expr::RawCode { code, .. } => {
                if self.options.embed_scripts {
                    Ok(format!("((() => {{\n{code}\n}})(), rt.str({}))", js_string(code)))
                } else {
                    Ok(format!("rt.str({})", js_string(code)))
                }
            },
        }
    }

    fn generate_literal(value: &LiteralValue, line: usize) -> GenerateResult<String> {
        Ok(match value {
               LiteralValue::Integer(n) => {
                   i64_to_f64_checked(*n,
                                      RuntimeError::type_error("integer literal is too large",
                                                               line))?;
                   format!("rt.num({n})")
               },
               LiteralValue::Float(x) => format!("rt.num({x:?})"),
               LiteralValue::Str(s) => format!("rt.str({})", js_string(s)),
               LiteralValue::Bool(b) => format!("rt.bool({b})"),
               LiteralValue::Null => "rt.nil()".to_string(),
           })
    }

    /// Resolves a name in fixed priority: built-in, declared component,
    /// lexical binding, and finally a lookup at run time among components
    /// and top-level assignments.
    ///
    /// A lexical binding named like a component that is only declared later
    /// in the program is still shadowed by that component once it exists, so
    /// the choice is left to the runtime.
    fn generate_identifier(&self, name: &str, line: usize) -> String {
        if let Some(builtin) = is_builtin(name) {
            return format!("builtins.{builtin}");
        }
        if self.components.contains(name) {
            return component_binding(name);
        }
        if let Some(local) = self.resolve_local(name) {
            if self.declared.contains(name) {
                return format!("rt.local({}, {local})", js_string(name));
            }
            return local.to_string();
        }
        format!("rt.lookup({}, {line})", js_string(name))
    }

    fn generate_binary(&mut self,
                       left: &Expr,
                       op: BinaryOperator,
                       right: &Expr,
                       line: usize)
                       -> GenerateResult<String> {
        if op == BinaryOperator::Assign {
            let Expr::Identifier { name, .. } = left else {
                return Err(RuntimeError::InvalidAssignmentTarget { line });
            };
            let value = self.generate_expr(right)?;
            return Ok(format!("rt.assign({}, {value})", js_string(name)));
        }

        let left = self.generate_expr(left)?;
        let right = self.generate_expr(right)?;
        Ok(format!("rt.binary(\"{op}\", {left}, {right}, {line})"))
    }

    /// Emits the `kind, names, body` arguments shared by lambdas and
    /// components. Parameters are bound for the duration of the body.
    fn generate_function(&mut self, params: &ParamSpec, body: &Expr) -> GenerateResult<String> {
        let kind = match params {
            ParamSpec::Positional(_) => "positional",
            ParamSpec::Named(_) => "named",
        };
        let depth = self.scopes.len();
        let quoted = params.names()
                           .iter()
                           .map(|name| js_string(name))
                           .collect::<Vec<_>>();
        let bound = params.names()
                          .iter()
                          .map(|name| self.bind(name))
                          .collect::<Vec<_>>();
        let body = self.generate_expr(body);
        self.scopes.truncate(depth);

        Ok(format!("\"{kind}\", [{}], ({}) => {}",
                   quoted.join(", "),
                   bound.join(", "),
                   body?))
    }

    fn generate_markup(&mut self, tag: &MarkupTag) -> GenerateResult<String> {
        let children = self.generate_list(&tag.children)?;
        Ok(format!("rt.markup({}, [{children}], {})",
                   js_string(&tag.open_tag()),
                   js_string(&tag.close_tag())))
    }

    fn generate_css(&mut self, rules: &[CssRule]) -> String {
        self.styles.extend(rules.iter().map(|rule| rule.selector.clone()));
        let texts = rules.iter()
                         .map(|rule| js_string(&rule.to_string()))
                         .collect::<Vec<_>>();
        format!("rt.addCSS([{}])", texts.join(", "))
    }

    fn generate_list(&mut self, exprs: &[Expr]) -> GenerateResult<String> {
        Ok(exprs.iter()
                .map(|expr| self.generate_expr(expr))
                .collect::<GenerateResult<Vec<_>>>()?
                .join(", "))
    }
}
