use std::fmt::Write as _;

use indexmap::IndexSet;
use log::debug;

use crate::{
    ast::{Expr, Program},
    codegen::{
        runtime::{RUNTIME, RUNTIME_IMPORTS},
        utils::{component_binding, mangle},
    },
    error::RuntimeError,
};

/// Result type used by the generator.
pub type GenerateResult<T> = Result<T, RuntimeError>;

/// Switches for a single compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Prepend the runtime prelude. Without it the output expects `rt`,
    /// `builtins` and `NixiError` to be provided by the embedding page.
    pub include_runtime: bool,
    /// Emit raw code blocks as executable code. When off they are kept as
    /// inert strings, which is also what the evaluator does.
    pub embed_scripts:   bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { include_runtime: true,
               embed_scripts:   false, }
    }
}

/// The output of one compilation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compilation {
    /// The generated JavaScript program.
    pub code:       String,
    /// Modules the generated code loads.
    pub imports:    Vec<String>,
    /// Component names in declaration order.
    pub components: Vec<String>,
    /// Style selectors in registration order, without duplicates.
    pub styles:     Vec<String>,
}

/// Translates a program into JavaScript for a Node host.
///
/// A generator holds the state of exactly one compilation and is consumed by
/// [`Generator::generate`], so separate compilations never share state.
///
/// # Example
/// ```
/// use nixi::{
///     codegen::core::{GenerateOptions, Generator},
///     interpreter::{lexer::tokenize, parser::statement::parse_program},
/// };
///
/// let program = parse_program(&tokenize("component Card = name: name; 1 + 2").unwrap()).unwrap();
/// let compilation = Generator::new(GenerateOptions::default()).generate(&program).unwrap();
///
/// assert_eq!(compilation.components, vec!["Card".to_string()]);
/// assert!(compilation.code.contains("var component_Card;"));
/// assert!(compilation.code.contains(r#"rt.binary("+", rt.num(1), rt.num(2), 1)"#));
/// ```
#[derive(Debug, Default)]
pub struct Generator {
    pub(super) options:    GenerateOptions,
    pub(super) imports:    IndexSet<String>,
    pub(super) components: IndexSet<String>,
    /// Every component the program declares, including those declared
    /// after the point currently being generated.
    pub(super) declared:   IndexSet<String>,
    pub(super) styles:     IndexSet<String>,
    /// Lexically bound names and the JavaScript names they were emitted
    /// under, innermost last.
    pub(super) scopes:     Vec<(String, String)>,
    pub(super) counter:    usize,
    pub(super) indent:     usize,
}

impl Generator {
    /// Creates a generator for one compilation.
    #[must_use]
    pub fn new(options: GenerateOptions) -> Self {
        Self { options,
               ..Self::default() }
    }

    /// Generates the program.
    ///
    /// Every top-level statement becomes one assignment to the program
    /// result, in source order; the final result's display form is printed
    /// when the program finishes. A runtime error stops the program and is
    /// printed to standard error with a failing exit status.
    ///
    /// # Errors
    /// A `RuntimeError` for nodes that cannot be translated: an integer
    /// literal beyond the exact range of a number, or an assignment to
    /// something other than a name.
    pub fn generate(mut self, program: &Program) -> GenerateResult<Compilation> {
        self.declared = program.statements
                               .iter()
                               .filter_map(|statement| match statement {
                                   Expr::Component { name, .. } => Some(name.clone()),
                                   _ => None,
                               })
                               .collect();

        let mut body = String::new();
        for statement in &program.statements {
            let fragment = self.generate_expr(statement)?;
            let _ = writeln!(body, "  __result = {fragment};");
        }

        let mut code = String::new();
        if self.options.include_runtime {
            code.push_str(RUNTIME);
            self.imports.extend(RUNTIME_IMPORTS.iter().map(ToString::to_string));
        }
        if !self.components.is_empty() {
            let bindings = self.components
                               .iter()
                               .map(|name| component_binding(name))
                               .collect::<Vec<_>>();
            let _ = writeln!(code, "var {};", bindings.join(", "));
        }
        code.push_str("let __result = rt.nil();\ntry {\n");
        code.push_str(&body);
        code.push_str("  console.log(__result.toString());\n");
        code.push_str("} catch (error) {\n");
        code.push_str("  if (!(error instanceof NixiError)) throw error;\n");
        code.push_str("  console.error(error.message);\n");
        code.push_str("  process.exitCode = 1;\n}\n");

        debug!("generated {} bytes for {} statement(s)",
               code.len(),
               program.statements.len());

        Ok(Compilation { code,
                         imports: self.imports.into_iter().collect(),
                         components: self.components.into_iter().collect(),
                         styles: self.styles.into_iter().collect() })
    }

    /// Binds a source name in the innermost scope under a fresh JavaScript
    /// name and returns that name.
    pub(super) fn bind(&mut self, name: &str) -> String {
        self.counter += 1;
        let js = format!("v_{}_{}", mangle(name), self.counter);
        self.scopes.push((name.to_string(), js.clone()));
        js
    }

    /// The JavaScript name a lexically bound source name was emitted under.
    pub(super) fn resolve_local(&self, name: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .find(|(source, _)| source == name)
            .map(|(_, js)| js.as_str())
    }
}
