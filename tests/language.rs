use std::fs::{self};

use nixi::{
    error::{Error, ParseError, RuntimeError},
    evaluate_source, get_result,
    interpreter::{evaluator::core::Context, value::core::Value},
};
use walkdir::WalkDir;

#[test]
fn readme_examples_work() {
    let content = fs::read_to_string("README.md").unwrap_or_else(|e| panic!("Failed to read README.md: {e}"));
    let mut count = 0;

    for (i, code) in extract_dsl_blocks(&content).into_iter().enumerate() {
        count += 1;
        if let Err(e) = evaluate_source(&code, "README.md") {
            panic!("DSL example {} in README.md failed:\n{}\nError: {}", i + 1, code, e);
        }
    }

    assert!(count > 0, "No DSL examples found in README.md");
}

#[test]
fn demo_programs_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "nixi"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        count += 1;
        if let Err(e) = evaluate_source(&content, &path.display().to_string()) {
            panic!("Demo {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No demo programs found in demos/");
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```nixi") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn eval(src: &str) -> Value {
    evaluate_source(src, "<test>").unwrap_or_else(|e| panic!("Script failed: {e}"))
}

fn assert_eval(src: &str, expected: impl Into<Value>) {
    assert_eq!(eval(src), expected.into(), "while evaluating {src:?}");
}

fn assert_success(src: &str) {
    if let Err(e) = evaluate_source(src, "<test>") {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) -> Error {
    match evaluate_source(src, "<test>") {
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail"),
        Err(e) => e.error,
    }
}

fn assert_type_error(src: &str) -> String {
    match assert_failure(src) {
        Error::Runtime(RuntimeError::TypeError { details, .. }) => details,
        other => panic!("Expected a type error from {src:?}, got {other}"),
    }
}

#[test]
fn let_bindings_are_sequential() {
    assert_eval("let x = 5; in x + 10", 15.0);
    assert_eval("let u = 1; w = u + 1; in u + w", 3.0);
    assert_eval("let u = 1 w = 2 in u * w", 2.0);
    assert_eval("let x = 1; in let x = x + 1; in x", 2.0);
}

#[test]
fn arithmetic_and_precedence() {
    assert_eval("1 + 2 * 3", 7.0);
    assert_eval("(1 + 2) * 3", 9.0);
    assert_eval("10 / 4", 2.5);
    assert_eval("7 - 2 - 1", 4.0);
    assert_eval("-3 + 5", 2.0);
    assert_eval("-(2 + 3)", -5.0);
    assert_eval("1.5 + 1.5", 3.0);
}

#[test]
fn division_by_zero_is_infinite() {
    assert_eval("1 / 0", f64::INFINITY);
    assert_eval("toString (0 - 1 / 0)", "-Infinity");
}

#[test]
fn large_integers_print_shortest_digits() {
    assert_eval("toString (9007199254740991 * 128)", "1152921504606846800");
    assert_eq!(eval("9007199254740991 * 128").to_string(), "1152921504606846800");
    assert_eq!(eval("2 * 0.5").to_string(), "1");
}

#[test]
fn display_forms_quote_strings_like_json() {
    assert_eq!(Value::from("a\u{1b}\"\\\n\u{8}").to_string(), r#""a\u001b\"\\\n\b""#);
    assert_eq!(Value::from("héllo").to_string(), r#""héllo""#);
    assert_eq!(eval(r#"{ k: "v", n: [1, null] }"#).to_string(), r#"{ k = "v", n = [1, null] }"#);
}

#[test]
fn plus_concatenates_when_either_side_is_a_string() {
    assert_eval(r#""a" + 1"#, "a1");
    assert_eval(r#"1 + "a""#, "1a");
    assert_eval(r#""n: " + null"#, "n: null");
    assert_eval(r#""list: " + [1, 2]"#, "list: 1,2");
    assert_eval(r#""x" + true"#, "xtrue");
}

#[test]
fn arithmetic_on_strings_is_a_type_error() {
    let details = assert_type_error(r#"1 - "a""#);
    assert_eq!(details, "invalid operands for -: number and string");

    assert_type_error(r#""a" * 2"#);
    assert_type_error("[1] + [2]");
    assert_type_error(r#"-"a""#);
}

#[test]
fn comparisons() {
    assert_eval("1 < 2", true);
    assert_eval("2 <= 2", true);
    assert_eval("3 > 4", false);
    assert_eval("3 >= 4", false);
    assert_eval("1 == 1.0", true);
    assert_eval(r#""1" == 1"#, false);
    assert_eval(r#""a" != "b""#, true);
    assert_eval("[1, 2] == [1, 2]", true);
    assert_eval("{ a: 1 } == { a: 1 }", true);
    assert_eval("null == null", true);
    assert_eval("map == map", true);

    assert_type_error(r#""a" < "b""#);
}

#[test]
fn logic_uses_truthiness_and_evaluates_both_sides() {
    assert_eval("true && false", false);
    assert_eval(r#"0 || "x""#, true);
    assert_eval(r#""" || 0"#, false);
    assert_eval("!0", true);
    assert_eval("!!5", true);
    assert_eval("![]", false);

    // Both operands are always evaluated.
    assert!(matches!(assert_failure("false && missing"),
                     Error::Runtime(RuntimeError::UnknownVariable { .. })));
    assert!(matches!(assert_failure("true || missing"),
                     Error::Runtime(RuntimeError::UnknownVariable { .. })));
}

#[test]
fn conditionals() {
    assert_eval(r#"if (1 < 2) then "yes" else "no""#, "yes");
    assert_eval("if (0) then 1 else 2", 2.0);
    assert_eval(r#"if ("") then 1 else 2"#, 2.0);
    assert_eval("if ([]) then 1 else 2", 1.0);
    assert_eval("let n = 3; in if (n > 2) then n * 10 else n", 30.0);
}

#[test]
fn lambdas_and_currying() {
    assert_eval("let add2 = x: y: x + y; in add2 2 3", 5.0);
    assert_eval("let add2 = x: y: x + y; inc = add2 1; in inc 41", 42.0);
    assert_eval("(x: x * x)(7)", 49.0);
    assert_eval("let f = x: x; in f()", Value::Null);
    assert_eval("let pick = { k, v }: v; in pick { k: 1, v: 2 }", 2.0);
    assert_eval("let pick = { k, v }: v; in pick { k: 1 }", Value::Null);
}

#[test]
fn closures_capture_their_definition_scope() {
    assert_eval("let x = 1; f = y: x + y; in let x = 100; in f 1", 2.0);
    assert_eval("let make = n: x: x + n; add5 = make 5; in add5 10", 15.0);
}

#[test]
fn bad_calls_are_errors() {
    assert!(matches!(assert_failure("let f = x: x; in f(1, 2)"),
                     Error::Runtime(RuntimeError::ArgumentCountMismatch { found: 2, .. })));
    assert!(matches!(assert_failure("let n = 5; in n(1)"),
                     Error::Runtime(RuntimeError::NotCallable { .. })));

    let details = assert_type_error("let f = { k }: k; in f(1)");
    assert!(details.contains("expects a record argument"));

    match assert_failure(r#"concat("a")"#) {
        Error::Runtime(e @ RuntimeError::ArgumentCountMismatch { .. }) => {
            assert_eq!(e.to_string(),
                       "Error on line 1: 'concat' expects 2 argument(s), got 1.");
        },
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn records_and_property_access() {
    assert_eval(r#"let r = { a: 1, b: "two" }; in r.b"#, "two");
    assert_eval("{ a: 1 }.b", Value::Null);
    assert_eval("{ a: 1, a: 2 }.a", 2.0);
    assert_eval("let r = { inner: { depth = 3 } }; in r.inner.depth", 3.0);
    assert_eq!(eval(r#"{ name: "nixi", tags: [1, true] }"#).to_string(),
               r#"{ name = "nixi", tags = [1, true] }"#);

    assert_type_error("let n = 5; in n.a");
}

#[test]
fn arrays_and_collection_builtins() {
    assert_eq!(eval("[1, 2, 3]").to_string(), "[1, 2, 3]");
    assert_eval("length [1, 2, 3]", 3.0);
    assert_eval(r#"length "héllo""#, 5.0);
    assert_eq!(eval("map(x: x * 2, [1, 2, 3])").to_string(), "[2, 4, 6]");
    assert_eq!(eval("let double = x: x * 2; in map double [1, 2]").to_string(),
               "[2, 4]");
}

#[test]
fn map_rejects_a_non_array() {
    let details = assert_type_error("map(x: x, 5)");
    assert_eq!(details, "map expects an array as second argument, got number");

    let details = assert_type_error("map(5, [1])");
    assert_eq!(details, "map expects a function as first argument, got number");
}

#[test]
fn builtin_functions() {
    assert_eval("add(2, 3)", 5.0);
    assert_eval("subtract 10 4", 6.0);
    assert_eval("multiply(6, 7)", 42.0);
    assert_eval("divide(9, 2)", 4.5);
    assert_eval(r#"add("a", 1)"#, "a1");
    assert_eval(r#"concat("a", 1)"#, "a1");
    assert_eval("toString 42", "42");
    assert_eval("toString [1, 2]", "1,2");
    assert_eval("toString 0.1", "0.1");
    assert_eval(r#"echo "hello" 5"#, Value::Null);

    assert_type_error(r#"multiply("a", 2)"#);
}

#[test]
fn assignment_persists_between_statements() {
    assert_eval("x = 5; x * 2", 10.0);
    assert_eval("m = n = 3; m + n", 6.0);

    let mut context = Context::new();
    get_result(&mut context, "total = 40", "<repl>").unwrap();
    assert_eq!(get_result(&mut context, "total + 2", "<repl>").unwrap(),
               Value::Number(42.0));
}

#[test]
fn components() {
    assert_eval("component Greet = name: \"Hello \" + name\nGreet { name: \"World\" }",
                "Hello World");
    assert_eval("component Greet = name: \"Hello \" + name\nGreet { name = \"World\" }",
                "Hello World");
    assert_eval("component Pair = left right: left + \"/\" + right\nPair { right: \"b\", left: \"a\" }",
                "a/b");
    assert_eval("component Card = { heading }: <div class=\"card\">(heading)</div>\nCard { heading: \"Hi\" }",
                r#"<div class="card">Hi</div>"#);
}

#[test]
fn components_receive_the_record_when_keys_do_not_match() {
    assert_eval("component Show = props: props.msg\nShow { msg: \"kept\" }", "kept");
    assert_eval("component Both = k v: v\nBoth { k: 1 }", Value::Null);
}

#[test]
fn components_shadow_parameters_once_declared() {
    // The parameter is shadowed by a component declared after the lambda.
    let details = assert_type_error("f = Card: Card + 1\ncomponent Card = x: x\nf 1");
    assert!(details.starts_with("invalid operands for +"), "{details}");

    assert_eval("f = Card: Card + 1\nf 1", 2.0);
}

#[test]
fn markup_evaluates_to_text() {
    assert_eval(r#"<div class="card">Hi</div>"#, r#"<div class="card">Hi</div>"#);
    assert_eval(r#"<p class="x">Total: (1 + 2)</p>"#, r#"<p class="x">Total: 3</p>"#);
    assert_eval("<p>Hello world</p>", "<p>Hello world</p>");
    assert_eval("<ul><li>One</li><li>Two</li></ul>", "<ul><li>One</li><li>Two</li></ul>");
    assert_eval("<div><div>in</div></div>", "<div><div>in</div></div>");
    assert_eval("<br/>", "<br />");
    assert_eval(r#"<img src="a.png">"#, r#"<img src="a.png" />"#);
    assert_eval("<input disabled/>", "<input disabled />");
    assert_eval("<div><!-- note --></div>", "<div><!-- note --></div>");
    assert_eval(r#"let who = "you"; in <p>Hi (who)</p>"#, "<p>Hi you</p>");
}

#[test]
fn elements_end_at_a_foreign_closing_tag_or_the_end_of_input() {
    assert_eval("<div>hi", "<div>hi</div>");
    assert_eval("<div><p>x</div>", "<div><p>x</p></div>");
    assert_eval("<ul><li>One<li>Two</ul>", "<ul><li>One<li>Two</li></li></ul>");

    // A closing span nothing is left to match is not markup on its own.
    assert!(matches!(assert_failure("<div></span>"),
                     Error::Parse(ParseError::InvalidMarkup { .. })));
}

#[test]
fn elements_are_structural_values() {
    assert_eval("(div { text: \"hi\" }).type", "div");
    assert_eval("(p { text: \"hi\" }).props.text", "hi");
    match eval("span().props") {
        Value::Record(props) => assert!(props.is_empty()),
        other => panic!("expected a record, got {other}"),
    }
}

#[test]
fn render_html_uses_registered_styles() {
    let page = eval(r#"style ".card" { color: "red"; padding: "4px"; }
renderHTML(p { text: "Hello" }, "Page")"#);
    let Value::Str(page) = page else {
        panic!("renderHTML should return a string");
    };

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>Page</title>"));
    assert!(page.contains(".card {\n  color: red;\n  padding: 4px;\n}"));
    assert!(page.contains("<p>Hello</p>"));
}

#[test]
fn style_rules_and_sheets_register_css() {
    let mut context = Context::new();
    get_result(&mut context, r#"addStyle(".btn", { color: "blue" })"#, "<test>").unwrap();
    get_result(&mut context, "body{ margin: 0; }", "<test>").unwrap();
    get_result(&mut context, "css{ .a { color: red; } .b { top: 1px } }", "<test>").unwrap();

    let page = get_result(&mut context, r#"renderHTML("<b>x</b>", "T")"#, "<test>").unwrap();
    let Value::Str(page) = page else {
        panic!("renderHTML should return a string");
    };
    assert!(page.contains(".btn {\n  color: blue;\n}"));
    assert!(page.contains("body {\n  margin: 0;\n}"));
    assert!(page.contains(".a {\n  color: red;\n}"));
    assert!(page.contains(".b {\n  top: 1px;\n}"));
    assert!(page.contains("<b>x</b>"));
}

#[test]
fn script_blocks_stay_inert() {
    assert_eval("js <script>console.log(1)</script>", "console.log(1)");
}

#[test]
fn comments_and_empty_programs() {
    assert_eval("# a comment\n1 + 1", 2.0);
    assert_eval("", Value::Null);
    assert_eval("# only a comment", Value::Null);
}

#[test]
fn unknown_variable_is_error() {
    match assert_failure("y + 1") {
        Error::Runtime(RuntimeError::UnknownVariable { name, line }) => {
            assert_eq!(name, "y");
            assert_eq!(line, 1);
        },
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn rebinding_a_builtin_is_error() {
    assert!(matches!(assert_failure("let echo = 1; in echo"),
                     Error::Parse(ParseError::IdentifierReserved { .. })));
    assert!(matches!(assert_failure("map = 1"),
                     Error::Parse(ParseError::IdentifierReserved { .. })));
    assert!(matches!(assert_failure("component div = x: x"),
                     Error::Parse(ParseError::IdentifierReserved { .. })));
    assert!(matches!(assert_failure("1 = 2"),
                     Error::Parse(ParseError::InvalidAssignmentTarget { .. })));
}

#[test]
fn errors_name_the_source_unit() {
    let error = evaluate_source("1 @ 2", "page.nixi").unwrap_err();
    assert_eq!(error.to_string(),
               "page.nixi:Error on line 1, column 3: Unexpected character: @.");

    let error = evaluate_source("\n\nmissing", "page.nixi").unwrap_err();
    assert!(error.is_runtime());
    assert_eq!(error.to_string(),
               "page.nixi:Error on line 3: Unknown variable 'missing'.");
}

#[test]
fn multi_statement_programs_succeed() {
    assert_success(r#"
component Item = { label_text }: <li>(label_text)</li>
items = map(t: Item { label_text: t }, ["a", "b"])
<ul>(items)</ul>
"#);
}
