use std::{fs, process::Command};

use nixi::{
    codegen::core::{Compilation, GenerateOptions},
    compile_source,
    error::{Error, ParseError},
    evaluate_source,
};

fn compile(src: &str) -> Compilation {
    let options = GenerateOptions { include_runtime: false,
                                    ..GenerateOptions::default() };
    compile_source(src, "<test>", options).unwrap_or_else(|e| panic!("Compilation failed: {e}"))
}

fn statement(src: &str) -> String {
    let code = compile(src).code;
    code.lines()
        .find_map(|line| line.trim().strip_prefix("__result = "))
        .and_then(|line| line.strip_suffix(';'))
        .unwrap_or_else(|| panic!("no statement in:\n{code}"))
        .to_string()
}

#[test]
fn literals_and_operators() {
    assert_eq!(statement("1 + 2"), r#"rt.binary("+", rt.num(1), rt.num(2), 1)"#);
    assert_eq!(statement("2.5"), "rt.num(2.5)");
    assert_eq!(statement(r#""say \"hi\"""#), r#"rt.str("say \"hi\"")"#);
    assert_eq!(statement("true"), "rt.bool(true)");
    assert_eq!(statement("null"), "rt.nil()");
    assert_eq!(statement("-x"), r#"rt.negate(rt.lookup("x", 1), 1)"#);
    assert_eq!(statement("!x"), r#"rt.not(rt.lookup("x", 1))"#);
    assert_eq!(statement("m && n"),
               r#"rt.binary("&&", rt.lookup("m", 1), rt.lookup("n", 1), 1)"#);
}

#[test]
fn identifiers_resolve_builtins_then_components_then_locals() {
    assert_eq!(statement("length"), "builtins.length");

    let code = compile("component Card = x: x\nCard").code;
    assert!(code.contains("__result = component_Card;"));

    let code = compile("let card-title = 1; in card-title").code;
    assert!(code.contains("const v_card$title_1 = rt.num(1);"));
    assert!(code.contains("return v_card$title_1;"));

    assert_eq!(statement("other"), r#"rt.lookup("other", 1)"#);
}

#[test]
fn lambdas_bind_parameters_lexically() {
    assert_eq!(statement("x: x"),
               r#"rt.closure(null, "positional", ["x"], (v_x_1) => v_x_1)"#);
    assert_eq!(statement("{ k, v }: v"),
               r#"rt.closure(null, "named", ["k", "v"], (v_k_1, v_v_2) => v_v_2)"#);

    // A component declared later may still shadow the parameter at run time.
    let code = compile("f = Card: Card + 1\ncomponent Card = x: x\nf 1").code;
    assert!(code.contains(r#"(v_Card_1) => rt.binary("+", rt.local("Card", v_Card_1), rt.num(1), 1)"#));
    assert!(code.contains("(v_x_2) => v_x_2"));

    // Outside the lambda the name is no longer bound.
    let code = compile("(x: x)\nx").code;
    assert!(code.contains(r#"__result = rt.lookup("x", 2);"#));
}

#[test]
fn calls_records_and_arrays() {
    assert_eq!(statement("f 1 2"),
               r#"rt.call(rt.lookup("f", 1), [rt.num(1), rt.num(2)], 1)"#);
    assert_eq!(statement("{ a: 1 }.a"),
               r#"rt.prop(rt.rec([["a", rt.num(1)]]), "a", 1)"#);
    assert_eq!(statement("[1, 2]"), "rt.arr([rt.num(1), rt.num(2)])");
    assert_eq!(statement("if (c) then 1 else 2"),
               r#"(rt.truthy(rt.lookup("c", 1)) ? rt.num(1) : rt.num(2))"#);
    assert_eq!(statement("x = 5"), r#"rt.assign("x", rt.num(5))"#);
}

#[test]
fn components_are_declared_up_front() {
    let compilation = compile("component Greet = name: \"Hello \" + name\nGreet { name: \"World\" }");

    assert_eq!(compilation.components, vec!["Greet".to_string()]);
    assert!(compilation.code.contains("var component_Greet;"));
    assert!(compilation.code
                       .contains(r#"(component_Greet = rt.component("Greet", "positional", ["name"], (v_name_1) => rt.binary("+", rt.str("Hello "), v_name_1, 1)), rt.nil())"#));
    assert!(compilation.code
                       .contains(r#"rt.instantiate(component_Greet, rt.rec([["name", rt.str("World")]]), 2)"#));
}

#[test]
fn styles_and_markup() {
    let compilation = compile(r#"style ".card" { color: "red"; }
body{ margin: 0 }
<p class="x">Hi (name)</p>"#);

    assert_eq!(compilation.styles, vec![".card".to_string(), "body".to_string()]);
    assert!(compilation.code
                       .contains(r#"rt.addStyle(".card", [["color", "red"]])"#));
    assert!(compilation.code
                       .contains(r#"rt.addCSS(["body {\n  margin: 0;\n}"])"#));
    assert!(compilation.code
                       .contains(r#"rt.markup("<p class=\"x\">", [rt.str("Hi "), rt.lookup("name", 3)], "</p>")"#));
}

#[test]
fn script_blocks_run_only_when_embedded() {
    let src = "js <script>console.log(1)</script>";
    assert_eq!(statement(src), r#"rt.str("console.log(1)")"#);

    let options = GenerateOptions { include_runtime: false,
                                    embed_scripts:   true, };
    let code = compile_source(src, "<test>", options).unwrap().code;
    assert!(code.contains("((() => {\nconsole.log(1)\n})(), rt.str(\"console.log(1)\"))"));
}

#[test]
fn runtime_prelude_is_optional() {
    let bare = compile("1");
    assert!(bare.imports.is_empty());
    assert!(!bare.code.contains("class NixiError"));

    let full = compile_source("1", "<test>", GenerateOptions::default()).unwrap();
    assert!(full.code.starts_with("'use strict';"));
    assert!(full.code.contains("class NixiError"));
    assert_eq!(full.imports, vec!["fs", "path", "./gui-renderer"]);
}

#[test]
fn compilations_do_not_share_state() {
    let first = compile("component A = x: x\nstyle \".a\" { top: \"0\"; }");
    let second = compile("1");

    assert_eq!(first.components, vec!["A".to_string()]);
    assert!(second.components.is_empty());
    assert!(second.styles.is_empty());
}

#[test]
fn generation_reports_source_errors() {
    let error = compile_source("let = 1", "page.nixi", GenerateOptions::default()).unwrap_err();
    assert_eq!(error.unit, "page.nixi");
    assert!(matches!(error.error, Error::Parse(ParseError::UnexpectedToken { .. })));
}

fn node_available() -> bool {
    Command::new("node").arg("--version")
                        .output()
                        .is_ok_and(|output| output.status.success())
}

/// Runs the same programs through both backends and compares what they print.
#[test]
fn backends_agree() {
    if !node_available() {
        eprintln!("skipping backends_agree: no node executable on PATH");
        return;
    }

    let programs = ["let x = 5; in x + 10",
                    r#""a" + 1"#,
                    r#"1 + "a""#,
                    "1 - \"a\"",
                    "component Greet = name: \"Hello \" + name\nGreet { name: \"World\" }",
                    r#"<div class="card">Hi</div>"#,
                    "map(x: x, 5)",
                    "map(x: x * 2, [1, 2, 3])",
                    "let add2 = x: y: x + y; in add2 2 3",
                    "{ a: 1, b: [true, null] }",
                    "if (\"\") then 1 else 0.5",
                    "0.1 + 0.2",
                    "1 / 0",
                    "length \"héllo\"",
                    "false && missing",
                    r#"concat("a")"#,
                    "f = Card: Card + 1\ncomponent Card = x: x\nf 1",
                    "f = Card: Card + 1\nf 1",
                    "let Card = 2; in Card",
                    "9007199254740991 * 128",
                    "toString (9007199254740991 * 128)",
                    "\"a\u{1b}\" + \"\\n\"",
                    "[\"q\\\"\", \"\u{8}\"]",
                    "<div><p>x</div>",
                    "<div>hi"];
    let dir = tempfile::tempdir().unwrap();

    for (i, src) in programs.iter().enumerate() {
        let expected = match evaluate_source(src, "<parity>") {
            Ok(value) => value.to_string(),
            Err(e) => e.error.to_string(),
        };

        let script = dir.path().join(format!("program{i}.js"));
        fs::write(&script, compile_source(src, "<parity>", GenerateOptions::default()).unwrap().code).unwrap();
        let output = Command::new("node").arg(&script).output().unwrap();
        let printed = if output.status.success() {
            String::from_utf8_lossy(&output.stdout).trim_end().to_string()
        } else {
            String::from_utf8_lossy(&output.stderr).trim_end().to_string()
        };

        assert_eq!(printed, expected, "backends disagree on {src:?}");
    }
}
