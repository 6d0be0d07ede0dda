use nixi::{
    ast::{AttrValue, Attribute, BinaryOperator, Expr, LiteralValue, MarkupTag, ParamSpec, Program},
    error::{Error, ParseError},
    parse_source,
};

fn parse(src: &str) -> Program {
    parse_source(src, "<test>").unwrap_or_else(|e| panic!("Parsing failed: {e}"))
}

fn parse_one(src: &str) -> Expr {
    let mut program = parse(src);
    assert_eq!(program.statements.len(), 1, "expected one statement in {src:?}");
    program.statements.remove(0)
}

fn parse_error(src: &str) -> ParseError {
    match parse_source(src, "<test>") {
        Ok(program) => panic!("{src:?} parsed to {program:?} but was expected to fail"),
        Err(e) => match e.error {
            Error::Parse(error) => error,
            other => panic!("expected a parse error from {src:?}, got {other}"),
        },
    }
}

fn ident(name: &str) -> Expr {
    Expr::Identifier { name: name.to_string(),
                       line: 1, }
}

fn int(n: i64) -> Expr {
    Expr::Literal { value: LiteralValue::Integer(n),
                    line:  1, }
}

#[test]
fn empty_and_single_literal_programs() {
    assert!(parse("").statements.is_empty());
    assert!(parse("  # nothing here\n").statements.is_empty());
    assert_eq!(parse_one("42"), int(42));
}

#[test]
fn precedence_climbs_from_assignment_to_call() {
    let Expr::BinaryOp { op, right, .. } = parse_one("1 + 2 * 3") else {
        panic!("expected a binary operation");
    };
    assert_eq!(op, BinaryOperator::Add);
    assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::Mul, .. }));

    let Expr::BinaryOp { op, left, .. } = parse_one("a || b && c") else {
        panic!("expected a binary operation");
    };
    assert_eq!(op, BinaryOperator::Or);
    assert_eq!(*left, ident("a"));

    assert_eq!(parse_one("7 - 2 - 1").to_string(), "((7 - 2) - 1)");
    assert_eq!(parse_one("m = n = 1").to_string(), "(m = (n = 1))");
}

#[test]
fn juxtaposition_calls_stay_on_one_line() {
    assert_eq!(parse_one(r#"echo "hello" 5"#),
               Expr::Call { callee:    Box::new(ident("echo")),
                            arguments: vec![Expr::text("hello", 1), int(5)],
                            line:      1, });

    let program = parse("f\nx");
    assert_eq!(program.statements, vec![ident("f"),
                                        Expr::Identifier { name: "x".to_string(),
                                                           line: 2, }]);

    // A literal never acts as a callee.
    assert_eq!(parse("1 2").statements.len(), 2);
    assert_eq!(parse_one("f (x) y").to_string(), "f(x)(y)");
}

#[test]
fn lambdas_and_params() {
    let Expr::Lambda { params, body, .. } = parse_one("x: y: x + y") else {
        panic!("expected a lambda");
    };
    assert_eq!(params, ParamSpec::Positional(vec!["x".to_string()]));
    assert!(matches!(body.as_ref(), Expr::Lambda { .. }));

    let Expr::Lambda { params, .. } = parse_one("{ k, v }: k") else {
        panic!("expected a lambda");
    };
    assert_eq!(params, ParamSpec::Named(vec!["k".to_string(), "v".to_string()]));

    assert!(matches!(parse_one("{ a: 1 }"), Expr::Record { .. }));
    assert!(matches!(parse_one("{}"), Expr::Record { .. }));
}

#[test]
fn let_expressions() {
    let Expr::Let { bindings, body, .. } = parse_one("let k = 1; v = k; in v") else {
        panic!("expected a let expression");
    };
    assert_eq!(bindings.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
               vec!["k", "v"]);
    assert_eq!(*body, ident("v"));

    assert!(matches!(parse_error("let k = 1"),
                     ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("let 5 = 1 in 2"),
                     ParseError::UnexpectedToken { .. }));
}

#[test]
fn conditionals_need_both_branches() {
    assert!(matches!(parse_one("if (a) then 1 else 2"), Expr::Conditional { .. }));
    assert!(matches!(parse_error("if (a) then 1"),
                     ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("if a then 1 else 2"),
                     ParseError::UnexpectedToken { .. }));
}

#[test]
fn component_definitions_and_instantiation() {
    let Expr::Component { name, params, .. } = parse_one("component Card = title_text body_text: title_text")
    else {
        panic!("expected a component");
    };
    assert_eq!(name, "Card");
    assert_eq!(params.names(), ["title_text", "body_text"]);

    assert!(matches!(parse_one("component Empty = : 1"),
                     Expr::Component { params: ParamSpec::Positional(ref names), .. } if names.is_empty()));
    assert!(matches!(parse_one("Card { a: 1 }"), Expr::Instantiate { .. }));
}

#[test]
fn brace_right_after_a_word_is_a_style_rule() {
    let Expr::StyleRule { rule, .. } = parse_one("card{ color: red }") else {
        panic!("expected a style rule");
    };
    assert_eq!(rule.selector, "card");
    assert_eq!(rule.properties[0].to_string(), "color: red;");

    assert!(matches!(parse_one("nav{ display: flex; }"), Expr::StyleRule { .. }));
}

#[test]
fn style_definitions() {
    let Expr::StyleDefinition { selector,
                                properties,
                                .. } = parse_one(r#"style ".card" { color: "red"; -webkit-appearance: "none" }"#)
    else {
        panic!("expected a style definition");
    };
    assert_eq!(selector, ".card");
    assert_eq!(properties.len(), 2);
    assert_eq!(properties[1].name, "-webkit-appearance");

    assert!(matches!(parse_error(r#"style ".card" { color: red; }"#),
                     ParseError::UnexpectedToken { .. }));
}

#[test]
fn style_sheets() {
    let Expr::StyleSheet { rules, .. } = parse_one("css{ .a { color: red; } .b, .c { top: 0 } }") else {
        panic!("expected a style sheet");
    };
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[1].selector, ".b, .c");

    assert!(matches!(parse_error("[]{ dangling }"), ParseError::InvalidStyleRule { .. }));
    assert!(matches!(parse_error("[]{ .a { color: red } extra }"),
                     ParseError::InvalidStyleRule { .. }));
    assert!(matches!(parse_error("x = css{ .a { top: 0 } }"),
                     ParseError::UnexpectedToken { .. }));
}

#[test]
fn markup_tag_structure() {
    let Expr::Markup { tag, .. } = parse_one(r#"<div class="card">Hi</div>"#) else {
        panic!("expected markup");
    };
    assert_eq!(tag,
               MarkupTag { name:         "div".to_string(),
                           attributes:   vec![Attribute { name:  "class".to_string(),
                                                          value: AttrValue::Text("card".to_string()), }],
                           children:     vec![Expr::text("Hi", 1)],
                           self_closing: false, });
}

#[test]
fn markup_children() {
    let Expr::Markup { tag, .. } = parse_one("<p>Sum: (1 + 2) <b>bold</b><!-- c --></p>") else {
        panic!("expected markup");
    };
    assert_eq!(tag.children.len(), 4);
    assert_eq!(tag.children[0], Expr::text("Sum: ", 1));
    assert!(matches!(tag.children[1], Expr::BinaryOp { .. }));
    assert!(matches!(&tag.children[2], Expr::Markup { tag, .. } if tag.name == "b"));
    assert!(matches!(tag.children[3], Expr::MarkupComment { .. }));

    let Expr::Markup { tag, .. } = parse_one("<div><div>in</div> out</div>") else {
        panic!("expected markup");
    };
    assert_eq!(tag.children.len(), 2);
    assert_eq!(tag.children[1], Expr::text(" out", 1));
}

#[test]
fn unmatched_closing_spans_end_the_open_element() {
    let Expr::Markup { tag, .. } = parse_one("<div><p>x</div>") else {
        panic!("expected markup");
    };
    assert_eq!(tag.children.len(), 1);
    assert!(matches!(&tag.children[0], Expr::Markup { tag, .. }
                                       if tag.name == "p" && tag.children == vec![Expr::text("x", 1)]));

    let Expr::Markup { tag, .. } = parse_one("<section>") else {
        panic!("expected markup");
    };
    assert_eq!(tag.name, "section");
    assert!(tag.children.is_empty());

    // The stray span is left over and cannot start a statement.
    assert!(matches!(parse_error("<b>x</i>"), ParseError::InvalidMarkup { .. }));
    assert!(matches!(parse_error("</div>"), ParseError::InvalidMarkup { .. }));
}

#[test]
fn documents() {
    let Expr::Markup { tag, .. } = parse_one("html <head></head> <body></body>") else {
        panic!("expected an html document");
    };
    assert_eq!(tag.name, "html");
    assert_eq!(tag.children.len(), 2);

    assert_eq!(parse_one("js <script>run()</script>"),
               Expr::RawCode { code: "run()".to_string(),
                               line: 1, });
    assert!(matches!(parse_error("js 1"), ParseError::UnexpectedToken { .. }));
}

#[test]
fn reserved_names() {
    assert_eq!(parse_error("let map = 1; in map"),
               ParseError::IdentifierReserved { name: "map".to_string(),
                                                line: 1, });
    assert!(matches!(parse_error("echo: echo"), ParseError::IdentifierReserved { .. }));
    assert!(matches!(parse_error("length = 2"), ParseError::IdentifierReserved { .. }));
    assert!(matches!(parse_error("a.b = 2"), ParseError::InvalidAssignmentTarget { .. }));
}

#[test]
fn integer_literals_beyond_exact_range_are_rejected() {
    assert!(matches!(parse_error("9007199254740993"), ParseError::LiteralTooLarge { .. }));
}

#[test]
fn serialized_nodes_parse_back_to_the_same_tree() {
    for src in [r#"style ".card" { color: "red"; padding: "0 4px"; }"#,
                r#"<div class="card" hidden>Hi <b>there</b></div>"#,
                "let k = 1; in (k + 2)",
                "[1, 2.5, \"x\"]",
                "{ k: (x: x) }",
                "if (a) then b else c"]
    {
        let first = parse_one(src);
        let second = parse_one(&first.to_string());
        assert_eq!(first, second, "round trip through {:?}", first.to_string());
    }
}
