use nixi::{
    error::LexError,
    interpreter::lexer::{Keyword, Lexeme, Token, tokenize},
};

fn tokens(src: &str) -> Vec<Token> {
    tokenize(src).unwrap_or_else(|e| panic!("Lexing failed: {e}"))
                 .into_iter()
                 .map(|lexeme| lexeme.token)
                 .collect()
}

/// Removes whitespace and `#` comments; what is left must be empty for a gap
/// between two tokens.
fn strip_trivia(gap: &str) -> String {
    gap.lines()
       .map(|line| line.split_once('#').map_or(line, |(code, _)| code))
       .collect::<String>()
       .split_whitespace()
       .collect()
}

fn assert_lossless(src: &str) {
    let lexemes = tokenize(src).unwrap_or_else(|e| panic!("Lexing failed: {e}"));
    let mut previous_end = 0;
    let mut rebuilt = String::new();

    for Lexeme { span, text, .. } in &lexemes {
        assert!(span.start >= previous_end, "overlapping tokens in {src:?}");
        let gap = &src[previous_end..span.start];
        assert_eq!(strip_trivia(gap), "", "untokenized text {gap:?} in {src:?}");
        assert_eq!(&src[span.clone()], text);

        rebuilt.push_str(gap);
        rebuilt.push_str(text);
        previous_end = span.end;
    }
    rebuilt.push_str(&src[previous_end..]);

    assert_eq!(rebuilt, src);
}

#[test]
fn spans_cover_the_source() {
    assert_lossless("let x = 5; in x + 10");
    assert_lossless("# heading\ncomponent Card = { a, b }: <div class=\"card\">(a) and b</div>\n");
    assert_lossless("body{ margin: 0 }\ncss{ .a { color: red; } }");
    assert_lossless("js <script>if (a < b) { run(); }</script>");
    assert_lossless("<!-- note --> 'single' \"double\\n\"");
    assert_lossless("");
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(tokens("let in if then else"),
               vec![Token::Keyword(Keyword::Let),
                    Token::Keyword(Keyword::In),
                    Token::Keyword(Keyword::If),
                    Token::Keyword(Keyword::Then),
                    Token::Keyword(Keyword::Else),
                    Token::Eof]);
    assert_eq!(tokens("background-color _x1"),
               vec![Token::Identifier("background-color".to_string()),
                    Token::Identifier("_x1".to_string()),
                    Token::Eof]);
    assert_eq!(tokens("true null"),
               vec![Token::Keyword(Keyword::True),
                    Token::Keyword(Keyword::Null),
                    Token::Eof]);
}

#[test]
fn numbers_and_strings() {
    assert_eq!(tokens("42 3.5 2."),
               vec![Token::Integer(42), Token::Float(3.5), Token::Float(2.0), Token::Eof]);
    assert_eq!(tokens(r#""a\nb" 'it\'s'"#),
               vec![Token::Str("a\nb".to_string()),
                    Token::Str("it's".to_string()),
                    Token::Eof]);
}

#[test]
fn operators() {
    assert_eq!(tokens("== != <= >= && || ! = a < b"),
               vec![Token::EqualEqual,
                    Token::BangEqual,
                    Token::LessEqual,
                    Token::GreaterEqual,
                    Token::AndAnd,
                    Token::OrOr,
                    Token::Bang,
                    Token::Equals,
                    Token::Identifier("a".to_string()),
                    Token::Less,
                    Token::Identifier("b".to_string()),
                    Token::Eof]);
}

#[test]
fn markup_spans() {
    assert_eq!(tokens(r#"<div class="card">Hi</div>"#),
               vec![Token::MarkupTag(r#"<div class="card">"#.to_string()),
                    Token::Identifier("Hi".to_string()),
                    Token::MarkupTag("</div>".to_string()),
                    Token::Eof]);
    assert_eq!(tokens("<!-- a -- b -->"),
               vec![Token::MarkupComment("<!-- a -- b -->".to_string()), Token::Eof]);
}

#[test]
fn script_content_is_one_code_block() {
    assert_eq!(tokens("<script>let a = \"<b>\";</script>"),
               vec![Token::MarkupTag("<script>".to_string()),
                    Token::CodeBlock("let a = \"<b>\";".to_string()),
                    Token::MarkupTag("</script>".to_string()),
                    Token::Eof]);
}

#[test]
fn brace_after_a_word_starts_a_style_block() {
    assert_eq!(tokens("body{ margin: 0 }"),
               vec![Token::Keyword(Keyword::Body),
                    Token::StyleBlock(" margin: 0 ".to_string()),
                    Token::Eof]);
    assert_eq!(tokens("Card { a: 1 }"),
               vec![Token::Identifier("Card".to_string()),
                    Token::LBrace,
                    Token::Identifier("a".to_string()),
                    Token::Colon,
                    Token::Integer(1),
                    Token::RBrace,
                    Token::Eof]);
    assert_eq!(tokens("css{ .a { b: c } }"),
               vec![Token::Keyword(Keyword::Css),
                    Token::StyleBlock(" .a { b: c } ".to_string()),
                    Token::Eof]);
}

#[test]
fn positions_are_one_based() {
    let lexemes = tokenize("x\n  y").unwrap();
    assert_eq!((lexemes[0].line, lexemes[0].column), (1, 1));
    assert_eq!((lexemes[1].line, lexemes[1].column), (2, 3));
}

#[test]
fn unknown_character_is_an_error() {
    assert_eq!(tokenize("a\n  @"),
               Err(LexError { character: "@".to_string(),
                              line:      2,
                              column:    3, }));
    assert!(tokenize("1 $ 2").is_err());
}
