use std::{fmt, ops::Range};

use log::trace;
use logos::Logos;

use crate::error::LexError;

/// Represents a lexical token in the source input.
///
/// Core-language tokens are matched by the derived state machine. The three
/// raw-span kinds (markup tags, style blocks, code blocks) are produced by
/// callbacks that look at the surrounding text and consume the span verbatim,
/// so the parser receives them as single opaque tokens.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal with a decimal point, such as `3.14` or `2.`.
    #[regex(r"[0-9]+\.[0-9]*", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal with escapes already resolved.
    #[token("\"", lex_string)]
    #[token("'", lex_string)]
    Str(String),
    /// Identifier tokens. Hyphens are allowed after the first character, so
    /// `background-color` is a single identifier.
    #[regex(r"[A-Za-z_][A-Za-z0-9_\-]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// A reserved word. Produced by [`tokenize`] when an identifier's text is
    /// found in the reserved-word table.
    Keyword(Keyword),
    /// `# comments` running to the end of the line.
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `<`, or the start of a markup span. See [`markup_or_less`].
    #[token("<", markup_or_less)]
    Less,
    /// A raw markup tag span such as `<div class="card">` or `</div>`.
    MarkupTag(String),
    /// A raw markup comment span `<!-- ... -->`.
    MarkupComment(String),
    /// Raw code between `<script ...>` and the next `</script>`.
    CodeBlock(String),
    /// `{`, or the start of a style span. See [`brace_or_style`].
    #[token("{", brace_or_style)]
    LBrace,
    /// The text between the braces of a style span.
    StyleBlock(String),
    /// `}`
    #[token("}")]
    RBrace,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `!`
    #[token("!")]
    Bang,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// End of input. Always the last token of a [`tokenize`] result.
    Eof,
}

macro_rules! keywords {
    ($($word:literal => $variant:ident),* $(,)?) => {
        /// The reserved words of the language.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $(
                #[doc = concat!("`", $word, "`")]
                $variant,
            )*
        }

        impl Keyword {
            /// Looks a word up in the reserved-word table.
            #[must_use]
            pub fn from_word(word: &str) -> Option<Self> {
                match word {
                    $($word => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// The source spelling of the keyword.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $word,)*
                }
            }
        }

        /// Every reserved word, in table order.
        pub const RESERVED_WORDS: &[&str] = &[$($word,)*];
    };
}

keywords! {
    "let" => Let,
    "in" => In,
    "if" => If,
    "then" => Then,
    "else" => Else,
    "component" => Component,
    "style" => Style,
    "html" => Html,
    "css" => Css,
    "js" => Js,
    "script" => Script,
    "link" => Link,
    "meta" => Meta,
    "head" => Head,
    "body" => Body,
    "title" => Title,
    "header" => Header,
    "footer" => Footer,
    "main" => Main,
    "nav" => Nav,
    "ul" => Ul,
    "ol" => Ol,
    "li" => Li,
    "table" => Table,
    "tr" => Tr,
    "td" => Td,
    "th" => Th,
    "thead" => Thead,
    "tbody" => Tbody,
    "img" => Img,
    "video" => Video,
    "audio" => Audio,
    "canvas" => Canvas,
    "svg" => Svg,
    "form" => Form,
    "label" => Label,
    "select" => Select,
    "option" => Option,
    "textarea" => Textarea,
    "iframe" => Iframe,
    "true" => True,
    "false" => False,
    "null" => Null,
}

impl Keyword {
    /// Whether the keyword names a markup element and may therefore be used as
    /// a style selector (`body{ margin: 0 }`).
    #[must_use]
    pub const fn is_element_name(self) -> bool {
        !matches!(self,
                  Self::Let
                  | Self::In
                  | Self::If
                  | Self::Then
                  | Self::Else
                  | Self::Component
                  | Self::Style
                  | Self::Css
                  | Self::Js
                  | Self::True
                  | Self::False
                  | Self::Null)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(x) => write!(f, "FLOAT {x}"),
            Self::Integer(n) => write!(f, "INTEGER {n}"),
            Self::Str(s) => write!(f, "STRING {s:?}"),
            Self::Identifier(name) => write!(f, "IDENTIFIER {name}"),
            Self::Keyword(keyword) => write!(f, "'{}'", keyword.as_str()),
            Self::MarkupTag(raw) => write!(f, "markup tag {raw}"),
            Self::MarkupComment(_) => write!(f, "markup comment"),
            Self::CodeBlock(_) => write!(f, "code block"),
            Self::StyleBlock(_) => write!(f, "style block"),
            Self::Comment => write!(f, "comment"),
            Self::Less => write!(f, "'<'"),
            Self::LBrace => write!(f, "'{{'"),
            Self::RBrace => write!(f, "'}}'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::LBracket => write!(f, "'['"),
            Self::RBracket => write!(f, "']'"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::Equals => write!(f, "'='"),
            Self::EqualEqual => write!(f, "'=='"),
            Self::BangEqual => write!(f, "'!='"),
            Self::LessEqual => write!(f, "'<='"),
            Self::GreaterEqual => write!(f, "'>='"),
            Self::Greater => write!(f, "'>'"),
            Self::AndAnd => write!(f, "'&&'"),
            Self::OrOr => write!(f, "'||'"),
            Self::Bang => write!(f, "'!'"),
            Self::Colon => write!(f, "':'"),
            Self::Semicolon => write!(f, "';'"),
            Self::Comma => write!(f, "','"),
            Self::Dot => write!(f, "'.'"),
            Self::Eof => write!(f, "EOF"),
        }
    }
}

/// A token together with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The token.
    pub token:  Token,
    /// 1-based line of the first character of the token.
    pub line:   usize,
    /// 1-based column of the first character of the token.
    pub column: usize,
    /// Byte range of the source text the token covers.
    pub span:   Range<usize>,
    /// The exact source text of the token.
    pub text:   String,
}

/// Tracks line and column while the scan moves forward.
struct Cursor<'s> {
    source:     &'s str,
    offset:     usize,
    line:       usize,
    line_start: usize,
}

impl<'s> Cursor<'s> {
    const fn new(source: &'s str) -> Self {
        Self { source,
               offset: 0,
               line: 1,
               line_start: 0 }
    }

    /// Advances to byte `offset` and returns the line and column there.
    /// Offsets must be non-decreasing.
    fn locate(&mut self, offset: usize) -> (usize, usize) {
        for (i, byte) in self.source.as_bytes()[self.offset..offset].iter().enumerate() {
            if *byte == b'\n' {
                self.line += 1;
                self.line_start = self.offset + i + 1;
            }
        }
        self.offset = offset;
        let column = self.source[self.line_start..offset].chars().count() + 1;
        (self.line, column)
    }
}

/// Converts source text into a flat token sequence terminated by
/// [`Token::Eof`].
///
/// Besides driving the derived lexer this resolves reserved words and emits
/// the raw code block that follows an opening `<script>` tag.
///
/// # Errors
/// Returns a [`LexError`] at the first character no token rule accepts.
///
/// # Example
/// ```
/// use nixi::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x = 5; in x").unwrap();
/// assert_eq!(tokens.len(), 8);
/// assert_eq!(tokens.last().unwrap().token, Token::Eof);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Lexeme>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let (line, column) = cursor.locate(span.start);

        let Ok(token) = result else {
            return Err(LexError { character: lexer.slice().to_string(),
                                  line,
                                  column });
        };

        let token = match token {
            Token::Identifier(word) => {
                Keyword::from_word(&word).map_or(Token::Identifier(word), Token::Keyword)
            },
            other => other,
        };
        let opens_script = matches!(&token, Token::MarkupTag(raw) if opens_script(raw));
        tokens.push(Lexeme { token,
                             line,
                             column,
                             span: span.clone(),
                             text: lexer.slice().to_string() });

        if opens_script {
            let rest = lexer.remainder();
            let len = rest.find("</script>").unwrap_or(rest.len());
            if len > 0 {
                let (line, column) = cursor.locate(span.end);
                lexer.bump(len);
                tokens.push(Lexeme { token: Token::CodeBlock(rest[..len].to_string()),
                                     line,
                                     column,
                                     span: span.end..span.end + len,
                                     text: rest[..len].to_string() });
            }
        }
    }

    let (line, column) = cursor.locate(source.len());
    tokens.push(Lexeme { token: Token::Eof,
                         line,
                         column,
                         span: source.len()..source.len(),
                         text: String::new() });
    trace!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    Ok(tokens)
}

/// Returns the tag name of a raw markup span, without `<`, `</` or
/// attributes.
#[must_use]
pub fn tag_name(raw: &str) -> &str {
    let inner = raw.trim_start_matches('<').trim_start_matches('/');
    let end = inner.find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
                   .unwrap_or(inner.len());
    &inner[..end]
}

/// Whether a raw markup span is an opening `<script>` tag whose content must
/// be captured verbatim.
fn opens_script(raw: &str) -> bool {
    !raw.starts_with("</") && !raw.ends_with("/>") && tag_name(raw) == "script"
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if successful.
/// - `None`: If the literal does not fit, which surfaces as a lex error.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Reads a string literal after its opening quote.
///
/// Recognized escapes are `\n \t \r \\ \" \'`; any other escaped character is
/// kept as-is without the backslash. A missing closing quote ends the literal
/// at end of input.
fn lex_string(lex: &mut logos::Lexer<Token>) -> String {
    let quote = lex.slice().chars().next().unwrap_or('"');
    let mut value = String::new();
    let mut consumed = 0;
    let mut chars = lex.remainder().chars();

    while let Some(c) = chars.next() {
        consumed += c.len_utf8();
        if c == quote {
            break;
        }
        if c == '\\' {
            let Some(escaped) = chars.next() else { break };
            consumed += escaped.len_utf8();
            value.push(match escaped {
                           'n' => '\n',
                           't' => '\t',
                           'r' => '\r',
                           other => other,
                       });
        } else {
            value.push(c);
        }
    }

    lex.bump(consumed);
    value
}

/// Decides what a `<` starts.
///
/// - `<!--` starts a markup comment running through the next `-->`.
/// - `<` followed by a letter or `/` starts a markup tag span running through
///   the next unescaped `>`.
/// - Anything else is the less-than operator.
fn markup_or_less(lex: &mut logos::Lexer<Token>) -> Token {
    let rest = lex.remainder();

    if let Some(after) = rest.strip_prefix("!--") {
        let len = after.find("-->").map_or(rest.len(), |i| 3 + i + 3);
        lex.bump(len);
        return Token::MarkupComment(lex.slice().to_string());
    }

    match rest.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '/' => {
            let bytes = rest.as_bytes();
            let mut i = 0;
            let mut len = rest.len();
            while i < bytes.len() {
                match bytes[i] {
                    b'\\' => i += 1,
                    b'>' => {
                        len = i + 1;
                        break;
                    },
                    _ => {},
                }
                i += 1;
            }
            lex.bump(len.min(rest.len()));
            Token::MarkupTag(lex.slice().to_string())
        },
        _ => Token::Less,
    }
}

/// Decides what a `{` starts.
///
/// The brace opens a style span when the character right before it is a word
/// character, `)` or `]`; for example `body{margin: 0}` or `css{ ... }`.
/// Otherwise it is a plain brace (record literal, named parameters, style
/// definition body). A style span runs to the matching `}`, counting nested
/// braces, and carries the text between the outer braces.
fn brace_or_style(lex: &mut logos::Lexer<Token>) -> Token {
    let start = lex.span().start;
    let previous = lex.source()[..start].chars().next_back();
    let is_style = previous.is_some_and(|c| c.is_alphanumeric() || c == '_' || c == ')' || c == ']');
    if !is_style {
        return Token::LBrace;
    }

    let rest = lex.remainder();
    let mut depth = 1usize;
    let mut inner_len = rest.len();
    let mut consumed = rest.len();
    for (i, byte) in rest.bytes().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    inner_len = i;
                    consumed = i + 1;
                    break;
                }
            },
            _ => {},
        }
    }

    let inner = rest[..inner_len].to_string();
    lex.bump(consumed);
    Token::StyleBlock(inner)
}
