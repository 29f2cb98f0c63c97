//! logos-based CSS tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `10px` as [`RawToken::Dimension`] beats `10` + `px`)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `50%` matches a percentage, never `Number` + `%`
//! - `10px` matches a dimension, not `Number` + `Ident`
//! - `rgb(` matches a function, not `Ident` + `(`
//!
//! The raw lexer only classifies slices. [`tokenize`] turns them into typed
//! [`Token`]s carrying parsed numeric values and a source [`Location`].

use std::fmt;
use std::ops::Range;

use logos::Logos;

/// Raw token classes produced by the logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
#[logos(subpattern num = r"[+-]?([0-9]+(\.[0-9]+)?|\.[0-9]+)([eE][+-]?[0-9]+)?")]
// A unit never starts with something that reads as an exponent (`e3`, `e-3`).
#[logos(subpattern unit = r"[a-df-zA-DF-Z_][a-zA-Z0-9_-]*|[eE]([a-zA-Z_][a-zA-Z0-9_-]*)?|[eE][+-]([a-zA-Z_-][a-zA-Z0-9_-]*)?")]
enum RawToken {
    // ── Comments (skipped) ───────────────────────────────────────────

    #[token("/*", block_comment)]
    Comment,

    // ── Numeric tokens (longer matches first) ────────────────────────

    /// `50%`, `-12.5%`, `.5%`, `5e-1%`
    #[regex(r"(?&num)%")]
    Percentage,

    /// `10px`, `-2.5em`, `.5turn`, `1e3px`
    #[regex(r"(?&num)((?&unit))")]
    Dimension,

    /// `10`, `-3`, `+1.5`, `.25`, `2E+2`
    #[regex(r"(?&num)")]
    Number,

    // ── Names ────────────────────────────────────────────────────────

    /// `calc(`, `rgb(`
    #[regex(r"(--|-)?[a-zA-Z_][a-zA-Z0-9_-]*\(")]
    Function,

    /// `solid`, `-gtk-icon-size`, `--accent`
    #[regex(r"(--|-)?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// `@media`
    #[regex(r"@-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    AtKeyword,

    /// `#fff`, `#sidebar`
    #[regex(r"#[a-zA-Z0-9_-]+")]
    Hash,

    /// `"…"` or `'…'`
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    // ── Punctuation ──────────────────────────────────────────────────

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenSquare,
    #[token("]")]
    CloseSquare,
    #[token("{")]
    OpenCurly,
    #[token("}")]
    CloseCurly,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
}

/// Skip to the end of a `/* … */` comment. An unterminated comment swallows
/// the rest of the input.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> logos::Skip {
    let rest = lex.remainder();
    let len = rest.find("*/").map(|i| i + 2).unwrap_or(rest.len());
    lex.bump(len);
    logos::Skip
}

// ---------------------------------------------------------------------------
// Typed tokens
// ---------------------------------------------------------------------------

/// A numeric literal as the tokenizer saw it.
///
/// The sign and integer flags mirror the four bare-number token kinds CSS
/// distinguishes (signed/signless integer, signed/signless number).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    pub value: f64,
    /// An explicit `+` or `-` was written.
    pub signed: bool,
    /// No fractional part was written.
    pub integer: bool,
}

/// CSS token with its payload already decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare number: `10`, `-3.5`.
    Number(Number),
    /// Percentage; the value is the literal before `%` (`50%` is `50.0`).
    Percentage(f64),
    /// Number immediately followed by a unit name: `10px`.
    Dimension { number: Number, unit: String },
    Ident(String),
    /// Function name without the trailing `(`.
    Function(String),
    /// At-keyword name without the leading `@`.
    AtKeyword(String),
    /// Hash name without the leading `#`.
    Hash(String),
    /// String contents without the quotes.
    String(String),
    /// Any single character the lexer does not otherwise recognize.
    Delim(char),
    OpenParen,
    CloseParen,
    OpenSquare,
    CloseSquare,
    OpenCurly,
    CloseCurly,
    Comma,
    Colon,
    Semicolon,
}

impl Token {
    /// Short human-readable name of the token kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Number(_) => "number",
            Token::Percentage(_) => "percentage",
            Token::Dimension { .. } => "dimension",
            Token::Ident(_) => "identifier",
            Token::Function(_) => "function",
            Token::AtKeyword(_) => "at-keyword",
            Token::Hash(_) => "hash",
            Token::String(_) => "string",
            Token::Delim(_) => "delimiter",
            Token::OpenParen => "'('",
            Token::CloseParen => "')'",
            Token::OpenSquare => "'['",
            Token::CloseSquare => "']'",
            Token::OpenCurly => "'{'",
            Token::CloseCurly => "'}'",
            Token::Comma => "','",
            Token::Colon => "':'",
            Token::Semicolon => "';'",
        }
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Position of a token in the source text.
///
/// `line` and `column` are 1-based; `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub byte: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Location of byte offset `byte` in `input`.
    ///
    /// Offsets past the end, or inside a multi-byte character, are moved back
    /// to the nearest preceding character boundary.
    pub fn of(input: &str, byte: usize) -> Location {
        let mut tracker = LineTracker::new();
        tracker.locate(input, byte)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Incremental byte-offset to line/column conversion. Offsets must be
/// requested in non-decreasing order.
struct LineTracker {
    byte: usize,
    line: usize,
    column: usize,
}

impl LineTracker {
    fn new() -> Self {
        Self { byte: 0, line: 1, column: 1 }
    }

    fn locate(&mut self, input: &str, byte: usize) -> Location {
        let mut end = byte.min(input.len());
        while !input.is_char_boundary(end) {
            end -= 1;
        }
        if end > self.byte {
            for ch in input[self.byte..end].chars() {
                if ch == '\n' {
                    self.line += 1;
                    self.column = 1;
                } else {
                    self.column += 1;
                }
            }
            self.byte = end;
        }
        Location { byte: end, line: self.line, column: self.column }
    }
}

/// A typed token together with its source text and location.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub text: String,
    pub span: Range<usize>,
    pub location: Location,
}

/// Errors from tokenizing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenizeError {
    #[error("{location}: invalid number '{text}'")]
    InvalidNumber { text: String, location: Location },
}

impl TokenizeError {
    pub fn location(&self) -> Location {
        match self {
            TokenizeError::InvalidNumber { location, .. } => *location,
        }
    }
}

// ---------------------------------------------------------------------------
// Tokenizing
// ---------------------------------------------------------------------------

/// Split a dimension slice like `-2.5em` or `1e3px` into its numeric part
/// and unit.
fn split_dimension(text: &str) -> (&str, &str) {
    let bytes = text.as_bytes();
    let digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    // An exponent needs a digit, optionally after a sign; otherwise the `e`
    // starts the unit.
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let signed = matches!(bytes.get(i + 1), Some(b'+' | b'-'));
        let first_digit = if signed { i + 2 } else { i + 1 };
        if digit_at(first_digit) {
            i = first_digit;
            while digit_at(i) {
                i += 1;
            }
        }
    }
    text.split_at(i)
}

fn parse_number(text: &str, location: Location) -> Result<Number, TokenizeError> {
    let value = text.parse::<f64>().map_err(|_| TokenizeError::InvalidNumber {
        text: text.to_string(),
        location,
    })?;
    Ok(Number {
        value,
        signed: text.starts_with(['+', '-']),
        integer: !text.contains(['.', 'e', 'E']),
    })
}

fn unquote(text: &str) -> String {
    let inner = &text[1..text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

fn decode(raw: RawToken, text: &str, location: Location) -> Result<Token, TokenizeError> {
    let token = match raw {
        // Comments never reach here; the callback skips them.
        RawToken::Comment => Token::Delim('/'),
        RawToken::Percentage => {
            let number = parse_number(&text[..text.len() - 1], location)?;
            Token::Percentage(number.value)
        }
        RawToken::Dimension => {
            let (digits, unit) = split_dimension(text);
            Token::Dimension {
                number: parse_number(digits, location)?,
                unit: unit.to_string(),
            }
        }
        RawToken::Number => Token::Number(parse_number(text, location)?),
        RawToken::Function => Token::Function(text[..text.len() - 1].to_string()),
        RawToken::Ident => Token::Ident(text.to_string()),
        RawToken::AtKeyword => Token::AtKeyword(text[1..].to_string()),
        RawToken::Hash => Token::Hash(text[1..].to_string()),
        RawToken::String => Token::String(unquote(text)),
        RawToken::OpenParen => Token::OpenParen,
        RawToken::CloseParen => Token::CloseParen,
        RawToken::OpenSquare => Token::OpenSquare,
        RawToken::CloseSquare => Token::CloseSquare,
        RawToken::OpenCurly => Token::OpenCurly,
        RawToken::CloseCurly => Token::CloseCurly,
        RawToken::Comma => Token::Comma,
        RawToken::Colon => Token::Colon,
        RawToken::Semicolon => Token::Semicolon,
    };
    Ok(token)
}

/// Tokenize a CSS string into typed, located tokens.
///
/// Whitespace and comments are dropped. Characters the lexer does not
/// recognize become [`Token::Delim`] so that callers can report them.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, TokenizeError> {
    let mut lines = LineTracker::new();
    let mut tokens = Vec::new();

    for (result, span) in RawToken::lexer(input).spanned() {
        let text = &input[span.clone()];
        let location = lines.locate(input, span.start);
        let token = match result {
            Ok(raw) => decode(raw, text, location)?,
            Err(()) => Token::Delim(text.chars().next().unwrap_or('\u{FFFD}')),
        };
        tokens.push(SpannedToken {
            token,
            text: text.to_string(),
            span,
            location,
        });
    }

    log::trace!("tokenized {} bytes into {} tokens", input.len(), tokens.len());
    Ok(tokens)
}
