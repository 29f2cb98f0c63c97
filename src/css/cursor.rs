//! Token cursor used by value parsers.
//!
//! Parsers peek at the current token and only [`advance`](TokenCursor::advance)
//! once they have accepted it, so a failed parse leaves the cursor on the
//! offending token for the caller's error recovery.

use crate::css::tokenizer::{tokenize, Location, SpannedToken, Token, TokenizeError};

/// Forward-only cursor over a tokenized CSS string.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<SpannedToken>,
    cursor: usize,
    /// Location just past the last byte of the source.
    end: Location,
}

impl TokenCursor {
    /// Create a cursor over already-tokenized input.
    ///
    /// `end` is reported as the location of errors at end of input.
    pub fn new(tokens: Vec<SpannedToken>, end: Location) -> Self {
        Self { tokens, cursor: 0, end }
    }

    /// Tokenize `input` and position the cursor on its first token.
    pub fn from_css(input: &str) -> Result<Self, TokenizeError> {
        let tokens = tokenize(input)?;
        Ok(Self::new(tokens, Location::of(input, input.len())))
    }

    pub fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.cursor)
    }

    pub fn peek_token(&self) -> Option<&Token> {
        self.peek().map(|t| &t.token)
    }

    pub fn advance(&mut self) -> Option<&SpannedToken> {
        if self.cursor < self.tokens.len() {
            let tok = &self.tokens[self.cursor];
            self.cursor += 1;
            Some(tok)
        } else {
            None
        }
    }

    /// Index of the current token in the stream.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Location of the current token, or the end of input.
    pub fn location(&self) -> Location {
        self.peek().map(|t| t.location).unwrap_or(self.end)
    }

    /// Tokens not yet consumed.
    pub fn remaining(&self) -> &[SpannedToken] {
        &self.tokens[self.cursor.min(self.tokens.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let cursor = TokenCursor::from_css("a b").unwrap();
        assert_eq!(cursor.peek_token(), Some(&Token::Ident("a".into())));
        assert_eq!(cursor.peek_token(), Some(&Token::Ident("a".into())));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_advance_until_eof() {
        let mut cursor = TokenCursor::from_css("a b").unwrap();
        assert_eq!(cursor.advance().map(|t| t.text.as_str()), Some("a"));
        assert_eq!(cursor.advance().map(|t| t.text.as_str()), Some("b"));
        assert!(cursor.is_eof());
        assert!(cursor.advance().is_none());
        assert!(cursor.remaining().is_empty());
    }

    #[test]
    fn test_location_at_end_of_input() {
        let mut cursor = TokenCursor::from_css("a\nbc ").unwrap();
        assert_eq!(cursor.location().line, 1);
        cursor.advance();
        assert_eq!((cursor.location().line, cursor.location().column), (2, 1));
        cursor.advance();
        assert_eq!(cursor.location(), Location { byte: 5, line: 2, column: 4 });
    }
}
