//! The Token record emitted by the tokenizer.

use vbalint_core::TextSpan;

use crate::kind::TokenKind;

/// A classified, positioned span of source text.
///
/// Tokens are immutable once emitted. Concatenating the `text` of every
/// token in emission order reproduces the source exactly: whitespace and
/// line endings are tokens in their own right, never discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The raw source text of the token.
    pub text: String,
    /// Byte offset of the first byte of `text` in the source.
    pub byte_offset: usize,
    /// 1-based line number of the first byte.
    pub line: u32,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, byte_offset: usize, line: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            byte_offset,
            line,
        }
    }

    /// The token as a byte span in the source.
    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.byte_offset as u32, self.text.len() as u32)
    }

    /// The length of this token in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether this token has zero length.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether this token is trivia (whitespace, line ending, comment).
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_span() {
        let token = Token::new(TokenKind::Identifier, "Counter", 12, 2);
        assert_eq!(token.span(), TextSpan::new(12, 7));
        assert_eq!(token.len(), 7);
        assert!(!token.is_empty());
        assert!(!token.is_trivia());
    }

    #[test]
    fn test_trivia_token() {
        let token = Token::new(TokenKind::EndOfLine, "\r\n", 0, 1);
        assert!(token.is_trivia());
        assert_eq!(token.span().end(), 2);
    }
}
