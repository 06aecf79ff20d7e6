//! Language definition: the token table, delimiters, compound registry, and
//! scope descriptors that drive the scanner.
//!
//! The scanner itself is language-agnostic; everything specific to VBA (or a
//! related language) is supplied here at construction time. Construction is
//! the only fallible step in the crate: malformed language data is a
//! programmer error and is rejected before any scan begins.

use rustc_hash::FxHashMap;
use thiserror::Error;
use vbalint_tokens::TokenKind;

use crate::scope::{ScopeDescriptor, ScopeDescriptorTable};

/// Errors detected while building a [`LanguageDefinition`].
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("duplicate token text `{0}` (token table keys are case-insensitive)")]
    DuplicateTokenText(String),
    #[error("scope opener {0:?} has an empty closer set")]
    EmptyCloserSet(TokenKind),
    #[error("shared scope opener {0:?} names no sibling opener in its continuation set")]
    SharedWithoutSibling(TokenKind),
    #[error("comment opener `{0}` has no comment-kind entry in the token table")]
    UnregisteredCommentOpener(String),
    #[error("the line-ending sequence must not be empty")]
    EmptyLineEnding,
}

/// Case-insensitive mapping from literal token text to token kind.
///
/// Holds single characters, multi-character operators, and whole keywords.
/// The longest key length bounds the scanner's lookahead.
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    entries: FxHashMap<String, TokenKind>,
    max_literal_len: usize,
}

impl TokenTable {
    fn insert(&mut self, text: &str, kind: TokenKind) -> Result<(), LanguageError> {
        let key = text.to_lowercase();
        if self.entries.contains_key(&key) {
            return Err(LanguageError::DuplicateTokenText(text.to_string()));
        }
        self.max_literal_len = self.max_literal_len.max(key.chars().count());
        self.entries.insert(key, kind);
        Ok(())
    }

    /// Look up the kind for a literal text, case-insensitively.
    pub fn lookup(&self, text: &str) -> Option<TokenKind> {
        self.entries.get(&text.to_lowercase()).copied()
    }

    /// Look up the kind for a single character.
    pub fn lookup_char(&self, ch: char) -> Option<TokenKind> {
        self.lookup(ch.encode_utf8(&mut [0u8; 4]))
    }

    /// The length in characters of the longest registered literal.
    pub fn max_literal_len(&self) -> usize {
        self.max_literal_len
    }

    /// The number of registered literals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A comment form: opener text plus an optional closing delimiter.
///
/// A `None` terminator means the comment runs to the end of the line.
#[derive(Debug, Clone)]
pub struct CommentDelimiter {
    /// The opener text, stored lowercase.
    pub opener: String,
    /// The closing delimiter, or `None` for line comments.
    pub terminator: Option<String>,
}

/// Everything the scanner needs to know about one language.
///
/// Immutable after construction; one definition may be shared by reference
/// across any number of concurrent scans.
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    table: TokenTable,
    string_delimiters: Vec<char>,
    escape: char,
    comments: Vec<CommentDelimiter>,
    line_ending: String,
    compounds: FxHashMap<(TokenKind, TokenKind), TokenKind>,
    scopes: ScopeDescriptorTable,
}

impl LanguageDefinition {
    /// Start building a definition.
    pub fn builder() -> LanguageDefinitionBuilder {
        LanguageDefinitionBuilder::new()
    }

    /// The token table.
    pub fn table(&self) -> &TokenTable {
        &self.table
    }

    /// Whether `ch` opens and closes string literals.
    pub fn is_string_delimiter(&self, ch: char) -> bool {
        self.string_delimiters.contains(&ch)
    }

    /// The escape character used inside string literals.
    pub fn escape_character(&self) -> char {
        self.escape
    }

    /// The comment form whose opener matches `text` (already lowercase).
    pub fn comment_for_opener(&self, text: &str) -> Option<&CommentDelimiter> {
        self.comments.iter().find(|c| c.opener == text)
    }

    /// Whether `text` (already lowercase) is a registered comment opener.
    pub fn is_comment_opener(&self, text: &str) -> bool {
        self.comment_for_opener(text).is_some()
    }

    /// The line-ending sequence for this compilation unit.
    pub fn line_ending(&self) -> &str {
        &self.line_ending
    }

    /// The compound kind for a registered `(first, second)` keyword pair.
    pub fn compound(&self, first: TokenKind, second: TokenKind) -> Option<TokenKind> {
        self.compounds.get(&(first, second)).copied()
    }

    /// The scope descriptor table.
    pub fn scopes(&self) -> &ScopeDescriptorTable {
        &self.scopes
    }

    /// The scope descriptor for an opener kind, if any.
    pub fn descriptor_for(&self, kind: TokenKind) -> Option<&ScopeDescriptor> {
        self.scopes.descriptor_for(kind)
    }
}

/// Builder for [`LanguageDefinition`].
#[derive(Debug, Clone)]
pub struct LanguageDefinitionBuilder {
    line_ending: String,
    escape: char,
    tokens: Vec<(String, TokenKind)>,
    string_delimiters: Vec<char>,
    comments: Vec<CommentDelimiter>,
    compounds: Vec<(TokenKind, TokenKind, TokenKind)>,
    scopes: Vec<ScopeDescriptor>,
}

impl LanguageDefinitionBuilder {
    pub fn new() -> Self {
        Self {
            line_ending: "\n".to_string(),
            escape: '\\',
            tokens: Vec::new(),
            string_delimiters: Vec::new(),
            comments: Vec::new(),
            compounds: Vec::new(),
            scopes: Vec::new(),
        }
    }

    /// Set the line-ending sequence. Defaults to `"\n"`.
    pub fn line_ending(mut self, line_ending: &str) -> Self {
        self.line_ending = line_ending.to_string();
        self
    }

    /// Set the escape character. Defaults to `'\\'`.
    pub fn escape_character(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    /// Register a literal text and its token kind.
    pub fn token(mut self, text: &str, kind: TokenKind) -> Self {
        self.tokens.push((text.to_string(), kind));
        self
    }

    /// Register a string delimiter character.
    pub fn string_delimiter(mut self, ch: char) -> Self {
        self.string_delimiters.push(ch);
        self
    }

    /// Register a line comment: runs from `opener` to the end of the line.
    pub fn line_comment(mut self, opener: &str) -> Self {
        self.comments.push(CommentDelimiter {
            opener: opener.to_lowercase(),
            terminator: None,
        });
        self
    }

    /// Register a block comment with a fixed closing delimiter.
    pub fn block_comment(mut self, opener: &str, terminator: &str) -> Self {
        self.comments.push(CommentDelimiter {
            opener: opener.to_lowercase(),
            terminator: Some(terminator.to_string()),
        });
        self
    }

    /// Register a compound keyword joined from two adjacent keywords.
    pub fn compound(mut self, first: TokenKind, second: TokenKind, joined: TokenKind) -> Self {
        self.compounds.push((first, second, joined));
        self
    }

    /// Register a scope descriptor.
    pub fn scope(mut self, descriptor: ScopeDescriptor) -> Self {
        self.scopes.push(descriptor);
        self
    }

    /// Validate and build the definition.
    pub fn build(self) -> Result<LanguageDefinition, LanguageError> {
        if self.line_ending.is_empty() {
            return Err(LanguageError::EmptyLineEnding);
        }
        let mut table = TokenTable::default();
        for (text, kind) in &self.tokens {
            table.insert(text, *kind)?;
        }
        for comment in &self.comments {
            match table.lookup(&comment.opener) {
                Some(kind) if kind.is_comment() => {}
                _ => {
                    return Err(LanguageError::UnregisteredCommentOpener(
                        comment.opener.clone(),
                    ))
                }
            }
        }
        let mut compounds = FxHashMap::default();
        for (first, second, joined) in self.compounds {
            compounds.insert((first, second), joined);
        }
        let scopes = ScopeDescriptorTable::new(self.scopes)?;
        Ok(LanguageDefinition {
            table,
            string_delimiters: self.string_delimiters,
            escape: self.escape,
            comments: self.comments,
            line_ending: self.line_ending,
            compounds,
            scopes,
        })
    }
}

impl Default for LanguageDefinitionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_differing_only_by_case() {
        let result = LanguageDefinition::builder()
            .token("For", TokenKind::For)
            .token("FOR", TokenKind::For)
            .build();
        assert!(matches!(result, Err(LanguageError::DuplicateTokenText(_))));
    }

    #[test]
    fn test_empty_line_ending_rejected() {
        let result = LanguageDefinition::builder().line_ending("").build();
        assert!(matches!(result, Err(LanguageError::EmptyLineEnding)));
    }

    #[test]
    fn test_comment_opener_must_be_registered() {
        let result = LanguageDefinition::builder().line_comment("'").build();
        assert!(matches!(
            result,
            Err(LanguageError::UnregisteredCommentOpener(_))
        ));

        // Registered, but with a non-comment kind.
        let result = LanguageDefinition::builder()
            .token("'", TokenKind::Identifier)
            .line_comment("'")
            .build();
        assert!(matches!(
            result,
            Err(LanguageError::UnregisteredCommentOpener(_))
        ));
    }

    #[test]
    fn test_max_literal_len() {
        let def = LanguageDefinition::builder()
            .token("=", TokenKind::Equals)
            .token("implements", TokenKind::Implements)
            .build()
            .unwrap();
        assert_eq!(def.table().max_literal_len(), 10);
        assert_eq!(def.table().lookup("IMPLEMENTS"), Some(TokenKind::Implements));
        assert_eq!(def.table().lookup_char('='), Some(TokenKind::Equals));
    }
}
