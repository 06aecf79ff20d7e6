//! TokenKind: every kind of token the tokenizer can emit.

/// The kind of a lexed token.
///
/// The set covers trivia, literals, the bare-word fallback, punctuation and
/// operators, keywords, and the compound keywords formed by joining two
/// keyword words (`End Function`, `Select Case`, ...).
///
/// The `is_*` predicates below rely on declaration order, so new variants
/// must be added inside the group they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum TokenKind {
    // ========================================================================
    // Trivia
    // ========================================================================
    /// A run of whitespace with no line ending in it.
    Whitespace,
    /// Exactly one line-ending sequence.
    EndOfLine,
    /// A comment, or a comment-opener before aggregation.
    Comment,
    /// A documentation comment, for languages that distinguish one.
    DocComment,

    // ========================================================================
    // Literals
    // ========================================================================
    StringLiteral,
    IntegerLiteral,
    DecimalLiteral,

    /// A bare word: identifiers, and the fallback for any text the token
    /// table does not match.
    Identifier,

    // ========================================================================
    // Punctuation and operators
    // ========================================================================
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Dot,
    Comma,
    Semicolon,
    Colon,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Ampersand,
    Equals,
    ColonEquals,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
    NotEquals,

    // ========================================================================
    // Keywords
    // ========================================================================
    And,
    As,
    Attribute,
    Begin,
    Case,
    Class,
    Dim,
    Do,
    Each,
    Else,
    /// Both the single word `ElseIf` and the joined pair `Else If`. Sits in
    /// the keyword group, not the compound group: the single-word spelling
    /// is the primary one and classification follows it.
    ElseIf,
    End,
    False,
    For,
    Function,
    If,
    Implements,
    Is,
    Let,
    Loop,
    Next,
    Not,
    Nothing,
    Option,
    Or,
    Private,
    Property,
    Public,
    Select,
    Set,
    Sub,
    Then,
    True,
    Wend,
    While,

    // ========================================================================
    // Compound keywords, joined from two words
    // ========================================================================
    EndFunction,
    EndSub,
    EndProperty,
    EndSelect,
    EndIf,
    SelectCase,
    ForEach,
    CaseElse,
}

impl TokenKind {
    pub const FIRST_PUNCTUATION: TokenKind = TokenKind::OpenParen;
    pub const LAST_PUNCTUATION: TokenKind = TokenKind::NotEquals;
    pub const FIRST_KEYWORD: TokenKind = TokenKind::And;
    pub const LAST_KEYWORD: TokenKind = TokenKind::CaseElse;
    pub const FIRST_COMPOUND: TokenKind = TokenKind::EndFunction;
    pub const LAST_COMPOUND: TokenKind = TokenKind::CaseElse;

    /// Whether this kind is trivia (whitespace, line endings, comments).
    #[inline]
    pub fn is_trivia(self) -> bool {
        (self as u16) <= TokenKind::DocComment as u16
    }

    /// Whether this kind is whitespace or a line ending.
    #[inline]
    pub fn is_whitespace(self) -> bool {
        (self as u16) <= TokenKind::EndOfLine as u16
    }

    /// Whether this kind is a comment kind.
    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::DocComment)
    }

    /// Whether this kind is a literal token.
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::StringLiteral | TokenKind::IntegerLiteral | TokenKind::DecimalLiteral
        )
    }

    /// Whether this kind is a numeric literal.
    #[inline]
    pub fn is_numeric_literal(self) -> bool {
        matches!(self, TokenKind::IntegerLiteral | TokenKind::DecimalLiteral)
    }

    /// Whether this kind is a punctuation or operator token.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        let v = self as u16;
        v >= TokenKind::FIRST_PUNCTUATION as u16 && v <= TokenKind::LAST_PUNCTUATION as u16
    }

    /// Whether this kind is a language keyword, including compound keywords.
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u16;
        v >= TokenKind::FIRST_KEYWORD as u16 && v <= TokenKind::LAST_KEYWORD as u16
    }

    /// Whether this kind exists only as a joined keyword pair. `ElseIf` is
    /// not in this group even when it was joined from `Else` + `If`; see the
    /// variant doc.
    #[inline]
    pub fn is_compound_keyword(self) -> bool {
        let v = self as u16;
        v >= TokenKind::FIRST_COMPOUND as u16 && v <= TokenKind::LAST_COMPOUND as u16
    }
}
