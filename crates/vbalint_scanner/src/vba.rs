//! The bundled VBA language definition.
//!
//! VBA class modules: `Sub`/`Function`/`Property` blocks, `If/Then/Else`,
//! `For/Next`, `Do/Loop`, `While/Wend`, `Select Case`, `'` and `Rem` line
//! comments, and double-quoted strings escaped by doubling the quote.

use vbalint_tokens::TokenKind as K;

use crate::language::{LanguageDefinition, LanguageDefinitionBuilder, LanguageError};
use crate::scope::ScopeDescriptor;

impl LanguageDefinition {
    /// The VBA definition with the conventional `\r\n` line ending.
    pub fn vba() -> Result<Self, LanguageError> {
        Self::vba_with_line_ending("\r\n")
    }

    /// The VBA definition over a caller-chosen line ending.
    pub fn vba_with_line_ending(line_ending: &str) -> Result<Self, LanguageError> {
        LanguageDefinitionBuilder::new()
            .line_ending(line_ending)
            .escape_character('"')
            .string_delimiter('"')
            // Keywords.
            .token("and", K::And)
            .token("as", K::As)
            .token("attribute", K::Attribute)
            .token("begin", K::Begin)
            .token("case", K::Case)
            .token("class", K::Class)
            .token("dim", K::Dim)
            .token("do", K::Do)
            .token("each", K::Each)
            .token("else", K::Else)
            .token("elseif", K::ElseIf)
            .token("end", K::End)
            .token("false", K::False)
            .token("for", K::For)
            .token("function", K::Function)
            .token("if", K::If)
            .token("implements", K::Implements)
            .token("is", K::Is)
            .token("let", K::Let)
            .token("loop", K::Loop)
            .token("next", K::Next)
            .token("not", K::Not)
            .token("nothing", K::Nothing)
            .token("option", K::Option)
            .token("or", K::Or)
            .token("private", K::Private)
            .token("property", K::Property)
            .token("public", K::Public)
            .token("select", K::Select)
            .token("set", K::Set)
            .token("sub", K::Sub)
            .token("then", K::Then)
            .token("true", K::True)
            .token("wend", K::Wend)
            .token("while", K::While)
            // Punctuation and operators.
            .token("(", K::OpenParen)
            .token(")", K::CloseParen)
            .token("{", K::OpenBrace)
            .token("}", K::CloseBrace)
            .token("[", K::OpenBracket)
            .token("]", K::CloseBracket)
            .token(".", K::Dot)
            .token(",", K::Comma)
            .token(";", K::Semicolon)
            .token(":", K::Colon)
            .token("+", K::Plus)
            .token("-", K::Minus)
            .token("*", K::Star)
            .token("/", K::Slash)
            .token("%", K::Percent)
            .token("^", K::Caret)
            .token("&", K::Ampersand)
            .token("=", K::Equals)
            .token(":=", K::ColonEquals)
            .token("<", K::LessThan)
            .token(">", K::GreaterThan)
            .token("<=", K::LessThanEquals)
            .token(">=", K::GreaterThanEquals)
            .token("<>", K::NotEquals)
            // Comments. Both forms run to the end of the line.
            .token("'", K::Comment)
            .token("rem", K::Comment)
            .line_comment("'")
            .line_comment("rem")
            // Compound keywords.
            .compound(K::End, K::Function, K::EndFunction)
            .compound(K::End, K::Sub, K::EndSub)
            .compound(K::End, K::Property, K::EndProperty)
            .compound(K::End, K::Select, K::EndSelect)
            .compound(K::End, K::If, K::EndIf)
            .compound(K::Select, K::Case, K::SelectCase)
            .compound(K::For, K::Each, K::ForEach)
            .compound(K::Case, K::Else, K::CaseElse)
            .compound(K::Else, K::If, K::ElseIf)
            // Scopes. An If branch is strict (its body starts at Then) and
            // the whole chain shares one End If. A Case scope closes at the
            // next sibling Case, Case Else, or the enclosing End Select,
            // whichever comes first.
            .scope(
                ScopeDescriptor::new(K::If)
                    .strict()
                    .shared()
                    .starts_at(K::Then)
                    .closes_at(K::EndIf)
                    .continues_with(K::ElseIf)
                    .continues_with(K::Else),
            )
            .scope(
                ScopeDescriptor::new(K::ElseIf)
                    .strict()
                    .shared()
                    .starts_at(K::Then)
                    .closes_at(K::EndIf)
                    .continues_with(K::ElseIf)
                    .continues_with(K::Else),
            )
            .scope(
                ScopeDescriptor::new(K::Else)
                    .shared()
                    .starts_at(K::EndOfLine)
                    .closes_at(K::EndIf)
                    .continues_with(K::ElseIf)
                    .continues_with(K::Else),
            )
            .scope(
                ScopeDescriptor::new(K::For)
                    .starts_at(K::EndOfLine)
                    .closes_at(K::Next),
            )
            .scope(
                ScopeDescriptor::new(K::ForEach)
                    .starts_at(K::EndOfLine)
                    .closes_at(K::Next),
            )
            .scope(
                ScopeDescriptor::new(K::Function)
                    .starts_at(K::EndOfLine)
                    .closes_at(K::EndFunction),
            )
            .scope(
                ScopeDescriptor::new(K::Sub)
                    .starts_at(K::EndOfLine)
                    .closes_at(K::EndSub),
            )
            .scope(
                ScopeDescriptor::new(K::Property)
                    .starts_at(K::EndOfLine)
                    .closes_at(K::EndProperty),
            )
            .scope(
                ScopeDescriptor::new(K::While)
                    .starts_at(K::EndOfLine)
                    .closes_at(K::Wend),
            )
            .scope(
                ScopeDescriptor::new(K::Do)
                    .strict()
                    .starts_at(K::EndOfLine)
                    .closes_at(K::Loop),
            )
            .scope(
                ScopeDescriptor::new(K::SelectCase)
                    .strict()
                    .shared()
                    .starts_at(K::EndOfLine)
                    .closes_at(K::EndSelect)
                    .continues_with(K::Case),
            )
            .scope(
                ScopeDescriptor::new(K::Case)
                    .strict()
                    .shared()
                    .starts_at(K::EndOfLine)
                    .closes_at(K::Case)
                    .closes_at(K::CaseElse)
                    .closes_at(K::EndSelect)
                    .continues_with(K::Case)
                    .continues_with(K::CaseElse),
            )
            .scope(
                ScopeDescriptor::new(K::CaseElse)
                    .strict()
                    .shared()
                    .starts_at(K::EndOfLine)
                    .closes_at(K::EndSelect)
                    .continues_with(K::Case),
            )
            .scope(
                ScopeDescriptor::new(K::Begin)
                    .starts_at(K::EndOfLine)
                    .closes_at(K::End),
            )
            .build()
    }
}
