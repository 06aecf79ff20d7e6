//! vbalint_tokens: The token model shared by the tokenizer and rule engine.
//!
//! Defines the closed [`TokenKind`] enumeration and the [`Token`] record.
//! Downstream style rules match on `TokenKind` values, so the enumeration is
//! stable: variants are appended, never renumbered.

mod kind;
mod token;

pub use kind::TokenKind;
pub use token::Token;
