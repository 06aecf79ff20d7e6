//! vbalint_scanner: Tokenizer for BASIC-family source, driven by a pluggable
//! language definition.
//!
//! The scanner converts raw source text into a lossless stream of typed
//! tokens: every input byte lands in exactly one token, so the downstream
//! scope walker and style rules can reconstruct and report on the original
//! source. Scanning never fails; broken input degrades into plain-text
//! tokens. Only building a [`LanguageDefinition`] can fail, and it fails
//! before any scan begins.
//!
//! The pipeline is a character scan followed by four token-stream passes:
//! compound-keyword joining, numeric-literal coalescing, comment
//! aggregation, and member-name demotion. [`Scanner::tokenize`] runs all of
//! them; the passes are also exported individually.

mod language;
mod observer;
mod passes;
mod scanner;
mod scope;
mod vba;

pub use language::{
    CommentDelimiter, LanguageDefinition, LanguageDefinitionBuilder, LanguageError, TokenTable,
};
pub use observer::ScanObserver;
pub use passes::{
    aggregate_comments, coalesce_numeric_literals, demote_member_names, join_compound_keywords,
};
pub use scanner::Scanner;
pub use scope::{ScopeDescriptor, ScopeDescriptorTable};
