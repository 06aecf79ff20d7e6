//! vbalint_core: Core text utilities for the vbalint analysis toolkit.
//!
//! Provides byte spans and line lookup used by the tokenizer and the
//! downstream rule engine.

pub mod text;

pub use text::{LineMap, TextPos, TextSpan};
