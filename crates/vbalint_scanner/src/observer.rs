//! Scan observer: an optional per-step tracing hook.

use vbalint_tokens::Token;

/// Receives scanner events as they happen.
///
/// Every method has an empty default body, and the scanner behaves
/// identically whether or not an observer is attached. This is the crate's
/// whole tracing surface; the scanner itself never logs.
pub trait ScanObserver {
    /// The character at `index` is about to be processed, with `buffer`
    /// still pending.
    fn character(&mut self, _index: usize, _ch: char, _buffer: &str) {}

    /// A token was emitted.
    fn token(&mut self, _token: &Token) {}

    /// The string delimiter at `index` opened a candidate string literal.
    fn string_opened(&mut self, _index: usize) {}

    /// An unterminated string was rolled back to the delimiter at `index`.
    fn string_rolled_back(&mut self, _index: usize) {}

    /// Comment mode started with the given opener text.
    fn comment_started(&mut self, _opener: &str) {}

    /// Comment mode ended.
    fn comment_finished(&mut self) {}
}
