//! The character scanner: raw source text to primitive tokens.
//!
//! One forward pass over the characters with bounded lookahead. The scanner
//! grows a buffer and cuts it into tokens wherever the token table says a
//! literal ends, keeping whitespace and non-whitespace strictly separate.
//! String literals and comments are tracked inline; an unterminated string
//! is rolled back and re-scanned as ordinary text rather than reported as an
//! error, because a linter has to produce output for broken source too.

use vbalint_core::LineMap;
use vbalint_tokens::{Token, TokenKind};

use crate::language::{CommentDelimiter, LanguageDefinition};
use crate::observer::ScanObserver;
use crate::passes;

/// Scans source text into tokens using a shared language definition.
pub struct Scanner<'a> {
    lang: &'a LanguageDefinition,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over a language definition.
    pub fn new(lang: &'a LanguageDefinition) -> Self {
        Self { lang }
    }

    /// Scan `source` into primitive tokens.
    ///
    /// Never fails: unterminated strings and comments degrade into
    /// plain-text tokens, and concatenating the emitted token texts always
    /// reproduces `source` exactly.
    pub fn scan(&self, source: &str) -> Vec<Token> {
        Scan::new(self.lang, source, None).run()
    }

    /// Scan with an observer receiving per-step events.
    pub fn scan_with_observer(
        &self,
        source: &str,
        observer: &mut dyn ScanObserver,
    ) -> Vec<Token> {
        Scan::new(self.lang, source, Some(observer)).run()
    }

    /// Run the full pipeline: scan, then join compound keywords, coalesce
    /// numeric literals, aggregate comments, and demote member names.
    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        let tokens = self.scan(source);
        let tokens = passes::join_compound_keywords(self.lang, tokens);
        let tokens = passes::coalesce_numeric_literals(tokens);
        let tokens = passes::aggregate_comments(self.lang, tokens);
        passes::demote_member_names(tokens)
    }
}

/// Transient state for one scan. Created per call, discarded afterwards.
struct Scan<'a, 'o> {
    lang: &'a LanguageDefinition,
    chars: Vec<char>,
    line_map: LineMap,
    tokens: Vec<Token>,
    /// Byte offset of the next token to be emitted. Because tokenization is
    /// lossless this is exactly the total byte length of all emitted text.
    offset: usize,
    buffer: String,
    /// The delimiter of the string we are inside, if any.
    in_string: Option<char>,
    /// Index of the opening string delimiter, for rollback.
    string_start: usize,
    /// Buffer contents from before the string opened, for rollback.
    pre_string_buffer: String,
    /// The comment form we are inside, if any.
    in_comment: Option<CommentDelimiter>,
    /// The buffer was consumed by a token and must be reset at the end of
    /// the current character.
    clean_buffer: bool,
    observer: Option<&'o mut dyn ScanObserver>,
}

impl<'a, 'o> Scan<'a, 'o> {
    fn new(
        lang: &'a LanguageDefinition,
        source: &str,
        observer: Option<&'o mut dyn ScanObserver>,
    ) -> Self {
        Self {
            lang,
            chars: source.chars().collect(),
            line_map: LineMap::new(source, lang.line_ending()),
            tokens: Vec::new(),
            offset: 0,
            buffer: String::new(),
            in_string: None,
            string_start: 0,
            pre_string_buffer: String::new(),
            in_comment: None,
            clean_buffer: false,
            observer,
        }
    }

    fn run(mut self) -> Vec<Token> {
        let mut i = 0;
        while i < self.chars.len() {
            let mut ch = self.chars[i];
            if let Some(obs) = self.observer.as_deref_mut() {
                obs.character(i, ch, &self.buffer);
            }

            // Keep whitespace and non-whitespace out of the same buffer:
            // flush before the incoming character would mix them.
            if self.in_string.is_none() && self.in_comment.is_none() && !self.buffer.is_empty() {
                if !ch.is_whitespace() && is_blank(&self.buffer) {
                    let ws = std::mem::take(&mut self.buffer);
                    self.flush_whitespace(&ws);
                } else if ch.is_whitespace() && !is_blank(&self.buffer) {
                    let text = std::mem::take(&mut self.buffer);
                    self.emit(TokenKind::Identifier, text);
                }
            }

            // String literals.
            if self.in_comment.is_none() && self.lang.is_string_delimiter(ch) {
                if self.in_string == Some(ch) {
                    // This could be the end of the string, unless the
                    // delimiter is escaped. With doubled-delimiter escaping
                    // the first of two delimiters is the escape itself.
                    let escapes = self.escapes_before(i);
                    let doubled = self.lang.escape_character() == ch
                        && self.chars.get(i + 1) == Some(&ch);
                    if escapes % 2 == 0 && !doubled {
                        self.close_string(ch);
                        i += 1;
                        continue;
                    }
                } else if self.in_string.is_none() {
                    self.in_string = Some(ch);
                    self.string_start = i;
                    self.pre_string_buffer = self.buffer.clone();
                    if let Some(obs) = self.observer.as_deref_mut() {
                        obs.string_opened(i);
                    }
                }
            }

            // A line ending inside a string means the delimiter probably
            // never started a string at all (a stray quote in prose, say):
            // roll back to it and re-scan it as ordinary text.
            if self.in_string.is_some() && is_line_break(ch) {
                let escaped = i > 0 && self.chars[i - 1] == self.lang.escape_character();
                if !escaped {
                    i = self.string_start;
                    ch = self.chars[i];
                    self.buffer = std::mem::take(&mut self.pre_string_buffer);
                    self.in_string = None;
                    if let Some(obs) = self.observer.as_deref_mut() {
                        obs.string_rolled_back(i);
                    }
                }
            }

            self.buffer.push(ch);

            // No token matching inside strings.
            if self.in_string.is_some() {
                i += 1;
                continue;
            }

            if self.in_comment.is_none() {
                self.match_tokens(i, ch);
            }

            self.track_comments(i);

            if self.clean_buffer {
                self.buffer.clear();
                self.clean_buffer = false;
            }
            i += 1;
        }
        self.finish();
        self.tokens
    }

    /// Match the buffer or the current character against the token table,
    /// with lookahead bounded by the longest registered literal.
    fn match_tokens(&mut self, i: usize, ch: char) {
        let lang = self.lang;
        let table = lang.table();
        let lower = self.buffer.to_lowercase();

        let at_boundary = !is_word_char(ch)
            || !self.chars.get(i + 1).is_some_and(|c| is_word_char(*c));

        if let Some(kind) = table.lookup(&lower).filter(|_| at_boundary) {
            // The buffer is a known token, but a longer one may start here:
            // `for` inside `foreach` is not a For token.
            let lookahead = table.max_literal_len().saturating_sub(lower.chars().count());
            let mut matched_longer = false;
            let mut char_buffer = self.buffer.clone();
            for x in 1..=lookahead {
                let Some(&next) = self.chars.get(i + x) else {
                    break;
                };
                char_buffer.push(next);
                if let Some(new_kind) = table.lookup(&char_buffer) {
                    // A comment opener never upgrades to a doc comment when
                    // the very next character starts another comment: `//`
                    // followed by `//` is two line comments, not `///`.
                    if kind.is_comment()
                        && new_kind == TokenKind::DocComment
                        && lower.chars().next().is_some_and(|first| {
                            self.chars.get(i + x + 1) == Some(&first)
                        })
                    {
                        continue;
                    }
                    matched_longer = true;
                    break;
                }
            }
            if !matched_longer {
                let text = self.buffer.clone();
                self.emit(kind, text);
                self.clean_buffer = true;
            }
        } else if let Some(kind) = table.lookup_char(ch) {
            // The character itself is a token. Whatever preceded it in the
            // buffer is ordinary text.
            let mut prefix = self.buffer.clone();
            prefix.pop();
            if !prefix.is_empty() {
                self.emit(TokenKind::Identifier, prefix);
            }
            // Same longest-match discipline as above: `=` must not win when
            // `:=` or `<=` is forming. The character itself already counts
            // toward the longest-literal bound.
            let mut char_buffer = ch.to_string();
            let mut matched_longer = false;
            for x in 1..=table.max_literal_len().saturating_sub(1) {
                let Some(&next) = self.chars.get(i + x) else {
                    break;
                };
                char_buffer.push(next);
                if table.lookup(&char_buffer).is_some() {
                    matched_longer = true;
                    break;
                }
            }
            if !matched_longer {
                self.emit(kind, ch.to_string());
                self.clean_buffer = true;
            } else {
                self.buffer.clear();
                self.buffer.push(ch);
            }
        }
    }

    /// Enter, leave, and accumulate comment mode.
    fn track_comments(&mut self, i: usize) {
        let lower = self.buffer.to_lowercase();
        if let Some(comment) = self.in_comment.clone() {
            match &comment.terminator {
                None => {
                    // Line comment: over once the buffer holds a line ending.
                    if self.buffer.contains(self.lang.line_ending()) {
                        self.in_comment = None;
                        if let Some(obs) = self.observer.as_deref_mut() {
                            obs.comment_finished();
                        }
                        if !self.clean_buffer {
                            let text = std::mem::take(&mut self.buffer);
                            self.emit(TokenKind::Identifier, text);
                        }
                    }
                }
                Some(terminator) => {
                    if self.buffer.ends_with(terminator.as_str()) {
                        self.in_comment = None;
                        if let Some(obs) = self.observer.as_deref_mut() {
                            obs.comment_finished();
                        }
                        let mut body = std::mem::take(&mut self.buffer);
                        let tail = body.split_off(body.len() - terminator.len());
                        if !body.is_empty() {
                            self.emit(TokenKind::Identifier, body);
                        }
                        let kind = self
                            .lang
                            .table()
                            .lookup(&tail)
                            .unwrap_or(TokenKind::Identifier);
                        self.emit(kind, tail);
                    }
                }
            }
        } else if self.clean_buffer && self.lang.is_comment_opener(&lower) {
            // The opener token was just emitted. An escape character right
            // before it cancels the comment, unless that character belongs
            // to a string literal that just closed.
            let opener_len = self.buffer.chars().count();
            let escaped_by_text = (i + 1)
                .checked_sub(opener_len + 1)
                .and_then(|prev| self.chars.get(prev))
                .is_some_and(|&prev| prev == self.lang.escape_character())
                && !matches!(
                    self.tokens.iter().rev().nth(1),
                    Some(token) if token.kind == TokenKind::StringLiteral
                );
            if escaped_by_text {
                self.unwind_last_token();
            } else {
                self.in_comment = Some(
                    self.lang
                        .comment_for_opener(&lower)
                        .cloned()
                        .unwrap_or(CommentDelimiter {
                            opener: lower.clone(),
                            terminator: None,
                        }),
                );
                if let Some(obs) = self.observer.as_deref_mut() {
                    obs.comment_started(&lower);
                }
            }
        }
    }

    /// Replace the just-emitted token with one token per character, so an
    /// escaped comment marker is not treated as a comment. Comment kinds are
    /// demoted to plain text; otherwise the aggregation pass would fold the
    /// line back into a comment and undo the cancellation.
    fn unwind_last_token(&mut self) {
        let Some(last) = self.tokens.pop() else {
            return;
        };
        self.offset -= last.text.len();
        for ch in last.text.chars() {
            let kind = self
                .lang
                .table()
                .lookup_char(ch)
                .filter(|kind| !kind.is_comment())
                .unwrap_or(TokenKind::Identifier);
            self.emit(kind, ch.to_string());
        }
    }

    /// Count escape characters immediately before `i`, bounded to the
    /// string's own content so the opening delimiter never counts.
    fn escapes_before(&self, i: usize) -> usize {
        let escape = self.lang.escape_character();
        let mut count = 0;
        let mut x = i;
        while x > self.string_start + 1 {
            if self.chars[x - 1] != escape {
                break;
            }
            count += 1;
            x -= 1;
        }
        count
    }

    /// Emit the string literal ending at the current delimiter, flushing any
    /// pre-string buffer text first.
    fn close_string(&mut self, delimiter: char) {
        let pre = std::mem::take(&mut self.pre_string_buffer);
        let mut text = std::mem::take(&mut self.buffer);
        let mut literal = text.split_off(pre.len());
        literal.push(delimiter);
        if !text.is_empty() {
            self.emit(TokenKind::Identifier, text);
        }
        self.emit(TokenKind::StringLiteral, literal);
        self.in_string = None;
    }

    /// Flush a whitespace run, cutting out each line-ending occurrence as
    /// its own EndOfLine token.
    fn flush_whitespace(&mut self, ws: &str) {
        let eol = self.lang.line_ending().to_string();
        let mut rest = ws;
        while let Some(pos) = rest.find(&eol) {
            if pos > 0 {
                self.emit(TokenKind::Whitespace, rest[..pos].to_string());
            }
            self.emit(TokenKind::EndOfLine, eol.clone());
            rest = &rest[pos + eol.len()..];
        }
        if !rest.is_empty() {
            self.emit(TokenKind::Whitespace, rest.to_string());
        }
    }

    /// Flush whatever is left at end of input so every byte is covered.
    fn finish(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        if self.in_string.is_none() && self.in_comment.is_none() && is_blank(&text) {
            self.flush_whitespace(&text);
        } else {
            // Trailing text, or an unterminated string or comment.
            self.emit(TokenKind::Identifier, text);
        }
    }

    fn emit(&mut self, kind: TokenKind, text: String) {
        let line = self.line_map.line_number(self.offset as u32);
        let token = Token {
            kind,
            byte_offset: self.offset,
            line,
            text,
        };
        self.offset += token.text.len();
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.token(&token);
        }
        self.tokens.push(token);
    }
}

/// Characters that may continue a word, so a keyword match inside a longer
/// word (`for` in `format`) is not a token boundary.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}
