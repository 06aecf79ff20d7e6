//! Token-stream passes run after the character scan.
//!
//! Each pass is a pure function from one token vector to a new one, so no
//! pass ever has to reason about index shifting in a list it is editing.
//! All passes preserve losslessness: the concatenated text of the output
//! equals the concatenated text of the input.

use vbalint_tokens::{Token, TokenKind};

use crate::language::{CommentDelimiter, LanguageDefinition};

/// Join `(keyword, single space, keyword)` triples into compound tokens.
///
/// `End` + `Function` becomes one `EndFunction` token carrying the text of
/// all three originals. Processing is strictly left to right; already-joined
/// output is never re-examined, so at most one pair joins per position.
pub fn join_compound_keywords(lang: &LanguageDefinition, tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if i + 2 < tokens.len()
            && tokens[i + 1].kind == TokenKind::Whitespace
            && tokens[i + 1].text == " "
        {
            if let Some(joined) = lang.compound(tokens[i].kind, tokens[i + 2].kind) {
                let text = format!(
                    "{}{}{}",
                    tokens[i].text,
                    tokens[i + 1].text,
                    tokens[i + 2].text
                );
                out.push(Token {
                    kind: joined,
                    text,
                    byte_offset: tokens[i].byte_offset,
                    line: tokens[i].line,
                });
                i += 3;
                continue;
            }
        }
        out.push(tokens[i].clone());
        i += 1;
    }
    out
}

/// Merge adjacent digit-and-dot tokens into numeric literal tokens.
///
/// A run starts at a bare-word or dot token made of digits and dots and
/// extends over immediately following tokens of the same shape. No dot means
/// an integer literal; exactly one dot with at least one digit means a
/// decimal. A bare `.` or a multi-dot run is rejected whole: every examined
/// token passes through unchanged and no suffix of the run is re-examined,
/// so a member-access dot never turns into a number.
pub fn coalesce_numeric_literals(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let start = &tokens[i];
        if matches!(start.kind, TokenKind::Identifier | TokenKind::Dot)
            && is_digits_and_dots(&start.text)
        {
            let mut text = start.text.clone();
            let mut j = i + 1;
            while j < tokens.len() && is_digits_and_dots(&tokens[j].text) {
                text.push_str(&tokens[j].text);
                j += 1;
            }
            let dots = text.matches('.').count();
            let has_digit = text.chars().any(|c| c.is_ascii_digit());
            if has_digit && dots <= 1 {
                let kind = if dots == 0 {
                    TokenKind::IntegerLiteral
                } else {
                    TokenKind::DecimalLiteral
                };
                out.push(Token {
                    kind,
                    text,
                    byte_offset: start.byte_offset,
                    line: start.line,
                });
            } else {
                out.extend(tokens[i..j].iter().cloned());
            }
            i = j;
            continue;
        }
        out.push(tokens[i].clone());
        i += 1;
    }
    out
}

/// Fold each comment opener and the tokens after it into one comment token.
///
/// The scanner emits a comment opener as its own token and leaves whatever
/// follows on the line as ordinary tokens (a marker glued to an identifier
/// never even enters comment mode). This pass absorbs those tokens: a
/// block-style comment ends at its terminator token, which is included; a
/// line-style comment ends at the line ending, which is excised and
/// re-emitted as its own EndOfLine token. Running out of tokens folds
/// everything absorbed so far.
pub fn aggregate_comments(lang: &LanguageDefinition, tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind.is_comment() {
            if let Some(delimiter) = lang.comment_for_opener(&tokens[i].text.to_lowercase()) {
                i = aggregate_one(lang, &tokens, i, delimiter, &mut out);
                continue;
            }
        }
        out.push(tokens[i].clone());
        i += 1;
    }
    out
}

/// Absorb one comment starting at `start`; returns the index after the
/// absorbed run.
fn aggregate_one(
    lang: &LanguageDefinition,
    tokens: &[Token],
    start: usize,
    delimiter: &CommentDelimiter,
    out: &mut Vec<Token>,
) -> usize {
    let opener = &tokens[start];
    let mut text = opener.text.clone();
    let mut j = start + 1;
    match &delimiter.terminator {
        None => {
            let eol = lang.line_ending();
            while j < tokens.len() && !text.contains(eol) {
                text.push_str(&tokens[j].text);
                j += 1;
            }
            if let Some(pos) = text.find(eol) {
                let after = text.split_off(pos + eol.len());
                let eol_text = text.split_off(pos);
                out.push(Token {
                    kind: opener.kind,
                    text,
                    byte_offset: opener.byte_offset,
                    line: opener.line,
                });
                out.push(Token {
                    kind: TokenKind::EndOfLine,
                    text: eol_text,
                    byte_offset: opener.byte_offset + pos,
                    line: opener.line,
                });
                if !after.is_empty() {
                    out.push(Token {
                        kind: TokenKind::Identifier,
                        text: after,
                        byte_offset: opener.byte_offset + pos + eol.len(),
                        line: opener.line + 1,
                    });
                }
                return j;
            }
            // No line ending before end of input: unterminated comment.
            out.push(Token {
                kind: opener.kind,
                text,
                byte_offset: opener.byte_offset,
                line: opener.line,
            });
            j
        }
        Some(terminator) => {
            while j < tokens.len() {
                let absorbed = &tokens[j];
                text.push_str(&absorbed.text);
                j += 1;
                if absorbed.text.eq_ignore_ascii_case(terminator) {
                    break;
                }
            }
            out.push(Token {
                kind: opener.kind,
                text,
                byte_offset: opener.byte_offset,
                line: opener.line,
            });
            j
        }
    }
}

/// Demote a keyword directly after a member-access dot to an identifier.
///
/// `obj.Next` must not look like the `Next` that closes a `For` scope.
/// Trivia between the dot and the member name is skipped; numeric literals
/// are left alone so decimals survive.
pub fn demote_member_names(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = tokens;
    for i in 0..out.len() {
        if out[i].kind != TokenKind::Dot {
            continue;
        }
        let mut j = i + 1;
        while j < out.len() && out[j].kind.is_trivia() {
            j += 1;
        }
        if j < out.len() && out[j].kind.is_keyword() {
            out[j].kind = TokenKind::Identifier;
        }
    }
    out
}

fn is_digits_and_dots(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit() || c == '.')
}
