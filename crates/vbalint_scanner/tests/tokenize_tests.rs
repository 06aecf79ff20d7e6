//! Full-pipeline integration tests: scan plus join, coalesce, aggregate,
//! and demote passes, against the bundled VBA definition.

use vbalint_scanner::{LanguageDefinition, Scanner};
use vbalint_tokens::{Token, TokenKind};

fn vba() -> LanguageDefinition {
    LanguageDefinition::vba_with_line_ending("\n").unwrap()
}

fn tokenize(lang: &LanguageDefinition, source: &str) -> Vec<Token> {
    Scanner::new(lang).tokenize(source)
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

fn rejoin(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// A small but representative class-module body.
const FIXTURE: &str = "\
Attribute VB_Name = \"Counter\"
Public Function Describe(n) As String
    Dim label As String
    If n > 1.5 Then
        label = \"many\"
    ElseIf n = 1 Then
        label = \"one \"\"item\"\"\"
    Else
        label = obj.Next
    End If
    Select Case n
        Case 1
            label = label & \"!\"
        Case Else
            label = \"none\" ' fallback
    End Select
    For Each item In items
        total = total + item
    Next
    Describe = label
End Function
";

#[test]
fn test_end_to_end_function_header() {
    let lang = vba();
    let tokens = tokenize(&lang, "Public Function Foo() As Boolean\nEnd Function");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Public,
            TokenKind::Whitespace,
            TokenKind::Function,
            TokenKind::Whitespace,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Whitespace,
            TokenKind::As,
            TokenKind::Whitespace,
            TokenKind::Identifier,
            TokenKind::EndOfLine,
            TokenKind::EndFunction,
        ]
    );
    assert_eq!(tokens[4].text, "Foo");
    assert_eq!(tokens[10].text, "Boolean");
    assert_eq!(tokens[12].text, "End Function");
    assert_eq!(tokens[12].line, 2);
}

#[test]
fn test_compound_join() {
    let lang = vba();
    for (source, compound) in [
        ("End Function", TokenKind::EndFunction),
        ("End Sub", TokenKind::EndSub),
        ("End Property", TokenKind::EndProperty),
        ("End Select", TokenKind::EndSelect),
        ("End If", TokenKind::EndIf),
        ("Select Case", TokenKind::SelectCase),
        ("For Each", TokenKind::ForEach),
        ("Case Else", TokenKind::CaseElse),
        ("Else If", TokenKind::ElseIf),
    ] {
        let tokens = tokenize(&lang, source);
        assert_eq!(tokens.len(), 1, "{source} did not join");
        assert_eq!(tokens[0].kind, compound);
        assert_eq!(tokens[0].text, source);
    }
}

#[test]
fn test_join_requires_exactly_one_space() {
    let lang = vba();
    let tokens = tokenize(&lang, "End  Function");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::End, TokenKind::Whitespace, TokenKind::Function]
    );
}

#[test]
fn test_numeric_literals() {
    let lang = vba();
    let tokens = tokenize(&lang, "x = 42\ny = 1.0\n");
    assert_eq!(tokens[4].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[4].text, "42");
    assert_eq!(tokens[10].kind, TokenKind::DecimalLiteral);
    assert_eq!(tokens[10].text, "1.0");
}

#[test]
fn test_multi_dot_run_never_becomes_a_number() {
    let lang = vba();
    let tokens = tokenize(&lang, "y = 3.4.5\n");
    assert!(tokens.iter().all(|t| !t.kind.is_numeric_literal()));
    assert_eq!(rejoin(&tokens), "y = 3.4.5\n");

    // In particular the tail of the rejected run must not fuse into `.5`.
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Dot));
    assert!(tokens.iter().all(|t| t.text != ".5"));
}

#[test]
fn test_member_access_dot_is_not_a_number() {
    let lang = vba();
    let tokens = tokenize(&lang, "obj.Name");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Identifier, TokenKind::Dot, TokenKind::Identifier]
    );
}

#[test]
fn test_member_demotion() {
    let lang = vba();
    let tokens = tokenize(&lang, "a = obj.Next\n");
    let demoted = &tokens[6];
    assert_eq!(demoted.text, "Next");
    assert_eq!(demoted.kind, TokenKind::Identifier);

    // The same word outside member access stays a keyword.
    let tokens = tokenize(&lang, "Next\n");
    assert_eq!(tokens[0].kind, TokenKind::Next);
}

#[test]
fn test_line_comment_aggregation() {
    let lang = vba();
    let tokens = tokenize(&lang, "x = 1 ' note to self\ny = 2\n");
    let comment = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Comment)
        .unwrap();
    assert_eq!(comment.text, "' note to self");
    // The line ending survives as its own token right after the comment.
    let at = tokens.iter().position(|t| t.kind == TokenKind::Comment).unwrap();
    assert_eq!(tokens[at + 1].kind, TokenKind::EndOfLine);
    assert_eq!(rejoin(&tokens), "x = 1 ' note to self\ny = 2\n");
}

#[test]
fn test_glued_comment_marker() {
    let lang = vba();
    let tokens = tokenize(&lang, "x' End If\n");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Identifier, TokenKind::Comment, TokenKind::EndOfLine]
    );
    assert_eq!(tokens[1].text, "' End If");
}

#[test]
fn test_rem_comment() {
    let lang = vba();
    let tokens = tokenize(&lang, "Rem whole-line remark\nx = 1\n");
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].text, "Rem whole-line remark");
    assert_eq!(tokens[1].kind, TokenKind::EndOfLine);

    // Rem glued into a longer word is no comment.
    let tokens = tokenize(&lang, "Removed = 1\n");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].text, "Removed");
}

#[test]
fn test_escaped_comment_marker_does_not_start_a_comment() {
    let lang = LanguageDefinition::builder()
        .escape_character('\\')
        .token("\\", TokenKind::Identifier)
        .token("#", TokenKind::Comment)
        .token("end", TokenKind::End)
        .line_comment("#")
        .build()
        .unwrap();

    // The escaped marker is demoted to plain text, so nothing after it is
    // comment body and aggregation has nothing to fold.
    let tokens = tokenize(&lang, "\\# end\n");
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Comment));
    assert!(tokens.iter().any(|t| t.kind == TokenKind::End));
    assert_eq!(rejoin(&tokens), "\\# end\n");

    // Unescaped, the same marker opens a comment as usual.
    let tokens = tokenize(&lang, "# end\n");
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].text, "# end");
}

#[test]
fn test_block_comment_runs_to_terminator() {
    let lang = LanguageDefinition::builder()
        .token("/*", TokenKind::Comment)
        .block_comment("/*", "*/")
        .build()
        .unwrap();

    let tokens = tokenize(&lang, "/* hi */x");
    assert_eq!(kinds(&tokens), vec![TokenKind::Comment, TokenKind::Identifier]);
    assert_eq!(tokens[0].text, "/* hi */");
    assert_eq!(tokens[1].text, "x");

    // The terminator binds the comment even across a line ending.
    let tokens = tokenize(&lang, "/* a\nb */c");
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].text, "/* a\nb */");

    // Unterminated: everything to end of input folds in.
    let tokens = tokenize(&lang, "/* hi");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].text, "/* hi");
}

#[test]
fn test_unterminated_comment_at_end_of_input() {
    let lang = vba();
    let tokens = tokenize(&lang, "x = 1 ' trailing");
    let last = tokens.last().unwrap();
    assert_eq!(last.kind, TokenKind::Comment);
    assert_eq!(last.text, "' trailing");
    assert_eq!(rejoin(&tokens), "x = 1 ' trailing");
}

#[test]
fn test_fixture_losslessness_and_idempotence() {
    let lang = vba();
    let first = tokenize(&lang, FIXTURE);
    assert_eq!(rejoin(&first), FIXTURE);
    let second = tokenize(&lang, &rejoin(&first));
    assert_eq!(first, second);
}

#[test]
fn test_fixture_position_integrity() {
    let lang = vba();
    let tokens = tokenize(&lang, FIXTURE);
    let mut offset = 0;
    for token in &tokens {
        assert_eq!(token.byte_offset, offset, "offset drift at {:?}", token.text);
        let line = FIXTURE[..offset].matches('\n').count() as u32 + 1;
        assert_eq!(token.line, line, "line drift at {:?}", token.text);
        offset += token.text.len();
    }
    assert_eq!(offset, FIXTURE.len());
}

#[test]
fn test_fixture_structure() {
    let lang = vba();
    let tokens = tokenize(&lang, FIXTURE);
    let significant: Vec<TokenKind> = kinds(&tokens)
        .into_iter()
        .filter(|k| !k.is_trivia())
        .collect();

    // One escaped string literal, folded whole.
    assert!(tokens
        .iter()
        .any(|t| t.kind == TokenKind::StringLiteral && t.text == "\"one \"\"item\"\"\""));
    // Select Case machinery joined.
    assert!(significant.contains(&TokenKind::SelectCase));
    assert!(significant.contains(&TokenKind::CaseElse));
    assert!(significant.contains(&TokenKind::EndSelect));
    assert!(significant.contains(&TokenKind::ForEach));
    assert!(significant.contains(&TokenKind::EndIf));
    assert!(significant.contains(&TokenKind::EndFunction));
    // 1.5 coalesced.
    assert!(tokens
        .iter()
        .any(|t| t.kind == TokenKind::DecimalLiteral && t.text == "1.5"));
    // obj.Next demoted, so the only Next left is the loop closer.
    let next_keywords = tokens.iter().filter(|t| t.kind == TokenKind::Next).count();
    assert_eq!(next_keywords, 1);
    // The comment kept its text and nothing from it leaked as keywords.
    assert!(tokens
        .iter()
        .any(|t| t.kind == TokenKind::Comment && t.text == "' fallback"));
}

#[test]
fn test_scope_descriptor_completeness() {
    let lang = vba();
    let scopes = lang.scopes();
    assert!(!scopes.is_empty());
    for descriptor in scopes.iter() {
        assert!(
            !descriptor.closers.is_empty(),
            "{:?} has no closers",
            descriptor.opener
        );
        for closer in &descriptor.closers {
            assert!(scopes.is_end_scope(*closer));
        }
        if descriptor.shared {
            assert!(
                descriptor
                    .continuations
                    .iter()
                    .any(|k| *k != descriptor.opener && scopes.is_opener(*k)),
                "{:?} is shared but has no sibling opener",
                descriptor.opener
            );
        }
    }
}

#[test]
fn test_descriptors_annotate_opener_tokens() {
    let lang = vba();
    let tokens = tokenize(&lang, "If x Then\ny = 1\nEnd If\n");
    let opener = &tokens[0];
    let descriptor = lang.descriptor_for(opener.kind).unwrap();
    assert!(descriptor.strict);
    assert!(descriptor.body_start.contains(&TokenKind::Then));
    assert!(descriptor.closers.contains(&TokenKind::EndIf));
    // Non-openers have no descriptor.
    assert!(lang.descriptor_for(TokenKind::Identifier).is_none());
    assert!(lang.descriptor_for(TokenKind::EndIf).is_none());
}
