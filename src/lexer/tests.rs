//! Unit tests for the lexer module.

use crate::errors::errors::{ErrorImpl, ErrorStage};

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.tx".to_string()))
        .unwrap()
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "alias break closed continue else enum export false fn if import interface loop mut return struct true when";
    let tokens = kinds(source);

    assert_eq!(
        tokens,
        vec![
            TokenKind::Alias,
            TokenKind::Break,
            TokenKind::Closed,
            TokenKind::Continue,
            TokenKind::Else,
            TokenKind::Enum,
            TokenKind::Export,
            TokenKind::False,
            TokenKind::Fn,
            TokenKind::If,
            TokenKind::Import,
            TokenKind::Interface,
            TokenKind::Loop,
            TokenKind::Mut,
            TokenKind::Return,
            TokenKind::Struct,
            TokenKind::True,
            TokenKind::When,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar_baz _underscore CamelCase this".to_string();
    let tokens = tokenize(source, Some("test.tx".to_string())).unwrap();

    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["foo", "bar_baz", "_underscore", "CamelCase", "this", "EOF"]
    );
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn test_identifier_stops_at_digit() {
    let tokens = tokenize("a1".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::Int);
    assert_eq!(tokens[1].value, "1");
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100.5".to_string();
    let tokens = tokenize(source, Some("test.tx".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Double);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Int);
    assert_eq!(tokens[3].kind, TokenKind::Double);
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_two_dots_in_double() {
    let result = tokenize("x = 1.2.3;".to_string(), Some("test.tx".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.get_stage(), ErrorStage::Lex);
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::TwoDotsInDouble {
            token: "1.2.3".to_string()
        }
    );
    assert_eq!(error.get_position().offset, 4);
}

#[test]
fn test_tokenize_strings_keep_raw_content() {
    let source = r#""hello" "with \n escape" """#.to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, r"with \n escape");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_unterminated_string() {
    let error = tokenize("a = \"never closed;".to_string(), None).unwrap_err();

    assert_eq!(error.get_internal(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_position().offset, 4);
    assert_eq!(error.get_position().file.as_str(), "shell");
}

#[test]
fn test_tokenize_chars() {
    let tokens = tokenize(r"'a' '\n' ' '".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Char);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::Char);
    assert_eq!(tokens[1].value, r"\n");
    assert_eq!(tokens[2].value, " ");
}

#[test]
fn test_unterminated_char() {
    let error = tokenize("'ab'".to_string(), None).unwrap_err();
    assert_eq!(error.get_internal(), &ErrorImpl::UnterminatedChar);

    let error = tokenize("'".to_string(), None).unwrap_err();
    assert_eq!(error.get_internal(), &ErrorImpl::UnterminatedChar);
}

#[test]
fn test_tokenize_operators_longest_match() {
    let tokens = kinds("== = ++ += + -- -= - *= * /= / != ! >= > <= < :: : || &&");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Equals,
            TokenKind::Assignment,
            TokenKind::PlusPlus,
            TokenKind::PlusEquals,
            TokenKind::Plus,
            TokenKind::MinusMinus,
            TokenKind::MinusEquals,
            TokenKind::Dash,
            TokenKind::StarEquals,
            TokenKind::Star,
            TokenKind::SlashEquals,
            TokenKind::Slash,
            TokenKind::NotEquals,
            TokenKind::Not,
            TokenKind::GreaterEquals,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::Less,
            TokenKind::ColonColon,
            TokenKind::Colon,
            TokenKind::Or,
            TokenKind::And,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_operators_without_spaces() {
    let tokens = kinds("a==b;c+=1");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::PlusEquals,
            TokenKind::Int,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = kinds("{ } [ ] ( ) ; . ,");

    assert_eq!(
        tokens,
        vec![
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_lone_pipe_is_error() {
    let error = tokenize("a | b".to_string(), None).unwrap_err();

    assert_eq!(
        error.get_internal(),
        &ErrorImpl::IncompleteOperator {
            expected: "||".to_string(),
            found: "|".to_string()
        }
    );

    let error = tokenize("a & b".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "IncompleteOperator");
}

#[test]
fn test_comments_are_tokens() {
    let source = "x // trailing comment\n/= y";
    let tokens = tokenize(source.to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Comment);
    assert_eq!(tokens[1].value, " trailing comment");
    assert_eq!(tokens[2].kind, TokenKind::SlashEquals);
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
}

#[test]
fn test_line_tracking() {
    let source = "a\nb\n\n  \"multi\nline\" c";
    let tokens = tokenize(source.to_string(), Some("lines.tx".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.line, 1);
    assert_eq!(tokens[1].span.start.line, 2);
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].span.start.line, 4);
    assert_eq!(tokens[2].span.end.line, 5);
    assert_eq!(tokens[3].value, "c");
    assert_eq!(tokens[3].span.start.line, 5);
    assert_eq!(tokens[3].span.start.file.as_str(), "lines.tx");
}

#[test]
fn test_spans_are_byte_offsets() {
    let tokens = tokenize("fn  main".to_string(), None).unwrap();

    assert_eq!(tokens[0].span.start.offset, 0);
    assert_eq!(tokens[0].span.end.offset, 2);
    assert_eq!(tokens[1].span.start.offset, 4);
    assert_eq!(tokens[1].span.end.offset, 8);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
    assert_eq!(tokens[2].span.start.offset, 8);
}

#[test]
fn test_unrecognised_character() {
    let error = tokenize("int x = 5 % 2;".to_string(), None).unwrap_err();

    assert_eq!(
        error.get_internal(),
        &ErrorImpl::UnrecognisedToken {
            token: "%".to_string()
        }
    );
    assert_eq!(error.get_position().offset, 10);
}

#[test]
fn test_empty_source_yields_only_eof() {
    let tokens = kinds("   \n\t ");
    assert_eq!(tokens, vec![TokenKind::EOF]);
}
