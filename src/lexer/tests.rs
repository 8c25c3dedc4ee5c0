//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals with width suffixes
//! - String and char literals with escape sequences
//! - Operators (longest match first) and punctuation
//! - Comments
//! - Error tokens and positions

use super::{lexer::tokenize, tokens::TokenKind};
use crate::FileId;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, FileId(0))
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "package import as fn struct enum type if else for in match return mut pub const global true false";
    let tokens = tokenize(source, FileId(0));

    assert_eq!(tokens[0].kind, TokenKind::Package);
    assert_eq!(tokens[1].kind, TokenKind::Import);
    assert_eq!(tokens[2].kind, TokenKind::As);
    assert_eq!(tokens[3].kind, TokenKind::Fn);
    assert_eq!(tokens[4].kind, TokenKind::Struct);
    assert_eq!(tokens[5].kind, TokenKind::Enum);
    assert_eq!(tokens[6].kind, TokenKind::Type);
    assert_eq!(tokens[7].kind, TokenKind::If);
    assert_eq!(tokens[8].kind, TokenKind::Else);
    assert_eq!(tokens[9].kind, TokenKind::For);
    assert_eq!(tokens[10].kind, TokenKind::In);
    assert_eq!(tokens[11].kind, TokenKind::Match);
    assert_eq!(tokens[12].kind, TokenKind::Return);
    assert_eq!(tokens[13].kind, TokenKind::Mut);
    assert_eq!(tokens[14].kind, TokenKind::Pub);
    assert_eq!(tokens[15].kind, TokenKind::Const);
    assert_eq!(tokens[16].kind, TokenKind::Global);
    assert_eq!(tokens[17].kind, TokenKind::True);
    assert_eq!(tokens[18].kind, TokenKind::False);
    assert_eq!(tokens[19].kind, TokenKind::EOF);
    assert!(tokens[..19].iter().all(|token| token.kind.is_reserved()));
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo baz_123 _underscore CamelCase packages", FileId(0));

    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "baz_123", "_underscore", "CamelCase", "packages", "EOF"]);
    assert!(tokens[..5]
        .iter()
        .all(|token| token.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 1_000 7u8 2.5f32 9i128 1e3", FileId(0));

    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["42", "3.14", "1_000", "7u8", "2.5f32", "9i128", "1e3", "EOF"]);
    assert!(tokens[..7].iter().all(|token| token.kind == TokenKind::Number));
}

#[test]
fn test_tokenize_range_is_not_a_float() {
    assert_eq!(
        kinds("1..4 1...4"),
        vec![
            TokenKind::Number,
            TokenKind::DotDot,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::Ellipsis,
            TokenKind::Number,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "line\nbreak" "quote\"d" "\x41""#, FileId(0));

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "line\nbreak");
    assert_eq!(tokens[2].value, "quote\"d");
    assert_eq!(tokens[3].value, "A");
    // The span covers the quotes, the value does not
    assert_eq!(tokens[0].span.start.offset, 0);
    assert_eq!(tokens[0].span.end.offset, 7);
}

#[test]
fn test_tokenize_chars() {
    let tokens = tokenize(r"'a' '\n' '\''", FileId(0));

    assert_eq!(tokens[0].kind, TokenKind::Char);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, "\n");
    assert_eq!(tokens[2].value, "'");
}

#[test]
fn test_tokenize_operators_longest_first() {
    assert_eq!(
        kinds(":= == != <<= >>= << >> <= >= ** // && || ++ -- += -= *= /= %= &= |= ^="),
        vec![
            TokenKind::ColonEquals,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::ShiftLeftEquals,
            TokenKind::ShiftRightEquals,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::StarStar,
            TokenKind::SlashSlash,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::PercentEquals,
            TokenKind::AmpersandEquals,
            TokenKind::PipeEquals,
            TokenKind::CaretEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_single_char_operators() {
    assert_eq!(
        kinds("= ! < > & | ^ ~ . : ; , + - * / % ( ) { } [ ]"),
        vec![
            TokenKind::Assignment,
            TokenKind::Not,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Ampersand,
            TokenKind::Pipe,
            TokenKind::Caret,
            TokenKind::Tilde,
            TokenKind::Dot,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let source = "x # trailing comment\n/* block\n comment */ y";
    assert_eq!(
        kinds(source),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_positions() {
    let tokens = tokenize("fn main() {\n  x := 1\n}", FileId(3));

    let x = &tokens[5];
    assert_eq!(x.value, "x");
    assert_eq!(x.span.file, FileId(3));
    assert_eq!(x.span.start.offset, 14);
    assert_eq!(x.span.start.line, 2);
    assert_eq!(x.span.start.column, 3);

    let close = &tokens[8];
    assert_eq!(close.kind, TokenKind::CloseCurly);
    assert_eq!(close.span.start.line, 3);
    assert_eq!(close.span.start.column, 1);
}

#[test]
fn test_tokenize_unknown_character_is_error_token() {
    let tokens = tokenize("a @ b", FileId(0));

    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].value, "@");
    assert_eq!(tokens[1].span.start.offset, 2);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unterminated_string() {
    let tokens = tokenize("\"abc\nx", FileId(0));

    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].value, "\"abc");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
}

#[test]
fn test_tokenize_bad_char_literal() {
    let tokens = tokenize("'ab'", FileId(0));

    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_multibyte_error() {
    let tokens = tokenize("é", FileId(0));

    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].value, "é");
    assert_eq!(tokens[1].span.start.offset, 2);
    assert_eq!(tokens[1].span.start.column, 2);
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = tokenize("", FileId(0));

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}
