use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

use crate::{FileId, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Receives the length in bytes of the text its pattern matched at the cursor.
pub type RegexHandler = fn(&mut Lexer, usize);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

macro_rules! pattern {
    ($regex:literal, $handler:expr) => {
        RegexPattern {
            regex: Regex::new(concat!("^", $regex)).unwrap(),
            handler: $handler,
        }
    };
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins, so longer
    // operators precede their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern!("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern!(
            "[0-9][0-9_]*(\\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?(i128|i16|i32|i64|i8|u128|u16|u32|u64|u8|f32|f64)?",
            number_handler
        ),
        pattern!("\\s+", skip_handler),
        pattern!("\"([^\"\\\\\\n]|\\\\.)*\"", string_handler),
        pattern!("\"[^\"\\n]*", error_handler),
        pattern!("'([^'\\\\\\n]|\\\\.)*'", char_handler),
        pattern!("'", error_handler),
        pattern!("#[^\\n]*", skip_handler),
        pattern!("/\\*(?s:.)*?\\*/", skip_handler),
        pattern!("/\\*(?s:.)*", error_handler),
        pattern!("\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern!("\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern!("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern!("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern!("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern!("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern!("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern!("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern!("!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern!("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern!(":=", MK_DEFAULT_HANDLER!(TokenKind::ColonEquals, ":=")),
        pattern!(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern!("<<=", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeftEquals, "<<=")),
        pattern!("<<", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<")),
        pattern!("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern!("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern!(">>=", MK_DEFAULT_HANDLER!(TokenKind::ShiftRightEquals, ">>=")),
        pattern!(">>", MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>")),
        pattern!(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern!(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern!("\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern!("\\|=", MK_DEFAULT_HANDLER!(TokenKind::PipeEquals, "|=")),
        pattern!("\\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|")),
        pattern!("&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern!("&=", MK_DEFAULT_HANDLER!(TokenKind::AmpersandEquals, "&=")),
        pattern!("&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
        pattern!("\\^=", MK_DEFAULT_HANDLER!(TokenKind::CaretEquals, "^=")),
        pattern!("\\^", MK_DEFAULT_HANDLER!(TokenKind::Caret, "^")),
        pattern!("~", MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~")),
        pattern!("\\.\\.\\.", MK_DEFAULT_HANDLER!(TokenKind::Ellipsis, "...")),
        pattern!("\\.\\.", MK_DEFAULT_HANDLER!(TokenKind::DotDot, "..")),
        pattern!("\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern!(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern!(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern!("\\+\\+", MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++")),
        pattern!("\\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")),
        pattern!("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern!("--", MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--")),
        pattern!("-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")),
        pattern!("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern!("\\*\\*", MK_DEFAULT_HANDLER!(TokenKind::StarStar, "**")),
        pattern!("\\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")),
        pattern!("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern!("//", MK_DEFAULT_HANDLER!(TokenKind::SlashSlash, "//")),
        pattern!("/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=")),
        pattern!("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern!("%=", MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=")),
        pattern!("%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
    ];
}

pub struct Lexer<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    file: FileId,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: FileId) -> Lexer<'a> {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            column: 1,
            file,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.pos as u32, self.line, self.column)
    }

    /// Moves the cursor `n` bytes forward, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        trace!("lexed {}", token.debug());
        self.tokens.push(token);
    }

    /// Pushes a token covering the next `len` bytes and moves past them.
    pub fn emit(&mut self, kind: TokenKind, value: String, len: usize) {
        let start = self.position();
        self.advance_n(len);
        let span = Span::new(self.file, start, self.position());
        self.push(MK_TOKEN!(kind, value, span));
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn number_handler(lexer: &mut Lexer, len: usize) {
    let matched = lexer.remainder()[..len].to_string();
    lexer.emit(TokenKind::Number, matched, len);
}

fn skip_handler(lexer: &mut Lexer, len: usize) {
    lexer.advance_n(len);
}

fn error_handler(lexer: &mut Lexer, len: usize) {
    let matched = lexer.remainder()[..len].to_string();
    lexer.emit(TokenKind::Error, matched, len);
}

fn string_handler(lexer: &mut Lexer, len: usize) {
    let raw = &lexer.remainder()[..len];
    match unescape(&raw[1..len - 1]) {
        Some(value) => lexer.emit(TokenKind::String, value, len),
        None => error_handler(lexer, len),
    }
}

fn char_handler(lexer: &mut Lexer, len: usize) {
    let raw = &lexer.remainder()[..len];
    match unescape(&raw[1..len - 1]) {
        Some(value) if value.chars().count() == 1 => lexer.emit(TokenKind::Char, value, len),
        _ => error_handler(lexer, len),
    }
}

fn symbol_handler(lexer: &mut Lexer, len: usize) {
    let value = &lexer.remainder()[..len];
    let kind = RESERVED_LOOKUP
        .get(value)
        .copied()
        .unwrap_or(TokenKind::Identifier);
    lexer.emit(kind, value.to_string(), len);
}

/// Resolves backslash escapes. `None` if a `\x` escape is malformed.
fn unescape(literal: &str) -> Option<String> {
    let mut result = String::new();
    let mut chars = literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some('x') => {
                chars.next();
                let mut hex = String::new();
                while hex.len() < 2 {
                    match chars.peek() {
                        Some(digit) if digit.is_ascii_hexdigit() => {
                            hex.push(*digit);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                let byte = u8::from_str_radix(&hex, 16).ok()?;
                result.push(byte as char);
                continue;
            }
            // Unknown escape: keep the backslash
            _ => {
                result.push(ch);
                continue;
            }
        }
        chars.next();
    }

    Some(result)
}

/// Splits `source` into tokens. Never fails: malformed input becomes
/// `TokenKind::Error` tokens, and the result always ends with one `EOF`.
pub fn tokenize(source: &str, file: FileId) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let remaining = lex.remainder();
        let matched = PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .find(remaining)
                .filter(|found| found.end() > 0)
                .map(|found| (pattern.handler, found.end()))
        });

        match matched {
            Some((handler, len)) => handler(&mut lex, len),
            None => {
                let len = remaining.chars().next().map_or(1, char::len_utf8);
                error_handler(&mut lex, len);
            }
        }
    }

    let end = lex.position();
    lex.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span::new(file, end, end)
    ));
    debug!("tokenized {} tokens", lex.tokens.len());
    lex.tokens
}
