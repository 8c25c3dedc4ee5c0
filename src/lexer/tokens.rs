use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("package", TokenKind::Package);
        map.insert("import", TokenKind::Import);
        map.insert("as", TokenKind::As);
        map.insert("fn", TokenKind::Fn);
        map.insert("struct", TokenKind::Struct);
        map.insert("enum", TokenKind::Enum);
        map.insert("type", TokenKind::Type);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("for", TokenKind::For);
        map.insert("in", TokenKind::In);
        map.insert("match", TokenKind::Match);
        map.insert("return", TokenKind::Return);
        map.insert("mut", TokenKind::Mut);
        map.insert("pub", TokenKind::Pub);
        map.insert("const", TokenKind::Const);
        map.insert("global", TokenKind::Global);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    /// Input the lexer could not classify; the value holds the offending text.
    Error,

    Number,
    String,
    Char,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment,    // =
    ColonEquals,   // :=
    Equals,        // ==
    Not,           // !
    NotEquals,     // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,  // ||
    And, // &&

    Ampersand, // &
    Pipe,      // |
    Caret,     // ^
    Tilde,     // ~
    ShiftLeft,
    ShiftRight,

    Dot,
    DotDot,
    Ellipsis,
    Semicolon,
    Colon,
    Comma,

    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,
    AmpersandEquals,
    PipeEquals,
    CaretEquals,
    ShiftLeftEquals,
    ShiftRightEquals,

    Plus,
    Dash,
    Slash,
    SlashSlash,
    Star,
    StarStar,
    Percent,

    // Reserved
    Package,
    Import,
    As,
    Fn,
    Struct,
    Enum,
    Type,
    If,
    Else,
    For,
    In,
    Match,
    Return,
    Mut,
    Pub,
    Const,
    Global,
    True,
    False,
}

impl TokenKind {
    /// Keywords that can only begin a top-level item.
    pub fn starts_declaration(self) -> bool {
        matches!(
            self,
            TokenKind::Package
                | TokenKind::Import
                | TokenKind::Fn
                | TokenKind::Struct
                | TokenKind::Enum
                | TokenKind::Type
                | TokenKind::Pub
        )
    }

    /// Keywords that begin a statement other than a bare expression.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::For
                | TokenKind::Match
                | TokenKind::Return
                | TokenKind::Mut
                | TokenKind::Const
        )
    }

    pub fn is_reserved(self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| *kind == self)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Char,
            TokenKind::Identifier,
            TokenKind::Number,
            TokenKind::Error,
        ]) {
            format!("{} ({})", self.kind, self.value)
        } else {
            format!("{} ()", self.kind)
        }
    }
}
