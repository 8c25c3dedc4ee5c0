use std::any::Any;

use crate::{lexer::tokens::TokenKind, Span};

use super::ast::Node;

/// Every operator the expression grammar knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstOperatorType {
    Plus,       // +
    PlusPlus,   // ++
    Minus,      // -
    MinusMinus, // --
    Star,       // *
    StarStar,   // **
    Mod,        // %
    Slash,      // /
    SlashInt,   // //

    ShiftLeft,  // <<
    ShiftRight, // >>

    BitAnd, // &
    BitOr,  // |
    BitXor, // ^
    BitNot, // ~

    And, // &&
    Or,  // ||

    Not,      // !
    NotEqual, // !=

    Equal,       // =
    EqualAssign, // :=
    EqualEqual,  // ==

    Greater,      // >
    GreaterEqual, // >=
    Less,         // <
    LessEqual,    // <=

    Dot,       // parent.sub
    DotDot,    // 1..4
    DotDotDot, // 1...4

    EqualPlus,       // +=
    EqualMinus,      // -=
    EqualStar,       // *=
    EqualSlash,      // /=
    EqualMod,        // %=
    EqualBitAnd,     // &=
    EqualBitOr,      // |=
    EqualBitXor,     // ^=
    EqualShiftLeft,  // <<=
    EqualShiftRight, // >>=
}

impl AstOperatorType {
    /// Operator for a token in infix position.
    pub fn from_infix(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => AstOperatorType::Plus,
            TokenKind::Dash => AstOperatorType::Minus,
            TokenKind::Star => AstOperatorType::Star,
            TokenKind::StarStar => AstOperatorType::StarStar,
            TokenKind::Percent => AstOperatorType::Mod,
            TokenKind::Slash => AstOperatorType::Slash,
            TokenKind::SlashSlash => AstOperatorType::SlashInt,
            TokenKind::ShiftLeft => AstOperatorType::ShiftLeft,
            TokenKind::ShiftRight => AstOperatorType::ShiftRight,
            TokenKind::Ampersand => AstOperatorType::BitAnd,
            TokenKind::Pipe => AstOperatorType::BitOr,
            TokenKind::Caret => AstOperatorType::BitXor,
            TokenKind::And => AstOperatorType::And,
            TokenKind::Or => AstOperatorType::Or,
            TokenKind::NotEquals => AstOperatorType::NotEqual,
            TokenKind::Assignment => AstOperatorType::Equal,
            TokenKind::ColonEquals => AstOperatorType::EqualAssign,
            TokenKind::Equals => AstOperatorType::EqualEqual,
            TokenKind::Greater => AstOperatorType::Greater,
            TokenKind::GreaterEquals => AstOperatorType::GreaterEqual,
            TokenKind::Less => AstOperatorType::Less,
            TokenKind::LessEquals => AstOperatorType::LessEqual,
            TokenKind::Dot => AstOperatorType::Dot,
            TokenKind::DotDot => AstOperatorType::DotDot,
            TokenKind::Ellipsis => AstOperatorType::DotDotDot,
            TokenKind::PlusEquals => AstOperatorType::EqualPlus,
            TokenKind::MinusEquals => AstOperatorType::EqualMinus,
            TokenKind::StarEquals => AstOperatorType::EqualStar,
            TokenKind::SlashEquals => AstOperatorType::EqualSlash,
            TokenKind::PercentEquals => AstOperatorType::EqualMod,
            TokenKind::AmpersandEquals => AstOperatorType::EqualBitAnd,
            TokenKind::PipeEquals => AstOperatorType::EqualBitOr,
            TokenKind::CaretEquals => AstOperatorType::EqualBitXor,
            TokenKind::ShiftLeftEquals => AstOperatorType::EqualShiftLeft,
            TokenKind::ShiftRightEquals => AstOperatorType::EqualShiftRight,
            _ => return None,
        };
        Some(op)
    }

    /// Operator for a token in prefix (or postfix `++`/`--`) position.
    pub fn from_unary(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Not => AstOperatorType::Not,
            TokenKind::Dash => AstOperatorType::Minus,
            TokenKind::Tilde => AstOperatorType::BitNot,
            TokenKind::PlusPlus => AstOperatorType::PlusPlus,
            TokenKind::MinusMinus => AstOperatorType::MinusMinus,
            _ => return None,
        };
        Some(op)
    }

    pub fn can_be_unary(self) -> bool {
        matches!(
            self,
            AstOperatorType::Not
                | AstOperatorType::Minus
                | AstOperatorType::BitNot
                | AstOperatorType::PlusPlus
                | AstOperatorType::MinusMinus
        )
    }

    pub fn can_be_binary(self) -> bool {
        !matches!(
            self,
            AstOperatorType::Not
                | AstOperatorType::BitNot
                | AstOperatorType::PlusPlus
                | AstOperatorType::MinusMinus
        )
    }

    /// `=`, `:=` and the compound assignments.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            AstOperatorType::Equal
                | AstOperatorType::EqualAssign
                | AstOperatorType::EqualPlus
                | AstOperatorType::EqualMinus
                | AstOperatorType::EqualStar
                | AstOperatorType::EqualSlash
                | AstOperatorType::EqualMod
                | AstOperatorType::EqualBitAnd
                | AstOperatorType::EqualBitOr
                | AstOperatorType::EqualBitXor
                | AstOperatorType::EqualShiftLeft
                | AstOperatorType::EqualShiftRight
        )
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AstOperatorType::Plus => "+",
            AstOperatorType::PlusPlus => "++",
            AstOperatorType::Minus => "-",
            AstOperatorType::MinusMinus => "--",
            AstOperatorType::Star => "*",
            AstOperatorType::StarStar => "**",
            AstOperatorType::Mod => "%",
            AstOperatorType::Slash => "/",
            AstOperatorType::SlashInt => "//",
            AstOperatorType::ShiftLeft => "<<",
            AstOperatorType::ShiftRight => ">>",
            AstOperatorType::BitAnd => "&",
            AstOperatorType::BitOr => "|",
            AstOperatorType::BitXor => "^",
            AstOperatorType::BitNot => "~",
            AstOperatorType::And => "&&",
            AstOperatorType::Or => "||",
            AstOperatorType::Not => "!",
            AstOperatorType::NotEqual => "!=",
            AstOperatorType::Equal => "=",
            AstOperatorType::EqualAssign => ":=",
            AstOperatorType::EqualEqual => "==",
            AstOperatorType::Greater => ">",
            AstOperatorType::GreaterEqual => ">=",
            AstOperatorType::Less => "<",
            AstOperatorType::LessEqual => "<=",
            AstOperatorType::Dot => ".",
            AstOperatorType::DotDot => "..",
            AstOperatorType::DotDotDot => "...",
            AstOperatorType::EqualPlus => "+=",
            AstOperatorType::EqualMinus => "-=",
            AstOperatorType::EqualStar => "*=",
            AstOperatorType::EqualSlash => "/=",
            AstOperatorType::EqualMod => "%=",
            AstOperatorType::EqualBitAnd => "&=",
            AstOperatorType::EqualBitOr => "|=",
            AstOperatorType::EqualBitXor => "^=",
            AstOperatorType::EqualShiftLeft => "<<=",
            AstOperatorType::EqualShiftRight => ">>=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Postfix,
}

/// Literal value; the variant doubles as the literal's type.
#[derive(Debug, Clone, PartialEq)]
pub enum AstLiteral {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    F32(f32),
    F64(f64),
    Bool(bool),
    String(String),
    Char(char),
}

impl AstLiteral {
    pub fn type_name(&self) -> &'static str {
        match self {
            AstLiteral::I8(_) => "i8",
            AstLiteral::U8(_) => "u8",
            AstLiteral::I16(_) => "i16",
            AstLiteral::U16(_) => "u16",
            AstLiteral::I32(_) => "i32",
            AstLiteral::U32(_) => "u32",
            AstLiteral::I64(_) => "i64",
            AstLiteral::U64(_) => "u64",
            AstLiteral::I128(_) => "i128",
            AstLiteral::U128(_) => "u128",
            AstLiteral::F32(_) => "f32",
            AstLiteral::F64(_) => "f64",
            AstLiteral::Bool(_) => "bool",
            AstLiteral::String(_) => "string",
            AstLiteral::Char(_) => "char",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstExprKind {
    Literal(AstLiteral),
    Identifier(String),
    Unary {
        op: AstOperatorType,
        fixity: Fixity,
        op_span: Span,
        left: Box<AstExprDeclaration>,
    },
    Binary {
        op: AstOperatorType,
        op_span: Span,
        left: Box<AstExprDeclaration>,
        right: Box<AstExprDeclaration>,
    },
    Call {
        callee: Box<AstExprDeclaration>,
        args: Vec<AstExprDeclaration>,
    },
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub struct AstExprDeclaration {
    pub kind: AstExprKind,
    pub span: Span,
}

impl AstExprDeclaration {
    pub fn literal(literal: AstLiteral, span: Span) -> Self {
        AstExprDeclaration {
            kind: AstExprKind::Literal(literal),
            span,
        }
    }

    pub fn unary(
        op: AstOperatorType,
        fixity: Fixity,
        op_span: Span,
        left: AstExprDeclaration,
    ) -> Self {
        let span = match fixity {
            Fixity::Prefix => op_span.to(&left.span),
            Fixity::Postfix => left.span.to(&op_span),
        };
        AstExprDeclaration {
            kind: AstExprKind::Unary {
                op,
                fixity,
                op_span,
                left: Box::new(left),
            },
            span,
        }
    }

    pub fn binary(
        op: AstOperatorType,
        op_span: Span,
        left: AstExprDeclaration,
        right: AstExprDeclaration,
    ) -> Self {
        AstExprDeclaration {
            span: left.span.to(&right.span),
            kind: AstExprKind::Binary {
                op,
                op_span,
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    /// `None` for literals, identifiers and calls.
    pub fn operator(&self) -> Option<AstOperatorType> {
        match &self.kind {
            AstExprKind::Unary { op, .. } | AstExprKind::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }

    pub fn left(&self) -> Option<&AstExprDeclaration> {
        match &self.kind {
            AstExprKind::Unary { left, .. } | AstExprKind::Binary { left, .. } => Some(&**left),
            _ => None,
        }
    }

    pub fn right(&self) -> Option<&AstExprDeclaration> {
        match &self.kind {
            AstExprKind::Binary { right, .. } => Some(&**right),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&AstLiteral> {
        match &self.kind {
            AstExprKind::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            AstExprKind::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

impl Node for AstExprDeclaration {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        match &self.kind {
            AstExprKind::Literal(_) | AstExprKind::Identifier(_) => vec![],
            AstExprKind::Unary { left, .. } => vec![&**left as &dyn Node],
            AstExprKind::Binary { left, right, .. } => {
                vec![&**left as &dyn Node, &**right as &dyn Node]
            }
            AstExprKind::Call { callee, args } => {
                let mut children: Vec<&dyn Node> = vec![&**callee as &dyn Node];
                children.extend(args.iter().map(|arg| arg as &dyn Node));
                children
            }
        }
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}
