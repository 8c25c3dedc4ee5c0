use crate::{
    ast::expressions::{AstExprDeclaration, AstExprKind, AstLiteral, AstOperatorType, Fixity},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser};

const NUMBER_SUFFIXES: [&str; 12] = [
    "i128", "i16", "i32", "i64", "i8", "u128", "u16", "u32", "u64", "u8", "f32", "f64",
];

/// Pratt loop: one NUD, then LEDs for as long as they bind tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<AstExprDeclaration, Error> {
    parser.nested(|parser| {
        // First parse NUD
        let token_kind = parser.current_token_kind();
        let nud = match parser.get_nud_lookup().get(&token_kind).copied() {
            Some(nud) => nud,
            None => return Err(parser.unexpected("an expression")),
        };

        let mut left = nud(parser)?;

        // While the current token binds tighter than `bp`, keep extending lhs
        while parser.current_binding_power() > bp {
            let token_kind = parser.current_token_kind();
            let led = match parser.get_led_lookup().get(&token_kind).copied() {
                Some(led) => led,
                None => break,
            };
            let binding_power = parser.current_binding_power();
            left = led(parser, left, binding_power)?;
        }

        Ok(left)
    })
}

/// Decodes a number token, honouring its width suffix. Unsuffixed integers
/// take the narrowest of `i32`, `i64`, `u64`, `i128`, `u128` that fits;
/// unsuffixed floats are `f64`.
pub fn parse_number(text: &str) -> Option<AstLiteral> {
    let text: String = text.chars().filter(|c| *c != '_').collect();
    let (digits, suffix) = match NUMBER_SUFFIXES
        .iter()
        .find(|suffix| text.ends_with(*suffix))
    {
        Some(suffix) => (&text[..text.len() - suffix.len()], Some(*suffix)),
        None => (text.as_str(), None),
    };

    let literal = match suffix {
        Some("i8") => AstLiteral::I8(digits.parse().ok()?),
        Some("u8") => AstLiteral::U8(digits.parse().ok()?),
        Some("i16") => AstLiteral::I16(digits.parse().ok()?),
        Some("u16") => AstLiteral::U16(digits.parse().ok()?),
        Some("i32") => AstLiteral::I32(digits.parse().ok()?),
        Some("u32") => AstLiteral::U32(digits.parse().ok()?),
        Some("i64") => AstLiteral::I64(digits.parse().ok()?),
        Some("u64") => AstLiteral::U64(digits.parse().ok()?),
        Some("i128") => AstLiteral::I128(digits.parse().ok()?),
        Some("u128") => AstLiteral::U128(digits.parse().ok()?),
        Some("f32") => AstLiteral::F32(digits.parse().ok()?),
        Some("f64") => AstLiteral::F64(digits.parse().ok()?),
        Some(_) => return None,
        None if digits.contains(['.', 'e', 'E']) => AstLiteral::F64(digits.parse().ok()?),
        None => {
            if let Ok(value) = digits.parse::<i32>() {
                AstLiteral::I32(value)
            } else if let Ok(value) = digits.parse::<i64>() {
                AstLiteral::I64(value)
            } else if let Ok(value) = digits.parse::<u64>() {
                AstLiteral::U64(value)
            } else if let Ok(value) = digits.parse::<i128>() {
                AstLiteral::I128(value)
            } else {
                AstLiteral::U128(digits.parse().ok()?)
            }
        }
    };

    Some(literal)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<AstExprDeclaration, Error> {
    let literal = match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.current_token();
            match parse_number(&token.value) {
                Some(literal) => literal,
                None => {
                    return Err(Error::new(
                        ErrorImpl::NumberParseError {
                            token: token.value.clone(),
                        },
                        token.span,
                    ))
                }
            }
        }
        TokenKind::Identifier => {
            let token = parser.advance();
            return Ok(AstExprDeclaration {
                kind: AstExprKind::Identifier(token.value.clone()),
                span: token.span,
            });
        }
        TokenKind::String => AstLiteral::String(parser.current_token().value.clone()),
        TokenKind::Char => match parser.current_token().value.chars().next() {
            Some(value) => AstLiteral::Char(value),
            None => return Err(parser.unexpected("a character")),
        },
        TokenKind::True => AstLiteral::Bool(true),
        TokenKind::False => AstLiteral::Bool(false),
        _ => return Err(parser.unexpected("a literal or identifier")),
    };

    let span = parser.advance().span;
    Ok(AstExprDeclaration::literal(literal, span))
}

fn operator_error(token: &Token) -> Error {
    Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: token.value.clone(),
            message: String::from("not an operator in this position"),
        },
        token.span,
    )
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: AstExprDeclaration,
    bp: BindingPower,
) -> Result<AstExprDeclaration, Error> {
    let operator_token = parser.advance().clone();
    let op = AstOperatorType::from_infix(operator_token.kind)
        .ok_or_else(|| operator_error(&operator_token))?;

    let right = parse_expr(parser, bp)?;

    Ok(AstExprDeclaration::binary(op, operator_token.span, left, right))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<AstExprDeclaration, Error> {
    let operator_token = parser.advance().clone();
    let op = AstOperatorType::from_unary(operator_token.kind)
        .ok_or_else(|| operator_error(&operator_token))?;

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(AstExprDeclaration::unary(
        op,
        Fixity::Prefix,
        operator_token.span,
        operand,
    ))
}

pub fn parse_postfix_expr(
    parser: &mut Parser,
    left: AstExprDeclaration,
    _bp: BindingPower,
) -> Result<AstExprDeclaration, Error> {
    let operator_token = parser.advance().clone();
    let op = AstOperatorType::from_unary(operator_token.kind)
        .ok_or_else(|| operator_error(&operator_token))?;

    Ok(AstExprDeclaration::unary(
        op,
        Fixity::Postfix,
        operator_token.span,
        left,
    ))
}

/// `=`, `:=` and the compound assignments. The right side is parsed below
/// assignment strength so `a = b = c` nests to the right.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: AstExprDeclaration,
    _bp: BindingPower,
) -> Result<AstExprDeclaration, Error> {
    let operator_token = parser.advance().clone();
    let op = AstOperatorType::from_infix(operator_token.kind)
        .ok_or_else(|| operator_error(&operator_token))?;

    let rhs = parse_expr(parser, BindingPower::Default)?;

    Ok(AstExprDeclaration::binary(op, operator_token.span, left, rhs))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<AstExprDeclaration, Error> {
    let open = parser.advance().span;
    let mut expr = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;

    expr.span = open.to(&close.span);
    Ok(expr)
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: AstExprDeclaration,
    _bp: BindingPower,
) -> Result<AstExprDeclaration, Error> {
    parser.advance();

    let mut args = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(AstExprDeclaration {
        span: left.span.to(&close.span),
        kind: AstExprKind::Call {
            callee: Box::new(left),
            args,
        },
    })
}

/// `.`, `..` and `...`: the right side is a single primary.
pub fn parse_member_expr(
    parser: &mut Parser,
    left: AstExprDeclaration,
    _bp: BindingPower,
) -> Result<AstExprDeclaration, Error> {
    let operator_token = parser.advance().clone();
    let op = AstOperatorType::from_infix(operator_token.kind)
        .ok_or_else(|| operator_error(&operator_token))?;

    let member = parse_expr(parser, BindingPower::Primary)?;

    Ok(AstExprDeclaration::binary(op, operator_token.span, left, member))
}
