//! Type parsing implementation.
//!
//! This module handles parsing of type references (`AstData`) used by
//! parameters, return types, struct fields, constants and `type`
//! declarations. It supports:
//!
//! - Dotted names (`i32`, `pubName.publicTypeName`)
//! - References (`&Node`)
//! - Generic arguments (`Map<K, V>`)
//! - Function signatures (`fn (string) string`, `fn Callback`)

use crate::{
    ast::types::{AstData, AstDataItem, AstTypeFunction},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// True when the cursor sits on something `parse_data` accepts.
pub fn starts_data(parser: &Parser) -> bool {
    matches!(
        parser.current_token_kind(),
        TokenKind::Identifier | TokenKind::Ampersand
    )
}

/// `['&'] name {'.' name} ['<' name {',' name} '>']`
pub fn parse_data(parser: &mut Parser) -> Result<AstData, Error> {
    let start = parser.current_token().span;

    let address = if parser.current_token_kind() == TokenKind::Ampersand {
        Some(parser.advance().span)
    } else {
        None
    };

    let mut names = vec![];
    loop {
        let token = parser.expect_error(TokenKind::Identifier, "expected a type name")?;
        names.push(AstDataItem {
            name: token.value,
            span: token.span,
        });

        if parser.current_token_kind() != TokenKind::Dot {
            break;
        }
        parser.advance();
    }

    let mut generics = vec![];
    let mut pos_generic = None;
    if parser.current_token_kind() == TokenKind::Less {
        let open = parser.advance().span;
        loop {
            let token =
                parser.expect_error(TokenKind::Identifier, "expected a generic type name")?;
            generics.push(token.value);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
        let close = parser.expect(TokenKind::Greater)?;
        pos_generic = Some(open.to(&close.span));
    }

    Ok(AstData {
        names,
        address,
        generics,
        pos_generic,
        span: parser.span_from(&start),
    })
}

/// `fn '(' [Data {',' Data}] ')' [Data]` or `fn Data`. The return type must
/// start on the same line as the closing parenthesis.
pub fn parse_function_type(parser: &mut Parser) -> Result<AstTypeFunction, Error> {
    let start = parser.expect(TokenKind::Fn)?.span;

    if starts_data(parser) {
        let signature = parse_data(parser)?;
        return Ok(AstTypeFunction {
            params: vec![],
            return_type: None,
            signature: Some(signature),
            span: parser.span_from(&start),
        });
    }

    parser.expect(TokenKind::OpenParen)?;

    let mut params = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        params.push(parse_data(parser)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let return_type = if starts_data(parser) && parser.on_same_line() {
        Some(parse_data(parser)?)
    } else {
        None
    };

    Ok(AstTypeFunction {
        params,
        return_type,
        signature: None,
        span: parser.span_from(&start),
    })
}
