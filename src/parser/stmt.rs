use log::{debug, trace};

use crate::{
    ast::{
        ast::AstBody,
        expressions::{AstExprDeclaration, AstExprKind, AstOperatorType},
        statements::{
            AstForKind, AstIfClause, AstMatchArm, AstStatementAssign, AstStatementAssignConst,
            AstStatementDeclaration, AstStatementFor, AstStatementIf, AstStatementKind,
            AstStatementMatch, AstStatementRet, AstStatementVariable,
        },
    },
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_expr,
    lookups::BindingPower,
    parser::Parser,
    types::parse_data,
};

/// One statement, dispatched on its first token, with an optional `;`.
pub fn parse_stmt(parser: &mut Parser) -> Result<AstStatementDeclaration, Error> {
    let kind = parser.current_token_kind();
    let statement = match parser.get_stmt_lookup().get(&kind).copied() {
        Some(handler) => handler(parser)?,
        None => parse_expression_stmt(parser)?,
    };

    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(statement)
}

/// `'{' {Statement} '}'` with block-level recovery.
///
/// A failed statement is reported and skipped; a declaration keyword or the
/// end of input closes the body with an `UnclosedDelimiter`. Lexical errors
/// are not recovered here and abort the enclosing declaration.
pub fn parse_body(parser: &mut Parser, construct: &str) -> Result<AstBody, Error> {
    parser.nested(|parser| {
        let open = parser.expect(TokenKind::OpenCurly)?;
        let mut statements = vec![];
        loop {
            if parser.is_halted() {
                break;
            }

            match parser.current_token_kind() {
                TokenKind::CloseCurly => {
                    parser.advance();
                    break;
                }
                TokenKind::Semicolon => {
                    parser.advance();
                    continue;
                }
                kind if kind == TokenKind::EOF || kind.starts_declaration() => {
                    parser.report(Error::new(
                        ErrorImpl::UnclosedDelimiter {
                            construct: construct.to_string(),
                        },
                        open.span,
                    ));
                    break;
                }
                _ => {}
            }

            let start = parser.cursor();
            match parse_stmt(parser) {
                Ok(statement) => statements.push(statement),
                Err(error) if error.kind() == ErrorKind::Lexical => return Err(error),
                Err(error) => {
                    debug!("recovering from error in {}", construct);
                    parser.report(error);
                    parser.synchronize(start, construct);
                }
            }
        }

        Ok(AstBody {
            statements,
            span: parser.span_from(&open.span),
        })
    })
}

/// `if` / `else if` / `else`. The chain is read in a loop into a flat list
/// of clauses, so its length costs neither parser nor drop recursion.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<AstStatementDeclaration, Error> {
    let start = parser.current_token().span;
    let mut clauses = vec![];
    let mut otherwise = None;

    loop {
        let clause_start = parser.expect(TokenKind::If)?.span;
        let expr = parse_expr(parser, BindingPower::Default)?;
        let body = parse_body(parser, "if body")?;
        clauses.push(AstIfClause {
            span: clause_start.to(&body.span),
            expr,
            body,
        });

        if parser.current_token_kind() != TokenKind::Else {
            break;
        }
        parser.advance();

        if parser.current_token_kind() != TokenKind::If {
            otherwise = Some(parse_body(parser, "else body")?);
            break;
        }
    }
    trace!("if chain with {} clauses", clauses.len());

    let span = parser.span_from(&start);
    Ok(AstStatementDeclaration {
        kind: AstStatementKind::If(AstStatementIf {
            clauses,
            otherwise,
            span,
        }),
        span,
    })
}

/// ```text
/// for { }
/// for i < 10 { }
/// for item in items { }
/// for i, item in items { }
/// ```
pub fn parse_for_stmt(parser: &mut Parser) -> Result<AstStatementDeclaration, Error> {
    let start = parser.expect(TokenKind::For)?.span;

    let is_each = parser.current_token_kind() == TokenKind::Identifier
        && (parser.peek_kind(1) == TokenKind::In
            || (parser.peek_kind(1) == TokenKind::Comma
                && parser.peek_kind(2) == TokenKind::Identifier
                && parser.peek_kind(3) == TokenKind::In));

    let kind = if parser.current_token_kind() == TokenKind::OpenCurly {
        AstForKind::Infinite
    } else if is_each {
        let first = parser.advance().value.clone();
        let (key, value) = if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            let second = parser.advance().value.clone();
            (Some(first), second)
        } else {
            (None, first)
        };
        parser.expect(TokenKind::In)?;
        let iterable = parse_expr(parser, BindingPower::Default)?;
        AstForKind::Each {
            key,
            value,
            iterable,
        }
    } else {
        AstForKind::Condition(parse_expr(parser, BindingPower::Default)?)
    };

    let body = parse_body(parser, "for body")?;

    Ok(AstStatementDeclaration {
        kind: AstStatementKind::For(AstStatementFor { kind, body }),
        span: parser.span_from(&start),
    })
}

/// ```text
/// match x {
///     1, 2 { }
///     else { }
/// }
/// ```
pub fn parse_match_stmt(parser: &mut Parser) -> Result<AstStatementDeclaration, Error> {
    let start = parser.expect(TokenKind::Match)?.span;
    let expr = parse_expr(parser, BindingPower::Default)?;

    let (arms, otherwise) = parser.nested(|parser| {
        let open = parser.expect(TokenKind::OpenCurly)?;
        let mut arms = vec![];
        let mut otherwise = None;
        loop {
            if parser.is_halted() {
                break;
            }

            match parser.current_token_kind() {
                TokenKind::CloseCurly => {
                    parser.advance();
                    break;
                }
                kind if kind == TokenKind::EOF || kind.starts_declaration() => {
                    parser.report(Error::new(
                        ErrorImpl::UnclosedDelimiter {
                            construct: String::from("match"),
                        },
                        open.span,
                    ));
                    break;
                }
                TokenKind::Else => {
                    parser.advance();
                    otherwise = Some(parse_body(parser, "match else body")?);
                    continue;
                }
                _ => {}
            }

            let mut patterns = vec![parse_expr(parser, BindingPower::Default)?];
            while parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
                patterns.push(parse_expr(parser, BindingPower::Default)?);
            }
            let body = parse_body(parser, "match arm")?;

            arms.push(AstMatchArm {
                span: patterns[0].span.to(&body.span),
                patterns,
                body,
            });
        }
        Ok((arms, otherwise))
    })?;

    Ok(AstStatementDeclaration {
        kind: AstStatementKind::Match(AstStatementMatch {
            expr,
            arms,
            otherwise,
        }),
        span: parser.span_from(&start),
    })
}

/// `return [expr]`. The value must start on the same line as `return`.
pub fn parse_return_stmt(parser: &mut Parser) -> Result<AstStatementDeclaration, Error> {
    let start = parser.expect(TokenKind::Return)?.span;

    let kind = parser.current_token_kind();
    let value = if parser.on_same_line() && parser.get_nud_lookup().contains_key(&kind) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(AstStatementDeclaration {
        kind: AstStatementKind::Return(AstStatementRet { value }),
        span: parser.span_from(&start),
    })
}

/// `const name [Data] = expr`
pub fn parse_const_stmt(parser: &mut Parser) -> Result<AstStatementDeclaration, Error> {
    let start = parser.expect(TokenKind::Const)?.span;
    let name = parser
        .expect_error(TokenKind::Identifier, "expected identifier in constant definition")?
        .value;

    let data = if parser.current_token_kind() != TokenKind::Assignment {
        Some(parse_data(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(AstStatementDeclaration {
        kind: AstStatementKind::AssignConst(AstStatementAssignConst { name, data, value }),
        span: parser.span_from(&start),
    })
}

/// `mut name := expr`
pub fn parse_mut_stmt(parser: &mut Parser) -> Result<AstStatementDeclaration, Error> {
    let start = parser.expect(TokenKind::Mut)?.span;
    let name = parser
        .expect_error(TokenKind::Identifier, "expected identifier during variable declaration")?
        .value;
    parser.expect(TokenKind::ColonEquals)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(AstStatementDeclaration {
        kind: AstStatementKind::Variable(AstStatementVariable {
            name,
            is_mut: true,
            value,
        }),
        span: parser.span_from(&start),
    })
}

/// A bare expression, classified by its root: `name := v` declares a
/// variable, any other assignment operator assigns, anything else is an
/// expression statement.
pub fn parse_expression_stmt(parser: &mut Parser) -> Result<AstStatementDeclaration, Error> {
    let start = parser.current_token().span;
    let expr = parse_expr(parser, BindingPower::Default)?;
    let span = parser.span_from(&start);

    let kind = match expr.kind {
        AstExprKind::Binary {
            op: AstOperatorType::EqualAssign,
            op_span,
            left,
            right,
        } => match left.kind {
            AstExprKind::Identifier(name) => {
                trace!("variable `{}`", name);
                AstStatementKind::Variable(AstStatementVariable {
                    name,
                    is_mut: false,
                    value: *right,
                })
            }
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: String::from(":="),
                        message: String::from("expected a name on the left of `:=`"),
                    },
                    op_span,
                ))
            }
        },
        AstExprKind::Binary {
            op, left, right, ..
        } if op.is_assignment() => AstStatementKind::Assign(AstStatementAssign {
            target: *left,
            op,
            value: *right,
        }),
        kind => AstStatementKind::Expression(AstExprDeclaration {
            kind,
            span: expr.span,
        }),
    };

    Ok(AstStatementDeclaration { kind, span })
}
