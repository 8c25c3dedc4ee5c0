//! Top-level declarations: `package`, `import`, attributes, and the
//! `fn`/`struct`/`enum`/`type` handlers registered in the declaration lookup.

use log::trace;

use crate::{
    ast::{
        ast::{AstBlockDeclaration, AstModule},
        declarations::{
            AstAttributeDeclaration, AstAttributeType, AstEnumDeclaration, AstEnumField,
            AstFunctionDeclaration, AstImportDeclaration, AstImportName, AstImportSymbol,
            AstParam, AstStructDeclaration, AstStructField,
        },
        types::{AstTypeDeclaration, AstTypeKind, AstTypeSumItem},
    },
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    expr::parse_expr,
    lookups::BindingPower,
    parser::Parser,
    stmt::parse_body,
    types::{parse_data, parse_function_type, starts_data},
};

/// What precedes the declaration keyword: attributes and `pub`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationHeader {
    pub attributes: Vec<AstAttributeDeclaration>,
    pub is_public: bool,
    /// Span of the first token of the declaration.
    pub start: Span,
}

impl DeclarationHeader {
    fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute.name == name)
    }
}

/// `package name {'.' name}`
pub fn parse_package(parser: &mut Parser) -> Result<AstModule, Error> {
    let start = parser.expect(TokenKind::Package)?.span;

    let mut names = vec![];
    loop {
        let token = parser.expect_error(TokenKind::Identifier, "expected a package name")?;
        names.push(token.value);

        if parser.current_token_kind() != TokenKind::Dot {
            break;
        }
        parser.advance();
    }

    trace!("package {}", names.join("."));

    Ok(AstModule {
        name: names.join("."),
        names,
        span: parser.span_from(&start),
    })
}

fn parse_import_names(parser: &mut Parser) -> Result<Vec<AstImportName>, Error> {
    let mut names = vec![];
    loop {
        let token = parser.expect_error(TokenKind::Identifier, "expected a module name")?;
        names.push(AstImportName {
            name: token.value,
            span: token.span,
        });

        if parser.current_token_kind() != TokenKind::Dot {
            break;
        }
        parser.advance();
    }
    Ok(names)
}

fn names_span(names: &[AstImportName], fallback: Span) -> Span {
    match (names.first(), names.last()) {
        (Some(first), Some(last)) => first.span.to(&last.span),
        _ => fallback,
    }
}

/// The contents of `{ ... }`: one symbol whose names are separated by `,`
/// or `.`, with an optional trailing `as alias`.
fn parse_import_symbol(parser: &mut Parser) -> Result<AstImportSymbol, Error> {
    let start = parser.current_token().span;

    let mut names = vec![];
    loop {
        let token = parser.expect_error(TokenKind::Identifier, "expected a symbol name")?;
        names.push(AstImportName {
            name: token.value,
            span: token.span,
        });

        if !matches!(
            parser.current_token_kind(),
            TokenKind::Comma | TokenKind::Dot
        ) {
            break;
        }
        parser.advance();
        // Trailing comma before `}`
        if parser.current_token_kind() == TokenKind::CloseCurly {
            break;
        }
    }

    let mut alias = None;
    let mut pos_alias = None;
    if parser.current_token_kind() == TokenKind::As {
        parser.advance();
        let token = parser.expect_error(TokenKind::Identifier, "expected an alias name")?;
        alias = Some(token.value);
        pos_alias = Some(token.span);
    }

    Ok(AstImportSymbol {
        names,
        alias,
        pos_alias,
        span: parser.span_from(&start),
    })
}

/// ```text
/// import path
/// import path { name, name [as alias] }
/// import path as alias
/// ```
pub fn parse_import(parser: &mut Parser) -> Result<AstImportDeclaration, Error> {
    let start = parser.expect(TokenKind::Import)?.span;

    let names = parse_import_names(parser)?;
    let pos_names = names_span(&names, start);

    let mut symbols = vec![];
    let mut pos_symbols = None;
    let mut alias = None;
    let mut pos_alias = None;

    match parser.current_token_kind() {
        TokenKind::OpenCurly => {
            let open = parser.advance().span;
            if parser.current_token_kind() != TokenKind::CloseCurly {
                symbols.push(parse_import_symbol(parser)?);
            }
            let close = parser.expect(TokenKind::CloseCurly)?;
            let span = open.to(&close.span);
            pos_symbols = Some(span);

            if symbols.is_empty() {
                let module = names
                    .iter()
                    .map(|name| name.name.as_str())
                    .collect::<Vec<_>>()
                    .join(".");
                parser.report(Error::warning(
                    ErrorImpl::EmptyImportSymbols { module },
                    span,
                ));
            }

            // Symbols and a whole-import alias exclude each other; the alias
            // is consumed and dropped.
            if parser.current_token_kind() == TokenKind::As {
                parser.advance();
                let token = parser.expect_error(TokenKind::Identifier, "expected an alias name")?;
                parser.report(Error::new(
                    ErrorImpl::ImportAliasWithSymbols { alias: token.value },
                    token.span,
                ));
            }
        }
        TokenKind::As => {
            parser.advance();
            let token = parser.expect_error(TokenKind::Identifier, "expected an alias name")?;
            alias = Some(token.value);
            pos_alias = Some(token.span);
        }
        _ => {}
    }

    let import = AstImportDeclaration {
        names,
        symbols,
        alias,
        pos_names,
        pos_symbols,
        pos_alias,
        span: parser.span_from(&start),
    };
    trace!("import {}", import.path());

    Ok(import)
}

/// `'[' name [':' (name | string)] ']'`, repeated.
pub fn parse_attributes(parser: &mut Parser) -> Result<Vec<AstAttributeDeclaration>, Error> {
    let mut attributes = vec![];

    while parser.current_token_kind() == TokenKind::OpenBracket {
        let start = parser.advance().span;
        let name = parser
            .expect_error(TokenKind::Identifier, "expected an attribute name")?
            .value;

        let (kind, value) = if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();
            match parser.current_token_kind() {
                TokenKind::Identifier | TokenKind::String => {
                    (AstAttributeType::Key, Some(parser.advance().value.clone()))
                }
                _ => return Err(parser.unexpected("an attribute value")),
            }
        } else {
            (AstAttributeType::Identifier, None)
        };

        parser.expect(TokenKind::CloseBracket)?;

        attributes.push(AstAttributeDeclaration {
            kind,
            name,
            value,
            span: parser.span_from(&start),
        });
    }

    Ok(attributes)
}

/// Attributes, optional `pub`, then the handler registered for the keyword.
pub fn parse_declaration(parser: &mut Parser) -> Result<AstBlockDeclaration, Error> {
    let start = parser.current_token().span;
    let attributes = parse_attributes(parser)?;

    let is_public = parser.current_token_kind() == TokenKind::Pub;
    if is_public {
        parser.advance();
    }

    let kind = parser.current_token_kind();
    let handler = match parser.get_decl_lookup().get(&kind).copied() {
        Some(handler) => handler,
        None => return Err(parser.unexpected("`fn`, `struct`, `enum` or `type`")),
    };

    handler(
        parser,
        DeclarationHeader {
            attributes,
            is_public,
            start,
        },
    )
}

/// `[mut] name Data`
pub fn parse_param(parser: &mut Parser) -> Result<AstParam, Error> {
    let start = parser.current_token().span;

    let is_mut = parser.current_token_kind() == TokenKind::Mut;
    if is_mut {
        parser.advance();
    }

    let name = parser
        .expect_error(TokenKind::Identifier, "expected a parameter name")?
        .value;
    let data = parse_data(parser)?;

    Ok(AstParam {
        name,
        is_mut,
        data,
        span: parser.span_from(&start),
    })
}

pub fn parse_fn_decl(
    parser: &mut Parser,
    header: DeclarationHeader,
) -> Result<AstBlockDeclaration, Error> {
    parser.expect(TokenKind::Fn)?;

    let receiver = if parser.current_token_kind() == TokenKind::OpenParen {
        parser.advance();
        let receiver = parse_param(parser)?;
        parser.expect(TokenKind::CloseParen)?;
        Some(receiver)
    } else {
        None
    };

    let name_token = parser.expect_error(TokenKind::Identifier, "expected a function name")?;
    trace!("parsing function `{}`", name_token.value);

    parser.expect(TokenKind::OpenParen)?;
    let mut params = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        params.push(parse_param(parser)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let return_type = if starts_data(parser) {
        Some(parse_data(parser)?)
    } else {
        None
    };

    let body = parse_body(parser, "function body")?;

    let name = name_token.value;
    Ok(AstBlockDeclaration::Function(AstFunctionDeclaration {
        is_main: name == "main" || header.has_attribute("main"),
        is_noreturn: header.has_attribute("noreturn"),
        is_deprecated: header.has_attribute("deprecated"),
        is_public: header.is_public,
        span: parser.span_from(&header.start),
        name,
        receiver,
        params,
        return_type,
        body,
        attributes: header.attributes,
        pos_name: name_token.span,
    }))
}

/// Reads a visibility label such as `pub mut:` and returns the flags it sets
/// as `(is_public, is_mut, is_global)`.
fn parse_struct_section(parser: &mut Parser) -> Option<(bool, bool, bool)> {
    let flags = match (
        parser.peek_kind(0),
        parser.peek_kind(1),
        parser.peek_kind(2),
    ) {
        (TokenKind::Pub, TokenKind::Mut, TokenKind::Colon) => (true, true, false, 3),
        (TokenKind::Pub, TokenKind::Colon, _) => (true, false, false, 2),
        (TokenKind::Mut, TokenKind::Colon, _) => (false, true, false, 2),
        (TokenKind::Global, TokenKind::Colon, _) => (true, true, true, 2),
        _ => return None,
    };

    for _ in 0..flags.3 {
        parser.advance();
    }
    Some((flags.0, flags.1, flags.2))
}

/// Checks for the end of a struct or enum body. Consumes a closing `}`; end
/// of input or a declaration keyword report the body as unclosed.
fn at_member_list_end(parser: &mut Parser, open: &Span, construct: &str) -> bool {
    match parser.current_token_kind() {
        TokenKind::CloseCurly => {
            parser.advance();
            true
        }
        kind if kind == TokenKind::EOF || kind.starts_declaration() => {
            parser.report(Error::new(
                ErrorImpl::UnclosedDelimiter {
                    construct: construct.to_string(),
                },
                *open,
            ));
            true
        }
        _ => false,
    }
}

/// Reports a failed struct or enum member and skips past it. Lexical errors
/// abort the whole declaration.
fn recover_member(parser: &mut Parser, error: Error, start: usize) -> Result<(), Error> {
    if error.kind() == ErrorKind::Lexical {
        return Err(error);
    }
    parser.report(error);
    parser.synchronize_member(start);
    Ok(())
}

/// `{Attribute} name Data ['=' Expression] [',' | ';']`
fn parse_struct_field(
    parser: &mut Parser,
    (is_public, is_mut, is_global): (bool, bool, bool),
) -> Result<AstStructField, Error> {
    let start = parser.current_token().span;
    let attributes = parse_attributes(parser)?;
    let name = parser
        .expect_error(TokenKind::Identifier, "expected a field name")?
        .value;
    let data = parse_data(parser)?;

    let value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    if matches!(
        parser.current_token_kind(),
        TokenKind::Comma | TokenKind::Semicolon
    ) {
        parser.advance();
    }

    Ok(AstStructField {
        name,
        data,
        is_mut,
        is_public,
        is_global,
        value,
        attributes,
        span: parser.span_from(&start),
    })
}

pub fn parse_struct_decl(
    parser: &mut Parser,
    header: DeclarationHeader,
) -> Result<AstBlockDeclaration, Error> {
    parser.expect(TokenKind::Struct)?;
    let name_token = parser.expect_error(TokenKind::Identifier, "expected a struct name")?;
    trace!("parsing struct `{}`", name_token.value);

    let open = parser.expect(TokenKind::OpenCurly)?;
    let construct = format!("struct `{}`", name_token.value);

    let mut section = (false, false, false);
    let mut fields = vec![];
    while !parser.is_halted() && !at_member_list_end(parser, &open.span, &construct) {
        if let Some(flags) = parse_struct_section(parser) {
            section = flags;
            continue;
        }

        let start = parser.cursor();
        match parse_struct_field(parser, section) {
            Ok(field) => fields.push(field),
            Err(error) => recover_member(parser, error, start)?,
        }
    }

    Ok(AstBlockDeclaration::Struct(AstStructDeclaration {
        name: name_token.value,
        is_public: header.is_public,
        fields,
        span: parser.span_from(&header.start),
        attributes: header.attributes,
        pos_name: name_token.span,
    }))
}

/// `{Attribute} name ['=' Expression] [',']`
fn parse_enum_field(parser: &mut Parser) -> Result<AstEnumField, Error> {
    let start = parser.current_token().span;
    let attributes = parse_attributes(parser)?;
    let name = parser
        .expect_error(TokenKind::Identifier, "expected an enum field name")?
        .value;

    let value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
    }

    Ok(AstEnumField {
        name,
        value,
        attributes,
        span: parser.span_from(&start),
    })
}

pub fn parse_enum_decl(
    parser: &mut Parser,
    header: DeclarationHeader,
) -> Result<AstBlockDeclaration, Error> {
    parser.expect(TokenKind::Enum)?;
    let name_token = parser.expect_error(TokenKind::Identifier, "expected an enum name")?;
    trace!("parsing enum `{}`", name_token.value);

    let open = parser.expect(TokenKind::OpenCurly)?;
    let construct = format!("enum `{}`", name_token.value);

    let mut fields = vec![];
    while !parser.is_halted() && !at_member_list_end(parser, &open.span, &construct) {
        let start = parser.cursor();
        match parse_enum_field(parser) {
            Ok(field) => fields.push(field),
            Err(error) => recover_member(parser, error, start)?,
        }
    }

    Ok(AstBlockDeclaration::Enum(AstEnumDeclaration {
        name: name_token.value,
        is_public: header.is_public,
        fields,
        span: parser.span_from(&header.start),
        attributes: header.attributes,
        pos_name: name_token.span,
    }))
}

/// ```text
/// type Celsius = f64
/// type World = Mars | Moon | Venus
/// type Filter = fn (string) string
/// ```
pub fn parse_type_decl(
    parser: &mut Parser,
    header: DeclarationHeader,
) -> Result<AstBlockDeclaration, Error> {
    parser.expect(TokenKind::Type)?;
    let name_token = parser.expect_error(TokenKind::Identifier, "expected a type name")?;
    trace!("parsing type `{}`", name_token.value);

    parser.expect(TokenKind::Assignment)?;

    let kind = if parser.current_token_kind() == TokenKind::Fn {
        AstTypeKind::Function(parse_function_type(parser)?)
    } else {
        let first = parse_data(parser)?;
        if parser.current_token_kind() == TokenKind::Pipe {
            let mut items = vec![AstTypeSumItem {
                span: first.span,
                data: first,
            }];
            while parser.current_token_kind() == TokenKind::Pipe {
                parser.advance();
                let data = parse_data(parser)?;
                items.push(AstTypeSumItem {
                    span: data.span,
                    data,
                });
            }
            AstTypeKind::Sum(items)
        } else {
            AstTypeKind::Alias(first)
        }
    };

    Ok(AstBlockDeclaration::Type(AstTypeDeclaration {
        name: name_token.value,
        is_public: header.is_public,
        kind,
        pos_name: name_token.span,
        span: parser.span_from(&header.start),
    }))
}
