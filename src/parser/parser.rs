//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct, the top-level dispatch loop
//! and the panic-mode recovery shared by every grammar rule.
//!
//! It maintains lookup tables for:
//! - Declaration handlers (`fn`, `struct`, `enum`, `type`)
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::{
        ast::{AstBlockDeclaration, AstFile},
        expressions::AstExprDeclaration,
    },
    errors::errors::{Diagnostics, Error, ErrorImpl, ErrorKind},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    decl::{parse_declaration, parse_import, parse_package},
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, DeclHandler, DeclLookup, LEDHandler,
        LEDLookup, NUDHandler, NUDLookup, StmtHandler, StmtLookup,
    },
    options::ParseOptions,
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// One value per parse; nothing is shared between parses.
pub struct Parser {
    /// The list of tokens to parse, always ending with `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// End of the most recently consumed token
    previous_end: Position,
    decl_lookup: DeclLookup,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
    diagnostics: Diagnostics,
    options: ParseOptions,
    /// Current nesting of expressions and bodies
    depth: usize,
    /// Set once parsing must stop; the partial tree is still returned
    halted: bool,
}

impl Parser {
    /// Creates a new Parser instance. An `EOF` token is appended when the
    /// stream does not already end with one.
    pub fn new(mut tokens: Vec<Token>, options: ParseOptions) -> Self {
        let needs_eof = tokens
            .last()
            .map_or(true, |token| token.kind != TokenKind::EOF);
        if needs_eof {
            let span = match tokens.last() {
                Some(last) => Span::new(last.span.file, last.span.end, last.span.end),
                None => Span::null(),
            };
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span,
            });
        }

        let previous_end = tokens[0].span.start;

        Parser {
            tokens,
            pos: 0,
            previous_end,
            decl_lookup: HashMap::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            diagnostics: Diagnostics::new(),
            options,
            depth: 0,
            halted: false,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.peek(0).kind
    }

    /// Looks `offset` tokens ahead; past the end this is the `EOF` token.
    pub fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.peek(offset).kind
    }

    /// Advances to the next token and returns the consumed one. The cursor
    /// never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        if self.tokens[index].kind != TokenKind::EOF {
            self.pos += 1;
        }
        self.previous_end = self.tokens[index].span.end;
        &self.tokens[index]
    }

    /// Expects a token of the specified kind, with a custom message on failure.
    pub fn expect_error(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            let token = self.current_token();
            if token.kind == TokenKind::Error {
                return Err(self.unexpected(message));
            }
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value.clone(),
                    message: message.to_string(),
                },
                token.span,
            ));
        }
        Ok(self.advance().clone())
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(self.unexpected(&expected_kind.to_string()));
        }
        Ok(self.advance().clone())
    }

    /// Builds the error for the current token not being `expected`. Lexer
    /// error tokens always produce a `LexicalError`.
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current_token();
        match token.kind {
            TokenKind::Error => Error::new(
                ErrorImpl::LexicalError {
                    token: token.value.clone(),
                },
                token.span,
            ),
            _ => Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected.to_string(),
                    found: token.value.clone(),
                },
                token.span,
            ),
        }
    }

    /// Index of the current token.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Span from the start of `start` to the end of the last consumed token.
    pub fn span_from(&self, start: &Span) -> Span {
        let end = if self.previous_end.offset < start.end.offset {
            start.end
        } else {
            self.previous_end
        };
        Span::new(start.file, start.start, end)
    }

    /// True when the current token starts on the same line the previous
    /// token ended on.
    pub fn on_same_line(&self) -> bool {
        self.current_token().span.start.line == self.previous_end.line
    }

    pub fn get_decl_lookup(&self) -> &DeclLookup {
        &self.decl_lookup
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Binding power of the current token, `Default` when it is not an operator.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current_token_kind())
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Registers a left denotation (infix or postfix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token. Tokens such
    /// as `-` keep the binding power of their infix form.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a top-level declaration handler for a token.
    pub fn decl(&mut self, kind: TokenKind, decl_fn: DeclHandler) {
        self.decl_lookup.insert(kind, decl_fn);
    }

    /// Runs `rule` one nesting level deeper, failing with `NestingTooDeep`
    /// instead of recursing past `ParseOptions::max_depth`.
    pub fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= self.options.max_depth {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: self.options.max_depth,
                },
                self.current_token().span,
            ));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Records a diagnostic. Once `max_diagnostics` is reached the parser
    /// halts and later reports are dropped.
    pub fn report(&mut self, error: Error) {
        if self.halted {
            return;
        }
        debug!("{}", error);
        self.diagnostics.push(error);
        if let Some(max) = self.options.max_diagnostics {
            if self.diagnostics.len() >= max {
                debug!("diagnostic limit of {} reached, halting", max);
                self.halted = true;
            }
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn halt(&mut self) {
        self.halted = true;
    }

    pub fn get_diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// `[name]` or `[name: value]` at the cursor.
    pub fn at_attribute(&self) -> bool {
        self.current_token_kind() == TokenKind::OpenBracket
            && self.peek_kind(1) == TokenKind::Identifier
            && matches!(
                self.peek_kind(2),
                TokenKind::CloseBracket | TokenKind::Colon
            )
    }

    /// Block-level panic-mode recovery after a failed statement that began at
    /// token index `start`.
    ///
    /// Skips to a `;` (consumed), a `}` closing the current body, a statement
    /// keyword or a declaration keyword. Running out of input here halts the
    /// parse with a single `UnexpectedEof`.
    pub fn synchronize(&mut self, start: usize, context: &str) {
        if self.pos == start {
            self.advance();
        }

        let mut depth = 0usize;
        loop {
            let kind = self.current_token_kind();
            match kind {
                TokenKind::EOF => {
                    let span = self.current_token().span;
                    self.report(Error::new(
                        ErrorImpl::UnexpectedEof {
                            context: context.to_string(),
                        },
                        span,
                    ));
                    self.halt();
                    return;
                }
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::CloseCurly if depth == 0 => return,
                TokenKind::CloseCurly => depth -= 1,
                TokenKind::OpenCurly => depth += 1,
                _ if depth == 0 && (kind.starts_statement() || kind.starts_declaration()) => {
                    return
                }
                _ => {}
            }
            trace!("recovery skipping {}", self.current_token().debug());
            self.advance();
        }
    }

    /// Recovery inside a struct or enum body after a member that began at
    /// token index `start` failed.
    ///
    /// Skips to a `,` or `;` (consumed), the `}` closing the body, a
    /// declaration keyword, or a token starting a new line that can begin a
    /// member (a name, an attribute or a section label).
    pub fn synchronize_member(&mut self, start: usize) {
        if self.pos == start {
            self.advance();
        }

        let mut depth = 0usize;
        while self.has_tokens() {
            let kind = self.current_token_kind();
            match kind {
                TokenKind::Comma | TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::CloseCurly if depth == 0 => return,
                TokenKind::CloseCurly => depth -= 1,
                TokenKind::OpenCurly => depth += 1,
                _ if depth == 0 && kind.starts_declaration() => return,
                TokenKind::Identifier
                | TokenKind::OpenBracket
                | TokenKind::Pub
                | TokenKind::Mut
                | TokenKind::Global
                    if depth == 0 && !self.on_same_line() =>
                {
                    return
                }
                _ => {}
            }
            trace!("recovery skipping {}", self.current_token().debug());
            self.advance();
        }
    }

    /// Top-level panic-mode recovery: always moves past the offending token,
    /// then skips to the next declaration keyword (or statement keyword,
    /// unless the input was rejected by the lexer).
    pub fn recover_top_level(&mut self, error: Error, start: usize) {
        let lexical = error.kind() == ErrorKind::Lexical;
        self.report(error);
        if self.pos == start {
            self.advance();
        }

        let mut depth = 0usize;
        while self.has_tokens() {
            let kind = self.current_token_kind();
            if kind.starts_declaration() || self.at_attribute() {
                break;
            }
            if !lexical && depth == 0 && kind.starts_statement() {
                break;
            }
            match kind {
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly => depth = depth.saturating_sub(1),
                _ => {}
            }
            trace!("recovery skipping {}", self.current_token().debug());
            self.advance();
        }
    }
}

/// The file name component of `path`.
fn path_base(path: &str) -> String {
    path.rsplit(['/', '\\'])
        .next()
        .unwrap_or(path)
        .to_string()
}

fn parse_top_level(parser: &mut Parser, file: &mut AstFile) -> Result<(), Error> {
    let span = parser.current_token().span;
    match parser.current_token_kind() {
        TokenKind::Package => {
            let misplaced =
                file.module.is_some() || !file.imports.is_empty() || !file.blocks.is_empty();
            let module = parse_package(parser)?;
            if misplaced {
                parser.report(Error::new(
                    ErrorImpl::MisplacedDeclaration {
                        declaration: String::from("package"),
                    },
                    span,
                ));
            }
            if file.module.is_none() {
                file.module = Some(module);
            }
        }
        TokenKind::Import => {
            let import = parse_import(parser)?;
            if !file.blocks.is_empty() {
                parser.report(Error::new(
                    ErrorImpl::MisplacedDeclaration {
                        declaration: String::from("import"),
                    },
                    span,
                ));
            }
            file.imports.push(import);
        }
        TokenKind::Error => return Err(parser.unexpected("a declaration")),
        kind if kind == TokenKind::OpenBracket
            || kind == TokenKind::Pub
            || parser.get_decl_lookup().contains_key(&kind) =>
        {
            let block = parse_declaration(parser)?;
            file.blocks.push(block);
        }
        kind if parser.get_stmt_lookup().contains_key(&kind)
            || parser.get_nud_lookup().contains_key(&kind) =>
        {
            let statement = parse_stmt(parser)?;
            file.blocks.push(AstBlockDeclaration::Statement(statement));
        }
        _ => {
            return Err(Error::new(
                ErrorImpl::UnknownTopLevel {
                    token: parser.current_token().value.clone(),
                },
                span,
            ))
        }
    }
    Ok(())
}

/// Parses a whole file with default options.
pub fn parse_file(tokens: Vec<Token>, path: &str) -> (AstFile, Diagnostics) {
    parse_file_with(tokens, path, ParseOptions::default())
}

/// Parses a stream of tokens into an `AstFile`.
///
/// Never fails: every problem is recorded in the returned diagnostics and
/// the tree holds whatever could be recovered.
pub fn parse_file_with(
    tokens: Vec<Token>,
    path: &str,
    options: ParseOptions,
) -> (AstFile, Diagnostics) {
    let mut parser = Parser::new(tokens, options);
    create_token_lookups(&mut parser);

    let start = parser.current_token().span;
    let mut file = AstFile {
        module: None,
        imports: vec![],
        blocks: vec![],
        path: path.to_string(),
        path_base: path_base(path),
        span: start,
    };

    debug!("parsing {}", path);
    while !parser.is_halted() && parser.has_tokens() {
        let before = parser.pos;
        if let Err(error) = parse_top_level(&mut parser, &mut file) {
            parser.recover_top_level(error, before);
        }
    }

    let end = parser.current_token().span.end;
    file.span = Span::new(start.file, start.start, end.max(parser.previous_end));
    debug!(
        "parsed {} with {} diagnostics",
        path,
        parser.get_diagnostics().len()
    );

    (file, parser.into_diagnostics())
}

/// Parses a single expression; anything left over after it is reported.
pub fn parse_expression(tokens: Vec<Token>) -> (Option<AstExprDeclaration>, Diagnostics) {
    let mut parser = Parser::new(tokens, ParseOptions::default());
    create_token_lookups(&mut parser);

    match parse_expr(&mut parser, BindingPower::Default) {
        Ok(expr) => {
            if parser.has_tokens() {
                let error = parser.unexpected("end of expression");
                parser.report(error);
            }
            (Some(expr), parser.into_diagnostics())
        }
        Err(error) => {
            parser.report(error);
            (None, parser.into_diagnostics())
        }
    }
}
