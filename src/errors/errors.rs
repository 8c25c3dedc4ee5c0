use std::fmt::Display;

use thiserror::Error;

use crate::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Coarse classification used by the parser's recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The lexer already rejected the input; aborts the enclosing declaration.
    Lexical,
    /// Expected-token mismatch; recovered at the nearest statement or declaration.
    Syntax,
    /// A body never found its closing delimiter.
    Structural,
    /// Recovery ran out of input; parsing stopped.
    Fatal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
    severity: Severity,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
            severity: Severity::Error,
        }
    }

    pub fn warning(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
            severity: Severity::Warning,
        }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_severity(&self) -> Severity {
        self.severity
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::LexicalError { .. } => ErrorKind::Lexical,
            ErrorImpl::UnclosedDelimiter { .. } => ErrorKind::Structural,
            ErrorImpl::UnexpectedEof { .. } => ErrorKind::Fatal,
            _ => ErrorKind::Syntax,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::LexicalError { .. } => "LexicalError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnknownTopLevel { .. } => "UnknownTopLevel",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::ImportAliasWithSymbols { .. } => "ImportAliasWithSymbols",
            ErrorImpl::EmptyImportSymbols { .. } => "EmptyImportSymbols",
            ErrorImpl::MisplacedDeclaration { .. } => "MisplacedDeclaration",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::UnclosedDelimiter { .. } => "UnclosedDelimiter",
            ErrorImpl::UnexpectedEof { .. } => "UnexpectedEof",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::LexicalError { token } => {
                ErrorTip::Suggestion(format!("Malformed input: `{}`", token))
            }
            ErrorImpl::UnexpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "Expected {}, found `{}`",
                expected, found
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnknownTopLevel { token } => ErrorTip::Suggestion(format!(
                "`{}` cannot start a declaration or statement",
                token
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it outside the range of its type?",
                token
            )),
            ErrorImpl::ImportAliasWithSymbols { alias } => ErrorTip::Suggestion(format!(
                "An import with a symbol list cannot also be aliased as `{}`",
                alias
            )),
            ErrorImpl::EmptyImportSymbols { module } => ErrorTip::Suggestion(format!(
                "Import of `{}` lists no symbols",
                module
            )),
            ErrorImpl::MisplacedDeclaration { declaration } => ErrorTip::Suggestion(format!(
                "`{}` must come before other declarations",
                declaration
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Nesting exceeds the limit of {} levels",
                limit
            )),
            ErrorImpl::UnclosedDelimiter { construct } => {
                ErrorTip::Suggestion(format!("Missing `}}` to close {}", construct))
            }
            // Points at the end of the file; the name says it all
            ErrorImpl::UnexpectedEof { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.span.start, self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("malformed input: {token:?}")]
    LexicalError { token: String },
    #[error("unexpected token: expected {expected}, found {found:?}")]
    UnexpectedToken { expected: String, found: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("{token:?} is not a declaration or statement")]
    UnknownTopLevel { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("import with symbols cannot also be aliased as {alias:?}")]
    ImportAliasWithSymbols { alias: String },
    #[error("import of {module:?} has an empty symbol list")]
    EmptyImportSymbols { module: String },
    #[error("{declaration} must precede other declarations")]
    MisplacedDeclaration { declaration: String },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("unclosed {construct}")]
    UnclosedDelimiter { construct: String },
    #[error("end of input while recovering inside {context}")]
    UnexpectedEof { context: String },
}

/// Ordered, append-only list of everything reported during a parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn push(&mut self, error: Error) {
        self.entries.push(error);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any entry is an error rather than a warning.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.get_severity() == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.get_severity() == Severity::Error)
            .count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Error] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
