#![allow(clippy::module_inception)]

use std::fmt::{self, Display, Write as _};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Identifies the source file a span belongs to. The driver decides the numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileId(pub u32);

/// A point in the source: byte offset plus 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32) -> Self {
        Position { offset, line, column }
    }

    pub fn null() -> Self {
        Position::new(0, 1, 1)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub file: FileId,
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(file: FileId, start: Position, end: Position) -> Self {
        Span { file, start, end }
    }

    pub fn null() -> Self {
        Span::new(FileId::default(), Position::null(), Position::null())
    }

    /// Span from the start of `self` to the end of `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span::new(self.file, self.start, other.end)
    }

    /// Inclusive containment by byte offset.
    pub fn contains(&self, other: &Span) -> bool {
        self.file == other.file
            && self.start.offset <= other.start.offset
            && other.end.offset <= self.end.offset
    }

    pub fn len(&self) -> u32 {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns the text of the 1-based `line`, without its line terminator.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    source
        .split('\n')
        .nth(line.checked_sub(1)? as usize)
        .map(|text| text.trim_end_matches('\r'))
}

pub fn display_error(error: &Error, source: &str, path: &str) -> String {
    /*
        Error: message
        -> main.one
           |
        20 | x := @
           | -----^
    */

    let position = error.get_span().start;
    let line_text = get_line_at_position(source, position.line).unwrap_or("");

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "{}: {}", error.get_severity(), error.get_error_name());
    } else {
        let _ = writeln!(
            out,
            "{}: {} ({})",
            error.get_severity(),
            error.get_error_name(),
            error.get_tip()
        );
    }
    let _ = writeln!(out, "-> {}:{}", path, position);
    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let column = (position.column as usize).saturating_sub(1);
    let arrows = column.saturating_sub(removed_whitespace) + 1;

    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");
    out
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}
