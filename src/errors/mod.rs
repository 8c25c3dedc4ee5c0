//! Diagnostics produced while turning tokens into an AST.
//!
//! This module defines:
//!
//! - `Error`, one diagnostic with its span and severity
//! - `ErrorImpl`, the specific variants reported by the parser
//! - `ErrorKind`, the lexical/syntax/structural/fatal classification
//! - `Diagnostics`, the append-only sink collected across a parse

pub mod errors;
