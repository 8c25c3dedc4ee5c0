//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an `AstFile` plus the diagnostics collected on the way. It uses a
//! Pratt parser for expressions with proper operator precedence and handles:
//!
//! - Top-level declarations (package, imports, functions, structs, enums, types)
//! - Statement parsing (variables, assignments, control flow)
//! - Expression parsing (unary and binary ops, calls, literals)
//! - Type references used in annotations
//! - Panic-mode error recovery and reporting
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod options;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
