//! Lexical analysis for One source text.
//!
//! The parser only depends on the token contract in `tokens`; `lexer`
//! provides a regex-driven tokenizer that satisfies it:
//!
//! - Keywords, identifiers, numeric/string/char literals and operators
//! - Line, column and byte offset for every token
//! - `#` line comments and `/* */` block comments
//! - Malformed input surfaced as `TokenKind::Error` tokens, never a panic

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
