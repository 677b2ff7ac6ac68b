//! SQL lexer.
//!
//! A hand-written scanner producing a token stream with 1-based
//! line/column positions and byte spans. Whitespace and comments are
//! filtered by default and can be emitted as trivia tokens via
//! [`LexOptions`].

mod location;
mod token;
mod tokenizer;

pub use location::{Location, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::{LexOptions, Lexer};

use crate::error::SqlError;

/// Tokenizes `input` and returns the full token list.
///
/// The list is non-empty and ends in exactly one EOF token.
///
/// # Errors
///
/// Returns the first lexical diagnostic encountered.
pub fn tokenize(input: &str, options: LexOptions) -> Result<Vec<Token>, SqlError> {
    Lexer::with_options(input, options).tokenize()
}
