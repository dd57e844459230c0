//! Lexer
//!
//! This module holds the rune level half of the engine: the [Lexer] state machine, the
//! line classifiers it dispatches on, the inline markup sub-scanner and the punctuation
//! tables behind the inline boundary rules.
//!
//! Structure:
//!     Input is expanded (tabs to 8 columns) and right-trimmed line by line, then scanned
//!     into [Token]s. The lexer is a lazy iterator: the parser pulls tokens as it needs
//!     them and nothing is buffered beyond the current line.
//!
//! Reconstruction
//!
//!     Every token keeps its line and column, so the [detokenizer] can rebuild the
//!     normalized source from any run of tokens. Diagnostics use it to quote the offending
//!     lines verbatim.

pub mod classifiers;
pub mod detokenizer;
pub mod inline;
pub mod lexer;
pub mod punctuation;

pub use detokenizer::{detokenize, render_lines};
pub use lexer::Lexer;

use crate::rst::token::Token;

/// Lex `source` into the complete token stream, end of input token included.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
