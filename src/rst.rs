//! reStructuredText
//!
//!     The engine for the subset of reStructuredText this crate understands: section
//!     titles, transitions, paragraphs with inline markup, block quotes, literal blocks,
//!     comments, hyperlink targets and bullet, enumerated and definition lists.
//!
//! Pipeline
//!
//!     source -> [lexing::Lexer] -> tokens -> [parsing::Parser] -> [ast::Document]
//!
//!     The lexer is pulled lazily by the parser through a nine slot token window.
//!     Problems in the input are reported as system message nodes inside the tree (see
//!     [diagnostics]); a [ParseError] only signals a broken parser contract.
//!
//! Usage
//!
//!     let (doc, messages) = rst_nano::rst::parse("example", "Title\n=====\n")?;

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod lexing;
pub mod parsing;
pub mod processor;
pub mod testing;
pub mod token;

pub use ast::{Document, Node};
pub use error::ParseError;
pub use lexing::tokenize;
pub use token::{Token, TokenKind};

use ast::SystemMessage;

/// Parse `text` into a document tree named `name`.
///
/// Returns the tree and a copy of every system message it contains, in document order.
pub fn parse(name: &str, text: &str) -> Result<(Document, Vec<SystemMessage>), ParseError> {
    parsing::Parser::new(name, text).parse()
}

/// The token stream for `text`; the same tokens the parser sees.
pub fn lex(text: &str) -> Vec<Token> {
    tokenize(text)
}
