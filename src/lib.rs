//! # rst-nano
//!
//! A lexer and parser for reStructuredText.
//!
//! The engine runs in two stages: a rune level lexer that classifies input lines and
//! emits a token stream, and a parser that pulls that stream through a small
//! lookahead window to build a typed document tree. Malformed constructs do not abort
//! parsing; they become system message nodes inside the tree.
//!
//! For the pieces, see the [rst module](rst).

pub mod rst;
