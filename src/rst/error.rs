//! Errors for broken parser contracts.
//!
//!     Malformed input is never an error here: it becomes a system message node in the
//!     tree (see [diagnostics](crate::rst::diagnostics)). A `ParseError` means the parser
//!     itself was asked to do something its invariants forbid, and it is returned to the
//!     caller instead of aborting the host process.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `set_parent` was pointed at a node variant that owns no child list.
    #[error("node of type '{kind}' cannot hold child nodes")]
    NotAContainer { kind: &'static str },

    /// A stored node path no longer resolves to a node in the tree.
    #[error("no node at path {path:?}")]
    InvalidPath { path: Vec<usize> },
}
