//! Testing utilities for AST assertions
//!
//! # Parser Testing Guidelines
//!
//!     Parser tests use two tools together:
//!
//!     1. [RstSources] for document content. The curated samples in `docs/samples` are
//!        the canonical inputs; a test that needs a whole document loads one instead of
//!        inlining a copy that drifts.
//!     2. [assert_ast] for verification. It walks the tree with a fluent API so a test
//!        states the shape and content it expects instead of matching variants by hand.
//!
//!     Small, single construct inputs (a lone title, one list item) are fine inline.
//!
//! ## Example
//!
//! ```rust-example
//! use rst_nano::rst::testing::{assert_ast, RstSources};
//!
//! let (doc, _) = RstSources::get_document("010-sections.rst")?;
//! assert_ast(&doc)
//!     .item(0, |node| {
//!         node.section(1, "Introduction")
//!             .child(0, |p| {
//!                 p.paragraph().text_starts_with("The first");
//!             });
//!     });
//! ```

mod sources;
mod testing_assertions;
mod testing_matchers;

pub use sources::{RstSources, AVAILABLE_SAMPLES};
pub use testing_assertions::{assert_ast, DocumentAssertion, NodeAssertion};
pub use testing_matchers::TextMatch;

/// Route `log` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
