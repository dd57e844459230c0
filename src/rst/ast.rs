//! Document tree
//!
//!     The parser's output is a [Document]: an ordered forest of [Node] values. The node
//!     set is closed; container variants own their children exclusively and every
//!     variant carries the position it was found at (1-based line, start column and
//!     length in runes where it applies).
//!
//!     While parsing, nodes are inserted through a [NodeTarget], a cursor holding the
//!     path of the container currently receiving children.
//!
//! Serialization
//!
//!     Nodes serialize with serde, internally tagged by `type` (camelCase variant name),
//!     camelCase fields, and container children under `nodeList`, omitted when empty.

pub mod node;
pub mod target;
pub mod treeviz;

pub use node::{
    Adornment, AffixType, BlockQuote, BulletList, BulletListItem, Comment, Definition,
    DefinitionList, DefinitionListItem, DefinitionTerm, Document, EnumList, EnumListItem,
    EnumType, HyperlinkTarget, Inline, InlineInterpretedText, InlineReference, LiteralBlock,
    Node, Paragraph, Section, SystemMessage, Text, Title, Transition,
};
pub use target::{NodePath, NodeTarget};
pub use treeviz::to_treeviz_str;
