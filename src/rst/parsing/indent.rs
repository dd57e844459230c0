//! Indentation context of the parser.
//!
//!     Every open body container (block quote, list item, definition) is pushed with the
//!     column its content starts at and the path of the node receiving that content. A
//!     line indented less than an entry's content column closes the entry. When that
//!     happens without a blank line in between, and the line does not simply start the
//!     next item of the same list, the closed construct ended with an unexpected
//!     unindent and the parser reports it.

use crate::rst::ast::NodePath;
use crate::rst::diagnostics::MessageKind;
use crate::rst::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentKind {
    Quote,
    BulletItem,
    EnumItem,
    Definition,
}

impl IndentKind {
    /// Message reported when the construct ends on an unindent with no blank line.
    pub fn unindent_message(self) -> MessageKind {
        match self {
            IndentKind::Quote => MessageKind::WarningBlockQuoteWithUnIndent,
            IndentKind::BulletItem => MessageKind::WarningBulletListWithUnIndent,
            IndentKind::EnumItem => MessageKind::WarningEnumListWithUnIndent,
            IndentKind::Definition => MessageKind::WarningDefinitionListWithUnIndent,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndentEntry {
    pub kind: IndentKind,
    /// The token that opened the container: bullet, enumerator, term or quote indent
    pub anchor: Token,
    /// 0-based column the container's content starts at
    pub content_indent: usize,
    pub container: NodePath,
}

impl IndentEntry {
    /// Does a line starting with `token` open the next sibling of this container?
    pub fn continued_by(&self, token: &Token) -> bool {
        let same_column = token.start_column == self.anchor.start_column;
        match self.kind {
            IndentKind::Quote => false,
            IndentKind::BulletItem => {
                token.kind == TokenKind::Bullet && same_column && token.text == self.anchor.text
            }
            IndentKind::EnumItem => token.kind.is_enum_marker() && same_column,
            IndentKind::Definition => token.kind == TokenKind::DefinitionTerm && same_column,
        }
    }
}

#[derive(Debug, Default)]
pub struct IndentQueue {
    entries: Vec<IndentEntry>,
}

impl IndentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: IndentEntry) {
        log::debug!(
            "indent push {:?} at column {} (depth {})",
            entry.kind,
            entry.content_indent,
            self.entries.len() + 1
        );
        self.entries.push(entry);
    }

    pub fn top(&self) -> Option<&IndentEntry> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Close every entry whose content sits right of `indent`, innermost first.
    pub fn pop_deeper_than(&mut self, indent: usize) -> Vec<IndentEntry> {
        let mut closed = Vec::new();
        while self.top().is_some_and(|e| e.content_indent > indent) {
            if let Some(entry) = self.entries.pop() {
                log::debug!("indent pop {:?} at column {}", entry.kind, entry.content_indent);
                closed.push(entry);
            }
        }
        closed
    }
}
