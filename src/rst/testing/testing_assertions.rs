//! Fluent assertion API for AST nodes

use super::testing_matchers::TextMatch;
use crate::rst::ast::{AffixType, Document, Node};
use crate::rst::diagnostics::{MessageKind, Severity};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a document
pub fn assert_ast(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

fn summarize(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(Node::kind_name)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Document Assertions
// ============================================================================

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    /// Assert the number of top level nodes
    pub fn item_count(self, expected: usize) -> Self {
        let actual = self.doc.nodes.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} items, found {} items: [{}]",
            expected,
            actual,
            summarize(&self.doc.nodes)
        );
        self
    }

    /// Assert the kinds of the top level nodes, in order
    pub fn item_kinds(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.doc.nodes.iter().map(Node::kind_name).collect();
        assert_eq!(actual, expected, "document items");
        self
    }

    /// Assert on a specific top level node
    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.doc.nodes.len(),
            "Item index {} out of bounds (document has {} items: [{}])",
            index,
            self.doc.nodes.len(),
            summarize(&self.doc.nodes)
        );
        assertion(NodeAssertion {
            node: &self.doc.nodes[index],
            context: format!("items[{}]", index),
        });
        self
    }

    /// Assert the kinds of every system message in the tree, in document order
    pub fn messages(self, expected: &[MessageKind]) -> Self {
        let actual: Vec<MessageKind> = self
            .doc
            .system_messages()
            .iter()
            .map(|m| m.message_kind)
            .collect();
        assert_eq!(actual, expected, "system messages");
        self
    }

    pub fn no_messages(self) -> Self {
        self.messages(&[])
    }
}

// ============================================================================
// Node Assertions
// ============================================================================

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Assert the node kind by its serialized name (`paragraph`, `bulletList`, ...)
    pub fn kind(self, expected: &str) -> Self {
        assert_eq!(
            self.node.kind_name(),
            expected,
            "{}: unexpected node kind",
            self.context
        );
        self
    }

    fn text_of(&self) -> String {
        match self.node {
            Node::Paragraph(p) => p.text(),
            Node::Section(s) => s.title.text.clone(),
            Node::DefinitionListItem(i) => i.term.text.clone(),
            Node::SystemMessage(m) => m.message().unwrap_or_default().to_string(),
            Node::HyperlinkTarget(t) => t.name.clone(),
            other => other.text().unwrap_or_default().to_string(),
        }
    }

    /// Match the node's text: paragraph text, section title, definition term, or the
    /// scalar text of a leaf
    pub fn text_matches(self, matcher: TextMatch) -> Self {
        matcher.assert(&self.text_of(), &self.context);
        self
    }

    pub fn text(self, expected: &str) -> Self {
        self.text_matches(TextMatch::Exact(expected.to_string()))
    }

    pub fn text_starts_with(self, prefix: &str) -> Self {
        self.text_matches(TextMatch::StartsWith(prefix.to_string()))
    }

    pub fn text_contains(self, substring: &str) -> Self {
        self.text_matches(TextMatch::Contains(substring.to_string()))
    }

    /// Assert the text line by line
    pub fn text_lines(self, lines: &[&str]) -> Self {
        self.text_matches(TextMatch::lines(lines))
    }

    pub fn rune_count(self, count: usize) -> Self {
        self.text_matches(TextMatch::Runes(count))
    }

    /// Assert the node's 1-based source line
    pub fn line(self, expected: u32) -> Self {
        let actual = match self.node {
            Node::Section(s) => Some(s.title.line),
            Node::Title(n) => Some(n.line),
            Node::Adornment(n) => Some(n.line),
            Node::Text(n) => Some(n.line),
            Node::BlockQuote(n) => Some(n.line),
            Node::SystemMessage(n) => Some(n.line),
            Node::LiteralBlock(n) => Some(n.line),
            Node::Transition(n) => Some(n.line),
            Node::Comment(n) => Some(n.line),
            Node::BulletList(n) => Some(n.line),
            Node::EnumList(n) => Some(n.line),
            Node::DefinitionList(n) => Some(n.line),
            Node::DefinitionListItem(n) => Some(n.term.line),
            Node::DefinitionTerm(n) => Some(n.line),
            Node::InlineEmphasis(n)
            | Node::InlineStrong(n)
            | Node::InlineLiteral(n)
            | Node::InlineInterpretedTextRole(n) => Some(n.line),
            Node::InlineInterpretedText(n) => Some(n.line),
            Node::InlineReference(n) => Some(n.line),
            Node::HyperlinkTarget(n) => Some(n.line),
            Node::Paragraph(p) => p.children.first().and_then(|c| match c {
                Node::Text(t) => Some(t.line),
                _ => None,
            }),
            Node::BulletListItem(_) | Node::EnumListItem(_) | Node::Definition(_) => None,
        };
        assert_eq!(actual, Some(expected), "{}: unexpected line", self.context);
        self
    }

    fn children(&self) -> &'a [Node] {
        match self.node.children() {
            Some(children) => children,
            None => panic!(
                "{}: {} has no children",
                self.context,
                self.node.kind_name()
            ),
        }
    }

    pub fn child_count(self, expected: usize) -> Self {
        let children = self.children();
        assert_eq!(
            children.len(),
            expected,
            "{}: Expected {} children, found [{}]",
            self.context,
            expected,
            summarize(children)
        );
        self
    }

    pub fn child_kinds(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.children().iter().map(Node::kind_name).collect();
        assert_eq!(actual, expected, "{}: children", self.context);
        self
    }

    /// Assert on a specific child
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = self.children();
        assert!(
            index < children.len(),
            "{}: child index {} out of bounds ([{}])",
            self.context,
            index,
            summarize(children)
        );
        assertion(NodeAssertion {
            node: &children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }

    // ------------------------------------------------------------------------
    // Typed shortcuts
    // ------------------------------------------------------------------------

    pub fn paragraph(self) -> Self {
        self.kind("paragraph")
    }

    /// A section with the given level and title text
    pub fn section(self, level: usize, title: &str) -> Self {
        match self.node {
            Node::Section(s) => {
                assert_eq!(s.level, level, "{}: section level", self.context);
                assert_eq!(s.title.text, title, "{}: section title", self.context);
            }
            other => panic!("{}: Expected section, found {}", self.context, other.kind_name()),
        }
        self
    }

    /// A bullet list using `bullet`
    pub fn bullet_list(self, bullet: &str) -> Self {
        match self.node {
            Node::BulletList(l) => assert_eq!(l.bullet, bullet, "{}: bullet", self.context),
            other => panic!(
                "{}: Expected bulletList, found {}",
                self.context,
                other.kind_name()
            ),
        }
        self
    }

    pub fn enum_list(self, affix: AffixType) -> Self {
        match self.node {
            Node::EnumList(l) => assert_eq!(l.affix_type, affix, "{}: affix", self.context),
            other => panic!("{}: Expected enumList, found {}", self.context, other.kind_name()),
        }
        self
    }

    pub fn ordinal(self, expected: u32) -> Self {
        match self.node {
            Node::EnumListItem(i) => assert_eq!(i.ordinal, expected, "{}: ordinal", self.context),
            other => panic!(
                "{}: Expected enumListItem, found {}",
                self.context,
                other.kind_name()
            ),
        }
        self
    }

    /// A definition list item with the given term
    pub fn term(self, expected: &str) -> Self {
        match self.node {
            Node::DefinitionListItem(i) => {
                assert_eq!(i.term.text, expected, "{}: term", self.context)
            }
            other => panic!(
                "{}: Expected definitionListItem, found {}",
                self.context,
                other.kind_name()
            ),
        }
        self
    }

    /// A system message of the given kind
    pub fn message(self, kind: MessageKind) -> Self {
        match self.node {
            Node::SystemMessage(m) => {
                assert_eq!(m.message_kind, kind, "{}: message kind", self.context)
            }
            other => panic!(
                "{}: Expected systemMessage, found {}",
                self.context,
                other.kind_name()
            ),
        }
        self
    }

    pub fn severity(self, expected: Severity) -> Self {
        match self.node {
            Node::SystemMessage(m) => assert_eq!(m.severity, expected, "{}: severity", self.context),
            other => panic!(
                "{}: Expected systemMessage, found {}",
                self.context,
                other.kind_name()
            ),
        }
        self
    }

    /// The verbatim source quoted by a system message
    pub fn literal(self, expected: &str) -> Self {
        match self.node {
            Node::SystemMessage(m) => {
                assert_eq!(m.literal(), Some(expected), "{}: literal", self.context)
            }
            other => panic!(
                "{}: Expected systemMessage, found {}",
                self.context,
                other.kind_name()
            ),
        }
        self
    }
}
