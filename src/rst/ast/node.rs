//! Node type definitions
//!
//! This module defines all the node types that represent the parsed structure of a
//! reStructuredText document. `Node` is a closed sum type: container variants expose
//! their child list through [`Node::children_mut`], every other variant answers `None`,
//! which is what makes [`NodeTarget::set_parent`](super::NodeTarget::set_parent) total
//! over containers only.

use crate::rst::diagnostics::{MessageKind, Severity};
use serde::Serialize;

// ============================================================================
// Document
// ============================================================================

/// The parsed document: a name and the ordered top level forest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub name: String,
    #[serde(rename = "nodeList")]
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(name: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Every system message in the tree, in document order.
    pub fn system_messages(&self) -> Vec<&SystemMessage> {
        let mut found = Vec::new();
        for node in &self.nodes {
            collect_messages(node, &mut found);
        }
        found
    }

    /// Total number of nodes in the tree, fields like a section title included.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(Node::count).sum()
    }
}

fn collect_messages<'a>(node: &'a Node, found: &mut Vec<&'a SystemMessage>) {
    if let Node::SystemMessage(msg) = node {
        found.push(msg);
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_messages(child, found);
        }
    }
}

// ============================================================================
// Node
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Section(Section),
    Title(Title),
    Adornment(Adornment),
    Text(Text),
    Paragraph(Paragraph),
    BlockQuote(BlockQuote),
    SystemMessage(SystemMessage),
    LiteralBlock(LiteralBlock),
    Transition(Transition),
    Comment(Comment),
    BulletList(BulletList),
    BulletListItem(BulletListItem),
    EnumList(EnumList),
    EnumListItem(EnumListItem),
    DefinitionList(DefinitionList),
    DefinitionListItem(DefinitionListItem),
    DefinitionTerm(DefinitionTerm),
    Definition(Definition),
    InlineEmphasis(Inline),
    InlineStrong(Inline),
    InlineLiteral(Inline),
    InlineInterpretedText(InlineInterpretedText),
    InlineInterpretedTextRole(Inline),
    InlineReference(InlineReference),
    HyperlinkTarget(HyperlinkTarget),
}

impl Node {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Section(_) => "section",
            Node::Title(_) => "title",
            Node::Adornment(_) => "adornment",
            Node::Text(_) => "text",
            Node::Paragraph(_) => "paragraph",
            Node::BlockQuote(_) => "blockQuote",
            Node::SystemMessage(_) => "systemMessage",
            Node::LiteralBlock(_) => "literalBlock",
            Node::Transition(_) => "transition",
            Node::Comment(_) => "comment",
            Node::BulletList(_) => "bulletList",
            Node::BulletListItem(_) => "bulletListItem",
            Node::EnumList(_) => "enumList",
            Node::EnumListItem(_) => "enumListItem",
            Node::DefinitionList(_) => "definitionList",
            Node::DefinitionListItem(_) => "definitionListItem",
            Node::DefinitionTerm(_) => "definitionTerm",
            Node::Definition(_) => "definition",
            Node::InlineEmphasis(_) => "inlineEmphasis",
            Node::InlineStrong(_) => "inlineStrong",
            Node::InlineLiteral(_) => "inlineLiteral",
            Node::InlineInterpretedText(_) => "inlineInterpretedText",
            Node::InlineInterpretedTextRole(_) => "inlineInterpretedTextRole",
            Node::InlineReference(_) => "inlineReference",
            Node::HyperlinkTarget(_) => "hyperlinkTarget",
        }
    }

    /// Child list of a container variant.
    ///
    /// A definition list item has no list of its own; descending into it lands in its
    /// definition's body.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Section(n) => Some(&n.children),
            Node::Paragraph(n) => Some(&n.children),
            Node::BlockQuote(n) => Some(&n.children),
            Node::SystemMessage(n) => Some(&n.children),
            Node::BulletList(n) => Some(&n.children),
            Node::BulletListItem(n) => Some(&n.children),
            Node::EnumList(n) => Some(&n.children),
            Node::EnumListItem(n) => Some(&n.children),
            Node::DefinitionList(n) => Some(&n.children),
            Node::DefinitionListItem(n) => Some(&n.definition.children),
            Node::Definition(n) => Some(&n.children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Section(n) => Some(&mut n.children),
            Node::Paragraph(n) => Some(&mut n.children),
            Node::BlockQuote(n) => Some(&mut n.children),
            Node::SystemMessage(n) => Some(&mut n.children),
            Node::BulletList(n) => Some(&mut n.children),
            Node::BulletListItem(n) => Some(&mut n.children),
            Node::EnumList(n) => Some(&mut n.children),
            Node::EnumListItem(n) => Some(&mut n.children),
            Node::DefinitionList(n) => Some(&mut n.children),
            Node::DefinitionListItem(n) => Some(&mut n.definition.children),
            Node::Definition(n) => Some(&mut n.children),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.children().is_some()
    }

    /// Scalar text of a leaf variant.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Title(n) => Some(&n.text),
            Node::Text(n) => Some(&n.text),
            Node::LiteralBlock(n) => Some(&n.text),
            Node::Transition(n) => Some(&n.text),
            Node::Comment(n) => Some(&n.text),
            Node::DefinitionTerm(n) => Some(&n.text),
            Node::InlineEmphasis(n)
            | Node::InlineStrong(n)
            | Node::InlineLiteral(n)
            | Node::InlineInterpretedTextRole(n) => Some(&n.text),
            Node::InlineInterpretedText(n) => Some(&n.text),
            Node::InlineReference(n) => Some(&n.text),
            _ => None,
        }
    }

    fn count(&self) -> usize {
        let own = match self {
            Node::Section(s) => 2 + usize::from(s.overline.is_some()),
            Node::DefinitionListItem(_) => 2,
            _ => 1,
        };
        own + self
            .children()
            .map(|children| children.iter().map(Node::count).sum())
            .unwrap_or(0)
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Nesting depth assigned by the section level tracker, starting at 1
    pub level: usize,
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overline: Option<Adornment>,
    pub underline: Adornment,
    #[serde(rename = "nodeList", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub text: String,
    /// Runes of inset before an overlined title
    pub indent_length: u32,
    pub line: u32,
    #[serde(rename = "startPosition")]
    pub start_column: u32,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Adornment {
    pub rune: char,
    pub length: u32,
    pub line: u32,
    #[serde(rename = "startPosition")]
    pub start_column: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub text: String,
    pub line: u32,
    #[serde(rename = "startPosition")]
    pub start_column: u32,
    pub length: u32,
}

// ============================================================================
// Body elements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub text: String,
    pub line: u32,
    #[serde(rename = "startPosition")]
    pub start_column: u32,
    pub length: u32,
}

impl Text {
    pub fn new(text: impl Into<String>, line: u32, start_column: u32) -> Self {
        let text = text.into();
        let length = text.chars().count() as u32;
        Self {
            text,
            line,
            start_column,
            length,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    #[serde(rename = "nodeList", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Paragraph {
    /// Concatenated text of the paragraph, inline markup included without markers.
    pub fn text(&self) -> String {
        self.children.iter().filter_map(Node::text).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockQuote {
    pub line: u32,
    pub indent: u32,
    #[serde(rename = "nodeList", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralBlock {
    pub text: String,
    pub line: u32,
    pub length: u32,
}

impl LiteralBlock {
    pub fn new(text: impl Into<String>, line: u32) -> Self {
        let text = text.into();
        let length = text.chars().count() as u32;
        Self { text, line, length }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub text: String,
    pub line: u32,
    #[serde(rename = "startPosition")]
    pub start_column: u32,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HyperlinkTarget {
    pub name: String,
    pub uri: String,
    pub anonymous: bool,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMessage {
    #[serde(rename = "messageType")]
    pub message_kind: MessageKind,
    pub severity: Severity,
    pub line: u32,
    #[serde(rename = "nodeList", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl SystemMessage {
    /// The human readable message text.
    pub fn message(&self) -> Option<&str> {
        self.children.iter().find_map(|child| match child {
            Node::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    /// The verbatim reconstruction of the offending input, when attached.
    pub fn literal(&self) -> Option<&str> {
        self.children.iter().find_map(|child| match child {
            Node::LiteralBlock(l) => Some(l.text.as_str()),
            _ => None,
        })
    }
}

// ============================================================================
// Lists
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletList {
    pub bullet: String,
    pub line: u32,
    #[serde(rename = "startPosition")]
    pub start_column: u32,
    #[serde(rename = "nodeList", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulletListItem {
    #[serde(rename = "nodeList", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EnumType {
    Arabic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AffixType {
    /// `1.`
    Period,
    /// `1)`
    Paren,
    /// `(1)`
    Parens,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumList {
    pub enum_type: EnumType,
    pub affix_type: AffixType,
    pub line: u32,
    #[serde(rename = "startPosition")]
    pub start_column: u32,
    #[serde(rename = "nodeList", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumListItem {
    pub ordinal: u32,
    #[serde(rename = "nodeList", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionList {
    pub line: u32,
    #[serde(rename = "startPosition")]
    pub start_column: u32,
    #[serde(rename = "nodeList", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefinitionListItem {
    pub term: DefinitionTerm,
    pub definition: Definition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionTerm {
    pub text: String,
    pub line: u32,
    #[serde(rename = "startPosition")]
    pub start_column: u32,
    pub length: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Definition {
    #[serde(rename = "nodeList", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

// ============================================================================
// Inline markup
// ============================================================================

/// Emphasis, strong, literal and role text share one shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inline {
    pub text: String,
    pub line: u32,
    #[serde(rename = "startPosition")]
    pub start_column: u32,
    pub length: u32,
}

impl Inline {
    pub fn new(text: impl Into<String>, line: u32, start_column: u32) -> Self {
        let text = text.into();
        let length = text.chars().count() as u32;
        Self {
            text,
            line,
            start_column,
            length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineInterpretedText {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Inline>,
    pub line: u32,
    #[serde(rename = "startPosition")]
    pub start_column: u32,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineReference {
    pub text: String,
    pub anonymous: bool,
    pub line: u32,
    #[serde(rename = "startPosition")]
    pub start_column: u32,
    pub length: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(Text::new(s, 1, 1))
    }

    #[test]
    fn test_only_containers_expose_children() {
        let mut para = Node::Paragraph(Paragraph::default());
        assert!(para.children_mut().is_some());
        let mut leaf = text("a");
        assert!(leaf.children_mut().is_none());
        assert!(!leaf.is_container());
    }

    #[test]
    fn test_definition_item_descends_into_definition() {
        let mut item = Node::DefinitionListItem(DefinitionListItem {
            term: DefinitionTerm {
                text: "term".into(),
                line: 1,
                start_column: 1,
                length: 4,
            },
            definition: Definition::default(),
        });
        item.children_mut().unwrap().push(text("body"));
        match &item {
            Node::DefinitionListItem(i) => assert_eq!(i.definition.children.len(), 1),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_serialized_shape() {
        let node = Node::Paragraph(Paragraph {
            children: vec![text("hi")],
        });
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["nodeList"][0]["type"], "text");
        assert_eq!(json["nodeList"][0]["text"], "hi");
        assert_eq!(json["nodeList"][0]["startPosition"], 1);

        let empty = serde_json::to_value(Node::Paragraph(Paragraph::default())).unwrap();
        assert!(empty.get("nodeList").is_none());
    }

    #[test]
    fn test_system_messages_are_collected_in_order() {
        let msg = |kind| {
            Node::SystemMessage(SystemMessage {
                message_kind: kind,
                severity: kind.severity(),
                line: 1,
                children: vec![],
            })
        };
        let doc = Document::new(
            "doc",
            vec![
                msg(MessageKind::WarningShortUnderline),
                Node::BlockQuote(BlockQuote {
                    line: 2,
                    indent: 2,
                    children: vec![msg(MessageKind::SevereUnexpectedSectionTitle)],
                }),
            ],
        );
        let kinds: Vec<_> = doc
            .system_messages()
            .iter()
            .map(|m| m.message_kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                MessageKind::WarningShortUnderline,
                MessageKind::SevereUnexpectedSectionTitle
            ]
        );
    }
}
