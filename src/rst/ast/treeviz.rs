//! Treeviz formatter for document trees

use crate::rst::ast::{Document, Node};

fn truncate(s: &str, max_chars: usize) -> String {
    let flat = s.replace('\n', "↵");
    if flat.chars().count() > max_chars {
        let mut truncated = flat.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        flat
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut result = String::new();
    append_children(&mut result, &doc.nodes, "");
    result
}

fn label(node: &Node) -> String {
    match node {
        Node::Section(s) => format!("{} (level {})", s.title.text, s.level),
        Node::Title(t) => t.text.clone(),
        Node::Adornment(a) => a.rune.to_string().repeat(a.length as usize),
        Node::Paragraph(p) => p.text(),
        Node::BlockQuote(q) => format!("indent {}", q.indent),
        Node::SystemMessage(m) => format!("{} {}", m.severity, m.message_kind),
        Node::BulletList(l) => l.bullet.clone(),
        Node::BulletListItem(_) => String::new(),
        Node::EnumList(l) => format!("{:?}", l.affix_type).to_lowercase(),
        Node::EnumListItem(i) => i.ordinal.to_string(),
        Node::DefinitionList(_) | Node::Definition(_) => String::new(),
        Node::DefinitionListItem(i) => i.term.text.clone(),
        Node::HyperlinkTarget(t) => format!("{} -> {}", t.name, t.uri),
        Node::InlineInterpretedText(t) => match &t.role {
            Some(role) => format!(":{}: {}", role.text, t.text),
            None => t.text.clone(),
        },
        other => other.text().unwrap_or_default().to_string(),
    }
}

fn append_node(result: &mut String, node: &Node, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let display_label = truncate(&label(node), 30);
    if display_label.is_empty() {
        result.push_str(&format!("{}{} {}\n", prefix, connector, node.kind_name()));
    } else {
        result.push_str(&format!(
            "{}{} {}: {}\n",
            prefix,
            connector,
            node.kind_name(),
            display_label
        ));
    }

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    if let Some(children) = node.children() {
        append_children(result, children, &new_prefix);
    }
}

fn append_children(result: &mut String, children: &[Node], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, child, prefix, is_last);
    }
}
