//! Comments, hyperlink targets, transitions and literal blocks

use rst_nano::rst::ast::Node;
use rst_nano::rst::diagnostics::MessageKind;
use rst_nano::rst::parse;
use rst_nano::rst::testing::{assert_ast, init_logging, RstSources};

fn targets(nodes: &[Node]) -> Vec<(String, String, bool)> {
    nodes
        .iter()
        .filter_map(|n| match n {
            Node::HyperlinkTarget(t) => Some((t.name.clone(), t.uri.clone(), t.anonymous)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_sample_explicit_markup() {
    init_logging();
    let (doc, _) = RstSources::get_document("040-explicit-markup.rst").unwrap();
    assert_ast(&doc)
        .no_messages()
        .item_kinds(&[
            "comment",
            "hyperlinkTarget",
            "hyperlinkTarget",
            "hyperlinkTarget",
            "hyperlinkTarget",
            "paragraph",
        ])
        .item(0, |c| {
            c.text("This is a comment\nspanning two lines.").line(1);
        })
        .item(5, |p| {
            p.text("A paragraph after the markup.");
        });
}

#[test]
fn test_sample_hyperlink_targets() {
    let (doc, _) = RstSources::get_document("040-explicit-markup.rst").unwrap();
    let found = targets(&doc.nodes);
    assert_eq!(found.len(), 4);
    assert_eq!(
        found[0],
        ("python".to_string(), "https://www.python.org/".to_string(), false)
    );
    assert_eq!(found[1].0, "Read the Docs");
    assert_eq!(found[2].1, "https://example.com/anonymous");
    assert!(found[2].2);
    assert_eq!(
        found[3],
        (
            "long-target".to_string(),
            "https://example.com/a/very/long/path".to_string(),
            false
        )
    );
}

#[test]
fn test_empty_comment() {
    let (doc, _) = parse("comment", "..\n\nAfter.\n").unwrap();
    assert_ast(&doc)
        .item_kinds(&["comment", "paragraph"])
        .item(0, |c| {
            c.text("");
        });
}

#[test]
fn test_transition_between_paragraphs() {
    let (doc, _) = parse("transition", "Before.\n\n--------\n\nAfter.\n").unwrap();
    assert_ast(&doc)
        .no_messages()
        .item_kinds(&["paragraph", "transition", "paragraph"])
        .item(1, |t| {
            t.text("--------").line(3);
        });
}

#[test]
fn test_sample_literal_blocks() {
    let (doc, _) = RstSources::get_document("050-literal-blocks.rst").unwrap();
    assert_ast(&doc)
        .no_messages()
        .item_kinds(&[
            "paragraph",
            "literalBlock",
            "paragraph",
            "literalBlock",
            "literalBlock",
            "paragraph",
        ])
        .item(0, |p| {
            p.text("A paragraph introducing code:");
        })
        .item(1, |lb| {
            lb.text("def hello():\n    print(\"hi\")\n\nhello()");
        })
        .item(2, |p| {
            p.text("Expanded form");
        })
        .item(3, |lb| {
            lb.text("$ rst sample.rst");
        })
        .item(4, |lb| {
            lb.text("Only a literal block here.");
        })
        .item(5, |p| {
            p.text("Back to normal text.");
        });
}

#[test]
fn test_comment_followed_by_blank_line() {
    let (doc, _) = parse("comment", ".. comment\n\n").unwrap();
    assert_ast(&doc)
        .no_messages()
        .item_count(1)
        .item(0, |c| {
            c.kind("comment").text("comment");
        });
}

#[test]
fn test_comment_followed_by_unindented_text() {
    let (doc, _) = parse("comment", ".. comment\nNotIndented").unwrap();
    assert_ast(&doc)
        .item_kinds(&["comment", "systemMessage", "paragraph"])
        .messages(&[MessageKind::WarningExplicitMarkupWithUnIndent]);
}
