//! Paragraphs and inline markup

use rst_nano::rst::ast::Node;
use rst_nano::rst::parse;
use rst_nano::rst::testing::{assert_ast, init_logging, RstSources, TextMatch};

#[test]
fn test_sample_paragraphs() {
    init_logging();
    let (doc, _) = RstSources::get_document("000-paragraphs.rst").unwrap();
    assert_ast(&doc)
        .no_messages()
        .item_kinds(&["paragraph", "paragraph", "paragraph"])
        .item(0, |p| {
            p.text("The first paragraph has\ntwo lines.").line(1);
        })
        .item(1, |p| {
            p.text("The second paragraph.").line(4);
        })
        .item(2, |p| {
            p.text_matches(TextMatch::Contains("ends here".into()));
        });
}

#[test]
fn test_sample_inline_markup() {
    let (doc, _) = RstSources::get_document("060-inline-markup.rst").unwrap();
    assert_ast(&doc)
        .no_messages()
        .item_count(5)
        .item(0, |p| {
            p.child_kinds(&[
                "text",
                "inlineEmphasis",
                "text",
                "inlineStrong",
                "text",
                "inlineLiteral",
                "text",
            ])
            .child(1, |em| {
                em.text("emphasis");
            })
            .child(5, |lit| {
                lit.text("literal");
            });
        })
        .item(1, |p| {
            p.child_kinds(&[
                "text",
                "inlineInterpretedText",
                "text",
                "inlineInterpretedText",
                "text",
                "inlineInterpretedText",
                "text",
            ]);
        })
        .item(2, |p| {
            p.child_kinds(&["text", "inlineReference", "text", "inlineReference", "text"])
                .child(1, |r| {
                    r.text("the documentation");
                })
                .child(3, |r| {
                    r.text("anonymous link");
                });
        })
        .item(3, |p| {
            p.text("Escaped *asterisks* stay plain.").child_count(1);
        })
        .item(4, |p| {
            p.child(1, |strong| {
                strong.kind("inlineStrong").text("span\ntwo lines");
            });
        });
}

#[test]
fn test_interpreted_text_roles() {
    let (doc, _) = RstSources::get_document("060-inline-markup.rst").unwrap();
    let roles: Vec<(String, Option<String>)> = doc.nodes[1]
        .children()
        .unwrap_or_default()
        .iter()
        .filter_map(|n| match n {
            Node::InlineInterpretedText(i) => {
                Some((i.text.clone(), i.role.as_ref().map(|r| r.text.clone())))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        roles,
        vec![
            ("text".to_string(), None),
            ("role".to_string(), Some("code".to_string())),
            ("suffix".to_string(), Some("sup".to_string())),
        ]
    );
}

#[test]
fn test_anonymous_reference_flag() {
    let (doc, _) = RstSources::get_document("060-inline-markup.rst").unwrap();
    let flags: Vec<bool> = doc.nodes[2]
        .children()
        .unwrap_or_default()
        .iter()
        .filter_map(|n| match n {
            Node::InlineReference(r) => Some(r.anonymous),
            _ => None,
        })
        .collect();
    assert_eq!(flags, vec![false, true]);
}

#[test]
fn test_markup_start_rules_keep_plain_text() {
    let (doc, _) = parse("plain", "2 * 3 * 4 and a*b*\n").unwrap();
    assert_ast(&doc)
        .no_messages()
        .item(0, |p| {
            p.child_count(1).text("2 * 3 * 4 and a*b*");
        });
}

#[test]
fn test_indented_paragraph_is_a_block_quote() {
    let (doc, _) = parse("quote", "Intro.\n\n    Quoted text.\n").unwrap();
    assert_ast(&doc)
        .no_messages()
        .item_kinds(&["paragraph", "blockQuote"])
        .item(1, |q| {
            q.line(3).child(0, |p| {
                p.text("Quoted text.");
            });
        });
}

#[test]
fn test_paragraph_lines_and_runes() {
    let (doc, _) = parse("umlaut", "Grüße aus\nder Stadt.\n").unwrap();
    assert_ast(&doc)
        .no_messages()
        .item(0, |p| {
            p.text_lines(&["Grüße aus", "der Stadt."])
                .text_matches(TextMatch::LineCount(2))
                .rune_count(20)
                .child(0, |t| {
                    t.rune_count(20);
                });
        });
}
