//! System messages: the in-tree diagnostic channel.
//!
//!     Malformed input never stops the parser. Each problem is reported as a
//!     [SystemMessage] node drawn from the closed [MessageKind] catalog, placed in the
//!     tree where the problem was found, and parsing resumes.
//!
//! Severity
//!
//!     Every kind maps statically to one of four levels. The prefix of the kind name is
//!     the level, so `warningShortUnderline` is a warning and `severeIncompleteSectionTitle`
//!     is severe.
//!
//! Reconstruction
//!
//!     Most section and markup errors carry a literal block holding the offending input
//!     lines verbatim, rebuilt from the tokens that caused the failure. Info level title
//!     cases do not: the parser rewrites the buffered tokens into plain text instead and
//!     reparses them as a paragraph (see [rewrite_as_text]).

use crate::rst::ast::{LiteralBlock, Node, SystemMessage, Text};
use crate::rst::lexing::detokenizer::render_lines;
use crate::rst::token::{Token, TokenKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Severe,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Severe => write!(f, "severe"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    InfoOverlineTooShortForTitle,
    InfoUnderlineTooShortForTitle,
    InfoUnexpectedTitleOverlineOrTransition,
    WarningShortOverline,
    WarningShortUnderline,
    WarningExplicitMarkupWithUnIndent,
    WarningBlockQuoteWithUnIndent,
    WarningBulletListWithUnIndent,
    WarningDefinitionListWithUnIndent,
    WarningEnumListWithUnIndent,
    WarningInlineEmphasisStartWithoutEnd,
    WarningInlineStrongStartWithoutEnd,
    WarningInlineLiteralStartWithoutEnd,
    WarningInlineInterpretedTextStartWithoutEnd,
    WarningLiteralBlockExpected,
    ErrorInvalidSectionOrTransitionMarker,
    ErrorUnexpectedIndentation,
    SevereUnexpectedSectionTitle,
    SevereUnexpectedSectionTitleOrTransition,
    SevereOverlineUnderlineMismatch,
    SevereIncompleteSectionTitle,
    SevereMissingMatchingUnderlineForOverline,
    SevereTitleLevelInconsistent,
}

impl MessageKind {
    pub fn severity(self) -> Severity {
        use MessageKind::*;
        match self {
            InfoOverlineTooShortForTitle
            | InfoUnderlineTooShortForTitle
            | InfoUnexpectedTitleOverlineOrTransition => Severity::Info,
            WarningShortOverline
            | WarningShortUnderline
            | WarningExplicitMarkupWithUnIndent
            | WarningBlockQuoteWithUnIndent
            | WarningBulletListWithUnIndent
            | WarningDefinitionListWithUnIndent
            | WarningEnumListWithUnIndent
            | WarningInlineEmphasisStartWithoutEnd
            | WarningInlineStrongStartWithoutEnd
            | WarningInlineLiteralStartWithoutEnd
            | WarningInlineInterpretedTextStartWithoutEnd
            | WarningLiteralBlockExpected => Severity::Warning,
            ErrorInvalidSectionOrTransitionMarker | ErrorUnexpectedIndentation => Severity::Error,
            SevereUnexpectedSectionTitle
            | SevereUnexpectedSectionTitleOrTransition
            | SevereOverlineUnderlineMismatch
            | SevereIncompleteSectionTitle
            | SevereMissingMatchingUnderlineForOverline
            | SevereTitleLevelInconsistent => Severity::Severe,
        }
    }

    pub fn message(self) -> &'static str {
        use MessageKind::*;
        match self {
            InfoOverlineTooShortForTitle => {
                "Possible incomplete section title.\nTreating the overline as ordinary text because it's so short."
            }
            InfoUnderlineTooShortForTitle => {
                "Possible title underline, too short for the title.\nTreating it as ordinary text because it's so short."
            }
            InfoUnexpectedTitleOverlineOrTransition => {
                "Unexpected possible title overline or transition.\nTreating it as ordinary text because it's so short."
            }
            WarningShortOverline => "Title overline too short.",
            WarningShortUnderline => "Title underline too short.",
            WarningExplicitMarkupWithUnIndent => {
                "Explicit markup ends without a blank line; unexpected unindent."
            }
            WarningBlockQuoteWithUnIndent => {
                "Block quote ends without a blank line; unexpected unindent."
            }
            WarningBulletListWithUnIndent => {
                "Bullet list ends without a blank line; unexpected unindent."
            }
            WarningDefinitionListWithUnIndent => {
                "Definition list ends without a blank line; unexpected unindent."
            }
            WarningEnumListWithUnIndent => {
                "Enumerated list ends without a blank line; unexpected unindent."
            }
            WarningInlineEmphasisStartWithoutEnd => "Inline emphasis start-string without end-string.",
            WarningInlineStrongStartWithoutEnd => "Inline strong start-string without end-string.",
            WarningInlineLiteralStartWithoutEnd => "Inline literal start-string without end-string.",
            WarningInlineInterpretedTextStartWithoutEnd => {
                "Inline interpreted text or phrase reference start-string without end-string."
            }
            WarningLiteralBlockExpected => "Literal block expected; none found.",
            ErrorInvalidSectionOrTransitionMarker => "Invalid section title or transition marker.",
            ErrorUnexpectedIndentation => "Unexpected indentation.",
            SevereUnexpectedSectionTitle => "Unexpected section title.",
            SevereUnexpectedSectionTitleOrTransition => "Unexpected section title or transition.",
            SevereOverlineUnderlineMismatch => "Title overline & underline mismatch.",
            SevereIncompleteSectionTitle => "Incomplete section title.",
            SevereMissingMatchingUnderlineForOverline => {
                "Missing matching underline for section title overline."
            }
            SevereTitleLevelInconsistent => "Title level inconsistent:",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        write!(f, "{}", name)
    }
}

/// Build a system message node. `source` becomes the literal block child when given.
pub fn system_message(kind: MessageKind, line: u32, source: Option<String>) -> SystemMessage {
    log::debug!("system message {} ({}) at line {}", kind, kind.severity(), line);
    let mut children = vec![Node::Text(Text::new(kind.message(), line, 1))];
    if let Some(source) = source {
        children.push(Node::LiteralBlock(LiteralBlock::new(source, line)));
    }
    SystemMessage {
        message_kind: kind,
        severity: kind.severity(),
        line,
        children,
    }
}

/// Verbatim source of the lines covered by `tokens`, joined by `\n`.
pub fn reconstruct(tokens: &[Token]) -> String {
    render_lines(tokens).join("\n")
}

/// Turn `token` into a plain text token holding the source of itself and `absorbed`.
///
/// The caller clears the absorbed tokens from the window and backs up so the rewritten
/// token is parsed again as paragraph text.
pub fn rewrite_as_text(token: &mut Token, absorbed: &[Token]) {
    let indent = token.start_column.saturating_sub(1) as usize;
    let mut covered = Vec::with_capacity(absorbed.len() + 1);
    covered.push(token.clone());
    covered.extend_from_slice(absorbed);
    // paragraph text is relative to the column the rewritten token starts at
    let text = render_lines(&covered)
        .iter()
        .map(|line| strip_indent(line, indent))
        .collect::<Vec<_>>()
        .join("\n");
    log::debug!("rewriting {} token at line {} as text", token.kind, token.line);
    token.kind = TokenKind::Text;
    token.length = text.chars().count() as u32;
    token.text = text;
}

fn strip_indent(line: &str, indent: usize) -> &str {
    let leading = line.chars().take(indent).take_while(|c| *c == ' ').count();
    &line[leading..]
}
