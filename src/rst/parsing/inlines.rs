//! Paragraphs and inline markup.
//!
//!     A paragraph collects the text and inline tokens of its first line and of every
//!     following line that starts at the same column with paragraph content. Plain runs
//!     merge into [Text] nodes, line breaks kept as `\n`; each inline triad becomes one
//!     inline node. Markup whose end-string never came is still emitted with the text it
//!     covered, followed by a warning after the paragraph.

use super::Parser;
use crate::rst::ast::{Inline, InlineInterpretedText, InlineReference, Node, Paragraph, SystemMessage, Text};
use crate::rst::diagnostics::{system_message, MessageKind};
use crate::rst::error::ParseError;
use crate::rst::token::{Token, TokenKind};

struct ParagraphBuilder {
    /// Column every line of the paragraph starts at
    column: u32,
    last_line: u32,
    children: Vec<Node>,
    text: Option<Text>,
    after_escape: bool,
    warnings: Vec<SystemMessage>,
}

impl ParagraphBuilder {
    fn new(first: &Token) -> Self {
        Self {
            column: first.start_column,
            last_line: first.line,
            children: Vec::new(),
            text: None,
            after_escape: false,
            warnings: Vec::new(),
        }
    }

    fn push_text(&mut self, token: &Token) {
        match &mut self.text {
            Some(text) => text.text.push_str(&token.text),
            None => self.text = Some(Text::new(token.text.clone(), token.line, token.start_column)),
        }
        self.last_line = self.last_line.max(token.end_line());
    }

    fn new_line(&mut self, token: &Token) {
        match &mut self.text {
            Some(text) => text.text.push('\n'),
            None => self.text = Some(Text::new("\n", token.line, token.start_column)),
        }
    }

    fn flush(&mut self) {
        if let Some(mut text) = self.text.take() {
            text.length = text.text.chars().count() as u32;
            self.children.push(Node::Text(text));
        }
    }

    fn push(&mut self, node: Node) {
        self.flush();
        self.children.push(node);
    }

    fn warn(&mut self, kind: MessageKind, line: u32) {
        self.warnings.push(system_message(kind, line, None));
    }
}

impl Parser {
    pub(super) fn paragraph(&mut self, first: Token) -> Result<(), ParseError> {
        let mut para = ParagraphBuilder::new(&first);
        let mut token = first;
        loop {
            self.paragraph_piece(&mut para, token);
            let Some((offset, next)) = self.peek_paragraph(para.column, para.last_line) else {
                break;
            };
            if next.line > para.last_line {
                para.new_line(&next);
            }
            self.take(offset);
            token = next;
        }
        para.flush();

        let marker = matches!(
            para.children.last(),
            Some(Node::Text(text)) if text.text.ends_with("::")
        );
        self.target.append(Node::Paragraph(Paragraph {
            children: para.children,
        }))?;
        let literal_missing = marker && self.literal_block_missing();
        if literal_missing {
            self.trim_literal_marker()?;
        }
        for warning in para.warnings {
            self.target.append(Node::SystemMessage(warning))?;
        }
        if literal_missing {
            self.append_message(MessageKind::WarningLiteralBlockExpected, para.last_line, None)?;
        }
        Ok(())
    }

    /// After a `::` paragraph: blank lines or the end of input follow, but no literal line.
    fn literal_block_missing(&mut self) -> bool {
        match self.window.peek(1).map(|t| t.kind) {
            None | Some(TokenKind::Eof) => true,
            Some(TokenKind::BlankLine) => self
                .window
                .peek_skip(TokenKind::BlankLine)
                .is_some_and(|(_, t)| t.kind != TokenKind::LiteralBlock),
            _ => false,
        }
    }

    /// The next token of the paragraph and its offset in the window: anything further
    /// on a line already read, or content at the paragraph column on the line after.
    fn peek_paragraph(&mut self, column: u32, last_line: u32) -> Option<(usize, Token)> {
        let next = self.window.peek(1)?.clone();
        if matches!(next.kind, TokenKind::BlankLine | TokenKind::Eof) {
            return None;
        }
        if next.line <= last_line {
            return Some((1, next));
        }
        if next.line != last_line + 1 {
            return None;
        }
        let (offset, content) = if next.kind == TokenKind::Space {
            (2, self.window.peek(2)?.clone())
        } else {
            (1, next)
        };
        (content.line == last_line + 1
            && content.start_column == column
            && content.kind.is_paragraph_content())
        .then_some((offset, content))
    }

    fn paragraph_piece(&mut self, para: &mut ParagraphBuilder, token: Token) {
        match token.kind {
            TokenKind::Escape => {
                para.after_escape = true;
                return;
            }
            // an escaped space disappears
            TokenKind::Space if para.after_escape => {}
            kind if kind.is_inline_open() => self.inline(para, token),
            _ => para.push_text(&token),
        }
        para.after_escape = false;
    }

    // ========================================================================
    // Inline markup
    // ========================================================================

    fn inline(&mut self, para: &mut ParagraphBuilder, open: Token) {
        use TokenKind::*;
        match open.kind {
            InlineStrongOpen => self.simple_inline(
                para,
                open,
                (InlineStrong, InlineStrongClose),
                Node::InlineStrong,
                MessageKind::WarningInlineStrongStartWithoutEnd,
            ),
            InlineEmphasisOpen => self.simple_inline(
                para,
                open,
                (InlineEmphasis, InlineEmphasisClose),
                Node::InlineEmphasis,
                MessageKind::WarningInlineEmphasisStartWithoutEnd,
            ),
            InlineLiteralOpen => self.simple_inline(
                para,
                open,
                (InlineLiteral, InlineLiteralClose),
                Node::InlineLiteral,
                MessageKind::WarningInlineLiteralStartWithoutEnd,
            ),
            InlineInterpretedTextRoleOpen => {
                let role = self.role(para, &open);
                match self.window.peek(1).map(|t| t.kind) {
                    Some(InlineInterpretedTextOpen) => {
                        if let Some(open) = self.take(1) {
                            self.interpreted(para, open, Some(role));
                        }
                    }
                    _ => para.push(Node::InlineInterpretedTextRole(role)),
                }
            }
            InlineInterpretedTextOpen => self.interpreted(para, open, None),
            InlineReferenceOpen => self.reference(para, open),
            _ => para.push_text(&open),
        }
    }

    /// Emphasis, strong and literal.
    fn simple_inline(
        &mut self,
        para: &mut ParagraphBuilder,
        open: Token,
        kinds: (TokenKind, TokenKind),
        node: fn(Inline) -> Node,
        unclosed: MessageKind,
    ) {
        let (text, close) = self.inline_body(para, kinds.0, kinds.1);
        para.push(node(Inline::new(text, open.line, open.start_column)));
        if close.is_none() {
            para.warn(unclosed, open.line);
        }
    }

    fn interpreted(&mut self, para: &mut ParagraphBuilder, open: Token, prefix: Option<Inline>) {
        let (text, close) = self.inline_body(
            para,
            TokenKind::InlineInterpretedText,
            TokenKind::InlineInterpretedTextClose,
        );
        let mut role = prefix;
        if let Some(close) = &close {
            let adjacent = self.window.peek(1).is_some_and(|t| {
                t.kind == TokenKind::InlineInterpretedTextRoleOpen
                    && t.line == close.line
                    && t.start_column == close.start_column + close.length
            });
            if role.is_none() && adjacent {
                if let Some(open) = self.take(1) {
                    role = Some(self.role(para, &open));
                }
            }
        }
        para.push(Node::InlineInterpretedText(InlineInterpretedText {
            length: text.chars().count() as u32,
            text,
            role,
            line: open.line,
            start_column: open.start_column,
        }));
        if close.is_none() {
            para.warn(MessageKind::WarningInlineInterpretedTextStartWithoutEnd, open.line);
        }
    }

    fn reference(&mut self, para: &mut ParagraphBuilder, open: Token) {
        let (text, close) = self.inline_body(
            para,
            TokenKind::InlineReferenceText,
            TokenKind::InlineReferenceClose,
        );
        let anonymous = close.as_ref().is_some_and(|c| c.text == "`__");
        para.push(Node::InlineReference(InlineReference {
            length: text.chars().count() as u32,
            text,
            anonymous,
            line: open.line,
            start_column: open.start_column,
        }));
        if close.is_none() {
            para.warn(MessageKind::WarningInlineInterpretedTextStartWithoutEnd, open.line);
        }
    }

    /// The name of a `:role:` whose opening colon was just consumed.
    fn role(&mut self, para: &mut ParagraphBuilder, open: &Token) -> Inline {
        let mut name = String::new();
        while let Some(token) = self.peek_on_line(open.line) {
            match token.kind {
                TokenKind::InlineInterpretedTextRole => name = token.text,
                TokenKind::InlineInterpretedTextRoleClose => {
                    self.take(1);
                    break;
                }
                _ => break,
            }
            self.take(1);
        }
        para.last_line = para.last_line.max(open.line);
        Inline::new(name, open.line, open.start_column)
    }

    /// Body pieces up to the close token, lines joined by `\n`. No close token means the
    /// markup ran to the end of the paragraph.
    fn inline_body(
        &mut self,
        para: &mut ParagraphBuilder,
        body: TokenKind,
        close: TokenKind,
    ) -> (String, Option<Token>) {
        let mut text = String::new();
        let mut line: Option<u32> = None;
        while let Some((offset, next)) = self.peek_paragraph(para.column, para.last_line) {
            if next.kind == body {
                self.take(offset);
                if line.is_some_and(|l| l < next.line) {
                    text.push('\n');
                }
                line = Some(next.line);
                text.push_str(&next.text);
                para.last_line = para.last_line.max(next.line);
            } else if next.kind == close && offset == 1 {
                self.take(1);
                return (text, Some(next));
            } else {
                break;
            }
        }
        (text, None)
    }
}
