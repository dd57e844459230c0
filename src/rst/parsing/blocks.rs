//! Block level handlers: sections, transitions, explicit markup, lists, block quotes and
//! literal blocks.
//!
//! Section titles
//!
//!     An underlined title arrives as a `title` token followed by the underline's
//!     `sectionAdornment`; an overlined one starts with the overline. Each shape has its
//!     own set of failure modes (too short, mismatched, incomplete, inside a body
//!     container). Overlines and underlines shorter than four runes are ambiguous: they
//!     are reported at info level and the lines are reparsed as plain text.
//!
//! Lists
//!
//!     A list item is a container pushed on the indent queue with the column its body
//!     starts at. A new item continues the list that is the last node of the current
//!     container when it matches that list's marker, so the open list is always read
//!     from the tree of the parse at hand.

use super::indent::{IndentEntry, IndentKind};
use super::sections::{LevelCheck, SectionStyle};
use super::Parser;
use crate::rst::ast::{
    Adornment, AffixType, BlockQuote, BulletList, BulletListItem, Comment, Definition,
    DefinitionList, DefinitionListItem, DefinitionTerm, EnumList, EnumListItem, EnumType,
    HyperlinkTarget, LiteralBlock, Node, NodePath, Section, SystemMessage, Title, Transition,
};
use crate::rst::diagnostics::{reconstruct, system_message, MessageKind};
use crate::rst::error::ParseError;
use crate::rst::lexing::classifiers::title_width;
use crate::rst::token::{Token, TokenKind};

/// Overlines and underlines shorter than this are ambiguous.
const MIN_ADORNMENT: u32 = 4;

fn adornment_node(token: &Token) -> Adornment {
    Adornment {
        rune: token.text.chars().next().unwrap_or_default(),
        length: token.length,
        line: token.line,
        start_column: token.start_column,
    }
}

fn content(tokens: &[Token]) -> Option<&Token> {
    tokens.iter().find(|t| t.kind != TokenKind::Space)
}

impl Parser {
    // ========================================================================
    // Sections
    // ========================================================================

    /// A title line with its underline on the next line.
    pub(super) fn title(&mut self, title: Token) -> Result<(), ParseError> {
        let underline_tokens = self.line_tokens(1, title.line + 1);
        let underline = match content(&underline_tokens) {
            Some(t) if t.kind == TokenKind::SectionAdornment => t.clone(),
            _ => return self.paragraph(title),
        };
        let count = underline_tokens.len();
        let width = title_width(&title.text);
        let length = underline.length as usize;

        if width > length && underline.length < MIN_ADORNMENT {
            if self.match_titles() {
                self.append_message(MessageKind::InfoUnderlineTooShortForTitle, underline.line, None)?;
            }
            self.reparse_as_text(count);
            return Ok(());
        }

        let mut lines = vec![title.clone()];
        lines.extend(underline_tokens);
        let source = reconstruct(&lines);
        self.take(count);

        let mut messages = Vec::new();
        if width > length {
            messages.push(system_message(
                MessageKind::WarningShortUnderline,
                underline.line,
                Some(source.clone()),
            ));
        }
        if !self.match_titles() {
            for message in messages {
                self.target.append(Node::SystemMessage(message))?;
            }
            self.append_message(MessageKind::SevereUnexpectedSectionTitle, title.line, Some(source))?;
            return Ok(());
        }
        self.section(title, None, underline, source, messages)
    }

    /// A section adornment line in a position where a construct starts.
    pub(super) fn adornment(&mut self, overline: Token) -> Result<(), ParseError> {
        if !self.match_titles() {
            return self.nested_adornment(overline);
        }
        let second = self.line_tokens(1, overline.line + 1);
        match content(&second).map(|t| t.kind) {
            Some(TokenKind::Title) => self.overline_title(overline, second),
            Some(TokenKind::SectionAdornment) => {
                let count = second.len();
                if overline.length < MIN_ADORNMENT {
                    return self.short_overline(&overline, count);
                }
                let mut lines = vec![overline.clone()];
                lines.extend(second);
                self.take(count);
                self.append_message(
                    MessageKind::ErrorInvalidSectionOrTransitionMarker,
                    overline.line,
                    Some(reconstruct(&lines)),
                )?;
                Ok(())
            }
            // a lone short adornment is ordinary text
            _ if overline.length < MIN_ADORNMENT => {
                self.reparse_as_text(0);
                Ok(())
            }
            _ => self.transition(overline),
        }
    }

    fn overline_title(&mut self, overline: Token, second: Vec<Token>) -> Result<(), ParseError> {
        let Some(title) = content(&second).cloned() else {
            return Ok(());
        };
        let short = overline.length < MIN_ADORNMENT;
        let through_title = second.len();
        let third = self.line_tokens(through_title + 1, overline.line + 2);

        let mut lines = vec![overline.clone()];
        lines.extend(second);

        match content(&third).cloned() {
            Some(underline) if underline.kind == TokenKind::SectionAdornment => {
                let count = through_title + third.len();
                lines.extend(third);
                let source = reconstruct(&lines);
                if underline.text != overline.text {
                    if short {
                        return self.short_overline(&overline, count);
                    }
                    self.take(count);
                    self.append_message(
                        MessageKind::SevereOverlineUnderlineMismatch,
                        overline.line,
                        Some(source),
                    )?;
                    return Ok(());
                }
                let mut messages = Vec::new();
                if title_width(title.text.trim()) > overline.length as usize {
                    if short {
                        return self.short_overline(&overline, count);
                    }
                    messages.push(system_message(
                        MessageKind::WarningShortOverline,
                        overline.line,
                        Some(source.clone()),
                    ));
                }
                self.take(count);
                self.section(title, Some(overline), underline, source, messages)
            }
            Some(_) => {
                if short {
                    return self.short_overline(&overline, through_title);
                }
                self.take(through_title);
                // the line that should have been the underline is consumed with the title
                let third_line = overline.line + 2;
                while let Some(token) = self.window.peek(1).cloned() {
                    if token.line != third_line || token.kind == TokenKind::Eof {
                        break;
                    }
                    self.advance();
                    lines.push(token);
                }
                self.append_message(
                    MessageKind::SevereMissingMatchingUnderlineForOverline,
                    overline.line,
                    Some(reconstruct(&lines)),
                )?;
                Ok(())
            }
            _ => {
                if short {
                    return self.short_overline(&overline, through_title);
                }
                self.take(through_title);
                self.append_message(
                    MessageKind::SevereIncompleteSectionTitle,
                    overline.line,
                    Some(reconstruct(&lines)),
                )?;
                Ok(())
            }
        }
    }

    fn short_overline(&mut self, overline: &Token, count: usize) -> Result<(), ParseError> {
        self.append_message(MessageKind::InfoOverlineTooShortForTitle, overline.line, None)?;
        self.reparse_as_text(count);
        Ok(())
    }

    /// An adornment line inside a body container, where sections cannot start.
    fn nested_adornment(&mut self, overline: Token) -> Result<(), ParseError> {
        // lines the lexer read as the rest of a title belong to the same construct
        let second = self.line_tokens(1, overline.line + 1);
        let count = match content(&second).map(|t| t.kind) {
            Some(TokenKind::SectionAdornment) => second.len(),
            Some(TokenKind::Title) => {
                let third = self.line_tokens(second.len() + 1, overline.line + 2);
                match content(&third).map(|t| t.kind) {
                    Some(TokenKind::SectionAdornment) => second.len() + third.len(),
                    _ => second.len(),
                }
            }
            _ => 0,
        };

        if overline.length < MIN_ADORNMENT {
            self.append_message(
                MessageKind::InfoUnexpectedTitleOverlineOrTransition,
                overline.line,
                None,
            )?;
            self.reparse_as_text(count);
            return Ok(());
        }

        let line = overline.line;
        let mut lines = vec![overline];
        for _ in 0..count {
            lines.extend(self.advance());
        }
        self.append_message(
            MessageKind::SevereUnexpectedSectionTitleOrTransition,
            line,
            Some(reconstruct(&lines)),
        )?;
        Ok(())
    }

    /// Attach a new section at the level its adornment style calls for.
    fn section(
        &mut self,
        title: Token,
        overline: Option<Token>,
        underline: Token,
        source: String,
        messages: Vec<SystemMessage>,
    ) -> Result<(), ParseError> {
        let style = SectionStyle {
            rune: underline.text.chars().next().unwrap_or_default(),
            overline: overline.is_some(),
        };
        let level = match self.sections.check(style) {
            LevelCheck::Accepted(level) => level,
            LevelCheck::Inconsistent => {
                self.append_message(
                    MessageKind::SevereTitleLevelInconsistent,
                    title.line,
                    Some(source),
                )?;
                return Ok(());
            }
        };

        let text = title.text.trim().to_string();
        let indent_length = overline
            .as_ref()
            .map_or(0, |o| title.start_column.saturating_sub(o.start_column));
        let node = Section {
            level,
            title: Title {
                length: text.chars().count() as u32,
                text,
                indent_length,
                line: title.line,
                start_column: title.start_column,
            },
            overline: overline.as_ref().map(adornment_node),
            underline: adornment_node(&underline),
            children: messages.into_iter().map(Node::SystemMessage).collect(),
        };
        let parent: NodePath = self.sections.parent_of(level).cloned().unwrap_or_default();
        let path = self.target.append_to(&parent, Node::Section(node))?;
        log::debug!("section level {} at {:?}", level, path);
        self.sections.record(level, path.clone());
        self.target.set_parent(&path)?;
        self.section_path = Some(path);
        Ok(())
    }

    pub(super) fn transition(&mut self, token: Token) -> Result<(), ParseError> {
        if !self.match_titles() {
            self.append_message(
                MessageKind::SevereUnexpectedSectionTitleOrTransition,
                token.line,
                Some(reconstruct(std::slice::from_ref(&token))),
            )?;
            return Ok(());
        }
        self.target.append(Node::Transition(Transition {
            text: token.text,
            line: token.line,
            start_column: token.start_column,
            length: token.length,
        }))?;
        Ok(())
    }

    // ========================================================================
    // Explicit markup
    // ========================================================================

    pub(super) fn comment(&mut self, mark: Token) -> Result<(), ParseError> {
        let indent = mark.indent();
        let mut first = String::new();
        while let Some(token) = self.peek_on_line(mark.line) {
            self.advance();
            if token.kind == TokenKind::Text {
                first = token.text;
            }
        }

        // indented body lines, blank lines between them included
        let mut body: Vec<(usize, String)> = Vec::new();
        while let Some((offset, next)) = self
            .window
            .peek_skip(TokenKind::BlankLine)
            .map(|(offset, t)| (offset, t.clone()))
        {
            if offset >= super::window::AHEAD
                || next.kind != TokenKind::Space
                || next.indent() <= indent
                || !self
                    .window
                    .peek(offset + 1)
                    .is_some_and(|t| t.kind == TokenKind::Text && t.line == next.line)
            {
                break;
            }
            for _ in 1..offset {
                self.advance();
                body.push((0, String::new()));
            }
            self.advance();
            if let Some(text) = self.advance() {
                body.push((next.indent(), text.text));
            }
        }

        let common = body
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(indent, _)| *indent)
            .min()
            .unwrap_or(0);
        let mut lines = Vec::with_capacity(body.len() + 1);
        if !first.is_empty() {
            lines.push(first);
        }
        lines.extend(body.into_iter().map(|(indent, text)| {
            if text.is_empty() {
                text
            } else {
                format!("{}{}", " ".repeat(indent - common), text)
            }
        }));
        let text = lines.join("\n");

        self.target.append(Node::Comment(Comment {
            length: text.chars().count() as u32,
            text,
            line: mark.line,
            start_column: mark.start_column,
        }))?;
        self.explicit_end(&mark)
    }

    pub(super) fn hyperlink_target(&mut self, start: Token) -> Result<(), ParseError> {
        let mut prefix = String::new();
        let mut name = String::new();
        let mut uri = String::new();
        while let Some(token) = self.peek_on_line(start.line) {
            self.advance();
            match token.kind {
                TokenKind::HyperlinkTargetPrefix => prefix = token.text,
                TokenKind::HyperlinkTargetName => name = token.text,
                TokenKind::HyperlinkTargetUri => uri.push_str(&token.text),
                _ => {}
            }
        }
        // continuation lines extend the URI
        loop {
            let next_line = self.last_line + 1;
            let indented = self
                .window
                .peek(1)
                .is_some_and(|t| t.kind == TokenKind::Space && t.line == next_line && t.indent() > start.indent());
            let continues = indented
                && self
                    .window
                    .peek(2)
                    .is_some_and(|t| t.kind == TokenKind::HyperlinkTargetUri && t.line == next_line);
            if !continues {
                break;
            }
            self.advance();
            if let Some(token) = self.advance() {
                uri.push_str(&token.text);
            }
        }

        self.target.append(Node::HyperlinkTarget(HyperlinkTarget {
            name: name.split_whitespace().collect::<Vec<_>>().join(" "),
            uri: uri.split_whitespace().collect(),
            anonymous: prefix == "__",
            line: start.line,
        }))?;
        self.explicit_end(&start)
    }

    /// Explicit markup must be followed by a blank line, the end of input or more
    /// explicit markup at the same column.
    fn explicit_end(&mut self, start: &Token) -> Result<(), ParseError> {
        let Some(next) = self.window.peek(1).cloned() else {
            return Ok(());
        };
        if next.line != self.last_line + 1
            || matches!(next.kind, TokenKind::BlankLine | TokenKind::Eof)
        {
            return Ok(());
        }
        let content = if matches!(next.kind, TokenKind::Space | TokenKind::BlockQuote) {
            self.window.peek(2).cloned()
        } else {
            Some(next.clone())
        };
        let another = content.is_some_and(|c| {
            matches!(c.kind, TokenKind::CommentMark | TokenKind::HyperlinkTargetStart)
                && c.start_column == start.start_column
        });
        if !another {
            self.append_message(MessageKind::WarningExplicitMarkupWithUnIndent, next.line, None)?;
        }
        Ok(())
    }

    // ========================================================================
    // Lists
    // ========================================================================

    pub(super) fn bullet_item(&mut self, bullet: Token) -> Result<(), ParseError> {
        let continues = match self.target.last()? {
            Some(Node::BulletList(list)) => {
                list.bullet == bullet.text && list.start_column == bullet.start_column
            }
            _ => false,
        };
        let list = match self.target.last_path()? {
            Some(path) if continues => path,
            _ => self.target.append(Node::BulletList(BulletList {
                bullet: bullet.text.clone(),
                line: bullet.line,
                start_column: bullet.start_column,
                children: Vec::new(),
            }))?,
        };
        let item = self
            .target
            .append_to(&list, Node::BulletListItem(BulletListItem::default()))?;
        let marker_end = bullet.indent() + bullet.length as usize;
        let content_indent = self.item_content_indent(&bullet, marker_end);
        self.open_item(IndentKind::BulletItem, bullet, content_indent, item)
    }

    pub(super) fn enum_item(&mut self, first: Token) -> Result<(), ParseError> {
        let open = first.kind == TokenKind::EnumListAffix;
        let mut last = first.clone();
        let mut digits = String::new();
        if first.kind == TokenKind::EnumListArabic {
            digits = first.text.clone();
        }
        while let Some(token) = self.peek_on_line(first.line).filter(|t| t.kind.is_enum_marker()) {
            self.advance();
            let closing = token.kind == TokenKind::EnumListAffix;
            if token.kind == TokenKind::EnumListArabic {
                digits = token.text.clone();
            }
            last = token;
            if closing {
                break;
            }
        }
        let affix_type = match (open, last.text.as_str()) {
            (true, _) => AffixType::Parens,
            (false, ")") => AffixType::Paren,
            _ => AffixType::Period,
        };
        let ordinal: u32 = digits.parse().unwrap_or(0);

        let continues = match self.target.last()? {
            Some(Node::EnumList(list)) => {
                let previous = list.children.last().and_then(|item| match item {
                    Node::EnumListItem(item) => Some(item.ordinal),
                    _ => None,
                });
                list.affix_type == affix_type
                    && list.start_column == first.start_column
                    && previous.is_some_and(|p| p.checked_add(1) == Some(ordinal))
            }
            _ => false,
        };
        let list = match self.target.last_path()? {
            Some(path) if continues => path,
            _ => self.target.append(Node::EnumList(EnumList {
                enum_type: EnumType::Arabic,
                affix_type,
                line: first.line,
                start_column: first.start_column,
                children: Vec::new(),
            }))?,
        };
        let item = self.target.append_to(
            &list,
            Node::EnumListItem(EnumListItem {
                ordinal,
                children: Vec::new(),
            }),
        )?;
        let marker_end = last.indent() + last.length as usize;
        let content_indent = self.item_content_indent(&first, marker_end);
        self.open_item(IndentKind::EnumItem, first, content_indent, item)
    }

    pub(super) fn definition_item(&mut self, term: Token) -> Result<(), ParseError> {
        let continues = matches!(
            self.target.last()?,
            Some(Node::DefinitionList(list)) if list.start_column == term.start_column
        );
        let list = match self.target.last_path()? {
            Some(path) if continues => path,
            _ => self.target.append(Node::DefinitionList(DefinitionList {
                line: term.line,
                start_column: term.start_column,
                children: Vec::new(),
            }))?,
        };
        let item = self.target.append_to(
            &list,
            Node::DefinitionListItem(DefinitionListItem {
                term: DefinitionTerm {
                    text: term.text.clone(),
                    line: term.line,
                    start_column: term.start_column,
                    length: term.length,
                },
                definition: Definition::default(),
            }),
        )?;
        let body = self
            .window
            .peek(1)
            .filter(|t| t.line == term.line + 1 && t.kind == TokenKind::Space)
            .map(Token::indent)
            .unwrap_or(term.indent() + 2);
        self.open_item(IndentKind::Definition, term, body, item)
    }

    /// Column of an item body: where the first line's text starts, else the next line's
    /// indentation when it is deeper than the marker, else one past the marker.
    fn item_content_indent(&mut self, marker: &Token, marker_end: usize) -> usize {
        if self
            .peek_on_line(marker.line)
            .is_some_and(|t| t.kind == TokenKind::Space)
        {
            self.advance();
        }
        if let Some(first) = self.peek_on_line(marker.line) {
            return first.indent();
        }
        self.window
            .peek(1)
            .filter(|t| {
                t.line == marker.line + 1
                    && matches!(t.kind, TokenKind::Space | TokenKind::BlockQuote)
            })
            .map(Token::indent)
            .filter(|indent| *indent > marker.indent())
            .unwrap_or(marker_end + 1)
    }

    fn open_item(
        &mut self,
        kind: IndentKind,
        anchor: Token,
        content_indent: usize,
        container: NodePath,
    ) -> Result<(), ParseError> {
        self.target.set_parent(&container)?;
        self.indents.push(IndentEntry {
            kind,
            anchor,
            content_indent,
            container,
        });
        Ok(())
    }

    // ========================================================================
    // Indented blocks
    // ========================================================================

    pub(super) fn block_quote(&mut self, indent: Token) -> Result<(), ParseError> {
        if !self.last_blank && matches!(self.target.last()?, Some(Node::Paragraph(_))) {
            self.append_message(MessageKind::ErrorUnexpectedIndentation, indent.line, None)?;
        }
        let quote = self.target.append(Node::BlockQuote(BlockQuote {
            line: indent.line,
            indent: indent.length,
            children: Vec::new(),
        }))?;
        let content_indent = indent.indent();
        self.open_item(IndentKind::Quote, indent, content_indent, quote)
    }

    pub(super) fn literal_block(&mut self, first: Token) -> Result<(), ParseError> {
        let mut lines = vec![first.text.clone()];
        loop {
            match self.window.peek(1).map(|t| t.kind) {
                Some(TokenKind::LiteralBlock) => {
                    if let Some(token) = self.advance() {
                        lines.push(token.text);
                    }
                }
                Some(TokenKind::BlankLine) => {
                    let more = self
                        .window
                        .peek_skip(TokenKind::BlankLine)
                        .filter(|(_, t)| t.kind == TokenKind::LiteralBlock)
                        .map(|(offset, _)| offset);
                    let Some(offset) = more else {
                        break;
                    };
                    for _ in 1..offset {
                        self.advance();
                        lines.push(String::new());
                    }
                }
                _ => break,
            }
        }

        let common = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.chars().take_while(|c| *c == ' ').count())
            .min()
            .unwrap_or(0);
        let text = lines
            .iter()
            .map(|l| l.chars().skip(common).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");

        self.trim_literal_marker()?;
        self.target
            .append(Node::LiteralBlock(LiteralBlock::new(text, first.line)))?;
        Ok(())
    }

    /// Drop the `::` that introduced a literal block from the paragraph before it.
    pub(super) fn trim_literal_marker(&mut self) -> Result<(), ParseError> {
        let list = self.target.current_list_mut()?;
        let only_marker = match list.last() {
            Some(Node::Paragraph(paragraph)) => paragraph.text().trim() == "::",
            _ => return Ok(()),
        };
        if only_marker {
            list.pop();
            return Ok(());
        }
        if let Some(Node::Paragraph(paragraph)) = list.last_mut() {
            if let Some(Node::Text(text)) = paragraph.children.last_mut() {
                if let Some(stripped) = text.text.strip_suffix("::") {
                    text.text = if stripped.ends_with(char::is_whitespace) {
                        stripped.trim_end().to_string()
                    } else {
                        format!("{}:", stripped)
                    };
                    text.length = text.text.chars().count() as u32;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::rst::ast::Node;
    use crate::rst::diagnostics::MessageKind;
    use crate::rst::parse;

    fn kinds(nodes: &[Node]) -> Vec<&'static str> {
        nodes.iter().map(Node::kind_name).collect()
    }

    #[test]
    fn test_underlined_section() {
        let (doc, messages) = parse("t", "Title\n=====\n\nBody.\n").unwrap();
        assert!(messages.is_empty());
        let Node::Section(section) = &doc.nodes[0] else {
            panic!("expected a section");
        };
        assert_eq!(section.level, 1);
        assert_eq!(section.title.text, "Title");
        assert_eq!(section.underline.rune, '=');
        assert_eq!(kinds(&section.children), vec!["paragraph"]);
    }

    #[test]
    fn test_overlined_section_with_inset() {
        let (doc, _) = parse("t", "=======\n  Title\n=======\n").unwrap();
        let Node::Section(section) = &doc.nodes[0] else {
            panic!("expected a section");
        };
        assert_eq!(section.title.text, "Title");
        assert_eq!(section.title.indent_length, 2);
        assert!(section.overline.is_some());
    }

    #[test]
    fn test_short_underline_warning_lives_in_the_section() {
        let (doc, _) = parse("t", "Long title\n=======\n").unwrap();
        let Node::Section(section) = &doc.nodes[0] else {
            panic!("expected a section");
        };
        let Node::SystemMessage(message) = &section.children[0] else {
            panic!("expected a message");
        };
        assert_eq!(message.message_kind, MessageKind::WarningShortUnderline);
        assert_eq!(message.literal(), Some("Long title\n======="));
    }

    #[test]
    fn test_transition() {
        let (doc, _) = parse("t", "Para.\n\n----------\n\nPara.\n").unwrap();
        assert_eq!(kinds(&doc.nodes), vec!["paragraph", "transition", "paragraph"]);
    }

    #[test]
    fn test_comment_body() {
        let (doc, messages) = parse("t", ".. first\n   second\n\n     third\n").unwrap();
        assert!(messages.is_empty());
        let Node::Comment(comment) = &doc.nodes[0] else {
            panic!("expected a comment");
        };
        assert_eq!(comment.text, "first\nsecond\n\n  third");
    }

    #[test]
    fn test_consecutive_explicit_markup() {
        let (doc, messages) = parse("t", ".. a\n.. _b: http://b\n").unwrap();
        assert!(messages.is_empty());
        assert_eq!(kinds(&doc.nodes), vec!["comment", "hyperlinkTarget"]);
    }

    #[test]
    fn test_literal_block_trims_marker() {
        let (doc, _) = parse("t", "Example::\n\n    code\n\n      more\n").unwrap();
        assert_eq!(kinds(&doc.nodes), vec!["paragraph", "literalBlock"]);
        let Node::Paragraph(paragraph) = &doc.nodes[0] else {
            panic!("expected a paragraph");
        };
        assert_eq!(paragraph.text(), "Example:");
        assert_eq!(doc.nodes[1].text(), Some("code\n\n  more"));
    }

    #[test]
    fn test_literal_marker_forms() {
        let (doc, _) = parse("t", "Example ::\n\n    code\n").unwrap();
        let Node::Paragraph(paragraph) = &doc.nodes[0] else {
            panic!("expected a paragraph");
        };
        assert_eq!(paragraph.text(), "Example");

        let (doc, _) = parse("t", "::\n\n    code\n").unwrap();
        assert_eq!(kinds(&doc.nodes), vec!["literalBlock"]);
    }

    #[test]
    fn test_unexpected_indentation() {
        let (doc, _) = parse("t", "Para.\nmore\n  indented\n").unwrap();
        assert_eq!(kinds(&doc.nodes), vec!["paragraph", "systemMessage", "blockQuote"]);
        assert_eq!(
            doc.system_messages()[0].message_kind,
            MessageKind::ErrorUnexpectedIndentation
        );

        let (doc, messages) = parse("t", "Para.\n  indented\n").unwrap();
        assert!(messages.is_empty());
        assert_eq!(kinds(&doc.nodes), vec!["definitionList"]);
    }

    #[test]
    fn test_nested_title_is_one_message() {
        let (doc, messages) = parse("t", "term\n  ====\n  T\n  ====\n").unwrap();
        assert_eq!(kinds(&doc.nodes), vec!["definitionList"]);
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].message_kind,
            MessageKind::SevereUnexpectedSectionTitleOrTransition
        );
        assert_eq!(messages[0].literal(), Some("  ====\n  T\n  ===="));
    }

    #[test]
    fn test_literal_marker_without_block() {
        let (doc, messages) = parse("t", "a::\n\n").unwrap();
        assert_eq!(kinds(&doc.nodes), vec!["paragraph", "systemMessage"]);
        let Node::Paragraph(paragraph) = &doc.nodes[0] else {
            panic!("expected a paragraph");
        };
        assert_eq!(paragraph.text(), "a:");
        assert_eq!(messages[0].message_kind, MessageKind::WarningLiteralBlockExpected);

        let (doc, _) = parse("t", "::\n").unwrap();
        assert_eq!(kinds(&doc.nodes), vec!["systemMessage"]);
    }
}
