//! The lexer state machine.
//!
//!     Input is split into lines up front (tabs expanded, trailing whitespace removed).
//!     The lexer walks them with a line index, a rune `index` into the current line and
//!     the `start` of the token being built; [Lexer::emit] slices `start..index` into a
//!     token and moves `start` up.
//!
//!     Scanning is driven by an explicit `State`. `LineStart` handles what depends on
//!     the previous lines (blank lines, literal blocks, explicit markup and paragraph
//!     continuation, section titles in progress, indentation), `Dispatch` runs the line
//!     classifiers, and each construct state scans its part of the line and hands back
//!     the next state. Tokens are queued and handed out one at a time through
//!     [Iterator], so the parser pulls exactly as far as it needs.
//!
//! Context
//!
//!     The lexer keeps a stack of body columns opened by list items, definitions and
//!     block quotes. A line indented past the innermost column starts a block quote;
//!     a line at a known column is ordinary indentation.

use super::classifiers::{
    adornment, bullet, enumerator, hyperlink_target, indent_of, is_blank, is_comment,
    is_hyperlink_target, is_transition, title_width,
};
use super::inline::{scan_line, Carry, Paragraph};
use crate::rst::token::{Token, TokenKind};
use std::collections::VecDeque;

const TAB_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    LineStart,
    Dispatch,
    Comment,
    HyperlinkTarget,
    Transition,
    Overline,
    Title,
    Bullet,
    Enum,
    DefinitionTerm,
    Text,
    Eof,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Item,
    Definition,
    Quote,
}

#[derive(Debug, Clone, Copy)]
struct Column {
    column: usize,
    kind: ColumnKind,
}

/// Literal block tracking after a paragraph ending in `::`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Literal {
    None,
    /// The last paragraph line ended with `::`
    Pending(usize),
    /// A blank line followed it
    Armed(usize),
    /// Inside the block
    Active(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExplicitKind {
    Comment,
    Target,
}

#[derive(Debug, Clone, Copy)]
struct Explicit {
    indent: usize,
    kind: ExplicitKind,
    /// A comment with text keeps its body across blank lines
    content: bool,
}

/// A section title spread over the following lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionScan {
    None,
    AfterOverline { indent: usize, length: usize },
    AfterTitle { indent: usize, short: bool },
    Underline { indent: usize, short: bool },
}

pub struct Lexer {
    lines: Vec<Vec<char>>,
    line: usize,
    index: usize,
    start: usize,
    next_id: u64,
    state: State,
    pending: VecDeque<Token>,
    columns: Vec<Column>,
    paragraph: Option<usize>,
    literal: Literal,
    explicit: Option<Explicit>,
    section: SectionScan,
    carry: Option<Carry>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut raw: Vec<&str> = source.split('\n').collect();
        if raw.last() == Some(&"") {
            raw.pop();
        }
        let lines = raw.into_iter().map(expand_line).collect();
        Self {
            lines,
            line: 0,
            index: 0,
            start: 0,
            next_id: 1,
            state: State::LineStart,
            pending: VecDeque::new(),
            columns: Vec::new(),
            paragraph: None,
            literal: Literal::None,
            explicit: None,
            section: SectionScan::None,
            carry: None,
        }
    }

    // ========================================================================
    // Position helpers
    // ========================================================================

    fn current(&self) -> &[char] {
        self.lines.get(self.line).map(Vec::as_slice).unwrap_or(&[])
    }

    fn rest(&self) -> &[char] {
        let line = self.current();
        &line[self.index.min(line.len())..]
    }

    fn next_line(&self) -> Option<&[char]> {
        self.lines.get(self.line + 1).map(Vec::as_slice)
    }

    fn next_line_text(&self) -> Option<&[char]> {
        self.next_line().filter(|l| !is_blank(l))
    }

    fn advance_line(&mut self) {
        self.line += 1;
        self.index = 0;
        self.start = 0;
    }

    fn skip_spaces(&mut self) {
        let line = self.current();
        let mut index = self.index;
        while line.get(index) == Some(&' ') {
            index += 1;
        }
        self.index = index;
    }

    /// Emit `start..index` of the current line as a token of `kind`.
    fn emit(&mut self, kind: TokenKind) {
        let text: String = self.current()[self.start..self.index].iter().collect();
        let column = self.start as u32 + 1;
        self.emit_text(kind, text, column);
        self.start = self.index;
    }

    fn emit_text(&mut self, kind: TokenKind, text: String, column: u32) {
        let token = Token::new(self.next_id, kind, text, self.line as u32 + 1, column);
        log::trace!("emit {}", token);
        self.next_id += 1;
        self.pending.push_back(token);
    }

    /// Emit the indentation run from column 0 when there is one.
    fn emit_indent(&mut self, indent: usize, kind: TokenKind) {
        self.start = 0;
        self.index = indent;
        if indent > 0 {
            self.emit(kind);
        }
    }

    // ========================================================================
    // State machine
    // ========================================================================

    fn step(&mut self) -> State {
        match self.state {
            State::LineStart => self.lex_line_start(),
            State::Dispatch => self.dispatch(),
            State::Comment => self.scan_comment(),
            State::HyperlinkTarget => self.scan_hyperlink_target(),
            State::Transition => self.scan_transition(),
            State::Overline => self.scan_overline(),
            State::Title => self.scan_title(),
            State::Bullet => self.scan_bullet(),
            State::Enum => self.scan_enum(),
            State::DefinitionTerm => self.scan_definition_term(),
            State::Text => self.scan_text(),
            State::Eof => {
                let line = self.lines.len() as u32 + 1;
                let token = Token::new(self.next_id, TokenKind::Eof, "", line, 1);
                log::trace!("emit {}", token);
                self.next_id += 1;
                self.pending.push_back(token);
                State::Done
            }
            State::Done => State::Done,
        }
    }

    fn lex_line_start(&mut self) -> State {
        if self.line >= self.lines.len() {
            return State::Eof;
        }
        let line = self.current();
        let indent = indent_of(line);

        if is_blank(line) {
            self.emit_text(TokenKind::BlankLine, "\n".to_string(), 1);
            self.paragraph = None;
            self.explicit = self
                .explicit
                .filter(|e| e.kind == ExplicitKind::Comment && e.content);
            self.carry = None;
            self.section = SectionScan::None;
            if let Literal::Pending(column) = self.literal {
                self.literal = Literal::Armed(column);
            }
            self.advance_line();
            return State::LineStart;
        }

        match self.literal {
            Literal::Armed(column) | Literal::Active(column) if indent > column => {
                self.literal = Literal::Active(column);
                self.start = 0;
                self.index = self.current().len();
                self.emit(TokenKind::LiteralBlock);
                self.advance_line();
                return State::LineStart;
            }
            _ => self.literal = Literal::None,
        }

        if let Some(explicit) = self.explicit.as_mut() {
            if indent > explicit.indent {
                explicit.content = true;
                let kind = match explicit.kind {
                    ExplicitKind::Comment => TokenKind::Text,
                    ExplicitKind::Target => TokenKind::HyperlinkTargetUri,
                };
                self.emit_indent(indent, TokenKind::Space);
                self.index = self.current().len();
                self.emit(kind);
                self.advance_line();
                return State::LineStart;
            }
            self.explicit = None;
        }

        if let Some(state) = self.continue_section(indent) {
            return state;
        }

        while self.columns.last().is_some_and(|c| c.column > indent) {
            self.columns.pop();
        }

        if self.paragraph == Some(indent) {
            self.emit_indent(indent, TokenKind::Space);
            return State::Text;
        }
        self.paragraph = None;
        self.carry = None;

        let top = self.columns.last().map_or(0, |c| c.column);
        if indent > top {
            self.emit_indent(indent, TokenKind::BlockQuote);
            self.columns.push(Column {
                column: indent,
                kind: ColumnKind::Quote,
            });
        } else {
            self.emit_indent(indent, TokenKind::Space);
        }
        State::Dispatch
    }

    /// Lines belonging to a section title started on an earlier line.
    fn continue_section(&mut self, indent: usize) -> Option<State> {
        let scan = std::mem::replace(&mut self.section, SectionScan::None);
        let rest_is_adornment = adornment(&self.current()[indent..]).is_some();
        match scan {
            SectionScan::None => return None,
            SectionScan::AfterOverline { indent: over, length } => {
                self.emit_indent(indent, TokenKind::Space);
                self.index = self.current().len();
                if indent == over && rest_is_adornment {
                    self.emit(TokenKind::SectionAdornment);
                    self.paragraph = None;
                } else {
                    self.emit(TokenKind::Title);
                    self.section = SectionScan::AfterTitle {
                        indent: over,
                        short: length < 4,
                    };
                }
            }
            SectionScan::AfterTitle {
                indent: over,
                short,
            }
            | SectionScan::Underline {
                indent: over,
                short,
            } => {
                if indent != over || !rest_is_adornment {
                    return None;
                }
                self.emit_indent(indent, TokenKind::Space);
                self.index = self.current().len();
                self.emit(TokenKind::SectionAdornment);
                // a title the parser will read back as text keeps its paragraph open
                self.paragraph = short.then_some(indent);
            }
        }
        self.advance_line();
        Some(State::LineStart)
    }

    fn dispatch(&mut self) -> State {
        let indent = self.index;
        let rest = self.rest();
        let next = self.next_line();

        let state = if is_hyperlink_target(rest) {
            State::HyperlinkTarget
        } else if is_comment(rest) {
            State::Comment
        } else if bullet(rest).is_some() {
            State::Bullet
        } else if enumerator(rest).is_some()
            && !next.is_some_and(|n| adornment(&n[indent_of(n)..]).is_some())
        {
            State::Enum
        } else if is_transition(rest, next) {
            State::Transition
        } else if adornment(rest).is_some() {
            State::Overline
        } else if self.next_line_text().is_some_and(|n| {
            indent_of(n) == indent && adornment(&n[indent..]).is_some()
        }) {
            State::Title
        } else if self
            .next_line_text()
            .is_some_and(|n| indent_of(n) >= indent + 2)
        {
            State::DefinitionTerm
        } else {
            State::Text
        };
        log::trace!("line {} dispatches to {:?}", self.line + 1, state);
        state
    }

    // ========================================================================
    // Construct scanners
    // ========================================================================

    fn scan_comment(&mut self) -> State {
        let indent = self.index;
        self.index += 2;
        self.emit(TokenKind::CommentMark);
        self.skip_spaces();
        if self.index > self.start {
            self.emit(TokenKind::Space);
        }
        self.index = self.current().len();
        let content = self.index > self.start;
        if content {
            self.emit(TokenKind::Text);
        }
        self.explicit = Some(Explicit {
            indent,
            kind: ExplicitKind::Comment,
            content,
        });
        self.paragraph = None;
        self.advance_line();
        State::LineStart
    }

    fn scan_hyperlink_target(&mut self) -> State {
        let indent = self.index;
        let parts = hyperlink_target(self.rest()).unwrap_or_default();
        self.field(2, TokenKind::HyperlinkTargetStart);
        self.field(parts.gap, TokenKind::Space);
        self.field(parts.prefix, TokenKind::HyperlinkTargetPrefix);
        if parts.quoted {
            self.field(1, TokenKind::HyperlinkTargetQuote);
        }
        self.field(parts.name, TokenKind::HyperlinkTargetName);
        if parts.quoted {
            self.field(1, TokenKind::HyperlinkTargetQuote);
        }
        self.field(1, TokenKind::HyperlinkTargetSuffix);
        self.field(parts.trailing, TokenKind::Space);
        let rest = self.rest().len();
        self.field(rest, TokenKind::HyperlinkTargetUri);

        self.explicit = Some(Explicit {
            indent,
            kind: ExplicitKind::Target,
            content: true,
        });
        self.paragraph = None;
        self.advance_line();
        State::LineStart
    }

    /// Emit the next `width` runes as `kind`, if there are any.
    fn field(&mut self, width: usize, kind: TokenKind) {
        self.index += width;
        if self.index > self.start {
            self.emit(kind);
        }
    }

    fn scan_transition(&mut self) -> State {
        self.index = self.current().len();
        self.emit(TokenKind::Transition);
        self.paragraph = None;
        self.advance_line();
        State::LineStart
    }

    fn scan_overline(&mut self) -> State {
        let indent = self.index;
        let length = self.rest().len();
        self.index = self.current().len();
        self.emit(TokenKind::SectionAdornment);
        if self.next_line_text().is_some() {
            self.section = SectionScan::AfterOverline { indent, length };
        }
        self.paragraph = None;
        self.advance_line();
        State::LineStart
    }

    fn scan_title(&mut self) -> State {
        let indent = self.index;
        let width = title_width(&self.rest().iter().collect::<String>());
        let underline = self
            .next_line()
            .map_or(0, |n| n.len().saturating_sub(indent));
        self.index = self.current().len();
        self.emit(TokenKind::Title);
        self.section = SectionScan::Underline {
            indent,
            short: underline < 4 && width > underline,
        };
        self.paragraph = None;
        self.advance_line();
        State::LineStart
    }

    fn scan_bullet(&mut self) -> State {
        let marker = self.index;
        self.index += 1;
        self.emit(TokenKind::Bullet);
        self.list_body(marker)
    }

    fn scan_enum(&mut self) -> State {
        let marker = self.index;
        let Some(parts) = enumerator(self.rest()) else {
            return State::Text;
        };
        if parts.open {
            self.index += 1;
            self.emit(TokenKind::EnumListAffix);
        }
        self.index += parts.digits.chars().count();
        self.emit(TokenKind::EnumListArabic);
        self.index += 1;
        self.emit(TokenKind::EnumListAffix);
        self.list_body(marker)
    }

    /// The gap and first line of a list item body.
    fn list_body(&mut self, marker: usize) -> State {
        self.skip_spaces();
        if self.index > self.start {
            self.emit(TokenKind::Space);
        }
        // an empty first line takes its body column from the next line
        let content = if self.index < self.current().len() {
            self.index
        } else {
            self.next_line_text()
                .map(indent_of)
                .filter(|&indent| indent > marker)
                .unwrap_or(self.index + 1)
        };
        self.columns.push(Column {
            column: content,
            kind: ColumnKind::Item,
        });
        if self.index < self.current().len() {
            State::Text
        } else {
            self.paragraph = None;
            self.advance_line();
            State::LineStart
        }
    }

    fn scan_definition_term(&mut self) -> State {
        let body = self.next_line().map_or(self.index + 2, indent_of);
        self.index = self.current().len();
        self.emit(TokenKind::DefinitionTerm);
        self.columns.push(Column {
            column: body,
            kind: ColumnKind::Definition,
        });
        self.paragraph = None;
        self.advance_line();
        State::LineStart
    }

    fn scan_text(&mut self) -> State {
        let column = self.index;
        let in_definition = self
            .columns
            .last()
            .is_some_and(|c| c.kind == ColumnKind::Definition && c.column == column);
        let text_kind = if in_definition {
            TokenKind::DefinitionText
        } else {
            TokenKind::Text
        };
        let indent = *self.paragraph.get_or_insert(column);

        let carry = self.carry.take();
        let para = Paragraph {
            lines: &self.lines,
            indent,
        };
        let (pieces, carry) = scan_line(&para, self.line, column, carry, text_kind);
        self.carry = carry;
        for piece in pieces {
            self.start = piece.from;
            self.index = piece.to;
            self.emit(piece.kind);
        }

        let line = self.current();
        self.literal = if line.ends_with(&[':', ':']) && self.carry.is_none() {
            Literal::Pending(indent)
        } else {
            Literal::None
        };
        self.advance_line();
        State::LineStart
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.pending.is_empty() {
            if self.state == State::Done {
                return None;
            }
            self.state = self.step();
        }
        self.pending.pop_front()
    }
}

/// Expand tabs to the next multiple of eight and drop trailing whitespace.
fn expand_line(raw: &str) -> Vec<char> {
    let mut line = Vec::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - line.len() % TAB_WIDTH;
            line.extend(std::iter::repeat(' ').take(pad));
        } else {
            line.push(c);
        }
    }
    while line.last().is_some_and(|c| c.is_whitespace()) {
        line.pop();
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn lex(source: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(source).map(|t| (t.kind, t.text)).collect()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|t| t.kind).collect()
    }

    fn pair(kind: TokenKind, text: &str) -> (TokenKind, String) {
        (kind, text.to_string())
    }

    #[test]
    fn test_empty_input() {
        let tokens: Vec<Token> = Lexer::new("").collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, Eof);
        assert_eq!(tokens[0].line, 1);
    }

    #[test]
    fn test_paragraph_lines() {
        assert_eq!(
            lex("one\ntwo\n\nthree"),
            vec![
                pair(Text, "one"),
                pair(Text, "two"),
                pair(BlankLine, "\n"),
                pair(Text, "three"),
                pair(Eof, "")
            ]
        );
    }

    #[test]
    fn test_ids_and_positions() {
        let tokens: Vec<Token> = Lexer::new("- a\n\n  b").collect();
        let ids: Vec<u64> = tokens.iter().map(|t| t.id).collect();
        assert_eq!(ids, (1..=tokens.len() as u64).collect::<Vec<_>>());
        let b = tokens.iter().find(|t| t.text == "b").unwrap();
        assert_eq!((b.line, b.start_column, b.length), (3, 3, 1));
    }

    #[test]
    fn test_underlined_title() {
        assert_eq!(
            lex("Title\n=====\n"),
            vec![
                pair(Title, "Title"),
                pair(SectionAdornment, "====="),
                pair(Eof, "")
            ]
        );
    }

    #[test]
    fn test_overlined_title_with_inset() {
        assert_eq!(
            kinds("=======\n  Title\n=======\n"),
            vec![SectionAdornment, Space, Title, SectionAdornment, Eof]
        );
    }

    #[test]
    fn test_transition_and_short_adornment() {
        assert_eq!(
            kinds("a\n\n----\n\nb\n"),
            vec![Text, BlankLine, Transition, BlankLine, Text, Eof]
        );
        assert_eq!(kinds("==\n\nb"), vec![SectionAdornment, BlankLine, Text, Eof]);
    }

    #[test]
    fn test_paragraph_continuation_is_not_classified() {
        assert_eq!(kinds("para\n- not a bullet\n"), vec![Text, Text, Eof]);
    }

    #[test]
    fn test_bullets_and_block_quote() {
        assert_eq!(
            kinds("- a\n  b\n\n  c\n\n    quoted\n"),
            vec![
                Bullet, Space, Text, Space, Text, BlankLine, Space, Text, BlankLine, BlockQuote,
                Text, Eof
            ]
        );
    }

    #[test]
    fn test_enumerators() {
        assert_eq!(
            lex("(1) one"),
            vec![
                pair(EnumListAffix, "("),
                pair(EnumListArabic, "1"),
                pair(EnumListAffix, ")"),
                pair(Space, " "),
                pair(Text, "one"),
                pair(Eof, "")
            ]
        );
    }

    #[test]
    fn test_definition_list() {
        assert_eq!(
            lex("term\n  definition\n"),
            vec![
                pair(DefinitionTerm, "term"),
                pair(Space, "  "),
                pair(DefinitionText, "definition"),
                pair(Eof, "")
            ]
        );
    }

    #[test]
    fn test_comment_with_continuation() {
        assert_eq!(
            lex(".. note\n   more\nafter"),
            vec![
                pair(CommentMark, ".."),
                pair(Space, " "),
                pair(Text, "note"),
                pair(Space, "   "),
                pair(Text, "more"),
                pair(Text, "after"),
                pair(Eof, "")
            ]
        );
    }

    #[test]
    fn test_comment_body_across_blank_lines() {
        assert_eq!(
            kinds(".. a\n\n   b\n"),
            vec![CommentMark, Space, Text, BlankLine, Space, Text, Eof]
        );
        // an empty comment ends at the blank line
        assert_eq!(
            kinds("..\n\n   b\n"),
            vec![CommentMark, BlankLine, BlockQuote, Text, Eof]
        );
    }

    #[test]
    fn test_empty_item_takes_next_line_column() {
        assert_eq!(
            kinds("-\n    body\n    more\n"),
            vec![Bullet, Space, Text, Space, Text, Eof]
        );
    }

    #[test]
    fn test_hyperlink_target() {
        assert_eq!(
            lex(".. _`a b`: http://x"),
            vec![
                pair(HyperlinkTargetStart, ".."),
                pair(Space, " "),
                pair(HyperlinkTargetPrefix, "_"),
                pair(HyperlinkTargetQuote, "`"),
                pair(HyperlinkTargetName, "a b"),
                pair(HyperlinkTargetQuote, "`"),
                pair(HyperlinkTargetSuffix, ":"),
                pair(Space, " "),
                pair(HyperlinkTargetUri, "http://x"),
                pair(Eof, "")
            ]
        );
    }

    #[test]
    fn test_literal_block() {
        assert_eq!(
            lex("Code::\n\n    x = 1\n\n    y = 2\nback"),
            vec![
                pair(Text, "Code::"),
                pair(BlankLine, "\n"),
                pair(LiteralBlock, "    x = 1"),
                pair(BlankLine, "\n"),
                pair(LiteralBlock, "    y = 2"),
                pair(Text, "back"),
                pair(Eof, "")
            ]
        );
    }

    #[test]
    fn test_tabs_and_trailing_whitespace() {
        assert_eq!(expand_line("a\tb  "), "a       b".chars().collect::<Vec<_>>());
    }

    #[test]
    fn test_multiline_inline_markup() {
        assert_eq!(
            kinds("**a\nb**"),
            vec![InlineStrongOpen, InlineStrong, InlineStrong, InlineStrongClose, Eof]
        );
    }
}
