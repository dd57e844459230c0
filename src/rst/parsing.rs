//! Parser
//!
//!     The parser pulls tokens from the [Lexer] through a [TokenWindow] and dispatches on
//!     the kind of each token that starts a construct. Handlers build nodes, append them
//!     through the [NodeTarget] cursor and consume every further token their construct
//!     owns; the block handlers live in [blocks], paragraphs and inline markup in
//!     [inlines].
//!
//! Line starts
//!
//!     Before the first token of each source line is dispatched, the parser settles the
//!     indentation context: containers in the [IndentQueue] whose content column lies
//!     right of the new line are closed, and the cursor is moved back to the innermost
//!     container still open, else the current section, else the document root.
//!
//! Recovery
//!
//!     Problems become system messages appended where they were found. A few ambiguous
//!     title constructs are instead rewritten in the window into a single text token;
//!     the window then backs up one slot so the main loop parses that token again as an
//!     ordinary paragraph.

pub mod blocks;
pub mod indent;
pub mod inlines;
pub mod sections;
pub mod window;

pub use indent::{IndentEntry, IndentKind, IndentQueue};
pub use sections::{LevelCheck, SectionLevelTracker, SectionStyle};
pub use window::TokenWindow;

use crate::rst::ast::{Document, Node, NodePath, NodeTarget, SystemMessage};
use crate::rst::diagnostics::{rewrite_as_text, system_message, MessageKind};
use crate::rst::error::ParseError;
use crate::rst::lexing::Lexer;
use crate::rst::token::{Token, TokenKind};

pub struct Parser {
    name: String,
    window: TokenWindow<Lexer>,
    target: NodeTarget,
    sections: SectionLevelTracker,
    indents: IndentQueue,
    /// Innermost open section
    section_path: Option<NodePath>,
    /// The line before the current one was blank (or there was none)
    last_blank: bool,
    /// Last source line consumed
    last_line: u32,
}

impl Parser {
    pub fn new(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            window: TokenWindow::new(Lexer::new(text)),
            target: NodeTarget::new(),
            sections: SectionLevelTracker::new(),
            indents: IndentQueue::new(),
            section_path: None,
            last_blank: true,
            last_line: 0,
        }
    }

    /// Run the parser to the end of input.
    pub fn parse(mut self) -> Result<(Document, Vec<SystemMessage>), ParseError> {
        log::debug!("parsing document '{}'", self.name);
        while let Some(token) = self.window.next(1) {
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::BlankLine => {
                    self.last_blank = true;
                    self.last_line = token.line;
                    continue;
                }
                _ => {}
            }
            if token.line > self.last_line {
                self.begin_line(&token)?;
            }
            self.last_line = self.last_line.max(token.end_line());
            self.dispatch(token)?;
            self.last_blank = false;
        }

        let document = Document::new(self.name, self.target.into_nodes());
        let messages = document.system_messages().into_iter().cloned().collect();
        Ok((document, messages))
    }

    fn dispatch(&mut self, token: Token) -> Result<(), ParseError> {
        log::debug!("dispatch {}", token);
        match token.kind {
            // indentation, already accounted for by begin_line
            TokenKind::Space => Ok(()),
            TokenKind::Title => self.title(token),
            TokenKind::SectionAdornment => self.adornment(token),
            TokenKind::Transition => self.transition(token),
            TokenKind::CommentMark => self.comment(token),
            TokenKind::HyperlinkTargetStart => self.hyperlink_target(token),
            TokenKind::Bullet => self.bullet_item(token),
            TokenKind::EnumListAffix | TokenKind::EnumListArabic => self.enum_item(token),
            TokenKind::DefinitionTerm => self.definition_item(token),
            TokenKind::BlockQuote => self.block_quote(token),
            TokenKind::LiteralBlock => self.literal_block(token),
            _ => self.paragraph(token),
        }
    }

    // ========================================================================
    // Indentation context
    // ========================================================================

    /// Close the containers a new line at `first` leaves and move the cursor.
    fn begin_line(&mut self, first: &Token) -> Result<(), ParseError> {
        let content = match first.kind {
            TokenKind::Space | TokenKind::BlockQuote => self
                .window
                .peek(1)
                .filter(|t| t.line == first.line)
                .cloned(),
            _ => Some(first.clone()),
        };
        let closed = self.indents.pop_deeper_than(first.indent());
        self.restore_target()?;

        if let Some(outermost) = closed.last() {
            let continued = content.as_ref().is_some_and(|c| outermost.continued_by(c));
            if !self.last_blank && !continued {
                self.append_message(outermost.kind.unindent_message(), first.line, None)?;
            }
        }
        Ok(())
    }

    fn restore_target(&mut self) -> Result<(), ParseError> {
        match (self.indents.top(), &self.section_path) {
            (Some(entry), _) => self.target.set_parent(&entry.container),
            (None, Some(section)) => self.target.set_parent(section),
            (None, None) => {
                self.target.reset();
                Ok(())
            }
        }
    }

    /// Titles and transitions are only recognised outside body containers.
    fn match_titles(&self) -> bool {
        self.indents.is_empty()
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    /// Consume the next token.
    fn advance(&mut self) -> Option<Token> {
        let token = self.window.next(1)?;
        self.last_line = self.last_line.max(token.end_line());
        Some(token)
    }

    /// Consume `n` tokens, returning the last.
    fn take(&mut self, n: usize) -> Option<Token> {
        let mut last = None;
        for _ in 0..n {
            last = self.advance();
        }
        last
    }

    /// The next token when it is still on `line`.
    fn peek_on_line(&mut self, line: u32) -> Option<Token> {
        self.window
            .peek(1)
            .filter(|t| t.line == line && !matches!(t.kind, TokenKind::BlankLine | TokenKind::Eof))
            .cloned()
    }

    /// Lookahead tokens from offset `from` that sit on `line`.
    fn line_tokens(&mut self, from: usize, line: u32) -> Vec<Token> {
        let mut tokens = Vec::new();
        for n in from..=window::AHEAD {
            match self.window.peek(n) {
                Some(t) if t.line == line && t.kind != TokenKind::Eof => tokens.push(t.clone()),
                _ => break,
            }
        }
        tokens
    }

    /// Rewrite the current token and the next `count` into one text token, then back up
    /// so the main loop parses it again.
    fn reparse_as_text(&mut self, count: usize) {
        let absorbed: Vec<Token> = (1..=count)
            .filter_map(|n| self.window.peek(n).cloned())
            .collect();
        if let Some(current) = self.window.current_mut() {
            rewrite_as_text(current, &absorbed);
        }
        if count > 0 {
            self.window.clear(1..=count);
        }
        self.window.backup();
    }

    fn append_message(
        &mut self,
        kind: MessageKind,
        line: u32,
        source: Option<String>,
    ) -> Result<NodePath, ParseError> {
        self.target
            .append(Node::SystemMessage(system_message(kind, line, source)))
    }
}
