//! Inline markup sub-scanner.
//!
//!     Paragraph lines are split into pieces: plain text, escapes and the
//!     open/body/close triads of inline markup. A start-string is only recognised when
//!     the boundary rules allow it:
//!
//!         - the rune before it is the start of the text, whitespace, an opener or a
//!           delimiter (see [punctuation](super::punctuation)),
//!         - the rune after it is not whitespace,
//!         - the two do not form a matching quote or bracket pair around it,
//!         - it is not escaped with a backslash.
//!
//!     The matching end-string must follow a non-whitespace rune that is not a backslash
//!     and be followed by whitespace, punctuation from the closing classes, or the end of
//!     the line. For `**` the end-string may not be followed by another `*`.
//!
//! Multi-line markup
//!
//!     The end-string may sit on a later line of the same paragraph: the lines right
//!     below at the paragraph's indentation. The scanner then returns a [Carry] and the
//!     lexer feeds the following lines back in with it; each of those lines produces a
//!     body piece until the line holding the end-string. Markup never spans a blank
//!     line. Without any end-string the body runs to the end of the paragraph and no
//!     close piece is produced; the parser reports that.

use super::classifiers::role;
use super::punctuation::{is_quoted_pair, may_follow_end, may_precede_start};
use crate::rst::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Strong,
    Emphasis,
    Literal,
    Interpreted,
    Reference,
}

impl Markup {
    fn tokens(self) -> (TokenKind, TokenKind, TokenKind) {
        use TokenKind::*;
        match self {
            Markup::Strong => (InlineStrongOpen, InlineStrong, InlineStrongClose),
            Markup::Emphasis => (InlineEmphasisOpen, InlineEmphasis, InlineEmphasisClose),
            Markup::Literal => (InlineLiteralOpen, InlineLiteral, InlineLiteralClose),
            Markup::Interpreted => (
                InlineInterpretedTextOpen,
                InlineInterpretedText,
                InlineInterpretedTextClose,
            ),
            Markup::Reference => (
                InlineReferenceOpen,
                InlineReferenceText,
                InlineReferenceClose,
            ),
        }
    }

    fn start_width(self) -> usize {
        match self {
            Markup::Strong | Markup::Literal => 2,
            _ => 1,
        }
    }
}

/// What follows the closing backtick of interpreted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndForm {
    Plain,
    /// `_` or `__`; the width includes the backtick
    Reference { width: usize },
    /// `:role:` suffix, colons included
    Role { width: usize },
}

/// Position of a resolved end-string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Close {
    pub line: usize,
    pub column: usize,
    pub form: EndForm,
}

/// Inline markup left open at the end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carry {
    pub markup: Markup,
    pub close: Option<Close>,
}

/// A run of runes `from..to` on the scanned line and the token kind it becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: TokenKind,
    pub from: usize,
    pub to: usize,
}

/// The lines of the paragraph being scanned.
pub struct Paragraph<'a> {
    pub lines: &'a [Vec<char>],
    /// Column every continuation line starts at
    pub indent: usize,
}

impl<'a> Paragraph<'a> {
    fn line(&self, index: usize) -> &'a [char] {
        self.lines.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Line `index` when it continues the paragraph.
    fn continuation(&self, index: usize) -> Option<&'a [char]> {
        let line = self.lines.get(index)?;
        let indent = line.iter().take_while(|c| **c == ' ').count();
        (indent < line.len() && indent == self.indent).then_some(line.as_slice())
    }
}

struct Start {
    markup: Markup,
    /// Width of a `:role:` prefix in front of the backtick
    role: usize,
}

/// Split `line` from column `from` into pieces; `text` is the kind of plain runs.
pub fn scan_line(
    para: &Paragraph<'_>,
    line: usize,
    from: usize,
    carry: Option<Carry>,
    text: TokenKind,
) -> (Vec<Piece>, Option<Carry>) {
    let chars = para.line(line);
    let mut pieces = Vec::new();
    let mut i = from;

    if let Some(carry) = carry {
        let (_, body, _) = carry.markup.tokens();
        match carry.close {
            Some(close) if close.line == line => {
                push(&mut pieces, body, i, close.column);
                i = push_close(&mut pieces, carry.markup, close);
            }
            _ => {
                push(&mut pieces, body, i, chars.len());
                return (pieces, Some(carry));
            }
        }
    }

    let mut text_start = i;
    while i < chars.len() {
        if chars[i] == '\\' {
            push(&mut pieces, text, text_start, i);
            push(&mut pieces, TokenKind::Escape, i, i + 1);
            i += 1;
            match chars.get(i) {
                Some(c) if c.is_whitespace() => {
                    push(&mut pieces, TokenKind::Space, i, i + 1);
                    i += 1;
                    text_start = i;
                }
                Some(_) => {
                    // the escaped rune is plain text
                    text_start = i;
                    i += 1;
                }
                None => text_start = i,
            }
            continue;
        }

        let Some(start) = match_start(chars, from, i) else {
            i += 1;
            continue;
        };
        push(&mut pieces, text, text_start, i);
        let body_start = i + start.role + start.markup.start_width();
        let close = find_end(para, line, body_start, start.markup, start.role == 0);
        let markup = match close.map(|c| c.form) {
            Some(EndForm::Reference { .. }) => Markup::Reference,
            _ => start.markup,
        };
        if start.role > 0 {
            push(&mut pieces, TokenKind::InlineInterpretedTextRoleOpen, i, i + 1);
            push(&mut pieces, TokenKind::InlineInterpretedTextRole, i + 1, i + start.role - 1);
            push(
                &mut pieces,
                TokenKind::InlineInterpretedTextRoleClose,
                i + start.role - 1,
                i + start.role,
            );
        }
        let (open, body, _) = markup.tokens();
        push(&mut pieces, open, i + start.role, body_start);

        match close {
            Some(close) if close.line == line => {
                push(&mut pieces, body, body_start, close.column);
                i = push_close(&mut pieces, markup, close);
                text_start = i;
            }
            _ => {
                push(&mut pieces, body, body_start, chars.len());
                return (pieces, Some(Carry { markup, close }));
            }
        }
    }
    push(&mut pieces, text, text_start, chars.len());
    (pieces, None)
}

fn push(pieces: &mut Vec<Piece>, kind: TokenKind, from: usize, to: usize) {
    if to > from {
        pieces.push(Piece { kind, from, to });
    }
}

/// Close pieces for `close`; returns the column after them.
fn push_close(pieces: &mut Vec<Piece>, markup: Markup, close: Close) -> usize {
    let (_, _, close_kind) = markup.tokens();
    let at = close.column;
    match close.form {
        EndForm::Plain => {
            let end = at + markup.start_width();
            push(pieces, close_kind, at, end);
            end
        }
        EndForm::Reference { width } => {
            push(pieces, close_kind, at, at + width);
            at + width
        }
        EndForm::Role { width } => {
            push(pieces, close_kind, at, at + 1);
            let role_at = at + 1;
            push(pieces, TokenKind::InlineInterpretedTextRoleOpen, role_at, role_at + 1);
            push(
                pieces,
                TokenKind::InlineInterpretedTextRole,
                role_at + 1,
                role_at + width - 1,
            );
            push(
                pieces,
                TokenKind::InlineInterpretedTextRoleClose,
                role_at + width - 1,
                role_at + width,
            );
            role_at + width
        }
    }
}

fn match_start(chars: &[char], from: usize, i: usize) -> Option<Start> {
    let before = (i > from).then(|| chars[i - 1]);
    if before.is_some_and(|c| c == '\\' || !may_precede_start(c)) {
        return None;
    }
    let rest = &chars[i..];
    let (markup, role_width) = match rest {
        ['`', '`', ..] => (Markup::Literal, 0),
        ['*', '*', ..] => (Markup::Strong, 0),
        ['*', ..] => (Markup::Emphasis, 0),
        ['`', ..] => (Markup::Interpreted, 0),
        [':', ..] => {
            let (width, _) = role(rest)?;
            // a role must lead straight into single backquoted text
            if rest.get(width) != Some(&'`') || rest.get(width + 1) == Some(&'`') {
                return None;
            }
            (Markup::Interpreted, width)
        }
        _ => return None,
    };
    let after = *chars.get(i + role_width + markup.start_width())?;
    if after.is_whitespace() || before.is_some_and(|b| is_quoted_pair(b, after)) {
        return None;
    }
    Some(Start {
        markup,
        role: role_width,
    })
}

/// Find the end-string for `markup`, starting at `body_start` on `line` and moving on
/// through the paragraph's continuation lines.
fn find_end(
    para: &Paragraph<'_>,
    line: usize,
    body_start: usize,
    markup: Markup,
    allow_suffix: bool,
) -> Option<Close> {
    let mut index = line;
    let mut chars = para.line(line);
    // the body holds at least one rune
    let mut from = body_start + 1;
    loop {
        for column in from..chars.len() {
            if let Some(form) = end_at(chars, column, markup, allow_suffix) {
                return Some(Close {
                    line: index,
                    column,
                    form,
                });
            }
        }
        index += 1;
        chars = para.continuation(index)?;
        from = para.indent;
    }
}

fn end_at(chars: &[char], column: usize, markup: Markup, allow_suffix: bool) -> Option<EndForm> {
    let before = *chars.get(column.checked_sub(1)?)?;
    if before.is_whitespace() || (before == '\\' && markup != Markup::Literal) {
        return None;
    }
    let rest = &chars[column..];
    let (form, width) = match markup {
        Markup::Literal => match rest {
            ['`', '`', ..] => (EndForm::Plain, 2),
            _ => return None,
        },
        Markup::Strong => match rest {
            ['*', '*', '*', ..] => return None,
            ['*', '*', ..] => (EndForm::Plain, 2),
            _ => return None,
        },
        Markup::Emphasis => match rest {
            ['*', ..] => (EndForm::Plain, 1),
            _ => return None,
        },
        Markup::Interpreted | Markup::Reference => match rest {
            ['`', '`', ..] => return None,
            ['`', '_', '_', ..] if allow_suffix => (EndForm::Reference { width: 3 }, 3),
            ['`', '_', ..] if allow_suffix => (EndForm::Reference { width: 2 }, 2),
            ['`', ':', ..] if allow_suffix => match role(&rest[1..]) {
                Some((width, _)) => (EndForm::Role { width }, width + 1),
                None => (EndForm::Plain, 1),
            },
            ['`', ..] => (EndForm::Plain, 1),
            _ => return None,
        },
    };
    match chars.get(column + width) {
        Some(next) if !may_follow_end(*next) => None,
        _ => Some(form),
    }
}
