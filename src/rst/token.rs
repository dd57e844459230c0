//! Token types shared by the lexer, the parser and the tooling.
//!
//!     Tokens are line anchored: each one records the 1-based line it was found on, the
//!     1-based column of its first rune and its length in runes. The lexer emits them in
//!     source order with a monotonic id, so a token stream can always be grouped back into
//!     lines (see [detokenize](crate::rst::lexing::detokenize)).
//!
//! Token Families
//!
//!     Line structure:
//!         space, blankLine, blockQuote, literalBlock, eof.
//!
//!     Sections:
//!         title, sectionAdornment, transition.
//!
//!     Body elements:
//!         text, bullet, enumListAffix, enumListArabic, definitionTerm, definitionText,
//!         commentMark, hyperlinkTarget{Start,Prefix,Quote,Name,Suffix,Uri}, escape.
//!
//!     Inline markup, always an open/body/close triad:
//!         inline{Strong,Emphasis,Literal,InterpretedText,InterpretedTextRole}{Open,,Close}
//!         and inlineReference{Open,Text,Close}.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every kind of token the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    Eof,
    Error,
    Title,
    SectionAdornment,
    Text,
    BlockQuote,
    LiteralBlock,
    SystemMessage,
    Space,
    BlankLine,
    Transition,
    CommentMark,
    EnumListAffix,
    EnumListArabic,
    HyperlinkTargetStart,
    HyperlinkTargetPrefix,
    HyperlinkTargetQuote,
    HyperlinkTargetName,
    HyperlinkTargetSuffix,
    HyperlinkTargetUri,
    InlineStrongOpen,
    InlineStrong,
    InlineStrongClose,
    InlineEmphasisOpen,
    InlineEmphasis,
    InlineEmphasisClose,
    InlineLiteralOpen,
    InlineLiteral,
    InlineLiteralClose,
    InlineInterpretedTextOpen,
    InlineInterpretedText,
    InlineInterpretedTextClose,
    InlineInterpretedTextRoleOpen,
    InlineInterpretedTextRole,
    InlineInterpretedTextRoleClose,
    InlineReferenceOpen,
    InlineReferenceText,
    InlineReferenceClose,
    DefinitionTerm,
    DefinitionText,
    Bullet,
    Escape,
}

impl TokenKind {
    /// The camelCase name used by the serialized token schema.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "eof",
            TokenKind::Error => "error",
            TokenKind::Title => "title",
            TokenKind::SectionAdornment => "sectionAdornment",
            TokenKind::Text => "text",
            TokenKind::BlockQuote => "blockQuote",
            TokenKind::LiteralBlock => "literalBlock",
            TokenKind::SystemMessage => "systemMessage",
            TokenKind::Space => "space",
            TokenKind::BlankLine => "blankLine",
            TokenKind::Transition => "transition",
            TokenKind::CommentMark => "commentMark",
            TokenKind::EnumListAffix => "enumListAffix",
            TokenKind::EnumListArabic => "enumListArabic",
            TokenKind::HyperlinkTargetStart => "hyperlinkTargetStart",
            TokenKind::HyperlinkTargetPrefix => "hyperlinkTargetPrefix",
            TokenKind::HyperlinkTargetQuote => "hyperlinkTargetQuote",
            TokenKind::HyperlinkTargetName => "hyperlinkTargetName",
            TokenKind::HyperlinkTargetSuffix => "hyperlinkTargetSuffix",
            TokenKind::HyperlinkTargetUri => "hyperlinkTargetUri",
            TokenKind::InlineStrongOpen => "inlineStrongOpen",
            TokenKind::InlineStrong => "inlineStrong",
            TokenKind::InlineStrongClose => "inlineStrongClose",
            TokenKind::InlineEmphasisOpen => "inlineEmphasisOpen",
            TokenKind::InlineEmphasis => "inlineEmphasis",
            TokenKind::InlineEmphasisClose => "inlineEmphasisClose",
            TokenKind::InlineLiteralOpen => "inlineLiteralOpen",
            TokenKind::InlineLiteral => "inlineLiteral",
            TokenKind::InlineLiteralClose => "inlineLiteralClose",
            TokenKind::InlineInterpretedTextOpen => "inlineInterpretedTextOpen",
            TokenKind::InlineInterpretedText => "inlineInterpretedText",
            TokenKind::InlineInterpretedTextClose => "inlineInterpretedTextClose",
            TokenKind::InlineInterpretedTextRoleOpen => "inlineInterpretedTextRoleOpen",
            TokenKind::InlineInterpretedTextRole => "inlineInterpretedTextRole",
            TokenKind::InlineInterpretedTextRoleClose => "inlineInterpretedTextRoleClose",
            TokenKind::InlineReferenceOpen => "inlineReferenceOpen",
            TokenKind::InlineReferenceText => "inlineReferenceText",
            TokenKind::InlineReferenceClose => "inlineReferenceClose",
            TokenKind::DefinitionTerm => "definitionTerm",
            TokenKind::DefinitionText => "definitionText",
            TokenKind::Bullet => "bullet",
            TokenKind::Escape => "escape",
        }
    }

    /// Plain paragraph text, in or out of a definition body
    pub fn is_text(self) -> bool {
        matches!(self, TokenKind::Text | TokenKind::DefinitionText)
    }

    /// Tokens that open an inline markup construct
    pub fn is_inline_open(self) -> bool {
        matches!(
            self,
            TokenKind::InlineStrongOpen
                | TokenKind::InlineEmphasisOpen
                | TokenKind::InlineLiteralOpen
                | TokenKind::InlineInterpretedTextOpen
                | TokenKind::InlineInterpretedTextRoleOpen
                | TokenKind::InlineReferenceOpen
        )
    }

    /// Any piece of an inline markup triad, role pieces included
    pub fn is_inline(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            InlineStrongOpen
                | InlineStrong
                | InlineStrongClose
                | InlineEmphasisOpen
                | InlineEmphasis
                | InlineEmphasisClose
                | InlineLiteralOpen
                | InlineLiteral
                | InlineLiteralClose
                | InlineInterpretedTextOpen
                | InlineInterpretedText
                | InlineInterpretedTextClose
                | InlineInterpretedTextRoleOpen
                | InlineInterpretedTextRole
                | InlineInterpretedTextRoleClose
                | InlineReferenceOpen
                | InlineReferenceText
                | InlineReferenceClose
        )
    }

    /// Tokens that can appear inside a paragraph
    pub fn is_paragraph_content(self) -> bool {
        self.is_text() || self.is_inline() || self == TokenKind::Escape
    }

    /// Enumerated list markers (`1.`, `1)`, `(1)`)
    pub fn is_enum_marker(self) -> bool {
        matches!(self, TokenKind::EnumListAffix | TokenKind::EnumListArabic)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single lexed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line number
    pub line: u32,
    /// 1-based column of the first rune
    #[serde(rename = "startPosition")]
    pub start_column: u32,
    /// Length in runes, not bytes
    pub length: u32,
}

impl Token {
    pub fn new(
        id: u64,
        kind: TokenKind,
        text: impl Into<String>,
        line: u32,
        start_column: u32,
    ) -> Self {
        let text = text.into();
        let length = text.chars().count() as u32;
        Self {
            id,
            kind,
            text,
            line,
            start_column,
            length,
        }
    }

    /// Last line this token covers; rewritten recovery tokens span several lines.
    pub fn end_line(&self) -> u32 {
        self.line + self.text.matches('\n').count() as u32
    }

    /// Indentation width of a line starting with this token.
    pub fn indent(&self) -> usize {
        match self.kind {
            TokenKind::Space | TokenKind::BlockQuote => self.length as usize,
            TokenKind::LiteralBlock => self.text.chars().take_while(|c| c.is_whitespace()).count(),
            _ => self.start_column.saturating_sub(1) as usize,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} {:?}",
            self.line, self.start_column, self.kind, self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_runes() {
        let token = Token::new(1, TokenKind::Title, "Über", 1, 1);
        assert_eq!(token.length, 4);
    }

    #[test]
    fn test_serialized_schema() {
        let token = Token::new(3, TokenKind::InlineStrongOpen, "**", 2, 5);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["type"], "inlineStrongOpen");
        assert_eq!(json["startPosition"], 5);
        assert_eq!(json["length"], 2);
        assert_eq!(json["id"], 3);
    }

    #[test]
    fn test_kind_name_matches_serde() {
        for kind in [
            TokenKind::BlankLine,
            TokenKind::HyperlinkTargetUri,
            TokenKind::InlineInterpretedTextRoleClose,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.name());
        }
    }

    #[test]
    fn test_end_line_of_rewritten_token() {
        let token = Token::new(1, TokenKind::Text, "Title\n==", 4, 1);
        assert_eq!(token.end_line(), 5);
    }

    #[test]
    fn test_indent() {
        assert_eq!(Token::new(1, TokenKind::Space, "   ", 1, 1).indent(), 3);
        assert_eq!(Token::new(1, TokenKind::Text, "x", 1, 5).indent(), 4);
        assert_eq!(Token::new(1, TokenKind::LiteralBlock, "  code", 1, 1).indent(), 2);
    }
}
