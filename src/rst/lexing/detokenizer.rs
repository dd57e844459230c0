//! Detokenizer: rebuild source text from a token stream.
//!
//!     Tokens carry their line and start column, so the text of each source line is the
//!     concatenation of its tokens, padded with spaces wherever a token starts past the
//!     end of what was rebuilt so far. Blank line tokens stand for empty lines and the
//!     end of input token contributes nothing.
//!
//!     Since the lexer right-trims lines and expands tabs, `detokenize(tokenize(s))` gives
//!     back `s` with those two normalizations applied and exactly one trailing newline.

use crate::rst::token::{Token, TokenKind};

/// Source text of every line covered by `tokens`, in order.
pub fn render_lines(tokens: &[Token]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current_line = None;
    let mut width = 0usize;

    for token in tokens {
        if token.kind == TokenKind::Eof {
            continue;
        }
        if current_line != Some(token.line) {
            current_line = Some(token.line);
            lines.push(String::new());
            width = 0;
        }
        let Some(line) = lines.last_mut() else {
            continue;
        };
        if token.kind == TokenKind::BlankLine {
            continue;
        }
        let column = token.start_column.saturating_sub(1) as usize;
        if column > width {
            line.extend(std::iter::repeat(' ').take(column - width));
            width = column;
        }
        line.push_str(&token.text);
        width += token.length as usize;
    }
    lines
}

pub fn detokenize(tokens: &[Token]) -> String {
    let mut result = render_lines(tokens).join("\n");
    if !result.is_empty() || tokens.iter().any(|t| t.kind == TokenKind::BlankLine) {
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_and_eof() {
        let tokens = vec![
            Token::new(1, TokenKind::Text, "one", 1, 1),
            Token::new(2, TokenKind::BlankLine, "\n", 2, 1),
            Token::new(3, TokenKind::Text, "two", 3, 1),
            Token::new(4, TokenKind::Eof, "", 4, 1),
        ];
        assert_eq!(detokenize(&tokens), "one\n\ntwo\n");
    }

    #[test]
    fn test_pads_to_start_column() {
        let tokens = vec![
            Token::new(1, TokenKind::Bullet, "-", 1, 1),
            Token::new(2, TokenKind::Text, "item", 1, 3),
        ];
        assert_eq!(render_lines(&tokens), vec!["- item".to_string()]);
    }

    #[test]
    fn test_empty_stream() {
        assert_eq!(detokenize(&[]), "");
        assert_eq!(detokenize(&[Token::new(1, TokenKind::Eof, "", 1, 1)]), "");
    }
}
