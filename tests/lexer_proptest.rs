//! Property tests for the lexer and parser over arbitrary line soup

use proptest::prelude::*;
use rst_nano::rst::lexing::detokenize;
use rst_nano::rst::{parse, tokenize, TokenKind};

/// Lines drawn from the runes that drive the line classifiers and inline scanner.
fn source() -> impl Strategy<Value = String> {
    prop::collection::vec("[ a-c0-9*`_:.=()\\-\\\\]{0,12}", 0..12).prop_map(|lines| {
        let mut text = lines.join("\n");
        text.push('\n');
        text
    })
}

fn normalized(source: &str) -> String {
    let lines: Vec<&str> = source.lines().map(str::trim_end).collect();
    if lines.is_empty() {
        return String::new();
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

proptest! {
    #[test]
    fn test_token_stream_invariants(text in source()) {
        let tokens = tokenize(&text);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
        for pair in tokens.windows(2) {
            prop_assert_eq!(pair[1].id, pair[0].id + 1);
            prop_assert!(pair[1].line >= pair[0].line);
            if pair[1].line == pair[0].line {
                prop_assert!(pair[1].start_column >= pair[0].start_column + pair[0].length);
            }
        }
    }

    #[test]
    fn test_tokens_reconstruct_source(text in source()) {
        let tokens = tokenize(&text);
        prop_assert_eq!(detokenize(&tokens), normalized(&text));
    }

    #[test]
    fn test_parse_never_fails(text in source()) {
        let result = parse("prop", &text);
        prop_assert!(result.is_ok(), "{:?}", result.err());
        if let Ok((doc, messages)) = result {
            prop_assert_eq!(doc.system_messages().len(), messages.len());
        }
    }
}
