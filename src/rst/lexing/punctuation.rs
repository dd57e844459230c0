//! Punctuation classes used by the inline markup recognition rules.
//!
//!     Start-strings may follow whitespace, an opener or a delimiter; end-strings may be
//!     followed by whitespace, a closer, a delimiter or a closing delimiter. Openers and
//!     closers are paired by position, which is how a start-string wrapped in matching
//!     quotes or brackets (`"*"`, `(*)`) is recognised and rejected.
//!
//!     The tables cover ASCII and the common Unicode quotation, bracket and dash marks
//!     rather than the full Unicode general category database.

/// Opening quotes and brackets; `CLOSERS` holds the matching rune at the same index.
const OPENERS: &[char] = &[
    '"', '\'', '(', '<', '[', '{', '\u{0f3a}', '\u{0f3c}', '\u{169b}', '\u{2045}', '\u{207d}',
    '\u{208d}', '\u{2329}', '\u{2768}', '\u{276a}', '\u{276c}', '\u{276e}', '\u{2770}',
    '\u{2772}', '\u{2774}', '\u{27c5}', '\u{27e6}', '\u{27e8}', '\u{27ea}', '\u{3008}',
    '\u{300a}', '\u{300c}', '\u{300e}', '\u{3010}', '\u{3014}', '\u{3016}', '\u{3018}',
    '\u{301a}', '\u{ff08}', '\u{ff3b}', '\u{ff5b}', '\u{00ab}', '\u{2018}', '\u{201c}',
    '\u{2039}', '\u{201a}', '\u{201e}',
];

const CLOSERS: &[char] = &[
    '"', '\'', ')', '>', ']', '}', '\u{0f3b}', '\u{0f3d}', '\u{169c}', '\u{2046}', '\u{207e}',
    '\u{208e}', '\u{232a}', '\u{2769}', '\u{276b}', '\u{276d}', '\u{276f}', '\u{2771}',
    '\u{2773}', '\u{2775}', '\u{27c6}', '\u{27e7}', '\u{27e9}', '\u{27eb}', '\u{3009}',
    '\u{300b}', '\u{300d}', '\u{300f}', '\u{3011}', '\u{3015}', '\u{3017}', '\u{3019}',
    '\u{301b}', '\u{ff09}', '\u{ff3d}', '\u{ff5d}', '\u{00bb}', '\u{2019}', '\u{201d}',
    '\u{203a}', '\u{2019}', '\u{201d}',
];

/// Closing runes that are not paired with an opener.
const EXTRA_CLOSERS: &[char] = &['\u{00bb}', '\u{2019}', '\u{201d}', '\u{203a}', '\u{201b}', '\u{201f}'];

const CLOSING_DELIMITERS: &[char] = &['\\', '.', ',', ';', '!', '?'];

pub fn is_opener(c: char) -> bool {
    OPENERS.contains(&c)
}

pub fn is_closer(c: char) -> bool {
    CLOSERS.contains(&c) || EXTRA_CLOSERS.contains(&c)
}

/// Dash and other punctuation that may sit on either side of inline markup.
pub fn is_delimiter(c: char) -> bool {
    matches!(c,
        '\\' | '-' | '/' | ':'
        | '\u{058a}' | '\u{00a1}' | '\u{00b7}' | '\u{00bf}' | '\u{037e}' | '\u{0387}'
        | '\u{055a}'..='\u{055f}' | '\u{0589}' | '\u{05be}' | '\u{05c0}' | '\u{05c3}'
        | '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{2043}' | '\u{2051}'..='\u{2053}'
        | '\u{2055}'..='\u{205e}' | '\u{2e00}'..='\u{2e2e}' | '\u{3001}'..='\u{3003}'
        | '\u{301c}' | '\u{3030}' | '\u{303d}' | '\u{30a0}' | '\u{30fb}'
        | '\u{fe10}'..='\u{fe19}' | '\u{fe30}'..='\u{fe52}' | '\u{ff01}'..='\u{ff03}'
        | '\u{ff05}'..='\u{ff07}' | '\u{ff0a}' | '\u{ff0c}'..='\u{ff0f}' | '\u{ff1a}'
        | '\u{ff1b}' | '\u{ff1f}' | '\u{ff20}' | '\u{ff3c}' | '\u{ff61}' | '\u{ff64}'
        | '\u{ff65}')
}

pub fn is_closing_delimiter(c: char) -> bool {
    CLOSING_DELIMITERS.contains(&c)
}

/// May the rune before a start-string precede inline markup?
pub fn may_precede_start(c: char) -> bool {
    c.is_whitespace() || is_opener(c) || is_delimiter(c)
}

/// May the rune after an end-string follow inline markup?
pub fn may_follow_end(c: char) -> bool {
    c.is_whitespace() || is_closer(c) || is_delimiter(c) || is_closing_delimiter(c)
}

/// `before` and `after` wrap a start-string as a matching quote or bracket pair.
pub fn is_quoted_pair(before: char, after: char) -> bool {
    OPENERS
        .iter()
        .zip(CLOSERS)
        .any(|(open, close)| *open == before && *close == after)
        // guillemets and quotes are used in both directions
        || (matches!(before, '\u{00bb}' | '\u{2019}' | '\u{201d}') && before == after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_paired() {
        assert_eq!(OPENERS.len(), CLOSERS.len());
    }

    #[test]
    fn test_quoted_pairs() {
        assert!(is_quoted_pair('(', ')'));
        assert!(is_quoted_pair('"', '"'));
        assert!(is_quoted_pair('\u{201c}', '\u{201d}'));
        assert!(!is_quoted_pair('(', ']'));
        assert!(!is_quoted_pair(' ', 'x'));
    }

    #[test]
    fn test_boundaries() {
        assert!(may_precede_start(' '));
        assert!(may_precede_start('('));
        assert!(may_precede_start('-'));
        assert!(!may_precede_start('a'));
        assert!(may_follow_end('.'));
        assert!(may_follow_end(')'));
        assert!(may_follow_end('\u{2014}'));
        assert!(!may_follow_end('*'));
        assert!(!may_follow_end('a'));
    }
}
