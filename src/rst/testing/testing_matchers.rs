//! Text matchers for node assertions.
//!
//! Paragraph text keeps its line breaks as `\n` and lengths are counted in runes, so
//! besides plain string matching a node's text can be checked line by line or by its
//! rune count.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextMatch {
    Exact(String),
    StartsWith(String),
    Contains(String),
    /// The text split at `\n`, compared line for line
    Lines(Vec<String>),
    LineCount(usize),
    /// Length in runes, not bytes
    Runes(usize),
}

impl TextMatch {
    pub fn lines(lines: &[&str]) -> Self {
        TextMatch::Lines(lines.iter().map(|l| l.to_string()).collect())
    }

    pub fn matches(&self, actual: &str) -> bool {
        match self {
            TextMatch::Exact(expected) => actual == expected,
            TextMatch::StartsWith(prefix) => actual.starts_with(prefix.as_str()),
            TextMatch::Contains(needle) => actual.contains(needle.as_str()),
            TextMatch::Lines(expected) => actual.split('\n').eq(expected.iter().map(String::as_str)),
            TextMatch::LineCount(count) => actual.split('\n').count() == *count,
            TextMatch::Runes(count) => actual.chars().count() == *count,
        }
    }

    /// Panic with `context` unless `actual` matches.
    pub fn assert(&self, actual: &str, context: &str) {
        assert!(
            self.matches(actual),
            "{}: expected text {}, got {:?}",
            context,
            self,
            actual
        );
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextMatch::Exact(expected) => write!(f, "{:?}", expected),
            TextMatch::StartsWith(prefix) => write!(f, "starting with {:?}", prefix),
            TextMatch::Contains(needle) => write!(f, "containing {:?}", needle),
            TextMatch::Lines(lines) => write!(f, "with lines {:?}", lines),
            TextMatch::LineCount(count) => write!(f, "of {} line(s)", count),
            TextMatch::Runes(count) => write!(f, "of {} rune(s)", count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TextMatch::Exact("a\nb".into()), true)]
    #[case(TextMatch::StartsWith("a\n".into()), true)]
    #[case(TextMatch::Contains("b".into()), true)]
    #[case(TextMatch::lines(&["a", "b"]), true)]
    #[case(TextMatch::lines(&["a b"]), false)]
    #[case(TextMatch::LineCount(2), true)]
    #[case(TextMatch::Runes(3), true)]
    fn test_matches(#[case] matcher: TextMatch, #[case] expected: bool) {
        assert_eq!(matcher.matches("a\nb"), expected);
    }

    #[test]
    fn test_runes_are_not_bytes() {
        assert!(TextMatch::Runes(4).matches("Über"));
        assert!(!TextMatch::Runes(5).matches("Über"));
    }

    #[test]
    #[should_panic(expected = "para: expected text with lines")]
    fn test_assert_names_the_context() {
        TextMatch::lines(&["x"]).assert("y", "para");
    }
}
