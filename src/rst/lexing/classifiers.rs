//! Line classification predicates.
//!
//!     Pure functions over a line (a slice of runes, already right-trimmed) or the part
//!     of it after the indentation. The lexer consults them at the start of each line to
//!     pick a scanning state; the parser reuses [title_width] to judge underline length.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// Runes that start a bullet list item when followed by a space or end of line.
pub const BULLETS: &[char] = &['*', '+', '-', '\u{2022}', '\u{2023}', '\u{2043}'];

static ENUMERATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\()?([0-9]+)([.)])( +|$)").expect("valid enumerator regex"));

static HYPERLINK_TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\.\.)( +)(?:(__)|(_)(?:(`)([^`]+)(`)|([^`:\s][^:]*?)))(:)( +|$)")
        .expect("valid hyperlink target regex")
});

static ROLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^:([A-Za-z0-9](?:[-_+.]?[A-Za-z0-9])*):").expect("valid role regex")
});

pub fn indent_of(line: &[char]) -> usize {
    line.iter().take_while(|c| **c == ' ').count()
}

pub fn is_blank(line: &[char]) -> bool {
    line.iter().all(|c| c.is_whitespace())
}

/// An adornment line: one ASCII punctuation rune repeated, `::` excepted.
///
/// Returns the rune and the run length.
pub fn adornment(rest: &[char]) -> Option<(char, usize)> {
    let first = *rest.first()?;
    if !first.is_ascii_punctuation() || !rest.iter().all(|c| *c == first) {
        return None;
    }
    if rest.len() == 2 && first == ':' {
        return None;
    }
    Some((first, rest.len()))
}

/// Transition marker: an adornment line of at least four runes with a blank line or the
/// end of input after it.
pub fn is_transition(rest: &[char], next: Option<&[char]>) -> bool {
    rest.len() >= 4 && adornment(rest).is_some() && next.map_or(true, is_blank)
}

pub fn is_hyperlink_target(rest: &[char]) -> bool {
    rest.starts_with(&['.', '.']) && HYPERLINK_TARGET.is_match(&collect(rest))
}

/// Comment start: `..` followed by a space or end of line, unless it is a hyperlink target.
pub fn is_comment(rest: &[char]) -> bool {
    rest.starts_with(&['.', '.'])
        && rest.get(2).map_or(true, |c| *c == ' ')
        && !is_hyperlink_target(rest)
}

pub fn bullet(rest: &[char]) -> Option<char> {
    let first = *rest.first()?;
    (BULLETS.contains(&first) && rest.get(1).map_or(true, |c| *c == ' ')).then_some(first)
}

/// The parts of an enumerated list marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumerator {
    pub open: bool,
    pub digits: String,
    pub close: char,
    pub gap: usize,
}

pub fn enumerator(rest: &[char]) -> Option<Enumerator> {
    let text = collect(rest);
    let caps = ENUMERATOR.captures(&text)?;
    let open = caps.get(1).is_some();
    let close = caps.get(3)?.as_str().chars().next()?;
    if open && close != ')' {
        return None;
    }
    Some(Enumerator {
        open,
        digits: caps.get(2)?.as_str().to_string(),
        close,
        gap: caps.get(4).map_or(0, |m| m.as_str().len()),
    })
}

/// Field widths of a hyperlink target line, in runes, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetParts {
    pub gap: usize,
    pub prefix: usize,
    pub quoted: bool,
    pub name: usize,
    pub trailing: usize,
}

pub fn hyperlink_target(rest: &[char]) -> Option<TargetParts> {
    let text = collect(rest);
    let caps = HYPERLINK_TARGET.captures(&text)?;
    let width = |i: usize| caps.get(i).map_or(0, |m| m.as_str().chars().count());
    let quoted = caps.get(5).is_some();
    Some(TargetParts {
        gap: width(2),
        prefix: width(3) + width(4),
        quoted,
        name: if quoted { width(6) } else { width(8) },
        trailing: width(10),
    })
}

/// Width of a `:role:` at the start of `rest`, colons included, and the role name.
pub fn role(rest: &[char]) -> Option<(usize, String)> {
    if rest.first() != Some(&':') {
        return None;
    }
    let text = collect(&rest[..rest.len().min(64)]);
    let caps = ROLE.captures(&text)?;
    let whole = caps.get(0)?.as_str().chars().count();
    Some((whole, caps.get(1)?.as_str().to_string()))
}

/// Display width of a title, East Asian wide runes counting double.
pub fn title_width(title: &str) -> usize {
    title.width()
}

fn collect(rest: &[char]) -> String {
    rest.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[rstest]
    #[case("=====", Some(('=', 5)))]
    #[case("-", Some(('-', 1)))]
    #[case("::", None)]
    #[case(":::", Some((':', 3)))]
    #[case("=-=", None)]
    #[case("abc", None)]
    #[case("", None)]
    fn test_adornment(#[case] line: &str, #[case] expected: Option<(char, usize)>) {
        assert_eq!(adornment(&chars(line)), expected);
    }

    #[test]
    fn test_transition_needs_four_and_blank_after() {
        assert!(is_transition(&chars("----"), None));
        assert!(is_transition(&chars("----"), Some(&chars(""))));
        assert!(!is_transition(&chars("---"), None));
        assert!(!is_transition(&chars("----"), Some(&chars("text"))));
    }

    #[rstest]
    #[case(".. a comment", true)]
    #[case("..", true)]
    #[case("...", false)]
    #[case(".. _target: http://example.org", false)]
    fn test_comment(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_comment(&chars(line)), expected);
    }

    #[test]
    fn test_hyperlink_target_parts() {
        let parts = hyperlink_target(&chars(".. _name: http://x")).unwrap();
        assert_eq!(
            parts,
            TargetParts {
                gap: 1,
                prefix: 1,
                quoted: false,
                name: 4,
                trailing: 1
            }
        );
        let parts = hyperlink_target(&chars(".. _`a phrase`: uri")).unwrap();
        assert!(parts.quoted);
        assert_eq!(parts.name, 8);
        let parts = hyperlink_target(&chars(".. __: uri")).unwrap();
        assert_eq!(parts.prefix, 2);
        assert_eq!(parts.name, 0);
        assert!(hyperlink_target(&chars(".. _: uri")).is_none());
    }

    #[rstest]
    #[case("- item", Some('-'))]
    #[case("*", Some('*'))]
    #[case("\u{2022} dot", Some('\u{2022}'))]
    #[case("-- dash", None)]
    #[case("*emphasis*", None)]
    fn test_bullet(#[case] line: &str, #[case] expected: Option<char>) {
        assert_eq!(bullet(&chars(line)), expected);
    }

    #[test]
    fn test_enumerator() {
        let e = enumerator(&chars("12. twelve")).unwrap();
        assert_eq!((e.open, e.digits.as_str(), e.close, e.gap), (false, "12", '.', 1));
        let e = enumerator(&chars("(3) three")).unwrap();
        assert!(e.open);
        assert_eq!(e.close, ')');
        assert!(enumerator(&chars("(3. three")).is_none());
        assert!(enumerator(&chars("3.14 is pi")).is_none());
        assert!(enumerator(&chars("1.")).is_some());
    }

    #[test]
    fn test_role() {
        assert_eq!(role(&chars(":code:`x`")), Some((6, "code".to_string())));
        assert_eq!(role(&chars(":a-b:`x`")), Some((5, "a-b".to_string())));
        assert_eq!(role(&chars(":: x")), None);
    }

    #[test]
    fn test_title_width_counts_columns() {
        assert_eq!(title_width("Title"), 5);
        assert_eq!(title_width("e\u{0301}"), 1);
        assert_eq!(title_width("\u{4e2d}\u{6587}"), 4);
    }
}
