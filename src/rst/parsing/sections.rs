//! Section level tracking.
//!
//!     Section depth is never written in the source. The first adornment style seen is
//!     level 1, the next new style level 2, and so on; a style keeps its level for the
//!     rest of the document. A title may use the style of any level up to one below the
//!     current section (a sibling, an ancestor's sibling or a child). Anything else, a
//!     known style skipping a level or a new style while not at the deepest level, is
//!     inconsistent and the title is rejected.

use crate::rst::ast::NodePath;

/// The adornment signature that identifies a section level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionStyle {
    pub rune: char,
    pub overline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelCheck {
    Accepted(usize),
    Inconsistent,
}

#[derive(Debug)]
struct Level {
    style: SectionStyle,
    sections: Vec<NodePath>,
}

#[derive(Debug, Default)]
pub struct SectionLevelTracker {
    levels: Vec<Level>,
    /// Level of the section currently open, 0 at the document root
    depth: usize,
}

impl SectionLevelTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.depth
    }

    pub fn level_of(&self, style: SectionStyle) -> Option<usize> {
        self.levels
            .iter()
            .position(|l| l.style == style)
            .map(|i| i + 1)
    }

    /// Decide the level of a title with `style`. A new style is registered when accepted.
    pub fn check(&mut self, style: SectionStyle) -> LevelCheck {
        let check = match self.level_of(style) {
            Some(level) if level <= self.depth + 1 => LevelCheck::Accepted(level),
            Some(_) => LevelCheck::Inconsistent,
            None if self.levels.len() == self.depth => {
                self.levels.push(Level {
                    style,
                    sections: Vec::new(),
                });
                LevelCheck::Accepted(self.levels.len())
            }
            None => LevelCheck::Inconsistent,
        };
        log::debug!(
            "section style {:?} at depth {}: {:?}",
            style,
            self.depth,
            check
        );
        check
    }

    /// Register the section node at `path` as the newest one at `level`.
    pub fn record(&mut self, level: usize, path: NodePath) {
        if let Some(entry) = self.levels.get_mut(level.wrapping_sub(1)) {
            entry.sections.push(path);
            self.depth = level;
        }
    }

    pub fn last_section_by_level(&self, level: usize) -> Option<&NodePath> {
        self.levels
            .get(level.checked_sub(1)?)
            .and_then(|l| l.sections.last())
    }

    /// Where a section at `level` is inserted: the document root for level 1, otherwise
    /// the newest section one level up.
    pub fn parent_of(&self, level: usize) -> Option<&NodePath> {
        match level {
            0 | 1 => None,
            _ => self.last_section_by_level(level - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(rune: char) -> SectionStyle {
        SectionStyle {
            rune,
            overline: false,
        }
    }

    fn add(tracker: &mut SectionLevelTracker, rune: char, path: NodePath) -> LevelCheck {
        let check = tracker.check(style(rune));
        if let LevelCheck::Accepted(level) = check {
            tracker.record(level, path);
        }
        check
    }

    #[test]
    fn test_levels_follow_first_appearance() {
        let mut tracker = SectionLevelTracker::new();
        let levels: Vec<LevelCheck> = [('=', vec![0]), ('-', vec![0, 0]), ('~', vec![0, 0, 0]), ('=', vec![1])]
            .into_iter()
            .map(|(rune, path)| add(&mut tracker, rune, path))
            .collect();
        assert_eq!(
            levels,
            vec![
                LevelCheck::Accepted(1),
                LevelCheck::Accepted(2),
                LevelCheck::Accepted(3),
                LevelCheck::Accepted(1)
            ]
        );
        assert_eq!(tracker.depth(), 1);
        assert_eq!(tracker.parent_of(2), Some(&vec![1]));
        assert_eq!(tracker.parent_of(1), None);
    }

    #[test]
    fn test_skipping_a_level_is_inconsistent() {
        let mut tracker = SectionLevelTracker::new();
        add(&mut tracker, '=', vec![0]);
        add(&mut tracker, '-', vec![0, 0]);
        add(&mut tracker, '~', vec![0, 0, 0]);
        add(&mut tracker, '=', vec![1]);
        assert_eq!(add(&mut tracker, '~', vec![1, 0]), LevelCheck::Inconsistent);
        assert_eq!(tracker.depth(), 1);
    }

    #[test]
    fn test_new_style_above_deepest_level_is_inconsistent() {
        let mut tracker = SectionLevelTracker::new();
        add(&mut tracker, '=', vec![0]);
        add(&mut tracker, '-', vec![0, 0]);
        add(&mut tracker, '=', vec![1]);
        assert_eq!(add(&mut tracker, '~', vec![1, 0]), LevelCheck::Inconsistent);
        assert_eq!(tracker.level_of(style('~')), None);
    }

    #[test]
    fn test_overline_is_part_of_the_style() {
        let mut tracker = SectionLevelTracker::new();
        let over = SectionStyle {
            rune: '=',
            overline: true,
        };
        assert_eq!(tracker.check(over), LevelCheck::Accepted(1));
        tracker.record(1, vec![0]);
        assert_eq!(tracker.check(style('=')), LevelCheck::Accepted(2));
    }
}
