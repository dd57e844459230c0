//! Token lookahead and backup window.
//!
//!     Nine slots centred on the current token: four already consumed tokens behind it
//!     and up to four lookahead tokens in front. Forward slots are filled lazily from the
//!     token source, always contiguously from the current slot outward.
//!
//!     Backing up moves every slot one step right. The token falling off the far end
//!     is kept on a pushback stack and handed out again before the source is pulled, so
//!     a backup never loses input.

use crate::rst::token::{Token, TokenKind};
use std::ops::RangeInclusive;

pub const BACK: usize = 4;
pub const AHEAD: usize = 4;
const CAPACITY: usize = BACK + 1 + AHEAD;
const CURRENT: usize = BACK;

pub struct TokenWindow<I: Iterator<Item = Token>> {
    source: I,
    slots: [Option<Token>; CAPACITY],
    /// Tokens logically after the last slot, nearest on top
    pushback: Vec<Token>,
}

impl<I: Iterator<Item = Token>> TokenWindow<I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            slots: Default::default(),
            pushback: Vec::new(),
        }
    }

    /// Advance `n` tokens and return the new current token.
    pub fn next(&mut self, n: usize) -> Option<Token> {
        for _ in 0..n {
            self.slots.rotate_left(1);
            self.slots[CAPACITY - 1] = None;
            self.fill(CURRENT);
        }
        self.slots[CURRENT].clone()
    }

    /// Undo one `next`.
    pub fn backup(&mut self) {
        if let Some(token) = self.slots[CAPACITY - 1].take() {
            self.pushback.push(token);
        }
        self.slots.rotate_right(1);
        self.slots[0] = None;
    }

    pub fn current(&self) -> Option<&Token> {
        self.slots[CURRENT].as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Token> {
        self.slots[CURRENT].as_mut()
    }

    /// The token `n` places ahead of the current one.
    pub fn peek(&mut self, n: usize) -> Option<&Token> {
        assert!((1..=AHEAD).contains(&n), "peek({}) outside the window", n);
        self.fill(CURRENT + n);
        self.slots[CURRENT + n].as_ref()
    }

    /// The token `n` places behind the current one.
    pub fn peek_back(&self, n: usize) -> Option<&Token> {
        assert!((1..=BACK).contains(&n), "peek_back({}) outside the window", n);
        self.slots[CURRENT - n].as_ref()
    }

    /// The first lookahead token that is not of `kind`, with its offset.
    pub fn peek_skip(&mut self, kind: TokenKind) -> Option<(usize, &Token)> {
        self.fill(CURRENT + AHEAD);
        (1..=AHEAD)
            .map(|n| (n, self.slots[CURRENT + n].as_ref()))
            .take_while(|(_, slot)| slot.is_some())
            .find(|(_, slot)| slot.is_some_and(|t| t.kind != kind))
            .and_then(|(n, slot)| slot.map(|t| (n, t)))
    }

    /// Drop the lookahead tokens at `offsets`; later tokens move up to close the gap.
    pub fn clear(&mut self, offsets: RangeInclusive<usize>) {
        let (first, last) = (*offsets.start(), *offsets.end());
        assert!(
            first >= 1 && last <= AHEAD && first <= last,
            "clear({:?}) outside the window",
            offsets
        );
        for slot in &mut self.slots[CURRENT + first..=CURRENT + last] {
            *slot = None;
        }
        self.slots[CURRENT + first..].rotate_left(last - first + 1);
    }

    fn fill(&mut self, upto: usize) {
        for slot in CURRENT..=upto {
            if self.slots[slot].is_none() {
                self.slots[slot] = self.pushback.pop().or_else(|| self.source.next());
                if self.slots[slot].is_none() {
                    break;
                }
            }
        }
    }
}
