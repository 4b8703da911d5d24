//! Players and their identities.

use std::fmt;

use crate::rack::Rack;

/// 1-based player ordinal. Player 1 moves first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const FIRST: PlayerId = PlayerId(1);

    /// The ordinal after this one, wrapping after `count`.
    pub fn next(self, count: usize) -> PlayerId {
        let count = count.max(1) as u8;
        PlayerId(self.0 % count + 1)
    }

    pub(crate) fn index(self) -> usize {
        (self.0 as usize).wrapping_sub(1)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub score: i32,
    pub rack: Rack,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Player {
            id,
            score: 0,
            rack: Rack::new(),
        }
    }
}
