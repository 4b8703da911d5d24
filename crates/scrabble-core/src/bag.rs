//! The tile bag: the per-peer pool of undrawn letters.
//!
//! Stored as a remaining-count per tile kind (indexed like
//! [`DISTRIBUTION`](crate::letter::DISTRIBUTION)), so a draw is a weighted
//! pick over the counts rather than a shuffle of a physical list.

use rand::Rng;

use crate::error::BagError;
use crate::letter::{index_of, DISTRIBUTION};

/// Result of a [`TileBag::draw`].
///
/// `exhausted` is set when fewer letters than requested were available.
/// That is a normal end-of-game boundary, not a failure, so callers must
/// look at `letters.len()` rather than assume they got what they asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draw {
    pub letters: Vec<char>,
    pub exhausted: bool,
}

/// Multiset of `(letter, remaining count)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBag {
    counts: [u32; DISTRIBUTION.len()],
}

impl TileBag {
    /// A bag holding the full supply.
    pub fn standard() -> Self {
        let mut counts = [0; DISTRIBUTION.len()];
        for (slot, &(_, count, _)) in counts.iter_mut().zip(DISTRIBUTION.iter()) {
            *slot = count;
        }
        TileBag { counts }
    }

    /// An empty bag.
    pub fn empty() -> Self {
        TileBag {
            counts: [0; DISTRIBUTION.len()],
        }
    }

    /// A bag holding exactly the given letters (`A`..`Z`, `?`).
    pub fn from_letters(letters: &str) -> Result<Self, BagError> {
        let mut bag = TileBag::empty();
        for c in letters.chars() {
            let idx = index_of(c).ok_or(BagError::UnknownLetter(c))?;
            bag.counts[idx] += 1;
        }
        Ok(bag)
    }

    /// Number of tiles left.
    pub fn remaining(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Remaining count for one letter.
    pub fn count_of(&self, letter: char) -> u32 {
        index_of(letter).map(|i| self.counts[i]).unwrap_or(0)
    }

    /// Remove up to `n` letters chosen uniformly at random without replacement.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Draw {
        let available = self.remaining();
        let take = n.min(available);
        let mut letters = Vec::with_capacity(take);

        for _ in 0..take {
            let total = self.remaining();
            let mut pick = rng.gen_range(0..total);
            for (idx, count) in self.counts.iter_mut().enumerate() {
                let count_usize = *count as usize;
                if pick < count_usize {
                    *count -= 1;
                    letters.push(DISTRIBUTION[idx].0);
                    break;
                }
                pick -= count_usize;
            }
        }

        Draw {
            letters,
            exhausted: n > available,
        }
    }

    /// Take specific letters out of the bag.
    ///
    /// All-or-nothing: if any letter is missing the bag is left untouched.
    pub fn remove(&mut self, letters: &[char]) -> Result<(), BagError> {
        let mut next = self.counts;
        for &c in letters {
            let idx = index_of(c).ok_or(BagError::UnknownLetter(c))?;
            if next[idx] == 0 {
                return Err(BagError::NotInBag(c));
            }
            next[idx] -= 1;
        }
        self.counts = next;
        Ok(())
    }

    /// Remaining letters in supply order, e.g. `"AAB?"`.
    pub fn letters(&self) -> String {
        let mut out = String::with_capacity(self.remaining());
        for (idx, &count) in self.counts.iter().enumerate() {
            for _ in 0..count {
                out.push(DISTRIBUTION[idx].0);
            }
        }
        out
    }
}

impl Default for TileBag {
    fn default() -> Self {
        TileBag::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn draw_removes_without_replacement() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bag = TileBag::standard();
        let draw = bag.draw(7, &mut rng);

        assert_eq!(draw.letters.len(), 7);
        assert!(!draw.exhausted);
        assert_eq!(bag.remaining(), 95);
    }

    #[test]
    fn draw_past_the_end_returns_everything_left() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut bag = TileBag::from_letters("QZ").unwrap();
        let draw = bag.draw(7, &mut rng);

        let mut letters = draw.letters.clone();
        letters.sort_unstable();
        assert_eq!(letters, vec!['Q', 'Z']);
        assert!(draw.exhausted);
        assert!(bag.is_empty());

        let again = bag.draw(3, &mut rng);
        assert!(again.letters.is_empty());
        assert!(again.exhausted);
    }

    #[test]
    fn exact_draw_is_not_exhausted() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut bag = TileBag::from_letters("AB").unwrap();
        let draw = bag.draw(2, &mut rng);
        assert_eq!(draw.letters.len(), 2);
        assert!(!draw.exhausted);
    }

    #[test]
    fn draws_only_what_is_in_the_bag() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut bag = TileBag::from_letters("AAAB").unwrap();
        let draw = bag.draw(4, &mut rng);
        assert_eq!(draw.letters.iter().filter(|&&c| c == 'A').count(), 3);
        assert_eq!(draw.letters.iter().filter(|&&c| c == 'B').count(), 1);
    }

    #[test]
    fn remove_is_all_or_nothing() {
        let mut bag = TileBag::from_letters("ABC").unwrap();
        assert_eq!(bag.remove(&['A', 'Z']), Err(BagError::NotInBag('Z')));
        assert_eq!(bag.remaining(), 3);

        bag.remove(&['A', 'C']).unwrap();
        assert_eq!(bag.letters(), "B");
    }

    #[test]
    fn unknown_letters_are_rejected() {
        assert_eq!(
            TileBag::from_letters("A1").unwrap_err(),
            BagError::UnknownLetter('1')
        );
    }
}
