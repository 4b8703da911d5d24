//! A player's rack of drawn tiles.

use std::fmt;

use crate::error::RackError;
use crate::letter::{is_rack_letter, value_of};

/// Maximum number of tiles a rack holds.
pub const RACK_CAPACITY: usize = 7;

/// Ordered letters held by one player (`A`..`Z`, `?` for blanks).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rack {
    letters: Vec<char>,
}

impl Rack {
    pub fn new() -> Self {
        Rack::default()
    }

    /// Build a rack from its letters, e.g. `"AEIRST?"`.
    pub fn from_letters(letters: &str) -> Result<Self, RackError> {
        let mut rack = Rack::new();
        rack.push_all(&letters.chars().collect::<Vec<_>>())?;
        Ok(rack)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Free slots before the rack is full.
    pub fn missing(&self) -> usize {
        RACK_CAPACITY - self.letters.len()
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Append drawn letters. Fails without mutating if capacity would be exceeded.
    pub fn push_all(&mut self, letters: &[char]) -> Result<(), RackError> {
        if let Some(&bad) = letters.iter().find(|&&c| !is_rack_letter(c)) {
            return Err(RackError::InvalidLetter(bad));
        }
        if self.letters.len() + letters.len() > RACK_CAPACITY {
            return Err(RackError::Overflow {
                held: self.letters.len(),
                incoming: letters.len(),
            });
        }
        self.letters.extend_from_slice(letters);
        Ok(())
    }

    /// Returns the first letter of `wanted` the rack cannot cover, counting
    /// duplicates.
    pub fn first_missing(&self, wanted: &[char]) -> Option<char> {
        let mut pool = self.letters.clone();
        for &c in wanted {
            match pool.iter().position(|&l| l == c) {
                Some(i) => {
                    pool.swap_remove(i);
                }
                None => return Some(c),
            }
        }
        None
    }

    /// Remove one instance of each letter in `used`, preserving the order of
    /// what remains. All-or-nothing.
    pub fn remove_all(&mut self, used: &[char]) -> Result<(), RackError> {
        if let Some(c) = self.first_missing(used) {
            return Err(RackError::Missing(c));
        }
        for &c in used {
            if let Some(i) = self.letters.iter().position(|&l| l == c) {
                self.letters.remove(i);
            }
        }
        Ok(())
    }

    /// Sum of the tile values left on the rack.
    pub fn value(&self) -> u32 {
        self.letters.iter().filter_map(|&c| value_of(c)).sum()
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.letters {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_enforced() {
        let mut rack = Rack::from_letters("ABCDEF").unwrap();
        assert_eq!(rack.missing(), 1);
        let err = rack.push_all(&['G', 'H']).unwrap_err();
        assert_eq!(err, RackError::Overflow { held: 6, incoming: 2 });
        assert_eq!(rack.len(), 6);
    }

    #[test]
    fn remove_counts_duplicates() {
        let mut rack = Rack::from_letters("AAB").unwrap();
        assert_eq!(rack.first_missing(&['A', 'A', 'A']), Some('A'));
        assert_eq!(rack.remove_all(&['A', 'B', 'B']), Err(RackError::Missing('B')));
        assert_eq!(rack.to_string(), "AAB");

        rack.remove_all(&['A', 'B']).unwrap();
        assert_eq!(rack.to_string(), "A");
    }

    #[test]
    fn blanks_are_worth_nothing() {
        let rack = Rack::from_letters("K?").unwrap();
        assert_eq!(rack.value(), 10);
    }

    #[test]
    fn lowercase_is_not_a_rack_letter() {
        assert_eq!(Rack::from_letters("a"), Err(RackError::InvalidLetter('a')));
    }
}
