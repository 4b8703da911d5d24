//! Placement legality and scoring.
//!
//! No dictionary is consulted: a move is legal when its geometry is legal
//! and the mover holds the tiles. Words are reported so the result message
//! can name them.

use std::collections::{HashMap, HashSet};

use crate::board::Board;
use crate::error::InvalidMove;
use crate::letter::Tile;
use crate::placement::{Move, Placement};
use crate::position::{Direction, Position};
use crate::rack::{Rack, RACK_CAPACITY};

/// Bonus for playing a full rack in one move.
pub const BINGO_BONUS: u32 = 50;

/// A legal move with its score, ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMove {
    /// Tiles that land on empty squares. Same-letter overlaps are dropped.
    pub new_tiles: Vec<Placement>,
    /// Rack letters consumed (`?` for blanks).
    pub used: Vec<char>,
    /// Main word first, then cross words.
    pub words: Vec<String>,
    pub score: u32,
}

/// Check `mv` against the board and the mover's rack and score it.
///
/// Pure: nothing is mutated.
pub fn evaluate(board: &Board, rack: &Rack, mv: &Move) -> Result<ScoredMove, InvalidMove> {
    if mv.is_empty() {
        return Err(InvalidMove::EmptyMove);
    }

    let mut seen = HashSet::new();
    for p in &mv.placements {
        if !seen.insert(p.pos) {
            return Err(InvalidMove::DuplicatePosition(p.pos));
        }
    }

    let mut new_tiles = Vec::new();
    let mut overlaps = 0usize;
    for p in &mv.placements {
        match board.get(p.pos) {
            Some(existing) if existing.letter == p.tile.letter => overlaps += 1,
            Some(existing) => {
                return Err(InvalidMove::Occupied {
                    pos: p.pos,
                    existing: existing.letter,
                    proposed: p.tile.letter,
                })
            }
            None => new_tiles.push(*p),
        }
    }
    if new_tiles.is_empty() {
        return Err(InvalidMove::EmptyMove);
    }

    let used: Vec<char> = new_tiles.iter().map(|p| p.tile.rack_letter()).collect();
    if let Some(c) = rack.first_missing(&used) {
        return Err(InvalidMove::LetterNotInRack(c));
    }

    let positions: Vec<Position> = mv.placements.iter().map(|p| p.pos).collect();
    let line = line_of(&positions)?;

    let fresh: HashMap<Position, Tile> = new_tiles.iter().map(|p| (p.pos, p.tile)).collect();
    let tile_at = |pos: Position| fresh.get(&pos).copied().or_else(|| board.get(pos));

    if let Some(dir) = line {
        let first = positions.iter().map(|p| p.along(dir)).min().unwrap_or(0);
        let last = positions.iter().map(|p| p.along(dir)).max().unwrap_or(0);
        let anchor = positions[0];
        for i in first..=last {
            let pos = match dir {
                Direction::Across => Position::new(anchor.row(), i),
                Direction::Down => Position::new(i, anchor.col()),
            };
            if let Some(pos) = pos {
                if tile_at(pos).is_none() {
                    return Err(InvalidMove::Gap(pos));
                }
            }
        }
    }

    if board.is_empty() {
        if !fresh.contains_key(&Position::centre()) {
            return Err(InvalidMove::MissesCentre);
        }
    } else {
        let touches = overlaps > 0
            || new_tiles
                .iter()
                .any(|p| p.pos.neighbours().any(|n| board.is_occupied(n)));
        if !touches {
            return Err(InvalidMove::Disconnected);
        }
    }

    // A lone tile forms its main word in whichever direction it has company.
    let main_dir = line.unwrap_or_else(|| {
        let pos = positions[0];
        let across = [pos.step(Direction::Across, -1), pos.step(Direction::Across, 1)]
            .into_iter()
            .flatten()
            .any(|n| board.is_occupied(n));
        if across {
            Direction::Across
        } else {
            Direction::Down
        }
    });

    let (main_word, main_score) = score_word(board, &fresh, positions[0], main_dir);
    if main_word.chars().count() < 2 {
        return Err(InvalidMove::TooShort);
    }

    let mut words = vec![main_word];
    let mut score = main_score;
    for p in &new_tiles {
        let (word, word_score) = score_word(board, &fresh, p.pos, main_dir.perpendicular());
        if word.chars().count() >= 2 {
            words.push(word);
            score += word_score;
        }
    }

    if new_tiles.len() == RACK_CAPACITY {
        score += BINGO_BONUS;
    }

    Ok(ScoredMove {
        new_tiles,
        used,
        words,
        score,
    })
}

/// `Ok(Some(dir))` when all positions share a row or column, `Ok(None)` for
/// a single position.
fn line_of(positions: &[Position]) -> Result<Option<Direction>, InvalidMove> {
    if positions.len() < 2 {
        return Ok(None);
    }
    let first = positions[0];
    if positions.iter().all(|p| p.row() == first.row()) {
        Ok(Some(Direction::Across))
    } else if positions.iter().all(|p| p.col() == first.col()) {
        Ok(Some(Direction::Down))
    } else {
        Err(InvalidMove::NotInLine)
    }
}

/// The full word through `through` along `dir` and its score. Premiums
/// count only under freshly placed tiles.
fn score_word(
    board: &Board,
    fresh: &HashMap<Position, Tile>,
    through: Position,
    dir: Direction,
) -> (String, u32) {
    let tile_at = |pos: Position| fresh.get(&pos).copied().or_else(|| board.get(pos));

    let mut start = through;
    while let Some(prev) = start.step(dir, -1) {
        if tile_at(prev).is_none() {
            break;
        }
        start = prev;
    }

    let mut word = String::new();
    let mut letters = 0;
    let mut word_multiplier = 1;
    let mut cursor = Some(start);
    while let Some(pos) = cursor {
        let Some(tile) = tile_at(pos) else { break };
        word.push(tile.letter);
        if fresh.contains_key(&pos) {
            let premium = board.premium(pos);
            letters += tile.value() * premium.letter_multiplier();
            word_multiplier *= premium.word_multiplier();
        } else {
            letters += tile.value();
        }
        cursor = pos.step(dir, 1);
    }

    (word, letters * word_multiplier)
}
