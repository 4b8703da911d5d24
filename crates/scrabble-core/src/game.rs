//! Turn engine.
//!
//! Owns the board, the bag and every player's rack, and is the only place
//! they are mutated:
//! - validates and commits local proposals ([`Game::propose_move`]),
//! - refills racks from the bag ([`Game::draw_refill`]),
//! - rotates the current player ([`Game::advance_turn`]),
//! - replays what a remote peer announces ([`Game::assign_draw`],
//!   [`Game::apply_announced`]) without re-validating it.
//!
//! Termination: once a refill leaves both the bag and the mover's rack
//! empty the game is over and further proposals are rejected.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bag::TileBag;
use crate::board::Board;
use crate::error::{InvalidMove, RackError, ReplayError, SnapshotError};
use crate::placement::{Move, Placement};
use crate::player::{Player, PlayerId};
use crate::rack::{Rack, RACK_CAPACITY};
use crate::rules;
use crate::snapshot::{parse_board, GameSnapshot, PlayerSnapshot};
use crate::turn::{TurnPhase, TurnState};

/// Most players a single supply can serve.
pub const MAX_PLAYERS: usize = 4;

/// Outcome of an accepted proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub player: PlayerId,
    /// Human-readable result, e.g. `"Player 1 played CAT for 10 points"`.
    pub message: String,
    pub score_delta: u32,
    pub words: Vec<String>,
    /// Tiles actually laid (overlaps dropped).
    pub placements: Vec<Placement>,
}

/// Outcome of [`Game::draw_refill`].
///
/// `game_over` replaces the old end-of-game sentinel: it is set when the
/// bag could not refill the rack and both are now empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Refill {
    pub letters: Vec<char>,
    pub game_over: bool,
}

/// Propose, refill and advance as one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub player: PlayerId,
    pub message: String,
    pub score_delta: u32,
    pub placements: Vec<Placement>,
    pub drawn: Vec<char>,
    pub game_over: bool,
    pub next_player: PlayerId,
}

/// A move as announced by the peer that made it: the tiles laid and the
/// score it claims. Applied on trust.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnouncedMove {
    pub score_delta: u32,
    pub placements: Vec<Placement>,
}

impl From<&TurnReport> for AnnouncedMove {
    fn from(report: &TurnReport) -> Self {
        AnnouncedMove {
            score_delta: report.score_delta,
            placements: report.placements.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    bag: TileBag,
    players: Vec<Player>,
    turn: TurnState,
    /// Tiles in play when the game was created; racks + board + bag always
    /// add up to this.
    total_supply: usize,
    rng: StdRng,
}

impl Game {
    /// Fresh game with the full supply and empty racks. `player_count` is
    /// clamped to `1..=MAX_PLAYERS`.
    pub fn new(player_count: usize) -> Self {
        Self::with_rng(player_count, StdRng::from_entropy())
    }

    /// Like [`Game::new`] but with reproducible draws.
    pub fn with_seed(player_count: usize, seed: u64) -> Self {
        Self::with_rng(player_count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(player_count: usize, rng: StdRng) -> Self {
        let count = player_count.clamp(1, MAX_PLAYERS);
        let players = (1..=count as u8).map(|id| Player::new(PlayerId(id))).collect();
        let bag = TileBag::standard();
        Game {
            board: Board::new(),
            total_supply: bag.remaining(),
            bag,
            players,
            turn: TurnState::new(PlayerId::FIRST),
            rng,
        }
    }

    /// Resume from a snapshot instead of a fresh deal.
    pub fn from_snapshot(snapshot: &GameSnapshot, seed: Option<u64>) -> Result<Self, SnapshotError> {
        if snapshot.players.is_empty() {
            return Err(SnapshotError::NoPlayers);
        }
        if snapshot.players.len() > MAX_PLAYERS {
            return Err(SnapshotError::TooManyPlayers(snapshot.players.len()));
        }
        let board = parse_board(&snapshot.board)?;
        let bag = TileBag::from_letters(&snapshot.bag)?;
        if bag.remaining() != snapshot.bag_remaining {
            return Err(SnapshotError::RemainingMismatch {
                declared: snapshot.bag_remaining,
                actual: bag.remaining(),
            });
        }

        let mut players = Vec::with_capacity(snapshot.players.len());
        for (i, p) in snapshot.players.iter().enumerate() {
            players.push(Player {
                id: PlayerId(i as u8 + 1),
                score: p.score,
                rack: Rack::from_letters(&p.rack)?,
            });
        }

        let current = snapshot.current_player;
        if current == 0 || current as usize > players.len() {
            return Err(SnapshotError::UnknownCurrent(current));
        }

        let rack_tiles: usize = players.iter().map(|p| p.rack.len()).sum();
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut turn = TurnState::new(PlayerId(current));
        turn.game_over = snapshot.game_over;

        Ok(Game {
            total_supply: board.tile_count() + rack_tiles + bag.remaining(),
            board,
            bag,
            players,
            turn,
            rng,
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_rows(),
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id.0,
                    score: p.score,
                    rack: p.rack.to_string(),
                })
                .collect(),
            current_player: self.turn.current.0,
            bag: self.bag.letters(),
            bag_remaining: self.bag.remaining(),
            game_over: self.turn.game_over,
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn rack(&self, id: PlayerId) -> Option<&Rack> {
        self.player(id).map(|p| &p.rack)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn current_player(&self) -> PlayerId {
        self.turn.current
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn phase(&self) -> TurnPhase {
        self.turn.phase()
    }

    pub fn last_message(&self) -> &str {
        &self.turn.last_message
    }

    pub fn bag_remaining(&self) -> usize {
        self.bag.remaining()
    }

    pub fn is_game_over(&self) -> bool {
        self.turn.game_over
    }

    pub fn total_supply(&self) -> usize {
        self.total_supply
    }

    /// Racks + board + bag. Equal to [`Game::total_supply`] at all times.
    pub fn tiles_accounted(&self) -> usize {
        let racks: usize = self.players.iter().map(|p| p.rack.len()).sum();
        racks + self.board.tile_count() + self.bag.remaining()
    }

    // -------------------------------------------------------------------------
    // Local transitions
    // -------------------------------------------------------------------------

    /// Validate `mv` for `player` and commit it if legal.
    ///
    /// On `Err` nothing has changed; the error's display text is the reason
    /// to show the player.
    pub fn propose_move(&mut self, player: PlayerId, mv: &Move) -> Result<MoveReport, InvalidMove> {
        if self.turn.game_over {
            return Err(InvalidMove::GameOver);
        }
        let idx = self.index_of(player).ok_or(InvalidMove::UnknownPlayer(player))?;
        if player != self.turn.current {
            return Err(InvalidMove::NotYourTurn {
                player,
                current: self.turn.current,
            });
        }

        let scored = rules::evaluate(&self.board, &self.players[idx].rack, mv)?;

        if let Err(RackError::Missing(c)) = self.players[idx].rack.remove_all(&scored.used) {
            return Err(InvalidMove::LetterNotInRack(c));
        }
        for p in &scored.new_tiles {
            self.board.place(p.pos, p.tile);
        }
        self.players[idx].score += scored.score as i32;

        let message = format!(
            "Player {} played {} for {} point{}",
            player,
            scored.words.join(", "),
            scored.score,
            if scored.score == 1 { "" } else { "s" }
        );
        self.turn.last_message = message.clone();

        Ok(MoveReport {
            player,
            message,
            score_delta: scored.score,
            words: scored.words,
            placements: scored.new_tiles,
        })
    }

    /// Top `player`'s rack back up to capacity from the bag.
    ///
    /// Draws whatever is left when the bag runs short; if that leaves the
    /// bag and the rack both empty, the game is over.
    pub fn draw_refill(&mut self, player: PlayerId) -> Result<Refill, InvalidMove> {
        let idx = self.index_of(player).ok_or(InvalidMove::UnknownPlayer(player))?;
        let wanted = self.players[idx].rack.missing();
        let draw = self.bag.draw(wanted, &mut self.rng);

        let pushed = self.players[idx].rack.push_all(&draw.letters);
        debug_assert!(pushed.is_ok(), "refill drew past the rack's free space");

        if self.bag.is_empty() && self.players[idx].rack.is_empty() {
            self.turn.game_over = true;
        }

        Ok(Refill {
            letters: draw.letters,
            game_over: self.turn.game_over,
        })
    }

    /// Hand the turn to the next ordinal, wrapping around.
    pub fn advance_turn(&mut self) {
        self.turn.current = self.turn.current.next(self.players.len());
    }

    /// Propose, refill and advance in one go.
    pub fn play(&mut self, player: PlayerId, mv: &Move) -> Result<TurnReport, InvalidMove> {
        let report = self.propose_move(player, mv)?;
        let refill = self.draw_refill(player)?;
        self.advance_turn();

        Ok(TurnReport {
            player,
            message: report.message,
            score_delta: report.score_delta,
            placements: report.placements,
            drawn: refill.letters,
            game_over: refill.game_over,
            next_player: self.turn.current,
        })
    }

    /// End the game on the peer's say-so.
    pub fn mark_game_over(&mut self) {
        self.turn.game_over = true;
    }

    // -------------------------------------------------------------------------
    // Peer replay
    // -------------------------------------------------------------------------

    /// Mirror a draw the peer made from its own bag: take the same letters
    /// out of the local bag and put them on `player`'s rack.
    ///
    /// Applies the same termination rule as [`Game::draw_refill`].
    pub fn assign_draw(&mut self, player: PlayerId, letters: &[char]) -> Result<(), ReplayError> {
        let idx = self.index_of(player).ok_or(ReplayError::UnknownPlayer(player))?;
        let held = self.players[idx].rack.len();
        if held + letters.len() > RACK_CAPACITY {
            return Err(RackError::Overflow {
                held,
                incoming: letters.len(),
            }
            .into());
        }

        self.bag.remove(letters)?;
        self.players[idx].rack.push_all(letters)?;

        if self.bag.is_empty() && self.players[idx].rack.is_empty() {
            self.turn.game_over = true;
        }
        Ok(())
    }

    /// Lay the peer's announced tiles and credit the announced score.
    ///
    /// The move is trusted, not re-validated; only what would break local
    /// bookkeeping is refused (wrong turn, occupied squares, tiles the peer's
    /// rack does not hold). Does not advance the turn.
    pub fn apply_announced(
        &mut self,
        player: PlayerId,
        announced: &AnnouncedMove,
        message: &str,
    ) -> Result<(), ReplayError> {
        if self.turn.game_over {
            return Err(ReplayError::GameOver);
        }
        let idx = self.index_of(player).ok_or(ReplayError::UnknownPlayer(player))?;
        if player != self.turn.current {
            return Err(ReplayError::OutOfTurn {
                player,
                current: self.turn.current,
            });
        }
        if let Some(p) = announced
            .placements
            .iter()
            .find(|p| self.board.is_occupied(p.pos))
        {
            return Err(ReplayError::Occupied(p.pos));
        }

        let used: Vec<char> = announced
            .placements
            .iter()
            .map(|p| p.tile.rack_letter())
            .collect();
        self.players[idx].rack.remove_all(&used)?;

        for p in &announced.placements {
            self.board.place(p.pos, p.tile);
        }
        self.players[idx].score += announced.score_delta as i32;
        self.turn.last_message = message.to_string();
        Ok(())
    }

    /// A whole peer turn: announced tiles and score, the mirrored draw and
    /// the turn flip. On error nothing has changed.
    pub fn replay_turn(
        &mut self,
        player: PlayerId,
        announced: &AnnouncedMove,
        message: &str,
        drawn: &[char],
    ) -> Result<(), ReplayError> {
        let mut next = self.clone();
        next.apply_announced(player, announced, message)?;
        next.assign_draw(player, drawn)?;
        next.advance_turn();
        *self = next;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // End of game
    // -------------------------------------------------------------------------

    /// Scores after the end-of-game rack adjustment: every player loses the
    /// value of the tiles still on their rack, and a player who went out
    /// gains the sum of everyone else's.
    pub fn final_scores(&self) -> Vec<(PlayerId, i32)> {
        let leftover: i32 = self.players.iter().map(|p| p.rack.value() as i32).sum();
        self.players
            .iter()
            .map(|p| {
                let own = p.rack.value() as i32;
                let adjusted = if p.rack.is_empty() {
                    p.score + leftover
                } else {
                    p.score - own
                };
                (p.id, adjusted)
            })
            .collect()
    }

    fn index_of(&self, id: PlayerId) -> Option<usize> {
        let idx = id.index();
        (idx < self.players.len()).then_some(idx)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        for p in &self.players {
            let marker = if p.id == self.turn.current { '>' } else { ' ' };
            writeln!(f, "{} player {}: {:>4} pts  [{}]", marker, p.id, p.score, p.rack)?;
        }
        write!(f, "bag: {} tiles", self.bag.remaining())?;
        if self.turn.game_over {
            write!(f, " (game over)")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::Tile;

    fn dealt(rack1: &str, rack2: &str, bag: &str) -> Game {
        let snapshot = GameSnapshot {
            board: vec![".".repeat(15); 15],
            players: vec![
                PlayerSnapshot {
                    id: 1,
                    score: 0,
                    rack: rack1.to_string(),
                },
                PlayerSnapshot {
                    id: 2,
                    score: 0,
                    rack: rack2.to_string(),
                },
            ],
            current_player: 1,
            bag: bag.to_string(),
            bag_remaining: bag.len(),
            game_over: false,
        };
        Game::from_snapshot(&snapshot, Some(3)).unwrap()
    }

    #[test]
    fn accepted_move_mutates_board_rack_and_score() {
        let mut game = dealt("CATSXYZ", "AEIOU", "EEEEEEEEE");
        let report = game
            .propose_move(PlayerId(1), &Move::parse("H6C H7A H8T").unwrap())
            .unwrap();

        assert_eq!(report.score_delta, 10);
        assert_eq!(report.message, "Player 1 played CAT for 10 points");
        assert_eq!(game.rack(PlayerId(1)).unwrap().to_string(), "SXYZ");
        assert_eq!(game.player(PlayerId(1)).unwrap().score, 10);
        assert_eq!(game.board().get("H7".parse().unwrap()), Some(Tile::new('A')));
        assert_eq!(game.last_message(), report.message);
    }

    #[test]
    fn rejected_move_leaves_everything_alone() {
        let mut game = dealt("CATSXYZ", "AEIOU", "EEEEEEEEE");
        let before = game.snapshot();

        let err = game
            .propose_move(PlayerId(2), &Move::parse("H7A H8E").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            InvalidMove::NotYourTurn {
                player: PlayerId(2),
                current: PlayerId(1)
            }
        );

        let err = game
            .propose_move(PlayerId(1), &Move::parse("H7Q H8T").unwrap())
            .unwrap_err();
        assert_eq!(err, InvalidMove::LetterNotInRack('Q'));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn refill_tops_up_to_capacity() {
        let mut game = dealt("CATSXYZ", "AEIOU", "EEEEEEEEE");
        game.propose_move(PlayerId(1), &Move::parse("H6C H7A H8T").unwrap())
            .unwrap();
        let refill = game.draw_refill(PlayerId(1)).unwrap();

        assert_eq!(refill.letters, vec!['E', 'E', 'E']);
        assert!(!refill.game_over);
        assert_eq!(game.rack(PlayerId(1)).unwrap().len(), RACK_CAPACITY);
        assert_eq!(game.bag_remaining(), 6);
    }

    #[test]
    fn emptying_rack_with_empty_bag_ends_the_game() {
        let mut game = dealt("AT", "EEE", "");
        let report = game.play(PlayerId(1), &Move::parse("H8A H9T").unwrap()).unwrap();

        assert!(report.game_over);
        assert!(report.drawn.is_empty());
        assert!(game.is_game_over());
        assert_eq!(game.phase(), TurnPhase::GameOver);

        let err = game
            .propose_move(PlayerId(2), &Move::parse("I8E I9E").unwrap())
            .unwrap_err();
        assert_eq!(err, InvalidMove::GameOver);
    }

    #[test]
    fn play_advances_the_turn() {
        let mut game = dealt("CATSXYZ", "AEIOU", "EEEEEEEEE");
        let report = game
            .play(PlayerId(1), &Move::parse("H6C H7A H8T").unwrap())
            .unwrap();
        assert_eq!(report.next_player, PlayerId(2));
        assert_eq!(game.phase(), TurnPhase::AwaitingMove(PlayerId(2)));
    }

    #[test]
    fn replay_mirrors_the_peer() {
        let mut game = dealt("", "", "CATEEEE");
        game.assign_draw(PlayerId(1), &['C', 'A', 'T']).unwrap();
        assert_eq!(game.bag_remaining(), 4);

        let announced = AnnouncedMove {
            score_delta: 10,
            placements: Move::parse("H6C H7A H8T").unwrap().placements,
        };
        game.apply_announced(PlayerId(1), &announced, "Player 1 played CAT for 10 points")
            .unwrap();
        game.assign_draw(PlayerId(1), &['E', 'E']).unwrap();
        game.advance_turn();

        assert_eq!(game.player(PlayerId(1)).unwrap().score, 10);
        assert_eq!(game.rack(PlayerId(1)).unwrap().to_string(), "EE");
        assert_eq!(game.current_player(), PlayerId(2));
        assert_eq!(game.tiles_accounted(), game.total_supply());
    }

    #[test]
    fn replay_refuses_what_does_not_fit() {
        let mut game = dealt("AB", "", "CDE");
        assert_eq!(
            game.assign_draw(PlayerId(2), &['Z']),
            Err(ReplayError::Bag(crate::error::BagError::NotInBag('Z')))
        );

        let announced = AnnouncedMove {
            score_delta: 4,
            placements: Move::parse("H8Q H9B").unwrap().placements,
        };
        assert_eq!(
            game.apply_announced(PlayerId(1), &announced, ""),
            Err(ReplayError::Rack(RackError::Missing('Q')))
        );
        assert_eq!(
            game.apply_announced(PlayerId(2), &AnnouncedMove::default(), ""),
            Err(ReplayError::OutOfTurn {
                player: PlayerId(2),
                current: PlayerId(1)
            })
        );
        assert!(game.board().is_empty());
    }

    #[test]
    fn replayed_turn_with_a_bad_draw_changes_nothing() {
        let mut game = dealt("CATSNOE", "DOGRIEL", "ES");
        let before = game.snapshot();
        let announced = AnnouncedMove {
            score_delta: 10,
            placements: Move::parse("H6C H7A H8T").unwrap().placements,
        };

        assert_eq!(
            game.replay_turn(PlayerId(1), &announced, "played CAT", &['Z', 'Z']),
            Err(ReplayError::Bag(crate::error::BagError::NotInBag('Z')))
        );
        assert_eq!(game.snapshot(), before);

        game.replay_turn(PlayerId(1), &announced, "played CAT", &['E', 'S'])
            .unwrap();
        assert_eq!(game.board().tile_count(), 3);
        assert_eq!(game.player(PlayerId(1)).unwrap().score, 10);
        assert_eq!(game.current_player(), PlayerId(2));
        assert_eq!(game.tiles_accounted(), game.total_supply());
    }

    #[test]
    fn final_scores_settle_leftover_racks() {
        let mut game = dealt("AT", "KE", "");
        game.play(PlayerId(1), &Move::parse("H8A H9T").unwrap()).unwrap();
        let scores = game.final_scores();
        // AT on H8 (double word) = 4; player 2 holds K(10) + E(1).
        assert_eq!(scores, vec![(PlayerId(1), 4 + 11), (PlayerId(2), -11)]);
    }

    #[test]
    fn snapshot_round_trips_state() {
        let mut game = Game::with_seed(2, 42);
        game.draw_refill(PlayerId(1)).unwrap();
        game.draw_refill(PlayerId(2)).unwrap();

        let snapshot = game.snapshot();
        let restored = Game::from_snapshot(&snapshot, None).unwrap();
        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.total_supply(), 102);
    }

    #[test]
    fn snapshot_with_wrong_count_is_refused() {
        let mut snapshot = Game::new(2).snapshot();
        snapshot.bag_remaining = 3;
        assert_eq!(
            Game::from_snapshot(&snapshot, None).unwrap_err(),
            SnapshotError::RemainingMismatch {
                declared: 3,
                actual: 102
            }
        );
    }
}
