// Helpers shared by the integration tests.
#![allow(dead_code)]

use std::time::Duration;

use scrabble_core::{rules, Game, Move, Placement, PlayerId, Position, Tile, BLANK, BOARD_SIZE};
use scrabble_net::{EventRx, SessionEvent};

pub fn tile_for(c: char) -> Tile {
    if c == BLANK {
        Tile::blank('E')
    } else {
        Tile::new(c)
    }
}

/// Two tiles through the centre square.
pub fn opening_move(game: &Game, player: PlayerId) -> Move {
    let rack = game.rack(player).unwrap().letters();
    Move::new(vec![
        Placement::new(Position::centre(), tile_for(rack[0])),
        Placement::new("H9".parse().unwrap(), tile_for(rack[1])),
    ])
}

/// One tile next to anything already on the board.
pub fn adjacent_move(game: &Game, player: PlayerId) -> Move {
    let rack = game.rack(player).unwrap();
    let letter = rack.letters()[0];
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let pos = Position::new(r, c).unwrap();
            if game.board().is_occupied(pos) {
                continue;
            }
            let mv = Move::new(vec![Placement::new(pos, tile_for(letter))]);
            if rules::evaluate(game.board(), rack, &mv).is_ok() {
                return mv;
            }
        }
    }
    panic!("no adjacent move for {}", player);
}

pub async fn next_event(events: &mut EventRx) -> SessionEvent {
    tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for a session event")
        .expect("event channel closed")
}
