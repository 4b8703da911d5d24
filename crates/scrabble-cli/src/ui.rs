// crates/scrabble-cli/src/ui.rs
//
// Plain-text rendering. Everything here returns a `String`; printing is
// the caller's job.

use std::fmt::Write;

use scrabble_core::rules::ScoredMove;
use scrabble_core::{letter, Game, PlayerId, Rack};

/// How players are called on screen.
#[derive(Debug, Clone)]
pub struct Names {
    base: String,
    player_count: usize,
    /// Set in network games: only this player gets `base`.
    local: Option<PlayerId>,
}

impl Names {
    pub fn local_game(base: &str, player_count: usize) -> Self {
        Names {
            base: base.to_string(),
            player_count,
            local: None,
        }
    }

    pub fn network_game(base: &str, local: PlayerId) -> Self {
        Names {
            base: base.to_string(),
            player_count: 2,
            local: Some(local),
        }
    }

    pub fn of(&self, id: PlayerId) -> String {
        match self.local {
            Some(local) if local == id => self.base.clone(),
            Some(_) => "Opponent".to_string(),
            None if self.player_count == 1 => self.base.clone(),
            None => format!("{} {}", self.base, id),
        }
    }
}

pub fn render_board(game: &Game) -> String {
    game.board().to_string()
}

/// Letters with their point values, e.g. `C3 A1 ?0`.
pub fn render_rack(rack: &Rack) -> String {
    if rack.is_empty() {
        return "(empty rack)".to_string();
    }
    rack.letters()
        .iter()
        .map(|&c| format!("{}{}", c, letter::value_of(c).unwrap_or(0)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per player, `>` marking whose turn it is, then the bag.
pub fn render_scores(game: &Game, names: &Names) -> String {
    let mut out = String::new();
    for p in game.players() {
        let marker = if !game.is_game_over() && p.id == game.current_player() {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{} {:<12} {:>4} pts  ({} tiles)",
            marker,
            names.of(p.id),
            p.score,
            p.rack.len()
        );
    }
    let _ = write!(out, "  bag: {} tiles", game.bag_remaining());
    if game.is_game_over() {
        out.push_str("  (game over)");
    }
    out
}

pub fn render_preview(scored: &ScoredMove) -> String {
    let mut line = format!(
        "{} would score {} point{}",
        scored.words.join(", "),
        scored.score,
        if scored.score == 1 { "" } else { "s" }
    );
    if scored.new_tiles.len() == scrabble_core::RACK_CAPACITY {
        line.push_str(" (bingo)");
    }
    line
}

/// Final standings, best first.
pub fn render_final(final_scores: &[(PlayerId, i32)], names: &Names) -> String {
    let mut ranked = final_scores.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut out = String::from("Game over. Final scores:\n");
    for (id, score) in &ranked {
        let _ = writeln!(out, "  {:<12} {:>4}", names.of(*id), score);
    }

    match ranked.as_slice() {
        [(_, top), (_, second), ..] if top == second => {
            let _ = write!(out, "Tie at {} points", top);
        }
        [(winner, _), ..] => {
            let _ = write!(out, "{} wins", names.of(*winner));
        }
        [] => {}
    }
    out
}

pub fn prompt(game: &Game, names: &Names) -> String {
    if game.is_game_over() {
        return "(game over) > ".to_string();
    }
    format!("{} > ", names.of(game.current_player()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrabble_core::{GameSnapshot, PlayerSnapshot};

    fn game(rack1: &str, rack2: &str) -> Game {
        let snapshot = GameSnapshot {
            board: vec![".".repeat(15); 15],
            players: vec![
                PlayerSnapshot {
                    id: 1,
                    score: 12,
                    rack: rack1.to_string(),
                },
                PlayerSnapshot {
                    id: 2,
                    score: 30,
                    rack: rack2.to_string(),
                },
            ],
            current_player: 2,
            bag: "EEA".to_string(),
            bag_remaining: 3,
            game_over: false,
        };
        Game::from_snapshot(&snapshot, Some(0)).unwrap()
    }

    #[test]
    fn local_names_are_numbered() {
        let names = Names::local_game("Alex", 2);
        assert_eq!(names.of(PlayerId(1)), "Alex 1");
        assert_eq!(names.of(PlayerId(2)), "Alex 2");
        assert_eq!(Names::local_game("Alex", 1).of(PlayerId(1)), "Alex");
    }

    #[test]
    fn network_names_hide_the_peer() {
        let names = Names::network_game("Alex", PlayerId(2));
        assert_eq!(names.of(PlayerId(2)), "Alex");
        assert_eq!(names.of(PlayerId(1)), "Opponent");
    }

    #[test]
    fn rack_shows_values() {
        let rack = Rack::from_letters("KA?").unwrap();
        assert_eq!(render_rack(&rack), "K10 A1 ?0");
        assert_eq!(render_rack(&Rack::new()), "(empty rack)");
    }

    #[test]
    fn scores_mark_the_current_player() {
        let g = game("CAT", "DOG");
        let text = render_scores(&g, &Names::local_game("P", 2));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("  P 1"));
        assert!(lines[1].starts_with("> P 2"));
        assert!(lines[1].contains("30 pts"));
        assert_eq!(lines[2], "  bag: 3 tiles");
    }

    #[test]
    fn final_standings_are_sorted() {
        let names = Names::local_game("P", 2);
        let text = render_final(&[(PlayerId(1), 40), (PlayerId(2), 55)], &names);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].contains("P 2"));
        assert!(lines[2].contains("P 1"));
        assert_eq!(lines[3], "P 2 wins");

        let tie = render_final(&[(PlayerId(1), 10), (PlayerId(2), 10)], &names);
        assert!(tie.ends_with("Tie at 10 points"));
    }

    #[test]
    fn prompt_follows_the_turn() {
        let g = game("CAT", "DOG");
        assert_eq!(prompt(&g, &Names::local_game("P", 2)), "P 2 > ");
    }
}
