// crates/scrabble-core/tests/regression_scenarios.rs
use scrabble_core::{AnnouncedMove, Game, GameSnapshot, Move, PlayerId, PlayerSnapshot};
use scrabble_protocol::text_codec::{format_commit, parse_commit};

const SCRIPT: &str = include_str!("data/opening_game.txt");

fn empty_board() -> Vec<String> {
    vec![".".repeat(15); 15]
}

fn parse_player(token: &str) -> PlayerId {
    PlayerId(token.parse().expect("player ordinal"))
}

#[test]
fn scripted_opening_matches_reference_payloads() {
    let mut racks = Vec::new();
    let mut game: Option<Game> = None;
    let mut plays = 0;

    for raw_line in SCRIPT.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (command, rest) = line.split_once(' ').expect("command and arguments");
        match command {
            "rack" => {
                let (_, letters) = rest.split_once(' ').expect("rack letters");
                racks.push(letters.to_string());
            }
            "play" => {
                let game = game.get_or_insert_with(|| deal(&racks));
                let (player, rest) = rest.split_once(' ').expect("player");
                let (placements, expected) = rest.split_once("=>").expect("expected payload");

                let report = game
                    .play(parse_player(player), &Move::parse(placements).unwrap())
                    .unwrap_or_else(|e| panic!("line {:?} rejected: {}", line, e));
                let payload = format_commit(&AnnouncedMove::from(&report));
                assert_eq!(payload, expected.trim(), "line {:?}", line);

                // The peer parses exactly what we would have announced.
                assert_eq!(parse_commit(&payload).unwrap(), AnnouncedMove::from(&report));
                plays += 1;
            }
            "reject" => {
                let game = game.get_or_insert_with(|| deal(&racks));
                let (player, placements) = rest.split_once(' ').expect("player");
                let before = game.snapshot();
                let result = game.propose_move(parse_player(player), &Move::parse(placements).unwrap());
                assert!(result.is_err(), "line {:?} should be rejected", line);
                assert_eq!(game.snapshot(), before);
            }
            "score" => {
                let game = game.as_ref().expect("game started");
                let (player, points) = rest.split_once(' ').expect("score");
                let player = game.player(parse_player(player)).expect("player exists");
                assert_eq!(player.score, points.parse::<i32>().unwrap(), "line {:?}", line);
            }
            other => panic!("unknown script command {:?}", other),
        }
    }

    assert_eq!(plays, 5);
}

fn deal(racks: &[String]) -> Game {
    let snapshot = GameSnapshot {
        board: empty_board(),
        players: racks
            .iter()
            .enumerate()
            .map(|(i, rack)| PlayerSnapshot {
                id: i as u8 + 1,
                score: 0,
                rack: rack.clone(),
            })
            .collect(),
        current_player: 1,
        bag: String::new(),
        bag_remaining: 0,
        game_over: false,
    };
    Game::from_snapshot(&snapshot, Some(0)).expect("valid scripted deal")
}
