// crates/scrabble-net/tests/end_to_end.rs
mod common;

use scrabble_core::PlayerId;
use scrabble_net::{
    join, lock_game, Config, FirstPlayerPolicy, HostListener, ListenerExit, SessionEvent,
    SubmitError,
};

use common::{adjacent_move, next_event, opening_move};

fn local_config(seed: u64) -> Config {
    Config {
        bind_addr: "127.0.0.1".to_string(),
        port: 0,
        first_player: FirstPlayerPolicy::Server,
        seed: Some(seed),
    }
}

#[tokio::test]
async fn server_opens_and_both_games_stay_identical() {
    let host = HostListener::bind(local_config(7)).await.unwrap();
    let addr = host.local_addr().unwrap().to_string();
    let accepting = tokio::spawn(host.accept());

    let (client, mut client_events) = join(&addr, &local_config(8)).await.unwrap();
    let (server, mut server_events) = accepting.await.unwrap().unwrap();

    // Roles and opening racks.
    assert_eq!(server.info().local_player, PlayerId(1));
    assert_eq!(client.info().local_player, PlayerId(2));
    assert!(server.is_my_turn());
    assert!(!client.is_my_turn());
    assert_eq!(
        lock_game(server.game()).snapshot(),
        lock_game(client.game()).snapshot()
    );
    assert_eq!(lock_game(client.game()).rack(PlayerId(1)).unwrap().len(), 7);

    // Out of turn: refused locally, nothing sent.
    let early = {
        let game = lock_game(client.game());
        opening_move(&game, PlayerId(2))
    };
    let err = client.submit_move(&early).await.unwrap_err();
    assert!(matches!(err, SubmitError::Rejected(_)));

    // Server's opening move.
    let mv = {
        let game = lock_game(server.game());
        opening_move(&game, PlayerId(1))
    };
    let report = server.submit_move(&mv).await.unwrap();
    assert_eq!(report.next_player, PlayerId(2));
    assert_eq!(report.drawn.len(), 2);

    match next_event(&mut client_events).await {
        SessionEvent::RemoteMove {
            player,
            message,
            score_delta,
            drawn,
            next_player,
            game_over,
        } => {
            assert_eq!(player, PlayerId(1));
            assert_eq!(message, report.message);
            assert_eq!(score_delta, report.score_delta);
            assert_eq!(drawn, report.drawn);
            assert_eq!(next_player, PlayerId(2));
            assert!(!game_over);
        }
        other => panic!("unexpected event: {:?}", other),
    }

    assert!(client.is_my_turn());
    assert!(!server.is_my_turn());
    {
        let server_game = lock_game(server.game());
        let client_game = lock_game(client.game());
        assert_eq!(server_game.snapshot(), client_game.snapshot());
        assert_eq!(client_game.rack(PlayerId(1)).unwrap().len(), 7);
        assert_eq!(client_game.last_message(), report.message);
        assert_eq!(client_game.tiles_accounted(), client_game.total_supply());
    }

    // Client answers.
    let reply = {
        let game = lock_game(client.game());
        adjacent_move(&game, PlayerId(2))
    };
    client.submit_move(&reply).await.unwrap();

    match next_event(&mut server_events).await {
        SessionEvent::RemoteMove {
            player, next_player, ..
        } => {
            assert_eq!(player, PlayerId(2));
            assert_eq!(next_player, PlayerId(1));
        }
        other => panic!("unexpected event: {:?}", other),
    }
    assert!(server.is_my_turn());
    assert_eq!(
        lock_game(server.game()).snapshot(),
        lock_game(client.game()).snapshot()
    );

    assert_eq!(client.close().await, ListenerExit::Stopped);
    server.close().await;
}

#[tokio::test]
async fn client_can_be_told_to_move_first() {
    let config = Config {
        first_player: FirstPlayerPolicy::Client,
        ..local_config(1)
    };
    let host = HostListener::bind(config).await.unwrap();
    let addr = host.local_addr().unwrap().to_string();
    let accepting = tokio::spawn(host.accept());

    let (client, _client_events) = join(&addr, &local_config(2)).await.unwrap();
    let (server, _server_events) = accepting.await.unwrap().unwrap();

    assert_eq!(client.info().local_player, PlayerId(1));
    assert_eq!(server.info().local_player, PlayerId(2));
    assert!(client.is_my_turn());
    assert!(!server.is_my_turn());

    server.close().await;
    client.close().await;
}
