// crates/scrabble-cli/src/app.rs

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use scrabble_core::{rules, Game, PlayerId};
use scrabble_net::{lock_game, EventRx, Session, SessionEvent, SubmitError};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info, warn};

use crate::commands::{parse_command, Command, HELP};
use crate::persist::save_game;
use crate::ui::{self, Names};

pub struct App {
    names: Names,
    save_dir: PathBuf,
}

impl App {
    pub fn new(names: Names, save_dir: PathBuf) -> Self {
        Self { names, save_dir }
    }

    /// Hot-seat game: whoever's turn it is types the next move.
    pub async fn run_local(&self, mut game: Game) -> Result<()> {
        let mut lines = stdin_lines();
        println!("{}", ui::render_board(&game));
        println!("{}", self.turn_banner(&game, game.current_player()));

        loop {
            show_prompt(&ui::prompt(&game, &self.names))?;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let cmd = match parse_command(&line) {
                Ok(Some(cmd)) => cmd,
                Ok(None) => continue,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };

            match cmd {
                Command::Quit => break,
                Command::Play(mv) => {
                    let player = game.current_player();
                    match game.play(player, &mv) {
                        Ok(report) => {
                            println!("{}", report.message);
                            if report.game_over {
                                println!("{}", ui::render_board(&game));
                                println!("{}", ui::render_final(&game.final_scores(), &self.names));
                            } else {
                                println!("{}", ui::render_board(&game));
                                println!("{}", self.turn_banner(&game, report.next_player));
                            }
                        }
                        Err(e) => println!("Move rejected: {}", e),
                    }
                }
                other => println!("{}", self.describe(&other, &game, game.current_player())),
            }
        }
        Ok(())
    }

    /// Networked game: local input and the peer's moves, whichever comes
    /// first.
    pub async fn run_network(&self, session: Session, mut events: EventRx) -> Result<()> {
        let local = session.info().local_player;
        let mut lines = stdin_lines();

        {
            let game = lock_game(session.game());
            println!("{}", ui::render_board(&game));
            println!("{}", self.turn_banner(&game, local));
        }

        loop {
            {
                let game = lock_game(session.game());
                show_prompt(&ui::prompt(&game, &self.names))?;
            }

            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let cmd = match parse_command(&line) {
                        Ok(Some(cmd)) => cmd,
                        Ok(None) => continue,
                        Err(e) => {
                            println!("{}", e);
                            continue;
                        }
                    };

                    match cmd {
                        Command::Quit => break,
                        Command::Play(mv) => self.submit(&session, &mv).await,
                        other => {
                            let game = lock_game(session.game());
                            println!("{}", self.describe(&other, &game, local));
                        }
                    }
                }
                Some(event) = events.recv() => {
                    println!();
                    self.handle_event(&session, event);
                }
            }
        }

        let exit = session.close().await;
        info!(?exit, "session closed");
        Ok(())
    }

    async fn submit(&self, session: &Session, mv: &scrabble_core::Move) {
        match session.submit_move(mv).await {
            Ok(report) => {
                println!("{}", report.message);
                let game = lock_game(session.game());
                println!("{}", ui::render_board(&game));
                if report.game_over {
                    println!("{}", ui::render_final(&game.final_scores(), &self.names));
                } else {
                    println!("{}", self.turn_banner(&game, session.info().local_player));
                }
            }
            Err(SubmitError::Rejected(e)) => println!("Move rejected: {}", e),
            Err(SubmitError::Session(e)) => {
                error!("failed to announce move: {}", e);
                println!("Could not reach the opponent: {}", e);
            }
        }
    }

    fn handle_event(&self, session: &Session, event: SessionEvent) {
        let local = session.info().local_player;
        match event {
            SessionEvent::RemoteMove {
                player,
                message,
                drawn,
                next_player,
                game_over,
                ..
            } => {
                println!("{}", message);
                println!("{} drew {} tile(s)", self.names.of(player), drawn.len());
                let game = lock_game(session.game());
                println!("{}", ui::render_board(&game));
                if !game_over && next_player == local {
                    println!("{}", self.turn_banner(&game, local));
                }
            }
            SessionEvent::GameOver { final_scores } => {
                println!("{}", ui::render_final(&final_scores, &self.names));
            }
            SessionEvent::Failed(e) => {
                warn!("session failed: {}", e);
                println!("Connection to the opponent lost: {}", e);
                println!("You can still look at the board, save the game or quit.");
            }
        }
    }

    /// Output for the commands that read the game without changing it.
    fn describe(&self, cmd: &Command, game: &Game, viewer: PlayerId) -> String {
        match cmd {
            Command::Board => ui::render_board(game),
            Command::Scores => ui::render_scores(game, &self.names),
            Command::Rack => match game.rack(viewer) {
                Some(rack) => format!("Rack: {}", ui::render_rack(rack)),
                None => "No rack".to_string(),
            },
            Command::Check(mv) => match game.rack(viewer) {
                Some(rack) => match rules::evaluate(game.board(), rack, mv) {
                    Ok(scored) => ui::render_preview(&scored),
                    Err(e) => format!("Not playable: {}", e),
                },
                None => "No rack".to_string(),
            },
            Command::Save(dir) => {
                let dir = dir.as_ref().unwrap_or(&self.save_dir);
                match save_game(game, dir) {
                    Ok(path) => format!("Saved to {}", path.display()),
                    Err(e) => format!("Save failed: {:#}", e),
                }
            }
            Command::Help => HELP.to_string(),
            Command::Play(_) | Command::Quit => String::new(),
        }
    }

    fn turn_banner(&self, game: &Game, player: PlayerId) -> String {
        if game.is_game_over() {
            return "The game is over.".to_string();
        }
        let rack = game
            .rack(player)
            .map(ui::render_rack)
            .unwrap_or_default();
        if game.current_player() == player {
            format!("{} to play. Rack: {}", self.names.of(player), rack)
        } else {
            format!(
                "Waiting for {}. Rack: {}",
                self.names.of(game.current_player()),
                rack
            )
        }
    }
}

fn stdin_lines() -> Lines<BufReader<Stdin>> {
    BufReader::new(tokio::io::stdin()).lines()
}

fn show_prompt(text: &str) -> Result<()> {
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(())
}
