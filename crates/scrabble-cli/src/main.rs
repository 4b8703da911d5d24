// crates/scrabble-cli/src/main.rs

mod app;
mod commands;
mod persist;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scrabble_core::{Game, PlayerId};
use scrabble_net::{join, Config, FirstPlayerPolicy, HostListener};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::persist::load_snapshot;
use crate::ui::Names;

#[derive(Parser)]
#[clap(name = "scrabble")]
#[clap(about = "Word-tile board game, hot-seat or over the network")]
struct Cli {
    /// Name shown for you (numbered per player in local games)
    #[clap(short, long, default_value = "Player")]
    name: String,

    /// Directory for `save`
    #[clap(long, default_value = ".")]
    save_dir: PathBuf,

    /// Enable debug logging (filter with RUST_LOG)
    #[clap(short, long)]
    debug: bool,

    #[clap(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Several players sharing this terminal
    Local {
        /// Number of players
        #[clap(short, long, default_value = "1")]
        players: usize,

        /// Resume from a saved game
        #[clap(short, long)]
        input: Option<PathBuf>,

        /// Seed for reproducible draws
        #[clap(long)]
        seed: Option<u64>,
    },

    /// Wait for an opponent to join
    Host {
        /// Interface to bind (default from SCRABBLE_BIND_ADDR)
        #[clap(long)]
        bind: Option<String>,

        /// Port to listen on (default from SCRABBLE_PORT)
        #[clap(short, long)]
        port: Option<u16>,

        /// Who moves first: server, client or random
        #[clap(long)]
        first: Option<FirstPlayerPolicy>,

        #[clap(long)]
        seed: Option<u64>,
    },

    /// Join a hosted game
    Join {
        /// Host address; a bare host name uses the configured port
        addr: String,

        #[clap(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout belongs to the game.
    if cli.debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = Config::from_env()
        .map_err(|e| anyhow::anyhow!("invalid environment configuration: {}", e))?;

    match cli.mode {
        Mode::Local {
            players,
            input,
            seed,
        } => {
            let game = match input {
                Some(path) => {
                    let snapshot = load_snapshot(&path)?;
                    Game::from_snapshot(&snapshot, seed)
                        .with_context(|| format!("cannot resume {}", path.display()))?
                }
                None => deal(players, seed.or(config.seed))?,
            };
            let names = Names::local_game(&cli.name, game.player_count());
            App::new(names, cli.save_dir).run_local(game).await
        }

        Mode::Host {
            bind,
            port,
            first,
            seed,
        } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(first) = first {
                config.first_player = first;
            }
            config.seed = seed.or(config.seed);

            let host = HostListener::bind(config).await?;
            println!("Waiting for an opponent on {}...", host.local_addr()?);
            let (session, events) = host.accept().await?;
            info!(peer = ?session.info().peer_addr, "opponent joined");

            let names = Names::network_game(&cli.name, session.info().local_player);
            App::new(names, cli.save_dir).run_network(session, events).await
        }

        Mode::Join { addr, seed } => {
            config.seed = seed.or(config.seed);
            let addr = if addr.contains(':') {
                addr
            } else {
                format!("{}:{}", addr, config.port)
            };

            println!("Connecting to {}...", addr);
            let (session, events) = join(&addr, &config).await?;

            let names = Names::network_game(&cli.name, session.info().local_player);
            App::new(names, cli.save_dir).run_network(session, events).await
        }
    }
}

/// Fresh game with every rack filled.
fn deal(players: usize, seed: Option<u64>) -> Result<Game> {
    let mut game = match seed {
        Some(seed) => Game::with_seed(players, seed),
        None => Game::new(players),
    };
    for id in 1..=game.player_count() as u8 {
        game.draw_refill(PlayerId(id))
            .with_context(|| format!("cannot deal a rack to player {}", id))?;
    }
    Ok(game)
}
