//! Configuration for a networked game session.
//!
//! Defaults can be overridden via a few environment variables:
//!
//! - `SCRABBLE_BIND_ADDR`    (default: "0.0.0.0")
//! - `SCRABBLE_PORT`         (default: "9000")
//! - `SCRABBLE_FIRST_PLAYER` (default: "server"; also "client" or "random")
//! - `SCRABBLE_SEED`         (default: unset, draws come from OS entropy)

use std::env;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use scrabble_protocol::FirstMover;
use thiserror::Error;

/// How the host decides who makes the first move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FirstPlayerPolicy {
    #[default]
    Server,
    Client,
    Random,
}

impl FirstPlayerPolicy {
    pub fn decide<R: Rng + ?Sized>(self, rng: &mut R) -> FirstMover {
        match self {
            FirstPlayerPolicy::Server => FirstMover::Server,
            FirstPlayerPolicy::Client => FirstMover::Client,
            FirstPlayerPolicy::Random => {
                if rng.gen_bool(0.5) {
                    FirstMover::Server
                } else {
                    FirstMover::Client
                }
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown first-player policy {0:?} (expected server, client or random)")]
pub struct ParsePolicyError(String);

impl FromStr for FirstPlayerPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(FirstPlayerPolicy::Server),
            "client" => Ok(FirstPlayerPolicy::Client),
            "random" => Ok(FirstPlayerPolicy::Random),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

impl fmt::Display for FirstPlayerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FirstPlayerPolicy::Server => "server",
            FirstPlayerPolicy::Client => "client",
            FirstPlayerPolicy::Random => "random",
        })
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface the host binds to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port the host listens on and the joiner connects to.
    pub port: u16,

    /// Only consulted on the host side.
    pub first_player: FirstPlayerPolicy,

    /// Seed for this peer's bag; `None` uses entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 9000,
            first_player: FirstPlayerPolicy::Server,
            seed: None,
        }
    }
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to the defaults.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let defaults = Config::default();
        let bind_addr = env::var("SCRABBLE_BIND_ADDR").unwrap_or(defaults.bind_addr);
        let port = read_env_or_default("SCRABBLE_PORT", defaults.port)?;
        let first_player = read_env_or_default("SCRABBLE_FIRST_PLAYER", defaults.first_player)?;
        let seed = read_env_opt::<u64>("SCRABBLE_SEED")?;

        Ok(Config {
            bind_addr,
            port,
            first_player,
            seed,
        })
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> Result<T, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::error::Error + 'static,
{
    Ok(read_env_opt(key)?.unwrap_or(default))
}

fn read_env_opt<T>(key: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::error::Error + 'static,
{
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(Some(val.trim().parse::<T>()?)),
        _ => Ok(None),
    }
}
