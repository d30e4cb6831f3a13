use std::io::Write;

use bombros_core::{Action, ActionOutcome, GameConfig, GameStatus};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::Result;

/// Request from an input source to the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    Action(Action),
    NewGame { config: GameConfig, seed: u64 },
}

impl From<Action> for Request {
    fn from(action: Action) -> Self {
        Self::Action(action)
    }
}

/// Message from the host to every peer.
///
/// Boards are never shipped: peers rebuild them from `NewBoard` and replay `Update`s.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerMessage {
    NewBoard {
        config: GameConfig,
        seed: u64,
    },
    Update {
        action: Action,
        outcome: ActionOutcome,
        status: GameStatus,
    },
    Error {
        message: String,
    },
}

pub fn encode_line<T: Serialize>(message: &T) -> Result<String> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

pub fn decode_line<T: DeserializeOwned>(line: &str) -> Result<T> {
    Ok(serde_json::from_str(line.trim())?)
}

pub fn write_message<W: Write, T: Serialize>(writer: &mut W, message: &T) -> Result<()> {
    writer.write_all(encode_line(message)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}
