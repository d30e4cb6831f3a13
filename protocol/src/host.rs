use bombros_core::{Board, GameConfig};

use crate::*;

/// Owns the one authoritative board and applies requests from any source in arrival order.
#[derive(Clone, Debug)]
pub struct GameHost {
    board: Board,
}

impl GameHost {
    pub fn new(config: GameConfig, seed: u64) -> bombros_core::Result<Self> {
        Ok(Self {
            board: Board::new_game(config, seed)?,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Applies one request and returns the message to broadcast for it.
    pub fn handle(&mut self, request: Request) -> ServerMessage {
        match request {
            Request::Action(action) => {
                let outcome = self.board.apply(action);
                ServerMessage::Update {
                    action,
                    outcome,
                    status: self.board.status(),
                }
            }
            Request::NewGame { config, seed } => match Board::new_game(config, seed) {
                Ok(board) => {
                    self.board = board;
                    ServerMessage::NewBoard { config, seed }
                }
                Err(err) => {
                    log::warn!("Rejected new game request {:?}: {}", config, err);
                    ServerMessage::Error {
                        message: err.to_string(),
                    }
                }
            },
        }
    }

    /// Drains `source`, applying each request in order and pushing the replies onto `out`.
    ///
    /// Malformed requests are answered with [`ServerMessage::Error`] and skipped. An I/O error
    /// stops the pump, replies for the requests already applied stay in `out`.
    pub fn pump(
        &mut self,
        source: &mut impl ActionSource,
        out: &mut Vec<ServerMessage>,
    ) -> Result<()> {
        loop {
            match source.next_request() {
                Ok(Some(request)) => out.push(self.handle(request)),
                Ok(None) => return Ok(()),
                Err(err) if err.is_malformed() => {
                    log::warn!("Skipping malformed request: {}", err);
                    out.push(ServerMessage::Error {
                        message: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }
}
