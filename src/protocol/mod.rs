//! Message contract with the remote room service
//!
//! Inbound frames are JSON envelopes `{type, playerID?, name?, game?}` where
//! `game` is a full room snapshot. Outbound frames are `START_GAME` and
//! `INCREMENT_SCORE`.

pub mod endpoint;
mod message;
mod room;

pub use message::{InboundMessage, OutboundMessage};
pub use room::{Player, RoomPhase, RoomSnapshot, Standing};

use thiserror::Error;

/// Error type for frames that cannot be applied
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("{kind} frame is missing `{field}`")]
    MissingField { kind: String, field: &'static str },
    #[error("room reports {players} players but only seats {max_players}")]
    RoomOverCapacity { players: usize, max_players: usize },
}
