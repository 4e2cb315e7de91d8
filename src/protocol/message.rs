//! Inbound and outbound message shapes

use super::{ProtocolError, RoomSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message pushed by the room service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Identity assignment for this connection
    PlayerSet {
        player_id: String,
        game: RoomSnapshot,
    },
    PlayerJoined {
        name: String,
        game: RoomSnapshot,
    },
    PlayerMovedForward {
        name: String,
        game: RoomSnapshot,
    },
    ScoreUpdated {
        game: RoomSnapshot,
    },
    PlayerLeft {
        name: String,
        game: Option<RoomSnapshot>,
    },
    GameCompleted {
        game: RoomSnapshot,
    },
    /// Join rejected
    Error,
    /// Room has already started
    GameInProgress,
    /// Room is closed
    GameOver,
    /// Any type this client does not know
    Unknown(String),
}

/// Wire envelope: `{type, playerID?, name?, game?}`
///
/// Payload fields stay raw until the type says which ones it needs.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "playerID")]
    player_id: Option<Value>,
    name: Option<Value>,
    game: Option<Value>,
}

impl Envelope {
    fn require_game(&mut self) -> Result<RoomSnapshot, ProtocolError> {
        self.game()?.ok_or_else(|| ProtocolError::MissingField {
            kind: self.kind.clone(),
            field: "game",
        })
    }

    fn game(&mut self) -> Result<Option<RoomSnapshot>, ProtocolError> {
        let Some(raw) = self.game.take() else {
            return Ok(None);
        };
        let game: RoomSnapshot = serde_json::from_value(raw)?;
        game.validate()?;
        Ok(Some(game))
    }

    fn require_player_id(&mut self) -> Result<String, ProtocolError> {
        let raw = self
            .player_id
            .take()
            .ok_or_else(|| ProtocolError::MissingField {
                kind: self.kind.clone(),
                field: "playerID",
            })?;
        Ok(serde_json::from_value(raw)?)
    }

    fn name(&mut self) -> String {
        match self.name.take() {
            Some(Value::String(name)) => name,
            _ => String::new(),
        }
    }
}

impl InboundMessage {
    /// Decode a JSON frame
    ///
    /// Unrecognised types decode to [`InboundMessage::Unknown`]. Any snapshot is
    /// checked against the room-capacity invariant.
    ///
    /// # Errors
    /// Returns `ProtocolError` if the frame is not valid JSON, lacks a field its
    /// type requires, or carries a snapshot with more players than seats.
    ///
    /// # Examples
    /// ```
    /// use wordle_rooms::protocol::InboundMessage;
    ///
    /// let msg = InboundMessage::decode(r#"{"type":"GAME_OVER"}"#).unwrap();
    /// assert_eq!(msg, InboundMessage::GameOver);
    /// ```
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        let mut envelope: Envelope = serde_json::from_str(frame)?;

        let message = match envelope.kind.as_str() {
            "PLAYER_SET" => Self::PlayerSet {
                player_id: envelope.require_player_id()?,
                game: envelope.require_game()?,
            },
            "PLAYER_JOINED" => Self::PlayerJoined {
                name: envelope.name(),
                game: envelope.require_game()?,
            },
            "PLAYER_MOVED_FORWARD" => Self::PlayerMovedForward {
                name: envelope.name(),
                game: envelope.require_game()?,
            },
            "SCORE_UPDATED" => Self::ScoreUpdated {
                game: envelope.require_game()?,
            },
            "PLAYER_LEFT" => Self::PlayerLeft {
                name: envelope.name(),
                game: envelope.game()?,
            },
            "GAME_COMPLETED" => Self::GameCompleted {
                game: envelope.require_game()?,
            },
            "ERROR" => Self::Error,
            "GAME_IN_PROGRESS" => Self::GameInProgress,
            "GAME_OVER" => Self::GameOver,
            other => Self::Unknown(other.to_string()),
        };

        Ok(message)
    }

    /// Wire name of the message type
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::PlayerSet { .. } => "PLAYER_SET",
            Self::PlayerJoined { .. } => "PLAYER_JOINED",
            Self::PlayerMovedForward { .. } => "PLAYER_MOVED_FORWARD",
            Self::ScoreUpdated { .. } => "SCORE_UPDATED",
            Self::PlayerLeft { .. } => "PLAYER_LEFT",
            Self::GameCompleted { .. } => "GAME_COMPLETED",
            Self::Error => "ERROR",
            Self::GameInProgress => "GAME_IN_PROGRESS",
            Self::GameOver => "GAME_OVER",
            Self::Unknown(kind) => kind.as_str(),
        }
    }

    /// The snapshot carried by this message, if any
    #[must_use]
    pub const fn snapshot(&self) -> Option<&RoomSnapshot> {
        match self {
            Self::PlayerSet { game, .. }
            | Self::PlayerJoined { game, .. }
            | Self::PlayerMovedForward { game, .. }
            | Self::ScoreUpdated { game }
            | Self::GameCompleted { game } => Some(game),
            Self::PlayerLeft { game, .. } => game.as_ref(),
            Self::Error | Self::GameInProgress | Self::GameOver | Self::Unknown(_) => None,
        }
    }
}

/// A message sent to the room service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundMessage {
    StartGame,
    IncrementScore {
        #[serde(rename = "roomID")]
        room_id: String,
        #[serde(rename = "playerName")]
        player_name: String,
        score: u32,
    },
}

impl OutboundMessage {
    /// Encode as a JSON frame
    ///
    /// # Errors
    /// Returns `ProtocolError::Malformed` if serialization fails.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}
