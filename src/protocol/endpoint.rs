//! Room endpoints and pre-flight validation
//!
//! Builds the provisioning URL (`POST /api/v1/room`) and the game channel URL.
//! The requests themselves are issued by the caller.

use super::ProtocolError;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const MIN_PLAYERS: usize = 2;
pub const MIN_ROUNDS: u32 = 4;
pub const MIN_PLAYER_NAME_LEN: usize = 4;
pub const MIN_ROOM_CODE_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid game code and player name")]
    MissingField,
    #[error("Player name must be at least 4 characters long")]
    PlayerNameTooShort,
    #[error("Game code must be at least 6 characters long")]
    RoomCodeTooShort,
    #[error("A minimum of 2 players or minimum of 4 rounds is required")]
    RoomTooSmall,
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

/// A validated request to join a room's game channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub room_id: String,
    pub player_name: String,
}

impl JoinRequest {
    /// Validate user input before connecting
    ///
    /// Both fields are trimmed. The name needs at least 4 characters and the
    /// room code at least 6.
    ///
    /// # Errors
    /// Returns the first rule the input breaks.
    ///
    /// # Examples
    /// ```
    /// use wordle_rooms::protocol::endpoint::{JoinRequest, ValidationError};
    ///
    /// assert!(JoinRequest::validate("alice", "ABC123").is_ok());
    /// assert_eq!(
    ///     JoinRequest::validate("bob", "ABC123"),
    ///     Err(ValidationError::PlayerNameTooShort)
    /// );
    /// ```
    pub fn validate(player_name: &str, room_code: &str) -> Result<Self, ValidationError> {
        let player_name = player_name.trim();
        let room_code = room_code.trim();

        if player_name.is_empty() || room_code.is_empty() {
            return Err(ValidationError::MissingField);
        }
        if room_code.chars().count() < MIN_ROOM_CODE_LEN {
            return Err(ValidationError::RoomCodeTooShort);
        }
        if player_name.chars().count() < MIN_PLAYER_NAME_LEN {
            return Err(ValidationError::PlayerNameTooShort);
        }

        Ok(Self {
            room_id: room_code.to_string(),
            player_name: player_name.to_string(),
        })
    }

    /// Game channel URL: `{base}/wordle?roomID=..&playerName=..`
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidUrl` if `base` cannot carry a path.
    pub fn channel_url(&self, base: &Url) -> Result<Url, ValidationError> {
        let mut url = with_path(base, &["wordle"])?;
        url.query_pairs_mut()
            .append_pair("roomID", &self.room_id)
            .append_pair("playerName", &self.player_name);
        Ok(url)
    }
}

/// A validated room provisioning request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateRoomRequest {
    pub max_rounds: u32,
    pub max_players: usize,
}

impl CreateRoomRequest {
    /// # Errors
    /// Returns `ValidationError::RoomTooSmall` below 2 players or 4 rounds.
    pub fn new(max_rounds: u32, max_players: usize) -> Result<Self, ValidationError> {
        if max_players < MIN_PLAYERS || max_rounds < MIN_ROUNDS {
            return Err(ValidationError::RoomTooSmall);
        }
        Ok(Self {
            max_rounds,
            max_players,
        })
    }

    /// Provisioning URL: `{base}/api/v1/room?maxRounds=..&maxPlayers=..`
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidUrl` if `base` cannot carry a path.
    pub fn url(&self, base: &Url) -> Result<Url, ValidationError> {
        let mut url = with_path(base, &["api", "v1", "room"])?;
        url.query_pairs_mut()
            .append_pair("maxRounds", &self.max_rounds.to_string())
            .append_pair("maxPlayers", &self.max_players.to_string());
        Ok(url)
    }
}

/// Body of a successful provisioning response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateRoomResponse {
    #[serde(rename = "roomID")]
    pub room_id: String,
}

impl CreateRoomResponse {
    /// # Errors
    /// Returns `ProtocolError::Malformed` if the body is not `{"roomID": ...}`.
    pub fn decode(body: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Parse a server base URL given on the command line
///
/// # Errors
/// Returns `ValidationError::InvalidUrl` if `base` does not parse.
pub fn parse_base(base: &str) -> Result<Url, ValidationError> {
    Url::parse(base).map_err(|e| ValidationError::InvalidUrl(format!("{base}: {e}")))
}

fn with_path(base: &Url, segments: &[&str]) -> Result<Url, ValidationError> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|()| ValidationError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_validation_order() {
        assert_eq!(
            JoinRequest::validate("", "ABC123"),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            JoinRequest::validate("alice", "   "),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            JoinRequest::validate("alice", "ABC"),
            Err(ValidationError::RoomCodeTooShort)
        );
        assert_eq!(
            JoinRequest::validate("  bob  ", "ABC123"),
            Err(ValidationError::PlayerNameTooShort)
        );
    }

    #[test]
    fn join_trims_input() {
        let request = JoinRequest::validate("  alice ", " ABC123 ").unwrap();
        assert_eq!(request.player_name, "alice");
        assert_eq!(request.room_id, "ABC123");
    }

    #[test]
    fn channel_url_encodes_player_name() {
        let base = parse_base("ws://localhost:8080").unwrap();
        let request = JoinRequest::validate("Ada & Co", "ROOM42").unwrap();
        let url = request.channel_url(&base).unwrap();

        assert_eq!(url.path(), "/wordle");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("roomID".to_string(), "ROOM42".to_string()),
                ("playerName".to_string(), "Ada & Co".to_string()),
            ]
        );
        assert!(!url.as_str().contains("Ada & Co"));
    }

    #[test]
    fn channel_url_keeps_base_path() {
        let base = parse_base("wss://games.example.com/ws/").unwrap();
        let request = JoinRequest::validate("alice", "ROOM42").unwrap();
        assert_eq!(request.channel_url(&base).unwrap().path(), "/ws/wordle");
    }

    #[test]
    fn create_room_minimums() {
        assert_eq!(
            CreateRoomRequest::new(4, 1),
            Err(ValidationError::RoomTooSmall)
        );
        assert_eq!(
            CreateRoomRequest::new(3, 2),
            Err(ValidationError::RoomTooSmall)
        );
        assert!(CreateRoomRequest::new(4, 2).is_ok());
    }

    #[test]
    fn create_room_url() {
        let base = parse_base("http://localhost:8080").unwrap();
        let url = CreateRoomRequest::new(5, 3).unwrap().url(&base).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v1/room?maxRounds=5&maxPlayers=3"
        );
    }

    #[test]
    fn create_room_response_decodes() {
        let response = CreateRoomResponse::decode(r#"{"roomID":"XYZ789"}"#).unwrap();
        assert_eq!(response.room_id, "XYZ789");
        assert!(CreateRoomResponse::decode("{}").is_err());
    }

    #[test]
    fn invalid_base_url() {
        assert!(matches!(
            parse_base("not a url"),
            Err(ValidationError::InvalidUrl(_))
        ));
        let base = parse_base("mailto:someone@example.com").unwrap();
        let request = JoinRequest::validate("alice", "ROOM42").unwrap();
        assert!(request.channel_url(&base).is_err());
    }
}
