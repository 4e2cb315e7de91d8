//! Room snapshot as pushed by the room service

use super::ProtocolError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

/// A player in the room, as the server reports them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub current_round: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomPhase {
    #[default]
    WaitingForPlayers,
    InProgress,
    Completed,
}

/// Authoritative room state
///
/// Always replaced wholesale by the next state-bearing message, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub max_rounds: u32,
    pub max_players: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: FxHashMap<String, Player>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_players: Vec<Player>,
    #[serde(rename = "state", default)]
    pub phase: RoomPhase,
}

/// A leaderboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// 0-based rank
    pub rank: usize,
    pub name: String,
    pub score: u32,
}

impl Standing {
    /// Medal for the top three, `"n."` below that
    #[must_use]
    pub fn medal(&self) -> String {
        match self.rank {
            0 => "🥇".to_string(),
            1 => "🥈".to_string(),
            2 => "🥉".to_string(),
            n => format!("{}.", n + 1),
        }
    }
}

impl RoomSnapshot {
    /// Check the room-capacity invariant
    ///
    /// # Errors
    /// Returns `ProtocolError::RoomOverCapacity` if more players are present than
    /// the room allows.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.players.len() > self.max_players {
            return Err(ProtocolError::RoomOverCapacity {
                players: self.players.len(),
                max_players: self.max_players,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Every seat is taken
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.max_players > 0 && self.players.len() == self.max_players
    }

    #[must_use]
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    /// Whether `id` has finished all rounds
    #[must_use]
    pub fn has_completed(&self, id: &str) -> bool {
        self.completed_players.iter().any(|p| p.id == id)
    }

    /// Completed players ranked by score, highest first
    ///
    /// Ties keep the order the server reported them in.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<Standing> {
        let mut sorted: Vec<&Player> = self.completed_players.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
            .into_iter()
            .enumerate()
            .map(|(rank, player)| Standing {
                rank,
                name: player.name.clone(),
                score: player.score,
            })
            .collect()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
