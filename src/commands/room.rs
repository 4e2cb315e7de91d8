//! Room provisioning and join pre-flight
//!
//! Validates user input and prints the endpoints a transport would use.
//! No network request is made.

use crate::protocol::endpoint::{CreateRoomRequest, JoinRequest, parse_base};
use anyhow::Result;
use colored::Colorize;
use url::Url;

/// Validate room settings and return the provisioning URL
///
/// # Errors
///
/// Returns an error if the settings are below the room minimums or `server`
/// is not a usable base URL.
pub fn create_room_url(server: &str, max_rounds: u32, max_players: usize) -> Result<Url> {
    let base = parse_base(server)?;
    let request = CreateRoomRequest::new(max_rounds, max_players)?;
    Ok(request.url(&base)?)
}

/// Validate join input and return the game channel URL
///
/// # Errors
///
/// Returns an error if the name or room code fails validation or `server` is
/// not a usable base URL.
pub fn join_room_url(server: &str, player_name: &str, room_code: &str) -> Result<(JoinRequest, Url)> {
    let base = parse_base(server)?;
    let request = JoinRequest::validate(player_name, room_code)?;
    let url = request.channel_url(&base)?;
    Ok((request, url))
}

/// # Errors
///
/// See [`create_room_url`].
pub fn print_create_room(server: &str, max_rounds: u32, max_players: usize) -> Result<()> {
    let url = create_room_url(server, max_rounds, max_players)?;
    println!("{} {}", "POST".green().bold(), url);
    println!(
        "  {} rounds, {} players; the response body is {}",
        max_rounds,
        max_players,
        r#"{"roomID": "..."}"#.bright_black()
    );
    Ok(())
}

/// # Errors
///
/// See [`join_room_url`].
pub fn print_join_room(server: &str, player_name: &str, room_code: &str) -> Result<()> {
    let (request, url) = join_room_url(server, player_name, room_code)?;
    println!(
        "{} joins room {}",
        request.player_name.bright_white().bold(),
        request.room_id.bright_yellow().bold()
    );
    println!("{} {}", "channel".green().bold(), url);
    Ok(())
}
