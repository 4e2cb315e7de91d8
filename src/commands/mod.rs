//! Command implementations

pub mod replay;
pub mod room;
pub mod simple;

pub use replay::{Replay, run_replay};
pub use room::{print_create_room, print_join_room};
pub use simple::run_simple;
