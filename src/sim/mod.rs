//! Deterministic simulation module
//!
//! Everything that moves or rolls dice lives here:
//! - Maze-owned reseedable RNG
//! - Wall collision and per-axis move resolution
//! - Player/enemy state and the per-frame tick

pub mod collision;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{
    MoveResult, circle_segment_hit, closest_point_on_segment, move_blocked, resolve_move,
    segments_intersect,
};
pub use rng::MazeRng;
pub use state::{Enemy, GameState, Mover};
pub use tick::{TickInput, tick};
