//! Sharkbait - infinite seeded maze for a fish-eating arcade game
//!
//! Core modules:
//! - `maze`: Lazily generated hex-lattice maze, spawns, wall geometry
//! - `sim`: Deterministic simulation (RNG, collision, movement, tick)
//! - `settings`: Data-driven tunables
//! - `best_score`: The one persisted record

pub mod best_score;
pub mod error;
pub mod maze;
pub mod settings;
pub mod sim;

pub use best_score::BestScore;
pub use error::{Error, Result};
pub use maze::{Maze, MazeSegment, SegmentCoord};
pub use settings::Settings;

/// Default tunables
pub mod consts {
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Segment edge length in cells
    pub const SEG_SIZE: i32 = 8;
    /// Multiplier of `sy` in the segment id (`sx + sy * ID_FACTOR`)
    pub const ID_FACTOR: i64 = 65536;
    /// Segment coordinates are supported within [-LIMIT, LIMIT] on each
    /// axis, which keeps ids distinct and global cells far from `i32`
    /// overflow. Queries outside panic.
    pub const SEGMENT_COORD_LIMIT: i32 = (ID_FACTOR / 2) as i32 - 1;
    /// Largest accepted segment edge length
    pub const MAX_SEG_SIZE: i32 = 4096;
    /// Extra random traces per segment are drawn from [0, this]
    pub const MAX_RAND_CONNECTIONS: u32 = 3;
    /// Largest accepted `max_rand_connections`
    pub const MAX_EXTRA_TRACES: u32 = 1024;
    pub const BASE_SEED: u64 = 3;
    /// Fraction of edge midpoints that get an enemy
    pub const SPAWN_DENSITY: f32 = 0.15;

    /// Tile geometry (pixels)
    pub const TILE_WIDTH: f32 = 14.0;
    pub const TILE_HEIGHT: f32 = 16.0;
    pub const TILE_SKEW: f32 = -8.0;
    /// Wall inset from corridor centre lines (fraction of an edge)
    pub const CORRIDOR_INSET: f32 = 0.35;
    pub const VIEW_PADDING: i32 = 2;

    /// Virtual viewport
    pub const VIEW_WIDTH: f32 = 320.0;
    pub const VIEW_HEIGHT: f32 = 240.0;

    /// Player defaults
    pub const PROBE_RADIUS: f32 = 3.0;
    pub const PLAYER_SPEED: f32 = 60.0;
    pub const PLAYER_ACCEL: f32 = 240.0;
}
