//! Game state layered on the maze
//!
//! The player fish, the enemies announced by newly generated segments, and
//! the set of segments visited so far (the run score).

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{MoveResult, resolve_move};
use crate::consts::*;
use crate::maze::{EnemyKind, Maze, SegmentCoord, WallLine};
use crate::settings::Settings;

/// An entity steered by an impulse, moving through the maze corridors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mover {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Top speed per axis (pixels/s)
    pub speed: Vec2,
    /// Velocity change per axis (pixels/s²)
    pub accel: Vec2,
    /// 1.0 facing right, -1.0 facing left
    pub facing: f32,
    /// Probe radius for wall tests
    pub radius: f32,
}

impl Mover {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            speed: Vec2::splat(PLAYER_SPEED),
            accel: Vec2::splat(PLAYER_ACCEL),
            facing: 1.0,
            radius,
        }
    }

    /// Steer toward `impulse * speed` (impulse in [-1, 1] per axis) and move
    pub fn update(&mut self, impulse: Vec2, dt: f32, walls: &[WallLine]) -> MoveResult {
        let max_dv = self.accel * dt;
        let desired = impulse.clamp(Vec2::splat(-1.0), Vec2::splat(1.0)) * self.speed;
        self.vel += (desired - self.vel).clamp(-max_dv, max_dv);

        if self.vel.x > 0.0 {
            self.facing = 1.0;
        } else if self.vel.x < 0.0 {
            self.facing = -1.0;
        }

        let result = resolve_move(self.pos, self.vel * dt, self.radius, walls);
        if result.blocked_x {
            self.vel.x = 0.0;
        }
        if result.blocked_y {
            self.vel.y = 0.0;
        }
        self.pos = result.pos;
        result
    }
}

/// An enemy placed by segment generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// World position
    pub pos: Vec2,
    pub segment: SegmentCoord,
}

pub struct GameState {
    pub maze: Maze,
    pub player: Mover,
    /// Shared with the maze's spawn listener
    pub enemies: Rc<RefCell<Vec<Enemy>>>,
    /// Segments the player has entered
    pub visited: HashSet<SegmentCoord>,
    /// View size used for each frame's draw (pixels)
    pub view_size: Vec2,
    pub time_ticks: u64,
}

impl GameState {
    /// Build the maze and place the player on the origin segment's left entry
    pub fn new(settings: Settings) -> crate::Result<Self> {
        let mut maze = Maze::new(settings)?;
        let enemies = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&enemies);
        let tile = maze.settings().tile;
        let seg_size = maze.settings().seg_size;
        maze.on_segment_created(move |coord, spawns| {
            for spawn in spawns {
                log::trace!("{} spawned in segment {:?}", spawn.kind.as_str(), coord);
            }
            sink.borrow_mut().extend(spawns.iter().map(|s| Enemy {
                kind: s.kind,
                pos: tile.to_world(s.lattice_pos(coord, seg_size)),
                segment: coord,
            }));
        });

        let entry = maze.get_segment(0, 0).border.left;
        let start = maze.lattice_to_world(Vec2::new(0.0, entry as f32));
        let radius = maze.settings().probe_radius;

        let mut state = Self {
            maze,
            player: Mover::new(start, radius),
            enemies,
            visited: HashSet::new(),
            view_size: Vec2::new(VIEW_WIDTH, VIEW_HEIGHT),
            time_ticks: 0,
        };
        state.visited.insert(SegmentCoord::new(0, 0));
        log::info!("Player starts at {:?}", state.player.pos);
        Ok(state)
    }

    /// Run score: segments explored
    pub fn score(&self) -> u64 {
        self.visited.len() as u64
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.borrow().len()
    }

    /// Enemies met so far, per kind, in `EnemyKind::ALL` order
    pub fn enemy_census(&self) -> [(EnemyKind, usize); 10] {
        let enemies = self.enemies.borrow();
        EnemyKind::ALL.map(|kind| (kind, enemies.iter().filter(|e| e.kind == kind).count()))
    }
}
