//! Wall geometry derived from maze connectivity
//!
//! Each lattice rhombus splits along its diagonal into two triangular
//! half-tiles. A half's edges are walls where the maze is not connected,
//! and the count of walls picks its shape. Corridors run along connected
//! edges; wall faces are cut at `inset` (a fraction of an edge) from the
//! corridor centre lines, meeting at "ports" on wall edges so neighbouring
//! halves join up without gaps.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Pixel size of one lattice step plus the per-column vertical skew
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileMetrics {
    pub width: f32,
    pub height: f32,
    /// Vertical shift per lattice x, producing the staggered hex layout
    pub skew: f32,
}

impl Default for TileMetrics {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            width: TILE_WIDTH,
            height: TILE_HEIGHT,
            skew: TILE_SKEW,
        }
    }
}

impl TileMetrics {
    /// Lattice units -> world pixels
    #[inline]
    pub fn to_world(&self, lattice: Vec2) -> Vec2 {
        Vec2::new(
            lattice.x * self.width,
            lattice.y * self.height + lattice.x * self.skew,
        )
    }

    /// World pixels -> lattice units
    #[inline]
    pub fn to_lattice(&self, world: Vec2) -> Vec2 {
        let x = world.x / self.width;
        Vec2::new(x, (world.y - x * self.skew) / self.height)
    }
}

/// Visible world rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub origin: Vec2,
    pub size: Vec2,
}

impl View {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    /// Inclusive lattice cell range covering the view, grown by `padding`
    pub fn cell_bounds(&self, tile: &TileMetrics, padding: i32) -> (IVec2, IVec2) {
        let corners = [
            self.origin,
            self.origin + Vec2::new(self.size.x, 0.0),
            self.origin + Vec2::new(0.0, self.size.y),
            self.origin + self.size,
        ]
        .map(|c| tile.to_lattice(c));

        let lo = corners.iter().fold(Vec2::splat(f32::MAX), |acc, c| acc.min(*c));
        let hi = corners.iter().fold(Vec2::splat(f32::MIN), |acc, c| acc.max(*c));
        (
            lo.floor().as_ivec2() - IVec2::splat(padding),
            hi.ceil().as_ivec2() + IVec2::splat(padding),
        )
    }
}

/// World-space wall segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallLine {
    pub a: Vec2,
    pub b: Vec2,
}

impl WallLine {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Half {
    /// `(x, y), (x+1, y), (x+1, y+1)`
    Upper,
    /// `(x, y), (x, y+1), (x+1, y+1)`
    Lower,
}

impl Half {
    /// Triangle corners for the rhombus at `cell`
    pub fn vertices(self, cell: IVec2) -> [IVec2; 3] {
        match self {
            Half::Upper => [cell, cell + IVec2::new(1, 0), cell + IVec2::new(1, 1)],
            Half::Lower => [cell, cell + IVec2::new(0, 1), cell + IVec2::new(1, 1)],
        }
    }
}

/// Edge `i` of a half joins these vertex indices; the third is opposite
pub const HALF_EDGES: [(usize, usize, usize); 3] = [(0, 1, 2), (1, 2, 0), (0, 2, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallShape {
    /// No walls
    Open,
    /// One wall, corridors meet at the opposite corner
    Wedge { wall: usize },
    /// Two walls, one corridor along the open edge
    Strip { open: usize },
    /// Three walls
    Solid,
}

/// Classify a half by its wall flags (indexed like `HALF_EDGES`)
pub fn classify(walls: [bool; 3]) -> WallShape {
    match walls.iter().filter(|w| **w).count() {
        0 => WallShape::Open,
        1 => WallShape::Wedge {
            wall: walls.iter().position(|w| *w).unwrap_or_default(),
        },
        2 => WallShape::Strip {
            open: walls.iter().position(|w| !*w).unwrap_or_default(),
        },
        3 => WallShape::Solid,
        n => unreachable!("half-tile with {n} of 3 walls"),
    }
}

/// One classified half-tile inside the drawn window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfTile {
    /// Global cell of the rhombus
    pub cell: IVec2,
    pub half: Half,
    pub walls: [bool; 3],
    pub shape: WallShape,
}

/// Output of one draw pass (collision lines are kept on the maze)
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub tiles: Vec<HalfTile>,
    /// Cells with no connections at all
    pub nubs: Vec<IVec2>,
}

#[inline]
fn port(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    from + (to - from) * t
}

/// Wall lines of one half in lattice units.
///
/// `corners` are the triangle vertices, `live[i]` tells whether vertex `i`
/// touches any corridor (corner cuts are only needed around live vertices).
pub fn half_lines(
    corners: [Vec2; 3],
    walls: [bool; 3],
    live: [bool; 3],
    inset: f32,
) -> Vec<(Vec2, Vec2)> {
    let mut lines = Vec::new();
    match classify(walls) {
        WallShape::Open => {}
        WallShape::Wedge { wall } => {
            let (a, b, c) = HALF_EDGES[wall];
            let (a, b, c) = (corners[a], corners[b], corners[c]);
            let apex = a * inset + b * inset + c * (1.0 - 2.0 * inset);
            lines.push((apex, port(a, b, inset)));
            lines.push((apex, port(b, a, inset)));
        }
        WallShape::Strip { open } => {
            let (a, b, c) = HALF_EDGES[open];
            let (a, b, c) = (corners[a], corners[b], corners[c]);
            lines.push((port(a, c, inset), port(b, c, inset)));
        }
        WallShape::Solid => {}
    }

    // Corners where two walls meet
    for (v, &[e0, e1]) in VERTEX_EDGES.iter().enumerate() {
        if walls[e0] && walls[e1] && live[v] {
            let (u0, u1) = (other_end(e0, v), other_end(e1, v));
            lines.push((
                port(corners[v], corners[u0], inset),
                port(corners[v], corners[u1], inset),
            ));
        }
    }
    lines
}

/// Edges touching each vertex
const VERTEX_EDGES: [[usize; 2]; 3] = [[0, 2], [0, 1], [1, 2]];

fn other_end(edge: usize, vertex: usize) -> usize {
    let (a, b, _) = HALF_EDGES[edge];
    if a == vertex { b } else { a }
}
