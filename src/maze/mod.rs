//! Infinite lazily-generated maze
//!
//! Segments are created on first touch and kept for the life of the maze.
//! Global queries route to the segment owning the lower endpoint of an
//! edge, so the answer never depends on which neighbours exist yet.

pub mod edge;
pub mod geometry;
pub mod segment;
pub mod spawn;

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use glam::{IVec2, Vec2};

pub use edge::{EdgeKind, normalize_edge};
pub use geometry::{
    DrawList, Half, HalfTile, TileMetrics, View, WallLine, WallShape, classify, half_lines,
};
pub use segment::{BorderConnections, MazeSegment, SegmentCoord};
pub use spawn::{EnemyKind, Spawn, SpawnTable, SpawnTier, WeightedKind, tier_for};

use crate::settings::Settings;
use crate::sim::MazeRng;

/// Called once for every newly generated segment
pub type SpawnListener = Box<dyn FnMut(SegmentCoord, &[Spawn])>;

/// Offsets to the three neighbours above/left of a cell
const INCOMING: [(i32, i32); 3] = [(-1, 0), (0, -1), (-1, -1)];

pub struct Maze {
    settings: Settings,
    rng: MazeRng,
    segments: HashMap<SegmentCoord, MazeSegment>,
    listener: Option<SpawnListener>,
    /// Wall lines from the latest `draw`, world space
    collision: Vec<WallLine>,
}

impl Maze {
    pub fn new(settings: Settings) -> crate::Result<Self> {
        settings.validate()?;
        log::info!(
            "Maze ready: seed {}, {}x{} segments",
            settings.base_seed,
            settings.seg_size,
            settings.seg_size
        );
        Ok(Self {
            rng: MazeRng::new(settings.base_seed),
            settings,
            segments: HashMap::new(),
            listener: None,
            collision: Vec::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Register the callback receiving each new segment's spawns
    pub fn on_segment_created(&mut self, listener: impl FnMut(SegmentCoord, &[Spawn]) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Cached segment, generated on first access
    pub fn get_segment(&mut self, sx: i32, sy: i32) -> &MazeSegment {
        let coord = SegmentCoord::new(sx, sy);
        assert!(
            coord.in_range(),
            "segment ({sx}, {sy}) is outside the supported range"
        );
        match self.segments.entry(coord) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let segment = MazeSegment::generate(coord, &self.settings, &mut self.rng);
                if let Some(listener) = self.listener.as_mut() {
                    listener(coord, &segment.spawns);
                }
                entry.insert(segment)
            }
        }
    }

    pub fn is_generated(&self, sx: i32, sy: i32) -> bool {
        self.segments.contains_key(&SegmentCoord::new(sx, sy))
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Whether two unit-adjacent global cells are joined.
    ///
    /// Panics if the cells are not unit-adjacent.
    pub fn connected(&mut self, tx0: i32, ty0: i32, tx1: i32, ty1: i32) -> bool {
        self.assert_supported(tx0, ty0);
        self.assert_supported(tx1, ty1);
        let (x, y, kind) = normalize_edge(tx0, ty0, tx1, ty1);
        let size = self.settings.seg_size;
        let owner = SegmentCoord::containing(x, y, size);
        let (ox, oy) = owner.origin(size);
        let (lx, ly) = (x - ox, y - oy);
        let (dx, dy) = kind.offset();
        self.get_segment(owner.x, owner.y)
            .connected(lx, ly, lx + dx, ly + dy)
    }

    /// True iff none of the six edges touching the cell are connected
    pub fn completely_blocked(&mut self, tx: i32, ty: i32) -> bool {
        self.assert_supported(tx, ty);
        let outgoing = EdgeKind::ALL.map(|kind| kind.offset());
        outgoing
            .iter()
            .chain(INCOMING.iter())
            .all(|&(dx, dy)| !self.connected(tx, ty, tx + dx, ty + dy))
    }

    /// Cells outside the supported segment range would overflow lattice math
    fn assert_supported(&self, tx: i32, ty: i32) {
        let owner = SegmentCoord::containing(tx, ty, self.settings.seg_size);
        assert!(
            owner.in_range(),
            "cell ({tx}, {ty}) is outside the supported range"
        );
    }

    /// Wall lines produced by the latest `draw`
    pub fn collision(&self) -> &[WallLine] {
        &self.collision
    }

    /// Classify every half-tile in the view window and rebuild `collision`
    pub fn draw(&mut self, view: &View) -> DrawList {
        let tile = self.settings.tile;
        let inset = self.settings.corridor_inset;
        let (lo, hi) = view.cell_bounds(&tile, self.settings.view_padding);

        self.collision.clear();
        let mut list = DrawList::default();

        for ty in lo.y..=hi.y {
            for tx in lo.x..=hi.x {
                let cell = IVec2::new(tx, ty);
                if self.completely_blocked(tx, ty) {
                    list.nubs.push(cell);
                }
                for half in [Half::Upper, Half::Lower] {
                    let vertices = half.vertices(cell);
                    let walls = geometry::HALF_EDGES.map(|(a, b, _)| {
                        let (p, q) = (vertices[a], vertices[b]);
                        !self.connected(p.x, p.y, q.x, q.y)
                    });
                    let shape = classify(walls);

                    if shape != WallShape::Open {
                        let live = vertices.map(|v| !self.completely_blocked(v.x, v.y));
                        let corners = vertices.map(|v| v.as_vec2());
                        for (a, b) in half_lines(corners, walls, live, inset) {
                            self.collision
                                .push(WallLine::new(tile.to_world(a), tile.to_world(b)));
                        }
                    }

                    list.tiles.push(HalfTile {
                        cell,
                        half,
                        walls,
                        shape,
                    });
                }
            }
        }

        log::trace!(
            "Drew cells ({}, {})..=({}, {}): {} halves, {} wall lines",
            lo.x,
            lo.y,
            hi.x,
            hi.y,
            list.tiles.len(),
            self.collision.len()
        );
        list
    }

    /// World position of a global lattice point
    pub fn lattice_to_world(&self, lattice: Vec2) -> Vec2 {
        self.settings.tile.to_world(lattice)
    }

    /// Segment containing a world position
    pub fn segment_at_world(&self, world: Vec2) -> SegmentCoord {
        let lattice = self.settings.tile.to_lattice(world).floor().as_ivec2();
        SegmentCoord::containing(lattice.x, lattice.y, self.settings.seg_size)
    }

    #[cfg(test)]
    pub(crate) fn insert_segment(&mut self, segment: MazeSegment) {
        self.segments.insert(segment.coord, segment);
    }
}
