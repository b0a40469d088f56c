//! One fixed-size tile of the infinite maze
//!
//! A segment is a pure function of its coordinate and the base seed:
//! regenerating it replays the same draws in the same order and yields the
//! same edges and spawns. Neighbours agree on shared borders because the
//! border parameters are drawn from the neighbour's own seed.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::edge::{EdgeKind, normalize_edge};
use super::spawn::{Spawn, tier_for};
use crate::consts::{ID_FACTOR, SEGMENT_COORD_LIMIT};
use crate::settings::Settings;
use crate::sim::MazeRng;

/// Position of a segment on the infinite segment grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentCoord {
    pub x: i32,
    pub y: i32,
}

impl SegmentCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Segment owning global cell `(tx, ty)`
    pub fn containing(tx: i32, ty: i32, seg_size: i32) -> Self {
        Self {
            x: tx.div_euclid(seg_size),
            y: ty.div_euclid(seg_size),
        }
    }

    /// Whether both axes lie within the supported segment range
    pub fn in_range(self) -> bool {
        let range = -SEGMENT_COORD_LIMIT..=SEGMENT_COORD_LIMIT;
        range.contains(&self.x) && range.contains(&self.y)
    }

    /// Encoded id used for seeding
    #[inline]
    pub fn id(self) -> i64 {
        self.x as i64 + self.y as i64 * ID_FACTOR
    }

    /// Global cell of local (0, 0)
    #[inline]
    pub fn origin(self, seg_size: i32) -> (i32, i32) {
        (self.x * seg_size, self.y * seg_size)
    }
}

/// Entry/exit rows and columns on the four sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderConnections {
    /// Row entered from the left neighbour
    pub left: i32,
    /// Column entered from the upper neighbour
    pub top: i32,
    /// Row leaving to the right neighbour
    pub right: i32,
    /// Column leaving to the lower neighbour
    pub bottom: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MazeSegment {
    pub coord: SegmentCoord,
    size: i32,
    /// One flag per cell per `EdgeKind`, row-major
    connectivity: Vec<u8>,
    pub border: BorderConnections,
    pub tier: usize,
    pub spawns: Vec<Spawn>,
}

impl MazeSegment {
    /// Segment with no edges and no spawns
    pub fn blank(coord: SegmentCoord, size: i32) -> Self {
        Self {
            coord,
            size,
            connectivity: vec![0; (size * size * 3) as usize],
            border: BorderConnections {
                left: 1,
                top: 1,
                right: 1,
                bottom: 1,
            },
            tier: 0,
            spawns: Vec::new(),
        }
    }

    /// Generate the segment at `coord`. Draw order is load-bearing.
    pub fn generate(coord: SegmentCoord, settings: &Settings, rng: &mut MazeRng) -> Self {
        let size = settings.seg_size;
        let seed = settings.base_seed.wrapping_add_signed(coord.id());
        let span = (size - 2) as u32;

        // Right and bottom are the first/second draws of the neighbours' seeds
        rng.reseed(seed);
        let left = 1 + rng.range(span) as i32;
        let top = 1 + rng.range(span) as i32;
        rng.reseed(seed.wrapping_add(1));
        let right = 1 + rng.range(span) as i32;
        rng.reseed(seed.wrapping_add(ID_FACTOR as u64));
        rng.range(1);
        let bottom = 1 + rng.range(span) as i32;

        let mut segment = Self::blank(coord, size);
        segment.border = BorderConnections {
            left,
            top,
            right,
            bottom,
        };

        rng.reseed(seed);
        segment.trace(rng, top, 0, bottom, size - 1);
        segment.connect(bottom, size - 1, bottom, size);
        segment.trace(rng, 0, left, size - 1, right);
        segment.connect(size - 1, right, size, right);

        let extra = rng.range(settings.max_rand_connections + 1);
        for _ in 0..extra {
            let x0 = rng.range(size as u32) as i32;
            let y0 = rng.range(size as u32) as i32;
            let x1 = rng.range(size as u32) as i32;
            let y1 = rng.range(size as u32) as i32;
            segment.trace(rng, x0, y0, x1, y1);
        }

        segment.tier = tier_for(coord, size);
        segment.place_spawns(rng, settings);

        log::debug!(
            "Generated segment ({}, {}): tier {}, {} extra traces, {} spawns",
            coord.x,
            coord.y,
            segment.tier,
            extra,
            segment.spawns.len()
        );
        segment
    }

    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Raw flags, `size * size * 3` entries
    pub fn connectivity(&self) -> &[u8] {
        &self.connectivity
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y)
    }

    fn slot(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> usize {
        let (x, y, kind) = normalize_edge(x0, y0, x1, y1);
        assert!(
            self.contains(x, y),
            "edge ({x0}, {y0})-({x1}, {y1}) is not owned by a {0}x{0} segment",
            self.size
        );
        ((y * self.size + x) * 3) as usize + kind.index()
    }

    /// Set or clear the edge between two local cells.
    ///
    /// The lower endpoint must be inside the segment; the upper one may sit
    /// one step past the right or bottom border.
    pub fn set_edge(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, open: bool) {
        let slot = self.slot(x0, y0, x1, y1);
        self.connectivity[slot] = open as u8;
    }

    #[inline]
    pub fn connect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.set_edge(x0, y0, x1, y1, true);
    }

    pub fn connected(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        self.connectivity[self.slot(x0, y0, x1, y1)] != 0
    }

    /// Random walk laying edges from `(x0, y0)` to `(x1, y1)`
    fn trace(&mut self, rng: &mut MazeRng, mut x0: i32, mut y0: i32, x1: i32, y1: i32) {
        while (x0, y0) != (x1, y1) {
            if EdgeKind::between(x0, y0, x1, y1).is_some() {
                self.connect(x0, y0, x1, y1);
                return;
            }

            let dx = (x1 - x0).signum();
            let dy = (y1 - y0).signum();
            let mut horiz = dx != 0;
            if horiz && dy != 0 {
                horiz = rng.range(2) == 0;
            }
            let (mut sx, mut sy) = if horiz { (dx, 0) } else { (0, dy) };

            if rng.random() < 0.5 {
                // Diagonals only run (+1, +1) / (-1, -1)
                let step = if horiz { dx } else { dy };
                let other = if horiz { dy } else { dx };
                if (other == 0 || other == step) && self.contains(x0 + step, y0 + step) {
                    sx = step;
                    sy = step;
                }
            }

            self.connect(x0, y0, x0 + sx, y0 + sy);
            x0 += sx;
            y0 += sy;
        }
    }

    /// Every connected edge midpoint, row-major then by edge kind
    pub fn spawn_candidates(&self) -> Vec<((i32, i32), EdgeKind)> {
        let mut out = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                let base = ((y * self.size + x) * 3) as usize;
                for kind in EdgeKind::ALL {
                    if self.connectivity[base + kind.index()] != 0 {
                        out.push(((x, y), kind));
                    }
                }
            }
        }
        out
    }

    fn place_spawns(&mut self, rng: &mut MazeRng, settings: &Settings) {
        let mut candidates = self.spawn_candidates();
        let budget = (candidates.len() as f32 * settings.spawn_density).floor() as usize;
        let tier = settings.spawn_table.tier(self.tier);

        for &kind in &tier.required {
            if candidates.is_empty() {
                break;
            }
            let (cell, edge) = candidates.remove(rng.range(candidates.len() as u32) as usize);
            self.spawns.push(Spawn { kind, cell, edge });
        }

        while self.spawns.len() < budget && !candidates.is_empty() {
            let kind = tier.pick(rng);
            let (cell, edge) = candidates.remove(rng.range(candidates.len() as u32) as usize);
            self.spawns.push(Spawn { kind, cell, edge });
        }
    }
}

/// ASCII dump: `o` cells, `-` horizontal, `|` vertical, `\` diagonal edges
impl fmt::Display for MazeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            let mut cells = String::new();
            let mut links = String::new();
            for x in 0..self.size {
                cells.push('o');
                cells.push(if self.connected(x, y, x + 1, y) { '-' } else { ' ' });
                links.push(if self.connected(x, y, x, y + 1) { '|' } else { ' ' });
                links.push(if self.connected(x, y, x + 1, y + 1) { '\\' } else { ' ' });
            }
            writeln!(f, "{}", cells.trim_end())?;
            writeln!(f, "{}", links.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    fn generate(x: i32, y: i32) -> MazeSegment {
        let settings = Settings::default();
        let mut rng = MazeRng::new(0);
        MazeSegment::generate(SegmentCoord::new(x, y), &settings, &mut rng)
    }

    /// Cells reachable from `start` over edges with both ends inside
    fn reachable(seg: &MazeSegment, start: (i32, i32)) -> HashSet<(i32, i32)> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some((x, y)) = queue.pop_front() {
            for (dx, dy) in [(1, 0), (0, 1), (1, 1), (-1, 0), (0, -1), (-1, -1)] {
                let (nx, ny) = (x + dx, y + dy);
                if seg.contains(nx, ny) && seg.connected(x, y, nx, ny) && seen.insert((nx, ny)) {
                    queue.push_back((nx, ny));
                }
            }
        }
        seen
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate(0, 0);
        let b = generate(0, 0);
        assert_eq!(a.connectivity().len(), 192);
        assert_eq!(a.connectivity(), b.connectivity());
        assert_eq!(a.spawns, b.spawns);
        assert_eq!(a.border, b.border);
    }

    #[test]
    fn test_generation_ignores_prior_rng_state() {
        let settings = Settings::default();
        let mut rng = MazeRng::new(0);
        let first = MazeSegment::generate(SegmentCoord::new(3, -2), &settings, &mut rng);
        for _ in 0..17 {
            rng.random();
        }
        let again = MazeSegment::generate(SegmentCoord::new(3, -2), &settings, &mut rng);
        assert_eq!(first, again);
    }

    #[test]
    fn test_borders_in_range() {
        for sy in -3..3 {
            for sx in -3..3 {
                let b = generate(sx, sy).border;
                for v in [b.left, b.top, b.right, b.bottom] {
                    assert!((1..=6).contains(&v), "border {v} out of range");
                }
            }
        }
    }

    #[test]
    fn test_neighbours_share_border_parameters() {
        let seg = generate(2, -1);
        assert_eq!(seg.border.right, generate(3, -1).border.left);
        assert_eq!(seg.border.bottom, generate(2, 0).border.top);
    }

    #[test]
    fn test_spanning_traces_are_connected() {
        for sy in -4..4 {
            for sx in -4..4 {
                let seg = generate(sx, sy);
                let b = seg.border;
                let from_top = reachable(&seg, (b.top, 0));
                assert!(from_top.contains(&(b.bottom, 7)), "({sx}, {sy}) top-bottom");
                let from_left = reachable(&seg, (0, b.left));
                assert!(from_left.contains(&(7, b.right)), "({sx}, {sy}) left-right");
            }
        }
    }

    #[test]
    fn test_exit_edges_are_open() {
        let seg = generate(-2, 5);
        let b = seg.border;
        assert!(seg.connected(b.bottom, 7, b.bottom, 8));
        assert!(seg.connected(7, b.right, 8, b.right));
    }

    #[test]
    fn test_spawns_use_distinct_candidates() {
        for sx in -5..5 {
            let seg = generate(sx, 2 * sx);
            let candidates = seg.spawn_candidates();
            assert!(seg.spawns.len() <= candidates.len());

            let mut used = HashSet::new();
            for spawn in &seg.spawns {
                assert!(candidates.contains(&(spawn.cell, spawn.edge)));
                assert!(used.insert((spawn.cell, spawn.edge)), "candidate reused");
            }
        }
    }

    #[test]
    fn test_required_kinds_placed() {
        let settings = Settings::default();
        let seg = generate(0, 0);
        for kind in &settings.spawn_table.tier(seg.tier).required {
            assert!(seg.spawns.iter().any(|s| s.kind == *kind));
        }
    }

    #[test]
    fn test_zero_density_places_only_required() {
        let settings = Settings {
            spawn_density: 0.0,
            ..Settings::default()
        };
        let mut rng = MazeRng::new(0);
        let seg = MazeSegment::generate(SegmentCoord::new(1, 1), &settings, &mut rng);
        let required = settings.spawn_table.tier(seg.tier).required.len();
        assert_eq!(seg.spawns.len(), required);
    }

    #[test]
    fn test_set_edge_round_trip() {
        let mut seg = MazeSegment::blank(SegmentCoord::new(0, 0), 8);
        assert!(!seg.connected(4, 4, 3, 3));
        seg.connect(3, 3, 4, 4);
        assert!(seg.connected(4, 4, 3, 3));
        seg.set_edge(4, 4, 3, 3, false);
        assert!(!seg.connected(3, 3, 4, 4));
    }

    #[test]
    #[should_panic(expected = "not owned")]
    fn test_foreign_edge_panics() {
        let seg = MazeSegment::blank(SegmentCoord::new(0, 0), 8);
        seg.connected(8, 0, 9, 0);
    }

    #[test]
    fn test_containing_handles_negatives() {
        assert_eq!(SegmentCoord::containing(-1, 0, 8), SegmentCoord::new(-1, 0));
        assert_eq!(SegmentCoord::containing(8, -9, 8), SegmentCoord::new(1, -2));
        assert_eq!(SegmentCoord::new(1, 2).id(), 1 + 2 * 65536);
    }

    #[test]
    fn test_display_shape() {
        let text = generate(0, 0).to_string();
        assert_eq!(text.lines().count(), 16);
        assert!(text.contains('o'));
    }
}
