//! Lattice edges
//!
//! Every cell owns three edges toward higher coordinates: horizontal
//! `(x+1, y)`, vertical `(x, y+1)` and diagonal `(x+1, y+1)`. Any other
//! pairing is a caller bug and panics unconditionally, since neighbouring
//! segments are generated independently and must agree bit for bit.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Horizontal,
    Vertical,
    Diagonal,
}

impl EdgeKind {
    /// Storage order within a cell
    pub const ALL: [EdgeKind; 3] = [EdgeKind::Horizontal, EdgeKind::Vertical, EdgeKind::Diagonal];

    /// Slot of this edge in a cell's connectivity triple
    #[inline]
    pub fn index(self) -> usize {
        match self {
            EdgeKind::Horizontal => 0,
            EdgeKind::Vertical => 1,
            EdgeKind::Diagonal => 2,
        }
    }

    /// Step from the owning (lower) cell to the other endpoint
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            EdgeKind::Horizontal => (1, 0),
            EdgeKind::Vertical => (0, 1),
            EdgeKind::Diagonal => (1, 1),
        }
    }

    /// Midpoint relative to the owning cell (spawn position)
    #[inline]
    pub fn midpoint(self) -> (f32, f32) {
        match self {
            EdgeKind::Horizontal => (0.5, 0.0),
            EdgeKind::Vertical => (0.0, 0.5),
            EdgeKind::Diagonal => (0.5, 0.5),
        }
    }

    /// Classify an already-normalized step
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (1, 0) => Some(EdgeKind::Horizontal),
            (0, 1) => Some(EdgeKind::Vertical),
            (1, 1) => Some(EdgeKind::Diagonal),
            _ => None,
        }
    }

    /// Classify the pair in either order; `None` if not unit-adjacent
    pub fn between(x0: i32, y0: i32, x1: i32, y1: i32) -> Option<Self> {
        let ((lx, ly), (hx, hy)) = ascending((x0, y0), (x1, y1));
        Self::from_offset(hx - lx, hy - ly)
    }
}

#[inline]
fn ascending(a: (i32, i32), b: (i32, i32)) -> ((i32, i32), (i32, i32)) {
    if b < a { (b, a) } else { (a, b) }
}

/// Order the endpoints ascending and return the owning cell plus edge kind.
///
/// Panics if the cells are not unit-adjacent.
pub fn normalize_edge(x0: i32, y0: i32, x1: i32, y1: i32) -> (i32, i32, EdgeKind) {
    let ((lx, ly), (hx, hy)) = ascending((x0, y0), (x1, y1));
    match EdgeKind::from_offset(hx - lx, hy - ly) {
        Some(kind) => (lx, ly, kind),
        None => panic!("cells ({x0}, {y0}) and ({x1}, {y1}) are not unit-adjacent"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_order_independent() {
        assert_eq!(normalize_edge(3, 4, 4, 4), (3, 4, EdgeKind::Horizontal));
        assert_eq!(normalize_edge(4, 4, 3, 4), (3, 4, EdgeKind::Horizontal));
        assert_eq!(normalize_edge(2, 6, 2, 5), (2, 5, EdgeKind::Vertical));
        assert_eq!(normalize_edge(5, 5, 4, 4), (4, 4, EdgeKind::Diagonal));
        assert_eq!(normalize_edge(-1, -1, 0, 0), (-1, -1, EdgeKind::Diagonal));
    }

    #[test]
    fn test_between_rejects_anti_diagonal() {
        assert_eq!(EdgeKind::between(0, 1, 1, 0), None);
        assert_eq!(EdgeKind::between(0, 0, 2, 0), None);
        assert_eq!(EdgeKind::between(0, 0, 0, 0), None);
        assert_eq!(EdgeKind::between(1, 1, 0, 0), Some(EdgeKind::Diagonal));
    }

    #[test]
    #[should_panic(expected = "not unit-adjacent")]
    fn test_normalize_panics_on_long_edge() {
        normalize_edge(0, 0, 0, 2);
    }

    #[test]
    #[should_panic(expected = "not unit-adjacent")]
    fn test_normalize_panics_on_anti_diagonal() {
        normalize_edge(1, 0, 0, 1);
    }

    #[test]
    fn test_offsets_round_trip() {
        for kind in EdgeKind::ALL {
            let (dx, dy) = kind.offset();
            assert_eq!(EdgeKind::from_offset(dx, dy), Some(kind));
            assert_eq!(EdgeKind::ALL[kind.index()], kind);
        }
    }
}
