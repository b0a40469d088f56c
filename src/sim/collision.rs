//! Movement against maze walls
//!
//! Walls are plain line segments rebuilt by every `Maze::draw`. A move is
//! rejected when the path crosses a wall or the probe circle at the
//! destination touches one. X and Y are tried separately so entities slide
//! along walls instead of sticking.

use glam::Vec2;

use crate::maze::WallLine;

/// Result of a resolved move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

/// Closest point on segment `a..b` to `p`
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let line_vec = b - a;
    let line_len_sq = line_vec.length_squared();
    if line_len_sq < 0.0001 {
        return a; // Degenerate segment
    }
    let t = ((p - a).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    a + line_vec * t
}

/// Whether a circle overlaps a wall
#[inline]
pub fn circle_segment_hit(center: Vec2, radius: f32, wall: &WallLine) -> bool {
    (center - closest_point_on_segment(center, wall.a, wall.b)).length_squared() < radius * radius
}

#[inline]
fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Proper or touching intersection of segments `p0..p1` and `q0..q1`
pub fn segments_intersect(p0: Vec2, p1: Vec2, q0: Vec2, q1: Vec2) -> bool {
    let r = p1 - p0;
    let s = q1 - q0;
    let denom = cross(r, s);
    let qp = q0 - p0;

    if denom.abs() < 1e-9 {
        // Parallel: only collinear overlap counts
        if cross(qp, r).abs() > 1e-6 {
            return false;
        }
        let len_sq = r.length_squared();
        if len_sq < 1e-9 {
            return false;
        }
        let t0 = qp.dot(r) / len_sq;
        let t1 = (q1 - p0).dot(r) / len_sq;
        return t0.min(t1) <= 1.0 && t0.max(t1) >= 0.0;
    }

    let t = cross(qp, s) / denom;
    let u = cross(qp, r) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Whether moving a probe from `from` to `to` hits any wall
pub fn move_blocked(from: Vec2, to: Vec2, radius: f32, walls: &[WallLine]) -> bool {
    walls
        .iter()
        .any(|w| segments_intersect(from, to, w.a, w.b) || circle_segment_hit(to, radius, w))
}

/// Apply `delta` one axis at a time, dropping each axis move that hits a wall
pub fn resolve_move(pos: Vec2, delta: Vec2, radius: f32, walls: &[WallLine]) -> MoveResult {
    let mut result = MoveResult {
        pos,
        blocked_x: false,
        blocked_y: false,
    };

    if delta.x != 0.0 {
        let target = result.pos + Vec2::new(delta.x, 0.0);
        if move_blocked(result.pos, target, radius, walls) {
            result.blocked_x = true;
        } else {
            result.pos = target;
        }
    }

    if delta.y != 0.0 {
        let target = result.pos + Vec2::new(0.0, delta.y);
        if move_blocked(result.pos, target, radius, walls) {
            result.blocked_y = true;
        } else {
            result.pos = target;
        }
    }

    result
}
