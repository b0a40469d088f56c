//! Per-frame update
//!
//! Order matters: the maze is drawn for the current view first, so the
//! collision list the player moves against belongs to this frame.

use glam::Vec2;

use super::state::GameState;
use crate::maze::View;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steering direction, each axis in [-1, 1]
    pub impulse: Vec2,
}

/// Advance the game by one step of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let view = View::centered(state.player.pos, state.view_size);
    state.maze.draw(&view);

    let result = state.player.update(input.impulse, dt, state.maze.collision());
    if result.blocked_x || result.blocked_y {
        log::trace!(
            "Tick {}: player blocked (x: {}, y: {}) at {:?}",
            state.time_ticks,
            result.blocked_x,
            result.blocked_y,
            result.pos
        );
    }

    let segment = state.maze.segment_at_world(state.player.pos);
    if state.visited.insert(segment) {
        log::debug!(
            "Entered segment ({}, {}), {} explored",
            segment.x,
            segment.y,
            state.visited.len()
        );
    }

    state.time_ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;

    fn run(state: &mut GameState, inputs: &[Vec2], ticks_each: usize) {
        for impulse in inputs {
            let input = TickInput { impulse: *impulse };
            for _ in 0..ticks_each {
                tick(state, &input, SIM_DT);
            }
        }
    }

    #[test]
    fn test_tick_advances_time() {
        let mut state = GameState::new(Settings::default()).expect("valid settings");
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, 1);
        assert!(!state.maze.collision().is_empty());
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(-1.0, 0.5),
        ];
        let mut a = GameState::new(Settings::with_seed(99999)).expect("valid settings");
        let mut b = GameState::new(Settings::with_seed(99999)).expect("valid settings");
        run(&mut a, &inputs, 60);
        run(&mut b, &inputs, 60);

        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.visited, b.visited);
        assert_eq!(a.enemy_count(), b.enemy_count());
        assert_eq!(a.maze.segment_count(), b.maze.segment_count());
    }

    #[test]
    fn test_player_never_overlaps_walls() {
        let mut state = GameState::new(Settings::default()).expect("valid settings");
        let inputs = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
        ];
        for impulse in inputs {
            for _ in 0..45 {
                tick(&mut state, &TickInput { impulse }, SIM_DT);
                let pos = state.player.pos;
                let radius = state.player.radius;
                assert!(
                    !state
                        .maze
                        .collision()
                        .iter()
                        .any(|w| crate::sim::circle_segment_hit(pos, radius, w))
                );
            }
        }
    }
}
