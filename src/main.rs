//! Sharkbait headless runner
//!
//! Builds the maze from optional settings, drives the player through a
//! scripted route and records the best exploration score.
//!
//! Usage: `sharkbait [settings.json]`
//! (`SHARKBAIT_BEST_SCORE` overrides where the best score is kept)

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use sharkbait::consts::SIM_DT;
use sharkbait::sim::{GameState, TickInput, tick};
use sharkbait::{BestScore, Settings};

/// Scripted route: (impulse, seconds)
const ROUTE: [(Vec2, f32); 6] = [
    (Vec2::new(1.0, 0.0), 6.0),
    (Vec2::new(1.0, 1.0), 4.0),
    (Vec2::new(0.0, 1.0), 4.0),
    (Vec2::new(-1.0, 0.0), 4.0),
    (Vec2::new(1.0, -1.0), 4.0),
    (Vec2::new(1.0, 0.0), 6.0),
];

fn main() {
    env_logger::init();
    log::info!("Sharkbait (headless) starting...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());

    let mut state = match GameState::new(settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start: {e}");
            std::process::exit(1);
        }
    };

    println!("Origin segment:\n{}", state.maze.get_segment(0, 0));

    for (impulse, seconds) in ROUTE {
        let input = TickInput { impulse };
        let ticks = (seconds / SIM_DT).round() as u32;
        for _ in 0..ticks {
            tick(&mut state, &input, SIM_DT);
        }
        log::info!(
            "Leg {:?} done: player at {:?}, {} segments explored",
            impulse,
            state.player.pos,
            state.score()
        );
    }

    println!(
        "Explored {} segments, met {} enemies, {} segments generated, {} wall lines in view",
        state.score(),
        state.enemy_count(),
        state.maze.segment_count(),
        state.maze.collision().len()
    );

    for (kind, count) in state.enemy_census() {
        if count > 0 {
            println!("  {:<11} {count}", kind.as_str());
        }
    }

    let best_path = std::env::var_os("SHARKBAIT_BEST_SCORE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sharkbait_best.json"));
    record_best(&best_path, state.score());
}

fn record_best(path: &Path, score: u64) {
    let mut best = BestScore::load(path);
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    if best.record(score, now) {
        println!("New best: {score}");
        if let Err(e) = best.save(path) {
            log::warn!("Could not save best score: {e}");
        }
    } else if let Some(top) = best.top_score() {
        println!("Best so far: {top}");
    }
}
