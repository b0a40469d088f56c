//! Maze tunables
//!
//! Every knob the generator and the wall derivation read. Loaded from a
//! JSON file; missing fields take the defaults from `consts`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::maze::{SpawnTable, TileMetrics};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Generation ===
    /// Segment edge length in cells
    pub seg_size: i32,
    /// Upper bound of extra random traces per segment
    pub max_rand_connections: u32,
    /// Seed every segment seed is offset from
    pub base_seed: u64,
    /// Fraction of edge midpoints that receive an enemy
    pub spawn_density: f32,
    /// Tier -> enemy distribution
    pub spawn_table: SpawnTable,

    // === Geometry ===
    pub tile: TileMetrics,
    /// Wall inset from corridor centre lines, as a fraction of an edge
    pub corridor_inset: f32,
    /// Extra cells drawn around the view
    pub view_padding: i32,
    /// Radius used when testing movement against walls (pixels)
    pub probe_radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seg_size: SEG_SIZE,
            max_rand_connections: MAX_RAND_CONNECTIONS,
            base_seed: BASE_SEED,
            spawn_density: SPAWN_DENSITY,
            spawn_table: SpawnTable::default(),

            tile: TileMetrics::default(),
            corridor_inset: CORRIDOR_INSET,
            view_padding: VIEW_PADDING,
            probe_radius: PROBE_RADIUS,
        }
    }
}

impl Settings {
    /// Default tunables with a different seed
    pub fn with_seed(base_seed: u64) -> Self {
        Self {
            base_seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(3..=MAX_SEG_SIZE).contains(&self.seg_size) {
            return Err(Error::invalid(format!(
                "seg_size must be within [3, {MAX_SEG_SIZE}], got {}",
                self.seg_size
            )));
        }
        if self.max_rand_connections > MAX_EXTRA_TRACES {
            return Err(Error::invalid(format!(
                "max_rand_connections must be at most {MAX_EXTRA_TRACES}, got {}",
                self.max_rand_connections
            )));
        }
        if !(0.0..=1.0).contains(&self.spawn_density) {
            return Err(Error::invalid(format!(
                "spawn_density must be within [0, 1], got {}",
                self.spawn_density
            )));
        }
        if self.tile.width <= 0.0 || self.tile.height <= 0.0 {
            return Err(Error::invalid("tile width and height must be positive"));
        }
        // Below 1/3 open halves grow an island; at 1/2 wedge walls vanish
        if !(1.0 / 3.0..0.5).contains(&self.corridor_inset) {
            return Err(Error::invalid(format!(
                "corridor_inset must be within [1/3, 1/2), got {}",
                self.corridor_inset
            )));
        }
        if self.view_padding < 0 || self.probe_radius < 0.0 {
            return Err(Error::invalid("view_padding and probe_radius must not be negative"));
        }
        self.spawn_table.validate()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Could not load settings from {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::EnemyKind;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.seg_size, 8);
        assert_eq!(settings.max_rand_connections, 3);
        assert_eq!(settings.base_seed, 3);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "base_seed": 99, "spawn_density": 0.5 }"#)
            .expect("partial settings parse");
        assert_eq!(settings.base_seed, 99);
        assert_eq!(settings.spawn_density, 0.5);
        assert_eq!(settings.seg_size, SEG_SIZE);
        assert_eq!(settings.spawn_table, SpawnTable::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::with_seed(17);
        settings.spawn_table = SpawnTable::flat(&[EnemyKind::Minnow, EnemyKind::Eel]);
        let json = serde_json::to_string(&settings).expect("serialize");
        assert_eq!(Settings::from_json(&json).expect("parse"), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            r#"{ "seg_size": 2 }"#,
            r#"{ "seg_size": 100000 }"#,
            r#"{ "max_rand_connections": 4294967295 }"#,
            r#"{ "max_rand_connections": 1025 }"#,
            r#"{ "spawn_density": 1.5 }"#,
            r#"{ "corridor_inset": 0.2 }"#,
            r#"{ "corridor_inset": 0.5 }"#,
            r#"{ "tile": { "width": 0.0, "height": 16.0, "skew": 0.0 } }"#,
            r#"{ "view_padding": -1 }"#,
            r#"{ "spawn_table": { "tiers": [] } }"#,
        ];
        for json in cases {
            assert!(
                matches!(Settings::from_json(json), Err(Error::InvalidSettings { .. })),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn test_largest_accepted_values_generate() {
        let settings = Settings::from_json(r#"{ "seg_size": 16, "max_rand_connections": 1024 }"#)
            .expect("upper bounds are accepted");
        let mut maze = crate::Maze::new(settings).expect("valid settings");
        assert_eq!(maze.get_segment(0, 0).size(), 16);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join("sharkbait_test_settings.json");
        let _ = fs::remove_file(&path);

        let mut settings = Settings::with_seed(4242);
        settings.spawn_density = 0.4;
        settings.save(&path).expect("save settings");
        assert_eq!(Settings::load(&path).expect("load settings"), settings);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        assert!(matches!(Settings::from_json("{ nope"), Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("definitely/not/here/settings.json");
        assert!(matches!(Settings::load(path), Err(Error::Io(_))));
        assert_eq!(Settings::load_or_default(Some(path)), Settings::default());
    }
}
