//! Enemy spawns and the data-driven tier tables
//!
//! Tiers grow with distance from the world origin; each tier lists the
//! kinds that must appear at least once and a weighted pool for the rest.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::edge::EdgeKind;
use super::segment::SegmentCoord;
use crate::sim::MazeRng;

/// Enemy fish, roughly ordered by danger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Minnow,
    Guppy,
    Angelfish,
    Pufferfish,
    Eel,
    Jellyfish,
    Swordfish,
    Barracuda,
    Anglerfish,
    Shark,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 10] = [
        EnemyKind::Minnow,
        EnemyKind::Guppy,
        EnemyKind::Angelfish,
        EnemyKind::Pufferfish,
        EnemyKind::Eel,
        EnemyKind::Jellyfish,
        EnemyKind::Swordfish,
        EnemyKind::Barracuda,
        EnemyKind::Anglerfish,
        EnemyKind::Shark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Minnow => "minnow",
            EnemyKind::Guppy => "guppy",
            EnemyKind::Angelfish => "angelfish",
            EnemyKind::Pufferfish => "pufferfish",
            EnemyKind::Eel => "eel",
            EnemyKind::Jellyfish => "jellyfish",
            EnemyKind::Swordfish => "swordfish",
            EnemyKind::Barracuda => "barracuda",
            EnemyKind::Anglerfish => "anglerfish",
            EnemyKind::Shark => "shark",
        }
    }
}

/// One placed enemy, sitting on the midpoint of a connected edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub kind: EnemyKind,
    /// Owning cell, segment-local
    pub cell: (i32, i32),
    pub edge: EdgeKind,
}

impl Spawn {
    /// Position in segment-local lattice units
    pub fn local_pos(&self) -> Vec2 {
        let (mx, my) = self.edge.midpoint();
        Vec2::new(self.cell.0 as f32 + mx, self.cell.1 as f32 + my)
    }

    /// Position in global lattice units
    pub fn lattice_pos(&self, coord: SegmentCoord, seg_size: i32) -> Vec2 {
        let (ox, oy) = coord.origin(seg_size);
        self.local_pos() + Vec2::new(ox as f32, oy as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedKind {
    pub kind: EnemyKind,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTier {
    /// Placed once each before the budget fill
    #[serde(default)]
    pub required: Vec<EnemyKind>,
    pub weighted: Vec<WeightedKind>,
}

impl SpawnTier {
    fn new(required: &[EnemyKind], weighted: &[(EnemyKind, u32)]) -> Self {
        Self {
            required: required.to_vec(),
            weighted: weighted
                .iter()
                .map(|&(kind, weight)| WeightedKind { kind, weight })
                .collect(),
        }
    }

    pub fn total_weight(&self) -> u32 {
        self.weighted.iter().map(|w| w.weight).sum()
    }

    /// Weighted draw; consumes one `range` call
    pub fn pick(&self, rng: &mut MazeRng) -> EnemyKind {
        let mut roll = rng.range(self.total_weight());
        for entry in &self.weighted {
            if roll < entry.weight {
                return entry.kind;
            }
            roll -= entry.weight;
        }
        unreachable!("weighted roll past total weight")
    }
}

/// Tier index -> spawn distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTable {
    pub tiers: Vec<SpawnTier>,
}

impl Default for SpawnTable {
    fn default() -> Self {
        use EnemyKind::*;
        Self {
            tiers: vec![
                SpawnTier::new(&[Minnow], &[(Minnow, 6), (Guppy, 2)]),
                SpawnTier::new(&[Guppy], &[(Minnow, 4), (Guppy, 4), (Angelfish, 1)]),
                SpawnTier::new(
                    &[Angelfish],
                    &[(Minnow, 2), (Guppy, 4), (Angelfish, 3), (Pufferfish, 1)],
                ),
                SpawnTier::new(
                    &[Pufferfish],
                    &[(Guppy, 3), (Angelfish, 3), (Pufferfish, 2), (Eel, 1)],
                ),
                SpawnTier::new(
                    &[Eel],
                    &[(Angelfish, 2), (Pufferfish, 3), (Eel, 2), (Jellyfish, 1)],
                ),
                SpawnTier::new(
                    &[Jellyfish],
                    &[(Pufferfish, 2), (Eel, 3), (Jellyfish, 2), (Swordfish, 1)],
                ),
                SpawnTier::new(
                    &[Swordfish],
                    &[(Eel, 2), (Jellyfish, 3), (Swordfish, 2), (Barracuda, 1)],
                ),
                SpawnTier::new(
                    &[Barracuda],
                    &[(Jellyfish, 2), (Swordfish, 3), (Barracuda, 2), (Anglerfish, 1)],
                ),
                SpawnTier::new(
                    &[Anglerfish],
                    &[(Swordfish, 2), (Barracuda, 3), (Anglerfish, 2), (Shark, 1)],
                ),
                SpawnTier::new(
                    &[Anglerfish, Shark],
                    &[(Barracuda, 2), (Anglerfish, 3), (Shark, 3)],
                ),
            ],
        }
    }
}

impl SpawnTable {
    /// Single tier drawing uniformly from `kinds`, nothing required
    pub fn flat(kinds: &[EnemyKind]) -> Self {
        Self {
            tiers: vec![SpawnTier {
                required: Vec::new(),
                weighted: kinds
                    .iter()
                    .map(|&kind| WeightedKind { kind, weight: 1 })
                    .collect(),
            }],
        }
    }

    /// Tier entry, clamped to the last (hardest) tier
    pub fn tier(&self, tier: usize) -> &SpawnTier {
        &self.tiers[tier.min(self.tiers.len() - 1)]
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.tiers.is_empty() {
            return Err(crate::Error::invalid("spawn table has no tiers"));
        }
        if let Some(i) = self.tiers.iter().position(|t| t.total_weight() == 0) {
            return Err(crate::Error::invalid(format!(
                "spawn tier {i} has zero total weight"
            )));
        }
        Ok(())
    }
}

/// Difficulty tier of a segment (unclamped).
///
/// Distance is measured from the segment centre to the origin in the hex
/// projection, in segment widths, then bucketed in pairs.
pub fn tier_for(coord: SegmentCoord, seg_size: i32) -> usize {
    let size = seg_size as f32;
    let centre = Vec2::new(
        coord.x as f32 * size + size / 2.0,
        coord.y as f32 * size + size / 2.0,
    );
    let projected = Vec2::new(
        centre.x * (3.0f32.sqrt() / 2.0),
        centre.y - centre.x / 2.0,
    );
    let distance = projected.length() / size;
    (distance / 2.0).floor() as usize
}
