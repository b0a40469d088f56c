//! Best score record
//!
//! A single best run (segments explored) persisted as JSON next to the
//! game. Anything unreadable is treated as "no record yet".

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreEntry {
    pub score: u64,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub best: Option<BestScoreEntry>,
}

impl BestScore {
    pub fn new() -> Self {
        Self { best: None }
    }

    /// Whether `score` would replace the current record
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        self.best.map(|b| score > b.score).unwrap_or(true)
    }

    /// Store `score` if it beats the record; returns whether it did
    pub fn record(&mut self, score: u64, timestamp: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = Some(BestScoreEntry { score, timestamp });
        true
    }

    pub fn top_score(&self) -> Option<u64> {
        self.best.map(|b| b.score)
    }

    pub fn load(path: &Path) -> Self {
        let loaded = fs::read_to_string(path)
            .map_err(crate::Error::from)
            .and_then(|json| serde_json::from_str::<BestScore>(&json).map_err(crate::Error::from));

        match loaded {
            Ok(scores) => {
                log::info!("Loaded best score {:?}", scores.top_score());
                scores
            }
            Err(e) => {
                log::info!("No best score at {} ({e}), starting fresh", path.display());
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> crate::Result<()> {
        fs::write(path, serde_json::to_string(self)?)?;
        log::info!("Best score saved ({:?})", self.top_score());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_nonzero_score_qualifies() {
        let scores = BestScore::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_record_only_improvements() {
        let mut scores = BestScore::new();
        assert!(scores.record(5, 100));
        assert!(!scores.record(5, 200));
        assert!(!scores.record(3, 300));
        assert!(scores.record(9, 400));
        assert_eq!(
            scores.best,
            Some(BestScoreEntry {
                score: 9,
                timestamp: 400
            })
        );
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("sharkbait_best_{}.json", std::process::id()));
        let mut scores = BestScore::new();
        scores.record(12, 34);
        scores.save(&path).expect("save best score");
        assert_eq!(BestScore::load(&path), scores);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let scores = BestScore::load(Path::new("no/such/best.json"));
        assert_eq!(scores.top_score(), None);
    }
}
