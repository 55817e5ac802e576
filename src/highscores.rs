//! High score leaderboard
//!
//! Persisted through a [`KeyValueStore`] as a JSON array of
//! `{"score", "time", "date"}` objects, keeps the top 5 scores.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::persistence::{KeyValueStore, StorageError, load_json, save_json};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the round
    pub score: u64,
    /// Round length in seconds
    #[serde(rename = "time")]
    pub elapsed_secs: f64,
    /// ISO-8601 timestamp of when the round ended
    #[serde(rename = "date")]
    pub recorded_at: String,
}

impl HighScoreEntry {
    pub fn new(score: u64, elapsed_secs: f64, recorded_at: impl Into<String>) -> Self {
        Self {
            score,
            elapsed_secs,
            recorded_at: recorded_at.into(),
        }
    }
}

/// High score leaderboard, always sorted descending by score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pixelPopLeaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Load the leaderboard, empty if absent or corrupt
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_json::<Vec<HighScoreEntry>, _>(store, Self::STORAGE_KEY) {
            Some(mut entries) => {
                // Stored data may have been edited by hand
                entries.sort_by(|a, b| b.score.cmp(&a.score));
                entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", entries.len());
                Self { entries }
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Persist the current entries
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        save_json(store, Self::STORAGE_KEY, &self.entries)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Add a score, keep the top entries and persist.
    /// Returns the rank achieved (1-indexed) or None if it didn't make the board.
    pub fn record<S: KeyValueStore + ?Sized>(
        &mut self,
        entry: HighScoreEntry,
        store: &mut S,
    ) -> Option<usize> {
        let rank = self.insert(entry);
        if let Err(e) = self.save(store) {
            log::warn!("Failed to save high scores: {e}");
        }
        rank
    }

    /// Remove every entry and persist the empty board
    pub fn clear<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) {
        self.entries.clear();
        match self.save(store) {
            Ok(()) => log::info!("High scores cleared"),
            Err(e) => log::warn!("Failed to save cleared high scores: {e}"),
        }
    }

    fn insert(&mut self, entry: HighScoreEntry) -> Option<usize> {
        // Insert after any equal scores so earlier rounds keep their place
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Entries, best first
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Format seconds as `m:ss`
pub fn format_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{mins}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    fn entry(score: u64) -> HighScoreEntry {
        HighScoreEntry::new(score, 12.5, "2026-01-01T00:00:00.000Z")
    }

    fn scores(board: &HighScores) -> Vec<u64> {
        board.entries().iter().map(|e| e.score).collect()
    }

    #[test]
    fn test_record_sorts_descending() {
        let mut store = MemoryStore::new();
        let mut board = HighScores::new();
        board.record(entry(500), &mut store);
        board.record(entry(1500), &mut store);
        board.record(entry(900), &mut store);
        assert_eq!(scores(&board), vec![1500, 900, 500]);

        let reloaded = HighScores::load(&store);
        assert_eq!(scores(&reloaded), vec![1500, 900, 500]);
    }

    #[test]
    fn test_record_returns_rank() {
        let mut store = MemoryStore::new();
        let mut board = HighScores::new();
        assert_eq!(board.record(entry(300), &mut store), Some(1));
        assert_eq!(board.record(entry(100), &mut store), Some(2));
        assert_eq!(board.record(entry(200), &mut store), Some(2));
        assert_eq!(board.top_score(), Some(300));
    }

    #[test]
    fn test_equal_scores_keep_earlier_first() {
        let mut store = MemoryStore::new();
        let mut board = HighScores::new();
        board.record(HighScoreEntry::new(100, 1.0, "first"), &mut store);
        board.record(HighScoreEntry::new(100, 2.0, "second"), &mut store);
        assert_eq!(board.entries()[0].recorded_at, "first");
        assert_eq!(board.entries()[1].recorded_at, "second");
    }

    #[test]
    fn test_truncates_to_five() {
        let mut store = MemoryStore::new();
        let mut board = HighScores::new();
        for s in [10, 60, 20, 50, 30, 40] {
            board.record(entry(s), &mut store);
        }
        assert_eq!(scores(&board), vec![60, 50, 40, 30, 20]);
        // Too low for a full board
        assert_eq!(board.record(entry(5), &mut store), None);
        assert_eq!(board.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_clear_persists_empty() {
        let mut store = MemoryStore::new();
        let mut board = HighScores::new();
        for s in 1..=6 {
            board.record(entry(s * 100), &mut store);
        }
        board.clear(&mut store);
        assert!(board.is_empty());
        assert_eq!(store.get(HighScores::STORAGE_KEY).as_deref(), Some("[]"));
        assert!(HighScores::load(&store).is_empty());
    }

    #[test]
    fn test_wire_format() {
        let mut store = MemoryStore::new();
        let mut board = HighScores::new();
        board.record(
            HighScoreEntry::new(144, 3.25, "2026-10-19T12:00:00.000Z"),
            &mut store,
        );
        assert_eq!(
            store.get(HighScores::STORAGE_KEY).as_deref(),
            Some(r#"[{"score":144,"time":3.25,"date":"2026-10-19T12:00:00.000Z"}]"#)
        );
    }

    #[test]
    fn test_load_corrupt_or_missing_is_empty() {
        let mut store = MemoryStore::new();
        assert!(HighScores::load(&store).is_empty());

        store.set(HighScores::STORAGE_KEY, "definitely not json").unwrap();
        assert!(HighScores::load(&store).is_empty());

        store
            .set(HighScores::STORAGE_KEY, r#"{"score": 5}"#)
            .unwrap();
        assert!(HighScores::load(&store).is_empty());
    }

    #[test]
    fn test_load_repairs_unsorted_data() {
        let mut store = MemoryStore::new();
        let json = r#"[
            {"score":1,"time":1.0,"date":"a"},
            {"score":7,"time":1.0,"date":"b"},
            {"score":3,"time":1.0,"date":"c"},
            {"score":9,"time":1.0,"date":"d"},
            {"score":2,"time":1.0,"date":"e"},
            {"score":8,"time":1.0,"date":"f"}
        ]"#;
        store.set(HighScores::STORAGE_KEY, json).unwrap();
        let board = HighScores::load(&store);
        assert_eq!(scores(&board), vec![9, 8, 7, 3, 2]);
    }

    #[test]
    fn test_record_survives_write_failure() {
        let mut store = MemoryStore::read_only();
        let mut board = HighScores::new();
        assert_eq!(board.record(entry(42), &mut store), Some(1));
        assert_eq!(board.top_score(), Some(42));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.99), "0:09");
        assert_eq!(format_time(75.4), "1:15");
        assert_eq!(format_time(600.0), "10:00");
    }

    proptest! {
        #[test]
        fn prop_board_bounded_and_sorted(inputs in proptest::collection::vec(0u64..100_000, 0..40)) {
            let mut store = MemoryStore::new();
            let mut board = HighScores::new();
            for s in inputs {
                board.record(entry(s), &mut store);
                prop_assert!(board.len() <= MAX_HIGH_SCORES);
                let sc = scores(&board);
                prop_assert!(sc.windows(2).all(|w| w[0] >= w[1]));
            }
        }
    }
}
