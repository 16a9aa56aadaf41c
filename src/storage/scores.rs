use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use tracing::{debug, warn};

use super::kv::KeyValueStore;
use crate::game::Difficulty;

/// Key holding the JSON array of score entries
pub const SCORES_KEY: &str = "scores";

/// Number of entries kept after every `record`
pub const MAX_ENTRIES: usize = 10;

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// `None` for entries written without a known difficulty
    #[serde(serialize_with = "serialize_difficulty")]
    pub difficulty: Option<Difficulty>,
    /// RFC 3339 timestamp of when the run ended
    #[serde(rename = "date")]
    pub timestamp: Option<String>,
}

fn serialize_difficulty<S: Serializer>(
    difficulty: &Option<Difficulty>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(difficulty.map(|d| d.as_str()).unwrap_or("-"))
}

impl ScoreEntry {
    /// Uppercase difficulty label, `-` when unknown
    pub fn badge(&self) -> String {
        self.difficulty
            .map(|d| d.as_str().to_uppercase())
            .unwrap_or_else(|| "-".to_string())
    }

    /// Lenient decode: bare numbers and partial objects are accepted,
    /// anything without a usable score is dropped.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self {
                score: score_from_number(n)?,
                difficulty: None,
                timestamp: None,
            }),
            Value::Object(map) => {
                let score = match map.get("score")? {
                    Value::Number(n) => score_from_number(n)?,
                    _ => return None,
                };
                let difficulty = map
                    .get("difficulty")
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse().ok());
                let timestamp = map.get("date").and_then(Value::as_str).map(str::to_string);
                Some(Self {
                    score,
                    difficulty,
                    timestamp,
                })
            }
            _ => None,
        }
    }
}

fn score_from_number(n: &Number) -> Option<u32> {
    if let Some(v) = n.as_u64() {
        return Some(v.min(u32::MAX as u64) as u32);
    }
    n.as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0)
        .map(|f| f.min(u32::MAX as f64) as u32)
}

/// Result of asking for the leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopScores<'a> {
    /// Nothing has been recorded yet
    Empty,
    Entries(&'a [ScoreEntry]),
}

/// Top-N leaderboard kept under [`SCORES_KEY`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreStore {
    entries: Vec<ScoreEntry>,
}

impl ScoreStore {
    /// Read the leaderboard; missing or malformed data loads as empty
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(SCORES_KEY) else {
            return Self::default();
        };

        let mut entries: Vec<ScoreEntry> = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items.iter().filter_map(ScoreEntry::from_value).collect(),
            Ok(_) => {
                warn!("stored scores are not an array, ignoring them");
                Vec::new()
            }
            Err(err) => {
                warn!(%err, "stored scores are not valid JSON, ignoring them");
                Vec::new()
            }
        };

        sort_descending(&mut entries);
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    /// Record a finished run stamped with the current time.
    ///
    /// Returns the entry's 0-based rank, or `None` if it did not make the cut.
    pub fn record(
        &mut self,
        store: &mut dyn KeyValueStore,
        score: u32,
        difficulty: Option<Difficulty>,
    ) -> Option<usize> {
        self.record_at(store, score, difficulty, Utc::now())
    }

    pub fn record_at(
        &mut self,
        store: &mut dyn KeyValueStore,
        score: u32,
        difficulty: Option<Difficulty>,
        at: DateTime<Utc>,
    ) -> Option<usize> {
        self.entries.push(ScoreEntry {
            score,
            difficulty,
            timestamp: Some(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        });
        sort_descending(&mut self.entries);

        // Stable sort keeps the new entry behind earlier equal scores.
        let rank = self.entries.iter().filter(|e| e.score >= score).count() - 1;
        self.entries.truncate(MAX_ENTRIES);
        self.save(store);

        debug!(score, rank, "score recorded");
        (rank < MAX_ENTRIES).then_some(rank)
    }

    fn save(&self, store: &mut dyn KeyValueStore) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "failed to encode scores");
                return;
            }
        };
        if let Err(err) = store.set(SCORES_KEY, &json) {
            warn!(%err, "failed to persist scores, keeping them in memory");
        }
    }

    /// The first `n` entries, best first
    pub fn top_n(&self, n: usize) -> TopScores<'_> {
        if self.entries.is_empty() {
            return TopScores::Empty;
        }
        TopScores::Entries(&self.entries[..n.min(self.entries.len())])
    }

    /// Highest recorded score, 0 when empty
    pub fn best(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }
}

fn sort_descending(entries: &mut [ScoreEntry]) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_empty_store_has_no_scores() {
        let store = MemoryStore::new();
        let scores = ScoreStore::load(&store);

        assert_eq!(scores.top_n(5), TopScores::Empty);
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn test_record_sorts_descending_and_persists() {
        let mut store = MemoryStore::new();
        let mut scores = ScoreStore::load(&store);

        scores.record_at(&mut store, 4, Some(Difficulty::Easy), at(0));
        scores.record_at(&mut store, 9, Some(Difficulty::Hard), at(1));
        scores.record_at(&mut store, 6, None, at(2));

        let values: Vec<u32> = scores.entries().iter().map(|e| e.score).collect();
        assert_eq!(values, vec![9, 6, 4]);
        assert_eq!(scores.best(), 9);

        let reloaded = ScoreStore::load(&store);
        assert_eq!(reloaded, scores);
    }

    #[test]
    fn test_record_caps_at_ten_entries() {
        let mut store = MemoryStore::new();
        let mut scores = ScoreStore::default();

        for (i, score) in [3, 17, 0, 8, 8, 21, 5, 13, 2, 30, 11, 1, 9, 40].iter().enumerate() {
            scores.record_at(&mut store, *score, Some(Difficulty::Medium), at(i as i64));
            assert!(scores.entries().len() <= MAX_ENTRIES);
            assert!(scores.entries().windows(2).all(|w| w[0].score >= w[1].score));
        }

        let values: Vec<u32> = scores.entries().iter().map(|e| e.score).collect();
        assert_eq!(values, vec![40, 30, 21, 17, 13, 11, 9, 8, 8, 5]);
        assert_eq!(ScoreStore::load(&store).entries().len(), MAX_ENTRIES);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut store = MemoryStore::new();
        let mut scores = ScoreStore::default();

        scores.record_at(&mut store, 5, Some(Difficulty::Easy), at(0));
        let rank = scores.record_at(&mut store, 5, Some(Difficulty::Hard), at(1));

        assert_eq!(rank, Some(1));
        assert_eq!(scores.entries()[0].difficulty, Some(Difficulty::Easy));
        assert_eq!(scores.entries()[1].difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn test_rank_outside_cut_is_none() {
        let mut store = MemoryStore::new();
        let mut scores = ScoreStore::default();
        for i in 0..MAX_ENTRIES {
            scores.record_at(&mut store, 10, None, at(i as i64));
        }

        assert_eq!(scores.record_at(&mut store, 10, None, at(99)), None);
        assert_eq!(scores.record_at(&mut store, 11, None, at(100)), Some(0));
    }

    #[test]
    fn test_top_n_slices() {
        let mut store = MemoryStore::new();
        let mut scores = ScoreStore::default();
        for s in [1, 2, 3] {
            scores.record_at(&mut store, s, None, at(s as i64));
        }

        match scores.top_n(5) {
            TopScores::Entries(entries) => assert_eq!(entries.len(), 3),
            TopScores::Empty => panic!("expected entries"),
        }
        match scores.top_n(2) {
            TopScores::Entries(entries) => {
                assert_eq!(entries[0].score, 3);
                assert_eq!(entries[1].score, 2);
                assert_eq!(entries.len(), 2);
            }
            TopScores::Empty => panic!("expected entries"),
        }
    }

    #[test]
    fn test_persisted_format() {
        let mut store = MemoryStore::new();
        let mut scores = ScoreStore::default();
        scores.record_at(&mut store, 12, Some(Difficulty::Hard), at(0));
        scores.record_at(&mut store, 3, None, at(1));

        let raw = store.get(SCORES_KEY).unwrap();
        assert_eq!(
            raw,
            r#"[{"score":12,"difficulty":"hard","date":"2023-11-14T22:13:20.000Z"},{"score":3,"difficulty":"-","date":"2023-11-14T22:13:21.000Z"}]"#
        );
    }

    #[test]
    fn test_corrupt_or_non_array_data_loads_empty() {
        for raw in ["{oops", "{\"score\": 3}", "42", "null"] {
            let store = MemoryStore::new().with_value(SCORES_KEY, raw);
            assert_eq!(ScoreStore::load(&store).top_n(5), TopScores::Empty, "{raw}");
        }
    }

    #[test]
    fn test_legacy_and_partial_entries() {
        let raw = r#"[7, {"score": 12, "difficulty": "easy"}, {"score": "x"}, "junk",
                     {"score": 3, "difficulty": "impossible", "date": "2024-01-01T00:00:00.000Z"}]"#;
        let store = MemoryStore::new().with_value(SCORES_KEY, raw);
        let scores = ScoreStore::load(&store);

        let entries = scores.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].score, 12);
        assert_eq!(entries[0].badge(), "EASY");
        assert_eq!(entries[1].score, 7);
        assert_eq!(entries[1].difficulty, None);
        assert_eq!(entries[1].badge(), "-");
        assert_eq!(entries[2].difficulty, None);
        assert_eq!(entries[2].timestamp.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_write_failure_keeps_scores_in_memory() {
        let mut store = MemoryStore::read_only();
        let mut scores = ScoreStore::default();

        assert_eq!(scores.record(&mut store, 5, Some(Difficulty::Easy)), Some(0));
        assert_eq!(scores.best(), 5);
        assert_eq!(store.get(SCORES_KEY), None);
    }
}
