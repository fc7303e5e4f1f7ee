use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::game::GameResult;

/// Win/loss/tie counters from the human's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scores {
    pub wins: u64,
    pub losses: u64,
    pub ties: u64,
}

impl Scores {
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Tie => self.ties += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.wins + self.losses + self.ties
    }
}

/// Configuration for the score file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoresConfig {
    pub path: PathBuf,
}

impl Default for ScoresConfig {
    fn default() -> Self {
        ScoresConfig {
            path: PathBuf::from("scores.json"),
        }
    }
}

/// Scores kept in a JSON file, loaded once and rewritten after every game.
#[derive(Debug)]
pub struct ScoreStore {
    path: PathBuf,
    scores: Scores,
}

impl ScoreStore {
    /// Load scores from `path`. A missing or unreadable file starts from zero.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = Self::read(&path).unwrap_or_else(|e| {
            warn!("{e}; starting from zero");
            Scores::default()
        });
        ScoreStore { path, scores }
    }

    /// Read scores from `path`. A missing file is all zeros.
    pub fn read(path: &Path) -> Result<Scores, ScoreError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Scores::default()),
            Err(e) => {
                return Err(ScoreError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&json).map_err(|e| ScoreError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Count a finished game and write the file. The in-memory count is kept
    /// even if the write fails.
    pub fn record(&mut self, result: GameResult) -> Result<(), ScoreError> {
        self.scores.record(result);
        self.save()
    }

    /// Write the scores via a temporary file and rename.
    pub fn save(&self) -> Result<(), ScoreError> {
        let write_err = |source| ScoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(&self.scores)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json).map_err(write_err)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_zeros() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::load(dir.path().join("scores.json"));
        assert_eq!(store.scores(), Scores::default());
    }

    #[test]
    fn test_record_updates_the_right_counter() {
        let mut scores = Scores::default();
        scores.record(GameResult::Win);
        scores.record(GameResult::Loss);
        scores.record(GameResult::Loss);
        scores.record(GameResult::Tie);
        assert_eq!(
            scores,
            Scores {
                wins: 1,
                losses: 2,
                ties: 1
            }
        );
        assert_eq!(scores.total(), 4);
    }

    #[test]
    fn test_record_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let mut store = ScoreStore::load(&path);
        store.record(GameResult::Win).unwrap();
        store.record(GameResult::Tie).unwrap();

        let reloaded = ScoreStore::load(&path);
        assert_eq!(reloaded.scores().wins, 1);
        assert_eq!(reloaded.scores().ties, 1);
        assert_eq!(reloaded.scores().losses, 0);
        assert!(!dir.path().join("nested").join("scores.json.tmp").exists());
    }

    #[test]
    fn test_file_format_matches_counter_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        let mut store = ScoreStore::load(&path);
        store.record(GameResult::Loss).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["wins"], 0);
        assert_eq!(value["losses"], 1);
        assert_eq!(value["ties"], 0);
    }

    #[test]
    fn test_corrupt_file_loads_zeros() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ScoreStore::read(&path),
            Err(ScoreError::Parse { .. })
        ));
        assert_eq!(ScoreStore::load(&path).scores(), Scores::default());
    }

    #[test]
    fn test_partial_file_fills_missing_counters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, r#"{"wins": 4}"#).unwrap();
        let scores = ScoreStore::read(&path).unwrap();
        assert_eq!(scores.wins, 4);
        assert_eq!(scores.losses, 0);
    }

    #[test]
    fn test_write_failure_is_reported_but_counted() {
        let dir = tempfile::tempdir().unwrap();
        // The score path is a directory, so the rename fails.
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let mut store = ScoreStore::load(&path);
        let err = store.record(GameResult::Win).unwrap_err();
        assert!(matches!(err, ScoreError::Write { .. }), "got {err}");
        assert_eq!(store.scores().wins, 1);
        assert!(!dir.path().join("taken.tmp").exists());
    }
}
