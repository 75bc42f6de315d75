pub mod matcher;
pub mod sequence;

use crate::models::training::{ QaPair, TrainingData };
use log::{ debug, info };
use std::fs;
use std::io::{ self, Write };
use std::path::{ Path, PathBuf };
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("Training data file {} is unreadable: {reason}", .path.display())]
    Corrupt {
        path: PathBuf,
        reason: String,
    },
    #[error("Failed to persist training data to {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Question/answer pairs kept in a single pretty-printed JSON file.
///
/// Every call goes back to disk, so edits made outside the process show up on
/// the next read. Load/modify/save cycles are not guarded: two writers racing
/// on the same file resolve as last-writer-wins.
#[derive(Clone, Debug)]
pub struct TrainingStore {
    path: PathBuf,
}

impl TrainingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty document when the file does not exist yet.
    pub fn ensure_exists(&self) -> Result<(), StoreError> {
        if !self.path.exists() {
            info!("Creating empty training data file at {}", self.path.display());
            self.save(&TrainingData::default())?;
        }
        Ok(())
    }

    pub fn load(&self) -> Result<TrainingData, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(TrainingData::default());
            }
            Err(e) => {
                return Err(StoreError::Corrupt {
                    path: self.path.clone(),
                    reason: e.to_string(),
                });
            }
        };

        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Replaces the file contents through a temp file and rename.
    pub fn save(&self, data: &TrainingData) -> Result<(), StoreError> {
        let persistence = |source: io::Error| StoreError::Persistence {
            path: self.path.clone(),
            source,
        };

        let json = serde_json
            ::to_string_pretty(data)
            .map_err(|e| persistence(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(persistence)?;
        tmp.write_all(json.as_bytes()).map_err(persistence)?;
        tmp.flush().map_err(persistence)?;
        tmp.persist(&self.path).map_err(|e| persistence(e.error))?;

        debug!("Saved {} trained pairs to {}", data.qa_pairs.len(), self.path.display());
        Ok(())
    }

    pub fn add(&self, question: &str, answer: &str) -> Result<u64, StoreError> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return Err(StoreError::Validation("Both question and answer are required".into()));
        }

        let mut data = self.load()?;
        let id = data.next_id();
        data.qa_pairs.push(QaPair {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
        });
        data.last_id = Some(id);
        self.save(&data)?;

        info!("Trained pair {} added: {:?}", id, question);
        Ok(id)
    }

    /// Drops every pair with `id`. Missing ids are not an error.
    pub fn remove(&self, id: u64) -> Result<(), StoreError> {
        let mut data = self.load()?;
        let before = data.qa_pairs.len();
        let high_water = data.next_id() - 1;
        data.qa_pairs.retain(|qa| qa.id != id);
        if high_water > 0 {
            data.last_id = Some(high_water);
        }
        self.save(&data)?;

        if data.qa_pairs.len() < before {
            info!("Trained pair {} removed", id);
        } else {
            debug!("Trained pair {} not found, nothing removed", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> TrainingStore {
        TrainingStore::new(dir.path().join("training_data.json"))
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let data = store_in(&dir).load().unwrap();
        assert!(data.qa_pairs.is_empty());
    }

    #[test]
    fn ensure_exists_writes_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.ensure_exists().unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "{\n  \"qa_pairs\": []\n}");
    }

    #[test]
    fn add_round_trips_and_ids_increase() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.add("Q", "A").unwrap(), 1);
        assert_eq!(store.add("  What is BNMIT ", " A college ").unwrap(), 2);

        let data = store.load().unwrap();
        assert_eq!(data.qa_pairs, vec![
            QaPair { id: 1, question: "Q".into(), answer: "A".into() },
            QaPair { id: 2, question: "What is BNMIT".into(), answer: "A college".into() }
        ]);
    }

    #[test]
    fn add_rejects_blank_fields() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(matches!(store.add("   ", "A"), Err(StoreError::Validation(_))));
        assert!(matches!(store.add("Q", ""), Err(StoreError::Validation(_))));
        assert!(!store.path().exists());
    }

    #[test]
    fn remove_deletes_only_the_matching_id() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add("first", "1").unwrap();
        store.add("second", "2").unwrap();

        store.remove(1).unwrap();
        let ids: Vec<u64> = store.load().unwrap().qa_pairs.iter().map(|qa| qa.id).collect();
        assert_eq!(ids, vec![2]);

        store.remove(42).unwrap();
        assert_eq!(store.load().unwrap().qa_pairs.len(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_deleting_the_highest() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add("first", "1").unwrap();
        let second = store.add("second", "2").unwrap();

        store.remove(second).unwrap();
        assert_eq!(store.add("third", "3").unwrap(), 3);

        store.remove(1).unwrap();
        store.remove(3).unwrap();
        assert_eq!(store.add("fourth", "4").unwrap(), 4);
    }

    #[test]
    fn legacy_file_without_high_water_mark_uses_max_id() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"qa_pairs": [{"id": 7, "question": "q", "answer": "a"}]}"#
        ).unwrap();

        assert_eq!(store.add("next", "n").unwrap(), 8);
    }

    #[test]
    fn malformed_file_is_reported_not_repaired() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
        assert!(matches!(store.add("q", "a"), Err(StoreError::Corrupt { .. })));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn save_into_missing_directory_fails_with_persistence_error() {
        let dir = TempDir::new().unwrap();
        let store = TrainingStore::new(dir.path().join("missing").join("training_data.json"));

        assert!(matches!(store.save(&TrainingData::default()), Err(StoreError::Persistence { .. })));
    }
}
