//! MemoryStore — a single JSON document on disk holding the latest CV.
//!
//! `save` replaces the whole document. Callers that touch one key must
//! read-modify-write the full map (see `remember_cv`) or other keys are lost.
//! There is no locking: one process, one writer.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::career::ingest::CvRecord;

pub const LATEST_CV_KEY: &str = "latest_cv";

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Memory file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Memory file {path} is not a JSON object: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

#[derive(Debug, Clone)]
pub struct MemoryStore {
    path: PathBuf,
}

impl MemoryStore {
    /// Opens the store, creating the file as `{}` if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, MemoryError> {
        let store = Self { path: path.into() };
        if !store.path.exists() {
            store.save(&Map::new())?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Map<String, Value>, MemoryError> {
        let raw = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(self.corrupt(format!("found {}", json_kind(&other)))),
            Err(e) => Err(self.corrupt(e.to_string())),
        }
    }

    /// Overwrites the whole document via a sibling temp file renamed over the target.
    pub fn save(&self, memory: &Map<String, Value>) -> Result<(), MemoryError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let body = serde_json::to_string_pretty(memory)
            .map_err(|e| self.corrupt(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(body.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| MemoryError::Io(e.error))?;

        debug!("Saved memory document with {} keys to {}", memory.len(), self.path.display());
        Ok(())
    }

    /// Stores `cv` under `latest_cv`, keeping every other key.
    pub fn remember_cv(&self, cv: &CvRecord) -> Result<(), MemoryError> {
        let mut memory = self.load()?;
        let value = serde_json::to_value(cv).map_err(|e| self.corrupt(e.to_string()))?;
        memory.insert(LATEST_CV_KEY.to_string(), value);
        self.save(&memory)
    }

    pub fn latest_cv(&self) -> Result<Option<CvRecord>, MemoryError> {
        let memory = self.load()?;
        memory
            .get(LATEST_CV_KEY)
            .cloned()
            .map(serde_json::from_value::<CvRecord>)
            .transpose()
            .map_err(|e| self.corrupt(format!("invalid {LATEST_CV_KEY}: {e}")))
    }

    fn corrupt(&self, reason: String) -> MemoryError {
        MemoryError::Corrupt {
            path: self.path.clone(),
            reason,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
