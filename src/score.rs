//! Best-run record kept under the platform data directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::game::{GameState, GameStatus, StopReason};

const APP_DIR_NAME: &str = "pixel-snake";
const SCORE_FILE_NAME: &str = "best_run.json";

/// Failure to read or write the best-run record.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to read best run from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("corrupt best run record in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write best run to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct BestRun {
    pub length: usize,
    pub ticks: u64,
    pub reason: StopReason,
}

impl BestRun {
    /// Summarises a stopped session; running sessions have no result yet.
    #[must_use]
    pub fn from_state(state: &GameState) -> Option<Self> {
        match state.status() {
            GameStatus::Running => None,
            GameStatus::Stopped(reason) => Some(Self {
                length: state.snake().len(),
                ticks: state.tick_count(),
                reason,
            }),
        }
    }

    /// Longer snakes win; equal lengths go to the run that got there in fewer ticks.
    #[must_use]
    pub fn beats(&self, record: Option<&BestRun>) -> bool {
        match record {
            None => true,
            Some(record) => {
                self.length > record.length
                    || (self.length == record.length && self.ticks < record.ticks)
            }
        }
    }
}

/// Replaces `record` with the finished run in `state` if it beats it.
///
/// Returns the new record so the caller can persist it; `None` when the
/// session is still running or fell short.
pub fn update_record(record: &mut Option<BestRun>, state: &GameState) -> Option<BestRun> {
    let run = BestRun::from_state(state)?;
    if !run.beats(record.as_ref()) {
        return None;
    }
    *record = Some(run);
    Some(run)
}

/// JSON file holding at most one `BestRun`.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `<data_local_dir>/pixel-snake/best_run.json`.
    #[must_use]
    pub fn at_default_location() -> Self {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR_NAME);
        path.push(SCORE_FILE_NAME);
        Self::new(path)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored record, or `None` before the first finished run.
    pub fn load(&self) -> Result<Option<BestRun>, ScoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ScoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| ScoreError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Overwrites the record with `run`.
    pub fn save(&self, run: &BestRun) -> Result<(), ScoreError> {
        let write_error = |source| ScoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let json = serde_json::to_string_pretty(run).map_err(|source| ScoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(write_error)?;

        debug!(path = %self.path.display(), ?run, "saved best run");
        Ok(())
    }
}
