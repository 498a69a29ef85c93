//! Per-level best scores, persisted as a small JSON file.
//!
//! ```
//! use conduit_store::Leaderboard;
//!
//! let mut board = Leaderboard::in_memory();
//! assert_eq!(board.record_score_at(0, "ada", 420, 12, 1_700_000_000), Some(1));
//! assert_eq!(board.record_score_at(0, "bob", 900, 15, 1_700_000_100), Some(1));
//! assert_eq!(board.best(0).map(|s| s.name.as_str()), Some("bob"));
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Entries kept per level.
pub const MAX_SCORES_PER_LEVEL: usize = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("leaderboard I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("leaderboard JSON error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelScore {
    pub name: String,
    pub score: u32,
    pub pipes_used: u32,
    /// Unix seconds.
    pub completed_at: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BoardFile {
    #[serde(default)]
    levels: BTreeMap<u32, Vec<LevelScore>>,
}

#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    path: Option<PathBuf>,
    levels: BTreeMap<u32, Vec<LevelScore>>,
}

impl Leaderboard {
    /// A board that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the board at `path`. A missing or unreadable-as-JSON file yields
    /// an empty board bound to that path; the next save overwrites it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = match fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no leaderboard yet");
                return Ok(Self {
                    path: Some(path),
                    levels: BTreeMap::new(),
                });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let mut levels = match serde_json::from_reader::<_, BoardFile>(BufReader::new(file)) {
            Ok(parsed) => parsed.levels,
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    %error,
                    "corrupt leaderboard, starting empty"
                );
                BTreeMap::new()
            }
        };
        for scores in levels.values_mut() {
            // Stable: equal scores keep their file order.
            scores.sort_by(|a, b| b.score.cmp(&a.score));
            scores.truncate(MAX_SCORES_PER_LEVEL);
        }
        levels.retain(|_, scores| !scores.is_empty());

        Ok(Self {
            path: Some(path),
            levels,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the board to its file. No-op for in-memory boards.
    pub fn save(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let file = fs::File::create(path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        let body = BoardFile {
            levels: self.levels.clone(),
        };
        serde_json::to_writer_pretty(&mut out, &body).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        out.flush().map_err(io_err)?;
        Ok(())
    }

    /// Record a finished level stamped with the current time.
    ///
    /// Returns the 1-based rank if the score made the table.
    pub fn record_score(
        &mut self,
        level: u32,
        name: &str,
        score: u32,
        pipes_used: u32,
    ) -> Option<usize> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.record_score_at(level, name, score, pipes_used, now)
    }

    pub fn record_score_at(
        &mut self,
        level: u32,
        name: &str,
        score: u32,
        pipes_used: u32,
        completed_at: u64,
    ) -> Option<usize> {
        let scores = self.levels.entry(level).or_default();
        // Insert after every entry with an equal or higher score.
        let idx = scores.partition_point(|s| s.score >= score);
        if idx >= MAX_SCORES_PER_LEVEL {
            tracing::debug!(level, score, "score below leaderboard cut");
            return None;
        }

        scores.insert(
            idx,
            LevelScore {
                name: name.to_owned(),
                score,
                pipes_used,
                completed_at,
            },
        );
        scores.truncate(MAX_SCORES_PER_LEVEL);
        tracing::info!(level, score, rank = idx + 1, "leaderboard entry recorded");
        Some(idx + 1)
    }

    /// Scores for `level`, best first.
    pub fn level_scores(&self, level: u32) -> &[LevelScore] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn best(&self, level: u32) -> Option<&LevelScore> {
        self.level_scores(level).first()
    }

    /// Number of levels with at least one recorded score.
    pub fn levels_completed(&self) -> usize {
        self.levels.values().filter(|s| !s.is_empty()).count()
    }

    /// Drop every score and persist the empty board.
    pub fn clear(&mut self) -> Result<()> {
        self.levels.clear();
        self.save()
    }
}
