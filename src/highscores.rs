use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Somewhere the best score can be kept between runs of the program
pub(crate) trait HighScoreStore {
    /// Fetch the stored high score.  Returns `Ok(None)` if nothing has been
    /// stored yet.
    fn load(&mut self) -> Result<Option<u32>, LoadError>;

    fn save(&mut self, score: u32) -> Result<(), SaveError>;
}

/// A high score kept in a JSON file on disk
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScoreFile {
    /// `None` if no path was configured and the default path could not be
    /// determined
    path: Option<PathBuf>,
}

impl HighScoreFile {
    pub(crate) fn new(path: Option<PathBuf>) -> HighScoreFile {
        HighScoreFile { path }
    }

    /// Return the default high score file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join("highscore.json"))
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl HighScoreStore for HighScoreFile {
    fn load(&mut self) -> Result<Option<u32>, LoadError> {
        let path = self.path.as_deref().ok_or_else(LoadError::no_path)?;
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice::<HighScoreRecord>(&src)
            .map(|rec| Some(rec.high_score))
            .map_err(LoadError::deserialize)
    }

    fn save(&mut self, score: u32) -> Result<(), SaveError> {
        let path = self.path.as_deref().ok_or_else(SaveError::no_path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(&HighScoreRecord { high_score: score })
            .map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

/// On-disk layout of the high score file: `{"snakeHighScore": N}`
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct HighScoreRecord {
    #[serde(rename = "snakeHighScore")]
    high_score: u32,
}

/// A high score that only lives as long as the process
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore {
    score: Option<u32>,
    saves: usize,
}

impl MemoryStore {
    pub(crate) fn new() -> MemoryStore {
        MemoryStore::default()
    }

    #[cfg(test)]
    pub(crate) fn with_score(score: u32) -> MemoryStore {
        MemoryStore {
            score: Some(score),
            saves: 0,
        }
    }

    /// Number of times [`HighScoreStore::save()`] has been called
    #[cfg(test)]
    pub(crate) fn saves(&self) -> usize {
        self.saves
    }

    #[cfg(test)]
    pub(crate) fn score(&self) -> Option<u32> {
        self.score
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<Option<u32>, LoadError> {
        Ok(self.score)
    }

    fn save(&mut self, score: u32) -> Result<(), SaveError> {
        self.score = Some(score);
        self.saves += 1;
        Ok(())
    }
}

/// The store chosen by the configuration
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum HighScoreStorage {
    File(HighScoreFile),
    Memory(MemoryStore),
}

impl HighScoreStore for HighScoreStorage {
    fn load(&mut self) -> Result<Option<u32>, LoadError> {
        match self {
            HighScoreStorage::File(f) => f.load(),
            HighScoreStorage::Memory(m) => m.load(),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), SaveError> {
        match self {
            HighScoreStorage::File(f) => f.save(score),
            HighScoreStorage::Memory(m) => m.save(score),
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn no_path() -> Self {
        SaveError(SaveErrorSource::NoPath)
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high score")]
    Deserialize(#[source] serde_json::Error),
}
