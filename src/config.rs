use crate::highscores::{HighScoreFile, HighScoreStorage, MemoryStore};
use crate::surface::Palette;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    /// Settings about diagnostic logging
    #[serde(default)]
    pub(crate) logging: LogConfig,

    /// Styles for drawing the board
    #[serde(default)]
    pub(crate) style: StyleConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the store in which the high score should be kept: the file
    /// given in the configuration or, if that is not set, the default high
    /// score file.
    ///
    /// If `self.files.save_high_score` is `false`, the high score is only kept
    /// in memory.
    pub(crate) fn high_score_storage(&self) -> HighScoreStorage {
        if !self.files.save_high_score {
            return HighScoreStorage::Memory(MemoryStore::new());
        }
        let path = self
            .files
            .high_score_file
            .clone()
            .or_else(HighScoreFile::default_path);
        HighScoreStorage::File(HighScoreFile::new(path))
    }

    pub(crate) fn palette(&self) -> Palette {
        let mut palette = Palette::default();
        if let Some(s) = self.style.snake {
            palette.snake = s.into();
        }
        if let Some(s) = self.style.head {
            palette.head = s.into();
        }
        if let Some(s) = self.style.food {
            palette.food = s.into();
        }
        palette
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    pub(crate) high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    pub(crate) save_high_score: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct LogConfig {
    /// File to append log messages to.  Nothing is logged if this is unset.
    pub(crate) file: Option<PathBuf>,

    /// `tracing-subscriber` filter directives
    pub(crate) filter: Option<String>,
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct StyleConfig {
    pub(crate) snake: Option<parse_style::Style>,
    pub(crate) head: Option<parse_style::Style>,
    pub(crate) food: Option<parse_style::Style>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
