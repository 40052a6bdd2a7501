use crate::consts;
use crate::highscores::{HighScores, LoadError, SaveError};
use ratatui::layout::Size;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Board size & speed to use when not overridden on the command line
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("flipsnake").join("config.toml"))
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

    /// Return the filepath at which high scores should be stored: the file
    /// given in the configuration or, if that is not set, the default high
    /// scores file path.  Return `None` if no path is present in the
    /// configuration and the default path could not be computed.
    fn high_scores_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .high_scores_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| HighScores::default_path().map(Cow::from))
    }

    /// Load high scores from a file.  If the file does not exist or
    /// `self.files.save_high_scores` is `false`, an empty set of high scores
    /// is returned.
    pub(crate) fn load_high_scores(&self) -> Result<HighScores, LoadError> {
        if !self.files.save_high_scores {
            Ok(HighScores::default())
        } else if let Some(p) = self.high_scores_file() {
            HighScores::load(&p)
        } else {
            Err(LoadError::no_path())
        }
    }

    /// Save the given high scores to a file.
    ///
    /// If `self.files.save_high_scores` is `false`, nothing is saved.
    pub(crate) fn save_high_scores(&self, high_scores: &HighScores) -> Result<(), SaveError> {
        if !self.files.save_high_scores {
            return Ok(());
        }
        if let Some(p) = self.high_scores_file() {
            high_scores.save(&p)
        } else {
            Err(SaveError::no_path())
        }
    }
}

/// Default gameplay settings
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    /// Default size of the board in cells
    pub(crate) board_size: Size,

    /// Initial time between movements of the snake
    pub(crate) tick_period: Duration,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            board_size: Size::new(consts::DEFAULT_COLUMNS, consts::DEFAULT_LINES),
            tick_period: consts::TICK_PERIOD,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameConfig {
    lines: u16,
    columns: u16,
    tick_ms: u64,
}

impl Default for RawGameConfig {
    fn default() -> RawGameConfig {
        RawGameConfig {
            lines: consts::DEFAULT_LINES,
            columns: consts::DEFAULT_COLUMNS,
            tick_ms: 100,
        }
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameConfigError;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, GameConfigError> {
        if value.lines < consts::MIN_LINES {
            return Err(GameConfigError::TooFewLines(value.lines));
        }
        if value.columns < consts::MIN_COLUMNS {
            return Err(GameConfigError::TooFewColumns(value.columns));
        }
        let tick_period = Duration::from_millis(value.tick_ms);
        if !(consts::MIN_TICK_PERIOD..=consts::MAX_TICK_PERIOD).contains(&tick_period) {
            return Err(GameConfigError::TickOutOfRange(value.tick_ms));
        }
        Ok(GameConfig {
            board_size: Size::new(value.columns, value.lines),
            tick_period,
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GameConfigError {
    #[error("board must have at least {min} lines, got {0}", min = consts::MIN_LINES)]
    TooFewLines(u16),
    #[error("board must have at least {min} columns, got {0}", min = consts::MIN_COLUMNS)]
    TooFewColumns(u16),
    #[error(
        "tick-ms must be between {min} and {max}, got {0}",
        min = consts::MIN_TICK_PERIOD.as_millis(),
        max = consts::MAX_TICK_PERIOD.as_millis()
    )]
    TickOutOfRange(u64),
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which high scores should be stored
    pub(crate) high_scores_file: Option<PathBuf>,

    /// Whether to load & save high scores in a file
    pub(crate) save_high_scores: bool,

    /// Path to which diagnostic logs should be written
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_scores_file: None,
            save_high_scores: true,
            log_file: None,
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::num::NonZeroU32;

    #[test]
    fn load_missing_allowed() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cfg = Config::load(&tmpdir.path().join("config.toml"), true).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_missing_not_allowed() {
        let tmpdir = tempfile::tempdir().unwrap();
        let r = Config::load(&tmpdir.path().join("config.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))));
    }

    #[test]
    fn load_empty() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "").unwrap();
        assert_eq!(Config::load(&path, false).unwrap(), Config::default());
    }

    #[test]
    fn load_full() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(
            &path,
            concat!(
                "[game]\n",
                "lines = 20\n",
                "columns = 30\n",
                "tick-ms = 250\n",
                "\n",
                "[files]\n",
                "high-scores-file = \"/tmp/scores.json\"\n",
                "save-high-scores = false\n",
                "log-file = \"/tmp/flipsnake.log\"\n",
            ),
        )
        .unwrap();
        let cfg = Config::load(&path, false).unwrap();
        assert_eq!(
            cfg,
            Config {
                game: GameConfig {
                    board_size: Size::new(30, 20),
                    tick_period: Duration::from_millis(250),
                },
                files: FileConfig {
                    high_scores_file: Some(PathBuf::from("/tmp/scores.json")),
                    save_high_scores: false,
                    log_file: Some(PathBuf::from("/tmp/flipsnake.log")),
                },
            }
        );
    }

    #[test]
    fn load_partial_game() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[game]\ncolumns = 40\n").unwrap();
        let cfg = Config::load(&path, false).unwrap();
        assert_eq!(cfg.game.board_size, Size::new(40, 15));
        assert_eq!(cfg.game.tick_period, consts::TICK_PERIOD);
        assert_eq!(cfg.files, FileConfig::default());
    }

    #[test]
    fn load_board_too_small() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[game]\nlines = 3\n").unwrap();
        let r = Config::load(&path, false);
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn game_config_validation() {
        let raw = RawGameConfig {
            tick_ms: 5,
            ..RawGameConfig::default()
        };
        assert_eq!(
            GameConfig::try_from(raw),
            Err(GameConfigError::TickOutOfRange(5))
        );
        let raw = RawGameConfig {
            columns: 14,
            ..RawGameConfig::default()
        };
        assert_eq!(
            GameConfig::try_from(raw).unwrap_err().to_string(),
            "board must have at least 15 columns, got 14"
        );
        assert_eq!(
            GameConfig::try_from(RawGameConfig::default()),
            Ok(GameConfig::default())
        );
    }

    #[test]
    fn high_scores_round_trip() {
        let tmpdir = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.files.high_scores_file = Some(tmpdir.path().join("hs.json"));
        assert_eq!(cfg.load_high_scores().unwrap(), HighScores::default());
        let mut scores = HighScores::default();
        scores.set(Size::new(15, 15), NonZeroU32::new(9).unwrap());
        cfg.save_high_scores(&scores).unwrap();
        assert_eq!(cfg.load_high_scores().unwrap(), scores);
    }

    #[test]
    fn high_scores_disabled() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("hs.json");
        let mut cfg = Config::default();
        cfg.files.high_scores_file = Some(path.clone());
        cfg.files.save_high_scores = false;
        let mut scores = HighScores::default();
        scores.set(Size::new(15, 15), NonZeroU32::new(9).unwrap());
        cfg.save_high_scores(&scores).unwrap();
        assert!(!path.exists());
        fs_err::write(&path, r#"[{"lines":15,"columns":15,"score":4}]"#).unwrap();
        assert_eq!(cfg.load_high_scores().unwrap(), HighScores::default());
    }
}
