//! Error types for startup (config, assets) and the game loop.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// A single problem found while reading the configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    /// Required key is absent.
    Missing { key: &'static str },
    /// Key is present but holds the wrong kind of value.
    Invalid {
        key: &'static str,
        expected: &'static str,
    },
}

impl ConfigProblem {
    pub fn key(&self) -> &'static str {
        match self {
            ConfigProblem::Missing { key } | ConfigProblem::Invalid { key, .. } => key,
        }
    }
}

impl fmt::Display for ConfigProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigProblem::Missing { key } => write!(f, "missing key `{}`", key),
            ConfigProblem::Invalid { key, expected } => {
                write!(f, "invalid value for `{}` (expected {})", key, expected)
            }
        }
    }
}

/// Fatal configuration error.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse(serde_json::Error),
    /// Every missing or malformed key, in lookup order.
    Invalid(Vec<ConfigProblem>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "config is not valid JSON: {}", e),
            ConfigError::Invalid(problems) => {
                write!(f, "config has {} problem(s):", problems.len())?;
                for p in problems {
                    write!(f, "\n  - {}", p)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Fatal asset loading error (sprites, fonts).
#[derive(Debug)]
pub enum AssetError {
    Io { path: PathBuf, source: io::Error },
    Empty { path: PathBuf },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io { path, source } => {
                write!(f, "cannot load asset {}: {}", path.display(), source)
            }
            AssetError::Empty { path } => write!(f, "asset {} is empty", path.display()),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io { source, .. } => Some(source),
            AssetError::Empty { .. } => None,
        }
    }
}

/// Errors that end the game loop.
#[derive(Debug)]
pub enum GameError {
    /// A stage was paused while another one was already held aside.
    StageSlotOccupied,
    /// Frame pacing, input polling or presentation failed.
    Platform(anyhow::Error),
    /// The level could not be written on shutdown.
    Persist(anyhow::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::StageSlotOccupied => write!(f, "a paused stage is already saved"),
            GameError::Platform(e) => write!(f, "platform failure: {:#}", e),
            GameError::Persist(e) => write!(f, "cannot save progress: {:#}", e),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_lists_every_problem() {
        let err = ConfigError::Invalid(vec![
            ConfigProblem::Missing { key: "screen.size" },
            ConfigProblem::Invalid {
                key: "control.interval",
                expected: "positive integer",
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("2 problem(s)"));
        assert!(text.contains("missing key `screen.size`"));
        assert!(text.contains("`control.interval` (expected positive integer)"));
    }

    #[test]
    fn problem_reports_its_key() {
        assert_eq!(ConfigProblem::Missing { key: "game.name" }.key(), "game.name");
    }
}
