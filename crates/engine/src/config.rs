//! Engine and board configuration
//!
//! Both configs have sensible defaults and can be read from environment
//! variables. `from_env()` falls back to defaults on bad input;
//! `try_from_env()` reports it.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `ORB_CASCADE_ROWS` | 5 | board rows (at least 3) |
//! | `ORB_CASCADE_COLS` | 6 | board columns (at least 3) |
//! | `ORB_CASCADE_SEED` | 1 | seed of the uniform generator |
//! | `ORB_CASCADE_FILL` | `random` | `random` or `no-matches` |
//! | `ORB_CASCADE_MAX_COMBOS` | 1000 | stop a cascade after this many combos |

use std::str::FromStr;

use thiserror::Error;

use crate::types::{DEFAULT_COLS, DEFAULT_ROWS, MIN_DIMENSION};

pub const ENV_ROWS: &str = "ORB_CASCADE_ROWS";
pub const ENV_COLS: &str = "ORB_CASCADE_COLS";
pub const ENV_SEED: &str = "ORB_CASCADE_SEED";
pub const ENV_FILL: &str = "ORB_CASCADE_FILL";
pub const ENV_MAX_COMBOS: &str = "ORB_CASCADE_MAX_COMBOS";

/// Default runaway guard for a single cascade
pub const DEFAULT_MAX_COMBOS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: expected a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var}: board dimension must be at least {min}, got {value}")]
    DimensionTooSmall {
        var: &'static str,
        value: usize,
        min: usize,
    },
    #[error("{var}: must be at least 1")]
    ZeroLimit { var: &'static str },
    #[error("unknown fill policy {value:?} (expected \"random\" or \"no-matches\")")]
    InvalidFillPolicy { value: String },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidNumber { .. } => "invalid_number",
            ConfigError::DimensionTooSmall { .. } => "dimension_too_small",
            ConfigError::ZeroLimit { .. } => "zero_limit",
            ConfigError::InvalidFillPolicy { .. } => "invalid_fill_policy",
        }
    }
}

/// How a new board is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPolicy {
    /// Straight draws from the generator; the board may start with runs
    #[default]
    Random,
    /// Rerolls draws that would complete a run
    NoInitialMatches,
}

impl FillPolicy {
    /// Parse fill policy (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "random" => Some(FillPolicy::Random),
            "no-matches" | "no_matches" | "nomatches" => Some(FillPolicy::NoInitialMatches),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FillPolicy::Random => "random",
            FillPolicy::NoInitialMatches => "no-matches",
        }
    }
}

/// Cascade engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// A cascade stops after this many combos even if matches remain
    pub max_combos: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_combos: DEFAULT_MAX_COMBOS,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_default()
    }

    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test maps, ...)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(max) = parse_var::<u32, _>(&lookup, ENV_MAX_COMBOS)? {
            if max == 0 {
                return Err(ConfigError::ZeroLimit { var: ENV_MAX_COMBOS });
            }
            config.max_combos = max;
        }
        Ok(config)
    }
}

/// Board session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub seed: u32,
    pub fill_policy: FillPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: 1,
            fill_policy: FillPolicy::Random,
        }
    }
}

impl BoardConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_default()
    }

    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test maps, ...)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(rows) = parse_var(&lookup, ENV_ROWS)? {
            config.rows = rows;
        }
        if let Some(cols) = parse_var(&lookup, ENV_COLS)? {
            config.cols = cols;
        }
        if let Some(seed) = parse_var(&lookup, ENV_SEED)? {
            config.seed = seed;
        }
        if let Some(fill) = non_empty(&lookup, ENV_FILL) {
            config.fill_policy = FillPolicy::from_str(&fill)
                .ok_or(ConfigError::InvalidFillPolicy { value: fill })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check the minimum board size
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (var, value) in [(ENV_ROWS, self.rows), (ENV_COLS, self.cols)] {
            if value < MIN_DIMENSION {
                return Err(ConfigError::DimensionTooSmall {
                    var,
                    value,
                    min: MIN_DIMENSION,
                });
            }
        }
        Ok(())
    }
}

fn non_empty<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup, var) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}
