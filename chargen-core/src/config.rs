//! Runtime configuration.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use thiserror::Error;

pub const ROSTER_PATH_VAR: &str = "CHARGEN_ROSTER_PATH";
pub const RNG_SEED_VAR: &str = "CHARGEN_RNG_SEED";
pub const LOG_VAR: &str = "CHARGEN_LOG";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("CHARGEN_RNG_SEED must be an unsigned integer, got \"{0}\"")]
    InvalidSeed(String),
}

/// Configuration for a character generator instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargenConfig {
    /// Where the roster is saved.
    pub roster_path: PathBuf,

    /// Fixed seed for ability score rolls. `None` seeds from entropy.
    pub rng_seed: Option<u64>,

    /// `tracing` filter directive, e.g. `"chargen_core=debug"`.
    pub log_filter: String,
}

impl Default for ChargenConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from("roster.json"),
            rng_seed: None,
            log_filter: "info".to_string(),
        }
    }
}

impl ChargenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(ROSTER_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.roster_path = PathBuf::from(path.trim());
        }
        if let Some(seed) = lookup(RNG_SEED_VAR).filter(|s| !s.trim().is_empty()) {
            let parsed = seed
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSeed(seed.clone()))?;
            config.rng_seed = Some(parsed);
        }
        if let Some(filter) = lookup(LOG_VAR).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter.trim().to_string();
        }

        Ok(config)
    }

    /// Set the roster file path.
    pub fn with_roster_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.roster_path = path.into();
        self
    }

    /// Fix the RNG seed.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Random source for ability score rolls.
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
