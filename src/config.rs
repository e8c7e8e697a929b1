//! Configuration of the ranking service
//!
//! Values come from TOML, with defaults for anything left out, and can be overridden from the
//! environment.

use std::path::Path;

use serde::Deserialize;

use crate::domain::TieBreak;

/// Environment variable overriding [`RankingConfig::tie_break`]
pub const TIE_BREAK_ENV: &str = "RANKING_TIE_BREAK";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankingConfig {
    /// Ordering of players with equal points
    pub tie_break: TieBreak,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },
}

impl RankingConfig {
    pub fn from_toml(input: &str) -> Result<Self, Error> {
        let config = toml::from_str(input)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml(&input)
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Result<Self, Error> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        if let Some(value) = lookup(TIE_BREAK_ENV) {
            self.tie_break = parse_tie_break(&value)?;
        }
        Ok(self)
    }
}

fn parse_tie_break(value: &str) -> Result<TieBreak, Error> {
    match value.trim().to_lowercase().as_str() {
        "last_name" => Ok(TieBreak::LastName),
        "store_order" => Ok(TieBreak::StoreOrder),
        _ => Err(Error::InvalidValue {
            name: TIE_BREAK_ENV,
            value: value.to_string(),
        }),
    }
}
