use std::str::FromStr;

use thiserror::Error;

use crate::news::ArticleNumber;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SEED_ARTICLES: ArticleNumber = 1000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Number of generated articles the store starts with. Bounded by the
    /// article number range.
    pub seed_articles: ArticleNumber,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed_articles: DEFAULT_SEED_ARTICLES,
        }
    }
}

impl ServerConfig {
    /// Reads `NEWS_HOST`, `NEWS_PORT` and `NEWS_SEED_ARTICLES`, loading a
    /// `.env` file first if one exists. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("NEWS_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "NEWS_PORT")?.unwrap_or(defaults.port),
            seed_articles: parse_var(&lookup, "NEWS_SEED_ARTICLES")?
                .unwrap_or(defaults.seed_articles),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key, value })
        })
        .transpose()
}
