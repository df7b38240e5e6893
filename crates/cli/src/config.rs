// Application configuration: defaults < giftstore.toml < GIFTSTORE__* env

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_URL: &str = "sqlite://~/.giftstore/giftstore.db";
const DEFAULT_CONFIG_NAME: &str = "giftstore";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    /// TOML file with per-entity statement overrides
    pub queries_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub format: LoggingFormat,
    pub filter: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoggingFormat {
    Json,
    Pretty,
    Compact,
}

impl AppConfig {
    /// Load configuration. An explicit `path` must exist; otherwise
    /// `./giftstore.toml` is read when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        Config::builder()
            .set_default("database.url", DEFAULT_DB_URL)?
            .set_default("database.max_connections", 5)?
            .set_default("logging.format", "compact")?
            .set_default("logging.filter", "giftstore=info")?
            .add_source(file)
            .add_source(Environment::with_prefix("GIFTSTORE").separator("__"))
            .build()?
            .try_deserialize()
    }
}

impl DatabaseConfig {
    /// Database url with `~` expanded
    pub fn expanded_url(&self) -> String {
        shellexpand::tilde(&self.url).into_owned()
    }

    /// Filesystem path of a file-backed database
    pub fn file_path(&self) -> Option<PathBuf> {
        let url = self.expanded_url();
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))?;
        let path = path.split('?').next().unwrap_or(path);
        if path.is_empty() || path.starts_with(":memory:") {
            return None;
        }
        Some(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "queries_file = \"queries.toml\"").unwrap();
        writeln!(file, "[database]").unwrap();
        writeln!(file, "url = \"sqlite::memory:\"").unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "format = \"json\"").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.format, LoggingFormat::Json);
        assert_eq!(config.logging.filter, "giftstore=info");
        assert_eq!(config.queries_file, Some(PathBuf::from("queries.toml")));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/giftstore.toml"))).is_err());
    }

    #[test]
    fn test_file_path() {
        let db = DatabaseConfig {
            url: "sqlite:///var/lib/giftstore/store.db?mode=rwc".to_string(),
            max_connections: 1,
        };
        assert_eq!(
            db.file_path(),
            Some(PathBuf::from("/var/lib/giftstore/store.db"))
        );

        let memory = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        assert_eq!(memory.file_path(), None);
    }
}
