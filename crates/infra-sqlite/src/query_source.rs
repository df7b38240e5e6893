//! File-backed query source.
//!
//! A TOML file holds one table per entity name; each table may set any of
//! `insert_one`, `update_one`, `select_all`, `select_one` and `delete_one`.
//! Statements the file leaves out are generated from entity metadata.
//!
//! ```toml
//! [gift_certificate]
//! select_all = "SELECT * FROM gift_certificate ORDER BY name"
//! ```

use config::{Config, File, FileFormat};
use giftstore_core::application::GeneratedQueryProvider;
use giftstore_core::domain::EntityMeta;
use giftstore_core::error::{AppError, Result};
use giftstore_core::port::{Queries, QueryProvider};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Default, Clone, Deserialize)]
struct QueryOverrides {
    insert_one: Option<String>,
    update_one: Option<String>,
    select_all: Option<String>,
    select_one: Option<String>,
    delete_one: Option<String>,
}

impl QueryOverrides {
    /// All five statements, if the file supplies every one of them
    fn complete(&self) -> Option<Queries> {
        Some(Queries {
            insert_one: self.insert_one.clone()?,
            update_one: self.update_one.clone()?,
            select_all: self.select_all.clone()?,
            select_one: self.select_one.clone()?,
            delete_one: self.delete_one.clone()?,
        })
    }

    fn apply_to(&self, mut queries: Queries) -> Queries {
        let overrides = [
            (&self.insert_one, &mut queries.insert_one),
            (&self.update_one, &mut queries.update_one),
            (&self.select_all, &mut queries.select_all),
            (&self.select_one, &mut queries.select_one),
            (&self.delete_one, &mut queries.delete_one),
        ];
        for (source, target) in overrides {
            if let Some(sql) = source {
                *target = sql.clone();
            }
        }
        queries
    }
}

/// Query provider reading statement sets from a TOML file
#[derive(Debug, Clone)]
pub struct FileQueryProvider {
    entries: HashMap<String, QueryOverrides>,
    fallback: GeneratedQueryProvider,
}

impl FileQueryProvider {
    /// Load statement sets from `path` (must exist)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()
            .map_err(|e| {
                AppError::Config(format!("Failed to read queries from {}: {}", path.display(), e))
            })?;

        let provider = Self::from_config(settings)?;
        info!(
            path = %path.display(),
            entities = provider.entries.len(),
            "Loaded query overrides"
        );
        Ok(provider)
    }

    /// Parse statement sets from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .map_err(|e| AppError::Config(format!("Invalid query source: {}", e)))?;
        Self::from_config(settings)
    }

    fn from_config(settings: Config) -> Result<Self> {
        let entries: HashMap<String, QueryOverrides> = settings
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Invalid query source: {}", e)))?;

        Ok(Self {
            entries,
            fallback: GeneratedQueryProvider::new(),
        })
    }

    /// Entity names the source has entries for
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl QueryProvider for FileQueryProvider {
    fn build_queries(&self, meta: &EntityMeta) -> Result<Queries> {
        let Some(overrides) = self.entries.get(meta.name) else {
            debug!(entity = meta.name, "No query overrides, generating statements");
            return self.fallback.build_queries(meta);
        };

        if let Some(queries) = overrides.complete() {
            return Ok(queries);
        }

        let generated = self.fallback.build_queries(meta)?;
        Ok(overrides.apply_to(generated))
    }
}
