// Query Provider Port (Interface)

use crate::domain::EntityMeta;
use crate::error::Result;

/// Statement set of one entity type.
///
/// Statements use `:name` named parameters; `select_one`, `update_one` and
/// `delete_one` take the key as `:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queries {
    pub insert_one: String,
    pub update_one: String,
    pub select_all: String,
    pub select_one: String,
    pub delete_one: String,
}

impl Queries {
    /// Statements paired with their names, for diagnostics
    pub fn statements(&self) -> [(&'static str, &str); 5] {
        [
            ("insert_one", &self.insert_one),
            ("update_one", &self.update_one),
            ("select_all", &self.select_all),
            ("select_one", &self.select_one),
            ("delete_one", &self.delete_one),
        ]
    }
}

/// Source of per-entity statement sets
pub trait QueryProvider: Send + Sync {
    /// Build the statement set for the given entity type
    fn build_queries(&self, meta: &EntityMeta) -> Result<Queries>;
}
