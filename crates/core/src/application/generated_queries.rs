//! Statement sets derived from entity metadata.
//!
//! Used directly when no external query source is configured, and as the
//! fallback for statements an external source leaves out.

use crate::domain::EntityMeta;
use crate::error::{AppError, Result};
use crate::port::{Queries, QueryProvider};
use tracing::debug;

/// Builds standard single-row CRUD statements from [`EntityMeta`]
#[derive(Debug, Default, Clone, Copy)]
pub struct GeneratedQueryProvider;

impl GeneratedQueryProvider {
    pub fn new() -> Self {
        Self
    }
}

impl QueryProvider for GeneratedQueryProvider {
    fn build_queries(&self, meta: &EntityMeta) -> Result<Queries> {
        validate_meta(meta)?;

        let table = meta.table;
        let id = meta.id_column;
        let columns = meta.columns.join(", ");
        let placeholders = meta
            .columns
            .iter()
            .map(|c| format!(":{}", c))
            .collect::<Vec<_>>()
            .join(", ");
        let assignments = meta
            .columns
            .iter()
            .map(|c| format!("{} = :{}", c, c))
            .collect::<Vec<_>>()
            .join(", ");

        let queries = Queries {
            insert_one: format!("INSERT INTO {} ({}) VALUES ({})", table, columns, placeholders),
            update_one: format!("UPDATE {} SET {} WHERE {} = :id", table, assignments, id),
            select_all: format!("SELECT {}, {} FROM {} ORDER BY {}", id, columns, table, id),
            select_one: format!("SELECT {}, {} FROM {} WHERE {} = :id", id, columns, table, id),
            delete_one: format!("DELETE FROM {} WHERE {} = :id", table, id),
        };

        debug!(entity = meta.name, "Generated statement set");
        Ok(queries)
    }
}

fn validate_meta(meta: &EntityMeta) -> Result<()> {
    if meta.columns.is_empty() {
        return Err(AppError::Config(format!(
            "Entity '{}' declares no columns",
            meta.name
        )));
    }

    let identifiers = std::iter::once(meta.table)
        .chain(std::iter::once(meta.id_column))
        .chain(meta.columns.iter().copied());

    for ident in identifiers {
        if !is_identifier(ident) {
            return Err(AppError::Config(format!(
                "Entity '{}' has invalid SQL identifier '{}'",
                meta.name, ident
            )));
        }
    }
    Ok(())
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
