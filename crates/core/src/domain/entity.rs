// Entity contract shared by every persisted type

use chrono::{DateTime, Utc};
use std::fmt;

/// Static persistence metadata of an entity type.
///
/// `columns` lists every persisted column except the id column, in the order
/// generated statements use them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMeta {
    /// Logical entity name, the key query sources are looked up by
    pub name: &'static str,
    pub table: &'static str,
    pub id_column: &'static str,
    pub columns: &'static [&'static str],
}

/// A persisted entity with a database-generated key.
///
/// Repositories bind statement parameters from the entity's serialized
/// fields, so field names must match the named parameters of its queries.
pub trait Entity: Send + Sync + Unpin + 'static {
    /// Typed key, generated by the database on insert
    type Id: Copy + Send + Sync + fmt::Debug + fmt::Display + From<i64> + Into<i64>;

    const META: EntityMeta;

    fn id(&self) -> Option<Self::Id>;

    fn set_id(&mut self, id: Self::Id);

    /// Audit hooks, if the entity tracks its own timestamps
    fn auditable(&mut self) -> Option<&mut dyn Auditable> {
        None
    }
}

/// Entities stamping creation and modification times before they are written
pub trait Auditable {
    fn on_create(&mut self, now: DateTime<Utc>);

    fn on_update(&mut self, now: DateTime<Utc>);
}
