// Tag Entity

use super::entity::{Entity, EntityMeta};
use super::error::{validate_name, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag ID (database rowid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(i64);

impl From<i64> for TagId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<TagId> for i64 {
    fn from(id: TagId) -> Self {
        id.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Option<TagId>,
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name("tag name", &name)?;
        Ok(Self { id: None, name })
    }
}

impl Entity for Tag {
    type Id = TagId;

    const META: EntityMeta = EntityMeta {
        name: "tag",
        table: "tag",
        id_column: "id",
        columns: &["name"],
    };

    fn id(&self) -> Option<Self::Id> {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = Some(id);
    }
}
