// Base Repository Port (Interface)

use crate::domain::Entity;
use crate::error::Result;
use async_trait::async_trait;

/// CRUD repository over a single entity type
#[async_trait]
pub trait BaseRepository<T: Entity>: Send + Sync {
    /// Insert a new entity, returning it with its generated id
    async fn create(&self, entity: T) -> Result<T>;

    /// Update an existing entity; exactly one row must be affected
    async fn update(&self, entity: T) -> Result<T>;

    /// Find all entities
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>>;

    /// Delete the entity if it has been persisted
    async fn delete(&self, entity: &T) -> Result<()> {
        match entity.id() {
            Some(id) => self.delete_by_id(id).await,
            None => Ok(()),
        }
    }

    /// Delete by ID (missing rows are ignored)
    async fn delete_by_id(&self, id: T::Id) -> Result<()>;
}
