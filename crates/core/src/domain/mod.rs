// Domain Layer - Entities and their persistence metadata

pub mod entity;
pub mod error;
pub mod gift_certificate;
pub mod tag;

// Re-exports
pub use entity::{Auditable, Entity, EntityMeta};
pub use error::DomainError;
pub use gift_certificate::{GiftCertificate, GiftCertificateId};
pub use tag::{Tag, TagId};
