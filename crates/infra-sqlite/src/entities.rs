// Row mappers and repository aliases for the store's entities

use crate::error::map_sqlx_error;
use crate::repository::SqliteRepository;
use crate::row_mapper::{FromRowMapper, RowMapper};
use chrono::{DateTime, Utc};
use giftstore_core::domain::{GiftCertificate, GiftCertificateId, Tag, TagId};
use giftstore_core::error::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

pub type SqliteGiftCertificateRepository =
    SqliteRepository<GiftCertificate, FromRowMapper<GiftCertificateRow>>;

pub type SqliteTagRepository = SqliteRepository<Tag, TagRowMapper>;

/// SQLite row representation of a gift certificate
#[derive(Debug, sqlx::FromRow)]
pub struct GiftCertificateRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: f64,
    duration: i32,
    create_date: Option<DateTime<Utc>>,
    last_update_date: Option<DateTime<Utc>>,
}

impl From<GiftCertificateRow> for GiftCertificate {
    fn from(row: GiftCertificateRow) -> Self {
        GiftCertificate {
            id: Some(GiftCertificateId::from(row.id)),
            name: row.name,
            description: row.description,
            price: row.price,
            duration: row.duration,
            create_date: row.create_date,
            last_update_date: row.last_update_date,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TagRowMapper;

impl RowMapper<Tag> for TagRowMapper {
    fn map_row(&self, row: &SqliteRow) -> Result<Tag> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;
        Ok(Tag {
            id: Some(TagId::from(id)),
            name,
        })
    }
}
