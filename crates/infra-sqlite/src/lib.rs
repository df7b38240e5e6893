// Giftstore Infrastructure - SQLite Adapter
// Implements: BaseRepository (generic), QueryProvider (file-backed)

mod connection;
mod entities;
mod error;
mod migration;
mod named_params;
mod params;
mod query_source;
mod repository;
mod row_mapper;

pub use connection::{create_pool, DatabaseOptions};
pub use entities::{
    GiftCertificateRow, SqliteGiftCertificateRepository, SqliteTagRepository, TagRowMapper,
};
pub use error::map_sqlx_error;
pub use migration::run_migrations;
pub use named_params::ParsedSql;
pub use params::SqlParameters;
pub use query_source::FileQueryProvider;
pub use repository::SqliteRepository;
pub use row_mapper::{FromRowMapper, RowMapper};
