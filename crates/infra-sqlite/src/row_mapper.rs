// Row -> entity mapping

use crate::error::map_sqlx_error;
use giftstore_core::error::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;
use std::marker::PhantomData;

/// Maps one result row to an entity
pub trait RowMapper<T>: Send + Sync {
    fn map_row(&self, row: &SqliteRow) -> Result<T>;
}

/// Decodes rows through an intermediate `FromRow` struct, then converts it
pub struct FromRowMapper<R> {
    _row: PhantomData<fn() -> R>,
}

impl<R> FromRowMapper<R> {
    pub fn new() -> Self {
        Self { _row: PhantomData }
    }
}

impl<R> Default for FromRowMapper<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> RowMapper<T> for FromRowMapper<R>
where
    R: for<'r> FromRow<'r, SqliteRow> + Into<T>,
{
    fn map_row(&self, row: &SqliteRow) -> Result<T> {
        let decoded = R::from_row(row).map_err(map_sqlx_error)?;
        Ok(decoded.into())
    }
}
