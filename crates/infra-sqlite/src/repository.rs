// Generic SQLite BaseRepository Implementation

use crate::error::map_sqlx_error;
use crate::named_params::ParsedSql;
use crate::params::SqlParameters;
use crate::row_mapper::RowMapper;
use async_trait::async_trait;
use giftstore_core::domain::Entity;
use giftstore_core::error::{AppError, Result};
use giftstore_core::port::{BaseRepository, Queries, QueryProvider, TimeProvider};
use serde::Serialize;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::SqlitePool;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Statement set parsed once at bootstrap
#[derive(Debug, Clone)]
struct Statements {
    insert_one: ParsedSql,
    update_one: ParsedSql,
    select_all: ParsedSql,
    select_one: ParsedSql,
    delete_one: ParsedSql,
}

impl Statements {
    fn parse(entity: &str, queries: &Queries) -> Result<Self> {
        for (name, sql) in queries.statements() {
            if sql.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "Statement '{}' of entity '{}' is empty",
                    name, entity
                )));
            }
        }

        let statements = Self {
            insert_one: ParsedSql::parse(&queries.insert_one),
            update_one: ParsedSql::parse(&queries.update_one),
            select_all: ParsedSql::parse(&queries.select_all),
            select_one: ParsedSql::parse(&queries.select_one),
            delete_one: ParsedSql::parse(&queries.delete_one),
        };

        let keyed = [
            ("update_one", &statements.update_one),
            ("select_one", &statements.select_one),
            ("delete_one", &statements.delete_one),
        ];
        for (name, statement) in keyed {
            if !statement.has_parameter(ID_PARAM) {
                return Err(AppError::Config(format!(
                    "Statement '{}' of entity '{}' must reference :{}",
                    name, entity, ID_PARAM
                )));
            }
        }

        Ok(statements)
    }
}

/// Parameter name the key is bound under
const ID_PARAM: &str = "id";

/// CRUD repository for any [`Entity`], driven by a statement set looked up
/// from a [`QueryProvider`] when the repository is bootstrapped.
///
/// Statement parameters are bound by name from the entity's serialized
/// fields; rows are turned back into entities by the row mapper.
pub struct SqliteRepository<T, M> {
    pool: SqlitePool,
    row_mapper: M,
    statements: Statements,
    time_provider: Arc<dyn TimeProvider>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, M> SqliteRepository<T, M>
where
    T: Entity + Serialize,
    M: RowMapper<T>,
{
    /// Look up and parse the entity's statement set
    pub fn bootstrap(
        pool: SqlitePool,
        row_mapper: M,
        query_provider: &dyn QueryProvider,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        let started = Instant::now();
        let queries = query_provider.build_queries(&T::META)?;
        let statements = Statements::parse(T::META.name, &queries)?;

        info!(
            "Bootstrapped {} repository in {} milliseconds",
            T::META.name,
            started.elapsed().as_millis()
        );

        Ok(Self {
            pool,
            row_mapper,
            statements,
            time_provider,
            _entity: PhantomData,
        })
    }

    async fn execute(
        &self,
        statement: &ParsedSql,
        params: &SqlParameters,
    ) -> Result<SqliteQueryResult> {
        let args = params.to_arguments(statement)?;
        sqlx::query_with(statement.sql(), args)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn fetch_all(&self, statement: &ParsedSql, params: &SqlParameters) -> Result<Vec<T>> {
        let args = params.to_arguments(statement)?;
        let rows = sqlx::query_with(statement.sql(), args)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(|row| self.row_mapper.map_row(row)).collect()
    }

    async fn fetch_optional(
        &self,
        statement: &ParsedSql,
        params: &SqlParameters,
    ) -> Result<Option<T>> {
        let args = params.to_arguments(statement)?;
        let row = sqlx::query_with(statement.sql(), args)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(|r| self.row_mapper.map_row(&r)).transpose()
    }
}

#[async_trait]
impl<T, M> BaseRepository<T> for SqliteRepository<T, M>
where
    T: Entity + Serialize,
    M: RowMapper<T>,
{
    async fn create(&self, mut entity: T) -> Result<T> {
        if let Some(auditable) = entity.auditable() {
            auditable.on_create(self.time_provider.now());
        }

        let params = SqlParameters::from_entity(&entity)?;
        let result = self.execute(&self.statements.insert_one, &params).await?;

        let id = T::Id::from(result.last_insert_rowid());
        entity.set_id(id);
        debug!(entity = T::META.name, %id, "Inserted row");
        Ok(entity)
    }

    async fn update(&self, mut entity: T) -> Result<T> {
        if let Some(auditable) = entity.auditable() {
            auditable.on_update(self.time_provider.now());
        }

        let params = SqlParameters::from_entity(&entity)?;
        match self
            .execute(&self.statements.update_one, &params)
            .await?
            .rows_affected()
        {
            1 => Ok(entity),
            actual => Err(AppError::UnexpectedRowCount {
                expected: 1,
                actual,
            }),
        }
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        self.fetch_all(&self.statements.select_all, &SqlParameters::new())
            .await
    }

    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>> {
        let key: i64 = id.into();
        let params = SqlParameters::single(ID_PARAM, key);
        self.fetch_optional(&self.statements.select_one, &params)
            .await
    }

    async fn delete_by_id(&self, id: T::Id) -> Result<()> {
        let key: i64 = id.into();
        let params = SqlParameters::single(ID_PARAM, key);
        let deleted = self
            .execute(&self.statements.delete_one, &params)
            .await?
            .rows_affected();
        debug!(entity = T::META.name, %id, deleted, "Deleted rows");
        Ok(())
    }
}
