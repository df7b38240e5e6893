//! End-to-end CRUD through the generic repository on SQLite.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use giftstore_core::application::GeneratedQueryProvider;
use giftstore_core::domain::{GiftCertificate, Tag, TagId};
use giftstore_core::error::AppError;
use giftstore_core::port::time_provider::FixedTimeProvider;
use giftstore_core::port::BaseRepository;
use giftstore_infra_sqlite::{
    create_pool, run_migrations, DatabaseOptions, FromRowMapper, SqliteGiftCertificateRepository,
    SqliteTagRepository, TagRowMapper,
};
use sqlx::SqlitePool;
use tokio_test::assert_ok;

async fn setup_pool() -> SqlitePool {
    let pool = create_pool(&DatabaseOptions::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

#[tokio::test]
async fn test_certificate_full_lifecycle() {
    let pool = setup_pool().await;
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let repo = SqliteGiftCertificateRepository::bootstrap(
        pool.clone(),
        FromRowMapper::new(),
        &GeneratedQueryProvider,
        Arc::new(FixedTimeProvider(created_at)),
    )
    .unwrap();

    // Create
    let cert = GiftCertificate::new("Spa day", Some("Massage and sauna".into()), 99.5, 60).unwrap();
    let created = repo.create(cert).await.unwrap();
    let id = created.id.expect("generated id");
    assert_eq!(created.create_date, Some(created_at));
    assert_eq!(created.last_update_date, Some(created_at));

    // Read
    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found, created);

    // Update (new repository instance with a later clock)
    let updated_at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
    let later = SqliteGiftCertificateRepository::bootstrap(
        pool.clone(),
        FromRowMapper::new(),
        &GeneratedQueryProvider,
        Arc::new(FixedTimeProvider(updated_at)),
    )
    .unwrap();

    let mut changed = found;
    changed.price = 120.0;
    let updated = later.update(changed).await.unwrap();
    assert_eq!(updated.create_date, Some(created_at));
    assert_eq!(updated.last_update_date, Some(updated_at));

    let reloaded = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(reloaded.price, 120.0);
    assert_eq!(reloaded.last_update_date, Some(updated_at));

    // Delete
    assert_ok!(repo.delete(&reloaded).await);
    assert!(repo.find_by_id(id).await.unwrap().is_none());
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_all_returns_rows_in_id_order() {
    let pool = setup_pool().await;
    let repo = SqliteTagRepository::bootstrap(
        pool,
        TagRowMapper,
        &GeneratedQueryProvider,
        Arc::new(FixedTimeProvider(Utc::now())),
    )
    .unwrap();

    for name in ["travel", "food", "sport"] {
        repo.create(Tag::new(name).unwrap()).await.unwrap();
    }

    let names: Vec<String> = repo
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, ["travel", "food", "sport"]);
}

#[tokio::test]
async fn test_delete_missing_row_is_silent() {
    let pool = setup_pool().await;
    let repo = SqliteTagRepository::bootstrap(
        pool,
        TagRowMapper,
        &GeneratedQueryProvider,
        Arc::new(FixedTimeProvider(Utc::now())),
    )
    .unwrap();

    assert_ok!(repo.delete_by_id(TagId::from(999)).await);

    // Never persisted: nothing to delete
    let unsaved = Tag::new("draft").unwrap();
    assert_ok!(repo.delete(&unsaved).await);
}

#[tokio::test]
async fn test_update_after_delete_fails_row_count_check() {
    let pool = setup_pool().await;
    let repo = SqliteTagRepository::bootstrap(
        pool,
        TagRowMapper,
        &GeneratedQueryProvider,
        Arc::new(FixedTimeProvider(Utc::now())),
    )
    .unwrap();

    let tag = repo.create(Tag::new("travel").unwrap()).await.unwrap();
    repo.delete(&tag).await.unwrap();

    let err = repo.update(tag).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::UnexpectedRowCount {
            expected: 1,
            actual: 0
        }
    ));
}

#[tokio::test]
async fn test_check_constraint_surfaces_as_validation_error() {
    let pool = setup_pool().await;
    let repo = SqliteGiftCertificateRepository::bootstrap(
        pool,
        FromRowMapper::new(),
        &GeneratedQueryProvider,
        Arc::new(FixedTimeProvider(Utc::now())),
    )
    .unwrap();

    // Bypass constructor validation; the schema still rejects it
    let mut cert = GiftCertificate::new("Broken", None, 10.0, 1).unwrap();
    cert.duration = 0;

    let err = repo.create(cert).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("store.db").display());
    let options = DatabaseOptions {
        url,
        max_connections: 2,
    };

    let id = {
        let pool = create_pool(&options).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let repo = SqliteTagRepository::bootstrap(
            pool.clone(),
            TagRowMapper,
            &GeneratedQueryProvider,
            Arc::new(FixedTimeProvider(Utc::now())),
        )
        .unwrap();
        let tag = repo.create(Tag::new("travel").unwrap()).await.unwrap();
        pool.close().await;
        tag.id.unwrap()
    };

    let pool = create_pool(&options).await.unwrap();
    run_migrations(&pool).await.unwrap();
    let repo = SqliteTagRepository::bootstrap(
        pool,
        TagRowMapper,
        &GeneratedQueryProvider,
        Arc::new(FixedTimeProvider(Utc::now())),
    )
    .unwrap();

    let tag = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(tag.name, "travel");
}
