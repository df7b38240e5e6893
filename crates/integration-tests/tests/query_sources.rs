//! Repositories bootstrapped from file-backed statement sets.

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use giftstore_core::domain::{GiftCertificate, Tag};
use giftstore_core::port::time_provider::FixedTimeProvider;
use giftstore_core::port::BaseRepository;
use giftstore_infra_sqlite::{
    create_pool, run_migrations, DatabaseOptions, FileQueryProvider, FromRowMapper,
    SqliteGiftCertificateRepository, SqliteTagRepository, TagRowMapper,
};

#[tokio::test]
async fn test_select_all_override_changes_ordering() {
    let pool = create_pool(&DatabaseOptions::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let provider = FileQueryProvider::from_toml_str(
        r#"
        [tag]
        select_all = "SELECT id, name FROM tag ORDER BY name"
        "#,
    )
    .unwrap();

    let repo = SqliteTagRepository::bootstrap(
        pool,
        TagRowMapper,
        &provider,
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
    assert_eq!(names, ["food", "sport", "travel"]);
}

#[tokio::test]
async fn test_statements_loaded_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[gift_certificate]
select_one = "SELECT * FROM gift_certificate WHERE id = :id AND price >= 0"
select_all = "SELECT * FROM gift_certificate WHERE duration >= 30 ORDER BY id"
"#
    )
    .unwrap();

    let pool = create_pool(&DatabaseOptions::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let provider = FileQueryProvider::load(file.path()).unwrap();
    let repo = SqliteGiftCertificateRepository::bootstrap(
        pool,
        FromRowMapper::new(),
        &provider,
        Arc::new(FixedTimeProvider(Utc::now())),
    )
    .unwrap();

    let short = repo
        .create(GiftCertificate::new("Cinema", None, 10.0, 7).unwrap())
        .await
        .unwrap();
    repo.create(GiftCertificate::new("Spa", None, 80.0, 90).unwrap())
        .await
        .unwrap();

    let long_lived = repo.find_all().await.unwrap();
    assert_eq!(long_lived.len(), 1);
    assert_eq!(long_lived[0].name, "Spa");

    let found = repo.find_by_id(short.id.unwrap()).await.unwrap();
    assert_eq!(found.map(|c| c.name), Some("Cinema".to_string()));
}

#[tokio::test]
async fn test_override_without_key_parameter_is_rejected() {
    let pool = create_pool(&DatabaseOptions::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let provider = FileQueryProvider::from_toml_str(
        r#"
        [tag]
        select_one = "SELECT id, name FROM tag LIMIT 1"
        "#,
    )
    .unwrap();

    let result = SqliteTagRepository::bootstrap(
        pool,
        TagRowMapper,
        &provider,
        Arc::new(FixedTimeProvider(Utc::now())),
    );
    assert!(result.is_err());
}
