//! Giftstore CLI - gift certificate and tag catalogue on SQLite

mod commands;
mod config;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tabled::Table;
use tracing::info;

use commands::{CertificateCommand, CertificateRow, TagCommand, TagRow};
use config::AppConfig;
use giftstore_core::application::GeneratedQueryProvider;
use giftstore_core::port::{BaseRepository, QueryProvider, SystemTimeProvider};
use giftstore_infra_sqlite::{
    create_pool, run_migrations, DatabaseOptions, FileQueryProvider, FromRowMapper,
    SqliteGiftCertificateRepository, SqliteTagRepository, TagRowMapper,
};

#[derive(Parser)]
#[command(name = "giftstore")]
#[command(about = "Giftstore catalogue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: ./giftstore.toml if present)
    #[arg(long, env = "GIFTSTORE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage gift certificates
    #[command(subcommand)]
    Certificate(CertificateCommand),

    /// Manage tags
    #[command(subcommand)]
    Tag(TagCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // 2. Initialize logging
    logging::init(&config.logging)?;
    info!("Giftstore v{} starting...", giftstore_core::VERSION);

    // 3. Initialize database
    if let Some(path) = config.database.file_path() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let db_url = config.database.expanded_url();
    info!(db_url = %db_url, "Initializing database...");

    let pool = create_pool(&DatabaseOptions {
        url: db_url,
        max_connections: config.database.max_connections,
    })
    .await
    .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 4. Bootstrap repositories
    let query_provider: Box<dyn QueryProvider> = match &config.queries_file {
        Some(path) => Box::new(FileQueryProvider::load(path)?),
        None => Box::new(GeneratedQueryProvider::new()),
    };
    let time_provider = Arc::new(SystemTimeProvider);

    match cli.command {
        Commands::Certificate(command) => {
            let repo = SqliteGiftCertificateRepository::bootstrap(
                pool,
                FromRowMapper::new(),
                query_provider.as_ref(),
                time_provider,
            )?;
            run_certificate(&repo, command).await?;
        }
        Commands::Tag(command) => {
            let repo = SqliteTagRepository::bootstrap(
                pool,
                TagRowMapper,
                query_provider.as_ref(),
                time_provider,
            )?;
            run_tag(&repo, command).await?;
        }
    }

    Ok(())
}

async fn run_certificate(
    repo: &SqliteGiftCertificateRepository,
    command: CertificateCommand,
) -> Result<()> {
    match command {
        CertificateCommand::Create(fields) => {
            let cert = commands::create_certificate(repo, fields).await?;
            println!("{}", "✓ Gift certificate created".green().bold());
            println!("{}", Table::new([CertificateRow::from(&cert)]));
        }
        CertificateCommand::List => {
            let certs = repo.find_all().await?;
            if certs.is_empty() {
                println!("{}", "No gift certificates".yellow());
            } else {
                println!("{}", Table::new(certs.iter().map(CertificateRow::from)));
            }
        }
        CertificateCommand::Show { id } => {
            let cert = commands::show_certificate(repo, id).await?;
            println!("{}", Table::new([CertificateRow::from(&cert)]));
            if let Some(description) = &cert.description {
                println!("{} {}", "Description:".bold(), description);
            }
        }
        CertificateCommand::Update { id, changes } => {
            let cert = commands::update_certificate(repo, id, changes).await?;
            println!("{}", "✓ Gift certificate updated".green().bold());
            println!("{}", Table::new([CertificateRow::from(&cert)]));
        }
        CertificateCommand::Delete { id } => {
            if commands::delete_certificate(repo, id).await? {
                println!("{}", format!("✓ Gift certificate {} deleted", id).green().bold());
            } else {
                println!("{}", format!("Gift certificate {} not found", id).yellow());
            }
        }
    }
    Ok(())
}

async fn run_tag(repo: &SqliteTagRepository, command: TagCommand) -> Result<()> {
    match command {
        TagCommand::Create { name } => {
            let tag = commands::create_tag(repo, name).await?;
            println!("{}", "✓ Tag created".green().bold());
            println!("{}", Table::new([TagRow::from(&tag)]));
        }
        TagCommand::List => {
            let tags = repo.find_all().await?;
            if tags.is_empty() {
                println!("{}", "No tags".yellow());
            } else {
                println!("{}", Table::new(tags.iter().map(TagRow::from)));
            }
        }
        TagCommand::Delete { id } => {
            if commands::delete_tag(repo, id).await? {
                println!("{}", format!("✓ Tag {} deleted", id).green().bold());
            } else {
                println!("{}", format!("Tag {} not found", id).yellow());
            }
        }
    }
    Ok(())
}
