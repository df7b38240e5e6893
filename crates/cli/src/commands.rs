// Subcommand handlers, written against the repository port

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use giftstore_core::domain::{GiftCertificate, GiftCertificateId, Tag, TagId};
use giftstore_core::port::BaseRepository;
use tabled::Tabled;

#[derive(Subcommand)]
pub enum CertificateCommand {
    /// Create a gift certificate
    Create(CertificateFields),

    /// List all gift certificates
    List,

    /// Show one gift certificate
    Show { id: i64 },

    /// Change fields of a gift certificate
    Update {
        id: i64,

        #[command(flatten)]
        changes: CertificateChanges,
    },

    /// Delete a gift certificate
    Delete { id: i64 },
}

#[derive(Args)]
pub struct CertificateFields {
    #[arg(short, long)]
    pub name: String,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub price: f64,

    /// Validity in days
    #[arg(long)]
    pub duration: i32,
}

#[derive(Args, Default)]
pub struct CertificateChanges {
    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub price: Option<f64>,

    #[arg(long)]
    pub duration: Option<i32>,
}

#[derive(Subcommand)]
pub enum TagCommand {
    /// Create a tag
    Create { name: String },

    /// List all tags
    List,

    /// Delete a tag
    Delete { id: i64 },
}

#[derive(Debug, Tabled)]
pub struct CertificateRow {
    id: String,
    name: String,
    price: String,
    #[tabled(rename = "days")]
    duration: i32,
    created: String,
    updated: String,
}

impl From<&GiftCertificate> for CertificateRow {
    fn from(cert: &GiftCertificate) -> Self {
        Self {
            id: cert.id.map(|id| id.to_string()).unwrap_or_default(),
            name: cert.name.clone(),
            price: format!("{:.2}", cert.price),
            duration: cert.duration,
            created: format_date(cert.create_date),
            updated: format_date(cert.last_update_date),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct TagRow {
    id: String,
    name: String,
}

impl From<&Tag> for TagRow {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id.map(|id| id.to_string()).unwrap_or_default(),
            name: tag.name.clone(),
        }
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub async fn create_certificate(
    repo: &dyn BaseRepository<GiftCertificate>,
    fields: CertificateFields,
) -> Result<GiftCertificate> {
    let cert = GiftCertificate::new(fields.name, fields.description, fields.price, fields.duration)?;
    Ok(repo.create(cert).await?)
}

pub async fn show_certificate(
    repo: &dyn BaseRepository<GiftCertificate>,
    id: i64,
) -> Result<GiftCertificate> {
    repo.find_by_id(GiftCertificateId::from(id))
        .await?
        .with_context(|| format!("Gift certificate {} not found", id))
}

pub async fn update_certificate(
    repo: &dyn BaseRepository<GiftCertificate>,
    id: i64,
    changes: CertificateChanges,
) -> Result<GiftCertificate> {
    let mut cert = show_certificate(repo, id).await?;

    if let Some(name) = changes.name {
        cert.name = name;
    }
    if let Some(description) = changes.description {
        cert.description = Some(description);
    }
    if let Some(price) = changes.price {
        cert.price = price;
    }
    if let Some(duration) = changes.duration {
        cert.duration = duration;
    }
    cert.validate()?;

    Ok(repo.update(cert).await?)
}

/// Returns whether the certificate existed before the delete
pub async fn delete_certificate(
    repo: &dyn BaseRepository<GiftCertificate>,
    id: i64,
) -> Result<bool> {
    let id = GiftCertificateId::from(id);
    let existed = repo.find_by_id(id).await?.is_some();
    repo.delete_by_id(id).await?;
    Ok(existed)
}

pub async fn create_tag(repo: &dyn BaseRepository<Tag>, name: String) -> Result<Tag> {
    Ok(repo.create(Tag::new(name)?).await?)
}

/// Returns whether the tag existed before the delete
pub async fn delete_tag(repo: &dyn BaseRepository<Tag>, id: i64) -> Result<bool> {
    let id = TagId::from(id);
    let existed = repo.find_by_id(id).await?.is_some();
    repo.delete_by_id(id).await?;
    Ok(existed)
}
