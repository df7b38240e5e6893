// Gift Certificate Entity

use super::entity::{Auditable, Entity, EntityMeta};
use super::error::{validate_name, DomainError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gift certificate ID (database rowid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GiftCertificateId(i64);

impl GiftCertificateId {
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for GiftCertificateId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<GiftCertificateId> for i64 {
    fn from(id: GiftCertificateId) -> Self {
        id.0
    }
}

impl fmt::Display for GiftCertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gift certificate sold in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCertificate {
    pub id: Option<GiftCertificateId>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Validity period in days
    pub duration: i32,
    pub create_date: Option<DateTime<Utc>>,
    pub last_update_date: Option<DateTime<Utc>>,
}

impl GiftCertificate {
    /// Create a new, not yet persisted certificate
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: f64,
        duration: i32,
    ) -> Result<Self> {
        let certificate = Self {
            id: None,
            name: name.into(),
            description,
            price,
            duration,
            create_date: None,
            last_update_date: None,
        };
        certificate.validate()?;
        Ok(certificate)
    }

    pub fn validate(&self) -> Result<()> {
        validate_name("name", &self.name)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::Validation(format!(
                "price must be a non-negative amount, got {}",
                self.price
            )));
        }
        if self.duration <= 0 {
            return Err(DomainError::Validation(format!(
                "duration must be at least 1 day, got {}",
                self.duration
            )));
        }
        Ok(())
    }
}

impl Entity for GiftCertificate {
    type Id = GiftCertificateId;

    const META: EntityMeta = EntityMeta {
        name: "gift_certificate",
        table: "gift_certificate",
        id_column: "id",
        columns: &[
            "name",
            "description",
            "price",
            "duration",
            "create_date",
            "last_update_date",
        ],
    };

    fn id(&self) -> Option<Self::Id> {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = Some(id);
    }

    fn auditable(&mut self) -> Option<&mut dyn Auditable> {
        Some(self)
    }
}

impl Auditable for GiftCertificate {
    fn on_create(&mut self, now: DateTime<Utc>) {
        self.create_date = Some(now);
        self.last_update_date = Some(now);
    }

    fn on_update(&mut self, now: DateTime<Utc>) {
        self.last_update_date = Some(now);
    }
}
