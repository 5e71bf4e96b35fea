//! Expiration snapshots consumed by the alert generator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::alert::AlertKind;

#[derive(Debug, Clone, FromRow)]
pub struct VehicleDeadlines {
    pub id: Uuid,
    pub label: String,
    pub insurance_expires: Option<NaiveDate>,
    pub inspection_expires: Option<NaiveDate>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DriverDeadlines {
    pub id: Uuid,
    pub name: String,
    pub license_expires: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "document_kind", rename_all = "snake_case")]
pub enum DocumentKind {
    RegistrationCard,
    Insurance,
    Inspection,
    Other,
}

impl DocumentKind {
    pub fn alert_kind(self) -> AlertKind {
        match self {
            DocumentKind::RegistrationCard => AlertKind::Registration,
            DocumentKind::Insurance => AlertKind::Insurance,
            DocumentKind::Inspection => AlertKind::Inspection,
            DocumentKind::Other => AlertKind::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::RegistrationCard => "registration card",
            DocumentKind::Insurance => "insurance",
            DocumentKind::Inspection => "inspection",
            DocumentKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DocumentDeadline {
    pub vehicle_id: Uuid,
    pub vehicle_label: String,
    pub kind: DocumentKind,
    pub expires: NaiveDate,
}
