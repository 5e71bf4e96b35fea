use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "alert_kind", rename_all = "snake_case")]
pub enum AlertKind {
    Insurance,
    Inspection,
    License,
    Registration,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "alert_severity", rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: Uuid,
    pub code: String,
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
    pub raised_at: DateTime<Utc>,
    pub resolved: bool,
}

/// An alert as produced by the generator, before it gets an identity and a
/// timestamp at insertion. Content-comparable across generation runs.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
}

impl NewAlert {
    pub fn for_vehicle(vehicle_id: Uuid, kind: AlertKind, message: String, severity: Severity) -> Self {
        Self {
            vehicle_id: Some(vehicle_id),
            driver_id: None,
            kind,
            message,
            severity,
        }
    }

    pub fn for_driver(driver_id: Uuid, kind: AlertKind, message: String, severity: Severity) -> Self {
        Self {
            vehicle_id: None,
            driver_id: Some(driver_id),
            kind,
            message,
            severity,
        }
    }
}
