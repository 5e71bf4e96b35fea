use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One GPS sample on a mission's track. Immutable once recorded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GpsFix {
    pub fix_id: i64,
    pub mission_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFix {
    pub mission_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: DateTime<Utc>,
}
