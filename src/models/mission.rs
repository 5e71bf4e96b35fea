use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "mission_status", rename_all = "snake_case")]
pub enum MissionStatus {
    Pending,
    Accepted,
    Refused,
    InProgress,
    Completed,
    Planned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "driver_response", rename_all = "snake_case")]
pub enum DriverResponse {
    Pending,
    Accepted,
    Refused,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mission {
    pub id: Uuid,
    pub code: String,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub origin: String,
    pub destination: String,
    pub reason: String,
    /// Null until the mission is completed, then fixed.
    pub distance_km: Option<f64>,
    pub status: MissionStatus,
    pub driver_response: DriverResponse,
}

impl Mission {
    /// Date-derived status for display purposes only. The persisted,
    /// action-driven `status` stays canonical; this never writes back.
    pub fn display_status(&self, now: DateTime<Utc>) -> MissionStatus {
        match self.end_time {
            Some(end) if end < now => MissionStatus::Completed,
            _ if self.start_time > now => MissionStatus::Planned,
            _ => MissionStatus::InProgress,
        }
    }
}

/// Free-text note recorded against a mission, e.g. the driver's comment when
/// completing it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MissionNote {
    pub id: Uuid,
    pub mission_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub author_id: Uuid,
    pub body: String,
}
