use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "assignment_status", rename_all = "snake_case")]
pub enum AssignmentStatus {
    Planned,
    Active,
    Completed,
}

/// A booking of one vehicle and one driver over a half-open interval
/// `[start_time, end_time)`. Invariant: `end_time > start_time`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: Uuid,
    pub code: String,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AssignmentStatus,
    pub initial_odometer: f64,
    pub final_odometer: Option<f64>,
    pub comment: String,
}

impl Assignment {
    /// Odometer delta, available once the assignment has been completed.
    pub fn distance_traveled(&self) -> Option<f64> {
        self.final_odometer.map(|f| f - self.initial_odometer)
    }
}
