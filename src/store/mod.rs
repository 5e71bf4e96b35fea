use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Error;
use crate::models::alert::{Alert, NewAlert};
use crate::models::assignment::Assignment;
use crate::models::deadline::{DocumentDeadline, DriverDeadlines, VehicleDeadlines};
use crate::models::gps_fix::{GpsFix, NewFix};
use crate::models::mission::{DriverResponse, Mission, MissionStatus, NewNote};
use crate::models::resource::ResourceKind;
use crate::scheduling::Window;

mod postgres;
pub use postgres::PgFleetStore;

#[cfg(test)]
mod memory;
#[cfg(test)]
pub use memory::MemoryStore;

pub type SharedStore = Arc<dyn FleetStore>;

/// Persistence boundary of the core. One named method per query; the core
/// stays free of SQL and independently testable against the in-memory fake.
#[async_trait]
pub trait FleetStore: Send + Sync {
    // -- scheduling ---------------------------------------------------------

    /// Assignments of `resource_id` whose interval overlaps `window`,
    /// optionally excluding the assignment under update.
    async fn find_overlapping(
        &self,
        kind: ResourceKind,
        resource_id: Uuid,
        window: Window,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Assignment>, Error>;

    /// Ids of resources with a mission overlapping `window`. One scan, not a
    /// per-resource fan-out.
    async fn busy_resource_ids(
        &self,
        kind: ResourceKind,
        window: Window,
    ) -> Result<Vec<Uuid>, Error>;

    async fn list_resource_ids(&self, kind: ResourceKind) -> Result<Vec<Uuid>, Error>;

    async fn resource_exists(&self, kind: ResourceKind, id: Uuid) -> Result<bool, Error>;

    // -- missions -----------------------------------------------------------

    async fn insert_mission(&self, mission: &Mission) -> Result<(), Error>;

    async fn load_mission(&self, id: Uuid) -> Result<Option<Mission>, Error>;

    /// Compare-and-set: records the driver's response only while it is still
    /// pending. Returns false when the race was lost.
    async fn set_driver_response(
        &self,
        id: Uuid,
        response: DriverResponse,
        status: MissionStatus,
    ) -> Result<bool, Error>;

    /// Compare-and-set: completes the mission only from an accepted or
    /// in-progress state, writing the note (if any) in the same transaction.
    async fn complete_mission(
        &self,
        id: Uuid,
        completed_at: DateTime<Utc>,
        distance_km: Option<f64>,
        note: Option<NewNote>,
    ) -> Result<bool, Error>;

    // -- assignments --------------------------------------------------------

    async fn insert_assignment(&self, assignment: &Assignment) -> Result<(), Error>;

    async fn load_assignment(&self, id: Uuid) -> Result<Option<Assignment>, Error>;

    async fn update_assignment(&self, assignment: &Assignment) -> Result<(), Error>;

    /// Compare-and-set: records the final odometer and completes, unless the
    /// assignment is already completed.
    async fn complete_assignment(&self, id: Uuid, final_odometer: f64) -> Result<bool, Error>;

    // -- GPS fixes ----------------------------------------------------------

    async fn insert_fix(&self, fix: &NewFix) -> Result<GpsFix, Error>;

    /// Fixes of a mission, ordered by timestamp.
    async fn list_fixes(&self, mission_id: Uuid) -> Result<Vec<GpsFix>, Error>;

    // -- alerts -------------------------------------------------------------

    async fn vehicle_deadlines(&self) -> Result<Vec<VehicleDeadlines>, Error>;

    async fn active_driver_deadlines(&self) -> Result<Vec<DriverDeadlines>, Error>;

    async fn document_deadlines(&self) -> Result<Vec<DocumentDeadline>, Error>;

    /// Deletes all unresolved alerts and inserts the new set in one
    /// transaction. Resolved alerts are untouched. Returns the inserted count.
    async fn replace_unresolved_alerts(&self, alerts: &[NewAlert]) -> Result<u64, Error>;

    async fn unresolved_alerts(&self) -> Result<Vec<Alert>, Error>;

    async fn resolve_alert(&self, id: Uuid) -> Result<bool, Error>;
}
