use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::{queries, DbPool};
use crate::error::Error;
use crate::models::alert::{Alert, NewAlert};
use crate::models::assignment::Assignment;
use crate::models::deadline::{DocumentDeadline, DriverDeadlines, VehicleDeadlines};
use crate::models::gps_fix::{GpsFix, NewFix};
use crate::models::mission::{DriverResponse, Mission, MissionStatus, NewNote};
use crate::models::resource::ResourceKind;
use crate::models::short_code;
use crate::scheduling::Window;
use crate::store::FleetStore;

pub struct PgFleetStore {
    pool: DbPool,
}

impl PgFleetStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FleetStore for PgFleetStore {
    async fn find_overlapping(
        &self,
        kind: ResourceKind,
        resource_id: Uuid,
        window: Window,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Assignment>, Error> {
        let query = match kind {
            ResourceKind::Vehicle => queries::FIND_OVERLAPPING_BY_VEHICLE,
            ResourceKind::Driver => queries::FIND_OVERLAPPING_BY_DRIVER,
        };
        let overlapping = sqlx::query_as::<_, Assignment>(query)
            .bind(resource_id)
            .bind(window.start())
            .bind(window.end())
            .bind(exclude)
            .fetch_all(&self.pool)
            .await?;
        Ok(overlapping)
    }

    async fn busy_resource_ids(
        &self,
        kind: ResourceKind,
        window: Window,
    ) -> Result<Vec<Uuid>, Error> {
        let query = match kind {
            ResourceKind::Vehicle => queries::BUSY_VEHICLE_IDS,
            ResourceKind::Driver => queries::BUSY_DRIVER_IDS,
        };
        let ids = sqlx::query_scalar::<_, Uuid>(query)
            .bind(window.start())
            .bind(window.end())
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    async fn list_resource_ids(&self, kind: ResourceKind) -> Result<Vec<Uuid>, Error> {
        let query = match kind {
            ResourceKind::Vehicle => queries::LIST_VEHICLE_IDS,
            ResourceKind::Driver => queries::LIST_DRIVER_IDS,
        };
        let ids = sqlx::query_scalar::<_, Uuid>(query)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    async fn resource_exists(&self, kind: ResourceKind, id: Uuid) -> Result<bool, Error> {
        let query = match kind {
            ResourceKind::Vehicle => queries::VEHICLE_EXISTS,
            ResourceKind::Driver => queries::DRIVER_EXISTS,
        };
        let exists = sqlx::query_scalar::<_, bool>(query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_mission(&self, mission: &Mission) -> Result<(), Error> {
        sqlx::query(queries::INSERT_MISSION)
            .bind(mission.id)
            .bind(&mission.code)
            .bind(mission.vehicle_id)
            .bind(mission.driver_id)
            .bind(mission.start_time)
            .bind(mission.end_time)
            .bind(&mission.origin)
            .bind(&mission.destination)
            .bind(&mission.reason)
            .bind(mission.distance_km)
            .bind(mission.status)
            .bind(mission.driver_response)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn load_mission(&self, id: Uuid) -> Result<Option<Mission>, Error> {
        let mission = sqlx::query_as::<_, Mission>(queries::SELECT_MISSION)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(mission)
    }

    async fn set_driver_response(
        &self,
        id: Uuid,
        response: DriverResponse,
        status: MissionStatus,
    ) -> Result<bool, Error> {
        let result = sqlx::query(queries::SET_DRIVER_RESPONSE)
            .bind(id)
            .bind(response)
            .bind(status)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn complete_mission(
        &self,
        id: Uuid,
        completed_at: DateTime<Utc>,
        distance_km: Option<f64>,
        note: Option<NewNote>,
    ) -> Result<bool, Error> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(queries::COMPLETE_MISSION)
            .bind(id)
            .bind(completed_at)
            .bind(distance_km)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        if let Some(note) = note {
            sqlx::query(queries::INSERT_MISSION_NOTE)
                .bind(Uuid::new_v4())
                .bind(id)
                .bind(note.author_id)
                .bind(&note.body)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn insert_assignment(&self, assignment: &Assignment) -> Result<(), Error> {
        sqlx::query(queries::INSERT_ASSIGNMENT)
            .bind(assignment.id)
            .bind(&assignment.code)
            .bind(assignment.vehicle_id)
            .bind(assignment.driver_id)
            .bind(assignment.start_time)
            .bind(assignment.end_time)
            .bind(assignment.status)
            .bind(assignment.initial_odometer)
            .bind(assignment.final_odometer)
            .bind(&assignment.comment)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn load_assignment(&self, id: Uuid) -> Result<Option<Assignment>, Error> {
        let assignment = sqlx::query_as::<_, Assignment>(queries::SELECT_ASSIGNMENT)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(assignment)
    }

    async fn update_assignment(&self, assignment: &Assignment) -> Result<(), Error> {
        sqlx::query(queries::UPDATE_ASSIGNMENT)
            .bind(assignment.id)
            .bind(assignment.vehicle_id)
            .bind(assignment.driver_id)
            .bind(assignment.start_time)
            .bind(assignment.end_time)
            .bind(assignment.initial_odometer)
            .bind(&assignment.comment)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn complete_assignment(&self, id: Uuid, final_odometer: f64) -> Result<bool, Error> {
        let result = sqlx::query(queries::COMPLETE_ASSIGNMENT)
            .bind(id)
            .bind(final_odometer)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_fix(&self, fix: &NewFix) -> Result<GpsFix, Error> {
        let stored = sqlx::query_as::<_, GpsFix>(queries::INSERT_GPS_FIX)
            .bind(fix.mission_id)
            .bind(fix.latitude)
            .bind(fix.longitude)
            .bind(fix.recorded_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn list_fixes(&self, mission_id: Uuid) -> Result<Vec<GpsFix>, Error> {
        let fixes = sqlx::query_as::<_, GpsFix>(queries::LIST_GPS_FIXES)
            .bind(mission_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(fixes)
    }

    async fn vehicle_deadlines(&self) -> Result<Vec<VehicleDeadlines>, Error> {
        let deadlines = sqlx::query_as::<_, VehicleDeadlines>(queries::VEHICLE_DEADLINES)
            .fetch_all(&self.pool)
            .await?;
        Ok(deadlines)
    }

    async fn active_driver_deadlines(&self) -> Result<Vec<DriverDeadlines>, Error> {
        let deadlines = sqlx::query_as::<_, DriverDeadlines>(queries::ACTIVE_DRIVER_DEADLINES)
            .fetch_all(&self.pool)
            .await?;
        Ok(deadlines)
    }

    async fn document_deadlines(&self) -> Result<Vec<DocumentDeadline>, Error> {
        let deadlines = sqlx::query_as::<_, DocumentDeadline>(queries::DOCUMENT_DEADLINES)
            .fetch_all(&self.pool)
            .await?;
        Ok(deadlines)
    }

    async fn replace_unresolved_alerts(&self, alerts: &[NewAlert]) -> Result<u64, Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(queries::DELETE_UNRESOLVED_ALERTS)
            .execute(&mut *tx)
            .await?;

        for alert in alerts {
            sqlx::query(queries::INSERT_ALERT)
                .bind(Uuid::new_v4())
                .bind(short_code())
                .bind(alert.vehicle_id)
                .bind(alert.driver_id)
                .bind(alert.kind)
                .bind(&alert.message)
                .bind(alert.severity)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(alerts.len() as u64)
    }

    async fn unresolved_alerts(&self) -> Result<Vec<Alert>, Error> {
        let alerts = sqlx::query_as::<_, Alert>(queries::LIST_UNRESOLVED_ALERTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(alerts)
    }

    async fn resolve_alert(&self, id: Uuid) -> Result<bool, Error> {
        let result = sqlx::query(queries::RESOLVE_ALERT)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
