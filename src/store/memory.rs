//! In-memory `FleetStore` for tests. Same contract as the Postgres store,
//! including the compare-and-set semantics of the transition methods, with a
//! single mutex standing in for row-level locking.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::Error;
use crate::models::alert::{Alert, NewAlert};
use crate::models::assignment::{Assignment, AssignmentStatus};
use crate::models::deadline::{DocumentDeadline, DriverDeadlines, VehicleDeadlines};
use crate::models::gps_fix::{GpsFix, NewFix};
use crate::models::mission::{DriverResponse, Mission, MissionNote, MissionStatus, NewNote};
use crate::models::resource::ResourceKind;
use crate::models::short_code;
use crate::scheduling::{overlaps, Window};
use crate::store::FleetStore;

struct DriverRecord {
    deadlines: DriverDeadlines,
    active: bool,
}

#[derive(Default)]
struct Inner {
    vehicles: Vec<VehicleDeadlines>,
    drivers: Vec<DriverRecord>,
    documents: Vec<DocumentDeadline>,
    missions: HashMap<Uuid, Mission>,
    assignments: HashMap<Uuid, Assignment>,
    notes: Vec<MissionNote>,
    fixes: Vec<GpsFix>,
    alerts: Vec<Alert>,
    next_fix_id: i64,
}

pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store poisoned")
    }

    pub fn add_vehicle(&self, plate: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().vehicles.push(VehicleDeadlines {
            id,
            label: plate.to_string(),
            insurance_expires: None,
            inspection_expires: None,
        });
        id
    }

    pub fn add_driver(&self, name: &str, active: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().drivers.push(DriverRecord {
            deadlines: DriverDeadlines {
                id,
                name: name.to_string(),
                license_expires: None,
            },
            active,
        });
        id
    }

    pub fn add_document(&self, document: DocumentDeadline) {
        self.lock().documents.push(document);
    }

    pub fn set_insurance_expiry(&self, vehicle_id: Uuid, expires: NaiveDate) {
        let mut inner = self.lock();
        if let Some(vehicle) = inner.vehicles.iter_mut().find(|v| v.id == vehicle_id) {
            vehicle.insurance_expires = Some(expires);
        }
    }

    pub fn set_license_expiry(&self, driver_id: Uuid, expires: NaiveDate) {
        let mut inner = self.lock();
        if let Some(driver) = inner
            .drivers
            .iter_mut()
            .find(|d| d.deadlines.id == driver_id)
        {
            driver.deadlines.license_expires = Some(expires);
        }
    }

    /// Seeds a planned assignment directly, bypassing the validation pipeline.
    pub fn seed_assignment(
        &self,
        vehicle_id: Uuid,
        driver_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().assignments.insert(
            id,
            Assignment {
                id,
                code: short_code(),
                vehicle_id,
                driver_id,
                start_time,
                end_time,
                status: AssignmentStatus::Planned,
                initial_odometer: 0.0,
                final_odometer: None,
                comment: String::new(),
            },
        );
        id
    }

    /// Seeds a mission occupying a window, for availability tests.
    pub fn seed_mission_window(
        &self,
        vehicle_id: Uuid,
        driver_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().missions.insert(
            id,
            Mission {
                id,
                code: short_code(),
                vehicle_id,
                driver_id,
                start_time,
                end_time: Some(end_time),
                origin: String::new(),
                destination: String::new(),
                reason: String::new(),
                distance_km: None,
                status: MissionStatus::Pending,
                driver_response: DriverResponse::Pending,
            },
        );
        id
    }

    pub fn notes_for(&self, mission_id: Uuid) -> Vec<MissionNote> {
        self.lock()
            .notes
            .iter()
            .filter(|n| n.mission_id == mission_id)
            .cloned()
            .collect()
    }

    pub fn alert_count(&self) -> usize {
        self.lock().alerts.len()
    }
}

#[async_trait]
impl FleetStore for MemoryStore {
    async fn find_overlapping(
        &self,
        kind: ResourceKind,
        resource_id: Uuid,
        window: Window,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Assignment>, Error> {
        let inner = self.lock();
        Ok(inner
            .assignments
            .values()
            .filter(|a| match kind {
                ResourceKind::Vehicle => a.vehicle_id == resource_id,
                ResourceKind::Driver => a.driver_id == resource_id,
            })
            .filter(|a| Some(a.id) != exclude)
            .filter(|a| overlaps(a.start_time, a.end_time, window.start(), window.end()))
            .cloned()
            .collect())
    }

    async fn busy_resource_ids(
        &self,
        kind: ResourceKind,
        window: Window,
    ) -> Result<Vec<Uuid>, Error> {
        let inner = self.lock();
        let mut ids: Vec<Uuid> = inner
            .missions
            .values()
            .filter(|m| match m.end_time {
                Some(end) => overlaps(m.start_time, end, window.start(), window.end()),
                None => false,
            })
            .map(|m| match kind {
                ResourceKind::Vehicle => m.vehicle_id,
                ResourceKind::Driver => m.driver_id,
            })
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    async fn list_resource_ids(&self, kind: ResourceKind) -> Result<Vec<Uuid>, Error> {
        let inner = self.lock();
        Ok(match kind {
            ResourceKind::Vehicle => inner.vehicles.iter().map(|v| v.id).collect(),
            ResourceKind::Driver => inner.drivers.iter().map(|d| d.deadlines.id).collect(),
        })
    }

    async fn resource_exists(&self, kind: ResourceKind, id: Uuid) -> Result<bool, Error> {
        Ok(self.list_resource_ids(kind).await?.contains(&id))
    }

    async fn insert_mission(&self, mission: &Mission) -> Result<(), Error> {
        self.lock().missions.insert(mission.id, mission.clone());
        Ok(())
    }

    async fn load_mission(&self, id: Uuid) -> Result<Option<Mission>, Error> {
        Ok(self.lock().missions.get(&id).cloned())
    }

    async fn set_driver_response(
        &self,
        id: Uuid,
        response: DriverResponse,
        status: MissionStatus,
    ) -> Result<bool, Error> {
        let mut inner = self.lock();
        match inner.missions.get_mut(&id) {
            Some(mission) if mission.driver_response == DriverResponse::Pending => {
                mission.driver_response = response;
                mission.status = status;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn complete_mission(
        &self,
        id: Uuid,
        completed_at: DateTime<Utc>,
        distance_km: Option<f64>,
        note: Option<NewNote>,
    ) -> Result<bool, Error> {
        let mut inner = self.lock();
        let Some(mission) = inner.missions.get_mut(&id) else {
            return Ok(false);
        };
        if !matches!(
            mission.status,
            MissionStatus::Accepted | MissionStatus::InProgress
        ) {
            return Ok(false);
        }
        mission.status = MissionStatus::Completed;
        mission.end_time = Some(completed_at);
        mission.distance_km = distance_km;
        if let Some(note) = note {
            inner.notes.push(MissionNote {
                id: Uuid::new_v4(),
                mission_id: id,
                author_id: note.author_id,
                body: note.body,
                created_at: completed_at,
            });
        }
        Ok(true)
    }

    async fn insert_assignment(&self, assignment: &Assignment) -> Result<(), Error> {
        self.lock()
            .assignments
            .insert(assignment.id, assignment.clone());
        Ok(())
    }

    async fn load_assignment(&self, id: Uuid) -> Result<Option<Assignment>, Error> {
        Ok(self.lock().assignments.get(&id).cloned())
    }

    async fn update_assignment(&self, assignment: &Assignment) -> Result<(), Error> {
        self.lock()
            .assignments
            .insert(assignment.id, assignment.clone());
        Ok(())
    }

    async fn complete_assignment(&self, id: Uuid, final_odometer: f64) -> Result<bool, Error> {
        let mut inner = self.lock();
        match inner.assignments.get_mut(&id) {
            Some(assignment) if assignment.status != AssignmentStatus::Completed => {
                assignment.status = AssignmentStatus::Completed;
                assignment.final_odometer = Some(final_odometer);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn insert_fix(&self, fix: &NewFix) -> Result<GpsFix, Error> {
        let mut inner = self.lock();
        inner.next_fix_id += 1;
        let stored = GpsFix {
            fix_id: inner.next_fix_id,
            mission_id: fix.mission_id,
            latitude: fix.latitude,
            longitude: fix.longitude,
            recorded_at: fix.recorded_at,
        };
        inner.fixes.push(stored.clone());
        Ok(stored)
    }

    async fn list_fixes(&self, mission_id: Uuid) -> Result<Vec<GpsFix>, Error> {
        let inner = self.lock();
        let mut fixes: Vec<GpsFix> = inner
            .fixes
            .iter()
            .filter(|f| f.mission_id == mission_id)
            .cloned()
            .collect();
        fixes.sort_by_key(|f| f.recorded_at);
        Ok(fixes)
    }

    async fn vehicle_deadlines(&self) -> Result<Vec<VehicleDeadlines>, Error> {
        Ok(self.lock().vehicles.clone())
    }

    async fn active_driver_deadlines(&self) -> Result<Vec<DriverDeadlines>, Error> {
        Ok(self
            .lock()
            .drivers
            .iter()
            .filter(|d| d.active)
            .map(|d| d.deadlines.clone())
            .collect())
    }

    async fn document_deadlines(&self) -> Result<Vec<DocumentDeadline>, Error> {
        Ok(self.lock().documents.clone())
    }

    async fn replace_unresolved_alerts(&self, alerts: &[NewAlert]) -> Result<u64, Error> {
        let mut inner = self.lock();
        inner.alerts.retain(|a| a.resolved);
        for alert in alerts {
            inner.alerts.push(Alert {
                id: Uuid::new_v4(),
                code: short_code(),
                vehicle_id: alert.vehicle_id,
                driver_id: alert.driver_id,
                kind: alert.kind,
                message: alert.message.clone(),
                severity: alert.severity,
                raised_at: Utc::now(),
                resolved: false,
            });
        }
        Ok(alerts.len() as u64)
    }

    async fn unresolved_alerts(&self) -> Result<Vec<Alert>, Error> {
        let mut alerts: Vec<Alert> = self
            .lock()
            .alerts
            .iter()
            .filter(|a| !a.resolved)
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.raised_at.cmp(&a.raised_at));
        Ok(alerts)
    }

    async fn resolve_alert(&self, id: Uuid) -> Result<bool, Error> {
        let mut inner = self.lock();
        match inner.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                alert.resolved = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
