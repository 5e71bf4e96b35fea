//! Expiration alerts. Generation is a pure function of the deadline snapshots
//! against a reference date; persistence replaces the unresolved set
//! wholesale, so the generator carries no incremental state.

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::error::Error;
use crate::models::alert::{AlertKind, NewAlert, Severity};
use crate::models::deadline::{DocumentDeadline, DriverDeadlines, VehicleDeadlines};
use crate::store::FleetStore;

const EXPIRY_WINDOW_DAYS: i64 = 30;
const CRITICAL_WINDOW_DAYS: i64 = 7;

fn severity_for(days_left: i64) -> Severity {
    if days_left <= CRITICAL_WINDOW_DAYS {
        Severity::Critical
    } else {
        Severity::Warning
    }
}

/// Days until `expires`, if that falls inside the alert window. `None` never
/// alerts: a missing expiration date is not an expiring one.
fn expiring(expires: Option<NaiveDate>, as_of: NaiveDate) -> Option<(NaiveDate, i64)> {
    let expires = expires?;
    let days_left = (expires - as_of).num_days();
    (days_left <= EXPIRY_WINDOW_DAYS).then_some((expires, days_left))
}

pub fn generate_alerts(
    as_of: NaiveDate,
    vehicles: &[VehicleDeadlines],
    drivers: &[DriverDeadlines],
    documents: &[DocumentDeadline],
) -> Vec<NewAlert> {
    let mut alerts = Vec::new();

    for vehicle in vehicles {
        if let Some((expires, days_left)) = expiring(vehicle.insurance_expires, as_of) {
            alerts.push(NewAlert::for_vehicle(
                vehicle.id,
                AlertKind::Insurance,
                format!("Insurance for vehicle {} expires on {}", vehicle.label, expires),
                severity_for(days_left),
            ));
        }
        if let Some((expires, days_left)) = expiring(vehicle.inspection_expires, as_of) {
            alerts.push(NewAlert::for_vehicle(
                vehicle.id,
                AlertKind::Inspection,
                format!(
                    "Technical inspection for vehicle {} expires on {}",
                    vehicle.label, expires
                ),
                severity_for(days_left),
            ));
        }
    }

    for driver in drivers {
        if let Some((expires, days_left)) = expiring(driver.license_expires, as_of) {
            alerts.push(NewAlert::for_driver(
                driver.id,
                AlertKind::License,
                format!("Driving license of {} expires on {}", driver.name, expires),
                severity_for(days_left),
            ));
        }
    }

    for document in documents {
        if let Some((expires, days_left)) = expiring(Some(document.expires), as_of) {
            alerts.push(NewAlert::for_vehicle(
                document.vehicle_id,
                document.kind.alert_kind(),
                format!(
                    "Document {} for vehicle {} expires on {}",
                    document.kind.label(),
                    document.vehicle_label,
                    expires
                ),
                severity_for(days_left),
            ));
        }
    }

    alerts
}

/// Rebuilds the unresolved alert set from current deadline data. Re-running
/// on unchanged data yields a content-equal set (fresh identities, since the
/// store deletes and reinserts).
pub async fn regenerate(store: &dyn FleetStore, as_of: NaiveDate) -> Result<u64, Error> {
    let vehicles = store.vehicle_deadlines().await?;
    let drivers = store.active_driver_deadlines().await?;
    let documents = store.document_deadlines().await?;

    let alerts = generate_alerts(as_of, &vehicles, &drivers, &documents);
    let inserted = store.replace_unresolved_alerts(&alerts).await?;
    info!("regenerated {} alerts as of {}", inserted, as_of);
    Ok(inserted)
}

pub async fn resolve(store: &dyn FleetStore, id: Uuid) -> Result<(), Error> {
    if !store.resolve_alert(id).await? {
        return Err(Error::NotFound("alert"));
    }
    Ok(())
}
