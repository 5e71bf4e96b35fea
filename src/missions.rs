//! Mission lifecycle: request, driver response, completion, GPS track.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::error::Error;
use crate::geo::{round_km, total_distance};
use crate::models::gps_fix::{GpsFix, NewFix};
use crate::models::mission::{DriverResponse, Mission, MissionStatus, NewNote};
use crate::models::resource::ResourceKind;
use crate::models::short_code;
use crate::scheduling::Window;
use crate::store::FleetStore;

#[derive(Debug, Clone)]
pub struct MissionDraft {
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub origin: String,
    pub destination: String,
    pub reason: String,
}

pub async fn create(store: &dyn FleetStore, draft: MissionDraft) -> Result<Mission, Error> {
    if let Some(end) = draft.end_time {
        Window::new(draft.start_time, end)?;
    }
    if !store
        .resource_exists(ResourceKind::Vehicle, draft.vehicle_id)
        .await?
    {
        return Err(Error::NotFound("vehicle"));
    }
    if !store
        .resource_exists(ResourceKind::Driver, draft.driver_id)
        .await?
    {
        return Err(Error::NotFound("driver"));
    }

    let mission = Mission {
        id: Uuid::new_v4(),
        code: short_code(),
        vehicle_id: draft.vehicle_id,
        driver_id: draft.driver_id,
        start_time: draft.start_time,
        end_time: draft.end_time,
        origin: draft.origin,
        destination: draft.destination,
        reason: draft.reason,
        distance_km: None,
        status: MissionStatus::Pending,
        driver_response: DriverResponse::Pending,
    };
    store.insert_mission(&mission).await?;
    info!(
        "created mission {} for driver {}",
        mission.code, mission.driver_id
    );
    Ok(mission)
}

pub async fn get(store: &dyn FleetStore, id: Uuid) -> Result<Mission, Error> {
    store
        .load_mission(id)
        .await?
        .ok_or(Error::NotFound("mission"))
}

pub async fn accept(store: &dyn FleetStore, id: Uuid, actor: Uuid) -> Result<Mission, Error> {
    respond(store, id, actor, DriverResponse::Accepted).await
}

pub async fn refuse(store: &dyn FleetStore, id: Uuid, actor: Uuid) -> Result<Mission, Error> {
    respond(store, id, actor, DriverResponse::Refused).await
}

/// The driver answers the mission request. The response leaves `pending`
/// exactly once; the guard re-runs inside the store as a compare-and-set so
/// two near-simultaneous answers cannot both win.
async fn respond(
    store: &dyn FleetStore,
    id: Uuid,
    actor: Uuid,
    response: DriverResponse,
) -> Result<Mission, Error> {
    let mut mission = get(store, id).await?;
    if mission.driver_id != actor {
        return Err(Error::Forbidden(
            "mission belongs to another driver".to_string(),
        ));
    }
    if mission.driver_response != DriverResponse::Pending {
        return Err(Error::InvalidTransition(
            "mission already accepted or refused".to_string(),
        ));
    }

    let status = match response {
        DriverResponse::Accepted => MissionStatus::Accepted,
        DriverResponse::Refused => MissionStatus::Refused,
        DriverResponse::Pending => MissionStatus::Pending,
    };
    if !store.set_driver_response(id, response, status).await? {
        return Err(Error::InvalidTransition(
            "mission already accepted or refused".to_string(),
        ));
    }
    mission.driver_response = response;
    mission.status = status;
    info!(
        "mission {} {:?} by driver {}",
        mission.code, response, actor
    );
    Ok(mission)
}

/// Completes an accepted or in-progress mission: stamps the end time, rolls
/// the GPS track up into `distance_km` (rounded to two decimals here, at the
/// persistence point), and records the driver's comment as a note in the same
/// transaction.
pub async fn complete(
    store: &dyn FleetStore,
    id: Uuid,
    actor: Uuid,
    comment: Option<String>,
) -> Result<Mission, Error> {
    let mut mission = get(store, id).await?;
    if mission.driver_id != actor {
        return Err(Error::Forbidden(
            "mission belongs to another driver".to_string(),
        ));
    }
    if !matches!(
        mission.status,
        MissionStatus::Accepted | MissionStatus::InProgress
    ) {
        return Err(Error::InvalidTransition(
            "mission is not accepted or in progress".to_string(),
        ));
    }

    let fixes = store.list_fixes(id).await?;
    let distance_km = if fixes.is_empty() {
        None
    } else {
        Some(round_km(total_distance(&fixes)))
    };

    let completed_at = Utc::now();
    let note = comment
        .filter(|body| !body.trim().is_empty())
        .map(|body| NewNote {
            author_id: actor,
            body,
        });
    if !store
        .complete_mission(id, completed_at, distance_km, note)
        .await?
    {
        return Err(Error::InvalidTransition(
            "mission is not accepted or in progress".to_string(),
        ));
    }

    mission.status = MissionStatus::Completed;
    mission.end_time = Some(completed_at);
    mission.distance_km = distance_km;
    info!(
        "mission {} completed, distance {:?} km",
        mission.code, mission.distance_km
    );
    Ok(mission)
}

/// Appends a GPS fix to a mission's track. Coordinates are range-checked at
/// this boundary; a bad fix would silently poison the distance accumulator.
pub async fn record_fix(
    store: &dyn FleetStore,
    mission_id: Uuid,
    latitude: f64,
    longitude: f64,
    recorded_at: DateTime<Utc>,
) -> Result<GpsFix, Error> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::Validation {
            field: "latitude",
            message: "latitude must be between -90 and 90".to_string(),
        });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::Validation {
            field: "longitude",
            message: "longitude must be between -180 and 180".to_string(),
        });
    }
    get(store, mission_id).await?;
    store
        .insert_fix(&NewFix {
            mission_id,
            latitude,
            longitude,
            recorded_at,
        })
        .await
}

pub async fn fixes(store: &dyn FleetStore, mission_id: Uuid) -> Result<Vec<GpsFix>, Error> {
    get(store, mission_id).await?;
    store.list_fixes(mission_id).await
}
