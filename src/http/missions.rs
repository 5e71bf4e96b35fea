use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Actor;
use crate::error::Error;
use crate::missions::MissionDraft;
use crate::models::gps_fix::GpsFix;
use crate::models::mission::{DriverResponse, Mission, MissionStatus};
use crate::store::SharedStore;

#[derive(Debug, Deserialize)]
pub struct CreateMissionRequest {
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct CompleteMissionRequest {
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordPositionRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MissionResponse {
    pub id: Uuid,
    pub code: String,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub origin: String,
    pub destination: String,
    pub reason: String,
    pub distance_km: Option<f64>,
    pub status: MissionStatus,
    pub driver_response: DriverResponse,
    /// Date-derived, presentation only; `status` stays canonical.
    pub display_status: MissionStatus,
}

impl From<Mission> for MissionResponse {
    fn from(mission: Mission) -> Self {
        let display_status = mission.display_status(Utc::now());
        Self {
            id: mission.id,
            code: mission.code,
            vehicle_id: mission.vehicle_id,
            driver_id: mission.driver_id,
            start_time: mission.start_time,
            end_time: mission.end_time,
            origin: mission.origin,
            destination: mission.destination,
            reason: mission.reason,
            distance_km: mission.distance_km,
            status: mission.status,
            driver_response: mission.driver_response,
            display_status,
        }
    }
}

pub async fn create(
    State(store): State<SharedStore>,
    Json(req): Json<CreateMissionRequest>,
) -> Result<(StatusCode, Json<MissionResponse>), Error> {
    let mission = crate::missions::create(
        store.as_ref(),
        MissionDraft {
            vehicle_id: req.vehicle_id,
            driver_id: req.driver_id,
            start_time: req.start_time,
            end_time: req.end_time,
            origin: req.origin,
            destination: req.destination,
            reason: req.reason,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(mission.into())))
}

pub async fn get(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<MissionResponse>, Error> {
    let mission = crate::missions::get(store.as_ref(), id).await?;
    Ok(Json(mission.into()))
}

pub async fn accept(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<Json<MissionResponse>, Error> {
    let mission = crate::missions::accept(store.as_ref(), id, actor.driver_id).await?;
    Ok(Json(mission.into()))
}

pub async fn refuse(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<Json<MissionResponse>, Error> {
    let mission = crate::missions::refuse(store.as_ref(), id, actor.driver_id).await?;
    Ok(Json(mission.into()))
}

pub async fn complete(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    actor: Actor,
    body: Option<Json<CompleteMissionRequest>>,
) -> Result<Json<MissionResponse>, Error> {
    let comment = body.and_then(|Json(req)| req.comment);
    let mission = crate::missions::complete(store.as_ref(), id, actor.driver_id, comment).await?;
    Ok(Json(mission.into()))
}

pub async fn record_position(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    Json(req): Json<RecordPositionRequest>,
) -> Result<(StatusCode, Json<GpsFix>), Error> {
    let fix = crate::missions::record_fix(
        store.as_ref(),
        id,
        req.latitude,
        req.longitude,
        req.recorded_at,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(fix)))
}

pub async fn list_positions(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<GpsFix>>, Error> {
    let fixes = crate::missions::fixes(store.as_ref(), id).await?;
    Ok(Json(fixes))
}
