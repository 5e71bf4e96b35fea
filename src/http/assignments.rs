use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assignments::AssignmentDraft;
use crate::error::Error;
use crate::models::assignment::{Assignment, AssignmentStatus};
use crate::store::SharedStore;

#[derive(Debug, Deserialize)]
pub struct AssignmentPayload {
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub initial_odometer: Option<f64>,
    pub comment: Option<String>,
}

impl From<AssignmentPayload> for AssignmentDraft {
    fn from(payload: AssignmentPayload) -> Self {
        Self {
            vehicle_id: payload.vehicle_id,
            driver_id: payload.driver_id,
            start_time: payload.start_time,
            end_time: payload.end_time,
            initial_odometer: payload.initial_odometer,
            comment: payload.comment,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompleteAssignmentRequest {
    pub final_odometer: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub code: String,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AssignmentStatus,
    pub initial_odometer: f64,
    pub final_odometer: Option<f64>,
    pub distance_traveled: Option<f64>,
    pub comment: String,
}

impl From<Assignment> for AssignmentResponse {
    fn from(assignment: Assignment) -> Self {
        let distance_traveled = assignment.distance_traveled();
        Self {
            id: assignment.id,
            code: assignment.code,
            vehicle_id: assignment.vehicle_id,
            driver_id: assignment.driver_id,
            start_time: assignment.start_time,
            end_time: assignment.end_time,
            status: assignment.status,
            initial_odometer: assignment.initial_odometer,
            final_odometer: assignment.final_odometer,
            distance_traveled,
            comment: assignment.comment,
        }
    }
}

pub async fn create(
    State(store): State<SharedStore>,
    Json(payload): Json<AssignmentPayload>,
) -> Result<(StatusCode, Json<AssignmentResponse>), Error> {
    let assignment = crate::assignments::create(store.as_ref(), payload.into()).await?;
    Ok((StatusCode::CREATED, Json(assignment.into())))
}

pub async fn update(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignmentPayload>,
) -> Result<Json<AssignmentResponse>, Error> {
    let assignment = crate::assignments::update(store.as_ref(), id, payload.into()).await?;
    Ok(Json(assignment.into()))
}

pub async fn complete(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    body: Option<Json<CompleteAssignmentRequest>>,
) -> Result<Json<AssignmentResponse>, Error> {
    let final_odometer = body.and_then(|Json(req)| req.final_odometer);
    let assignment = crate::assignments::complete(store.as_ref(), id, final_odometer).await?;
    Ok(Json(assignment.into()))
}
