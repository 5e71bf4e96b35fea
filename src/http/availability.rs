use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::models::resource::ResourceKind;
use crate::scheduling::{available, Window};
use crate::store::SharedStore;

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: Vec<Uuid>,
}

async fn free_resources(
    store: &SharedStore,
    kind: ResourceKind,
    params: AvailabilityParams,
) -> Result<Json<AvailabilityResponse>, Error> {
    let window = Window::new(params.start_time, params.end_time)?;
    let ids = available(store.as_ref(), kind, window).await?;
    Ok(Json(AvailabilityResponse { available: ids }))
}

pub async fn vehicles(
    State(store): State<SharedStore>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityResponse>, Error> {
    free_resources(&store, ResourceKind::Vehicle, params).await
}

pub async fn drivers(
    State(store): State<SharedStore>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityResponse>, Error> {
    free_resources(&store, ResourceKind::Driver, params).await
}
