use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::error::Error;
use crate::models::alert::Alert;
use crate::store::{FleetStore, SharedStore};

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub generated: u64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn list(State(store): State<SharedStore>) -> Result<Json<Vec<Alert>>, Error> {
    let alerts = store.unresolved_alerts().await?;
    Ok(Json(alerts))
}

pub async fn generate(State(store): State<SharedStore>) -> Result<Json<GenerateResponse>, Error> {
    let generated = crate::alerts::regenerate(store.as_ref(), Utc::now().date_naive()).await?;
    Ok(Json(GenerateResponse { generated }))
}

pub async fn resolve(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, Error> {
    crate::alerts::resolve(store.as_ref(), id).await?;
    Ok(Json(MessageResponse {
        message: "alert resolved",
    }))
}
