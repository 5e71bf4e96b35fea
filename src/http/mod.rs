//! Thin HTTP transport: handlers deserialize, delegate to the core with an
//! injected store, and serialize the result. Identity is resolved upstream by
//! the gateway, which forwards the acting driver id in `x-driver-id`.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::Error;
use crate::store::SharedStore;

pub mod alerts;
pub mod assignments;
pub mod availability;
pub mod missions;

/// The already-authenticated actor, as forwarded by the gateway.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub driver_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-driver-id")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| Error::Forbidden("missing x-driver-id header".to_string()))?;
        let driver_id = Uuid::parse_str(header)
            .map_err(|_| Error::Forbidden("invalid x-driver-id header".to_string()))?;
        Ok(Actor { driver_id })
    }
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/missions", post(missions::create))
        .route("/missions/:id", get(missions::get))
        .route("/missions/:id/accept", post(missions::accept))
        .route("/missions/:id/refuse", post(missions::refuse))
        .route("/missions/:id/complete", post(missions::complete))
        .route(
            "/missions/:id/positions",
            post(missions::record_position).get(missions::list_positions),
        )
        .route("/assignments", post(assignments::create))
        .route("/assignments/:id", put(assignments::update))
        .route("/assignments/:id/complete", post(assignments::complete))
        .route("/availability/vehicles", get(availability::vehicles))
        .route("/availability/drivers", get(availability::drivers))
        .route("/alerts", get(alerts::list))
        .route("/alerts/generate", post(alerts::generate))
        .route("/alerts/:id/resolve", post(alerts::resolve))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::TimeZone;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::missions::MissionDraft;
    use crate::models::mission::Mission;
    use crate::store::MemoryStore;

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: String, driver: Option<Uuid>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(driver) = driver {
            builder = builder.header("x-driver-id", driver.to_string());
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn seeded(store: &MemoryStore) -> (Mission, Uuid) {
        let vehicle = store.add_vehicle("DA-001-TA");
        let driver = store.add_driver("ines", true);
        let mission = crate::missions::create(
            store,
            MissionDraft {
                vehicle_id: vehicle,
                driver_id: driver,
                start_time: chrono::Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap(),
                end_time: None,
                origin: "depot".to_string(),
                destination: "airport".to_string(),
                reason: "crew shuttle".to_string(),
            },
        )
        .await
        .unwrap();
        (mission, driver)
    }

    #[tokio::test]
    async fn accept_requires_the_owning_driver() {
        let store = Arc::new(MemoryStore::new());
        let (mission, driver) = seeded(&store).await;
        let app = router(store.clone());

        // no forwarded identity
        let response = app
            .clone()
            .oneshot(post(format!("/missions/{}/accept", mission.id), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // someone else's mission
        let response = app
            .clone()
            .oneshot(post(
                format!("/missions/{}/accept", mission.id),
                Some(Uuid::new_v4()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // the assigned driver
        let response = app
            .clone()
            .oneshot(post(format!("/missions/{}/accept", mission.id), Some(driver)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["driver_response"], "accepted");
        assert_eq!(body["status"], "accepted");

        // a second accept is an invalid transition
        let response = app
            .oneshot(post(format!("/missions/{}/accept", mission.id), Some(driver)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"], "mission already accepted or refused");
    }

    #[tokio::test]
    async fn availability_reports_free_vehicles() {
        let store = Arc::new(MemoryStore::new());
        let busy = store.add_vehicle("DA-001-TA");
        let free = store.add_vehicle("DA-002-TA");
        let driver = store.add_driver("ines", true);
        let at = |h| chrono::Utc.with_ymd_and_hms(2024, 1, 10, h, 0, 0).unwrap();
        store.seed_mission_window(busy, driver, at(8), at(17));
        let app = router(store);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(
                        "/availability/vehicles\
                         ?start_time=2024-01-10T12:00:00Z&end_time=2024-01-10T20:00:00Z",
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["available"], json!([free.to_string()]));
    }

    #[tokio::test]
    async fn validation_failures_are_field_keyed() {
        let store = Arc::new(MemoryStore::new());
        let vehicle = store.add_vehicle("DA-001-TA");
        let driver = store.add_driver("ines", true);
        let app = router(store);

        let payload = json!({
            "vehicle_id": vehicle,
            "driver_id": driver,
            "start_time": "2024-01-10T17:00:00Z",
            "end_time": "2024-01-10T08:00:00Z",
        });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/assignments")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["end_time"], "end must be after start");
    }
}
