//! Assignment bookings: the validation pipeline runs in a fixed order
//! (window, then odometer, then vehicle conflict, then driver conflict) and
//! the first failure wins; nothing is written until every check passes.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::error::Error;
use crate::models::assignment::{Assignment, AssignmentStatus};
use crate::models::resource::ResourceKind;
use crate::models::short_code;
use crate::scheduling::{ensure_free, Window};
use crate::store::FleetStore;

#[derive(Debug, Clone)]
pub struct AssignmentDraft {
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub initial_odometer: Option<f64>,
    pub comment: Option<String>,
}

async fn validate(
    store: &dyn FleetStore,
    draft: &AssignmentDraft,
    exclude: Option<Uuid>,
) -> Result<Window, Error> {
    let window = Window::new(draft.start_time, draft.end_time)?;
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
    ensure_free(store, ResourceKind::Vehicle, draft.vehicle_id, window, exclude).await?;
    ensure_free(store, ResourceKind::Driver, draft.driver_id, window, exclude).await?;
    Ok(window)
}

pub async fn create(store: &dyn FleetStore, draft: AssignmentDraft) -> Result<Assignment, Error> {
    validate(store, &draft, None).await?;

    let assignment = Assignment {
        id: Uuid::new_v4(),
        code: short_code(),
        vehicle_id: draft.vehicle_id,
        driver_id: draft.driver_id,
        start_time: draft.start_time,
        end_time: draft.end_time,
        status: AssignmentStatus::Planned,
        initial_odometer: draft.initial_odometer.unwrap_or(0.0),
        final_odometer: None,
        comment: draft.comment.unwrap_or_default(),
    };
    store.insert_assignment(&assignment).await?;
    info!(
        "created assignment {}: vehicle {} -> driver {}",
        assignment.code, assignment.vehicle_id, assignment.driver_id
    );
    Ok(assignment)
}

pub async fn update(
    store: &dyn FleetStore,
    id: Uuid,
    draft: AssignmentDraft,
) -> Result<Assignment, Error> {
    let mut assignment = store
        .load_assignment(id)
        .await?
        .ok_or(Error::NotFound("assignment"))?;
    // the row under update must not collide with itself
    validate(store, &draft, Some(id)).await?;

    assignment.vehicle_id = draft.vehicle_id;
    assignment.driver_id = draft.driver_id;
    assignment.start_time = draft.start_time;
    assignment.end_time = draft.end_time;
    if let Some(odometer) = draft.initial_odometer {
        assignment.initial_odometer = odometer;
    }
    if let Some(comment) = draft.comment {
        assignment.comment = comment;
    }
    store.update_assignment(&assignment).await?;
    Ok(assignment)
}

pub async fn complete(
    store: &dyn FleetStore,
    id: Uuid,
    final_odometer: Option<f64>,
) -> Result<Assignment, Error> {
    let mut assignment = store
        .load_assignment(id)
        .await?
        .ok_or(Error::NotFound("assignment"))?;

    let final_odometer = final_odometer.ok_or(Error::Validation {
        field: "final_odometer",
        message: "final odometer is required".to_string(),
    })?;
    if final_odometer < assignment.initial_odometer {
        return Err(Error::Validation {
            field: "final_odometer",
            message: "final odometer cannot be lower than the initial odometer".to_string(),
        });
    }

    if !store.complete_assignment(id, final_odometer).await? {
        return Err(Error::InvalidTransition(
            "assignment already completed".to_string(),
        ));
    }
    assignment.status = AssignmentStatus::Completed;
    assignment.final_odometer = Some(final_odometer);
    info!(
        "assignment {} completed at {} km",
        assignment.code, final_odometer
    );
    Ok(assignment)
}
