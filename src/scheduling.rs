//! Interval conflict detection over the booking schedule.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Error;
use crate::models::resource::ResourceKind;
use crate::store::FleetStore;

/// A validated half-open interval `[start, end)`. Constructing one is the
/// single place the `end > start` invariant is enforced, so every consumer
/// downstream can assume it.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Window {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, Error> {
        if end <= start {
            return Err(Error::Validation {
                field: "end_time",
                message: "end must be after start".to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Strict overlap of two half-open intervals. Touching intervals
/// (`a_end == b_start`) do not conflict.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Is there an existing assignment of this resource overlapping `window`?
/// Pure query; `exclude` skips the assignment currently being updated.
pub async fn has_conflict(
    store: &dyn FleetStore,
    kind: ResourceKind,
    resource_id: Uuid,
    window: Window,
    exclude: Option<Uuid>,
) -> Result<bool, Error> {
    let overlapping = store
        .find_overlapping(kind, resource_id, window, exclude)
        .await?;
    Ok(!overlapping.is_empty())
}

/// Conflict check as a validation gate: turns a hit into the domain error the
/// transport layer maps to a 400.
pub async fn ensure_free(
    store: &dyn FleetStore,
    kind: ResourceKind,
    resource_id: Uuid,
    window: Window,
    exclude: Option<Uuid>,
) -> Result<(), Error> {
    if has_conflict(store, kind, resource_id, window, exclude).await? {
        return Err(Error::Conflict {
            field: "start_time",
            message: format!("{} is already booked over this period", kind.as_str()),
        });
    }
    Ok(())
}

/// All resources of `kind` without a mission overlapping `window`:
/// the full id list minus one busy-scan.
pub async fn available(
    store: &dyn FleetStore,
    kind: ResourceKind,
    window: Window,
) -> Result<Vec<Uuid>, Error> {
    let busy: HashSet<Uuid> = store
        .busy_resource_ids(kind, window)
        .await?
        .into_iter()
        .collect();
    let mut free = store.list_resource_ids(kind).await?;
    free.retain(|id| !busy.contains(id));
    Ok(free)
}
