use serde::{Deserialize, Serialize};

/// A bookable entity. Conflict checks and availability queries treat vehicles
/// and drivers uniformly; everything beyond the id is opaque here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Vehicle,
    Driver,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Vehicle => "vehicle",
            ResourceKind::Driver => "driver",
        }
    }
}
