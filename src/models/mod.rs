use uuid::Uuid;

pub mod alert;
pub mod assignment;
pub mod deadline;
pub mod gps_fix;
pub mod mission;
pub mod resource;

/// Short human-facing identifier: first 8 hex chars of a v4 uuid, uppercased.
pub fn short_code() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}
