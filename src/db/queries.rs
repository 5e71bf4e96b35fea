pub const FIND_OVERLAPPING_BY_VEHICLE: &str = r#"
SELECT id, code, vehicle_id, driver_id, start_time, end_time, status,
       initial_odometer, final_odometer, comment
FROM assignments
WHERE vehicle_id = $1
  AND start_time < $3
  AND end_time > $2
  AND ($4::uuid IS NULL OR id <> $4);
"#;

pub const FIND_OVERLAPPING_BY_DRIVER: &str = r#"
SELECT id, code, vehicle_id, driver_id, start_time, end_time, status,
       initial_odometer, final_odometer, comment
FROM assignments
WHERE driver_id = $1
  AND start_time < $3
  AND end_time > $2
  AND ($4::uuid IS NULL OR id <> $4);
"#;

pub const BUSY_VEHICLE_IDS: &str = r#"
SELECT DISTINCT vehicle_id FROM missions
WHERE start_time < $2 AND end_time > $1;
"#;

pub const BUSY_DRIVER_IDS: &str = r#"
SELECT DISTINCT driver_id FROM missions
WHERE start_time < $2 AND end_time > $1;
"#;

pub const LIST_VEHICLE_IDS: &str = r#"
SELECT id FROM vehicles;
"#;

pub const LIST_DRIVER_IDS: &str = r#"
SELECT id FROM drivers;
"#;

pub const VEHICLE_EXISTS: &str = r#"
SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1);
"#;

pub const DRIVER_EXISTS: &str = r#"
SELECT EXISTS(SELECT 1 FROM drivers WHERE id = $1);
"#;

pub const INSERT_MISSION: &str = r#"
INSERT INTO missions (id, code, vehicle_id, driver_id, start_time, end_time,
                      origin, destination, reason, distance_km, status, driver_response)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12);
"#;

pub const SELECT_MISSION: &str = r#"
SELECT id, code, vehicle_id, driver_id, start_time, end_time,
       origin, destination, reason, distance_km, status, driver_response
FROM missions
WHERE id = $1;
"#;

pub const SET_DRIVER_RESPONSE: &str = r#"
UPDATE missions
SET driver_response = $2,
    status = $3
WHERE id = $1
  AND driver_response = 'pending';
"#;

pub const COMPLETE_MISSION: &str = r#"
UPDATE missions
SET status = 'completed',
    end_time = $2,
    distance_km = $3
WHERE id = $1
  AND status IN ('accepted', 'in_progress');
"#;

pub const INSERT_MISSION_NOTE: &str = r#"
INSERT INTO mission_notes (id, mission_id, author_id, body, created_at)
VALUES ($1, $2, $3, $4, NOW());
"#;

pub const INSERT_ASSIGNMENT: &str = r#"
INSERT INTO assignments (id, code, vehicle_id, driver_id, start_time, end_time,
                         status, initial_odometer, final_odometer, comment)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10);
"#;

pub const SELECT_ASSIGNMENT: &str = r#"
SELECT id, code, vehicle_id, driver_id, start_time, end_time, status,
       initial_odometer, final_odometer, comment
FROM assignments
WHERE id = $1;
"#;

pub const UPDATE_ASSIGNMENT: &str = r#"
UPDATE assignments
SET vehicle_id = $2,
    driver_id = $3,
    start_time = $4,
    end_time = $5,
    initial_odometer = $6,
    comment = $7
WHERE id = $1;
"#;

pub const COMPLETE_ASSIGNMENT: &str = r#"
UPDATE assignments
SET status = 'completed',
    final_odometer = $2
WHERE id = $1
  AND status <> 'completed';
"#;

pub const INSERT_GPS_FIX: &str = r#"
INSERT INTO gps_fixes (mission_id, latitude, longitude, recorded_at)
VALUES ($1, $2, $3, $4)
RETURNING fix_id, mission_id, latitude, longitude, recorded_at;
"#;

pub const LIST_GPS_FIXES: &str = r#"
SELECT fix_id, mission_id, latitude, longitude, recorded_at
FROM gps_fixes
WHERE mission_id = $1
ORDER BY recorded_at;
"#;

pub const VEHICLE_DEADLINES: &str = r#"
SELECT id, make || ' ' || model || ' - ' || plate AS label,
       insurance_expires, inspection_expires
FROM vehicles;
"#;

pub const ACTIVE_DRIVER_DEADLINES: &str = r#"
SELECT id, name, license_expires FROM drivers WHERE status = 'active';
"#;

pub const DOCUMENT_DEADLINES: &str = r#"
SELECT d.vehicle_id, v.make || ' ' || v.model || ' - ' || v.plate AS vehicle_label,
       d.kind, d.expires
FROM vehicle_documents d
JOIN vehicles v ON v.id = d.vehicle_id;
"#;

pub const DELETE_UNRESOLVED_ALERTS: &str = r#"
DELETE FROM alerts WHERE resolved = FALSE;
"#;

pub const INSERT_ALERT: &str = r#"
INSERT INTO alerts (id, code, vehicle_id, driver_id, kind, message, severity, raised_at, resolved)
VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), FALSE);
"#;

pub const LIST_UNRESOLVED_ALERTS: &str = r#"
SELECT id, code, vehicle_id, driver_id, kind, message, severity, raised_at, resolved
FROM alerts
WHERE resolved = FALSE
ORDER BY raised_at DESC;
"#;

pub const RESOLVE_ALERT: &str = r#"
UPDATE alerts SET resolved = TRUE WHERE id = $1;
"#;
