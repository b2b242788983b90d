/// All primary keys are UUID v7 (time-ordered), assigned by the service.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Allocate a fresh time-ordered identifier.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}
