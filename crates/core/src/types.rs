/// All primary keys are random (v4) UUIDs assigned by the server.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh primary key.
pub fn new_id() -> DbId {
    uuid::Uuid::new_v4()
}
