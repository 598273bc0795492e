/// All entity primary keys are `BIGSERIAL` in PostgreSQL.
pub type DbId = i64;

/// All timestamps are stored as `TIMESTAMPTZ` and handled as UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
