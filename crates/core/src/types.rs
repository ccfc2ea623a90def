/// Scan identifiers are allocated by the analysis service and are
/// stable for the lifetime of the job.
pub type ScanId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
