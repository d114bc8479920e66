// Bulk dispatch constants (ADR: No magic values)

/// Lowest accepted worker count
pub const MIN_CONCURRENCY: usize = 1;

/// Highest accepted worker count
pub const MAX_CONCURRENCY: usize = 10;

/// Worker count used when the caller does not pick one
pub const DEFAULT_CONCURRENCY: usize = 3;

/// Default file name for the failure export
pub const FAILURES_CSV_FILE_NAME: &str = "bulk-call-failures.csv";

/// Header row of the failure export
pub const FAILURES_CSV_HEADER: &str = "phone,error";
