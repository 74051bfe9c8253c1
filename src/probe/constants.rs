//! Constants for the probe engine (asset path template, request shape).

/// Path prefix of the versioned admin bundle, relative to the base URL.
pub const ASSET_PATH_PREFIX: &str = "/static/dist/admin/AdminInterface-";

/// File extension of the versioned admin bundle.
pub const ASSET_PATH_SUFFIX: &str = ".js";

/// Default size of the partial-content window requested per probe.
pub const DEFAULT_RANGE_BYTES: u64 = 1024;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

/// Status rendered for probes that never received an HTTP response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// Checksum placeholder rendered when no body was received.
pub const ABSENT_CHECKSUM: &str = "-";
