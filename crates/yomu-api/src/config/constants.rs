//! API configuration constants

/// Default bind address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Default log level when neither `YOMU_LOG_LEVEL` nor `RUST_LOG` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Worst-case growth of a string once JSON-escaped (`\u0000`)
pub const JSON_ESCAPE_FACTOR: usize = 6;

/// Room for the JSON envelope around `text`
pub const BODY_OVERHEAD_BYTES: usize = 1_024;

/// Environment variable: bind address
pub const ENV_BIND_ADDR: &str = "YOMU_API_BIND_ADDR";

/// Environment variable: resource directory extending the embedded resources
pub const ENV_DATA_DIR: &str = "YOMU_DATA_DIR";

/// Environment variable: log level
pub const ENV_LOG_LEVEL: &str = "YOMU_LOG_LEVEL";

/// Environment variable: maximum input text length (bytes), unlimited when unset
pub const ENV_MAX_TEXT_BYTES: &str = "YOMU_MAX_TEXT_BYTES";
