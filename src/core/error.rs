use std::fmt;

/// Error types for lapstat operations.
///
/// The analysis engine itself never fails; these cover the glue around it
/// (reading snapshots and configuration, CLI arguments).
#[derive(Debug)]
pub enum LapstatError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON snapshot parsing or serialization error
    Json(serde_json::Error),

    /// Invalid argument error
    InvalidArgument(String),

    /// Requested driver has no records in the snapshot
    DriverNotFound(String),
}

impl fmt::Display for LapstatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LapstatError::Io(err) => write!(f, "IO error: {err}"),
            LapstatError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LapstatError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            LapstatError::Json(err) => write!(f, "JSON error: {err}"),
            LapstatError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            LapstatError::DriverNotFound(driver) => write!(f, "Driver not found: {driver}"),
        }
    }
}

impl std::error::Error for LapstatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LapstatError::Io(err) => Some(err),
            LapstatError::TomlParsing(err) => Some(err),
            LapstatError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LapstatError {
    fn from(err: std::io::Error) -> Self {
        LapstatError::Io(err)
    }
}

impl From<toml::de::Error> for LapstatError {
    fn from(err: toml::de::Error) -> Self {
        LapstatError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for LapstatError {
    fn from(err: serde_json::Error) -> Self {
        LapstatError::Json(err)
    }
}

/// Type alias for Results using LapstatError
pub type Result<T> = std::result::Result<T, LapstatError>;
