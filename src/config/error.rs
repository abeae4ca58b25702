use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid grid spacing dlon={dlon}, dlat={dlat}: {reason}")]
    InvalidSpacing {
        dlon: f64,
        dlat: f64,
        reason: String,
    },

    #[error("Contour sentinel must be a finite number, got {0}")]
    InvalidSentinel(f64),

    #[error("Invalid log level '{0}'")]
    InvalidLogLevel(String),
}
