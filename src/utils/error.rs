use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Weather API returned {status} for {endpoint}")]
    FetchFailedError {
        status: reqwest::StatusCode,
        endpoint: String,
    },

    #[error("Missing or non-numeric field in weather response: {field}")]
    MissingFieldError { field: String },

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Coordinate is not a decimal number: '{value}'")]
    InvalidCoordinateError { value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, EtlError>;
