use thiserror::Error;

#[derive(Error, Debug)]
pub enum SioError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Error decoding {operation} response: {message}")]
    DecodeError { operation: String, message: String },

    #[error("No '{rel}' link on resource")]
    LinkNotFound { rel: String },

    #[error("{operation} is not implemented")]
    NotImplemented { operation: String },

    #[error("Error querying volumes: {message}")]
    QueryVolumesError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl SioError {
    /// 以操作名稱包裝 JSON 解碼錯誤
    pub fn decode(operation: &str, err: serde_json::Error) -> Self {
        SioError::DecodeError {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SioError>;
