//! Error types for the soil-wms crates.

use thiserror::Error;

/// Result type alias using WmsError.
pub type WmsResult<T> = Result<T, WmsError>;

/// Primary error type for WMS client operations.
///
/// "Layer not found" and "no conversion available" are deliberately absent:
/// those are represented as `None` and a pass-through respectively.
#[derive(Debug, Error)]
pub enum WmsError {
    // === Transport Errors ===
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("WMS endpoint returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Request timeout")]
    Timeout,

    // === Response Errors ===
    #[error("Failed to parse WMS response: {0}")]
    Parse(String),

    // === Caller Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },
}

impl WmsError {
    /// True for failures that happened before a response body was read.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            WmsError::Transport(_) | WmsError::HttpStatus { .. } | WmsError::Timeout
        )
    }

    /// Numeric code reported to tool-call clients (JSON-RPC conventions).
    pub fn tool_error_code(&self) -> i32 {
        match self {
            WmsError::InvalidParameter { .. } => -32602,
            WmsError::Parse(_) => -32603,
            WmsError::Timeout => -32001,
            WmsError::Transport(_) | WmsError::HttpStatus { .. } => -32000,
        }
    }
}

impl From<serde_json::Error> for WmsError {
    fn from(err: serde_json::Error) -> Self {
        WmsError::InvalidParameter {
            param: "arguments".to_string(),
            message: err.to_string(),
        }
    }
}
