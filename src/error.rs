//! Error types for the Aikido MCP server

use thiserror::Error;

/// Result type alias for Aikido MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MCP transport error: {0}")]
    Transport(String),
}

/// Remote API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// The OAuth client-credentials exchange returned a non-success status
    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchange { status: u16, body: String },

    /// An API call returned a non-success status
    #[error("Aikido API request failed with status {status}: {body}")]
    Request { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// An identifier that cannot be used as a URL path segment
    #[error("Invalid resource id '{0}'")]
    InvalidId(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Aikido API credentials not configured. Set AIKIDO_CLIENT_ID and AIKIDO_CLIENT_SECRET in the environment or a .env file."
    )]
    MissingCredentials,

    #[error("Unknown region '{0}'. Expected one of: eu, us, me")]
    InvalidRegion(String),

    #[error("Failed to load environment file: {0}")]
    EnvFile(String),
}

impl From<dotenvy::Error> for ConfigError {
    fn from(err: dotenvy::Error) -> Self {
        ConfigError::EnvFile(err.to_string())
    }
}

/// Tool invocation errors
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
}
