use std::fmt;

#[derive(Debug)]
pub enum AiHelperError {
    ApiError {
        status: u16,
        message: String,
    },
    ConfigError(String),
    NetworkError(reqwest::Error),
    Timeout,
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    UnexpectedResponse(String),
    Other(String),
}

impl AiHelperError {
    /// True for 401/403 responses (missing or invalid credentials).
    pub fn is_auth_error(&self) -> bool {
        matches!(self, AiHelperError::ApiError { status: 401 | 403, .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AiHelperError::ApiError { status: 429, .. })
    }
}

impl fmt::Display for AiHelperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiHelperError::ApiError { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            AiHelperError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AiHelperError::NetworkError(e) => write!(f, "Network error: {}", e),
            AiHelperError::Timeout => write!(f, "Request timeout"),
            AiHelperError::IoError(e) => write!(f, "IO error: {}", e),
            AiHelperError::JsonError(e) => write!(f, "JSON error: {}", e),
            AiHelperError::YamlError(e) => write!(f, "YAML error: {}", e),
            AiHelperError::UnexpectedResponse(msg) => write!(f, "Unexpected response: {}", msg),
            AiHelperError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AiHelperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AiHelperError::NetworkError(e) => Some(e),
            AiHelperError::IoError(e) => Some(e),
            AiHelperError::JsonError(e) => Some(e),
            AiHelperError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AiHelperError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiHelperError::Timeout
        } else {
            AiHelperError::NetworkError(err)
        }
    }
}

impl From<std::io::Error> for AiHelperError {
    fn from(err: std::io::Error) -> Self {
        AiHelperError::IoError(err)
    }
}

impl From<serde_json::Error> for AiHelperError {
    fn from(err: serde_json::Error) -> Self {
        AiHelperError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for AiHelperError {
    fn from(err: serde_yaml::Error) -> Self {
        AiHelperError::YamlError(err)
    }
}

impl From<anyhow::Error> for AiHelperError {
    fn from(err: anyhow::Error) -> Self {
        // Keep the context chain, `{:#}` joins it with ": "
        AiHelperError::Other(format!("{:#}", err))
    }
}

impl From<String> for AiHelperError {
    fn from(msg: String) -> Self {
        AiHelperError::Other(msg)
    }
}

impl From<&str> for AiHelperError {
    fn from(msg: &str) -> Self {
        AiHelperError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AiHelperError>;
