use shared::forms::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("unauthorized")]
    Unauthorized { message: Option<String> },

    #[error("access denied")]
    Forbidden { message: Option<String> },

    #[error("server error ({status})")]
    Server { status: u16, message: Option<String> },

    #[error("request timed out")]
    Timeout,

    #[error("request failed ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Api { status: u16, message: Option<String> },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("no active session")]
    NoActiveSession,

    #[error("no refresh token available")]
    NoRefreshToken,
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

impl ClientError {
    /// Builds the error for a non-success HTTP status.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => ClientError::Unauthorized { message },
            403 => ClientError::Forbidden { message },
            s if s >= 500 => ClientError::Server { status, message },
            _ => ClientError::Api { status, message },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { .. } => Some(401),
            ClientError::Forbidden { .. } => Some(403),
            ClientError::Server { status, .. } | ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of the backend's error body, if it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ClientError::Unauthorized { message }
            | ClientError::Forbidden { message }
            | ClientError::Server { message, .. }
            | ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }

    /// 5xx responses and timeouts.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, ClientError::Server { .. } | ClientError::Timeout)
    }

    /// Message suitable for a store's `error` slot: the backend message when
    /// present, local conditions verbatim, `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(_) | ClientError::NoActiveSession | ClientError::NoRefreshToken => {
                self.to_string()
            }
            _ => self
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Network(error.to_string())
        }
    }
}
