use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Failure of a call to the identity service.
///
/// A request either never got an answer ([`ApiError::Unreachable`]) or got
/// one with a non-success status ([`ApiError::Status`]). The two are kept
/// apart so callers can tell a dead network from a refused request.
#[derive(Debug)]
pub enum ApiError {
    Status(StatusCode, Option<ErrorBody>),
    Unreachable(reqwest::Error),
    Decode(reqwest::Error),
    Internal(reqwest::Error),
}

/// Coarse classification of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unauthorized,
    Conflict,
    BadRequest,
    Unreachable,
    Unknown,
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Status(StatusCode::UNAUTHORIZED, _) => FailureKind::Unauthorized,
            ApiError::Status(StatusCode::CONFLICT, _) => FailureKind::Conflict,
            ApiError::Status(StatusCode::BAD_REQUEST, _) => FailureKind::BadRequest,
            ApiError::Status(..) => FailureKind::Unknown,
            ApiError::Unreachable(_) => FailureKind::Unreachable,
            ApiError::Decode(_) | ApiError::Internal(_) => FailureKind::Unknown,
        }
    }

    /// Status code of the response, `None` when no response was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status(status, _) => Some(*status),
            ApiError::Decode(e) => e.status(),
            ApiError::Unreachable(_) | ApiError::Internal(_) => None,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::Internal(err)
        } else {
            ApiError::Unreachable(err)
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Status(status, Some(body)) => {
                write!(f, "({}) {}", status, body.describe())
            }
            ApiError::Status(status, None) => write!(f, "({})", status),
            ApiError::Unreachable(e) => write!(f, "Service unreachable: {}", e),
            ApiError::Decode(e) => write!(f, "Invalid response: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Status(..) => None,
            ApiError::Unreachable(e) | ApiError::Decode(e) | ApiError::Internal(e) => Some(e),
        }
    }
}

/// Error payload returned alongside a non-success status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    fn describe(&self) -> &str {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or("no detail")
    }
}
