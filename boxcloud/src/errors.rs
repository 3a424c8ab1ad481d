//! Nobody is perfect.
use reqwest::StatusCode;
use thiserror::Error;

use crate::api::{ApiErrorBody, ErrorCode, MaybeUnknown};

/// Error used by the entire crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Url error.
    #[error("invalid url")]
    UrlError(#[from] url::ParseError),

    /// The request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// The HTTP client or request could not be built, e.g. due to
    /// an access token that isn't a valid header value.
    #[error("invalid request: {0}")]
    InvalidRequest(#[source] reqwest::Error),

    /// The resource passed in lacks an id.
    #[error("resource has no id")]
    MissingId,

    /// A path segment (usually an id) that can't be sent as-is.
    #[error("invalid path segment {0:?}")]
    InvalidPathSegment(String),

    /// HTTP error.
    #[error("{0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON deserialization error.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Upstream (unrecognized) Box error.
    #[error("box error: {}", message(.0))]
    BoxError(ApiErrorBody),

    /// A non-2xx response without an error body.
    #[error("unexpected status {0}")]
    UnexpectedStatus(StatusCode),

    /// Not found.
    #[error("not found: {}", message(.0))]
    NotFound(ApiErrorBody),

    /// Bad credentials.
    #[error("bad credentials: {}", message(.0))]
    BadCredentials(ApiErrorBody),

    /// Insufficient permissions.
    #[error("access denied: {}", message(.0))]
    AccessDenied(ApiErrorBody),

    /// Login, alias or name conflict.
    #[error("already exists: {}", message(.0))]
    AlreadyExists(ApiErrorBody),

    /// Invalid argument.
    #[error("invalid argument: {}", message(.0))]
    InvalidArgument(ApiErrorBody),
}

fn message(body: &ApiErrorBody) -> &str {
    body.message.as_deref().unwrap_or("no message")
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not be assembled. Nothing was sent.
    Construction,
    /// Network-level failure while sending or receiving.
    Transport,
    /// The response body did not have the expected shape.
    Decode,
    /// The API answered with a non-2xx status.
    Api,
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UrlError(_)
            | Error::InvalidBody(_)
            | Error::InvalidRequest(_)
            | Error::MissingId
            | Error::InvalidPathSegment(_) => ErrorKind::Construction,
            Error::HttpError(_) => ErrorKind::Transport,
            Error::Decode(_) => ErrorKind::Decode,
            Error::BoxError(_)
            | Error::UnexpectedStatus(_)
            | Error::NotFound(_)
            | Error::BadCredentials(_)
            | Error::AccessDenied(_)
            | Error::AlreadyExists(_)
            | Error::InvalidArgument(_) => ErrorKind::Api,
        }
    }

    /// HTTP status of the response that caused this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::UnexpectedStatus(status) => Some(*status),
            Error::HttpError(err) => err.status(),
            _ => self
                .body()
                .and_then(|body| body.status)
                .and_then(|s| StatusCode::from_u16(s).ok()),
        }
    }

    /// The error envelope the API answered with, if any.
    #[must_use]
    pub fn body(&self) -> Option<&ApiErrorBody> {
        match self {
            Error::BoxError(body)
            | Error::NotFound(body)
            | Error::BadCredentials(body)
            | Error::AccessDenied(body)
            | Error::AlreadyExists(body)
            | Error::InvalidArgument(body) => Some(body),
            _ => None,
        }
    }
}

impl From<ApiErrorBody> for Error {
    fn from(err: ApiErrorBody) -> Self {
        let code = match err.code {
            Some(MaybeUnknown::Known(code)) => code,
            _ => return Self::BoxError(err),
        };

        match code {
            ErrorCode::NotFound => Error::NotFound(err),
            ErrorCode::Unauthorized => Error::BadCredentials(err),
            ErrorCode::AccessDenied | ErrorCode::AccessDeniedInsufficientPermissions => {
                Error::AccessDenied(err)
            }
            ErrorCode::Conflict | ErrorCode::UserLoginAlreadyUsed | ErrorCode::ItemNameInUse => {
                Error::AlreadyExists(err)
            }
            ErrorCode::BadRequest | ErrorCode::InvalidParameter | ErrorCode::BadRequestBody => {
                Error::InvalidArgument(err)
            }
        }
    }
}
