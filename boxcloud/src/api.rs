//! Wire-level building blocks shared by every endpoint.
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::{trace, warn};

use crate::errors::Error;

/// Error codes returned by the upstream API in [`ApiErrorBody::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The resource doesn't exist, or the token can't see it.
    NotFound,
    /// Missing, expired or otherwise invalid access token.
    Unauthorized,
    /// The token is valid but lacks the permissions.
    AccessDenied,
    /// Like `AccessDenied`, but more specific about scopes.
    AccessDeniedInsufficientPermissions,
    /// Generic conflict.
    Conflict,
    /// Another user already uses this login.
    UserLoginAlreadyUsed,
    /// An email alias or item with this name already exists.
    ItemNameInUse,
    /// Malformed or invalid request parameters.
    BadRequest,
    /// A parameter was rejected by validation.
    InvalidParameter,
    /// The body could not be parsed.
    BadRequestBody,
}

/// A JSON error body returned by the API on non-2xx responses.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Always `error`.
    #[serde(rename = "type")]
    pub typ: Option<String>,
    /// HTTP status code, duplicated in the body.
    pub status: Option<u16>,
    /// Machine-readable error code.
    pub code: Option<MaybeUnknown<ErrorCode>>,
    /// Human-readable message.
    pub message: Option<String>,
    /// Id to hand to Box support.
    pub request_id: Option<String>,
    /// Link to the documentation of this error.
    pub help_url: Option<String>,
}

impl ApiErrorBody {
    /// The error code, if it is one this crate knows about.
    #[must_use]
    pub fn known_code(&self) -> Option<ErrorCode> {
        match self.code {
            Some(MaybeUnknown::Known(code)) => Some(code),
            _ => None,
        }
    }
}

/// Turn a non-2xx response into an [`Error`].
///
/// Bodies that aren't an error envelope still produce an error carrying
/// the status code.
pub(crate) async fn read_error(res: Response) -> Error {
    let status = res.status();

    let body = match res.bytes().await {
        Ok(body) => body,
        Err(err) => return err.into(),
    };

    trace!("{}", String::from_utf8_lossy(&body));

    match serde_json::from_slice::<ApiErrorBody>(&body) {
        Ok(mut err) if err.typ.as_deref() == Some("error") => {
            if let Some(MaybeUnknown::Unknown(code)) = &err.code {
                warn!("unrecognized error code `{}` ({})", code, status);
            }

            // The envelope's own `status` may be missing or disagree.
            err.status = Some(status.as_u16());
            err.into()
        }
        _ => Error::UnexpectedStatus(status),
    }
}

/// Total-count-plus-entries envelope used by list endpoints.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    /// Number of entries in the whole collection, not only this page.
    #[serde(default)]
    pub total_count: u64,
    /// Raw entries. Prefer [`Collection::entries`].
    #[serde(default = "Vec::new")]
    pub entries: Vec<T>,
    /// Page size, for paginated endpoints.
    pub limit: Option<u64>,
    /// Page offset, for paginated endpoints.
    pub offset: Option<u64>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            entries: Vec::new(),
            limit: None,
            offset: None,
        }
    }
}

impl<T> Collection<T> {
    /// Entries of the collection. Always empty when `total_count` is zero.
    #[must_use]
    pub fn entries(&self) -> &[T] {
        if self.total_count == 0 {
            &[]
        } else {
            &self.entries
        }
    }

    /// Owned version of [`Collection::entries`].
    #[must_use]
    pub fn into_entries(self) -> Vec<T> {
        if self.total_count == 0 {
            Vec::new()
        } else {
            self.entries
        }
    }

    /// `true` if there are no entries to expose.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// A serde wrapper for handling unknown enum variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaybeUnknown<T> {
    /// A known type.
    Known(T),
    /// An unknown type.
    Unknown(String),
}

impl<T> From<T> for MaybeUnknown<T> {
    fn from(known: T) -> Self {
        Self::Known(known)
    }
}

/// Status codes that mean "deleted" for endpoints without a body.
pub(crate) fn is_no_content(status: StatusCode) -> bool {
    status == StatusCode::NO_CONTENT
}
