//! Error types for Twitter API operations.
//!
//! Server-side failures are [`RestError`]s whose [`RestErrorKind`] is looked
//! up by HTTP status code in an [`ErrorRegistry`]. Local contract violations
//! and transport failures are separate [`TwitterError`] variants so they can
//! never be mistaken for a response from the service.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use thiserror::Error;

static GLOBAL_REGISTRY: Lazy<Arc<ErrorRegistry>> = Lazy::new(|| Arc::new(ErrorRegistry::new()));

/// Errors that can occur during Twitter API operations.
#[derive(Debug, Error)]
pub enum TwitterError {
    /// The service answered with a non-success status.
    #[error(transparent)]
    Rest(#[from] RestError),

    /// A caller passed a value the operation cannot accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A model was used for a follow-up call before being bound to a client.
    #[error("{model} is not bound to a client")]
    Unbound { model: &'static str },

    /// The client a model was bound to has been dropped.
    #[error("The client this object was bound to has been released")]
    ClientReleased,

    /// Configuration is missing or incomplete.
    #[error("Twitter configuration required: {0}")]
    ConfigMissing(String),

    /// A header value could not be built from configuration.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// HTTP transport error (timeout, connection refused, TLS).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl TwitterError {
    /// The REST error carried by this error, if it came from the service.
    pub fn as_rest(&self) -> Option<&RestError> {
        match self {
            TwitterError::Rest(e) => Some(e),
            _ => None,
        }
    }

    /// The REST error kind, if this error came from the service.
    pub fn rest_kind(&self) -> Option<&RestErrorKind> {
        self.as_rest().map(|e| &e.kind)
    }
}

/// Result type alias for Twitter operations.
pub type Result<T> = core::result::Result<T, TwitterError>;

/// Status-code specific REST error variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RestErrorKind {
    /// 304: nothing new since the last query.
    NotModified,
    /// 400: REST rate limit reached.
    RateLimit,
    /// 401: credentials missing or invalid.
    Unauthorized,
    /// 403: update limit reached or action refused.
    Forbidden,
    /// 404: resource not found.
    NotFound,
    /// 406: requested format not understood.
    NotAcceptable,
    /// 420: search rate limit reached.
    SearchRateLimit,
    /// 500: unknown server failure.
    InternalServer,
    /// 502: servers are being upgraded.
    BadGateway,
    /// 503: servers cannot handle the current load.
    ServiceUnavailable,
    /// Variant registered by the caller under its own name.
    Custom(Cow<'static, str>),
    /// Status code without a registration.
    Generic,
}

impl RestErrorKind {
    /// Registrations every fresh registry starts with.
    pub const DEFAULTS: [(u16, RestErrorKind); 10] = [
        (304, RestErrorKind::NotModified),
        (400, RestErrorKind::RateLimit),
        (401, RestErrorKind::Unauthorized),
        (403, RestErrorKind::Forbidden),
        (404, RestErrorKind::NotFound),
        (406, RestErrorKind::NotAcceptable),
        (420, RestErrorKind::SearchRateLimit),
        (500, RestErrorKind::InternalServer),
        (502, RestErrorKind::BadGateway),
        (503, RestErrorKind::ServiceUnavailable),
    ];

    /// Short name of the variant.
    pub fn name(&self) -> &str {
        match self {
            RestErrorKind::NotModified => "NotModified",
            RestErrorKind::RateLimit => "RateLimit",
            RestErrorKind::Unauthorized => "Unauthorized",
            RestErrorKind::Forbidden => "Forbidden",
            RestErrorKind::NotFound => "NotFound",
            RestErrorKind::NotAcceptable => "NotAcceptable",
            RestErrorKind::SearchRateLimit => "SearchRateLimit",
            RestErrorKind::InternalServer => "InternalServer",
            RestErrorKind::BadGateway => "BadGateway",
            RestErrorKind::ServiceUnavailable => "ServiceUnavailable",
            RestErrorKind::Custom(name) => name,
            RestErrorKind::Generic => "RESTError",
        }
    }
}

impl fmt::Display for RestErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error raised for a non-success response from the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP {code}: {message} at {uri}")]
pub struct RestError {
    /// Variant the status code is registered as.
    pub kind: RestErrorKind,
    /// HTTP status code.
    pub code: u16,
    /// HTTP reason phrase.
    pub message: String,
    /// Request URI (path and query) that produced the response.
    pub uri: String,
    /// The `error` field of the JSON body, when present.
    pub error: Option<String>,
}

/// Mapping from HTTP status code to the error variant raised for it.
///
/// Registries are shared behind an `Arc`; the process-wide instance is
/// returned by [`ErrorRegistry::global`] and is what [`crate::Config`] uses
/// by default.
pub struct ErrorRegistry {
    entries: RwLock<HashMap<u16, RestErrorKind>>,
}

impl ErrorRegistry {
    /// Create a registry seeded with the default registrations.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(RestErrorKind::DEFAULTS.into_iter().collect()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> Arc<ErrorRegistry> {
        GLOBAL_REGISTRY.clone()
    }

    /// Register (or replace) the variant raised for `code`.
    pub fn register(&self, code: u16, kind: RestErrorKind) {
        tracing::debug!(code, kind = %kind, "registering REST error variant");
        self.entries.write().insert(code, kind);
    }

    /// Variant for `code`, falling back to [`RestErrorKind::Generic`].
    pub fn lookup(&self, code: u16) -> RestErrorKind {
        self.entries
            .read()
            .get(&code)
            .cloned()
            .unwrap_or(RestErrorKind::Generic)
    }

    /// Whether `code` has an explicit registration.
    pub fn is_registered(&self, code: u16) -> bool {
        self.entries.read().contains_key(&code)
    }

    /// Drop caller registrations and restore the defaults.
    pub fn reset(&self) {
        *self.entries.write() = RestErrorKind::DEFAULTS.into_iter().collect();
    }
}

impl Default for ErrorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ErrorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codes: Vec<u16> = self.entries.read().keys().copied().collect();
        codes.sort_unstable();
        f.debug_struct("ErrorRegistry").field("codes", &codes).finish()
    }
}
