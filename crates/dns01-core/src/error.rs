//! Error types for DNS-01 solvers
//!
//! Variants follow the failure classes a solver can hit: configuration,
//! transport, protocol (status/body), provider-level semantics and DNS.

use thiserror::Error;

/// Result type alias for solver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for DNS-01 solvers
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing or invalid credentials, bad settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport errors: request construction, connection, timeout, body read
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered with something other than HTTP 200
    #[error("invalid code ({status}), error: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The response body did not decode into the expected shape
    #[error("the request to {endpoint} sent a response with a body which is an invalid format ({reason}): {body:?}")]
    InvalidBody {
        /// Endpoint path (never the full URL, it carries credentials)
        endpoint: String,
        /// Decoder error
        reason: String,
        /// Raw response body
        body: String,
    },

    /// No zone owning the FQDN could be found
    #[error("zone not found: {0}")]
    ZoneNotFound(String),

    /// Provider-level semantic failure
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message, including the provider's status description
        message: String,
    },

    /// Resolver failure during zone discovery
    #[error("DNS error: {0}")]
    Dns(String),

    /// No solver registered under the given name
    #[error("Unknown solver: {0}")]
    UnknownSolver(String),

    /// An error surfaced by a solver, prefixed with the solver's name
    #[error("{provider}: {source}")]
    Solver {
        /// Solver name
        provider: &'static str,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP (transport) error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an unexpected-status error
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid-body error
    pub fn invalid_body(
        endpoint: impl Into<String>,
        reason: impl std::fmt::Display,
        body: impl Into<String>,
    ) -> Self {
        Self::InvalidBody {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
            body: body.into(),
        }
    }

    /// Create a "zone not found" error
    pub fn zone_not_found(msg: impl Into<String>) -> Self {
        Self::ZoneNotFound(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a DNS resolver error
    pub fn dns(msg: impl Into<String>) -> Self {
        Self::Dns(msg.into())
    }

    /// Wrap an error with the name of the solver that surfaced it
    ///
    /// Already-wrapped errors are returned unchanged so the prefix appears once.
    pub fn solver(provider: &'static str, err: Error) -> Self {
        match err {
            Self::Solver { .. } => err,
            other => Self::Solver {
                provider,
                source: Box::new(other),
            },
        }
    }

    /// True for errors caused by configuration rather than the provider
    pub fn is_config(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Solver { source, .. } => source.is_config(),
            _ => false,
        }
    }
}
