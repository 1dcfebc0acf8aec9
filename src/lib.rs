//! Hostparam - idempotent convergence of a single host parameter.
//!
//! This library provides the core functionality for the `hostparam` CLI tool:
//! reading the observed state of a named parameter on a remote host record,
//! deciding the minimal change that reconciles it with the caller's desired
//! state, applying that change, and reporting whether anything changed.

pub mod cli;
pub mod commands;
pub mod models;
pub mod reconcile;
pub mod store;

/// Library-level error type for hostparam operations.
///
/// Every variant is fatal: one of these terminates the run with
/// `changed = false`. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("host {0} not found in the parameter store")]
    HostNotFound(String),

    #[error("parameter store login failed")]
    AuthRejected,

    #[error("a value is required when declaring a parameter present")]
    MissingValue,

    #[error("parameter store rejected the request: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response from the parameter store: {0}")]
    Response(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for hostparam operations.
pub type Result<T> = std::result::Result<T, Error>;
