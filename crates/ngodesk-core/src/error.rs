//! Error types shared by the list engine, routing and configuration.
//!
//! HTTP failures have their own `ApiError` in the `api` module; cache and
//! plumbing code uses `anyhow` with context instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Page size must be at least 1")]
    InvalidPageSize,

    #[error("Unknown facet: {0}")]
    UnknownFacet(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Invalid configuration value for '{field}': {reason}")]
    Config { field: String, reason: String },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
