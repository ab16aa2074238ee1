//! REST client for the ngodesk backend.
//!
//! Each dashboard screen reads one JSON collection (`GET {base}/{dataset}`).
//! Document links and bulk mutations are the only other calls. Requests
//! carry a bearer token when one is configured.

pub mod client;
pub mod error;

pub use client::{ApiClient, DocumentAction, DocumentLink};
pub use error::ApiError;
