//! Core library for ngodesk, the nonprofit operations dashboard.
//!
//! Every dashboard screen is a [`listing::TabularListController`] over one
//! record type. Records come from the backend through [`api::ApiClient`],
//! from the local [`cache`], or from demo [`fixtures`].

pub mod actions;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod listing;
pub mod models;
pub mod payload;
pub mod routing;
pub mod stats;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use cache::{CacheManager, CachedData};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use listing::{LoadState, ListSpec, TabularListController, ViewMode};
pub use models::{Dataset, Record};
pub use payload::Payload;
pub use routing::{Module, Screen};
