//! Client-side tabular data presentation.
//!
//! Every dashboard screen runs the same pipeline over its records:
//!
//! ```text
//! records → scope → SearchFilter → FacetFilter → sort → Paginator → rows
//!                                              └→ SelectionSet (post-filter, pre-page)
//! ```
//!
//! `TabularListController` owns one instance of the pipeline and is
//! configured per screen with a `ListSpec`.

pub mod controller;
pub mod facet;
pub mod paginate;
pub mod search;
pub mod selection;
pub mod sort;
pub mod specs;
pub mod view;

pub use controller::{ListSpec, TabularListController};
pub use facet::{FacetDef, FacetFilter, FacetSelection};
pub use paginate::{Page, Paginator, DEFAULT_PAGE_SIZE};
pub use search::{normalize_query, SearchField, SearchFilter};
pub use selection::{CheckState, SelectScope, SelectionSet};
pub use sort::{sort_indices, sort_records, SortKey, SortState};
pub use view::ViewMode;

/// Fetch state of a list's backing data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}
