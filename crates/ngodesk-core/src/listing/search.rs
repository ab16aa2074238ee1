use crate::utils::contains_ignore_case;

/// A named string field of `T` that free-text search looks at.
pub struct SearchField<T> {
    pub name: &'static str,
    accessor: fn(&T) -> Option<&str>,
}

impl<T> SearchField<T> {
    pub fn new(name: &'static str, accessor: fn(&T) -> Option<&str>) -> Self {
        Self { name, accessor }
    }

    pub fn value<'a>(&self, record: &'a T) -> Option<&'a str> {
        (self.accessor)(record)
    }
}

/// Trim and lowercase a query. Returns None when nothing is left to match,
/// in which case every record passes.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive substring search over a fixed list of fields.
pub struct SearchFilter<T> {
    fields: Vec<SearchField<T>>,
}

impl<T> SearchFilter<T> {
    pub fn new(fields: Vec<SearchField<T>>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[SearchField<T>] {
        &self.fields
    }

    /// True if `query` occurs in at least one configured field of `record`.
    /// An empty or whitespace-only query matches everything.
    pub fn matches(&self, query: &str, record: &T) -> bool {
        match normalize_query(query) {
            None => true,
            Some(needle) => self.matches_normalized(&needle, record),
        }
    }

    /// Like `matches`, for a needle already passed through `normalize_query`.
    pub fn matches_normalized(&self, needle: &str, record: &T) -> bool {
        self.fields.iter().any(|field| {
            field
                .value(record)
                .map(|v| contains_ignore_case(v, needle))
                .unwrap_or(false)
        })
    }
}
