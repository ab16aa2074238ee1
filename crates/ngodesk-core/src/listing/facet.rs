use std::collections::BTreeSet;

use crate::error::{CoreError, CoreResult};

/// Current narrowing applied to one facet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FacetSelection {
    #[default]
    All,
    Only(String),
    AnyOf(BTreeSet<String>),
}

impl FacetSelection {
    /// Whether a record with this facet value passes.
    pub fn admits(&self, value: &str) -> bool {
        match self {
            FacetSelection::All => true,
            FacetSelection::Only(selected) => selected == value,
            FacetSelection::AnyOf(set) => set.is_empty() || set.contains(value),
        }
    }

    /// An empty multi-select narrows nothing, same as `All`.
    pub fn is_all(&self) -> bool {
        match self {
            FacetSelection::All => true,
            FacetSelection::Only(_) => false,
            FacetSelection::AnyOf(set) => set.is_empty(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            FacetSelection::All => "All".to_string(),
            FacetSelection::Only(v) => v.clone(),
            FacetSelection::AnyOf(set) if set.is_empty() => "All".to_string(),
            FacetSelection::AnyOf(set) => set.iter().cloned().collect::<Vec<_>>().join(", "),
        }
    }
}

/// A categorical field of `T` that can narrow a list.
pub struct FacetDef<T> {
    pub key: &'static str,
    pub label: &'static str,
    accessor: fn(&T) -> &str,
}

impl<T> FacetDef<T> {
    pub fn new(key: &'static str, label: &'static str, accessor: fn(&T) -> &str) -> Self {
        Self { key, label, accessor }
    }

    pub fn value<'a>(&self, record: &'a T) -> &'a str {
        (self.accessor)(record)
    }
}

/// A set of facet definitions and their selections, combined with AND.
pub struct FacetFilter<T> {
    defs: Vec<FacetDef<T>>,
    selections: Vec<FacetSelection>,
}

impl<T> FacetFilter<T> {
    pub fn new(defs: Vec<FacetDef<T>>) -> Self {
        let selections = vec![FacetSelection::All; defs.len()];
        Self { defs, selections }
    }

    pub fn defs(&self) -> &[FacetDef<T>] {
        &self.defs
    }

    fn index_of(&self, key: &str) -> CoreResult<usize> {
        self.defs
            .iter()
            .position(|d| d.key == key)
            .ok_or_else(|| CoreError::UnknownFacet(key.to_string()))
    }

    pub fn selection(&self, key: &str) -> CoreResult<&FacetSelection> {
        let idx = self.index_of(key)?;
        Ok(&self.selections[idx])
    }

    /// Replace the selection for `key`. Returns true if it changed.
    pub fn set(&mut self, key: &str, selection: FacetSelection) -> CoreResult<bool> {
        let idx = self.index_of(key)?;
        if self.selections[idx] == selection {
            return Ok(false);
        }
        self.selections[idx] = selection;
        Ok(true)
    }

    /// Reset every facet to `All`. Returns true if anything changed.
    pub fn clear(&mut self) -> bool {
        let changed = self.selections.iter().any(|s| *s != FacetSelection::All);
        for s in &mut self.selections {
            *s = FacetSelection::All;
        }
        changed
    }

    pub fn active_count(&self) -> usize {
        self.selections.iter().filter(|s| !s.is_all()).count()
    }

    pub fn matches(&self, record: &T) -> bool {
        self.defs
            .iter()
            .zip(&self.selections)
            .all(|(def, sel)| sel.admits(def.value(record)))
    }

    /// Sorted distinct values of a facet across `records`.
    pub fn distinct_values<'a, I>(&self, key: &str, records: I) -> CoreResult<Vec<String>>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let idx = self.index_of(key)?;
        let def = &self.defs[idx];
        let values: BTreeSet<&str> = records.into_iter().map(|r| def.value(r)).collect();
        Ok(values.into_iter().map(str::to_string).collect())
    }

    /// Advance a facet through All → first value → … → last value → All.
    pub fn cycle<'a, I>(&mut self, key: &str, records: I) -> CoreResult<FacetSelection>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let values = self.distinct_values(key, records)?;
        let idx = self.index_of(key)?;

        let next = match &self.selections[idx] {
            FacetSelection::Only(current) => values
                .iter()
                .position(|v| v == current)
                .and_then(|pos| values.get(pos + 1))
                .map(|v| FacetSelection::Only(v.clone()))
                .unwrap_or(FacetSelection::All),
            FacetSelection::All | FacetSelection::AnyOf(_) => values
                .first()
                .map(|v| FacetSelection::Only(v.clone()))
                .unwrap_or(FacetSelection::All),
        };

        self.selections[idx] = next.clone();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doc {
        status: &'static str,
        region: &'static str,
    }

    fn docs() -> Vec<Doc> {
        vec![
            Doc { status: "Pending", region: "East Africa" },
            Doc { status: "Compliant", region: "East Africa" },
            Doc { status: "Pending", region: "South Asia" },
            Doc { status: "Expired", region: "South Asia" },
        ]
    }

    fn filter() -> FacetFilter<Doc> {
        FacetFilter::new(vec![
            FacetDef::new("status", "Status", |d: &Doc| d.status),
            FacetDef::new("region", "Region", |d: &Doc| d.region),
        ])
    }

    fn count(f: &FacetFilter<Doc>, docs: &[Doc]) -> usize {
        docs.iter().filter(|d| f.matches(d)).count()
    }

    #[test]
    fn test_all_always_passes() {
        let f = filter();
        assert_eq!(count(&f, &docs()), 4);
        assert!(FacetSelection::All.admits("anything"));
    }

    #[test]
    fn test_only_is_exact_match() {
        let mut f = filter();
        f.set("status", FacetSelection::Only("Pending".to_string())).unwrap();
        assert_eq!(count(&f, &docs()), 2);
        f.set("status", FacetSelection::Only("pending".to_string())).unwrap();
        assert_eq!(count(&f, &docs()), 0);
    }

    #[test]
    fn test_facets_combine_with_and() {
        let mut f = filter();
        f.set("status", FacetSelection::Only("Pending".to_string())).unwrap();
        f.set("region", FacetSelection::Only("South Asia".to_string())).unwrap();
        assert_eq!(count(&f, &docs()), 1);
        assert_eq!(f.active_count(), 2);
    }

    #[test]
    fn test_any_of_multi_select() {
        let mut f = filter();
        let set: BTreeSet<String> = ["Pending", "Expired"].iter().map(|s| s.to_string()).collect();
        f.set("status", FacetSelection::AnyOf(set)).unwrap();
        assert_eq!(count(&f, &docs()), 3);

        f.set("status", FacetSelection::AnyOf(BTreeSet::new())).unwrap();
        assert_eq!(count(&f, &docs()), 4);
        assert_eq!(f.active_count(), 0);
    }

    #[test]
    fn test_set_reports_change_and_unknown_key() {
        let mut f = filter();
        assert!(f.set("status", FacetSelection::Only("Expired".to_string())).unwrap());
        assert!(!f.set("status", FacetSelection::Only("Expired".to_string())).unwrap());
        assert_eq!(
            f.set("owner", FacetSelection::All),
            Err(CoreError::UnknownFacet("owner".to_string()))
        );
    }

    #[test]
    fn test_clear() {
        let mut f = filter();
        assert!(!f.clear());
        f.set("region", FacetSelection::Only("South Asia".to_string())).unwrap();
        assert!(f.clear());
        assert_eq!(f.selection("region").unwrap(), &FacetSelection::All);
    }

    #[test]
    fn test_distinct_values_sorted() {
        let f = filter();
        let d = docs();
        assert_eq!(
            f.distinct_values("status", &d).unwrap(),
            vec!["Compliant", "Expired", "Pending"]
        );
    }

    #[test]
    fn test_cycle_wraps_back_to_all() {
        let mut f = filter();
        let d = docs();
        assert_eq!(f.cycle("region", &d).unwrap(), FacetSelection::Only("East Africa".to_string()));
        assert_eq!(f.cycle("region", &d).unwrap(), FacetSelection::Only("South Asia".to_string()));
        assert_eq!(f.cycle("region", &d).unwrap(), FacetSelection::All);
    }

    #[test]
    fn test_selection_labels() {
        assert_eq!(FacetSelection::All.label(), "All");
        assert_eq!(FacetSelection::Only("Pending".to_string()).label(), "Pending");
        let set: BTreeSet<String> = ["B", "A"].iter().map(|s| s.to_string()).collect();
        assert_eq!(FacetSelection::AnyOf(set).label(), "A, B");
    }
}
