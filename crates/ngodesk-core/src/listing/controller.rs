use std::cell::OnceCell;
use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::models::Record;

use super::facet::{FacetDef, FacetFilter, FacetSelection};
use super::paginate::{Page, Paginator, DEFAULT_PAGE_SIZE};
use super::search::{normalize_query, SearchField, SearchFilter};
use super::selection::{CheckState, SelectScope, SelectionSet};
use super::sort::{sort_indices, SortKey, SortState};
use super::view::ViewMode;
use super::LoadState;

/// Per-screen configuration of the list pipeline.
pub struct ListSpec<T> {
    pub noun: &'static str,
    pub search_fields: Vec<SearchField<T>>,
    pub facets: Vec<FacetDef<T>>,
    pub sort_keys: Vec<SortKey<T>>,
    /// Base predicate applied before search, e.g. archived grants only
    pub scope: Option<fn(&T) -> bool>,
    /// Which records a bulk action may touch
    pub eligible: Option<fn(&T) -> bool>,
    pub page_size: usize,
    pub default_view: ViewMode,
    pub default_sort: SortState,
}

impl<T> ListSpec<T> {
    pub fn new(noun: &'static str) -> Self {
        Self {
            noun,
            search_fields: Vec::new(),
            facets: Vec::new(),
            sort_keys: Vec::new(),
            scope: None,
            eligible: None,
            page_size: DEFAULT_PAGE_SIZE,
            default_view: ViewMode::default(),
            default_sort: SortState::default(),
        }
    }

    pub fn search(mut self, name: &'static str, accessor: fn(&T) -> Option<&str>) -> Self {
        self.search_fields.push(SearchField::new(name, accessor));
        self
    }

    pub fn facet(mut self, key: &'static str, label: &'static str, accessor: fn(&T) -> &str) -> Self {
        self.facets.push(FacetDef::new(key, label, accessor));
        self
    }

    pub fn sort(
        mut self,
        key: &'static str,
        label: &'static str,
        compare: fn(&T, &T) -> Ordering,
    ) -> Self {
        self.sort_keys.push(SortKey::new(key, label, compare));
        self
    }

    pub fn scoped(mut self, predicate: fn(&T) -> bool) -> Self {
        self.scope = Some(predicate);
        self
    }

    pub fn eligible(mut self, predicate: fn(&T) -> bool) -> Self {
        self.eligible = Some(predicate);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn view(mut self, mode: ViewMode) -> Self {
        self.default_view = mode;
        self
    }

    pub fn sorted_by(mut self, key: &'static str, ascending: bool) -> Self {
        self.default_sort = SortState::by(key, ascending);
        self
    }
}

/// Search, facet, sort, paginate and select over one screen's records.
pub struct TabularListController<T> {
    noun: &'static str,
    records: Vec<T>,
    load_state: LoadState,
    search: SearchFilter<T>,
    query: String,
    facets: FacetFilter<T>,
    sort_keys: Vec<SortKey<T>>,
    sort: SortState,
    scope: Option<fn(&T) -> bool>,
    eligible: Option<fn(&T) -> bool>,
    paginator: Paginator,
    page: usize,
    selection: SelectionSet,
    view_mode: ViewMode,
    /// Positions of the filtered, sorted records. Reset by every mutation
    /// that can change membership or order.
    filtered_cache: OnceCell<Vec<usize>>,
}

fn in_scope<T>(scope: Option<fn(&T) -> bool>, record: &T) -> bool {
    scope.map(|f| f(record)).unwrap_or(true)
}

impl<T: Record> TabularListController<T> {
    pub fn new(spec: ListSpec<T>) -> CoreResult<Self> {
        let paginator = Paginator::new(spec.page_size)?;
        if let Some(column) = spec.default_sort.column {
            if !spec.sort_keys.iter().any(|k| k.key == column) {
                return Err(CoreError::UnknownSortKey(column.to_string()));
            }
        }

        Ok(Self {
            noun: spec.noun,
            records: Vec::new(),
            load_state: LoadState::Idle,
            search: SearchFilter::new(spec.search_fields),
            query: String::new(),
            facets: FacetFilter::new(spec.facets),
            sort_keys: spec.sort_keys,
            sort: spec.default_sort,
            scope: spec.scope,
            eligible: spec.eligible,
            paginator,
            page: 1,
            selection: SelectionSet::new(),
            view_mode: spec.default_view,
            filtered_cache: OnceCell::new(),
        })
    }

    pub fn noun(&self) -> &'static str {
        self.noun
    }

    // =========================================================================
    // Data
    // =========================================================================

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Replace the backing records. Selected ids that no longer exist are
    /// dropped and the current page is clamped.
    pub fn set_records(&mut self, records: Vec<T>) {
        let ids: HashSet<&str> = records.iter().map(|r| r.id()).collect();
        self.selection.retain(|id| ids.contains(id));
        drop(ids);

        debug!(noun = self.noun, count = records.len(), "List records replaced");
        self.records = records;
        self.invalidate();
        self.load_state = LoadState::Loaded;
        self.page = self.paginator.clamp(self.page, self.filtered_count());
    }

    pub fn begin_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Record a fetch failure. Existing records stay on screen; the error
    /// only replaces the rows when there is nothing to show.
    pub fn fail_loading(&mut self, error: impl Into<String>) {
        self.load_state = LoadState::Failed(error.into());
    }

    /// Apply `update` to each record whose id is in `ids`. Returns how many changed.
    pub fn update_records(&mut self, ids: &[String], mut update: impl FnMut(&mut T)) -> usize {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut touched = 0;
        for record in self.records.iter_mut() {
            if wanted.contains(record.id()) {
                update(record);
                touched += 1;
            }
        }
        if touched > 0 {
            self.invalidate();
        }
        touched
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Change the search query. Any change returns to page 1.
    pub fn set_query(&mut self, query: &str) {
        if self.query != query {
            self.query = query.to_string();
            self.invalidate();
            self.page = 1;
        }
    }

    pub fn facet_defs(&self) -> &[FacetDef<T>] {
        self.facets.defs()
    }

    pub fn facet_selection(&self, key: &str) -> CoreResult<&FacetSelection> {
        self.facets.selection(key)
    }

    pub fn set_facet(&mut self, key: &str, selection: FacetSelection) -> CoreResult<()> {
        if self.facets.set(key, selection)? {
            self.invalidate();
            self.page = 1;
        }
        Ok(())
    }

    /// Step a facet to its next value (wrapping back to All). Only values
    /// present on this screen's scoped records are offered.
    pub fn cycle_facet(&mut self, key: &str) -> CoreResult<FacetSelection> {
        let scope = self.scope;
        let scoped = self.records.iter().filter(|r| in_scope(scope, *r));
        let next = self.facets.cycle(key, scoped)?;
        self.invalidate();
        self.page = 1;
        Ok(next)
    }

    /// Values a facet can take on this screen, for building pickers.
    pub fn facet_values(&self, key: &str) -> CoreResult<Vec<String>> {
        let scoped = self.records.iter().filter(|r| in_scope(self.scope, *r));
        self.facets.distinct_values(key, scoped)
    }

    pub fn active_facet_count(&self) -> usize {
        self.facets.active_count()
    }

    pub fn clear_filters(&mut self) {
        let had_query = !self.query.is_empty();
        self.query.clear();
        if self.facets.clear() || had_query {
            self.invalidate();
            self.page = 1;
        }
    }

    pub fn sort_keys(&self) -> &[SortKey<T>] {
        &self.sort_keys
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn toggle_sort(&mut self, key: &str) -> CoreResult<()> {
        let column = self
            .sort_keys
            .iter()
            .find(|k| k.key == key)
            .map(|k| k.key)
            .ok_or_else(|| CoreError::UnknownSortKey(key.to_string()))?;
        self.sort.toggle(column);
        self.invalidate();
        self.page = 1;
        Ok(())
    }

    fn invalidate(&mut self) {
        self.filtered_cache.take();
    }

    fn filtered_indices(&self) -> &[usize] {
        self.filtered_cache.get_or_init(|| {
            let needle = normalize_query(&self.query);
            let mut indices: Vec<usize> = self
                .records
                .iter()
                .enumerate()
                .filter(|(_, r)| in_scope(self.scope, *r))
                .filter(|(_, r)| match &needle {
                    Some(n) => self.search.matches_normalized(n, r),
                    None => true,
                })
                .filter(|(_, r)| self.facets.matches(r))
                .map(|(i, _)| i)
                .collect();
            sort_indices(&mut indices, &self.records, &self.sort_keys, &self.sort);
            indices
        })
    }

    /// Records passing scope, search and facets, in sorted order.
    pub fn filtered(&self) -> Vec<&T> {
        self.filtered_indices().iter().map(|&i| &self.records[i]).collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered_indices().len()
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn set_page_size(&mut self, page_size: usize) -> CoreResult<()> {
        self.paginator = Paginator::new(page_size)?;
        self.page = 1;
        Ok(())
    }

    pub fn current_page(&self) -> Page<'_, T> {
        self.paginator.paginate_refs(self.filtered(), self.page)
    }

    pub fn page_number(&self) -> usize {
        self.paginator.clamp(self.page, self.filtered_count())
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.filtered_count())
    }

    /// Returns false when already on the last page.
    pub fn next_page(&mut self) -> bool {
        let current = self.page_number();
        if current < self.total_pages() {
            self.page = current + 1;
            true
        } else {
            false
        }
    }

    /// Returns false when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        let current = self.page_number();
        if current > 1 {
            self.page = current - 1;
            true
        } else {
            false
        }
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = self.paginator.clamp(page, self.filtered_count());
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn toggle_selected(&mut self, id: &str, checked: bool) {
        self.selection.toggle(id, checked);
    }

    pub fn flip_selected(&mut self, id: &str) -> bool {
        self.selection.flip(id)
    }

    /// Whether a bulk action may touch `record`. True when no rule is set.
    pub fn is_eligible(&self, record: &T) -> bool {
        self.eligible.map(|f| f(record)).unwrap_or(true)
    }

    /// Ids "select all" would touch for `scope`.
    pub fn scope_ids(&self, scope: SelectScope) -> Vec<String> {
        match scope {
            SelectScope::Page => self
                .current_page()
                .items
                .iter()
                .map(|r| r.id().to_string())
                .collect(),
            SelectScope::Eligible => self
                .filtered()
                .into_iter()
                .filter(|r| self.is_eligible(r))
                .map(|r| r.id().to_string())
                .collect(),
        }
    }

    pub fn select_all(&mut self, scope: SelectScope, checked: bool) {
        let ids = self.scope_ids(scope);
        debug!(noun = self.noun, ?scope, checked, count = ids.len(), "Bulk selection");
        self.selection.set_all(ids.iter().map(String::as_str), checked);
    }

    pub fn check_state(&self, scope: SelectScope) -> CheckState {
        let ids = self.scope_ids(scope);
        self.selection.check_state(ids.iter().map(String::as_str))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected records that pass the current filters, in display order.
    pub fn selected_records(&self) -> Vec<&T> {
        self.filtered()
            .into_iter()
            .filter(|r| self.selection.contains(r.id()))
            .collect()
    }

    /// Selected, filtered records that a bulk action may act on.
    pub fn eligible_selected(&self) -> Vec<&T> {
        self.selected_records()
            .into_iter()
            .filter(|r| self.is_eligible(r))
            .collect()
    }

    /// Bulk actions are disabled while nothing eligible is selected.
    pub fn can_apply_bulk(&self) -> bool {
        !self.eligible_selected().is_empty()
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggle();
        self.view_mode
    }

    /// Placeholder text when there are no rows to render.
    pub fn placeholder(&self) -> Option<String> {
        match &self.load_state {
            LoadState::Failed(e) if self.records.is_empty() => {
                Some(format!("Failed to load {}: {}", self.noun, e))
            }
            LoadState::Loading if self.records.is_empty() => {
                Some(format!("Loading {}...", self.noun))
            }
            _ if self.filtered_count() == 0 => Some(format!("No {} found", self.noun)),
            _ => None,
        }
    }

    /// e.g. "Showing 1–8 of 12 · 3 selected"
    pub fn status_line(&self) -> String {
        let page = self.current_page();
        let mut line = page.range_label();
        if page.total_pages > 1 {
            line.push_str(&format!(" · page {}/{}", page.number, page.total_pages));
        }
        let selected = self.selected_records().len();
        if selected > 0 {
            line.push_str(&format!(" · {} selected", selected));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        name: String,
        status: &'static str,
        amount: u32,
    }

    impl Record for Row {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (1..=n)
            .map(|i| Row {
                id: format!("r{}", i),
                name: format!("Row {}", i),
                status: if i % 3 == 0 { "Expired" } else if i % 2 == 0 { "Pending" } else { "Compliant" },
                amount: (n - i) as u32,
            })
            .collect()
    }

    fn spec() -> ListSpec<Row> {
        ListSpec::new("rows")
            .search("name", |r: &Row| Some(r.name.as_str()))
            .facet("status", "Status", |r: &Row| r.status)
            .sort("amount", "Amount", |a: &Row, b: &Row| a.amount.cmp(&b.amount))
            .eligible(|r: &Row| r.status != "Compliant")
            .page_size(4)
    }

    fn controller(n: usize) -> TabularListController<Row> {
        let mut c = TabularListController::new(spec()).unwrap();
        c.set_records(rows(n));
        c
    }

    fn ids(records: &[&Row]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert_eq!(
            TabularListController::new(spec().page_size(0)).err(),
            Some(CoreError::InvalidPageSize)
        );
        assert_eq!(
            TabularListController::new(spec().sorted_by("name", true)).err(),
            Some(CoreError::UnknownSortKey("name".to_string()))
        );
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut c = controller(10);
        assert!(c.next_page());
        assert_eq!(c.page_number(), 2);

        c.set_query("row");
        assert_eq!(c.page_number(), 1);

        c.next_page();
        c.set_facet("status", FacetSelection::Only("Pending".to_string())).unwrap();
        assert_eq!(c.page_number(), 1);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut c = controller(10);
        assert!(!c.prev_page());
        assert!(c.next_page());
        assert!(c.next_page());
        assert!(!c.next_page());
        assert_eq!(c.page_number(), 3);
        assert_eq!(c.current_page().items.len(), 2);

        c.go_to_page(0);
        assert_eq!(c.page_number(), 1);
    }

    #[test]
    fn test_sort_then_paginate() {
        let mut c = controller(6);
        c.toggle_sort("amount").unwrap();
        let page = c.current_page();
        assert_eq!(ids(&page.items), vec!["r6", "r5", "r4", "r3"]);
        assert!(c.toggle_sort("nope").is_err());
    }

    #[test]
    fn test_select_all_on_page_round_trip() {
        let mut c = controller(10);
        c.toggle_selected("r9", true);
        c.toggle_selected("r1", true);
        let before: Vec<String> = c.selection().ids().map(str::to_string).collect();

        c.select_all(SelectScope::Page, true);
        assert_eq!(c.check_state(SelectScope::Page), CheckState::All);
        c.select_all(SelectScope::Page, false);

        let after: Vec<String> = c.selection().ids().map(str::to_string).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn test_select_all_eligible_spans_pages() {
        let mut c = controller(10);
        c.select_all(SelectScope::Eligible, true);
        // r2, r3, r4, r6, r8, r9, r10 are not Compliant
        assert_eq!(c.selection().len(), 7);
        assert!(!c.is_selected("r1"));
        assert!(c.can_apply_bulk());
    }

    #[test]
    fn test_selection_persists_across_pages_and_filters() {
        let mut c = controller(10);
        c.toggle_selected("r2", true);
        c.toggle_selected("r9", true);
        c.next_page();
        assert!(c.is_selected("r2"));

        c.set_facet("status", FacetSelection::Only("Pending".to_string())).unwrap();
        assert_eq!(c.selection().len(), 2);
        assert_eq!(ids(&c.selected_records()), vec!["r2"]);

        c.clear_filters();
        assert_eq!(ids(&c.selected_records()), vec!["r2", "r9"]);
    }

    #[test]
    fn test_bulk_disabled_without_eligible_selection() {
        let mut c = controller(4);
        assert!(!c.can_apply_bulk());
        c.toggle_selected("r1", true);
        assert!(!c.can_apply_bulk());
        c.toggle_selected("r2", true);
        assert!(c.can_apply_bulk());
        assert_eq!(ids(&c.eligible_selected()), vec!["r2"]);
    }

    #[test]
    fn test_set_records_prunes_missing_ids() {
        let mut c = controller(10);
        c.toggle_selected("r10", true);
        c.toggle_selected("r1", true);
        c.set_records(rows(5));
        assert!(!c.is_selected("r10"));
        assert!(c.is_selected("r1"));
    }

    #[test]
    fn test_placeholders() {
        let mut c = TabularListController::new(spec()).unwrap();
        c.begin_loading();
        assert_eq!(c.placeholder(), Some("Loading rows...".to_string()));

        c.fail_loading("connection refused");
        assert_eq!(
            c.placeholder(),
            Some("Failed to load rows: connection refused".to_string())
        );

        c.set_records(rows(3));
        assert_eq!(c.placeholder(), None);
        c.set_query("zzz");
        assert_eq!(c.placeholder(), Some("No rows found".to_string()));
    }

    #[test]
    fn test_view_mode_does_not_change_rows() {
        let mut c = controller(10);
        c.set_query("1");
        let list_rows = ids(&c.current_page().items);
        c.toggle_view_mode();
        assert_eq!(c.view_mode(), ViewMode::Grid);
        assert_eq!(ids(&c.current_page().items), list_rows);
    }

    #[test]
    fn test_status_line() {
        let mut c = controller(10);
        assert_eq!(c.status_line(), "Showing 1–4 of 10 · page 1/3");
        c.toggle_selected("r1", true);
        c.set_query("Row 1");
        assert_eq!(c.status_line(), "Showing 1–2 of 2 · 1 selected");
    }

    #[test]
    fn test_update_records() {
        let mut c = controller(3);
        let touched = c.update_records(&["r1".to_string(), "r3".to_string()], |r| r.status = "Compliant");
        assert_eq!(touched, 2);
        let statuses: Vec<&str> = c.records().iter().map(|r| r.status).collect();
        assert_eq!(statuses, vec!["Compliant", "Pending", "Compliant"]);
    }

    #[test]
    fn test_update_records_refreshes_filtered_view() {
        let mut c = controller(6);
        c.set_facet("status", FacetSelection::Only("Pending".to_string())).unwrap();
        assert_eq!(ids(&c.filtered()), vec!["r2", "r4"]);

        c.update_records(&["r2".to_string()], |r| r.status = "Compliant");
        assert_eq!(ids(&c.filtered()), vec!["r4"]);
        assert_eq!(c.filtered_count(), 1);
    }

    #[test]
    fn test_failed_refresh_keeps_loaded_rows() {
        let mut c = controller(3);
        c.begin_loading();
        assert_eq!(c.placeholder(), None);
        c.fail_loading("connection refused");
        assert_eq!(c.load_state().error(), Some("connection refused"));
        assert_eq!(c.placeholder(), None);
        assert_eq!(c.current_page().items.len(), 3);
    }

    #[test]
    fn test_facet_values_respect_scope() {
        let spec = spec().scoped(|r: &Row| r.status != "Compliant");
        let mut c = TabularListController::new(spec).unwrap();
        c.set_records(rows(6));
        assert_eq!(c.facet_values("status").unwrap(), vec!["Expired", "Pending"]);
        assert_eq!(
            c.cycle_facet("status").unwrap(),
            FacetSelection::Only("Expired".to_string())
        );
        assert_eq!(c.filtered_count(), 2);
    }
}
