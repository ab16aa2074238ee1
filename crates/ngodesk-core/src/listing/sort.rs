use std::cmp::Ordering;

/// A sortable column of `T`.
pub struct SortKey<T> {
    pub key: &'static str,
    pub label: &'static str,
    compare: fn(&T, &T) -> Ordering,
}

impl<T> SortKey<T> {
    pub fn new(key: &'static str, label: &'static str, compare: fn(&T, &T) -> Ordering) -> Self {
        Self { key, label, compare }
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }
}

/// Active sort column and direction. No column means source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<&'static str>,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: None,
            ascending: true,
        }
    }
}

impl SortState {
    pub fn by(column: &'static str, ascending: bool) -> Self {
        Self {
            column: Some(column),
            ascending,
        }
    }

    /// If already sorting by this column, flip direction;
    /// otherwise switch to this column ascending.
    pub fn toggle(&mut self, column: &'static str) {
        if self.column == Some(column) {
            self.ascending = !self.ascending;
        } else {
            self.column = Some(column);
            self.ascending = true;
        }
    }

    /// Header arrow for a column.
    pub fn indicator(&self, column: &str) -> &'static str {
        match self.column {
            Some(active) if active == column => {
                if self.ascending {
                    " ▲"
                } else {
                    " ▼"
                }
            }
            _ => "",
        }
    }
}

/// Stable sort of `records` by the active key; ties keep their input order.
pub fn sort_records<'a, T>(records: &mut [&'a T], keys: &[SortKey<T>], state: &SortState) {
    sort_by_state(records, keys, state, |r: &&'a T| *r);
}

/// Same ordering as [`sort_records`], applied to positions into `records`.
pub fn sort_indices<T>(indices: &mut [usize], records: &[T], keys: &[SortKey<T>], state: &SortState) {
    sort_by_state(indices, keys, state, |&i: &usize| &records[i]);
}

fn sort_by_state<'a, I, T: 'a>(
    items: &mut [I],
    keys: &[SortKey<T>],
    state: &SortState,
    record: impl Fn(&I) -> &'a T,
) {
    let Some(column) = state.column else {
        return;
    };
    let Some(key) = keys.iter().find(|k| k.key == column) else {
        return;
    };

    items.sort_by(|a, b| {
        let cmp = key.compare(record(a), record(b));
        if state.ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        name: &'static str,
        amount: u32,
    }

    fn keys() -> Vec<SortKey<Item>> {
        vec![
            SortKey::new("name", "Name", |a: &Item, b: &Item| a.name.cmp(b.name)),
            SortKey::new("amount", "Amount", |a: &Item, b: &Item| a.amount.cmp(&b.amount)),
        ]
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "c", amount: 10 },
            Item { name: "a", amount: 30 },
            Item { name: "b", amount: 10 },
        ]
    }

    fn names(refs: &[&Item]) -> Vec<&'static str> {
        refs.iter().map(|i| i.name).collect()
    }

    #[test]
    fn test_toggle_flips_then_switches() {
        let mut state = SortState::default();
        state.toggle("name");
        assert_eq!(state, SortState::by("name", true));
        state.toggle("name");
        assert_eq!(state, SortState::by("name", false));
        state.toggle("amount");
        assert_eq!(state, SortState::by("amount", true));
    }

    #[test]
    fn test_no_column_keeps_source_order() {
        let data = items();
        let mut refs: Vec<&Item> = data.iter().collect();
        sort_records(&mut refs, &keys(), &SortState::default());
        assert_eq!(names(&refs), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_descending() {
        let data = items();
        let mut refs: Vec<&Item> = data.iter().collect();
        sort_records(&mut refs, &keys(), &SortState::by("name", false));
        assert_eq!(names(&refs), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let data = items();
        let mut refs: Vec<&Item> = data.iter().collect();
        sort_records(&mut refs, &keys(), &SortState::by("amount", true));
        assert_eq!(names(&refs), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_indices_matches_record_order() {
        let data = items();
        let mut indices = vec![0, 1, 2];
        sort_indices(&mut indices, &data, &keys(), &SortState::by("amount", false));
        assert_eq!(indices, vec![1, 0, 2]);
    }

    #[test]
    fn test_indicator() {
        let state = SortState::by("name", false);
        assert_eq!(state.indicator("name"), " ▼");
        assert_eq!(state.indicator("amount"), "");
    }
}
