use std::collections::BTreeSet;

/// How much of a set of ids is currently selected, for tri-state header boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    None,
    Partial,
    All,
}

/// Which records "select all" applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectScope {
    /// Records visible on the current page
    Page,
    /// Every filtered record that passes the screen's eligibility rule
    Eligible,
}

/// Ids touched by the most recent bulk select, so the matching bulk
/// deselect can undo exactly what it added.
#[derive(Debug, Clone)]
struct BulkSelect {
    ids: Vec<String>,
    added: Vec<String>,
}

/// Selected record ids, kept independently of pagination.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    selected: BTreeSet<String>,
    last_bulk: Option<BulkSelect>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Add or remove a single id.
    pub fn toggle(&mut self, id: &str, checked: bool) {
        self.last_bulk = None;
        if checked {
            self.selected.insert(id.to_string());
        } else {
            self.selected.remove(id);
        }
    }

    /// Invert one id's membership. Returns the new state.
    pub fn flip(&mut self, id: &str) -> bool {
        let checked = !self.contains(id);
        self.toggle(id, checked);
        checked
    }

    /// Bulk add or remove. A bulk select followed by a bulk deselect of the
    /// same ids, with nothing in between, restores the prior selection.
    pub fn set_all<'a, I>(&mut self, ids: I, checked: bool)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut ids: Vec<String> = ids.into_iter().map(str::to_string).collect();
        ids.sort();
        ids.dedup();

        if checked {
            let added: Vec<String> = ids
                .iter()
                .filter(|id| self.selected.insert((*id).clone()))
                .cloned()
                .collect();
            self.last_bulk = Some(BulkSelect { ids, added });
            return;
        }

        match self.last_bulk.take() {
            Some(bulk) if bulk.ids == ids => {
                for id in &bulk.added {
                    self.selected.remove(id);
                }
            }
            _ => {
                for id in &ids {
                    self.selected.remove(id);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.last_bulk = None;
    }

    /// Drop ids for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        let before = self.selected.len();
        self.selected.retain(|id| keep(id.as_str()));
        if self.selected.len() != before {
            self.last_bulk = None;
        }
    }

    pub fn check_state<'a, I>(&self, ids: I) -> CheckState
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut total = 0;
        let mut hits = 0;
        for id in ids {
            total += 1;
            if self.contains(id) {
                hits += 1;
            }
        }

        if hits == 0 {
            CheckState::None
        } else if hits == total {
            CheckState::All
        } else {
            CheckState::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot(s: &SelectionSet) -> Vec<String> {
        s.ids().map(str::to_string).collect()
    }

    #[test]
    fn test_toggle_and_flip() {
        let mut s = SelectionSet::new();
        s.toggle("a", true);
        s.toggle("b", true);
        s.toggle("a", false);
        assert_eq!(snapshot(&s), vec!["b"]);

        assert!(s.flip("c"));
        assert!(!s.flip("b"));
        assert_eq!(snapshot(&s), vec!["c"]);
    }

    #[test]
    fn test_bulk_select_then_deselect_restores_prior_state() {
        let mut s = SelectionSet::new();
        s.toggle("b", true);
        s.toggle("z", true);
        let before = snapshot(&s);

        let page = ["a", "b", "c"];
        s.set_all(page, true);
        assert_eq!(s.len(), 4);
        s.set_all(page, false);

        assert_eq!(snapshot(&s), before);
    }

    #[test]
    fn test_bulk_deselect_after_other_mutation_clears_all_ids() {
        let mut s = SelectionSet::new();
        s.toggle("b", true);
        s.set_all(["a", "b"], true);
        s.toggle("c", true);
        s.set_all(["a", "b"], false);
        assert_eq!(snapshot(&s), vec!["c"]);
    }

    #[test]
    fn test_bulk_deselect_of_different_ids() {
        let mut s = SelectionSet::new();
        s.set_all(["a", "b", "c"], true);
        s.set_all(["a", "b"], false);
        assert_eq!(snapshot(&s), vec!["c"]);
    }

    #[test]
    fn test_check_state() {
        let mut s = SelectionSet::new();
        assert_eq!(s.check_state(["a", "b"]), CheckState::None);
        s.toggle("a", true);
        assert_eq!(s.check_state(["a", "b"]), CheckState::Partial);
        s.toggle("b", true);
        assert_eq!(s.check_state(["a", "b"]), CheckState::All);
        assert_eq!(s.check_state(Vec::<&str>::new()), CheckState::None);
    }

    #[test]
    fn test_retain_prunes_ids() {
        let mut s = SelectionSet::new();
        s.set_all(["a", "b", "c"], true);
        s.retain(|id| id != "b");
        assert_eq!(snapshot(&s), vec!["a", "c"]);
        s.clear();
        assert!(s.is_empty());
    }
}
