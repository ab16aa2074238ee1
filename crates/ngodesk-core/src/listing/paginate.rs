use std::ops::Range;

use crate::error::{CoreError, CoreResult};

/// Page size used when a screen does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Splits a filtered sequence into fixed-size, 1-indexed pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> CoreResult<Self> {
        if page_size == 0 {
            return Err(CoreError::InvalidPageSize);
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(count / page_size)`, never less than 1.
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    /// Clamp a requested page number into `[1, total_pages]`.
    pub fn clamp(&self, page: usize, count: usize) -> usize {
        page.clamp(1, self.total_pages(count))
    }

    /// Index range of `page` within a sequence of `count` items.
    pub fn range(&self, page: usize, count: usize) -> Range<usize> {
        let page = self.clamp(page, count);
        let start = ((page - 1) * self.page_size).min(count);
        let end = (start + self.page_size).min(count);
        start..end
    }

    pub fn paginate<'a, T>(&self, items: &'a [T], page: usize) -> Page<'a, T> {
        self.paginate_refs(items.iter().collect(), page)
    }

    /// Paginate an already-filtered list of references.
    pub fn paginate_refs<'a, T>(&self, mut items: Vec<&'a T>, page: usize) -> Page<'a, T> {
        let total_items = items.len();
        let number = self.clamp(page, total_items);
        let range = self.range(number, total_items);
        let start_index = range.start;
        let page_items: Vec<&'a T> = items.drain(range).collect();

        Page {
            items: page_items,
            number,
            total_pages: self.total_pages(total_items),
            total_items,
            start_index,
        }
    }
}

/// One page of a filtered list.
#[derive(Debug)]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    /// 1-indexed page number after clamping
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub start_index: usize,
}

impl<'a, T> Page<'a, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// "Previous" is disabled on the first page.
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// "Next" is disabled on the last page.
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn range_label(&self) -> String {
        if self.items.is_empty() {
            format!("Showing 0 of {}", self.total_items)
        } else {
            format!(
                "Showing {}–{} of {}",
                self.start_index + 1,
                self.start_index + self.items.len(),
                self.total_items
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(Paginator::new(0), Err(CoreError::InvalidPageSize));
        assert_eq!(Paginator::default().page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_total_pages() {
        let p = Paginator::new(8).unwrap();
        assert_eq!(p.total_pages(0), 1);
        assert_eq!(p.total_pages(1), 1);
        assert_eq!(p.total_pages(8), 1);
        assert_eq!(p.total_pages(9), 2);
        assert_eq!(p.total_pages(16), 2);
        assert_eq!(p.total_pages(17), 3);
    }

    #[test]
    fn test_empty_set_has_one_empty_page() {
        let p = Paginator::new(10).unwrap();
        let items: Vec<u32> = vec![];
        let page = p.paginate(&items, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.is_empty());
        assert!(!page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.range_label(), "Showing 0 of 0");
    }

    #[test]
    fn test_pages_concatenate_to_input() {
        for size in 1..=7 {
            let p = Paginator::new(size).unwrap();
            for n in 0..=23u32 {
                let items: Vec<u32> = (0..n).collect();
                let total = p.total_pages(items.len());
                assert_eq!(total, (n as usize).div_ceil(size).max(1));

                let mut joined = Vec::new();
                for number in 1..=total {
                    let page = p.paginate(&items, number);
                    assert!(page.items.len() <= size);
                    joined.extend(page.items.into_iter().copied());
                }
                assert_eq!(joined, items);
            }
        }
    }

    #[test]
    fn test_out_of_range_pages_are_clamped() {
        let p = Paginator::new(5).unwrap();
        let items: Vec<u32> = (0..12).collect();

        let last = p.paginate(&items, 99);
        assert_eq!(last.number, 3);
        assert_eq!(last.items, vec![&10, &11]);
        assert!(last.has_previous());
        assert!(!last.has_next());

        let first = p.paginate(&items, 0);
        assert_eq!(first.number, 1);
        assert_eq!(first.start_index, 0);
        assert!(!first.has_previous());
        assert!(first.has_next());
    }

    #[test]
    fn test_range_label() {
        let p = Paginator::new(8).unwrap();
        let items: Vec<u32> = (0..12).collect();
        assert_eq!(p.paginate(&items, 1).range_label(), "Showing 1–8 of 12");
        assert_eq!(p.paginate(&items, 2).range_label(), "Showing 9–12 of 12");
    }
}
