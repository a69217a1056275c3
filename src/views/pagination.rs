//! Page navigation over a filtered result list.
//!
//! Pages are 1-based. The current page is clamped into range whenever the
//! page size or the result count changes.

use std::ops::Range;

use crate::error::SdkError;

/// Allowed table page sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [Self::Ten, Self::TwentyFive, Self::Fifty, Self::Hundred];

    pub fn get(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = SdkError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.get() == n)
            .ok_or_else(|| SdkError::Validation(format!("Unsupported page size: {}", n)))
    }
}

/// Page buttons around the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Current page ±2, clipped to the valid range.
    pub pages: Vec<usize>,
    /// Last page, when it sits beyond the window.
    pub jump_to_last: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
    total: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PageSize::default().get())
    }
}

impl Pagination {
    /// Any positive size works here; the table restricts itself to [`PageSize`].
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// `ceil(total / page_size)`; zero when there are no results.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.clamp();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.clamp();
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.clamp();
    }

    pub fn next(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// Back to page 1, e.g. after the search term changed.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Index range of the current page within the result list.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Range { start, end } = self.range();
        let end = end.min(items.len());
        &items[start.min(end)..end]
    }

    /// "Showing X to Y of N".
    pub fn range_label(&self) -> String {
        let Range { start, end } = self.range();
        let first = if self.total == 0 { 0 } else { start + 1 };
        format!("Showing {} to {} of {}", first, end, self.total)
    }

    pub fn window(&self) -> PageWindow {
        let count = self.page_count();
        if count == 0 {
            return PageWindow {
                pages: Vec::new(),
                jump_to_last: None,
            };
        }
        let first = self.page.saturating_sub(2).max(1);
        let last = (self.page + 2).min(count);
        let jump_to_last = (count > 5 && self.page + 3 <= count).then_some(count);
        PageWindow {
            pages: (first..=last).collect(),
            jump_to_last,
        }
    }

    fn clamp(&mut self) {
        self.page = self.page.clamp(1, self.page_count().max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged(total: usize, size: usize) -> Pagination {
        let mut p = Pagination::new(size);
        p.set_total(total);
        p
    }

    #[test]
    fn test_page_count_is_ceiling() {
        for (n, size, pages) in [(0, 10, 0), (1, 10, 1), (10, 10, 1), (11, 10, 2), (250, 25, 10)] {
            assert_eq!(paged(n, size).page_count(), pages, "n={n} size={size}");
        }
    }

    #[test]
    fn test_last_page_len_within_bounds() {
        for n in 1..=120 {
            for size in PageSize::ALL.map(PageSize::get) {
                let mut p = paged(n, size);
                p.set_page(p.page_count());
                let len = p.range().len();
                assert!((1..=size).contains(&len), "n={n} size={size} len={len}");
            }
        }
    }

    #[test]
    fn test_clamp_on_total_and_size_change() {
        let mut p = paged(100, 10);
        p.set_page(10);
        p.set_total(35);
        assert_eq!(p.page(), 4);
        p.set_page_size(50);
        assert_eq!(p.page(), 1);
        p.set_total(0);
        assert_eq!(p.page(), 1);
        assert_eq!(p.range(), 0..0);
    }

    #[test]
    fn test_prev_next_stop_at_edges() {
        let mut p = paged(25, 10);
        p.prev();
        assert_eq!(p.page(), 1);
        assert!(!p.has_prev());
        p.next();
        p.next();
        p.next();
        assert_eq!(p.page(), 3);
        assert!(!p.has_next());
    }

    #[test]
    fn test_range_label() {
        let mut p = paged(42, 10);
        assert_eq!(p.range_label(), "Showing 1 to 10 of 42");
        p.set_page(5);
        assert_eq!(p.range_label(), "Showing 41 to 42 of 42");
        assert_eq!(paged(0, 10).range_label(), "Showing 0 to 0 of 0");
    }

    #[test]
    fn test_slice() {
        let items: Vec<u32> = (0..23).collect();
        let mut p = paged(items.len(), 10);
        p.set_page(3);
        assert_eq!(p.slice(&items), &[20, 21, 22]);
    }

    #[test]
    fn test_window() {
        let mut p = paged(100, 10);
        assert_eq!(
            p.window(),
            PageWindow {
                pages: vec![1, 2, 3],
                jump_to_last: Some(10)
            }
        );
        p.set_page(5);
        assert_eq!(p.window().pages, vec![3, 4, 5, 6, 7]);
        p.set_page(8);
        assert_eq!(p.window().jump_to_last, None);
        assert_eq!(p.window().pages, vec![6, 7, 8, 9, 10]);

        assert_eq!(paged(30, 10).window().jump_to_last, None);
    }

    #[test]
    fn test_page_size_choices() {
        assert_eq!(PageSize::try_from(25).unwrap(), PageSize::TwentyFive);
        assert!(PageSize::try_from(20).is_err());
        assert_eq!(PageSize::default().get(), 10);
    }
}
