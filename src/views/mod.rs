//! Derived presentation views over an immutable price snapshot.
//!
//! The submodules are pure functions. [`DerivedViews`] adds the view-local
//! state (search term, pagination) and memoizes results on the snapshot
//! version, so re-reading the same snapshot never recomputes.

pub mod distribution;
pub mod movers;
pub mod overview;
pub mod pagination;
pub mod search;
pub mod table;
pub mod ticker;

use crate::domain::coin::{Coin, PriceSnapshot};

pub use distribution::{distribution, Distribution, Slice, DEFAULT_TOP_N};
pub use movers::{movers, Movers};
pub use overview::MarketOverview;
pub use pagination::{PageSize, PageWindow, Pagination};
pub use table::{Direction, TableRow};
pub use ticker::{Ticker, TickerEntry};

#[derive(Debug, Clone)]
struct Filtered {
    version: u64,
    query: String,
    positions: Vec<usize>,
}

#[derive(Debug, Clone)]
struct Page {
    version: u64,
    query: String,
    page: usize,
    page_size: usize,
    rows: Vec<TableRow>,
}

/// Table + widget state for one dashboard view, memoized per snapshot.
#[derive(Debug, Clone)]
pub struct DerivedViews {
    search: String,
    page_size: PageSize,
    pagination: Pagination,
    filtered: Option<Filtered>,
    page: Option<Page>,
    overview: Option<(u64, MarketOverview)>,
    distribution: Option<(u64, Distribution)>,
    movers: Option<(u64, Movers)>,
    #[cfg(test)]
    filter_runs: usize,
}

impl Default for DerivedViews {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl DerivedViews {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            search: String::new(),
            page_size,
            pagination: Pagination::new(page_size.get()),
            filtered: None,
            page: None,
            overview: None,
            distribution: None,
            movers: None,
            #[cfg(test)]
            filter_runs: 0,
        }
    }

    // ── View-local state ─────────────────────────────────────────────────

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Change the search term. A term that filters differently goes back
    /// to page 1; case and surrounding blanks are ignored.
    pub fn set_search(&mut self, query: &str) {
        let query = search::normalize(query);
        if self.search != query {
            self.search = query;
            self.pagination.reset();
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.pagination.set_page_size(page_size.get());
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
    }

    pub fn next_page(&mut self) {
        self.pagination.next();
    }

    pub fn prev_page(&mut self) {
        self.pagination.prev();
    }

    /// Pagination as of the last `filtered` / `page_rows` call.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    // ── Derived data ─────────────────────────────────────────────────────

    /// Coins matching the search term, in snapshot order.
    pub fn filtered<'a>(&mut self, snapshot: &'a PriceSnapshot) -> Vec<&'a Coin> {
        self.positions(snapshot)
            .iter()
            .filter_map(|&i| snapshot.coins().get(i))
            .collect()
    }

    /// Table rows for the current page.
    pub fn page_rows(&mut self, snapshot: &PriceSnapshot) -> &[TableRow] {
        let positions = self.positions(snapshot).to_vec();
        let (page, page_size) = (self.pagination.page(), self.pagination.page_size());

        let fresh = matches!(
            &self.page,
            Some(p) if p.version == snapshot.version
                && p.query == self.search
                && p.page == page
                && p.page_size == page_size
        );
        if !fresh {
            let rows = table::rows(snapshot, self.pagination.slice(&positions));
            self.page = Some(Page {
                version: snapshot.version,
                query: self.search.clone(),
                page,
                page_size,
                rows,
            });
        }
        self.page.as_ref().map(|p| p.rows.as_slice()).unwrap_or_default()
    }

    pub fn overview(&mut self, snapshot: &PriceSnapshot) -> &MarketOverview {
        let entry = match self.overview.take() {
            Some((v, o)) if v == snapshot.version => (v, o),
            _ => (snapshot.version, MarketOverview::from_coins(snapshot.coins())),
        };
        &self.overview.insert(entry).1
    }

    pub fn distribution(&mut self, snapshot: &PriceSnapshot) -> &Distribution {
        let entry = match self.distribution.take() {
            Some((v, d)) if v == snapshot.version => (v, d),
            _ => (
                snapshot.version,
                distribution::distribution(snapshot.coins(), DEFAULT_TOP_N),
            ),
        };
        &self.distribution.insert(entry).1
    }

    pub fn movers(&mut self, snapshot: &PriceSnapshot) -> &Movers {
        let entry = match self.movers.take() {
            Some((v, m)) if v == snapshot.version => (v, m),
            _ => (snapshot.version, movers::movers(snapshot.coins())),
        };
        &self.movers.insert(entry).1
    }

    /// Snapshot positions matching the search, cached per (version, term).
    /// Also clamps the page to the new result count.
    fn positions(&mut self, snapshot: &PriceSnapshot) -> &[usize] {
        let fresh = matches!(
            &self.filtered,
            Some(f) if f.version == snapshot.version && f.query == self.search
        );
        if !fresh {
            #[cfg(test)]
            {
                self.filter_runs += 1;
            }
            let positions = search::filter_indices(snapshot.coins(), &self.search);
            self.filtered = Some(Filtered {
                version: snapshot.version,
                query: self.search.clone(),
                positions,
            });
        }
        let positions = self
            .filtered
            .as_ref()
            .map(|f| f.positions.as_slice())
            .unwrap_or_default();
        self.pagination.set_total(positions.len());
        positions
    }
}
