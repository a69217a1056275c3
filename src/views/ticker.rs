//! Scrolling price ticker: symbol search, fixed 10 per page.

use chrono::{DateTime, Utc};

use super::pagination::Pagination;
use crate::domain::coin::PriceSnapshot;
use crate::shared::fmt::{format_signed_percentage, format_usd};
use crate::views::table::Direction;

pub const TICKER_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct TickerEntry {
    pub symbol: String,
    pub name: String,
    pub price: String,
    pub change: String,
    pub direction: Direction,
}

/// Ticker state. Feed it every snapshot; it remembers when prices last moved.
#[derive(Debug, Clone)]
pub struct Ticker {
    search: String,
    pagination: Pagination,
    last_updated: Option<DateTime<Utc>>,
    seen_version: Option<u64>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self {
            search: String::new(),
            pagination: Pagination::new(TICKER_PAGE_SIZE),
            last_updated: None,
            seen_version: None,
        }
    }
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot. Only non-empty snapshots count as an update.
    pub fn observe(&mut self, snapshot: &PriceSnapshot) {
        if snapshot.is_empty() || self.seen_version == Some(snapshot.version) {
            return;
        }
        self.seen_version = Some(snapshot.version);
        self.last_updated = Some(Utc::now());
    }

    /// Still waiting for the first non-empty snapshot.
    pub fn is_loading(&self) -> bool {
        self.last_updated.is_none()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn set_search(&mut self, query: &str) {
        let query = super::search::normalize(query);
        if self.search != query {
            self.search = query;
            self.pagination.reset();
        }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn next_page(&mut self) {
        self.pagination.next();
    }

    pub fn prev_page(&mut self) {
        self.pagination.prev();
    }

    /// Current page of entries. The ticker searches symbols only.
    pub fn entries(&mut self, snapshot: &PriceSnapshot) -> Vec<TickerEntry> {
        let needle = &self.search;
        let matching: Vec<_> = snapshot
            .coins()
            .iter()
            .filter(|c| c.symbol.to_lowercase().contains(needle.as_str()))
            .collect();
        self.pagination.set_total(matching.len());

        self.pagination
            .slice(&matching)
            .iter()
            .map(|c| TickerEntry {
                symbol: c.display_symbol(),
                name: c.name.clone(),
                price: format_usd(c.current_price),
                change: format_signed_percentage(c.price_change_percent_24h),
                direction: Direction::of(c.price_change_percent_24h),
            })
            .collect()
    }

    /// "Page X of Y", or `None` when everything fits on one page.
    pub fn page_label(&self) -> Option<String> {
        (self.pagination.total() > TICKER_PAGE_SIZE).then(|| {
            format!(
                "Page {} of {}",
                self.pagination.page(),
                self.pagination.page_count()
            )
        })
    }
}
