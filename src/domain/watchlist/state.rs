//! Local mirror of the user's watchlist.

use super::WatchlistEntry;
use crate::domain::coin::Coin;
use crate::shared::CoinId;
use crate::views::search;

/// Watchlist entries keyed by coin id, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with the server's list. Later duplicates are dropped.
    pub fn replace(&mut self, entries: impl IntoIterator<Item = WatchlistEntry>) {
        self.entries.clear();
        for entry in entries {
            self.add(entry);
        }
    }

    /// Append unless the coin is already watched. Returns whether it was added.
    pub fn add(&mut self, entry: WatchlistEntry) -> bool {
        if self.contains(&entry.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Drop a coin. Returns whether it was present.
    pub fn remove(&mut self, id: &CoinId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.id != id);
        self.entries.len() != before
    }

    pub fn contains(&self, id: &CoinId) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Coins that could be added: not yet watched and matching `query`.
    pub fn candidates<'a>(&self, coins: &'a [Coin], query: &str) -> Vec<&'a Coin> {
        coins
            .iter()
            .filter(|c| !self.contains(&c.id) && search::matches(c, query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::fixtures::coin;

    fn entry(id: &str) -> WatchlistEntry {
        WatchlistEntry::from(&coin(id, id, 1.0, 0.0))
    }

    #[test]
    fn test_add_is_keyed_by_id() {
        let mut list = Watchlist::new();
        assert!(list.add(entry("bitcoin")));
        assert!(!list.add(entry("bitcoin")));
        assert!(list.add(entry("ethereum")));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut list = Watchlist::new();
        list.add(entry("bitcoin"));
        assert!(list.remove(&CoinId::from("bitcoin")));
        assert!(!list.remove(&CoinId::from("bitcoin")));
        assert!(list.is_empty());
    }

    #[test]
    fn test_replace_dedupes() {
        let mut list = Watchlist::new();
        list.add(entry("old"));
        list.replace([entry("a"), entry("b"), entry("a")]);
        let ids: Vec<_> = list.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_candidates_exclude_watched_and_filter() {
        let coins = vec![
            coin("bitcoin", "btc", 3.0, 0.0),
            coin("ethereum", "eth", 2.0, 0.0),
            coin("tether", "usdt", 1.0, 0.0),
        ];
        let mut list = Watchlist::new();
        list.add(WatchlistEntry::from(&coins[0]));

        let all: Vec<_> = list.candidates(&coins, "").iter().map(|c| c.id.as_str()).collect();
        assert_eq!(all, ["ethereum", "tether"]);

        let eth: Vec<_> = list.candidates(&coins, "ETH").iter().map(|c| c.id.as_str()).collect();
        assert_eq!(eth, ["ethereum"]);
    }
}
