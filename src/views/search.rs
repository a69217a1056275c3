//! Case-insensitive coin search over name and symbol.

use crate::domain::coin::Coin;

/// Canonical form of a search term: trimmed and lower-cased.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether `coin` matches `query`. An empty or blank query matches everything.
pub fn matches(coin: &Coin, query: &str) -> bool {
    let needle = normalize(query);
    needle.is_empty()
        || coin.name.to_lowercase().contains(&needle)
        || coin.symbol.to_lowercase().contains(&needle)
}

/// Coins matching `query`, in snapshot order.
pub fn filter<'a>(coins: &'a [Coin], query: &str) -> Vec<&'a Coin> {
    coins.iter().filter(|c| matches(c, query)).collect()
}

/// Positions of the matching coins. Used by the memoized views.
pub(crate) fn filter_indices(coins: &[Coin], query: &str) -> Vec<usize> {
    coins
        .iter()
        .enumerate()
        .filter(|(_, c)| matches(c, query))
        .map(|(i, _)| i)
        .collect()
}
