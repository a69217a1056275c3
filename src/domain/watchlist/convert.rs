//! Wire → domain conversions for watchlist items.

use super::wire::{WatchedCoin, WatchlistItem};
use super::WatchlistEntry;

impl From<WatchedCoin> for WatchlistEntry {
    fn from(c: WatchedCoin) -> Self {
        Self {
            id: c.id,
            symbol: c.symbol,
            name: c.name,
            image_url: c.image,
            current_price: c.current_price,
            price_change_percent_24h: c.price_change_percentage_24h,
            market_cap: c.market_cap,
        }
    }
}

impl From<WatchlistItem> for WatchlistEntry {
    /// Items without an embedded coin keep only the id; the name falls back to it.
    fn from(item: WatchlistItem) -> Self {
        match item.cryptocurrency {
            Some(coin) => {
                let mut entry = WatchlistEntry::from(coin);
                entry.id = item.cryptocurrency_id;
                entry
            }
            None => Self {
                name: item.cryptocurrency_id.as_str().to_string(),
                id: item.cryptocurrency_id,
                symbol: String::new(),
                image_url: String::new(),
                current_price: 0.0,
                price_change_percent_24h: 0.0,
                market_cap: 0.0,
            },
        }
    }
}
