//! Watchlist domain — the user's starred coins.
//!
//! The list is mirrored locally. Adds are applied before the server
//! confirms and are not rolled back if it refuses; removals are local only.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::domain::coin::Coin;
use crate::shared::CoinId;
use serde::{Deserialize, Serialize};

pub use state::Watchlist;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub image_url: String,
    pub current_price: f64,
    pub price_change_percent_24h: f64,
    pub market_cap: f64,
}

impl From<&Coin> for WatchlistEntry {
    fn from(coin: &Coin) -> Self {
        Self {
            id: coin.id.clone(),
            symbol: coin.symbol.clone(),
            name: coin.name.clone(),
            image_url: coin.image_url.clone(),
            current_price: coin.current_price,
            price_change_percent_24h: coin.price_change_percent_24h,
            market_cap: coin.market_cap,
        }
    }
}
