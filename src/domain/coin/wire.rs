//! Wire types for coin payloads (REST list + `updatePrices` push events).
//!
//! Every field defaults so that partial records still deserialize; the
//! values pass through to state as-is.

use crate::shared::CoinId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinPayload {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub image: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub market_cap_rank: u32,
    pub price_change_percentage_24h: f64,
    pub total_volume: f64,
    pub circulating_supply: f64,
    pub max_supply: Option<f64>,
}
