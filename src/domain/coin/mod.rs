//! Coin domain — price records and the live price snapshot.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::CoinId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One cryptocurrency's market data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub image_url: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub market_cap_rank: u32,
    pub price_change_percent_24h: f64,
    pub total_volume_24h: f64,
    pub circulating_supply: f64,
    pub max_supply: Option<f64>,
}

impl Coin {
    /// Upper-cased ticker symbol, as every view displays it.
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// Circulating / max supply in `[0, 1]` when a positive max supply is known.
    pub fn supply_ratio(&self) -> Option<f64> {
        match self.max_supply {
            Some(max) if max > 0.0 => Some((self.circulating_supply / max).clamp(0.0, 1.0)),
            _ => None,
        }
    }
}

/// The complete set of price records at one point in time.
///
/// Replaced wholesale on every price update. Order is the transport's order
/// and is the canonical ranking. `version` increases by one per update and
/// keys the derived-view caches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSnapshot {
    pub version: u64,
    coins: Vec<Coin>,
}

impl PriceSnapshot {
    pub fn new(version: u64, coins: Vec<Coin>) -> Self {
        let snapshot = Self { version, coins };
        if let Some(dup) = snapshot.first_duplicate_id() {
            tracing::warn!(version, "Duplicate coin id in snapshot: {}", dup);
        }
        snapshot
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn get(&self, id: &CoinId) -> Option<&Coin> {
        self.coins.iter().find(|c| &c.id == id)
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn total_market_cap(&self) -> f64 {
        self.coins.iter().map(|c| c.market_cap).sum()
    }

    pub fn total_volume(&self) -> f64 {
        self.coins.iter().map(|c| c.total_volume_24h).sum()
    }

    fn first_duplicate_id(&self) -> Option<&CoinId> {
        let mut seen = HashSet::with_capacity(self.coins.len());
        self.coins.iter().map(|c| &c.id).find(|id| !seen.insert(*id))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn coin(id: &str, symbol: &str, market_cap: f64, change: f64) -> Coin {
        Coin {
            id: CoinId::from(id),
            symbol: symbol.to_string(),
            name: format!("{} Coin", symbol.to_uppercase()),
            image_url: format!("https://img.example/{}.png", id),
            current_price: 1.0,
            market_cap,
            market_cap_rank: 0,
            price_change_percent_24h: change,
            total_volume_24h: market_cap / 10.0,
            circulating_supply: 1_000.0,
            max_supply: None,
        }
    }

    /// Fifteen coins: bitcoin at 1T, fourteen others summing to 400B.
    pub fn fifteen_coins() -> Vec<Coin> {
        let mut coins = vec![coin("bitcoin", "btc", 1_000_000_000_000.0, 2.34)];
        for i in 1..15u32 {
            let mut c = coin(&format!("coin-{}", i), &format!("c{}", i), 0.0, i as f64 - 7.0);
            c.market_cap = 400_000_000_000.0 / 14.0;
            c.market_cap_rank = i + 1;
            coins.push(c);
        }
        coins[0].market_cap_rank = 1;
        coins
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_totals() {
        let snapshot = PriceSnapshot::new(1, fifteen_coins());
        assert_eq!(snapshot.len(), 15);
        assert!((snapshot.total_market_cap() - 1.4e12).abs() < 1.0);
    }

    #[test]
    fn test_get_by_id() {
        let snapshot = PriceSnapshot::new(1, fifteen_coins());
        let btc = snapshot.get(&CoinId::from("bitcoin")).unwrap();
        assert_eq!(btc.display_symbol(), "BTC");
        assert!(snapshot.get(&CoinId::from("dogecoin")).is_none());
    }

    #[test]
    fn test_supply_ratio() {
        let mut c = coin("bitcoin", "btc", 1.0, 0.0);
        assert_eq!(c.supply_ratio(), None);
        c.circulating_supply = 19_500_000.0;
        c.max_supply = Some(21_000_000.0);
        let ratio = c.supply_ratio().unwrap();
        assert!((ratio - 0.928_571).abs() < 1e-5);
        c.max_supply = Some(0.0);
        assert_eq!(c.supply_ratio(), None);
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        let coins = vec![coin("a", "a", 1.0, 0.0), coin("a", "a", 2.0, 0.0)];
        let snapshot = PriceSnapshot::new(3, coins);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(&CoinId::from("a")).unwrap().market_cap, 1.0);
    }
}
