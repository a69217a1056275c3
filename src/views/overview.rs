//! Market overview cards.

use crate::domain::coin::Coin;
use crate::shared::fmt::{format_currency, format_percentage};

/// Coin id whose share of total market cap is reported as dominance.
pub const DOMINANCE_COIN: &str = "bitcoin";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketOverview {
    pub total_market_cap: f64,
    pub total_volume: f64,
    /// Percent of total market cap held by bitcoin. Zero if absent.
    pub btc_dominance: f64,
    /// Percent of coins with a non-negative 24h change, rounded.
    pub sentiment: u32,
}

impl MarketOverview {
    pub fn from_coins(coins: &[Coin]) -> Self {
        let total_market_cap: f64 = coins.iter().map(|c| c.market_cap).sum();
        let total_volume: f64 = coins.iter().map(|c| c.total_volume_24h).sum();

        let btc_dominance = coins
            .iter()
            .find(|c| c.id.as_str() == DOMINANCE_COIN)
            .filter(|_| total_market_cap > 0.0)
            .map(|btc| btc.market_cap / total_market_cap * 100.0)
            .unwrap_or(0.0);

        let sentiment = if coins.is_empty() {
            0
        } else {
            let positive = coins
                .iter()
                .filter(|c| c.price_change_percent_24h >= 0.0)
                .count();
            (positive as f64 / coins.len() as f64 * 100.0).round() as u32
        };

        Self {
            total_market_cap,
            total_volume,
            btc_dominance,
            sentiment,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.sentiment > 50
    }

    pub fn sentiment_label(&self) -> &'static str {
        if self.is_bullish() {
            "Bullish"
        } else {
            "Bearish"
        }
    }

    pub fn market_cap_display(&self) -> String {
        format_currency(self.total_market_cap)
    }

    pub fn volume_display(&self) -> String {
        format_currency(self.total_volume)
    }

    pub fn dominance_display(&self) -> String {
        format_percentage(self.btc_dominance)
    }

    pub fn sentiment_display(&self) -> String {
        format!("{}% Positive", self.sentiment)
    }
}
