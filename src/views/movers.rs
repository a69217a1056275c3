//! Top movers: gainers, losers and most traded.

use std::cmp::Ordering;

use crate::domain::coin::Coin;

pub const MOVERS_COUNT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Movers {
    pub gainers: Vec<Coin>,
    pub losers: Vec<Coin>,
    pub most_traded: Vec<Coin>,
}

pub fn movers(coins: &[Coin]) -> Movers {
    Movers {
        gainers: gainers(coins, MOVERS_COUNT).into_iter().cloned().collect(),
        losers: losers(coins, MOVERS_COUNT).into_iter().cloned().collect(),
        most_traded: most_traded(coins, MOVERS_COUNT).into_iter().cloned().collect(),
    }
}

/// Highest 24h change first. Ties keep snapshot order.
pub fn gainers(coins: &[Coin], n: usize) -> Vec<&Coin> {
    top_by(coins, n, |a, b| {
        b.price_change_percent_24h.total_cmp(&a.price_change_percent_24h)
    })
}

/// Lowest 24h change first. Ties keep snapshot order.
pub fn losers(coins: &[Coin], n: usize) -> Vec<&Coin> {
    top_by(coins, n, |a, b| {
        a.price_change_percent_24h.total_cmp(&b.price_change_percent_24h)
    })
}

/// Highest 24h volume first.
pub fn most_traded(coins: &[Coin], n: usize) -> Vec<&Coin> {
    top_by(coins, n, |a, b| b.total_volume_24h.total_cmp(&a.total_volume_24h))
}

/// Volume over market cap, the turnover shown next to most-traded coins.
pub fn volume_ratio(coin: &Coin) -> Option<f64> {
    (coin.market_cap > 0.0).then(|| coin.total_volume_24h / coin.market_cap)
}

fn top_by<F>(coins: &[Coin], n: usize, cmp: F) -> Vec<&Coin>
where
    F: Fn(&Coin, &Coin) -> Ordering,
{
    let mut sorted: Vec<&Coin> = coins.iter().collect();
    sorted.sort_by(|a, b| cmp(a, b));
    sorted.truncate(n);
    sorted
}
