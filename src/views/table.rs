//! Display rows for the cryptocurrency table.

use crate::domain::coin::{Coin, PriceSnapshot};
use crate::shared::fmt::{format_change_arrow, format_currency, format_number};
use crate::shared::CoinId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn of(change: f64) -> Self {
        if change >= 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub rank: u32,
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub image_url: String,
    pub price: String,
    pub change: String,
    pub direction: Direction,
    pub market_cap: String,
    pub volume: String,
    /// e.g. `19,500,000 BTC`
    pub circulating_supply: String,
    /// Circulating / max supply for the progress bar.
    pub supply_ratio: Option<f64>,
}

impl TableRow {
    /// `position` is the 0-based place in the snapshot, used when the
    /// backend sent no rank.
    pub fn new(coin: &Coin, position: usize) -> Self {
        let symbol = coin.display_symbol();
        let rank = if coin.market_cap_rank > 0 {
            coin.market_cap_rank
        } else {
            u32::try_from(position + 1).unwrap_or(u32::MAX)
        };
        Self {
            rank,
            id: coin.id.clone(),
            name: coin.name.clone(),
            image_url: coin.image_url.clone(),
            price: format_currency(coin.current_price),
            change: format_change_arrow(coin.price_change_percent_24h),
            direction: Direction::of(coin.price_change_percent_24h),
            market_cap: format_currency(coin.market_cap),
            volume: format_currency(coin.total_volume_24h),
            circulating_supply: format!("{} {}", format_number(coin.circulating_supply), symbol),
            supply_ratio: coin.supply_ratio(),
            symbol,
        }
    }
}

/// Rows for the given snapshot positions.
pub fn rows(snapshot: &PriceSnapshot, positions: &[usize]) -> Vec<TableRow> {
    positions
        .iter()
        .filter_map(|&i| snapshot.coins().get(i).map(|c| TableRow::new(c, i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::fixtures::coin;

    #[test]
    fn test_row_formatting() {
        let mut btc = coin("bitcoin", "btc", 1_000_000_000_000.0, -1.5);
        btc.current_price = 51_234.78;
        btc.total_volume_24h = 35_000_000_000.0;
        btc.circulating_supply = 19_500_000.0;
        btc.max_supply = Some(21_000_000.0);
        btc.market_cap_rank = 1;

        let row = TableRow::new(&btc, 0);
        assert_eq!(row.rank, 1);
        assert_eq!(row.symbol, "BTC");
        assert_eq!(row.price, "$51234.78");
        assert_eq!(row.change, "↓ 1.50%");
        assert_eq!(row.direction, Direction::Down);
        assert_eq!(row.market_cap, "$1.00T");
        assert_eq!(row.volume, "$35.00B");
        assert_eq!(row.circulating_supply, "19,500,000 BTC");
        assert!((row.supply_ratio.unwrap() - 0.928_571).abs() < 1e-5);
    }

    #[test]
    fn test_rank_falls_back_to_position() {
        let row = TableRow::new(&coin("x", "x", 1.0, 0.0), 6);
        assert_eq!(row.rank, 7);
        assert_eq!(row.direction, Direction::Up);
        assert!(row.supply_ratio.is_none());
    }

    #[test]
    fn test_rows_skip_stale_positions() {
        let snapshot = PriceSnapshot::new(1, vec![coin("a", "a", 1.0, 0.0)]);
        assert_eq!(rows(&snapshot, &[0, 5]).len(), 1);
    }
}
