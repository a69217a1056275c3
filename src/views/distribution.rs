//! Market-cap distribution: the top N coins plus an "Others" bucket.

use crate::domain::coin::Coin;

pub const DEFAULT_TOP_N: usize = 10;
pub const OTHERS_LABEL: &str = "Others";

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    /// Upper-cased symbol, or "Others".
    pub label: String,
    pub market_cap: f64,
    /// Share of the total in percent. Zero when the total is zero.
    pub share: f64,
}

impl Slice {
    /// Share rounded to a whole percent, as the chart tooltip shows it.
    pub fn rounded_share(&self) -> u32 {
        self.share.round().max(0.0) as u32
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    pub slices: Vec<Slice>,
    pub total: f64,
}

impl Distribution {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn others(&self) -> Option<&Slice> {
        self.slices.last().filter(|s| s.label == OTHERS_LABEL)
    }
}

/// Head of the sequence (snapshot order) plus one bucket for the tail.
///
/// Empty input gives an empty distribution; otherwise "Others" is always
/// present, possibly at zero.
pub fn distribution(coins: &[Coin], top_n: usize) -> Distribution {
    if coins.is_empty() {
        return Distribution::default();
    }
    let split = top_n.min(coins.len());
    let (head, tail) = coins.split_at(split);
    let others: f64 = tail.iter().map(|c| c.market_cap).sum();
    let total: f64 = head.iter().map(|c| c.market_cap).sum::<f64>() + others;

    let share = |cap: f64| if total > 0.0 { cap / total * 100.0 } else { 0.0 };

    let mut slices: Vec<Slice> = head
        .iter()
        .map(|c| Slice {
            label: c.display_symbol(),
            market_cap: c.market_cap,
            share: share(c.market_cap),
        })
        .collect();
    slices.push(Slice {
        label: OTHERS_LABEL.to_string(),
        market_cap: others,
        share: share(others),
    });

    Distribution { slices, total }
}
