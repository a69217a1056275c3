//! Wire types for the watchlist endpoints.

use crate::shared::{CoinId, UserId};
use serde::{Deserialize, Serialize};

/// Coin fields embedded in a watchlist item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchedCoin {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub image: String,
    pub current_price: f64,
    pub price_change_percentage_24h: f64,
    pub market_cap: f64,
}

/// One row of `GET /watchlist`, and the reply to `POST /watchlist`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub cryptocurrency_id: CoinId,
    #[serde(default)]
    pub cryptocurrency: Option<WatchedCoin>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `POST /watchlist` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWatchlistRequest {
    pub cryptocurrency_id: CoinId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_backend_shape() {
        let item: WatchlistItem = serde_json::from_str(
            r#"{
                "id": "w1",
                "userId": "u1",
                "cryptocurrencyId": "bitcoin",
                "cryptocurrency": {
                    "id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
                    "image": "btc.png", "current_price": 51234.78,
                    "price_change_percentage_24h": 2.34, "market_cap": 1e12
                },
                "createdAt": "2024-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(item.cryptocurrency_id.as_str(), "bitcoin");
        assert_eq!(item.cryptocurrency.unwrap().symbol, "btc");
    }

    #[test]
    fn test_add_request_is_camel_case() {
        let body = serde_json::to_value(AddWatchlistRequest {
            cryptocurrency_id: CoinId::from("ethereum"),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"cryptocurrencyId": "ethereum"}));
    }
}
