//! Conversions from wire types to domain types for coins.

use super::wire::CoinPayload;
use super::Coin;

impl From<CoinPayload> for Coin {
    fn from(p: CoinPayload) -> Self {
        Self {
            id: p.id,
            symbol: p.symbol,
            name: p.name,
            image_url: p.image,
            current_price: p.current_price,
            market_cap: p.market_cap,
            market_cap_rank: p.market_cap_rank,
            price_change_percent_24h: p.price_change_percentage_24h,
            total_volume_24h: p.total_volume,
            circulating_supply: p.circulating_supply,
            max_supply: p.max_supply,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload_conversion() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.example/btc.png",
            "current_price": 51234.78,
            "market_cap": 1000000000000,
            "market_cap_rank": 1,
            "price_change_percentage_24h": 2.34,
            "total_volume": 35000000000,
            "circulating_supply": 19500000,
            "max_supply": 21000000
        }"#;
        let payload: CoinPayload = serde_json::from_str(json).unwrap();
        let coin: Coin = payload.into();
        assert_eq!(coin.id.as_str(), "bitcoin");
        assert_eq!(coin.image_url, "https://assets.example/btc.png");
        assert_eq!(coin.market_cap_rank, 1);
        assert_eq!(coin.price_change_percent_24h, 2.34);
        assert_eq!(coin.total_volume_24h, 35_000_000_000.0);
        assert_eq!(coin.max_supply, Some(21_000_000.0));
    }

    #[test]
    fn test_partial_payload_passes_through() {
        let payload: CoinPayload = serde_json::from_str(r#"{"id":"x","symbol":"x"}"#).unwrap();
        let coin: Coin = payload.into();
        assert_eq!(coin.id.as_str(), "x");
        assert_eq!(coin.market_cap, 0.0);
        assert_eq!(coin.max_supply, None);
        assert!(coin.name.is_empty());
    }

    #[test]
    fn test_null_max_supply() {
        let payload: CoinPayload =
            serde_json::from_str(r#"{"id":"eth","max_supply":null}"#).unwrap();
        assert_eq!(Coin::from(payload).max_supply, None);
    }
}
