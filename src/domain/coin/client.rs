//! Coins sub-client — the REST crypto list.

use super::wire::CoinPayload;
use super::Coin;
use crate::client::DashboardClient;
use crate::error::SdkError;

/// Sub-client for coin listings.
pub struct Coins<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Coins<'a> {
    /// `GET /cryptocurrencies`, in server order.
    ///
    /// Used to seed pickers (watchlist add) before the push channel has
    /// delivered a snapshot.
    pub async fn list(&self) -> Result<Vec<Coin>, SdkError> {
        let client = self.client;
        let url = client.http.url("/cryptocurrencies");
        let result = client
            .cancel
            .run(
                client
                    .http
                    .get::<Vec<CoinPayload>>(&url, client.read_retry.clone()),
            )
            .await;
        let payloads = client.observe(result).await?;
        Ok(payloads.into_iter().map(Coin::from).collect())
    }
}
