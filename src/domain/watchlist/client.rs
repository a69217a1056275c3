//! Watchlists sub-client — load and add starred coins.

use super::wire::{AddWatchlistRequest, WatchlistItem};
use super::{Watchlist, WatchlistEntry};
use crate::client::DashboardClient;
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::CoinId;

pub struct Watchlists<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Watchlists<'a> {
    /// `GET /watchlist`, converted to entries.
    pub async fn list(&self) -> Result<Vec<WatchlistEntry>, SdkError> {
        let client = self.client;
        let url = client.http.url("/watchlist");
        let result = client
            .cancel
            .run(
                client
                    .http
                    .get::<Vec<WatchlistItem>>(&url, client.read_retry.clone()),
            )
            .await;
        let items = client.observe(result).await?;
        Ok(items.into_iter().map(WatchlistEntry::from).collect())
    }

    /// Load the server list into `watchlist`.
    pub async fn refresh(&self, watchlist: &mut Watchlist) -> Result<(), SdkError> {
        let entries = self.list().await?;
        watchlist.replace(entries);
        Ok(())
    }

    /// Add a coin.
    ///
    /// The entry lands in `watchlist` before the request goes out and stays
    /// there even if the server rejects it. Nothing is sent when the coin is
    /// already watched or the handle is cancelled.
    pub async fn add(
        &self,
        watchlist: &mut Watchlist,
        entry: WatchlistEntry,
    ) -> Result<(), SdkError> {
        let client = self.client;
        client.cancel.check()?;

        let request = AddWatchlistRequest {
            cryptocurrency_id: entry.id.clone(),
        };
        if !watchlist.add(entry) {
            return Ok(());
        }

        let url = client.http.url("/watchlist");
        let result = client
            .cancel
            .run(
                client
                    .http
                    .post::<serde_json::Value, _>(&url, &request, RetryPolicy::None),
            )
            .await;
        if let Err(err) = &result {
            tracing::debug!(coin = %request.cryptocurrency_id, error = %err, "Watchlist add not confirmed");
        }
        client.observe(result).await?;
        Ok(())
    }

    /// Remove a coin. The backend has no delete route, so this is local only.
    pub fn remove(&self, watchlist: &mut Watchlist, id: &CoinId) -> bool {
        watchlist.remove(id)
    }
}
