//! High-level client — `DashboardClient` with nested sub-client accessors.
//!
//! Each REST domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared session, the injected UI
//! services and the global error handler every sub-client funnels through.

use crate::domain::coin::client::Coins;
use crate::domain::profile::client::Profiles;
use crate::domain::session::client::Auth;
use crate::domain::session::SessionStore;
use crate::domain::watchlist::client::Watchlists;
use crate::error::{ErrorSurface, SdkError};
use crate::http::{DashboardHttp, RetryPolicy};
use crate::services::{LogNavigator, LogNotifier, Navigator, Notifier};
use crate::shared::{CancelToken, Route};
use crate::views::{DerivedViews, PageSize};
use crate::ws::WsConfig;

use std::sync::Arc;

pub use crate::domain::coin::client::Coins as CoinsClient;
pub use crate::domain::profile::client::Profiles as ProfilesClient;
pub use crate::domain::session::client::Auth as AuthClient;
pub use crate::domain::watchlist::client::Watchlists as WatchlistsClient;

/// The primary entry point for the dashboard SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.auth()`, `client.watchlist()`, etc. Clones share the HTTP
/// connection pool, cookie jar and session.
pub struct DashboardClient {
    pub(crate) http: DashboardHttp,
    pub(crate) ws_config: WsConfig,
    pub(crate) session: SessionStore,
    pub(crate) navigator: Arc<dyn Navigator>,
    pub(crate) notifier: Arc<dyn Notifier>,
    /// Token every REST call on this handle is raced against.
    pub(crate) cancel: CancelToken,
    /// Policy for GET endpoints. Writes never retry.
    pub(crate) read_retry: RetryPolicy,
    pub(crate) page_size: PageSize,
}

impl DashboardClient {
    pub fn builder() -> DashboardClientBuilder {
        DashboardClientBuilder::default()
    }

    /// A handle whose operations are cancelled by `token`.
    ///
    /// Views create one token per mount and cancel it on teardown.
    pub fn scoped(&self, token: &CancelToken) -> Self {
        Self {
            cancel: token.clone(),
            ..self.clone()
        }
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn coins(&self) -> Coins<'_> {
        Coins { client: self }
    }

    pub fn profile(&self) -> Profiles<'_> {
        Profiles { client: self }
    }

    pub fn watchlist(&self) -> Watchlists<'_> {
        Watchlists { client: self }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn ws_config(&self) -> &WsConfig {
        &self.ws_config
    }

    /// Fresh memoized view layer using the configured page size.
    pub fn views(&self) -> DerivedViews {
        DerivedViews::new(self.page_size)
    }

    /// Build a subscription store over a native WS transport.
    ///
    /// The store is not connected yet; the caller owns its lifetime and
    /// calls `connect()` / `disconnect()` around the view that needs it.
    #[cfg(feature = "ws-native")]
    pub async fn subscription_store(&self) -> crate::store::SubscriptionStore {
        let mut config = self.ws_config.clone();
        if let Some(token) = self.http.auth_token().await {
            config.url = with_token(&config.url, &token);
        }
        let store = crate::store::SubscriptionStore::new(crate::ws::native::WsClient::new(config));
        let me = self.session.user().await.map(|u| u.id);
        store.set_current_user(me).await;
        store
    }

    /// Global response handler. Every sub-client result passes through here.
    ///
    /// 401 clears the session and returns to the login route. Connectivity
    /// and server errors go to the notifier. Validation errors are left to
    /// the caller, and cancelled operations surface nowhere.
    pub(crate) async fn observe<T>(&self, result: Result<T, SdkError>) -> Result<T, SdkError> {
        if let Err(err) = &result {
            match err.surface() {
                ErrorSurface::SessionExpired => {
                    tracing::info!("Session expired, returning to login");
                    self.http.clear_auth_token().await;
                    self.session.reset().await;
                    self.navigator.navigate(Route::Login);
                }
                ErrorSurface::Connectivity | ErrorSurface::Notify(_) => {
                    tracing::debug!(error = %err, "Request failed");
                    self.notifier.error(&err.user_message());
                }
                ErrorSurface::Validation(_) | ErrorSurface::Silent => {}
            }
        }
        result
    }
}

impl Clone for DashboardClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            ws_config: self.ws_config.clone(),
            session: self.session.clone(),
            navigator: self.navigator.clone(),
            notifier: self.notifier.clone(),
            cancel: self.cancel.clone(),
            read_retry: self.read_retry.clone(),
            page_size: self.page_size,
        }
    }
}

#[cfg(feature = "ws-native")]
fn with_token(url: &str, token: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}token={}", urlencoding::encode(token))
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct DashboardClientBuilder {
    base_url: String,
    ws_url: String,
    read_retry: RetryPolicy,
    page_size: PageSize,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl Default for DashboardClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            ws_url: crate::network::DEFAULT_WS_URL.to_string(),
            read_retry: RetryPolicy::None,
            page_size: PageSize::default(),
            navigator: Arc::new(LogNavigator),
            notifier: Arc::new(LogNotifier),
        }
    }
}

impl DashboardClientBuilder {
    /// Defaults overridden by `CRYPTODASH_API_URL` / `CRYPTODASH_WS_URL`.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Some(url) = crate::network::api_url_from_env() {
            builder.base_url = url;
        }
        if let Some(url) = crate::network::ws_url_from_env() {
            builder.ws_url = url;
        }
        builder
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn ws_url(mut self, url: &str) -> Self {
        self.ws_url = url.to_string();
        self
    }

    /// Retry policy for read endpoints.
    pub fn read_retry(mut self, policy: RetryPolicy) -> Self {
        self.read_retry = policy;
        self
    }

    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn build(self) -> Result<DashboardClient, SdkError> {
        Ok(DashboardClient {
            http: DashboardHttp::new(&self.base_url)?,
            ws_config: WsConfig {
                url: self.ws_url,
                ..WsConfig::default()
            },
            session: SessionStore::new(),
            navigator: self.navigator,
            notifier: self.notifier,
            cancel: CancelToken::new(),
            read_retry: self.read_retry,
            page_size: self.page_size,
        })
    }
}
