//! # CryptoDash SDK
//!
//! Client SDK for the CryptoDash dashboard: live prices, chat presence,
//! session, profile and watchlist.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Newtypes, formatters, domain models and state containers
//! 2. **Push channel** — `Transport` seam with a `tokio-tungstenite` implementation
//! 3. **Subscription Store** — Live price snapshot, conversation and presence
//! 4. **Views** — Pure, memoized derivations over a snapshot
//! 5. **HTTP API** — `DashboardHttp` with cookie session, CSRF echo and retry policies
//! 6. **High-Level Client** — `DashboardClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cryptodash_sdk::prelude::*;
//!
//! let client = DashboardClientBuilder::from_env().build()?;
//! client.auth().login("alice", "hunter2").await?;
//!
//! let store = client.subscription_store().await;
//! store.connect().await?;
//!
//! let mut views = client.views();
//! let snapshot = store.snapshot().await;
//! let rows = views.page_rows(&snapshot);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, cancellation and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants and environment overrides.
pub mod network;

/// Navigator / notifier seams for route changes and toasts.
pub mod services;

// ── Layer 2: Push channel ────────────────────────────────────────────────────

/// Frames, events and the transport trait.
pub mod ws;

// ── Layer 3: Subscription Store ──────────────────────────────────────────────

pub mod store;

// ── Layer 4: Views ───────────────────────────────────────────────────────────

/// Ticker, overview, distribution, movers, table, search and pagination.
pub mod views;

// ── Layer 5: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 6: High-Level Client ───────────────────────────────────────────────

/// `DashboardClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared
    pub use crate::shared::fmt::{
        format_change_arrow, format_currency, format_number, format_percentage,
        format_signed_percentage, format_usd,
    };
    pub use crate::shared::{CancelToken, CoinId, Route, UserId};

    // Domain types
    pub use crate::domain::chat::{ChatMessage, Conversation, OnlineUser, OnlineUsers};
    pub use crate::domain::coin::{Coin, PriceSnapshot};
    pub use crate::domain::profile::{ProfileEditor, ProfileUpdate};
    pub use crate::domain::session::{
        SessionAction, SessionPhase, SessionState, SessionStore, User,
    };
    pub use crate::domain::watchlist::{Watchlist, WatchlistEntry};

    // Errors
    pub use crate::error::{AuthError, ErrorSurface, HttpError, SdkError, WsError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_WS_URL};

    // Services
    pub use crate::services::{LogNavigator, LogNotifier, Navigator, Notifier};

    // Push channel + store
    pub use crate::store::{LiveState, SubscriptionStore};
    pub use crate::ws::{Kind, MessageIn, MessageOut, Transport, WsConfig, WsEvent};

    // Views
    pub use crate::views::{
        DerivedViews, Direction, Distribution, MarketOverview, Movers, PageSize, PageWindow,
        Pagination, TableRow, Ticker, TickerEntry,
    };

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        AuthClient, CoinsClient, DashboardClient, DashboardClientBuilder, ProfilesClient,
        WatchlistsClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
