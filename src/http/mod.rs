//! HTTP layer — `DashboardHttp` with cookie session, CSRF echo and retry policies.

pub mod client;
pub mod retry;

pub use client::DashboardHttp;
pub use retry::{RetryConfig, RetryPolicy};
