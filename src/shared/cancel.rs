//! Cooperative cancellation for async operations.
//!
//! A view creates one `CancelToken` per mount, scopes its client with it
//! (`client.scoped(&token)`) and cancels it on teardown. Operations raced
//! against a cancelled token return `SdkError::Cancelled` and skip every
//! state mutation that would have followed the response.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use crate::error::SdkError;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Shared cancellation flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every operation observing this token. Idempotent.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Completes once the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// Return `Err(Cancelled)` if the token has fired.
    pub fn check(&self) -> Result<(), SdkError> {
        if self.is_cancelled() {
            Err(SdkError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Race `fut` against cancellation.
    pub async fn run<T, E, F>(&self, fut: F) -> Result<T, SdkError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<SdkError>,
    {
        self.check()?;
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(SdkError::Cancelled),
            out = fut => out.map_err(Into::into),
        }
    }
}
