//! Low-level HTTP client — `DashboardHttp`.
//!
//! Generic JSON request methods with retry policies, cookie-based session
//! auth, CSRF echo and a one-shot session refresh on 401. Sub-clients in `domain/<name>/client.rs` build URLs
//! and call into this.

use crate::error::HttpError;
use crate::http::retry::RetryPolicy;

use async_lock::RwLock;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Cookie holding the CSRF token set by the backend.
pub const CSRF_COOKIE: &str = "csrf_token";

/// Header the CSRF token is echoed in on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// Endpoint that renews the session cookie after a 401.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Low-level HTTP client for the dashboard REST API.
pub struct DashboardHttp {
    base_url: String,
    client: Client,
    cookies: Arc<Jar>,
    /// Session token fallback. NEVER exposed publicly.
    auth_token: Arc<RwLock<Option<String>>>,
}

impl DashboardHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        let cookies = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            cookies,
            auth_token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path (`"/user/signin"`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    pub(crate) async fn clear_auth_token(&self) {
        *self.auth_token.write().await = None;
    }

    /// Token for authenticating the chat channel.
    pub(crate) async fn auth_token(&self) -> Option<String> {
        self.auth_token.read().await.clone()
    }

    /// Current CSRF token from the cookie jar.
    pub fn csrf_token(&self) -> Option<String> {
        let url = Url::parse(&self.base_url).ok()?;
        let header = self.cookies.cookies(&url)?;
        cookie_value(header.to_str().ok()?, CSRF_COOKIE)
    }

    // ── Request methods ──────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(Method::GET, url, None::<&()>, retry)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(Method::POST, url, Some(body), retry)
            .await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(Method::PUT, url, Some(body), retry)
            .await
    }

    /// Send with `retry`, renewing the session once on a 401.
    ///
    /// A 401 triggers a single `POST /auth/refresh`. If that succeeds the
    /// request is replayed once and its outcome returned as-is; if it fails
    /// the original 401 comes back for the session-expiry handling.
    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        match self.send_with_policy(&method, url, body, &retry).await {
            Err(HttpError::Unauthorized) if url != self.url(REFRESH_PATH) => {
                if let Err(e) = self.refresh_session().await {
                    tracing::debug!(error = %e, "Session refresh failed");
                    return Err(HttpError::Unauthorized);
                }
                tracing::debug!(%method, url, "Session refreshed, replaying request");
                self.send_with_policy(&method, url, body, &retry).await
            }
            other => other,
        }
    }

    /// `POST /auth/refresh`. A `token` in the reply replaces the bearer token.
    async fn refresh_session(&self) -> Result<(), HttpError> {
        let url = self.url(REFRESH_PATH);
        let reply: serde_json::Value = self
            .send_with_policy(
                &Method::POST,
                &url,
                Some(&serde_json::json!({})),
                &RetryPolicy::None,
            )
            .await?;
        if let Some(token) = reply.get("token").and_then(|t| t.as_str()) {
            self.set_auth_token(Some(token.to_string())).await;
        }
        Ok(())
    }

    async fn send_with_policy<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &Method,
        url: &str,
        body: Option<&B>,
        retry: &RetryPolicy,
    ) -> Result<T, HttpError> {
        let Some(config) = retry.config() else {
            return self.do_request(method, url, body).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if config.should_retry(&e) && attempt < config.max_retries {
                        let delay = match &e {
                            HttpError::RateLimited {
                                retry_after_ms: Some(ms),
                            } => Duration::from_millis(*ms),
                            _ => config.delay_for_attempt(attempt),
                        };
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);

        if let Some(token) = self.auth_token.read().await.as_ref() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        if is_mutating(method) {
            if let Some(csrf) = self.csrf_token() {
                req = req.header(CSRF_HEADER, csrf);
            }
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let text = resp.text().await?;
            let text = if text.trim().is_empty() { "null" } else { text.as_str() };
            return serde_json::from_str(text).map_err(|e| HttpError::InvalidBody(e.to_string()));
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        tracing::debug!(status = status_code, %method, url, "Request failed");

        match status_code {
            401 => Err(HttpError::Unauthorized),
            403 => Err(HttpError::Forbidden(body_text)),
            404 => Err(HttpError::NotFound(body_text)),
            408 => Err(HttpError::Timeout),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for DashboardHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            cookies: self.cookies.clone(),
            auth_token: self.auth_token.clone(),
        }
    }
}

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Read one cookie's value out of a `Cookie` header string.
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
