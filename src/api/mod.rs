//! HTTP clients for the backend collaborators.
//!
//! [`ApiClient`] speaks JSON-over-HTTP to the delivery backend and
//! implements the collaborator traits the domain modules define
//! ([`CatalogClient`](crate::domain::catalog::CatalogClient),
//! [`OrdersClient`](crate::domain::orders::OrdersClient),
//! [`RatingsClient`](crate::domain::ratings::RatingsClient)). The payment
//! gateway is a separate host with its own client, [`ChapaGateway`].

use reqwest::{Client, RequestBuilder, Response};
use thiserror::Error;

mod catalog;
mod orders;
pub mod payment;
mod ratings;

pub use payment::{ChapaGateway, PaymentConfig};

/// Configuration for connecting to the delivery backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base address, e.g. `"https://gursha.example.com"`.
    pub base_url: String,

    /// Bearer token from the stored session; absent for anonymous calls.
    pub token: Option<String>,
}

/// Errors raised by backend collaborators.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP transport failed (connect, timeout, body decode).
    #[error("http transport failed")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text, when readable.
        message: String,
    },

    /// The backend answered 2xx but declined the requested state
    /// transition — e.g. the order already left `pending`.
    #[error("backend refused the transition: {0}")]
    TransitionRefused(String),

    /// The backend answered 2xx with a body this client cannot use.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}

/// HTTP client for the delivery backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Create a client bound to a loaded session's bearer token.
    #[must_use]
    pub fn for_session(base_url: impl Into<String>, session: &crate::session::Session) -> Self {
        Self::new(ApiConfig {
            base_url: base_url.into(),
            token: Some(session.token.clone()),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.post(self.url(path)))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.put(self.url(path)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Map a non-2xx response to [`ApiError::Status`], keeping whatever body
/// text the backend sent as the message.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let client = ApiClient::new(ApiConfig {
            base_url: "https://api.example.com/".to_string(),
            token: None,
        });

        assert_eq!(
            client.url("/api/foods/all"),
            "https://api.example.com/api/foods/all"
        );
    }
}
