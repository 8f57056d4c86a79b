//! Hosted payment gateway.
//!
//! The core only needs "initialize a payment for this amount, give me a
//! redirect URL". This module adapts that contract to the Chapa hosted
//! checkout API; everything Chapa-specific (currency, keys, return URLs,
//! transaction references) lives in [`PaymentConfig`].

use async_trait::async_trait;
use rand::{Rng, distributions::Alphanumeric};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiError, ensure_success},
    domain::checkout::{PaymentGateway, PaymentRequest, PaymentSession},
};

/// Configuration for the hosted payment gateway.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Gateway API base, e.g. `"https://api.chapa.co/v1"`.
    pub api_url: String,

    /// Publishable key sent as the bearer token.
    pub public_key: String,

    /// Charge currency, e.g. `"ETB"`.
    pub currency: String,

    /// Where the gateway sends the user back after paying.
    pub return_url: String,

    /// Where the gateway posts the payment verification.
    pub callback_url: String,
}

/// Client for the Chapa hosted checkout initializer.
#[derive(Debug, Clone)]
pub struct ChapaGateway {
    config: PaymentConfig,
    http: Client,
}

impl ChapaGateway {
    /// Create a new gateway client from the given configuration.
    #[must_use]
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct InitializeDto<'a> {
    /// Chapa takes the amount as a decimal string.
    amount: String,
    currency: &'a str,
    email: String,
    first_name: &'a str,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
    tx_ref: String,
    return_url: &'a str,
    callback_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct InitializeResponse {
    status: String,
    #[serde(default)]
    data: Option<InitializeData>,
}

#[derive(Debug, Deserialize)]
struct InitializeData {
    #[serde(default)]
    checkout_url: Option<String>,
}

/// A fresh reference for one initialization attempt, 13 lowercase
/// alphanumerics like the reference the original client generated.
fn transaction_reference() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(13)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

#[async_trait]
impl PaymentGateway for ChapaGateway {
    async fn initialize(&self, request: &PaymentRequest) -> Result<PaymentSession, ApiError> {
        let customer = &request.customer;

        let body = InitializeDto {
            amount: request.amount.to_string(),
            currency: &self.config.currency,
            // The platform does not collect customer emails; the gateway
            // requires one, so a synthetic address is derived from the
            // username as the original client did.
            email: format!("{}@gmail.com", customer.username),
            first_name: &customer.username,
            last_name: &customer.username,
            phone_number: customer.phone_number.as_deref(),
            tx_ref: transaction_reference(),
            return_url: &self.config.return_url,
            callback_url: &self.config.callback_url,
        };

        let response = self
            .http
            .post(format!(
                "{}/transaction/initialize",
                self.config.api_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.config.public_key)
            .json(&body)
            .send()
            .await?;

        let parsed: InitializeResponse = ensure_success(response).await?.json().await?;

        if parsed.status != "success" {
            return Err(ApiError::UnexpectedResponse(format!(
                "payment initialization answered status {:?}",
                parsed.status
            )));
        }

        parsed
            .data
            .and_then(|data| data.checkout_url)
            .map(|checkout_url| PaymentSession { checkout_url })
            .ok_or_else(|| {
                ApiError::UnexpectedResponse(
                    "payment initialization returned no checkout url".to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_references_are_short_lowercase_tokens() {
        let reference = transaction_reference();

        assert_eq!(reference.len(), 13, "reference length");
        assert!(
            reference
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
            "unexpected characters in {reference:?}"
        );
    }

    #[test]
    fn consecutive_references_differ() {
        assert_ne!(
            transaction_reference(),
            transaction_reference(),
            "references must not repeat across attempts"
        );
    }
}
