//! Payment collaborator.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;

use crate::{api::ApiError, session::UserProfile};

/// Customer contact details handed to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    /// Display name.
    pub username: String,
    /// Contact number, when known.
    pub phone_number: Option<String>,
}

impl From<&UserProfile> for CustomerDetails {
    fn from(user: &UserProfile) -> Self {
        Self {
            username: user.username.clone(),
            phone_number: user.phone_number.clone(),
        }
    }
}

/// What the core hands to payment initiation: the amount — always the
/// cart projection's total — and who is paying. Everything else
/// (currency, transaction reference, return URLs) is gateway
/// configuration the core does not interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Amount to charge; equals the displayed cart total by construction.
    pub amount: Decimal,
    /// The paying customer.
    pub customer: CustomerDetails,
}

/// An initialized hosted-checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSession {
    /// Opaque redirect URL; following it leaves the page.
    pub checkout_url: String,
}

/// Hosted-payment initializer.
#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Initialize a payment and return the redirect URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the gateway call fails or answers without a
    /// usable redirect; no order has been created at that point.
    async fn initialize(&self, request: &PaymentRequest) -> Result<PaymentSession, ApiError>;
}
