//! Order collaborator.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    api::ApiError,
    domain::orders::models::{OrderId, OrderRecord, OrderRequest},
    session::UserId,
};

/// Backend order endpoints.
///
/// `create_order` is called once per cart line by the checkout
/// orchestrator; the transition calls report refusal as
/// [`ApiError::TransitionRefused`] so callers can distinguish "lost the
/// race" from transport failure.
#[automock]
#[async_trait]
pub trait OrdersClient: Send + Sync {
    /// Create one order.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend rejects or fails the creation.
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderRecord, ApiError>;

    /// A customer's order history.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    async fn orders_for_user(&self, user: &UserId) -> Result<Vec<OrderRecord>, ApiError>;

    /// The global queue of pending orders awaiting a delivery user.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    async fn pending_orders(&self) -> Result<Vec<OrderRecord>, ApiError>;

    /// Orders a delivery user has accepted.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    async fn accepted_orders(&self, delivery: &UserId) -> Result<Vec<OrderRecord>, ApiError>;

    /// Claim a pending order for a delivery user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TransitionRefused`] when another delivery user
    /// won the race, and a transport error otherwise.
    async fn accept(&self, order: &OrderId, delivery: &UserId) -> Result<(), ApiError>;

    /// Cancel a pending order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TransitionRefused`] when the order already left
    /// `pending`, and a transport error otherwise.
    async fn reject(&self, order: &OrderId) -> Result<(), ApiError>;
}
