//! Client-side order lifecycle actions.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::{
    api::ApiError,
    domain::orders::{
        client::OrdersClient,
        models::{OrderRecord, OrderStatus},
    },
    session::UserId,
};

/// Errors raised by lifecycle actions.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The order already left `pending` locally; no call was issued.
    #[error("order is {0:?}; only pending orders can be cancelled")]
    NotCancellable(OrderStatus),

    /// The order already left `pending` locally; no call was issued.
    #[error("order is {0:?}; only pending orders can be accepted")]
    NotAcceptable(OrderStatus),

    /// The backend call failed.
    #[error("backend call failed")]
    Transport(#[from] ApiError),
}

/// Outcome of a client-initiated transition attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The backend applied the transition.
    Applied,

    /// The backend refused: the order changed state under us (a race with
    /// another party). `current` is the freshly fetched authoritative
    /// status, when the order could still be located — never a local
    /// guess.
    Refused {
        /// The backend's refusal message.
        message: String,
        /// Re-fetched status, if the order was found on refresh.
        current: Option<OrderStatus>,
    },
}

/// Read-only classification of backend orders plus the two initiator
/// actions the client owns: cancel (customer) and accept (delivery).
pub struct OrderLifecycle {
    client: Arc<dyn OrdersClient>,
}

impl std::fmt::Debug for OrderLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderLifecycle").finish_non_exhaustive()
    }
}

impl OrderLifecycle {
    /// Create a lifecycle view over the given collaborator.
    #[must_use]
    pub fn new(client: Arc<dyn OrdersClient>) -> Self {
        Self { client }
    }

    /// A customer's order history, newest state from the backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    pub async fn orders_for_user(&self, user: &UserId) -> Result<Vec<OrderRecord>, LifecycleError> {
        Ok(self.client.orders_for_user(user).await?)
    }

    /// The queue of pending orders awaiting a delivery user.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    pub async fn pending_orders(&self) -> Result<Vec<OrderRecord>, LifecycleError> {
        Ok(self.client.pending_orders().await?)
    }

    /// Orders the given delivery user has accepted.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    pub async fn accepted_orders(
        &self,
        delivery: &UserId,
    ) -> Result<Vec<OrderRecord>, LifecycleError> {
        Ok(self.client.accepted_orders(delivery).await?)
    }

    /// Cancel a pending order.
    ///
    /// If the backend reports the order already left `pending` (a delivery
    /// partner accepted it first), the authoritative status is re-fetched
    /// and returned — the cancel is never assumed to have succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotCancellable`] without issuing a call
    /// when the record is not pending, and a transport error when the
    /// backend call fails outright.
    pub async fn cancel(
        &self,
        user: &UserId,
        order: &OrderRecord,
    ) -> Result<TransitionOutcome, LifecycleError> {
        if !order.status.cancellable() {
            return Err(LifecycleError::NotCancellable(order.status));
        }

        match self.client.reject(&order.id).await {
            Ok(()) => Ok(TransitionOutcome::Applied),
            Err(ApiError::TransitionRefused(message)) => {
                let current = match self.client.orders_for_user(user).await {
                    Ok(orders) => orders
                        .into_iter()
                        .find(|candidate| candidate.id == order.id)
                        .map(|candidate| candidate.status),
                    Err(error) => {
                        warn!(error = %error, order = %order.id, "failed to refresh status after refused cancel");
                        None
                    }
                };

                Ok(TransitionOutcome::Refused { message, current })
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Accept a pending order for a delivery user.
    ///
    /// The backend is the sole arbiter of the race between delivery users
    /// viewing the same pending order; on refusal the pending queue is
    /// re-fetched to learn whether the order is still claimable.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotAcceptable`] without issuing a call
    /// when the record is not pending, and a transport error when the
    /// backend call fails outright.
    pub async fn accept(
        &self,
        delivery: &UserId,
        order: &OrderRecord,
    ) -> Result<TransitionOutcome, LifecycleError> {
        if !order.status.acceptable() {
            return Err(LifecycleError::NotAcceptable(order.status));
        }

        match self.client.accept(&order.id, delivery).await {
            Ok(()) => Ok(TransitionOutcome::Applied),
            Err(ApiError::TransitionRefused(message)) => {
                let current = match self.client.pending_orders().await {
                    Ok(queue) => queue
                        .iter()
                        .any(|candidate| candidate.id == order.id)
                        .then_some(OrderStatus::Pending),
                    Err(error) => {
                        warn!(error = %error, order = %order.id, "failed to refresh queue after refused accept");
                        None
                    }
                };

                Ok(TransitionOutcome::Refused { message, current })
            }
            Err(error) => Err(error.into()),
        }
    }
}
